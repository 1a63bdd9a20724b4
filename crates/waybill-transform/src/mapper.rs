use tracing::{debug, warn};
use waybill_model::{SourceRecord, SourceTable, TargetRecord};

use crate::rules::{DEFAULT_RULES, MappingRule};

/// Maps source records onto the fixed target schema, one to one and in order.
#[derive(Debug, Clone)]
pub struct SchemaMapper {
    group_column: String,
    rules: &'static [MappingRule],
}

/// The mapper's output, co-indexed with the source table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedTable {
    records: Vec<TargetRecord>,
}

impl MappedTable {
    pub fn records(&self) -> &[TargetRecord] {
        &self.records
    }

    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    pub fn into_records(self) -> Vec<TargetRecord> {
        self.records
    }
}

impl SchemaMapper {
    pub fn new(group_column: impl Into<String>) -> Self {
        Self {
            group_column: group_column.into(),
            rules: DEFAULT_RULES,
        }
    }

    pub fn with_rules(mut self, rules: &'static [MappingRule]) -> Self {
        self.rules = rules;
        self
    }

    pub fn group_column(&self) -> &str {
        &self.group_column
    }

    pub fn rules(&self) -> &'static [MappingRule] {
        self.rules
    }

    /// Rule source columns the table does not have, in rule order.
    pub fn missing_sources(&self, table: &SourceTable) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> = Vec::new();
        for source in self.rules.iter().flat_map(MappingRule::sources) {
            if !table.has_column(source) && !missing.contains(&source) {
                missing.push(source);
            }
        }
        missing
    }

    pub fn map_record(&self, record: &SourceRecord<'_>) -> TargetRecord {
        let mut out = TargetRecord::new(record.get(&self.group_column).clone());
        for rule in self.rules {
            rule.apply(record, &mut out);
        }
        out
    }

    pub fn map(&self, table: &SourceTable) -> MappedTable {
        let missing = self.missing_sources(table);
        if !missing.is_empty() {
            warn!(
                columns = %missing.join(", "),
                "source columns absent; dependent target columns will be empty"
            );
        }
        let records: Vec<TargetRecord> = table
            .records()
            .map(|record| self.map_record(&record))
            .collect();
        debug!(rows = records.len(), rules = self.rules.len(), "mapped records");
        MappedTable { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waybill_model::columns::{MILEAGE, OWNER_NAME, REGION, UNIT_PRICE};
    use waybill_model::{CellValue, TargetColumn};

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> SourceTable {
        SourceTable::with_rows(columns.iter().map(|c| (*c).to_string()).collect(), rows).unwrap()
    }

    #[test]
    fn keeps_length_and_order() {
        let source = table(
            &[REGION, OWNER_NAME],
            vec![
                vec!["A".into(), "甲".into()],
                vec!["B".into(), "乙".into()],
                vec!["A".into(), "丙".into()],
            ],
        );
        let mapped = SchemaMapper::new(REGION).map(&source);
        assert_eq!(mapped.row_count(), 3);
        let owners: Vec<String> = mapped
            .records()
            .iter()
            .map(|r| r.get(TargetColumn::ConsigneeName).to_string())
            .collect();
        assert_eq!(owners, vec!["甲", "乙", "丙"]);
        assert_eq!(mapped.records()[1].group_value(), &CellValue::from("B"));
    }

    #[test]
    fn empty_table_maps_to_empty() {
        let mapped = SchemaMapper::new(REGION).map(&table(&[REGION], Vec::new()));
        assert_eq!(mapped.row_count(), 0);
    }

    #[test]
    fn group_column_named_like_a_target_stays_in_the_carrier() {
        let source = table(&["司机"], vec![vec!["王五".into()]]);
        let mapped = SchemaMapper::new("司机").map(&source);
        let record = &mapped.records()[0];
        assert_eq!(record.group_value(), &CellValue::from("王五"));
        assert!(record.get(TargetColumn::Driver).is_missing());
    }

    #[test]
    fn reports_absent_sources_once() {
        let source = table(&[REGION, MILEAGE], Vec::new());
        let missing = SchemaMapper::new(REGION).missing_sources(&source);
        assert!(missing.contains(&UNIT_PRICE));
        assert!(!missing.contains(&MILEAGE));
        let mut deduped = missing.clone();
        deduped.dedup();
        assert_eq!(deduped, missing);
    }
}
