//! Declarative derivation rules from source columns to the target schema.

use std::fmt;
use std::slice;

use waybill_model::columns::{
    DRIVER_NAME, DRIVER_PHONE, LOAD_TIME, LOADED_QUANTITY, MILEAGE, OWNER_NAME, PLATE,
    UNIT_PRICE, UNLOAD_TIME,
};
use waybill_model::{CellValue, SourceRecord, TargetColumn, TargetRecord};

use crate::coerce::{coerce_datetime, coerce_numeric, format_timestamp};

/// A single derivation. Each rule reads only from the source record and
/// writes only its own targets, so rule order never matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingRule {
    /// Copy one source value unchanged.
    Rename {
        source: &'static str,
        target: TargetColumn,
    },
    /// Reformat a date/time value as `YYYY/MM/DD HH:MM`. Present values that
    /// are not timestamps pass through unchanged.
    Timestamp {
        source: &'static str,
        target: TargetColumn,
    },
    /// Copy one source value into several targets.
    Broadcast {
        source: &'static str,
        targets: &'static [TargetColumn],
    },
    /// Numeric product of two sources; missing when either operand is.
    Product {
        left: &'static str,
        right: &'static str,
        target: TargetColumn,
    },
}

/// Rules applied by [`crate::SchemaMapper`] unless told otherwise.
pub const DEFAULT_RULES: &[MappingRule] = &[
    MappingRule::Rename {
        source: DRIVER_NAME,
        target: TargetColumn::Driver,
    },
    MappingRule::Rename {
        source: DRIVER_PHONE,
        target: TargetColumn::DriverPhone,
    },
    MappingRule::Rename {
        source: PLATE,
        target: TargetColumn::Plate,
    },
    MappingRule::Timestamp {
        source: LOAD_TIME,
        target: TargetColumn::LoadTime,
    },
    MappingRule::Timestamp {
        source: UNLOAD_TIME,
        target: TargetColumn::UnloadTime,
    },
    MappingRule::Broadcast {
        source: OWNER_NAME,
        targets: &[
            TargetColumn::ConsigneeName,
            TargetColumn::ConsigneeAddressLabel,
            TargetColumn::ConsigneeContact,
        ],
    },
    MappingRule::Broadcast {
        source: LOADED_QUANTITY,
        targets: &[TargetColumn::LoadedTons, TargetColumn::UnloadedTons],
    },
    MappingRule::Product {
        left: MILEAGE,
        right: UNIT_PRICE,
        target: TargetColumn::DriverTariff,
    },
];

impl MappingRule {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Rename { .. } => "rename",
            Self::Timestamp { .. } => "timestamp",
            Self::Broadcast { .. } => "broadcast",
            Self::Product { .. } => "product",
        }
    }

    /// Source columns read by this rule.
    pub fn sources(&self) -> Vec<&'static str> {
        match *self {
            Self::Rename { source, .. }
            | Self::Timestamp { source, .. }
            | Self::Broadcast { source, .. } => vec![source],
            Self::Product { left, right, .. } => vec![left, right],
        }
    }

    /// Target columns written by this rule.
    pub fn targets(&self) -> &[TargetColumn] {
        match self {
            Self::Rename { target, .. }
            | Self::Timestamp { target, .. }
            | Self::Product { target, .. } => slice::from_ref(target),
            Self::Broadcast { targets, .. } => targets,
        }
    }

    pub fn apply(&self, record: &SourceRecord<'_>, out: &mut TargetRecord) {
        match *self {
            Self::Rename { source, target } => out.set(target, record.get(source).clone()),
            Self::Timestamp { source, target } => {
                let value = record.get(source);
                let derived = match coerce_datetime(value) {
                    Some(stamp) => CellValue::Text(format_timestamp(stamp)),
                    None => value.clone(),
                };
                out.set(target, derived);
            }
            Self::Broadcast { source, targets } => {
                let value = record.get(source);
                for target in targets {
                    out.set(*target, value.clone());
                }
            }
            Self::Product {
                left,
                right,
                target,
            } => {
                let product = coerce_numeric(record.get(left))
                    .zip(coerce_numeric(record.get(right)))
                    .map(|(l, r)| l * r);
                out.set(target, product.map_or(CellValue::Missing, CellValue::number));
            }
        }
    }
}

impl fmt::Display for MappingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product { left, right, .. } => write!(f, "{left} × {right}"),
            _ => f.write_str(&self.sources().join(", ")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use waybill_model::SourceTable;

    fn single_row(columns: &[&str], cells: Vec<CellValue>) -> SourceTable {
        SourceTable::with_rows(
            columns.iter().map(|c| (*c).to_string()).collect(),
            vec![cells],
        )
        .unwrap()
    }

    fn apply_all(table: &SourceTable) -> TargetRecord {
        let record = table.record(0).unwrap();
        let mut out = TargetRecord::new(CellValue::Missing);
        for rule in DEFAULT_RULES {
            rule.apply(&record, &mut out);
        }
        out
    }

    #[test]
    fn timestamp_rule_reformats_and_passes_text_through() {
        let stamp = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 15, 42)
            .unwrap();
        let table = single_row(
            &[LOAD_TIME, UNLOAD_TIME],
            vec![CellValue::DateTime(stamp), CellValue::from("待定")],
        );
        let out = apply_all(&table);
        assert_eq!(out.get(TargetColumn::LoadTime), &CellValue::from("2024/06/01 09:15"));
        assert_eq!(out.get(TargetColumn::UnloadTime), &CellValue::from("待定"));
    }

    #[test]
    fn product_requires_both_operands() {
        let table = single_row(&[MILEAGE, UNIT_PRICE], vec![10.0.into(), "5".into()]);
        assert_eq!(
            apply_all(&table).get(TargetColumn::DriverTariff),
            &CellValue::Number(50.0)
        );

        let table = single_row(&[MILEAGE, UNIT_PRICE], vec![10.0.into(), "abc".into()]);
        assert!(apply_all(&table).get(TargetColumn::DriverTariff).is_missing());

        let table = single_row(&[MILEAGE], vec![10.0.into()]);
        assert!(apply_all(&table).get(TargetColumn::DriverTariff).is_missing());
    }

    #[test]
    fn infinite_times_zero_is_missing() {
        let table = single_row(
            &[MILEAGE, UNIT_PRICE],
            vec![CellValue::Number(f64::INFINITY), 0.0.into()],
        );
        assert!(apply_all(&table).get(TargetColumn::DriverTariff).is_missing());
    }

    #[test]
    fn rules_never_write_the_same_target_twice() {
        let mut written: Vec<TargetColumn> = DEFAULT_RULES
            .iter()
            .flat_map(|rule| rule.targets().iter().copied())
            .collect();
        let total = written.len();
        written.sort_unstable();
        written.dedup();
        assert_eq!(written.len(), total);
    }

    #[test]
    fn describes_sources() {
        assert_eq!(DEFAULT_RULES[7].to_string(), "里程 × 司机运输单价（人民币）");
        assert_eq!(DEFAULT_RULES[5].display_name(), "broadcast");
        assert_eq!(DEFAULT_RULES[5].targets().len(), 3);
    }
}
