//! Property tests for waybill-model types.

use proptest::prelude::*;

use waybill_model::{CellValue, SourceTable, TARGET_COLUMNS, TargetColumn, TargetRecord};

fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::Missing),
        "[a-z区域华东]{0,6}".prop_map(CellValue::Text),
        (-1.0e6..1.0e6f64).prop_map(CellValue::number),
        any::<bool>().prop_map(CellValue::Bool),
    ]
}

proptest! {
    #[test]
    fn every_record_exposes_the_full_schema(
        group in cell(),
        values in proptest::collection::vec(cell(), 29),
    ) {
        let mut record = TargetRecord::new(group.clone());
        for (column, value) in TargetColumn::ALL.iter().zip(values.iter()) {
            record.set(*column, value.clone());
        }
        let headers: Vec<&str> = record.iter().map(|(column, _)| column.header()).collect();
        prop_assert_eq!(headers, TARGET_COLUMNS.to_vec());
        prop_assert_eq!(record.cells(), values.as_slice());
        prop_assert_eq!(record.group_value(), &group);
    }

    #[test]
    fn short_rows_are_padded_to_table_width(
        width in 1usize..8,
        cells in proptest::collection::vec(cell(), 0..8),
    ) {
        let columns: Vec<String> = (0..width).map(|i| format!("c{i}")).collect();
        let mut table = SourceTable::new(columns).unwrap();
        let fits = cells.len() <= width;
        prop_assert_eq!(table.push_row(cells).is_ok(), fits);
        if fits {
            prop_assert_eq!(table.record(0).unwrap().cells().len(), width);
        }
    }
}
