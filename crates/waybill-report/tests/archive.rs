//! Archive export over mapped and partitioned waybills, read back with calamine.

use std::io::{Cursor, Read};

use calamine::{Data, Reader, Xlsx};
use chrono::NaiveDate;
use waybill_model::columns::{
    LOAD_TIME, LOADED_QUANTITY, MILEAGE, OWNER_NAME, REGION, UNIT_PRICE,
};
use waybill_model::{CellValue, SourceTable, TARGET_COLUMNS};
use waybill_report::ArchiveExporter;
use waybill_transform::{SchemaMapper, partition};
use zip::ZipArchive;

fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> SourceTable {
    SourceTable::with_rows(columns.iter().map(|c| (*c).to_string()).collect(), rows).unwrap()
}

fn entry_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

fn read_entry(bytes: &[u8], name: &str) -> calamine::Range<Data> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    assert_eq!(file.compression(), zip::CompressionMethod::Deflated);
    let mut buf = Vec::new();
    file.read_to_end(&mut buf).unwrap();
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(buf)).unwrap();
    workbook.worksheet_range("Sheet1").unwrap()
}

fn column(range: &calamine::Range<Data>, header: &str) -> Vec<Data> {
    let idx = TARGET_COLUMNS.iter().position(|h| *h == header).unwrap();
    (1..range.height())
        .map(|row| range.get((row, idx)).cloned().unwrap_or(Data::Empty))
        .collect()
}

#[test]
fn splits_by_region_into_one_workbook_each() {
    let source = table(
        &[REGION, OWNER_NAME, LOADED_QUANTITY, MILEAGE, UNIT_PRICE],
        vec![
            vec!["A".into(), "甲".into(), 10.0.into(), 20.0.into(), 5.0.into()],
            vec!["A".into(), "乙".into(), 20.0.into(), CellValue::Missing, 5.0.into()],
            vec!["B".into(), "丙".into(), 5.0.into(), 10.0.into(), 5.0.into()],
        ],
    );
    let mapped = SchemaMapper::new(REGION).map(&source);
    let parts = partition(&source, mapped.records(), REGION).unwrap();
    let mut lines: Vec<String> = Vec::new();
    let report = ArchiveExporter::new().export(&parts, &mut lines).unwrap();

    insta::assert_snapshot!(lines.join("\n"), @r"
    (1/2) 已生成文件: A.xlsx (源表行数: 2, 新表行数: 2)
    (2/2) 已生成文件: B.xlsx (源表行数: 1, 新表行数: 1)
    ");
    assert_eq!(entry_names(&report.bytes), vec!["A.xlsx", "B.xlsx"]);
    assert_eq!(report.target_rows(), 3);

    let a = read_entry(&report.bytes, "A.xlsx");
    assert_eq!(a.width(), TARGET_COLUMNS.len());
    let header: Vec<String> = (0..a.width())
        .map(|col| a.get((0, col)).map(ToString::to_string).unwrap_or_default())
        .collect();
    assert_eq!(header, TARGET_COLUMNS.to_vec());
    assert!(!header.iter().any(|h| h == REGION));
    assert_eq!(
        column(&a, "装车量(吨)"),
        vec![Data::Float(10.0), Data::Float(20.0)]
    );
    assert_eq!(column(&a, "卸货量(吨)"), column(&a, "装车量(吨)"));
    assert_eq!(column(&a, "司机运费单价"), vec![Data::Float(100.0), Data::Empty]);
    assert_eq!(
        column(&a, "收货联系人"),
        vec![Data::String("甲".to_string()), Data::String("乙".to_string())]
    );

    let b = read_entry(&report.bytes, "B.xlsx");
    assert_eq!(b.height(), 2);
    assert_eq!(column(&b, "司机运费单价"), vec![Data::Float(50.0)]);
}

#[test]
fn unsafe_and_colliding_keys_get_distinct_names() {
    let source = table(
        &[REGION],
        vec![
            vec!["华东/一区".into()],
            vec!["***".into()],
            vec!["华东一区".into()],
            vec![1.0.into()],
            vec!["1".into()],
            vec![CellValue::Missing],
        ],
    );
    let mapped = SchemaMapper::new(REGION).map(&source);
    let parts = partition(&source, mapped.records(), REGION).unwrap();
    let report = ArchiveExporter::new()
        .export(&parts, &mut Vec::<String>::new())
        .unwrap();

    assert_eq!(
        entry_names(&report.bytes),
        vec![
            "华东一区.xlsx",
            "未命名区域_2.xlsx",
            "华东一区_3.xlsx",
            "1.xlsx",
            "1_5.xlsx",
        ]
    );
    assert_eq!(report.target_rows(), 5);
}

#[test]
fn load_times_are_written_as_reformatted_text() {
    let stamp = NaiveDate::from_ymd_opt(2024, 1, 15)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    let source = table(&[REGION, LOAD_TIME], vec![vec!["A".into(), stamp.into()]]);
    let mapped = SchemaMapper::new(REGION).map(&source);
    let parts = partition(&source, mapped.records(), REGION).unwrap();
    let report = ArchiveExporter::new()
        .export(&parts, &mut Vec::<String>::new())
        .unwrap();
    let sheet = read_entry(&report.bytes, "A.xlsx");
    assert_eq!(
        column(&sheet, "装车时间"),
        vec![Data::String("2024/01/15 08:30".to_string())]
    );
}
