//! Group workbooks, written with rust_xlsxwriter.

use rust_xlsxwriter::{
    ColNum, Format, FormatAlign, FormatBorder, RowNum, Workbook, Worksheet, XlsxError,
};
use waybill_model::serial::serial_from_datetime;
use waybill_model::{CellValue, TARGET_COLUMNS, TargetRecord, format_numeric};

use crate::{ExportError, Result};

/// Number format applied to timestamp cells.
pub const TIMESTAMP_NUM_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Serialize records to an xlsx workbook: one header row with the target
/// schema names, then one row per record. The grouping value is not written.
pub fn write_group_workbook<'a, I>(entry: &str, records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a TargetRecord>,
{
    let workbook_error = |source: XlsxError| ExportError::Workbook {
        entry: entry.to_string(),
        source,
    };

    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::Center);
    let stamp = Format::new().set_num_format(TIMESTAMP_NUM_FORMAT);

    let sheet = workbook.add_worksheet();
    for (col, name) in TARGET_COLUMNS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as ColNum, *name, &header)
            .map_err(workbook_error)?;
    }

    for (idx, record) in records.into_iter().enumerate() {
        let row = RowNum::try_from(idx + 1)
            .map_err(|_| ExportError::TooManyRows { rows: idx + 1 })?;
        for (col, value) in record.cells().iter().enumerate() {
            write_cell(sheet, row, col as ColNum, value, &stamp).map_err(workbook_error)?;
        }
    }

    workbook.save_to_buffer().map_err(workbook_error)
}

fn write_cell(
    sheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &CellValue,
    stamp: &Format,
) -> std::result::Result<(), XlsxError> {
    match value {
        CellValue::Missing => {}
        CellValue::Text(text) => {
            sheet.write_string(row, col, text)?;
        }
        CellValue::Number(number) if number.is_finite() => {
            sheet.write_number(row, col, *number)?;
        }
        CellValue::Number(number) => {
            sheet.write_string(row, col, format_numeric(*number))?;
        }
        CellValue::Bool(flag) => {
            sheet.write_boolean(row, col, *flag)?;
        }
        CellValue::DateTime(moment) => match serial_from_datetime(*moment) {
            Some(serial) => {
                sheet.write_number_with_format(row, col, serial, stamp)?;
            }
            None => {
                sheet.write_string(row, col, value.to_string())?;
            }
        },
    }
    Ok(())
}
