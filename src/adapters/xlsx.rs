use rust_xlsxwriter::Workbook;

use crate::domain::model::{CellValue, OutputRecord};
use crate::domain::schema::PRINEX_COLUMNS;
use crate::utils::error::Result;

/// Renders the template as a single plain worksheet: header row, then one row
/// per record in order. No styles, tables or formulas.
pub fn serialize_records(sheet_name: &str, records: &[OutputRecord]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col_idx, header) in PRINEX_COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col_idx as u16, *header)?;
    }

    for (row_idx, record) in records.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        for (col_idx, cell) in record.cells().iter().enumerate() {
            let col = col_idx as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(value) => {
                    worksheet.write_string(row, col, value)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(row, col, *value)?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    Ok(bytes)
}
