use crate::domain::model::{CellValue, InputRecord, OutputRecord, SourceTable};
use crate::domain::schema::{source, Constant, CONSTANTS, DIRECT_COPIES};
use crate::utils::error::{EtlError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const PRINEX_DATE_FORMAT: &str = "%d/%m/%Y";

const CASH: &str = "C";
const INVOICE: &str = "F";
const MILEAGE: &str = "mileage";

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
/// Month-first wins for ambiguous slash dates; day-first catches the rest (25/03/2024).
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];

/// Prinex invoice type derived from the Payhawk record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceKind {
    /// Receipt or mileage: the full amount is the base, no tax breakdown.
    Cash,
    /// Supplier invoice with explicit net and tax amounts.
    Invoice,
    Unclassified,
}

impl InvoiceKind {
    /// Document type first, then the mileage override on top of it.
    pub fn classify(record: &InputRecord) -> Self {
        if record.label(source::PAYMENT_TYPE) == Some(MILEAGE) {
            return InvoiceKind::Cash;
        }
        match record.label(source::DOCUMENT_TYPE) {
            Some("Receipt") => InvoiceKind::Cash,
            Some("Invoice") => InvoiceKind::Invoice,
            _ => InvoiceKind::Unclassified,
        }
    }

    fn code(self) -> CellValue {
        match self {
            InvoiceKind::Cash => CellValue::text(CASH),
            InvoiceKind::Invoice => CellValue::text(INVOICE),
            InvoiceKind::Unclassified => CellValue::Empty,
        }
    }
}

/// Maps a whole export. Fails before touching any row when a classification
/// column is missing; every other source column is optional.
pub fn map_table(table: &SourceTable, accounting_date: NaiveDate) -> Result<Vec<OutputRecord>> {
    check_required_columns(table)?;

    let mut cash = 0usize;
    let mut invoices = 0usize;
    let mut records = Vec::with_capacity(table.records.len());
    for (row, record) in table.records.iter().enumerate() {
        let kind = InvoiceKind::classify(record);
        match kind {
            InvoiceKind::Cash => cash += 1,
            InvoiceKind::Invoice => invoices += 1,
            InvoiceKind::Unclassified => tracing::warn!(
                "Row {}: unrecognised document type {:?}, TIPO.FRA left empty",
                row + 1,
                record.get(source::DOCUMENT_TYPE).map(ToString::to_string)
            ),
        }
        records.push(map_record(record, accounting_date));
    }

    tracing::info!(
        "Mapped {} records ({} cash, {} invoices, {} unclassified)",
        records.len(),
        cash,
        invoices,
        records.len() - cash - invoices
    );
    Ok(records)
}

pub fn check_required_columns(table: &SourceTable) -> Result<()> {
    let missing: Vec<&str> = source::REQUIRED
        .iter()
        .copied()
        .filter(|column| !table.has_column(column))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EtlError::MappingError {
            message: format!("required column(s) missing from the export: {}", missing.join(", ")),
        })
    }
}

/// Converts one Payhawk record into one Prinex row. Rule order matters:
/// classification, direct copies, mileage numbering, cash amounts, dates, accounts.
pub fn map_record(record: &InputRecord, accounting_date: NaiveDate) -> OutputRecord {
    let mut output = OutputRecord::new();

    for (column, constant) in CONSTANTS.iter() {
        let value = match constant {
            Constant::Number(number) => CellValue::Number(*number),
            Constant::Text(text) => CellValue::text(*text),
        };
        output.set(column, value);
    }

    let kind = InvoiceKind::classify(record);
    output.set("TIPO.FRA", kind.code());

    for (target, source_column) in DIRECT_COPIES.iter() {
        if let Some(value) = record.get(source_column) {
            output.set(target, value.clone());
        }
    }

    if record.label(source::PAYMENT_TYPE) == Some(MILEAGE) {
        if let Some(expense_id) = record.get(source::EXPENSE_ID) {
            output.set("NUM.FRA", CellValue::text(format!("KM-{}", expense_id)));
        }
    }

    if kind == InvoiceKind::Cash {
        let total = record
            .get(source::TOTAL_AMOUNT)
            .cloned()
            .unwrap_or_default();
        output.set("IMP.BRUTO", total.clone());
        output.set("BASE1", total.clone());
        output.set("IMPORTE_GASTO", total);
        output.set("IVA1", CellValue::Number(0.0));
        output.set("CUOTA1", CellValue::Number(0.0));
    }

    if let Some(document_date) = record.get(source::DOCUMENT_DATE) {
        output.set("FECHA.FRA", format_document_date(document_date));
    }
    output.set(
        "FECHA.CONTABLE",
        CellValue::text(accounting_date.format(PRINEX_DATE_FORMAT).to_string()),
    );

    if let Some(account_code) = record.get(source::ACCOUNT_CODE) {
        let (account, sub_account) = split_account_code(account_code);
        output.set("CTA_GASTO", account);
        output.set("SCTA_GASTO", sub_account);
    }

    output
}

fn format_document_date(value: &CellValue) -> CellValue {
    let raw = match value {
        CellValue::Text(text) => text.as_str(),
        _ => return CellValue::Empty,
    };
    match parse_document_date(raw) {
        Some(date) => CellValue::text(date.format(PRINEX_DATE_FORMAT).to_string()),
        None => {
            tracing::debug!("Unparseable document date '{}', FECHA.FRA left empty", raw);
            CellValue::Empty
        }
    }
}

pub fn parse_document_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    if let Some(timestamp) = DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
    {
        return Some(timestamp.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

/// "6290-001" -> ("6290", "001"); only the first '-' separates.
fn split_account_code(value: &CellValue) -> (CellValue, CellValue) {
    if value.is_empty() {
        return (CellValue::Empty, CellValue::Empty);
    }
    let code = value.to_string();
    match code.split_once('-') {
        Some((account, sub_account)) => (CellValue::text(account), CellValue::text(sub_account)),
        None => (CellValue::text(code), CellValue::Empty),
    }
}
