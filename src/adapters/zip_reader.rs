use crate::domain::model::{CellValue, DocumentFile, ExtractedBundle, InputRecord, SourceTable};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::matches_extension;
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashMap};
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Placeholders spreadsheet tools write for a missing value.
const MISSING_TOKENS: [&str; 10] = [
    "NA", "N/A", "n/a", "null", "NULL", "nan", "NaN", "None", "#N/A", "<NA>",
];

/// Unpacks the Payhawk bundle: the tabular export is parsed, documents are
/// collected by base file name. Other entries are ignored.
pub fn read_bundle(
    zip_bytes: &[u8],
    tabular_extension: &str,
    document_extension: &str,
) -> Result<ExtractedBundle> {
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes))?;

    let mut table = None;
    let mut documents: BTreeMap<String, Vec<u8>> = BTreeMap::new();

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();

        if matches_extension(&name, tabular_extension) {
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            tracing::debug!("Parsing tabular entry '{}' ({} bytes)", name, content.len());
            table = Some(parse_table(&content)?);
        } else if matches_extension(&name, document_extension) {
            let mut content = Vec::new();
            entry.read_to_end(&mut content)?;
            let base_name = base_name(&name).to_string();
            tracing::debug!("Collected document '{}' ({} bytes)", base_name, content.len());
            if documents.insert(base_name.clone(), content).is_some() {
                tracing::warn!("Duplicate document name '{}', keeping the later entry", base_name);
            }
        }
    }

    let table = table.ok_or_else(|| EtlError::ParsingError {
        message: format!("no .{} entry found in the bundle", tabular_extension),
    })?;

    Ok(ExtractedBundle {
        table,
        documents: documents
            .into_iter()
            .map(|(name, content)| DocumentFile { name, content })
            .collect(),
    })
}

fn base_name(entry_name: &str) -> &str {
    entry_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(entry_name)
}

/// Parses comma-delimited UTF-8 text with a header row. Blank cells and
/// placeholders such as `NA` or `null` are missing. Columns whose every
/// present cell is a finite number become numeric; all others stay text.
pub fn parse_table(content: &[u8]) -> Result<SourceTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    let numeric: Vec<bool> = (0..headers.len())
        .map(|col| {
            let mut values = rows
                .iter()
                .filter_map(|row| row.get(col))
                .filter(|value| !is_missing(value))
                .peekable();
            values.peek().is_some() && values.all(|value| parse_number(value).is_some())
        })
        .collect();

    let records = rows
        .into_iter()
        .map(|row| {
            let mut data = HashMap::with_capacity(headers.len());
            for (col, header) in headers.iter().enumerate() {
                let raw = row.get(col).map(String::as_str).unwrap_or("");
                let value = if is_missing(raw) {
                    CellValue::Empty
                } else if numeric[col] {
                    parse_number(raw).map_or(CellValue::Empty, CellValue::Number)
                } else {
                    CellValue::text(raw)
                };
                data.entry(header.clone()).or_insert(value);
            }
            InputRecord { data }
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "Parsed {} records across {} columns",
        records.len(),
        headers.len()
    );

    Ok(SourceTable { headers, records })
}

fn is_missing(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || MISSING_TOKENS.contains(&value)
}

fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}
