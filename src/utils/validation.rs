use crate::utils::error::{EtlError, Result};
use std::io::Cursor;
use zip::ZipArchive;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Case-insensitive `.ext` suffix check on an archive entry name.
pub fn matches_extension(entry_name: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension.to_lowercase());
    entry_name.to_lowercase().ends_with(&suffix)
}

/// Presence check on the uploaded bundle. Returns every problem found, empty when
/// the bundle is usable. Fails only when the bytes are not a readable ZIP archive.
pub fn validate_bundle(
    zip_bytes: &[u8],
    tabular_extension: &str,
    document_extension: &str,
) -> Result<Vec<String>> {
    let archive = ZipArchive::new(Cursor::new(zip_bytes))?;

    let mut tabular_count = 0usize;
    let mut document_count = 0usize;
    for name in archive.file_names() {
        if matches_extension(name, tabular_extension) {
            tabular_count += 1;
        } else if matches_extension(name, document_extension) {
            document_count += 1;
        }
    }

    tracing::debug!(
        "Bundle has {} entries: {} tabular, {} documents",
        archive.len(),
        tabular_count,
        document_count
    );

    let mut problems = Vec::new();
    match tabular_count {
        0 => problems.push(format!(
            "The ZIP does not contain the Payhawk {} file.",
            tabular_extension.to_uppercase()
        )),
        1 => {}
        n => problems.push(format!(
            "The ZIP contains {} {} files; exactly one Payhawk export is expected.",
            n,
            tabular_extension.to_uppercase()
        )),
    }
    if document_count == 0 {
        problems.push(format!(
            "The ZIP does not contain {} invoices.",
            document_extension.to_uppercase()
        ));
    }

    Ok(problems)
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_extension(field_name: &str, extension: &str) -> Result<()> {
    validate_non_empty_string(field_name, extension)?;
    if !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: extension.to_string(),
            reason: "Extension must be alphanumeric, without a leading dot".to_string(),
        });
    }
    Ok(())
}

/// Names used for entries inside the output archive.
pub fn validate_entry_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    validate_path(field_name, name)?;
    if name.contains("..") || name.starts_with('/') || name.contains('\\') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a relative name without '..' or backslashes".to_string(),
        });
    }
    Ok(())
}

pub fn validate_sheet_name(field_name: &str, name: &str) -> Result<()> {
    validate_non_empty_string(field_name, name)?;
    if name.chars().count() > 31 {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Sheet names are limited to 31 characters".to_string(),
        });
    }
    if let Some(c) = name.chars().find(|c| "[]:*?/\\".contains(*c)) {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: format!("Sheet names cannot contain '{}'", c),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn zip_with(names: &[&str]) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for name in names {
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(b"content").unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_complete_bundle_has_no_problems() {
        let bundle = zip_with(&["export/Expenses.CSV", "receipts/a.pdf", "notes.txt"]);
        assert!(validate_bundle(&bundle, "csv", "pdf").unwrap().is_empty());
    }

    #[test]
    fn test_missing_csv_reports_one_problem() {
        let bundle = zip_with(&["a.pdf", "b.PDF"]);
        let problems = validate_bundle(&bundle, "csv", "pdf").unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("CSV"));
    }

    #[test]
    fn test_missing_pdf_reports_one_problem() {
        let bundle = zip_with(&["expenses.csv"]);
        let problems = validate_bundle(&bundle, "csv", "pdf").unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("PDF invoices"));
    }

    #[test]
    fn test_both_missing_reports_both_problems() {
        let bundle = zip_with(&["readme.txt"]);
        let problems = validate_bundle(&bundle, "csv", "pdf").unwrap();
        assert_eq!(problems.len(), 2);
        assert!(problems[0].contains("CSV"));
        assert!(problems[1].contains("PDF"));
    }

    #[test]
    fn test_multiple_csv_files_are_rejected() {
        let bundle = zip_with(&["a.csv", "b.csv", "x.pdf"]);
        let problems = validate_bundle(&bundle, "csv", "pdf").unwrap();
        assert_eq!(problems.len(), 1);
        assert!(problems[0].contains("2 CSV files"));
    }

    #[test]
    fn test_corrupt_archive_is_an_error() {
        assert!(validate_bundle(b"not a zip", "csv", "pdf").is_err());
    }

    #[test]
    fn test_sheet_name_rules() {
        assert!(validate_sheet_name("sheet", "Plantilla Prinex").is_ok());
        assert!(validate_sheet_name("sheet", "").is_err());
        assert!(validate_sheet_name("sheet", "a/b").is_err());
        assert!(validate_sheet_name("sheet", &"x".repeat(32)).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("preview_rows", 5, 1, 100).is_ok());
        assert!(validate_range("preview_rows", 0, 1, 100).is_err());
    }
}
