use crate::domain::model::DocumentFile;
use crate::utils::error::Result;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// Packs the spreadsheet at the archive root and every document, unchanged,
/// under `documents_dir/`.
pub fn write_bundle(
    spreadsheet_name: &str,
    spreadsheet: &[u8],
    documents_dir: &str,
    documents: &[DocumentFile],
) -> Result<Vec<u8>> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let prefix = documents_dir.trim_end_matches('/');

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    zip.start_file(spreadsheet_name, options)?;
    zip.write_all(spreadsheet)?;

    for document in documents {
        zip.start_file(format!("{}/{}", prefix, document.name), options)?;
        zip.write_all(&document.content)?;
    }

    let cursor = zip.finish()?;
    let bytes = cursor.into_inner();
    tracing::debug!(
        "Bundle written: {} documents, {} bytes",
        documents.len(),
        bytes.len()
    );
    Ok(bytes)
}
