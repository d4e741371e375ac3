use crate::domain::model::{ConversionOutput, ExtractedBundle, TransformResult};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Settings the pipeline reads; implemented by the TOML settings file.
pub trait ConfigProvider {
    fn tabular_extension(&self) -> &str;
    fn document_extension(&self) -> &str;
    fn spreadsheet_name(&self) -> &str;
    fn sheet_name(&self) -> &str;
    fn documents_dir(&self) -> &str;
    fn bundle_name(&self) -> &str;
    fn preview_rows(&self) -> usize;
}

pub trait Pipeline {
    fn extract(&self, input: &[u8]) -> Result<ExtractedBundle>;
    fn transform(&self, data: ExtractedBundle) -> Result<TransformResult>;
    fn load(&self, result: TransformResult) -> Result<ConversionOutput>;
}
