use crate::adapters::{xlsx, zip_reader, zip_writer};
use crate::core::mapper;
use crate::core::{ConfigProvider, ConversionOutput, ExtractedBundle, Pipeline, Result, TransformResult};
use crate::utils::error::EtlError;
use crate::utils::validation::validate_bundle;
use chrono::NaiveDate;

/// Payhawk export bundle -> Prinex bulk-load bundle.
pub struct PrinexPipeline<C: ConfigProvider> {
    config: C,
    accounting_date: NaiveDate,
}

impl<C: ConfigProvider> PrinexPipeline<C> {
    pub fn new(config: C, accounting_date: NaiveDate) -> Self {
        Self {
            config,
            accounting_date,
        }
    }
}

impl<C: ConfigProvider> Pipeline for PrinexPipeline<C> {
    fn extract(&self, input: &[u8]) -> Result<ExtractedBundle> {
        let problems = validate_bundle(
            input,
            self.config.tabular_extension(),
            self.config.document_extension(),
        )?;
        if !problems.is_empty() {
            for problem in &problems {
                tracing::warn!("Bundle validation: {}", problem);
            }
            return Err(EtlError::ValidationFailed { problems });
        }

        let bundle = zip_reader::read_bundle(
            input,
            self.config.tabular_extension(),
            self.config.document_extension(),
        )?;
        tracing::info!(
            "Unpacked bundle: {} records, {} documents",
            bundle.table.records.len(),
            bundle.documents.len()
        );
        Ok(bundle)
    }

    fn transform(&self, data: ExtractedBundle) -> Result<TransformResult> {
        let records = mapper::map_table(&data.table, self.accounting_date)?;
        Ok(TransformResult {
            records,
            documents: data.documents,
        })
    }

    fn load(&self, result: TransformResult) -> Result<ConversionOutput> {
        let spreadsheet = xlsx::serialize_records(self.config.sheet_name(), &result.records)?;
        tracing::debug!("Spreadsheet rendered ({} bytes)", spreadsheet.len());

        let bundle_bytes = zip_writer::write_bundle(
            self.config.spreadsheet_name(),
            &spreadsheet,
            self.config.documents_dir(),
            &result.documents,
        )?;

        let record_count = result.records.len();
        let document_count = result.documents.len();
        let mut records = result.records;
        records.truncate(self.config.preview_rows());

        Ok(ConversionOutput {
            bundle_name: self.config.bundle_name().to_string(),
            bundle_bytes,
            preview: records,
            record_count,
            document_count,
        })
    }
}
