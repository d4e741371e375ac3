use crate::config::toml_config::ConverterConfig;
use crate::core::pipeline::PrinexPipeline;
use crate::core::{ConversionOutput, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::NaiveDate;
use std::time::Instant;

/// Runs one conversion end to end. Holds no state between runs: the caller
/// keeps the returned [`ConversionOutput`] for as long as it needs it.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor_enabled: bool,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor_enabled,
        }
    }

    pub fn run(&self, input: &[u8]) -> Result<ConversionOutput> {
        let started = Instant::now();
        let mut monitor = SystemMonitor::new(self.monitor_enabled);
        tracing::info!("🚀 Starting conversion of {} byte bundle", input.len());

        let extracted = self.pipeline.extract(input)?;
        monitor.log_stats("Extract");

        let transformed = self.pipeline.transform(extracted)?;
        tracing::info!("🔧 Transformed {} records", transformed.records.len());
        monitor.log_stats("Transform");

        let output = self.pipeline.load(transformed)?;
        monitor.log_stats("Load");
        monitor.log_final_stats();

        tracing::info!(
            "✅ Conversion finished in {:.2}s: {} records, {} documents, {} byte bundle",
            started.elapsed().as_secs_f64(),
            output.record_count,
            output.document_count,
            output.bundle_bytes.len()
        );
        Ok(output)
    }
}

/// Converts a Payhawk export bundle with the default settings.
pub fn generate(input: &[u8], accounting_date: NaiveDate) -> Result<ConversionOutput> {
    let pipeline = PrinexPipeline::new(ConverterConfig::default(), accounting_date);
    EtlEngine::new(pipeline).run(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ExtractedBundle, TransformResult};
    use crate::utils::error::EtlError;
    use std::cell::RefCell;

    /// Records the phases it was asked to run.
    struct RecordingPipeline {
        calls: RefCell<Vec<&'static str>>,
        fail_transform: bool,
    }

    impl RecordingPipeline {
        fn new(fail_transform: bool) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail_transform,
            }
        }
    }

    impl Pipeline for RecordingPipeline {
        fn extract(&self, _input: &[u8]) -> Result<ExtractedBundle> {
            self.calls.borrow_mut().push("extract");
            Ok(ExtractedBundle::default())
        }

        fn transform(&self, _data: ExtractedBundle) -> Result<TransformResult> {
            self.calls.borrow_mut().push("transform");
            if self.fail_transform {
                return Err(EtlError::MappingError {
                    message: "boom".to_string(),
                });
            }
            Ok(TransformResult::default())
        }

        fn load(&self, _result: TransformResult) -> Result<ConversionOutput> {
            self.calls.borrow_mut().push("load");
            Ok(ConversionOutput {
                bundle_name: "out.zip".to_string(),
                bundle_bytes: vec![1, 2, 3],
                preview: Vec::new(),
                record_count: 0,
                document_count: 0,
            })
        }
    }

    #[test]
    fn test_run_sequences_phases() {
        let engine = EtlEngine::new(RecordingPipeline::new(false));
        let output = engine.run(b"input").unwrap();

        assert_eq!(output.bundle_bytes, vec![1, 2, 3]);
        assert_eq!(
            *engine.pipeline.calls.borrow(),
            vec!["extract", "transform", "load"]
        );
    }

    #[test]
    fn test_failure_stops_before_load() {
        let engine = EtlEngine::new(RecordingPipeline::new(true));

        assert!(engine.run(b"input").is_err());
        assert_eq!(*engine.pipeline.calls.borrow(), vec!["extract", "transform"]);
    }

    #[test]
    fn test_generate_rejects_non_zip_input() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert!(matches!(
            generate(b"definitely not a zip", date),
            Err(EtlError::ZipError(_))
        ));
    }
}
