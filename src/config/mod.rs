pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use crate::utils::error::{EtlError, Result};
    use crate::utils::validation::{self, Validate};
    use chrono::NaiveDate;
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "payhawk-prinex")]
    #[command(about = "Converts a Payhawk export ZIP into a Prinex bulk-load bundle")]
    pub struct CliConfig {
        /// Payhawk export ZIP (one CSV plus the PDF invoices)
        pub input: String,

        #[arg(long, default_value = "./output")]
        pub output_dir: String,

        /// Accounting date applied to every row (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_accounting_date)]
        pub accounting_date: Option<NaiveDate>,

        /// Optional TOML settings file
        #[arg(short, long)]
        pub config: Option<String>,

        #[arg(long, help = "Print the preview rows as JSON")]
        pub preview_json: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Log process CPU and memory per phase")]
        pub monitor: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    fn parse_accounting_date(value: &str) -> std::result::Result<NaiveDate, String> {
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
    }

    impl CliConfig {
        pub fn accounting_date_or_today(&self) -> NaiveDate {
            self.accounting_date
                .unwrap_or_else(|| chrono::Local::now().date_naive())
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validation::validate_path("input", &self.input)?;
            validation::validate_path("output_dir", &self.output_dir)?;
            if !validation::matches_extension(&self.input, "zip") {
                return Err(EtlError::InvalidConfigValueError {
                    field: "input".to_string(),
                    value: self.input.clone(),
                    reason: "Input must be a .zip archive".to_string(),
                });
            }
            if let Some(path) = &self.config {
                validation::validate_path("config", path)?;
            }
            Ok(())
        }
    }

}
