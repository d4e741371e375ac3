use crate::domain::ports::ConfigProvider;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Converter settings. Every key has a default, so an empty file is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub tabular_extension: String,
    pub document_extension: String,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            tabular_extension: "csv".to_string(),
            document_extension: "pdf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub spreadsheet_name: String,
    pub sheet_name: String,
    pub documents_dir: String,
    pub bundle_name: String,
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            spreadsheet_name: "plantilla_prinex.xlsx".to_string(),
            sheet_name: "Plantilla Prinex".to_string(),
            documents_dir: "facturas".to_string(),
            bundle_name: "carga_prinex_con_facturas.zip".to_string(),
            preview_rows: 5,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl ConverterConfig {
    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_extension("input.tabular_extension", &self.input.tabular_extension)?;
        validation::validate_extension("input.document_extension", &self.input.document_extension)?;
        if self
            .input
            .tabular_extension
            .eq_ignore_ascii_case(&self.input.document_extension)
        {
            return Err(EtlError::InvalidConfigValueError {
                field: "input.document_extension".to_string(),
                value: self.input.document_extension.clone(),
                reason: "Must differ from input.tabular_extension".to_string(),
            });
        }

        validation::validate_entry_name("output.spreadsheet_name", &self.output.spreadsheet_name)?;
        validation::validate_entry_name("output.documents_dir", &self.output.documents_dir)?;
        validation::validate_entry_name("output.bundle_name", &self.output.bundle_name)?;
        validation::validate_sheet_name("output.sheet_name", &self.output.sheet_name)?;
        validation::validate_range("output.preview_rows", self.output.preview_rows, 1, 100)?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for ConverterConfig {
    fn tabular_extension(&self) -> &str {
        &self.input.tabular_extension
    }

    fn document_extension(&self) -> &str {
        &self.input.document_extension
    }

    fn spreadsheet_name(&self) -> &str {
        &self.output.spreadsheet_name
    }

    fn sheet_name(&self) -> &str {
        &self.output.sheet_name
    }

    fn documents_dir(&self) -> &str {
        &self.output.documents_dir
    }

    fn bundle_name(&self) -> &str {
        &self.output.bundle_name
    }

    fn preview_rows(&self) -> usize {
        self.output.preview_rows
    }
}

impl Validate for ConverterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
