pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::ConverterConfig};
pub use crate::core::{
    etl::{generate, EtlEngine},
    pipeline::PrinexPipeline,
};
pub use crate::domain::model::{CellValue, ConversionOutput, OutputRecord};
pub use crate::domain::schema::PRINEX_COLUMNS;
pub use crate::utils::error::{EtlError, Result};
