pub mod etl;
pub mod mapper;
pub mod pipeline;

pub use crate::domain::model::{
    CellValue, ConversionOutput, DocumentFile, ExtractedBundle, InputRecord, OutputRecord,
    SourceTable, TransformResult,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
