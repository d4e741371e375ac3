// Adapters layer: concrete readers and writers for the archive and spreadsheet formats.

pub mod xlsx;
pub mod zip_reader;
pub mod zip_writer;
