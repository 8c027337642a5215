mod export;

pub use export::EXPORT_FILE_PREFIX;
pub use export::ExportError;
pub use export::ExportLabels;
pub use export::ExportWriter;
pub use export::file_name;
