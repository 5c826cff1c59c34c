// Service exports
pub mod loader;
pub mod writer;

pub use loader::{load_customers, load_customers_from_path, LoadError, LoadReport};
pub use writer::{write_csv, write_outputs, write_text, OutputPaths, WriteError};
