pub mod data;
pub mod error;
pub mod extract;

pub use error::ExtractError;
pub use extract::{extract_from_path, Extractor};
