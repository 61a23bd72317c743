pub mod geometry;
pub mod source;
pub mod types;

pub use source::{ElementSource, PbfSource, VecSource};
pub use types::{Category, ElementKind, InfrastructureRecord, MapElement};
