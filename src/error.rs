#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PBF error: {0}")]
    Pbf(#[from] osmpbf::Error),
}
