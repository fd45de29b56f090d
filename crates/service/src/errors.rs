use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("storage load error: {0}")]
    Load(String),
}
