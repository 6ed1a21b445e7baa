use casing_blocks::BlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model refers to unknown block `{0}`")]
    UnknownBlock(String),
    #[error("failed to parse models config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Block(#[from] BlockError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
