//! Variant/active block states, their compact meta encoding, and the block definition registry.
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod error;
pub mod props;
pub mod registry;
pub mod types;
pub mod variant;

pub use codec::ActiveVariantCodec;
pub use error::BlockError;
pub use registry::{BlockRegistry, BlockType};
pub use types::{BlockState, BlockTypeId, Meta, VariantIndex};
pub use variant::{Variant, VariantSet};
