//! Variant/active block types wired to the shared active-position and layer services.
#![forbid(unsafe_code)]

mod block;
mod context;
mod extended;
mod instances;

pub use block::VariantActiveBlock;
pub use context::ActiveBlocks;
pub use extended::{ConnectedTexturesState, ExtendedState, RenderState};
pub use instances::BlockTypeList;
