use std::fmt;

use casing_blocks::{ActiveVariantCodec, BlockState};

/// Lookup key of a baked model: block registry name plus the canonical
/// property string of the state it renders.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelKey {
    pub block: String,
    pub properties: String,
}

impl ModelKey {
    pub fn new(block: impl Into<String>, properties: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            properties: properties.into(),
        }
    }

    /// Key for `state` of the block owning `codec`.
    pub fn for_state(codec: &ActiveVariantCodec, state: BlockState) -> Self {
        Self::new(codec.block(), codec.property_string(state))
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.block, self.properties)
    }
}
