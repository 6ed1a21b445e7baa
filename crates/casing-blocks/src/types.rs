use serde::{Deserialize, Serialize};

/// Compact persisted encoding of a [`BlockState`]; only the low 4 bits are used.
pub type Meta = u8;

/// Ordinal of a variant within its block type's [`VariantSet`](crate::VariantSet).
pub type VariantIndex = u8;

/// Persisted, listed properties of a variant/active block.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
pub struct BlockState {
    pub variant: VariantIndex,
    /// Listed `active` property. Reserved in the meta encoding but always
    /// written as `false` by the codec; live activity is tracked per position.
    pub active_flag: bool,
}

impl BlockState {
    #[inline]
    pub const fn new(variant: VariantIndex, active_flag: bool) -> Self {
        Self {
            variant,
            active_flag,
        }
    }
}

/// Identity of a registered block type, assigned in registration order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct BlockTypeId(pub u16);
