use std::collections::HashMap;

use crate::error::BlockError;
use crate::types::{Meta, VariantIndex};

/// Bits of the meta code holding the variant ordinal.
pub const VARIANT_BITS: u32 = 3;
pub const VARIANT_MASK: Meta = (1 << VARIANT_BITS) - 1;
pub const MAX_VARIANTS: usize = 1 << VARIANT_BITS;

/// A closed, ordered set of variants declared by a concrete block kind.
///
/// ```
/// use casing_blocks::{Variant, VariantSet};
///
/// #[derive(Copy, Clone, PartialEq, Eq, Debug)]
/// enum Casing {
///     Steel,
///     Titanium,
/// }
///
/// impl Variant for Casing {
///     const VALUES: &'static [Self] = &[Casing::Steel, Casing::Titanium];
///     fn name(self) -> &'static str {
///         match self {
///             Casing::Steel => "steel",
///             Casing::Titanium => "titanium",
///         }
///     }
/// }
///
/// let set = VariantSet::of::<Casing>("machine_casing").unwrap();
/// assert_eq!(set.index_of("titanium"), Some(1));
/// ```
pub trait Variant: Copy + Eq + 'static {
    const VALUES: &'static [Self];

    /// Serialized name, used in state property strings.
    fn name(self) -> &'static str;

    fn ordinal(self) -> usize {
        Self::VALUES
            .iter()
            .position(|v| *v == self)
            .unwrap_or(Self::VALUES.len())
    }
}

/// Runtime form of a variant domain: ordered names with a reverse index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantSet {
    names: Vec<String>,
    index: HashMap<String, VariantIndex>,
}

impl VariantSet {
    /// Validates the domain: non-empty, unique names, and small enough to fit
    /// below the reserved active bit of the meta code.
    pub fn new<I, S>(block: &str, names: I) -> Result<Self, BlockError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(BlockError::EmptyVariants {
                block: block.to_string(),
            });
        }
        if names.len() > MAX_VARIANTS {
            return Err(BlockError::TooManyVariants {
                block: block.to_string(),
                count: names.len(),
            });
        }
        let mut index = HashMap::with_capacity(names.len());
        for (i, n) in names.iter().enumerate() {
            if index.insert(n.clone(), i as VariantIndex).is_some() {
                return Err(BlockError::DuplicateVariant {
                    block: block.to_string(),
                    variant: n.clone(),
                });
            }
        }
        Ok(Self { names, index })
    }

    pub fn of<V: Variant>(block: &str) -> Result<Self, BlockError> {
        Self::new(block, V::VALUES.iter().map(|v| v.name()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn contains(&self, index: VariantIndex) -> bool {
        (index as usize) < self.names.len()
    }

    pub fn name(&self, index: VariantIndex) -> Option<&str> {
        self.names.get(index as usize).map(|s| s.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<VariantIndex> {
        self.index.get(name).copied()
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.names.iter().map(|s| s.as_str())
    }

    pub fn indices(&self) -> impl ExactSizeIterator<Item = VariantIndex> {
        0..self.names.len() as VariantIndex
    }
}
