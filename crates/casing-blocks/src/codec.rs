use crate::error::BlockError;
use crate::props::{ACTIVE_PROPERTY, VARIANT_PROPERTY, state_properties_to_string};
use crate::types::{BlockState, Meta, VariantIndex};
use crate::variant::{VARIANT_BITS, VARIANT_MASK, Variant, VariantSet};

/// Meta bit carrying the listed `active` property.
pub const ACTIVE_FLAG_BIT: Meta = 1 << VARIANT_BITS;

/// Maps between persisted meta codes and `{variant, active}` block states.
///
/// Layout: bits 0..3 hold the variant ordinal, bit 3 the listed active flag.
/// States produced here always carry `active_flag == false`; the flag bit is
/// read on decode and then discarded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveVariantCodec {
    block: String,
    variants: VariantSet,
}

impl ActiveVariantCodec {
    pub fn new(block: impl Into<String>, variants: VariantSet) -> Self {
        Self {
            block: block.into(),
            variants,
        }
    }

    pub fn for_enum<V: Variant>(block: impl Into<String>) -> Result<Self, BlockError> {
        let block = block.into();
        let variants = VariantSet::of::<V>(&block)?;
        Ok(Self::new(block, variants))
    }

    #[inline]
    pub fn block(&self) -> &str {
        &self.block
    }

    #[inline]
    pub fn variants(&self) -> &VariantSet {
        &self.variants
    }

    /// Decodes a meta code. Variant ordinals outside the domain are rejected.
    pub fn state_from_meta(&self, meta: Meta) -> Result<BlockState, BlockError> {
        let variant = meta & VARIANT_MASK;
        if !self.variants.contains(variant) {
            return Err(BlockError::MetaOutOfRange {
                block: self.block.clone(),
                meta,
                variants: self.variants.len(),
            });
        }
        // ACTIVE_FLAG_BIT is ignored: activity lives in the per-world position sets.
        Ok(BlockState::new(variant, false))
    }

    /// Encodes `state`. A variant outside the domain would spill into the flag
    /// bit, so it is rejected.
    pub fn meta_from_state(&self, state: BlockState) -> Result<Meta, BlockError> {
        self.check_variant(state.variant)?;
        let flag = if state.active_flag { ACTIVE_FLAG_BIT } else { 0 };
        Ok(flag | state.variant)
    }

    /// Fresh state for `variant` with the listed active flag cleared.
    pub fn build_state(&self, variant: VariantIndex) -> Result<BlockState, BlockError> {
        self.check_variant(variant)?;
        Ok(BlockState::new(variant, false))
    }

    fn check_variant(&self, variant: VariantIndex) -> Result<(), BlockError> {
        if !self.variants.contains(variant) {
            return Err(BlockError::VariantOutOfRange {
                block: self.block.clone(),
                index: variant,
                variants: self.variants.len(),
            });
        }
        Ok(())
    }

    pub fn build_state_named(&self, name: &str) -> Result<BlockState, BlockError> {
        let index = self
            .variants
            .index_of(name)
            .ok_or_else(|| BlockError::UnknownVariant {
                block: self.block.clone(),
                variant: name.to_string(),
            })?;
        Ok(BlockState::new(index, false))
    }

    pub fn build_state_of<V: Variant>(&self, variant: V) -> Result<BlockState, BlockError> {
        self.build_state_named(variant.name())
    }

    /// Every state of the property container: each variant with the listed
    /// active flag both cleared and set.
    pub fn valid_states(&self) -> Vec<BlockState> {
        let mut out = Vec::with_capacity(self.variants.len() * 2);
        for v in self.variants.indices() {
            out.push(BlockState::new(v, false));
            out.push(BlockState::new(v, true));
        }
        out
    }

    /// Canonical `name=value` string for `state`, the model lookup key suffix.
    pub fn property_string(&self, state: BlockState) -> String {
        let active = if state.active_flag { "true" } else { "false" };
        let variant = self.variants.name(state.variant).unwrap_or("");
        state_properties_to_string([(ACTIVE_PROPERTY, active), (VARIANT_PROPERTY, variant)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(n: usize) -> ActiveVariantCodec {
        let names: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
        ActiveVariantCodec::new("b", VariantSet::new("b", names).unwrap())
    }

    #[test]
    fn three_variant_scenario() {
        let c = codec(3);
        for v in 0..3u8 {
            let s = c.build_state(v).unwrap();
            assert_eq!(c.meta_from_state(s).unwrap(), v);
            assert_eq!(c.state_from_meta(v).unwrap(), BlockState::new(v, false));
        }
        assert_eq!(c.state_from_meta(8).unwrap(), BlockState::new(0, false));
    }

    #[test]
    fn out_of_domain_meta_is_rejected() {
        let c = codec(3);
        assert!(matches!(
            c.state_from_meta(3),
            Err(BlockError::MetaOutOfRange { meta: 3, .. })
        ));
        assert!(c.state_from_meta(8 + 5).is_err());
        assert!(c.build_state(3).is_err());
    }

    #[test]
    fn flagged_state_encodes_bit_three() {
        let c = codec(2);
        assert_eq!(c.meta_from_state(BlockState::new(1, true)).unwrap(), 9);
    }

    #[test]
    fn out_of_domain_state_does_not_encode() {
        let c = codec(3);
        assert!(matches!(
            c.meta_from_state(BlockState::new(5, false)),
            Err(BlockError::VariantOutOfRange { index: 5, variants: 3, .. })
        ));
        // 9 would otherwise land on the flag bit.
        assert!(c.meta_from_state(BlockState::new(9, false)).is_err());
        assert!(c.meta_from_state(BlockState::new(255, true)).is_err());
    }

    #[test]
    fn valid_states_cover_both_flags() {
        let c = codec(2);
        let states = c.valid_states();
        assert_eq!(states.len(), 4);
        assert!(states.contains(&BlockState::new(1, true)));
    }

    #[test]
    fn property_string_is_sorted() {
        let c = codec(2);
        assert_eq!(
            c.property_string(BlockState::new(1, false)),
            "active=false,variant=v1"
        );
    }
}
