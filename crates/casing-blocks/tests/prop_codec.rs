use casing_blocks::codec::ACTIVE_FLAG_BIT;
use casing_blocks::error::BlockError;
use casing_blocks::registry::BlockRegistry;
use casing_blocks::variant::MAX_VARIANTS;
use casing_blocks::{ActiveVariantCodec, BlockState, VariantSet};
use proptest::prelude::*;

fn codec_with(n: usize) -> ActiveVariantCodec {
    let names: Vec<String> = (0..n).map(|i| format!("variant_{i}")).collect();
    ActiveVariantCodec::new("casing", VariantSet::new("casing", names).unwrap())
}

fn domain_and_index() -> impl Strategy<Value = (usize, u8)> {
    (1usize..=MAX_VARIANTS).prop_flat_map(|n| (Just(n), 0u8..n as u8))
}

proptest! {
    // decode(encode(build(v))) == (v, false) for every domain size that fits.
    #[test]
    fn build_encode_decode_roundtrip((n, v) in domain_and_index()) {
        let c = codec_with(n);
        let state = c.build_state(v).unwrap();
        let meta = c.meta_from_state(state).unwrap();
        prop_assert_eq!(c.state_from_meta(meta).unwrap(), BlockState::new(v, false));
    }

    // Built states never set the reserved active bit.
    #[test]
    fn built_states_leave_flag_bit_clear((n, v) in domain_and_index()) {
        let c = codec_with(n);
        let meta = c.meta_from_state(c.build_state(v).unwrap()).unwrap();
        prop_assert_eq!(meta & ACTIVE_FLAG_BIT, 0);
        prop_assert!(meta < 8);
    }

    // A persisted flag bit decodes to the same variant with the flag dropped.
    #[test]
    fn flag_bit_ignored_on_decode((n, v) in domain_and_index()) {
        let c = codec_with(n);
        let flagged = c.meta_from_state(BlockState::new(v, true)).unwrap();
        prop_assert_eq!(flagged, v | ACTIVE_FLAG_BIT);
        prop_assert_eq!(c.state_from_meta(flagged).unwrap(), BlockState::new(v, false));
    }

    // Any meta whose low bits fall outside the domain is an error, never a wrong variant.
    #[test]
    fn out_of_domain_meta_rejected(n in 1usize..MAX_VARIANTS, meta in 0u8..16) {
        let c = codec_with(n);
        let in_domain = ((meta & 0b111) as usize) < n;
        prop_assert_eq!(c.state_from_meta(meta).is_ok(), in_domain);
    }

    // States outside the domain never encode, with or without the flag.
    #[test]
    fn out_of_domain_state_rejected(n in 1usize..=MAX_VARIANTS, v in 0u8..=255, flag in any::<bool>()) {
        let c = codec_with(n);
        let encoded = c.meta_from_state(BlockState::new(v, flag));
        prop_assert_eq!(encoded.is_ok(), (v as usize) < n);
    }

    #[test]
    fn oversized_domains_rejected(n in (MAX_VARIANTS + 1)..32usize) {
        let names: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
        let is_too_many = matches!(
            VariantSet::new("casing", names),
            Err(BlockError::TooManyVariants { .. })
        );
        prop_assert!(is_too_many);
    }
}

#[test]
fn registry_loads_blocks_toml() {
    let reg = BlockRegistry::from_toml_str(
        r#"
        connected_textures = true

        [[blocks]]
        name = "machine_casing"
        variants = ["steel", "titanium", "tungstensteel"]

        [[blocks]]
        name = "wire_coil"
        variants = ["cupronickel", "kanthal"]
        connected_textures = false
    "#,
    )
    .unwrap();
    assert_eq!(reg.len(), 2);
    let casing = reg.get("machine_casing").unwrap();
    assert_eq!(casing.variants().index_of("tungstensteel"), Some(2));
    assert!(reg.wants_connected_textures(casing));
    assert!(!reg.wants_connected_textures(reg.get("wire_coil").unwrap()));
}

#[test]
fn registry_rejects_nine_variants() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "too_wide"
        variants = ["a", "b", "c", "d", "e", "f", "g", "h", "i"]
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::TooManyVariants { count: 9, .. }));
}

#[test]
fn registry_rejects_duplicate_blocks() {
    let err = BlockRegistry::from_toml_str(
        r#"
        [[blocks]]
        name = "casing"
        variants = ["a"]

        [[blocks]]
        name = "casing"
        variants = ["b"]
    "#,
    )
    .unwrap_err();
    assert!(matches!(err, BlockError::DuplicateBlock { .. }));
}

#[test]
fn named_states_resolve_through_the_domain() {
    let c = codec_with(3);
    assert_eq!(c.build_state_named("variant_2").unwrap(), BlockState::new(2, false));
    assert!(matches!(
        c.build_state_named("missing"),
        Err(BlockError::UnknownVariant { .. })
    ));
}
