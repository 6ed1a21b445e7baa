use casing_blocks::{BlockRegistry, BlockState, BlockType, Variant, VariantSet};
use casing_geom::BlockPos;
use casing_render::{LayerSet, ModelRegistry, RenderLayer};
use casing_runtime::{ActiveBlocks, RenderState};
use casing_world::WorldId;
use proptest::prelude::*;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Casing {
    Steel,
    Titanium,
    Tungstensteel,
}

impl Variant for Casing {
    const VALUES: &'static [Self] = &[Casing::Steel, Casing::Titanium, Casing::Tungstensteel];
    fn name(self) -> &'static str {
        match self {
            Casing::Steel => "steel",
            Casing::Titanium => "titanium",
            Casing::Tungstensteel => "tungstensteel",
        }
    }
}

const BLOCKS: &str = r#"
[[blocks]]
name = "machine_casing"
variants = ["steel", "titanium", "tungstensteel"]

[[blocks]]
name = "glass_casing"
variants = ["tempered", "laminated"]
connected_textures = true
"#;

const MODELS: &str = r#"
[[models]]
block = "machine_casing"
cube = [{ layer = "solid", texture = "casing/plain" }]

[[models]]
block = "glass_casing"
variant = "tempered"
cube = [{ layer = "cutout", texture = "glass/tempered" }]

[[models]]
block = "glass_casing"
variant = "laminated"
quads = [
    { face = "north", layer = "translucent", texture = "glass/laminated" },
    { face = "south", layer = "cutout", texture = "glass/frame" },
]
"#;

#[test]
fn three_variant_meta_scenario() {
    let ctx = ActiveBlocks::new();
    let casing = ctx.register(BlockType::for_enum::<Casing>("machine_casing").unwrap()).unwrap();
    for (i, v) in Casing::VALUES.iter().enumerate() {
        let s = casing.state_of(*v).unwrap();
        assert_eq!(casing.encode_meta(s).unwrap(), i as u8);
        assert_eq!(casing.decode_meta(i as u8).unwrap(), BlockState::new(i as u8, false));
    }
    assert_eq!(casing.decode_meta(8).unwrap(), BlockState::new(0, false));
    assert!(casing.decode_meta(3).is_err());
}

#[test]
fn encode_clears_listed_active_flag() {
    let ctx = ActiveBlocks::new();
    let casing = ctx.register(BlockType::for_enum::<Casing>("machine_casing").unwrap()).unwrap();
    assert_eq!(casing.encode_meta(BlockState::new(2, true)).unwrap(), 2);
}

#[test]
fn encode_rejects_variants_outside_the_block() {
    let ctx = ActiveBlocks::new();
    let casing = ctx.register(BlockType::for_enum::<Casing>("machine_casing").unwrap()).unwrap();
    // 9 would set the reserved flag bit, 5 would not decode again.
    assert!(casing.encode_meta(BlockState::new(9, false)).is_err());
    assert!(casing.encode_meta(BlockState::new(5, false)).is_err());
    assert!(casing.encode_meta(BlockState::new(3, true)).is_err());
    for v in 0..3u8 {
        let meta = casing.encode_meta(BlockState::new(v, true)).unwrap();
        assert_eq!(meta & 0b1000, 0);
        assert_eq!(casing.decode_meta(meta).unwrap(), BlockState::new(v, false));
    }
}

#[test]
fn render_state_follows_active_positions() {
    let ctx = ActiveBlocks::new();
    let casing = ctx.register(BlockType::for_enum::<Casing>("machine_casing").unwrap()).unwrap();
    let s = casing.state_of(Casing::Titanium).unwrap();
    let pos = BlockPos::new(0, 64, 0);
    let overworld = Some(WorldId::OVERWORLD);

    assert!(!casing.resolve_render_state(s, overworld, pos).is_active());
    ctx.positions().mark_active(WorldId::OVERWORLD, pos);
    let r = casing.resolve_render_state(s, overworld, pos);
    assert!(r.is_active());
    assert_eq!(r.state(), s);
    assert!(!casing.resolve_render_state(s, Some(WorldId::NETHER), pos).is_active());

    // No world loaded: inventory rendering is always inactive.
    assert!(!casing.resolve_render_state(s, None, pos).is_active());

    ctx.positions().mark_inactive(WorldId::OVERWORLD, pos);
    assert!(!casing.resolve_render_state(s, overworld, pos).is_active());
    // Activity never reaches the persisted encoding.
    assert_eq!(casing.encode_meta(r.state()).unwrap(), 1);
}

#[test]
fn connected_textures_wrap_when_enabled() {
    let ctx = ActiveBlocks::new().with_connected_textures(true);
    let plain = ctx.register(
        BlockType::for_enum::<Casing>("machine_casing")
            .unwrap()
            .with_connected_textures(false),
    )
    .unwrap();
    let wrapped = ctx.register(BlockType::for_enum::<Casing>("frame").unwrap()).unwrap();
    let pos = BlockPos::new(4, 5, 6);
    let s = BlockState::new(0, false);
    assert!(matches!(
        plain.resolve_render_state(s, Some(WorldId::END), pos),
        RenderState::Plain(_)
    ));
    match wrapped.resolve_render_state(s, Some(WorldId::END), pos) {
        RenderState::Connected(c) => {
            assert_eq!(c.pos, pos);
            assert_eq!(c.world, Some(WorldId::END));
            assert_eq!(c.inner.block, wrapped.id());
        }
        other => panic!("expected connected-textures state, got {other:?}"),
    }
}

#[test]
fn registration_is_not_idempotent() {
    let ctx = ActiveBlocks::new();
    let ty = BlockType::new("casing", VariantSet::new("casing", ["a", "b"]).unwrap());
    let first = ctx.register(ty.clone()).unwrap();
    let second = ctx.register(ty).unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(ctx.blocks().len(), 2);
    assert_eq!(ctx.blocks().find("casing").unwrap().id(), first.id());
}

#[test]
fn bake_hook_fills_layer_predicate() {
    let blocks = BlockRegistry::from_toml_str(BLOCKS).unwrap();
    let models = ModelRegistry::from_toml_str(&blocks, MODELS).unwrap();
    let ctx = ActiveBlocks::new();
    let registered = ctx.register_all(&blocks).unwrap();
    let casing = &registered[0];
    let glass = &registered[1];
    let s = BlockState::default();

    // Before the first bake nothing renders anywhere.
    for layer in RenderLayer::ALL {
        assert!(!casing.can_render_in_layer(s, layer));
    }

    let report = ctx.on_model_bake(&models);
    assert_eq!(report.block_types, 2);
    assert_eq!(report.states, 2 * 3 + 2 * 2);
    assert_eq!(report.missing_models, 0);

    assert_eq!(casing.render_layers(), LayerSet::SOLID);
    assert!(casing.can_render_in_layer(s, RenderLayer::Solid));
    assert!(!casing.can_render_in_layer(s, RenderLayer::Cutout));
    assert_eq!(
        glass.render_layers(),
        LayerSet::CUTOUT | LayerSet::TRANSLUCENT
    );
    assert!(glass.uses_connected_textures());
    assert!(!casing.can_silk_harvest());
}

#[test]
fn block_registered_after_bake_waits_for_next_cycle() {
    let blocks = BlockRegistry::from_toml_str(BLOCKS).unwrap();
    let models = ModelRegistry::from_toml_str(&blocks, MODELS).unwrap();
    let ctx = ActiveBlocks::new();
    ctx.on_model_bake(&models);
    let late = ctx.register(blocks.get("machine_casing").unwrap().clone()).unwrap();
    assert!(!late.can_render_in_layer(BlockState::default(), RenderLayer::Solid));
    ctx.on_model_bake(&models);
    assert!(late.can_render_in_layer(BlockState::default(), RenderLayer::Solid));
}

proptest! {
    #[test]
    fn decode_encode_roundtrip_through_facade(n in 1usize..=8, v in 0u8..8, flag in any::<bool>()) {
        prop_assume!((v as usize) < n);
        let names: Vec<String> = (0..n).map(|i| format!("v{i}")).collect();
        let ctx = ActiveBlocks::new();
        let b = ctx.register(BlockType::new("b", VariantSet::new("b", names).unwrap())).unwrap();
        let meta = b.encode_meta(BlockState::new(v, flag)).unwrap();
        prop_assert_eq!(meta & 0b1000, 0);
        prop_assert_eq!(b.decode_meta(meta).unwrap(), BlockState::new(v, false));
    }

    #[test]
    fn activity_is_per_position(x in -64i32..64, y in 0i32..256, z in -64i32..64, dx in 1i32..4) {
        let ctx = ActiveBlocks::new();
        let b = ctx.register(BlockType::for_enum::<Casing>("machine_casing").unwrap()).unwrap();
        let s = BlockState::default();
        let p = BlockPos::new(x, y, z);
        ctx.positions().mark_active(WorldId::OVERWORLD, p);
        prop_assert!(b.resolve_render_state(s, Some(WorldId::OVERWORLD), p).is_active());
        let q = BlockPos::new(x + dx, y, z);
        prop_assert!(!b.resolve_render_state(s, Some(WorldId::OVERWORLD), q).is_active());
    }
}
