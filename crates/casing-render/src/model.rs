use casing_blocks::BlockState;
use casing_geom::Facing;
use serde::{Deserialize, Serialize};

use crate::layer::RenderLayer;

/// One textured face primitive of a baked model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakedQuad {
    pub face: Facing,
    pub layer: RenderLayer,
    pub texture: String,
    #[serde(default)]
    pub tint_index: Option<i32>,
}

/// Compiled, render-ready geometry for a block state.
pub trait BakedModel: Send + Sync {
    /// Quads culled against `facing` that draw in `layer` for `state`.
    fn quads(&self, state: BlockState, facing: Facing, layer: RenderLayer) -> &[BakedQuad];

    /// Whether any facing has quads on `layer`. Stops at the first facing that does.
    fn has_geometry(&self, state: BlockState, layer: RenderLayer) -> bool {
        Facing::ALL
            .iter()
            .any(|&f| !self.quads(state, f, layer).is_empty())
    }
}

/// Baked model whose quads do not depend on the state, bucketed by layer and facing.
#[derive(Clone, Debug, Default)]
pub struct SimpleBakedModel {
    buckets: [[Vec<BakedQuad>; 6]; 4],
}

impl SimpleBakedModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quads(quads: impl IntoIterator<Item = BakedQuad>) -> Self {
        let mut m = Self::new();
        for q in quads {
            m.push(q);
        }
        m
    }

    /// Six quads, one per facing, all on `layer`.
    pub fn cube(layer: RenderLayer, texture: &str) -> Self {
        Self::from_quads(Facing::ALL.into_iter().map(|face| BakedQuad {
            face,
            layer,
            texture: texture.to_string(),
            tint_index: None,
        }))
    }

    pub fn push(&mut self, quad: BakedQuad) {
        self.buckets[quad.layer.index()][quad.face.index()].push(quad);
    }

    pub fn quad_count(&self) -> usize {
        self.buckets.iter().flatten().map(Vec::len).sum()
    }
}

impl BakedModel for SimpleBakedModel {
    #[inline]
    fn quads(&self, _state: BlockState, facing: Facing, layer: RenderLayer) -> &[BakedQuad] {
        &self.buckets[layer.index()][facing.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quads_land_in_their_bucket() {
        let m = SimpleBakedModel::from_quads([BakedQuad {
            face: Facing::North,
            layer: RenderLayer::Cutout,
            texture: "glass".into(),
            tint_index: None,
        }]);
        let s = BlockState::default();
        assert_eq!(m.quads(s, Facing::North, RenderLayer::Cutout).len(), 1);
        assert!(m.quads(s, Facing::South, RenderLayer::Cutout).is_empty());
        assert!(m.quads(s, Facing::North, RenderLayer::Solid).is_empty());
        assert!(m.has_geometry(s, RenderLayer::Cutout));
        assert!(!m.has_geometry(s, RenderLayer::Translucent));
    }

    #[test]
    fn cube_covers_every_facing() {
        let m = SimpleBakedModel::cube(RenderLayer::Solid, "steel");
        assert_eq!(m.quad_count(), 6);
        for f in Facing::ALL {
            assert_eq!(m.quads(BlockState::default(), f, RenderLayer::Solid).len(), 1);
        }
    }
}
