use std::sync::Arc;

use casing_blocks::{
    ActiveVariantCodec, BlockError, BlockState, BlockType, BlockTypeId, Meta, Variant,
    VariantIndex, VariantSet,
};
use casing_geom::BlockPos;
use casing_render::{BakeSource, LayerSet, ModelKey, RenderLayer, RenderLayerCapabilityCache};
use casing_world::{ActivePositionRegistry, WorldId};

use crate::extended::{ConnectedTexturesState, ExtendedState, RenderState};

/// One block kind with a fixed variant domain and an `active` visual toggle.
///
/// Persists only the variant; whether a placed block shows as active is looked
/// up in the shared [`ActivePositionRegistry`] when its render state is
/// resolved. Which render layers it draws on comes from the shared
/// [`RenderLayerCapabilityCache`], filled at bake time.
///
/// Built through [`ActiveBlocks::register`](crate::ActiveBlocks::register),
/// which also appends it to the block type list.
pub struct VariantActiveBlock {
    id: BlockTypeId,
    ty: BlockType,
    connected_textures: bool,
    positions: Arc<ActivePositionRegistry>,
    layers: Arc<RenderLayerCapabilityCache>,
}

impl VariantActiveBlock {
    pub(crate) fn new(
        id: BlockTypeId,
        ty: BlockType,
        connected_textures: bool,
        positions: Arc<ActivePositionRegistry>,
        layers: Arc<RenderLayerCapabilityCache>,
    ) -> Self {
        Self {
            id,
            ty,
            connected_textures,
            positions,
            layers,
        }
    }

    #[inline]
    pub fn id(&self) -> BlockTypeId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.ty.name
    }

    #[inline]
    pub fn block_type(&self) -> &BlockType {
        &self.ty
    }

    #[inline]
    pub fn variants(&self) -> &VariantSet {
        self.ty.variants()
    }

    #[inline]
    pub fn uses_connected_textures(&self) -> bool {
        self.connected_textures
    }

    pub fn state(&self, variant: VariantIndex) -> Result<BlockState, BlockError> {
        self.ty.codec.build_state(variant)
    }

    pub fn state_named(&self, variant: &str) -> Result<BlockState, BlockError> {
        self.ty.codec.build_state_named(variant)
    }

    pub fn state_of<V: Variant>(&self, variant: V) -> Result<BlockState, BlockError> {
        self.ty.codec.build_state_of(variant)
    }

    /// Meta code of `state`; the listed active flag is always written cleared.
    /// Fails for a variant this block does not have.
    pub fn encode_meta(&self, state: BlockState) -> Result<Meta, BlockError> {
        self.ty.codec.meta_from_state(BlockState {
            active_flag: false,
            ..state
        })
    }

    pub fn decode_meta(&self, meta: Meta) -> Result<BlockState, BlockError> {
        self.ty.codec.state_from_meta(meta)
    }

    /// Resolves the render state of the block at `pos`.
    ///
    /// Without a loaded world (inventory and GUI rendering) the block is inactive.
    pub fn resolve_render_state(
        &self,
        state: BlockState,
        world: Option<WorldId>,
        pos: BlockPos,
    ) -> RenderState {
        let active = match world {
            Some(w) => self.positions.is_active(w, pos),
            None => false,
        };
        let ext = ExtendedState {
            block: self.id,
            state,
            active,
        };
        if self.connected_textures {
            RenderState::Connected(ConnectedTexturesState {
                inner: ext,
                world,
                pos,
            })
        } else {
            RenderState::Plain(ext)
        }
    }

    /// Per-frame layer predicate; `false` for every layer until the first bake.
    #[inline]
    pub fn can_render_in_layer(&self, _state: BlockState, layer: RenderLayer) -> bool {
        self.layers.supports_layer(self.id, layer)
    }

    pub fn render_layers(&self) -> LayerSet {
        self.layers.layers(self.id).unwrap_or_default()
    }

    /// Silk touch never yields these blocks.
    pub fn can_silk_harvest(&self) -> bool {
        false
    }

    pub fn model_key_for(&self, state: BlockState) -> ModelKey {
        ModelKey::for_state(&self.ty.codec, state)
    }
}

impl BakeSource for VariantActiveBlock {
    fn block_type_id(&self) -> BlockTypeId {
        self.id
    }

    fn codec(&self) -> &ActiveVariantCodec {
        &self.ty.codec
    }
}

impl std::fmt::Debug for VariantActiveBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VariantActiveBlock")
            .field("id", &self.id)
            .field("name", &self.ty.name)
            .field("variants", &self.ty.variants().len())
            .field("connected_textures", &self.connected_textures)
            .finish()
    }
}
