use std::sync::Arc;

use casing_blocks::{BlockError, BlockRegistry, BlockType};
use casing_render::{BakeReport, ModelLookup, RenderLayerCapabilityCache};
use casing_world::ActivePositionRegistry;

use crate::block::VariantActiveBlock;
use crate::instances::BlockTypeList;

/// Services shared by the simulation and render sides: active positions,
/// the layer capability cache, and the list of registered block types.
///
/// Created once at startup; hand [`ActiveBlocks::positions`] to game logic
/// and call [`ActiveBlocks::on_model_bake`] from the asset pipeline.
pub struct ActiveBlocks {
    positions: Arc<ActivePositionRegistry>,
    layers: Arc<RenderLayerCapabilityCache>,
    blocks: BlockTypeList,
    connected_textures: bool,
}

impl Default for ActiveBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveBlocks {
    pub fn new() -> Self {
        Self::with_services(
            Arc::new(ActivePositionRegistry::new()),
            Arc::new(RenderLayerCapabilityCache::new()),
        )
    }

    pub fn with_services(
        positions: Arc<ActivePositionRegistry>,
        layers: Arc<RenderLayerCapabilityCache>,
    ) -> Self {
        Self {
            positions,
            layers,
            blocks: BlockTypeList::new(),
            connected_textures: false,
        }
    }

    /// Default for block types that do not choose the connected-textures wrapper.
    pub fn with_connected_textures(mut self, enabled: bool) -> Self {
        self.connected_textures = enabled;
        self
    }

    #[inline]
    pub fn positions(&self) -> &Arc<ActivePositionRegistry> {
        &self.positions
    }

    #[inline]
    pub fn layers(&self) -> &Arc<RenderLayerCapabilityCache> {
        &self.layers
    }

    #[inline]
    pub fn blocks(&self) -> &BlockTypeList {
        &self.blocks
    }

    /// Builds a block type and appends it to the block type list. Registering
    /// the same definition twice yields two entries with distinct ids.
    pub fn register(&self, ty: BlockType) -> Result<Arc<VariantActiveBlock>, BlockError> {
        let ctm = ty.connected_textures.unwrap_or(self.connected_textures);
        let name = ty.name.clone();
        let block = self.blocks.push_with(&name, |id| {
            VariantActiveBlock::new(id, ty, ctm, self.positions.clone(), self.layers.clone())
        })?;
        log::info!(
            "registered block type {:?} `{}` ({} variant(s){})",
            block.id(),
            block.name(),
            block.variants().len(),
            if ctm { ", connected textures" } else { "" }
        );
        Ok(block)
    }

    pub fn register_all(
        &self,
        registry: &BlockRegistry,
    ) -> Result<Vec<Arc<VariantActiveBlock>>, BlockError> {
        registry
            .iter()
            .map(|ty| {
                let mut ty = ty.clone();
                ty.connected_textures = Some(registry.wants_connected_textures(&ty));
                self.register(ty)
            })
            .collect()
    }

    /// Bake-cycle hook. Call once per cycle, after every model is registered
    /// in `models`; rebuilds the layer capability cache from all block types.
    pub fn on_model_bake(&self, models: &dyn ModelLookup) -> BakeReport {
        let blocks = self.blocks.snapshot();
        self.layers.rebuild(blocks.iter().map(|b| b.as_ref()), models)
    }
}
