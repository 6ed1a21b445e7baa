use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError, RwLock};

use casing_blocks::{ActiveVariantCodec, BlockState, BlockTypeId};
use hashbrown::HashMap;

use crate::key::ModelKey;
use crate::layer::{LayerSet, RenderLayer};
use crate::models::ModelLookup;

/// A block type whose baked states feed the capability cache.
pub trait BakeSource {
    fn block_type_id(&self) -> BlockTypeId;

    fn codec(&self) -> &ActiveVariantCodec;

    fn valid_states(&self) -> Vec<BlockState> {
        self.codec().valid_states()
    }

    fn model_key(&self, state: BlockState) -> ModelKey {
        ModelKey::for_state(self.codec(), state)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BakeReport {
    pub generation: u64,
    pub block_types: usize,
    pub states: usize,
    pub missing_models: usize,
    pub with_layers: usize,
}

/// Which render layers each block type produces geometry on.
///
/// Valid between two bake cycles. A rebuild scans every valid state of every
/// block type, then replaces the whole map at once; block types with no
/// geometry on any layer have no entry. Rebuilds are serialized.
#[derive(Default)]
pub struct RenderLayerCapabilityCache {
    layers: RwLock<HashMap<BlockTypeId, LayerSet>>,
    rebuild_lock: Mutex<()>,
    generation: AtomicU64,
}

impl RenderLayerCapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Must run after every model of the bake cycle has been registered.
    pub fn rebuild<'a, B, I>(&self, blocks: I, models: &dyn ModelLookup) -> BakeReport
    where
        B: BakeSource + ?Sized + 'a,
        I: IntoIterator<Item = &'a B>,
    {
        let _serial = self
            .rebuild_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut report = BakeReport::default();
        let mut next: HashMap<BlockTypeId, LayerSet> = HashMap::new();
        for block in blocks {
            report.block_types += 1;
            let id = block.block_type_id();
            for state in block.valid_states() {
                report.states += 1;
                let key = block.model_key(state);
                let Some(model) = models.model(&key) else {
                    report.missing_models += 1;
                    log::debug!(target: "bake", "no baked model for {}", key);
                    continue;
                };
                for layer in RenderLayer::ALL {
                    if model.has_geometry(state, layer) {
                        next.entry(id).or_default().add(layer);
                    }
                }
            }
        }
        report.with_layers = next.len();
        {
            let mut layers = self.layers.write().unwrap_or_else(PoisonError::into_inner);
            *layers = next;
        }
        report.generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::info!(
            target: "bake",
            "layer cache rebuilt (gen {}): {} block type(s), {} state(s), {} without model, {} with geometry",
            report.generation,
            report.block_types,
            report.states,
            report.missing_models,
            report.with_layers
        );
        report
    }

    /// Unknown block types render on no layer.
    #[inline]
    pub fn supports_layer(&self, block: BlockTypeId, layer: RenderLayer) -> bool {
        self.layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&block)
            .is_some_and(|set| set.has(layer))
    }

    pub fn layers(&self, block: BlockTypeId) -> Option<LayerSet> {
        self.layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&block)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of completed rebuilds.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
