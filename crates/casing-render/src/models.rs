use std::fs;
use std::path::Path;
use std::sync::Arc;

use casing_blocks::props::{ACTIVE_PROPERTY, VARIANT_PROPERTY, parse_property_string};
use casing_blocks::{BlockError, BlockRegistry, BlockState, BlockType};
use casing_geom::Facing;
use hashbrown::HashMap;
use serde::Deserialize;

use crate::error::ModelError;
use crate::key::ModelKey;
use crate::layer::RenderLayer;
use crate::model::{BakedModel, BakedQuad, SimpleBakedModel};

/// Read access to the baked models of a bake cycle.
pub trait ModelLookup {
    fn model(&self, key: &ModelKey) -> Option<&dyn BakedModel>;
}

impl<M: BakedModel> ModelLookup for HashMap<ModelKey, M> {
    fn model(&self, key: &ModelKey) -> Option<&dyn BakedModel> {
        self.get(key).map(|m| m as &dyn BakedModel)
    }
}

/// Baked models of one bake cycle, keyed by [`ModelKey`].
#[derive(Default, Clone)]
pub struct ModelRegistry {
    models: HashMap<ModelKey, Arc<dyn BakedModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: ModelKey, model: Arc<dyn BakedModel>) -> Option<Arc<dyn BakedModel>> {
        self.models.insert(key, model)
    }

    pub fn get(&self, key: &ModelKey) -> Option<&Arc<dyn BakedModel>> {
        self.models.get(key)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModelKey> {
        self.models.keys()
    }

    pub fn load_from_path(
        blocks: &BlockRegistry,
        models_path: impl AsRef<Path>,
    ) -> Result<Self, ModelError> {
        let s = fs::read_to_string(models_path)?;
        Self::from_toml_str(blocks, &s)
    }

    pub fn from_toml_str(blocks: &BlockRegistry, toml_str: &str) -> Result<Self, ModelError> {
        let cfg: ModelsConfig = toml::from_str(toml_str)?;
        Self::from_config(blocks, cfg)
    }

    pub fn from_config(blocks: &BlockRegistry, cfg: ModelsConfig) -> Result<Self, ModelError> {
        let mut reg = ModelRegistry::new();
        for def in cfg.models {
            let ty = blocks
                .get(&def.block)
                .ok_or_else(|| ModelError::UnknownBlock(def.block.clone()))?;
            let model: Arc<dyn BakedModel> = Arc::new(def.bake());
            for key in def.keys(ty)? {
                if reg.register(key.clone(), model.clone()).is_some() {
                    log::warn!("model {} defined more than once; keeping the last", key);
                }
            }
        }
        log::info!("loaded {} baked model key(s)", reg.len());
        Ok(reg)
    }
}

impl ModelLookup for ModelRegistry {
    fn model(&self, key: &ModelKey) -> Option<&dyn BakedModel> {
        self.models.get(key).map(|m| m.as_ref())
    }
}

// --- Config ---

#[derive(Deserialize, Debug, Default)]
pub struct ModelsConfig {
    #[serde(default)]
    pub models: Vec<ModelDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ModelDef {
    pub block: String,
    // Explicit property string; takes precedence over `variant`/`active`.
    #[serde(default)]
    pub properties: Option<String>,
    // Absent: every variant of the block.
    #[serde(default)]
    pub variant: Option<String>,
    // Absent: both values of the listed active flag.
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub quads: Vec<QuadDef>,
    // Shorthand for one quad per facing.
    #[serde(default)]
    pub cube: Vec<CubeDef>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct QuadDef {
    pub face: Facing,
    pub layer: RenderLayer,
    pub texture: String,
    #[serde(default)]
    pub tint_index: Option<i32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CubeDef {
    pub layer: RenderLayer,
    pub texture: String,
}

impl ModelDef {
    fn bake(&self) -> SimpleBakedModel {
        let mut m = SimpleBakedModel::new();
        for q in &self.quads {
            m.push(BakedQuad {
                face: q.face,
                layer: q.layer,
                texture: q.texture.clone(),
                tint_index: q.tint_index,
            });
        }
        for c in &self.cube {
            for face in Facing::ALL {
                m.push(BakedQuad {
                    face,
                    layer: c.layer,
                    texture: c.texture.clone(),
                    tint_index: None,
                });
            }
        }
        m
    }

    // Keys go through the same canonicalization as lookups.
    fn keys(&self, ty: &BlockType) -> Result<Vec<ModelKey>, ModelError> {
        if let Some(props) = &self.properties {
            let state = state_from_properties(ty, props)?;
            return Ok(vec![ModelKey::for_state(&ty.codec, state)]);
        }
        let variants = match &self.variant {
            Some(name) => vec![ty.codec.build_state_named(name)?.variant],
            None => ty.variants().indices().collect(),
        };
        let flags: &[bool] = match self.active {
            Some(false) => &[false],
            Some(true) => &[true],
            None => &[false, true],
        };
        let mut out = Vec::with_capacity(variants.len() * flags.len());
        for &v in &variants {
            for &flag in flags {
                out.push(ModelKey::for_state(&ty.codec, BlockState::new(v, flag)));
            }
        }
        Ok(out)
    }
}

/// Resolves a hand-written property string to a state of `ty`. Exactly the
/// `active` and `variant` properties must be present.
fn state_from_properties(ty: &BlockType, props: &str) -> Result<BlockState, BlockError> {
    let malformed = || BlockError::MalformedProperty(props.to_string());
    let mut active = None;
    let mut variant = None;
    for (name, value) in parse_property_string(props)? {
        let slot = match name {
            ACTIVE_PROPERTY => &mut active,
            VARIANT_PROPERTY => &mut variant,
            _ => return Err(malformed()),
        };
        if slot.replace(value).is_some() {
            return Err(malformed());
        }
    }
    let active = match active {
        Some("true") => true,
        Some("false") => false,
        _ => return Err(malformed()),
    };
    let variant = variant.ok_or_else(malformed)?;
    let state = ty.codec.build_state_named(variant)?;
    Ok(BlockState::new(state.variant, active))
}
