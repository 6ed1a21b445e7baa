use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::codec::ActiveVariantCodec;
use super::config::{BlockDef, BlocksConfig};
use super::error::BlockError;
use super::variant::{Variant, VariantSet};

/// Definition of one variant/active block kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockType {
    pub name: String,
    pub codec: ActiveVariantCodec,
    pub connected_textures: Option<bool>,
}

impl BlockType {
    pub fn new(name: impl Into<String>, variants: VariantSet) -> Self {
        let name = name.into();
        Self {
            codec: ActiveVariantCodec::new(name.clone(), variants),
            name,
            connected_textures: None,
        }
    }

    pub fn for_enum<V: Variant>(name: impl Into<String>) -> Result<Self, BlockError> {
        let codec = ActiveVariantCodec::for_enum::<V>(name)?;
        Ok(Self {
            name: codec.block().to_string(),
            codec,
            connected_textures: None,
        })
    }

    pub fn with_connected_textures(mut self, enabled: bool) -> Self {
        self.connected_textures = Some(enabled);
        self
    }

    fn from_def(def: BlockDef) -> Result<Self, BlockError> {
        let variants = VariantSet::new(&def.name, def.variants)?;
        let mut ty = Self::new(def.name, variants);
        ty.connected_textures = def.connected_textures;
        Ok(ty)
    }

    #[inline]
    pub fn variants(&self) -> &VariantSet {
        self.codec.variants()
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, usize>,
    pub connected_textures: bool,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&BlockType> {
        self.by_name.get(name).map(|&i| &self.blocks[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn insert(&mut self, ty: BlockType) -> Result<(), BlockError> {
        if self.by_name.contains_key(&ty.name) {
            return Err(BlockError::DuplicateBlock { block: ty.name });
        }
        self.by_name.insert(ty.name.clone(), self.blocks.len());
        self.blocks.push(ty);
        Ok(())
    }

    /// Whether resolved states of `ty` get the connected-textures wrapper.
    pub fn wants_connected_textures(&self, ty: &BlockType) -> bool {
        ty.connected_textures.unwrap_or(self.connected_textures)
    }

    pub fn load_from_path(blocks_path: impl AsRef<Path>) -> Result<Self, BlockError> {
        let blocks_toml = fs::read_to_string(blocks_path)?;
        Self::from_toml_str(&blocks_toml)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, BlockError> {
        let cfg: BlocksConfig = toml::from_str(toml_str)?;
        Self::from_configs(cfg)
    }

    pub fn from_configs(cfg: BlocksConfig) -> Result<Self, BlockError> {
        let mut reg = BlockRegistry {
            connected_textures: cfg.connected_textures.unwrap_or(false),
            ..Default::default()
        };
        for def in cfg.blocks.into_iter() {
            let ty = BlockType::from_def(def)?;
            log::debug!(
                "block `{}`: {} variant(s) [{}]",
                ty.name,
                ty.variants().len(),
                ty.variants().names().collect::<Vec<_>>().join(", ")
            );
            reg.insert(ty)?;
        }
        log::info!("loaded {} block definition(s)", reg.len());
        Ok(reg)
    }
}
