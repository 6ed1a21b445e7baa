//! Render layers, baked block models, and the per-block layer capability cache.
#![forbid(unsafe_code)]

pub mod capability;
pub mod error;
pub mod key;
pub mod layer;
pub mod model;
pub mod models;

pub use capability::{BakeReport, BakeSource, RenderLayerCapabilityCache};
pub use error::ModelError;
pub use key::ModelKey;
pub use layer::{LayerSet, RenderLayer};
pub use model::{BakedModel, BakedQuad, SimpleBakedModel};
pub use models::{ModelLookup, ModelRegistry};
