//! World identity and per-world tracking of blocks in the active visual state.
#![forbid(unsafe_code)]

pub mod active;
pub mod world_id;

pub use active::ActivePositionRegistry;
pub use world_id::WorldId;
