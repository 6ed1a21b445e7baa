use std::sync::{Arc, PoisonError, RwLock};

use casing_geom::BlockPos;
use hashbrown::{HashMap, HashSet};

use crate::WorldId;

type PositionSet = Arc<RwLock<HashSet<BlockPos>>>;

/// Per-world sets of block positions currently shown in the active state.
///
/// Written by game logic, read during render-state resolution. The outer map
/// lock is only held long enough to find or create a world's set; each set has
/// its own lock, so a reader never observes a half-applied update. Readers may
/// lag a writer by one tick, which is acceptable for a visual toggle.
///
/// Entries are created on first write and live as long as the registry.
#[derive(Default)]
pub struct ActivePositionRegistry {
    worlds: RwLock<HashMap<WorldId, PositionSet>>,
}

impl ActivePositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test. Unknown worlds are inactive and are not created.
    pub fn is_active(&self, world: WorldId, pos: BlockPos) -> bool {
        match self.lookup(world) {
            Some(set) => set
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains(&pos),
            None => false,
        }
    }

    /// Returns `true` if `pos` was not already active.
    pub fn mark_active(&self, world: WorldId, pos: BlockPos) -> bool {
        let set = self.get_or_create(world);
        let inserted = set
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(pos);
        if inserted {
            log::debug!(target: "active", "{} {} -> active", world, pos);
        }
        inserted
    }

    /// Returns `true` if `pos` was active.
    pub fn mark_inactive(&self, world: WorldId, pos: BlockPos) -> bool {
        let set = self.get_or_create(world);
        let removed = set
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&pos);
        if removed {
            log::debug!(target: "active", "{} {} -> inactive", world, pos);
        }
        removed
    }

    pub fn set_active(&self, world: WorldId, pos: BlockPos, active: bool) -> bool {
        if active {
            self.mark_active(world, pos)
        } else {
            self.mark_inactive(world, pos)
        }
    }

    pub fn active_count(&self, world: WorldId) -> usize {
        self.lookup(world)
            .map(|set| set.read().unwrap_or_else(PoisonError::into_inner).len())
            .unwrap_or(0)
    }

    /// Snapshot of the active positions of `world`, sorted.
    pub fn active_positions(&self, world: WorldId) -> Vec<BlockPos> {
        let mut out: Vec<BlockPos> = match self.lookup(world) {
            Some(set) => set
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .copied()
                .collect(),
            None => Vec::new(),
        };
        out.sort();
        out
    }

    /// Worlds that have an entry, sorted.
    pub fn worlds(&self) -> Vec<WorldId> {
        let mut out: Vec<WorldId> = self
            .worlds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        out.sort();
        out
    }

    fn lookup(&self, world: WorldId) -> Option<PositionSet> {
        self.worlds
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&world)
            .cloned()
    }

    fn get_or_create(&self, world: WorldId) -> PositionSet {
        if let Some(set) = self.lookup(world) {
            return set;
        }
        let mut worlds = self.worlds.write().unwrap_or_else(PoisonError::into_inner);
        worlds
            .entry(world)
            .or_insert_with(|| {
                log::debug!(target: "active", "tracking active blocks for {}", world);
                Arc::new(RwLock::new(HashSet::new()))
            })
            .clone()
    }
}
