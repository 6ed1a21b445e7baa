use std::sync::{Arc, PoisonError, RwLock};

use casing_blocks::{BlockError, BlockTypeId};

use crate::block::VariantActiveBlock;

/// Append-only list of every constructed block type, in construction order.
/// Only the bake-time layer scan reads it as a whole.
#[derive(Default)]
pub struct BlockTypeList {
    entries: RwLock<Vec<Arc<VariantActiveBlock>>>,
}

impl BlockTypeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the block built by `make` with the next free id. Not idempotent.
    /// Fails once every id is in use.
    pub(crate) fn push_with(
        &self,
        name: &str,
        make: impl FnOnce(BlockTypeId) -> VariantActiveBlock,
    ) -> Result<Arc<VariantActiveBlock>, BlockError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let id = next_id(entries.len(), name)?;
        let block = Arc::new(make(id));
        entries.push(block.clone());
        Ok(block)
    }

    pub fn get(&self, id: BlockTypeId) -> Option<Arc<VariantActiveBlock>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id.0 as usize)
            .cloned()
    }

    /// First registered block type with `name`.
    pub fn find(&self, name: &str) -> Option<Arc<VariantActiveBlock>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|b| b.name() == name)
            .cloned()
    }

    pub fn snapshot(&self) -> Vec<Arc<VariantActiveBlock>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn next_id(len: usize, name: &str) -> Result<BlockTypeId, BlockError> {
    u16::try_from(len)
        .map(BlockTypeId)
        .map_err(|_| BlockError::TooManyBlockTypes {
            block: name.to_string(),
            max: u16::MAX as usize + 1,
        })
}
