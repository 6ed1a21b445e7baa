use casing_blocks::{BlockState, BlockTypeId};
use casing_geom::BlockPos;
use casing_world::WorldId;

/// Persisted state plus the unlisted `active` property resolved for rendering.
/// `active` never takes part in the meta encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedState {
    pub block: BlockTypeId,
    pub state: BlockState,
    pub active: bool,
}

/// Extended state carrying the world position the connected-textures renderer
/// needs to inspect neighbors.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConnectedTexturesState {
    pub inner: ExtendedState,
    pub world: Option<WorldId>,
    pub pos: BlockPos,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderState {
    Plain(ExtendedState),
    Connected(ConnectedTexturesState),
}

impl RenderState {
    #[inline]
    pub fn extended(&self) -> &ExtendedState {
        match self {
            RenderState::Plain(s) => s,
            RenderState::Connected(c) => &c.inner,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.extended().active
    }

    #[inline]
    pub fn state(&self) -> BlockState {
        self.extended().state
    }

    #[inline]
    pub fn is_connected(&self) -> bool {
        matches!(self, RenderState::Connected(_))
    }
}
