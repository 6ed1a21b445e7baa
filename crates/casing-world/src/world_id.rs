use std::fmt;
use std::str::FromStr;

/// Opaque dimension identifier of a loaded world.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorldId(pub i32);

impl WorldId {
    pub const OVERWORLD: WorldId = WorldId(0);
    pub const NETHER: WorldId = WorldId(-1);
    pub const END: WorldId = WorldId(1);

    pub fn name(self) -> Option<&'static str> {
        match self {
            WorldId::OVERWORLD => Some("overworld"),
            WorldId::NETHER => Some("nether"),
            WorldId::END => Some("end"),
            _ => None,
        }
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(n) => f.write_str(n),
            None => write!(f, "dim{}", self.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseWorldIdError(pub String);

impl fmt::Display for ParseWorldIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown world `{}`", self.0)
    }
}

impl std::error::Error for ParseWorldIdError {}

// Accepts the well-known names, `dim<N>`, or a bare integer.
impl FromStr for WorldId {
    type Err = ParseWorldIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "overworld" => Ok(WorldId::OVERWORLD),
            "nether" => Ok(WorldId::NETHER),
            "end" => Ok(WorldId::END),
            _ => s
                .strip_prefix("dim")
                .unwrap_or(s)
                .parse::<i32>()
                .map(WorldId)
                .map_err(|_| ParseWorldIdError(s.to_string())),
        }
    }
}
