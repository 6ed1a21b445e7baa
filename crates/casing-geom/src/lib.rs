//! Integer block positions and axis-aligned facings shared by the engine crates.
#![forbid(unsafe_code)]

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use core::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position of the neighbor touching this block's `facing` side.
    #[inline]
    pub fn offset(self, facing: Facing) -> BlockPos {
        self + facing.direction()
    }

    #[inline]
    pub fn manhattan(self, rhs: BlockPos) -> u32 {
        self.x.abs_diff(rhs.x) + self.y.abs_diff(rhs.y) + self.z.abs_diff(rhs.z)
    }
}

impl Add for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn add(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

impl AddAssign for BlockPos {
    #[inline]
    fn add_assign(&mut self, rhs: BlockPos) {
        *self = *self + rhs;
    }
}

impl Sub for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn sub(self, rhs: BlockPos) -> BlockPos {
        BlockPos::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }
}

impl SubAssign for BlockPos {
    #[inline]
    fn sub_assign(&mut self, rhs: BlockPos) {
        *self = *self - rhs;
    }
}

impl Neg for BlockPos {
    type Output = BlockPos;
    #[inline]
    fn neg(self) -> BlockPos {
        BlockPos::new(self.x.wrapping_neg(), self.y.wrapping_neg(), self.z.wrapping_neg())
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsePosError(pub String);

impl fmt::Display for ParsePosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected `x,y,z`, got `{}`", self.0)
    }
}

impl std::error::Error for ParsePosError {}

// Accepts `x,y,z` with optional whitespace around each component.
impl FromStr for BlockPos {
    type Err = ParsePosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut it = s.split(',').map(|p| p.trim().parse::<i32>());
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z)), None) => Ok(BlockPos::new(x, y, z)),
            _ => Err(ParsePosError(s.to_string())),
        }
    }
}

/// One of the six axis-aligned sides of a block.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Down = 0,
    Up = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::Down,
        Facing::Up,
        Facing::North,
        Facing::South,
        Facing::West,
        Facing::East,
    ];

    /// Returns the `[0..6)` index of this facing.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a facing index `[0..6)` back into a `Facing`.
    #[inline]
    pub fn from_index(i: usize) -> Option<Facing> {
        Self::ALL.get(i).copied()
    }

    #[inline]
    pub fn opposite(self) -> Facing {
        match self {
            Facing::Down => Facing::Up,
            Facing::Up => Facing::Down,
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }

    /// Unit step towards this side (north is -z, east is +x).
    #[inline]
    pub fn direction(self) -> BlockPos {
        match self {
            Facing::Down => BlockPos::new(0, -1, 0),
            Facing::Up => BlockPos::new(0, 1, 0),
            Facing::North => BlockPos::new(0, 0, -1),
            Facing::South => BlockPos::new(0, 0, 1),
            Facing::West => BlockPos::new(-1, 0, 0),
            Facing::East => BlockPos::new(1, 0, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Facing::Down => "down",
            Facing::Up => "up",
            Facing::North => "north",
            Facing::South => "south",
            Facing::West => "west",
            Facing::East => "east",
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
