use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Rendering pass a block's geometry can take part in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderLayer {
    Solid = 0,
    CutoutMipped = 1,
    Cutout = 2,
    Translucent = 3,
}

impl RenderLayer {
    pub const ALL: [RenderLayer; 4] = [
        RenderLayer::Solid,
        RenderLayer::CutoutMipped,
        RenderLayer::Cutout,
        RenderLayer::Translucent,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn flag(self) -> LayerSet {
        LayerSet::from_bits_retain(1 << self as u8)
    }

    pub fn name(self) -> &'static str {
        match self {
            RenderLayer::Solid => "solid",
            RenderLayer::CutoutMipped => "cutout_mipped",
            RenderLayer::Cutout => "cutout",
            RenderLayer::Translucent => "translucent",
        }
    }
}

impl fmt::Display for RenderLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of render layers, one bit per [`RenderLayer`].
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LayerSet: u8 {
        const SOLID = 1 << 0;
        const CUTOUT_MIPPED = 1 << 1;
        const CUTOUT = 1 << 2;
        const TRANSLUCENT = 1 << 3;
    }
}

impl LayerSet {
    #[inline]
    pub fn has(self, layer: RenderLayer) -> bool {
        self.contains(layer.flag())
    }

    #[inline]
    pub fn add(&mut self, layer: RenderLayer) {
        self.insert(layer.flag());
    }

    pub fn layers(self) -> impl Iterator<Item = RenderLayer> {
        RenderLayer::ALL.into_iter().filter(move |l| self.has(*l))
    }
}

impl fmt::Display for LayerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        f.write_str("{")?;
        for l in self.layers() {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            f.write_str(l.name())?;
        }
        f.write_str("}")
    }
}
