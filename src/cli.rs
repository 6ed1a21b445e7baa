use std::path::PathBuf;
use std::str::FromStr;

use casing_geom::BlockPos;
use casing_world::WorldId;
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "casing",
    version,
    about = "Bake variant/active block models and report which render layers each block uses"
)]
pub struct Args {
    /// Directory containing `assets/blocks.toml` and `assets/models.toml`
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Block definitions (overrides the assets root)
    #[arg(long)]
    pub blocks: Option<PathBuf>,

    /// Baked model definitions (overrides the assets root)
    #[arg(long)]
    pub models: Option<PathBuf>,

    /// Place a block: `<block>:<variant>@x,y,z`
    #[arg(long = "place", value_name = "BLOCK:VARIANT@X,Y,Z")]
    pub place: Vec<Placement>,

    /// Mark a position active: `[world:]x,y,z`
    #[arg(long = "active", value_name = "[WORLD:]X,Y,Z")]
    pub active: Vec<ActiveMark>,

    /// World the placed blocks live in
    #[arg(long, default_value = "overworld")]
    pub world: WorldId,

    /// Wrap render states for connected textures unless a block opts out
    #[arg(long)]
    pub ctm: bool,

    /// Re-bake whenever the models file changes
    #[arg(long)]
    pub watch: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log through env_logger (RUST_LOG) instead of the terminal logger
    #[arg(long)]
    pub env_log: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub block: String,
    pub variant: String,
    pub pos: BlockPos,
}

impl FromStr for Placement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (what, pos) = s
            .split_once('@')
            .ok_or_else(|| format!("expected `block:variant@x,y,z`, got `{s}`"))?;
        let (block, variant) = what
            .split_once(':')
            .ok_or_else(|| format!("expected `block:variant` before `@`, got `{what}`"))?;
        let pos = pos.parse::<BlockPos>().map_err(|e| e.to_string())?;
        Ok(Placement {
            block: block.trim().to_string(),
            variant: variant.trim().to_string(),
            pos,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveMark {
    pub world: Option<WorldId>,
    pub pos: BlockPos,
}

impl FromStr for ActiveMark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (world, pos) = match s.split_once(':') {
            Some((w, p)) => (Some(w.parse::<WorldId>().map_err(|e| e.to_string())?), p),
            None => (None, s),
        };
        let pos = pos.parse::<BlockPos>().map_err(|e| e.to_string())?;
        Ok(ActiveMark { world, pos })
    }
}
