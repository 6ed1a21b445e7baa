use thiserror::Error;

use crate::types::{Meta, VariantIndex};
use crate::variant::MAX_VARIANTS;

#[derive(Debug, Error)]
pub enum BlockError {
    #[error(
        "block `{block}` declares {count} variants; the meta encoding reserves room for at most {max}",
        max = MAX_VARIANTS
    )]
    TooManyVariants { block: String, count: usize },
    #[error("block `{block}` declares no variants")]
    EmptyVariants { block: String },
    #[error("block `{block}` declares variant `{variant}` more than once")]
    DuplicateVariant { block: String, variant: String },
    #[error("block `{block}` is defined more than once")]
    DuplicateBlock { block: String },
    #[error("meta {meta} of block `{block}` selects a variant outside its {variants} variants")]
    MetaOutOfRange {
        block: String,
        meta: Meta,
        variants: usize,
    },
    #[error("variant index {index} of block `{block}` is out of range ({variants} variants)")]
    VariantOutOfRange {
        block: String,
        index: VariantIndex,
        variants: usize,
    },
    #[error("cannot register block `{block}`: all {max} block type ids are taken")]
    TooManyBlockTypes { block: String, max: usize },
    #[error("block `{block}` has no variant named `{variant}`")]
    UnknownVariant { block: String, variant: String },
    #[error("malformed state property `{0}`")]
    MalformedProperty(String),
    #[error("failed to parse blocks config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
