use serde::Deserialize;

// Top-level blocks config file
#[derive(Deserialize, Debug, Default)]
pub struct BlocksConfig {
    #[serde(default)]
    pub blocks: Vec<BlockDef>,
    // Wrap resolved render states for the connected-textures renderer unless
    // a block overrides it.
    #[serde(default)]
    pub connected_textures: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct BlockDef {
    pub name: String,
    // Ordered variant names; the position is the ordinal stored in meta.
    pub variants: Vec<String>,
    #[serde(default)]
    pub connected_textures: Option<bool>,
}
