mod assets;
mod cli;
mod report;
mod watch;

use std::error::Error;
use std::io;
use std::path::Path;

use casing_blocks::BlockRegistry;
use casing_render::{BakeReport, ModelRegistry};
use casing_runtime::ActiveBlocks;
use clap::Parser;

use crate::cli::Args;
use crate::watch::Changed;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let root = assets::resolve_assets_root(args.assets.clone());
    let blocks_path = args.blocks.clone().unwrap_or_else(|| assets::blocks_path(&root));
    let models_path = args.models.clone().unwrap_or_else(|| assets::models_path(&root));

    let mut blocks = BlockRegistry::load_from_path(&blocks_path)?;
    blocks.connected_textures |= args.ctm;
    let ctx = ActiveBlocks::new().with_connected_textures(blocks.connected_textures);
    ctx.register_all(&blocks)?;

    for mark in &args.active {
        let world = mark.world.unwrap_or(args.world);
        ctx.positions().mark_active(world, mark.pos);
    }

    let bake = load_and_bake(&ctx, &blocks, &models_path)?;
    report::print_report(&mut io::stdout().lock(), &ctx, &bake, &args.place, args.world)?;

    if !args.watch {
        return Ok(());
    }
    let (_watcher, rx) = watch::watch_configs(&blocks_path, &models_path)?;
    while let Some(changed) = watch::next_change(&rx) {
        match changed {
            Changed::Blocks => {
                log::warn!(
                    target: "watch",
                    "{} changed; block types are fixed after startup, restart to pick it up",
                    blocks_path.display()
                );
            }
            Changed::Models => match load_and_bake(&ctx, &blocks, &models_path) {
                Ok(bake) => {
                    report::print_report(
                        &mut io::stdout().lock(),
                        &ctx,
                        &bake,
                        &args.place,
                        args.world,
                    )?;
                }
                // Keep the previous bake's layers on a bad edit.
                Err(e) => log::error!(target: "watch", "reload {}: {e}", models_path.display()),
            },
        }
    }
    Ok(())
}

fn load_and_bake(
    ctx: &ActiveBlocks,
    blocks: &BlockRegistry,
    models_path: &Path,
) -> Result<BakeReport, casing_render::ModelError> {
    let models = ModelRegistry::load_from_path(blocks, models_path)?;
    log::info!("loaded {} model(s) from {}", models.len(), models_path.display());
    Ok(ctx.on_model_bake(&models))
}

fn init_logging(args: &Args) -> Result<(), Box<dyn Error>> {
    let level: log::LevelFilter = args.log_level.into();
    if args.env_log {
        env_logger::Builder::new()
            .target(env_logger::Target::Stderr)
            .filter_level(level)
            .parse_env("RUST_LOG")
            .init();
    } else {
        simplelog::TermLogger::init(
            level,
            simplelog::Config::default(),
            simplelog::TerminalMode::Stderr,
            simplelog::ColorChoice::Auto,
        )?;
    }
    Ok(())
}
