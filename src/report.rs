use std::io::{self, Write};

use casing_blocks::BlockState;
use casing_render::{BakeReport, RenderLayer};
use casing_runtime::{ActiveBlocks, RenderState};
use casing_world::WorldId;

use crate::cli::Placement;

/// Prints the layer capabilities of every registered block type, followed by
/// the resolved render state of each placement in `world`.
pub fn print_report(
    out: &mut impl Write,
    ctx: &ActiveBlocks,
    bake: &BakeReport,
    placements: &[Placement],
    world: WorldId,
) -> io::Result<()> {
    writeln!(
        out,
        "bake #{}: {} block type(s), {} state(s), {} missing model(s)",
        bake.generation, bake.block_types, bake.states, bake.missing_models
    )?;
    for block in ctx.blocks().snapshot() {
        writeln!(
            out,
            "[{}] {} layers={}{}",
            block.id().0,
            block.name(),
            block.render_layers(),
            if block.uses_connected_textures() { " ctm" } else { "" }
        )?;
        for (idx, name) in block.variants().indices().zip(block.variants().names()) {
            let state = BlockState::new(idx, false);
            let meta = match block.encode_meta(state) {
                Ok(m) => m.to_string(),
                Err(e) => {
                    log::warn!("{e}");
                    "-".to_string()
                }
            };
            writeln!(
                out,
                "    {:<12} meta={:<2} model={}",
                name,
                meta,
                block.model_key_for(state)
            )?;
        }
    }

    if placements.is_empty() {
        return Ok(());
    }
    writeln!(out, "placements in {world}:")?;
    for p in placements {
        let Some(block) = ctx.blocks().find(&p.block) else {
            log::warn!("placement at {}: unknown block `{}`", p.pos, p.block);
            continue;
        };
        let state = match block.state_named(&p.variant) {
            Ok(s) => s,
            Err(e) => {
                log::warn!("placement at {}: {e}", p.pos);
                continue;
            }
        };
        let placed = block.resolve_render_state(state, Some(world), p.pos);
        let inventory = block.resolve_render_state(state, None, p.pos);
        writeln!(
            out,
            "    {} {}:{} -> {} (inventory: {})",
            p.pos,
            p.block,
            p.variant,
            describe(&placed),
            describe(&inventory)
        )?;
        let drawn: Vec<&str> = RenderLayer::ALL
            .iter()
            .filter(|l| block.can_render_in_layer(state, **l))
            .map(|l| l.name())
            .collect();
        if drawn.is_empty() {
            writeln!(out, "        not drawn on any layer")?;
        } else {
            writeln!(out, "        drawn on {}", drawn.join(", "))?;
        }
    }
    Ok(())
}

fn describe(state: &RenderState) -> String {
    format!(
        "{}{}",
        if state.is_active() { "active" } else { "inactive" },
        if state.is_connected() { " +ctm" } else { "" }
    )
}
