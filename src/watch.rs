use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Changed {
    Blocks,
    Models,
}

/// Watches the directories holding the two config files and reports which of
/// them changed. Dropping the returned watcher stops the notifications.
pub fn watch_configs(
    blocks: &Path,
    models: &Path,
) -> Result<(RecommendedWatcher, Receiver<Changed>), notify::Error> {
    let (tx, rx) = mpsc::channel::<Changed>();
    let blocks_name = blocks.file_name().map(|n| n.to_os_string());
    let models_name = models.file_name().map(|n| n.to_os_string());
    let mut watcher = notify::recommended_watcher(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => match event.kind {
                EventKind::Modify(_)
                | EventKind::Create(_)
                | EventKind::Remove(_)
                | EventKind::Any => {
                    for p in event.paths {
                        let name = p.file_name().map(|n| n.to_os_string());
                        if name.is_some() && name == models_name {
                            let _ = tx.send(Changed::Models);
                        } else if name.is_some() && name == blocks_name {
                            let _ = tx.send(Changed::Blocks);
                        }
                    }
                }
                _ => {}
            },
            Err(e) => log::warn!(target: "watch", "watch error: {e}"),
        },
    )?;
    let mut dirs: Vec<PathBuf> = [blocks, models]
        .iter()
        .map(|p| parent_dir(p))
        .collect();
    dirs.sort();
    dirs.dedup();
    for dir in &dirs {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        log::info!(target: "watch", "watching {}", dir.display());
    }
    Ok((watcher, rx))
}

/// Blocks for the next change, then folds the burst of events an editor save
/// produces into one.
pub fn next_change(rx: &Receiver<Changed>) -> Option<Changed> {
    let mut changed = rx.recv().ok()?;
    while let Ok(more) = rx.recv_timeout(Duration::from_millis(150)) {
        if more == Changed::Blocks {
            changed = Changed::Blocks;
        }
    }
    Some(changed)
}

fn parent_dir(p: &Path) -> PathBuf {
    match p.parent() {
        Some(d) if !d.as_os_str().is_empty() => d.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
