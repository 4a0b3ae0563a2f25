use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use hackdeck_core::ics::{generate_ics, ics_filename};
use owo_colors::OwoColorize;
use tracing::debug;

use crate::commands::Context;

/// Write the event's calendar file into `out_dir`, or to stdout when `None`.
pub async fn run(ctx: &mut Context, id: u64, out_dir: Option<PathBuf>) -> Result<()> {
    let event = ctx.event(id).await?;

    if !event.is_visible_to(ctx.authenticated()) {
        bail!("Event {id} is private.\n\nLog in to export it:\n  hackdeck login");
    }

    let ics = generate_ics(&event);

    let Some(out_dir) = out_dir else {
        print!("{ics}");
        return Ok(());
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let path = out_dir.join(ics_filename(&event));
    std::fs::write(&path, ics).with_context(|| format!("Failed to write {}", path.display()))?;
    debug!(path = %path.display(), "Wrote calendar file");

    println!("{} {}", "Saved".green(), path.display());

    Ok(())
}
