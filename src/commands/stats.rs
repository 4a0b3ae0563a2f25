use anyhow::Result;
use hackdeck_core::stats::EventStats;

use crate::commands::Context;
use crate::render::Render;

pub async fn run(ctx: &mut Context) -> Result<()> {
    let events = ctx.events().await?;

    let stats = EventStats::compute(&events, ctx.authenticated());
    println!("{}", stats.render());

    Ok(())
}
