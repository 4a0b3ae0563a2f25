use anyhow::{Result, bail};
use hackdeck_core::filter::related_events;

use crate::commands::Context;
use crate::render::render_detail;

pub async fn run(ctx: &mut Context, id: u64) -> Result<()> {
    let event = ctx.event(id).await?;
    let authenticated = ctx.authenticated();

    if !event.is_visible_to(authenticated) {
        bail!("Event {id} is private.\n\nLog in to view it:\n  hackdeck login");
    }

    // Related ids only resolve against the full list
    let all = if event.related_events.is_empty() {
        None
    } else {
        Some(ctx.events().await?)
    };
    let related = all
        .as_deref()
        .map(|all| related_events(&event, all, authenticated))
        .unwrap_or_default();

    println!("{}", render_detail(&event, &related, authenticated));

    Ok(())
}
