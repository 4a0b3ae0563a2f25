use anyhow::{Context as _, Result};
use hackdeck_core::debounce::Debouncer;
use hackdeck_core::filter::{SortKey, TypeFilter};
use hackdeck_core::params::ListParams;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::commands::Context;
use crate::commands::list::print_results;

/// Interactive search. Each stdin line replaces the query; results are
/// printed once typing has paused for the configured debounce delay.
pub async fn run(ctx: &mut Context, filter: TypeFilter, sort: SortKey) -> Result<()> {
    let mut params = ListParams {
        filter,
        sort,
        ..Default::default()
    };

    let events = ctx.events().await?;
    print_results(&events, ctx.authenticated(), &params);
    println!("\n{}", "Type to search, Ctrl-D to quit.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut debouncer = Debouncer::new(ctx.config.search_debounce());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read input")? {
                    Some(line) => debouncer.push(line),
                    None => break,
                }
            }
            Some(query) = debouncer.settled(), if debouncer.is_pending() => {
                params.query = query;
                show(ctx, &params).await?;
            }
        }
    }

    if let Some(query) = debouncer.flush() {
        params.query = query;
        show(ctx, &params).await?;
    }

    Ok(())
}

async fn show(ctx: &mut Context, params: &ListParams) -> Result<()> {
    debug!(query = %params.query, "Applying search");

    // Served from cache until the list goes stale
    let events = ctx.events().await?;

    println!();
    print_results(&events, ctx.authenticated(), params);
    Ok(())
}
