use anyhow::Result;
use chrono::Local;
use hackdeck_core::event::Event;
use hackdeck_core::filter::{count_by_type, select_visible_events};
use hackdeck_core::params::{ListParams, ViewMode};
use hackdeck_core::schedule::group_by_day_in;
use owo_colors::OwoColorize;
use tracing::warn;

use crate::commands::Context;
use crate::render::{Render, render_type_counts};

pub async fn run(ctx: &mut Context, params: ListParams) -> Result<()> {
    let events = ctx.events().await?;

    for event in events.iter().filter(|e| e.end_time < e.start_time) {
        warn!(id = event.id, "Event ends before it starts");
    }

    print_results(&events, ctx.authenticated(), &params);

    let shared = params.to_query_string();
    if !shared.is_empty() {
        println!("\n{} {}", "Share:".dimmed(), format!("?{shared}").dimmed());
    }

    Ok(())
}

/// Print the filter bar and the events selected by `params`.
pub fn print_results(events: &[Event], authenticated: bool, params: &ListParams) {
    let counts = count_by_type(events, authenticated);
    println!("{}\n", render_type_counts(&counts, params.filter));

    let visible = select_visible_events(events, authenticated, params.filter, &params.query, params.sort);

    if visible.is_empty() {
        println!("{}", empty_message(&params.query).dimmed());
        return;
    }

    match params.view {
        ViewMode::Grid => {
            let cards: Vec<String> = visible.iter().map(|e| e.render()).collect();
            println!("{}", cards.join("\n\n"));
        }
        ViewMode::Schedule => {
            let mut days = group_by_day_in(visible, &Local);
            for day in &mut days {
                day.events.sort_by_key(|e| e.start_time);
            }

            let days: Vec<String> = days.iter().map(|d| d.render()).collect();
            println!("{}", days.join("\n\n"));
        }
    }

    if !authenticated && events.iter().any(|e| e.is_private()) {
        println!(
            "\n{}",
            "Some events are private. Run `hackdeck login` to see them.".dimmed()
        );
    }
}

fn empty_message(query: &str) -> String {
    if query.is_empty() {
        "No events match the current filters.".to_string()
    } else {
        format!("No events match \"{query}\". Try a different search term.")
    }
}
