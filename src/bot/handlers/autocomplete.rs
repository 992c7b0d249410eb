//! Autocomplete handlers for Discord slash command parameters.

use crate::{
    bot::BotData,
    core::event,
    errors::Error,
};

/// Provides autocomplete suggestions for event titles.
///
/// Queries the database for events matching the user's partial input and
/// returns up to 25 titles, newest events first.
pub async fn autocomplete_event_title(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;

    let Ok(events) = event::all_events(db).await else {
        return Vec::new();
    };

    let partial_lower = partial.to_lowercase();

    events
        .into_iter()
        .filter(|ev| ev.title.to_lowercase().contains(&partial_lower))
        .map(|ev| ev.title)
        .take(25) // Discord autocomplete limit
        .collect()
}

/// Provides autocomplete suggestions for shirt sizes.
pub async fn autocomplete_shirt_size(
    _ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let sizes = ["XS", "S", "M", "L", "XL", "XXL"];
    let partial_upper = partial.to_uppercase();

    sizes
        .iter()
        .filter(|size| size.starts_with(&partial_upper))
        .map(|&size| size.to_string())
        .collect()
}
