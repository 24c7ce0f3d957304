//! Markup builders matching the server templates.

use crate::page::El;

/// Token used by the fixture pages.
pub const TOKEN: &str = "fixture-token";

/// Hidden CSRF field as rendered by the server.
#[must_use]
pub fn csrf_field(token: &str) -> El {
    El::new("input")
        .attr("type", "hidden")
        .attr("name", "csrfmiddlewaretoken")
        .value(token)
}

/// Watchlist toggle button with its embedded form.
#[must_use]
pub fn toggle_button(url: &str, fields: &[(&str, &str)], on_list: bool) -> El {
    let button = El::new("button.watchlist-toggle-btn").attr("data-url", url);
    let button = if on_list {
        button.class("text-success").class("on-watchlist")
    } else {
        button.class("text-primary")
    };
    button.child(El::new("form").children(fields.iter().map(|(name, value)| {
        El::new("input")
            .attr("type", "hidden")
            .attr("name", name)
            .value(value)
    })))
}

/// Search result header with a result link and a toggle button.
#[must_use]
pub fn result_header(href: &str, toggle: El) -> El {
    El::new("div.result-header")
        .child(El::new("a.result-link").attr("href", href))
        .child(toggle)
}

/// Watchlist container with one row per id and a remove-all button.
#[must_use]
pub fn watchlist(ids: &[&str]) -> El {
    let rows = ids.iter().map(|id| {
        El::new("tr.watchlist-item").child(
            El::new("td").child(
                El::new("button.watchlist-remove-btn")
                    .attr("data-url", "/watchlist/remove/")
                    .attr("data-pk", id),
            ),
        )
    });
    El::new("div.watchlist-container")
        .child(El::new("table").child(El::new("tbody.watchlist-items").children(rows)))
        .child(
            El::new("button.watchlist-remove-all-btn")
                .attr("data-url", "/watchlist/remove_all/")
                .attr("data-pk", "watchlist"),
        )
}

/// Trash container with one entry per id.
#[must_use]
pub fn trash(ids: &[&str]) -> El {
    let items = ids.iter().map(|id| {
        El::new("li.trash-item").child(
            El::new("button.delete-btn")
                .attr("data-url", "/papierkorb/delete/")
                .attr("data-pk", id),
        )
    });
    El::new("div.trash-items-container").child(El::new("ul.trash-items-list").children(items))
}

/// Trash counter badge.
#[must_use]
pub fn trash_badge(count: &str) -> El {
    El::new("span.papierkorb-badge").text(count)
}
