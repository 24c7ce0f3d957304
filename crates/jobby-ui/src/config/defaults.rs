//! Default selectors, attribute names and messages matching the server templates.
//!
//! # Design
//! - Keep every markup contract in one place so templates and behaviors agree.
//! - Page configuration can override any of these values.

use crate::config::{BindingConfig, ListConfig};
use crate::core::ui::TriggerRole;

/// Element id of the optional JSON configuration document.
pub const CONFIG_ELEMENT_ID: &str = "jobby-ui-config";

/// Hidden form field carrying the CSRF token.
pub const TOKEN_FIELD: &str = "csrfmiddlewaretoken";
/// Cookie carrying the CSRF token.
pub const TOKEN_COOKIE: &str = "csrftoken";
/// Header the server reads the CSRF token from.
pub const TOKEN_HEADER: &str = "X-CSRFToken";

/// Trigger attribute holding the request URL.
pub const URL_ATTRIBUTE: &str = "data-url";
/// Trigger attribute holding the record identifier.
pub const OBJECT_ID_ATTRIBUTE: &str = "data-pk";
/// Payload field carrying the record identifier.
pub const OBJECT_FIELD: &str = "pk";

/// Classes marking a record that is on the watchlist.
pub const ON_LIST_CLASSES: [&str; 2] = ["text-success", "on-watchlist"];
/// Classes marking a record that is not on the watchlist.
pub const OFF_LIST_CLASSES: [&str; 1] = ["text-primary"];
/// Class read to derive the current membership.
pub const MEMBERSHIP_MARKER: &str = "on-watchlist";
/// Search result header enclosing a toggle button.
pub const RESULT_HEADER: &str = ".result-header";
/// Result link updated from the toggle response.
pub const RESULT_LINK: &str = "a.result-link";

/// Search form whose blank fields are pruned on submit.
pub const SEARCH_FORM: &str = ".search-form";

/// Placeholder shown once the watchlist is empty.
pub const WATCHLIST_EMPTY: &str = "Deine Merkliste ist leer!";
/// Placeholder shown once the trash is empty.
pub const TRASH_EMPTY: &str = "Dein Papierkorb ist leer!";

fn watchlist_list() -> ListConfig {
    ListConfig {
        list: ".watchlist-items".into(),
        item: ".watchlist-item".into(),
        container: ".watchlist-container".into(),
        empty_message: WATCHLIST_EMPTY.into(),
        badge: None,
    }
}

fn trash_list() -> ListConfig {
    ListConfig {
        list: ".trash-items-list".into(),
        item: ".trash-item".into(),
        container: ".trash-items-container".into(),
        empty_message: TRASH_EMPTY.into(),
        badge: Some(".papierkorb-badge".into()),
    }
}

/// Trigger bindings armed when the page does not configure its own.
#[must_use]
pub fn bindings() -> Vec<BindingConfig> {
    vec![
        BindingConfig {
            role: TriggerRole::Toggle,
            selector: ".watchlist-toggle-btn".into(),
            list: None,
        },
        BindingConfig {
            role: TriggerRole::RemoveOne,
            selector: ".watchlist-remove-btn".into(),
            list: Some(watchlist_list()),
        },
        BindingConfig {
            role: TriggerRole::RemoveAll,
            selector: ".watchlist-remove-all-btn".into(),
            list: Some(watchlist_list()),
        },
        BindingConfig {
            role: TriggerRole::RemoveOne,
            selector: ".delete-btn".into(),
            list: Some(trash_list()),
        },
    ]
}
