//! Trigger roles and the observable state of a trigger.

use serde::Deserialize;

/// Behavior a trigger element is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerRole {
    /// Add or remove the record from the watchlist in one request.
    Toggle,
    /// Remove the record behind this trigger from its list.
    RemoveOne,
    /// Clear every record from the list.
    RemoveAll,
}

impl TriggerRole {
    /// Stable name used in configuration and log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::RemoveOne => "remove_one",
            Self::RemoveAll => "remove_all",
        }
    }
}

/// Observable state of an armed trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerState {
    /// Removal trigger waiting for a click.
    Idle,
    /// A request for this trigger has not resolved yet.
    Pending,
    /// The server last confirmed the record is on the watchlist.
    OnList,
    /// The server last confirmed the record is not on the watchlist.
    NotOnList,
}

impl TriggerState {
    /// Settled toggle state for a membership flag.
    #[must_use]
    pub const fn from_membership(on_list: bool) -> Self {
        if on_list { Self::OnList } else { Self::NotOnList }
    }
}
