//! Response handlers: decide success and extract the outcome.
//!
//! Non-2xx responses are never decoded; their body text is carried on the
//! error for the log, and the page is left as it was.

use serde::Deserialize;
use tracing::debug;

use crate::config::ListConfig;
use crate::core::dom::Dom;
use crate::core::error::ActionError;
use crate::core::transport::RawResponse;
use crate::features::actions::reconcile;

/// Body of a successful toggle response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ToggleBody {
    /// Membership confirmed by the server.
    pub on_watchlist: bool,
    /// New target for the result link, when the record moved.
    #[serde(default)]
    pub link_url: Option<String>,
}

/// What a successful removal did to the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListEffect {
    /// One item was excised; `remaining` items are left.
    ItemRemoved {
        /// Items still in the list.
        remaining: usize,
    },
    /// The container now shows the empty-state placeholder.
    Emptied,
}

/// Server-confirmed result of one activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Toggle result.
    Membership(ToggleBody),
    /// Removal result.
    Removed(ListEffect),
}

fn ensure_success(response: &RawResponse) -> Result<(), ActionError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(ActionError::UnexpectedStatus {
            status: response.status,
            detail: response.detail(),
        })
    }
}

/// Toggle: require 2xx, then decode the membership body.
///
/// # Errors
/// [`ActionError::UnexpectedStatus`] outside 2xx, [`ActionError::MalformedBody`]
/// when the body is not a toggle body.
pub fn handle_toggle(response: &RawResponse) -> Result<ToggleBody, ActionError> {
    ensure_success(response)?;
    response.json()
}

/// Remove-one: clear the container when the trigger's item was the last one,
/// otherwise excise only that item.
///
/// # Errors
/// [`ActionError::UnexpectedStatus`] outside 2xx; the page is untouched.
pub fn handle_remove_one<D: Dom>(
    dom: &D,
    trigger: &D::Node,
    list: &ListConfig,
    response: &RawResponse,
) -> Result<ListEffect, ActionError> {
    ensure_success(response)?;
    let count = dom
        .closest(trigger, &list.list)
        .map(|node| dom.count_within(&node, &list.item));
    if count == Some(1) {
        reconcile::show_empty_state(dom, trigger, list);
        return Ok(ListEffect::Emptied);
    }
    if !reconcile::excise_item(dom, trigger, list) {
        debug!(item = %list.item, "removed record has no enclosing list item");
    }
    let remaining = count.map_or(0, |count| count.saturating_sub(1));
    Ok(ListEffect::ItemRemoved { remaining })
}

/// Remove-all: replace the container with the placeholder regardless of item count.
///
/// # Errors
/// [`ActionError::UnexpectedStatus`] outside 2xx; the page is untouched.
pub fn handle_remove_all<D: Dom>(
    dom: &D,
    trigger: &D::Node,
    list: &ListConfig,
    response: &RawResponse,
) -> Result<ListEffect, ActionError> {
    ensure_success(response)?;
    reconcile::show_empty_state(dom, trigger, list);
    Ok(ListEffect::Emptied)
}
