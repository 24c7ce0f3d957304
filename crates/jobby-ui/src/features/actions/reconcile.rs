//! Page mutations applied once the server confirmed an outcome.

use tracing::debug;

use crate::config::{ListConfig, MembershipConfig};
use crate::core::dom::Dom;

/// Membership currently shown by a toggle trigger.
#[must_use]
pub fn is_on_list<D: Dom>(dom: &D, trigger: &D::Node, membership: &MembershipConfig) -> bool {
    dom.has_class(trigger, &membership.marker)
}

/// Switch the trigger's classes to the confirmed membership; both class sets
/// change together.
pub fn apply_membership<D: Dom>(
    dom: &D,
    trigger: &D::Node,
    membership: &MembershipConfig,
    on_list: bool,
) {
    let (add, remove) = if on_list {
        (&membership.on_list, &membership.off_list)
    } else {
        (&membership.off_list, &membership.on_list)
    };
    for class in remove {
        dom.remove_class(trigger, class);
    }
    for class in add {
        dom.add_class(trigger, class);
    }
}

/// Point the result link next to the trigger at `link_url`.
pub fn update_result_link<D: Dom>(
    dom: &D,
    trigger: &D::Node,
    membership: &MembershipConfig,
    link_url: Option<&str>,
) {
    let Some(url) = link_url.filter(|url| !url.is_empty()) else {
        return;
    };
    let link = dom
        .closest(trigger, &membership.result_header)
        .and_then(|header| dom.query_within(&header, &membership.result_link));
    if let Some(link) = link {
        dom.set_attribute(&link, "href", url);
    }
}

/// Replace the list container with the empty-state placeholder.
///
/// The container enclosing the trigger wins; otherwise the first one in the document.
pub fn show_empty_state<D: Dom>(dom: &D, trigger: &D::Node, list: &ListConfig) -> bool {
    let container = dom
        .closest(trigger, &list.container)
        .or_else(|| dom.query(&list.container));
    match container {
        Some(container) => {
            dom.set_inner_html(&container, &list.empty_message);
            true
        }
        None => {
            debug!(container = %list.container, "no list container on the page");
            false
        }
    }
}

/// Remove the list item enclosing the trigger.
pub fn excise_item<D: Dom>(dom: &D, trigger: &D::Node, list: &ListConfig) -> bool {
    match dom.closest(trigger, &list.item) {
        Some(item) => {
            dom.remove(&item);
            true
        }
        None => false,
    }
}

/// Adjustment applied to a counter badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeChange {
    /// One item fewer.
    Decrement,
    /// No items left.
    Reset,
}

/// Update the counter badge; badges without a positive count are left alone.
pub fn adjust_badge<D: Dom>(dom: &D, selector: &str, change: BadgeChange) {
    let Some(badge) = dom.query(selector) else {
        return;
    };
    let Ok(count) = dom.inner_html(&badge).trim().parse::<u64>() else {
        return;
    };
    if count == 0 {
        return;
    }
    let next = match change {
        BadgeChange::Decrement => count - 1,
        BadgeChange::Reset => 0,
    };
    dom.set_inner_html(&badge, &next.to_string());
}
