//! Strategy set for trigger roles.

use crate::config::{BindingConfig, ListConfig, UiConfig};
use crate::core::dom::Dom;
use crate::core::error::ActionError;
use crate::core::transport::{RawResponse, RequestDescriptor};
use crate::core::ui::TriggerRole;
use crate::features::actions::reconcile::{self, BadgeChange};
use crate::features::actions::request;
use crate::features::actions::response::{self, Outcome};

/// Request, response and reconcile stages for one trigger role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Behavior {
    /// Flip watchlist membership.
    Toggle,
    /// Remove one record from a list.
    RemoveOne(ListConfig),
    /// Remove every record from a list.
    RemoveAll(ListConfig),
}

impl Behavior {
    /// Behavior for a configured binding; `None` when a removal binding has no list.
    #[must_use]
    pub fn from_binding(binding: &BindingConfig) -> Option<Self> {
        match binding.role {
            TriggerRole::Toggle => Some(Self::Toggle),
            TriggerRole::RemoveOne => binding.list.clone().map(Self::RemoveOne),
            TriggerRole::RemoveAll => binding.list.clone().map(Self::RemoveAll),
        }
    }

    /// Role this behavior implements.
    #[must_use]
    pub const fn role(&self) -> TriggerRole {
        match self {
            Self::Toggle => TriggerRole::Toggle,
            Self::RemoveOne(_) => TriggerRole::RemoveOne,
            Self::RemoveAll(_) => TriggerRole::RemoveAll,
        }
    }

    /// Build the outbound request; `Ok(None)` means the trigger lacks request data.
    ///
    /// # Errors
    /// Returns [`ActionError::MissingCredential`] when no token is available.
    pub fn build_request<D: Dom>(
        &self,
        dom: &D,
        trigger: &D::Node,
        config: &UiConfig,
    ) -> Result<Option<RequestDescriptor>, ActionError> {
        match self {
            Self::Toggle => request::toggle_request(dom, trigger, config),
            Self::RemoveOne(_) | Self::RemoveAll(_) => {
                request::remove_request(dom, trigger, config)
            }
        }
    }

    /// Interpret the response; removals mutate the list here.
    ///
    /// # Errors
    /// Returns [`ActionError::UnexpectedStatus`] or [`ActionError::MalformedBody`].
    pub fn handle_response<D: Dom>(
        &self,
        dom: &D,
        trigger: &D::Node,
        response: &RawResponse,
    ) -> Result<Outcome, ActionError> {
        match self {
            Self::Toggle => response::handle_toggle(response).map(Outcome::Membership),
            Self::RemoveOne(list) => {
                response::handle_remove_one(dom, trigger, list, response).map(Outcome::Removed)
            }
            Self::RemoveAll(list) => {
                response::handle_remove_all(dom, trigger, list, response).map(Outcome::Removed)
            }
        }
    }

    /// Apply the remaining page updates for a confirmed outcome.
    pub fn reconcile<D: Dom>(
        &self,
        dom: &D,
        trigger: &D::Node,
        outcome: &Outcome,
        config: &UiConfig,
    ) {
        match (self, outcome) {
            (Self::Toggle, Outcome::Membership(body)) => {
                reconcile::apply_membership(dom, trigger, &config.membership, body.on_watchlist);
                reconcile::update_result_link(
                    dom,
                    trigger,
                    &config.membership,
                    body.link_url.as_deref(),
                );
            }
            (Self::RemoveOne(list), Outcome::Removed(_)) => {
                if let Some(badge) = list.badge.as_deref() {
                    reconcile::adjust_badge(dom, badge, BadgeChange::Decrement);
                }
            }
            (Self::RemoveAll(list), Outcome::Removed(_)) => {
                if let Some(badge) = list.badge.as_deref() {
                    reconcile::adjust_badge(dom, badge, BadgeChange::Reset);
                }
            }
            _ => {}
        }
    }
}
