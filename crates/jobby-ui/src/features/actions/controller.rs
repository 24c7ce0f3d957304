//! Trigger registry and the click pipeline.
//!
//! # Design
//! - The controller owns which elements are armed; arming an element twice is a no-op.
//! - Click handlers hold a weak reference, so dropping the controller disarms them.
//! - Every failure ends at `dispatch`, is logged once and leaves the page as it was.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::config::UiConfig;
use crate::core::dom::{ClickFuture, ClickHandler, Dom, DomError};
use crate::core::error::ActionError;
use crate::core::transport::Transport;
use crate::core::ui::{TriggerRole, TriggerState};
use crate::features::actions::behavior::Behavior;
use crate::features::actions::reconcile;
use crate::features::actions::request;
use crate::features::actions::response::Outcome;

/// Hook run after a confirmed outcome has been applied to the page.
pub type Callback<N> = Rc<dyn Fn(&N, &Outcome)>;

#[derive(Debug)]
struct Armed<N> {
    node: N,
    role: TriggerRole,
}

struct Shared<D: Dom, T> {
    dom: Rc<D>,
    transport: Rc<T>,
    config: Rc<UiConfig>,
    armed: RefCell<Vec<Armed<D::Node>>>,
    in_flight: RefCell<Vec<D::Node>>,
}

/// Arms trigger elements and runs their request pipeline on click.
pub struct ButtonController<D: Dom, T> {
    shared: Rc<Shared<D, T>>,
}

impl<D: Dom, T> Clone for ButtonController<D, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<D, T> ButtonController<D, T>
where
    D: Dom + 'static,
    T: Transport + 'static,
{
    /// Controller over `dom` sending through `transport`.
    #[must_use]
    pub fn new(dom: Rc<D>, transport: Rc<T>, config: UiConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                dom,
                transport,
                config: Rc::new(config),
                armed: RefCell::new(Vec::new()),
                in_flight: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Document the controller operates on.
    #[must_use]
    pub fn dom(&self) -> &D {
        &self.shared.dom
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.shared.config
    }

    /// Whether `trigger` already carries a click handler from this controller.
    #[must_use]
    pub fn is_armed(&self, trigger: &D::Node) -> bool {
        self.shared
            .armed
            .borrow()
            .iter()
            .any(|armed| armed.node == *trigger)
    }

    /// Number of armed triggers.
    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.shared.armed.borrow().len()
    }

    /// Attach `behavior` to `trigger`.
    ///
    /// Returns `Ok(false)` when the trigger was already armed. The trigger is
    /// recorded only once its listener is in place.
    ///
    /// # Errors
    /// Returns [`DomError`] when the listener cannot be registered.
    pub fn arm(
        &self,
        trigger: &D::Node,
        behavior: Behavior,
        callback: Option<Callback<D::Node>>,
    ) -> Result<bool, DomError> {
        if self.is_armed(trigger) {
            debug!(
                trigger = %self.label(trigger),
                role = behavior.role().as_str(),
                "trigger already armed"
            );
            return Ok(false);
        }
        let role = behavior.role();
        let handler = self.click_handler(trigger.clone(), Rc::new(behavior), callback);
        self.shared.dom.on_click(trigger, handler)?;
        self.shared.armed.borrow_mut().push(Armed {
            node: trigger.clone(),
            role,
        });
        Ok(true)
    }

    /// Observable state of an armed trigger, `None` when it is not armed.
    #[must_use]
    pub fn state(&self, trigger: &D::Node) -> Option<TriggerState> {
        let role = self
            .shared
            .armed
            .borrow()
            .iter()
            .find(|armed| armed.node == *trigger)
            .map(|armed| armed.role)?;
        if self.shared.in_flight.borrow().contains(trigger) {
            return Some(TriggerState::Pending);
        }
        Some(match role {
            TriggerRole::Toggle => TriggerState::from_membership(reconcile::is_on_list(
                self.dom(),
                trigger,
                &self.shared.config.membership,
            )),
            TriggerRole::RemoveOne | TriggerRole::RemoveAll => TriggerState::Idle,
        })
    }

    /// Run one activation of `behavior` for `trigger` and apply the outcome.
    ///
    /// `Ok(None)` means the trigger lacks a URL or record id and nothing was sent.
    /// Bypasses the single-flight guard.
    ///
    /// # Errors
    /// Returns [`ActionError`] for a missing token, a transport failure, a
    /// non-2xx status or an undecodable body; the page is unchanged in each case.
    pub async fn perform(
        &self,
        trigger: &D::Node,
        behavior: &Behavior,
    ) -> Result<Option<Outcome>, ActionError> {
        let dom = self.dom();
        let config = self.config();
        let Some(request) = behavior.build_request(dom, trigger, config)? else {
            return Ok(None);
        };
        debug!(url = %request.url, fields = request.payload.len(), "sending trigger request");
        let response = self.shared.transport.send(&request).await?;
        let outcome = behavior.handle_response(dom, trigger, &response)?;
        behavior.reconcile(dom, trigger, &outcome, config);
        Ok(Some(outcome))
    }

    fn click_handler(
        &self,
        trigger: D::Node,
        behavior: Rc<Behavior>,
        callback: Option<Callback<D::Node>>,
    ) -> ClickHandler {
        let shared: Weak<Shared<D, T>> = Rc::downgrade(&self.shared);
        Rc::new(move || -> ClickFuture {
            let Some(shared) = shared.upgrade() else {
                return Box::pin(async {});
            };
            let controller = Self { shared };
            if !controller.begin(&trigger, behavior.role()) {
                return Box::pin(async {});
            }
            let trigger = trigger.clone();
            let behavior = Rc::clone(&behavior);
            let callback = callback.clone();
            Box::pin(async move {
                controller
                    .dispatch(&trigger, &behavior, callback.as_ref())
                    .await;
            })
        })
    }

    fn begin(&self, trigger: &D::Node, role: TriggerRole) -> bool {
        let mut in_flight = self.shared.in_flight.borrow_mut();
        if self.shared.config.single_flight && in_flight.contains(trigger) {
            debug!(
                trigger = %self.label(trigger),
                role = role.as_str(),
                "click ignored while request is pending"
            );
            return false;
        }
        in_flight.push(trigger.clone());
        true
    }

    fn finish(&self, trigger: &D::Node) {
        let mut in_flight = self.shared.in_flight.borrow_mut();
        if let Some(index) = in_flight.iter().position(|node| node == trigger) {
            in_flight.remove(index);
        }
    }

    async fn dispatch(
        &self,
        trigger: &D::Node,
        behavior: &Behavior,
        callback: Option<&Callback<D::Node>>,
    ) {
        let result = self.perform(trigger, behavior).await;
        self.finish(trigger);
        match result {
            Ok(Some(outcome)) => {
                if let Some(callback) = callback {
                    callback(trigger, &outcome);
                }
            }
            Ok(None) => debug!(
                trigger = %self.label(trigger),
                role = behavior.role().as_str(),
                "trigger has no request target"
            ),
            Err(error) => warn!(
                trigger = %self.label(trigger),
                role = behavior.role().as_str(),
                kind = error.kind(),
                status = ?error.status(),
                error = %error,
                "trigger action failed"
            ),
        }
    }

    fn label(&self, trigger: &D::Node) -> String {
        request::describe(self.dom(), trigger, &self.shared.config.attributes)
    }
}
