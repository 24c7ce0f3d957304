//! Arm every configured binding found on the page.

use tracing::{debug, info, warn};

use crate::core::dom::Dom;
use crate::core::transport::Transport;
use crate::core::ui::TriggerRole;
use crate::features::actions::behavior::Behavior;
use crate::features::actions::controller::{ButtonController, Callback};

/// Result of arming one binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingReport {
    /// Trigger selector.
    pub selector: String,
    /// Role bound to the selector.
    pub role: TriggerRole,
    /// Matching elements on the page.
    pub found: usize,
    /// Elements newly armed by this pass.
    pub armed: usize,
}

/// Result of one bootstrap pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// One entry per configured binding, in configuration order.
    pub bindings: Vec<BindingReport>,
}

impl BootstrapReport {
    /// Triggers newly armed across all bindings.
    #[must_use]
    pub fn armed(&self) -> usize {
        self.bindings.iter().map(|binding| binding.armed).sum()
    }

    /// Matching elements across all bindings.
    #[must_use]
    pub fn found(&self) -> usize {
        self.bindings.iter().map(|binding| binding.found).sum()
    }
}

/// Arm the triggers of every configured binding. Safe to call again after the
/// page inserted new triggers; elements armed earlier are skipped.
pub fn bootstrap<D, T>(
    controller: &ButtonController<D, T>,
    callback: Option<Callback<D::Node>>,
) -> BootstrapReport
where
    D: Dom + 'static,
    T: Transport + 'static,
{
    let mut report = BootstrapReport::default();
    for binding in &controller.config().bindings {
        let Some(behavior) = Behavior::from_binding(binding) else {
            warn!(
                selector = %binding.selector,
                role = binding.role.as_str(),
                "binding has no list configuration; skipped"
            );
            continue;
        };
        let triggers = controller.dom().query_all(&binding.selector);
        let mut armed = 0;
        for trigger in &triggers {
            match controller.arm(trigger, behavior.clone(), callback.clone()) {
                Ok(true) => armed += 1,
                Ok(false) => {}
                Err(error) => warn!(
                    selector = %binding.selector,
                    error = %error,
                    "failed to arm trigger"
                ),
            }
        }
        debug!(
            selector = %binding.selector,
            role = binding.role.as_str(),
            found = triggers.len(),
            armed,
            "binding processed"
        );
        report.bindings.push(BindingReport {
            selector: binding.selector.clone(),
            role: binding.role,
            found: triggers.len(),
            armed,
        });
    }
    info!(
        armed = report.armed(),
        found = report.found(),
        "trigger bindings armed"
    );
    report
}
