//! Validation for page configuration documents.

use thiserror::Error;

use crate::config::{ListConfig, UiConfig};
use crate::core::ui::TriggerRole;

/// Structured errors emitted while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document was not valid JSON for [`UiConfig`].
    #[error("configuration document is invalid: {source}")]
    Parse {
        /// Underlying decode error.
        #[source]
        source: serde_json::Error,
    },
    /// A field contained an unusable value.
    #[error("invalid value for '{field}' in '{section}': {reason}")]
    InvalidField {
        /// Section containing the field.
        section: String,
        /// Name of the offending field.
        field: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

fn invalid(section: &str, field: &str, reason: &'static str) -> ConfigError {
    ConfigError::InvalidField {
        section: section.to_string(),
        field: field.to_string(),
        reason,
    }
}

fn require_text(section: &str, field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(invalid(section, field, "must not be empty"));
    }
    Ok(())
}

/// Check a configuration for values the behaviors cannot work with.
///
/// # Errors
/// Returns [`ConfigError::InvalidField`] naming the first offending field.
pub fn validate(config: &UiConfig) -> Result<(), ConfigError> {
    require_text("logging", "log_level", &config.log_level)?;
    if let Some(format) = config.log_format.as_deref() {
        if !matches!(format, "json" | "pretty") {
            return Err(invalid("logging", "log_format", "must be 'json' or 'pretty'"));
        }
    }
    if let Some(selector) = config.search_form.as_deref() {
        require_text("search", "search_form", selector)?;
    }

    let credential = &config.credential;
    require_text("credential", "field_name", &credential.field_name)?;
    require_text("credential", "cookie_name", &credential.cookie_name)?;
    require_text("credential", "header_name", &credential.header_name)?;

    let attributes = &config.attributes;
    require_text("attributes", "url", &attributes.url)?;
    require_text("attributes", "object_id", &attributes.object_id)?;
    require_text("attributes", "object_field", &attributes.object_field)?;

    validate_membership(config)?;

    for (index, binding) in config.bindings.iter().enumerate() {
        let section = format!("bindings[{index}]");
        require_text(&section, "selector", &binding.selector)?;
        match (binding.role, binding.list.as_ref()) {
            (TriggerRole::Toggle, _) => {}
            (TriggerRole::RemoveOne | TriggerRole::RemoveAll, None) => {
                return Err(invalid(&section, "list", "required for removal roles"));
            }
            (TriggerRole::RemoveOne | TriggerRole::RemoveAll, Some(list)) => {
                validate_list(&section, list)?;
            }
        }
    }
    Ok(())
}

fn validate_membership(config: &UiConfig) -> Result<(), ConfigError> {
    let membership = &config.membership;
    if membership.on_list.is_empty() {
        return Err(invalid("membership", "on_list", "must name at least one class"));
    }
    if membership.off_list.is_empty() {
        return Err(invalid("membership", "off_list", "must name at least one class"));
    }
    if !membership.on_list.contains(&membership.marker) {
        return Err(invalid("membership", "marker", "must be one of the on_list classes"));
    }
    if membership
        .on_list
        .iter()
        .any(|class| membership.off_list.contains(class))
    {
        return Err(invalid(
            "membership",
            "off_list",
            "must not share classes with on_list",
        ));
    }
    require_text("membership", "result_header", &membership.result_header)?;
    require_text("membership", "result_link", &membership.result_link)
}

fn validate_list(section: &str, list: &ListConfig) -> Result<(), ConfigError> {
    require_text(section, "list.list", &list.list)?;
    require_text(section, "list.item", &list.item)?;
    require_text(section, "list.container", &list.container)?;
    if let Some(badge) = list.badge.as_deref() {
        require_text(section, "list.badge", badge)?;
    }
    Ok(())
}
