//! Page configuration for the button behaviors.
//!
//! # Design
//! - Defaults mirror the server templates, so most pages need no configuration.
//! - A page may embed a JSON document that overrides any section.
//! - Documents are validated before any trigger is armed.

pub mod defaults;
pub mod validate;

use serde::Deserialize;

use crate::core::ui::TriggerRole;
use jobby_telemetry::DEFAULT_LOG_LEVEL;

pub use validate::{ConfigError, validate};

/// Complete configuration for one page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Log level or filter directive.
    pub log_level: String,
    /// `json` or `pretty`; inferred from the build when unset.
    pub log_format: Option<String>,
    /// Ignore clicks on a trigger while its previous request is pending.
    pub single_flight: bool,
    /// Search form whose blank fields are pruned, `None` to disable.
    pub search_form: Option<String>,
    /// Anti-forgery token sources and header.
    pub credential: CredentialConfig,
    /// Trigger attribute contract.
    pub attributes: AttributeConfig,
    /// Membership class contract for toggle triggers.
    pub membership: MembershipConfig,
    /// Selectors armed at bootstrap, with their behavior.
    pub bindings: Vec<BindingConfig>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: None,
            single_flight: true,
            search_form: Some(defaults::SEARCH_FORM.to_string()),
            credential: CredentialConfig::default(),
            attributes: AttributeConfig::default(),
            membership: MembershipConfig::default(),
            bindings: defaults::bindings(),
        }
    }
}

impl UiConfig {
    /// Parse and validate a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the document is malformed or fails validation.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        validate(&config)?;
        Ok(config)
    }
}

/// Where the anti-forgery token is read from and how it is sent.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CredentialConfig {
    /// Name of the hidden form field holding the token.
    pub field_name: String,
    /// Cookie holding the token.
    pub cookie_name: String,
    /// Request header carrying the token.
    pub header_name: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            field_name: defaults::TOKEN_FIELD.to_string(),
            cookie_name: defaults::TOKEN_COOKIE.to_string(),
            header_name: defaults::TOKEN_HEADER.to_string(),
        }
    }
}

/// Attribute names read from trigger elements.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeConfig {
    /// Attribute holding the request URL.
    pub url: String,
    /// Attribute holding the record identifier.
    pub object_id: String,
    /// Payload field the identifier is sent under.
    pub object_field: String,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            url: defaults::URL_ATTRIBUTE.to_string(),
            object_id: defaults::OBJECT_ID_ATTRIBUTE.to_string(),
            object_field: defaults::OBJECT_FIELD.to_string(),
        }
    }
}

/// Classes encoding watchlist membership; the two sets are toggled together.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MembershipConfig {
    /// Classes present while the record is on the watchlist.
    pub on_list: Vec<String>,
    /// Classes present while it is not.
    pub off_list: Vec<String>,
    /// Class read to derive the current membership.
    pub marker: String,
    /// Result header enclosing the toggle.
    pub result_header: String,
    /// Link inside the header updated from `link_url`.
    pub result_link: String,
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            on_list: defaults::ON_LIST_CLASSES.map(String::from).to_vec(),
            off_list: defaults::OFF_LIST_CLASSES.map(String::from).to_vec(),
            marker: defaults::MEMBERSHIP_MARKER.to_string(),
            result_header: defaults::RESULT_HEADER.to_string(),
            result_link: defaults::RESULT_LINK.to_string(),
        }
    }
}

/// One selector armed at bootstrap.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Behavior attached to matching elements.
    pub role: TriggerRole,
    /// Selector for the trigger elements.
    pub selector: String,
    /// List the trigger removes from (removal roles only).
    #[serde(default)]
    pub list: Option<ListConfig>,
}

/// Markup contract of a removable list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListConfig {
    /// Element directly holding the items.
    pub list: String,
    /// One removable item.
    pub item: String,
    /// Element replaced by the placeholder once the list is empty.
    pub container: String,
    /// Placeholder markup.
    pub empty_message: String,
    /// Counter badge tracking the number of items.
    #[serde(default)]
    pub badge: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() -> Result<(), ConfigError> {
        assert_eq!(UiConfig::from_json("{}")?, UiConfig::default());
        Ok(())
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() -> Result<(), ConfigError> {
        let config = UiConfig::from_json(
            r#"{"single_flight": false, "credential": {"header_name": "X-CSRF"}}"#,
        )?;
        assert!(!config.single_flight);
        assert_eq!(config.credential.header_name, "X-CSRF");
        assert_eq!(config.credential.cookie_name, defaults::TOKEN_COOKIE);
        assert_eq!(config.bindings, defaults::bindings());
        Ok(())
    }

    #[test]
    fn bindings_replace_the_default_set() -> Result<(), ConfigError> {
        let config = UiConfig::from_json(
            r#"{
                "bindings": [
                    {"role": "toggle", "selector": ".star-btn"},
                    {
                        "role": "remove_one",
                        "selector": ".drop-btn",
                        "list": {
                            "list": "ul.saved",
                            "item": "li.saved-item",
                            "container": ".saved-box",
                            "empty_message": "Nothing saved"
                        }
                    }
                ]
            }"#,
        )?;
        assert_eq!(config.bindings.len(), 2);
        assert_eq!(config.bindings[1].role, TriggerRole::RemoveOne);
        assert_eq!(
            config.bindings[1].list.as_ref().and_then(|list| list.badge.clone()),
            None
        );
        Ok(())
    }

    #[test]
    fn unknown_fields_are_parse_errors() {
        assert!(matches!(
            UiConfig::from_json(r#"{"singleflight": true}"#),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn defaults_bind_watchlist_and_trash() {
        let config = UiConfig::default();
        let trash = config
            .bindings
            .iter()
            .find(|binding| binding.selector == ".delete-btn")
            .and_then(|binding| binding.list.as_ref());
        assert_eq!(
            trash.map(|list| list.empty_message.as_str()),
            Some(defaults::TRASH_EMPTY)
        );
        assert_eq!(
            trash.and_then(|list| list.badge.as_deref()),
            Some(".papierkorb-badge")
        );
    }
}
