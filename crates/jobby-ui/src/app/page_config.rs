//! Page configuration embedded as a JSON script element.

use crate::config::defaults::CONFIG_ELEMENT_ID;
use crate::config::{ConfigError, UiConfig};

/// Configuration from the page, or the defaults when it embeds none.
pub(crate) fn load() -> Result<UiConfig, ConfigError> {
    let raw = gloo::utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    match raw {
        Some(raw) if !raw.trim().is_empty() => UiConfig::from_json(&raw),
        _ => Ok(UiConfig::default()),
    }
}
