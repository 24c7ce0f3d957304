//! Request builders for trigger elements.
//!
//! A trigger without a target URL (or, for removals, without a record id) is
//! a silent no-op: the builders return `Ok(None)` before the token is looked up.

use crate::config::{AttributeConfig, UiConfig};
use crate::core::credential::CredentialResolver;
use crate::core::dom::Dom;
use crate::core::error::ActionError;
use crate::core::payload::FormPayload;
use crate::core::transport::RequestDescriptor;

fn non_empty_attribute<D: Dom>(dom: &D, node: &D::Node, name: &str) -> Option<String> {
    dom.attribute(node, name)
        .filter(|value| !value.trim().is_empty())
}

/// Toggle request: the trigger's embedded form, sent verbatim.
///
/// # Errors
/// Returns [`ActionError::MissingCredential`] when no token is available.
pub fn toggle_request<D: Dom>(
    dom: &D,
    trigger: &D::Node,
    config: &UiConfig,
) -> Result<Option<RequestDescriptor>, ActionError> {
    let Some(url) = non_empty_attribute(dom, trigger, &config.attributes.url) else {
        return Ok(None);
    };
    let payload = dom
        .query_within(trigger, "form")
        .map(|form| FormPayload::from_entries(dom.form_entries(&form)))
        .unwrap_or_default();
    let credential = CredentialResolver::new(&config.credential).resolve(dom)?;
    Ok(Some(RequestDescriptor::post(
        url,
        &config.credential.header_name,
        credential,
        payload,
    )))
}

/// Removal request: a single field carrying the trigger's record id.
///
/// # Errors
/// Returns [`ActionError::MissingCredential`] when no token is available.
pub fn remove_request<D: Dom>(
    dom: &D,
    trigger: &D::Node,
    config: &UiConfig,
) -> Result<Option<RequestDescriptor>, ActionError> {
    let attributes = &config.attributes;
    let Some(url) = non_empty_attribute(dom, trigger, &attributes.url) else {
        return Ok(None);
    };
    let Some(object_id) = non_empty_attribute(dom, trigger, &attributes.object_id) else {
        return Ok(None);
    };
    let mut payload = FormPayload::default();
    payload.push(attributes.object_field.as_str(), object_id);
    let credential = CredentialResolver::new(&config.credential).resolve(dom)?;
    Ok(Some(RequestDescriptor::post(
        url,
        &config.credential.header_name,
        credential,
        payload,
    )))
}

/// Short trigger label for log fields.
#[must_use]
pub fn describe<D: Dom>(dom: &D, trigger: &D::Node, attributes: &AttributeConfig) -> String {
    let url = dom.attribute(trigger, &attributes.url);
    let object_id = dom.attribute(trigger, &attributes.object_id);
    match (url, object_id) {
        (Some(url), Some(id)) => format!("{url} ({}={id})", attributes.object_field),
        (Some(url), None) => url,
        (None, Some(id)) => format!("{}={id}", attributes.object_field),
        (None, None) => "<unlabelled trigger>".to_string(),
    }
}
