//! Drop blank fields from the search form before it is submitted.

use gloo::events::EventListener;
use tracing::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, FormData, FormDataEvent};

use crate::core::search_form::{EntryValue, field_names, retain_filled};
use crate::services::dom::form_data_entries;

pub(crate) fn install(document: &Document, selector: &str) {
    let Ok(Some(form)) = document.query_selector(selector) else {
        debug!(selector, "no search form on the page");
        return;
    };
    EventListener::new(&form, "formdata", |event| {
        if let Some(event) = event.dyn_ref::<FormDataEvent>() {
            prune(&event.form_data());
        }
    })
    .forget();
}

fn prune(data: &FormData) {
    let entries = form_data_entries(data);
    let Some(kept) = retain_filled(&entries) else {
        return;
    };
    for name in field_names(&entries) {
        data.delete(name);
    }
    for (name, value) in &kept {
        let restored = match value {
            EntryValue::Text(text) => data.append_with_str(name, text),
            EntryValue::File(blob) => data.append_with_blob(name, blob),
        };
        if let Err(err) = restored {
            debug!(field = %name, error = ?err, "failed to restore search field");
        }
    }
    debug!(kept = kept.len(), dropped = entries.len() - kept.len(), "pruned search form");
}
