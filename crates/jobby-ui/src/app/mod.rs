//! Browser entry point: read page configuration, install logging, arm triggers.

mod page_config;
mod search_form;

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use gloo::events::EventListener;
use jobby_telemetry::{LogFormat, LoggingConfig, init_logging, log_format_from_str};
use tracing::info;
use wasm_bindgen::prelude::wasm_bindgen;
use web_sys::DocumentReadyState;

use crate::features::actions::{ButtonController, bootstrap};
use crate::services::dom::WebDom;
use crate::services::http::FetchTransport;

type PageController = ButtonController<WebDom, FetchTransport>;

thread_local! {
    static CONTROLLER: RefCell<Option<PageController>> = const { RefCell::new(None) };
}

/// Entrypoint invoked by Trunk for wasm32 builds.
pub fn run_app() {
    console_error_panic_hook::set_once();
    let document = gloo::utils::document();
    if document.ready_state() == DocumentReadyState::Loading {
        EventListener::once(&document, "DOMContentLoaded", |_| start()).forget();
    } else {
        start();
    }
}

/// Arm triggers inserted after the initial page load; returns how many were new.
#[wasm_bindgen(js_name = rearmTriggers)]
pub fn rearm() -> usize {
    CONTROLLER.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(0, |controller| bootstrap(controller, None).armed())
    })
}

fn start() {
    if let Err(err) = mount() {
        gloo::console::error!(format!("jobby-ui failed to start: {err:#}"));
    }
}

fn mount() -> anyhow::Result<()> {
    let config = page_config::load().context("failed to read page configuration")?;
    let format = config
        .log_format
        .as_deref()
        .map_or_else(LogFormat::infer, log_format_from_str);
    init_logging(&LoggingConfig {
        level: &config.log_level,
        format,
    })
    .context("failed to install logging")?;

    let document = gloo::utils::document();
    if let Some(selector) = config.search_form.as_deref() {
        search_form::install(&document, selector);
    }
    let controller = ButtonController::new(
        Rc::new(WebDom::new(document)),
        Rc::new(FetchTransport),
        config,
    );
    let report = bootstrap(&controller, None);
    info!(
        armed = report.armed(),
        bindings = report.bindings.len(),
        "jobby-ui ready"
    );
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller));
    Ok(())
}
