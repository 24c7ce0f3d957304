use std::cell::RefCell;
use std::rc::Rc;

use jobby_test_support::fixtures::{TOKEN, csrf_field, result_header, toggle_button};
use jobby_test_support::{FakePage, NodeId, ScriptedTransport, init_test_logging};
use jobby_ui::config::UiConfig;
use jobby_ui::core::dom::Dom;
use jobby_ui::core::error::ActionError;
use jobby_ui::core::ui::TriggerState;
use jobby_ui::features::actions::{
    Behavior, ButtonController, Callback, Outcome, ToggleBody, bootstrap,
};
use serde_json::json;

type Controller = ButtonController<FakePage, ScriptedTransport>;

fn controller_with(
    page: &Rc<FakePage>,
    transport: &Rc<ScriptedTransport>,
    config: UiConfig,
) -> Controller {
    init_test_logging();
    ButtonController::new(Rc::clone(page), Rc::clone(transport), config)
}

fn controller(page: &Rc<FakePage>, transport: &Rc<ScriptedTransport>) -> Controller {
    controller_with(page, transport, UiConfig::default())
}

fn membership_reply(on_watchlist: bool) -> Rc<ScriptedTransport> {
    let body = json!({ "on_watchlist": on_watchlist });
    Rc::new(ScriptedTransport::new().respond_json(200, &body))
}

fn sorted_classes(page: &FakePage, node: NodeId) -> Vec<String> {
    let mut classes = page.classes(node);
    classes.sort();
    classes
}

#[tokio::test]
async fn adding_to_watchlist_marks_the_button() -> anyhow::Result<()> {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = membership_reply(true);
    let controller = controller(&page, &transport);
    assert_eq!(bootstrap(&controller, None).armed(), 1);

    let button = page.find(".watchlist-toggle-btn");
    page.press(button).await;

    assert_eq!(
        sorted_classes(&page, button),
        vec!["on-watchlist", "text-success", "watchlist-toggle-btn"]
    );
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/watchlist/add/");
    assert_eq!(sent[0].method.as_str(), "POST");
    assert_eq!(sent[0].credential_header, "X-CSRFToken");
    assert_eq!(sent[0].credential.as_str(), TOKEN);
    let payload = transport.last_payload().ok_or_else(|| anyhow::anyhow!("no payload"))?;
    assert_eq!(payload.fields(), &[("refnr".to_string(), "X1".to_string())]);
    assert_eq!(controller.state(&button), Some(TriggerState::OnList));
    Ok(())
}

#[tokio::test]
async fn removing_from_watchlist_restores_the_plain_style() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/toggle/", &[("refnr", "X2")], true),
    ]));
    let transport = membership_reply(false);
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);

    let button = page.find(".watchlist-toggle-btn");
    assert_eq!(controller.state(&button), Some(TriggerState::OnList));
    page.press(button).await;

    assert_eq!(
        sorted_classes(&page, button),
        vec!["text-primary", "watchlist-toggle-btn"]
    );
    assert_eq!(controller.state(&button), Some(TriggerState::NotOnList));
}

#[tokio::test]
async fn failed_toggle_leaves_classes_untouched() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = Rc::new(
        ScriptedTransport::new()
            .respond(500, "Internal Server Error")
            .respond(200, "<html>login</html>")
            .fail("connection reset"),
    );
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    let button = page.find(".watchlist-toggle-btn");
    let before = sorted_classes(&page, button);

    for _ in 0..3 {
        page.press(button).await;
        assert_eq!(sorted_classes(&page, button), before);
        assert_eq!(controller.state(&button), Some(TriggerState::NotOnList));
    }
    assert_eq!(transport.sent_count(), 3);
}

#[tokio::test]
async fn toggle_payload_matches_the_embedded_form() -> anyhow::Result<()> {
    let fields = [
        ("refnr", "10000-1234567-S"),
        ("titel", "Koch & Kellner (m/w/d)"),
        ("arbeitsort", "München"),
        ("eintrittsdatum", ""),
    ];
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &fields, false),
    ]));
    let transport = membership_reply(true);
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    page.press(page.find(".watchlist-toggle-btn")).await;

    let payload = transport.last_payload().ok_or_else(|| anyhow::anyhow!("no payload"))?;
    let expected: Vec<(String, String)> = fields
        .iter()
        .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
        .collect();
    assert_eq!(payload.fields(), expected.as_slice());
    Ok(())
}

#[tokio::test]
async fn arming_twice_sends_one_request_per_click() -> anyhow::Result<()> {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = membership_reply(true);
    let controller = controller(&page, &transport);
    let button = page.find(".watchlist-toggle-btn");

    assert!(controller.arm(&button, Behavior::Toggle, None)?);
    assert!(!controller.arm(&button, Behavior::Toggle, None)?);
    assert_eq!(page.handler_count(button), 1);
    assert_eq!(controller.armed_count(), 1);

    page.press(button).await;
    assert_eq!(transport.sent_count(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_token_sends_nothing() {
    let page = Rc::new(FakePage::with([toggle_button(
        "/watchlist/add/",
        &[("refnr", "X1")],
        false,
    )]));
    let transport = membership_reply(true);
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    let button = page.find(".watchlist-toggle-btn");
    let before = sorted_classes(&page, button);

    page.press(button).await;
    assert_eq!(transport.sent_count(), 0);
    assert_eq!(sorted_classes(&page, button), before);

    let result = controller.perform(&button, &Behavior::Toggle).await;
    assert!(matches!(result, Err(ActionError::MissingCredential)));
}

#[tokio::test]
async fn token_falls_back_to_the_cookie() {
    let page = Rc::new(FakePage::with([toggle_button(
        "/watchlist/add/",
        &[("refnr", "X1")],
        false,
    )]));
    page.set_cookies("sessionid=abc; csrftoken=a%2Bb%3D; theme=dark");
    let transport = membership_reply(true);
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    page.press(page.find(".watchlist-toggle-btn")).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].credential.as_str(), "a+b=");
}

#[tokio::test]
async fn trigger_without_url_is_a_no_op() -> anyhow::Result<()> {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("", &[("refnr", "X1")], false),
    ]));
    let transport = Rc::new(ScriptedTransport::new());
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    let button = page.find(".watchlist-toggle-btn");

    page.press(button).await;
    assert_eq!(transport.sent_count(), 0);
    assert_eq!(controller.perform(&button, &Behavior::Toggle).await?, None);
    Ok(())
}

#[tokio::test]
async fn toggle_updates_the_result_link() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        result_header(
            "/angebot/X1/",
            toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
        ),
    ]));
    let transport = Rc::new(ScriptedTransport::new().respond_json(
        200,
        &json!({"on_watchlist": true, "link_url": "/watchlist/angebot/7/"}),
    ));
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    page.press(page.find(".watchlist-toggle-btn")).await;

    let link = page.find("a.result-link");
    assert_eq!(
        page.attribute(&link, "href").as_deref(),
        Some("/watchlist/angebot/7/")
    );
}

#[tokio::test]
async fn clicks_while_pending_are_ignored() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = Rc::new(
        ScriptedTransport::new()
            .respond_json(200, &json!({"on_watchlist": true}))
            .respond_json(200, &json!({"on_watchlist": false})),
    );
    let controller = controller(&page, &transport);
    bootstrap(&controller, None);
    let button = page.find(".watchlist-toggle-btn");

    let first = page.click(button);
    assert_eq!(controller.state(&button), Some(TriggerState::Pending));
    let second = page.click(button);
    for future in first.into_iter().chain(second) {
        future.await;
    }

    assert_eq!(transport.sent_count(), 1);
    assert_eq!(controller.state(&button), Some(TriggerState::OnList));
}

#[tokio::test]
async fn unguarded_clicks_each_send_a_request() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = Rc::new(
        ScriptedTransport::new()
            .respond_json(200, &json!({"on_watchlist": true}))
            .respond_json(200, &json!({"on_watchlist": false})),
    );
    let config = UiConfig {
        single_flight: false,
        ..UiConfig::default()
    };
    let controller = controller_with(&page, &transport, config);
    bootstrap(&controller, None);
    let button = page.find(".watchlist-toggle-btn");

    let first = page.click(button);
    let second = page.click(button);
    for future in first.into_iter().chain(second) {
        future.await;
    }

    assert_eq!(transport.sent_count(), 2);
    assert_eq!(controller.state(&button), Some(TriggerState::NotOnList));
}

#[tokio::test]
async fn callback_runs_after_confirmed_outcome() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = Rc::new(
        ScriptedTransport::new()
            .respond(503, "")
            .respond_json(200, &json!({"on_watchlist": true})),
    );
    let controller = controller(&page, &transport);
    let seen: Rc<RefCell<Vec<(bool, Outcome)>>> = Rc::new(RefCell::new(Vec::new()));
    let callback: Callback<NodeId> = {
        let seen = Rc::clone(&seen);
        let page = Rc::clone(&page);
        Rc::new(move |trigger: &NodeId, outcome: &Outcome| {
            seen.borrow_mut()
                .push((page.has_class(trigger, "on-watchlist"), outcome.clone()));
        })
    };
    bootstrap(&controller, Some(callback));
    let button = page.find(".watchlist-toggle-btn");

    page.press(button).await;
    assert!(seen.borrow().is_empty());

    page.press(button).await;
    assert_eq!(
        seen.borrow().as_slice(),
        &[(
            true,
            Outcome::Membership(ToggleBody {
                on_watchlist: true,
                link_url: None
            })
        )]
    );
}

#[tokio::test]
async fn dropped_controller_disarms_handlers() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        toggle_button("/watchlist/add/", &[("refnr", "X1")], false),
    ]));
    let transport = membership_reply(true);
    let button = page.find(".watchlist-toggle-btn");
    {
        let controller = controller(&page, &transport);
        bootstrap(&controller, None);
    }
    page.press(button).await;
    assert_eq!(page.handler_count(button), 1);
    assert_eq!(transport.sent_count(), 0);
}
