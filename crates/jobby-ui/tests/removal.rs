use std::cell::RefCell;
use std::rc::Rc;

use jobby_test_support::fixtures::{TOKEN, csrf_field, trash, trash_badge, watchlist};
use jobby_test_support::{FakePage, NodeId, ScriptedTransport, init_test_logging};
use jobby_ui::config::UiConfig;
use jobby_ui::config::defaults::{TRASH_EMPTY, WATCHLIST_EMPTY};
use jobby_ui::core::dom::Dom;
use jobby_ui::core::ui::TriggerState;
use jobby_ui::features::actions::{
    Behavior, ButtonController, Callback, ListEffect, Outcome, bootstrap,
};

type Controller = ButtonController<FakePage, ScriptedTransport>;

fn armed(page: &Rc<FakePage>, transport: &Rc<ScriptedTransport>) -> Controller {
    init_test_logging();
    let controller =
        ButtonController::new(Rc::clone(page), Rc::clone(transport), UiConfig::default());
    bootstrap(&controller, None);
    controller
}

fn remaining_pks(page: &FakePage, selector: &str) -> Vec<String> {
    page.query_all(selector)
        .iter()
        .filter_map(|node| page.attribute(node, "data-pk"))
        .collect()
}

#[tokio::test]
async fn removing_the_last_watchlist_item_shows_the_placeholder() {
    let page = Rc::new(FakePage::with([csrf_field(TOKEN), watchlist(&["X1"])]));
    let transport = Rc::new(ScriptedTransport::new().respond(204, ""));
    let _controller = armed(&page, &transport);

    page.press(page.find(".watchlist-remove-btn")).await;

    let container = page.find(".watchlist-container");
    assert_eq!(page.inner_html(&container), WATCHLIST_EMPTY);
    assert!(page.query(".watchlist-item").is_none());
}

#[tokio::test]
async fn removing_one_of_many_excises_only_that_item() -> anyhow::Result<()> {
    let page = Rc::new(FakePage::with([csrf_field(TOKEN), watchlist(&["X1", "X2", "X3"])]));
    let transport = Rc::new(ScriptedTransport::new().respond(200, ""));
    let _controller = armed(&page, &transport);

    let target = page.find(".watchlist-remove-btn[data-pk=X2]");
    page.press(target).await;

    assert_eq!(page.query_all(".watchlist-item").len(), 2);
    assert_eq!(remaining_pks(&page, ".watchlist-remove-btn"), vec!["X1", "X3"]);
    assert!(!page.is_attached(target));

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/watchlist/remove/");
    let payload = transport.last_payload().ok_or_else(|| anyhow::anyhow!("no payload"))?;
    assert_eq!(payload.get("pk"), Some("X2"));
    assert_eq!(payload.len(), 1);
    Ok(())
}

#[tokio::test]
async fn remove_all_empties_the_list_regardless_of_size() {
    for ids in [&[][..], &["X1"][..], &["X1", "X2", "X3"][..]] {
        let page = Rc::new(FakePage::with([csrf_field(TOKEN), watchlist(ids)]));
        let transport = Rc::new(ScriptedTransport::new().respond(200, ""));
        let _controller = armed(&page, &transport);

        page.press(page.find(".watchlist-remove-all-btn")).await;

        let container = page.find(".watchlist-container");
        assert_eq!(page.inner_html(&container), WATCHLIST_EMPTY, "items: {ids:?}");
        assert_eq!(transport.sent_count(), 1);
    }
}

#[tokio::test]
async fn failed_removal_keeps_the_list() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        trash_badge("2"),
        trash(&["7", "8"]),
    ]));
    let transport = Rc::new(ScriptedTransport::new().respond(500, "{\"error\": \"locked\"}"));
    let controller = armed(&page, &transport);

    let target = page.find(".delete-btn[data-pk=7]");
    page.press(target).await;

    assert_eq!(remaining_pks(&page, ".delete-btn"), vec!["7", "8"]);
    assert_eq!(page.inner_html(&page.find(".papierkorb-badge")), "2");
    assert_eq!(controller.state(&target), Some(TriggerState::Idle));
}

#[tokio::test]
async fn trash_removal_updates_the_badge() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        trash_badge("2"),
        trash(&["7", "8"]),
    ]));
    let transport = Rc::new(ScriptedTransport::new().respond(200, "").respond(200, ""));
    let _controller = armed(&page, &transport);
    let badge = page.find(".papierkorb-badge");

    page.press(page.find(".delete-btn[data-pk=7]")).await;
    assert_eq!(page.inner_html(&badge), "1");
    assert_eq!(remaining_pks(&page, ".delete-btn"), vec!["8"]);

    page.press(page.find(".delete-btn[data-pk=8]")).await;
    assert_eq!(page.inner_html(&badge), "0");
    assert_eq!(
        page.inner_html(&page.find(".trash-items-container")),
        TRASH_EMPTY
    );
}

#[tokio::test]
async fn badge_without_a_positive_count_is_left_alone() {
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        trash_badge(""),
        trash(&["7", "8"]),
    ]));
    let transport = Rc::new(ScriptedTransport::new().respond(200, ""));
    let _controller = armed(&page, &transport);

    page.press(page.find(".delete-btn[data-pk=7]")).await;
    assert_eq!(page.inner_html(&page.find(".papierkorb-badge")), "");
    assert_eq!(remaining_pks(&page, ".delete-btn"), vec!["8"]);
}

#[tokio::test]
async fn removal_without_record_id_sends_nothing() {
    let page = Rc::new(FakePage::with([csrf_field(TOKEN), trash(&[""])]));
    let transport = Rc::new(ScriptedTransport::new().respond(200, ""));
    let _controller = armed(&page, &transport);

    page.press(page.find(".delete-btn")).await;
    assert_eq!(transport.sent_count(), 0);
    assert_eq!(page.query_all(".trash-item").len(), 1);
}

#[tokio::test]
async fn removal_without_record_id_does_not_need_a_token() {
    let page = Rc::new(FakePage::with([trash(&[""])]));
    let transport = Rc::new(ScriptedTransport::new());
    let controller = armed(&page, &transport);
    let binding = controller
        .config()
        .bindings
        .iter()
        .find(|binding| binding.selector == ".delete-btn");
    let Some(behavior) = binding.and_then(Behavior::from_binding) else {
        panic!("trash binding has a list");
    };

    let result = controller.perform(&page.find(".delete-btn"), &behavior).await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn removal_outcomes_reach_the_callback() {
    init_test_logging();
    let page = Rc::new(FakePage::with([
        csrf_field(TOKEN),
        watchlist(&["X1", "X2", "X3"]),
    ]));
    let transport = Rc::new(
        ScriptedTransport::new()
            .respond(200, "")
            .respond(204, "")
            .respond(200, ""),
    );
    let controller =
        ButtonController::new(Rc::clone(&page), Rc::clone(&transport), UiConfig::default());
    let seen: Rc<RefCell<Vec<Outcome>>> = Rc::default();
    let callback: Callback<NodeId> = {
        let seen = Rc::clone(&seen);
        Rc::new(move |_trigger: &NodeId, outcome: &Outcome| {
            seen.borrow_mut().push(outcome.clone());
        })
    };
    bootstrap(&controller, Some(callback));

    for pk in ["X2", "X1", "X3"] {
        let button = page.find(&format!(".watchlist-remove-btn[data-pk={pk}]"));
        page.press(button).await;
    }

    assert_eq!(
        seen.borrow().as_slice(),
        &[
            Outcome::Removed(ListEffect::ItemRemoved { remaining: 2 }),
            Outcome::Removed(ListEffect::ItemRemoved { remaining: 1 }),
            Outcome::Removed(ListEffect::Emptied),
        ]
    );
    assert_eq!(
        page.inner_html(&page.find(".watchlist-container")),
        WATCHLIST_EMPTY
    );
}
