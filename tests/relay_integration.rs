//! Relay task tests over the real channel

use ava::command::{CommandConstructor, Segment};
use ava::core::error::AvaError;
use ava::core::types::TabId;
use ava::core::AssistantConfig;
use ava::lexicon::Lexicon;
use ava::relay::{
    spawn_relay, BackgroundRelay, BrowserHost, Disposition, Message, RelayClient, SimulatedBrowser,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn start(urls: &[&str]) -> (RelayClient, Arc<SimulatedBrowser>) {
    let browser = Arc::new(SimulatedBrowser::with_tabs(urls));
    let relay = BackgroundRelay::new(Arc::clone(&browser), Lexicon::default());
    let (client, _task) = spawn_relay(relay, &AssistantConfig::default());
    (client, browser)
}

fn tab_message(verb: &str, index: Option<&str>) -> Message {
    let mut segment = Segment::new("browser")
        .with_entity("verb", verb)
        .with_entity("browser", "tab");
    if let Some(index) = index {
        segment = segment.with_entity("index", index);
    }
    Message::tab(CommandConstructor::default().construct(&segment).unwrap())
}

#[tokio::test]
async fn test_close_tab_by_position() {
    let (client, browser) = start(&["https://a.test", "https://b.test", "https://c.test"]);
    client.send(tab_message("close", Some("2"))).await.unwrap();

    let ids: Vec<TabId> = browser.snapshot().await.tabs.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![TabId(1), TabId(3)]);
}

#[tokio::test]
async fn test_out_of_range_close_is_silent() {
    let (client, browser) = start(&["https://a.test"]);
    client.send(tab_message("close", Some("7"))).await.unwrap();
    assert_eq!(browser.snapshot().await.tabs.len(), 1);
}

#[tokio::test]
async fn test_explicit_tab_position_field() {
    let (client, browser) = start(&["https://a.test", "https://b.test"]);
    let mut message = tab_message("open", None);
    message.tab_position = Some(2);

    client.send(message).await.unwrap();
    assert_eq!(browser.active_tab().await, Some(TabId(2)));
}

#[tokio::test]
async fn test_explicit_navigation_action() {
    let (client, browser) = start(&["https://a.test"]);
    browser.search("rust", Disposition::CurrentTab).await;

    let message: Message =
        serde_json::from_str(r#"{"intent": "navigation", "action": "back"}"#).unwrap();
    client.send(message).await.unwrap();
    assert_eq!(browser.snapshot().await.tabs[0].url(), "https://a.test");

    let message: Message =
        serde_json::from_str(r#"{"intent": "navigation", "action": "forward"}"#).unwrap();
    client.send(message).await.unwrap();
    assert!(browser.snapshot().await.tabs[0].url().contains("q=rust"));
}

#[tokio::test]
async fn test_search_new_window() {
    let (client, browser) = start(&["https://a.test"]);
    client
        .send(Message::search(Disposition::NewWindow, "tide tables"))
        .await
        .unwrap();

    let snapshot = browser.snapshot().await;
    let active = snapshot.active_tab().unwrap();
    assert_ne!(active.window, 0);
    assert_eq!(active.url(), "https://www.google.com/search?q=tide+tables");
}

#[tokio::test]
async fn test_activity_ports_follow_active_tab() {
    let (client, _browser) = start(&["https://a.test", "https://b.test"]);
    let mut first = client.connect(TabId(1)).await.unwrap();
    let mut second = client.connect(TabId(2)).await.unwrap();

    client.send(tab_message("open", Some("2"))).await.unwrap();
    assert_eq!(first.recv().await, Some(false));
    assert_eq!(second.recv().await, Some(true));
}

#[tokio::test]
async fn test_unchanged_active_tab_sends_nothing() {
    let (client, _browser) = start(&["https://a.test"]);
    let mut port = client.connect(TabId(1)).await.unwrap();

    client.send(Message::refresh()).await.unwrap();
    assert_eq!(port.try_recv(), None);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_relay_times_out() {
    let (tx, mut rx) = mpsc::channel(4);
    let client = RelayClient::new(tx, Duration::from_millis(2000), Some(TabId(1)));

    // Accept requests but never answer them
    let hold = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Some(request) = rx.recv().await {
            held.push(request);
        }
    });

    let err = client.send(Message::refresh()).await.unwrap_err();
    assert!(matches!(err, AvaError::RelayTimeout(2000)));
    hold.abort();
}

#[tokio::test]
async fn test_missing_sender_skips_search() {
    let (client, browser) = start(&["https://a.test"]);
    client
        .for_tab(None)
        .send(Message::search(Disposition::NewTab, "rust"))
        .await
        .unwrap();
    assert!(browser.snapshot().await.searches.is_empty());
}
