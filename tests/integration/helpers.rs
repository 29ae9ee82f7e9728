use chat_feed::app::App;
use chat_feed::config::FeedConfig;
use chat_feed::feed::{Message, MessageStore, RowContent, VirtualItems};
use std::sync::Arc;

pub const WIDTH: u16 = 80;
pub const HEIGHT: u16 = 12;

pub fn messages(n: usize) -> Vec<Message> {
    (0..n)
        .map(|i| Message::new(format!("m{i}"), format!("user{i}"), format!("message number {i}")))
        .collect()
}

/// Build an `App` over `store_len` generated messages.
/// No terminal -- just state and the feed event channel.
pub fn test_app(store_len: usize, page_size: usize) -> App {
    test_app_with(store_len, FeedConfig { page_size, ..FeedConfig::default() })
}

pub fn test_app_with(store_len: usize, config: FeedConfig) -> App {
    let store = MessageStore::new(messages(store_len)).expect("non-empty store");
    App::new(Arc::new(store), &config, "test".to_owned())
}

pub fn fixed_height(_: RowContent<'_>) -> u16 {
    3
}

/// One layout pass, as the render loop would run it.
pub fn frame(app: &mut App) -> VirtualItems {
    app.feed.recompute(WIDTH, HEIGHT, &mut fixed_height)
}

/// Wait for the next background completion and apply it.
pub async fn next_feed_event(app: &mut App) {
    let event = app.event_rx.recv().await.expect("feed channel open");
    chat_feed::app::handle_feed_event(app, event);
}
