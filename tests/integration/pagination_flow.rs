// =====
// TESTS: 10
// =====
//
// Pagination flow integration tests.
// Drives the feed through layout frames and the background fetch channel
// with tokio's clock paused, so the simulated network delay is instant.

use chat_feed::app::{handle_feed_event, handle_terminal_event};
use chat_feed::config::FeedConfig;
use chat_feed::feed::{FeedEvent, FetchSettings, PageOutcome, PageRequest, PageResponse, RowKey};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;
use std::time::Duration;

use crate::helpers::{frame, next_feed_event, test_app, test_app_with};

// --- Mount ---

#[tokio::test(start_paused = true)]
async fn mount_shows_newest_page_without_fetching() {
    let mut app = test_app(250, 100);
    let visible = frame(&mut app);

    assert_eq!(app.feed.window().len(), 100);
    assert_eq!(app.feed.pagination().start_index(), 150);
    assert!(app.feed.has_loader_row());
    assert_eq!(visible.items.last().map(|i| i.key), Some(RowKey::Message(249)));
    assert!(!app.is_fetching());
}

#[tokio::test(start_paused = true)]
async fn initial_scroll_fires_once_across_repeated_frames() {
    let mut app = test_app(250, 100);
    for _ in 0..5 {
        frame(&mut app);
    }
    let settled = frame(&mut app).scroll_offset;

    // A user scroll afterwards is not undone by the latch.
    app.feed.scroll_by(-3);
    let after = frame(&mut app);
    assert!(after.scroll_offset < settled);
    assert!(!app.feed.is_following_end());
    assert_eq!(frame(&mut app).scroll_offset, after.scroll_offset);
    assert!(!app.is_fetching());
}

// --- Backward pagination ---

#[tokio::test(start_paused = true)]
async fn full_history_arrives_in_two_pages() {
    let mut app = test_app(250, 100);
    frame(&mut app);

    app.feed.scroll_to_oldest();
    frame(&mut app);
    assert!(app.is_fetching());
    next_feed_event(&mut app).await;
    assert_eq!(app.feed.pagination().start_index(), 50);
    assert_eq!(app.feed.window().len(), 200);
    assert!(app.feed.has_loader_row());

    // Prepend kept the viewport on the same message, so the loader is above it.
    let visible = frame(&mut app);
    assert_ne!(visible.first().map(|i| i.key), Some(RowKey::Loader));
    assert!(!app.is_fetching());

    app.feed.scroll_to_oldest();
    frame(&mut app);
    assert!(app.is_fetching());
    next_feed_event(&mut app).await;
    assert_eq!(app.feed.window().len(), 250);
    assert!(!app.feed.has_loader_row());

    app.feed.scroll_to_oldest();
    let visible = frame(&mut app);
    assert_eq!(visible.first().map(|i| i.key), Some(RowKey::Message(0)));
    assert!(!app.is_fetching());
}

#[tokio::test(start_paused = true)]
async fn key_scroll_in_same_drain_as_page_keeps_position() {
    let mut app = test_app(250, 100);
    frame(&mut app);
    app.feed.scroll_to_oldest();
    let before = frame(&mut app);
    let under_loader = before.items[1].key;
    assert_eq!(under_loader, RowKey::Message(150));

    // The event loop drains the completion and a key press before drawing.
    let event = app.event_rx.recv().await.expect("page completion");
    handle_feed_event(&mut app, event);
    handle_terminal_event(&mut app, Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));

    let after = frame(&mut app);
    assert!(after.items.iter().any(|i| i.key == under_loader));
    assert_ne!(after.first().map(|i| i.key), Some(RowKey::Loader));
    assert!(!app.is_fetching());
}

#[tokio::test(start_paused = true)]
async fn small_store_never_requests_a_page() {
    let mut app = test_app(50, 100);
    frame(&mut app);
    app.feed.scroll_to_oldest();
    for _ in 0..5 {
        frame(&mut app);
    }
    tokio::time::sleep(Duration::from_secs(10)).await;

    assert!(!app.feed.has_loader_row());
    assert_eq!(app.feed.window().len(), 50);
    assert!(app.event_rx.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn loader_seen_on_many_frames_fetches_once() {
    let mut app = test_app(250, 100);
    frame(&mut app);
    app.feed.scroll_to_oldest();
    for _ in 0..5 {
        frame(&mut app);
    }
    tokio::time::sleep(Duration::from_secs(10)).await;

    let mut completions = 0;
    while let Ok(event) = app.event_rx.try_recv() {
        handle_feed_event(&mut app, event);
        completions += 1;
    }
    assert_eq!(completions, 1);
    assert_eq!(app.feed.window().len(), 200);
}

#[tokio::test(start_paused = true)]
async fn window_only_grows_and_stays_anchored_to_newest() {
    let mut app = test_app(1_000, 75);
    frame(&mut app);
    let mut sizes = vec![app.feed.window().len()];

    while app.feed.has_loader_row() {
        app.feed.scroll_to_oldest();
        frame(&mut app);
        next_feed_event(&mut app).await;
        sizes.push(app.feed.window().len());
        assert_eq!(app.feed.window().last().map(|m| m.id.as_str()), Some("m999"));
    }

    assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(sizes.last(), Some(&1_000));
    // 75 on mount, then ceil(925 / 75) pages.
    assert_eq!(sizes.len(), 1 + 13);
}

// --- Failure and teardown ---

#[tokio::test(start_paused = true)]
async fn failed_fetch_retries_after_backoff() {
    let config = FeedConfig {
        page_size: 100,
        fetch: FetchSettings { delay: Duration::from_millis(500), fail_every: Some(2) },
        ..FeedConfig::default()
    };
    let mut app = test_app_with(400, config);
    frame(&mut app);

    // First page succeeds.
    app.feed.scroll_to_oldest();
    frame(&mut app);
    next_feed_event(&mut app).await;
    assert_eq!(app.feed.window().len(), 200);

    // Second fails and leaves the window alone.
    app.feed.scroll_to_oldest();
    frame(&mut app);
    next_feed_event(&mut app).await;
    assert_eq!(app.feed.window().len(), 200);
    assert!(app.feed.pagination().last_error().is_some());
    assert!(app.feed.has_loader_row());

    // Loader is still on screen but the backoff holds the retry.
    frame(&mut app);
    assert!(!app.is_fetching());

    tokio::time::sleep(Duration::from_secs(3)).await;
    frame(&mut app);
    assert!(app.is_fetching());
    next_feed_event(&mut app).await;
    assert_eq!(app.feed.window().len(), 300);
    assert_eq!(app.feed.pagination().last_error(), None);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_fetch() {
    let mut app = test_app(250, 100);
    frame(&mut app);
    app.feed.scroll_to_oldest();
    frame(&mut app);
    assert!(app.is_fetching());

    app.feed.shutdown();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(app.event_rx.try_recv().is_err());
    assert_eq!(app.feed.window().len(), 100);
}

#[tokio::test(start_paused = true)]
async fn unknown_completion_is_ignored() {
    let mut app = test_app(250, 100);
    frame(&mut app);
    app.feed.scroll_to_oldest();
    frame(&mut app);
    assert!(app.is_fetching());

    // Same page, but not the request the controller issued.
    let bogus = PageRequest { id: 8, range: 50..150 };
    handle_feed_event(
        &mut app,
        FeedEvent::PageFetched(PageResponse { request: bogus, outcome: PageOutcome::Loaded }),
    );
    assert_eq!(app.feed.window().len(), 100);
    assert!(app.is_fetching());

    next_feed_event(&mut app).await;
    assert_eq!(app.feed.window().len(), 200);
}
