// =====
// TESTS: 3
// =====
//
// Full-frame rendering through ratatui's TestBackend.

use chat_feed::app::App;
use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::helpers::{next_feed_event, test_app};

fn draw(app: &mut App, width: u16, height: u16) -> Vec<String> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| chat_feed::ui::render(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    (0..height).map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect::<String>()).collect()
}

#[tokio::test(start_paused = true)]
async fn mount_frame_ends_on_newest_message() {
    let mut app = test_app(250, 100);
    let rows = draw(&mut app, 60, 24);
    let screen = rows.join("\n");
    assert!(rows[0].contains("100 of 250 loaded"));
    assert!(screen.contains("user249:"));
    assert!(screen.contains("message number 249"));
    assert!(!screen.contains("message number 100"));
}

#[tokio::test(start_paused = true)]
async fn loader_then_older_messages_after_fetch() {
    let mut app = test_app(250, 100);
    draw(&mut app, 60, 24);

    app.feed.scroll_to_oldest();
    let rows = draw(&mut app, 60, 24);
    assert!(rows[2].contains("Loading older messages"));
    assert!(rows[0].contains("fetching"));

    next_feed_event(&mut app).await;
    let rows = draw(&mut app, 60, 24);
    assert!(rows[0].contains("200 of 250 loaded"));
    // The message that was under the loader is still on screen.
    assert!(rows.join("\n").contains("message number 150"));
}

#[tokio::test(start_paused = true)]
async fn fully_loaded_history_has_no_loader() {
    let mut app = test_app(250, 100);
    draw(&mut app, 80, 24);
    for _ in 0..2 {
        app.feed.scroll_to_oldest();
        draw(&mut app, 80, 24);
        next_feed_event(&mut app).await;
    }
    app.feed.scroll_to_oldest();
    let rows = draw(&mut app, 80, 24);
    let screen = rows.join("\n");
    assert!(rows[0].contains("all history loaded"));
    assert!(screen.contains("message number 0"));
    assert!(!screen.contains("Loading older messages"));
}
