// TUI module: terminal setup, the event loop, and key dispatch
//
// The loop owns App. Each iteration it spawns any loads App asked for, draws
// a frame, then waits on terminal input, the redraw tick, or a load result.

pub mod app;
pub mod clipboard;
pub mod components;
pub mod input;
pub mod layout;
pub mod modal;
pub mod overlay;
pub mod scroll;
pub mod views;

use crate::api::ApiClient;
use crate::config::Config;
use crate::format::event_summary;
use crate::loader::{self, Loaded};
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, View};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use modal::{Modal, ModalAction};
use overlay::OverlayAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Load results in flight at once; route changes rarely queue more than two
const LOAD_CHANNEL_CAPACITY: usize = 16;

/// Run the TUI until the user quits
pub async fn run_tui(config: &Config, log_buffer: LogBuffer, api: Arc<ApiClient>) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::with_config(config, log_buffer);
    tracing::info!("fest started against {}", api.base_url());

    let result = run_event_loop(&mut terminal, &mut app, api).await;

    // Drop listing state (and any overlay lock) before leaving the screen
    app.go_home();

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api: Arc<ApiClient>,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Loaded>(LOAD_CHANNEL_CAPACITY);
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        for request in app.pending.drain(..) {
            tracing::debug!("Spawning load (gen {})", request.generation());
            loader::spawn(Arc::clone(&api), request, tx.clone());
        }

        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(loaded) = rx.recv() => {
                tracing::trace!("Load finished (gen {})", loaded.generation());
                app.apply_loaded(loaded);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Key dispatch: Modal → Global → Overlay → View
// ─────────────────────────────────────────────────────────────────────────────

fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind == KeyEventKind::Release {
        app.handle_key_release(key_event.code);
        return;
    }
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_modal_input(app, key_event.code) {
        return;
    }
    if handle_global_keys(app, key_event.code) {
        return;
    }
    if handle_overlay_input(app, key_event.code) {
        return;
    }

    let key = key_event.code;
    if !app.handle_key_press(key) {
        return;
    }

    match app.view {
        View::Home => handle_home_keys(app, key),
        View::Events => handle_events_keys(app, key_event),
    }
}

/// Returns true if a modal absorbed the key
fn handle_modal_input(app: &mut App, key: KeyCode) -> bool {
    let Some(modal) = app.modal else {
        return false;
    };
    if !app.handle_key_press(key) {
        return true;
    }

    match modal.handle_input(key) {
        ModalAction::None => {}
        ModalAction::Close => app.modal = None,
        ModalAction::ScrollUp => app.logs_scroll.scroll_up(),
        ModalAction::ScrollDown => app.logs_scroll.scroll_down(),
        ModalAction::ScrollTop => app.logs_scroll.scroll_to_top(),
        ModalAction::ScrollBottom => {
            app.logs_scroll.scroll_to_bottom();
            app.logs_scroll.auto_follow = true;
        }
        ModalAction::Copy => {
            let text = app
                .log_buffer
                .get_all()
                .iter()
                .map(|e| {
                    format!(
                        "{} {} {} {}",
                        e.timestamp.to_rfc3339(),
                        e.level.as_str(),
                        e.target,
                        e.message
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            copy_with_toast(app, &text);
        }
        ModalAction::Clear => {
            app.log_buffer.clear();
            app.logs_scroll = scroll::ScrollState::following();
        }
    }
    true
}

/// q, ?, L work everywhere outside modals
fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            if app.handle_key_press(key) {
                app.should_quit = true;
            }
            true
        }
        KeyCode::Char('?') => {
            if app.handle_key_press(key) {
                app.modal = Some(Modal::Help);
            }
            true
        }
        KeyCode::Char('L') => {
            if app.handle_key_press(key) {
                app.logs_scroll = scroll::ScrollState::following();
                app.modal = Some(Modal::Logs);
            }
            true
        }
        _ => false,
    }
}

/// Returns true if the detail overlay is open (it takes every key)
fn handle_overlay_input(app: &mut App, key: KeyCode) -> bool {
    let overlay_open = app
        .listing
        .as_ref()
        .is_some_and(|listing| listing.overlay.is_some());
    if !overlay_open {
        return false;
    }
    if !app.handle_key_press(key) {
        return true;
    }

    let action = app
        .listing
        .as_mut()
        .and_then(|listing| listing.overlay.as_mut())
        .map(|overlay| overlay.handle_key(key))
        .unwrap_or(OverlayAction::None);

    match action {
        OverlayAction::None => {}
        OverlayAction::Close => {
            if let Some(listing) = app.listing.as_mut() {
                listing.close_overlay();
            }
        }
        OverlayAction::Copy => {
            let summary = app
                .listing
                .as_ref()
                .and_then(|listing| listing.overlay_event())
                .map(|event| event_summary(event, app.locale));
            if let Some(text) = summary {
                copy_with_toast(app, &text);
            }
        }
    }
    true
}

fn handle_home_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.home.selected = app.home.selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.home.selected + 1 < app.home.row_count() {
                app.home.selected += 1;
            }
        }
        KeyCode::Home => app.home.selected = 0,
        KeyCode::End => app.home.selected = app.home.row_count() - 1,
        KeyCode::Enter => {
            let route = app.home.selected_route();
            app.open_listing(route);
        }
        KeyCode::Char('r') => app.reload(),
        _ => {}
    }
}

fn handle_events_keys(app: &mut App, key_event: KeyEvent) {
    let key = key_event.code;
    match key {
        KeyCode::Esc => {
            app.go_home();
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        _ => {}
    }

    let Some(listing) = app.listing.as_mut() else {
        return;
    };
    match key {
        KeyCode::Up | KeyCode::Char('k') => listing.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => listing.select_next(),
        KeyCode::PageUp => listing.page.state.page_up(),
        KeyCode::PageDown => listing.page.state.page_down(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => listing.cycle_filter(-1),
        KeyCode::Tab if key_event.modifiers.contains(KeyModifiers::SHIFT) => {
            listing.cycle_filter(-1)
        }
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => listing.cycle_filter(1),
        KeyCode::Enter => listing.open_overlay(),
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let up = match mouse_event.kind {
        MouseEventKind::ScrollUp => true,
        MouseEventKind::ScrollDown => false,
        _ => return,
    };

    if app.modal == Some(Modal::Logs) {
        if up {
            app.logs_scroll.scroll_up();
        } else {
            app.logs_scroll.scroll_down();
        }
        return;
    }

    let Some(listing) = app.listing.as_mut() else {
        return;
    };
    // The page ignores the wheel while the overlay holds its lock
    if let Some(overlay) = listing.overlay.as_mut() {
        if up {
            overlay.scroll.scroll_up();
        } else {
            overlay.scroll.scroll_down();
        }
    } else if up {
        listing.page.scroll_up();
    } else {
        listing.page.scroll_down();
    }
}

fn copy_with_toast(app: &mut App, text: &str) {
    match clipboard::copy_to_clipboard(text) {
        Ok(()) => app.show_toast("✓ Copied to clipboard"),
        Err(e) => {
            tracing::warn!("Clipboard copy failed: {:#}", e);
            app.show_toast("✗ Failed to copy");
        }
    }
}
