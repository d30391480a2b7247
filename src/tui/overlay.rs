// Event detail overlay state
//
// Closed -> Open(event) -> Closed. The listing holds `Option<Overlay>`; `None`
// is closed. Opening takes a ScrollLock on the listing page and the lock goes
// away with the overlay, so every way of closing it (Esc, leaving the
// listing, reloading, quitting) restores page scrolling.

use super::scroll::{PageScroll, ScrollLock, ScrollState};
use crate::format::{all_images, PLACEHOLDER_IMAGE};
use crate::model::Event;
use crossterm::event::KeyCode;

pub const GENERAL_RULES: &[&str] = &[
    "All participants must register before the deadline.",
    "Valid college ID card is mandatory for participation.",
    "Participants should report 30 minutes before the event.",
    "The decision of the judges will be final and binding.",
    "Any misconduct will lead to immediate disqualification.",
    "Participants must follow the dress code specified for the event.",
];

/// Shown when the event carries no rules of its own
pub const EVENT_RULES: &[&str] = &[
    "The event will consist of three rounds: Qualifiers, Semi-finals, and Finals.",
    "Each team/participant will get 10 minutes for their performance.",
    "Use of any electronic devices during the performance is prohibited.",
    "Props must be approved by the event coordinators beforehand.",
    "Time limit violations will result in penalty points.",
    "Originality and creativity will be given high priority in scoring.",
];

/// What the app should do after the overlay handled a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayAction {
    None,
    Close,
    Copy,
}

#[derive(Debug)]
pub struct Overlay {
    /// Index of the event in the listing's full collection
    pub event_index: usize,
    /// Resolved gallery URLs (unresolvable entries dropped)
    pub images: Vec<String>,
    selected_image: usize,
    pub general_rules_open: bool,
    pub event_rules_open: bool,
    /// Scroll position of the overlay body
    pub scroll: ScrollState,
    _lock: ScrollLock,
}

impl Overlay {
    /// Open on `event`: first image, both rule sections collapsed
    pub fn open(event_index: usize, event: &Event, page: &PageScroll) -> Self {
        tracing::debug!("Opening details for {}", event.display_title());
        Self {
            event_index,
            images: all_images(&event.images),
            selected_image: 0,
            general_rules_open: false,
            event_rules_open: false,
            scroll: ScrollState::manual(),
            _lock: page.lock(),
        }
    }

    pub fn selected_image(&self) -> usize {
        self.selected_image
    }

    /// URL of the large gallery image
    pub fn main_image(&self) -> &str {
        self.images
            .get(self.selected_image)
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Pick a thumbnail; out-of-range indices clamp, an empty gallery ignores it
    pub fn select_image(&mut self, index: usize) {
        if self.images.is_empty() {
            return;
        }
        self.selected_image = index.min(self.images.len() - 1);
    }

    pub fn next_image(&mut self) {
        if !self.images.is_empty() {
            self.selected_image = (self.selected_image + 1) % self.images.len();
        }
    }

    pub fn prev_image(&mut self) {
        if !self.images.is_empty() {
            self.selected_image = self
                .selected_image
                .checked_sub(1)
                .unwrap_or(self.images.len() - 1);
        }
    }

    pub fn toggle_general_rules(&mut self) {
        self.general_rules_open = !self.general_rules_open;
    }

    pub fn toggle_event_rules(&mut self) {
        self.event_rules_open = !self.event_rules_open;
    }

    pub fn handle_key(&mut self, key: KeyCode) -> OverlayAction {
        match key {
            KeyCode::Esc | KeyCode::Char('x') => return OverlayAction::Close,
            KeyCode::Char('y') => return OverlayAction::Copy,
            KeyCode::Left | KeyCode::Char('h') => self.prev_image(),
            KeyCode::Right | KeyCode::Char('l') => self.next_image(),
            // Thumbnails are numbered from 1
            KeyCode::Char(c @ '1'..='9') => {
                self.select_image(c as usize - '1' as usize);
            }
            KeyCode::Char('g') => self.toggle_general_rules(),
            KeyCode::Char('r') => self.toggle_event_rules(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll.scroll_down(),
            KeyCode::PageUp => self.scroll.page_up(),
            KeyCode::PageDown => self.scroll.page_down(),
            KeyCode::Home => self.scroll.scroll_to_top(),
            _ => {}
        }
        OverlayAction::None
    }
}

/// Rules shown in the event-specific section
pub fn event_rules(event: &Event) -> Vec<&str> {
    let own: Vec<&str> = event
        .rules
        .iter()
        .map(String::as_str)
        .filter(|r| !r.trim().is_empty())
        .collect();
    if own.is_empty() {
        EVENT_RULES.to_vec()
    } else {
        own
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_with_images(n: usize) -> Event {
        let images: Vec<String> = (0..n).map(|i| format!("https://cdn/{}.png", i)).collect();
        serde_json::from_value(json!({ "_id": "e1", "title": "Robo Race", "images": images }))
            .unwrap()
    }

    #[test]
    fn test_open_resets_state() {
        let page = PageScroll::default();
        let event = event_with_images(3);

        let overlay = Overlay::open(0, &event, &page);
        assert_eq!(overlay.selected_image(), 0);
        assert_eq!(overlay.images.len(), 3);
        assert!(!overlay.general_rules_open);
        assert!(!overlay.event_rules_open);
        assert!(!page.is_enabled());
    }

    #[test]
    fn test_select_thumbnail_keeps_overlay_open() {
        let page = PageScroll::default();
        let event = event_with_images(3);
        let mut overlay = Overlay::open(0, &event, &page);

        assert_eq!(overlay.handle_key(KeyCode::Char('3')), OverlayAction::None);
        assert_eq!(overlay.selected_image(), 2);
        assert_eq!(overlay.main_image(), "https://cdn/2.png");

        overlay.select_image(99);
        assert_eq!(overlay.selected_image(), 2);

        overlay.next_image();
        assert_eq!(overlay.selected_image(), 0);
        overlay.prev_image();
        assert_eq!(overlay.selected_image(), 2);
    }

    #[test]
    fn test_empty_gallery() {
        let page = PageScroll::default();
        let event = event_with_images(0);
        let mut overlay = Overlay::open(0, &event, &page);

        overlay.select_image(1);
        overlay.next_image();
        assert_eq!(overlay.selected_image(), 0);
        assert_eq!(overlay.main_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_close_restores_scroll_regardless_of_toggles() {
        let page = PageScroll::default();
        let event = event_with_images(2);
        let mut overlay = Overlay::open(0, &event, &page);

        overlay.handle_key(KeyCode::Char('g'));
        overlay.handle_key(KeyCode::Char('r'));
        overlay.handle_key(KeyCode::Char('g'));
        assert!(!overlay.general_rules_open);
        assert!(overlay.event_rules_open);

        assert_eq!(overlay.handle_key(KeyCode::Esc), OverlayAction::Close);
        drop(overlay);
        assert!(page.is_enabled());
    }

    #[test]
    fn test_reopen_on_other_event_resets_index() {
        let page = PageScroll::default();
        let first = event_with_images(3);
        let mut overlay = Some(Overlay::open(0, &first, &page));
        if let Some(o) = overlay.as_mut() {
            o.select_image(2);
        }

        let second = event_with_images(2);
        overlay = Some(Overlay::open(1, &second, &page));
        assert_eq!(overlay.as_ref().map(Overlay::selected_image), Some(0));

        overlay = None;
        assert!(overlay.is_none());
        assert!(page.is_enabled());
    }

    #[test]
    fn test_event_rules_fallback() {
        let event = event_with_images(0);
        assert_eq!(event_rules(&event), EVENT_RULES.to_vec());

        let event: Event =
            serde_json::from_value(json!({ "rules": ["Bring your own laptop", " "] })).unwrap();
        assert_eq!(event_rules(&event), vec!["Bring your own laptop"]);
    }
}
