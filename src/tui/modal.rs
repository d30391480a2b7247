// Modal dialogs drawn over the current view
//
// Modals handle their own input and return an action; App holds
// Option<Modal> and the input layer acts on the returned ModalAction.
// The event detail overlay is not a Modal: it belongs to the listing.

use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Close,
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    /// Copy the log panel contents
    Copy,
    /// Empty the log buffer
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Captured application logs
    Logs,
}

impl Modal {
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Logs => match key {
                KeyCode::Esc | KeyCode::Char('L') | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Up | KeyCode::Char('k') => ModalAction::ScrollUp,
                KeyCode::Down | KeyCode::Char('j') => ModalAction::ScrollDown,
                KeyCode::Home => ModalAction::ScrollTop,
                KeyCode::End => ModalAction::ScrollBottom,
                KeyCode::Char('y') => ModalAction::Copy,
                KeyCode::Char('c') => ModalAction::Clear,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_closes() {
        assert_eq!(Modal::Help.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert_eq!(Modal::Help.handle_input(KeyCode::Down), ModalAction::None);
    }

    #[test]
    fn test_logs_actions() {
        assert_eq!(Modal::Logs.handle_input(KeyCode::Char('j')), ModalAction::ScrollDown);
        assert_eq!(Modal::Logs.handle_input(KeyCode::End), ModalAction::ScrollBottom);
        assert_eq!(Modal::Logs.handle_input(KeyCode::Char('y')), ModalAction::Copy);
        assert_eq!(Modal::Logs.handle_input(KeyCode::Char('c')), ModalAction::Clear);
        assert_eq!(Modal::Logs.handle_input(KeyCode::Esc), ModalAction::Close);
    }
}
