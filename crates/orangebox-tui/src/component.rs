//! The interface every screen implements.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use orangebox_core::ConfirmationPrompt;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// Lifecycle: `init` → (`handle_key_event` | `update` | `render`)*
pub trait Component: Send {
    /// Called once, inside the runtime, with the loop's action sender.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// React to a dispatched action. May return a follow-up.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    fn set_focused(&mut self, _focused: bool) {}

    /// True while the component owns the keyboard (an open form), so
    /// global keys must not be intercepted.
    fn captures_input(&self) -> bool {
        false
    }

    /// Confirmation the app should show over everything else.
    fn prompt(&self) -> Option<ConfirmationPrompt> {
        None
    }

    /// Current filter text, used to pre-fill the search line.
    fn filter(&self) -> &str {
        ""
    }
}
