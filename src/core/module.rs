//! Module trait for the panels swapped into the content region

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

use super::{Action, Context};

/// A self-contained panel with its own state
pub trait Module {
    /// Stable identifier, used in logs
    fn id(&self) -> &'static str;

    /// Called each time the panel becomes the visible one
    fn activate(&mut self, _ctx: &Context) -> Action {
        Action::None
    }

    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action;

    /// Draw into `area`
    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context);
}
