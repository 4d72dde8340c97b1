//! Add/edit form drawn over a table screen.
//!
//! Text fields are plain `String` buffers mirrored into the
//! [`FormController`] on every keystroke. The product form's
//! `provider_id` becomes a picker once the provider list has loaded.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use orangebox_core::{
    AppState, Draft, EntityId, FormController, FormStatus, ProviderOption, SubmitOutcome,
    SubmitRequest, field_label,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tracing::{debug, warn};

use super::TableResource;
use crate::theme;

const PROVIDER_FIELD: &str = "provider_id";

/// What a key press asks the owning screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKey {
    Handled,
    Cancel,
    Submit,
}

/// Provider choices for the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Options {
    Unused,
    Loading,
    Failed(String),
    Ready,
}

pub struct FormOverlay<R: TableResource> {
    controller: FormController<R>,
    inputs: Vec<String>,
    active: usize,
    options: Options,
    choice: Option<usize>,
}

fn fields<R: TableResource>() -> &'static [&'static str] {
    <R::Draft as Draft>::FIELDS
}

impl<R: TableResource> FormOverlay<R> {
    /// Blank form. Inputs start empty rather than showing coerced zeros.
    pub fn create(state: Arc<AppState>) -> Self {
        Self::with_controller(FormController::new(state), false)
    }

    pub fn edit(state: Arc<AppState>, entity: &R) -> Self {
        Self::with_controller(FormController::edit(state, entity), true)
    }

    fn with_controller(controller: FormController<R>, prefill: bool) -> Self {
        let inputs = fields::<R>()
            .iter()
            .map(|name| {
                if prefill {
                    controller.draft().field(name).unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .collect();
        let options = if <R::Draft as Draft>::NEEDS_PROVIDER_OPTIONS {
            Options::Loading
        } else {
            Options::Unused
        };
        Self {
            controller,
            inputs,
            active: 0,
            options,
            choice: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.controller.status() == &FormStatus::Submitting
    }

    fn field_name(&self, index: usize) -> &'static str {
        fields::<R>().get(index).copied().unwrap_or_default()
    }

    fn is_picker(&self, index: usize) -> bool {
        self.options == Options::Ready && self.field_name(index) == PROVIDER_FIELD
    }

    /// Install the provider list, selecting the draft's current provider.
    pub fn set_provider_options(&mut self, result: Result<Vec<ProviderOption>, String>) {
        match result {
            Ok(options) => {
                let current = self
                    .controller
                    .draft()
                    .field(PROVIDER_FIELD)
                    .and_then(|raw| raw.parse::<EntityId>().ok());
                self.choice = current.and_then(|id| options.iter().position(|o| o.id == id));
                self.controller.set_provider_options(options);
                self.options = Options::Ready;
            }
            Err(message) => {
                warn!(error = %message, "provider options unavailable; falling back to id input");
                self.options = Options::Failed(message);
            }
        }
    }

    fn assign(&mut self, index: usize) {
        let name = self.field_name(index);
        let value = self.inputs.get(index).cloned().unwrap_or_default();
        if let Err(e) = self.controller.set_field(name, &value) {
            warn!(field = name, error = %e, "form rejected field");
        }
    }

    fn pick(&mut self, step: isize) {
        let len = self.controller.provider_options().len();
        if len == 0 {
            return;
        }
        let next = match self.choice {
            None if step < 0 => len - 1,
            None => 0,
            Some(i) => (i + len).wrapping_add_signed(step) % len,
        };
        self.choice = Some(next);
        let id = self.controller.provider_options()[next].id;
        if let Some(input) = self.inputs.get_mut(self.active) {
            *input = id.to_string();
        }
        self.assign(self.active);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormKey {
        if self.is_submitting() {
            return FormKey::Handled;
        }
        let count = self.inputs.len();
        match key.code {
            KeyCode::Esc => return FormKey::Cancel,
            KeyCode::Enter => return FormKey::Submit,
            KeyCode::Tab | KeyCode::Down => self.active = (self.active + 1) % count,
            KeyCode::BackTab | KeyCode::Up => self.active = (self.active + count - 1) % count,
            KeyCode::Left if self.is_picker(self.active) => self.pick(-1),
            KeyCode::Right | KeyCode::Char(' ') if self.is_picker(self.active) => self.pick(1),
            KeyCode::Backspace => {
                if let Some(input) = self.inputs.get_mut(self.active) {
                    input.pop();
                }
                self.assign(self.active);
            }
            KeyCode::Char(c) if !self.is_picker(self.active) => {
                if let Some(input) = self.inputs.get_mut(self.active) {
                    input.push(c);
                }
                self.assign(self.active);
            }
            _ => {}
        }
        FormKey::Handled
    }

    pub fn begin_submit(&mut self) -> SubmitRequest<R> {
        self.controller.begin_submit()
    }

    /// Apply a finished submit: the success message, or the error text.
    pub fn finish(&mut self, outcome: SubmitOutcome<R>) -> Result<String, String> {
        match self
            .controller
            .finish_submit(outcome, |entity| debug!(id = %entity.id(), "form closed after save"))
        {
            Ok(_) => Ok(self
                .controller
                .take_success_message()
                .unwrap_or_else(|| format!("{} saved", R::SINGULAR))),
            Err(e) => Err(e.to_string()),
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn title(&self) -> String {
        match self.controller.draft().id() {
            Some(id) => format!(" Edit {} #{id} ", R::SINGULAR),
            None => format!(" Add {} ", R::SINGULAR),
        }
    }

    fn value_line(&self, index: usize, active: bool) -> Line<'_> {
        let name = self.field_name(index);
        let text = self.inputs.get(index).map_or("", String::as_str);

        if name == PROVIDER_FIELD {
            match &self.options {
                Options::Ready => {
                    let label = self
                        .choice
                        .and_then(|i| self.controller.provider_options().get(i))
                        .map_or("(choose a provider)", |o| o.name.as_str());
                    return Line::from(vec![
                        Span::styled("◂ ", theme::key_hint()),
                        Span::styled(label.to_owned(), theme::input(active)),
                        Span::styled(" ▸", theme::key_hint()),
                    ]);
                }
                Options::Loading if text.is_empty() => {
                    return Line::from(Span::styled("loading providers…", theme::key_hint()));
                }
                _ => {}
            }
        }

        let cursor = if active { "█" } else { "" };
        Line::from(Span::styled(format!("{text}{cursor}"), theme::input(active)))
    }

    fn status_line(&self) -> Line<'_> {
        if let Options::Failed(message) = &self.options {
            if self.controller.status() == &FormStatus::Editing {
                return Line::from(Span::styled(
                    format!("Providers unavailable ({message}); enter an id"),
                    theme::error(),
                ));
            }
        }
        match self.controller.status() {
            FormStatus::Editing => Line::from(vec![
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Tab ", theme::key_hint_key()),
                Span::styled("next field  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
            FormStatus::Submitting => Line::from(Span::styled("Saving…", theme::input(true))),
            FormStatus::Failed(message) => {
                Line::from(Span::styled(format!("✗ {message}"), theme::error()))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let count = u16::try_from(self.inputs.len()).unwrap_or(u16::MAX);
        let width = 64u16.min(area.width.saturating_sub(4));
        let height = count.saturating_mul(3).saturating_add(4).min(area.height);
        let panel = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
        );

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(Span::styled(self.title(), theme::title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(true))
            .style(Style::default().bg(theme::BACKDROP));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let mut rows: Vec<Constraint> = (0..self.inputs.len())
            .map(|_| Constraint::Length(3))
            .collect();
        rows.push(Constraint::Min(0));
        rows.push(Constraint::Length(1));
        let layout = Layout::vertical(rows).split(inner);

        for (index, slot) in layout.iter().take(self.inputs.len()).enumerate() {
            let active = index == self.active;
            let field = Block::default()
                .title(Span::styled(
                    format!(" {} ", field_label(self.field_name(index))),
                    theme::input(active),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(theme::border(active));
            let field_inner = field.inner(*slot);
            frame.render_widget(field, *slot);
            frame.render_widget(Paragraph::new(self.value_line(index, active)), field_inner);
        }

        if let Some(status) = layout.last() {
            frame.render_widget(Paragraph::new(self.status_line()), *status);
        }
    }
}
