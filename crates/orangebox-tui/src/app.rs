//! Event loop, screen switching, and the overlays drawn above screens:
//! the filter line, the delete confirmation, toasts and help.

use std::sync::Arc;
use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use orangebox_core::{ApiClient, AppState, ConfirmationPrompt, PageSize, Product, Provider};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::action::{Action, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader, Rates};
use crate::screen::ScreenId;
use crate::screens::ResourceScreen;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(3);

pub struct App {
    active_screen: ScreenId,
    products: ResourceScreen<Product>,
    providers: ResourceScreen<Provider>,
    running: bool,
    help_visible: bool,
    search_active: bool,
    search_query: String,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    notification: Option<(Notification, Instant)>,
    /// Shown in the status bar.
    api_url: String,
}

impl App {
    pub fn new(client: ApiClient, page_size: PageSize) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let state = Arc::new(AppState::new());
        let api_url = client.base_url().to_string();
        Self {
            active_screen: ScreenId::default(),
            products: ResourceScreen::new(client.clone(), Arc::clone(&state), page_size),
            providers: ResourceScreen::new(client, state, page_size),
            running: true,
            help_visible: false,
            search_active: false,
            search_query: String::new(),
            action_tx,
            action_rx,
            notification: None,
            api_url,
        }
    }

    fn screen(&self, id: ScreenId) -> &dyn Component {
        match id {
            ScreenId::Products => &self.products,
            ScreenId::Providers => &self.providers,
        }
    }

    fn screen_mut(&mut self, id: ScreenId) -> &mut dyn Component {
        match id {
            ScreenId::Products => &mut self.products,
            ScreenId::Providers => &mut self.providers,
        }
    }

    fn active(&self) -> &dyn Component {
        self.screen(self.active_screen)
    }

    fn active_mut(&mut self) -> &mut dyn Component {
        self.screen_mut(self.active_screen)
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        for id in ScreenId::ALL {
            let tx = self.action_tx.clone();
            self.screen_mut(id).init(tx)?;
        }
        self.active_mut().set_focused(true);

        let mut events = EventReader::spawn(Rates::default());
        info!(api_url = %self.api_url, "event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            let action = match event {
                Event::Key(key) => self.handle_key_event(key)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                Event::Tick => Some(Action::Tick),
                Event::Render => Some(Action::Render),
            };
            if let Some(action) = action {
                self.action_tx.send(action)?;
            }

            while let Ok(action) = self.action_rx.try_recv() {
                let render = matches!(action, Action::Render);
                self.process_action(action)?;
                if render {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        tui.exit();
        info!("event loop ended");
        Ok(())
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Priority: Ctrl+C, open form, confirmation, filter line, help,
    /// global keys, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.active().captures_input() {
            return self.active_mut().handle_key_event(key);
        }

        if self.active().prompt().is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.search_active {
            return Ok(match key.code {
                KeyCode::Esc => {
                    self.search_query.clear();
                    self.action_tx.send(Action::SearchInput(String::new()))?;
                    Some(Action::CloseSearch)
                }
                KeyCode::Enter => Some(Action::CloseSearch),
                KeyCode::Backspace => {
                    self.search_query.pop();
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                KeyCode::Char(c) => {
                    self.search_query.push(c);
                    Some(Action::SearchInput(self.search_query.clone()))
                }
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        match key.code {
            KeyCode::Char('q') => return Ok(Some(Action::Quit)),
            KeyCode::Char('?') => return Ok(Some(Action::ToggleHelp)),
            KeyCode::Char('/') => return Ok(Some(Action::OpenSearch)),
            KeyCode::Char(c @ '1'..='9') => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(screen) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(screen)));
                }
            }
            KeyCode::Tab => return Ok(Some(Action::SwitchScreen(self.active_screen.next()))),
            KeyCode::BackTab => return Ok(Some(Action::SwitchScreen(self.active_screen.prev()))),
            _ => {}
        }

        self.active_mut().handle_key_event(key)
    }

    // ── Actions ──────────────────────────────────────────────────────

    fn process_action(&mut self, action: Action) -> Result<()> {
        let follow_up = match action {
            Action::Quit => {
                self.running = false;
                None
            }
            Action::Render | Action::Resize(..) => None,
            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown)| shown.elapsed() > TOAST_TTL)
                {
                    self.notification = None;
                }
                self.active_mut().update(&Action::Tick)?
            }
            Action::SwitchScreen(target) => {
                if target != self.active_screen {
                    debug!("switching screen: {} → {target}", self.active_screen);
                    self.active_mut().set_focused(false);
                    self.active_screen = target;
                    self.active_mut().set_focused(true);
                    self.search_active = false;
                }
                None
            }
            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
                None
            }
            Action::OpenSearch => {
                self.search_active = true;
                self.search_query = self.active().filter().to_owned();
                None
            }
            Action::CloseSearch => {
                self.search_active = false;
                None
            }
            Action::Notify(notification) => {
                self.notification = Some((notification, Instant::now()));
                None
            }
            action @ (Action::SearchInput(_) | Action::ConfirmYes | Action::ConfirmNo) => {
                self.active_mut().update(&action)?
            }

            // Backend results go to the screen that asked, active or not.
            Action::ProductsLoaded(outcome) => self.products.on_loaded(outcome),
            Action::ProvidersLoaded(outcome) => self.providers.on_loaded(outcome),
            Action::ProductDeleted(outcome) => self.products.on_deleted(outcome),
            Action::ProviderDeleted(outcome) => self.providers.on_deleted(outcome),
            Action::ProductSaved(outcome) => self.products.on_saved(outcome),
            Action::ProviderSaved(outcome) => self.providers.on_saved(outcome),
            Action::ProviderOptionsLoaded(result) => {
                self.products.on_provider_options(result);
                None
            }
        };

        if let Some(action) = follow_up {
            self.action_tx.send(action)?;
        }
        Ok(())
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

        self.render_tab_bar(frame, layout[0]);
        self.active().render(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
        if let Some(prompt) = self.active().prompt() {
            render_confirm_dialog(frame, area, &prompt);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles = ScreenId::ALL.iter().map(|&id| {
            Line::from(Span::styled(
                format!(" {} {} ", id.number(), id.label()),
                theme::tab(id == self.active_screen),
            ))
        });
        let selected = ScreenId::ALL
            .iter()
            .position(|&s| s == self.active_screen)
            .unwrap_or(0);
        let tabs = Tabs::new(titles)
            .divider(Span::raw(" "))
            .select(selected);
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if self.search_active {
            Line::from(vec![
                Span::styled(" / ", theme::key_hint_key()),
                Span::styled(self.search_query.as_str(), theme::input(true)),
                Span::styled("█", theme::input(true)),
                Span::styled("  Enter keep  Esc clear", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" ● ", Style::default().fg(theme::ORANGE)),
                Span::styled(self.api_url.as_str(), Style::default().fg(theme::TEXT)),
                Span::styled("  │ / filter  ? help  q quit", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

// ── Overlays ─────────────────────────────────────────────────────────

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn overlay_block(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .title(Span::styled(format!(" {title} "), theme::title()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
        .style(Style::default().bg(theme::BACKDROP))
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, prompt: &ConfirmationPrompt) {
    let dialog = centered(area, 52, 6);
    frame.render_widget(Clear, dialog);
    let block = overlay_block("Confirm", Style::default().fg(theme::AMBER));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let text = vec![
        Line::from(Span::styled(
            format!(" {}", prompt.message),
            Style::default().fg(theme::TEXT),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", theme::key_hint_key()),
            Span::styled("delete    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

/// Bottom-right, above the status bar.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let (color, icon) = match notification.level {
        NotificationLevel::Success => (theme::GREEN, "✓"),
        NotificationLevel::Error => (theme::RED, "✗"),
    };
    let text_width = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = text_width.saturating_add(6).clamp(24, 72).min(area.width);
    let height = 3u16.min(area.height);
    let toast = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    );

    frame.render_widget(Clear, toast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BACKDROP));
    let inner = block.inner(toast);
    frame.render_widget(block, toast);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(notification.message.as_str(), Style::default().fg(theme::TEXT)),
        ])),
        inner,
    );
}

fn help_line(keys: &'static str, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {keys:<12}"), theme::key_hint_key()),
        Span::styled(what, theme::key_hint()),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let panel = centered(area, 52, 20);
    frame.render_widget(Clear, panel);
    let block = overlay_block("Keys", theme::border(true));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let lines = vec![
        help_line("1 / 2, Tab", "Products / Providers"),
        help_line("j/k ↑/↓", "Move selection"),
        help_line("g / G", "First / last row"),
        help_line("[ ] ← →", "Previous / next page"),
        help_line("l", "Page size 5 → 10 → 20"),
        help_line("s", "Sort by next column"),
        help_line("S", "Reverse sort direction"),
        help_line("/", "Filter"),
        help_line("r", "Reload"),
        help_line("a", "Add"),
        help_line("e, Enter", "Edit selected"),
        help_line("d", "Delete selected"),
        Line::from(""),
        help_line("In forms", "Tab/↑↓ move, ←/→ pick provider"),
        help_line("", "Enter save, Esc cancel"),
        Line::from(""),
        help_line("q, Ctrl+C", "Quit"),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use orangebox_core::ClientConfig;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let client = ClientConfig::new(url::Url::parse("http://localhost:8000/api").unwrap())
            .build_client()
            .unwrap();
        App::new(client, PageSize::Five)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn send(app: &mut App, code: KeyCode) {
        if let Some(action) = app.handle_key_event(key(code)).unwrap() {
            app.process_action(action).unwrap();
        }
        while let Ok(action) = app.action_rx.try_recv() {
            app.process_action(action).unwrap();
        }
    }

    #[test]
    fn number_keys_and_tab_switch_screens() {
        let mut app = app();
        send(&mut app, KeyCode::Char('2'));
        assert_eq!(app.active_screen, ScreenId::Providers);
        send(&mut app, KeyCode::Tab);
        assert_eq!(app.active_screen, ScreenId::Products);
        send(&mut app, KeyCode::Char('7'));
        assert_eq!(app.active_screen, ScreenId::Products);
    }

    #[test]
    fn filter_line_feeds_the_active_screen() {
        let mut app = app();
        send(&mut app, KeyCode::Char('/'));
        assert!(app.search_active);
        for c in "bolt".chars() {
            send(&mut app, KeyCode::Char(c));
        }
        send(&mut app, KeyCode::Enter);
        assert!(!app.search_active);
        assert_eq!(app.products.filter(), "bolt");

        // Reopening starts from the current filter; Esc clears it.
        send(&mut app, KeyCode::Char('/'));
        assert_eq!(app.search_query, "bolt");
        send(&mut app, KeyCode::Esc);
        assert_eq!(app.products.filter(), "");
    }

    #[test]
    fn q_quits_but_not_inside_filter() {
        let mut app = app();
        send(&mut app, KeyCode::Char('/'));
        send(&mut app, KeyCode::Char('q'));
        assert!(app.running);
        send(&mut app, KeyCode::Enter);
        send(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn toasts_expire() {
        let mut app = app();
        app.process_action(Action::Notify(Notification::success("Provider added successfully")))
            .unwrap();
        assert!(app.notification.is_some());

        let stale = Instant::now().checked_sub(TOAST_TTL + Duration::from_millis(10));
        if let (Some((_, shown)), Some(stale)) = (app.notification.as_mut(), stale) {
            *shown = stale;
        }
        app.process_action(Action::Tick).unwrap();
        assert!(app.notification.is_none());
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 40, 10);
        assert_eq!(centered(area, 52, 6), Rect::new(0, 2, 40, 6));
    }
}
