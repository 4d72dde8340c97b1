//! Table screen for one resource: sortable headers, filter, paging,
//! delete confirmation and the add/edit overlay.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use orangebox_core::{
    ApiClient, AppState, ConfirmationPrompt, DeleteOutcome, DeleteRequest, Draft, FetchOutcome,
    FetchRequest, ListController, LoadState, PageSize, PromptChoice, ProviderOption, QueryState,
    Slice, SortField, SubmitOutcome, SubmitRequest, load_provider_options,
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
};
use throbber_widgets_tui::{Throbber, ThrobberState};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::TableResource;
use super::form::{FormKey, FormOverlay};
use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;

/// Sortable columns in display order.
pub(crate) fn sort_columns<F: SortField>() -> Vec<F> {
    F::iter().collect()
}

pub struct ResourceScreen<R: TableResource> {
    client: ApiClient,
    state: Arc<AppState>,
    list: ListController<R>,
    /// Store snapshots for this resource; a change re-clamps the cursor.
    rows: watch::Receiver<Arc<Slice<R>>>,
    table_state: TableState,
    form: Option<FormOverlay<R>>,
    throbber: ThrobberState,
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
}

impl<R: TableResource> ResourceScreen<R> {
    pub fn new(client: ApiClient, state: Arc<AppState>, page_size: PageSize) -> Self {
        let query = QueryState {
            page_size,
            ..QueryState::default()
        };
        let list = ListController::with_query(Arc::clone(&state), query);
        Self {
            client,
            rows: list.subscribe(),
            list,
            state,
            table_state: TableState::default(),
            form: None,
            throbber: ThrobberState::default(),
            focused: false,
            action_tx: None,
        }
    }

    // ── Backend calls ────────────────────────────────────────────────
    //
    // Each runs on its own task and reports back through the action loop.

    fn spawn_fetch(&self, request: FetchRequest<R>) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let outcome = request.run(client).await;
            let _ = tx.send(R::loaded(outcome));
        });
    }

    fn spawn_delete(&self, request: DeleteRequest<R>) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let outcome = request.run(client).await;
            let _ = tx.send(R::deleted(outcome));
        });
    }

    fn spawn_submit(&self, request: SubmitRequest<R>) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let outcome = request.run(client).await;
            let _ = tx.send(R::saved(outcome));
        });
    }

    fn spawn_provider_options(&self) {
        let Some(tx) = self.action_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let result = load_provider_options(&client)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(Action::ProviderOptionsLoaded(result));
        });
    }

    fn reload(&mut self) {
        let request = self.list.reload();
        self.spawn_fetch(request);
    }

    // ── Selection ────────────────────────────────────────────────────

    fn rows(&self) -> Arc<Slice<R>> {
        Arc::clone(&self.rows.borrow())
    }

    fn selected(&self) -> Option<R> {
        let index = self.table_state.selected()?;
        self.rows.borrow().items.get(index).cloned()
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.rows.borrow().items.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.table_state.select(Some(next));
    }

    /// Keep the cursor on a row after the page changed underneath it.
    fn sync_rows(&mut self) {
        if !self.rows.has_changed().unwrap_or(false) {
            return;
        }
        let len = self.rows.borrow_and_update().items.len();
        let selected = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.table_state.select(selected);
    }

    // ── Query changes ────────────────────────────────────────────────

    /// Move the sort to the next column (ascending).
    fn sort_next_column(&mut self) {
        let columns = sort_columns::<R::SortField>();
        let current = self.list.query().sort_field;
        let position = columns.iter().position(|&c| c == current).unwrap_or(0);
        let next = columns[(position + 1) % columns.len()];
        let request = self.list.toggle_sort(next);
        self.spawn_fetch(request);
    }

    /// Flip the direction of the current sort column.
    fn sort_flip(&mut self) {
        let current = self.list.query().sort_field;
        let request = self.list.toggle_sort(current);
        self.spawn_fetch(request);
    }

    fn cycle_page_size(&mut self) {
        let size = self.list.query().page_size.next();
        let request = self.list.set_page_size(size);
        self.spawn_fetch(request);
    }

    fn apply_filter(&mut self, text: &str) {
        if self.list.query().filter == text {
            return;
        }
        let request = self.list.set_filter(text);
        self.spawn_fetch(request);
    }

    // ── Form ─────────────────────────────────────────────────────────

    fn open_form(&mut self, form: FormOverlay<R>) {
        self.form = Some(form);
        if <R::Draft as Draft>::NEEDS_PROVIDER_OPTIONS {
            self.spawn_provider_options();
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.handle_key(key) {
            FormKey::Handled => {}
            FormKey::Cancel => self.form = None,
            FormKey::Submit => {
                let request = form.begin_submit();
                self.spawn_submit(request);
            }
        }
    }

    // ── Results from the backend ─────────────────────────────────────

    pub fn on_loaded(&mut self, outcome: FetchOutcome<R>) -> Option<Action> {
        match self.list.apply_fetch(outcome) {
            Ok(_) => {
                self.sync_rows();
                None
            }
            Err(e) => Some(Action::Notify(Notification::error(format!(
                "Could not load {}: {e}",
                R::PLURAL
            )))),
        }
    }

    /// Deleted rows are followed by a reload so the page refills.
    pub fn on_deleted(&mut self, outcome: DeleteOutcome) -> Option<Action> {
        let id = outcome.id;
        match self.list.apply_delete(outcome) {
            Ok(()) => {
                self.sync_rows();
                self.reload();
                Some(Action::Notify(Notification::success(format!(
                    "{} {id} deleted",
                    R::SINGULAR
                ))))
            }
            Err(e) => Some(Action::Notify(Notification::error(format!(
                "Could not delete {} {id}: {e}",
                R::noun()
            )))),
        }
    }

    pub fn on_saved(&mut self, outcome: SubmitOutcome<R>) -> Option<Action> {
        let Some(form) = self.form.as_mut() else {
            warn!(resource = R::PLURAL, "submit finished with no open form");
            return None;
        };
        match form.finish(outcome) {
            Ok(message) => {
                self.form = None;
                self.reload();
                Some(Action::Notify(Notification::success(message)))
            }
            Err(message) => Some(Action::Notify(Notification::error(message))),
        }
    }

    pub fn on_provider_options(&mut self, result: Result<Vec<ProviderOption>, String>) {
        if let Some(form) = self.form.as_mut() {
            form.set_provider_options(result);
        }
    }

    fn resolve_prompt(&mut self, choice: PromptChoice) {
        match self.list.prompt().resolve(choice, || true, || false) {
            Some(true) => {
                if let Some(request) = self.list.confirm_delete() {
                    debug!(resource = R::PLURAL, id = %request.id(), "delete confirmed");
                    self.spawn_delete(request);
                }
            }
            Some(false) => self.list.cancel_delete(),
            None => {}
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn header(&self) -> Row<'static> {
        let query = self.list.query();
        let cells = sort_columns::<R::SortField>().into_iter().map(|column| {
            if column == query.sort_field {
                Cell::from(format!("{} {}", column.label(), query.direction.arrow()))
                    .style(theme::table_header_sorted())
            } else {
                Cell::from(column.label()).style(theme::table_header())
            }
        });
        Row::new(cells)
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let rows = self.rows();
        if rows.items.is_empty() && self.list.load_state() != &LoadState::Loading {
            let filter = &self.list.query().filter;
            let message = if filter.is_empty() {
                format!("No {} yet. Press a to add one.", R::PLURAL)
            } else {
                format!("No {} match \"{filter}\".", R::PLURAL)
            };
            let layout = Layout::vertical([Constraint::Length(2), Constraint::Length(1)]).split(area);
            frame.render_widget(Paragraph::new(Line::from(self.header_spans())), layout[0]);
            frame.render_widget(
                Paragraph::new(Span::styled(format!("  {message}"), theme::key_hint())),
                layout[1],
            );
            return;
        }

        let selected = self.table_state.selected();
        let table_rows = rows.items.iter().enumerate().map(|(i, item)| {
            let is_selected = selected == Some(i);
            let mut cells = item.cells();
            if let Some(first) = cells.first_mut() {
                let marker = if is_selected { "▸" } else { " " };
                *first = format!("{marker}{first}");
            }
            let style = if is_selected {
                theme::table_selected()
            } else {
                theme::table_row()
            };
            Row::new(cells).style(style)
        });

        let table = Table::new(table_rows, R::widths())
            .header(self.header().bottom_margin(1))
            .row_highlight_style(theme::table_selected());

        let mut state = self.table_state;
        frame.render_stateful_widget(table, area, &mut state);
    }

    /// Header text for the empty-table view, where there is no `Table`.
    fn header_spans(&self) -> Vec<Span<'static>> {
        let query = self.list.query();
        sort_columns::<R::SortField>()
            .into_iter()
            .map(|column| {
                if column == query.sort_field {
                    Span::styled(
                        format!(" {} {} ", column.label(), query.direction.arrow()),
                        theme::table_header_sorted(),
                    )
                } else {
                    Span::styled(format!(" {} ", column.label()), theme::table_header())
                }
            })
            .collect()
    }

    /// Summary, query description, and the loading or error indicator.
    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let query = self.list.query();
        let mut details = format!(
            "  page {} · {}/page · sort {} {}",
            query.page,
            query.page_size,
            query.sort_field.label(),
            query.direction.arrow()
        );
        if !query.filter.is_empty() {
            details.push_str(&format!(" · filter \"{}\"", query.filter));
        }
        let summary = self.list.page_info().summary();

        match self.list.load_state() {
            LoadState::Loading => {
                let throbber = Throbber::default()
                    .label(format!("{summary}{details}"))
                    .style(Style::default().fg(theme::TEXT))
                    .throbber_style(Style::default().fg(theme::ORANGE));
                frame.render_stateful_widget(throbber, area, &mut self.throbber.clone());
            }
            LoadState::Failed(message) => {
                let line = Line::from(vec![
                    Span::styled(format!("✗ {message}  "), theme::error()),
                    Span::styled(summary, Style::default().fg(theme::TEXT)),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            LoadState::Idle => {
                let line = Line::from(vec![
                    Span::styled(summary, Style::default().fg(theme::TEXT)),
                    Span::styled(details, theme::key_hint()),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
        }
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let info = self.list.page_info();
        let mut spans = vec![
            Span::styled(" a ", theme::key_hint_key()),
            Span::styled("add  ", theme::key_hint()),
            Span::styled("e ", theme::key_hint_key()),
            Span::styled("edit  ", theme::key_hint()),
            Span::styled("d ", theme::key_hint_key()),
            Span::styled("delete  ", theme::key_hint()),
            Span::styled("s/S ", theme::key_hint_key()),
            Span::styled("sort  ", theme::key_hint()),
            Span::styled("l ", theme::key_hint_key()),
            Span::styled("page size  ", theme::key_hint()),
        ];
        if info.has_prev {
            spans.push(Span::styled("[ ", theme::key_hint_key()));
            spans.push(Span::styled("prev  ", theme::key_hint()));
        }
        if info.has_next {
            spans.push(Span::styled("] ", theme::key_hint_key()));
            spans.push(Span::styled("next  ", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl<R: TableResource> Component for ResourceScreen<R> {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        self.reload();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.form.is_some() {
            self.handle_form_key(key);
            return Ok(None);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.table_state.select_first(),
            KeyCode::Char('G') | KeyCode::End => {
                let last = self.rows.borrow().items.len().checked_sub(1);
                self.table_state.select(last);
            }
            KeyCode::Char(']') | KeyCode::Right => {
                if let Some(request) = self.list.next_page() {
                    self.spawn_fetch(request);
                }
            }
            KeyCode::Char('[') | KeyCode::Left => {
                if let Some(request) = self.list.prev_page() {
                    self.spawn_fetch(request);
                }
            }
            KeyCode::Char('l') => self.cycle_page_size(),
            KeyCode::Char('s') => self.sort_next_column(),
            KeyCode::Char('S') => self.sort_flip(),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('a') => {
                self.open_form(FormOverlay::create(Arc::clone(&self.state)));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(entity) = self.selected() {
                    self.open_form(FormOverlay::edit(Arc::clone(&self.state), &entity));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(entity) = self.selected() {
                    self.list.request_delete(entity.id());
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        self.sync_rows();
        match action {
            Action::Tick => {
                let busy = self.list.load_state() == &LoadState::Loading
                    || self.form.as_ref().is_some_and(FormOverlay::is_submitting);
                if busy {
                    self.throbber.calc_next();
                }
            }
            Action::SearchInput(text) => self.apply_filter(text),
            Action::ConfirmYes => self.resolve_prompt(PromptChoice::Confirm),
            Action::ConfirmNo => self.resolve_prompt(PromptChoice::Cancel),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(Span::styled(format!(" {} ", R::SCREEN.label()), theme::title()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border(self.focused));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        self.render_table(frame, layout[0]);
        self.render_status(frame, layout[1]);
        self.render_hints(frame, layout[2]);

        if let Some(form) = &self.form {
            form.render(frame, area);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_input(&self) -> bool {
        self.form.is_some()
    }

    fn prompt(&self) -> Option<ConfirmationPrompt> {
        let prompt = self.list.prompt();
        prompt.open.then_some(prompt)
    }

    fn filter(&self) -> &str {
        &self.list.query().filter
    }
}
