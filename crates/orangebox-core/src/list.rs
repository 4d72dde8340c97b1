// ── List controller ──
//
// Owns one list view's query state, load state and delete-confirmation
// state. Every query change hands back a self-contained `FetchRequest`
// the front-end runs (inline or on a spawned task); its outcome is fed
// back through `apply_fetch`. Outcomes carry a sequence number so a slow
// response can never overwrite a newer one.

use std::marker::PhantomData;
use std::sync::Arc;

use orangebox_api::{ApiClient, ListParams};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::model::{EntityId, Page, PageInfo};
use crate::prompt::ConfirmationPrompt;
use crate::query::{PageSize, QueryState};
use crate::resource::Resource;
use crate::store::{AppState, Slice};

/// Fetch lifecycle of a list view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    /// Last fetch failed; the previous rows are still shown.
    Failed(String),
}

/// Delete-confirmation lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptState {
    #[default]
    Closed,
    ConfirmPending { id: EntityId },
}

// ── Requests & outcomes ─────────────────────────────────────────────

/// A list fetch ready to run.
#[derive(Debug, Clone)]
pub struct FetchRequest<R> {
    seq: u64,
    params: ListParams,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> FetchRequest<R> {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn params(&self) -> &ListParams {
        &self.params
    }

    /// Issue the GET. Owns everything it needs, so it can be spawned.
    pub async fn run(self, client: ApiClient) -> FetchOutcome<R> {
        let result = R::list(&client, &self.params).await;
        FetchOutcome {
            seq: self.seq,
            result,
        }
    }
}

#[derive(Debug)]
pub struct FetchOutcome<R> {
    pub seq: u64,
    pub result: Result<Page<R>, CoreError>,
}

/// A confirmed delete ready to run.
#[derive(Debug, Clone)]
pub struct DeleteRequest<R> {
    id: EntityId,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> DeleteRequest<R> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub async fn run(self, client: ApiClient) -> DeleteOutcome {
        let result = R::delete(&client, self.id).await;
        DeleteOutcome {
            id: self.id,
            result,
        }
    }
}

#[derive(Debug)]
pub struct DeleteOutcome {
    pub id: EntityId,
    pub result: Result<(), CoreError>,
}

// ── Controller ──────────────────────────────────────────────────────

pub struct ListController<R: Resource> {
    state: Arc<AppState>,
    query: QueryState<R::SortField>,
    load: LoadState,
    prompt: PromptState,
    /// Sequence number of the most recently issued fetch.
    latest_seq: u64,
}

impl<R: Resource> ListController<R> {
    pub fn new(state: Arc<AppState>) -> Self {
        Self::with_query(state, QueryState::default())
    }

    pub fn with_query(state: Arc<AppState>, query: QueryState<R::SortField>) -> Self {
        Self {
            state,
            query,
            load: LoadState::Idle,
            prompt: PromptState::Closed,
            latest_seq: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn query(&self) -> &QueryState<R::SortField> {
        &self.query
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn prompt_state(&self) -> PromptState {
        self.prompt
    }

    pub fn pending_delete(&self) -> Option<EntityId> {
        match self.prompt {
            PromptState::ConfirmPending { id } => Some(id),
            PromptState::Closed => None,
        }
    }

    /// The confirmation gate for the pending delete, if any.
    pub fn prompt(&self) -> ConfirmationPrompt {
        ConfirmationPrompt {
            open: self.pending_delete().is_some(),
            message: format!("Are you sure you want to delete this {}?", R::noun()),
        }
    }

    /// Rows currently shown, in backend order, with their page metadata.
    pub fn snapshot(&self) -> Arc<Slice<R>> {
        R::store(&self.state).snapshot()
    }

    /// Follow the displayed rows as fetches, deletes and saves land.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Slice<R>>> {
        R::store(&self.state).subscribe()
    }

    pub fn page_info(&self) -> PageInfo {
        R::store(&self.state).page_info()
    }

    // ── Query operations ─────────────────────────────────────────────
    //
    // Each returns exactly one fetch.

    /// Fetch with the current query (initial load, manual refresh).
    pub fn reload(&mut self) -> FetchRequest<R> {
        self.issue()
    }

    /// Sent as given; the backend decides what an out-of-range page means.
    pub fn set_page(&mut self, page: u32) -> FetchRequest<R> {
        self.query.page = page;
        self.issue()
    }

    /// Keeps the current page number.
    pub fn set_page_size(&mut self, size: PageSize) -> FetchRequest<R> {
        self.query.page_size = size;
        self.issue()
    }

    pub fn toggle_sort(&mut self, field: R::SortField) -> FetchRequest<R> {
        self.query.toggle_sort(field);
        self.issue()
    }

    pub fn set_filter(&mut self, text: impl Into<String>) -> FetchRequest<R> {
        self.query.filter = text.into();
        self.issue()
    }

    /// Next page, only when the backend advertised one.
    pub fn next_page(&mut self) -> Option<FetchRequest<R>> {
        if !self.page_info().has_next {
            return None;
        }
        let page = self.query.page.saturating_add(1);
        Some(self.set_page(page))
    }

    /// Previous page, only when the backend advertised one.
    pub fn prev_page(&mut self) -> Option<FetchRequest<R>> {
        if !self.page_info().has_prev {
            return None;
        }
        let page = self.query.page.saturating_sub(1);
        Some(self.set_page(page))
    }

    fn issue(&mut self) -> FetchRequest<R> {
        self.latest_seq += 1;
        self.load = LoadState::Loading;
        let params = self.query.to_params();
        debug!(resource = R::PLURAL, seq = self.latest_seq, ?params, "list fetch issued");
        FetchRequest {
            seq: self.latest_seq,
            params,
            _resource: PhantomData,
        }
    }

    /// Apply a finished fetch.
    ///
    /// Returns `Ok(true)` when the store was replaced, `Ok(false)` when the
    /// outcome was stale and dropped, and the error when the latest fetch
    /// failed (the list is then in [`LoadState::Failed`] and keeps its rows).
    pub fn apply_fetch(&mut self, outcome: FetchOutcome<R>) -> Result<bool, CoreError> {
        if outcome.seq != self.latest_seq {
            debug!(
                resource = R::PLURAL,
                seq = outcome.seq,
                latest = self.latest_seq,
                "dropping stale list response"
            );
            return Ok(false);
        }

        match outcome.result {
            Ok(page) => {
                R::store(&self.state).replace_all(page.items, page.info);
                self.load = LoadState::Idle;
                Ok(true)
            }
            Err(e) => {
                warn!(resource = R::PLURAL, error = %e, "list fetch failed");
                self.load = LoadState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Run a fetch inline and apply it.
    pub async fn execute(
        &mut self,
        client: &ApiClient,
        request: FetchRequest<R>,
    ) -> Result<bool, CoreError> {
        let outcome = request.run(client.clone()).await;
        self.apply_fetch(outcome)
    }

    // ── Delete workflow ──────────────────────────────────────────────

    /// Open the confirmation prompt for `id`. No network call.
    pub fn request_delete(&mut self, id: EntityId) {
        debug!(resource = R::PLURAL, %id, "delete requested");
        self.prompt = PromptState::ConfirmPending { id };
    }

    /// Close the prompt and hand back the delete to run, if one was pending.
    pub fn confirm_delete(&mut self) -> Option<DeleteRequest<R>> {
        let id = self.pending_delete()?;
        self.prompt = PromptState::Closed;
        Some(DeleteRequest {
            id,
            _resource: PhantomData,
        })
    }

    /// Close the prompt without deleting anything.
    pub fn cancel_delete(&mut self) {
        if let Some(id) = self.pending_delete() {
            debug!(resource = R::PLURAL, %id, "delete cancelled");
        }
        self.prompt = PromptState::Closed;
    }

    /// Apply a finished delete. The row is removed only on success.
    pub fn apply_delete(&mut self, outcome: DeleteOutcome) -> Result<(), CoreError> {
        match outcome.result {
            Ok(()) => {
                R::store(&self.state).remove_by_id(outcome.id);
                info!(resource = R::PLURAL, id = %outcome.id, "deleted");
                Ok(())
            }
            Err(e) => {
                warn!(resource = R::PLURAL, id = %outcome.id, error = %e, "delete failed");
                Err(e)
            }
        }
    }

    /// Confirm and run the pending delete inline. `Ok(false)` when nothing
    /// was pending.
    pub async fn execute_delete(&mut self, client: &ApiClient) -> Result<bool, CoreError> {
        let Some(request) = self.confirm_delete() else {
            return Ok(false);
        };
        let outcome = request.run(client.clone()).await;
        self.apply_delete(outcome).map(|()| true)
    }
}
