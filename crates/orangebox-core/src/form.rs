// ── Form controller ──
//
// Owns one entity's editable fields and submits them as a create (no id)
// or an update (id present). A successful submit updates the resource
// store in place, resets the fields, records a success message and runs
// the caller's completion callback.

use std::sync::Arc;

use orangebox_api::ApiClient;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::model::{Draft, EntityId, Provider, ProviderOption};
use crate::resource::Resource;
use crate::store::AppState;

/// Submission lifecycle of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Editing,
    Submitting,
    Failed(String),
}

/// A submit ready to run.
#[derive(Debug, Clone)]
pub struct SubmitRequest<R: Resource> {
    draft: R::Draft,
}

impl<R: Resource> SubmitRequest<R> {
    pub fn is_update(&self) -> bool {
        self.draft.id().is_some()
    }

    /// PUT when the draft has an id, POST otherwise.
    pub async fn run(self, client: ApiClient) -> SubmitOutcome<R> {
        let result = match self.draft.id() {
            Some(id) => R::update(&client, id, &self.draft).await,
            None => R::create(&client, &self.draft).await,
        };
        SubmitOutcome {
            updated: self.draft.id().is_some(),
            result,
        }
    }
}

#[derive(Debug)]
pub struct SubmitOutcome<R> {
    updated: bool,
    pub result: Result<R, CoreError>,
}

/// Fetch the full provider list (`per_page=-1`) for the product form's
/// provider picker.
pub async fn load_provider_options(client: &ApiClient) -> Result<Vec<ProviderOption>, CoreError> {
    let records = client.list_all_providers().await?;
    Ok(records
        .into_iter()
        .map(Provider::from)
        .map(|p| ProviderOption::from(&p))
        .collect())
}

pub struct FormController<R: Resource> {
    state: Arc<AppState>,
    draft: R::Draft,
    status: FormStatus,
    success_message: Option<String>,
    provider_options: Vec<ProviderOption>,
}

impl<R: Resource> FormController<R> {
    /// Blank form for a new entity.
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            draft: R::Draft::default(),
            status: FormStatus::Editing,
            success_message: None,
            provider_options: Vec::new(),
        }
    }

    /// Form pre-filled from an existing entity.
    pub fn edit(state: Arc<AppState>, entity: &R) -> Self {
        Self {
            draft: R::Draft::from(entity),
            ..Self::new(state)
        }
    }

    /// Fetch an entity by id and open it for editing.
    pub async fn load(
        state: Arc<AppState>,
        client: &ApiClient,
        id: EntityId,
    ) -> Result<Self, CoreError> {
        let entity = R::fetch_one(client, id).await?;
        Ok(Self::edit(state, &entity))
    }

    /// Mount-time side effects: the product form loads provider choices.
    pub async fn mount(&mut self, client: &ApiClient) -> Result<(), CoreError> {
        if R::Draft::NEEDS_PROVIDER_OPTIONS {
            self.provider_options = load_provider_options(client).await?;
        }
        Ok(())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn draft(&self) -> &R::Draft {
        &self.draft
    }

    pub fn is_edit(&self) -> bool {
        self.draft.id().is_some()
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    /// Consume the transient success message.
    pub fn take_success_message(&mut self) -> Option<String> {
        self.success_message.take()
    }

    pub fn provider_options(&self) -> &[ProviderOption] {
        &self.provider_options
    }

    pub fn set_provider_options(&mut self, options: Vec<ProviderOption>) {
        self.provider_options = options;
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Assign a field from raw text. Numeric fields coerce bad input to 0.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        self.draft.set_field(name, value)?;
        if matches!(self.status, FormStatus::Failed(_)) {
            self.status = FormStatus::Editing;
        }
        Ok(())
    }

    // ── Submission ───────────────────────────────────────────────────

    pub fn begin_submit(&mut self) -> SubmitRequest<R> {
        self.status = FormStatus::Submitting;
        self.success_message = None;
        SubmitRequest {
            draft: self.draft.clone(),
        }
    }

    /// Apply a finished submit; `on_complete` runs only on success.
    pub fn finish_submit(
        &mut self,
        outcome: SubmitOutcome<R>,
        on_complete: impl FnOnce(&R),
    ) -> Result<R, CoreError> {
        match outcome.result {
            Ok(entity) => {
                let store = R::store(&self.state);
                let verb = if outcome.updated {
                    store.replace_by_id(entity.clone());
                    "updated"
                } else {
                    store.append(entity.clone());
                    "added"
                };
                let message = format!("{} {verb} successfully", R::SINGULAR);
                info!(resource = R::PLURAL, id = %entity.id(), "{message}");

                self.draft = R::Draft::default();
                self.status = FormStatus::Editing;
                self.success_message = Some(message);
                on_complete(&entity);
                Ok(entity)
            }
            Err(e) => {
                warn!(resource = R::PLURAL, error = %e, "submit failed");
                self.status = FormStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit inline: create or update, then apply.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        on_complete: impl FnOnce(&R),
    ) -> Result<R, CoreError> {
        let outcome = self.begin_submit().run(client.clone()).await;
        self.finish_submit(outcome, on_complete)
    }
}
