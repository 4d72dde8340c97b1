//! Everything that changes TUI state travels through the loop as an
//! [`Action`], including results of spawned backend calls.

use orangebox_core::{
    DeleteOutcome, FetchOutcome, Product, Provider, ProviderOption, SubmitOutcome,
};

use crate::screen::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

#[derive(Debug)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    ToggleHelp,

    // ── Filter input ──────────────────────────────────────────────
    OpenSearch,
    SearchInput(String),
    CloseSearch,

    // ── Delete confirmation ───────────────────────────────────────
    ConfirmYes,
    ConfirmNo,

    // ── Toasts ────────────────────────────────────────────────────
    Notify(Notification),

    // ── Backend results ───────────────────────────────────────────
    ProductsLoaded(FetchOutcome<Product>),
    ProvidersLoaded(FetchOutcome<Provider>),
    ProductDeleted(DeleteOutcome),
    ProviderDeleted(DeleteOutcome),
    ProductSaved(SubmitOutcome<Product>),
    ProviderSaved(SubmitOutcome<Provider>),
    ProviderOptionsLoaded(Result<Vec<ProviderOption>, String>),
}
