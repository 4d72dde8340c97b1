// ── Confirmation gate ──
//
// A yes/no check in front of destructive actions. Holds no state of its
// own: the list controller decides whether it is open.

/// What the user answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Confirm,
    Cancel,
}

/// Message plus open flag, as rendered by a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub open: bool,
    pub message: String,
}

impl ConfirmationPrompt {
    /// Run exactly one of the callbacks for `choice`, or neither when the
    /// prompt is closed.
    pub fn resolve<T>(
        &self,
        choice: PromptChoice,
        on_confirm: impl FnOnce() -> T,
        on_cancel: impl FnOnce() -> T,
    ) -> Option<T> {
        if !self.open {
            return None;
        }
        Some(match choice {
            PromptChoice::Confirm => on_confirm(),
            PromptChoice::Cancel => on_cancel(),
        })
    }
}
