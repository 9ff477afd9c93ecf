//! Transaction and Form Status
//!
//! The transaction status is shared by every component of a checkout session.
//! Payment methods trigger its transitions; the host renders from it. The form
//! status is derived from it on each transition and gates user input.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::cell::StateCell;

/// Lifecycle of a single payment attempt
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum TransactionStatus {
    #[default]
    NotStarted,
    Pending,
    Redirecting {
        url: String,
    },
    Error {
        message: String,
    },
    Complete,
}

impl TransactionStatus {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn redirect_url(&self) -> Option<&str> {
        match self {
            Self::Redirecting { url } => Some(url),
            _ => None,
        }
    }
}

/// Whether the checkout form accepts input
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    Loading,
    #[default]
    Ready,
    Validating,
    Submitting,
    Complete,
}

impl FormStatus {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl From<&TransactionStatus> for FormStatus {
    fn from(status: &TransactionStatus) -> Self {
        match status {
            TransactionStatus::NotStarted | TransactionStatus::Error { .. } => Self::Ready,
            TransactionStatus::Pending | TransactionStatus::Redirecting { .. } => Self::Submitting,
            TransactionStatus::Complete => Self::Complete,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct StatusState {
    transaction: TransactionStatus,
    form: FormStatus,
}

/// Shared status of one checkout session.
///
/// Cloning yields another handle to the same state.
#[derive(Clone, Debug, Default)]
pub struct TransactionTracker {
    state: Arc<StateCell<StatusState>>,
}

impl TransactionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn transition(&self, next: TransactionStatus) {
        tracing::debug!(status = ?next, "transaction status changed");
        self.state.update(|state| {
            state.form = FormStatus::from(&next);
            state.transaction = next;
        });
    }

    pub fn set_pending(&self) {
        self.transition(TransactionStatus::Pending);
    }

    /// The host performs the navigation once it observes this state.
    pub fn set_redirecting(&self, url: impl Into<String>) {
        self.transition(TransactionStatus::Redirecting { url: url.into() });
    }

    pub fn set_error(&self, message: impl Into<String>) {
        self.transition(TransactionStatus::Error {
            message: message.into(),
        });
    }

    pub fn set_complete(&self) {
        self.transition(TransactionStatus::Complete);
    }

    /// Back to `NotStarted`, e.g. after the user dismisses an error
    pub fn reset(&self) {
        self.transition(TransactionStatus::NotStarted);
    }

    /// Override the form status without touching the transaction, for host
    /// phases such as loading the cart or validating contact details.
    pub fn set_form_status(&self, form: FormStatus) {
        self.state.update(|state| state.form = form);
    }

    pub fn transaction_status(&self) -> TransactionStatus {
        self.state.with(|state| state.transaction.clone())
    }

    pub fn form_status(&self) -> FormStatus {
        self.state.with(|state| state.form)
    }

    /// Receiver yielding `(transaction, form)` on every change
    pub fn subscribe(&self) -> StatusReceiver {
        StatusReceiver {
            rx: self.state.subscribe(),
        }
    }
}

/// Change stream for a [`TransactionTracker`]
#[derive(Debug)]
pub struct StatusReceiver {
    rx: watch::Receiver<StatusState>,
}

impl StatusReceiver {
    /// Wait for the next change. Returns `None` once the tracker is dropped.
    pub async fn changed(&mut self) -> Option<(TransactionStatus, FormStatus)> {
        self.rx.changed().await.ok()?;
        let state = self.rx.borrow_and_update();
        Some((state.transaction.clone(), state.form))
    }
}
