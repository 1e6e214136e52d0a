//! # Transaction Submitter
//!
//! Turns a cart snapshot into a bill at the billing service.
//!
//! ## Attempt State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Submission Attempt                                   │
//! │                                                                         │
//! │              submit(non-empty)                                          │
//! │   ┌──────┐  ─────────────────►  ┌────────────┐                         │
//! │   │ Idle │                      │ Submitting │                         │
//! │   └──────┘                      └─────┬──────┘                         │
//! │      ▲                                │                                 │
//! │      │ next submit()        ┌─────────┴─────────┐                      │
//! │      │ starts fresh         ▼                   ▼                       │
//! │      │               ┌───────────┐        ┌────────┐                   │
//! │      └───────────────│ Succeeded │        │ Failed │                   │
//! │                      └───────────┘        └────────┘                   │
//! │                                                                         │
//! │  • Empty cart: no request, no state change                             │
//! │  • No cancellation once dispatched; a transport timeout is Failed      │
//! │  • No retries and no deduplication: two submits make two bills         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The submitter never touches the cart. Clearing after success is the
//! caller's explicit second step.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use till_core::validation::validate_bill_lines;
use till_core::{Bill, CartSnapshot};

use crate::backend::PosBackend;
use crate::error::{ClientResult, ErrorKind, Notice};

/// Where the current (or last) submission attempt stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "state", rename_all = "camelCase")]
#[ts(export)]
pub enum SubmissionState {
    Idle,
    Submitting {
        #[ts(as = "String")]
        attempt_id: Uuid,
    },
    Succeeded {
        #[ts(as = "String")]
        attempt_id: Uuid,
        bill: Bill,
    },
    Failed {
        #[ts(as = "String")]
        attempt_id: Uuid,
        notice: Notice,
    },
}

impl SubmissionState {
    /// The presentation layer disables its pay trigger while this is true.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, SubmissionState::Submitting { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SubmissionState::Succeeded { .. } | SubmissionState::Failed { .. }
        )
    }
}

/// Sends bills and publishes attempt state.
pub struct TransactionSubmitter {
    backend: Arc<dyn PosBackend>,
    state: watch::Sender<SubmissionState>,
}

impl TransactionSubmitter {
    pub fn new(backend: Arc<dyn PosBackend>) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        TransactionSubmitter { backend, state }
    }

    /// Current attempt state.
    pub fn state(&self) -> SubmissionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe_state(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// Submits `snapshot` as a bill.
    ///
    /// ## Returns
    /// - `Ok(None)`: empty cart, nothing was sent, state unchanged
    /// - `Ok(Some(bill))`: the bill the service created (source of truth
    ///   for the confirmation display)
    /// - `Err(_)`: nothing was created; retry is up to the operator
    ///
    /// Unit prices come from the snapshot lines, never from the catalog.
    /// Calling this twice with the same snapshot creates two bills.
    pub async fn submit(&self, snapshot: &CartSnapshot) -> ClientResult<Option<Bill>> {
        if snapshot.is_empty() {
            debug!("submit on empty cart ignored");
            return Ok(None);
        }

        let lines = snapshot.bill_lines();
        validate_bill_lines(&lines)?;

        let attempt_id = Uuid::new_v4();
        self.state.send_replace(SubmissionState::Idle);
        self.state.send_replace(SubmissionState::Submitting { attempt_id });
        info!(
            %attempt_id,
            line_count = lines.len(),
            total = %snapshot.total,
            "submitting bill"
        );

        match self.backend.create_bill(&lines).await {
            Ok(created) => {
                let bill = created.into_bill(Utc::now());
                if bill.total_amount != snapshot.total {
                    warn!(
                        %attempt_id,
                        expected = %snapshot.total,
                        billed = %bill.total_amount,
                        "billing service total differs from cart total"
                    );
                }
                info!(
                    %attempt_id,
                    bill_number = %bill.bill_number,
                    total = %bill.total_amount,
                    "bill created"
                );
                self.state.send_replace(SubmissionState::Succeeded {
                    attempt_id,
                    bill: bill.clone(),
                });
                Ok(Some(bill))
            }
            Err(err) => {
                if err.kind() == ErrorKind::SubmissionRejected {
                    warn!(%attempt_id, error = %err, "bill rejected");
                } else {
                    error!(%attempt_id, error = %err, "bill submission failed");
                }
                self.state.send_replace(SubmissionState::Failed {
                    attempt_id,
                    notice: err.notice(),
                });
                Err(err)
            }
        }
    }
}
