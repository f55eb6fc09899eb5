//! # Request Context
//!
//! Every store and engine entry point takes a [`Context`]. It combines a
//! cancellation token with an optional deadline; once either fires, the
//! operation in progress aborts with [`Cancelled`]. Deadlines are measured on
//! the tokio clock, so `check` and `done` agree when time is paused.

use crate::errors::Cancelled;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation scope of one request or propagation round.
#[derive(Clone, Debug, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that never fires unless cancelled explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: fire after `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Builder method: fire at `deadline` (an earlier existing deadline wins).
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// Child scope: cancelled with its parent, cancellable on its own.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels this scope and all children.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Underlying token, for integration with other tokio code.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Remaining time until the deadline, if one is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Non-blocking check.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.token.is_cancelled() {
            return Err(Cancelled::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Cancelled::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Whether the scope has fired.
    pub fn is_done(&self) -> bool {
        self.check().is_err()
    }

    /// Resolves once the scope fires.
    pub async fn done(&self) -> Cancelled {
        match self.deadline {
            Some(deadline) => {
                tokio::select! {
                    _ = self.token.cancelled() => Cancelled::Cancelled,
                    _ = tokio::time::sleep_until(deadline) => Cancelled::DeadlineExceeded,
                }
            }
            None => {
                self.token.cancelled().await;
                Cancelled::Cancelled
            }
        }
    }

    /// Runs `fut` unless the scope fires first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Cancelled> {
        self.check()?;
        tokio::select! {
            biased;
            reason = self.done() => Err(reason),
            out = fut => Ok(out),
        }
    }
}
