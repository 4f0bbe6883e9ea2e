//! Per-call deadline and cancellation

use crate::utils::error::{EngineResult, TransportError};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Caller-supplied limits for a single operation
///
/// The whole exchange (send, body read, decode) races the deadline and the
/// cancellation token; losing the race drops the in-flight request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancellation: Option<CancellationToken>,
}

impl RequestContext {
    /// Context without deadline or cancellation
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the call once `timeout` has elapsed from now
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Fail the call at `deadline`
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Abort the call when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Why the call must not start, if the context is already done
    pub fn done(&self) -> Option<TransportError> {
        if self.cancellation.as_ref().map_or(false, |t| t.is_cancelled()) {
            return Some(TransportError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(TransportError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Run `call` under this context
    pub(crate) async fn run<F, T>(&self, call: F) -> EngineResult<T>
    where
        F: Future<Output = EngineResult<T>>,
    {
        if let Some(reason) = self.done() {
            return Err(reason.into());
        }

        let cancelled = async {
            match &self.cancellation {
                Some(token) => token.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            result = call => result,
            _ = cancelled => Err(TransportError::Cancelled.into()),
            _ = expired => Err(TransportError::DeadlineExceeded.into()),
        }
    }
}
