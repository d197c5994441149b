// ABOUTME: Ambient call context threaded through every runtime call.
// ABOUTME: Couples a cancellation token with an optional per-call deadline.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Why a runtime call did not complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    #[error("call cancelled")]
    Cancelled,

    #[error("call exceeded deadline of {0:?}")]
    TimedOut(Duration),
}

/// Cancellation and deadline shared by every call a provider issues.
///
/// Clones share the same token, so cancelling any clone interrupts calls
/// made through all of them.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Duration>,
}

impl CallContext {
    pub fn new(token: CancellationToken, deadline: Option<Duration>) -> Self {
        Self { token, deadline }
    }

    /// Context with a fresh token and the given per-call deadline.
    pub fn with_deadline(deadline: Duration) -> Self {
        Self::new(CancellationToken::new(), Some(deadline))
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Drive `call` to completion unless the token fires or the deadline passes.
    pub async fn run<T, E, F>(&self, call: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<Interrupted>,
    {
        let bounded = async {
            match self.deadline {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => Err(Interrupted::TimedOut(limit).into()),
                },
                None => call.await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Interrupted::Cancelled.into()),
            result = bounded => result,
        }
    }
}
