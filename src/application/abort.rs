//! Abort signal for in-flight pipelines.
//!
//! An [`AbortHandle`] fires once; every clone of the paired [`AbortSignal`]
//! observes it. Built on `tokio::sync::watch`, so waiting is cheap and a late
//! subscriber still sees an abort that already happened.

use std::sync::Arc;

use tokio::sync::watch;

/// Creates a connected handle/signal pair.
#[must_use]
pub fn abort_pair() -> (AbortHandle, AbortSignal) {
    let (sender, receiver) = watch::channel(false);
    (
        AbortHandle {
            sender: Arc::new(sender),
        },
        AbortSignal {
            receiver: Some(receiver),
        },
    )
}

/// Triggers the paired [`AbortSignal`].
#[derive(Debug, Clone)]
pub struct AbortHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl AbortHandle {
    /// Fires the signal. Idempotent.
    pub fn abort(&self) {
        self.sender.send_replace(true);
    }
}

/// Observes whether the pipeline should give up.
#[derive(Debug, Clone)]
pub struct AbortSignal {
    receiver: Option<watch::Receiver<bool>>,
}

impl AbortSignal {
    /// A signal that never fires.
    #[must_use]
    pub const fn never() -> Self {
        Self { receiver: None }
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        self.receiver
            .as_ref()
            .is_some_and(|receiver| *receiver.borrow())
    }

    /// Completes once the signal fires.
    ///
    /// Pends forever if the handle is dropped without firing.
    pub async fn aborted(&self) {
        let Some(receiver) = &self.receiver else {
            return std::future::pending().await;
        };

        let mut receiver = receiver.clone();
        let fired = receiver.wait_for(|aborted| *aborted).await.is_ok();
        if !fired {
            std::future::pending::<()>().await;
        }
    }
}

impl Default for AbortSignal {
    fn default() -> Self {
        Self::never()
    }
}

// =============================================================================
// Tests
// =============================================================================
