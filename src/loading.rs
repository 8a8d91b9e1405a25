//! Deferred loads
//!
//! Views start out loading and switch to their content once a one-shot timer
//! fires. The timer runs as a tokio task owned by the load; dropping the load
//! aborts the task, so a view that has gone away never receives its result.

use std::time::Duration;

use thiserror::Error;
use tokio::{
    runtime::{Handle, TryCurrentError},
    sync::oneshot::{
        self,
        error::{RecvError, TryRecvError},
    },
    task::JoinHandle,
};
use tracing::debug;

/// Default delay before the restaurant listing is shown.
pub const LISTING_DELAY: Duration = Duration::from_millis(1500);

/// Default delay before a menu is shown.
pub const MENU_DELAY: Duration = Duration::from_secs(1);

/// Errors raised by deferred loads.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The load task ended without producing a value.
    #[error("load was cancelled before it completed")]
    Cancelled(#[from] RecvError),

    /// An earlier wait already saw the load fail.
    #[error("load ended without a value")]
    Unavailable,

    /// Loads need a tokio runtime to schedule their timer on.
    #[error("no async runtime available to schedule the load")]
    NoRuntime(#[from] TryCurrentError),
}

/// Aborts the wrapped task when dropped.
#[derive(Debug)]
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

#[derive(Debug)]
enum LoadState<T> {
    Pending {
        receiver: oneshot::Receiver<T>,
        _task: AbortOnDrop,
    },
    Ready(T),
    Failed,
}

/// A value that becomes available after a delay.
#[derive(Debug)]
pub struct DeferredLoad<T> {
    state: LoadState<T>,
}

impl<T: Send + 'static> DeferredLoad<T> {
    /// Release `value` once `delay` has passed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRuntime`] outside a tokio runtime.
    pub fn after(delay: Duration, value: T) -> Result<Self, LoadError> {
        Self::spawn_with(delay, move || value)
    }

    /// Run `produce` once `delay` has passed and hold its result.
    ///
    /// `produce` never runs if the load is dropped first.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRuntime`] outside a tokio runtime.
    pub fn spawn_with<F>(delay: Duration, produce: F) -> Result<Self, LoadError>
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let handle = Handle::try_current()?;
        let (sender, receiver) = oneshot::channel();

        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;

            if sender.send(produce()).is_err() {
                debug!("deferred load finished after its receiver went away");
            }
        });

        Ok(Self {
            state: LoadState::Pending {
                receiver,
                _task: AbortOnDrop(task),
            },
        })
    }
}

impl<T> DeferredLoad<T> {
    /// A load that is already complete.
    pub fn loaded(value: T) -> Self {
        Self {
            state: LoadState::Ready(value),
        }
    }

    /// Whether the value is still on its way.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Pending { .. })
    }

    /// Whether the load task ended without a value.
    pub fn is_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed)
    }

    /// Check for the value without waiting.
    pub fn poll_ready(&mut self) -> Option<&T> {
        if let LoadState::Pending { receiver, .. } = &mut self.state {
            match receiver.try_recv() {
                Ok(value) => self.state = LoadState::Ready(value),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Closed) => self.state = LoadState::Failed,
            }
        }

        self.value()
    }

    /// The value, if it has arrived.
    pub fn value(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(value) => Some(value),
            LoadState::Pending { .. } | LoadState::Failed => None,
        }
    }

    /// Wait for the value.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Cancelled`] if the load task ended without a value.
    pub async fn ready(&mut self) -> Result<&T, LoadError> {
        if let LoadState::Pending { receiver, .. } = &mut self.state {
            match receiver.await {
                Ok(value) => self.state = LoadState::Ready(value),
                Err(err) => {
                    self.state = LoadState::Failed;

                    return Err(err.into());
                }
            }
        }

        match &self.state {
            LoadState::Ready(value) => Ok(value),
            LoadState::Pending { .. } | LoadState::Failed => Err(LoadError::Unavailable),
        }
    }
}
