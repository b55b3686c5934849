//! Task executors for the asynchronous half of a shadow comparison.
//!
//! The router never spawns on its own: the hosting application hands it an
//! [`Executor`] and keeps ownership of the runtime behind it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;

/// A pinned, boxed, sendable future.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Runs a detached task to completion.
///
/// Dropping the task without polling it to completion is allowed; the router
/// observes that as an abandoned side call rather than hanging.
pub trait Executor: Send + Sync {
    fn execute(&self, task: BoxFuture<()>);
}

impl Executor for Handle {
    fn execute(&self, task: BoxFuture<()>) {
        self.spawn(task);
    }
}

/// Spawns on a tokio runtime with at most `max_concurrent` tasks in flight.
///
/// Tasks beyond the limit wait for a permit instead of being dropped, since
/// the router awaits every task it submits.
#[derive(Clone)]
pub struct BoundedExecutor {
    handle: Handle,
    semaphore: Arc<Semaphore>,
}

impl BoundedExecutor {
    pub fn new(handle: Handle, max_concurrent: usize) -> Self {
        Self {
            handle,
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Bounded executor on the runtime of the calling context.
    ///
    /// Panics when called outside a tokio runtime, like [`Handle::current`].
    pub fn current(max_concurrent: usize) -> Self {
        Self::new(Handle::current(), max_concurrent)
    }

    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Executor for BoundedExecutor {
    fn execute(&self, task: BoxFuture<()>) {
        let semaphore = self.semaphore.clone();
        self.handle.spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::warn!("Executor semaphore closed, dropping task");
                    return;
                }
            };
            task.await;
        });
    }
}
