//! Lazily established, single-flight connection management.
//!
//! At most one connect attempt is in flight at a time. Callers that arrive while an
//! attempt is running join it and observe its outcome; a failed attempt leaves the
//! manager uninitialized so the next caller starts a fresh one.

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Error shared by every caller that joined the same failed attempt.
pub type SharedError<E> = Arc<E>;

type Attempt<H, E> = Shared<BoxFuture<'static, Result<H, SharedError<E>>>>;

/// Something that can open a connection and hand out a cloneable handle to it.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    type Handle: Clone + Send + Sync + 'static;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn connect(&self) -> Result<Self::Handle, Self::Error>;
}

enum State<H, E> {
    Uninitialized,
    Connecting(Attempt<H, E>),
    Connected(H),
}

/// Process-wide owner of one connection handle.
///
/// Share it behind an `Arc`; [`ConnectionManager::acquire`] is safe to call from any
/// number of tasks.
pub struct ConnectionManager<C: Connector> {
    connector: Arc<C>,
    state: Mutex<State<C::Handle, C::Error>>,
}

impl<C: Connector> ConnectionManager<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector: Arc::new(connector),
            state: Mutex::new(State::Uninitialized),
        }
    }

    /// Return the established handle, connecting first if needed.
    pub async fn acquire(&self) -> Result<C::Handle, SharedError<C::Error>> {
        let attempt = {
            let mut state = self.state.lock().await;
            let in_flight = match &*state {
                State::Connected(handle) => return Ok(handle.clone()),
                State::Connecting(attempt) => Some(attempt.clone()),
                State::Uninitialized => None,
            };

            match in_flight {
                Some(attempt) => {
                    debug!("Joining in-flight connection attempt");
                    attempt
                }
                None => {
                    let attempt = self.start_attempt();
                    *state = State::Connecting(attempt.clone());
                    attempt
                }
            }
        };

        let outcome = attempt.clone().await;

        let mut state = self.state.lock().await;
        // Only the attempt that is still current may move the state forward.
        if let State::Connecting(current) = &*state
            && current.ptr_eq(&attempt)
        {
            *state = match &outcome {
                Ok(handle) => {
                    info!("Connection established");
                    State::Connected(handle.clone())
                }
                Err(e) => {
                    warn!(error = %e, "Connection attempt failed, next caller will retry");
                    State::Uninitialized
                }
            };
        }

        outcome
    }

    /// Whether a handle has been published.
    pub async fn is_connected(&self) -> bool {
        matches!(&*self.state.lock().await, State::Connected(_))
    }

    fn start_attempt(&self) -> Attempt<C::Handle, C::Error> {
        debug!("Starting new connection attempt");
        let connector = Arc::clone(&self.connector);
        async move { connector.connect().await.map_err(Arc::new) }
            .boxed()
            .shared()
    }
}
