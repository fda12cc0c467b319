//! # Marsline Runtime
//!
//! Runtime implementation for the Marsline storefront architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: The runtime that manages state and executes effects
//! - **Effect Executor**: Executes effect descriptions in order and feeds
//!   produced actions back to the reducer
//!
//! The storefront is a single-session, event-driven application: every
//! action is processed synchronously, and the only asynchronous work
//! (ticket export rendering) must run as an ordered await chain. The Store
//! therefore executes effects strictly sequentially - `send` does not
//! return until every effect produced by the action (and by fed-back
//! actions) has completed.
//!
//! ## Example
//!
//! ```ignore
//! use marsline_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use marsline_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after shutdown
        /// initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// The Store - runtime coordinator for a reducer
///
/// The Store manages:
/// 1. State (behind `RwLock` for shared access from the UI layer)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect execution (ordered, with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
///
/// # Example
///
/// ```ignore
/// let store = Store::new(
///     StorefrontState::default(),
///     CartReducer::new(),
///     production_environment(),
/// );
///
/// store.send(CartAction::AddToCart {
///     tier: "Red Planet Pioneer".to_string(),
/// }).await?;
/// ```
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    shutdown: Arc<AtomicBool>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// # Arguments
    ///
    /// - `initial_state`: The starting state for the store
    /// - `reducer`: The reducer implementation (business logic)
    /// - `environment`: Injected dependencies
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Send an action to the store
    ///
    /// This is the primary way to interact with the store:
    /// 1. Acquires the write lock on state
    /// 2. Calls the reducer with (state, action, environment)
    /// 3. Awaits the returned effects **in order**
    /// 4. Actions produced by effects are fed back into the reducer, and
    ///    their effects are executed before any later pending effect
    ///
    /// Unlike a general-purpose store there is no parallel execution path:
    /// effect ordering is part of the storefront's contract (exported
    /// ticket pages must match ticket order), so `send` only returns once
    /// the whole effect chain has drained.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(StoreError::ShutdownInProgress);
        }

        let mut queue: VecDeque<Effect<A>> = {
            let mut state = self.state.write().await;
            self.reducer
                .reduce(&mut state, action, &self.environment)
                .into_iter()
                .collect()
        };

        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::None => {},
                Effect::Sequential(effects) => {
                    // Preserve relative order ahead of already-pending work
                    for inner in effects.into_iter().rev() {
                        queue.push_front(inner);
                    }
                },
                Effect::Future(future) => {
                    if let Some(produced) = future.await {
                        tracing::debug!("effect produced feedback action");
                        let mut state = self.state.write().await;
                        let effects =
                            self.reducer.reduce(&mut state, produced, &self.environment);
                        for inner in effects.into_iter().rev() {
                            queue.push_front(inner);
                        }
                    }
                },
            }
        }

        Ok(())
    }

    /// Read state through a projection function
    ///
    /// Takes a closure that receives a reference to the current state and
    /// returns whatever it extracts. Holding the closure (rather than
    /// handing out a guard) keeps lock scope minimal.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Initiate shutdown: reject any further actions
    ///
    /// Pending `send` calls already past the shutdown check drain normally;
    /// the storefront has no background effects so nothing else is running.
    pub fn shutdown(&self) {
        tracing::info!("store shutting down");
        self.shutdown.store(true, Ordering::Release);
    }
}
