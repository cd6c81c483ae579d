//! Broadcast event emitter decoupling game-logic producers from
//! renderer/audio/UI consumers.
//!
//! Two broadcast operations with genuinely different ordering contracts:
//!
//! - [`BroadcastEmitter::broadcast`]: fire-and-forget. Every current
//!   subscriber is started and the caller returns immediately; failures are
//!   logged, never surfaced.
//! - [`BroadcastEmitter::broadcast_async`]: all-settled join. The returned
//!   future resolves only once every subscriber's task has settled, and a
//!   failing subscriber does not stop the others from completing. The first
//!   failure is surfaced to the caller.
//!
//! Both operations iterate a snapshot of the subscription table taken at
//! call time, so subscribe/unsubscribe during an in-flight broadcast cannot
//! affect that broadcast. The core defines no timeouts: a hung subscriber in
//! `broadcast_async` stalls its caller.

use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::fmt::Debug;
use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, error};
use uuid::Uuid;

// ============================================================================
// Core Traits
// ============================================================================

/// An event that can be routed through a [`BroadcastEmitter`].
///
/// Events are cloned once per subscriber, so payloads should be cheap to
/// clone or wrap shared data in `Arc`.
pub trait BroadcastEvent: Clone + Send + Sync + Debug + 'static {
    /// Stable routing name for this event (e.g. `"uiHide"`).
    fn name(&self) -> &'static str;
}

/// A registered consumer of broadcast events.
#[async_trait]
pub trait Subscriber<E: BroadcastEvent>: Send + Sync {
    async fn handle(&self, event: E) -> Result<(), EmitterError>;

    /// Name used in failure logs.
    fn subscriber_name(&self) -> &str;
}

/// Wraps a plain closure returning a boxed future as a [`Subscriber`].
struct FnSubscriber<E> {
    name: String,
    handler: Box<dyn Fn(E) -> BoxFuture<'static, Result<(), EmitterError>> + Send + Sync>,
}

#[async_trait]
impl<E: BroadcastEvent> Subscriber<E> for FnSubscriber<E> {
    async fn handle(&self, event: E) -> Result<(), EmitterError> {
        (self.handler)(event).await
    }

    fn subscriber_name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Subscription Table
// ============================================================================

/// Opaque handle identifying one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct SubscriptionEntry<E> {
    id: SubscriptionId,
    subscriber: Arc<dyn Subscriber<E>>,
}

impl<E> Clone for SubscriptionEntry<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            subscriber: self.subscriber.clone(),
        }
    }
}

/// Counters exposed for monitoring and tests.
#[derive(Debug, Default, Clone)]
pub struct EmitterStats {
    pub total_subscribers: usize,
    pub events_broadcast: u64,
}

// ============================================================================
// Emitter
// ============================================================================

/// The broadcast emitter: a subscription table keyed by event name.
pub struct BroadcastEmitter<E: BroadcastEvent> {
    subscribers: DashMap<&'static str, Vec<SubscriptionEntry<E>>>,
    subscriber_count: AtomicUsize,
    broadcast_count: AtomicU64,
}

impl<E: BroadcastEvent> Default for BroadcastEmitter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BroadcastEvent> BroadcastEmitter<E> {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            subscriber_count: AtomicUsize::new(0),
            broadcast_count: AtomicU64::new(0),
        }
    }

    /// Registers a closure for events routed under `event_name`.
    ///
    /// The closure runs for every broadcast of that name until
    /// [`unsubscribe`](Self::unsubscribe) is called with the returned id.
    pub fn subscribe<F, Fut>(&self, event_name: &'static str, handler: F) -> SubscriptionId
    where
        F: Fn(E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), EmitterError>> + Send + 'static,
    {
        let id = SubscriptionId::new();
        let subscriber = FnSubscriber {
            name: format!("{event_name}#{id}"),
            handler: Box::new(move |event| handler(event).boxed()),
        };
        self.subscribe_with(event_name, id, Arc::new(subscriber));
        id
    }

    /// Registers an already-built [`Subscriber`].
    pub fn subscribe_subscriber(
        &self,
        event_name: &'static str,
        subscriber: Arc<dyn Subscriber<E>>,
    ) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscribe_with(event_name, id, subscriber);
        id
    }

    fn subscribe_with(
        &self,
        event_name: &'static str,
        id: SubscriptionId,
        subscriber: Arc<dyn Subscriber<E>>,
    ) {
        self.subscribers
            .entry(event_name)
            .or_default()
            .push(SubscriptionEntry { id, subscriber });
        self.subscriber_count.fetch_add(1, Ordering::Relaxed);
        debug!("registered subscriber for {event_name}");
    }

    /// Removes one subscription. Unsubscribing an id that is not registered
    /// (or was already removed) is a no-op, not an error.
    pub fn unsubscribe(&self, event_name: &'static str, id: SubscriptionId) {
        if let Some(mut entries) = self.subscribers.get_mut(event_name) {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            if entries.len() < before {
                self.subscriber_count.fetch_sub(1, Ordering::Relaxed);
                debug!("removed subscriber {id} from {event_name}");
            }
        }
    }

    /// Stable snapshot of the subscribers registered for `name` at call time.
    fn snapshot(&self, name: &'static str) -> Vec<SubscriptionEntry<E>> {
        self.subscribers
            .get(name)
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Fire-and-forget broadcast: starts every current subscriber and returns
    /// immediately. The caller never observes subscriber completion; failures
    /// are logged.
    pub fn broadcast(&self, event: E) {
        let entries = self.snapshot(event.name());
        self.broadcast_count.fetch_add(1, Ordering::Relaxed);
        if entries.is_empty() {
            debug!("no subscribers for {}", event.name());
            return;
        }
        for entry in entries {
            let event = event.clone();
            let subscriber = entry.subscriber;
            tokio::spawn(async move {
                if let Err(e) = subscriber.handle(event).await {
                    error!(
                        "subscriber {} failed during broadcast: {e}",
                        subscriber.subscriber_name()
                    );
                }
            });
        }
    }

    /// All-settled broadcast: resolves only after every subscriber's task has
    /// settled. Subscriber tasks run concurrently and independently; one
    /// failure does not prevent the others from completing, but the first
    /// failure (with a failure count) is surfaced to the caller.
    pub async fn broadcast_async(&self, event: E) -> Result<(), EmitterError> {
        let entries = self.snapshot(event.name());
        self.broadcast_count.fetch_add(1, Ordering::Relaxed);
        if entries.is_empty() {
            debug!("no subscribers for {}", event.name());
            return Ok(());
        }

        let mut tasks = FuturesUnordered::new();
        for entry in entries {
            let event = event.clone();
            tasks.push(async move {
                let result = entry.subscriber.handle(event).await;
                (entry.subscriber.subscriber_name().to_string(), result)
            });
        }

        let mut failed = 0usize;
        let mut first_failure: Option<(String, EmitterError)> = None;
        while let Some((name, result)) = tasks.next().await {
            if let Err(e) = result {
                error!("subscriber {name} failed during broadcast_async: {e}");
                failed += 1;
                if first_failure.is_none() {
                    first_failure = Some((name, e));
                }
            }
        }

        match first_failure {
            None => Ok(()),
            Some((subscriber, source)) => Err(EmitterError::SubscriberFailed {
                event: event.name(),
                subscriber,
                failed,
                message: source.to_string(),
            }),
        }
    }

    /// Number of subscriptions currently registered for `name`.
    pub fn subscriber_count(&self, name: &'static str) -> usize {
        self.subscribers.get(name).map(|e| e.len()).unwrap_or(0)
    }

    pub fn stats(&self) -> EmitterStats {
        EmitterStats {
            total_subscribers: self.subscriber_count.load(Ordering::Relaxed),
            events_broadcast: self.broadcast_count.load(Ordering::Relaxed),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum EmitterError {
    /// A subscriber's own task failed.
    #[error("subscriber task failed: {0}")]
    Subscriber(String),
    /// Joined failure from `broadcast_async`: all subscribers settled, at
    /// least one failed.
    #[error("{failed} subscriber(s) failed for '{event}' (first: {subscriber}: {message})")]
    SubscriberFailed {
        event: &'static str,
        subscriber: String,
        failed: usize,
        message: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
