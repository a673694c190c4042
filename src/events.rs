//! # Shape Events
//!
//! Whoever owns a shape decides when it has changed and publishes a [`ShapeEvent`]
//! carrying the shape's id and a snapshot of its current state. Subscribers register
//! callbacks on a [`ShapeEventBus`]; delivery is synchronous and in subscription order.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use shapeyard::{Point, Shape, ShapeEventBus, ShapeId};
//!
//! let bus = ShapeEventBus::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! bus.subscribe(move |_event| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! let shape: Shape = Point::new(ShapeId::new("p").unwrap(), 1.0, 2.0, 0.0).into();
//! assert_eq!(bus.notify(&shape), 1);
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crate::{Shape, ShapeId};

/// A request to refresh everything derived from a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEvent {
    /// Identity of the shape that changed.
    pub id: ShapeId,
    /// The shape as of publication.
    pub snapshot: Shape,
}

impl ShapeEvent {
    /// Creates an event from a snapshot of `shape`.
    pub fn new(shape: &Shape) -> Self {
        ShapeEvent {
            id: shape.id().clone(),
            snapshot: shape.clone(),
        }
    }
}

/// Handle returned by subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&ShapeEvent) + Send + Sync>;
type Liveness = Box<dyn Fn() -> bool + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: Option<ShapeId>,
    handler: Handler,
    alive: Option<Liveness>,
}

impl Subscription {
    fn is_alive(&self) -> bool {
        self.alive.as_ref().is_none_or(|alive| alive())
    }

    fn accepts(&self, event: &ShapeEvent) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter == &event.id)
    }
}

#[derive(Default)]
struct Subscriptions {
    next_id: u64,
    entries: Vec<Subscription>,
}

impl Subscriptions {
    fn purge_dead(&mut self) {
        let before = self.entries.len();
        self.entries.retain(Subscription::is_alive);
        let purged = before - self.entries.len();
        if purged > 0 {
            tracing::debug!(purged, "dropped subscriptions whose target is gone");
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Callback registry for shape events.
#[derive(Default)]
pub struct ShapeEventBus {
    subscriptions: Mutex<Subscriptions>,
}

impl ShapeEventBus {
    /// Creates a bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn register(
        &self,
        filter: Option<ShapeId>,
        handler: Handler,
        alive: Option<Liveness>,
    ) -> SubscriptionId {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let id = SubscriptionId(subscriptions.next_id);
        subscriptions.next_id += 1;
        subscriptions.entries.push(Subscription {
            id,
            filter,
            handler,
            alive,
        });
        id
    }

    /// Subscribes `handler` to events for every shape.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&ShapeEvent) + Send + Sync + 'static,
    {
        self.register(None, Arc::new(handler), None)
    }

    /// Subscribes `handler` to events for the shape identified by `id` only.
    pub fn subscribe_to<F>(&self, id: ShapeId, handler: F) -> SubscriptionId
    where
        F: Fn(&ShapeEvent) + Send + Sync + 'static,
    {
        self.register(Some(id), Arc::new(handler), None)
    }

    /// Subscribes `handler` on behalf of `target` without keeping it alive.
    ///
    /// The bus holds a weak handle. Once every strong reference to `target` is gone the
    /// subscription is removed on the next publish or count.
    pub fn subscribe_while<T, F>(&self, target: &Arc<T>, handler: F) -> SubscriptionId
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &ShapeEvent) + Send + Sync + 'static,
    {
        let weak = Arc::downgrade(target);
        let liveness = weak.clone();
        let alive: Liveness = Box::new(move || liveness.strong_count() > 0);
        self.register(
            None,
            Arc::new(move |event: &ShapeEvent| {
                if let Some(target) = weak.upgrade() {
                    handler(&*target, event);
                }
            }),
            Some(alive),
        )
    }

    /// Removes a subscription. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        let before = subscriptions.entries.len();
        subscriptions.entries.retain(|s| s.id != id);
        subscriptions.entries.len() != before
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        let mut subscriptions = self.subscriptions.lock().unwrap();
        subscriptions.purge_dead();
        subscriptions.entries.len()
    }

    /// Delivers `event` to every matching subscriber and returns how many completed.
    ///
    /// The matching handlers are collected first and run after the registry is
    /// unlocked, so a handler may subscribe or unsubscribe. A handler that panics is
    /// logged and skipped; the remaining handlers still run.
    pub fn publish(&self, event: &ShapeEvent) -> usize {
        let handlers: Vec<Handler> = {
            let mut subscriptions = self.subscriptions.lock().unwrap();
            subscriptions.purge_dead();
            subscriptions
                .entries
                .iter()
                .filter(|s| s.accepts(event))
                .map(|s| Arc::clone(&s.handler))
                .collect()
        };
        let mut delivered = 0;
        for handler in handlers {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(()) => delivered += 1,
                Err(payload) => {
                    tracing::error!(
                        shape = %event.id,
                        panic = panic_message(&*payload),
                        "shape event handler panicked"
                    );
                }
            }
        }
        tracing::debug!(shape = %event.id, delivered, "published shape event");
        delivered
    }

    /// Publishes a snapshot of `shape`.
    pub fn notify(&self, shape: &Shape) -> usize {
        self.publish(&ShapeEvent::new(shape))
    }
}
