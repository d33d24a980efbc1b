//! Diagnostic observers for container events.
//!
//! Observers see every step of a container's life: bindings being declared
//! and filled, lookups, field injection, and lifecycle routing. They are the
//! logging hook of the crate; [`LoggingObserver`] prints events, custom
//! implementations can forward them anywhere.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::{BindKey, RESERVED_ID};
use crate::lifecycle::Capability;

/// Observer trait for container events.
///
/// Every method has an empty default, so an observer implements only what it
/// cares about.
///
/// # Performance
///
/// Observer calls are made synchronously. Keep implementations lightweight;
/// they run inside `resolve` and `finish_binding`.
///
/// # Examples
///
/// ```
/// use tinject::{BindKey, Container, ContainerObserver};
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Default)]
/// struct BindCounter {
///     declared: Mutex<usize>,
/// }
///
/// impl ContainerObserver for BindCounter {
///     fn bound(&self, _key: &BindKey) {
///         *self.declared.lock().unwrap() += 1;
///     }
/// }
///
/// let counter = Arc::new(BindCounter::default());
/// let mut container = Container::new();
/// container.add_observer(counter.clone());
/// container.bind(&[BindKey::of::<u32>(), BindKey::of::<u64>()]);
///
/// assert_eq!(*counter.declared.lock().unwrap(), 2);
/// ```
pub trait ContainerObserver: Send + Sync {
    /// A binding record was declared.
    fn bound(&self, key: &BindKey) {
        let _ = key;
    }

    /// A produced instance of `produced` was assigned to `bindings` records.
    fn assigned(&self, produced: &BindKey, bindings: usize) {
        let _ = (produced, bindings);
    }

    /// A lookup is starting.
    fn resolving(&self, key: &BindKey, id: u16) {
        let _ = (key, id);
    }

    /// A lookup succeeded.
    fn resolved(&self, key: &BindKey, id: u16, duration: Duration) {
        let _ = (key, id, duration);
    }

    /// A lookup failed.
    fn resolve_failed(&self, key: &BindKey, id: u16, error: &DiError) {
        let _ = (key, id, error);
    }

    /// A field of a produced instance received its dependency.
    fn injected(&self, owner: &BindKey, field: &'static str, key: &BindKey, id: u16) {
        let _ = (owner, field, key, id);
    }

    /// A binding was routed into a lifecycle set.
    fn routed(&self, key: &BindKey, capability: Capability) {
        let _ = (key, capability);
    }

    /// `finish_binding` completed.
    fn finished(&self, bindings: usize, produced: usize, routed: usize) {
        let _ = (bindings, produced, routed);
    }
}

/// Registered observers of one container.
///
/// Minimal overhead when empty: every notification is a loop over an empty Vec.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ContainerObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn ContainerObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn bound(&self, key: &BindKey) {
        for observer in &self.observers {
            observer.bound(key);
        }
    }

    #[inline]
    pub(crate) fn assigned(&self, produced: &BindKey, bindings: usize) {
        for observer in &self.observers {
            observer.assigned(produced, bindings);
        }
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &BindKey, id: u16) {
        for observer in &self.observers {
            observer.resolving(key, id);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &BindKey, id: u16, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, id, duration);
        }
    }

    #[inline]
    pub(crate) fn resolve_failed(&self, key: &BindKey, id: u16, error: &DiError) {
        for observer in &self.observers {
            observer.resolve_failed(key, id, error);
        }
    }

    #[inline]
    pub(crate) fn injected(&self, owner: &BindKey, field: &'static str, key: &BindKey, id: u16) {
        for observer in &self.observers {
            observer.injected(owner, field, key, id);
        }
    }

    #[inline]
    pub(crate) fn routed(&self, key: &BindKey, capability: Capability) {
        for observer in &self.observers {
            observer.routed(key, capability);
        }
    }

    #[inline]
    pub(crate) fn finished(&self, bindings: usize, produced: usize, routed: usize) {
        for observer in &self.observers {
            observer.finished(bindings, produced, routed);
        }
    }
}

fn describe(key: &BindKey, id: u16) -> String {
    if id == RESERVED_ID {
        key.display_name().to_string()
    } else {
        format!("{}#{}", key.display_name(), id)
    }
}

/// Built-in observer that logs events to stdout, failures to stderr.
///
/// Useful during development. For production, implement
/// [`ContainerObserver`] against your own logging stack.
///
/// # Examples
///
/// ```
/// use tinject::{Container, LoggingObserver};
/// use std::sync::Arc;
///
/// let mut container = Container::new();
/// container.add_observer(Arc::new(LoggingObserver::new()));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a logging observer with the default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[tinject]".to_string(),
        }
    }

    /// Creates a logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ContainerObserver for LoggingObserver {
    fn bound(&self, key: &BindKey) {
        println!("{} Bind: {}", self.prefix, key.display_name());
    }

    fn assigned(&self, produced: &BindKey, bindings: usize) {
        println!(
            "{} Instance of {} assigned to {} binding(s)",
            self.prefix,
            produced.display_name(),
            bindings
        );
    }

    fn resolved(&self, key: &BindKey, id: u16, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, describe(key, id), duration);
    }

    fn resolve_failed(&self, key: &BindKey, id: u16, error: &DiError) {
        eprintln!("{} FAILED to resolve {}: {}", self.prefix, describe(key, id), error);
    }

    fn injected(&self, owner: &BindKey, field: &'static str, key: &BindKey, id: u16) {
        println!(
            "{} Injected {}.{} <- {}",
            self.prefix,
            owner.display_name(),
            field,
            describe(key, id)
        );
    }

    fn routed(&self, key: &BindKey, capability: Capability) {
        println!("{} Routed {} into {:?}", self.prefix, key.display_name(), capability);
    }

    fn finished(&self, bindings: usize, produced: usize, routed: usize) {
        println!(
            "{} Binding finished: {} binding(s), {} produced, {} lifecycle entries",
            self.prefix, bindings, produced, routed
        );
    }
}
