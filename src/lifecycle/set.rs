//! Append-only capability sets.

use std::fmt;
use std::sync::Arc;

/// Ordered members sharing one lifecycle capability.
///
/// The set stores the capability method as a plain function pointer, so the
/// five lifecycle sets are the same type with a different `invoke`.
///
/// # Examples
///
/// ```
/// use tinject::{CapabilitySet, Update};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Ticker(AtomicUsize);
/// impl Update for Ticker {
///     fn update(&self) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let ticker = Arc::new(Ticker(AtomicUsize::new(0)));
/// let mut set: CapabilitySet<dyn Update> = CapabilitySet::new(|m| m.update());
/// set.add(ticker.clone());
///
/// set.dispatch();
/// set.dispatch();
/// assert_eq!(ticker.0.load(Ordering::SeqCst), 2);
/// ```
pub struct CapabilitySet<T: ?Sized> {
    members: Vec<Arc<T>>,
    invoke: fn(&T),
}

impl<T: ?Sized> CapabilitySet<T> {
    pub fn new(invoke: fn(&T)) -> Self {
        Self {
            members: Vec::new(),
            invoke,
        }
    }

    /// Appends a member; it runs after every member added before it.
    pub fn add(&mut self, member: Arc<T>) {
        self.members.push(member);
    }

    /// Invokes the capability on every member, front to back.
    ///
    /// Panics raised by a member propagate to the caller; members after it
    /// are not invoked.
    pub fn dispatch(&self) {
        for member in &self.members {
            (self.invoke)(member);
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.members.iter()
    }
}

impl<T: ?Sized> fmt::Debug for CapabilitySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilitySet")
            .field("type", &std::any::type_name::<T>())
            .field("members", &self.members.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    trait Step: Send + Sync {
        fn step(&self);
    }

    struct Named {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Step for Named {
        fn step(&self) {
            self.log.lock().unwrap().push(self.name);
        }
    }

    #[test]
    fn dispatch_follows_insertion_order_every_time() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut set: CapabilitySet<dyn Step> = CapabilitySet::new(|m| m.step());
        for name in ["a", "b", "c"] {
            set.add(Arc::new(Named { name, log: log.clone() }));
        }

        set.dispatch();
        set.dispatch();

        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c", "a", "b", "c"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn same_instance_added_twice_runs_twice() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let member = Arc::new(Named { name: "x", log: log.clone() });
        let mut set: CapabilitySet<dyn Step> = CapabilitySet::new(|m| m.step());
        set.add(member.clone());
        set.add(member);

        set.dispatch();
        assert_eq!(*log.lock().unwrap(), vec!["x", "x"]);
    }

    #[test]
    fn empty_set_dispatch_is_a_no_op() {
        let set: CapabilitySet<dyn Step> = CapabilitySet::new(|m| m.step());
        assert!(set.is_empty());
        set.dispatch();
        assert_eq!(set.iter().count(), 0);
    }
}
