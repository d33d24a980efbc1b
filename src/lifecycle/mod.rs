//! Lifecycle capabilities, their sets, and routing.
//!
//! [`finish_binding`](crate::Container::finish_binding) hands every binding
//! declared under a capability trait object to a [`LifecycleRegistrar`].
//! [`Lifecycle`] is the stock registrar: it owns one [`CapabilitySet`] per
//! capability and dispatches them on request.

use std::fmt;
use std::sync::Arc;

use crate::key::{key_of, BindKey};
use crate::traits::{Initialize, LateUpdate, Start, Teardown, Update};

mod router;
mod set;

pub use router::CapabilityRouter;
pub(crate) use router::route_all;
pub use set::CapabilitySet;

/// The five lifecycle capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Once, right after binding finished
    Initialize,
    /// Once, before the first frame
    Start,
    /// Every frame
    Update,
    /// Every frame, after update
    LateUpdate,
    /// Once, at teardown
    Teardown,
}

impl Capability {
    pub const ALL: [Capability; 5] = [
        Capability::Initialize,
        Capability::Start,
        Capability::Update,
        Capability::LateUpdate,
        Capability::Teardown,
    ];

    /// The trait object type a binding must be declared under to be routed here.
    pub fn bind_key(self) -> BindKey {
        match self {
            Capability::Initialize => key_of::<dyn Initialize>(),
            Capability::Start => key_of::<dyn Start>(),
            Capability::Update => key_of::<dyn Update>(),
            Capability::LateUpdate => key_of::<dyn LateUpdate>(),
            Capability::Teardown => key_of::<dyn Teardown>(),
        }
    }
}

/// A lifecycle-capable instance together with the capability it was declared under.
#[derive(Clone)]
pub enum LifecycleEntry {
    Initialize(Arc<dyn Initialize>),
    Start(Arc<dyn Start>),
    Update(Arc<dyn Update>),
    LateUpdate(Arc<dyn LateUpdate>),
    Teardown(Arc<dyn Teardown>),
}

impl LifecycleEntry {
    pub fn capability(&self) -> Capability {
        match self {
            LifecycleEntry::Initialize(_) => Capability::Initialize,
            LifecycleEntry::Start(_) => Capability::Start,
            LifecycleEntry::Update(_) => Capability::Update,
            LifecycleEntry::LateUpdate(_) => Capability::LateUpdate,
            LifecycleEntry::Teardown(_) => Capability::Teardown,
        }
    }
}

impl fmt::Debug for LifecycleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LifecycleEntry").field(&self.capability()).finish()
    }
}

/// Receiver of routed lifecycle entries, implemented by the driver.
pub trait LifecycleRegistrar {
    fn register_lifecycle(&mut self, entry: LifecycleEntry);
}

/// The five lifecycle sets of one driver.
///
/// # Examples
///
/// ```
/// use tinject::{Capability, Lifecycle, LifecycleEntry, LifecycleRegistrar, Update};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Counter(AtomicUsize);
/// impl Update for Counter {
///     fn update(&self) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
/// }
///
/// let counter = Arc::new(Counter(AtomicUsize::new(0)));
/// let mut lifecycle = Lifecycle::new();
/// lifecycle.register_lifecycle(LifecycleEntry::Update(counter.clone()));
///
/// lifecycle.update();
/// lifecycle.late_update();
/// assert_eq!(counter.0.load(Ordering::SeqCst), 1);
/// assert_eq!(lifecycle.len(Capability::Update), 1);
/// ```
pub struct Lifecycle {
    initialize: CapabilitySet<dyn Initialize>,
    start: CapabilitySet<dyn Start>,
    update: CapabilitySet<dyn Update>,
    late_update: CapabilitySet<dyn LateUpdate>,
    teardown: CapabilitySet<dyn Teardown>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            initialize: CapabilitySet::new(|m| m.initialize()),
            start: CapabilitySet::new(|m| m.start()),
            update: CapabilitySet::new(|m| m.update()),
            late_update: CapabilitySet::new(|m| m.late_update()),
            teardown: CapabilitySet::new(|m| m.teardown()),
        }
    }

    pub fn initialize(&self) {
        self.initialize.dispatch();
    }

    pub fn start(&self) {
        self.start.dispatch();
    }

    pub fn update(&self) {
        self.update.dispatch();
    }

    pub fn late_update(&self) {
        self.late_update.dispatch();
    }

    pub fn teardown(&self) {
        self.teardown.dispatch();
    }

    /// Members registered for `capability`.
    pub fn len(&self, capability: Capability) -> usize {
        match capability {
            Capability::Initialize => self.initialize.len(),
            Capability::Start => self.start.len(),
            Capability::Update => self.update.len(),
            Capability::LateUpdate => self.late_update.len(),
            Capability::Teardown => self.teardown.len(),
        }
    }

    /// True when no capability has members.
    pub fn is_empty(&self) -> bool {
        Capability::ALL.into_iter().all(|c| self.len(c) == 0)
    }

    pub fn initialize_set(&self) -> &CapabilitySet<dyn Initialize> {
        &self.initialize
    }

    pub fn start_set(&self) -> &CapabilitySet<dyn Start> {
        &self.start
    }

    pub fn update_set(&self) -> &CapabilitySet<dyn Update> {
        &self.update
    }

    pub fn late_update_set(&self) -> &CapabilitySet<dyn LateUpdate> {
        &self.late_update
    }

    pub fn teardown_set(&self) -> &CapabilitySet<dyn Teardown> {
        &self.teardown
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lifecycle")
            .field("initialize", &self.initialize.len())
            .field("start", &self.start.len())
            .field("update", &self.update.len())
            .field("late_update", &self.late_update.len())
            .field("teardown", &self.teardown.len())
            .finish()
    }
}

impl LifecycleRegistrar for Lifecycle {
    fn register_lifecycle(&mut self, entry: LifecycleEntry) {
        match entry {
            LifecycleEntry::Initialize(m) => self.initialize.add(m),
            LifecycleEntry::Start(m) => self.start.add(m),
            LifecycleEntry::Update(m) => self.update.add(m),
            LifecycleEntry::LateUpdate(m) => self.late_update.add(m),
            LifecycleEntry::Teardown(m) => self.teardown.add(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Everything {
        log: Mutex<Vec<&'static str>>,
    }

    impl Initialize for Everything {
        fn initialize(&self) {
            self.log.lock().unwrap().push("initialize");
        }
    }
    impl Start for Everything {
        fn start(&self) {
            self.log.lock().unwrap().push("start");
        }
    }
    impl Update for Everything {
        fn update(&self) {
            self.log.lock().unwrap().push("update");
        }
    }
    impl LateUpdate for Everything {
        fn late_update(&self) {
            self.log.lock().unwrap().push("late_update");
        }
    }
    impl Teardown for Everything {
        fn teardown(&self) {
            self.log.lock().unwrap().push("teardown");
        }
    }

    #[test]
    fn registrar_sorts_entries_into_their_sets() {
        let all = Arc::new(Everything { log: Mutex::new(Vec::new()) });
        let mut lifecycle = Lifecycle::new();
        assert!(lifecycle.is_empty());

        lifecycle.register_lifecycle(LifecycleEntry::Teardown(all.clone()));
        lifecycle.register_lifecycle(LifecycleEntry::Update(all.clone()));
        lifecycle.register_lifecycle(LifecycleEntry::Initialize(all.clone()));

        assert_eq!(lifecycle.len(Capability::Initialize), 1);
        assert_eq!(lifecycle.len(Capability::Start), 0);
        assert_eq!(lifecycle.len(Capability::Update), 1);
        assert_eq!(lifecycle.len(Capability::LateUpdate), 0);
        assert_eq!(lifecycle.len(Capability::Teardown), 1);

        lifecycle.initialize();
        lifecycle.start();
        lifecycle.update();
        lifecycle.late_update();
        lifecycle.teardown();

        assert_eq!(*all.log.lock().unwrap(), vec!["initialize", "update", "teardown"]);
    }

    #[test]
    fn capability_keys_are_distinct() {
        for (i, a) in Capability::ALL.iter().enumerate() {
            for b in &Capability::ALL[i + 1..] {
                assert_ne!(a.bind_key(), b.bind_key());
            }
        }
    }

    #[test]
    fn entry_reports_its_capability() {
        let all = Arc::new(Everything { log: Mutex::new(Vec::new()) });
        let entry = LifecycleEntry::LateUpdate(all);
        assert_eq!(entry.capability(), Capability::LateUpdate);
        assert_eq!(format!("{:?}", entry), "LifecycleEntry(LateUpdate)");
    }
}
