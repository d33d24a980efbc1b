use tinject::{
    key_of, BindKey, Capability, Container, ContainerObserver, DiError, Field, Inject, Injectable, Lifecycle, Resolver,
    Update, Views,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct EventLog {
    events: Mutex<Vec<String>>,
}

impl EventLog {
    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }

    fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl ContainerObserver for EventLog {
    fn bound(&self, key: &BindKey) {
        self.push(format!("bound {}", short(key)));
    }

    fn assigned(&self, produced: &BindKey, bindings: usize) {
        self.push(format!("assigned {} x{}", short(produced), bindings));
    }

    fn resolved(&self, key: &BindKey, _id: u16, _duration: Duration) {
        self.push(format!("resolved {}", short(key)));
    }

    fn resolve_failed(&self, key: &BindKey, _id: u16, _error: &DiError) {
        self.push(format!("failed {}", short(key)));
    }

    fn injected(&self, owner: &BindKey, field: &'static str, _key: &BindKey, _id: u16) {
        self.push(format!("injected {}.{}", short(owner), field));
    }

    fn routed(&self, key: &BindKey, capability: Capability) {
        self.push(format!("routed {} {:?}", short(key), capability));
    }

    fn finished(&self, bindings: usize, produced: usize, routed: usize) {
        self.push(format!("finished {} {} {}", bindings, produced, routed));
    }
}

fn short(key: &BindKey) -> &'static str {
    let name = key.display_name();
    name.rsplit("::").next().unwrap_or(name)
}

struct Store;

impl Injectable for Store {}

struct Worker {
    store: Inject<Store>,
}

impl Update for Worker {
    fn update(&self) {}
}

impl Injectable for Worker {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("store", &self.store)]
    }

    fn expose(this: &Arc<Self>, views: &mut Views) {
        views.add::<dyn Update>(this.clone());
    }
}

#[test]
fn test_observer_sees_every_phase_in_order() {
    let log = Arc::new(EventLog::default());
    let mut container = Container::new();
    container.add_observer(log.clone());

    container.bind_type::<Store>().to::<Store>().from_instance(Store).unwrap();
    container.bind_type::<dyn Update>().to::<Worker>().from_instance(Worker { store: Inject::new() }).unwrap();
    container.finish_binding(&mut Lifecycle::new()).unwrap();

    assert_eq!(
        log.events(),
        vec![
            "bound Store",
            "assigned Store x1",
            "bound Update",
            "assigned Worker x1",
            "resolved Store",
            "injected Worker.store",
            "routed Update Update",
            "finished 2 2 1",
        ]
    );
}

#[test]
fn test_observer_sees_failed_lookups() {
    let log = Arc::new(EventLog::default());
    let mut container = Container::new();
    container.add_observer(log.clone());

    assert!(container.resolve::<Store>().is_err());
    assert_eq!(log.events(), vec!["failed Store"]);
}

#[test]
fn test_bound_container_keeps_observers() {
    let log = Arc::new(EventLog::default());
    let mut container = Container::new();
    container.add_observer(log.clone());
    container.bind_type::<Store>().to::<Store>().from_instance(Store).unwrap();

    let bound = container.finish_binding(&mut Lifecycle::new()).unwrap();
    bound.resolve::<Store>().unwrap();

    assert_eq!(log.events().last().map(String::as_str), Some("resolved Store"));
}

#[test]
fn test_keys_describe_trait_objects() {
    assert!(key_of::<dyn Update>().display_name().contains("Update"));
}
