use tinject::{
    key_of, Capability, Container, DiError, DiResult, Field, Host, HostConfig, Initialize, Inject, Injectable,
    LateUpdate, Lifecycle, LifecycleEntry, LifecycleRegistrar, Resolver, Start, Teardown, Update, Views,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Journal = Arc<Mutex<Vec<String>>>;

fn journal() -> Journal {
    Arc::new(Mutex::new(Vec::new()))
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

struct Service {
    name: &'static str,
    journal: Journal,
}

impl Service {
    fn new(name: &'static str, journal: &Journal) -> Self {
        Self { name, journal: journal.clone() }
    }

    fn record(&self, event: &str) {
        self.journal.lock().unwrap().push(format!("{}.{}", self.name, event));
    }
}

impl Initialize for Service {
    fn initialize(&self) {
        self.record("initialize");
    }
}

impl Start for Service {
    fn start(&self) {
        self.record("start");
    }
}

impl Update for Service {
    fn update(&self) {
        self.record("update");
    }
}

impl LateUpdate for Service {
    fn late_update(&self) {
        self.record("late_update");
    }
}

impl Teardown for Service {
    fn teardown(&self) {
        self.record("teardown");
    }
}

impl Injectable for Service {
    fn expose(this: &Arc<Self>, views: &mut Views) {
        views
            .add::<dyn Initialize>(this.clone())
            .add::<dyn Start>(this.clone())
            .add::<dyn Update>(this.clone())
            .add::<dyn LateUpdate>(this.clone())
            .add::<dyn Teardown>(this.clone());
    }
}

#[test]
fn test_update_binding_yields_one_entry() {
    let log = journal();
    let mut container = Container::new();
    container.bind_type::<dyn Update>().to::<Service>().from_instance(Service::new("svc", &log)).unwrap();

    let mut lifecycle = Lifecycle::new();
    container.finish_binding(&mut lifecycle).unwrap();

    assert_eq!(lifecycle.len(Capability::Update), 1);
    assert_eq!(lifecycle.len(Capability::Initialize), 0);
    assert_eq!(lifecycle.len(Capability::Teardown), 0);

    lifecycle.update();
    assert_eq!(entries(&log), vec!["svc.update"]);
}

#[test]
fn test_concrete_binding_is_never_routed() {
    let log = journal();
    let mut container = Container::new();
    container.bind_type::<Service>().to::<Service>().from_instance(Service::new("svc", &log)).unwrap();

    let mut lifecycle = Lifecycle::new();
    let bound = container.finish_binding(&mut lifecycle).unwrap();

    assert!(lifecycle.is_empty());
    assert!(bound.resolve::<Service>().is_ok());
}

#[test]
fn test_each_declared_capability_is_routed() {
    let log = journal();
    let mut container = Container::new();
    container
        .bind(&[key_of::<dyn Initialize>(), key_of::<dyn Update>(), key_of::<dyn Teardown>()])
        .to::<Service>()
        .from_instance(Service::new("svc", &log))
        .unwrap();

    let mut lifecycle = Lifecycle::new();
    container.finish_binding(&mut lifecycle).unwrap();

    assert_eq!(lifecycle.len(Capability::Initialize), 1);
    assert_eq!(lifecycle.len(Capability::Start), 0);
    assert_eq!(lifecycle.len(Capability::Update), 1);
    assert_eq!(lifecycle.len(Capability::LateUpdate), 0);
    assert_eq!(lifecycle.len(Capability::Teardown), 1);
}

#[test]
fn test_dispatch_follows_binding_order() {
    let log = journal();
    let mut container = Container::new();
    for name in ["a", "b", "c"] {
        container.bind_type::<dyn Update>().to::<Service>().from_instance(Service::new(name, &log)).unwrap();
    }

    let mut lifecycle = Lifecycle::new();
    container.finish_binding(&mut lifecycle).unwrap();

    lifecycle.update();
    lifecycle.update();
    assert_eq!(entries(&log), vec!["a.update", "b.update", "c.update", "a.update", "b.update", "c.update"]);
}

#[test]
fn test_capability_sets_hold_shared_instances() {
    let log = journal();
    let mut container = Container::new();
    let service = container
        .bind(&[key_of::<dyn Start>(), key_of::<dyn Update>()])
        .to::<Service>()
        .from_instance(Service::new("svc", &log))
        .unwrap();

    let mut lifecycle = Lifecycle::new();
    container.finish_binding(&mut lifecycle).unwrap();

    let member = lifecycle.update_set().iter().next().unwrap();
    assert!(Arc::ptr_eq(member, &(service.clone() as Arc<dyn Update>)));
    assert_eq!(lifecycle.start_set().len(), 1);
}

#[test]
fn test_custom_registrar_receives_entries() {
    #[derive(Default)]
    struct Recorder(Vec<Capability>);

    impl LifecycleRegistrar for Recorder {
        fn register_lifecycle(&mut self, entry: LifecycleEntry) {
            self.0.push(entry.capability());
        }
    }

    let log = journal();
    let mut container = Container::new();
    container
        .bind(&[key_of::<dyn LateUpdate>(), key_of::<dyn Start>()])
        .to::<Service>()
        .from_instance(Service::new("svc", &log))
        .unwrap();

    let mut recorder = Recorder::default();
    container.finish_binding(&mut recorder).unwrap();
    assert_eq!(recorder.0, vec![Capability::LateUpdate, Capability::Start]);
}

#[test]
fn test_host_drives_every_phase() {
    let log = journal();
    let shared = log.clone();
    let mut host = Host::install(&move |c: &mut Container| -> DiResult<()> {
        c.bind(&[
            key_of::<dyn Initialize>(),
            key_of::<dyn Start>(),
            key_of::<dyn Update>(),
            key_of::<dyn LateUpdate>(),
            key_of::<dyn Teardown>(),
        ])
        .to::<Service>()
        .from_instance(Service::new("svc", &shared))?;
        Ok(())
    })
    .unwrap();

    assert_eq!(entries(&log), vec!["svc.initialize"]);
    assert!(!host.is_started());

    host.tick();
    host.tick();
    assert!(host.is_started());
    host.shutdown();

    assert_eq!(
        entries(&log),
        vec![
            "svc.initialize",
            "svc.start",
            "svc.update",
            "svc.late_update",
            "svc.update",
            "svc.late_update",
            "svc.teardown",
        ]
    );
}

#[test]
fn test_host_start_runs_once() {
    let log = journal();
    let shared = log.clone();
    let mut host = Host::install(&move |c: &mut Container| -> DiResult<()> {
        c.bind_type::<dyn Start>().to::<Service>().from_instance(Service::new("svc", &shared))?;
        Ok(())
    })
    .unwrap();

    host.start();
    host.start();
    host.tick();
    assert_eq!(entries(&log), vec!["svc.start"]);
}

#[test]
fn test_dropped_host_still_tears_down() {
    let log = journal();
    {
        let shared = log.clone();
        let mut host = Host::install(&move |c: &mut Container| -> DiResult<()> {
            c.bind_type::<dyn Teardown>().to::<Service>().from_instance(Service::new("svc", &shared))?;
            Ok(())
        })
        .unwrap();
        host.tick();
        assert!(entries(&log).is_empty());
    }

    assert_eq!(entries(&log), vec!["svc.teardown"]);
}

#[test]
fn test_shutdown_tears_down_once() {
    let log = journal();
    let shared = log.clone();
    let host = Host::install(&move |c: &mut Container| -> DiResult<()> {
        c.bind_type::<dyn Teardown>().to::<Service>().from_instance(Service::new("svc", &shared))?;
        Ok(())
    })
    .unwrap();

    host.shutdown();
    assert_eq!(entries(&log), vec!["svc.teardown"]);
}

#[derive(Default)]
struct Clock(AtomicUsize);

impl Injectable for Clock {}

struct Ticker {
    clock: Inject<Clock>,
}

impl Update for Ticker {
    fn update(&self) {
        self.clock.get().0.fetch_add(1, Ordering::SeqCst);
    }
}

impl Injectable for Ticker {
    fn fields(&self) -> Vec<Field<'_>> {
        vec![Field::new("clock", &self.clock)]
    }

    fn expose(this: &Arc<Self>, views: &mut Views) {
        views.add::<dyn Update>(this.clone());
    }
}

#[test]
fn test_host_bindings_stay_resolvable() {
    let mut host = Host::install(&|c: &mut Container| -> DiResult<()> {
        c.bind_type::<Clock>().to::<Clock>().from_instance(Clock::default())?;
        c.bind_type::<dyn Update>().to::<Ticker>().from_instance(Ticker { clock: Inject::new() })?;
        Ok(())
    })
    .unwrap();

    host.tick();
    host.update();

    let clock = host.bindings().resolve::<Clock>().unwrap();
    assert_eq!(clock.0.load(Ordering::SeqCst), 2);
}

#[test]
fn test_host_setup_failure_is_returned() {
    let result = Host::install(&|c: &mut Container| -> DiResult<()> {
        c.bind_type::<dyn Update>().to::<Ticker>().from_instance(Ticker { clock: Inject::new() })?;
        Ok(())
    });

    assert!(matches!(result, Err(DiError::NotFound { .. })));
}

#[test]
fn test_host_with_config_installs() {
    let config = HostConfig::default();
    let host = Host::with_config(
        &|c: &mut Container| -> DiResult<()> {
            c.bind_type::<Clock>().to::<Clock>().from_instance(Clock::default())?;
            Ok(())
        },
        &config,
    )
    .unwrap();

    assert_eq!(host.bindings().len(), 1);
    assert!(host.lifecycle().is_empty());
}
