//! The binding container.
//!
//! A [`Container`] collects bindings in declaration order. Each binding group
//! starts with [`bind`](Container::bind), optionally gets an id with
//! [`with_id`](Container::with_id), and is filled by the instance produced
//! through [`to`](Container::to):
//!
//! ```text
//! bind(types) -> [with_id(id)] -> to::<C>() -> from_instance(c) | from_new(args)
//! ```
//!
//! [`finish_binding`](Container::finish_binding) then injects every produced
//! instance and routes lifecycle bindings to a registrar. It consumes the
//! container; the returned [`BoundContainer`] can only resolve.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

use crate::construct::{construct, Args, Constructible};
use crate::descriptors::BindingDescriptor;
use crate::error::DiResult;
use crate::host::Installer;
use crate::inject::inject_all;
use crate::key::{key_of, BindKey};
use crate::lifecycle::{route_all, LifecycleRegistrar};
use crate::observer::{ContainerObserver, Observers};
use crate::registration::{AnyArc, Registry};
use crate::traits::{Injectable, ResolverCore};

/// Binding container in its declaration phase.
///
/// # Examples
///
/// ```rust
/// use tinject::{Container, Field, Inject, Injectable, Lifecycle, Resolver, Update, Views};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// struct Config {
///     tick_rate: usize,
/// }
/// impl Injectable for Config {}
///
/// struct Simulation {
///     config: Inject<Config>,
///     ticks: AtomicUsize,
/// }
/// impl Update for Simulation {
///     fn update(&self) {
///         self.ticks.fetch_add(self.config.get().tick_rate, Ordering::SeqCst);
///     }
/// }
/// impl Injectable for Simulation {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::new("config", &self.config)]
///     }
///     fn expose(this: &Arc<Self>, views: &mut Views) {
///         views.add::<dyn Update>(this.clone());
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind_type::<Config>().to::<Config>().from_instance(Config { tick_rate: 2 })?;
/// let sim = container
///     .bind_type::<dyn Update>()
///     .to::<Simulation>()
///     .from_instance(Simulation { config: Inject::new(), ticks: AtomicUsize::new(0) })?;
///
/// let mut lifecycle = Lifecycle::new();
/// let bound = container.finish_binding(&mut lifecycle)?;
///
/// lifecycle.update();
/// assert_eq!(sim.ticks.load(Ordering::SeqCst), 2);
/// assert_eq!(bound.resolve::<Config>()?.tick_rate, 2);
/// # Ok::<(), tinject::DiError>(())
/// ```
pub struct Container {
    registry: Registry,
    observers: Observers,
}

impl Container {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            observers: Observers::new(),
        }
    }

    /// Adds an observer notified of every container event.
    pub fn add_observer(&mut self, observer: Arc<dyn ContainerObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    // ----- Declaration -----

    /// Declares one binding per type. They form the pending group that the
    /// next `with_id` and `to` calls apply to.
    pub fn bind(&mut self, types: &[BindKey]) -> &mut Self {
        for key in types {
            self.observers.bound(key);
        }
        self.registry.declare(types);
        self
    }

    /// Declares a single binding for `T`.
    pub fn bind_type<T: ?Sized + 'static>(&mut self) -> &mut Self {
        self.bind(&[key_of::<T>()])
    }

    /// Sets `id` on every binding of the pending group.
    ///
    /// Fails with `InvalidArgument` for `RESERVED_ID`.
    pub fn with_id(&mut self, id: u16) -> DiResult<&mut Self> {
        self.registry.with_id(id)?;
        Ok(self)
    }

    /// Declares a produced instance of `C`; the returned builder supplies it.
    ///
    /// Without a preceding `bind`, the instance is produced only to receive
    /// injection and is not resolvable.
    pub fn to<C: Injectable>(&mut self) -> ToBinding<'_, C> {
        self.registry.declare_produced(key_of::<C>());
        ToBinding {
            container: self,
            _marker: PhantomData,
        }
    }

    /// Runs an installer against this container.
    pub fn install<I: Installer + ?Sized>(&mut self, installer: &I) -> DiResult<&mut Self> {
        installer.install(self)?;
        Ok(self)
    }

    /// Snapshot of every declared binding, in declaration order.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        descriptors_of(&self.registry)
    }

    fn supply<C: Injectable>(&mut self, instance: Arc<C>) -> DiResult<Arc<C>> {
        let pending = self.registry.pending_len();
        self.registry.supply(instance.clone())?;
        self.observers.assigned(&key_of::<C>(), pending);
        Ok(instance)
    }

    // ----- Finish -----

    /// Injects every produced instance, then routes lifecycle bindings.
    ///
    /// Injection completes for all produced instances before anything reaches
    /// `registrar`; an injection failure returns early and registers nothing.
    pub fn finish_binding<R>(self, registrar: &mut R) -> DiResult<BoundContainer>
    where
        R: LifecycleRegistrar + ?Sized,
    {
        inject_all(&self.registry.produced, &self, &self.observers)?;

        let routed = route_all(&self.registry.binds);
        let routed_count = routed.len();
        for (key, entry) in routed {
            self.observers.routed(&key, entry.capability());
            registrar.register_lifecycle(entry);
        }

        self.observers.finished(
            self.registry.binds.len(),
            self.registry.produced.len(),
            routed_count,
        );
        Ok(BoundContainer {
            registry: self.registry,
            observers: self.observers,
        })
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, key: &BindKey, id: u16) -> DiResult<AnyArc> {
        resolve_observed(&self.registry, &self.observers, key, id)
    }
}

/// Supplies the instance declared by [`Container::to`].
///
/// Dropping the builder without calling one of its methods leaves the
/// produced record empty, which `finish_binding` reports as an error.
pub struct ToBinding<'a, C> {
    container: &'a mut Container,
    _marker: PhantomData<fn() -> C>,
}

impl<'a, C: Injectable> ToBinding<'a, C> {
    /// Uses a ready-made instance.
    pub fn from_instance(self, instance: impl Into<Arc<C>>) -> DiResult<Arc<C>> {
        self.container.supply(instance.into())
    }

    /// Builds the instance from `args`.
    ///
    /// Empty `args` use the zero-argument constructor. Otherwise only the
    /// first declared constructor is considered, and its parameter count must
    /// match `args.len()`.
    pub fn from_new(self, args: Args) -> DiResult<Arc<C>>
    where
        C: Constructible,
    {
        let instance = construct::<C>(args)?;
        self.container.supply(Arc::new(instance))
    }

    /// Builds the instance with its zero-argument constructor.
    pub fn from_default(self) -> DiResult<Arc<C>>
    where
        C: Constructible,
    {
        self.from_new(Args::new())
    }
}

/// A container after `finish_binding`: frozen, resolve-only.
pub struct BoundContainer {
    registry: Registry,
    observers: Observers,
}

impl BoundContainer {
    /// Snapshot of every binding, in declaration order.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        descriptors_of(&self.registry)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.registry.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.binds.is_empty()
    }
}

impl ResolverCore for BoundContainer {
    fn resolve_any(&self, key: &BindKey, id: u16) -> DiResult<AnyArc> {
        resolve_observed(&self.registry, &self.observers, key, id)
    }
}

fn resolve_observed(registry: &Registry, observers: &Observers, key: &BindKey, id: u16) -> DiResult<AnyArc> {
    if !observers.has_observers() {
        return registry.lookup_instance(key, id);
    }

    observers.resolving(key, id);
    let started = Instant::now();
    match registry.lookup_instance(key, id) {
        Ok(value) => {
            observers.resolved(key, id, started.elapsed());
            Ok(value)
        }
        Err(e) => {
            observers.resolve_failed(key, id, &e);
            Err(e)
        }
    }
}

fn descriptors_of(registry: &Registry) -> Vec<BindingDescriptor> {
    registry
        .binds
        .iter()
        .map(|record| BindingDescriptor {
            key: record.key,
            raw_id: record.id,
            impl_type_name: record.impl_name,
        })
        .collect()
}
