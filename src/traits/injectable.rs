//! Component traits for produced instances.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::inject::Field;
use crate::key::{key_of, BindKey};
use crate::registration::AnyArc;

/// A concrete type the container can produce and inject into.
///
/// `fields` lists the injection slots of the instance. `expose` lists the bind
/// types the instance may be bound under besides its own concrete type,
/// normally the trait objects it implements.
///
/// # Examples
///
/// ```
/// use tinject::{Container, Field, Inject, Injectable, Resolver, Update, Views};
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync {
///     fn log(&self, msg: &str);
/// }
///
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger {
///     fn log(&self, msg: &str) {
///         println!("{}", msg);
///     }
/// }
/// impl Injectable for ConsoleLogger {
///     fn expose(this: &Arc<Self>, views: &mut Views) {
///         views.add::<dyn Logger>(this.clone());
///     }
/// }
///
/// struct Player {
///     logger: Inject<dyn Logger>,
/// }
/// impl Update for Player {
///     fn update(&self) {
///         self.logger.get().log("tick");
///     }
/// }
/// impl Injectable for Player {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::new("logger", &self.logger)]
///     }
///     fn expose(this: &Arc<Self>, views: &mut Views) {
///         views.add::<dyn Update>(this.clone());
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind_type::<dyn Logger>().to::<ConsoleLogger>().from_instance(ConsoleLogger)?;
/// container
///     .bind_type::<dyn Update>()
///     .to::<Player>()
///     .from_instance(Player { logger: Inject::new() })?;
///
/// let logger = container.resolve::<dyn Logger>()?;
/// logger.log("bound");
/// # Ok::<(), tinject::DiError>(())
/// ```
pub trait Injectable: Any + Send + Sync {
    /// Injection slots of this instance, in declaration order.
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    /// Adds the bind types this instance can be viewed as.
    fn expose(this: &Arc<Self>, views: &mut Views)
    where
        Self: Sized,
    {
        let _ = (this, views);
    }
}

/// The bind types one produced instance can be viewed as.
///
/// Each entry holds the instance already coerced to that type, so a binding
/// under `dyn Logger` stores an `Arc<dyn Logger>`.
#[derive(Default)]
pub struct Views {
    entries: Vec<(BindKey, AnyArc)>,
}

impl Views {
    pub(crate) fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Exposes the instance as `T`. A later view of the same type replaces it.
    pub fn add<T>(&mut self, view: Arc<T>) -> &mut Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = key_of::<T>();
        let stored: AnyArc = Arc::new(view);
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = stored,
            None => self.entries.push((key, stored)),
        }
        self
    }

    pub(crate) fn get(&self, key: &BindKey) -> Option<&AnyArc> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Bind types exposed so far.
    pub fn keys(&self) -> impl Iterator<Item = BindKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Views {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(k, _)| k.display_name()))
            .finish()
    }
}

/// Builds the view table of `instance`: its concrete type first, then
/// whatever it exposes.
pub(crate) fn views_of<C: Injectable>(instance: &Arc<C>) -> Views {
    let mut views = Views::new();
    views.add::<C>(instance.clone());
    C::expose(instance, &mut views);
    views
}
