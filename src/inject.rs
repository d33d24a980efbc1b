//! Field injection markers and the injection pass.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{DiError, DiResult};
use crate::key::{key_of, BindKey, RESERVED_ID};
use crate::observer::Observers;
use crate::registration::{AnyArc, ProducedRecord};
use crate::traits::ResolverCore;

/// A field that wants a dependency injected.
///
/// Declare the field with `Inject::new()` to resolve by type alone, or with
/// `Inject::with_id(id)` to pick one of several bindings of the same type.
/// The container fills the slot exactly once, during
/// [`finish_binding`](crate::Container::finish_binding).
///
/// # Examples
///
/// ```rust
/// use tinject::{Inject, Injectable, Field};
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// struct Scheduler {
///     clock: Inject<dyn Clock>,
///     backup_clock: Inject<dyn Clock>,
/// }
///
/// impl Injectable for Scheduler {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![
///             Field::new("clock", &self.clock),
///             Field::new("backup_clock", &self.backup_clock),
///         ]
///     }
/// }
///
/// let scheduler = Scheduler {
///     clock: Inject::new(),
///     backup_clock: Inject::with_id(2),
/// };
/// assert!(!scheduler.clock.is_injected());
/// assert_eq!(scheduler.backup_clock.id(), 2);
/// ```
pub struct Inject<T: ?Sized> {
    id: u16,
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized> Inject<T> {
    /// A slot resolved by its type alone.
    pub fn new() -> Self {
        Self {
            id: RESERVED_ID,
            cell: OnceCell::new(),
        }
    }

    /// A slot resolved by type and id. An id of `RESERVED_ID` behaves like `new()`.
    pub fn with_id(id: u16) -> Self {
        Self {
            id,
            cell: OnceCell::new(),
        }
    }

    /// The marker id.
    pub fn id(&self) -> u16 {
        self.id
    }

    /// The injected value.
    ///
    /// # Panics
    ///
    /// Panics when read before the container finished binding.
    pub fn get(&self) -> &Arc<T> {
        match self.cell.get() {
            Some(value) => value,
            None => panic!(
                "Inject<{}> read before injection",
                std::any::type_name::<T>()
            ),
        }
    }

    /// The injected value, or `None` before injection.
    pub fn try_get(&self) -> Option<&Arc<T>> {
        self.cell.get()
    }

    pub fn is_injected(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl<T: ?Sized> Default for Inject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inject")
            .field("type", &std::any::type_name::<T>())
            .field("id", &self.id)
            .field("injected", &self.is_injected())
            .finish()
    }
}

/// Object-safe view of an injection slot.
///
/// Implemented by [`Inject`]; the container only needs the target type, the
/// marker id, and a way to assign the resolved value.
pub trait InjectTarget: Send + Sync {
    /// The bind type this slot resolves.
    fn bind_key(&self) -> BindKey;

    /// The marker id, `RESERVED_ID` when none was given.
    fn id(&self) -> u16;

    /// Stores a resolved binding into the slot.
    fn assign(&self, value: &AnyArc) -> DiResult<()>;
}

impl<T: ?Sized + Send + Sync + 'static> InjectTarget for Inject<T> {
    fn bind_key(&self) -> BindKey {
        key_of::<T>()
    }

    fn id(&self) -> u16 {
        self.id
    }

    fn assign(&self, value: &AnyArc) -> DiResult<()> {
        let arc = value
            .downcast_ref::<Arc<T>>()
            .ok_or(DiError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: "a binding stored under another type",
            })?
            .clone();
        self.cell
            .set(arc)
            .map_err(|_| DiError::InternalInvariantViolation("injection slot assigned twice"))
    }
}

/// Per-field injection descriptor: a field name and its slot.
#[derive(Clone, Copy)]
pub struct Field<'a> {
    name: &'static str,
    target: &'a dyn InjectTarget,
}

impl<'a> Field<'a> {
    pub fn new(name: &'static str, target: &'a dyn InjectTarget) -> Self {
        Self { name, target }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bind_key(&self) -> BindKey {
        self.target.bind_key()
    }

    pub fn id(&self) -> u16 {
        self.target.id()
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("type", &self.bind_key().display_name())
            .field("id", &self.id())
            .finish()
    }
}

/// Fills every marked field of every produced instance.
///
/// Stops at the first failure; resolution errors propagate unchanged.
pub(crate) fn inject_all(
    produced: &[ProducedRecord],
    resolver: &dyn ResolverCore,
    observers: &Observers,
) -> DiResult<()> {
    for record in produced {
        let instance = record.instance.as_ref().ok_or(DiError::InternalInvariantViolation(
            "produced type was never given an instance",
        ))?;
        for field in instance.fields() {
            let key = field.bind_key();
            let value = resolver.resolve_any(&key, field.id())?;
            field.target.assign(&value)?;
            observers.injected(&record.produced_key, field.name, &key, field.id());
        }
    }
    Ok(())
}
