//! Resolver traits for binding lookup.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::{key_of, BindKey, RESERVED_ID};
use crate::registration::AnyArc;

/// Core resolver trait for object-safe lookup.
///
/// Implemented by [`Container`](crate::Container) and
/// [`BoundContainer`](crate::BoundContainer). Most callers use [`Resolver`],
/// which adds typed methods on top.
pub trait ResolverCore {
    /// Looks up the single binding for `key`.
    ///
    /// With `id == RESERVED_ID` every binding of `key` is a candidate, whatever
    /// its id. Otherwise only bindings carrying `id` are.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - the stored binding, an `Arc<T>` for the bind type `T`
    /// * `Err(DiError::NotFound)` - no candidate
    /// * `Err(DiError::AmbiguousBinding)` - more than one candidate
    fn resolve_any(&self, key: &BindKey, id: u16) -> DiResult<AnyArc>;
}

/// Typed resolution on top of [`ResolverCore`].
///
/// # Examples
///
/// ```
/// use tinject::{Container, DiError, Injectable, Resolver, Views};
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync {
///     fn name(&self) -> &str;
/// }
///
/// struct NamedLogger(&'static str);
/// impl Logger for NamedLogger {
///     fn name(&self) -> &str {
///         self.0
///     }
/// }
/// impl Injectable for NamedLogger {
///     fn expose(this: &Arc<Self>, views: &mut Views) {
///         views.add::<dyn Logger>(this.clone());
///     }
/// }
///
/// let mut container = Container::new();
/// container.bind_type::<dyn Logger>().with_id(1)?.to::<NamedLogger>().from_instance(NamedLogger("file"))?;
/// container.bind_type::<dyn Logger>().with_id(2)?.to::<NamedLogger>().from_instance(NamedLogger("console"))?;
///
/// assert_eq!(container.resolve_with_id::<dyn Logger>(1)?.name(), "file");
/// assert_eq!(container.resolve_with_id::<dyn Logger>(2)?.name(), "console");
/// assert!(matches!(
///     container.resolve::<dyn Logger>(),
///     Err(DiError::AmbiguousBinding { .. })
/// ));
/// # Ok::<(), DiError>(())
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves the single binding of `T`.
    fn resolve<T>(&self) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        downcast::<T>(self.resolve_any(&key_of::<T>(), RESERVED_ID)?)
    }

    /// Resolves the binding of `T` declared with `id`.
    ///
    /// Fails with `InvalidArgument` when `id` is the reserved id.
    fn resolve_with_id<T>(&self, id: u16) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        if id == RESERVED_ID {
            return Err(DiError::InvalidArgument(format!(
                "id {} is reserved by the injection container, please specify a number greater than {}",
                id, RESERVED_ID
            )));
        }
        downcast::<T>(self.resolve_any(&key_of::<T>(), id)?)
    }

    /// Resolves the single binding of `T`, panicking on failure.
    fn resolve_required<T>(&self) -> Arc<T>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

fn downcast<T>(any: AnyArc) -> DiResult<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    any.downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or(DiError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: "a binding stored under another type",
        })
}
