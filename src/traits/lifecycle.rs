//! Lifecycle capability traits.
//!
//! An instance opts into a lifecycle step by implementing the matching trait
//! and being bound under exactly that trait object type, e.g.
//! `bind_type::<dyn Update>()`. A driver such as [`Host`](crate::Host)
//! decides when each step fires.

/// Runs once, right after the container finished binding.
///
/// # Examples
///
/// ```
/// use tinject::Initialize;
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// struct Cache {
///     warmed: AtomicBool,
/// }
///
/// impl Initialize for Cache {
///     fn initialize(&self) {
///         self.warmed.store(true, Ordering::SeqCst);
///     }
/// }
/// ```
pub trait Initialize: Send + Sync + 'static {
    fn initialize(&self);
}

/// Runs once, before the first frame.
pub trait Start: Send + Sync + 'static {
    fn start(&self);
}

/// Runs every frame.
pub trait Update: Send + Sync + 'static {
    fn update(&self);
}

/// Runs every frame after all [`Update`] members ran.
pub trait LateUpdate: Send + Sync + 'static {
    fn late_update(&self);
}

/// Runs once when the driver is torn down.
pub trait Teardown: Send + Sync + 'static {
    fn teardown(&self);
}
