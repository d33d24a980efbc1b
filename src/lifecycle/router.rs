//! Exact-match routing of bindings into lifecycle sets.

use std::sync::Arc;

use super::{Capability, LifecycleEntry};
use crate::key::BindKey;
use crate::registration::{AnyArc, BindRecord};
use crate::traits::{Initialize, LateUpdate, Start, Teardown, Update};

/// Decides which lifecycle set, if any, receives a binding.
///
/// A binding is routed only when its declared bind type is exactly one of the
/// capability trait objects. An instance bound as `Player` is never routed,
/// even if `Player` implements [`Update`]; bind it as `dyn Update` as well.
///
/// # Examples
///
/// ```
/// use tinject::{AnyArc, BindKey, Capability, CapabilityRouter, Update};
/// use std::sync::Arc;
///
/// struct Player;
/// impl Update for Player {
///     fn update(&self) {}
/// }
///
/// let player = Arc::new(Player);
/// let as_update: AnyArc = Arc::new(player.clone() as Arc<dyn Update>);
/// let as_player: AnyArc = Arc::new(player);
///
/// let entry = CapabilityRouter::route(&BindKey::of::<dyn Update>(), &as_update).unwrap();
/// assert_eq!(entry.capability(), Capability::Update);
/// assert!(CapabilityRouter::route(&BindKey::of::<Player>(), &as_player).is_none());
/// ```
pub struct CapabilityRouter;

impl CapabilityRouter {
    /// Routes one binding stored under `key`.
    pub fn route(key: &BindKey, instance: &AnyArc) -> Option<LifecycleEntry> {
        let capability = Capability::ALL.into_iter().find(|c| c.bind_key() == *key)?;
        let entry = match capability {
            Capability::Initialize => LifecycleEntry::Initialize(view::<dyn Initialize>(instance)?),
            Capability::Start => LifecycleEntry::Start(view::<dyn Start>(instance)?),
            Capability::Update => LifecycleEntry::Update(view::<dyn Update>(instance)?),
            Capability::LateUpdate => LifecycleEntry::LateUpdate(view::<dyn LateUpdate>(instance)?),
            Capability::Teardown => LifecycleEntry::Teardown(view::<dyn Teardown>(instance)?),
        };
        Some(entry)
    }
}

// Implements the capability only if the binding holds that trait object
fn view<T: ?Sized + 'static>(instance: &AnyArc) -> Option<Arc<T>> {
    instance.downcast_ref::<Arc<T>>().cloned()
}

/// Routes every assigned binding, in declaration order.
pub(crate) fn route_all(binds: &[BindRecord]) -> Vec<(BindKey, LifecycleEntry)> {
    binds
        .iter()
        .filter_map(|record| {
            let instance = record.instance.as_ref()?;
            CapabilityRouter::route(&record.key, instance).map(|entry| (record.key, entry))
        })
        .collect()
}
