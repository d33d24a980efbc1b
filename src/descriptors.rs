//! Binding descriptors for introspection and diagnostics.

use crate::key::{BindKey, RESERVED_ID};

/// Binding descriptor for introspection and diagnostics
///
/// A snapshot of one declared binding, useful for checking an installer's
/// output or dumping the container at startup.
///
/// # Examples
///
/// ```rust
/// use tinject::{Container, Injectable};
///
/// struct Database;
/// impl Injectable for Database {}
///
/// let mut container = Container::new();
/// container.bind_type::<Database>().with_id(3)?.to::<Database>().from_instance(Database)?;
/// container.bind_type::<u32>();
///
/// let descriptors = container.descriptors();
/// assert_eq!(descriptors.len(), 2);
///
/// let db = &descriptors[0];
/// assert!(db.type_name().contains("Database"));
/// assert_eq!(db.id(), Some(3));
/// assert!(db.is_assigned());
///
/// let pending = &descriptors[1];
/// assert_eq!(pending.id(), None);
/// assert!(!pending.is_assigned());
/// # Ok::<(), tinject::DiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BindingDescriptor {
    /// The declared bind type
    pub key: BindKey,
    /// The raw discriminator, `RESERVED_ID` when none was given
    pub raw_id: u16,
    /// Concrete type of the assigned instance (if any)
    pub impl_type_name: Option<&'static str>,
}

impl BindingDescriptor {
    /// The declared bind type name.
    pub fn type_name(&self) -> &'static str {
        self.key.display_name()
    }

    /// The explicit id, or `None` for an id-less binding.
    pub fn id(&self) -> Option<u16> {
        (self.raw_id != RESERVED_ID).then_some(self.raw_id)
    }

    /// Whether an instance was supplied for this binding.
    pub fn is_assigned(&self) -> bool {
        self.impl_type_name.is_some()
    }
}
