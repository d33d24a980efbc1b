//! Bind type identities.

use std::any::TypeId;

/// Id value meaning "no discriminator".
///
/// Bindings and injection slots carry this id unless an explicit one is given.
/// It can never be passed as an explicit id.
pub const RESERVED_ID: u16 = 0;

/// Identity of a bind type.
///
/// Pairs the `TypeId` used for lookups with the type name used in diagnostics
/// and error messages. Any `'static` type works, including unsized trait
/// objects, so both `Database` and `dyn Logger` can be bind types.
///
/// # Examples
///
/// ```rust
/// use tinject::BindKey;
///
/// trait Logger: Send + Sync {}
///
/// let concrete = BindKey::of::<String>();
/// let abstract_key = BindKey::of::<dyn Logger>();
///
/// assert_eq!(concrete.display_name(), "alloc::string::String");
/// assert!(abstract_key.display_name().contains("Logger"));
/// assert_ne!(concrete, abstract_key);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BindKey {
    id: TypeId,
    name: &'static str,
}

impl BindKey {
    /// Key for the type `T`.
    #[inline(always)]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The type name, as reported by `std::any::type_name`.
    pub fn display_name(&self) -> &'static str {
        self.name
    }
}

// TypeId-only comparison; the name is diagnostic
impl PartialEq for BindKey {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for BindKey {}

impl std::hash::Hash for BindKey {
    #[inline(always)]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for BindKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

#[inline(always)]
pub fn key_of<T: ?Sized + 'static>() -> BindKey {
    BindKey::of::<T>()
}
