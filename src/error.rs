//! Error types for the injection container.

use std::fmt;

/// Injection container errors
///
/// Every failure raised while declaring bindings, constructing instances,
/// resolving, or injecting fields. None of them are logged and swallowed; they
/// are returned to the caller as soon as they occur.
///
/// # Examples
///
/// ```rust
/// use tinject::{Container, DiError, Resolver};
///
/// let container = Container::new();
/// match container.resolve::<String>() {
///     Err(DiError::NotFound { type_name, id }) => {
///         assert_eq!(type_name, "alloc::string::String");
///         assert_eq!(id, None);
///     }
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use tinject::DiError;
///
/// let ambiguous = DiError::AmbiguousBinding { type_name: "dyn app::Logger", id: None };
/// assert!(ambiguous.to_string().contains("with_id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// The reserved id was passed where an explicit id is required
    InvalidArgument(String),
    /// No binding matches the requested type (and id)
    NotFound {
        type_name: &'static str,
        id: Option<u16>,
    },
    /// More than one binding matches the requested type (and id)
    AmbiguousBinding {
        type_name: &'static str,
        id: Option<u16>,
    },
    /// The argument list does not fit the first declared constructor
    ArgumentCountMismatch {
        type_name: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A value could not be viewed as the requested type
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// No zero-argument constructor is declared for the produced type
    MissingConstructor(&'static str),
    /// Call sequencing broke a container invariant
    InternalInvariantViolation(&'static str),
    /// A configuration source could not be read
    Config(String),
}

fn id_suffix(id: &Option<u16>) -> String {
    match id {
        Some(id) => format!(" with id {}", id),
        None => String::new(),
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            DiError::NotFound { type_name, id } => {
                write!(f, "Cannot find the instance of type {}{}", type_name, id_suffix(id))
            }
            DiError::AmbiguousBinding { type_name, id } => write!(
                f,
                "Found multiple instances of type {}{}. Perhaps you should bind with_id and inject with Inject::with_id",
                type_name,
                id_suffix(id)
            ),
            DiError::ArgumentCountMismatch { type_name, expected, actual } => write!(
                f,
                "Constructor of {} takes {} arguments but {} were supplied",
                type_name, expected, actual
            ),
            DiError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            DiError::MissingConstructor(name) => {
                write!(f, "No zero-argument constructor declared for {}", name)
            }
            DiError::InternalInvariantViolation(msg) => {
                write!(f, "Internal invariant violated: {}", msg)
            }
            DiError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for container operations
///
/// A convenience alias for `Result<T, DiError>` used throughout tinject.
///
/// # Examples
///
/// ```rust
/// use tinject::{DiResult, DiError};
///
/// fn failing_operation() -> DiResult<()> {
///     Err(DiError::MissingConstructor("app::Service"))
/// }
///
/// assert!(failing_operation().is_err());
/// ```
pub type DiResult<T> = Result<T, DiError>;
