//! Constructor lists and argument packs for `from_new`.
//!
//! Rust has no runtime constructor reflection, so a type lists its
//! constructors explicitly through [`Constructible`]. Only the first declared
//! constructor is considered when arguments are given; overloads with the same
//! arity further down the list are never picked.

use std::any::Any;
use std::collections::VecDeque;
use std::fmt;

use crate::error::{DiError, DiResult};
use crate::traits::Injectable;

/// Ordered constructor arguments.
///
/// # Examples
///
/// ```
/// use tinject::Args;
///
/// let mut args = Args::new().with(8080u16).with("localhost".to_string());
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.next::<u16>()?, 8080);
/// assert_eq!(args.next::<String>()?, "localhost");
/// # Ok::<(), tinject::DiError>(())
/// ```
#[derive(Default)]
pub struct Args {
    values: VecDeque<Box<dyn Any + Send>>,
    taken: usize,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument.
    pub fn with<T: Any + Send>(mut self, value: T) -> Self {
        self.values.push_back(Box::new(value));
        self
    }

    /// Takes the next argument as `T`.
    pub fn next<T: Any>(&mut self) -> DiResult<T> {
        let value = self.values.pop_front().ok_or(DiError::ArgumentCountMismatch {
            type_name: std::any::type_name::<T>(),
            expected: self.taken + 1,
            actual: self.taken,
        })?;
        self.taken += 1;
        value
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| DiError::TypeMismatch {
                expected: std::any::type_name::<T>(),
                found: "a constructor argument of another type",
            })
    }

    /// Arguments not taken yet.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("remaining", &self.values.len())
            .field("taken", &self.taken)
            .finish()
    }
}

type BuildFn<T> = Box<dyn Fn(&mut Args) -> DiResult<T> + Send + Sync>;

/// One declared constructor: its parameter count and how to call it.
pub struct Constructor<T> {
    arity: usize,
    build: BuildFn<T>,
}

impl<T> Constructor<T> {
    pub fn new<F>(arity: usize, build: F) -> Self
    where
        F: Fn(&mut Args) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            arity,
            build: Box::new(build),
        }
    }

    /// A constructor without parameters.
    pub fn nullary<F>(build: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self::new(0, move |_| Ok(build()))
    }

    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor").field("arity", &self.arity).finish()
    }
}

/// A type that can be built by the container from an argument list.
///
/// # Examples
///
/// ```
/// use tinject::{Args, Constructible, Constructor, Injectable};
///
/// struct Endpoint {
///     host: String,
///     port: u16,
/// }
///
/// impl Injectable for Endpoint {}
///
/// impl Constructible for Endpoint {
///     fn constructors() -> Vec<Constructor<Self>> {
///         vec![
///             Constructor::new(2, |args| {
///                 Ok(Endpoint { host: args.next()?, port: args.next()? })
///             }),
///             Constructor::nullary(|| Endpoint { host: "localhost".into(), port: 80 }),
///         ]
///     }
/// }
/// ```
pub trait Constructible: Injectable + Sized {
    /// Constructors in declaration order.
    fn constructors() -> Vec<Constructor<Self>>;
}

/// Builds `T` from `args`.
///
/// Empty `args` select the first zero-arity constructor, wherever it sits in
/// the list. Otherwise only the first declared constructor is tried and its
/// arity must equal `args.len()`.
pub(crate) fn construct<T: Constructible>(mut args: Args) -> DiResult<T> {
    let constructors = T::constructors();
    let type_name = std::any::type_name::<T>();

    let ctor = match constructors.first() {
        Some(first) if !args.is_empty() => {
            if first.arity != args.len() {
                return Err(DiError::ArgumentCountMismatch {
                    type_name,
                    expected: first.arity,
                    actual: args.len(),
                });
            }
            first
        }
        _ => constructors
            .iter()
            .find(|c| c.arity == 0)
            .ok_or(DiError::MissingConstructor(type_name))?,
    };

    (ctor.build)(&mut args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    impl Injectable for Point {}

    impl Constructible for Point {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![
                Constructor::new(2, |args| Ok(Point { x: args.next()?, y: args.next()? })),
                Constructor::new(1, |args| {
                    let v: i32 = args.next()?;
                    Ok(Point { x: v, y: v })
                }),
                Constructor::nullary(|| Point { x: 0, y: 0 }),
            ]
        }
    }

    struct NoDefault;
    impl Injectable for NoDefault {}
    impl Constructible for NoDefault {
        fn constructors() -> Vec<Constructor<Self>> {
            vec![Constructor::new(1, |args| {
                let _: u8 = args.next()?;
                Ok(NoDefault)
            })]
        }
    }

    #[test]
    fn first_constructor_is_used_with_arguments() {
        let p: Point = construct(Args::new().with(3).with(4)).unwrap();
        assert_eq!(p, Point { x: 3, y: 4 });
    }

    #[test]
    fn later_overloads_are_never_considered() {
        let err = construct::<Point>(Args::new().with(3)).unwrap_err();
        assert_eq!(
            err,
            DiError::ArgumentCountMismatch {
                type_name: std::any::type_name::<Point>(),
                expected: 2,
                actual: 1,
            }
        );
    }

    #[test]
    fn empty_arguments_use_zero_arity_constructor() {
        let p: Point = construct(Args::new()).unwrap();
        assert_eq!(p, Point { x: 0, y: 0 });
    }

    #[test]
    fn missing_zero_arity_constructor() {
        let err = construct::<NoDefault>(Args::new()).map(|_| ()).unwrap_err();
        assert!(matches!(err, DiError::MissingConstructor(_)));
    }

    #[test]
    fn wrong_argument_type_is_a_mismatch() {
        let err = construct::<Point>(Args::new().with(1).with("two")).unwrap_err();
        assert!(matches!(err, DiError::TypeMismatch { .. }));
    }

    #[test]
    fn exhausted_arguments_report_count() {
        let mut args = Args::new().with(1u8);
        assert_eq!(args.next::<u8>().unwrap(), 1);
        assert!(matches!(args.next::<u8>(), Err(DiError::ArgumentCountMismatch { .. })));
    }
}
