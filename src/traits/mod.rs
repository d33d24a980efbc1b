//! Core traits for the injection container.

mod injectable;
mod lifecycle;
mod resolver;

pub use injectable::{Injectable, Views};
pub(crate) use injectable::views_of;
pub use lifecycle::{Initialize, Start, Update, LateUpdate, Teardown};
pub use resolver::{Resolver, ResolverCore};
