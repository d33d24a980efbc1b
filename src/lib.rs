//! # tinject
//!
//! A small binding-driven dependency injection container with field injection
//! and lifecycle dispatch, for frame-driven programs such as games and
//! simulations.
//!
//! ## Features
//!
//! - **Bindings by type and id**: bind concrete types or trait objects, and
//!   tell several bindings of one type apart with a numeric id
//! - **Field injection**: `Inject<T>` slots are filled once binding finishes
//! - **Lifecycle dispatch**: instances bound as `dyn Initialize`, `dyn Start`,
//!   `dyn Update`, `dyn LateUpdate` or `dyn Teardown` are dispatched in
//!   binding order by a driver
//! - **Strict lookups**: missing and ambiguous bindings are errors, never guesses
//!
//! ## Quick Start
//!
//! ```rust
//! use tinject::{Container, DiResult, Field, Host, Inject, Injectable, Update, Views};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str);
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!     fn log(&self, message: &str) {
//!         println!("[LOG] {}", message);
//!     }
//! }
//! impl Injectable for ConsoleLogger {
//!     fn expose(this: &Arc<Self>, views: &mut Views) {
//!         views.add::<dyn Logger>(this.clone());
//!     }
//! }
//!
//! struct Player {
//!     logger: Inject<dyn Logger>,
//!     frames: AtomicU32,
//! }
//! impl Update for Player {
//!     fn update(&self) {
//!         let frame = self.frames.fetch_add(1, Ordering::SeqCst);
//!         self.logger.get().log(&format!("frame {}", frame));
//!     }
//! }
//! impl Injectable for Player {
//!     fn fields(&self) -> Vec<Field<'_>> {
//!         vec![Field::new("logger", &self.logger)]
//!     }
//!     fn expose(this: &Arc<Self>, views: &mut Views) {
//!         views.add::<dyn Update>(this.clone());
//!     }
//! }
//!
//! let mut host = Host::install(&|c: &mut Container| -> DiResult<()> {
//!     c.bind_type::<dyn Logger>().to::<ConsoleLogger>().from_instance(ConsoleLogger)?;
//!     c.bind_type::<dyn Update>()
//!         .to::<Player>()
//!         .from_instance(Player { logger: Inject::new(), frames: AtomicU32::new(0) })?;
//!     Ok(())
//! })?;
//!
//! host.tick();
//! host.tick();
//! host.shutdown();
//! # Ok::<(), tinject::DiError>(())
//! ```
//!
//! ## Ids
//!
//! ```rust
//! use tinject::{key_of, Container, DiError, Injectable, Resolver};
//!
//! struct Channel(&'static str);
//! impl Injectable for Channel {}
//!
//! let mut container = Container::new();
//! container.bind(&[key_of::<Channel>()]).with_id(1)?.to::<Channel>().from_instance(Channel("audio"))?;
//! container.bind(&[key_of::<Channel>()]).with_id(2)?.to::<Channel>().from_instance(Channel("video"))?;
//!
//! assert_eq!(container.resolve_with_id::<Channel>(2)?.0, "video");
//! assert!(matches!(container.resolve::<Channel>(), Err(DiError::AmbiguousBinding { .. })));
//! # Ok::<(), DiError>(())
//! ```

// Module declarations
pub mod config;
pub mod construct;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod host;
pub mod inject;
pub mod key;
pub mod lifecycle;
pub mod observer;
pub mod traits;

mod registration;

// Re-export core types
pub use config::{ConfigProvider, ConfigSource, ConfigValue, EnvironmentConfigSource, HostConfig, LoggingConfig};
#[cfg(feature = "config")]
pub use config::JsonConfigSource;
pub use construct::{Args, Constructible, Constructor};
pub use container::{BoundContainer, Container, ToBinding};
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult};
pub use host::{Host, Installer};
pub use inject::{Field, Inject, InjectTarget};
pub use key::{key_of, BindKey, RESERVED_ID};
pub use lifecycle::{Capability, CapabilityRouter, CapabilitySet, Lifecycle, LifecycleEntry, LifecycleRegistrar};
pub use observer::{ContainerObserver, LoggingObserver};
pub use registration::AnyArc;
pub use traits::{Initialize, Injectable, LateUpdate, Resolver, ResolverCore, Start, Teardown, Update, Views};
