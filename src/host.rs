//! Installers and the lifecycle driver.

use std::sync::Arc;

use crate::config::HostConfig;
use crate::container::{BoundContainer, Container};
use crate::error::DiResult;
use crate::lifecycle::Lifecycle;
use crate::observer::LoggingObserver;

/// Binding code for one container.
///
/// Installers are composable: one installer can run others through
/// [`Container::install`]. Closures taking `&mut Container` are installers too.
///
/// # Example
///
/// ```rust
/// use tinject::{Container, DiResult, Injectable, Installer};
///
/// struct Settings;
/// impl Injectable for Settings {}
///
/// struct SettingsInstaller;
///
/// impl Installer for SettingsInstaller {
///     fn install(&self, container: &mut Container) -> DiResult<()> {
///         container.bind_type::<Settings>().to::<Settings>().from_instance(Settings)?;
///         Ok(())
///     }
/// }
///
/// let mut container = Container::new();
/// container
///     .install(&SettingsInstaller)?
///     .install(&|c: &mut Container| -> DiResult<()> {
///         c.bind_type::<u8>();
///         Ok(())
///     })?;
/// assert_eq!(container.descriptors().len(), 2);
/// # Ok::<(), tinject::DiError>(())
/// ```
pub trait Installer {
    /// Declares bindings into `container`.
    fn install(&self, container: &mut Container) -> DiResult<()>;
}

impl<F> Installer for F
where
    F: Fn(&mut Container) -> DiResult<()>,
{
    fn install(&self, container: &mut Container) -> DiResult<()> {
        self(container)
    }
}

/// Drives one container through its lifecycle.
///
/// Building a host runs the installer, finishes binding into the host's own
/// [`Lifecycle`], and dispatches the initialize set once. Afterwards the
/// owner calls [`start`](Host::start) once, [`update`](Host::update) and
/// [`late_update`](Host::late_update) every frame, and
/// [`shutdown`](Host::shutdown) at the end. A host dropped without
/// `shutdown` still dispatches its teardown set.
///
/// # Examples
///
/// ```rust
/// use tinject::{Container, DiResult, Host, Injectable, Start, Update, Views};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// #[derive(Default)]
/// struct Game {
///     starts: AtomicUsize,
///     frames: AtomicUsize,
/// }
/// impl Start for Game {
///     fn start(&self) {
///         self.starts.fetch_add(1, Ordering::SeqCst);
///     }
/// }
/// impl Update for Game {
///     fn update(&self) {
///         self.frames.fetch_add(1, Ordering::SeqCst);
///     }
/// }
/// impl Injectable for Game {
///     fn expose(this: &Arc<Self>, views: &mut Views) {
///         views.add::<dyn Start>(this.clone());
///         views.add::<dyn Update>(this.clone());
///     }
/// }
///
/// let game = Arc::new(Game::default());
/// let shared = game.clone();
/// let mut host = Host::install(&move |c: &mut Container| -> DiResult<()> {
///     c.bind(&[tinject::key_of::<dyn Start>(), tinject::key_of::<dyn Update>()])
///         .to::<Game>()
///         .from_instance(shared.clone())?;
///     Ok(())
/// })?;
///
/// host.tick();
/// host.tick();
/// assert_eq!(game.starts.load(Ordering::SeqCst), 1);
/// assert_eq!(game.frames.load(Ordering::SeqCst), 2);
/// host.shutdown();
/// # Ok::<(), tinject::DiError>(())
/// ```
pub struct Host {
    lifecycle: Lifecycle,
    bindings: BoundContainer,
    started: bool,
    torn_down: bool,
}

impl Host {
    /// Builds a host from a fresh container.
    pub fn install<I: Installer + ?Sized>(installer: &I) -> DiResult<Self> {
        Self::install_into(installer, Container::new())
    }

    /// Builds a host with `config` applied to its container.
    pub fn with_config<I: Installer + ?Sized>(installer: &I, config: &HostConfig) -> DiResult<Self> {
        let mut container = Container::new();
        if config.logging.enabled {
            container.add_observer(Arc::new(LoggingObserver::with_prefix(config.logging.prefix.clone())));
        }
        Self::install_into(installer, container)
    }

    /// Builds a host from a caller-prepared container, e.g. one with observers.
    pub fn install_into<I: Installer + ?Sized>(installer: &I, mut container: Container) -> DiResult<Self> {
        container.install(installer)?;
        let mut lifecycle = Lifecycle::new();
        let bindings = container.finish_binding(&mut lifecycle)?;
        lifecycle.initialize();
        Ok(Self {
            lifecycle,
            bindings,
            started: false,
            torn_down: false,
        })
    }

    /// Dispatches the start set. Only the first call has an effect.
    pub fn start(&mut self) {
        if !self.started {
            self.started = true;
            self.lifecycle.start();
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Dispatches the update set.
    pub fn update(&self) {
        self.lifecycle.update();
    }

    /// Dispatches the late-update set.
    pub fn late_update(&self) {
        self.lifecycle.late_update();
    }

    /// One frame: start on the first call, then update and late update.
    pub fn tick(&mut self) {
        self.start();
        self.update();
        self.late_update();
    }

    /// Dispatches the teardown set and drops the host.
    pub fn shutdown(mut self) {
        self.teardown_once();
    }

    fn teardown_once(&mut self) {
        if !self.torn_down {
            self.torn_down = true;
            self.lifecycle.teardown();
        }
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    /// The frozen bindings, for lookups after setup.
    pub fn bindings(&self) -> &BoundContainer {
        &self.bindings
    }
}

impl Drop for Host {
    fn drop(&mut self) {
        if self.torn_down {
            return;
        }
        // A panicking member during unwinding would abort the process
        if std::thread::panicking() {
            self.torn_down = true;
            eprintln!("[tinject] Host dropped during a panic; teardown set was not dispatched.");
            return;
        }
        self.teardown_once();
    }
}
