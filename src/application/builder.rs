//! Handler construction with a two-tier strategy.
//!
//! The primary strategy resolves a handler's dependencies from the service
//! container through an explicit registry of factories. When that registry
//! has no binding for the requested handler, construction falls back to the
//! handler's `Default`. Any other primary failure propagates unchanged.

use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::application::error::BuildError;
use crate::application::handler::Handler;
use crate::domain::HandlerId;
use crate::infrastructure::di::ServiceContainer;

/// One way of producing a handler for a handler id.
pub trait ConstructionStrategy {
    fn construct(&self, id: HandlerId) -> Result<Box<dyn Handler>, BuildError>;
}

/// Factory resolving a handler's dependencies from the container.
pub type Factory = Box<dyn Fn(&ServiceContainer) -> Result<Box<dyn Handler>, BuildError>>;

/// Registry of factories keyed by handler id.
#[derive(Default)]
pub struct HandlerBindings {
    factories: HashMap<HandlerId, Factory>,
}

impl HandlerBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for `id`, replacing any earlier binding.
    pub fn bind<F>(mut self, id: HandlerId, factory: F) -> Self
    where
        F: Fn(&ServiceContainer) -> Result<Box<dyn Handler>, BuildError> + 'static,
    {
        self.factories.insert(id, Box::new(factory));
        self
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.factories.contains_key(&id)
    }
}

/// Primary strategy: registered factories over one invocation's container.
pub struct Injector<'a> {
    bindings: &'a HandlerBindings,
    container: &'a ServiceContainer,
}

impl<'a> Injector<'a> {
    pub fn new(bindings: &'a HandlerBindings, container: &'a ServiceContainer) -> Self {
        Self {
            bindings,
            container,
        }
    }
}

impl ConstructionStrategy for Injector<'_> {
    fn construct(&self, id: HandlerId) -> Result<Box<dyn Handler>, BuildError> {
        let factory = self
            .bindings
            .factories
            .get(&id)
            .ok_or(BuildError::NoBinding(id))?;
        factory(self.container)
    }
}

type DefaultFn = fn() -> Box<dyn Handler>;

fn default_handler<H: Handler + Default + 'static>() -> Box<dyn Handler> {
    Box::new(H::default())
}

/// Fallback strategy: dependency-free `Default` construction.
#[derive(Default)]
pub struct DefaultConstructor {
    table: HashMap<HandlerId, DefaultFn>,
}

impl DefaultConstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<H: Handler + Default + 'static>(mut self, id: HandlerId) -> Self {
        self.table.insert(id, default_handler::<H>);
        self
    }
}

impl ConstructionStrategy for DefaultConstructor {
    fn construct(&self, id: HandlerId) -> Result<Box<dyn Handler>, BuildError> {
        self.table
            .get(&id)
            .map(|make| make())
            .ok_or(BuildError::Unconstructible(id))
    }
}

/// Builds the handler for `id`: `primary` first, `fallback` only when
/// `primary` has no binding.
#[instrument(level = "debug", skip(primary, fallback))]
pub fn build(
    id: HandlerId,
    primary: &dyn ConstructionStrategy,
    fallback: &dyn ConstructionStrategy,
) -> Result<Box<dyn Handler>, BuildError> {
    match primary.construct(id) {
        Err(BuildError::NoBinding(_)) => {
            debug!(handler = %id, "no binding registered, using default construction");
            fallback.construct(id)
        }
        other => other,
    }
}
