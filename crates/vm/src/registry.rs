//! Named instruction sets available at runtime.

use amn_common::Machine;
use tracing::debug;

use crate::error::RegistryError;
use crate::session::{Engine, Session};

/// Builds a fresh session in its initial state.
pub type Factory = fn() -> Box<dyn Session>;

fn engine<M: Machine + 'static>() -> Box<dyn Session> {
    Box::new(Engine::<M>::new())
}

/// Maps instruction-set names to session factories.
#[derive(Clone, Default)]
pub struct Registry {
    entries: Vec<(&'static str, Factory)>,
}

impl Registry {
    /// A registry with AM0 and AM1.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.register("AM0", engine::<amn_am0::Machine>);
        registry.register("AM1", engine::<amn_am1::Machine>);
        registry
    }

    /// Add or replace an instruction set.
    pub fn register(&mut self, name: &'static str, factory: Factory) {
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            Some(entry) => *entry = (name, factory),
            None => self.entries.push((name, factory)),
        }
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Create a session for `name`, ignoring ASCII case.
    pub fn create(&self, name: &str) -> Result<Box<dyn Session>, RegistryError> {
        let (found, factory) = self
            .entries
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .ok_or_else(|| RegistryError::UnknownInstructionSet {
                name: name.to_string(),
                available: self.names(),
            })?;
        debug!(set = *found, "selected instruction set");
        Ok(factory())
    }
}
