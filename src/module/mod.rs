//! Modules with a single export slot.
//!
//! A module body receives a [`ModuleScope`]: `scope.module.exports` is the
//! slot importers read, `scope.exports` is a local alias that starts out
//! pointing at the same namespace. Rebinding the alias changes nothing for
//! importers; only assignments to the slot do.

mod registry;
pub mod builtins;

use std::{
    any::Any,
    collections::BTreeMap,
    fmt,
    sync::{Arc, RwLock},
};

pub use registry::{ModuleBody, Registry};

use crate::error::{ConsoleError, Result};

pub type Exported = Arc<dyn Any + Send + Sync>;

/// The initial, shared exports object. Clones refer to the same entries.
#[derive(Clone, Default)]
pub struct Namespace {
    entries: Arc<RwLock<BTreeMap<String, Exported>>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) -> Result<()> {
        self.entries.write()?.insert(key.into(), Arc::new(value));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<Exported> {
        self.entries.read().ok()?.get(key).cloned()
    }

    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key)?.downcast::<T>().ok()
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether both handles refer to the same exports object.
    pub fn same_as(&self, other: &Namespace) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

/// What a module exposes.
#[derive(Clone)]
pub enum Export {
    Namespace(Namespace),
    Value(Exported),
}

impl Export {
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Export::Value(Arc::new(value))
    }

    pub fn namespace(&self) -> Option<&Namespace> {
        match self {
            Export::Namespace(ns) => Some(ns),
            Export::Value(_) => None,
        }
    }

    /// The exported value as `T`, or `None` for namespaces and mismatches.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        match self {
            Export::Value(value) => value.clone().downcast::<T>().ok(),
            Export::Namespace(_) => None,
        }
    }

    /// Like [`Export::downcast`], with an error naming the module.
    pub fn expect_value<T: Any + Send + Sync>(&self, id: &str) -> Result<Arc<T>> {
        self.downcast::<T>().ok_or_else(|| ConsoleError::ExportType {
            id: id.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }
}

impl Default for Export {
    fn default() -> Self {
        Export::Namespace(Namespace::new())
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Export::Namespace(ns) => f.debug_tuple("Namespace").field(ns).finish(),
            Export::Value(_) => f.write_str("Value(..)"),
        }
    }
}

#[derive(Debug)]
pub struct Module {
    id: String,
    /// The export slot.
    pub exports: Export,
    loaded: bool,
}

impl Module {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            exports: Export::default(),
            loaded: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn mark_loaded(&mut self) {
        self.loaded = true;
    }
}

/// What a module body sees while it runs.
pub struct ModuleScope<'m> {
    pub module: &'m mut Module,
    /// Alias of the slot's initial value. Rebinding it is local.
    pub exports: Export,
    registry: &'m mut Registry,
}

impl<'m> ModuleScope<'m> {
    pub(crate) fn new(module: &'m mut Module, registry: &'m mut Registry) -> Self {
        let exports = module.exports.clone();
        Self {
            module,
            exports,
            registry,
        }
    }

    /// Load another module from the same registry.
    pub fn require(&mut self, id: &str) -> Result<Export> {
        self.registry.require(id)
    }

    pub fn is_main(&self) -> bool {
        self.registry.main() == Some(self.module.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespace_clones_share_entries() {
        let ns = Namespace::new();
        let alias = ns.clone();
        alias.set("answer", 42u32).unwrap();

        assert!(ns.same_as(&alias));
        assert_eq!(ns.get_as::<u32>("answer").as_deref(), Some(&42));
        assert_eq!(ns.keys(), vec!["answer".to_string()]);
        assert!(ns.get_as::<String>("answer").is_none());
    }

    #[test]
    fn export_downcast() {
        let export = Export::value(String::from("hi"));
        assert_eq!(export.downcast::<String>().as_deref().map(String::as_str), Some("hi"));
        assert!(export.downcast::<u8>().is_none());
        assert!(matches!(
            export.expect_value::<u8>("m"),
            Err(ConsoleError::ExportType { .. })
        ));
        assert!(Export::default().namespace().is_some_and(Namespace::is_empty));
    }
}
