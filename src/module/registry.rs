use std::{collections::HashMap, sync::Arc};

use crate::error::{ConsoleError, Result};

use super::{builtins, Export, Module, ModuleScope};

pub type ModuleBody = Arc<dyn Fn(&mut ModuleScope<'_>) -> Result<()> + Send + Sync>;

/// Module definitions plus the `require` cache.
///
/// Modules are looked up by exact id; there is no path resolution.
#[derive(Default)]
pub struct Registry {
    definitions: HashMap<String, ModuleBody>,
    cache: HashMap<String, Module>,
    main: Option<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the builtin modules defined.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        builtins::define(&mut registry);
        registry
    }

    pub fn define<F>(&mut self, id: impl Into<String>, body: F)
    where
        F: Fn(&mut ModuleScope<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.definitions.insert(id.into(), Arc::new(body));
    }

    pub fn is_defined(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// Ids of all defined modules, sorted.
    pub fn defined_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.definitions.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Return the export slot of module `id`, running its body on first use.
    ///
    /// A module required again while its body is still running yields the
    /// export slot as it was when loading started.
    pub fn require(&mut self, id: &str) -> Result<Export> {
        if let Some(module) = self.cache.get(id) {
            log::trace!(target: "conlog", "require {} (cached, loaded={})", id, module.is_loaded());
            return Ok(module.exports.clone());
        }

        let body = self
            .definitions
            .get(id)
            .cloned()
            .ok_or_else(|| ConsoleError::ModuleNotFound(id.to_string()))?;

        let is_entry = self.main.is_none();
        if is_entry {
            self.main = Some(id.to_string());
        }

        log::debug!(target: "conlog", "loading module {}", id);

        // The cache holds a placeholder sharing the initial namespace until
        // the body returns.
        let mut module = Module::new(id);
        let mut placeholder = Module::new(id);
        placeholder.exports = module.exports.clone();
        self.cache.insert(id.to_string(), placeholder);

        let result = {
            let mut scope = ModuleScope::new(&mut module, self);
            body(&mut scope)
        };

        if let Err(err) = result {
            self.cache.remove(id);
            if is_entry {
                self.main = None;
            }
            return Err(ConsoleError::ModuleBody {
                id: id.to_string(),
                source: Box::new(err),
            });
        }

        module.mark_loaded();
        let exports = module.exports.clone();
        self.cache.insert(id.to_string(), module);
        Ok(exports)
    }

    /// Id of the entry module, the first one required.
    pub fn main(&self) -> Option<&str> {
        self.main.as_deref()
    }

    pub fn is_loaded(&self, id: &str) -> bool {
        self.cache.get(id).is_some_and(Module::is_loaded)
    }

    pub fn cached_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.cache.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::module::Namespace;

    #[test]
    fn rebinding_the_alias_does_not_export() {
        let mut registry = Registry::new();
        registry.define("alias", |scope| {
            scope.exports = Export::value(1u8);
            Ok(())
        });

        let export = registry.require("alias").unwrap();
        assert!(export.downcast::<u8>().is_none());
        assert!(export.namespace().is_some_and(Namespace::is_empty));
    }

    #[test]
    fn assigning_the_slot_exports() {
        let mut registry = Registry::new();
        registry.define("slot", |scope| {
            scope.module.exports = Export::value(1u8);
            Ok(())
        });

        let export = registry.require("slot").unwrap();
        assert_eq!(export.downcast::<u8>().as_deref(), Some(&1));
    }

    #[test]
    fn mutating_through_the_alias_is_visible() {
        let mut registry = Registry::new();
        registry.define("ns", |scope| {
            if let Some(ns) = scope.exports.namespace() {
                ns.set("name", String::from("ns"))?;
            }
            Ok(())
        });

        let export = registry.require("ns").unwrap();
        let ns = export.namespace().unwrap();
        assert_eq!(ns.get_as::<String>("name").as_deref().map(String::as_str), Some("ns"));
    }

    #[test]
    fn body_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut registry = Registry::new();
        registry.define("once", move |_scope| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        registry.require("once").unwrap();
        registry.require("once").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(registry.is_loaded("once"));
        assert_eq!(registry.main(), Some("once"));
    }

    #[test]
    fn unknown_module() {
        let mut registry = Registry::new();
        assert!(matches!(
            registry.require("nope"),
            Err(ConsoleError::ModuleNotFound(id)) if id == "nope"
        ));
        assert_eq!(registry.main(), None);
    }

    #[test]
    fn failing_body_is_not_cached() {
        let mut registry = Registry::new();
        registry.define("broken", |_scope| Err(ConsoleError::Other("boom".into())));

        assert!(matches!(
            registry.require("broken"),
            Err(ConsoleError::ModuleBody { .. })
        ));
        assert!(registry.cached_ids().is_empty());
    }

    #[test]
    fn failed_entry_module_is_not_main() {
        let mut registry = Registry::new();
        registry.define("broken", |_scope| Err(ConsoleError::Other("boom".into())));
        registry.define("ok", |_scope| Ok(()));

        assert!(registry.require("broken").is_err());
        assert_eq!(registry.main(), None);

        registry.require("ok").unwrap();
        assert_eq!(registry.main(), Some("ok"));
    }

    #[test]
    fn cycles_see_partial_exports() {
        let mut registry = Registry::new();
        registry.define("a", |scope| {
            if let Some(ns) = scope.exports.namespace() {
                ns.set("early", true)?;
            }
            let b = scope.require("b")?;
            scope.module.exports = b;
            Ok(())
        });
        registry.define("b", |scope| {
            let a = scope.require("a")?;
            let saw_early = a
                .namespace()
                .and_then(|ns| ns.get_as::<bool>("early"))
                .is_some_and(|v| *v);
            assert!(!scope.is_main());
            scope.module.exports = Export::value(saw_early);
            Ok(())
        });

        let a = registry.require("a").unwrap();
        assert_eq!(a.downcast::<bool>().as_deref(), Some(&true));
        assert_eq!(registry.main(), Some("a"));
        assert_eq!(registry.cached_ids(), vec!["a".to_string(), "b".to_string()]);
    }
}
