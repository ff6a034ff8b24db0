//! Per-integrator registries
//!
//! Integrators pass themselves in when they need their registry. The
//! directory holds each integrator weakly and its registry strongly, so a
//! registry lives exactly as long as the integrator that owns it.

use super::registry::InventoryRegistry;
use crate::config::MenuConfig;
use crate::events::{ClickEvent, CloseEvent, InventoryListener};
use crate::render::RenderSink;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// A host-side party that creates inventories
pub trait Integrator {
    fn name(&self) -> &str;
}

struct Entry<P> {
    integrator: Weak<P>,
    registry: Rc<InventoryRegistry>,
}

/// Lazily created registry for every live integrator
pub struct RegistryDirectory<P: Integrator> {
    sink: Rc<dyn RenderSink>,
    config: MenuConfig,
    entries: RefCell<FxHashMap<usize, Entry<P>>>,
}

impl<P: Integrator> RegistryDirectory<P> {
    pub fn new(sink: Rc<dyn RenderSink>, config: MenuConfig) -> Self {
        Self {
            sink,
            config,
            entries: RefCell::new(FxHashMap::default()),
        }
    }

    /// The integrator's registry, created on first use
    pub fn registry_for(&self, integrator: &Rc<P>) -> Rc<InventoryRegistry> {
        self.purge();
        let key = Rc::as_ptr(integrator) as usize;
        let mut entries = self.entries.borrow_mut();
        let entry = entries.entry(key).or_insert_with(|| {
            log::debug!("[RegistryDirectory] Creating registry for {}", integrator.name());
            Entry {
                integrator: Rc::downgrade(integrator),
                registry: Rc::new(InventoryRegistry::new(
                    integrator.name(),
                    Rc::clone(&self.sink),
                    self.config.clone(),
                )),
            }
        });
        Rc::clone(&entry.registry)
    }

    /// Registry of a live integrator by name, without creating one
    pub fn find(&self, name: &str) -> Option<Rc<InventoryRegistry>> {
        let found = self
            .entries
            .borrow()
            .values()
            .filter(|entry| entry.integrator.strong_count() > 0)
            .find(|entry| entry.registry.owner() == name)
            .map(|entry| Rc::clone(&entry.registry));
        if found.is_none() {
            log::warn!("[RegistryDirectory] No registry for integrator {}", name);
        }
        found
    }

    /// Registries whose integrator is still alive
    pub fn registries(&self) -> Vec<Rc<InventoryRegistry>> {
        self.entries
            .borrow()
            .values()
            .filter(|entry| entry.integrator.strong_count() > 0)
            .map(|entry| Rc::clone(&entry.registry))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop registries of integrators that are gone, returns how many were dropped
    pub fn purge(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| entry.integrator.strong_count() > 0);
        let dropped = before - entries.len();
        if dropped > 0 {
            log::debug!("[RegistryDirectory] Dropped {} registries", dropped);
        }
        dropped
    }
}

impl<P: Integrator> InventoryListener for RegistryDirectory<P> {
    fn on_click(&self, event: &mut ClickEvent) {
        for registry in self.registries() {
            let already_cancelled = event.is_cancelled();
            registry.on_click(event);
            if !already_cancelled && event.is_cancelled() {
                log::trace!("[RegistryDirectory] Click consumed by {}", registry.listener_name());
                break;
            }
        }
    }

    fn on_close(&self, event: &CloseEvent) {
        for registry in self.registries() {
            registry.on_close(event);
        }
    }

    fn listener_name(&self) -> &str {
        "registry_directory"
    }
}

impl<P: Integrator> fmt::Debug for RegistryDirectory<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryDirectory")
            .field("registries", &self.entries.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuResult;
    use crate::events::ClickType;
    use crate::inventory::ButtonActions;
    use crate::render::InventoryView;
    use crate::viewer::{Viewer, ViewerId};
    use std::cell::Cell;

    struct Plugin(&'static str);

    impl Integrator for Plugin {
        fn name(&self) -> &str {
            self.0
        }
    }

    struct NullSink;

    impl RenderSink for NullSink {
        fn show(&self, _viewer: &Viewer, _view: &InventoryView) -> MenuResult<()> {
            Ok(())
        }
    }

    fn directory() -> RegistryDirectory<Plugin> {
        RegistryDirectory::new(Rc::new(NullSink), MenuConfig::default())
    }

    #[test]
    fn test_one_registry_per_integrator() {
        let directory = directory();
        let shops = Rc::new(Plugin("shops"));
        let quests = Rc::new(Plugin("quests"));

        let first = directory.registry_for(&shops);
        let again = directory.registry_for(&shops);
        let other = directory.registry_for(&quests);
        assert!(Rc::ptr_eq(&first, &again));
        assert!(!Rc::ptr_eq(&first, &other));
        assert_eq!(first.owner(), "shops");
        assert_eq!(directory.len(), 2);
    }

    #[test]
    fn test_registry_goes_with_integrator() {
        let directory = directory();
        let shops = Rc::new(Plugin("shops"));
        let registry = Rc::downgrade(&directory.registry_for(&shops));
        assert!(directory.find("shops").is_some());

        drop(shops);
        assert!(directory.find("shops").is_none());
        assert_eq!(directory.purge(), 1);
        assert!(registry.upgrade().is_none());
        assert!(directory.is_empty());
    }

    #[test]
    fn test_host_cancelled_click_still_reaches_open_inventory() {
        let directory = directory();
        let idle = Rc::new(Plugin("idle"));
        let shops = Rc::new(Plugin("shops"));
        let _idle_inventory = directory.registry_for(&idle).create_inventory(1).unwrap();
        let shop = directory.registry_for(&shops).create_inventory(1).unwrap();
        assert_eq!(directory.registry_for(&shops).listener_name(), "shops");

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        shop.create_button(3, ButtonActions::click(move |_, _| counter.set(counter.get() + 1)))
            .unwrap();
        let alex = Rc::new(Viewer::new(ViewerId(1), "alex"));
        shop.open(&alex, None).unwrap();

        // registry order is unspecified, so the idle one may come first
        let mut event = ClickEvent::new(Rc::clone(&alex), 3, ClickType::Left);
        event.cancel();
        directory.on_click(&mut event);
        assert_eq!(hits.get(), 1);
        assert!(event.is_cancelled());
    }
}
