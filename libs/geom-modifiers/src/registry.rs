//! # Modifier Registry
//!
//! Process-wide map from class name to a prototype instance, used to
//! create stages by name when loading chains.
//!
//! The registry is created on first access with every built-in stage
//! registered. Applications may register more classes at any time; a
//! second registration under an existing name is rejected with a warning.

use std::collections::BTreeMap;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::modifier::Modifier;
use crate::stages;

type Prototypes = BTreeMap<&'static str, Box<dyn Modifier>>;

fn registry() -> &'static RwLock<Prototypes> {
    static REGISTRY: OnceLock<RwLock<Prototypes>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut prototypes = Prototypes::new();
        for prototype in stages::builtin() {
            prototypes.insert(prototype.class_name(), prototype);
        }
        RwLock::new(prototypes)
    })
}

fn read() -> RwLockReadGuard<'static, Prototypes> {
    registry().read().unwrap_or_else(PoisonError::into_inner)
}

fn write() -> RwLockWriteGuard<'static, Prototypes> {
    registry().write().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a prototype under its class name.
///
/// # Returns
///
/// `false` if the name was taken; the existing prototype stays.
pub fn register(prototype: Box<dyn Modifier>) -> bool {
    let name = prototype.class_name();
    let mut prototypes = write();
    if prototypes.contains_key(name) {
        log::warn!("duplicate modifier class '{}' registered, ignored", name);
        return false;
    }
    log::debug!("registered modifier class '{}'", name);
    prototypes.insert(name, prototype);
    true
}

/// Creates a default instance of `class_name`, or `None` if unknown.
///
/// # Example
///
/// ```rust
/// use geom_modifiers::{registry, Modifier};
///
/// let stage = registry::create("Tesselate").unwrap();
/// assert_eq!(stage.label(), "tesselate");
/// assert!(registry::create("NoSuchStage").is_none());
/// ```
pub fn create(class_name: &str) -> Option<Box<dyn Modifier>> {
    read().get(class_name).map(|prototype| prototype.new_boxed())
}

/// Returns true if `class_name` is registered.
pub fn is_registered(class_name: &str) -> bool {
    read().contains_key(class_name)
}

/// Registered class names, sorted.
pub fn class_names() -> Vec<&'static str> {
    read().keys().copied().collect()
}

/// Labels of the registered classes, in class name order.
pub fn labels() -> Vec<&'static str> {
    read().values().map(|prototype| prototype.label()).collect()
}
