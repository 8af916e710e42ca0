//! Format registry for looking up attribute formats by name.
//!
//! The registry is an explicit value built once at startup and then shared by
//! reference. Registration needs `&mut self`, so once a registry is shared it
//! is read-only and lookups need no locking.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::format::{
    AttributeFormat, BooleanFormat, GroupFormat, NumberFormat, StringFormat, TimestampFormat,
};

/// Registry mapping format names to [`AttributeFormat`] implementations.
///
/// The set of formats is open: applications register their own formats next
/// to the built-in ones. Formats can be added but never removed or replaced.
#[derive(Clone, Default)]
pub struct FormatRegistry {
    formats: HashMap<String, Arc<dyn AttributeFormat>>,
}

impl FormatRegistry {
    /// Create a registry with the built-in formats registered.
    pub fn new() -> Self {
        Self::with_builtin_formats()
    }

    /// Create a registry without any formats.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry holding `string`, `number`, `boolean`, `timestamp`
    /// and `group`.
    pub fn with_builtin_formats() -> Self {
        let mut registry = Self::empty();
        registry.register(StringFormat::new());
        registry.register(NumberFormat);
        registry.register(BooleanFormat);
        registry.register(TimestampFormat);
        registry.register(GroupFormat);
        registry
    }

    /// Register a format under its own name.
    ///
    /// Returns `false`, leaving the existing format in place, when the name is
    /// already taken.
    pub fn register<F>(&mut self, format: F) -> bool
    where
        F: AttributeFormat + 'static,
    {
        let name = format.name().to_string();
        if self.formats.contains_key(&name) {
            warn!("Attribute format '{}' is already registered", name);
            return false;
        }

        debug!("Registered attribute format '{}'", name);
        self.formats.insert(name, Arc::new(format));
        true
    }

    /// Get a format by name.
    pub fn get(&self, name: &str) -> Option<&dyn AttributeFormat> {
        self.formats.get(name).map(|format| format.as_ref())
    }

    /// Get a shared handle to a format by name.
    pub fn get_shared(&self, name: &str) -> Option<Arc<dyn AttributeFormat>> {
        self.formats.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Names of all registered formats, sorted.
    pub fn format_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formats.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

impl fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatRegistry")
            .field("formats", &self.format_names())
            .finish()
    }
}
