use std::collections::HashMap;

use crate::{
    error::{Result, StylizationError},
    stylization::{BasicEnhancement, IdentityStylizer, Stylizer},
};

type StylizerFactory = Box<dyn Fn() -> Box<dyn Stylizer> + Send + Sync>;

/// Registry for managing available stylization backends
///
/// Backends are registered by name and instantiated once at startup, when
/// the configured backend is looked up.
pub struct StylizerRegistry {
    stylizers: HashMap<String, StylizerFactory>,
}

impl StylizerRegistry {
    /// Create a new registry with all built-in backends
    pub fn new() -> Self {
        let mut registry = Self {
            stylizers: HashMap::new(),
        };

        registry.register_builtin_stylizers();
        registry
    }

    fn register_builtin_stylizers(&mut self) {
        self.stylizers.insert(
            "basic".to_string(),
            Box::new(|| Box::new(BasicEnhancement::new())),
        );

        self.stylizers.insert(
            "identity".to_string(),
            Box::new(|| Box::new(IdentityStylizer::new())),
        );
    }

    /// Register a custom backend
    ///
    /// # Arguments
    ///
    /// * `name` - Unique name for the backend
    /// * `factory` - Function that creates new instances of the backend
    pub fn register<F>(&mut self, name: String, factory: F)
    where
        F: Fn() -> Box<dyn Stylizer> + Send + Sync + 'static,
    {
        self.stylizers.insert(name, Box::new(factory));
    }

    /// Get a backend by name, or None if it is not registered
    pub fn get_stylizer(&self, name: &str) -> Option<Box<dyn Stylizer>> {
        self.stylizers.get(name).map(|factory| factory())
    }

    /// Like [`get_stylizer`](Self::get_stylizer), but an unknown name is an error
    pub fn create(&self, name: &str) -> Result<Box<dyn Stylizer>> {
        self.get_stylizer(name).ok_or_else(|| {
            StylizationError::NotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Get all available backend names, sorted
    pub fn available_stylizers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.stylizers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_stylizer(&self, name: &str) -> bool {
        self.stylizers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.stylizers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stylizers.is_empty()
    }
}

impl Default for StylizerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
