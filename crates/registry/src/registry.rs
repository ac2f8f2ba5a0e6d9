//! Model registry
//!
//! Maps model names to their [`ModelDescriptor`]. Registration resolves the
//! table layout and renders the statements once; lookups are a read-locked
//! map access returning the shared descriptor.

use once_cell::sync::Lazy;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use crate::config::RegistryConfig;
use crate::descriptor::{ModelDescriptor, ValueFactory};
use crate::error::{RegistryError, RegistryResult};
use crate::model::Model;
use crate::sql::SqlTemplateSet;
use crate::table::TableDescriptor;

static GLOBAL_REGISTRY: Lazy<ModelRegistry> = Lazy::new(|| {
    let config = RegistryConfig::from_env().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "invalid model registry configuration, using defaults");
        RegistryConfig::default()
    });
    ModelRegistry::with_config(config)
});

#[derive(Debug)]
pub struct ModelRegistry {
    config: RegistryConfig,
    models: RwLock<HashMap<&'static str, Arc<ModelDescriptor>>>,
}

impl ModelRegistry {
    /// Create an empty registry with the default configuration
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            models: RwLock::new(HashMap::new()),
        }
    }

    /// Shared process-wide registry.
    ///
    /// Built on first access from the environment configuration; every call,
    /// from any thread, returns the same instance.
    pub fn global() -> &'static ModelRegistry {
        &GLOBAL_REGISTRY
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register a model through its value factory.
    ///
    /// Fails with [`RegistryError::AlreadyRegistered`] if a model with the same
    /// name exists; nothing is stored in that case.
    pub fn register<T, F>(&self, factory: F) -> RegistryResult<Arc<ModelDescriptor>>
    where
        T: Model,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let factory: ValueFactory = Arc::new(move || -> Box<dyn Any + Send + Sync> { Box::new(factory()) });
        self.insert::<T>(factory, None)
    }

    /// Register a model with both a value factory and a boxed-instance factory
    pub fn register_with_pointer<T, F, P>(
        &self,
        factory: F,
        pointer_factory: P,
    ) -> RegistryResult<Arc<ModelDescriptor>>
    where
        T: Model,
        F: Fn() -> T + Send + Sync + 'static,
        P: Fn() -> Box<T> + Send + Sync + 'static,
    {
        let factory: ValueFactory = Arc::new(move || -> Box<dyn Any + Send + Sync> { Box::new(factory()) });
        let pointer_factory: ValueFactory =
            Arc::new(move || -> Box<dyn Any + Send + Sync> { pointer_factory() });
        self.insert::<T>(factory, Some(pointer_factory))
    }

    fn insert<T: Model>(
        &self,
        factory: ValueFactory,
        pointer_factory: Option<ValueFactory>,
    ) -> RegistryResult<Arc<ModelDescriptor>> {
        let model_name = T::model_name();

        // Cheap rejection before resolving anything; the write lock below is authoritative.
        if self.contains(model_name) {
            tracing::warn!(model = model_name, "model registered twice");
            return Err(RegistryError::already_registered(model_name));
        }

        let table = TableDescriptor::resolve(model_name, &T::field_declarations(), &self.config);
        let sql = SqlTemplateSet::render(&table, &self.config);
        let descriptor = Arc::new(ModelDescriptor::new(
            model_name,
            TypeId::of::<T>(),
            factory,
            pointer_factory,
            table,
            sql,
        ));

        let mut models = self
            .models
            .write()
            .map_err(|_| RegistryError::lock_poisoned("model_registry"))?;

        if models.contains_key(model_name) {
            tracing::warn!(model = model_name, "model registered twice");
            return Err(RegistryError::already_registered(model_name));
        }

        models.insert(model_name, Arc::clone(&descriptor));

        tracing::debug!(
            model = model_name,
            table = descriptor.table().table_name(),
            fields = descriptor.table().fields().len(),
            soft_delete = descriptor.table().soft_delete_enabled(),
            "registered model"
        );

        Ok(descriptor)
    }

    /// Look up a registered model by name; unknown names yield `None`
    pub fn lookup(&self, model_name: &str) -> Option<Arc<ModelDescriptor>> {
        self.read_models().get(model_name).cloned()
    }

    /// Look up the descriptor registered for `T`
    pub fn lookup_model<T: Model>(&self) -> Option<Arc<ModelDescriptor>> {
        self.lookup(T::model_name())
            .filter(|descriptor| descriptor.is::<T>())
    }

    pub fn contains(&self, model_name: &str) -> bool {
        self.read_models().contains_key(model_name)
    }

    pub fn len(&self) -> usize {
        self.read_models().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered model names, sorted
    pub fn model_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.read_models().keys().copied().collect();
        names.sort_unstable();
        names
    }

    // Entries are inserted whole under the write lock, so a panic elsewhere
    // never leaves a partial descriptor behind.
    fn read_models(&self) -> RwLockReadGuard<'_, HashMap<&'static str, Arc<ModelDescriptor>>> {
        self.models.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
