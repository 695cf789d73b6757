//! Process-wide cache of compiled model schemas.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use crate::schema::SharedSchema;

use super::model::{short_type_name, Model};

/// Compiled validators for [`Model`] types, keyed by `TypeId`.
///
/// Each model's schema is built once on first use and shared afterwards.
/// Entries are never removed; compiling the same model twice yields the same
/// entry.
///
/// Self-referential models are not supported: building such a schema would
/// recurse without end.
///
/// # Example
///
/// ```rust
/// use jsoncap::{Model, ModelRegistry, ObjectSchema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Ping {
///     seq: u32,
/// }
///
/// impl Model for Ping {
///     fn model_schema() -> ObjectSchema {
///         ObjectSchema::new().field_of::<u32>("seq")
///     }
/// }
///
/// let registry = ModelRegistry::new();
/// let first = registry.schema_for::<Ping>();
/// let second = registry.schema_for::<Ping>();
/// assert!(std::sync::Arc::ptr_eq(&first, &second));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Default)]
pub struct ModelRegistry {
    schemas: RwLock<HashMap<TypeId, SharedSchema>>,
}

impl ModelRegistry {
    /// An empty registry. Most callers want [`global`](Self::global).
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry used by [`Model`]'s provided methods.
    pub fn global() -> &'static ModelRegistry {
        static GLOBAL: OnceLock<ModelRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ModelRegistry::new)
    }

    /// Returns the compiled schema for `M`, building it on first use.
    pub fn schema_for<M: Model>(&self) -> SharedSchema {
        let id = TypeId::of::<M>();
        let cached = self.schemas.read().get(&id).cloned();
        if let Some(schema) = cached {
            return schema;
        }

        // Built without holding the lock: nested models re-enter the registry.
        let mut schema = M::model_schema();
        if !schema.has_title() {
            schema = schema.title(short_type_name::<M>());
        }
        let compiled: SharedSchema = Arc::new(schema);
        tracing::trace!(model = short_type_name::<M>(), "compiled model schema");

        self.schemas.write().entry(id).or_insert(compiled).clone()
    }

    /// Whether `M` has been compiled and cached.
    pub fn contains<M: Model>(&self) -> bool {
        self.schemas.read().contains_key(&TypeId::of::<M>())
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// True until the first schema is compiled.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }
}
