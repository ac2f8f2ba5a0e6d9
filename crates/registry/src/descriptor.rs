//! Registered model descriptors
//!
//! A [`ModelDescriptor`] is built once per model at registration and shared
//! read-only afterwards. It owns the resolved table layout, the rendered
//! statements and the factories that create fresh instances of the model.

use serde::Serialize;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::error::{RegistryError, RegistryResult};
use crate::model::SqlValues;
use crate::sql::{SqlTemplateSet, StatementKind};
use crate::table::TableDescriptor;

pub(crate) type ValueFactory = Arc<dyn Fn() -> Box<dyn Any + Send + Sync> + Send + Sync>;

/// A cached statement paired with its positional values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundStatement<'a> {
    pub sql: &'a str,
    pub values: Vec<Value>,
}

pub struct ModelDescriptor {
    model_name: &'static str,
    type_id: TypeId,
    factory: ValueFactory,
    pointer_factory: Option<ValueFactory>,
    table: TableDescriptor,
    sql: SqlTemplateSet,
}

impl ModelDescriptor {
    pub(crate) fn new(
        model_name: &'static str,
        type_id: TypeId,
        factory: ValueFactory,
        pointer_factory: Option<ValueFactory>,
        table: TableDescriptor,
        sql: SqlTemplateSet,
    ) -> Self {
        Self {
            model_name,
            type_id,
            factory,
            pointer_factory,
            table,
            sql,
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.model_name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check whether `T` is the registered model type
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    pub fn table(&self) -> &TableDescriptor {
        &self.table
    }

    pub fn sql(&self) -> &SqlTemplateSet {
        &self.sql
    }

    pub fn has_pointer_factory(&self) -> bool {
        self.pointer_factory.is_some()
    }

    /// Create a new instance through the value factory.
    ///
    /// Returns `None` if `T` is not the registered type.
    pub fn instantiate<T: 'static>(&self) -> Option<T> {
        if !self.is::<T>() {
            return None;
        }

        (self.factory)().downcast::<T>().ok().map(|boxed| *boxed)
    }

    /// Create a new boxed instance, preferring the pointer factory.
    pub fn instantiate_boxed<T: 'static>(&self) -> Option<Box<T>> {
        if !self.is::<T>() {
            return None;
        }

        let factory = self.pointer_factory.as_ref().unwrap_or(&self.factory);
        factory().downcast::<T>().ok()
    }

    /// Pair the cached statement of `kind` with the model's positional values.
    pub fn bind<M: SqlValues>(&self, kind: StatementKind, model: &M) -> RegistryResult<BoundStatement<'_>> {
        let sql = self.sql.get(kind);
        if sql.is_empty() {
            return Err(RegistryError::StatementUnavailable {
                model: self.model_name.to_string(),
                statement: kind,
            });
        }

        let values = model.sql_values(kind);
        let expected = self.sql.placeholder_count(kind);
        if values.len() != expected {
            return Err(RegistryError::ValueCountMismatch {
                model: self.model_name.to_string(),
                statement: kind,
                expected,
                actual: values.len(),
            });
        }

        Ok(BoundStatement { sql, values })
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("model_name", &self.model_name)
            .field("factory", &"<factory>")
            .field("pointer_factory", &self.pointer_factory.as_ref().map(|_| "<factory>"))
            .field("table", &self.table)
            .field("sql", &self.sql)
            .finish()
    }
}
