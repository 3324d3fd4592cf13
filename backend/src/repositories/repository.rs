//! Repository trait and common functionality
//!
//! Handlers reach storage only through [`Repository`], so the backing store
//! can be swapped without touching the API layer.

use async_trait::async_trait;
use std::fmt;

use crate::error::AppError;

/// A stored entity with a stable identifier.
pub trait Record: Clone + Send + Sync + 'static {
    type Id: Copy + Eq + fmt::Display + Send + Sync + 'static;
    /// Human-readable entity name used in error messages.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
}

/// Predicate telling whether a stored record blocks a write.
pub type Conflicts<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Standard storage operations for one record type.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// Find all records in insertion order
    async fn find_all(&self) -> Result<Vec<T>, AppError>;

    /// Find a single record by ID
    async fn find_by_id(&self, id: T::Id) -> Result<T, AppError>;

    /// Create a new record
    async fn create(&self, item: T) -> Result<T, AppError>;

    /// Create a record unless a stored one matches `conflicts`.
    /// The check and the insert happen atomically; `None` means blocked.
    async fn create_unless(
        &self,
        item: T,
        conflicts: Conflicts<'_, T>,
    ) -> Result<Option<T>, AppError>;

    /// Replace an existing record
    async fn update(&self, item: T) -> Result<T, AppError>;

    /// Replace a record unless another stored record matches `conflicts`.
    async fn update_unless(
        &self,
        item: T,
        conflicts: Conflicts<'_, T>,
    ) -> Result<Option<T>, AppError>;

    /// Delete a record by ID
    async fn delete(&self, id: T::Id) -> Result<(), AppError>;
}

pub(crate) fn not_found<T: Record>(id: T::Id) -> AppError {
    tracing::debug!(kind = T::KIND, id = %id, "Record not found");
    AppError::NotFound(format!("{} not found", T::KIND))
}
