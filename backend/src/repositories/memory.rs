//! Process-local storage backed by a locked vector.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repository::{not_found, Conflicts, Record, Repository};
use crate::error::AppError;

/// Keeps records in insertion order. Contents are lost on restart.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn find_all(&self) -> Result<Vec<T>, AppError> {
        Ok(self.records.read().await.clone())
    }

    async fn find_by_id(&self, id: T::Id) -> Result<T, AppError> {
        self.records
            .read()
            .await
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| not_found::<T>(id))
    }

    async fn create(&self, item: T) -> Result<T, AppError> {
        let mut records = self.records.write().await;
        insert(&mut records, item)
    }

    async fn create_unless(
        &self,
        item: T,
        conflicts: Conflicts<'_, T>,
    ) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().await;
        if records.iter().any(|record| conflicts(record)) {
            return Ok(None);
        }
        insert(&mut records, item).map(Some)
    }

    async fn update(&self, item: T) -> Result<T, AppError> {
        let mut records = self.records.write().await;
        replace(&mut records, item)
    }

    async fn update_unless(
        &self,
        item: T,
        conflicts: Conflicts<'_, T>,
    ) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().await;
        let id = item.id();
        if records
            .iter()
            .any(|record| record.id() != id && conflicts(record))
        {
            return Ok(None);
        }
        replace(&mut records, item).map(Some)
    }

    async fn delete(&self, id: T::Id) -> Result<(), AppError> {
        let mut records = self.records.write().await;
        let position = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| not_found::<T>(id))?;
        records.remove(position);
        Ok(())
    }
}

fn insert<T: Record>(records: &mut Vec<T>, item: T) -> Result<T, AppError> {
    if records.iter().any(|record| record.id() == item.id()) {
        return Err(AppError::Conflict(format!(
            "{} {} already exists",
            T::KIND,
            item.id()
        )));
    }
    records.push(item.clone());
    Ok(item)
}

fn replace<T: Record>(records: &mut [T], item: T) -> Result<T, AppError> {
    let id = item.id();
    let slot = records
        .iter_mut()
        .find(|record| record.id() == id)
        .ok_or_else(|| not_found::<T>(id))?;
    *slot = item.clone();
    Ok(item)
}
