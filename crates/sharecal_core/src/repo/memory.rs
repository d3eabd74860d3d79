//! Shared in-memory table used by every in-memory repository.
//!
//! # Invariants
//! - Rows keep insertion order.
//! - Ids are unique within one table.
//! - A poisoned lock surfaces as `RepoError::LockPoisoned`, never a panic.

use crate::model::calendar::Calendar;
use crate::model::event::Event;
use crate::model::group::{Group, GroupInvitation};
use crate::model::inbox::{Conversation, Message, Notification};
use crate::repo::{RepoError, RepoResult};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Row type stored in a [`MemoryTable`].
pub trait Record: Clone + Send + Sync {
    /// Entity name used in error messages and logs.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
}

impl Record for Event {
    const ENTITY: &'static str = "event";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Calendar {
    const ENTITY: &'static str = "calendar";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Group {
    const ENTITY: &'static str = "group";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for GroupInvitation {
    const ENTITY: &'static str = "invitation";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Notification {
    const ENTITY: &'static str = "notification";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Conversation {
    const ENTITY: &'static str = "conversation";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for Message {
    const ENTITY: &'static str = "message";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Ordered, lock-guarded rows of one entity.
#[derive(Debug, Default)]
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T: Record> MemoryTable<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, Vec<T>>> {
        self.rows
            .read()
            .map_err(|_| RepoError::LockPoisoned(T::ENTITY))
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, Vec<T>>> {
        self.rows
            .write()
            .map_err(|_| RepoError::LockPoisoned(T::ENTITY))
    }

    /// Snapshot of rows accepted by `keep`, in insertion order.
    pub fn list_where(&self, keep: impl Fn(&T) -> bool) -> RepoResult<Vec<T>> {
        Ok(self.read()?.iter().filter(|row| keep(row)).cloned().collect())
    }

    pub fn list(&self) -> RepoResult<Vec<T>> {
        self.list_where(|_| true)
    }

    pub fn get(&self, id: &str) -> RepoResult<Option<T>> {
        Ok(self.read()?.iter().find(|row| row.id() == id).cloned())
    }

    pub fn insert(&self, row: T) -> RepoResult<()> {
        let mut rows = self.write()?;
        if rows.iter().any(|existing| existing.id() == row.id()) {
            return Err(RepoError::DuplicateId {
                entity: T::ENTITY,
                id: row.id().to_string(),
            });
        }
        rows.push(row);
        Ok(())
    }

    /// Replaces the row with the same id, returning the previous value.
    pub fn replace(&self, row: T) -> RepoResult<T> {
        let mut rows = self.write()?;
        let slot = rows
            .iter_mut()
            .find(|existing| existing.id() == row.id())
            .ok_or_else(|| RepoError::not_found(T::ENTITY, row.id()))?;
        Ok(std::mem::replace(slot, row))
    }

    pub fn remove(&self, id: &str) -> RepoResult<Option<T>> {
        let mut rows = self.write()?;
        Ok(rows
            .iter()
            .position(|row| row.id() == id)
            .map(|index| rows.remove(index)))
    }

    /// Applies `change` to every row and returns how many rows it reported
    /// as modified.
    pub fn update_all(&self, change: impl Fn(&mut T) -> bool) -> RepoResult<usize> {
        let mut rows = self.write()?;
        Ok(rows.iter_mut().map(|row| change(row)).filter(|changed| *changed).count())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryTable;
    use crate::model::calendar::Calendar;
    use crate::repo::RepoError;

    #[test]
    fn insert_rejects_duplicate_ids() {
        let table = MemoryTable::new(vec![Calendar::new("1", "Personal", "blue")]);
        let err = table
            .insert(Calendar::new("1", "Other", "red"))
            .unwrap_err();
        assert!(matches!(err, RepoError::DuplicateId { entity: "calendar", .. }));
    }

    #[test]
    fn replace_missing_row_is_not_found() {
        let table: MemoryTable<Calendar> = MemoryTable::new(Vec::new());
        let err = table.replace(Calendar::new("9", "Work", "green")).unwrap_err();
        assert_eq!(err.to_string(), "calendar not found: 9");
    }

    #[test]
    fn remove_keeps_order_of_remaining_rows() {
        let table = MemoryTable::new(vec![
            Calendar::new("1", "Personal", "blue"),
            Calendar::new("2", "Work", "green"),
            Calendar::new("3", "Family", "purple"),
        ]);
        assert!(table.remove("2").unwrap().is_some());
        assert!(table.remove("2").unwrap().is_none());
        let ids: Vec<String> = table.list().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }
}
