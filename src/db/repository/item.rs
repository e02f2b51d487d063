//! Item Repository

use super::{RepoError, RepoResult};
use crate::db::MemoryStore;
use crate::db::models::{Item, ItemCreate, ItemUpdate};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct ItemRepository {
    store: MemoryStore,
}

impl ItemRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// All items ordered by name
    pub fn find_all(&self) -> Vec<Item> {
        let mut items: Vec<Item> = self
            .store
            .items()
            .iter()
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        items
    }

    pub fn find_by_id(&self, id: &str) -> Option<Item> {
        self.store.items().get(id).map(|e| e.value().clone())
    }

    /// Create a new item; fresh items always start out available
    pub fn create(&self, data: ItemCreate) -> RepoResult<Item> {
        data.validate()?;

        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            category: data.category,
            location: data.location,
            available: true,
            created_at: Utc::now(),
        };

        self.store.items().insert(item.id.clone(), item.clone());
        Ok(item)
    }

    /// Update descriptive fields; availability is untouchable here
    pub fn update(&self, id: &str, data: ItemUpdate) -> RepoResult<Item> {
        data.validate()?;

        let existing = self
            .find_by_id(id)
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))?;

        let updated = Item {
            id: existing.id,
            name: data.name.unwrap_or(existing.name),
            category: data.category.unwrap_or(existing.category),
            location: data.location.unwrap_or(existing.location),
            available: existing.available,
            created_at: existing.created_at,
        };

        self.store.items().insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Replace the derived availability flag
    ///
    /// Only the reservation engine and the reconciliation pass call this.
    pub(crate) fn set_available(&self, id: &str, available: bool) -> RepoResult<Item> {
        let existing = self
            .find_by_id(id)
            .ok_or_else(|| RepoError::NotFound(format!("Item {} not found", id)))?;

        let updated = Item {
            available,
            ..existing
        };
        self.store.items().insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Delete an item
    ///
    /// Refused while any active reservation references the item.
    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).is_none() {
            return Err(RepoError::NotFound(format!("Item {} not found", id)));
        }

        let has_active = self
            .store
            .reservations()
            .iter()
            .any(|e| e.value().item_id == id && e.value().is_active());
        if has_active {
            return Err(RepoError::InUse(format!(
                "Item {} is referenced by an active reservation",
                id
            )));
        }

        self.store.items().remove(id);
        Ok(true)
    }
}
