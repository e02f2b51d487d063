//! User Repository

use super::{RepoError, RepoResult};
use crate::db::MemoryStore;
use crate::db::models::{User, UserCreate, UserUpdate};
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct UserRepository {
    store: MemoryStore,
}

impl UserRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// All users ordered by name
    pub fn find_all(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .store
            .users()
            .iter()
            .map(|e| e.value().clone())
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        users
    }

    pub fn find_by_id(&self, id: &str) -> Option<User> {
        self.store.users().get(id).map(|e| e.value().clone())
    }

    /// Resolve a badge code to its user
    pub fn find_by_badge(&self, badge_code: &str) -> Option<User> {
        let user_id = self
            .store
            .badges()
            .get(badge_code)
            .map(|e| e.value().clone())?;
        self.find_by_id(&user_id)
    }

    /// Create a new user, claiming the badge code atomically
    pub fn create(&self, data: UserCreate) -> RepoResult<User> {
        data.validate()?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            role: data.role,
            badge_code: data.badge_code,
            contact: data.contact,
            created_at: Utc::now(),
        };

        // The badge index entry is the uniqueness claim; exactly one of two
        // concurrent creates with the same code wins the vacant entry.
        match self.store.badges().entry(user.badge_code.clone()) {
            Entry::Occupied(_) => {
                return Err(RepoError::Duplicate(format!(
                    "Badge code '{}' is already registered",
                    user.badge_code
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(user.id.clone());
            }
        }

        self.store.users().insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Update a user, re-claiming the badge code if it changes
    pub fn update(&self, id: &str, data: UserUpdate) -> RepoResult<User> {
        data.validate()?;

        let existing = self
            .find_by_id(id)
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        let new_badge = data.badge_code.unwrap_or_else(|| existing.badge_code.clone());
        if new_badge != existing.badge_code {
            match self.store.badges().entry(new_badge.clone()) {
                Entry::Occupied(_) => {
                    return Err(RepoError::Duplicate(format!(
                        "Badge code '{}' is already registered",
                        new_badge
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id.to_string());
                }
            }
            self.store.badges().remove(&existing.badge_code);
        }

        let updated = User {
            id: existing.id,
            name: data.name.unwrap_or(existing.name),
            role: data.role.unwrap_or(existing.role),
            badge_code: new_badge,
            contact: data.contact.or(existing.contact),
            created_at: existing.created_at,
        };

        self.store.users().insert(id.to_string(), updated.clone());
        Ok(updated)
    }

    /// Delete a user
    ///
    /// Refused while any active reservation references the user.
    pub fn delete(&self, id: &str) -> RepoResult<bool> {
        let existing = self
            .find_by_id(id)
            .ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))?;

        let has_active = self
            .store
            .reservations()
            .iter()
            .any(|e| e.value().user_id == id && e.value().is_active());
        if has_active {
            return Err(RepoError::InUse(format!(
                "User {} still has an active reservation",
                id
            )));
        }

        self.store.users().remove(id);
        self.store.badges().remove(&existing.badge_code);
        Ok(true)
    }
}
