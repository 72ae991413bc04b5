//! In-memory user directory.
//!
//! Backs development and integration tests. Email and federated-id
//! uniqueness are enforced the same way a relational backend would via
//! unique indexes.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_entity::user::{NewUser, User, UserDirectory, UserPatch};

/// In-memory user directory backed by a concurrent map.
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    /// Users keyed by id.
    users: DashMap<i64, User>,
    /// Next id to assign.
    next_id: AtomicI64,
}

impl MemoryDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create an empty directory behind an `Arc`.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != exclude_id)
    }

    fn federated_id_taken(&self, federated_id: &str, exclude_id: Option<i64>) -> bool {
        self.users.iter().any(|u| {
            u.federated_id.as_deref() == Some(federated_id) && Some(u.id) != exclude_id
        })
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn find_by_federated_id(&self, federated_id: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.federated_id.as_deref() == Some(federated_id))
            .map(|u| u.clone()))
    }

    async fn create(&self, user: NewUser) -> AppResult<User> {
        if self.email_taken(&user.email, None) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        if let Some(fid) = user.federated_id.as_deref() {
            if self.federated_id_taken(fid, None) {
                return Err(AppError::conflict(format!(
                    "Federated identity '{fid}' is already linked"
                )));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let user = User {
            id,
            name: user.name,
            email: user.email,
            role: user.role,
            federated_id: user.federated_id,
            password_hash: user.password_hash,
            avatar_url: user.avatar_url,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> AppResult<User> {
        if let Some(email) = patch.email.as_deref() {
            if self.email_taken(email, Some(id)) {
                return Err(AppError::conflict(format!(
                    "Email '{email}' is already registered"
                )));
            }
        }

        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;

        // A user must keep at least one way to log in.
        let password_after = patch
            .password_hash
            .clone()
            .unwrap_or_else(|| entry.password_hash.clone());
        let federated_after = patch
            .federated_id
            .clone()
            .unwrap_or_else(|| entry.federated_id.clone());
        if password_after.as_deref().is_none_or(str::is_empty)
            && federated_after.as_deref().is_none_or(str::is_empty)
        {
            return Err(AppError::invalid_argument(
                "User must retain at least one login method",
            ));
        }

        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(email) = patch.email {
            entry.email = email;
        }
        if let Some(role) = patch.role {
            entry.role = role;
        }
        if let Some(federated_id) = patch.federated_id {
            entry.federated_id = federated_id;
        }
        if let Some(password_hash) = patch.password_hash {
            entry.password_hash = password_hash;
        }
        entry.updated_at = Utc::now();

        Ok(entry.clone())
    }

    async fn link_federated_id(&self, id: i64, federated_id: &str) -> AppResult<User> {
        if self.federated_id_taken(federated_id, Some(id)) {
            return Err(AppError::conflict(format!(
                "Federated identity '{federated_id}' is already linked"
            )));
        }

        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        entry.federated_id = Some(federated_id.to_string());
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn set_password(&self, id: i64, password_hash: &str) -> AppResult<()> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        entry.password_hash = Some(password_hash.to_string());
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        Ok(self.users.remove(&id).is_some())
    }

    async fn list(&self, page: u64, page_size: u64) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|u| u.clone()).collect();
        users.sort_by_key(|u| u.id);

        let offset = page.saturating_sub(1).saturating_mul(page_size) as usize;
        Ok(users
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect())
    }
}
