//! In-memory adapters for every repository port.
//!
//! Used by the `memory` database driver and by the integration tests. Each
//! store sits behind a single `RwLock`, so uniqueness checks and inserts
//! happen atomically.

use std::collections::BTreeMap;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::access_token::errors::AccessTokenError;
use crate::domain::access_token::models::AccessToken;
use crate::domain::access_token::models::AccessTokenId;
use crate::domain::access_token::ports::AccessTokenRepository;
use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// Rows keyed by a store-assigned, increasing id.
#[derive(Debug)]
struct Table<K, V> {
    last_id: i64,
    rows: BTreeMap<K, V>,
}

impl<K, V> Default for Table<K, V> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<K, V> Table<K, V> {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Table<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.rows.values().any(|u| u.name == user.name) {
            return Err(UserError::NameAlreadyExists(user.name.to_string()));
        }
        if users.rows.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        let user = user.with_id(UserId(users.next_id()));
        users.rows.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.rows.get(id).cloned())
    }

    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .find(|u| u.name == *name)
            .cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users.write().await.rows.remove(id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryAccessTokenRepository {
    tokens: RwLock<HashMap<AccessTokenId, AccessToken>>,
}

impl InMemoryAccessTokenRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn create(&self, token: AccessToken) -> Result<AccessToken, AccessTokenError> {
        self.tokens.write().await.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_by_id(
        &self,
        id: &AccessTokenId,
    ) -> Result<Option<AccessToken>, AccessTokenError> {
        Ok(self.tokens.read().await.get(id).cloned())
    }

    async fn revoke(&self, id: &AccessTokenId) -> Result<(), AccessTokenError> {
        self.tokens
            .write()
            .await
            .get_mut(id)
            .map(|token| token.revoked = true)
            .ok_or(AccessTokenError::NotFound(*id))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    contacts: RwLock<Table<ContactId, Contact>>,
}

impl InMemoryContactRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn create(&self, contact: NewContact) -> Result<Contact, ContactError> {
        let mut contacts = self.contacts.write().await;

        let contact = contact.with_id(ContactId(contacts.next_id()));
        contacts.rows.insert(contact.id, contact.clone());

        Ok(contact)
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactError> {
        Ok(self.contacts.read().await.rows.get(id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Contact>, ContactError> {
        Ok(self
            .contacts
            .read()
            .await
            .rows
            .values()
            .filter(|c| c.is_owned_by(owner))
            .cloned()
            .collect())
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let mut contacts = self.contacts.write().await;

        let stored = contacts
            .rows
            .get_mut(&contact.id)
            .ok_or(ContactError::NotFound(contact.id))?;
        stored.details = contact.details.clone();
        stored.updated_at = contact.updated_at;

        Ok(stored.clone())
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactError> {
        self.contacts
            .write()
            .await
            .rows
            .remove(id)
            .map(|_| ())
            .ok_or(ContactError::NotFound(*id))
    }
}
