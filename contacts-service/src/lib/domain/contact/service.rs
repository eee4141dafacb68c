use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactDetails;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::contact::ports::ContactsServicePort;
use crate::domain::user::models::UserId;

/// Domain service implementation for contact operations.
///
/// Concrete implementation of ContactsServicePort with dependency injection.
pub struct ContactsService<CR>
where
    CR: ContactRepository,
{
    repository: Arc<CR>,
}

impl<CR> ContactsService<CR>
where
    CR: ContactRepository,
{
    /// Create a new contacts service.
    ///
    /// # Arguments
    /// * `repository` - Contact persistence implementation
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }

    /// Load a contact and check that `owner` may touch it.
    async fn owned_contact(&self, owner: &UserId, id: &ContactId) -> Result<Contact, ContactError> {
        let contact = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ContactError::NotFound(*id))?;

        if !contact.is_owned_by(owner) {
            tracing::warn!(
                contact_id = %id,
                owner_id = %contact.user_id,
                user_id = %owner,
                "Contact access denied"
            );
            return Err(ContactError::Forbidden {
                contact_id: *id,
                user_id: *owner,
            });
        }

        Ok(contact)
    }
}

#[async_trait]
impl<CR> ContactsServicePort for ContactsService<CR>
where
    CR: ContactRepository,
{
    async fn list_contacts(&self, owner: &UserId) -> Result<Vec<Contact>, ContactError> {
        self.repository.list_by_owner(owner).await
    }

    async fn create_contact(
        &self,
        owner: &UserId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError> {
        let contact = self
            .repository
            .create(NewContact::new(*owner, details, Utc::now()))
            .await?;

        tracing::debug!(contact_id = %contact.id, user_id = %owner, "Contact created");

        Ok(contact)
    }

    async fn edit_contact(
        &self,
        owner: &UserId,
        id: &ContactId,
    ) -> Result<Contact, ContactError> {
        self.owned_contact(owner, id).await
    }

    async fn update_contact(
        &self,
        owner: &UserId,
        id: &ContactId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError> {
        let contact = self.owned_contact(owner, id).await?;

        let updated = self
            .repository
            .update(contact.replace_details(details, Utc::now()))
            .await?;

        tracing::debug!(contact_id = %id, user_id = %owner, "Contact updated");

        Ok(updated)
    }

    async fn delete_contact(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError> {
        self.owned_contact(owner, id).await?;
        self.repository.delete(id).await?;

        tracing::debug!(contact_id = %id, user_id = %owner, "Contact deleted");

        Ok(())
    }
}
