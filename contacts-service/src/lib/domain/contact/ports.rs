use async_trait::async_trait;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactDetails;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::NewContact;
use crate::domain::user::models::UserId;

/// Port for contact operations.
///
/// Every operation is performed on behalf of `owner`; contacts of other
/// users are never returned or modified.
#[async_trait]
pub trait ContactsServicePort: Send + Sync + 'static {
    /// List the owner's contacts ordered by id.
    async fn list_contacts(&self, owner: &UserId) -> Result<Vec<Contact>, ContactError>;

    /// Create a contact owned by `owner`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_contact(
        &self,
        owner: &UserId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError>;

    /// Fetch a contact for editing.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `Forbidden` - Contact belongs to another user
    async fn edit_contact(&self, owner: &UserId, id: &ContactId)
        -> Result<Contact, ContactError>;

    /// Replace the editable fields of a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `Forbidden` - Contact belongs to another user
    async fn update_contact(
        &self,
        owner: &UserId,
        id: &ContactId,
        details: ContactDetails,
    ) -> Result<Contact, ContactError>;

    /// Delete a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    /// * `Forbidden` - Contact belongs to another user
    async fn delete_contact(&self, owner: &UserId, id: &ContactId) -> Result<(), ContactError>;
}

/// Persistence operations for contact aggregate.
#[async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    /// Persist new contact to storage.
    ///
    /// # Returns
    /// Created contact with its assigned id
    async fn create(&self, contact: NewContact) -> Result<Contact, ContactError>;

    /// Retrieve contact by identifier.
    ///
    /// # Returns
    /// Optional contact entity (None if not found)
    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactError>;

    /// Retrieve every contact owned by `owner`, ordered by id.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Contact>, ContactError>;

    /// Persist the editable fields and `updated_at` of an existing contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    async fn update(&self, contact: Contact) -> Result<Contact, ContactError>;

    /// Remove a contact.
    ///
    /// # Errors
    /// * `NotFound` - Contact does not exist
    async fn delete(&self, id: &ContactId) -> Result<(), ContactError>;
}
