use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::contact::errors::ContactError;
use crate::domain::contact::models::Contact;
use crate::domain::contact::models::ContactDetails;
use crate::domain::contact::models::ContactId;
use crate::domain::contact::models::ContactName;
use crate::domain::contact::models::NewContact;
use crate::domain::contact::models::PhoneNumber;
use crate::domain::contact::ports::ContactRepository;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;

pub struct PostgresContactRepository {
    pool: PgPool,
}

impl PostgresContactRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: i64,
    user_id: i64,
    first_name: String,
    last_name: Option<String>,
    email: Option<String>,
    phone_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContactRow> for Contact {
    type Error = ContactError;

    fn try_from(row: ContactRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = move |field: &str, e: &dyn std::fmt::Display| {
            ContactError::DatabaseError(format!(
                "stored contact {} has invalid {}: {}",
                id, field, e
            ))
        };

        let first_name = ContactName::new(row.first_name).map_err(|e| corrupt("first_name", &e))?;
        let last_name = row
            .last_name
            .map(ContactName::new)
            .transpose()
            .map_err(|e| corrupt("last_name", &e))?;
        let email = row
            .email
            .map(EmailAddress::new)
            .transpose()
            .map_err(|e| corrupt("email", &e))?;
        let phone_number = row
            .phone_number
            .map(PhoneNumber::new)
            .transpose()
            .map_err(|e| corrupt("phone_number", &e))?;

        Ok(Contact {
            id: ContactId(id),
            user_id: UserId(row.user_id),
            details: ContactDetails::new(first_name)
                .with_last_name(last_name)
                .with_email(email)
                .with_phone_number(phone_number),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl ContactRepository for PostgresContactRepository {
    async fn create(&self, contact: NewContact) -> Result<Contact, ContactError> {
        let details = &contact.details;
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO contacts (user_id, first_name, last_name, email, phone_number, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id
            "#,
        )
        .bind(contact.user_id.0)
        .bind(details.first_name.as_str())
        .bind(details.last_name.as_ref().map(|n| n.as_str()))
        .bind(details.email.as_ref().map(|e| e.as_str()))
        .bind(details.phone_number.as_ref().map(|p| p.as_str()))
        .bind(contact.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        Ok(contact.with_id(ContactId(id)))
    }

    async fn find_by_id(&self, id: &ContactId) -> Result<Option<Contact>, ContactError> {
        sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, first_name, last_name, email, phone_number, created_at, updated_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?
        .map(Contact::try_from)
        .transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Contact>, ContactError> {
        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, user_id, first_name, last_name, email, phone_number, created_at, updated_at
            FROM contacts
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Contact::try_from).collect()
    }

    async fn update(&self, contact: Contact) -> Result<Contact, ContactError> {
        let details = &contact.details;
        let result = sqlx::query(
            r#"
            UPDATE contacts
            SET first_name = $2, last_name = $3, email = $4, phone_number = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(contact.id.0)
        .bind(details.first_name.as_str())
        .bind(details.last_name.as_ref().map(|n| n.as_str()))
        .bind(details.email.as_ref().map(|e| e.as_str()))
        .bind(details.phone_number.as_ref().map(|p| p.as_str()))
        .bind(contact.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(contact.id));
        }

        Ok(contact)
    }

    async fn delete(&self, id: &ContactId) -> Result<(), ContactError> {
        let result = sqlx::query(
            r#"
            DELETE FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ContactError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ContactError::NotFound(*id));
        }

        Ok(())
    }
}
