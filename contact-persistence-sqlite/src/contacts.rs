use contact_domain::{
    ServiceError, ServiceResult,
    contact::{Contact, ContactId, ContactRepository, NewContact},
};
use sqlx::{Pool, Row, Sqlite, sqlite::SqliteRow};

const CREATE_CONTACTS_TABLE: &str = "CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone INTEGER NOT NULL,
    country TEXT NOT NULL,
    photo BLOB NOT NULL
)";

pub struct SqliteContactRepository {
    pool: Pool<Sqlite>,
}

impl SqliteContactRepository {
    pub fn new() -> Self {
        let pool = crate::create_contact_db_pool();
        Self { pool }
    }

    pub fn with_pool(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Creates the contacts table if it does not exist yet. Called once at
    /// startup, before the repository is handed to consumers.
    pub async fn init_schema(&self) -> ServiceResult<()> {
        sqlx::query(CREATE_CONTACTS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    fn contact_from_row(row: &SqliteRow) -> sqlx::Result<Contact> {
        Ok(Contact {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            country: row.try_get("country")?,
            photo: row.try_get("photo")?,
        })
    }
}

impl Default for SqliteContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ContactRepository for SqliteContactRepository {
    // Single INSERT statement: the record is either fully visible to later
    // list_all calls or not persisted at all.
    async fn insert_contact(&self, contact: &NewContact) -> ServiceResult<Contact> {
        let id = sqlx::query_scalar::<_, ContactId>(
            "INSERT INTO contacts (first_name, last_name, email, phone, country, photo)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&contact.first_name)
        .bind(&contact.last_name)
        .bind(&contact.email)
        .bind(contact.phone)
        .bind(&contact.country)
        .bind(&contact.photo)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(Contact {
            id,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone,
            country: contact.country.clone(),
            photo: contact.photo.clone(),
        })
    }

    async fn list_all(&self) -> ServiceResult<Vec<Contact>> {
        let rows = sqlx::query("SELECT * FROM contacts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        rows.iter()
            .map(|row| {
                Self::contact_from_row(row).map_err(|e| ServiceError::Storage(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_repo() -> SqliteContactRepository {
        // A single connection so every query sees the same in-memory db.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = SqliteContactRepository::with_pool(pool);
        repo.init_schema().await.unwrap();
        repo
    }

    fn record(first_name: &str) -> NewContact {
        NewContact {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: 123456,
            country: "France FR".to_string(),
            photo: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn test_insert_then_list_round_trip() {
        let repo = memory_repo().await;
        let alice = repo.insert_contact(&record("Alice")).await.unwrap();
        let bob = repo.insert_contact(&record("Bob")).await.unwrap();
        assert_ne!(alice.id, bob.id);

        let contacts = repo.list_all().await.unwrap();
        assert_eq!(contacts, vec![alice, bob]);
        assert_eq!(contacts[0].photo, vec![0x89, 0x50, 0x4e, 0x47]);
    }

    #[tokio::test]
    async fn test_list_is_insertion_ordered() {
        let repo = memory_repo().await;
        for name in ["Carol", "Alice", "Bob"] {
            repo.insert_contact(&record(name)).await.unwrap();
        }
        let names: Vec<_> = repo
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.first_name)
            .collect();
        assert_eq!(names, ["Carol", "Alice", "Bob"]);
    }

    #[tokio::test]
    async fn test_missing_table_is_a_storage_error() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let repo = SqliteContactRepository::with_pool(pool);
        let result = repo.list_all().await;
        assert!(matches!(result, Err(ServiceError::Storage(..))));
    }
}
