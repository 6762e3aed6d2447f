use std::sync::{Arc, Mutex};

use log::info;

use crate::{ServiceError, ServiceResult, search::filter_contacts};

pub type ContactId = i64;

/// A stored contact record. Immutable once created; there are no update or
/// delete operations.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: i64,
    pub country: String,
    pub photo: Vec<u8>,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Raw field values as collected by the presentation layer. The phone number
/// is still text here; it is parsed during creation.
#[derive(Clone, Debug, Default)]
pub struct ContactDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub photo: Vec<u8>,
}

/// A structurally validated record, ready for storage. The id is assigned by
/// the repository, never by the caller.
#[derive(Clone, Debug)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: i64,
    pub country: String,
    pub photo: Vec<u8>,
}

pub type ArcContactRepository = Arc<Box<dyn ContactRepository + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait ContactRepository {
    /// Appends the record to durable storage and returns it with its fresh
    /// id. Atomic: either the record is visible to all subsequent
    /// `list_all` calls or nothing was persisted.
    async fn insert_contact(&self, contact: &NewContact) -> ServiceResult<Contact>;

    /// All stored contacts in insertion order.
    async fn list_all(&self) -> ServiceResult<Vec<Contact>>;
}

pub type ArcContactService = Arc<Box<dyn ContactService + Send + Sync + 'static>>;

#[async_trait::async_trait]
pub trait ContactService {
    async fn create_contact(&self, draft: ContactDraft) -> ServiceResult<Contact>;
    async fn list_contacts(&self) -> ServiceResult<Vec<Contact>>;
    async fn search_contacts(&self, query: &str) -> ServiceResult<Vec<Contact>>;
}

pub struct ContactServiceImpl {
    contact_repository: ArcContactRepository,
}

impl ContactServiceImpl {
    pub fn new(contact_repository: ArcContactRepository) -> Self {
        Self { contact_repository }
    }

    /// Structural checks only. Email and phone syntax are the caller's
    /// responsibility (see `validate`); here the draft must merely be
    /// storable: non-empty names, a photo, and a phone that parses as a
    /// non-negative integer.
    fn validate_draft(draft: ContactDraft) -> ServiceResult<NewContact> {
        if draft.first_name.is_empty() {
            return ServiceError::validation("first_name", "must not be empty");
        }
        if draft.last_name.is_empty() {
            return ServiceError::validation("last_name", "must not be empty");
        }
        if draft.photo.is_empty() {
            return ServiceError::validation("photo", "image data is required");
        }
        let Ok(phone) = draft.phone.parse::<i64>() else {
            return ServiceError::validation("phone", "not a number");
        };
        if phone < 0 {
            return ServiceError::validation("phone", "must not be negative");
        }
        Ok(NewContact {
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone,
            country: draft.country,
            photo: draft.photo,
        })
    }
}

#[async_trait::async_trait]
impl ContactService for ContactServiceImpl {
    async fn create_contact(&self, draft: ContactDraft) -> ServiceResult<Contact> {
        let record = Self::validate_draft(draft)?;
        let contact = self.contact_repository.insert_contact(&record).await?;
        info!("Created contact {} ({})", contact.id, contact.full_name());
        Ok(contact)
    }

    async fn list_contacts(&self) -> ServiceResult<Vec<Contact>> {
        self.contact_repository.list_all().await
    }

    async fn search_contacts(&self, query: &str) -> ServiceResult<Vec<Contact>> {
        let contacts = self.contact_repository.list_all().await?;
        if query.is_empty() {
            return Ok(contacts);
        }
        Ok(filter_contacts(&contacts, query))
    }
}

/// In-memory repository. Non-durable; backs tests and acts as a stand-in
/// where no database is wanted.
#[derive(Default)]
pub struct MemoryContactRepository {
    contacts: Mutex<Vec<Contact>>,
}

#[async_trait::async_trait]
impl ContactRepository for MemoryContactRepository {
    async fn insert_contact(&self, contact: &NewContact) -> ServiceResult<Contact> {
        let mut contacts = self
            .contacts
            .lock()
            .expect("Failed to lock contacts mutex");
        let stored = Contact {
            id: contacts.len() as ContactId + 1,
            first_name: contact.first_name.clone(),
            last_name: contact.last_name.clone(),
            email: contact.email.clone(),
            phone: contact.phone,
            country: contact.country.clone(),
            photo: contact.photo.clone(),
        };
        contacts.push(stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> ServiceResult<Vec<Contact>> {
        let contacts = self
            .contacts
            .lock()
            .expect("Failed to lock contacts mutex");
        Ok(contacts.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with_memory_repo() -> (ContactServiceImpl, ArcContactRepository) {
        let repo: ArcContactRepository = Arc::new(Box::new(MemoryContactRepository::default()));
        (ContactServiceImpl::new(repo.clone()), repo)
    }

    fn draft(first_name: &str) -> ContactDraft {
        ContactDraft {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@example.com", first_name.to_lowercase()),
            phone: "123456".to_string(),
            country: "France FR".to_string(),
            photo: vec![0x89, 0x50, 0x4e, 0x47],
        }
    }

    #[tokio::test]
    async fn test_create_then_list_preserves_call_order() {
        let (service, _) = service_with_memory_repo();
        for name in ["Alice", "Bob", "Carol"] {
            service.create_contact(draft(name)).await.unwrap();
        }

        let contacts = service.list_contacts().await.unwrap();
        let names: Vec<_> = contacts.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);

        let mut ids: Vec<_> = contacts.iter().map(|c| c.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_create_parses_phone() {
        let (service, _) = service_with_memory_repo();
        let contact = service.create_contact(draft("Alice")).await.unwrap();
        assert_eq!(contact.phone, 123456);
        assert_eq!(contact.full_name(), "Alice Doe");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_first_name_without_partial_write() {
        let (service, repo) = service_with_memory_repo();
        let result = service.create_contact(draft("")).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "first_name"
        ));
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_missing_photo() {
        let (service, repo) = service_with_memory_repo();
        let mut bad = draft("Alice");
        bad.photo.clear();
        let result = service.create_contact(bad).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "photo"
        ));
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unparseable_phone() {
        let (service, repo) = service_with_memory_repo();
        let mut bad = draft("Alice");
        bad.phone = "12e456".to_string();
        let result = service.create_contact(bad).await;
        assert!(matches!(
            result,
            Err(ServiceError::Validation { field, .. }) if field == "phone"
        ));
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_uses_filtered_set_for_nonempty_query() {
        let (service, _) = service_with_memory_repo();
        for name in ["Alice", "bob", "Bobby"] {
            service.create_contact(draft(name)).await.unwrap();
        }

        let hits = service.search_contacts("bo").await.unwrap();
        let names: Vec<_> = hits.iter().map(|c| c.first_name.as_str()).collect();
        assert_eq!(names, ["bob", "Bobby"]);

        let all = service.search_contacts("").await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
