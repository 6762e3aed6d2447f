use std::sync::Arc;

use crate::ServiceResult;

pub type ArcCountryNameProvider = Arc<Box<dyn CountryNameProvider + Send + Sync + 'static>>;

/// Source of the country suggestion list shown when adding a contact.
///
/// On success the strings are display-ready (`"<name> <alpha-2 code>"`), in
/// source order. A failure is reported as `ServiceError::Fetch` and is always
/// non-fatal to the caller: the suggestion list stays empty and the country
/// field degrades to free text. The result is delivered exactly once and an
/// abandoned call is safely discardable; nothing here touches contact
/// storage.
#[async_trait::async_trait]
pub trait CountryNameProvider {
    async fn fetch_country_names(&self) -> ServiceResult<Vec<String>>;
}
