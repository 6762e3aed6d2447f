use thiserror::Error;

pub mod contact;
pub mod country;
pub mod search;
pub mod validate;

#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("storage error: {0}")]
    Storage(String),

    #[error("country fetch failed: {0}")]
    Fetch(String),
}

impl ServiceError {
    pub fn validation<F, S, R>(field: F, reason: S) -> ServiceResult<R>
    where
        F: Into<String>,
        S: Into<String>,
    {
        Err(ServiceError::Validation {
            field: field.into(),
            reason: reason.into(),
        })
    }

    pub fn storage<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Storage(msg.into()))
    }

    pub fn fetch<T, R>(msg: T) -> ServiceResult<R>
    where
        T: Into<String>,
    {
        Err(ServiceError::Fetch(msg.into()))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
