use storekeep_core::envelope::ErrorKind;
use storekeep_core::marshal::MarshalError;
use storekeep_core::storage::{StoreError, UpdateError};
use thiserror::Error;

/// Why a handler could not produce a success envelope.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The event itself was unusable: missing path parameter, missing or
    /// malformed body, or an update the store must never see.
    #[error("{0}")]
    InvalidInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HandlerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HandlerError::InvalidInput(_) => ErrorKind::ClientInput,
            HandlerError::Store(_) => ErrorKind::StoreOperation,
        }
    }
}

/// Marshalling a request body only fails on caller input.
impl From<MarshalError> for HandlerError {
    fn from(err: MarshalError) -> Self {
        HandlerError::InvalidInput(err.to_string())
    }
}

impl From<UpdateError> for HandlerError {
    fn from(err: UpdateError) -> Self {
        HandlerError::InvalidInput(err.to_string())
    }
}
