//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body and runs `validator` rules on it.
//! Malformed JSON and failed rules are both 400 responses; failed rules
//! carry field-level details.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use roster_core::{field_errors, validation_errors_to_roster_error, RosterError};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                AppError::from(RosterError::validation(format!("Invalid JSON: {}", rejection.body_text())))
            })?;

        if let Err(errors) = value.validate() {
            let details = field_errors(&errors);
            return Err(AppError::from(validation_errors_to_roster_error(errors)).with_details(details));
        }

        Ok(ValidatedJson(value))
    }
}
