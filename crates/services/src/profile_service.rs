use serde::Deserialize;

use exam_core::model::UserProfile;

use crate::api::{ApiClient, Credentials};
use crate::error::AuthError;

#[derive(Deserialize)]
struct MessageResponse {
    message: String,
}

/// Reads and edits the signed-in user's own profile.
#[derive(Clone)]
pub struct ProfileService {
    api: ApiClient,
    credentials: Credentials,
}

impl ProfileService {
    #[must_use]
    pub fn new(api: ApiClient, credentials: Credentials) -> Self {
        Self { api, credentials }
    }

    /// # Errors
    ///
    /// Returns `AuthError::Api` if the request fails.
    pub async fn me(&self) -> Result<UserProfile, AuthError> {
        Ok(self
            .api
            .get_json(&["auth", "me"], Some(&self.credentials))
            .await?)
    }

    /// Rename the user. Returns the server's confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for a blank name and `AuthError::Api`
    /// if the backend rejects it.
    pub async fn update_name(&self, name: &str) -> Result<String, AuthError> {
        let name = required("name", name)?;
        let response: MessageResponse = self
            .api
            .put_query(&["auth", "profile"], &[("name", name)], Some(&self.credentials))
            .await?;
        tracing::info!("profile name updated");
        Ok(response.message)
    }

    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for a blank number and
    /// `AuthError::Api` if the backend rejects it.
    pub async fn update_mobile(&self, mobile: &str) -> Result<String, AuthError> {
        let mobile = required("mobile", mobile)?;
        let response: MessageResponse = self
            .api
            .put_query(
                &["profile", "mobile"],
                &[("mobile", mobile)],
                Some(&self.credentials),
            )
            .await?;
        tracing::info!("mobile number updated");
        Ok(response.message)
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
