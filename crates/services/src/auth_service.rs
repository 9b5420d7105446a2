use serde::{Deserialize, Serialize};

use exam_core::model::UserProfile;

use crate::api::{ApiClient, Credentials};
use crate::error::AuthError;

/// A signed-in user together with the credentials to act on their behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub credentials: Credentials,
    pub user: UserProfile,
}

/// Fields collected by the sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl SignupForm {
    fn validate(&self) -> Result<(), AuthError> {
        require("email", &self.email)?;
        require("password", &self.password)?;
        require("name", &self.name)
    }
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct AuthResponse {
    token: String,
    user: UserProfile,
}

impl From<AuthResponse> for AuthSession {
    fn from(response: AuthResponse) -> Self {
        Self {
            credentials: Credentials::bearer(response.token),
            user: response.user,
        }
    }
}

/// Login, sign-up and profile lookup.
#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchange email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` for blank input and `AuthError::Api`
    /// when the backend refuses the login.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        require("email", email)?;
        require("password", password)?;

        let body = LoginRequest {
            email: email.trim(),
            password,
        };
        let response: AuthResponse = self.api.post_json(&["auth", "login"], &body, None).await?;
        tracing::info!(user = %response.user.id, "signed in");
        Ok(response.into())
    }

    /// Create an account and sign in.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` when email, password or name is
    /// blank, and `AuthError::Api` when the backend rejects the account.
    pub async fn signup(&self, form: &SignupForm) -> Result<AuthSession, AuthError> {
        form.validate()?;
        let response: AuthResponse = self.api.post_json(&["auth", "signup"], form, None).await?;
        tracing::info!(user = %response.user.id, "account created");
        Ok(response.into())
    }

    /// Profile of the user the credentials belong to.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Api`, typically `ApiError::Unauthorized` for an
    /// expired token.
    pub async fn me(&self, credentials: &Credentials) -> Result<UserProfile, AuthError> {
        Ok(self.api.get_json(&["auth", "me"], Some(credentials)).await?)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}
