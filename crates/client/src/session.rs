//! Authenticated session state and the flows that move it.
//!
//! [`Session`] owns the current [`SessionState`] and drives the auth
//! flows (login, register, bootstrap, logout, verification, password
//! reset) against the API. Route access is decided by the pure
//! [`route_guard`] function so hosts can evaluate it without touching
//! the session object.

use whitebox_core::forms::{PasswordChangeDraft, RegistrationDraft};
use whitebox_core::user::{Role, User};

use crate::endpoints::users::MessageResponse;
use crate::error::ApiError;
use crate::http::ApiClient;
use crate::token::TokenPair;

/// Where the session currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup bootstrap in flight; nothing is known yet.
    Loading,
    /// No user. Tokens are absent or were cleared.
    Anonymous,
    /// Logged in but the email address is not verified yet.
    AuthenticatedUnverified(User),
    /// Fully usable session.
    AuthenticatedVerified(User),
}

/// What kind of access a page demands.
#[derive(Debug, Clone, PartialEq)]
pub enum PageKind {
    /// No session required.
    Public,
    /// Requires a verified session, optionally a specific role.
    Protected { required_role: Option<Role> },
    /// The verify-email surface: requires a session but tolerates an
    /// unverified one.
    Verification,
}

/// Outcome of evaluating a page against the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Bootstrap still running; render nothing yet.
    Wait,
    Allow,
    RedirectToLogin,
    RedirectToVerifyEmail,
    RedirectToUnauthorized,
}

/// Where to send the user after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Provisioned account must rotate its password first.
    ChangePasswordRequired,
    /// Email not verified; land on the verification page.
    VerifyEmail,
    /// Normal landing, at the role's dashboard path.
    Dashboard(&'static str),
}

/// Decide page access from session state alone.
pub fn route_guard(state: &SessionState, page: &PageKind) -> GuardDecision {
    match page {
        PageKind::Public => GuardDecision::Allow,
        PageKind::Verification => match state {
            SessionState::Loading => GuardDecision::Wait,
            SessionState::Anonymous => GuardDecision::RedirectToLogin,
            SessionState::AuthenticatedUnverified(_)
            | SessionState::AuthenticatedVerified(_) => GuardDecision::Allow,
        },
        PageKind::Protected { required_role } => match state {
            SessionState::Loading => GuardDecision::Wait,
            SessionState::Anonymous => GuardDecision::RedirectToLogin,
            SessionState::AuthenticatedUnverified(_) => GuardDecision::RedirectToVerifyEmail,
            SessionState::AuthenticatedVerified(user) => match required_role {
                Some(role) if user.role != *role => GuardDecision::RedirectToUnauthorized,
                _ => GuardDecision::Allow,
            },
        },
    }
}

/// Landing decision for a fresh login.
pub fn login_outcome(user: &User, requires_password_change: bool) -> LoginOutcome {
    if requires_password_change {
        LoginOutcome::ChangePasswordRequired
    } else if !user.is_verified {
        LoginOutcome::VerifyEmail
    } else {
        LoginOutcome::Dashboard(user.role.dashboard_path())
    }
}

/// The live session. One per host; share behind whatever the host
/// uses for app-wide state.
pub struct Session {
    client: ApiClient,
    state: SessionState,
}

impl Session {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: SessionState::Loading,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::AuthenticatedUnverified(user)
            | SessionState::AuthenticatedVerified(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// The API client this session drives.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    fn set_user(&mut self, user: User) {
        self.state = if user.is_verified {
            SessionState::AuthenticatedVerified(user)
        } else {
            SessionState::AuthenticatedUnverified(user)
        };
    }

    fn clear(&mut self) {
        self.client.tokens().clear();
        self.state = SessionState::Anonymous;
    }

    /// Startup flow: if a token is stored, load the profile. On
    /// failure, try one refresh-token exchange and retry the profile
    /// once; if that also fails, clear tokens and settle Anonymous.
    ///
    /// Never returns an error: a failed bootstrap is the Anonymous
    /// state, not a fault the host must handle.
    pub async fn bootstrap(&mut self) {
        if self.client.tokens().access_token().is_none() {
            self.state = SessionState::Anonymous;
            return;
        }

        match self.client.users().get_profile().await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "session restored");
                self.set_user(user);
            }
            Err(first_error) => {
                let Some(refresh) = self.client.tokens().refresh_token() else {
                    tracing::warn!(error = %first_error, "profile load failed, no refresh token");
                    self.clear();
                    return;
                };
                match self.client.users().refresh_token(&refresh).await {
                    Ok(refreshed) => {
                        self.client.tokens().set_access_token(refreshed.access);
                        match self.client.users().get_profile().await {
                            Ok(user) => {
                                tracing::info!(user_id = %user.id, "session restored after refresh");
                                self.set_user(user);
                            }
                            Err(error) => {
                                tracing::warn!(%error, "profile retry failed after refresh");
                                self.clear();
                            }
                        }
                    }
                    Err(error) => {
                        tracing::warn!(%error, "refresh token exchange failed");
                        self.clear();
                    }
                }
            }
        }
    }

    /// Log in. On success the token pair is stored and the state moves
    /// per `is_verified`; the returned [`LoginOutcome`] says where to
    /// land. On failure the state stays as it was.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutcome, ApiError> {
        let response = self.client.users().login(email, password).await?;
        self.client.tokens().set_tokens(TokenPair {
            access: response.access,
            refresh: response.refresh,
        });
        let outcome = login_outcome(&response.user, response.requires_password_change);
        tracing::info!(user_id = %response.user.id, role = response.user.role.as_str(), "logged in");
        self.set_user(response.user);
        Ok(outcome)
    }

    /// Register a new account. Validates the draft client-side first;
    /// on success the user is logged in (unverified) and should land
    /// on the verification page.
    pub async fn register(&mut self, draft: &RegistrationDraft) -> Result<(), ApiError> {
        draft.validate_all().map_err(ApiError::Validation)?;
        let payload = serde_json::json!({
            "email": draft.email,
            "first_name": draft.first_name,
            "last_name": draft.last_name,
            "password": draft.password,
        });
        let response = self.client.users().register(&payload).await?;
        self.client.tokens().set_tokens(TokenPair {
            access: response.access,
            refresh: response.refresh,
        });
        tracing::info!(user_id = %response.user.id, "registered");
        self.set_user(response.user);
        Ok(())
    }

    /// Clear tokens and user. No server call.
    pub fn logout(&mut self) {
        tracing::info!("logged out");
        self.clear();
    }

    /// Confirm an email verification token. On success the tokens are
    /// cleared so the user logs in fresh with a verified account.
    pub async fn verify_email(&mut self, token: &str) -> Result<MessageResponse, ApiError> {
        let response = self.client.users().verify_email(token).await?;
        self.clear();
        Ok(response)
    }

    pub async fn resend_verification_email(&self) -> Result<MessageResponse, ApiError> {
        self.client.users().resend_verification_email().await
    }

    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse, ApiError> {
        self.client.users().request_password_reset(email).await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ApiError> {
        whitebox_core::forms::validate_password_complexity(new_password)
            .map_err(ApiError::Validation)?;
        self.client.users().reset_password(token, new_password).await
    }

    pub async fn change_password(
        &self,
        draft: &PasswordChangeDraft,
    ) -> Result<MessageResponse, ApiError> {
        draft.validate_all().map_err(ApiError::Validation)?;
        self.client
            .users()
            .change_password(&draft.old_password, &draft.new_password)
            .await
    }
}
