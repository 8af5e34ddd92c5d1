//! Authentication service.
//!
//! The [`AuthGate`] admits a user to the console. It talks to an
//! [`IdentityProvider`]; the only provider today is [`MockIdentityProvider`],
//! which waits a fixed delay and then signs anyone in as an admin.
//!
//! # Concurrency
//!
//! A sign-in is a deferred completion. While it is pending the gate reports
//! [`AuthState::Pending`] and rejects a second login or signup with
//! [`AuthError::AlreadyInProgress`] instead of racing two completions.

mod error;

pub use error::AuthError;

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Utc;
use secrecy::SecretString;
use tracing::{debug, info, instrument};

use aachar_core::{Email, Role, UserId};

use crate::forms::{LoginForm, SignupForm};
use crate::models::Identity;

/// Display name the mock provider gives every login.
pub const MOCK_LOGIN_NAME: &str = "Admin User";

/// Checked login credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: SecretString,
}

/// Checked signup request.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: Email,
    pub password: SecretString,
}

/// Source of identities.
///
/// A real implementation verifies credentials and returns
/// [`AuthError::Rejected`] on failure.
pub trait IdentityProvider: Send + Sync {
    /// Sign in an existing account.
    fn authenticate(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;

    /// Create an account and sign it in.
    fn register(
        &self,
        registration: &Registration,
    ) -> impl Future<Output = Result<Identity, AuthError>> + Send;
}

/// Provider that accepts everyone after an artificial delay.
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    login_delay: Duration,
    signup_delay: Duration,
}

impl MockIdentityProvider {
    /// Default login latency.
    pub const LOGIN_DELAY: Duration = Duration::from_millis(2000);
    /// Default signup latency.
    pub const SIGNUP_DELAY: Duration = Duration::from_millis(2500);

    #[must_use]
    pub const fn new(login_delay: Duration, signup_delay: Duration) -> Self {
        Self {
            login_delay,
            signup_delay,
        }
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new(Self::LOGIN_DELAY, Self::SIGNUP_DELAY)
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        tokio::time::sleep(self.login_delay).await;
        Ok(Identity {
            id: UserId::generate(),
            email: credentials.email.clone(),
            name: MOCK_LOGIN_NAME.to_owned(),
            role: Role::Admin,
            created_at: Utc::now(),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<Identity, AuthError> {
        tokio::time::sleep(self.signup_delay).await;
        Ok(Identity {
            id: UserId::generate(),
            email: registration.email.clone(),
            name: registration.name.clone(),
            role: Role::Admin,
            created_at: Utc::now(),
        })
    }
}

/// Which request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlow {
    Login,
    Signup,
}

/// Where the gate is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    SignedOut,
    /// Waiting on the provider; input should be disabled.
    Pending(AuthFlow),
    SignedIn(Identity),
}

/// Admits users to the console through an [`IdentityProvider`].
#[derive(Debug)]
pub struct AuthGate<P> {
    provider: P,
    state: Mutex<AuthState>,
}

impl<P: IdentityProvider> AuthGate<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            state: Mutex::new(AuthState::SignedOut),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.lock().clone()
    }

    /// Whether a login or signup is pending.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(*self.lock(), AuthState::Pending(_))
    }

    /// The signed-in identity, if any.
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        match &*self.lock() {
            AuthState::SignedIn(identity) => Some(identity.clone()),
            _ => None,
        }
    }

    /// Sign in with the login form.
    ///
    /// # Errors
    ///
    /// Returns a form error before any delay, `AuthError::AlreadyInProgress`
    /// while another request is pending, `AuthError::AlreadySignedIn` if
    /// someone is signed in, or whatever the provider returns.
    #[instrument(skip_all, fields(email = %form.email.trim()))]
    pub async fn login(&self, form: LoginForm) -> Result<Identity, AuthError> {
        let credentials = form.into_credentials()?;
        let pending = self.begin(AuthFlow::Login)?;
        let result = self.provider.authenticate(&credentials).await;
        pending.finish(result)
    }

    /// Create an account with the signup form and sign it in.
    ///
    /// # Errors
    ///
    /// Same as [`AuthGate::login`].
    #[instrument(skip_all, fields(email = %form.email.trim()))]
    pub async fn signup(&self, form: SignupForm) -> Result<Identity, AuthError> {
        let registration = form.into_registration()?;
        let pending = self.begin(AuthFlow::Signup)?;
        let result = self.provider.register(&registration).await;
        pending.finish(result)
    }

    /// Discard the identity. Returns whether anyone was signed in.
    ///
    /// A pending request is not cancelled; logout only applies once it lands.
    pub fn logout(&self) -> bool {
        let mut state = self.lock();
        match &*state {
            AuthState::SignedIn(identity) => {
                info!(user_id = %identity.id, "Signed out");
                *state = AuthState::SignedOut;
                true
            }
            AuthState::Pending(_) | AuthState::SignedOut => false,
        }
    }

    fn begin(&self, flow: AuthFlow) -> Result<Pending<'_>, AuthError> {
        let mut state = self.lock();
        match &*state {
            AuthState::Pending(_) => return Err(AuthError::AlreadyInProgress),
            AuthState::SignedIn(identity) => {
                return Err(AuthError::AlreadySignedIn(identity.email.to_string()));
            }
            AuthState::SignedOut => {}
        }
        *state = AuthState::Pending(flow);
        debug!(?flow, "Sign-in request started");
        Ok(Pending {
            state: &self.state,
            done: false,
        })
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        lock_state(&self.state)
    }
}

fn lock_state(state: &Mutex<AuthState>) -> MutexGuard<'_, AuthState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Marks the gate pending until finished or dropped.
///
/// Dropping the sign-in future mid-delay puts the gate back to signed out
/// rather than leaving it stuck in `Pending`.
struct Pending<'a> {
    state: &'a Mutex<AuthState>,
    done: bool,
}

impl Pending<'_> {
    fn finish(mut self, result: Result<Identity, AuthError>) -> Result<Identity, AuthError> {
        self.done = true;
        let mut state = lock_state(self.state);
        match result {
            Ok(identity) => {
                info!(user_id = %identity.id, role = %identity.role, "Signed in");
                *state = AuthState::SignedIn(identity.clone());
                Ok(identity)
            }
            Err(e) => {
                info!(error = %e, "Sign-in failed");
                *state = AuthState::SignedOut;
                Err(e)
            }
        }
    }
}

impl Drop for Pending<'_> {
    fn drop(&mut self) {
        if !self.done {
            let mut state = lock_state(self.state);
            if matches!(*state, AuthState::Pending(_)) {
                *state = AuthState::SignedOut;
            }
        }
    }
}
