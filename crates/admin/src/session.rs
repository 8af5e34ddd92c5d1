//! Admin session: the auth gate in front of the catalog.
//!
//! An [`AdminSession`] starts signed out. A successful login or signup opens
//! an [`AdminPanel`] holding a fresh catalog and navigator; logout drops it,
//! and the catalog with it.

use tracing::{info, warn};

use aachar_core::ProductId;

use crate::catalog::{Catalog, CatalogBackend, CatalogStats, MemoryBackend, seed};
use crate::config::AdminConfig;
use crate::error::AppError;
use crate::forms::{FormField, LoginForm, ProductForm, SignupForm};
use crate::models::{Identity, Product};
use crate::navigation::{NavAction, Navigator, ViewMode};
use crate::services::auth::{AuthGate, AuthState, IdentityProvider};

/// The catalog and navigation for a signed-in user.
#[derive(Debug)]
pub struct AdminPanel<B = MemoryBackend> {
    catalog: Catalog<B>,
    navigator: Navigator,
}

impl<B: CatalogBackend> AdminPanel<B> {
    #[must_use]
    pub fn new(catalog: Catalog<B>) -> Self {
        Self {
            catalog,
            navigator: Navigator::new(),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog<B> {
        &self.catalog
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Products in display order.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    pub fn products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self.catalog.list()?)
    }

    /// List header counts.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    pub fn stats(&self) -> Result<CatalogStats, AppError> {
        Ok(self.catalog.stats()?)
    }

    /// Switch to the list, discarding any open form.
    pub fn show_list(&mut self) {
        self.navigator.show_list();
    }

    /// Open the create form (or keep the open one).
    pub fn show_create(&mut self) -> &mut ProductForm {
        self.navigator.show_create()
    }

    /// Open the edit form for product `id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Catalog` if `id` is unknown, or
    /// `AppError::Navigation` if a form is already open.
    pub fn edit(&mut self, id: ProductId) -> Result<&mut ProductForm, AppError> {
        let product = self.catalog.get(id)?;
        Ok(self.navigator.edit(product)?)
    }

    /// Type `value` into `field` of the open form.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Navigation` if no form is open, or
    /// `AppError::Input` if the value does not fit the field.
    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), AppError> {
        let form = self.navigator.require_form(NavAction::Input)?;
        form.set_field(field, value)?;
        Ok(())
    }

    /// Submit the open form.
    ///
    /// # Errors
    ///
    /// See [`Navigator::submit`].
    pub fn submit(&mut self) -> Result<Product, AppError> {
        Ok(self.navigator.submit(&mut self.catalog)?)
    }

    /// Close the open form without saving.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Navigation` if no form is open.
    pub fn cancel(&mut self) -> Result<(), AppError> {
        Ok(self.navigator.cancel()?)
    }

    /// Delete product `id`; unknown IDs are ignored. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Only backend failures.
    pub fn delete(&mut self, id: ProductId) -> Result<bool, AppError> {
        Ok(self.catalog.delete(id)?)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.navigator.set_view_mode(mode);
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.navigator.toggle_view_mode()
    }
}

/// One console session from sign-in to sign-out.
#[derive(Debug)]
pub struct AdminSession<P> {
    config: AdminConfig,
    gate: AuthGate<P>,
    panel: Option<AdminPanel>,
}

impl<P: IdentityProvider> AdminSession<P> {
    #[must_use]
    pub fn new(config: AdminConfig, provider: P) -> Self {
        Self {
            config,
            gate: AuthGate::new(provider),
            panel: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AdminConfig {
        &self.config
    }

    #[must_use]
    pub fn auth_state(&self) -> AuthState {
        self.gate.state()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.gate.is_loading()
    }

    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.gate.identity()
    }

    /// Sign in and open the admin panel.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if sign-in fails, or `AppError::Seed` if the
    /// sample catalog cannot be loaded.
    pub async fn login(&mut self, form: LoginForm) -> Result<Identity, AppError> {
        let identity = self.gate.login(form).await?;
        self.admit(identity)
    }

    /// Sign up and open the admin panel.
    ///
    /// # Errors
    ///
    /// Same as [`AdminSession::login`].
    pub async fn signup(&mut self, form: SignupForm) -> Result<Identity, AppError> {
        let identity = self.gate.signup(form).await?;
        self.admit(identity)
    }

    /// Sign out and drop the panel with its catalog.
    pub fn logout(&mut self) {
        if self.gate.logout() {
            self.panel = None;
        }
    }

    /// The panel, if signed in.
    #[must_use]
    pub const fn panel(&self) -> Option<&AdminPanel> {
        self.panel.as_ref()
    }

    /// The panel for changes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if nobody is signed in.
    pub fn panel_mut(&mut self) -> Result<&mut AdminPanel, AppError> {
        self.panel
            .as_mut()
            .ok_or_else(|| AppError::Unauthorized("sign in first".to_string()))
    }

    fn admit(&mut self, identity: Identity) -> Result<Identity, AppError> {
        let mut catalog = Catalog::in_memory(self.config.currency);
        if self.config.seed_catalog {
            if let Err(e) = seed::seed(&mut catalog) {
                warn!(error = %e, "Sample catalog not loaded");
                self.gate.logout();
                return Err(e.into());
            }
        }
        info!(user_id = %identity.id, "Admin panel opened");
        self.panel = Some(AdminPanel::new(catalog));
        Ok(identity)
    }
}
