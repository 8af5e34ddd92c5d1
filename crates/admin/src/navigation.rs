//! Navigation between the product list and the product form.
//!
//! ```text
//!            show_create / edit
//!  Viewing ─────────────────────▶ Editing(form)
//!     ▲                               │
//!     └── submit ok / cancel / show_list
//! ```
//!
//! The open form lives inside [`Screen::Editing`], so there is no edit target
//! without a form and no form outside the editing screen. The grid/list
//! presentation is tracked separately and survives editing round trips.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, CatalogBackend, CatalogError};
use crate::forms::ProductForm;
use crate::models::Product;

/// How the product list is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Cards.
    #[default]
    Grid,
    /// Rows.
    List,
}

impl ViewMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::List,
            Self::List => Self::Grid,
        }
    }
}

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// The product list.
    #[default]
    Viewing,
    /// The create/edit form.
    Editing(ProductForm),
}

impl Screen {
    const fn name(&self) -> &'static str {
        match self {
            Self::Viewing => "viewing",
            Self::Editing(_) => "editing",
        }
    }
}

/// Navigation actions, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Edit,
    Input,
    Submit,
    Cancel,
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Edit => "edit",
            Self::Input => "fill in fields",
            Self::Submit => "submit",
            Self::Cancel => "cancel",
        })
    }
}

/// An action that does not apply to the current screen.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot {action} while {state}")]
pub struct NavigationError {
    pub action: NavAction,
    pub state: &'static str,
}

/// Why a submit did not go through.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The catalog refused the draft. The form stays open; on validation
    /// failure its errors are updated.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Screen and presentation state for one admin session.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    screen: Screen,
    view_mode: ViewMode,
}

impl Navigator {
    /// Starts on the list, in grid mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn screen(&self) -> &Screen {
        &self.screen
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.screen, Screen::Editing(_))
    }

    /// The open form, if editing.
    #[must_use]
    pub const fn form(&self) -> Option<&ProductForm> {
        match &self.screen {
            Screen::Editing(form) => Some(form),
            Screen::Viewing => None,
        }
    }

    /// The open form for field input, if editing.
    pub const fn form_mut(&mut self) -> Option<&mut ProductForm> {
        match &mut self.screen {
            Screen::Editing(form) => Some(form),
            Screen::Viewing => None,
        }
    }

    /// The open form, or an error naming `action` if none is open.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` while viewing.
    pub fn require_form(&mut self, action: NavAction) -> Result<&mut ProductForm, NavigationError> {
        let invalid = self.invalid(action);
        self.form_mut().ok_or(invalid)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Flip between grid and list. Returns the new mode.
    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    /// Go to the list, discarding any open form.
    pub fn show_list(&mut self) {
        if self.is_editing() {
            debug!("Discarding open form");
        }
        self.screen = Screen::Viewing;
    }

    /// Open an empty create form. Already editing leaves the open form as is.
    pub fn show_create(&mut self) -> &mut ProductForm {
        if !self.is_editing() {
            self.screen = Screen::Editing(ProductForm::create());
        }
        self.open_form()
    }

    /// Open the form pre-filled from `product`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` if a form is already open.
    pub fn edit(&mut self, product: Product) -> Result<&mut ProductForm, NavigationError> {
        if self.is_editing() {
            return Err(self.invalid(NavAction::Edit));
        }
        debug!(product_id = %product.id, "Editing product");
        self.screen = Screen::Editing(ProductForm::edit(product));
        Ok(self.open_form())
    }

    /// Submit the open form: create when new, update when editing.
    ///
    /// On success returns to the list with the stored product. On failure
    /// the form stays open.
    ///
    /// # Errors
    ///
    /// Returns `SubmitError::Navigation` if no form is open, or
    /// `SubmitError::Catalog` if the catalog rejects the draft.
    pub fn submit<B: CatalogBackend>(
        &mut self,
        catalog: &mut Catalog<B>,
    ) -> Result<Product, SubmitError> {
        let invalid = self.invalid(NavAction::Submit);
        let Screen::Editing(form) = &mut self.screen else {
            return Err(invalid.into());
        };

        let draft = form.draft().clone();
        let result = match form.editing() {
            None => catalog.create(draft),
            Some(product) => catalog.update(product.id, draft),
        };

        match result {
            Ok(product) => {
                self.screen = Screen::Viewing;
                Ok(product)
            }
            Err(CatalogError::Validation(errors)) => {
                form.set_errors(errors.clone());
                Err(CatalogError::Validation(errors).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Close the form without saving. Offered for both create and edit.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError` if no form is open.
    pub fn cancel(&mut self) -> Result<(), NavigationError> {
        if !self.is_editing() {
            return Err(self.invalid(NavAction::Cancel));
        }
        self.screen = Screen::Viewing;
        Ok(())
    }

    fn open_form(&mut self) -> &mut ProductForm {
        match &mut self.screen {
            Screen::Editing(form) => form,
            Screen::Viewing => unreachable!("form requested while viewing"),
        }
    }

    const fn invalid(&self, action: NavAction) -> NavigationError {
        NavigationError {
            action,
            state: self.screen.name(),
        }
    }
}
