//! Form handling: product validation and the auth forms.

pub mod auth;
pub mod product;

pub use auth::{LoginForm, SignupForm};
pub use product::{EditTarget, FieldErrors, FieldInputError, FormField, ProductForm, validate};
