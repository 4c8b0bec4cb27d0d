//! Authentication
//!
//! Users carry a role. Operators issue bearer tokens to them; each request
//! resolves its token to a [`Caller`].

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use repository::*;
pub use service::*;
pub use token::*;
