//! Authentication

pub(crate) mod middleware;
mod roles;

pub(crate) use roles::{require_admin, require_store};
