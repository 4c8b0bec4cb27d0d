//! Participation Handlers

pub(crate) mod available;
pub(crate) mod campaign_index;
pub(crate) mod index;
pub(crate) mod status;
pub(crate) mod submit;
pub(crate) mod withdraw;
