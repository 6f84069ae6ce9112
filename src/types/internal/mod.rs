// Internal types used between layers
pub mod access;
pub mod auth;
pub mod context;
pub mod listing;
pub mod validation;

pub use context::{RequestContext, RequestId, RequestSource};
