// Providers layer - Work performers and business logic
//
// Providers contain business logic and provide composable operations that
// coordinators can orchestrate. They perform actual work like hashing,
// token handling, validation and policy decisions.

pub mod authorization_provider;
pub mod crypto_provider;
pub mod token_provider;
pub mod validation_provider;

// Re-export providers for clean imports
pub use authorization_provider::AuthorizationProvider;
pub use crypto_provider::CryptoProvider;
pub use token_provider::{IssuedToken, TokenProvider};
pub use validation_provider::ValidationProvider;
