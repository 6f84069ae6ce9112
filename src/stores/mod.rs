// Stores layer - Data access and repository pattern
pub mod credential_store;
pub mod game_store;
pub mod play_store;

pub use credential_store::{CredentialStore, NewUser, UserChanges};
pub use game_store::{GameStore, NewGame};
pub use play_store::{NewPlay, PlayStore};
