mod credentials;
mod session;

pub use credentials::{CredentialStore, StoredTokens};
pub use session::SessionStore;
