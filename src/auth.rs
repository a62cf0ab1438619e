//! Token models: the provisional token carried by a provider callback and the service token
//! issued in exchange for it.

pub mod token;

pub use token::{provisional::*, secret::*, service::*};
