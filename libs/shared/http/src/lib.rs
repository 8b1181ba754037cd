pub mod client;
pub mod credentials;
mod refresh;

pub use client::ApiClient;
pub use credentials::{
    store_from_config, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    StoredCredentials,
};
