mod credentials;

pub use credentials::CredentialStore;
pub use credentials::Credentials;
pub use credentials::REFRESH_LEAD_MS;
