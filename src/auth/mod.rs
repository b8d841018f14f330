use sha2::{Digest, Sha256};
use std::fmt::Debug;
use std::sync::Arc;

use crate::config::CredentialScheme;

/// Seals credentials for storage and checks presented ones against them
pub trait CredentialVerifier: Send + Sync + Debug {
    /// Value to store for a freshly chosen credential
    fn seal(&self, raw: &str) -> String;

    fn verify(&self, presented: &str, stored: &str) -> bool;

    fn scheme(&self) -> CredentialScheme;
}

/// Stores credentials as-is and compares by equality
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn seal(&self, raw: &str) -> String {
        raw.to_string()
    }

    fn verify(&self, presented: &str, stored: &str) -> bool {
        presented == stored
    }

    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Plaintext
    }
}

/// Stores the lowercase hex SHA-256 digest of the credential
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Verifier;

impl Sha256Verifier {
    fn digest(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl CredentialVerifier for Sha256Verifier {
    fn seal(&self, raw: &str) -> String {
        Self::digest(raw)
    }

    fn verify(&self, presented: &str, stored: &str) -> bool {
        Self::digest(presented) == stored.to_ascii_lowercase()
    }

    fn scheme(&self) -> CredentialScheme {
        CredentialScheme::Sha256
    }
}

pub fn verifier_for(scheme: CredentialScheme) -> Arc<dyn CredentialVerifier> {
    match scheme {
        CredentialScheme::Plaintext => Arc::new(PlaintextVerifier),
        CredentialScheme::Sha256 => Arc::new(Sha256Verifier),
    }
}
