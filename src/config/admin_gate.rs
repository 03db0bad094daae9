use super::*;

use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use ring::{constant_time, digest};

/// SHA-256 of the built-in admin passphrase.
pub const DEFAULT_ADMIN_DIGEST: &str =
    "1e34b5879d884b96c26a39444b6a09aa227b45aeba225b3bc314b6bac51471c2";

/// Static shared passphrase check. Only the digest is kept, comparison is constant time.
#[derive(Debug, Clone)]
pub struct AdminGate {
    digest: Vec<u8>,
}

impl AdminGate {
    pub fn from_hex_digest(hex: &str) -> Result<Self> {
        let invalid = || ConfigError::InvalidDigest {
            digest: hex.to_string(),
        };

        let bytes = HEXLOWER_PERMISSIVE
            .decode(hex.trim().as_bytes())
            .map_err(|_| invalid())?;
        if bytes.len() != digest::SHA256_OUTPUT_LEN {
            return Err(invalid());
        }

        Ok(Self { digest: bytes })
    }

    pub fn verify(&self, passphrase: &str) -> bool {
        let hash = digest::digest(&digest::SHA256, passphrase.as_bytes());
        constant_time::verify_slices_are_equal(hash.as_ref(), &self.digest).is_ok()
    }
}

/// Hex digest of a passphrase, the form stored in the settings file.
pub fn hash_passphrase(passphrase: &str) -> String {
    HEXLOWER.encode(digest::digest(&digest::SHA256, passphrase.as_bytes()).as_ref())
}
