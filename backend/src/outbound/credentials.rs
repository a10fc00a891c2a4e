//! Argon2id implementation of the credential hasher port.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`) carrying their own salt and
//! parameters, so verification works across parameter changes.

use argon2::password_hash::{self, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

use crate::domain::ports::{CredentialHasher, CredentialHasherError};

/// Argon2id hasher with a fresh random salt per password.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::with_params(Params::default())
    }
}

impl Argon2CredentialHasher {
    /// Hasher using explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialHasherError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|error| CredentialHasherError::hash(error.to_string()))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, CredentialHasherError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|error| CredentialHasherError::malformed_hash(error.to_string()))?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(error) => Err(CredentialHasherError::malformed_hash(error.to_string())),
        }
    }
}

#[cfg(test)]
pub(crate) fn fast_test_hasher() -> Argon2CredentialHasher {
    // Minimum memory and time cost keeps debug-build tests quick.
    match Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None) {
        Ok(params) => Argon2CredentialHasher::with_params(params),
        Err(_) => Argon2CredentialHasher::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> Argon2CredentialHasher {
        fast_test_hasher()
    }

    #[rstest]
    fn hashes_are_salted_phc_strings(hasher: Argon2CredentialHasher) {
        let first = hasher.hash("admin123").expect("hash");
        let second = hasher.hash("admin123").expect("hash");
        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[rstest]
    #[case("admin123", true)]
    #[case("admin1234", false)]
    #[case("", false)]
    fn verifies_candidates(
        hasher: Argon2CredentialHasher,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        let stored = hasher.hash("admin123").expect("hash");
        assert_eq!(hasher.verify(candidate, &stored).expect("verify"), expected);
    }

    #[rstest]
    fn verifies_hashes_made_with_other_parameters(hasher: Argon2CredentialHasher) {
        let stronger = Argon2CredentialHasher::with_params(
            Params::new(Params::MIN_M_COST * 2, 2, 1, None).expect("params"),
        );
        let stored = stronger.hash("admin123").expect("hash");
        assert!(hasher.verify("admin123", &stored).expect("verify"));
    }

    #[rstest]
    fn malformed_hash_is_an_error(hasher: Argon2CredentialHasher) {
        let err = hasher
            .verify("admin123", "plain-text-password")
            .expect_err("not a PHC string");
        assert!(matches!(err, CredentialHasherError::MalformedHash { .. }));
    }
}
