use crate::error::AppError;
use tracing::warn;

/// Salted one-way hashing of account passwords.
///
/// The salt is generated per call and embedded in the output string, so
/// verification needs nothing beyond the stored hash itself.
pub struct PasswordHasher {
    cost: u32,
    // Hash of a throwaway input, used to burn a full verification when no
    // stored hash exists for a login attempt.
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, AppError> {
        let dummy_hash = bcrypt::hash("triplan-dummy-credential", cost)?;
        Ok(Self { cost, dummy_hash })
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    /// Check a plaintext candidate against a stored hash.
    ///
    /// Malformed hashes and library failures collapse to `false`: the caller
    /// only ever learns "credentials invalid", never which check failed.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(matched) => matched,
            Err(e) => {
                warn!("Password verification failed structurally: {}", e);
                false
            }
        }
    }

    /// Run a full-cost verification against the throwaway hash. Called on the
    /// login path when the user lookup misses, so both outcomes pay the same
    /// hashing bill.
    pub fn verify_dummy(&self) {
        let _ = bcrypt::verify("mismatched-candidate", &self.dummy_hash);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::distributions::Alphanumeric;
    use rand::Rng;

    // bcrypt's minimum cost keeps these tests fast; the work factor does not
    // change the round-trip property.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_then_verify_round_trip() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let hash = hasher.hash("password1").unwrap();

        assert!(hasher.verify("password1", &hash));
        assert!(!hasher.verify("password2", &hash));
    }

    #[test]
    fn test_each_hash_gets_its_own_salt() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let first = hasher.hash("password1").unwrap();
        let second = hasher.hash("password1").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("password1", &first));
        assert!(hasher.verify("password1", &second));
    }

    #[test]
    fn test_boundary_length_password() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let hash = hasher.hash("exactly8").unwrap();

        assert!(hasher.verify("exactly8", &hash));
        assert!(!hasher.verify("exactly9", &hash));
    }

    #[test]
    fn test_unicode_passwords() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        for plaintext in ["pässwörd", "日本語のパス", "véry-sëcret-🔑"] {
            let hash = hasher.hash(plaintext).unwrap();
            assert!(hasher.verify(plaintext, &hash));
            assert!(!hasher.verify("not the password", &hash));
        }
    }

    #[test]
    fn test_random_plaintext_round_trips() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let len = rng.gen_range(8..=32);
            let plaintext: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(len)
                .map(char::from)
                .collect();

            let hash = hasher.hash(&plaintext).unwrap();
            assert!(hasher.verify(&plaintext, &hash));
            assert!(!hasher.verify(&format!("{}x", plaintext), &hash));
        }
    }

    #[test]
    fn test_malformed_hash_is_just_invalid() {
        let hasher = PasswordHasher::new(TEST_COST).unwrap();
        assert!(!hasher.verify("password1", "not-a-bcrypt-hash"));
        assert!(!hasher.verify("password1", ""));
    }
}
