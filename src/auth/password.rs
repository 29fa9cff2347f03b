use bcrypt::{hash, verify, BcryptError};

/// Hashes `password` with bcrypt at the given work factor.
///
/// Every call draws a fresh salt, so hashing the same password twice yields two
/// different strings. Fails only if bcrypt itself fails (e.g. a cost outside 4..=31).
pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(password, cost)
}

/// Checks `password` against a stored bcrypt hash.
///
/// Returns `Ok(false)` for any wrong password, the empty string included. An `Err`
/// means the stored hash itself is unusable.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, BcryptError> {
    verify(password, hashed_password)
}
