use sha2::{Digest, Sha256};

/// SHA-256 of the raw input, hex encoded. Identical inputs with identical
/// merge fields always produce identical output, so this key identifies a run.
pub fn input_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
