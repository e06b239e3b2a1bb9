use sha2::{Digest, Sha256};

use super::domain::{Receipt, ReceiptId};

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("failed to encode receipt for fingerprinting: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Derive the public identifier of a receipt from its content.
///
/// The receipt is encoded as JSON (fixed field order, items in submission
/// order), hashed with SHA-256, and the leading eight digest bytes are rendered
/// as a base-10 `u64`. The same content always yields the same identifier, which
/// therefore doubles as the duplicate-submission key.
pub fn derive_id(receipt: &Receipt) -> Result<ReceiptId, IdentityError> {
    let payload = serde_json::to_vec(receipt)?;
    let digest = Sha256::digest(&payload);

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    Ok(ReceiptId(u64::from_be_bytes(prefix).to_string()))
}
