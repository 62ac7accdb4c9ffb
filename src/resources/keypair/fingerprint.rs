//! SHA256 fingerprint computation. The fingerprint format is otherwise
//! ambiguous between a SHA256 and an MD5 digest; this crate standardizes on
//! SHA256, recorded as an Open Question resolution in DESIGN.md.

use sha2::{Digest, Sha256};

/// OpenSSH public keys are `"<type> <base64> [comment]"`; the fingerprint
/// is taken over the decoded base64 blob, not the whole line.
pub fn compute_fingerprint(public_key: &str) -> Option<String> {
    let blob_b64 = public_key.split_whitespace().nth(1)?;
    let blob = base64::decode(blob_b64).ok()?;
    let digest = Sha256::digest(&blob);
    Some(
        digest
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":"),
    )
}
