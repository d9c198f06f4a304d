use blake2::{Blake2b512, Digest as _};

use crate::types::Digest;

/// Blake2b hash with domain separator
pub fn blake2b_hash_with_domain(domain: &[u8], input: &[u8]) -> [u8; 64] {
    let mut hasher = Blake2b512::new();
    hasher.update(domain);
    hasher.update(b"|");
    hasher.update(input);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// 32-byte truncation of a domain-separated hash
pub fn digest_with_domain(domain: &[u8], input: &[u8]) -> Digest {
    let hash = blake2b_hash_with_domain(domain, input);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hash[..32]);
    output
}

/// Chain a new entry hash onto a running digest
pub fn chain_digest(domain: &[u8], prev: &Digest, entry: &Digest) -> Digest {
    let mut input = Vec::with_capacity(64);
    input.extend_from_slice(prev);
    input.extend_from_slice(entry);
    digest_with_domain(domain, &input)
}
