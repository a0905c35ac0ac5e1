// Hashing utilities for Bitcoin

use ripemd::Ripemd160;
use sha2::{Sha256, Digest};
use crate::core::Hash256;
use crate::error::{Error, Result};

/// Length of the Base58Check checksum suffix
const CHECKSUM_LEN: usize = 4;

/// SHA256 double hash (Bitcoin convention)
/// hash256 = SHA256(SHA256(data))
pub fn hash256(data: &[u8]) -> Hash256 {
    let first_hash = Sha256::digest(data);
    let second_hash = Sha256::digest(first_hash);
    Hash256::new(second_hash.into())
}

/// Single SHA256 hash
pub fn sha256_hash(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// RIPEMD160(SHA256(data)) - used for address generation
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    Ripemd160::digest(sha).into()
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_LEN] {
    let hash = hash256(data);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&hash.as_bytes()[..CHECKSUM_LEN]);
    out
}

/// Base58Check: Base58(version || payload || first 4 bytes of hash256(version || payload))
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + CHECKSUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let check = checksum(&data);
    data.extend_from_slice(&check);
    bs58::encode(data).into_string()
}

/// Decode Base58Check text into its version byte and payload
pub fn base58check_decode(encoded: &str) -> Result<(u8, Vec<u8>)> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| Error::InvalidAlphabet)?;

    if data.len() < 1 + CHECKSUM_LEN {
        return Err(Error::MissingChecksum(data.len()));
    }

    let (body, check) = data.split_at(data.len() - CHECKSUM_LEN);
    if checksum(body).as_slice() != check {
        return Err(Error::ChecksumMismatch);
    }

    Ok((body[0], body[1..].to_vec()))
}
