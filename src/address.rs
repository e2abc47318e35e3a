use bitcoin::base58;
use bitcoin::hashes::{Hash, ripemd160, sha256};
use bitcoin::secp256k1::{All, PublicKey, Secp256k1, SecretKey};

use crate::error::{Result, SweepError};

/// Version byte of mainnet pay-to-pubkey-hash addresses.
pub const MAINNET_P2PKH_VERSION: u8 = 0x00;

/// Bytes of double-SHA-256 digest Base58Check appends to the payload.
const CHECKSUM_LEN: usize = 4;

/// Derives the legacy mainnet address for a private key given as the
/// canonical 64-digit hex text.
///
/// The pipeline is fixed and order-preserving: decode the key text,
/// multiply the secp256k1 generator by the scalar, serialize the public
/// point compressed (33 bytes), hash it SHA-256 then RIPEMD-160, frame the
/// short hash with the network version byte, and Base58Check-encode the
/// result. Pure function of its input; the shared `secp` context only
/// carries precomputed multiplication tables.
///
/// A scalar outside the curve's valid range (zero or at least the group
/// order) and undecodable key text are both derivation errors: they point
/// at a sampler bug and must propagate, never be skipped.
pub fn derive_address(secp: &Secp256k1<All>, private_key_hex: &str) -> Result<String> {
    let key_bytes = hex::decode(private_key_hex).map_err(|e| {
        SweepError::Derivation(format!("key text {private_key_hex:?} is not hex: {e}"))
    })?;
    let secret = SecretKey::from_slice(&key_bytes).map_err(|e| {
        SweepError::Derivation(format!("key {private_key_hex} is not a valid scalar: {e}"))
    })?;
    let public = PublicKey::from_secret_key(secp, &secret);
    let compressed = public.serialize();

    let digest = sha256::Hash::hash(&compressed);
    let short_hash = ripemd160::Hash::hash(digest.as_byte_array());

    let mut payload = Vec::with_capacity(1 + short_hash.as_byte_array().len());
    payload.push(MAINNET_P2PKH_VERSION);
    payload.extend_from_slice(short_hash.as_byte_array());
    Ok(base58check_encode(&payload))
}

/// Base58Check-encodes `payload` (version byte already in place): appends
/// the first four bytes of SHA-256(SHA-256(payload)) and base58-encodes the
/// whole, one leading '1' per leading zero byte.
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut full = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    full.extend_from_slice(payload);
    full.extend_from_slice(&checksum(payload));
    base58::encode(&full)
}

/// Decodes a Base58Check string back into its payload, rejecting bad
/// digits, truncated input and checksum mismatches.
pub fn base58check_decode(text: &str) -> Result<Vec<u8>> {
    let full = base58::decode(text).map_err(|e| SweepError::Decode(e.to_string()))?;
    if full.len() < CHECKSUM_LEN {
        return Err(SweepError::Decode(format!(
            "{} bytes cannot hold a checksum",
            full.len()
        )));
    }
    let (payload, tail) = full.split_at(full.len() - CHECKSUM_LEN);
    if tail != checksum(payload) {
        return Err(SweepError::Decode("checksum mismatch".into()));
    }
    Ok(payload.to_vec())
}

fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let double = sha256::Hash::hash(sha256::Hash::hash(payload).as_byte_array());
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&double.as_byte_array()[..CHECKSUM_LEN]);
    out
}
