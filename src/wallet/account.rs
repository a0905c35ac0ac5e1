// Key accounts and addresses

use crate::core::{base58check_decode, base58check_encode, hash160, hash256, Script};
use crate::error::{Error, Result};
use rand::Rng;
use rand::rngs::OsRng;
use secp256k1::{ecdsa::Signature, Message, PublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Version byte of mainnet P2PKH addresses
pub const ADDRESS_VERSION: u8 = 0x00;

/// Bitcoin address (Base58Check of version byte and pubkey hash)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// Create address from public key hash
    pub fn from_pubkey_hash(hash: &[u8; 20]) -> Self {
        Self(base58check_encode(ADDRESS_VERSION, hash))
    }

    /// Get address string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get pubkey hash from address
    pub fn to_pubkey_hash(&self) -> Result<[u8; 20]> {
        let (version, payload) = base58check_decode(&self.0)?;

        if version != ADDRESS_VERSION {
            return Err(Error::InvalidAddress(format!("unexpected version byte 0x{:02x}", version)));
        }

        payload.as_slice().try_into().map_err(|_| {
            Error::InvalidAddress(format!("expected 20-byte payload, got {}", payload.len()))
        })
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let address = Self(s.to_string());
        address.to_pubkey_hash()?;
        Ok(address)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialization of the public point. Fixed per account since the address
/// hashes the encoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicKeyEncoding {
    /// 33 bytes, 0x02/0x03 prefix
    Compressed,
    /// 65 bytes, 0x04 prefix
    #[default]
    Uncompressed,
}

impl PublicKeyEncoding {
    pub fn encode(self, public_key: &PublicKey) -> Vec<u8> {
        match self {
            PublicKeyEncoding::Compressed => public_key.serialize().to_vec(),
            PublicKeyEncoding::Uncompressed => public_key.serialize_uncompressed().to_vec(),
        }
    }
}

/// secp256k1 key pair with its derived public key encoding and address
#[derive(Clone)]
pub struct Account {
    secret_key: SecretKey,
    public_key: PublicKey,
    encoding: PublicKeyEncoding,
    encoded_public_key: Vec<u8>,
    address: Address,
}

impl Account {
    fn from_secret_key(secret_key: SecretKey, encoding: PublicKeyEncoding) -> Self {
        let secp = Secp256k1::signing_only();
        let public_key = secret_key.public_key(&secp);

        let encoded_public_key = encoding.encode(&public_key);
        let address = Address::from_pubkey_hash(&hash160(&encoded_public_key));

        Self {
            secret_key,
            public_key,
            encoding,
            encoded_public_key,
            address,
        }
    }

    /// Create from a raw 32-byte secret scalar
    pub fn from_private_key_bytes(bytes: &[u8], encoding: PublicKeyEncoding) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidKeyEncoding(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let secret_key = SecretKey::from_slice(bytes)
            .map_err(|e| Error::InvalidKeyEncoding(e.to_string()))?;
        Ok(Self::from_secret_key(secret_key, encoding))
    }

    /// Create from a 64-character hex secret scalar
    pub fn from_private_key_hex(hex_str: &str, encoding: PublicKeyEncoding) -> Result<Self> {
        if hex_str.len() != 64 {
            return Err(Error::InvalidKeyEncoding(format!(
                "expected 64 hex characters, got {}",
                hex_str.len()
            )));
        }

        let bytes = hex::decode(hex_str)
            .map_err(|e| Error::InvalidKeyEncoding(format!("invalid hex string: {}", e)))?;
        Self::from_private_key_bytes(&bytes, encoding)
    }

    /// Generate a new account from the OS random number generator
    pub fn from_random_key(encoding: PublicKeyEncoding) -> Self {
        Self::from_rng(&mut OsRng, encoding)
    }

    /// Generate a new account from the given random number generator
    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R, encoding: PublicKeyEncoding) -> Self {
        Self::from_secret_key(SecretKey::new(rng), encoding)
    }

    /// Sign `hash256(message)`; returns a DER-encoded ECDSA signature
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        let secp = Secp256k1::signing_only();
        let digest = Message::from_digest(hash256(message).0);
        secp.sign_ecdsa(&digest, &self.secret_key)
            .serialize_der()
            .to_vec()
    }

    /// Check a DER signature over `hash256(message)`. Malformed input is
    /// reported as `false`.
    pub fn verify(&self, signature: &[u8], message: &[u8]) -> bool {
        let Ok(mut signature) = Signature::from_der(signature) else {
            return false;
        };
        signature.normalize_s();

        let secp = Secp256k1::verification_only();
        let digest = Message::from_digest(hash256(message).0);
        secp.verify_ecdsa(&digest, &signature, &self.public_key).is_ok()
    }

    pub fn encoding(&self) -> PublicKeyEncoding {
        self.encoding
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Hex of the encoded public key
    pub fn public_key(&self) -> String {
        hex::encode(&self.encoded_public_key)
    }

    /// Hex of the secret scalar
    pub fn private_key(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Get public key bytes in the account's encoding
    pub fn public_key_bytes(&self) -> &[u8] {
        &self.encoded_public_key
    }

    /// Get pubkey hash
    pub fn pubkey_hash(&self) -> [u8; 20] {
        hash160(&self.encoded_public_key)
    }

    /// Get script pubkey (P2PKH)
    pub fn script_pubkey(&self) -> Vec<u8> {
        Script::p2pkh_script_pubkey(&self.pubkey_hash())
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address)
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
