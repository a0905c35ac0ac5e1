// Bitcoin data structures with byte-exact wire encoding

pub mod core;
pub mod error;
pub mod wallet;

// Re-exports for convenience
pub use crate::core::{Block, BlockHeader, Hash256, MerkleTree, Script, Serializable, Transaction, TxIn, TxOut};
pub use error::{Error, Result};
pub use wallet::{Account, Address, PublicKeyEncoding, TransactionBuilder};
