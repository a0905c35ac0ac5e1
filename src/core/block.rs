// Block data structures

use crate::core::{Hash256, hash256, MerkleTree, Transaction, Serializable};
use crate::error::Result;
use std::io::Read;
use super::serialize::{capacity_hint, read_hash, read_i32, read_u32, read_varint, write_varint};

/// Serialized size of a block header
pub const BLOCK_HEADER_SIZE: usize = 80;

/// Block header - 80 bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block version
    pub version: i32,
    /// Hash of the previous block
    pub prev_block_hash: Hash256,
    /// Merkle root of all transactions in the block
    pub merkle_root: Hash256,
    /// Block timestamp (Unix epoch)
    pub timestamp: u32,
    /// Difficulty target, kept as the raw 32-bit field
    pub target: u32,
    /// Nonce for proof-of-work
    pub nonce: u32,
}

impl BlockHeader {
    /// Create a new block header
    pub fn new(
        version: i32,
        prev_block_hash: Hash256,
        merkle_root: Hash256,
        timestamp: u32,
        target: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            prev_block_hash,
            merkle_root,
            timestamp,
            target,
            nonce,
        }
    }

    /// Calculate the hash of this block header
    pub fn hash(&self) -> Hash256 {
        hash256(&self.serialize())
    }
}

impl Serializable for BlockHeader {
    fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.reserve(BLOCK_HEADER_SIZE);
        buf.extend_from_slice(&self.version.to_le_bytes());
        buf.extend_from_slice(self.prev_block_hash.as_bytes());
        buf.extend_from_slice(self.merkle_root.as_bytes());
        buf.extend_from_slice(&self.timestamp.to_le_bytes());
        buf.extend_from_slice(&self.target.to_le_bytes());
        buf.extend_from_slice(&self.nonce.to_le_bytes());
    }

    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            version: read_i32(reader)?,
            prev_block_hash: read_hash(reader)?,
            merkle_root: read_hash(reader)?,
            timestamp: read_u32(reader)?,
            target: read_u32(reader)?,
            nonce: read_u32(reader)?,
        })
    }
}

/// Block - contains header and transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Block header
    pub header: BlockHeader,
    /// Transactions in this block
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Create a new block. A zero `merkle_root` in the header is replaced by
    /// the root computed over `transactions`; any other value is kept as given.
    ///
    /// Fails with `EmptyInput` if the root must be computed and there are no
    /// transactions.
    pub fn new(mut header: BlockHeader, transactions: Vec<Transaction>) -> Result<Self> {
        if header.merkle_root.is_zero() {
            header.merkle_root = Self::calculate_merkle_root(&transactions)?;
            log::debug!(
                "Computed merkle root {} over {} transactions",
                header.merkle_root,
                transactions.len()
            );
        }

        Ok(Self {
            header,
            transactions,
        })
    }

    /// Assemble a block without touching the header's merkle root
    pub fn from_parts(header: BlockHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Merkle root over the serialized transactions
    pub fn calculate_merkle_root(transactions: &[Transaction]) -> Result<Hash256> {
        MerkleTree::root_of(transactions.iter().map(Serializable::serialize))
    }

    /// True iff the header's merkle root matches the current transactions.
    /// A block without transactions is never valid.
    pub fn is_valid(&self) -> bool {
        match Self::calculate_merkle_root(&self.transactions) {
            Ok(root) => root == self.header.merkle_root,
            Err(_) => false,
        }
    }

    /// Get the block hash
    pub fn hash(&self) -> Hash256 {
        self.header.hash()
    }
}

impl Serializable for Block {
    fn serialize_into(&self, buf: &mut Vec<u8>) {
        self.header.serialize_into(buf);

        write_varint(buf, self.transactions.len() as u64);
        for tx in &self.transactions {
            tx.serialize_into(buf);
        }
    }

    /// Headers read from the wire keep their merkle root, even when it does
    /// not match the transactions; use [`Block::is_valid`] to check.
    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let header = BlockHeader::from_reader(reader)?;

        let tx_count = read_varint(reader)?;
        let mut transactions = Vec::with_capacity(capacity_hint(tx_count));
        for _ in 0..tx_count {
            transactions.push(Transaction::from_reader(reader)?);
        }

        log::trace!("Decoded block {} with {} transactions", header.hash(), transactions.len());

        Ok(Self::from_parts(header, transactions))
    }
}
