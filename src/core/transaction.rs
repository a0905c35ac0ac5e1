// Transaction data structures

use crate::core::{Hash256, hash256, Serializable};
use crate::error::Result;
use std::io::Read;
use super::serialize::{
    capacity_hint, read_hash, read_i32, read_u32, read_u64, read_var_bytes, read_varint,
    write_var_bytes, write_varint, MAX_SCRIPT_SIZE,
};

/// Sequence number that disables relative lock-time
pub const DEFAULT_SEQUENCE: u32 = 0xffffffff;

/// Satoshis per bitcoin
pub const COIN: u64 = 100_000_000;

/// Transaction input - references a previous transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxIn {
    /// Hash of the previous transaction
    pub txid: Hash256,
    /// Index of the output in the previous transaction
    pub vout: u32,
    /// Signature script (scriptSig) - proves ownership
    pub script_sig: Vec<u8>,
    /// Sequence number (usually 0xffffffff)
    pub sequence: u32,
}

impl TxIn {
    /// Create a new transaction input with the default sequence
    pub fn new(txid: Hash256, vout: u32, script_sig: Vec<u8>) -> Self {
        Self {
            txid,
            vout,
            script_sig,
            sequence: DEFAULT_SEQUENCE,
        }
    }

    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }
}

impl Serializable for TxIn {
    fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(self.txid.as_bytes());
        buf.extend_from_slice(&self.vout.to_le_bytes());
        write_var_bytes(buf, &self.script_sig);
        buf.extend_from_slice(&self.sequence.to_le_bytes());
    }

    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let txid = read_hash(reader)?;
        let vout = read_u32(reader)?;
        let script_sig = read_var_bytes(reader, MAX_SCRIPT_SIZE)?;
        let sequence = read_u32(reader)?;

        Ok(Self {
            txid,
            vout,
            script_sig,
            sequence,
        })
    }
}

/// Transaction output - specifies amount and recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOut {
    /// Amount in satoshis (1 BTC = 100,000,000 satoshis)
    pub value: u64,
    /// Public key script (scriptPubKey) - specifies conditions for spending
    pub script_pubkey: Vec<u8>,
}

impl TxOut {
    /// Create a new transaction output
    pub fn new(value: u64, script_pubkey: Vec<u8>) -> Self {
        Self {
            value,
            script_pubkey,
        }
    }
}

impl Serializable for TxOut {
    fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.value.to_le_bytes());
        write_var_bytes(buf, &self.script_pubkey);
    }

    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let value = read_u64(reader)?;
        let script_pubkey = read_var_bytes(reader, MAX_SCRIPT_SIZE)?;

        Ok(Self {
            value,
            script_pubkey,
        })
    }
}

/// Transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Transaction version
    pub version: i32,
    /// Transaction inputs
    pub inputs: Vec<TxIn>,
    /// Transaction outputs
    pub outputs: Vec<TxOut>,
    /// Lock time (block height or timestamp when tx becomes valid)
    pub lock_time: u32,
}

impl Transaction {
    /// Create a version 1 transaction with zero lock time
    pub fn new(inputs: Vec<TxIn>, outputs: Vec<TxOut>) -> Self {
        Self {
            version: 1,
            inputs,
            outputs,
            lock_time: 0,
        }
    }

    /// Calculate transaction ID (double SHA256 of serialized tx)
    pub fn txid(&self) -> Hash256 {
        hash256(&self.serialize())
    }
}

impl Serializable for Transaction {
    fn serialize_into(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.version.to_le_bytes());

        write_varint(buf, self.inputs.len() as u64);
        for input in &self.inputs {
            input.serialize_into(buf);
        }

        write_varint(buf, self.outputs.len() as u64);
        for output in &self.outputs {
            output.serialize_into(buf);
        }

        buf.extend_from_slice(&self.lock_time.to_le_bytes());
    }

    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self> {
        let version = read_i32(reader)?;

        let input_count = read_varint(reader)?;
        let mut inputs = Vec::with_capacity(capacity_hint(input_count));
        for _ in 0..input_count {
            inputs.push(TxIn::from_reader(reader)?);
        }

        let output_count = read_varint(reader)?;
        let mut outputs = Vec::with_capacity(capacity_hint(output_count));
        for _ in 0..output_count {
            outputs.push(TxOut::from_reader(reader)?);
        }

        let lock_time = read_u32(reader)?;

        log::trace!(
            "Decoded transaction v{} with {} inputs, {} outputs",
            version,
            inputs.len(),
            outputs.len()
        );

        Ok(Self {
            version,
            inputs,
            outputs,
            lock_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Cursor;

    fn sample_tx() -> Transaction {
        let input = TxIn::new(Hash256::new([7u8; 32]), 3, vec![1, 2, 3]).with_sequence(42);
        let outputs = vec![
            TxOut::new(5000000000, vec![4, 5, 6]),
            TxOut::new(1, vec![]),
        ];
        Transaction {
            version: -2,
            inputs: vec![input],
            outputs,
            lock_time: 500_000,
        }
    }

    #[test]
    fn test_txin_layout() {
        let input = TxIn::new(Hash256::new([0xaa; 32]), 1, vec![0xbb, 0xcc]);
        let bytes = input.serialize();

        assert_eq!(bytes.len(), 32 + 4 + 1 + 2 + 4);
        assert_eq!(&bytes[..32], &[0xaa; 32]);
        assert_eq!(&bytes[32..36], &[1, 0, 0, 0]);
        assert_eq!(bytes[36], 2);
        assert_eq!(&bytes[39..], &[0xff; 4]);
    }

    #[test]
    fn test_txout_layout() {
        let output = TxOut::new(COIN, vec![0x51]);
        assert_eq!(
            hex::encode(output.serialize()),
            "00e1f505000000000151"
        );
    }

    #[test]
    fn test_transaction_serialization() {
        let tx = sample_tx();

        let serialized = tx.serialize();
        assert_eq!(&serialized[..4], &(-2i32).to_le_bytes());

        let deserialized = Transaction::deserialize(&serialized).unwrap();
        assert_eq!(tx, deserialized);
    }

    #[test]
    fn test_trailing_bytes_left_unread() {
        let tx = sample_tx();
        let mut data = tx.serialize();
        let len = data.len();
        data.extend_from_slice(&[0xde, 0xad]);

        let mut cursor = Cursor::new(&data);
        let decoded = Transaction::from_reader(&mut cursor).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(cursor.position() as usize, len);
    }

    #[test]
    fn test_truncated_transaction() {
        let data = sample_tx().serialize();
        for cut in [0, 3, 5, 40, data.len() - 1] {
            let result = Transaction::deserialize(&data[..cut]);
            assert!(matches!(result, Err(Error::UnexpectedEndOfData)), "cut at {}", cut);
        }
    }

    #[test]
    fn test_oversized_script_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&1i32.to_le_bytes());
        data.push(1); // one input
        data.extend_from_slice(&[0u8; 36]);
        write_varint(&mut data, (MAX_SCRIPT_SIZE + 1) as u64);

        let result = Transaction::deserialize(&data);
        assert!(matches!(result, Err(Error::ScriptTooLarge { .. })));
    }

    #[test]
    fn test_oversized_script_encodes_but_does_not_decode() {
        let output = TxOut::new(1, vec![0x51; MAX_SCRIPT_SIZE + 1]);
        let bytes = output.serialize();
        assert_eq!(bytes.len(), 8 + 3 + MAX_SCRIPT_SIZE + 1);

        assert!(matches!(
            TxOut::deserialize(&bytes),
            Err(Error::ScriptTooLarge { len, max: MAX_SCRIPT_SIZE }) if len == (MAX_SCRIPT_SIZE + 1) as u64
        ));
    }

    #[test]
    fn test_txid() {
        let tx = sample_tx();

        let txid = tx.txid();
        assert_eq!(txid, hash256(&tx.serialize()));

        // Same transaction should have same txid
        assert_eq!(txid, tx.txid());

        let mut changed = tx.clone();
        changed.lock_time += 1;
        assert_ne!(txid, changed.txid());
    }
}
