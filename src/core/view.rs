// Human-readable JSON views of chain data

use crate::core::{Block, BlockHeader, Hash256, Transaction, TxIn, TxOut, COIN};
use serde::Serialize;

/// Format satoshis as a decimal BTC amount with eight fractional digits
pub fn format_btc(value: u64) -> String {
    format!("{}.{:08}", value / COIN, value % COIN)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxInView {
    pub txid: Hash256,
    pub vout: u32,
    #[serde(rename = "scriptSig")]
    pub script_sig: String,
    pub sequence: String,
}

impl From<&TxIn> for TxInView {
    fn from(input: &TxIn) -> Self {
        Self {
            txid: input.txid,
            vout: input.vout,
            script_sig: hex::encode(&input.script_sig),
            sequence: format!("{:08x}", input.sequence),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutView {
    pub value: String,
    #[serde(rename = "scriptPubKey")]
    pub script_pubkey: String,
}

impl From<&TxOut> for TxOutView {
    fn from(output: &TxOut) -> Self {
        Self {
            value: format_btc(output.value),
            script_pubkey: hex::encode(&output.script_pubkey),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionView {
    pub hash: Hash256,
    pub version: i32,
    pub vin: Vec<TxInView>,
    pub vout: Vec<TxOutView>,
    pub locktime: u32,
}

impl From<&Transaction> for TransactionView {
    fn from(tx: &Transaction) -> Self {
        Self {
            hash: tx.txid(),
            version: tx.version,
            vin: tx.inputs.iter().map(TxInView::from).collect(),
            vout: tx.outputs.iter().map(TxOutView::from).collect(),
            locktime: tx.lock_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockHeaderView {
    pub version: i32,
    pub hash: Hash256,
    #[serde(rename = "previous block hash")]
    pub prev_block_hash: Hash256,
    #[serde(rename = "merkle root")]
    pub merkle_root: Hash256,
    pub target: u32,
    pub timestamp: u32,
    pub nonce: u32,
}

impl From<&BlockHeader> for BlockHeaderView {
    fn from(header: &BlockHeader) -> Self {
        Self {
            version: header.version,
            hash: header.hash(),
            prev_block_hash: header.prev_block_hash,
            merkle_root: header.merkle_root,
            target: header.target,
            timestamp: header.timestamp,
            nonce: header.nonce,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    #[serde(flatten)]
    pub header: BlockHeaderView,
    pub tx: Vec<TransactionView>,
}

impl From<&Block> for BlockView {
    fn from(block: &Block) -> Self {
        Self {
            header: BlockHeaderView::from(&block.header),
            tx: block.transactions.iter().map(TransactionView::from).collect(),
        }
    }
}

impl Transaction {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(TransactionView::from(self))
    }
}

impl Block {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!(BlockView::from(self))
    }
}
