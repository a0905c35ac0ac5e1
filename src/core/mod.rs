// Core blockchain data structures

mod types;
mod transaction;
mod block;
mod serialize;
mod hash;
pub mod merkle;
pub mod script;
pub mod view;

pub use types::*;
pub use transaction::*;
pub use block::*;
pub use serialize::*;
pub use hash::*;
pub use merkle::{MerkleNode, MerkleTree, NodeId};
pub use script::{OpCode, Script, MAX_DIRECT_PUSH, SIGHASH_ALL};
pub use view::{format_btc, BlockView, TransactionView};
