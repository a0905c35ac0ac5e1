// Accounts and transaction building

mod account;
mod tx_builder;

pub use account::{Account, Address, PublicKeyEncoding, ADDRESS_VERSION};
pub use tx_builder::{mock_txid, TransactionBuilder};
