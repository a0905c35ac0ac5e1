// Mock transaction generation

use crate::Result;
use crate::core::{hash256, Hash256, Script, Serializable, Transaction, TxIn, TxOut, SIGHASH_ALL};
use crate::wallet::Account;
use rand::Rng;
use rand::seq::SliceRandom;

/// Characters used for the strings hashed into mock txids
const MOCK_CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const MOCK_STRING_LEN: usize = 16;

/// Fabricate a txid: hash256 of a random string, read as a big-endian integer
pub fn mock_txid<R: Rng + ?Sized>(rng: &mut R) -> Hash256 {
    let text: Vec<u8> = MOCK_CHARSET
        .choose_multiple(rng, MOCK_STRING_LEN)
        .copied()
        .collect();
    Hash256::from_be_bytes(hash256(&text).0)
}

/// Builds a signed transaction spending fabricated outputs.
///
/// Each sender contributes one input with a random previous outpoint; each
/// recipient receives one P2PKH output of random value. Inputs are signed
/// over the serialization with empty scriptSigs. The previous outputs do not
/// exist, so the result is structurally valid but not spendable.
pub struct TransactionBuilder<'a> {
    senders: &'a [Account],
    recipients: &'a [Account],
}

impl<'a> TransactionBuilder<'a> {
    /// Create a new transaction builder
    pub fn new(senders: &'a [Account], recipients: &'a [Account]) -> Self {
        Self { senders, recipients }
    }

    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Transaction> {
        let inputs = self
            .senders
            .iter()
            .map(|_| TxIn::new(mock_txid(rng), rng.r#gen(), Vec::new()))
            .collect();

        let outputs = self
            .recipients
            .iter()
            .map(|account| TxOut::new(rng.gen_range(1..=u32::MAX as u64), account.script_pubkey()))
            .collect();

        let mut tx = Transaction::new(inputs, outputs);
        self.sign_transaction(&mut tx)?;

        log::debug!(
            "Generated transaction {} ({} inputs, {} outputs)",
            tx.txid(),
            tx.inputs.len(),
            tx.outputs.len()
        );

        Ok(tx)
    }

    /// Sign every input over the unsigned serialization
    fn sign_transaction(&self, tx: &mut Transaction) -> Result<()> {
        let unsigned = tx.serialize();

        for (input, account) in tx.inputs.iter_mut().zip(self.senders) {
            let signature = account.sign(&unsigned);
            input.script_sig =
                Script::p2pkh_script_sig(&signature, account.public_key_bytes(), SIGHASH_ALL)?;
        }

        Ok(())
    }
}
