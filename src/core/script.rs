// Bitcoin Script templates (P2PKH only, construction without execution)

use crate::error::{Error, Result};

/// Signature hash type appended to every signature: sign all inputs and outputs
pub const SIGHASH_ALL: u8 = 0x01;

/// Largest push encoded by its length byte alone (opcodes 0x01..=0x4b)
pub const MAX_DIRECT_PUSH: usize = 0x4b;

/// Opcodes for P2PKH script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OpCode {
    /// Duplicate the top stack item
    OpDup = 0x76,
    /// Hash the top stack item with HASH160
    OpHash160 = 0xa9,
    /// Push 20 bytes (pubkey hash size)
    OpPushBytes20 = 0x14,
    /// Verify that the top two items are equal
    OpEqualVerify = 0x88,
    /// Check signature
    OpCheckSig = 0xac,
}

impl OpCode {
    /// Convert byte to opcode
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x76 => Some(OpCode::OpDup),
            0xa9 => Some(OpCode::OpHash160),
            0x14 => Some(OpCode::OpPushBytes20),
            0x88 => Some(OpCode::OpEqualVerify),
            0xac => Some(OpCode::OpCheckSig),
            _ => None,
        }
    }
}

/// Script builder for P2PKH
pub struct Script;

impl Script {
    /// Create a P2PKH scriptPubKey (locking script)
    /// OP_DUP OP_HASH160 <pubKeyHash> OP_EQUALVERIFY OP_CHECKSIG
    pub fn p2pkh_script_pubkey(pubkey_hash: &[u8; 20]) -> Vec<u8> {
        let mut script = Vec::with_capacity(25);
        script.push(OpCode::OpDup as u8);
        script.push(OpCode::OpHash160 as u8);
        script.push(OpCode::OpPushBytes20 as u8);
        script.extend_from_slice(pubkey_hash);
        script.push(OpCode::OpEqualVerify as u8);
        script.push(OpCode::OpCheckSig as u8);
        script
    }

    /// Create a P2PKH scriptSig (unlocking script)
    /// <signature || sighash_type> <pubkey>
    ///
    /// Both items use direct pushes; anything longer than
    /// [`MAX_DIRECT_PUSH`] fails with `PushTooLarge`.
    pub fn p2pkh_script_sig(signature: &[u8], pubkey: &[u8], sighash_type: u8) -> Result<Vec<u8>> {
        let sig_push = signature.len() + 1;
        for len in [sig_push, pubkey.len()] {
            if len > MAX_DIRECT_PUSH {
                return Err(Error::PushTooLarge { len, max: MAX_DIRECT_PUSH });
            }
        }

        let mut script = Vec::with_capacity(signature.len() + pubkey.len() + 3);

        // Push signature with its sighash byte
        script.push(sig_push as u8);
        script.extend_from_slice(signature);
        script.push(sighash_type);

        // Push pubkey
        script.push(pubkey.len() as u8);
        script.extend_from_slice(pubkey);

        Ok(script)
    }

    /// Extract the pubkey hash from a P2PKH scriptPubKey, if it matches the template
    pub fn p2pkh_pubkey_hash(script_pubkey: &[u8]) -> Option<[u8; 20]> {
        if script_pubkey.len() != 25 {
            return None;
        }

        let template_matches = OpCode::from_byte(script_pubkey[0]) == Some(OpCode::OpDup)
            && OpCode::from_byte(script_pubkey[1]) == Some(OpCode::OpHash160)
            && OpCode::from_byte(script_pubkey[2]) == Some(OpCode::OpPushBytes20)
            && OpCode::from_byte(script_pubkey[23]) == Some(OpCode::OpEqualVerify)
            && OpCode::from_byte(script_pubkey[24]) == Some(OpCode::OpCheckSig);
        if !template_matches {
            return None;
        }

        let mut pubkey_hash = [0u8; 20];
        pubkey_hash.copy_from_slice(&script_pubkey[3..23]);
        Some(pubkey_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p2pkh_script_creation() {
        let pubkey_hash = [0x12; 20];
        let script = Script::p2pkh_script_pubkey(&pubkey_hash);

        assert_eq!(script.len(), 25);
        assert_eq!(script[0], OpCode::OpDup as u8);
        assert_eq!(script[1], OpCode::OpHash160 as u8);
        assert_eq!(script[2], OpCode::OpPushBytes20 as u8);
        assert_eq!(&script[3..23], &pubkey_hash);
        assert_eq!(script[23], OpCode::OpEqualVerify as u8);
        assert_eq!(script[24], OpCode::OpCheckSig as u8);
    }

    #[test]
    fn test_p2pkh_known_script() {
        let hash: [u8; 20] = hex::decode("ab68025513c3dbd2f7b92a94e0581f5d50f654e7")
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(
            hex::encode(Script::p2pkh_script_pubkey(&hash)),
            "76a914ab68025513c3dbd2f7b92a94e0581f5d50f654e788ac"
        );
    }

    #[test]
    fn test_script_sig_creation() {
        let signature = vec![1, 2, 3, 4];
        let pubkey = vec![5, 6, 7, 8];

        let script_sig = Script::p2pkh_script_sig(&signature, &pubkey, SIGHASH_ALL).unwrap();

        assert_eq!(script_sig[0], 5); // sig length + sighash byte
        assert_eq!(&script_sig[1..5], &signature[..]);
        assert_eq!(script_sig[5], SIGHASH_ALL);
        assert_eq!(script_sig[6], 4); // pubkey length
        assert_eq!(&script_sig[7..11], &pubkey[..]);
        assert_eq!(script_sig.len(), 11);
    }

    #[test]
    fn test_script_sig_custom_sighash() {
        let script_sig = Script::p2pkh_script_sig(&[0xaa], &[0xbb], 0x83).unwrap();
        assert_eq!(script_sig, vec![2, 0xaa, 0x83, 1, 0xbb]);
    }

    #[test]
    fn test_script_sig_push_limits() {
        // both pushes exactly at the direct-push limit
        let script_sig = Script::p2pkh_script_sig(&[0xaa; 74], &[0x04; 75], SIGHASH_ALL).unwrap();
        assert_eq!(script_sig[0], 75);
        assert_eq!(script_sig[76], 75);

        assert!(matches!(
            Script::p2pkh_script_sig(&[0xaa; 255], &[1, 2], SIGHASH_ALL),
            Err(Error::PushTooLarge { len: 256, max: MAX_DIRECT_PUSH })
        ));
        assert!(matches!(
            Script::p2pkh_script_sig(&[0xaa; 70], &[0x04; 76], SIGHASH_ALL),
            Err(Error::PushTooLarge { len: 76, max: MAX_DIRECT_PUSH })
        ));
    }

    #[test]
    fn test_parse_script_pubkey() {
        let pubkey_hash = [0x12; 20];
        let script = Script::p2pkh_script_pubkey(&pubkey_hash);

        assert_eq!(Script::p2pkh_pubkey_hash(&script), Some(pubkey_hash));

        let mut broken = script.clone();
        broken[24] = 0x00;
        assert_eq!(Script::p2pkh_pubkey_hash(&broken), None);
        assert_eq!(Script::p2pkh_pubkey_hash(&script[..24]), None);
    }
}
