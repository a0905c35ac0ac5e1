// Serialization utilities for Bitcoin data structures

use crate::core::Hash256;
use crate::error::{Error, Result};
use std::io::{Cursor, Read};

/// Upper bound accepted for a script length prefix when decoding
pub const MAX_SCRIPT_SIZE: usize = 10_000;

/// Trait for types with a Bitcoin wire encoding
///
/// Encoding never fails. Decoding caps script length prefixes at
/// [`MAX_SCRIPT_SIZE`], so a value carrying a longer script encodes but
/// does not decode back.
pub trait Serializable: Sized {
    /// Append the wire encoding to `buf`
    fn serialize_into(&self, buf: &mut Vec<u8>);

    /// Read one value from a sequential cursor. Trailing bytes are left unread.
    fn from_reader<R: Read + ?Sized>(reader: &mut R) -> Result<Self>;

    fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    fn deserialize(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(data);
        Self::from_reader(&mut cursor)
    }
}

/// Write a variable-length integer (compact size)
pub fn write_varint(buf: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => {
            buf.push(value as u8);
        }
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x10000..=0xffffffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&value.to_le_bytes());
        }
    }
}

/// Read a variable-length integer (compact size)
pub fn read_varint<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    let marker = read_array::<_, 1>(reader)?[0];

    match marker {
        0..=0xfc => Ok(marker as u64),
        0xfd => Ok(u16::from_le_bytes(read_array(reader)?) as u64),
        0xfe => Ok(u32::from_le_bytes(read_array(reader)?) as u64),
        0xff => Ok(u64::from_le_bytes(read_array(reader)?)),
    }
}

/// Write bytes with length prefix (VarInt length + data)
pub fn write_var_bytes(buf: &mut Vec<u8>, data: &[u8]) {
    write_varint(buf, data.len() as u64);
    buf.extend_from_slice(data);
}

/// Read bytes with length prefix, rejecting lengths above `max_len`
pub fn read_var_bytes<R: Read + ?Sized>(reader: &mut R, max_len: usize) -> Result<Vec<u8>> {
    let len = read_varint(reader)?;
    if len > max_len as u64 {
        log::warn!("Rejecting length prefix of {} bytes (max {})", len, max_len);
        return Err(Error::ScriptTooLarge { len, max: max_len });
    }
    let mut data = vec![0u8; len as usize];
    reader.read_exact(&mut data)?;
    Ok(data)
}

/// Read exactly `N` bytes
pub fn read_array<R: Read + ?Sized, const N: usize>(reader: &mut R) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    reader.read_exact(&mut bytes)?;
    Ok(bytes)
}

pub fn read_u32<R: Read + ?Sized>(reader: &mut R) -> Result<u32> {
    Ok(u32::from_le_bytes(read_array(reader)?))
}

pub fn read_i32<R: Read + ?Sized>(reader: &mut R) -> Result<i32> {
    Ok(i32::from_le_bytes(read_array(reader)?))
}

pub fn read_u64<R: Read + ?Sized>(reader: &mut R) -> Result<u64> {
    Ok(u64::from_le_bytes(read_array(reader)?))
}

/// Read a 32-byte hash field in wire order
pub fn read_hash<R: Read + ?Sized>(reader: &mut R) -> Result<Hash256> {
    Ok(Hash256::new(read_array(reader)?))
}

/// Capacity hint for a decoded element count. The count comes from untrusted
/// input, so preallocation is bounded.
pub(crate) fn capacity_hint(count: u64) -> usize {
    count.min(1024) as usize
}
