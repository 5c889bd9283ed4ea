//! A simple trait for binary (de)serialization using std `Read` and `Write` traits, plus
//! Bitcoin compact-size integer helpers.
//!
//! `ByteFormat` is used extensively in sighash calculation, txid calculation, and
//! transaction serialization and deserialization.

use std::io::{Cursor, Error as IoError, Read, Write};

use thiserror::Error;

/// Errors related to serialization of wire-format types.
#[derive(Debug, Error)]
pub enum SerError {
    /// IO error bubbled up from an underlying `Read` or `Write`.
    #[error(transparent)]
    Io(#[from] IoError),

    /// `deserialize_hex` encountered invalid hex on its input.
    #[error("error deserializing hex string")]
    FromHex(#[from] hex::FromHexError),

    /// `deserialize_hex` consumed a complete value with bytes left over.
    #[error("{0} trailing bytes after deserialized value")]
    TrailingBytes(usize),
}

/// Type alias for serialization results.
pub type SerResult<T> = Result<T, SerError>;

/// Determine the byte length of the compact-size prefix that encodes `number`.
pub fn prefix_byte_len(number: u64) -> u8 {
    match number {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// A simple trait for deserializing from `std::io::Read` and serializing to
/// `std::io::Write`. Implementers define the canonical wire format of the type.
pub trait ByteFormat {
    /// An error type. Must be convertible from `SerError` and `std::io::Error` so that
    /// the provided helper methods compose with `?`.
    type Error: From<SerError> + From<IoError> + std::error::Error;

    /// Returns the byte length of the serialized data structure.
    fn serialized_length(&self) -> usize;

    /// Deserializes an instance of `Self` from a `std::io::Read`.
    fn read_from<R>(reader: &mut R) -> Result<Self, Self::Error>
    where
        R: Read,
        Self: Sized;

    /// Serializes `self` to a `std::io::Write`. Returns the number of bytes written.
    fn write_to<W>(&self, writer: &mut W) -> Result<usize, Self::Error>
    where
        W: Write;

    /// Convenience function for reading a LE u32.
    fn read_u32_le<R>(reader: &mut R) -> SerResult<u32>
    where
        R: Read,
    {
        let mut buf = [0u8; 4];
        reader.read_exact(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Convenience function for reading a LE u64.
    fn read_u64_le<R>(reader: &mut R) -> SerResult<u64>
    where
        R: Read,
    {
        let mut buf = [0u8; 8];
        reader.read_exact(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    /// Convenience function for writing a LE u32.
    fn write_u32_le<W>(writer: &mut W, number: u32) -> SerResult<usize>
    where
        W: Write,
    {
        Ok(writer.write(&number.to_le_bytes())?)
    }

    /// Convenience function for writing a LE u64.
    fn write_u64_le<W>(writer: &mut W, number: u64) -> SerResult<usize>
    where
        W: Write,
    {
        Ok(writer.write(&number.to_le_bytes())?)
    }

    /// Read a compact-size integer. One of the standard 1/3/5/9-byte forms, selected by
    /// the first byte (`0xfd` => u16, `0xfe` => u32, `0xff` => u64 follow).
    fn read_compact_int<R>(reader: &mut R) -> SerResult<u64>
    where
        R: Read,
    {
        let mut first = [0u8; 1];
        reader.read_exact(&mut first)?;
        match first[0] {
            0xfd => {
                let mut buf = [0u8; 2];
                reader.read_exact(&mut buf)?;
                Ok(u16::from_le_bytes(buf) as u64)
            }
            0xfe => Ok(Self::read_u32_le(reader)? as u64),
            0xff => Self::read_u64_le(reader),
            b => Ok(b as u64),
        }
    }

    /// Write a compact-size integer in its minimal form. Returns the number of bytes
    /// written.
    fn write_compact_int<W>(writer: &mut W, number: u64) -> SerResult<usize>
    where
        W: Write,
    {
        match prefix_byte_len(number) {
            1 => Ok(writer.write(&[number as u8])?),
            3 => {
                let mut len = writer.write(&[0xfd])?;
                len += writer.write(&(number as u16).to_le_bytes())?;
                Ok(len)
            }
            5 => {
                let mut len = writer.write(&[0xfe])?;
                len += Self::write_u32_le(writer, number as u32)?;
                Ok(len)
            }
            _ => {
                let mut len = writer.write(&[0xff])?;
                len += Self::write_u64_le(writer, number)?;
                Ok(len)
            }
        }
    }

    /// Read a length-prefixed byte vector.
    fn read_prefix_vec<R>(reader: &mut R) -> SerResult<Vec<u8>>
    where
        R: Read,
    {
        let count = Self::read_compact_int(reader)?;
        let mut v = vec![0u8; count as usize];
        reader.read_exact(&mut v)?;
        Ok(v)
    }

    /// Write a byte vector with its compact-size length prefix.
    fn write_prefix_vec<W>(writer: &mut W, v: &[u8]) -> SerResult<usize>
    where
        W: Write,
    {
        let mut len = Self::write_compact_int(writer, v.len() as u64)?;
        len += writer.write(v)?;
        Ok(len)
    }

    /// Decode a hex string and deserialize an instance of `Self` from it. Errors if any
    /// bytes are left over once a complete value has been read.
    fn deserialize_hex(s: &str) -> Result<Self, Self::Error>
    where
        Self: Sized,
    {
        let v: Vec<u8> = hex::decode(s).map_err(SerError::from)?;
        let mut cursor = Cursor::new(v);
        let result = Self::read_from(&mut cursor)?;
        let remaining = cursor.get_ref().len() - cursor.position() as usize;
        if remaining != 0 {
            return Err(SerError::TrailingBytes(remaining).into());
        }
        Ok(result)
    }

    /// Serialize `self` to a vector, and return the hex-encoded vector.
    fn serialize_hex(&self) -> String {
        let mut v: Vec<u8> = vec![];
        self.write_to(&mut v)
            .expect("no error writing to a heap buffer");
        hex::encode(v)
    }
}
