//! Minimal DER encoding for DSA key structures.
//!
//! Only the universal types the key formats need are supported: INTEGER,
//! BIT STRING, OBJECT IDENTIFIER and SEQUENCE. Decoding is strict. Lengths
//! must be minimal and definite, integers must be minimal and non-negative,
//! and a reader refuses to finish while unread bytes remain.

use keysmith_core::{Error, Result};
use num_bigint::BigUint;

pub const TAG_INTEGER: u8 = 0x02;
pub const TAG_BIT_STRING: u8 = 0x03;
pub const TAG_OBJECT_IDENTIFIER: u8 = 0x06;
pub const TAG_SEQUENCE: u8 = 0x30;

fn malformed(detail: impl Into<String>) -> Error {
    Error::Decode(detail.into())
}

fn encode_length(len: usize, out: &mut Vec<u8>) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

/// Encode a single tag-length-value element.
pub fn tlv(tag: u8, content: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(content.len() + 6);
    out.push(tag);
    encode_length(content.len(), &mut out);
    out.extend_from_slice(content);
    out
}

/// Encode an unsigned integer, inserting a leading zero byte when the high
/// bit of the first significant byte is set.
pub fn integer(value: &BigUint) -> Vec<u8> {
    // to_bytes_be() renders zero as [0]
    let mut content = value.to_bytes_be();
    if content[0] & 0x80 != 0 {
        content.insert(0, 0);
    }
    tlv(TAG_INTEGER, &content)
}

/// Encode a BIT STRING with no unused trailing bits.
pub fn bit_string(bytes: &[u8]) -> Vec<u8> {
    let mut content = Vec::with_capacity(bytes.len() + 1);
    content.push(0);
    content.extend_from_slice(bytes);
    tlv(TAG_BIT_STRING, &content)
}

/// Encode an OBJECT IDENTIFIER from its arcs.
pub fn object_identifier(arcs: &[u64]) -> Vec<u8> {
    let mut content = Vec::new();
    let (first, rest) = match arcs {
        [a, b, rest @ ..] => (a * 40 + b, rest),
        [a] => (a * 40, &[][..]),
        [] => (0, &[][..]),
    };
    for arc in std::iter::once(first).chain(rest.iter().copied()) {
        encode_base128(arc, &mut content);
    }
    tlv(TAG_OBJECT_IDENTIFIER, &content)
}

fn encode_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut groups = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        groups.push(0x80 | (value & 0x7f) as u8);
        value >>= 7;
    }
    out.extend(groups.iter().rev());
}

/// Encode a SEQUENCE from already-encoded elements.
pub fn sequence(elements: &[Vec<u8>]) -> Vec<u8> {
    tlv(TAG_SEQUENCE, &elements.concat())
}

/// Cursor over a run of DER elements.
#[derive(Debug, Clone)]
pub struct DerReader<'a> {
    input: &'a [u8],
}

impl<'a> DerReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Read one element with the expected tag and return its content.
    pub fn read_tlv(&mut self, expected: u8) -> Result<&'a [u8]> {
        let (&tag, rest) = self
            .input
            .split_first()
            .ok_or_else(|| malformed("unexpected end of data"))?;
        if tag != expected {
            return Err(malformed(format!(
                "expected tag {expected:#04x}, found {tag:#04x}"
            )));
        }

        let (&first, mut rest) = rest
            .split_first()
            .ok_or_else(|| malformed("truncated length"))?;
        let len = if first < 0x80 {
            first as usize
        } else {
            let count = (first & 0x7f) as usize;
            if count == 0 {
                return Err(malformed("indefinite length is not allowed"));
            }
            if count > std::mem::size_of::<usize>() || rest.len() < count {
                return Err(malformed("truncated length"));
            }
            let (len_bytes, after) = rest.split_at(count);
            if len_bytes[0] == 0 {
                return Err(malformed("length is not minimally encoded"));
            }
            let len = len_bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
            if len < 0x80 {
                return Err(malformed("length is not minimally encoded"));
            }
            rest = after;
            len
        };

        if rest.len() < len {
            return Err(malformed(format!(
                "element needs {len} bytes, only {} remain",
                rest.len()
            )));
        }
        let (content, remaining) = rest.split_at(len);
        self.input = remaining;
        Ok(content)
    }

    pub fn read_integer(&mut self) -> Result<BigUint> {
        let content = self.read_tlv(TAG_INTEGER)?;
        match content {
            [] => Err(malformed("empty integer")),
            [first, ..] if first & 0x80 != 0 => Err(malformed("negative integer")),
            [0, second, ..] if second & 0x80 == 0 => {
                Err(malformed("integer is not minimally encoded"))
            }
            _ => Ok(BigUint::from_bytes_be(content)),
        }
    }

    pub fn read_sequence(&mut self) -> Result<DerReader<'a>> {
        self.read_tlv(TAG_SEQUENCE).map(DerReader::new)
    }

    /// Read a BIT STRING and return its bytes. Only whole-byte strings are
    /// accepted.
    pub fn read_bit_string(&mut self) -> Result<&'a [u8]> {
        let content = self.read_tlv(TAG_BIT_STRING)?;
        match content.split_first() {
            Some((0, bytes)) => Ok(bytes),
            Some((unused, _)) => Err(malformed(format!(
                "bit string with {unused} unused bits"
            ))),
            None => Err(malformed("empty bit string")),
        }
    }

    pub fn read_object_identifier(&mut self) -> Result<Vec<u64>> {
        let content = self.read_tlv(TAG_OBJECT_IDENTIFIER)?;
        if content.is_empty() {
            return Err(malformed("empty object identifier"));
        }

        let mut values = Vec::new();
        let mut current: u64 = 0;
        let mut in_progress = false;
        for &byte in content {
            if !in_progress && byte == 0x80 {
                return Err(malformed("object identifier arc is not minimally encoded"));
            }
            if current > (u64::MAX >> 7) {
                return Err(malformed("object identifier arc overflows"));
            }
            current = (current << 7) | u64::from(byte & 0x7f);
            in_progress = byte & 0x80 != 0;
            if !in_progress {
                values.push(current);
                current = 0;
            }
        }
        if in_progress {
            return Err(malformed("truncated object identifier"));
        }

        let first = values[0];
        let (a, b) = if first < 80 {
            (first / 40, first % 40)
        } else {
            (2, first - 80)
        };
        let mut arcs = vec![a, b];
        arcs.extend_from_slice(&values[1..]);
        Ok(arcs)
    }

    /// Consume the reader, failing if any bytes were left unread.
    pub fn finish(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(malformed(format!(
                "{} trailing bytes after structure",
                self.input.len()
            )))
        }
    }
}
