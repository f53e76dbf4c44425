use crate::error::{HuffmanError, Result};

/// Bits packed eight per byte, most significant bit first.
///
/// The textual `'0'`/`'1'` form is convenient to read and test; this is the
/// compact form for storage. The final byte is zero-padded and `bit_count`
/// records how many of its bits are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    bytes: Vec<u8>,
    bit_count: usize,
}

impl PackedBits {
    pub fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit_count: 0,
        }
    }

    /// Reassembles a buffer from stored bytes and its meaningful bit count.
    ///
    /// Bytes past `bit_count` are dropped and the padding bits of the final
    /// byte are cleared, so later pushes and comparisons see only real bits.
    pub fn from_raw_parts(mut bytes: Vec<u8>, bit_count: usize) -> Result<Self> {
        let capacity = bytes.len().saturating_mul(8);
        if bit_count > capacity {
            return Err(HuffmanError::InvalidPacking {
                bit_count,
                capacity,
            });
        }

        bytes.truncate(bit_count.div_ceil(8));
        let used = bit_count % 8;
        if used != 0 {
            if let Some(last) = bytes.last_mut() {
                *last &= !(0xffu8 >> used);
            }
        }
        Ok(Self { bytes, bit_count })
    }

    /// Packs a `'0'`/`'1'` string.
    pub fn from_bit_str(bits: &str) -> Result<Self> {
        let mut packed = Self::new();
        for (position, found) in bits.chars().enumerate() {
            match found {
                '0' => packed.push(false),
                '1' => packed.push(true),
                found => return Err(HuffmanError::InvalidBit { position, found }),
            }
        }
        Ok(packed)
    }

    /// Appends one bit.
    pub fn push(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bytes.len() {
            self.bytes.push(0);
        }

        if bit {
            self.bytes[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Reads the bit at `index`.
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Number of meaningful bits.
    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |index| self.bytes[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    /// Expands back to the `'0'`/`'1'` form.
    pub fn to_bit_string(&self) -> String {
        self.iter().map(|bit| if bit { '1' } else { '0' }).collect()
    }
}

impl Extend<bool> for PackedBits {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}
