use crate::error::{HuffmanError, Result};
use crate::node::NodeKind;
use crate::packed::PackedBits;
use crate::tree::HuffmanTree;
use tracing::{debug, instrument};

/// Iterator that reconstructs symbols by descending the tree one bit at a time.
///
/// Starts at the root, moves left on `0` and right on `1`, and yields a
/// symbol whenever a leaf is reached before returning to the root. Every bit
/// is read exactly once. The first error is yielded and ends the iteration.
pub struct Decoder<'a, I> {
    tree: &'a HuffmanTree,
    bits: I,
    consumed: usize,
    done: bool,
}

impl<'a, I: Iterator<Item = Result<bool>>> Decoder<'a, I> {
    pub fn new(tree: &'a HuffmanTree, bits: I) -> Self {
        Self {
            tree,
            bits,
            consumed: 0,
            done: false,
        }
    }

    /// Number of bits read so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    fn fail(&mut self, err: HuffmanError) -> Option<Result<u8>> {
        self.done = true;
        Some(Err(err))
    }

    fn finish(&mut self) -> Option<Result<u8>> {
        self.done = true;
        None
    }

    /// A tree without branches cannot delimit codes by descent: a lone leaf
    /// consumes one `0` per symbol and an empty tree accepts no bits at all.
    fn next_without_branches(&mut self, symbol: Option<u8>) -> Option<Result<u8>> {
        let position = self.consumed;
        match self.bits.next() {
            None => self.finish(),
            Some(Err(err)) => self.fail(err),
            Some(Ok(bit)) => {
                self.consumed += 1;
                match symbol {
                    Some(symbol) if !bit => Some(Ok(symbol)),
                    _ => self.fail(HuffmanError::UnmappedBit { position }),
                }
            }
        }
    }
}

impl<I: Iterator<Item = Result<bool>>> Iterator for Decoder<'_, I> {
    type Item = Result<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let Some(root) = self.tree.root else {
            return self.next_without_branches(None);
        };

        let mut current = root;
        loop {
            let kind = self.tree.nodes[current].kind;
            match kind {
                NodeKind::Leaf { symbol } if current == root => {
                    return self.next_without_branches(Some(symbol));
                }
                NodeKind::Leaf { symbol } => return Some(Ok(symbol)),
                NodeKind::Branch { left, right } => match self.bits.next() {
                    None if current == root => return self.finish(),
                    None => {
                        return self.fail(HuffmanError::TruncatedCode {
                            consumed: self.consumed,
                        })
                    }
                    Some(Err(err)) => return self.fail(err),
                    Some(Ok(bit)) => {
                        self.consumed += 1;
                        current = if bit { right } else { left };
                    }
                },
            }
        }
    }
}

/// Reads a `'0'`/`'1'` string as bits, rejecting any other character.
pub(crate) fn bits_from_str(bits: &str) -> impl Iterator<Item = Result<bool>> + '_ {
    bits.chars().enumerate().map(|(position, found)| match found {
        '0' => Ok(false),
        '1' => Ok(true),
        found => Err(HuffmanError::InvalidBit { position, found }),
    })
}

impl HuffmanTree {
    /// Decodes a `'0'`/`'1'` string back into the original symbols.
    #[instrument(level = "debug", skip_all, fields(bits = bits.len()))]
    pub fn decode(&self, bits: &str) -> Result<Vec<u8>> {
        let decoded = Decoder::new(self, bits_from_str(bits)).collect::<Result<Vec<u8>>>()?;
        debug!(symbols = decoded.len(), "decoded");
        Ok(decoded)
    }

    /// Decodes packed bits back into the original symbols.
    #[instrument(level = "debug", skip_all, fields(bits = packed.len()))]
    pub fn decode_packed(&self, packed: &PackedBits) -> Result<Vec<u8>> {
        let decoded = Decoder::new(self, packed.iter().map(Ok)).collect::<Result<Vec<u8>>>()?;
        debug!(symbols = decoded.len(), "decoded");
        Ok(decoded)
    }
}
