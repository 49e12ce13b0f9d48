//! Fixed-size output buffer used while flattening one tree.
//!
//! Tokens are appended in order; `tAttr` slots are reserved first and patched once the bytes
//! they jump over are known. Every slot must be written exactly once.

use crate::error::InvariantViolation;
use crate::ptg::Ptg;

#[derive(Debug)]
pub(crate) struct TokenCollector {
    slots: Vec<Option<Ptg>>,
    reserved: Vec<bool>,
    cursor: usize,
}

impl TokenCollector {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            reserved: vec![false; len],
            cursor: 0,
        }
    }

    fn advance(&mut self) -> Result<usize, InvariantViolation> {
        let index = self.cursor;
        if index >= self.slots.len() {
            return Err(InvariantViolation::BufferOverflow {
                len: self.slots.len(),
            });
        }
        self.cursor += 1;
        Ok(index)
    }

    pub(crate) fn append(&mut self, token: Ptg) -> Result<(), InvariantViolation> {
        let index = self.advance()?;
        self.slots[index] = Some(token);
        Ok(())
    }

    pub(crate) fn reserve_placeholder(&mut self) -> Result<usize, InvariantViolation> {
        let index = self.advance()?;
        self.reserved[index] = true;
        Ok(index)
    }

    pub(crate) fn patch(&mut self, index: usize, token: Ptg) -> Result<(), InvariantViolation> {
        if !self.reserved.get(index).copied().unwrap_or(false) {
            return Err(InvariantViolation::NotAPlaceholder { index });
        }
        let slot = &mut self.slots[index];
        if slot.is_some() {
            return Err(InvariantViolation::PlaceholderAlreadyWritten { index });
        }
        *slot = Some(token);
        Ok(())
    }

    /// Sum of encoded sizes over `from..to`.
    pub(crate) fn sum_encoded_sizes(
        &self,
        from: usize,
        to: usize,
    ) -> Result<usize, InvariantViolation> {
        let mut total = 0usize;
        for index in from..to {
            match self.slots.get(index) {
                Some(Some(token)) => total += token.encoded_size(),
                _ => return Err(InvariantViolation::UnwrittenSlot { index }),
            }
        }
        Ok(total)
    }

    pub(crate) fn finish(self) -> Result<Vec<Ptg>, InvariantViolation> {
        let declared = self.slots.len();
        if self.cursor != declared {
            return Err(InvariantViolation::LengthMismatch {
                declared,
                written: self.cursor,
            });
        }
        let mut out = Vec::with_capacity(declared);
        for (index, slot) in self.slots.into_iter().enumerate() {
            match slot {
                Some(token) => out.push(token),
                None => return Err(InvariantViolation::UnwrittenSlot { index }),
            }
        }
        Ok(out)
    }
}
