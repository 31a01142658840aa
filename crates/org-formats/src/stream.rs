//! Forward-only cursor over a byte slice.

use org_ir::WAVETABLE_ENTRY_SIZE;

use crate::FormatError;

/// Sequential reader over an immutable byte buffer.
///
/// Every read advances the cursor by its width; there is no seeking back.
pub struct ByteStream<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current read offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        if n > self.remaining() {
            return Err(FormatError::TruncatedInput {
                offset: self.pos,
                wanted: n,
                len: self.data.len(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn skip(&mut self, n: usize) -> Result<(), FormatError> {
        self.read_bytes(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, FormatError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_u16_le(&mut self) -> Result<u16, FormatError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn read_i16_le(&mut self) -> Result<i16, FormatError> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    pub fn read_i16_be(&mut self) -> Result<i16, FormatError> {
        Ok(i16::from_be_bytes(self.take()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32, FormatError> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    /// Read one wavetable entry: 256 signed bytes.
    pub fn read_wavetable_block(&mut self) -> Result<[i8; WAVETABLE_ENTRY_SIZE], FormatError> {
        let raw = self.take::<WAVETABLE_ENTRY_SIZE>()?;
        Ok(raw.map(|b| b as i8))
    }

    /// Consume the rest of the buffer as big-endian 16-bit samples.
    ///
    /// A trailing odd byte is reported as truncated input.
    pub fn read_remaining_as_i16_be(&mut self) -> Result<Vec<i16>, FormatError> {
        let mut samples = Vec::with_capacity(self.remaining() / 2);
        while self.remaining() > 0 {
            samples.push(self.read_i16_be()?);
        }
        Ok(samples)
    }
}
