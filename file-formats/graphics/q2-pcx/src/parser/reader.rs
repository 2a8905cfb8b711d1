//! Native byte reading utilities for PCX parsing
//!
//! Reads are bounds-checked against the slice handed to the cursor, so the
//! pixel stream reader can never run into the trailing palette.

/// Reading past the end of the slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eof {
    /// Cursor position when the read was attempted
    pub position: usize,
}

/// Result type for byte reads
pub type ReadResult<T> = Result<T, Eof>;

/// Trait for reading binary data from a byte slice
pub trait ByteReader {
    /// Read a single unsigned 8-bit integer
    fn read_u8(&mut self) -> ReadResult<u8>;

    /// Read a single unsigned 16-bit integer in little-endian format
    fn read_u16_le(&mut self) -> ReadResult<u16>;

    /// Read exactly `buf.len()` bytes into a pre-allocated buffer
    fn read_into(&mut self, buf: &mut [u8]) -> ReadResult<()>;

    /// Skip `n` bytes
    fn skip(&mut self, n: usize) -> ReadResult<()>;
}

/// A cursor for reading binary data from a byte slice
pub struct Cursor<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the beginning of the data
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current read position
    pub fn position(&self) -> usize {
        self.position
    }

    fn take(&mut self, n: usize) -> ReadResult<&'a [u8]> {
        let end = self
            .position
            .checked_add(n)
            .filter(|&end| end <= self.data.len())
            .ok_or(Eof {
                position: self.position,
            })?;
        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }
}

impl ByteReader for Cursor<'_> {
    fn read_u8(&mut self) -> ReadResult<u8> {
        let value = *self.data.get(self.position).ok_or(Eof {
            position: self.position,
        })?;
        self.position += 1;
        Ok(value)
    }

    fn read_u16_le(&mut self) -> ReadResult<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn read_into(&mut self, buf: &mut [u8]) -> ReadResult<()> {
        let bytes = self.take(buf.len())?;
        buf.copy_from_slice(bytes);
        Ok(())
    }

    fn skip(&mut self, n: usize) -> ReadResult<()> {
        self.take(n).map(|_| ())
    }
}
