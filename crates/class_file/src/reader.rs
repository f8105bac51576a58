use std::io::{self, BufRead, BufReader, Read};

use byteorder::{BigEndian, ReadBytesExt};

use crate::{ClassFileError, Result};

type Endian = BigEndian;

/// Forward-only big-endian reader over a class file byte stream.
///
/// Every read either consumes exactly the requested number of bytes or fails
/// with [`ClassFileError::TruncatedInput`]; there is no zero-filling and no
/// way to rewind.
pub struct ByteCursor<R> {
    r: BufReader<R>,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(r: R) -> Self {
        Self {
            r: BufReader::new(r),
            position: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns `true` once the underlying source has no bytes left.
    pub fn is_exhausted(&mut self) -> Result<bool> {
        Ok(self.r.fill_buf()?.is_empty())
    }

    pub fn read_u1(&mut self) -> Result<u8> {
        let value = self.r.read_u8().map_err(|e| self.short_read(e, 1))?;
        self.position += 1;
        Ok(value)
    }

    pub fn read_u2(&mut self) -> Result<u16> {
        let value = self
            .r
            .read_u16::<Endian>()
            .map_err(|e| self.short_read(e, 2))?;
        self.position += 2;
        Ok(value)
    }

    pub fn read_u4(&mut self) -> Result<u32> {
        let value = self
            .r
            .read_u32::<Endian>()
            .map_err(|e| self.short_read(e, 4))?;
        self.position += 4;
        Ok(value)
    }

    /// Reads exactly `n` raw bytes.
    ///
    /// The buffer only grows with the bytes actually present in the source,
    /// so a bogus length read from a malformed file fails with
    /// `TruncatedInput` instead of allocating up front.
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::with_capacity(n.min(8 * 1024));
        let read = (&mut self.r).take(n as u64).read_to_end(&mut bytes)?;
        if read < n {
            return Err(ClassFileError::TruncatedInput {
                offset: self.position + read as u64,
                needed: n - read,
            });
        }

        self.position += n as u64;
        Ok(bytes)
    }

    /// Reads `count` consecutive u16 values.
    pub fn read_u2_array(&mut self, count: u16) -> Result<Vec<u16>> {
        (0..count).map(|_| self.read_u2()).collect()
    }

    fn short_read(&self, error: io::Error, needed: usize) -> ClassFileError {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => ClassFileError::TruncatedInput {
                offset: self.position,
                needed,
            },
            _ => ClassFileError::IOError(error),
        }
    }
}


#[cfg(test)]
mod read_bytes_tests {
    use super::*;

    fn cursor_over(bytes: &[u8]) -> ByteCursor<&[u8]> {
        ByteCursor::new(bytes)
    }

    #[test]
    fn it_should_read_the_requested_span() {
        let mut cursor = cursor_over(&[1, 2, 3, 4, 5]);

        assert_eq!(cursor.read_bytes(3).unwrap(), vec![1, 2, 3]);
        assert_eq!(cursor.position(), 3);
        assert!(!cursor.is_exhausted().unwrap());
    }

    #[test]
    fn it_should_accept_an_empty_span() {
        let mut cursor = cursor_over(&[]);

        assert!(cursor.read_bytes(0).unwrap().is_empty());
        assert!(cursor.is_exhausted().unwrap());
    }

    #[test]
    fn it_should_not_zero_fill_a_short_span() {
        let mut cursor = cursor_over(&[1, 2, 3]);

        assert!(matches!(
            cursor.read_bytes(4),
            Err(ClassFileError::TruncatedInput {
                offset: 3,
                needed: 1
            })
        ));
    }

    #[test]
    fn it_should_not_trust_huge_lengths() {
        let mut cursor = cursor_over(&[0xff; 16]);

        assert!(matches!(
            cursor.read_bytes(u32::MAX as usize),
            Err(ClassFileError::TruncatedInput { offset: 16, .. })
        ));
    }
}
