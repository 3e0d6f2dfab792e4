//! Exact-length byte sources for the frame decoder

use crate::{
    checksum::Checksum,
    error::{Error, Result},
};

/// Blocking byte stream with an exact-length read contract
///
/// A read either fills the whole buffer or fails. Running out of data before
/// the buffer is full is reported as [`Error::ReadTimeout`]; a partial read is
/// never a success.
pub trait ByteSource {
    /// Fill `buf` completely
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()>;
}

impl ByteSource for &[u8] {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.len() < buf.len() {
            *self = &[];
            return Err(Error::ReadTimeout { expected: buf.len() });
        }
        
        let (head, tail) = self.split_at(buf.len());
        buf.copy_from_slice(head);
        *self = tail;
        
        Ok(())
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        (**self).read_bytes(buf)
    }
}

/// Byte source wrapper that checksums every byte it hands out
pub struct ChecksumReader<'a, S: ?Sized> {
    source: &'a mut S,
    checksum: Checksum,
}

impl<'a, S: ByteSource + ?Sized> ChecksumReader<'a, S> {
    /// Wrap a source with a freshly started checksum
    pub fn new(source: &'a mut S) -> Self {
        let mut checksum = Checksum::new();
        checksum.start();
        Self { source, checksum }
    }
    
    /// Checksum of every byte read so far
    pub fn checksum(&self) -> u16 {
        self.checksum.finish()
    }
}

impl<S: ByteSource + ?Sized> ByteSource for ChecksumReader<'_, S> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        self.source.read_bytes(buf)?;
        self.checksum.consume_slice(buf);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum;
    
    #[test]
    fn test_slice_source_exact_read() {
        let data = [1u8, 2, 3, 4];
        let mut source: &[u8] = &data;
        
        let mut buf = [0u8; 3];
        source.read_bytes(&mut buf).unwrap();
        
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(source, &[4]);
    }
    
    #[test]
    fn test_slice_source_short_read_times_out() {
        let data = [1u8, 2];
        let mut source: &[u8] = &data;
        
        let mut buf = [0u8; 3];
        let result = source.read_bytes(&mut buf);
        
        assert!(matches!(result, Err(Error::ReadTimeout { expected: 3 })));
        assert!(source.is_empty());
    }
    
    #[test]
    fn test_checksum_reader_tracks_bytes() {
        let data = [0x04u8, 0xD0, 0x00, 0x00];
        let mut source: &[u8] = &data;
        let mut reader = ChecksumReader::new(&mut source);
        
        let mut head = [0u8; 2];
        let mut tail = [0u8; 2];
        reader.read_bytes(&mut head).unwrap();
        reader.read_bytes(&mut tail).unwrap();
        
        assert_eq!(reader.checksum(), checksum::calculate(&data));
    }
}
