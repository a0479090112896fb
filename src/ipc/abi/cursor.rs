//! # Scalar Cursors
//!
//! Leitura dos argumentos escalares do request e escrita da resposta.
//! Tudo little-endian, sem alinhamento: a ordem dos campos é parte do
//! contrato de cada comando e não é re-derivada em runtime.

use alloc::vec::Vec;

use crate::config::MAX_SCALAR_RESPONSE;
use crate::ipc::error::{FatalError, FatalResult};
use crate::ipc::handle::Handle;

// =============================================================================
// REQUEST
// =============================================================================

/// Cursor de leitura sobre o payload escalar do request
#[derive(Debug)]
pub struct RequestReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> RequestReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes já consumidos
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes restantes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn take<const N: usize>(&mut self) -> FatalResult<[u8; N]> {
        let end = self
            .offset
            .checked_add(N)
            .filter(|&end| end <= self.data.len())
            .ok_or(FatalError::RequestTruncated {
                offset: self.offset,
                wanted: N,
            })?;

        let mut raw = [0u8; N];
        raw.copy_from_slice(&self.data[self.offset..end]);
        self.offset = end;
        Ok(raw)
    }

    pub fn read_u32(&mut self) -> FatalResult<u32> {
        self.take::<4>().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> FatalResult<u64> {
        self.take::<8>().map(u64::from_le_bytes)
    }

    pub fn read_f32(&mut self) -> FatalResult<f32> {
        self.take::<4>().map(f32::from_le_bytes)
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Cursor de escrita da resposta (escalares + handle copiado)
#[derive(Debug, Default)]
pub struct ResponseWriter {
    data: Vec<u8>,
    copy_handle: Option<Handle>,
}

impl ResponseWriter {
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            copy_handle: None,
        }
    }

    fn put(&mut self, bytes: &[u8]) -> FatalResult<()> {
        if self.data.len() + bytes.len() > MAX_SCALAR_RESPONSE {
            return Err(FatalError::ResponseOverflow);
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> FatalResult<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> FatalResult<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn write_f32(&mut self, value: f32) -> FatalResult<()> {
        self.put(&value.to_le_bytes())
    }

    /// Anexa um handle com semântica de cópia (o guest recebe uma referência
    /// nova; o host mantém a sua).
    pub fn copy_handle(&mut self, handle: Handle) {
        debug_assert!(self.copy_handle.is_none(), "resposta já carrega um handle");
        self.copy_handle = Some(handle);
    }

    /// Bytes escritos até agora
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty() && self.copy_handle.is_none()
    }

    /// Desmonta em (payload escalar, handle)
    pub fn into_parts(self) -> (Vec<u8>, Option<Handle>) {
        (self.data, self.copy_handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_in_order() {
        let mut raw = Vec::new();
        raw.extend_from_slice(&7u32.to_le_bytes());
        raw.extend_from_slice(&0.5f32.to_le_bytes());
        raw.extend_from_slice(&0x1122_3344_5566_7788u64.to_le_bytes());

        let mut reader = RequestReader::new(&raw);
        assert_eq!(reader.read_u32().unwrap(), 7);
        assert_eq!(reader.read_f32().unwrap(), 0.5);
        assert_eq!(reader.read_u64().unwrap(), 0x1122_3344_5566_7788);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_reader_truncated() {
        let raw = [1u8, 2, 3];
        let mut reader = RequestReader::new(&raw);
        assert_eq!(
            reader.read_u32(),
            Err(FatalError::RequestTruncated {
                offset: 0,
                wanted: 4
            })
        );
        // Cursor não avança em falha
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn test_writer_overflow() {
        let mut writer = ResponseWriter::new();
        for _ in 0..MAX_SCALAR_RESPONSE / 4 {
            writer.write_u32(0).unwrap();
        }
        assert_eq!(writer.write_u32(0), Err(FatalError::ResponseOverflow));
        assert_eq!(writer.len(), MAX_SCALAR_RESPONSE);
    }
}
