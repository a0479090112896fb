//! # Buffer Descriptors
//!
//! Par (endereço guest, tamanho) de um slot send/receive de um request.

/// Descritor de buffer guest.
///
/// Produzido pelo transporte por request; consumido uma única vez pelo
/// handler. Nunca retido além da vida do request.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferDescriptor {
    /// Endereço no espaço do guest
    pub address: u64,
    /// Tamanho em bytes (ditado pelo guest)
    pub size: u64,
}

impl BufferDescriptor {
    pub const fn new(address: u64, size: u64) -> Self {
        Self { address, size }
    }

    /// Descritor vazio
    pub const fn empty() -> Self {
        Self { address: 0, size: 0 }
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Fim exclusivo da faixa (`None` se estourar o espaço de 64 bits)
    pub const fn end(&self) -> Option<u64> {
        self.address.checked_add(self.size)
    }
}
