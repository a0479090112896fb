//! # Guest Memory Access
//!
//! Contrato com o subsistema de tradução de memória do guest.
//!
//! ## 🎯 Propósito
//! - **Spans:** Ler e escrever faixas contíguas do espaço de endereçamento guest.
//! - **Isolamento:** A camada de dispatch nunca segura ponteiros para memória
//!   guest; tudo passa por cópia.
//!
//! ## 🏗️ Arquitetura
//! - `GuestMemory` é implementado por quem embarca a camada (MMU emulada,
//!   mapeamento direto, proxy remoto...).
//! - `RegionMap` (em `region.rs`) é a implementação de referência.

use bitflags::bitflags;

bitflags! {
    /// Permissões de uma região guest
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct GuestPermission: u8 {
        const READ  = 1 << 0;
        const WRITE = 1 << 1;
        const EXEC  = 1 << 2;

        const RW = Self::READ.bits() | Self::WRITE.bits();
    }
}

/// Motivo de uma falha de acesso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryFault {
    /// Faixa (ou parte dela) não mapeada
    Unmapped,
    /// Faixa mapeada sem a permissão pedida
    AccessDenied,
    /// Tentativa de mapear por cima de uma região existente
    AlreadyMapped,
}

/// Falha de acesso a memória guest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryError {
    pub address: u64,
    pub size: u64,
    pub fault: MemoryFault,
}

impl MemoryError {
    pub const fn unmapped(address: u64, size: u64) -> Self {
        Self {
            address,
            size,
            fault: MemoryFault::Unmapped,
        }
    }

    pub const fn denied(address: u64, size: u64) -> Self {
        Self {
            address,
            size,
            fault: MemoryFault::AccessDenied,
        }
    }
}

impl core::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self.fault {
            MemoryFault::Unmapped => "não mapeado",
            MemoryFault::AccessDenied => "acesso negado",
            MemoryFault::AlreadyMapped => "já mapeado",
        };
        write!(f, "{} em {:#x}+{:#x}", what, self.address, self.size)
    }
}

/// Acesso ao espaço de endereçamento do guest.
///
/// Implementações devem ser seguras para uso concorrente: vários requests
/// podem copiar ao mesmo tempo.
pub trait GuestMemory: Send + Sync {
    /// Copia `buf.len()` bytes a partir de `address` para `buf`.
    ///
    /// Falha se qualquer byte da faixa não estiver mapeado e legível.
    fn read_span(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError>;

    /// Copia `data` para o guest a partir de `address`.
    ///
    /// Falha se a faixa não estiver mapeada ou for somente leitura. Em caso
    /// de falha nenhum byte é escrito.
    fn write_span(&self, address: u64, data: &[u8]) -> Result<(), MemoryError>;
}
