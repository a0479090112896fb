//! # Buffer Marshaling
//!
//! Cópia de bytes entre a memória do guest e buffers do host.
//!
//! ## 🎯 Propósito
//! - **Snapshots:** Entradas são copiadas para fora do guest. O handler nunca
//!   vê memória guest viva, então mutações concorrentes do guest não o afetam.
//! - **Scratch:** Saídas são staged em buffers do host com o tamanho exato do
//!   descritor e só voltam ao guest via `commit`.
//!
//! ## 🏗️ Arquitetura
//! - `InputSnapshot`: cópia imutável, dona dos bytes.
//! - `ScratchBuffer`: alocação fixa no heap. O backing nunca é realocado entre
//!   `allocate_output` e `commit`, então o endereço pode ser entregue a código
//!   nativo no meio do caminho.
//! - Liberação é RAII: qualquer saída do handler (sucesso, erro, `?`) solta os
//!   buffers.
//!
//! ### ⚠️ Pontos de Atenção
//! - `OutputInit::Unspecified` não deixa memória realmente não inicializada
//!   (isso seria UB ao expor `&mut [u8]`); preenche com `UNSPECIFIED_FILL`.
//!   O guest não pode assumir nada sobre esse conteúdo.

use alloc::boxed::Box;
use alloc::vec;
use core::ops::{Deref, DerefMut};

use crate::config::{MAX_SCRATCH_SIZE, UNSPECIFIED_FILL};
use crate::ipc::abi::BufferDescriptor;
use crate::ipc::error::{FatalError, FatalResult};
use crate::mm::GuestMemory;

/// Política de inicialização de um buffer de saída
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputInit {
    /// Zerado: o guest nunca observa lixo do host numa escrita curta
    Zeroed,
    /// Conteúdo não especificado
    Unspecified,
}

// =============================================================================
// SNAPSHOT DE ENTRADA
// =============================================================================

/// Cópia imutável de um buffer de entrada
#[derive(Debug)]
pub struct InputSnapshot {
    bytes: Box<[u8]>,
}

impl InputSnapshot {
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Deref for InputSnapshot {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

// =============================================================================
// SCRATCH DE SAÍDA
// =============================================================================

/// Buffer de saída do host com endereço fixo
///
/// Tamanho sempre igual ao do descritor de origem.
#[derive(Debug)]
pub struct ScratchBuffer {
    inner: Box<[u8]>,
}

impl ScratchBuffer {
    fn new(len: usize, init: OutputInit) -> Self {
        let fill = match init {
            OutputInit::Zeroed => 0,
            OutputInit::Unspecified => UNSPECIFIED_FILL,
        };
        Self {
            inner: vec![fill; len].into_boxed_slice(),
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.inner
    }

    /// Endereço do backing (estável até o drop)
    pub fn as_ptr(&self) -> *const u8 {
        self.inner.as_ptr()
    }
}

impl Deref for ScratchBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ScratchBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

// =============================================================================
// MARSHALER
// =============================================================================

/// Copia bytes entre o guest e buffers do host
#[derive(Clone, Copy)]
pub struct BufferMarshaler<'a> {
    memory: &'a dyn GuestMemory,
}

impl<'a> BufferMarshaler<'a> {
    pub fn new(memory: &'a dyn GuestMemory) -> Self {
        Self { memory }
    }

    fn host_len(desc: &BufferDescriptor) -> FatalResult<usize> {
        if desc.size > MAX_SCRATCH_SIZE {
            crate::kerror!("(Marshal) Buffer de {:#x} bytes recusado", desc.size);
            return Err(FatalError::ScratchTooLarge { size: desc.size });
        }
        Ok(desc.size as usize)
    }

    /// Copia exatamente `desc.size` bytes de `desc.address` para um snapshot.
    pub fn stage_input(&self, desc: &BufferDescriptor) -> FatalResult<InputSnapshot> {
        let len = Self::host_len(desc)?;
        let mut bytes = vec![0u8; len].into_boxed_slice();
        self.memory.read_span(desc.address, &mut bytes)?;

        crate::ktrace!("(Marshal) stage {:#x}+{:#x}", desc.address, desc.size);
        Ok(InputSnapshot { bytes })
    }

    /// Aloca um scratch com exatamente `desc.size` bytes.
    ///
    /// Não toca na memória do guest.
    pub fn allocate_output(
        &self,
        desc: &BufferDescriptor,
        init: OutputInit,
    ) -> FatalResult<ScratchBuffer> {
        let len = Self::host_len(desc)?;
        Ok(ScratchBuffer::new(len, init))
    }

    /// Copia o scratch inteiro para `desc.address` e o libera.
    ///
    /// Só deve ser chamado quando o handler sinalizou sucesso.
    pub fn commit(&self, desc: &BufferDescriptor, buffer: ScratchBuffer) -> FatalResult<()> {
        debug_assert_eq!(buffer.len() as u64, desc.size);
        self.memory.write_span(desc.address, &buffer)?;

        crate::ktrace!("(Marshal) commit {:#x}+{:#x}", desc.address, desc.size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mm::{GuestPermission, RegionMap};

    fn memory() -> RegionMap {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x1000, GuestPermission::RW).unwrap();
        mem
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mem = memory();
        mem.write_span(0x1000, &[1, 2, 3, 4]).unwrap();
        let marshaler = BufferMarshaler::new(&mem);

        let snap = marshaler
            .stage_input(&BufferDescriptor::new(0x1000, 4))
            .unwrap();
        mem.write_span(0x1000, &[9, 9, 9, 9]).unwrap();

        assert_eq!(snap.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_zeroed_output() {
        let mem = memory();
        let marshaler = BufferMarshaler::new(&mem);
        let buf = marshaler
            .allocate_output(&BufferDescriptor::new(0x1000, 0x40), OutputInit::Zeroed)
            .unwrap();
        assert_eq!(buf.len(), 0x40);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_scratch_address_is_stable() {
        let mem = memory();
        let marshaler = BufferMarshaler::new(&mem);
        let mut buf = marshaler
            .allocate_output(&BufferDescriptor::new(0x1000, 0x40), OutputInit::Unspecified)
            .unwrap();
        let before = buf.as_ptr();
        buf.as_mut_slice()[0] = 1;
        let moved = buf;
        assert_eq!(moved.as_ptr(), before);
    }

    #[test]
    fn test_commit_writes_exact_size() {
        let mem = memory();
        mem.write_span(0x1000, &[0xEE; 0x20]).unwrap();
        let marshaler = BufferMarshaler::new(&mem);

        let desc = BufferDescriptor::new(0x1000, 0x10);
        let mut buf = marshaler.allocate_output(&desc, OutputInit::Zeroed).unwrap();
        buf.copy_from_slice(&[0x11; 0x10]);
        marshaler.commit(&desc, buf).unwrap();

        let mut check = [0u8; 0x20];
        mem.read_span(0x1000, &mut check).unwrap();
        assert_eq!(&check[..0x10], &[0x11; 0x10]);
        assert_eq!(&check[0x10..], &[0xEE; 0x10]);
    }

    #[test]
    fn test_oversized_output_is_fatal() {
        let mem = memory();
        let marshaler = BufferMarshaler::new(&mem);
        let desc = BufferDescriptor::new(0x1000, MAX_SCRATCH_SIZE + 1);
        assert_eq!(
            marshaler.allocate_output(&desc, OutputInit::Zeroed).unwrap_err(),
            FatalError::ScratchTooLarge { size: MAX_SCRATCH_SIZE + 1 }
        );
    }

    #[test]
    fn test_unmapped_input_is_fatal() {
        let mem = memory();
        let marshaler = BufferMarshaler::new(&mem);
        let err = marshaler
            .stage_input(&BufferDescriptor::new(0x8000, 4))
            .unwrap_err();
        assert_eq!(
            err,
            FatalError::InvalidMemoryRegion {
                address: 0x8000,
                size: 4
            }
        );
    }
}
