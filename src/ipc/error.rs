//! Erros Fatais da Camada de Dispatch
//!
//! Condições que o protocolo não consegue representar no fio.
//! Não viram `ResultCode`: abortam a operação que as envolve e sobem
//! até o transporte como `Err`.

use crate::mm::MemoryError;

/// Erros não recuperáveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalError {
    /// Namespace de handles do processo esgotado
    HandleTableExhausted,
    /// Acesso a região guest não mapeada ou sem permissão
    InvalidMemoryRegion { address: u64, size: u64 },
    /// Handler leu além do payload escalar do request
    RequestTruncated { offset: usize, wanted: usize },
    /// Resposta escalar excedeu o limite do formato
    ResponseOverflow,
    /// Handler pediu um descritor que o guest não enviou
    MissingDescriptor { kind: DescriptorKind, index: usize },
    /// Handler consumiu o mesmo descritor duas vezes
    DescriptorReused { kind: DescriptorKind, index: usize },
    /// Buffer de saída maior do que o host aceita alocar
    ScratchTooLarge { size: u64 },
    /// Dispatch numa instância já descartada
    ServiceDisposed,
}

/// Direção de um descritor de buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorKind {
    /// Guest -> host
    Send,
    /// Host -> guest
    Receive,
}

impl FatalError {
    /// Retorna descrição legível do erro
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HandleTableExhausted => "tabela de handles esgotada",
            Self::InvalidMemoryRegion { .. } => "região de memória guest inválida",
            Self::RequestTruncated { .. } => "request escalar truncado",
            Self::ResponseOverflow => "resposta escalar excedeu o limite",
            Self::MissingDescriptor { .. } => "descritor de buffer ausente",
            Self::DescriptorReused { .. } => "descritor de buffer consumido duas vezes",
            Self::ScratchTooLarge { .. } => "buffer de saída grande demais",
            Self::ServiceDisposed => "serviço já descartado",
        }
    }
}

impl core::fmt::Display for FatalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::InvalidMemoryRegion { address, size } => {
                write!(f, "{} ({:#x}+{:#x})", self.as_str(), address, size)
            }
            Self::RequestTruncated { offset, wanted } => {
                write!(f, "{} (offset {}, {} bytes)", self.as_str(), offset, wanted)
            }
            Self::MissingDescriptor { kind, index } | Self::DescriptorReused { kind, index } => {
                write!(f, "{} ({:?} #{})", self.as_str(), kind, index)
            }
            Self::ScratchTooLarge { size } => write!(f, "{} ({:#x})", self.as_str(), size),
            _ => f.write_str(self.as_str()),
        }
    }
}

impl From<MemoryError> for FatalError {
    fn from(err: MemoryError) -> Self {
        Self::InvalidMemoryRegion {
            address: err.address,
            size: err.size,
        }
    }
}

/// Resultado de operações que podem falhar fatalmente
pub type FatalResult<T> = Result<T, FatalError>;
