//! # Configuração da Camada de Dispatch
//!
//! Constantes globais de dimensionamento. Tudo aqui é compile-time:
//! a instância de serviço não carrega configuração em runtime.

// =============================================================================
// HANDLES
// =============================================================================

/// Capacidade padrão da tabela de handles de referência (por processo)
pub const HANDLE_TABLE_CAPACITY: usize = 1024;

// =============================================================================
// BUFFERS
// =============================================================================

/// Maior buffer de saída que o host aceita alocar (2 GiB - 1)
///
/// Descritores acima disso não cabem num índice i32 do lado guest.
pub const MAX_SCRATCH_SIZE: u64 = i32::MAX as u64;

/// Byte de preenchimento para scratch buffers sem garantia de conteúdo
///
/// Padrão não-zero: o guest não pode depender de zero-fill nesse caminho.
pub const UNSPECIFIED_FILL: u8 = 0xA5;

/// Máximo de descritores por direção (send/receive) num único request
pub const MAX_DESCRIPTORS: usize = 16;

// =============================================================================
// PROTOCOLO
// =============================================================================

/// Bits de deslocamento do campo "description" num código de resultado
pub const RESULT_DESCRIPTION_SHIFT: u32 = 9;

/// Máscara do campo "module" num código de resultado
pub const RESULT_MODULE_MASK: u32 = (1 << RESULT_DESCRIPTION_SHIFT) - 1;

/// Maior payload escalar de resposta (bytes)
pub const MAX_SCALAR_RESPONSE: usize = 0x100;
