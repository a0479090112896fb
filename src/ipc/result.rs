//! Códigos de Resultado da Fronteira Guest/Host
//!
//! Enumeração fechada dos resultados que atravessam a fronteira.
//! Formato no fio: `module | (description << 9)`, como o guest espera.
//! `Success` é o único valor que não é erro.

use crate::config::{RESULT_DESCRIPTION_SHIFT, RESULT_MODULE_MASK};

/// Módulo do framework de serviços (erros de protocolo)
pub const MODULE_SF: u32 = 10;

/// Módulo do serviço de áudio
pub const MODULE_AUDIO: u32 = 153;

/// Empacota (module, description) no formato do fio.
pub const fn make_result(module: u32, description: u32) -> u32 {
    (description << RESULT_DESCRIPTION_SHIFT) | (module & RESULT_MODULE_MASK)
}

/// Resultado de um comando.
///
/// Igualdade apenas: não há ordenação semântica entre códigos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ResultCode {
    /// Sucesso
    Success = 0,

    // === Protocolo (módulo SF) ===
    /// Id de comando desconhecido ou bloqueado por versão
    UnknownCommand = make_result(MODULE_SF, 221),

    // === Áudio (módulo 153) ===
    /// Dispositivo não encontrado
    DeviceNotFound = make_result(MODULE_AUDIO, 1),
    /// Operação falhou
    OperationFailed = make_result(MODULE_AUDIO, 2),
    /// Sample rate não suportado
    UnsupportedSampleRate = make_result(MODULE_AUDIO, 3),
    /// Work buffer pequeno demais
    WorkBufferTooSmall = make_result(MODULE_AUDIO, 4),
    /// Ring de buffers cheio
    BufferRingFull = make_result(MODULE_AUDIO, 8),
    /// Configuração de canais não suportada
    UnsupportedChannelConfiguration = make_result(MODULE_AUDIO, 10),
    /// Bloco de update malformado
    InvalidUpdateInfo = make_result(MODULE_AUDIO, 41),
    /// Endereço de memória inválido no update
    InvalidAddressInfo = make_result(MODULE_AUDIO, 42),
    /// Ordenação de mixes inválida
    InvalidMixSorting = make_result(MODULE_AUDIO, 43),
    /// Operação não suportada no estado atual
    UnsupportedOperation = make_result(MODULE_AUDIO, 513),
    /// Operação inválida para o contexto de execução
    InvalidExecutionContextOperation = make_result(MODULE_AUDIO, 514),
}

impl ResultCode {
    /// Todos os códigos conhecidos (para decodificação)
    pub const ALL: [Self; 13] = [
        Self::Success,
        Self::UnknownCommand,
        Self::DeviceNotFound,
        Self::OperationFailed,
        Self::UnsupportedSampleRate,
        Self::WorkBufferTooSmall,
        Self::BufferRingFull,
        Self::UnsupportedChannelConfiguration,
        Self::InvalidUpdateInfo,
        Self::InvalidAddressInfo,
        Self::InvalidMixSorting,
        Self::UnsupportedOperation,
        Self::InvalidExecutionContextOperation,
    ];

    /// Valor bruto no fio
    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Campo "module"
    #[inline]
    pub const fn module(self) -> u32 {
        self.raw() & RESULT_MODULE_MASK
    }

    /// Campo "description"
    #[inline]
    pub const fn description(self) -> u32 {
        self.raw() >> RESULT_DESCRIPTION_SHIFT
    }

    /// Decodifica um valor bruto. Códigos fora da enumeração retornam `None`.
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.raw() == raw)
    }

    /// Retorna descrição legível do código
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "sucesso",
            Self::UnknownCommand => "comando desconhecido",
            Self::DeviceNotFound => "dispositivo não encontrado",
            Self::OperationFailed => "operação falhou",
            Self::UnsupportedSampleRate => "sample rate não suportado",
            Self::WorkBufferTooSmall => "work buffer pequeno demais",
            Self::BufferRingFull => "ring de buffers cheio",
            Self::UnsupportedChannelConfiguration => "configuração de canais não suportada",
            Self::InvalidUpdateInfo => "update info inválido",
            Self::InvalidAddressInfo => "address info inválido",
            Self::InvalidMixSorting => "ordenação de mixes inválida",
            Self::UnsupportedOperation => "operação não suportada",
            Self::InvalidExecutionContextOperation => "operação inválida no contexto de execução",
        }
    }
}

impl core::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{:#x} ({}-{:04}: {})",
            self.raw(),
            2000 + self.module(),
            self.description(),
            self.as_str()
        )
    }
}
