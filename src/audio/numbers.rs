//! # Audio Renderer Command Numbers
//!
//! Catálogo dos ids de comando do renderer de áudio. A numeração é fixa no
//! protocolo do guest: nunca renumerar.
//!
//! | Id    | Comando                       | Gate     |
//! |-------|-------------------------------|----------|
//! | 0-3   | Queries escalares             | -        |
//! | 4     | RequestUpdate                 | -        |
//! | 5-6   | Start / Stop                  | -        |
//! | 7     | QuerySystemEvent              | -        |
//! | 8-9   | Rendering time limit          | -        |
//! | 10-11 | RequestUpdateAuto / Execute   | 3.0.0+   |
//! | 12-13 | Voice drop parameter          | 15.0.0+  |

use crate::ipc::abi::GuestVersion;

// ============================================================================
// QUERIES (0 - 3)
// ============================================================================

/// Retorno: u32 sample rate
pub const CMD_GET_SAMPLE_RATE: u32 = 0;

/// Retorno: u32 amostras por frame
pub const CMD_GET_SAMPLE_COUNT: u32 = 1;

/// Retorno: u32 quantidade de mix buffers
pub const CMD_GET_MIX_BUFFER_COUNT: u32 = 2;

/// Retorno: u32 estado (0 = started, 1 = stopped)
pub const CMD_GET_STATE: u32 = 3;

// ============================================================================
// UPDATE / CONTROLE (4 - 9)
// ============================================================================

/// Buffers: send 0 = input, receive 0 = output, receive 1 = performance
pub const CMD_REQUEST_UPDATE: u32 = 4;

pub const CMD_START: u32 = 5;

pub const CMD_STOP: u32 = 6;

/// Retorno: handle copiado do evento de sistema
pub const CMD_QUERY_SYSTEM_EVENT: u32 = 7;

/// Args: (limit_percent: u32)
pub const CMD_SET_RENDERING_TIME_LIMIT: u32 = 8;

/// Retorno: u32 limit_percent
pub const CMD_GET_RENDERING_TIME_LIMIT: u32 = 9;

// ============================================================================
// 3.0.0+ (10 - 11)
// ============================================================================

/// Mesma forma do RequestUpdate
pub const CMD_REQUEST_UPDATE_AUTO: u32 = 10;

pub const CMD_EXECUTE_AUDIO_RENDERER_RENDERING: u32 = 11;

// ============================================================================
// 15.0.0+ (12 - 13)
// ============================================================================

/// Args: (factor: f32)
pub const CMD_SET_VOICE_DROP_PARAMETER: u32 = 12;

/// Retorno: f32 factor
pub const CMD_GET_VOICE_DROP_PARAMETER: u32 = 13;

// ============================================================================
// GATES
// ============================================================================

pub const REV_AUTO_UPDATE: GuestVersion = GuestVersion::new(3, 0, 0);

pub const REV_VOICE_DROP: GuestVersion = GuestVersion::new(15, 0, 0);
