//! # IPC ABI
//!
//! Tipos que atravessam a fronteira guest/host num request.
//!
//! - `descriptor`: `BufferDescriptor` (endereço, tamanho)
//! - `version`: `GuestVersion` para gates de comando
//! - `cursor`: leitura de escalares do request, escrita da resposta

pub mod cursor;
pub mod descriptor;
pub mod version;

pub use cursor::{RequestReader, ResponseWriter};
pub use descriptor::BufferDescriptor;
pub use version::GuestVersion;
