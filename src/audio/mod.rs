//! # Audio Renderer Service
//!
//! Primeiro serviço construído sobre a camada de dispatch.
//!
//! - `numbers`: ids de comando e gates de versão
//! - `renderer`: contrato do objeto de negócio (`AudioRenderer`)
//! - `server`: tabela de comandos e handlers (`AudioRendererServer`)

pub mod numbers;
pub mod renderer;
pub mod server;


pub use renderer::{AudioRenderer, RendererState};
pub use server::AudioRendererServer;
