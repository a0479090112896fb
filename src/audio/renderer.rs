//! # Audio Renderer Contract
//!
//! Assinatura do objeto de negócio por trás do serviço. O processamento de
//! sinal em si vive fora desta camada.

use crate::ipc::handle::KernelObjectRef;
use crate::ipc::result::ResultCode;

/// Estado reportado por GetState
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum RendererState {
    Started = 0,
    Stopped = 1,
}

impl RendererState {
    pub const fn raw(self) -> u32 {
        self as u32
    }
}

/// Renderer de áudio.
///
/// Métodos recebem `&self`: o dispatcher não serializa chamadas, então a
/// implementação garante a própria exclusividade.
pub trait AudioRenderer: Send + Sync + 'static {
    fn sample_rate(&self) -> u32;

    fn sample_count(&self) -> u32;

    fn mix_buffer_count(&self) -> u32;

    fn state(&self) -> RendererState;

    /// Processa um bloco de update do guest.
    ///
    /// `output` e `performance` têm exatamente o tamanho pedido pelo guest.
    /// Só voltam ao guest se o retorno for `Success`.
    fn request_update(&self, output: &mut [u8], performance: &mut [u8], input: &[u8]) -> ResultCode;

    fn start(&self) -> ResultCode;

    fn stop(&self) -> ResultCode;

    /// Evento sinalizado a cada frame renderizado
    fn query_system_event(&self) -> Result<KernelObjectRef, ResultCode>;

    fn set_rendering_time_limit(&self, limit_percent: u32);

    fn rendering_time_limit(&self) -> u32;

    /// Renderiza um frame sob demanda (modo de execução manual)
    fn execute_rendering(&self) -> ResultCode;

    fn set_voice_drop_parameter(&self, factor: f32);

    fn voice_drop_parameter(&self) -> f32;

    /// Libera os recursos do renderer
    fn dispose(&mut self);
}
