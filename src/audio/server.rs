//! # Audio Renderer Server
//!
//! Adaptador entre o protocolo de comandos e um `AudioRenderer`.
//!
//! ## 🏗️ Update
//!
//! ```text
//! send[0]    ──stage_input──▶  snapshot  ─┐
//! receive[0] ──allocate────▶  output    ─┼─▶ renderer.request_update()
//! receive[1] ──allocate────▶  perf      ─┘          │
//!                                                   ▼
//!                         Success: commit(output), commit(perf)
//!                         outro:   nada volta ao guest
//! ```
//!
//! ### ⚠️ Pontos de Atenção
//! - `RequestUpdate` zera os buffers de saída e registra falhas no log.
//! - `RequestUpdateAuto` entrega buffers de conteúdo não especificado e não
//!   registra falhas. A assimetria é herdada do guest: não unificar sem
//!   verificar que nenhum título depende dela.

use crate::audio::numbers::*;
use crate::audio::renderer::AudioRenderer;
use crate::ipc::context::RequestContext;
use crate::ipc::dispatch::{Command, HandlerResult};
use crate::ipc::marshal::OutputInit;
use crate::ipc::result::ResultCode;
use crate::ipc::service::Service;

/// Caminho de update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UpdatePath {
    /// Comando 4
    Legacy,
    /// Comando 10
    Auto,
}

impl UpdatePath {
    const fn output_init(self) -> OutputInit {
        match self {
            UpdatePath::Legacy => OutputInit::Zeroed,
            UpdatePath::Auto => OutputInit::Unspecified,
        }
    }

    const fn logs_failure(self) -> bool {
        matches!(self, UpdatePath::Legacy)
    }
}

/// Serviço `IAudioRenderer`
pub struct AudioRendererServer<R: AudioRenderer> {
    renderer: R,
}

impl<R: AudioRenderer> AudioRendererServer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    fn get_sample_rate(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        ctx.response.write_u32(self.renderer.sample_rate())?;
        Ok(ResultCode::Success)
    }

    fn get_sample_count(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        ctx.response.write_u32(self.renderer.sample_count())?;
        Ok(ResultCode::Success)
    }

    fn get_mix_buffer_count(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        ctx.response.write_u32(self.renderer.mix_buffer_count())?;
        Ok(ResultCode::Success)
    }

    fn get_state(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        ctx.response.write_u32(self.renderer.state().raw())?;
        Ok(ResultCode::Success)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    fn request_update(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        self.update(ctx, UpdatePath::Legacy)
    }

    fn request_update_auto(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        self.update(ctx, UpdatePath::Auto)
    }

    fn update(&self, ctx: &mut RequestContext<'_>, path: UpdatePath) -> HandlerResult {
        let output_desc = ctx.receive.take(0)?;
        let performance_desc = ctx.receive.take(1)?;
        let input_desc = ctx.send.take(0)?;

        let marshaler = ctx.marshaler();
        let input = marshaler.stage_input(&input_desc)?;
        let mut output = marshaler.allocate_output(&output_desc, path.output_init())?;
        let mut performance = marshaler.allocate_output(&performance_desc, path.output_init())?;

        let result = self
            .renderer
            .request_update(&mut output, &mut performance, &input);

        if result.is_success() {
            // Commits independentes: se o de performance falhar, o output já
            // está no guest. O request aborta mesmo assim.
            marshaler.commit(&output_desc, output)?;
            marshaler.commit(&performance_desc, performance)?;
        } else if path.logs_failure() {
            crate::kerror!("(AudioRenderer) Update rejeitado: {}", result);
        }

        Ok(result)
    }

    // =========================================================================
    // CONTROLE
    // =========================================================================

    fn start(&self, _ctx: &mut RequestContext<'_>) -> HandlerResult {
        Ok(self.renderer.start())
    }

    fn stop(&self, _ctx: &mut RequestContext<'_>) -> HandlerResult {
        Ok(self.renderer.stop())
    }

    fn query_system_event(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        let event = match self.renderer.query_system_event() {
            Ok(event) => event,
            Err(code) => return Ok(code),
        };

        let handle = ctx.handles().publish(event)?;
        ctx.response.copy_handle(handle);
        Ok(ResultCode::Success)
    }

    fn set_rendering_time_limit(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        let limit = ctx.request.read_u32()?;
        self.renderer.set_rendering_time_limit(limit);
        Ok(ResultCode::Success)
    }

    fn get_rendering_time_limit(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        ctx.response.write_u32(self.renderer.rendering_time_limit())?;
        Ok(ResultCode::Success)
    }

    fn execute_rendering(&self, _ctx: &mut RequestContext<'_>) -> HandlerResult {
        Ok(self.renderer.execute_rendering())
    }

    fn set_voice_drop_parameter(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        let factor = ctx.request.read_f32()?;
        self.renderer.set_voice_drop_parameter(factor);
        Ok(ResultCode::Success)
    }

    fn get_voice_drop_parameter(&self, ctx: &mut RequestContext<'_>) -> HandlerResult {
        ctx.response.write_f32(self.renderer.voice_drop_parameter())?;
        Ok(ResultCode::Success)
    }
}

impl<R: AudioRenderer> Service for AudioRendererServer<R> {
    const NAME: &'static str = "IAudioRenderer";

    const COMMANDS: &'static [Command<Self>] = &[
        Command::new(CMD_GET_SAMPLE_RATE, "GetSampleRate", Self::get_sample_rate),
        Command::new(CMD_GET_SAMPLE_COUNT, "GetSampleCount", Self::get_sample_count),
        Command::new(CMD_GET_MIX_BUFFER_COUNT, "GetMixBufferCount", Self::get_mix_buffer_count),
        Command::new(CMD_GET_STATE, "GetState", Self::get_state),
        Command::new(CMD_REQUEST_UPDATE, "RequestUpdate", Self::request_update),
        Command::new(CMD_START, "Start", Self::start),
        Command::new(CMD_STOP, "Stop", Self::stop),
        Command::new(CMD_QUERY_SYSTEM_EVENT, "QuerySystemEvent", Self::query_system_event),
        Command::new(
            CMD_SET_RENDERING_TIME_LIMIT,
            "SetRenderingTimeLimit",
            Self::set_rendering_time_limit,
        ),
        Command::new(
            CMD_GET_RENDERING_TIME_LIMIT,
            "GetRenderingTimeLimit",
            Self::get_rendering_time_limit,
        ),
        Command::new(CMD_REQUEST_UPDATE_AUTO, "RequestUpdateAuto", Self::request_update_auto)
            .since(REV_AUTO_UPDATE),
        Command::new(
            CMD_EXECUTE_AUDIO_RENDERER_RENDERING,
            "ExecuteAudioRendererRendering",
            Self::execute_rendering,
        )
        .since(REV_AUTO_UPDATE),
        Command::new(
            CMD_SET_VOICE_DROP_PARAMETER,
            "SetVoiceDropParameter",
            Self::set_voice_drop_parameter,
        )
        .since(REV_VOICE_DROP),
        Command::new(
            CMD_GET_VOICE_DROP_PARAMETER,
            "GetVoiceDropParameter",
            Self::get_voice_drop_parameter,
        )
        .since(REV_VOICE_DROP),
    ];

    fn dispose(&mut self) {
        self.renderer.dispose();
    }
}
