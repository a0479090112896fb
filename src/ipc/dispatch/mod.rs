//! # Command Dispatcher
//!
//! Table-based dispatcher: resolve o id, invoca o handler, devolve o código.
//!
//! ## 🏗️ Fluxo
//! 1. Resolve o comando na `CommandTable` (id + versão do guest).
//!    Não achou: `UnknownCommand`, sem handler e sem tocar em buffer.
//! 2. Invoca o handler. Ele lê os próprios escalares na ordem do protocolo.
//! 3. O código que o handler devolver vai para a resposta como está.
//!    Sem retry, sem recuperação.
//!
//! Erros fatais (`FatalError`) atravessam direto: o transporte aborta.

pub mod table;

use alloc::vec::Vec;

pub use table::{Command, CommandHandler, CommandTable, HandlerResult};

use crate::ipc::abi::{BufferDescriptor, GuestVersion};
use crate::ipc::context::RequestContext;
use crate::ipc::error::FatalResult;
use crate::ipc::handle::{Handle, KernelHandleTable};
use crate::ipc::result::ResultCode;
use crate::mm::GuestMemory;

// =============================================================================
// SUPERFÍCIE DO TRANSPORTE
// =============================================================================

/// Request como chega do transporte
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub command_id: u32,
    pub guest_version: GuestVersion,
    /// Argumentos escalares serializados
    pub scalar_input: &'a [u8],
    /// Buffers guest -> host
    pub send_buffers: &'a [BufferDescriptor],
    /// Buffers host -> guest
    pub receive_buffers: &'a [BufferDescriptor],
}

impl<'a> Request<'a> {
    /// Request sem argumentos nem buffers
    pub const fn new(command_id: u32, guest_version: GuestVersion) -> Self {
        Self {
            command_id,
            guest_version,
            scalar_input: &[],
            send_buffers: &[],
            receive_buffers: &[],
        }
    }

    pub const fn with_scalars(mut self, scalar_input: &'a [u8]) -> Self {
        self.scalar_input = scalar_input;
        self
    }

    pub const fn with_send(mut self, send_buffers: &'a [BufferDescriptor]) -> Self {
        self.send_buffers = send_buffers;
        self
    }

    pub const fn with_receive(mut self, receive_buffers: &'a [BufferDescriptor]) -> Self {
        self.receive_buffers = receive_buffers;
        self
    }
}

/// Processo guest que originou o request
#[derive(Clone, Copy)]
pub struct Caller<'a> {
    pub memory: &'a dyn GuestMemory,
    pub handles: &'a dyn KernelHandleTable,
}

impl<'a> Caller<'a> {
    pub fn new(memory: &'a dyn GuestMemory, handles: &'a dyn KernelHandleTable) -> Self {
        Self { memory, handles }
    }
}

/// Resposta devolvida ao transporte
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub result: ResultCode,
    pub scalar_output: Vec<u8>,
    /// Handle copiado para o guest, se o comando gerou um
    pub handle: Option<Handle>,
}

impl Response {
    /// Resposta só com código (nada escrito)
    pub fn bare(result: ResultCode) -> Self {
        Self {
            result,
            scalar_output: Vec::new(),
            handle: None,
        }
    }
}

// =============================================================================
// DISPATCHER
// =============================================================================

/// Dispatcher de um serviço `S`
pub struct CommandDispatcher<S: 'static> {
    table: CommandTable<S>,
}

impl<S: 'static> CommandDispatcher<S> {
    pub fn new(table: CommandTable<S>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CommandTable<S> {
        &self.table
    }

    /// Resolve e invoca o handler de `command_id`.
    ///
    /// Chamadas concorrentes não são serializadas aqui: exclusividade, se
    /// necessária, é responsabilidade do próprio serviço.
    pub fn dispatch(
        &self,
        service: &S,
        command_id: u32,
        guest_version: GuestVersion,
        ctx: &mut RequestContext<'_>,
    ) -> FatalResult<ResultCode> {
        crate::ktrace!("(Dispatch) cmd={} guest={}", command_id, guest_version);

        let Some(command) = self.table.resolve(command_id, guest_version) else {
            crate::kdebug!(
                "(Dispatch) cmd={} não existe para guest {}",
                command_id,
                guest_version
            );
            return Ok(ResultCode::UnknownCommand);
        };

        let result = (command.handler)(service, ctx)?;
        if !result.is_success() {
            crate::ktrace!("(Dispatch) {} retornou {}", command.name, result);
        }
        Ok(result)
    }

    /// Entrada completa do transporte: monta o contexto, despacha e
    /// empacota a resposta.
    pub fn handle_request(
        &self,
        service: &S,
        caller: Caller<'_>,
        request: &Request<'_>,
    ) -> FatalResult<Response> {
        let mut ctx = RequestContext::new(
            request.scalar_input,
            request.send_buffers,
            request.receive_buffers,
            caller.memory,
            caller.handles,
        );

        let result = self.dispatch(service, request.command_id, request.guest_version, &mut ctx)?;
        let (scalar_output, handle) = ctx.into_response().into_parts();
        Ok(Response {
            result,
            scalar_output,
            handle,
        })
    }
}
