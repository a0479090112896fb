//! Dispatch de Comandos Guest -> Host
//!
//! Protocolo numerado: um id de comando, escalares serializados e
//! descritores de buffers guest. Resultado volta como `ResultCode`.
//!
//! # Módulos
//!
//! - `abi`: Descritores, versão do guest, cursores de escalares
//! - `result`: Códigos de resultado (ResultCode)
//! - `error`: Erros fatais (FatalError)
//! - `context`: Estado de uma chamada (RequestContext)
//! - `marshal`: Cópia guest <-> host (BufferMarshaler)
//! - `handle`: Publicação de objetos do kernel (HandleBroker)
//! - `dispatch`: Tabela e dispatcher
//! - `service`: Ciclo de vida das instâncias

pub mod abi;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod marshal;
pub mod result;
pub mod service;

// Re-exports principais
pub use abi::{BufferDescriptor, GuestVersion};
pub use context::RequestContext;
pub use dispatch::{Caller, Command, CommandDispatcher, CommandTable, HandlerResult, Request, Response};
pub use error::{FatalError, FatalResult};
pub use handle::{Handle, HandleBroker, KernelHandleTable};
pub use marshal::{BufferMarshaler, OutputInit};
pub use result::ResultCode;
pub use service::{Service, ServiceInstance};
