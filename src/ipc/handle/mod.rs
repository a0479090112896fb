//! # Handle Management
//!
//! Publicação de objetos do kernel para o guest.
//!
//! ## 🏗️ Arquitetura
//! - `KernelHandleTable`: contrato com a tabela de handles do kernel.
//! - `HandleBroker`: fachada usada pelos handlers; transforma "sem handles"
//!   em erro fatal, já que o protocolo não tem código para isso.
//! - `ProcessHandleTable`: tabela de referência (índice + generation).

pub mod object;
pub mod table;

pub use object::{KernelObject, KernelObjectRef, ObjectType, ReadableEvent};
pub use table::ProcessHandleTable;

use crate::ipc::error::{FatalError, FatalResult};

/// Handle opaco emitido pelo kernel.
///
/// A camada de dispatch nunca interpreta os bits; só a tabela que o emitiu.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u32);

impl Handle {
    pub const INVALID: Self = Self(0);

    pub const fn new(index: u16, generation: u16) -> Self {
        Self((generation as u32) << 16 | index as u32)
    }

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    pub const fn generation(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    pub fn is_valid(&self) -> bool {
        *self != Self::INVALID
    }

    pub const fn as_u32(&self) -> u32 {
        self.0
    }
}

/// Tabela de handles do processo guest (lado kernel).
pub trait KernelHandleTable: Send + Sync {
    /// Emite um handle novo para `object`. `None` se o namespace esgotou.
    fn generate_handle(&self, object: KernelObjectRef) -> Option<Handle>;
}

/// Publica objetos do kernel na tabela do processo que fez o request
#[derive(Clone, Copy)]
pub struct HandleBroker<'a> {
    table: &'a dyn KernelHandleTable,
}

impl<'a> HandleBroker<'a> {
    pub fn new(table: &'a dyn KernelHandleTable) -> Self {
        Self { table }
    }

    /// Emite um handle para `object`.
    ///
    /// Esgotar a tabela viola um invariante do processo: retorna
    /// `FatalError::HandleTableExhausted` e o request inteiro aborta.
    pub fn publish(&self, object: KernelObjectRef) -> FatalResult<Handle> {
        let kind = object.object_type();
        match self.table.generate_handle(object) {
            Some(handle) => {
                crate::kdebug!("(Handle) {:?} publicado como {:#x}", kind, handle.as_u32());
                Ok(handle)
            }
            None => {
                crate::kerror!("(Handle) Sem handles livres para {:?}", kind);
                Err(FatalError::HandleTableExhausted)
            }
        }
    }
}
