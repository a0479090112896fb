//! # Kernel Objects
//!
//! Objetos do kernel que podem ser publicados para o guest via handle.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

/// Tipo de objeto apontado pelo handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    ReadableEvent,
    WritableEvent,
    SharedMemory,
    Session,
}

/// Objeto do kernel.
///
/// A camada de dispatch só o transporta até a tabela de handles.
pub trait KernelObject: Send + Sync + core::fmt::Debug {
    fn object_type(&self) -> ObjectType;
}

/// Referência compartilhada a um objeto do kernel
pub type KernelObjectRef = Arc<dyn KernelObject>;

/// Lado legível de um evento (o guest espera nele)
#[derive(Debug, Default)]
pub struct ReadableEvent {
    signaled: AtomicBool,
}

impl ReadableEvent {
    pub const fn new() -> Self {
        Self {
            signaled: AtomicBool::new(false),
        }
    }

    /// Sinaliza o evento
    pub fn signal(&self) {
        self.signaled.store(true, Ordering::Release);
    }

    /// Limpa o sinal; retorna se estava sinalizado
    pub fn clear(&self) -> bool {
        self.signaled.swap(false, Ordering::AcqRel)
    }

    pub fn is_signaled(&self) -> bool {
        self.signaled.load(Ordering::Acquire)
    }
}

impl KernelObject for ReadableEvent {
    fn object_type(&self) -> ObjectType {
        ObjectType::ReadableEvent
    }
}
