// src/lib.rs
//! Service Dispatch Library.
//!
//! Camada de dispatch de comandos guest -> host para serviços emulados.
//! Define a ordem de dependência dos módulos: logging e config primeiro,
//! depois memória guest, depois o protocolo, por fim os serviços.

#![cfg_attr(not(test), no_std)]

// Alocação dinâmica (Vec/Box/Arc)
extern crate alloc;

// Fachada usada pelos macros k*! (não faz parte da API)
#[doc(hidden)]
pub use log as __log;

// --- Infraestrutura ---
#[macro_use]
pub mod logging; // Macros kerror!..ktrace!
pub mod config; // Constantes de compilação

// --- Fronteira com o guest ---
pub mod mm; // GuestMemory, RegionMap

// --- Protocolo ---
pub mod ipc; // Tabela, dispatcher, marshaling, handles

// --- Serviços ---
pub mod audio; // IAudioRenderer

pub use ipc::{
    Caller, Command, FatalError, FatalResult, GuestVersion, Request, Response, ResultCode, Service,
    ServiceInstance,
};
