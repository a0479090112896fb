//! # Guest Memory (MM)
//!
//! Fronteira entre a memória do guest e os buffers do host.
//!
//! | Módulo   | Responsabilidade |
//! |----------|------------------|
//! | `guest`  | Contrato `GuestMemory` (read/write de spans) e erros de acesso. |
//! | `region` | `RegionMap`: espaço de endereçamento de referência. |
//!
//! A camada de dispatch só enxerga o trait; nunca guarda ponteiros para o guest.

pub mod guest;
pub mod region;

pub use guest::{GuestMemory, GuestPermission, MemoryError, MemoryFault};
pub use region::RegionMap;
