//! # Handle Table
//!
//! Tabela de handles per-process de referência. Implementa o lado kernel
//! (`KernelHandleTable`) que o `HandleBroker` consome.
//!
//! Handle = índice + generation: um slot liberado volta com generation nova,
//! então um valor de handle nunca se repete enquanto estiver vivo.

use alloc::vec::Vec;

use spin::Mutex;

use super::object::KernelObjectRef;
use super::{Handle, KernelHandleTable};
use crate::config::HANDLE_TABLE_CAPACITY;

/// Slots endereçáveis pelo campo de índice de um `Handle`
const MAX_INDEX_SLOTS: usize = u16::MAX as usize + 1;

/// Entrada na handle table
struct HandleEntry {
    object: Option<KernelObjectRef>,
    generation: u16,
}

impl HandleEntry {
    const fn empty() -> Self {
        Self {
            object: None,
            generation: 0,
        }
    }

    fn in_use(&self) -> bool {
        self.object.is_some()
    }
}

/// Tabela de handles para um processo
pub struct ProcessHandleTable {
    entries: Mutex<Vec<HandleEntry>>,
}

impl ProcessHandleTable {
    pub fn new() -> Self {
        Self::with_capacity(HANDLE_TABLE_CAPACITY)
    }

    /// Tabela com `capacity` slots, limitada ao espaço de índices de 16 bits.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_INDEX_SLOTS);
        let mut entries = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            entries.push(HandleEntry::empty());
        }
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Obtém o objeto por handle (validando generation)
    pub fn get(&self, handle: Handle) -> Option<KernelObjectRef> {
        let entries = self.entries.lock();
        let entry = entries.get(handle.index() as usize)?;
        if entry.generation != handle.generation() {
            return None;
        }
        entry.object.clone()
    }

    /// Fecha handle; o slot fica livre para uma generation nova
    pub fn close(&self, handle: Handle) -> bool {
        let mut entries = self.entries.lock();
        match entries.get_mut(handle.index() as usize) {
            Some(entry) if entry.in_use() && entry.generation == handle.generation() => {
                entry.object = None;
                true
            }
            _ => false,
        }
    }

    /// Handles vivos
    pub fn live(&self) -> usize {
        self.entries.lock().iter().filter(|e| e.in_use()).count()
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().len()
    }
}

impl Default for ProcessHandleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KernelHandleTable for ProcessHandleTable {
    fn generate_handle(&self, object: KernelObjectRef) -> Option<Handle> {
        let mut entries = self.entries.lock();
        let (idx, entry) = entries.iter_mut().enumerate().find(|(_, e)| !e.in_use())?;

        // Generation 0 fica reservada: Handle::INVALID nunca é emitido
        entry.generation = match entry.generation.wrapping_add(1) {
            0 => 1,
            g => g,
        };
        entry.object = Some(object);
        Some(Handle::new(idx as u16, entry.generation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipc::handle::object::ReadableEvent;
    use alloc::sync::Arc;

    #[test]
    fn test_alloc_get_close() {
        let table = ProcessHandleTable::with_capacity(4);
        let event: KernelObjectRef = Arc::new(ReadableEvent::new());

        let h = table.generate_handle(event.clone()).unwrap();
        assert!(h.is_valid());
        assert!(Arc::ptr_eq(&table.get(h).unwrap(), &event));

        assert!(table.close(h));
        assert!(table.get(h).is_none());
        assert!(!table.close(h));
    }

    #[test]
    fn test_reused_slot_gets_new_value() {
        let table = ProcessHandleTable::with_capacity(1);
        let h1 = table.generate_handle(Arc::new(ReadableEvent::new())).unwrap();
        assert!(table.close(h1));
        let h2 = table.generate_handle(Arc::new(ReadableEvent::new())).unwrap();

        assert_eq!(h1.index(), h2.index());
        assert_ne!(h1, h2);
        assert!(table.get(h1).is_none());
    }

    #[test]
    fn test_capacity_clamped_to_index_space() {
        let table = ProcessHandleTable::with_capacity(70_000);
        assert_eq!(table.capacity(), MAX_INDEX_SLOTS);
    }

    #[test]
    fn test_exhaustion() {
        let table = ProcessHandleTable::with_capacity(2);
        assert!(table.generate_handle(Arc::new(ReadableEvent::new())).is_some());
        assert!(table.generate_handle(Arc::new(ReadableEvent::new())).is_some());
        assert!(table.generate_handle(Arc::new(ReadableEvent::new())).is_none());
        assert_eq!(table.live(), 2);
    }
}
