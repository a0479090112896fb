//! # Region Map
//!
//! Espaço de endereçamento guest de referência: um conjunto de regiões
//! disjuntas, cada uma com backing próprio e permissões.
//!
//! Usado pelos testes e por quem embarca a camada sem uma MMU emulada.
//! Spans podem atravessar regiões adjacentes.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use spin::RwLock;

use super::guest::{GuestMemory, GuestPermission, MemoryError, MemoryFault};

/// Uma região mapeada
struct Region {
    data: Vec<u8>,
    perms: GuestPermission,
}

impl Region {
    fn end(&self, base: u64) -> u64 {
        base + self.data.len() as u64
    }
}

/// Mapa de regiões guest (base -> região)
pub struct RegionMap {
    regions: RwLock<BTreeMap<u64, Region>>,
}

impl RegionMap {
    pub const fn new() -> Self {
        Self {
            regions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Mapeia `size` bytes zerados em `base`.
    pub fn map(&self, base: u64, size: u64, perms: GuestPermission) -> Result<(), MemoryError> {
        let end = base
            .checked_add(size)
            .ok_or(MemoryError::unmapped(base, size))?;
        let mut regions = self.regions.write();

        // Mesma base (inclusive com size 0) ou sobreposição com a vizinha
        let overlaps = regions.contains_key(&base)
            || regions
                .range(..end)
                .next_back()
                .is_some_and(|(&prev_base, prev)| prev.end(prev_base) > base);
        if overlaps {
            return Err(MemoryError {
                address: base,
                size,
                fault: MemoryFault::AlreadyMapped,
            });
        }

        regions.insert(
            base,
            Region {
                data: vec![0u8; size as usize],
                perms,
            },
        );
        crate::ktrace!("(Guest) map {:#x}+{:#x} {:?}", base, size, perms);
        Ok(())
    }

    /// Remove a região que começa em `base`.
    pub fn unmap(&self, base: u64) -> bool {
        self.regions.write().remove(&base).is_some()
    }

    /// Altera as permissões da região que começa em `base`.
    pub fn protect(&self, base: u64, perms: GuestPermission) -> bool {
        match self.regions.write().get_mut(&base) {
            Some(region) => {
                region.perms = perms;
                true
            }
            None => false,
        }
    }

    /// Percorre a faixa [address, address+len) em pedaços por região,
    /// validando `needed` em cada uma. Não chama `f` se a validação falhar.
    fn walk<F>(
        regions: &BTreeMap<u64, Region>,
        address: u64,
        len: usize,
        needed: GuestPermission,
        mut f: F,
    ) -> Result<(), MemoryError>
    where
        F: FnMut(u64, usize, usize, usize),
    {
        let size = len as u64;
        let end = address
            .checked_add(size)
            .ok_or(MemoryError::unmapped(address, size))?;

        // Passo 1: validar tudo
        let mut cursor = address;
        while cursor < end {
            let (&base, region) = regions
                .range(..=cursor)
                .next_back()
                .filter(|(b, r)| r.end(**b) > cursor)
                .ok_or(MemoryError::unmapped(address, size))?;
            if !region.perms.contains(needed) {
                return Err(MemoryError::denied(address, size));
            }
            cursor = region.end(base).min(end);
        }

        // Passo 2: copiar
        let mut cursor = address;
        let mut done = 0usize;
        while cursor < end {
            let (&base, region) = match regions.range(..=cursor).next_back() {
                Some(entry) => entry,
                None => break,
            };
            let chunk_end = region.end(base).min(end);
            let chunk = (chunk_end - cursor) as usize;
            f(base, (cursor - base) as usize, done, chunk);
            done += chunk;
            cursor = chunk_end;
        }
        Ok(())
    }
}

impl Default for RegionMap {
    fn default() -> Self {
        Self::new()
    }
}

impl GuestMemory for RegionMap {
    fn read_span(&self, address: u64, buf: &mut [u8]) -> Result<(), MemoryError> {
        let regions = self.regions.read();
        Self::walk(
            &regions,
            address,
            buf.len(),
            GuestPermission::READ,
            |base, offset, done, chunk| {
                if let Some(region) = regions.get(&base) {
                    buf[done..done + chunk].copy_from_slice(&region.data[offset..offset + chunk]);
                }
            },
        )
    }

    fn write_span(&self, address: u64, data: &[u8]) -> Result<(), MemoryError> {
        let mut regions = self.regions.write();
        let mut pieces: Vec<(u64, usize, usize, usize)> = Vec::new();
        Self::walk(
            &regions,
            address,
            data.len(),
            GuestPermission::WRITE,
            |base, offset, done, chunk| pieces.push((base, offset, done, chunk)),
        )?;

        for (base, offset, done, chunk) in pieces {
            if let Some(region) = regions.get_mut(&base) {
                region.data[offset..offset + chunk].copy_from_slice(&data[done..done + chunk]);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_roundtrip() {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x100, GuestPermission::RW).unwrap();

        mem.write_span(0x1010, &[1, 2, 3, 4]).unwrap();
        let mut buf = [0u8; 6];
        mem.read_span(0x100F, &mut buf).unwrap();
        assert_eq!(buf, [0, 1, 2, 3, 4, 0]);
    }

    #[test]
    fn test_span_across_adjacent_regions() {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x10, GuestPermission::RW).unwrap();
        mem.map(0x1010, 0x10, GuestPermission::RW).unwrap();

        mem.write_span(0x100E, &[0xAA; 4]).unwrap();
        let mut buf = [0u8; 4];
        mem.read_span(0x100E, &mut buf).unwrap();
        assert_eq!(buf, [0xAA; 4]);
    }

    #[test]
    fn test_unmapped_access_fails() {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x10, GuestPermission::RW).unwrap();

        let mut buf = [0u8; 0x20];
        let err = mem.read_span(0x1000, &mut buf).unwrap_err();
        assert_eq!(err.fault, MemoryFault::Unmapped);
        assert_eq!(err.address, 0x1000);
        assert_eq!(err.size, 0x20);
    }

    #[test]
    fn test_read_only_write_is_atomic() {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x10, GuestPermission::RW).unwrap();
        mem.map(0x1010, 0x10, GuestPermission::READ).unwrap();

        let err = mem.write_span(0x1008, &[0xFF; 0x10]).unwrap_err();
        assert_eq!(err.fault, MemoryFault::AccessDenied);

        // Nada escrito na região gravável
        let mut buf = [0u8; 8];
        mem.read_span(0x1008, &mut buf).unwrap();
        assert_eq!(buf, [0u8; 8]);
    }

    #[test]
    fn test_overlapping_map_rejected() {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x100, GuestPermission::RW).unwrap();
        let err = mem.map(0x1080, 0x100, GuestPermission::RW).unwrap_err();
        assert_eq!(err.fault, MemoryFault::AlreadyMapped);
        assert!(mem.map(0x1100, 0x100, GuestPermission::RW).is_ok());
    }

    #[test]
    fn test_empty_map_keeps_existing_region() {
        let mem = RegionMap::new();
        mem.map(0x1000, 0x100, GuestPermission::RW).unwrap();
        mem.write_span(0x1000, &[7; 4]).unwrap();

        let err = mem.map(0x1000, 0, GuestPermission::RW).unwrap_err();
        assert_eq!(err.fault, MemoryFault::AlreadyMapped);

        let mut buf = [0u8; 4];
        mem.read_span(0x1000, &mut buf).unwrap();
        assert_eq!(buf, [7; 4]);
    }

    #[test]
    fn test_zero_length_span() {
        let mem = RegionMap::new();
        assert!(mem.read_span(0xDEAD_0000, &mut []).is_ok());
        assert!(mem.write_span(0xDEAD_0000, &[]).is_ok());
    }
}
