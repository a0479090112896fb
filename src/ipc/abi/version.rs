//! # Guest Versioning
//!
//! Versão do sistema do guest, usada para liberar comandos por versão.

/// Versão semântica do guest (major.minor.micro).
///
/// A ordenação é lexicográfica nos três campos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GuestVersion {
    pub major: u8,
    pub minor: u8,
    pub micro: u8,
}

impl GuestVersion {
    /// Primeira versão conhecida
    pub const BASE: Self = Self::new(1, 0, 0);

    /// Maior versão representável
    pub const LATEST: Self = Self::new(u8::MAX, u8::MAX, u8::MAX);

    pub const fn new(major: u8, minor: u8, micro: u8) -> Self {
        Self {
            major,
            minor,
            micro,
        }
    }

    /// Empacota como `major << 16 | minor << 8 | micro`
    pub const fn pack(self) -> u32 {
        (self.major as u32) << 16 | (self.minor as u32) << 8 | self.micro as u32
    }

    pub const fn unpack(raw: u32) -> Self {
        Self::new((raw >> 16) as u8, (raw >> 8) as u8, raw as u8)
    }

    /// Verifica se esta versão está em [min, max] (limites opcionais)
    pub fn within(self, min: Option<Self>, max: Option<Self>) -> bool {
        min.map_or(true, |min| self >= min) && max.map_or(true, |max| self <= max)
    }
}

impl core::fmt::Display for GuestVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(GuestVersion::new(3, 0, 0) > GuestVersion::new(2, 255, 255));
        assert!(GuestVersion::new(15, 0, 0) > GuestVersion::new(3, 0, 1));
        assert!(GuestVersion::new(3, 0, 1) > GuestVersion::new(3, 0, 0));
    }

    #[test]
    fn test_pack_unpack() {
        let v = GuestVersion::new(15, 0, 1);
        assert_eq!(v.pack(), 0x000F_0001);
        assert_eq!(GuestVersion::unpack(v.pack()), v);
    }

    #[test]
    fn test_within() {
        let v = GuestVersion::new(5, 1, 0);
        assert!(v.within(None, None));
        assert!(v.within(Some(GuestVersion::new(3, 0, 0)), None));
        assert!(!v.within(Some(GuestVersion::new(15, 0, 0)), None));
        assert!(!v.within(None, Some(GuestVersion::new(4, 0, 0))));
        assert!(v.within(Some(v), Some(v)));
    }
}
