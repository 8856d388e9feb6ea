//! Endian-aware primitive decoders and the scalar type tag. All operations
//! here are pure: they neither allocate long-lived state nor touch I/O.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use num_enum::TryFromPrimitive;

/// On-disk element type tag, read as a single byte in variable and
/// attribute index records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum DataType {
    Unknown = 0,
    Byte = 1,
    Short = 2,
    Integer = 3,
    Long = 4,
    UnsignedByte = 5,
    UnsignedShort = 6,
    UnsignedInteger = 7,
    UnsignedLong = 8,
    Real = 9,
    Double = 10,
    LongDouble = 11,
    String = 12,
    Complex = 13,
    DoubleComplex = 14,
}

impl DataType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Integer => "integer",
            Self::Long => "long long",
            Self::UnsignedByte => "unsigned byte",
            Self::UnsignedShort => "unsigned short",
            Self::UnsignedInteger => "unsigned integer",
            Self::UnsignedLong => "unsigned long long",
            Self::Real => "real",
            Self::Double => "double",
            Self::LongDouble => "long double",
            Self::String => "string",
            Self::Complex => "complex",
            Self::DoubleComplex => "double complex",
        }
    }

    /// Byte width of one scalar element of this type, or `None` when the
    /// size is data-dependent (strings: the caller must use the payload's
    /// own length instead of a fixed element size).
    pub fn fixed_size(self) -> Option<usize> {
        match self {
            Self::Byte | Self::UnsignedByte => Some(1),
            Self::Short | Self::UnsignedShort => Some(2),
            Self::Integer | Self::UnsignedInteger | Self::Real => Some(4),
            Self::Long | Self::UnsignedLong | Self::Double | Self::Complex => Some(8),
            Self::LongDouble | Self::DoubleComplex => Some(16),
            Self::String | Self::Unknown => None,
        }
    }
}

/// Byte order of the data section of a BP file (independent of the running
/// host's order).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    #[cfg(target_endian = "little")]
    pub fn host() -> Self {
        Self::Little
    }

    #[cfg(target_endian = "big")]
    pub fn host() -> Self {
        Self::Big
    }
}

pub fn read_u16(bytes: &[u8], order: Endian) -> u16 {
    match order {
        Endian::Little => LittleEndian::read_u16(bytes),
        Endian::Big => BigEndian::read_u16(bytes),
    }
}

pub fn read_u32(bytes: &[u8], order: Endian) -> u32 {
    match order {
        Endian::Little => LittleEndian::read_u32(bytes),
        Endian::Big => BigEndian::read_u32(bytes),
    }
}

pub fn read_u64(bytes: &[u8], order: Endian) -> u64 {
    match order {
        Endian::Little => LittleEndian::read_u64(bytes),
        Endian::Big => BigEndian::read_u64(bytes),
    }
}

pub fn read_i64(bytes: &[u8], order: Endian) -> i64 {
    read_u64(bytes, order) as i64
}

pub fn read_f32(bytes: &[u8], order: Endian) -> f32 {
    match order {
        Endian::Little => LittleEndian::read_f32(bytes),
        Endian::Big => BigEndian::read_f32(bytes),
    }
}

pub fn read_f64(bytes: &[u8], order: Endian) -> f64 {
    match order {
        Endian::Little => LittleEndian::read_f64(bytes),
        Endian::Big => BigEndian::read_f64(bytes),
    }
}

/// Swaps every scalar element of `bytes` in place, using `ty`'s element
/// size. A no-op for variable-sized types (string) since there is no
/// scalar slot to swap.
pub fn swap_endianness(bytes: &mut [u8], ty: DataType) {
    let Some(element_size) = ty.fixed_size() else {
        return;
    };
    if element_size <= 1 {
        return;
    }
    for chunk in bytes.chunks_exact_mut(element_size) {
        chunk.reverse();
    }
}

/// Compares two already-host-order scalar values of type `ty`. Used to fold
/// per-block min/max characteristics into a variable's global min/max.
pub fn less_than(ty: DataType, a: &[u8], b: &[u8]) -> bool {
    match ty {
        DataType::Byte => (a[0] as i8) < (b[0] as i8),
        DataType::UnsignedByte => a[0] < b[0],
        DataType::Short => read_u16(a, Endian::host()) as i16 <
            read_u16(b, Endian::host()) as i16,
        DataType::UnsignedShort => read_u16(a, Endian::host()) < read_u16(b, Endian::host()),
        DataType::Integer => {
            (read_u32(a, Endian::host()) as i32) < (read_u32(b, Endian::host()) as i32)
        }
        DataType::UnsignedInteger => read_u32(a, Endian::host()) < read_u32(b, Endian::host()),
        DataType::Long => {
            (read_u64(a, Endian::host()) as i64) < (read_u64(b, Endian::host()) as i64)
        }
        DataType::UnsignedLong => read_u64(a, Endian::host()) < read_u64(b, Endian::host()),
        DataType::Real => read_f32(a, Endian::host()) < read_f32(b, Endian::host()),
        DataType::Double => read_f64(a, Endian::host()) < read_f64(b, Endian::host()),
        // Long double/complex/string/unknown have no defined total order here;
        // callers fold these as "first wins" by never calling less_than on them.
        DataType::LongDouble | DataType::Complex | DataType::DoubleComplex | DataType::String
        | DataType::Unknown => false,
    }
}

/// Folds per-block `(min, max)` byte pairs into one variable-wide pair,
/// using [`less_than`] as the ordering. Blocks with no min/max recorded are
/// filtered out by the caller before this is reached; an empty iterator
/// yields `None`.
pub fn fold_min_max<'a>(
    ty: DataType,
    blocks: impl Iterator<Item = (&'a [u8], &'a [u8])>,
) -> Option<(Vec<u8>, Vec<u8>)> {
    blocks.fold(None, |acc, (min, max)| match acc {
        None => Some((min.to_vec(), max.to_vec())),
        Some((gmin, gmax)) => {
            let new_min = if less_than(ty, min, &gmin) { min.to_vec() } else { gmin };
            let new_max = if less_than(ty, &gmax, max) { max.to_vec() } else { gmax };
            Some((new_min, new_max))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_min_max_across_blocks() {
        let blocks = [(3i32, 7i32), (1, 9), (4, 5)];
        let encoded: Vec<(Vec<u8>, Vec<u8>)> = blocks
            .iter()
            .map(|(mn, mx)| (mn.to_ne_bytes().to_vec(), mx.to_ne_bytes().to_vec()))
            .collect();
        let refs: Vec<(&[u8], &[u8])> = encoded.iter().map(|(a, b)| (a.as_slice(), b.as_slice())).collect();
        let (gmin, gmax) = fold_min_max(DataType::Integer, refs.into_iter()).unwrap();
        assert_eq!(i32::from_ne_bytes(gmin.try_into().unwrap()), 1);
        assert_eq!(i32::from_ne_bytes(gmax.try_into().unwrap()), 9);
    }

    #[test]
    fn swap_roundtrips_u32() {
        let mut bytes = 0x0102_0304u32.to_le_bytes();
        swap_endianness(&mut bytes, DataType::Integer);
        assert_eq!(u32::from_be_bytes(bytes), 0x0102_0304);
    }

    #[test]
    fn swap_is_noop_for_bytes() {
        let mut bytes = [1u8, 2, 3];
        swap_endianness(&mut bytes, DataType::Byte);
        assert_eq!(bytes, [1, 2, 3]);
    }

    #[test]
    fn less_than_respects_sign() {
        let a = (-5i32).to_ne_bytes();
        let b = 5i32.to_ne_bytes();
        assert!(less_than(DataType::Integer, &a, &b));
        assert!(!less_than(DataType::Integer, &b, &a));
    }
}
