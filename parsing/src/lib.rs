pub use byteorder::{BigEndian, ByteOrder, LittleEndian};
pub use parsing_macro::*;

pub type LE = LittleEndian;
pub type BE = BigEndian;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unexpected end of input: wanted {wanted} bytes, {remaining} remaining")]
    UnexpectedEndOfInput { wanted: usize, remaining: usize },
    #[error("magic value mismatch")]
    MagicCheckFailed,
    #[error("invalid utf-8: {0}")]
    InterpretStrFailed(#[from] std::str::Utf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Forward-only source of bytes.
///
/// A failed read consumes nothing.
pub trait ReadBytes<'a> {
    fn read_bytes(&mut self, num: usize) -> Result<&'a [u8]>;

    /// Number of bytes still available.
    fn remaining(&self) -> usize;

    fn skip(&mut self, num: usize) -> Result<()> {
        self.read_bytes(num).map(|_| ())
    }

    /// Reads exactly `num` bytes and interprets them as UTF-8.
    fn read_utf8(&mut self, num: usize) -> Result<&'a str> {
        let bytes = self.read_bytes(num)?;
        Ok(std::str::from_utf8(bytes)?)
    }

    fn read_type<E: ByteOrder, T: Parse<'a, E>>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        T::parse(self)
    }

    fn read_type_be<T: Parse<'a, BigEndian>>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        self.read_type::<BigEndian, T>()
    }

    fn read_type_le<T: Parse<'a, LittleEndian>>(&mut self) -> Result<T>
    where
        Self: Sized,
    {
        self.read_type::<LittleEndian, T>()
    }
}

impl<'a> ReadBytes<'a> for &'a [u8] {
    fn read_bytes(&mut self, num: usize) -> Result<&'a [u8]> {
        if num <= self.len() {
            let (front, back) = self.split_at(num);
            *self = back;
            Ok(front)
        } else {
            Err(Error::UnexpectedEndOfInput {
                wanted: num,
                remaining: self.len(),
            })
        }
    }

    fn remaining(&self) -> usize {
        self.len()
    }
}

/// Byte slice reader that remembers how far it has advanced.
#[derive(Clone, Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Offset of the next unread byte from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }
}

impl<'a> ReadBytes<'a> for ByteCursor<'a> {
    fn read_bytes(&mut self, num: usize) -> Result<&'a [u8]> {
        let data: &'a [u8] = self.data;
        let mut rest = &data[self.pos..];
        let out = rest.read_bytes(num)?;
        self.pos += num;
        Ok(out)
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

pub trait Parse<'a, E: ByteOrder>: Sized {
    fn parse(input: &mut impl ReadBytes<'a>) -> Result<Self>;
}

macro_rules! impl_primitive_parse {
    ($typ: ty, $read: ident) => {
        impl<'a, E: ByteOrder> Parse<'a, E> for $typ {
            fn parse(input: &mut impl ReadBytes<'a>) -> Result<Self> {
                let bytes = input.read_bytes(std::mem::size_of::<$typ>())?;
                Ok(E::$read(bytes))
            }
        }
    };
}

impl_primitive_parse!(u16, read_u16);
impl_primitive_parse!(u32, read_u32);
impl_primitive_parse!(u64, read_u64);
impl_primitive_parse!(i16, read_i16);
impl_primitive_parse!(i32, read_i32);
impl_primitive_parse!(i64, read_i64);

impl<'a, E: ByteOrder> Parse<'a, E> for u8 {
    fn parse(input: &mut impl ReadBytes<'a>) -> Result<Self> {
        Ok(input.read_bytes(1)?[0])
    }
}

impl<'a, E: ByteOrder> Parse<'a, E> for i8 {
    fn parse(input: &mut impl ReadBytes<'a>) -> Result<Self> {
        Ok(input.read_bytes(1)?[0] as i8)
    }
}

impl<'a, E: ByteOrder, const N: usize> Parse<'a, E> for [u8; N] {
    fn parse(input: &mut impl ReadBytes<'a>) -> Result<Self> {
        let mut out = [0_u8; N];
        out.copy_from_slice(input.read_bytes(N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use crate::{ByteCursor, Error, ReadBytes, BE, LE};

    #[test]
    fn big_endian_integers() {
        let bytes = [0xFF_u8, 0xFF, 0x12, 0x34, 0xDE, 0xAD, 0xBE, 0xEF];
        let mut b = bytes.as_slice();
        assert_eq!(b.read_type_be::<i16>().unwrap(), -1);
        assert_eq!(b.read_type_be::<u16>().unwrap(), 0x1234);
        assert_eq!(b.read_type_be::<u32>().unwrap(), 0xDEAD_BEEF);
        assert!(b.is_empty());
    }

    #[test]
    fn endianness_is_a_type_parameter() {
        let bytes = [0x01_u8, 0x02];
        let mut b = bytes.as_slice();
        assert_eq!(b.read_type::<LE, u16>().unwrap(), 0x0201);
        let mut b = bytes.as_slice();
        assert_eq!(b.read_type::<BE, u16>().unwrap(), 0x0102);
    }

    #[test]
    fn short_read_consumes_nothing() {
        let bytes = [0x01_u8, 0x02, 0x03];
        let mut b = bytes.as_slice();
        let err = b.read_type_be::<u32>().unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedEndOfInput {
                wanted: 4,
                remaining: 3
            }
        );
        assert_eq!(b.len(), 3);
    }

    #[test]
    fn cursor_tracks_position() {
        let bytes = b"VPINrest";
        let mut c = ByteCursor::new(bytes);
        assert_eq!(c.read_utf8(4).unwrap(), "VPIN");
        assert_eq!(c.position(), 4);
        assert_eq!(c.remaining(), 4);
        c.skip(4).unwrap();
        assert!(c.is_empty());
        assert!(c.read_type_be::<u8>().is_err());
        assert_eq!(c.position(), 8);
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let bytes = [0xC3_u8, 0x28];
        let mut b = bytes.as_slice();
        assert!(matches!(
            b.read_utf8(2),
            Err(Error::InterpretStrFailed(_))
        ));
    }
}
