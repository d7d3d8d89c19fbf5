use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde};

/// An unsigned integer encoded in chunks of `BITS` bits, each preceded by a
/// proceed bit. Small values cost one chunk; the width grows only as the
/// value does.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct UnsignedVariableInteger<const BITS: u8> {
    value: u64,
}

impl<const BITS: u8> UnsignedVariableInteger<BITS> {
    pub fn new<T: Into<u64>>(value: T) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }
}

impl<const BITS: u8> Serde for UnsignedVariableInteger<BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.value;
        loop {
            let proceed = value >= 1 << BITS;
            writer.write_bit(proceed);
            for _ in 0..BITS {
                writer.write_bit(value & 1 != 0);
                value >>= 1;
            }
            if !proceed {
                return;
            }
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut value: u64 = 0;
        let mut shift: u32 = 0;
        loop {
            let proceed = reader.read_bit()?;
            for _ in 0..BITS {
                if reader.read_bit()? {
                    if shift >= 64 {
                        return Err(SerdeErr::IntegerOverflow);
                    }
                    value |= 1 << shift;
                }
                shift += 1;
            }
            if !proceed {
                return Ok(Self { value });
            }
        }
    }
}

impl<const BITS: u8, T: Into<u64>> From<T> for UnsignedVariableInteger<BITS> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
