use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr};

/// A value with a bit-level wire form.
pub trait Serde: Sized {
    fn ser(&self, writer: &mut dyn BitWrite);
    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;
}

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }
}

impl Serde for u16 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for byte in self.to_le_bytes() {
            writer.write_byte(byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut bytes = [0; 2];
        for byte in bytes.iter_mut() {
            *byte = reader.read_byte()?;
        }
        Ok(u16::from_le_bytes(bytes))
    }
}

impl Serde for u32 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for byte in self.to_le_bytes() {
            writer.write_byte(byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut bytes = [0; 4];
        for byte in bytes.iter_mut() {
            *byte = reader.read_byte()?;
        }
        Ok(u32::from_le_bytes(bytes))
    }
}

impl Serde for u64 {
    fn ser(&self, writer: &mut dyn BitWrite) {
        for byte in self.to_le_bytes() {
            writer.write_byte(byte);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut bytes = [0; 8];
        for byte in bytes.iter_mut() {
            *byte = reader.read_byte()?;
        }
        Ok(u64::from_le_bytes(bytes))
    }
}
