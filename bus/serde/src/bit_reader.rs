use crate::error::SerdeErr;

/// Reads bits back out of a buffer produced by a
/// [`BitWriter`](crate::BitWriter).
pub struct BitReader<'b> {
    buffer: &'b [u8],
    buffer_index: usize,
    scratch: u8,
    scratch_index: u8,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            buffer_index: 0,
            scratch: 0,
            scratch_index: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        if self.scratch_index == 0 {
            let Some(&byte) = self.buffer.get(self.buffer_index) else {
                return Err(SerdeErr::BufferOverrun);
            };
            self.buffer_index += 1;
            self.scratch = byte.reverse_bits();
            self.scratch_index = 8;
        }

        let bit = self.scratch & 0b1000_0000 != 0;
        self.scratch <<= 1;
        self.scratch_index -= 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// Bits left before the reader runs dry.
    pub fn bits_remaining(&self) -> usize {
        (self.buffer.len() - self.buffer_index) * 8 + self.scratch_index as usize
    }
}
