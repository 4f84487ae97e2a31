use crate::EmuError;

/// Size of the addressable space: the 6502 sees exactly 64KB.
pub const MAX_MEM: u32 = 1024 * 64;

/// Flat byte-addressable memory for the 6502.
///
/// Every address in [0, 65536) is always defined. Addresses are accepted as
/// `u32` so that out-of-range values are representable and rejected with
/// [`EmuError::OutOfRange`] instead of being truncated by the parameter
/// type; a failed bounds check never touches adjacent memory.
pub struct Memory {
    data: [u8; MAX_MEM as usize],
}

impl Memory {
    /// Creates a zero-filled 64KB memory image.
    pub fn new() -> Self {
        Memory {
            data: [0; MAX_MEM as usize],
        }
    }

    /// Clears every byte to zero.
    ///
    /// `CPU::reset` calls this to model power-on-clear semantics; it is also
    /// safe to call independently.
    pub fn init(&mut self) {
        self.data = [0; MAX_MEM as usize];
    }

    fn check_bounds(addr: u32) -> Result<(), EmuError> {
        if addr >= MAX_MEM {
            return Err(EmuError::OutOfRange { addr });
        }
        Ok(())
    }

    /// Reads the byte at `addr`. No side effects.
    pub fn read(&self, addr: u32) -> Result<u8, EmuError> {
        Self::check_bounds(addr)?;
        Ok(self.data[addr as usize])
    }

    /// Writes `value` at `addr`. Mutates exactly one byte.
    pub fn write(&mut self, addr: u32, value: u8) -> Result<(), EmuError> {
        Self::check_bounds(addr)?;
        self.data[addr as usize] = value;
        Ok(())
    }

    /// Writes a 16-bit value in little-endian order: low byte at `addr`,
    /// high byte at `addr + 1`.
    ///
    /// Both bytes are bounds-checked before either is stored, so a word
    /// write at 0xFFFF fails instead of wrapping past the top of the
    /// address space.
    pub fn write_word(&mut self, addr: u32, value: u16) -> Result<(), EmuError> {
        Self::check_bounds(addr)?;
        Self::check_bounds(addr + 1)?;
        self.data[addr as usize] = (value & 0xFF) as u8;
        self.data[addr as usize + 1] = (value >> 8) as u8;
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
