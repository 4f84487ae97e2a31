use crate::memory::Memory;
use crate::metrics::{record_instruction, record_reset, record_unrecognized_opcode};
use crate::opcodes::{AddressingMode, Operation, OPCODE_TABLE};
use crate::EmuError;

/// MOS 6502 register file and status flags.
///
/// The CPU never owns memory: `reset` and `execute` borrow it for the
/// duration of the call, modeling the address/data bus coupling of the real
/// part without implying ownership.
#[derive(Debug)]
pub struct CPU {
    pub a: u8,      // Accumulator
    pub x: u8,      // X Index Register
    pub y: u8,      // Y Index Register
    pub pc: u16,    // Program Counter
    pub sp: u8,     // Stack Pointer
    pub status: u8, // Status Register

    /// Total cycles executed since the last reset.
    pub cycles: u64,
}

// Status register flags
pub const CARRY_FLAG: u8 = 0x01;
pub const ZERO_FLAG: u8 = 0x02;
pub const INTERRUPT_DISABLE: u8 = 0x04;
pub const DECIMAL_MODE: u8 = 0x08;
pub const BREAK_COMMAND: u8 = 0x10;
pub const OVERFLOW_FLAG: u8 = 0x40;
pub const NEGATIVE_FLAG: u8 = 0x80;

/// Where execution begins after reset. The PC is set to this address
/// itself; the first opcode is fetched from 0xFFFC.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Stack pointer value after reset.
///
/// This is the pre-decrement convention: hardware reset performs three
/// phantom stack-pointer decrements without writes, and starting at 0xFF
/// puts the first genuine push at 0x01FF. (The alternative 0xFD convention
/// models the post-decrement result; this crate uses 0xFF, pinned by test.)
pub const RESET_SP: u8 = 0xFF;

/// Base of the hardware stack page. The stack occupies 0x0100-0x01FF and
/// grows downward.
pub const STACK_BASE: u16 = 0x0100;

impl CPU {
    pub fn new() -> Self {
        CPU {
            a: 0,
            x: 0,
            y: 0,
            pc: RESET_VECTOR,
            sp: RESET_SP,
            status: 0,
            cycles: 0,
        }
    }

    /// Resets the machine to its power-on state.
    ///
    /// PC ← 0xFFFC, SP ← 0xFF, all seven flags cleared, A = X = Y = 0, and
    /// the attached memory is zeroed (power-on-clear). Programs are
    /// therefore seeded into memory after `reset`, starting at 0xFFFC.
    pub fn reset(&mut self, memory: &mut Memory) {
        self.pc = RESET_VECTOR;
        self.sp = RESET_SP;
        self.status = 0;
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.cycles = 0;
        memory.init();

        record_reset();
    }

    /// Executes whole instructions until the cycle budget is spent.
    ///
    /// The budget is only checked between instructions: an instruction whose
    /// cost exceeds the remainder still completes, overshooting the request.
    /// Returns the cycles actually consumed (≥ the budget on overshoot).
    ///
    /// Memory bounds errors abort the in-flight instruction. An opcode with
    /// no dispatch entry halts execution with
    /// [`EmuError::UnrecognizedOpcode`] carrying the byte and its fetch
    /// address; it is never charged as a no-op.
    pub fn execute(&mut self, cycles: u32, memory: &mut Memory) -> Result<u32, EmuError> {
        let budget = cycles as i64;
        let mut remaining = budget;

        while remaining > 0 {
            let fetch_pc = self.pc;
            let before = remaining;

            let opcode = self.fetch_byte(&mut remaining, memory)?;
            let entry = match OPCODE_TABLE[opcode as usize] {
                Some(entry) => entry,
                None => {
                    record_unrecognized_opcode(opcode);
                    return Err(EmuError::UnrecognizedOpcode {
                        opcode,
                        pc: fetch_pc,
                    });
                }
            };

            match entry.operation {
                Operation::Lda => {
                    self.a = self.read_operand(entry.mode, &mut remaining, memory)?;
                    self.update_zero_and_negative_flags(self.a);
                }
                Operation::Jsr => {
                    let target = self.fetch_word(&mut remaining, memory)?;
                    // Return address is the last byte of the JSR encoding
                    let return_addr = self.pc.wrapping_sub(1);
                    self.push_word(&mut remaining, return_addr, memory)?;
                    self.pc = target;
                    remaining -= 1;
                }
            }

            let consumed = before - remaining;
            debug_assert_eq!(consumed, entry.cycles as i64);
            self.cycles += consumed as u64;
            record_instruction(opcode, entry.mnemonic, consumed as u64);
        }

        Ok((budget - remaining) as u32)
    }

    // Fetch/read primitives. All memory traffic from instruction handlers
    // goes through these (and the stack primitives), which centralizes the
    // cycle accounting. fetch_byte is the only way PC advances.

    /// Fetches the byte at PC, advancing PC by 1 and charging 1 cycle.
    pub fn fetch_byte(&mut self, cycles: &mut i64, memory: &Memory) -> Result<u8, EmuError> {
        let data = memory.read(self.pc as u32)?;
        self.pc = self.pc.wrapping_add(1);
        *cycles -= 1;
        Ok(data)
    }

    /// Fetches a little-endian word at PC, advancing PC by 2 and charging
    /// 2 cycles.
    pub fn fetch_word(&mut self, cycles: &mut i64, memory: &Memory) -> Result<u16, EmuError> {
        let low = self.fetch_byte(cycles, memory)? as u16;
        let high = self.fetch_byte(cycles, memory)? as u16;
        Ok((high << 8) | low)
    }

    /// Reads the byte at a resolved address without moving PC, charging
    /// 1 cycle.
    pub fn read_byte(
        &mut self,
        cycles: &mut i64,
        addr: u16,
        memory: &Memory,
    ) -> Result<u8, EmuError> {
        let data = memory.read(addr as u32)?;
        *cycles -= 1;
        Ok(data)
    }

    /// Resolves an addressing mode to its operand value.
    fn read_operand(
        &mut self,
        mode: AddressingMode,
        cycles: &mut i64,
        memory: &Memory,
    ) -> Result<u8, EmuError> {
        match mode {
            AddressingMode::Immediate => self.fetch_byte(cycles, memory),
            AddressingMode::ZeroPage => {
                let addr = self.fetch_byte(cycles, memory)? as u16;
                self.read_byte(cycles, addr, memory)
            }
            AddressingMode::ZeroPageX => {
                // Index arithmetic wraps within page 0; the carry never
                // propagates into page 1 (hardware quirk). The index add
                // costs a cycle whether or not it wrapped.
                let addr = self.fetch_byte(cycles, memory)?.wrapping_add(self.x);
                *cycles -= 1;
                self.read_byte(cycles, addr as u16, memory)
            }
            AddressingMode::Absolute => {
                let addr = self.fetch_word(cycles, memory)?;
                self.read_byte(cycles, addr, memory)
            }
        }
    }

    // Stack operations. The stack lives in page 1, addressed as
    // 0x0100 + SP, and grows downward.

    /// Pushes a byte at 0x0100 + SP, then decrements SP. Charges 1 cycle.
    pub fn push_byte(
        &mut self,
        cycles: &mut i64,
        value: u8,
        memory: &mut Memory,
    ) -> Result<(), EmuError> {
        memory.write((STACK_BASE + self.sp as u16) as u32, value)?;
        self.sp = self.sp.wrapping_sub(1);
        *cycles -= 1;
        Ok(())
    }

    /// Pushes a word high byte first, leaving it little-endian in memory.
    /// Charges 2 cycles.
    pub fn push_word(
        &mut self,
        cycles: &mut i64,
        value: u16,
        memory: &mut Memory,
    ) -> Result<(), EmuError> {
        self.push_byte(cycles, (value >> 8) as u8, memory)?;
        self.push_byte(cycles, (value & 0xFF) as u8, memory)
    }

    /// Increments SP, then reads the byte at 0x0100 + SP. Charges 1 cycle.
    pub fn pop_byte(&mut self, cycles: &mut i64, memory: &Memory) -> Result<u8, EmuError> {
        self.sp = self.sp.wrapping_add(1);
        let data = memory.read((STACK_BASE + self.sp as u16) as u32)?;
        *cycles -= 1;
        Ok(data)
    }

    /// Pops a little-endian word. Charges 2 cycles.
    pub fn pop_word(&mut self, cycles: &mut i64, memory: &Memory) -> Result<u16, EmuError> {
        let low = self.pop_byte(cycles, memory)? as u16;
        let high = self.pop_byte(cycles, memory)? as u16;
        Ok((high << 8) | low)
    }

    // Flag operations
    pub fn set_flag(&mut self, flag: u8, value: bool) {
        if value {
            self.status |= flag;
        } else {
            self.status &= !flag;
        }
    }

    pub fn get_flag(&self, flag: u8) -> bool {
        (self.status & flag) != 0
    }

    fn update_zero_and_negative_flags(&mut self, value: u8) {
        self.set_flag(ZERO_FLAG, value == 0);
        self.set_flag(NEGATIVE_FLAG, (value & 0x80) != 0);
    }
}

impl Default for CPU {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        memory.write(0x1234, 0xFF).unwrap();
        cpu.a = 0x42;
        cpu.status = 0xFF;

        cpu.reset(&mut memory);

        assert_eq!(cpu.pc, 0xFFFC);
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(cpu.status, 0);
        assert_eq!(cpu.a, 0);
        assert_eq!(cpu.x, 0);
        assert_eq!(cpu.y, 0);
        assert_eq!(cpu.cycles, 0);
        // Reset also clears memory
        assert_eq!(memory.read(0x1234).unwrap(), 0);
    }

    #[test]
    fn test_fetch_byte_advances_pc_and_charges_one_cycle() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        cpu.reset(&mut memory);
        memory.write(0xFFFC, 0x42).unwrap();

        let mut cycles: i64 = 5;
        let value = cpu.fetch_byte(&mut cycles, &memory).unwrap();

        assert_eq!(value, 0x42);
        assert_eq!(cpu.pc, 0xFFFD);
        assert_eq!(cycles, 4);
    }

    #[test]
    fn test_fetch_word_is_little_endian() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        cpu.reset(&mut memory);
        memory.write(0xFFFC, 0x34).unwrap();
        memory.write(0xFFFD, 0x12).unwrap();

        let mut cycles: i64 = 5;
        let value = cpu.fetch_word(&mut cycles, &memory).unwrap();

        assert_eq!(value, 0x1234);
        assert_eq!(cpu.pc, 0xFFFE);
        assert_eq!(cycles, 3);
    }

    #[test]
    fn test_read_byte_leaves_pc_alone() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        cpu.reset(&mut memory);
        memory.write(0x0042, 0x99).unwrap();

        let mut cycles: i64 = 3;
        let value = cpu.read_byte(&mut cycles, 0x0042, &memory).unwrap();

        assert_eq!(value, 0x99);
        assert_eq!(cpu.pc, 0xFFFC);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn test_push_pop_byte() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        cpu.reset(&mut memory);

        let mut cycles: i64 = 10;
        cpu.push_byte(&mut cycles, 0xAB, &mut memory).unwrap();

        assert_eq!(memory.read(0x01FF).unwrap(), 0xAB);
        assert_eq!(cpu.sp, 0xFE);
        assert_eq!(cycles, 9);

        let value = cpu.pop_byte(&mut cycles, &memory).unwrap();
        assert_eq!(value, 0xAB);
        assert_eq!(cpu.sp, 0xFF);
        assert_eq!(cycles, 8);
    }

    #[test]
    fn test_push_word_layout() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        cpu.reset(&mut memory);

        let mut cycles: i64 = 10;
        cpu.push_word(&mut cycles, 0xBEEF, &mut memory).unwrap();

        // High byte pushed first, so the word sits little-endian
        assert_eq!(memory.read(0x01FF).unwrap(), 0xBE);
        assert_eq!(memory.read(0x01FE).unwrap(), 0xEF);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cycles, 8);

        let value = cpu.pop_word(&mut cycles, &memory).unwrap();
        assert_eq!(value, 0xBEEF);
        assert_eq!(cpu.sp, 0xFF);
    }

    #[test]
    fn test_zero_page_x_wraps_within_page_zero() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();
        cpu.reset(&mut memory);
        cpu.x = 0xFF;
        memory.write(0xFFFC, 0x80).unwrap(); // operand byte
        memory.write(0x007F, 0x55).unwrap(); // (0x80 + 0xFF) mod 256
        memory.write(0x017F, 0xAA).unwrap(); // must NOT be read

        let mut cycles: i64 = 3;
        let value = cpu
            .read_operand(AddressingMode::ZeroPageX, &mut cycles, &memory)
            .unwrap();

        assert_eq!(value, 0x55);
        assert_eq!(cycles, 0); // operand fetch + index add + read
    }

    #[test]
    fn test_flag_set_and_get() {
        let mut cpu = CPU::new();
        cpu.set_flag(CARRY_FLAG, true);
        cpu.set_flag(NEGATIVE_FLAG, true);
        assert!(cpu.get_flag(CARRY_FLAG));
        assert!(cpu.get_flag(NEGATIVE_FLAG));
        assert!(!cpu.get_flag(ZERO_FLAG));

        cpu.set_flag(CARRY_FLAG, false);
        assert!(!cpu.get_flag(CARRY_FLAG));
        assert_eq!(cpu.status, NEGATIVE_FLAG);
    }

    #[test]
    fn test_negative_flag_uses_bit_seven() {
        let mut cpu = CPU::new();
        cpu.update_zero_and_negative_flags(0x80);
        assert!(cpu.get_flag(NEGATIVE_FLAG));
        assert!(!cpu.get_flag(ZERO_FLAG));

        cpu.update_zero_and_negative_flags(0x7F);
        assert!(!cpu.get_flag(NEGATIVE_FLAG));

        cpu.update_zero_and_negative_flags(0x00);
        assert!(cpu.get_flag(ZERO_FLAG));
        assert!(!cpu.get_flag(NEGATIVE_FLAG));
    }
}
