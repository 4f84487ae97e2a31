//! # MOS 6502 CPU Core
//!
//! A fetch-decode-execute core for the MOS 6502 8-bit microprocessor.
//! The crate models the register file, status flags, addressing-mode
//! arithmetic, and per-instruction clock-cycle accounting of the real part,
//! against a flat 64KB memory image owned by the caller.
//!
//! ## Features
//!
//! - Bounds-checked 64KB memory with little-endian word writes
//! - Table-driven opcode dispatch (unpopulated opcodes are reported, never
//!   silently skipped)
//! - Cycle-budgeted execution: `execute` runs whole instructions until the
//!   budget is spent, completing the instruction in flight even when it
//!   overshoots the request
//! - Descending page-1 stack with push/pop primitives
//! - Prometheus counters for executed instructions, cycles, and resets
//!
//! ## Example
//!
//! ```rust
//! use mos6502_core::{CPU, Memory, NEGATIVE_FLAG, ZERO_FLAG};
//!
//! let mut cpu = CPU::new();
//! let mut memory = Memory::new();
//!
//! // Reset puts PC at 0xFFFC and clears memory, so seed the program after.
//! cpu.reset(&mut memory);
//! memory.write(0xFFFC, 0xA9).unwrap(); // LDA #$42
//! memory.write(0xFFFD, 0x42).unwrap();
//!
//! let consumed = cpu.execute(2, &mut memory).unwrap();
//!
//! assert_eq!(cpu.a, 0x42);
//! assert_eq!(consumed, 2);
//! assert!(!cpu.get_flag(ZERO_FLAG));
//! assert!(!cpu.get_flag(NEGATIVE_FLAG));
//! ```

pub mod cpu;
pub mod memory;
pub mod metrics;
pub mod opcodes;
pub mod state;

pub use cpu::{CPU, RESET_SP, RESET_VECTOR, STACK_BASE};
pub use cpu::{
    BREAK_COMMAND, CARRY_FLAG, DECIMAL_MODE, INTERRUPT_DISABLE, NEGATIVE_FLAG, OVERFLOW_FLAG,
    ZERO_FLAG,
};
pub use memory::{Memory, MAX_MEM};
pub use opcodes::{instruction_name, AddressingMode, Opcode, Operation, OPCODE_TABLE};
pub use state::CpuState;

/// Errors surfaced by the memory and execution contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmuError {
    /// A memory access named an address outside the 64KB space.
    ///
    /// No 6502 can address beyond 0xFFFF; this signals a caller bug and is
    /// never clamped or wrapped.
    OutOfRange { addr: u32 },

    /// The fetched opcode byte has no entry in the dispatch table.
    ///
    /// Carries the offending byte and the address it was fetched from.
    /// Execution halts rather than treating the byte as a no-op, which
    /// would corrupt cycle accounting.
    UnrecognizedOpcode { opcode: u8, pc: u16 },
}

impl std::fmt::Display for EmuError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            EmuError::OutOfRange { addr } => {
                write!(f, "memory address ${:06X} is outside the 64KB space", addr)
            }
            EmuError::UnrecognizedOpcode { opcode, pc } => {
                write!(f, "unrecognized opcode ${:02X} at PC ${:04X}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for EmuError {}
