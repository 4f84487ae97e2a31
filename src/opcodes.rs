//! Opcode descriptor table.
//!
//! The 256-entry table is the single source of truth for dispatch: each
//! populated entry names the operation, its addressing mode, the documented
//! hardware cycle count, and the encoded size. Opcodes without an entry are
//! reported as unrecognized by the execute loop — never run as no-ops.

/// How an instruction's operand bytes become an operand value or address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// The fetched byte is the operand itself.
    Immediate,
    /// The fetched byte addresses page 0 (0x00-0xFF) directly.
    ZeroPage,
    /// Zero-page address plus X, wrapping within page 0. The index add
    /// costs one cycle regardless of wrap.
    ZeroPageX,
    /// Full 16-bit little-endian address operand.
    Absolute,
}

/// Operation selector, independent of addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Load accumulator, recomputing the Zero and Negative flags.
    Lda,
    /// Jump to subroutine: push the return address, set PC to the target.
    Jsr,
}

/// Descriptor for one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    /// Three-letter mnemonic, used for metrics labels and diagnostics.
    pub mnemonic: &'static str,
    /// Which operation the handler performs.
    pub operation: Operation,
    /// How the operand bytes are interpreted.
    pub mode: AddressingMode,
    /// Documented hardware cycle count for the full instruction.
    pub cycles: u8,
    /// Encoded size in bytes, opcode included.
    pub size: u8,
}

/// Dispatch table indexed by opcode byte. `None` means unrecognized.
pub const OPCODE_TABLE: [Option<Opcode>; 256] = build_table();

const fn build_table() -> [Option<Opcode>; 256] {
    let mut table: [Option<Opcode>; 256] = [None; 256];

    table[0xA9] = Some(Opcode {
        mnemonic: "LDA",
        operation: Operation::Lda,
        mode: AddressingMode::Immediate,
        cycles: 2,
        size: 2,
    });
    table[0xA5] = Some(Opcode {
        mnemonic: "LDA",
        operation: Operation::Lda,
        mode: AddressingMode::ZeroPage,
        cycles: 3,
        size: 2,
    });
    table[0xB5] = Some(Opcode {
        mnemonic: "LDA",
        operation: Operation::Lda,
        mode: AddressingMode::ZeroPageX,
        cycles: 4,
        size: 2,
    });
    table[0x20] = Some(Opcode {
        mnemonic: "JSR",
        operation: Operation::Jsr,
        mode: AddressingMode::Absolute,
        cycles: 6,
        size: 3,
    });

    table
}

/// Mnemonic for an opcode byte, `"???"` if unrecognized.
pub fn instruction_name(opcode: u8) -> &'static str {
    match OPCODE_TABLE[opcode as usize] {
        Some(entry) => entry.mnemonic,
        None => "???",
    }
}
