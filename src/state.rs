use serde::{Deserialize, Serialize};

use crate::cpu::CPU;

/// Serializable capture of the CPU register file.
///
/// Embedders that checkpoint execution can capture the registers, serialize
/// them however they like, and later restore them onto a CPU. Memory
/// contents are the caller's to save alongside; the core itself performs no
/// I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
    pub sp: u8,
    pub status: u8,
    pub cycles: u64,
}

impl CPU {
    /// Captures the current register file.
    pub fn capture(&self) -> CpuState {
        CpuState {
            a: self.a,
            x: self.x,
            y: self.y,
            pc: self.pc,
            sp: self.sp,
            status: self.status,
            cycles: self.cycles,
        }
    }

    /// Restores a previously captured register file.
    pub fn restore(&mut self, state: &CpuState) {
        self.a = state.a;
        self.x = state.x;
        self.y = state.y;
        self.pc = state.pc;
        self.sp = state.sp;
        self.status = state.status;
        self.cycles = state.cycles;
    }
}
