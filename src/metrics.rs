use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Counter for CPU instructions executed by opcode
    pub static ref CPU_INSTRUCTIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("cpu_instructions_total", "Total number of CPU instructions executed by opcode"),
        &["opcode", "instruction"]
    ).expect("Failed to create CPU instructions counter");

    /// Counter for CPU cycles executed
    pub static ref CPU_CYCLES_TOTAL: Counter = Counter::new(
        "cpu_cycles_total", "Total number of CPU cycles executed"
    ).expect("Failed to create CPU cycles counter");

    /// Counter for CPU resets
    pub static ref CPU_RESETS_TOTAL: Counter = Counter::new(
        "cpu_resets_total", "Total number of CPU resets"
    ).expect("Failed to create CPU resets counter");

    /// Counter for opcode bytes with no dispatch entry
    pub static ref UNRECOGNIZED_OPCODES_TOTAL: CounterVec = CounterVec::new(
        Opts::new("unrecognized_opcodes_total", "Total number of unrecognized opcode fetches"),
        &["opcode"]
    ).expect("Failed to create unrecognized opcodes counter");
}

/// Initialize Prometheus metrics by registering them with the global registry
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(CPU_INSTRUCTIONS_TOTAL.clone()))
        .expect("Failed to register CPU instructions counter");

    REGISTRY
        .register(Box::new(CPU_CYCLES_TOTAL.clone()))
        .expect("Failed to register CPU cycles counter");

    REGISTRY
        .register(Box::new(CPU_RESETS_TOTAL.clone()))
        .expect("Failed to register CPU resets counter");

    REGISTRY
        .register(Box::new(UNRECOGNIZED_OPCODES_TOTAL.clone()))
        .expect("Failed to register unrecognized opcodes counter");
}

/// Record a completed instruction and the cycles it consumed
pub fn record_instruction(opcode: u8, instruction_name: &str, cycles: u64) {
    CPU_INSTRUCTIONS_TOTAL
        .with_label_values(&[&format!("0x{:02X}", opcode), instruction_name])
        .inc();

    CPU_CYCLES_TOTAL.inc_by(cycles as f64);
}

/// Record a CPU reset
pub fn record_reset() {
    CPU_RESETS_TOTAL.inc();
}

/// Record a fetch of an opcode byte with no dispatch entry
pub fn record_unrecognized_opcode(opcode: u8) {
    UNRECOGNIZED_OPCODES_TOTAL
        .with_label_values(&[&format!("0x{:02X}", opcode)])
        .inc();
}
