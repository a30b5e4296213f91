//! C fragments for the kernel's generated interrupt vectors, produced from
//! `stubgen.json` at build time.

/// Handler definitions, one `void interrupt_handler_N(void)` per vector.
pub const HANDLERS: &str = include_str!(concat!(env!("OUT_DIR"), "/interrupt_handlers.c"));

/// `SET_INTERRUPT_GATE` registrations, meant for the body of the IDT setup function.
pub const GATES: &str = include_str!(concat!(env!("OUT_DIR"), "/interrupt_gates.c"));

/// Prototypes for `HANDLERS`.
pub const PROTOTYPES: &str = include_str!(concat!(env!("OUT_DIR"), "/interrupt_handlers.h"));

/// Handlers followed by gates, the same text `idt-stubgen` prints by default.
pub fn combined() -> String {
    let mut out = String::with_capacity(HANDLERS.len() + GATES.len());
    out.push_str(HANDLERS);
    out.push_str(GATES);
    out
}

/// Number of vectors covered by the generated fragments.
pub fn vector_count() -> usize {
    GATES.lines().count()
}
