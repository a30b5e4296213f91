/// C emitter: handler stubs, gate registrations and prototypes.
mod stubs;
mod writer;

pub use stubs::{emit, emit_to, format_gate, format_handler, format_prototype};
pub use writer::{escape_c, CodeWriter};
