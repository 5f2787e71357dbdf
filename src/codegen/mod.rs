//! Target code generation for a small register machine.
mod assembly;
mod emitter;
mod machine;
mod register_allocator;

pub use assembly::*;
pub use emitter::emit;
pub use machine::*;
