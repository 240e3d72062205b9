#[macro_use]
extern crate serde_derive;

mod colour;
mod instruction;
mod position;

pub use crate::colour::{encode_colour, greyscale_to_rgba, rgba_to_greyscale};
pub use crate::instruction::{opcode, signed_operand, unsigned_operand, Instruction, Opcode, Tool};
pub use crate::position::{Axis, Position};

pub const WIDTH: usize = 200;
pub const HEIGHT: usize = 200;

/// Bits carried by a single operand.
pub const DATA_BITS: u32 = 6;
pub const DATA_MAX: u8 = (1 << DATA_BITS) - 1;

/// Largest step a single MoveX/MoveY can carry in either direction.
pub const MIN_DELTA: i32 = -32;
pub const MAX_DELTA: i32 = 31;
