use std::fmt;

use crate::{DATA_BITS, DATA_MAX, MAX_DELTA, MIN_DELTA};

/// The two most significant bits of an instruction byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    MoveX = 0,
    MoveY = 1,
    Tool = 2,
    Data = 3,
}

impl Opcode {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Opcode::MoveX,
            1 => Opcode::MoveY,
            2 => Opcode::Tool,
            _ => Opcode::Data,
        }
    }
}

/// Operand of a `Tool` instruction.
///
/// Operands outside the known range decode to `Unknown` so that newer
/// bytecode still replays on an older decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    None,
    Line,
    Block,
    SetColour,
    SetTargetX,
    SetTargetY,
    Show,
    Pause,
    NextFrame,
    Unknown(u8),
}

impl Tool {
    pub fn from_operand(operand: u8) -> Self {
        match operand & DATA_MAX {
            0 => Tool::None,
            1 => Tool::Line,
            2 => Tool::Block,
            3 => Tool::SetColour,
            4 => Tool::SetTargetX,
            5 => Tool::SetTargetY,
            6 => Tool::Show,
            7 => Tool::Pause,
            8 => Tool::NextFrame,
            other => Tool::Unknown(other),
        }
    }

    pub fn operand(self) -> u8 {
        match self {
            Tool::None => 0,
            Tool::Line => 1,
            Tool::Block => 2,
            Tool::SetColour => 3,
            Tool::SetTargetX => 4,
            Tool::SetTargetY => 5,
            Tool::Show => 6,
            Tool::Pause => 7,
            Tool::NextFrame => 8,
            Tool::Unknown(operand) => operand & DATA_MAX,
        }
    }
}

/// A single decoded instruction byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    MoveX(i8),
    MoveY(i8),
    Tool(Tool),
    Data(u8),
}

impl Instruction {
    pub fn decode(byte: u8) -> Self {
        match opcode(byte) {
            Opcode::MoveX => Instruction::MoveX(signed_operand(byte)),
            Opcode::MoveY => Instruction::MoveY(signed_operand(byte)),
            Opcode::Tool => Instruction::Tool(Tool::from_operand(unsigned_operand(byte))),
            Opcode::Data => Instruction::Data(unsigned_operand(byte)),
        }
    }

    /// Packs the instruction into its wire byte.
    ///
    /// Move deltas must lie in `-32..=31` and data chunks in `0..=63`; the
    /// operand is masked to six bits either way.
    pub fn encode(self) -> u8 {
        let (opcode, operand) = match self {
            Instruction::MoveX(delta) => {
                debug_assert!((MIN_DELTA..=MAX_DELTA).contains(&i32::from(delta)));
                (Opcode::MoveX, delta as u8)
            }
            Instruction::MoveY(delta) => {
                debug_assert!((MIN_DELTA..=MAX_DELTA).contains(&i32::from(delta)));
                (Opcode::MoveY, delta as u8)
            }
            Instruction::Tool(tool) => (Opcode::Tool, tool.operand()),
            Instruction::Data(chunk) => {
                debug_assert!(chunk <= DATA_MAX);
                (Opcode::Data, chunk)
            }
        };

        ((opcode as u8) << DATA_BITS) | (operand & DATA_MAX)
    }

    pub fn opcode(self) -> Opcode {
        match self {
            Instruction::MoveX(_) => Opcode::MoveX,
            Instruction::MoveY(_) => Opcode::MoveY,
            Instruction::Tool(_) => Opcode::Tool,
            Instruction::Data(_) => Opcode::Data,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveX(delta) => write!(f, "DX {}", delta),
            Instruction::MoveY(delta) => write!(f, "DY {}", delta),
            Instruction::Tool(Tool::Unknown(operand)) => write!(f, "TOOL ?{}", operand),
            Instruction::Tool(tool) => write!(f, "TOOL {:?}", tool),
            Instruction::Data(chunk) => write!(f, "DATA {}", chunk),
        }
    }
}

pub fn opcode(byte: u8) -> Opcode {
    Opcode::from_bits(byte >> DATA_BITS)
}

/// Reads the low six bits as a two's complement value in `-32..=31`.
pub fn signed_operand(byte: u8) -> i8 {
    let raw = unsigned_operand(byte);
    if raw > MAX_DELTA as u8 {
        raw as i8 - 64
    } else {
        raw as i8
    }
}

pub fn unsigned_operand(byte: u8) -> u8 {
    byte & DATA_MAX
}
