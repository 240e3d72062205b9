use crate::{Instruction, Tool};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Relative move of the target along this axis.
    pub fn step(self, delta: i8) -> Instruction {
        match self {
            Axis::X => Instruction::MoveX(delta),
            Axis::Y => Instruction::MoveY(delta),
        }
    }

    /// Tool that loads the accumulator into the target on this axis.
    pub fn target_tool(self) -> Tool {
        match self {
            Axis::X => Tool::SetTargetX,
            Axis::Y => Tool::SetTargetY,
        }
    }
}
