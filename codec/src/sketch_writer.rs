use sketch_model::{encode_colour, greyscale_to_rgba, Instruction, Tool};

/// Growing buffer of instruction bytes.
#[derive(Debug, Default, Clone)]
pub struct SketchWriter {
    bytes: Vec<u8>,
}

impl SketchWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.bytes.push(instruction.encode());
    }

    pub fn tool(&mut self, tool: Tool) {
        self.push(Instruction::Tool(tool));
    }

    pub fn colour(&mut self, grey: u8) {
        encode_colour(&mut self.bytes, greyscale_to_rgba(grey));
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
