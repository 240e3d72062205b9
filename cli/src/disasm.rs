use colors_transform::Rgb;
use sketch_model::{
    rgba_to_greyscale, signed_operand, unsigned_operand, Instruction, Opcode, Tool, DATA_BITS,
};

/// One line of an instruction listing.
#[derive(Debug, PartialEq, Serialize)]
pub struct Row {
    pub offset: usize,
    pub byte: String,
    pub opcode: Opcode,
    pub operand: i32,
    pub text: String,
    /// Colour selected by a `SetColour`, as CSS hex.
    pub colour: Option<String>,
}

pub fn disassemble(bytes: &[u8]) -> Vec<Row> {
    let mut data: u32 = 0;

    bytes
        .iter()
        .enumerate()
        .map(|(offset, &byte)| {
            let instruction = Instruction::decode(byte);
            let mut colour = None;

            let operand = match instruction {
                Instruction::MoveX(_) | Instruction::MoveY(_) => i32::from(signed_operand(byte)),
                _ => i32::from(unsigned_operand(byte)),
            };

            match instruction {
                Instruction::Data(chunk) => data = (data << DATA_BITS) | u32::from(chunk),
                Instruction::Tool(tool) => {
                    if tool == Tool::SetColour {
                        colour = Some(css_hex(rgba_to_greyscale(data)));
                    }
                    data = 0;
                }
                _ => {}
            }

            Row {
                offset,
                byte: format!("{:#04x}", byte),
                opcode: instruction.opcode(),
                operand,
                text: instruction.to_string(),
                colour,
            }
        })
        .collect()
}

fn css_hex(grey: u8) -> String {
    let g = f32::from(grey);
    Rgb::from(g, g, g).to_css_hex_string()
}
