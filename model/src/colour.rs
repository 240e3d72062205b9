use crate::{Instruction, Tool, DATA_BITS, DATA_MAX};

/// Number of data chunks needed to carry a 32-bit colour.
const COLOUR_CHUNKS: u32 = 6;

/// Expands a grey level into the RGBA value used on the wire (alpha is always 0xff).
pub fn greyscale_to_rgba(grey: u8) -> u32 {
    let g = u32::from(grey);
    (g << 24) | (g << 16) | (g << 8) | 0xff
}

/// Inverse of [`greyscale_to_rgba`]: reads the blue lane.
pub fn rgba_to_greyscale(rgba: u32) -> u8 {
    ((rgba >> 8) & 0xff) as u8
}

/// Appends the instructions that load `rgba` into the accumulator and make it
/// the active colour.
///
/// The topmost chunk only holds two bits and is dropped when it is zero; every
/// other chunk is always written, zero or not.
pub fn encode_colour(out: &mut Vec<u8>, rgba: u32) {
    for i in (0..COLOUR_CHUNKS).rev() {
        let chunk = ((rgba >> (i * DATA_BITS)) & u32::from(DATA_MAX)) as u8;

        if chunk != 0 || i != COLOUR_CHUNKS - 1 {
            out.push(Instruction::Data(chunk).encode());
        }
    }

    out.push(Instruction::Tool(Tool::SetColour).encode());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_grey_levels() {
        assert_eq!(greyscale_to_rgba(0), 0x0000_00ff);
        assert_eq!(greyscale_to_rgba(255), 0xffff_ffff);
        assert_eq!(greyscale_to_rgba(100), 0x6464_64ff);
    }

    #[test]
    fn extracts_grey_levels() {
        assert_eq!(rgba_to_greyscale(0x0000_00ff), 0);
        assert_eq!(rgba_to_greyscale(0x4444_44ff), 0x44);
        assert_eq!(rgba_to_greyscale(0xffff_ffff), 0xff);
    }

    #[test]
    fn grey_survives_rgba() {
        for grey in 0..=u8::MAX {
            assert_eq!(rgba_to_greyscale(greyscale_to_rgba(grey)), grey);
        }
    }

    #[test]
    fn encodes_colour_chunks() {
        let mut out = Vec::new();
        encode_colour(&mut out, 0x0000_00ff);
        encode_colour(&mut out, 0xffff_ffff);
        encode_colour(&mut out, 0x6464_64ff);

        assert_eq!(
            out,
            vec![
                0xc0, 0xc0, 0xc0, 0xc3, 0xff, 0x83, //
                0xc3, 0xff, 0xff, 0xff, 0xff, 0xff, 0x83, //
                0xc1, 0xe4, 0xd9, 0xc6, 0xd3, 0xff, 0x83,
            ]
        );
    }
}
