use sketch_model::{Axis, Instruction, Tool, HEIGHT, WIDTH};

use crate::{constants::INITIAL_COLOUR, raster::Raster, sketch_writer::SketchWriter};

/// Encodes the raster as vertical runs, one column at a time.
///
/// Simple and predictable, but usually larger than [`crate::encode_box`].
pub fn encode_rle(raster: &Raster) -> Vec<u8> {
    let mut writer = SketchWriter::new();
    let mut active = INITIAL_COLOUR;

    for x in 0..WIDTH {
        let top = raster.get(x, 0);
        if top != active {
            active = top;
            writer.colour(active);
        }

        // Each run is drawn as a line that also touches the first pixel of the
        // next run; that pixel is painted over when its own run is drawn.
        let mut run = 0;
        for y in 0..HEIGHT {
            let grey = raster.get(x, y);
            if grey != active {
                writer.move_by(run, Axis::Y);
                run = 1;
                active = grey;
                writer.colour(active);
            } else {
                run += 1;
            }
        }
        writer.move_by(run - 1, Axis::Y);

        if x + 1 < WIDTH {
            next_column(&mut writer);
        }
    }

    writer.into_bytes()
}

/// Jumps to the top of the next column without drawing.
fn next_column(writer: &mut SketchWriter) {
    writer.tool(Tool::None);
    writer.tool(Tool::SetTargetY);
    writer.push(Instruction::MoveX(1));
    writer.push(Instruction::MoveY(0));
    writer.tool(Tool::Line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;

    #[test]
    fn solid_black_is_one_line_per_column() {
        let bytes = encode_rle(&Raster::filled(0));

        // Each column is six full steps and one of 13; 199 resets of 5 bytes between
        let mut column = vec![0x5fu8; 6];
        column.push(0x4d);
        assert_eq!(&bytes[..7], column.as_slice());
        assert_eq!(&bytes[7..12], &[0x80, 0x85, 0x01, 0x40, 0x81]);
        assert_eq!(bytes.len(), 200 * 7 + 199 * 5);
        assert_eq!(decode(&bytes).unwrap(), Raster::filled(0));
    }

    #[test]
    fn switches_colour_mid_column() {
        let mut raster = Raster::filled(0);
        raster.set(0, 10, 100);
        raster.set(0, 199, 7);

        let bytes = encode_rle(&raster);

        let mut expected = vec![0x4a];
        sketch_model::encode_colour(&mut expected, sketch_model::greyscale_to_rgba(100));
        expected.push(0x41);
        sketch_model::encode_colour(&mut expected, sketch_model::greyscale_to_rgba(0));
        expected.extend([0x5f, 0x5f, 0x5f, 0x5f, 0x5f, 0x5f, 0x42]);
        sketch_model::encode_colour(&mut expected, sketch_model::greyscale_to_rgba(7));
        expected.push(0x40);

        assert_eq!(&bytes[..expected.len()], expected.as_slice());
        assert_eq!(decode(&bytes).unwrap(), raster);
    }

    #[test]
    fn round_trips_a_gradient() {
        let mut raster = Raster::filled(0);
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                raster.set(x, y, ((x / 7 + y / 3) % 256) as u8);
            }
        }

        assert_eq!(decode(&encode_rle(&raster)).unwrap(), raster);
    }
}
