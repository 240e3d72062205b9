use std::io::{Read, Write};

use sketch_model::{HEIGHT, WIDTH};

use crate::{
    constants::{BLANK, PGM_HEADER, PIXELS},
    decoder::{Canvas, Cells},
    errors::{DecodeError, RasterError},
};

/// A 200x200 greyscale image stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: Vec<u8>,
}

impl Raster {
    pub fn filled(grey: u8) -> Self {
        Self {
            pixels: vec![grey; PIXELS],
        }
    }

    pub fn from_pixels(pixels: Vec<u8>) -> Result<Self, RasterError> {
        if pixels.len() != PIXELS {
            return Err(RasterError::PixelCount {
                expected: PIXELS,
                found: pixels.len(),
            });
        }

        Ok(Self { pixels })
    }

    /// Reads a binary PGM. Only the exact `P5 200 200 255` header is accepted.
    pub fn read_pgm<R: Read>(mut reader: R) -> Result<Self, RasterError> {
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;

        if !buf.starts_with(PGM_HEADER) {
            let line_end = buf
                .iter()
                .take(PGM_HEADER.len())
                .position(|b| *b == b'\n')
                .map_or(buf.len().min(PGM_HEADER.len()), |i| i + 1);

            return Err(RasterError::HeaderMismatch {
                expected: String::from_utf8_lossy(PGM_HEADER).into_owned(),
                found: String::from_utf8_lossy(&buf[..line_end]).into_owned(),
            });
        }

        Self::from_pixels(buf.split_off(PGM_HEADER.len()))
    }

    pub fn write_pgm<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(PGM_HEADER)?;
        writer.write_all(&self.pixels)?;
        writer.flush()
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * WIDTH + x]
    }

    pub fn set(&mut self, x: usize, y: usize, grey: u8) {
        self.pixels[y * WIDTH + x] = grey;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn paint(&mut self, grey: u8, cells: Cells) {
        for y in cells.y0..cells.y1 {
            self.pixels[y * WIDTH + cells.x0..y * WIDTH + cells.x1].fill(grey);
        }
    }
}

impl Default for Raster {
    fn default() -> Self {
        Self::filled(BLANK)
    }
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &WIDTH)
            .field("height", &HEIGHT)
            .finish_non_exhaustive()
    }
}

impl Canvas for Raster {
    fn draw_line(
        &mut self,
        colour: u8,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> Result<(), DecodeError> {
        let cells = Cells::line(x0, y0, x1, y1)?;
        self.paint(colour, cells);
        Ok(())
    }

    fn fill_rect(
        &mut self,
        colour: u8,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), DecodeError> {
        if let Some(cells) = Cells::rect(x, y, width, height)? {
            self.paint(colour, cells);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pgm_bytes(pixels: &[u8]) -> Vec<u8> {
        let mut bytes = PGM_HEADER.to_vec();
        bytes.extend_from_slice(pixels);
        bytes
    }

    #[test]
    fn reads_pixels_row_major() {
        let mut pixels = vec![7u8; PIXELS];
        pixels[WIDTH + 3] = 42;

        let raster = Raster::read_pgm(pgm_bytes(&pixels).as_slice()).unwrap();

        assert_eq!(raster.get(3, 1), 42);
        assert_eq!(raster.get(1, 3), 7);
        assert_eq!(raster.pixels()[WIDTH + 3], 42);
    }

    #[test]
    fn rejects_other_headers() {
        let mut bytes = b"P5 100 100 255\n".to_vec();
        bytes.extend(vec![0u8; PIXELS]);

        match Raster::read_pgm(bytes.as_slice()) {
            Err(RasterError::HeaderMismatch { found, .. }) => assert_eq!(found, "P5 100 100 255\n"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_short_and_long_bodies() {
        let short = pgm_bytes(&vec![0u8; PIXELS - 1]);
        assert!(matches!(
            Raster::read_pgm(short.as_slice()),
            Err(RasterError::PixelCount { found, .. }) if found == PIXELS - 1
        ));

        let long = pgm_bytes(&vec![0u8; PIXELS + 1]);
        assert!(Raster::read_pgm(long.as_slice()).is_err());
    }

    #[test]
    fn writes_what_it_reads() {
        let pixels: Vec<u8> = (0..PIXELS).map(|i| (i % 251) as u8).collect();
        let bytes = pgm_bytes(&pixels);

        let mut written = Vec::new();
        Raster::read_pgm(bytes.as_slice())
            .unwrap()
            .write_pgm(&mut written)
            .unwrap();

        assert_eq!(written, bytes);
    }

    #[test]
    fn draws_vertical_and_horizontal_lines() {
        let mut raster = Raster::filled(0xff);
        raster.draw_line(0, 1, 1, 1, 11).unwrap();

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let expected = if x == 1 && (1..=11).contains(&y) { 0 } else { 0xff };
                assert_eq!(raster.get(x, y), expected, "({}, {})", x, y);
            }
        }

        let mut raster = Raster::filled(0xff);
        raster.draw_line(100, 1, 1, 11, 1).unwrap();

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let expected = if y == 1 && (1..=11).contains(&x) { 100 } else { 0xff };
                assert_eq!(raster.get(x, y), expected, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn fills_boxes_with_exclusive_end() {
        let mut raster = Raster::filled(0xff);
        raster.fill_rect(0, 1, 1, 10, 10).unwrap();

        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let inside = (1..11).contains(&x) && (1..11).contains(&y);
                assert_eq!(raster.get(x, y), if inside { 0 } else { 0xff });
            }
        }
    }

    #[test]
    fn refuses_to_draw_off_canvas() {
        let mut raster = Raster::filled(0xff);

        assert_eq!(
            raster.draw_line(0, 5, 190, 5, 200),
            Err(DecodeError::OutOfBounds { x: 5, y: 200 })
        );
        assert!(raster.fill_rect(0, -1, 0, 2, 2).is_err());
        assert_eq!(raster, Raster::filled(0xff));
    }
}
