use sketch_model::{HEIGHT, WIDTH};

/// The only raster header accepted or produced.
pub const PGM_HEADER: &[u8] = b"P5 200 200 255\n";

pub const PIXELS: usize = WIDTH * HEIGHT;

/// Grey level a decoded raster starts out with before any instruction runs.
pub const BLANK: u8 = 0xff;

/// Colour the decoder draws with until the first `SetColour`.
pub const INITIAL_COLOUR: u8 = 0;
