use std::fmt;

use byte_unit::Byte;
use sketch_codec::{encode_box, encode_rle, ColourCount, ColourHistogram, Raster};

const TOP_COLOURS: usize = 5;

pub struct Report {
    pub distinct: usize,
    pub top: Vec<ColourCount>,
    pub box_bytes: usize,
    pub box_without_lines_bytes: usize,
    pub rle_bytes: usize,
}

impl Report {
    pub fn new(raster: &Raster) -> Self {
        let histogram = ColourHistogram::from_raster(raster);
        let top = histogram
            .by_frequency()
            .into_iter()
            .filter(|entry| entry.count > 0)
            .take(TOP_COLOURS)
            .collect();

        Self {
            distinct: histogram.distinct(),
            top,
            box_bytes: encode_box(raster, true).len(),
            box_without_lines_bytes: encode_box(raster, false).len(),
            rle_bytes: encode_rle(raster).len(),
        }
    }
}

fn human(bytes: usize) -> String {
    Byte::from_bytes(bytes as u128)
        .get_appropriate_unit(false)
        .to_string()
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "colours: {}", self.distinct)?;
        for c in &self.top {
            writeln!(f, "  {:>3}: {} pixels", c.grey, c.count)?;
        }
        writeln!(f, "box:            {}", human(self.box_bytes))?;
        writeln!(f, "box (no lines): {}", human(self.box_without_lines_bytes))?;
        write!(f, "rle:            {}", human(self.rle_bytes))
    }
}
