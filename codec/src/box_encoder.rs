use log::{debug, trace};
use sketch_model::{Position, Tool, HEIGHT, WIDTH};

use crate::{
    constants::PIXELS, histogram::ColourHistogram, raster::Raster, sketch_writer::SketchWriter,
};

/// Progress of a single cell while its raster is being encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    /// Still waiting for its colour to be drawn.
    Open,
    /// Covered by a rectangle of the colour being processed.
    Pending,
    /// Drawn by an earlier colour; no later rectangle may cover it.
    Locked,
}

/// Greedy rectangle packer: draws each colour, most frequent first, as a
/// series of rectangles that never cover a cell an earlier colour settled.
///
/// The source raster is only read; progress lives in a separate lock layer.
pub struct BoxEncoder<'r> {
    raster: &'r Raster,
    cells: Vec<Cell>,
    writer: SketchWriter,
    cursor: Position,
    lines: bool,
}

impl<'r> BoxEncoder<'r> {
    /// `lines` lets one column wide rectangles be drawn as lines, which is one
    /// instruction shorter.
    pub fn new(raster: &'r Raster, lines: bool) -> Self {
        Self {
            raster,
            cells: vec![Cell::Open; PIXELS],
            writer: SketchWriter::new(),
            cursor: Position::default(),
            lines,
        }
    }

    pub fn encode(mut self) -> Vec<u8> {
        let histogram = ColourHistogram::from_raster(self.raster);

        for (rank, entry) in histogram
            .by_frequency()
            .into_iter()
            .enumerate()
            .filter(|(_, entry)| entry.count > 0)
        {
            let before = self.writer.len();
            self.writer.colour(entry.grey);

            if rank == 0 {
                self.fill_background(entry.grey);
            } else {
                self.fill_colour(entry.grey);
            }
            self.finalise();

            debug!(
                "colour {} ({} px) took {} bytes",
                entry.grey,
                entry.count,
                self.writer.len() - before
            );
        }

        self.writer.into_bytes()
    }

    fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[y * WIDTH + x]
    }

    fn is_locked(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) == Cell::Locked
    }

    /// A cell of `grey` that no rectangle has covered yet.
    fn is_unfilled(&self, x: usize, y: usize, grey: u8) -> bool {
        self.cell(x, y) == Cell::Open && self.raster.get(x, y) == grey
    }

    /// The most frequent colour covers the whole canvas in one block.
    fn fill_background(&mut self, grey: u8) {
        let end = Position::new(WIDTH as u8, HEIGHT as u8);

        self.writer.tool(Tool::Block);
        self.mark_pending(grey, Position::default(), end);
        self.writer.change_position(&mut self.cursor, end, true);
    }

    fn fill_colour(&mut self, grey: u8) {
        let mut from = 0;

        while let Some((start, index)) = self.find_pixel(grey, from) {
            from = index;

            if self.cursor != start {
                self.writer.tool(Tool::None);
                self.writer.change_position(&mut self.cursor, start, false);
            }

            let end = self.find_best_rectangle(start, grey);
            self.mark_pending(grey, start, end);

            let target = if self.lines && end.x == start.x + 1 {
                self.writer.tool(Tool::Line);
                Position::new(end.x - 1, end.y - 1)
            } else {
                self.writer.tool(Tool::Block);
                end
            };
            self.writer.change_position(&mut self.cursor, target, true);

            trace!("colour {}: ({}, {}) to ({}, {})", grey, start.x, start.y, end.x, end.y);
        }
    }

    /// First unfilled pixel of `grey`, reading each column top to bottom and
    /// the columns left to right, starting at column-major index `from`.
    fn find_pixel(&self, grey: u8, from: usize) -> Option<(Position, usize)> {
        (from..PIXELS)
            .map(|index| (index / HEIGHT, index % HEIGHT, index))
            .find(|(x, y, _)| self.is_unfilled(*x, *y, grey))
            .map(|(x, y, index)| (Position::new(x as u8, y as u8), index))
    }

    /// Exclusive end of the rectangle anchored at `start` that covers the most
    /// unfilled `grey` pixels without touching a locked cell.
    ///
    /// Widths grow until the anchor row hits a locked cell; for each width the
    /// height grows until a row hits one. Only a strictly better count
    /// replaces the current best.
    fn find_best_rectangle(&self, start: Position, grey: u8) -> Position {
        let (sx, sy) = (usize::from(start.x), usize::from(start.y));

        // Per-row totals for the columns sx..=x seen so far
        let mut row_counts = [0u32; HEIGHT];
        let mut row_locked = [false; HEIGHT];

        let mut best = 0;
        let mut end = Position::new(start.x + 1, start.y + 1);

        for x in sx..WIDTH {
            if self.is_locked(x, sy) {
                break;
            }

            let mut count = 0;
            for y in sy..HEIGHT {
                if self.is_locked(x, y) {
                    row_locked[y] = true;
                }
                if row_locked[y] {
                    break;
                }

                if self.is_unfilled(x, y, grey) {
                    row_counts[y] += 1;
                }
                count += row_counts[y];

                if count > best {
                    best = count;
                    end = Position::new((x + 1) as u8, (y + 1) as u8);
                }
            }
        }

        end
    }

    fn mark_pending(&mut self, grey: u8, start: Position, end: Position) {
        for y in usize::from(start.y)..usize::from(end.y) {
            for x in usize::from(start.x)..usize::from(end.x) {
                if self.is_unfilled(x, y, grey) {
                    self.cells[y * WIDTH + x] = Cell::Pending;
                }
            }
        }
    }

    /// Settles every pending cell so later colours leave it alone.
    fn finalise(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| **cell == Cell::Pending) {
            *cell = Cell::Locked;
        }
    }
}

pub fn encode_box(raster: &Raster, lines: bool) -> Vec<u8> {
    BoxEncoder::new(raster, lines).encode()
}
