use image::{Rgba, RgbaImage};
use log::{debug, trace};
use sketch_codec::{Canvas, Cells, DecodeError, BLANK, INITIAL_COLOUR};
use sketch_model::{greyscale_to_rgba, HEIGHT, WIDTH};

fn pixel(grey: u8) -> Rgba<u8> {
    Rgba(greyscale_to_rgba(grey).to_be_bytes())
}

/// What the surface looked like when a sketch asked for it to be shown.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub image: RgbaImage,
    /// Pauses requested after this snapshot and before the next one.
    pub hold_ms: u32,
}

/// Drawing surface backed by an RGBA image.
///
/// Every `Show` copies the surface into a [`Snapshot`]; pauses extend the
/// hold time of the latest one. Pauses before the first `Show` are kept as
/// the lead-in.
#[derive(Debug)]
pub struct SurfaceCanvas {
    surface: RgbaImage,
    ink: u8,
    snapshots: Vec<Snapshot>,
    lead_in_ms: u32,
}

impl SurfaceCanvas {
    pub fn new() -> Self {
        Self::with_background(BLANK)
    }

    pub fn with_background(grey: u8) -> Self {
        Self {
            surface: RgbaImage::from_pixel(WIDTH as u32, HEIGHT as u32, pixel(grey)),
            ink: INITIAL_COLOUR,
            snapshots: Vec::new(),
            lead_in_ms: 0,
        }
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn lead_in_ms(&self) -> u32 {
        self.lead_in_ms
    }

    /// Colour most recently selected by the sketch.
    pub fn ink(&self) -> u8 {
        self.ink
    }

    /// Grey level at `(x, y)`, read back from the blue lane.
    pub fn grey_at(&self, x: u32, y: u32) -> u8 {
        self.surface.get_pixel(x, y).0[2]
    }

    fn paint(&mut self, grey: u8, cells: Cells) {
        let colour = pixel(grey);
        for y in cells.y0..cells.y1 {
            for x in cells.x0..cells.x1 {
                self.surface.put_pixel(x as u32, y as u32, colour);
            }
        }
    }
}

impl Default for SurfaceCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for SurfaceCanvas {
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
            trace!("fill {}x{} at ({}, {})", cells.width(), cells.height(), x, y);
            self.paint(colour, cells);
        }
        Ok(())
    }

    fn set_colour(&mut self, colour: u8) {
        self.ink = colour;
    }

    fn present(&mut self) {
        debug!("snapshot {}", self.snapshots.len());
        self.snapshots.push(Snapshot {
            image: self.surface.clone(),
            hold_ms: 0,
        });
    }

    fn pause(&mut self, ms: u32) {
        match self.snapshots.last_mut() {
            Some(last) => last.hold_ms = last.hold_ms.saturating_add(ms),
            None => self.lead_in_ms = self.lead_in_ms.saturating_add(ms),
        }
    }
}
