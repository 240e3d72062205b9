use log::warn;
use sketch_model::{rgba_to_greyscale, Instruction, Tool, DATA_BITS, HEIGHT, WIDTH};

use crate::{constants::INITIAL_COLOUR, errors::DecodeError, raster::Raster};

/// Receiver of the draw calls a sketch produces.
///
/// Coordinates arrive exactly as the bytecode computed them; implementations
/// reject anything off the canvas with [`DecodeError::OutOfBounds`].
pub trait Canvas {
    /// Axis-aligned segment, both ends inclusive.
    fn draw_line(&mut self, colour: u8, x0: i32, y0: i32, x1: i32, y1: i32)
        -> Result<(), DecodeError>;

    /// Rectangle of `width` x `height` cells at `(x, y)`. Empty when either is not positive.
    fn fill_rect(
        &mut self,
        colour: u8,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<(), DecodeError>;

    fn set_colour(&mut self, _colour: u8) {}

    fn present(&mut self) {}

    fn pause(&mut self, _ms: u32) {}
}

/// Half-open range of canvas cells, checked against the canvas bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cells {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl Cells {
    /// Cells covered by a segment between two inclusive end points.
    pub fn line(x0: i32, y0: i32, x1: i32, y1: i32) -> Result<Self, DecodeError> {
        Self::checked(
            x0.min(x1),
            y0.min(y1),
            x0.max(x1).saturating_add(1),
            y0.max(y1).saturating_add(1),
        )
    }

    pub fn rect(x: i32, y: i32, width: i32, height: i32) -> Result<Option<Self>, DecodeError> {
        if width <= 0 || height <= 0 {
            return Ok(None);
        }
        Self::checked(x, y, x.saturating_add(width), y.saturating_add(height)).map(Some)
    }

    fn checked(x0: i32, y0: i32, x1: i32, y1: i32) -> Result<Self, DecodeError> {
        let in_range = |v: i32, limit: usize| v >= 0 && (v as usize) <= limit;

        if !in_range(x0, WIDTH - 1) || !in_range(y0, HEIGHT - 1) {
            return Err(DecodeError::OutOfBounds { x: x0, y: y0 });
        }
        if !in_range(x1, WIDTH) || !in_range(y1, HEIGHT) {
            return Err(DecodeError::OutOfBounds {
                x: x1 - 1,
                y: y1 - 1,
            });
        }

        Ok(Self {
            x0: x0 as usize,
            y0: y0 as usize,
            x1: x1 as usize,
            y1: y1 as usize,
        })
    }

    pub fn width(&self) -> usize {
        self.x1 - self.x0
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderState {
    pub current: Point,
    pub target: Point,
    /// Only ever `None`, `Line` or `Block`.
    pub tool: Tool,
    pub colour: u8,
    pub data: u32,
    pub end: bool,
}

impl Default for DecoderState {
    fn default() -> Self {
        Self {
            current: Point::default(),
            target: Point::default(),
            tool: Tool::Line,
            colour: INITIAL_COLOUR,
            data: 0,
            end: false,
        }
    }
}

/// Replays instruction bytes onto a [`Canvas`].
pub struct Decoder<'c, C: Canvas> {
    state: DecoderState,
    canvas: &'c mut C,
    offset: usize,
}

impl<'c, C: Canvas> Decoder<'c, C> {
    pub fn new(canvas: &'c mut C) -> Self {
        Self {
            state: DecoderState::default(),
            canvas,
            offset: 0,
        }
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    /// Index of the next byte to obey. After an error, the byte that failed.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Executes a single instruction.
    pub fn obey(&mut self, instruction: Instruction) -> Result<(), DecodeError> {
        let s = &mut self.state;

        match instruction {
            Instruction::MoveX(delta) => s.target.x = s.target.x.wrapping_add(i32::from(delta)),
            Instruction::MoveY(delta) => {
                s.target.y = s.target.y.wrapping_add(i32::from(delta));
                let (from, to) = (s.current, s.target);

                match s.tool {
                    Tool::Line => {
                        if from.x != to.x && from.y != to.y {
                            return Err(DecodeError::DiagonalLine {
                                x0: from.x,
                                y0: from.y,
                                x1: to.x,
                                y1: to.y,
                            });
                        }
                        self.canvas
                            .draw_line(s.colour, from.x, from.y, to.x, to.y)?;
                    }
                    Tool::Block => {
                        self.canvas.fill_rect(
                            s.colour,
                            from.x,
                            from.y,
                            to.x.wrapping_sub(from.x),
                            to.y.wrapping_sub(from.y),
                        )?;
                    }
                    _ => {}
                }

                s.current = s.target;
            }
            Instruction::Tool(tool) => {
                match tool {
                    Tool::None | Tool::Line | Tool::Block => s.tool = tool,
                    Tool::SetColour => {
                        s.colour = rgba_to_greyscale(s.data);
                        self.canvas.set_colour(s.colour);
                    }
                    Tool::SetTargetX => s.target.x = s.data as i32,
                    Tool::SetTargetY => s.target.y = s.data as i32,
                    Tool::Show => self.canvas.present(),
                    Tool::Pause => self.canvas.pause(s.data),
                    Tool::NextFrame => s.end = true,
                    Tool::Unknown(operand) => {
                        warn!("ignoring unknown tool {} at byte {}", operand, self.offset)
                    }
                }
                s.data = 0;
            }
            Instruction::Data(chunk) => s.data = (s.data << DATA_BITS) | u32::from(chunk),
        }

        Ok(())
    }

    /// Obeys every remaining byte. A `NextFrame` does not stop the run.
    pub fn run(&mut self, bytes: &[u8]) -> Result<(), DecodeError> {
        while let Some(byte) = bytes.get(self.offset) {
            self.obey(Instruction::decode(*byte))?;
            self.offset += 1;
        }
        Ok(())
    }

    /// Obeys bytes until a `NextFrame` is reached or the stream runs out.
    ///
    /// Returns whether the frame ended on a `NextFrame`; [`Decoder::offset`]
    /// then points just past it.
    pub fn run_frame(&mut self, bytes: &[u8]) -> Result<bool, DecodeError> {
        while !self.state.end {
            let Some(byte) = bytes.get(self.offset) else {
                break;
            };
            self.obey(Instruction::decode(*byte))?;
            self.offset += 1;
        }
        Ok(self.state.end)
    }
}

/// Decodes a complete sketch onto a fresh raster.
pub fn decode(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let mut raster = Raster::default();
    Decoder::new(&mut raster).run(bytes)?;
    Ok(raster)
}
