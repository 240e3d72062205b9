use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterError {
    #[error("pgm header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch { expected: String, found: String },
    #[error("expected {expected} pixels after the header, found {found}")]
    PixelCount { expected: usize, found: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Malformed bytecode. Decoding stops at the first of these.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("diagonal lines are not supported: ({x0}, {y0}) to ({x1}, {y1})")]
    DiagonalLine { x0: i32, y0: i32, x1: i32, y1: i32 },
    #[error("drawing at ({x}, {y}) falls outside the canvas")]
    OutOfBounds { x: i32, y: i32 },
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{} is neither a .pgm nor a .sk file", .0.display())]
    UnsupportedFile(PathBuf),
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error("malformed sketch at byte {offset}: {source}")]
    Decode { offset: usize, source: DecodeError },
    #[error(transparent)]
    Io(#[from] io::Error),
}
