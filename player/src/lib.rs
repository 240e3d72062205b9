use std::path::{Path, PathBuf};

use log::info;
use sketch_codec::{DecodeError, Decoder};
use thiserror::Error;

mod surface_canvas;

pub use crate::surface_canvas::{Snapshot, SurfaceCanvas};

#[derive(Debug, Error)]
#[error("sketch failed at byte {offset}: {source}")]
pub struct PlayError {
    pub offset: usize,
    pub source: DecodeError,
}

/// Result of playing one frame of a sketch.
#[derive(Debug)]
pub struct Playback {
    pub canvas: SurfaceCanvas,
    /// Bytes obeyed, including the closing `NextFrame` if there was one.
    pub consumed: usize,
    /// Whether the frame was closed by a `NextFrame`.
    pub ended: bool,
}

/// Plays the first frame of `bytes` onto a blank surface.
///
/// Anything after a `NextFrame` is left unread.
pub fn play(bytes: &[u8]) -> Result<Playback, PlayError> {
    let mut canvas = SurfaceCanvas::new();
    let mut decoder = Decoder::new(&mut canvas);

    let ended = decoder.run_frame(bytes).map_err(|source| PlayError {
        offset: decoder.offset(),
        source,
    })?;
    let consumed = decoder.offset();

    info!(
        "played {} of {} bytes, {} snapshots, ending on colour {}",
        consumed,
        bytes.len(),
        canvas.snapshots().len(),
        canvas.ink()
    );

    Ok(Playback {
        canvas,
        consumed,
        ended,
    })
}

impl Playback {
    /// Writes every snapshot as `frame-NNN.png` into `dir`.
    pub fn save_snapshots(&self, dir: &Path) -> image::ImageResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for (i, snapshot) in self.canvas.snapshots().iter().enumerate() {
            let path = dir.join(format!("frame-{:03}.png", i));
            snapshot.image.save(&path)?;
            written.push(path);
        }

        Ok(written)
    }
}
