use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::{
    box_encoder::encode_box,
    decoder::Decoder,
    errors::ConvertError,
    raster::Raster,
    rle_encoder::encode_rle,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pgm,
    Sketch,
}

impl FileType {
    /// Recognises `name.pgm` and `name.sk`; a bare `.pgm` has no name and is rejected.
    pub fn detect(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "pgm" => Some(FileType::Pgm),
            "sk" => Some(FileType::Sketch),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FileType::Pgm => "pgm",
            FileType::Sketch => "sk",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    Box,
    Rle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    pub algorithm: Algorithm,
    /// Draw one column wide boxes as lines (BOX only).
    pub lines: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Box,
            lines: true,
        }
    }
}

pub fn encode(raster: &Raster, options: EncodeOptions) -> Vec<u8> {
    match options.algorithm {
        Algorithm::Box => encode_box(raster, options.lines),
        Algorithm::Rle => encode_rle(raster),
    }
}

/// `input` with its extension swapped for the one of `to`.
pub fn output_path(input: &Path, to: FileType) -> PathBuf {
    input.with_extension(to.extension())
}

/// Converts a `.pgm` into a `.sk` or a `.sk` into a `.pgm`, next to the input.
pub fn convert(input: &Path, options: EncodeOptions) -> Result<PathBuf, ConvertError> {
    match FileType::detect(input) {
        Some(FileType::Pgm) => convert_to_sketch(input, options),
        Some(FileType::Sketch) => convert_to_pgm(input),
        None => Err(ConvertError::UnsupportedFile(input.to_path_buf())),
    }
}

pub fn convert_to_sketch(input: &Path, options: EncodeOptions) -> Result<PathBuf, ConvertError> {
    let raster = Raster::read_pgm(fs::File::open(input)?)?;
    let bytes = encode(&raster, options);
    debug!("{:?} encoded {} to {} bytes", options.algorithm, input.display(), bytes.len());

    let out = output_path(input, FileType::Sketch);
    write_atomically(&out, |writer| writer.write_all(&bytes))?;
    info!("wrote {}", out.display());

    Ok(out)
}

pub fn convert_to_pgm(input: &Path) -> Result<PathBuf, ConvertError> {
    let bytes = fs::read(input)?;

    let mut raster = Raster::default();
    let mut decoder = Decoder::new(&mut raster);
    if let Err(source) = decoder.run(&bytes) {
        return Err(ConvertError::Decode {
            offset: decoder.offset(),
            source,
        });
    }

    let out = output_path(input, FileType::Pgm);
    write_atomically(&out, |writer| raster.write_pgm(writer))?;
    info!("wrote {}", out.display());

    Ok(out)
}

/// Writes through a temporary file in the destination directory, so a failed
/// conversion never leaves a partial output behind.
fn write_atomically<F>(path: &Path, write: F) -> Result<(), ConvertError>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(&mut temp);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|err| err.error)?;

    Ok(())
}
