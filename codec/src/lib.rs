mod box_encoder;
mod constants;
mod converter;
mod decoder;
mod errors;
mod histogram;
mod planner;
mod raster;
mod rle_encoder;
mod sketch_writer;

pub use crate::box_encoder::{encode_box, BoxEncoder};
pub use crate::constants::{BLANK, INITIAL_COLOUR, PGM_HEADER, PIXELS};
pub use crate::converter::{
    convert, convert_to_pgm, convert_to_sketch, encode, output_path, Algorithm, EncodeOptions,
    FileType,
};
pub use crate::decoder::{decode, Canvas, Cells, Decoder, DecoderState, Point};
pub use crate::errors::{ConvertError, DecodeError, RasterError};
pub use crate::histogram::{ColourCount, ColourHistogram};
pub use crate::raster::Raster;
pub use crate::rle_encoder::encode_rle;
pub use crate::sketch_writer::SketchWriter;
