use std::{fs, path::Path};

use rand::{rngs::StdRng, Rng, SeedableRng};
use sketch_codec::{
    convert, decode, encode, encode_box, encode_rle, Algorithm, ConvertError, EncodeOptions,
    Raster, RasterError, PGM_HEADER, PIXELS,
};
use sketch_model::{HEIGHT, WIDTH};

/// Overlapping rectangles over a random background, the kind of picture the
/// box encoder is meant for.
fn random_shapes(rng: &mut StdRng) -> Raster {
    let mut raster = Raster::filled(rng.gen());

    for _ in 0..rng.gen_range(1..40) {
        let grey = rng.gen();
        let x0 = rng.gen_range(0..WIDTH);
        let y0 = rng.gen_range(0..HEIGHT);
        let x1 = rng.gen_range(x0..WIDTH);
        let y1 = rng.gen_range(y0..HEIGHT);

        for y in y0..=y1 {
            for x in x0..=x1 {
                raster.set(x, y, grey);
            }
        }
    }

    raster
}

/// Independent pixels drawn from a small palette.
fn random_noise(rng: &mut StdRng, palette: &[u8]) -> Raster {
    let pixels = (0..PIXELS)
        .map(|_| palette[rng.gen_range(0..palette.len())])
        .collect();
    Raster::from_pixels(pixels).unwrap()
}

fn write_pgm(path: &Path, raster: &Raster) {
    let mut bytes = Vec::new();
    raster.write_pgm(&mut bytes).unwrap();
    fs::write(path, bytes).unwrap();
}

#[test]
fn box_round_trips_random_shapes() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..8 {
        let raster = random_shapes(&mut rng);
        assert_eq!(decode(&encode_box(&raster, true)).unwrap(), raster);
        assert_eq!(decode(&encode_box(&raster, false)).unwrap(), raster);
    }
}

#[test]
fn rle_round_trips_random_shapes() {
    let mut rng = StdRng::seed_from_u64(17);

    for _ in 0..8 {
        let raster = random_shapes(&mut rng);
        assert_eq!(decode(&encode_rle(&raster)).unwrap(), raster);
    }
}

#[test]
fn both_algorithms_round_trip_noise() {
    let mut rng = StdRng::seed_from_u64(99);
    let raster = random_noise(&mut rng, &[0, 31, 64, 200, 255]);

    assert_eq!(decode(&encode_box(&raster, true)).unwrap(), raster);
    assert_eq!(decode(&encode_rle(&raster)).unwrap(), raster);
}

#[test]
fn round_trips_extreme_colours_at_the_edges() {
    let mut raster = Raster::filled(128);
    for i in 0..WIDTH {
        raster.set(i, 0, 0);
        raster.set(i, HEIGHT - 1, 255);
        raster.set(0, i, 1);
        raster.set(WIDTH - 1, i, 254);
    }
    raster.set(WIDTH - 1, HEIGHT - 1, 63);

    for options in [
        EncodeOptions::default(),
        EncodeOptions {
            algorithm: Algorithm::Rle,
            lines: true,
        },
    ] {
        assert_eq!(decode(&encode(&raster, options)).unwrap(), raster);
    }
}

#[test]
fn decoding_random_bytes_never_panics() {
    let mut rng = StdRng::seed_from_u64(1234);

    for _ in 0..200 {
        let len = rng.gen_range(0..512);
        let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
        let _ = decode(&bytes);
    }
}

#[test]
fn converts_pgm_to_sketch_and_back() {
    let dir = tempfile::tempdir().unwrap();
    let pgm = dir.path().join("picture.pgm");

    let mut rng = StdRng::seed_from_u64(7);
    let raster = random_shapes(&mut rng);
    write_pgm(&pgm, &raster);

    let sketch = convert(&pgm, EncodeOptions::default()).unwrap();
    assert_eq!(sketch, dir.path().join("picture.sk"));
    assert_eq!(fs::read(&sketch).unwrap(), encode_box(&raster, true));

    fs::remove_file(&pgm).unwrap();
    let back = convert(&sketch, EncodeOptions::default()).unwrap();
    assert_eq!(back, pgm);

    let decoded = Raster::read_pgm(fs::File::open(&back).unwrap()).unwrap();
    assert_eq!(decoded, raster);
}

#[test]
fn rejects_a_bad_header_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let pgm = dir.path().join("wide.pgm");

    let mut bytes = b"P5 300 200 255\n".to_vec();
    bytes.resize(bytes.len() + PIXELS, 0);
    fs::write(&pgm, bytes).unwrap();

    let err = convert(&pgm, EncodeOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Raster(RasterError::HeaderMismatch { .. })
    ));
    assert!(!dir.path().join("wide.sk").exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn rejects_a_short_pixel_block() {
    let dir = tempfile::tempdir().unwrap();
    let pgm = dir.path().join("short.pgm");

    let mut bytes = PGM_HEADER.to_vec();
    bytes.resize(bytes.len() + PIXELS - 1, 0);
    fs::write(&pgm, bytes).unwrap();

    assert!(matches!(
        convert(&pgm, EncodeOptions::default()),
        Err(ConvertError::Raster(RasterError::PixelCount { .. }))
    ));
    assert!(!dir.path().join("short.sk").exists());
}

#[test]
fn reports_where_a_sketch_went_wrong() {
    let dir = tempfile::tempdir().unwrap();
    let sketch = dir.path().join("diagonal.sk");

    // Line from (0,0) to (5,3)
    fs::write(&sketch, [0x05, 0x43]).unwrap();

    match convert(&sketch, EncodeOptions::default()) {
        Err(ConvertError::Decode { offset, .. }) => assert_eq!(offset, 1),
        other => panic!("expected a decode error, got {:?}", other),
    }
    assert!(!dir.path().join("diagonal.pgm").exists());
}
