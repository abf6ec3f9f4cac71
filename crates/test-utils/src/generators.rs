//! Synthetic raster band generators.
//!
//! All generators return row-major square bands (`size * size` samples) so
//! that tests can build tiles of any resolution without real imagery.

/// A band where every pixel holds `fill`.
pub fn create_fill_band<T: Copy>(size: usize, fill: T) -> Vec<T> {
    vec![fill; size * size]
}

/// A band where every pixel is valid.
pub fn create_valid_band<T: Copy>(size: usize, value: T) -> Vec<T> {
    vec![value; size * size]
}

/// A fill band with one rectangular block of valid pixels.
///
/// The block's top-left pixel is (`row`, `col`); it spans `rows` x `cols`
/// pixels and is clipped to the band.
pub fn create_block_band<T: Copy>(
    size: usize,
    fill: T,
    value: T,
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> Vec<T> {
    let mut data = create_fill_band(size, fill);
    for r in row..(row + rows).min(size) {
        for c in col..(col + cols).min(size) {
            data[r * size + c] = value;
        }
    }
    data
}

/// A fill band with valid pixels on and below the anti-diagonal.
///
/// Mimics a swath edge crossing the tile: valid where `row + col >= size - 1`.
pub fn create_triangle_band<T: Copy>(size: usize, fill: T, value: T) -> Vec<T> {
    let mut data = create_fill_band(size, fill);
    for r in 0..size {
        for c in 0..size {
            if r + c + 1 >= size {
                data[r * size + c] = value;
            }
        }
    }
    data
}

/// A fill band with valid pixels at the listed (row, col) positions.
pub fn create_sparse_band<T: Copy>(
    size: usize,
    fill: T,
    value: T,
    positions: &[(usize, usize)],
) -> Vec<T> {
    let mut data = create_fill_band(size, fill);
    for &(r, c) in positions {
        if r < size && c < size {
            data[r * size + c] = value;
        }
    }
    data
}

/// Encode samples as little-endian bytes, the raw band file layout.
pub fn to_le_bytes_i16(values: &[i16]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Encode samples as little-endian bytes, the raw band file layout.
pub fn to_le_bytes_f32(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}
