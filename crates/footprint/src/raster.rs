//! Raster band access.
//!
//! Footprint computation only needs one thing from imagery: a band's pixel
//! values and its declared fill value. Sources hand out fully decoded
//! [`RasterBand`]s; any file handle is opened and closed inside
//! [`RasterSource::read_band`], so nothing stays open past one footprint
//! computation, even when a read fails.

use modis_common::{FootprintError, FootprintResult};
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sample type of a stored band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleType {
    Uint8,
    Int8,
    Uint16,
    Int16,
    Uint32,
    Int32,
    Float32,
    Float64,
}

impl SampleType {
    /// Bytes per sample.
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::Uint8 | Self::Int8 => 1,
            Self::Uint16 | Self::Int16 => 2,
            Self::Uint32 | Self::Int32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

/// Decoded pixel values, row-major.
#[derive(Debug, Clone, PartialEq)]
pub enum BandData {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! impl_band_data_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<Vec<$ty>> for BandData {
                fn from(values: Vec<$ty>) -> Self {
                    BandData::$variant(values)
                }
            }
        )+
    };
}

impl_band_data_from!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    f32 => F32,
    f64 => F64,
);

impl BandData {
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::U32(v) => v.len(),
            Self::I32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_type(&self) -> SampleType {
        match self {
            Self::U8(_) => SampleType::Uint8,
            Self::I8(_) => SampleType::Int8,
            Self::U16(_) => SampleType::Uint16,
            Self::I16(_) => SampleType::Int16,
            Self::U32(_) => SampleType::Uint32,
            Self::I32(_) => SampleType::Int32,
            Self::F32(_) => SampleType::Float32,
            Self::F64(_) => SampleType::Float64,
        }
    }

    /// Per-pixel validity: not NaN and not equal to `fill`.
    ///
    /// Comparison happens at the band's own precision, so a fill of `0.1`
    /// matches `0.1f32` samples.
    pub fn valid_flags(&self, fill: Option<f64>) -> Vec<bool> {
        match self {
            Self::U8(v) => valid_flags(v, fill),
            Self::I8(v) => valid_flags(v, fill),
            Self::U16(v) => valid_flags(v, fill),
            Self::I16(v) => valid_flags(v, fill),
            Self::U32(v) => valid_flags(v, fill),
            Self::I32(v) => valid_flags(v, fill),
            Self::F32(v) => valid_flags(v, fill.map(|f| f as f32 as f64)),
            Self::F64(v) => valid_flags(v, fill),
        }
    }

    /// Decode little-endian samples.
    pub fn from_le_bytes(sample_type: SampleType, bytes: &[u8]) -> FootprintResult<Self> {
        if bytes.len() % sample_type.size_bytes() != 0 {
            return Err(FootprintError::read_failure(format!(
                "{} bytes is not a whole number of {:?} samples",
                bytes.len(),
                sample_type
            )));
        }
        Ok(match sample_type {
            SampleType::Uint8 => Self::U8(bytes.to_vec()),
            SampleType::Int8 => Self::I8(decode(bytes, i8::from_le_bytes)),
            SampleType::Uint16 => Self::U16(decode(bytes, u16::from_le_bytes)),
            SampleType::Int16 => Self::I16(decode(bytes, i16::from_le_bytes)),
            SampleType::Uint32 => Self::U32(decode(bytes, u32::from_le_bytes)),
            SampleType::Int32 => Self::I32(decode(bytes, i32::from_le_bytes)),
            SampleType::Float32 => Self::F32(decode(bytes, f32::from_le_bytes)),
            SampleType::Float64 => Self::F64(decode(bytes, f64::from_le_bytes)),
        })
    }

    /// Encode samples as little-endian bytes.
    pub fn to_le_bytes(&self) -> Vec<u8> {
        match self {
            Self::U8(v) => v.clone(),
            Self::I8(v) => encode(v, i8::to_le_bytes),
            Self::U16(v) => encode(v, u16::to_le_bytes),
            Self::I16(v) => encode(v, i16::to_le_bytes),
            Self::U32(v) => encode(v, u32::to_le_bytes),
            Self::I32(v) => encode(v, i32::to_le_bytes),
            Self::F32(v) => encode(v, f32::to_le_bytes),
            Self::F64(v) => encode(v, f64::to_le_bytes),
        }
    }
}

fn valid_flags<T: ToPrimitive>(values: &[T], fill: Option<f64>) -> Vec<bool> {
    values
        .iter()
        .map(|v| match v.to_f64() {
            Some(x) if !x.is_nan() => fill.map_or(true, |f| x != f),
            _ => false,
        })
        .collect()
}

fn decode<T, const N: usize>(bytes: &[u8], from_le: fn([u8; N]) -> T) -> Vec<T> {
    bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut buf = [0u8; N];
            buf.copy_from_slice(chunk);
            from_le(buf)
        })
        .collect()
}

fn encode<T: Copy, const N: usize>(values: &[T], to_le: fn(T) -> [u8; N]) -> Vec<u8> {
    values.iter().flat_map(|&v| to_le(v)).collect()
}

/// Number of samples in a `width` x `height` raster.
pub fn sample_count(width: usize, height: usize) -> FootprintResult<usize> {
    width.checked_mul(height).ok_or_else(|| {
        FootprintError::read_failure(format!("raster of {}x{} is too large", width, height))
    })
}

/// One band of a tile's imagery.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBand {
    pub name: String,
    pub width: usize,
    pub height: usize,
    /// Declared fill / no-data value, if any.
    pub fill_value: Option<f64>,
    pub data: BandData,
}

impl RasterBand {
    /// Create a band, checking that the sample count matches the dimensions.
    pub fn new(
        name: impl Into<String>,
        width: usize,
        height: usize,
        fill_value: Option<f64>,
        data: impl Into<BandData>,
    ) -> FootprintResult<Self> {
        let name = name.into();
        let data = data.into();
        if data.len() != sample_count(width, height)? {
            return Err(FootprintError::read_failure(format!(
                "band '{}' has {} samples, expected {}x{}",
                name,
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            name,
            width,
            height,
            fill_value,
            data,
        })
    }
}

/// Anything that can produce a decoded band by name.
pub trait RasterSource {
    fn read_band(&self, name: &str) -> FootprintResult<RasterBand>;
}

/// Bands already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bands: HashMap<String, RasterBand>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_band(mut self, band: RasterBand) -> Self {
        self.insert(band);
        self
    }

    pub fn insert(&mut self, band: RasterBand) {
        self.bands.insert(band.name.clone(), band);
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}

impl RasterSource for MemorySource {
    fn read_band(&self, name: &str) -> FootprintResult<RasterBand> {
        self.bands
            .get(name)
            .cloned()
            .ok_or_else(|| FootprintError::read_failure(format!("band '{}' not found", name)))
    }
}

/// Sidecar header describing a raw band file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBandHeader {
    pub width: usize,
    pub height: usize,
    pub dtype: SampleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_value: Option<f64>,
}

/// Directory of raw bands: `<band>.json` header plus `<band>.bin` samples.
///
/// Samples are little-endian, row-major, with no padding.
#[derive(Debug, Clone)]
pub struct RawBandDirectory {
    root: PathBuf,
}

impl RawBandDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn header_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    pub fn data_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.bin", name))
    }

    /// Write a band as header + raw samples.
    pub fn write_band(&self, band: &RasterBand) -> FootprintResult<()> {
        let header = RawBandHeader {
            width: band.width,
            height: band.height,
            dtype: band.data.sample_type(),
            fill_value: band.fill_value,
        };
        let header_bytes = serde_json::to_vec_pretty(&header)
            .map_err(|e| FootprintError::write_failure(format!("band '{}': {}", band.name, e)))?;
        write_file(&self.header_path(&band.name), &header_bytes)?;
        write_file(&self.data_path(&band.name), &band.data.to_le_bytes())
    }

    fn read_header(&self, name: &str) -> FootprintResult<RawBandHeader> {
        let path = self.header_path(name);
        let bytes = fs::read(&path).map_err(|e| {
            FootprintError::read_failure(format!("{}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            FootprintError::read_failure(format!("{}: invalid header: {}", path.display(), e))
        })
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> FootprintResult<()> {
    fs::write(path, bytes)
        .map_err(|e| FootprintError::write_failure(format!("{}: {}", path.display(), e)))
}

impl RasterSource for RawBandDirectory {
    fn read_band(&self, name: &str) -> FootprintResult<RasterBand> {
        let header = self.read_header(name)?;
        let path = self.data_path(name);

        let expected = sample_count(header.width, header.height)?
            .checked_mul(header.dtype.size_bytes())
            .ok_or_else(|| {
                FootprintError::read_failure(format!(
                    "{}: {}x{} {:?} is too large",
                    path.display(),
                    header.width,
                    header.height,
                    header.dtype
                ))
            })?;

        let bytes = fs::read(&path).map_err(|e| {
            FootprintError::read_failure(format!("{}: {}", path.display(), e))
        })?;
        if bytes.len() != expected {
            return Err(FootprintError::read_failure(format!(
                "{}: expected {} bytes for {}x{} {:?}, found {}",
                path.display(),
                expected,
                header.width,
                header.height,
                header.dtype,
                bytes.len()
            )));
        }

        debug!(
            band = name,
            width = header.width,
            height = header.height,
            dtype = ?header.dtype,
            "Read raw band"
        );

        let data = BandData::from_le_bytes(header.dtype, &bytes)?;
        RasterBand::new(name, header.width, header.height, header.fill_value, data)
    }
}
