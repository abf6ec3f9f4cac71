//! Valid-data masks.

use crate::hull::PixelCorner;
use crate::raster::{sample_count, BandData, RasterBand};
use modis_common::{FootprintError, FootprintResult};
use serde::{Deserialize, Serialize};

/// Boolean raster marking pixels that hold real observations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDataMask {
    width: usize,
    height: usize,
    flags: Vec<bool>,
}

impl ValidDataMask {
    /// Mask of pixels that are not NaN and not equal to `fill`.
    pub fn from_band(
        data: &BandData,
        width: usize,
        height: usize,
        fill: Option<f64>,
    ) -> FootprintResult<Self> {
        Self::from_flags(width, height, data.valid_flags(fill))
    }

    pub fn from_raster(band: &RasterBand) -> FootprintResult<Self> {
        Self::from_band(&band.data, band.width, band.height, band.fill_value)
    }

    pub fn from_flags(width: usize, height: usize, flags: Vec<bool>) -> FootprintResult<Self> {
        if flags.len() != sample_count(width, height)? {
            return Err(FootprintError::read_failure(format!(
                "mask has {} pixels, expected {}x{}",
                flags.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            flags,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn valid_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.flags.iter().any(|&f| f)
    }

    /// Out-of-range positions are invalid.
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.flags[row * self.width + col]
    }

    /// Pixels valid in either mask.
    pub fn union(&self, other: &Self) -> FootprintResult<Self> {
        self.combine_with(other, |a, b| a || b)
    }

    /// Pixels valid in both masks.
    pub fn intersection(&self, other: &Self) -> FootprintResult<Self> {
        self.combine_with(other, |a, b| a && b)
    }

    fn combine_with(&self, other: &Self, op: impl Fn(bool, bool) -> bool) -> FootprintResult<Self> {
        if self.width != other.width || self.height != other.height {
            return Err(FootprintError::read_failure(format!(
                "cannot combine {}x{} mask with {}x{} mask",
                self.width, self.height, other.width, other.height
            )));
        }
        let flags = self
            .flags
            .iter()
            .zip(&other.flags)
            .map(|(&a, &b)| op(a, b))
            .collect();
        Ok(Self {
            width: self.width,
            height: self.height,
            flags,
        })
    }

    /// First and last valid column of a row.
    pub fn row_extent(&self, row: usize) -> Option<(usize, usize)> {
        if row >= self.height {
            return None;
        }
        let line = &self.flags[row * self.width..(row + 1) * self.width];
        let first = line.iter().position(|&f| f)?;
        let last = line.iter().rposition(|&f| f)?;
        Some((first, last))
    }

    /// Corners of the leftmost and rightmost valid pixel of every row.
    ///
    /// The convex hull of these equals the hull of every valid pixel's
    /// corners, at four points per row instead of four per pixel.
    pub fn boundary_corners(&self) -> Vec<PixelCorner> {
        let mut corners = Vec::new();
        for row in 0..self.height {
            if let Some((first, last)) = self.row_extent(row) {
                let (r, c0, c1) = (row as i64, first as i64, last as i64 + 1);
                corners.push(PixelCorner::new(r, c0));
                corners.push(PixelCorner::new(r, c1));
                corners.push(PixelCorner::new(r + 1, c0));
                corners.push(PixelCorner::new(r + 1, c1));
            }
        }
        corners
    }
}

/// How masks from several bands merge into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskPolicy {
    /// Only the first selected band counts.
    #[default]
    Representative,
    /// A pixel is valid if any band has data there.
    AnyValid,
    /// A pixel is valid only if every band has data there.
    AllValid,
}

impl MaskPolicy {
    /// Parse from string (case-insensitive). `None` for unknown names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "representative" | "first" => Some(Self::Representative),
            "any" | "any_valid" | "union" => Some(Self::AnyValid),
            "all" | "all_valid" | "intersection" => Some(Self::AllValid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Representative => "representative",
            Self::AnyValid => "any_valid",
            Self::AllValid => "all_valid",
        }
    }

    /// Merge per-band masks. `None` when `masks` is empty.
    pub fn combine(&self, masks: Vec<ValidDataMask>) -> FootprintResult<Option<ValidDataMask>> {
        let mut iter = masks.into_iter();
        let Some(first) = iter.next() else {
            return Ok(None);
        };
        let merged = match self {
            Self::Representative => first,
            Self::AnyValid => iter.try_fold(first, |acc, m| acc.union(&m))?,
            Self::AllValid => iter.try_fold(first, |acc, m| acc.intersection(&m))?,
        };
        Ok(Some(merged))
    }
}

impl std::fmt::Display for MaskPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(width: usize, rows: &[&str]) -> ValidDataMask {
        let flags = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        ValidDataMask::from_flags(width, rows.len(), flags).unwrap()
    }

    #[test]
    fn test_from_band_with_fill() {
        let data = BandData::I16(vec![-3000, 5, 7, -3000]);
        let m = ValidDataMask::from_band(&data, 2, 2, Some(-3000.0)).unwrap();
        assert_eq!(m.valid_count(), 2);
        assert!(!m.is_valid(0, 0));
        assert!(m.is_valid(0, 1));
        assert!(m.is_valid(1, 0));
        assert!(!m.is_valid(5, 5));
    }

    #[test]
    fn test_dimension_mismatch() {
        let data = BandData::U8(vec![1, 2, 3]);
        assert!(ValidDataMask::from_band(&data, 2, 2, None).is_err());
    }

    #[test]
    fn test_oversized_dimensions() {
        let err = ValidDataMask::from_flags(usize::MAX, usize::MAX, vec![true]).unwrap_err();
        assert!(err.is_read_failure());
    }

    #[test]
    fn test_empty_mask() {
        let m = mask(3, &["...", "..."]);
        assert!(m.is_empty());
        assert!(m.boundary_corners().is_empty());
    }

    #[test]
    fn test_row_extent() {
        let m = mask(5, &[".#.#.", ".....", "#####"]);
        assert_eq!(m.row_extent(0), Some((1, 3)));
        assert_eq!(m.row_extent(1), None);
        assert_eq!(m.row_extent(2), Some((0, 4)));
        assert_eq!(m.row_extent(3), None);
    }

    #[test]
    fn test_boundary_corners_single_pixel() {
        let m = mask(3, &["...", ".#.", "..."]);
        let corners = m.boundary_corners();
        assert_eq!(
            corners,
            vec![
                PixelCorner::new(1, 1),
                PixelCorner::new(1, 2),
                PixelCorner::new(2, 1),
                PixelCorner::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_union_and_intersection() {
        let a = mask(2, &["#.", ".."]);
        let b = mask(2, &["##", ".."]);
        assert_eq!(a.union(&b).unwrap().valid_count(), 2);
        assert_eq!(a.intersection(&b).unwrap().valid_count(), 1);

        let c = mask(3, &["###"]);
        assert!(a.union(&c).is_err());
    }

    #[test]
    fn test_policy_combine() {
        let a = mask(2, &["#.", ".."]);
        let b = mask(2, &["..", ".#"]);

        let rep = MaskPolicy::Representative
            .combine(vec![a.clone(), b.clone()])
            .unwrap()
            .unwrap();
        assert_eq!(rep, a);

        let any = MaskPolicy::AnyValid
            .combine(vec![a.clone(), b.clone()])
            .unwrap()
            .unwrap();
        assert_eq!(any.valid_count(), 2);

        let all = MaskPolicy::AllValid.combine(vec![a, b]).unwrap().unwrap();
        assert!(all.is_empty());

        assert!(MaskPolicy::AnyValid.combine(Vec::new()).unwrap().is_none());
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!(MaskPolicy::parse("ANY_VALID"), Some(MaskPolicy::AnyValid));
        assert_eq!(MaskPolicy::parse("intersection"), Some(MaskPolicy::AllValid));
        assert_eq!(MaskPolicy::parse("representative"), Some(MaskPolicy::Representative));
        assert_eq!(MaskPolicy::parse("bogus"), None);
        assert_eq!(MaskPolicy::AllValid.to_string(), "all_valid");
    }
}
