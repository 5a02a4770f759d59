use core::fmt;
use core::str::FromStr;

use crate::{LayoutError, ParseColumnWidthError};

/// How a column's width is specified.
///
/// String form (via [`FromStr`] / [`fmt::Display`]): `"auto"`, `"sizetocells"`, `"sizetoheader"`,
/// `"*"` (weight 1), `"2.5*"` and plain pixel values such as `"120"`. Keywords are
/// case-insensitive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnWidth {
    /// A fixed width in device-independent units.
    Pixel(f64),
    /// Sized to the larger of the header and the widest measured cell.
    #[default]
    Auto,
    /// Sized to the widest measured cell, ignoring the header.
    SizeToCells,
    /// Sized to the header only.
    SizeToHeader,
    /// A proportional share of the space left after non-star columns.
    Star(f64),
}

impl ColumnWidth {
    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star(_))
    }

    pub fn is_absolute(&self) -> bool {
        matches!(self, Self::Pixel(_))
    }

    /// `true` for widths derived from measured content (`Auto`, `SizeToCells`, `SizeToHeader`).
    pub fn is_auto_like(&self) -> bool {
        matches!(self, Self::Auto | Self::SizeToCells | Self::SizeToHeader)
    }

    /// `true` when measured cell content feeds this width.
    pub fn grows_from_cells(&self) -> bool {
        matches!(self, Self::Auto | Self::SizeToCells)
    }

    pub fn star_weight(&self) -> Option<f64> {
        match *self {
            Self::Star(w) => Some(w),
            _ => None,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        match *self {
            Self::Pixel(v) | Self::Star(v) if !v.is_finite() || v < 0.0 => {
                Err(LayoutError::InvalidWidth(v))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for ColumnWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Pixel(v) => write!(f, "{v}"),
            Self::Auto => f.write_str("Auto"),
            Self::SizeToCells => f.write_str("SizeToCells"),
            Self::SizeToHeader => f.write_str("SizeToHeader"),
            Self::Star(w) if w == 1.0 => f.write_str("*"),
            Self::Star(w) => write!(f, "{w}*"),
        }
    }
}

impl FromStr for ColumnWidth {
    type Err = ParseColumnWidthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColumnWidthError {
            input: s.to_owned(),
        };
        let trimmed = s.trim();

        if let Some(weight) = trimmed.strip_suffix('*') {
            let weight = if weight.is_empty() {
                1.0
            } else {
                weight.trim().parse::<f64>().map_err(|_| err())?
            };
            let width = Self::Star(weight);
            return width.validate().map(|_| width).map_err(|_| err());
        }

        if trimmed.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        if trimmed.eq_ignore_ascii_case("sizetocells") {
            return Ok(Self::SizeToCells);
        }
        if trimmed.eq_ignore_ascii_case("sizetoheader") {
            return Ok(Self::SizeToHeader);
        }

        let value = trimmed.parse::<f64>().map_err(|_| err())?;
        // A NaN pixel width means "unset", which the grid treats as Auto.
        if value.is_nan() {
            return Ok(Self::Auto);
        }
        let width = Self::Pixel(value);
        width.validate().map(|_| width).map_err(|_| err())
    }
}
