//! Element types that can be stored in a grid

use std::fmt::{self, Debug, Display};

use num_traits::{Bounded, NumCast};

/// Runtime tag naming the sample type of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer, used for label grids
    U32,
    /// 64-bit float
    F64,
    /// Boolean (binary masks)
    Bool,
}

impl DType {
    /// Upper end of the nominal value range; the lower end is always 0.
    ///
    /// Integers span their full range, floats are taken to live in `[0, 1]`
    /// and booleans in `{0, 1}`.
    pub fn nominal_max(self) -> f64 {
        match self {
            DType::U8 => u8::MAX as f64,
            DType::U16 => u16::MAX as f64,
            DType::U32 => u32::MAX as f64,
            DType::F64 | DType::Bool => 1.0,
        }
    }

    /// Whether values of this type are integers
    pub fn is_integer(self) -> bool {
        matches!(self, DType::U8 | DType::U16 | DType::U32)
    }

    /// Parse a dtype name such as `"u8"` or `"f64"`
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "u8" | "uint8" => Some(DType::U8),
            "u16" | "uint16" => Some(DType::U16),
            "u32" | "uint32" => Some(DType::U32),
            "f64" | "float64" => Some(DType::F64),
            "bool" => Some(DType::Bool),
            _ => None,
        }
    }
}

impl Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::F64 => "f64",
            DType::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// Trait for types that can be stored in a grid cell.
///
/// `Default` must be the zero / background value of the type.
pub trait GridElement:
    Copy + Clone + Debug + Default + PartialOrd + PartialEq + Send + Sync + 'static
{
    /// Tag for this type
    const DTYPE: DType;

    /// Widen to f64 (exact for every supported type)
    fn to_f64(self) -> f64;

    /// Narrow from f64, rounding to nearest and clamping to the type range.
    ///
    /// NaN maps to the zero value for integer and boolean types.
    fn from_f64_clipped(value: f64) -> Self;
}

macro_rules! impl_grid_element_int {
    ($t:ty, $tag:expr) => {
        impl GridElement for $t {
            const DTYPE: DType = $tag;

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn from_f64_clipped(value: f64) -> Self {
                if value.is_nan() {
                    return 0;
                }
                let lo = <$t as Bounded>::min_value() as f64;
                let hi = <$t as Bounded>::max_value() as f64;
                <$t as NumCast>::from(value.round().clamp(lo, hi)).unwrap_or_default()
            }
        }
    };
}

impl_grid_element_int!(u8, DType::U8);
impl_grid_element_int!(u16, DType::U16);
impl_grid_element_int!(u32, DType::U32);

impl GridElement for f64 {
    const DTYPE: DType = DType::F64;

    fn to_f64(self) -> f64 {
        self
    }

    fn from_f64_clipped(value: f64) -> Self {
        value
    }
}

impl GridElement for bool {
    const DTYPE: DType = DType::Bool;

    fn to_f64(self) -> f64 {
        if self { 1.0 } else { 0.0 }
    }

    fn from_f64_clipped(value: f64) -> Self {
        !value.is_nan() && value != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipping_rounds_and_clamps() {
        assert_eq!(u8::from_f64_clipped(-3.0), 0);
        assert_eq!(u8::from_f64_clipped(254.6), 255);
        assert_eq!(u8::from_f64_clipped(1e9), 255);
        assert_eq!(u16::from_f64_clipped(70000.0), u16::MAX);
        assert_eq!(u8::from_f64_clipped(f64::NAN), 0);
    }

    #[test]
    fn test_bool_conversion() {
        assert!(bool::from_f64_clipped(0.2));
        assert!(!bool::from_f64_clipped(0.0));
        assert!(!bool::from_f64_clipped(f64::NAN));
        assert_eq!(true.to_f64(), 1.0);
    }

    #[test]
    fn test_dtype_parse_and_display() {
        assert_eq!(DType::parse("UINT8"), Some(DType::U8));
        assert_eq!(DType::parse("f64"), Some(DType::F64));
        assert_eq!(DType::parse("i8"), None);
        assert_eq!(DType::U16.to_string(), "u16");
        assert_eq!(DType::U8.nominal_max(), 255.0);
    }
}
