//! Presentation mapping from member forces to an ordered colour palette.
//!
//! Nothing here feeds back into the analysis; the mapping only decides how a
//! solved force is drawn.

use serde::{Deserialize, Serialize};

use crate::classify::MemberResult;
use crate::errors::PaletteError;

/// An sRGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a colour from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` notation.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear blend toward `other`; `t = 0` gives `self`, `t = 1` gives `other`.
    fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            // Clamped to the u8 range, so the cast cannot truncate.
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

/// Colour at full compression.
const COMPRESSION: Rgb = Rgb::new(0x21, 0x66, 0xac);
/// Colour at zero force.
const NEUTRAL: Rgb = Rgb::new(0xf7, 0xf7, 0xf7);
/// Colour at full tension.
const TENSION: Rgb = Rgb::new(0xb2, 0x18, 0x2b);

/// Force interval spanned by the palette.
///
/// Deserializing goes through [`ForceRange::new`], so a configured range is
/// checked the same way as one built in code.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct ForceRange {
    /// Force mapped to the first palette entry (most compressive).
    pub max_compression: f64,
    /// Force mapped to the last palette entry (most tensile).
    pub max_tension: f64,
}

/// Unchecked bounds as written in a configuration file.
#[derive(Deserialize)]
struct RangeBounds {
    /// Lower bound.
    max_compression: f64,
    /// Upper bound.
    max_tension: f64,
}

impl TryFrom<RangeBounds> for ForceRange {
    type Error = PaletteError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.max_compression, bounds.max_tension)
    }
}

impl ForceRange {
    /// Create a range.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidRange`] unless both bounds are finite and
    /// `max_compression < max_tension`.
    pub fn new(max_compression: f64, max_tension: f64) -> Result<Self, PaletteError> {
        if !(max_compression.is_finite() && max_tension.is_finite())
            || max_compression >= max_tension
        {
            return Err(PaletteError::InvalidRange {
                max_compression,
                max_tension,
            });
        }
        Ok(Self {
            max_compression,
            max_tension,
        })
    }

    /// Range `[-limit, limit]`.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidRange`] when `limit` is zero or not finite.
    pub fn symmetric(limit: f64) -> Result<Self, PaletteError> {
        Self::new(-limit.abs(), limit.abs())
    }

    /// Symmetric range reaching the largest absolute force in `results`.
    ///
    /// Falls back to `[-1, 1]` when every force is zero.
    #[must_use]
    pub fn covering(results: &[MemberResult]) -> Self {
        let limit = results
            .iter()
            .map(|result| result.force.abs())
            .filter(|force| force.is_finite())
            .fold(0.0_f64, f64::max);
        let limit = if limit > 0.0 { limit } else { 1.0 };
        Self {
            max_compression: -limit,
            max_tension: limit,
        }
    }

    /// Position of `force` within the range, clamped to `[0, 1]`.
    fn fraction(&self, force: f64) -> f64 {
        if force.is_nan() {
            return 0.5;
        }
        let span = self.max_tension - self.max_compression;
        ((force - self.max_compression) / span).clamp(0.0, 1.0)
    }
}

/// Map `force` linearly onto `0..size`, clamping values outside `range`.
///
/// `size` must be non-zero.
///
/// # Examples
/// ```
/// use trussx_joints::{palette_index, ForceRange};
///
/// let range = ForceRange::symmetric(10.0).expect("valid range");
/// assert_eq!(palette_index(-10.0, &range, 5), 0);
/// assert_eq!(palette_index(0.0, &range, 5), 2);
/// assert_eq!(palette_index(250.0, &range, 5), 4);
/// ```
#[must_use]
pub fn palette_index(force: f64, range: &ForceRange, size: usize) -> usize {
    let last = size.saturating_sub(1);
    // The fraction lies in [0, 1], so the product lies in [0, last].
    let index = (range.fraction(force) * last as f64).round() as usize;
    index.min(last)
}

/// Fixed-size ordered list of colours from compression to tension.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Colours ordered from most compressive to most tensile.
    colors: Vec<Rgb>,
}

impl Palette {
    /// Wrap an explicit colour list.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] when `colors` is empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Blue-to-grey-to-red palette with `size` entries.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::EmptyPalette`] when `size` is zero.
    pub fn diverging(size: usize) -> Result<Self, PaletteError> {
        if size == 0 {
            return Err(PaletteError::EmptyPalette);
        }
        let colors = (0..size)
            .map(|index| {
                let t = if size == 1 {
                    0.5
                } else {
                    index as f64 / (size - 1) as f64
                };
                if t <= 0.5 {
                    COMPRESSION.lerp(NEUTRAL, t * 2.0)
                } else {
                    NEUTRAL.lerp(TENSION, (t - 0.5) * 2.0)
                }
            })
            .collect();
        Ok(Self { colors })
    }

    /// Number of colours.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; palettes hold at least one colour.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the colour used for `force`.
    #[must_use]
    pub fn index_for(&self, force: f64, range: &ForceRange) -> usize {
        palette_index(force, range, self.len())
    }

    /// Colour used for `force`.
    #[must_use]
    pub fn color_for(&self, force: f64, range: &ForceRange) -> Rgb {
        self.colors[self.index_for(force, range)]
    }

    /// Colours in order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}
