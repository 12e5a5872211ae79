//! Unit conversion utilities
//!
//! Jobs carry coordinates in pixels at the resolution (DPI) of the part
//! they belong to; machines are driven in millimetres.

/// Millimetres in one inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Convert a pixel value at `dpi` dots per inch to millimetres.
pub fn px_to_mm(px: f64, dpi: f64) -> f64 {
    px * MM_PER_INCH / dpi
}
