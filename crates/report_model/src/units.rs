//! Unit conversions for OOXML measurements
//!
//! Model values are kept in points. DOCX parts use twips (1/20 pt) for page
//! and paragraph geometry, half-points for font sizes and EMUs for drawings.

/// Points per centimeter
pub const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// EMUs per point (914400 EMU per inch)
pub const EMU_PER_POINT: f64 = 12700.0;

/// Convert centimeters to points
pub fn cm_to_points(cm: f32) -> f32 {
    cm * POINTS_PER_CM
}

/// Convert points to twips
pub fn points_to_twips(points: f32) -> i32 {
    (points * 20.0).round() as i32
}

/// Convert points to half-points (font sizes)
pub fn points_to_half_points(points: f32) -> u32 {
    (points * 2.0).round().max(0.0) as u32
}

/// Convert points to EMUs
pub fn points_to_emu(points: f32) -> i64 {
    (points as f64 * EMU_PER_POINT).round() as i64
}

/// Convert a line spacing multiple to 240ths of a line
pub fn multiple_to_line_units(multiple: f32) -> i32 {
    (multiple * 240.0).round() as i32
}
