use glam::Vec2;

/// Earth gravity in meters per second squared.
pub const STANDARD_GRAVITY: f32 = 9.8;

/// How many pixels make up one simulation meter.
///
/// Textures are used directly as physics geometry, so body positions and
/// shapes are all in pixels.  Anything expressed in meters (gravity, the
/// solver's tolerances) has to be multiplied through by this factor to look
/// right on screen.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct LengthUnits {
    pixels_per_meter: f32,
}

impl LengthUnits {
    pub fn new(pixels_per_meter: f32) -> Self {
        assert!(
            pixels_per_meter > 0.0,
            "pixels per meter must be positive, got {pixels_per_meter}"
        );
        Self { pixels_per_meter }
    }
    pub fn pixels_per_meter(&self) -> f32 {
        self.pixels_per_meter
    }
    pub fn to_pixels(&self, meters: f32) -> f32 {
        meters * self.pixels_per_meter
    }
    /// Downward (+y, screen-style) gravity scaled into pixels per second squared.
    pub fn gravity(&self) -> Vec2 {
        Vec2::new(0.0, self.to_pixels(STANDARD_GRAVITY))
    }
}

impl Default for LengthUnits {
    fn default() -> Self {
        // the boxes are 128 pixels wide
        Self::new(128.0)
    }
}
