use crate::error::{WallError, WallResult};

/// Fixed design size of one poster cell, in local (pre-transform) pixels.
pub const CELL_WIDTH: f64 = 300.0;
pub const CELL_HEIGHT: f64 = 450.0;

/// Corner radius of a cell's rounded rectangle, in local pixels.
pub const CELL_CORNER_RADIUS: f64 = 4.0;

/// How a source image of arbitrary aspect ratio maps into a cell's fixed box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Centered crop that fills the cell exactly.
    Cover,
    /// Remap to the exact cell box, ignoring aspect ratio.
    Stretch,
    /// Whole image visible, letterboxed/pillarboxed and centered.
    Contain,
}

/// One immutable render configuration for a wall.
///
/// Serialized field names match the settings JSON of the control panel
/// (`scaleY`, `offsetX`, `overlayOpacity`, `fillMode`, ...).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallSettings {
    pub width: u32,
    pub height: u32,
    pub rows: u32,
    pub cols: u32,
    pub gap: f64,
    /// Global rotation about the pivot, in degrees.
    pub angle: f64,
    /// Uniform zoom factor.
    pub scale: f64,
    /// Extra vertical-only multiplier applied after `scale` ("laid flat" look).
    pub scale_y: f64,
    /// X-shear as a function of y: `x' = x + skew * y`.
    pub skew: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    /// Strength of the final flat wash, 0..=1.
    pub overlay_opacity: f32,
    pub fill_mode: FillMode,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            rows: 6,
            cols: 10,
            gap: 30.0,
            angle: -20.0,
            scale: 1.5,
            scale_y: 0.65,
            skew: 0.15,
            offset_x: 0.0,
            offset_y: 0.0,
            overlay_opacity: 0.1,
            fill_mode: FillMode::Cover,
        }
    }
}

impl WallSettings {
    pub fn validate(&self) -> WallResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WallError::validation("canvas width/height must be > 0"));
        }
        // Output surfaces are u16-bounded (see render_cpu).
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(WallError::validation(format!(
                "canvas width/height must be <= {}",
                u16::MAX
            )));
        }
        if self.rows == 0 || self.cols == 0 {
            return Err(WallError::validation("rows/cols must be >= 1"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(WallError::validation("gap must be finite and >= 0"));
        }
        if !self.angle.is_finite() {
            return Err(WallError::validation("angle must be finite"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(WallError::validation("scale must be finite and > 0"));
        }
        if !self.scale_y.is_finite() || self.scale_y <= 0.0 {
            return Err(WallError::validation("scaleY must be finite and > 0"));
        }
        if !self.skew.is_finite() {
            return Err(WallError::validation("skew must be finite"));
        }
        if !self.offset_x.is_finite() || !self.offset_y.is_finite() {
            return Err(WallError::validation("offsetX/offsetY must be finite"));
        }
        if !self.overlay_opacity.is_finite() || !(0.0..=1.0).contains(&self.overlay_opacity) {
            return Err(WallError::validation("overlayOpacity must be in 0..=1"));
        }
        Ok(())
    }
}

/// Binary palette choice: supplies the background, the hairline stroke tone
/// and the overlay wash color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Opaque canvas background.
    pub fn background(self) -> [u8; 4] {
        match self {
            Self::Dark => [0, 0, 0, 255],
            Self::Light => [255, 255, 255, 255],
        }
    }

    /// Cell border tone, ~5% alpha.
    pub fn hairline(self) -> [u8; 4] {
        match self {
            Self::Dark => [255, 255, 255, 13],
            Self::Light => [0, 0, 0, 13],
        }
    }

    /// Flat wash color composited over the finished wall.
    pub fn overlay(self) -> [u8; 4] {
        match self {
            Self::Dark => [0, 0, 0, 255],
            Self::Light => [255, 255, 255, 255],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_roundtrip_uses_panel_field_names() {
        let settings = WallSettings::default();
        let s = serde_json::to_string(&settings).unwrap();
        assert!(s.contains("\"scaleY\""));
        assert!(s.contains("\"offsetX\""));
        assert!(s.contains("\"overlayOpacity\""));
        assert!(s.contains("\"fillMode\":\"cover\""));

        let de: WallSettings = serde_json::from_str(&s).unwrap();
        assert_eq!(de.rows, 6);
        assert_eq!(de.cols, 10);
        assert_eq!(de.fill_mode, FillMode::Cover);
    }

    #[test]
    fn default_settings_validate() {
        WallSettings::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_canvas() {
        let settings = WallSettings {
            width: 0,
            ..WallSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_oversized_canvas() {
        let settings = WallSettings {
            width: 70_000,
            ..WallSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_grid() {
        let settings = WallSettings {
            rows: 0,
            ..WallSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_positive_scale() {
        for (scale, scale_y) in [(0.0, 1.0), (-1.0, 1.0), (1.0, 0.0), (1.0, f64::NAN)] {
            let settings = WallSettings {
                scale,
                scale_y,
                ..WallSettings::default()
            };
            assert!(settings.validate().is_err(), "scale {scale} / {scale_y}");
        }
    }

    #[test]
    fn validate_rejects_out_of_range_overlay() {
        for opacity in [-0.1f32, 1.1, f32::NAN] {
            let settings = WallSettings {
                overlay_opacity: opacity,
                ..WallSettings::default()
            };
            assert!(settings.validate().is_err(), "opacity {opacity}");
        }
    }

    #[test]
    fn theme_palette_is_paired() {
        assert_eq!(Theme::Dark.background(), [0, 0, 0, 255]);
        assert_eq!(Theme::Light.background(), [255, 255, 255, 255]);
        assert_eq!(Theme::Dark.hairline()[3], Theme::Light.hairline()[3]);
    }
}
