use palette::Srgb;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaintError {
    #[error("invalid color {color:?}: {message}")]
    Color { color: String, message: String },

    #[error("opacity must be within 0..=1, got {0}")]
    Opacity(f64),
}

/// Fill-extrusion paint applied to every train layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PaintConfig", into = "PaintConfig")]
pub struct ExtrusionPaint {
    color: Srgb<u8>,
    height: f64,
    base: f64,
    opacity: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct PaintConfig {
    color: String,
    height: f64,
    base: f64,
    opacity: f64,
}

impl Default for PaintConfig {
    fn default() -> Self {
        ExtrusionPaint::default().into()
    }
}

impl Default for ExtrusionPaint {
    fn default() -> Self {
        Self {
            color: Srgb::new(0x00, 0xff, 0x00),
            height: 100.0,
            base: 0.0,
            opacity: 0.8,
        }
    }
}

impl ExtrusionPaint {
    pub fn new(color: Srgb<u8>, height: f64, base: f64, opacity: f64) -> Result<Self, PaintError> {
        if !(0.0..=1.0).contains(&opacity) {
            return Err(PaintError::Opacity(opacity));
        }

        Ok(Self {
            color,
            height,
            base,
            opacity,
        })
    }

    pub fn color(&self) -> Srgb<u8> {
        self.color
    }

    /// `#rrggbb`, the color form MapLibre styles accept.
    pub fn color_hex(&self) -> String {
        let Srgb { red, green, blue, .. } = self.color;
        format!("#{red:02x}{green:02x}{blue:02x}")
    }

    pub fn to_json(&self) -> Value {
        json!({
            "fill-extrusion-color": self.color_hex(),
            "fill-extrusion-height": self.height,
            "fill-extrusion-base": self.base,
            "fill-extrusion-opacity": self.opacity,
        })
    }
}

impl TryFrom<PaintConfig> for ExtrusionPaint {
    type Error = PaintError;

    fn try_from(config: PaintConfig) -> Result<Self, Self::Error> {
        let color = config
            .color
            .parse::<Srgb<u8>>()
            .map_err(|e| PaintError::Color {
                color: config.color.clone(),
                message: e.to_string(),
            })?;

        ExtrusionPaint::new(color, config.height, config.base, config.opacity)
    }
}

impl From<ExtrusionPaint> for PaintConfig {
    fn from(paint: ExtrusionPaint) -> Self {
        Self {
            color: paint.color_hex(),
            height: paint.height,
            base: paint.base,
            opacity: paint.opacity,
        }
    }
}
