use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Face rectangle as ratios of the image dimensions, origin at the lower
/// left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FaceRect {
    /// Centered 20% x 20% box used when a rectangle cannot be decoded.
    pub const DEFAULT: FaceRect = FaceRect {
        x: 0.4,
        y: 0.4,
        width: 0.2,
        height: 0.2,
    };

    /// Parse `{{x, y}, {width, height}}`.
    pub fn parse(s: &str) -> Result<Self, DecodeError> {
        let values = s
            .split(',')
            .map(|part| part.trim_matches(|c: char| c == '{' || c == '}' || c.is_whitespace()))
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| DecodeError::Rectangle(s.to_string()))?;

        match values[..] {
            [x, y, width, height] => Ok(Self {
                x,
                y,
                width,
                height,
            }),
            _ => Err(DecodeError::Rectangle(s.to_string())),
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x, self.y, self.width, self.height]
    }
}
