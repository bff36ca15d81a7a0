//! User scale factor
//!
//! Pixel-valued properties are stored unscaled and multiplied by the user
//! scale factor when they reach a component.

use serde::{Deserialize, Serialize};

use crate::geometry::{Dimension, Insets};

/// Multiplier for pixel-valued properties
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UiScale {
    factor: f32,
}

impl UiScale {
    pub const IDENTITY: UiScale = UiScale { factor: 1.0 };

    /// Non-finite or non-positive factors fall back to 1.0
    pub fn new(factor: f32) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self { factor }
        } else {
            tracing::warn!(factor, "invalid scale factor, using 1.0");
            Self::IDENTITY
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn is_identity(&self) -> bool {
        self.factor == 1.0
    }

    pub fn scale(&self, value: i32) -> i32 {
        if self.is_identity() {
            value
        } else {
            (value as f32 * self.factor + 0.5).floor() as i32
        }
    }

    pub fn scale_f32(&self, value: f32) -> f32 {
        if self.is_identity() {
            value
        } else {
            value * self.factor
        }
    }

    /// Inverse of [`scale`](Self::scale), used to report stored values
    pub fn unscale(&self, value: i32) -> i32 {
        if self.is_identity() {
            value
        } else {
            (value as f32 / self.factor + 0.5).floor() as i32
        }
    }

    pub fn scale_insets(&self, insets: Insets) -> Insets {
        insets.map(|v| self.scale(v))
    }

    pub fn scale_dimension(&self, size: Dimension) -> Dimension {
        Dimension::new(self.scale(size.width), self.scale(size.height))
    }
}

impl Default for UiScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_rounds() {
        assert_eq!(UiScale::new(1.0).scale(100), 100);
        assert_eq!(UiScale::new(1.25).scale(100), 125);
        assert_eq!(UiScale::new(1.5).scale(3), 5);
        assert_eq!(UiScale::new(2.0).scale(100), 200);
    }

    #[test]
    fn test_unscale_inverts() {
        let scale = UiScale::new(1.75);
        assert_eq!(scale.unscale(scale.scale(100)), 100);
    }

    #[test]
    fn test_invalid_factor() {
        assert!(UiScale::new(0.0).is_identity());
        assert!(UiScale::new(f32::NAN).is_identity());
    }

    #[test]
    fn test_scale_insets() {
        let scale = UiScale::new(2.0);
        assert_eq!(scale.scale_insets(Insets::new(1, 2, 3, 4)), Insets::new(2, 4, 6, 8));
    }
}
