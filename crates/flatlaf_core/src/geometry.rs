//! Geometric value types used by theme properties

use std::fmt;

use serde::{Deserialize, Serialize};

/// Space around the edges of a box, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    pub const fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self::new(f(self.top), f(self.left), f(self.bottom), f(self.right))
    }
}

/// Written as `top,left,bottom,right`, the same form theme files use
impl fmt::Display for Insets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.top, self.left, self.bottom, self.right)
    }
}

/// Width and height, in pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    pub width: i32,
    pub height: i32,
}

impl Dimension {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_theme_syntax() {
        assert_eq!(Insets::new(1, 2, 3, 4).to_string(), "1,2,3,4");
        assert_eq!(Dimension::new(1, 2).to_string(), "1,2");
    }

    #[test]
    fn test_insets_map() {
        assert_eq!(Insets::new(1, 2, 3, 4).map(|v| v * 2), Insets::new(2, 4, 6, 8));
    }
}
