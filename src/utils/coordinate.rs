use serde::{Deserialize, Serialize};

/// A point in image space or view space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate2D {
    pub x: f32,
    pub y: f32,
}

impl Coordinate2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Coordinate2D { x, y }
    }
}

/// Face bounding box in image space: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceBounds {
    pub position: Coordinate2D,
    pub width: f32,
    pub height: f32,
}

impl FaceBounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        FaceBounds {
            position: Coordinate2D::new(x, y),
            width,
            height,
        }
    }

    /// Bounds with zero or negative extent. Ratio math on such a box has no
    /// defined result, so every caller checks this before dividing.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// to_ratio expresses an absolute point as a fraction of the face
    /// width/height relative to the top-left corner.
    ///
    /// # Arguments
    /// * `point` - absolute image-space position
    ///
    /// # Returns
    /// * `Option<Coordinate2D>` - None when the bounds are degenerate
    pub fn to_ratio(&self, point: Coordinate2D) -> Option<Coordinate2D> {
        if self.is_degenerate() {
            return None;
        }
        Some(Coordinate2D::new(
            (point.x - self.position.x) / self.width,
            (point.y - self.position.y) / self.height,
        ))
    }

    /// from_ratio reconstructs an absolute image-space position from a
    /// stored fraction of the face bounds.
    ///
    /// # Arguments
    /// * `ratio` - fraction of width/height relative to the top-left corner
    ///
    /// # Returns
    /// * `Coordinate2D`
    pub fn from_ratio(&self, ratio: Coordinate2D) -> Coordinate2D {
        Coordinate2D::new(
            self.position.x + ratio.x * self.width,
            self.position.y + ratio.y * self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_round_trip() {
        let bounds = FaceBounds::new(80.0, 40.0, 40.0, 40.0);
        let point = Coordinate2D::new(100.0, 50.0);

        let ratio = bounds.to_ratio(point).unwrap();
        assert!((ratio.x - 0.5).abs() < 1e-6);
        assert!((ratio.y - 0.25).abs() < 1e-6);

        let back = bounds.from_ratio(ratio);
        assert!((back.x - point.x).abs() < 1e-4);
        assert!((back.y - point.y).abs() < 1e-4);
    }

    #[test]
    fn degenerate_bounds_yield_no_ratio() {
        let zero_width = FaceBounds::new(80.0, 40.0, 0.0, 40.0);
        assert!(zero_width.is_degenerate());
        assert!(zero_width.to_ratio(Coordinate2D::new(100.0, 50.0)).is_none());

        let zero_height = FaceBounds::new(80.0, 40.0, 40.0, 0.0);
        assert!(zero_height.is_degenerate());
        assert!(zero_height.to_ratio(Coordinate2D::new(100.0, 50.0)).is_none());
    }
}
