//! Membership test and boundary projection for a 2D domain.
//!
//! Implemented as a tagged variant rather than a trait object: the spec
//! declares regions as a closed-ish extension point ("the region interface
//! permits extension but no other region is implemented"), so a
//! `#[non_exhaustive]` enum with an inherent impl is enough and keeps every
//! variant a plain value type owned by the engine.

use nalgebra::Point2;

use crate::error::PolyspringError;

/// An axis-aligned inset box used to seed points away from the region's
/// outer boundary during pre-uniformization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InnerBox {
    pub x_min: f64,
    pub x_len: f64,
    pub y_min: f64,
    pub y_len: f64,
}

/// A bounded planar domain.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    /// The unit square `[0, 1] x [0, 1]`.
    Square,
}

impl Region {
    pub fn by_name(name: &str) -> Result<Self, PolyspringError> {
        match name {
            "square" => Ok(Region::Square),
            other => Err(PolyspringError::UnknownRegion(other.to_string())),
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            Region::Square => 1.0,
        }
    }

    /// Inset box centered on the region, used as the pre-uniformization
    /// target. Half-side `sqrt(area) / 3` leaves a margin of roughly the
    /// same fraction on every side.
    pub fn inner_box(&self) -> InnerBox {
        match self {
            Region::Square => {
                let half = self.area().sqrt() / 3.0;
                InnerBox {
                    x_min: 0.5 - half,
                    x_len: 2.0 * half,
                    y_min: 0.5 - half,
                    y_len: 2.0 * half,
                }
            }
        }
    }

    pub fn contains(&self, p: Point2<f64>) -> bool {
        match self {
            Region::Square => (0.0..=1.0).contains(&p.x) && (0.0..=1.0).contains(&p.y),
        }
    }

    /// Componentwise clamp onto the region's closure.
    pub fn project(&self, p: Point2<f64>) -> Point2<f64> {
        match self {
            Region::Square => Point2::new(p.x.clamp(0.0, 1.0), p.y.clamp(0.0, 1.0)),
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Square
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_area_is_one() {
        assert_eq!(Region::Square.area(), 1.0);
    }

    #[test]
    fn square_inner_box_matches_spec_margin() {
        let b = Region::Square.inner_box();
        assert!((b.x_min - 0.1667).abs() < 1e-3);
        assert!((b.x_min + b.x_len - 0.8333).abs() < 1e-3);
        assert_eq!(b.x_min, b.y_min);
        assert_eq!(b.x_len, b.y_len);
    }

    #[test]
    fn membership_is_closed() {
        assert!(Region::Square.contains(Point2::new(0.0, 0.0)));
        assert!(Region::Square.contains(Point2::new(1.0, 1.0)));
        assert!(!Region::Square.contains(Point2::new(-0.01, 0.5)));
    }

    #[test]
    fn projection_clamps_componentwise() {
        let p = Region::Square.project(Point2::new(-1.0, 2.0));
        assert_eq!(p, Point2::new(0.0, 1.0));
    }

    #[test]
    fn by_name_rejects_unknown() {
        assert!(Region::by_name("circle").is_err());
        assert!(Region::by_name("square").is_ok());
    }
}
