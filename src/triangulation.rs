//! Wraps the external Delaunay routine (the `delaunator` crate) and keeps a
//! snapshot of the coordinates at the last triangulation so drift can be
//! measured against it.

use delaunator::{triangulate, Point as DelaunayPoint};
use nalgebra::Point2;

use crate::error::PolyspringError;

/// A Delaunay triangulation snapshot: the coordinates as they stood when
/// `triangulate` was last called, plus the resulting triangle index
/// triplets. The snapshot never aliases the live point array — it is a
/// fresh copy, replaced wholesale on every re-triangulation.
pub struct Triangulation {
    pub snapshot: Vec<Point2<f64>>,
    pub triangles: Vec<[usize; 3]>,
    count: u64,
}

impl Triangulation {
    pub fn new() -> Self {
        Triangulation {
            snapshot: Vec::new(),
            triangles: Vec::new(),
            count: 0,
        }
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Retriangulate `points`. On success, `snapshot` and `triangles` are
    /// updated together; on failure neither is touched, so a failed
    /// retriangulation leaves the previous triangulation usable.
    pub fn triangulate(&mut self, points: &[Point2<f64>]) -> Result<(), PolyspringError> {
        let delaunay_points: Vec<DelaunayPoint> = points
            .iter()
            .map(|p| DelaunayPoint { x: p.x, y: p.y })
            .collect();

        let result = triangulate(&delaunay_points);
        let triangles = result.triangles;
        if triangles.len() < 3 {
            return Err(PolyspringError::TriangulationFailed);
        }

        self.triangles = triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        self.snapshot = points.to_vec();
        self.count += 1;
        log::debug!(
            "triangulated {} points into {} triangles (triangulation #{})",
            points.len(),
            self.triangles.len(),
            self.count
        );
        Ok(())
    }
}

impl Default for Triangulation {
    fn default() -> Self {
        Self::new()
    }
}
