//! Owns the coordinate array and per-iteration displacement vector.

use nalgebra::{Point2, Vector2};

use crate::error::PolyspringError;
use crate::region::{InnerBox, Region};

/// One block of interleaved input rows: `rows` rows of `stride` values each,
/// with the x/y coordinates at columns `x_col`/`y_col` of every row.
#[derive(Debug, Clone, Copy)]
pub struct PointBlock<'a> {
    pub data: &'a [f64],
    pub rows: usize,
    pub stride: usize,
    pub x_col: usize,
    pub y_col: usize,
}

impl<'a> PointBlock<'a> {
    fn validate(&self) -> Result<(), PolyspringError> {
        if self.x_col >= self.stride || self.y_col >= self.stride {
            return Err(PolyspringError::ColumnOutOfBounds {
                col: self.x_col.max(self.y_col),
                stride: self.stride,
            });
        }
        let available = self.data.len() / self.stride;
        if available < self.rows {
            return Err(PolyspringError::BlockTooShort {
                declared: self.rows,
                available,
                stride: self.stride,
            });
        }
        Ok(())
    }
}

/// The normalized point cloud plus its pending displacement.
pub struct Points {
    pub coords: Vec<Point2<f64>>,
    pub push: Vec<Vector2<f64>>,
    orig_min: [f64; 2],
    orig_range: [f64; 2],
}

impl Points {
    pub fn new() -> Self {
        Points {
            coords: Vec::new(),
            push: Vec::new(),
            orig_min: [0.0, 0.0],
            orig_range: [1.0, 1.0],
        }
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Concatenate `blocks` into the normalized array in original units,
    /// recording per-axis min/max for later denormalization.
    pub fn set(&mut self, total: usize, blocks: &[PointBlock]) -> Result<(), PolyspringError> {
        if total < 3 {
            return Err(PolyspringError::TooFewPoints(total));
        }
        for block in blocks {
            block.validate()?;
        }

        let mut coords = Vec::with_capacity(total);
        for block in blocks {
            for row in 0..block.rows {
                let base = row * block.stride;
                let x = block.data[base + block.x_col];
                let y = block.data[base + block.y_col];
                coords.push(Point2::new(x, y));
                if coords.len() == total {
                    break;
                }
            }
            if coords.len() == total {
                break;
            }
        }

        if coords.len() < total {
            return Err(PolyspringError::TotalRowsMismatch {
                total,
                supplied: coords.len(),
            });
        }

        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];
        for p in &coords {
            min[0] = min[0].min(p.x);
            min[1] = min[1].min(p.y);
            max[0] = max[0].max(p.x);
            max[1] = max[1].max(p.y);
        }

        self.orig_min = min;
        self.orig_range = [
            if max[0] > min[0] { max[0] - min[0] } else { 1.0 },
            if max[1] > min[1] { max[1] - min[1] } else { 1.0 },
        ];
        self.push = vec![Vector2::zeros(); coords.len()];
        self.coords = coords;
        Ok(())
    }

    /// Replace each axis's values by the rank-based uniform map onto
    /// `inner`: rank 0 goes to the box's minimum, rank N-1 to its maximum.
    pub fn pre_uniformize(&mut self, inner: InnerBox) {
        let n = self.coords.len();
        if n == 0 {
            return;
        }
        for axis in 0..2 {
            let mut order: Vec<usize> = (0..n).collect();
            order.sort_by(|&a, &b| {
                self.coords[a][axis]
                    .partial_cmp(&self.coords[b][axis])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            let (base, len) = if axis == 0 {
                (inner.x_min, inner.x_len)
            } else {
                (inner.y_min, inner.y_len)
            };
            for (rank, &i) in order.iter().enumerate() {
                let t = if n > 1 {
                    rank as f64 / (n - 1) as f64
                } else {
                    0.5
                };
                self.coords[i][axis] = base + t * len;
            }
        }
    }

    /// `P += push`.
    pub fn integrate(&mut self) {
        for (p, d) in self.coords.iter_mut().zip(self.push.iter()) {
            *p += *d;
        }
    }

    /// Zero the pending displacement.
    pub fn end_iteration(&mut self) {
        for d in &mut self.push {
            *d = Vector2::zeros();
        }
    }

    pub fn within_region(&self, i: usize, region: &Region) -> bool {
        region.contains(self.coords[i])
    }

    pub fn move_point_back(&mut self, i: usize, region: &Region) {
        self.coords[i] = region.project(self.coords[i]);
    }

    pub fn dist_moved(&self, i: usize) -> f64 {
        self.push[i].norm()
    }

    pub fn dist_since_triangulation(&self, i: usize, snapshot: &[Point2<f64>]) -> f64 {
        (self.coords[i] - snapshot[i]).norm()
    }

    /// Normalized coordinates, or a copy scaled back into original units.
    pub fn get_points(&self, scaled: bool) -> Vec<(f64, f64)> {
        if !scaled {
            return self.coords.iter().map(|p| (p.x, p.y)).collect();
        }
        self.coords
            .iter()
            .map(|p| {
                (
                    p.x * self.orig_range[0] + self.orig_min[0],
                    p.y * self.orig_range[1] + self.orig_min[1],
                )
            })
            .collect()
    }
}

impl Default for Points {
    fn default() -> Self {
        Self::new()
    }
}
