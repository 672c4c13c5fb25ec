//! Orchestrates one relaxation step: triangulate-if-needed, compute the
//! density scale, accumulate spring forces, integrate, clamp to the region,
//! check convergence, refresh edges, and decide whether the next iteration
//! needs to re-triangulate.

use crate::density::{TargetDensity, UniformDensity};
use crate::edges::Edges;
use crate::error::{PolyspringError, PolyspringResult};
use crate::points::{PointBlock, Points};
use crate::region::Region;
use crate::triangulation::Triangulation;

/// Tunable relaxation parameters. Defaults match spec.md's published values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolyspringConfig {
    /// Time step applied to the integrated spring force.
    pub dt: f64,
    /// Displacement-since-triangulation threshold, relative to the rest
    /// length, that triggers a re-triangulation.
    pub tri_tol: f64,
    /// Interior pressure: > 1 so the equilibrium edge length slightly
    /// exceeds the uniform rest length.
    pub int_pres: f64,
    /// Spring stiffness.
    pub k: f64,
    /// Per-iteration displacement threshold, relative to the rest length,
    /// below which a point is considered converged.
    pub stop_tol: f64,
}

impl Default for PolyspringConfig {
    fn default() -> Self {
        PolyspringConfig {
            dt: 0.2,
            tri_tol: 0.1,
            int_pres: 1.2,
            k: 1.0,
            stop_tol: 0.001,
        }
    }
}

/// The relaxation engine. One instance owns one simulation; callers that
/// want parallel independent relaxations instantiate separate engines.
pub struct Polyspring {
    config: PolyspringConfig,
    region: Region,
    points: Points,
    triangulation: Triangulation,
    edges: Edges,
    density: Box<dyn TargetDensity>,
    l0: f64,
    iterations: u64,
    needs_triangulation: bool,
    initialized: bool,
}

impl Polyspring {
    pub fn new(config: PolyspringConfig) -> Self {
        Self::with_density(config, Box::new(UniformDensity))
    }

    pub fn with_density(config: PolyspringConfig, density: Box<dyn TargetDensity>) -> Self {
        Polyspring {
            config,
            region: Region::default(),
            points: Points::new(),
            triangulation: Triangulation::new(),
            edges: Edges::new(),
            density,
            l0: 0.0,
            iterations: 0,
            needs_triangulation: true,
            initialized: false,
        }
    }

    pub fn set_region(&mut self, name: &str) -> PolyspringResult<()> {
        self.region = Region::by_name(name)?;
        Ok(())
    }

    /// Ingest points, pre-uniformize them into the region's inner box, and
    /// compute the uniform rest length. Resets iteration/triangulation
    /// counters and marks the triangulation stale.
    pub fn set_points(&mut self, total: usize, blocks: &[PointBlock]) -> PolyspringResult<()> {
        self.points.set(total, blocks)?;
        self.points.pre_uniformize(self.region.inner_box());

        self.l0 = (2.0 / (3f64.sqrt() * total as f64 / self.region.area())).sqrt();
        self.iterations = 0;
        self.triangulation = Triangulation::new();
        self.edges = Edges::new();
        self.needs_triangulation = true;
        self.initialized = true;
        log::debug!(
            "set_points: N={} l0={:.6} region_area={:.6}",
            total,
            self.l0,
            self.region.area()
        );
        Ok(())
    }

    /// Perform one relaxation step. Returns `Ok(true)` if any point still
    /// exceeds the convergence threshold, `Ok(false)` once converged.
    pub fn iterate(&mut self) -> PolyspringResult<bool> {
        if !self.initialized {
            return Err(PolyspringError::NotInitialized);
        }

        if self.needs_triangulation {
            self.triangulation.triangulate(&self.points.coords)?;
            self.edges
                .build(&self.triangulation.triangles, self.points.len());
            self.edges.refresh(&self.points.coords, self.density.as_ref());
            self.needs_triangulation = false;
        }

        let hscale = self.l0 * self.edges.scaling_factor();

        for i in 0..self.edges.len_edges() {
            let h = self.edges.h_mid[i];
            let f = self.config.k * (self.config.int_pres * hscale / h - self.edges.len[i]);
            if f > 0.0 {
                self.edges
                    .apply_force(i, self.config.dt * f, &mut self.points.push);
            }
        }

        self.points.integrate();

        // Even one point above the threshold forces another iteration:
        // convergence is per-point, not a norm over all displacements.
        let mut keep_going = false;
        for i in 0..self.points.len() {
            if self.points.within_region(i, &self.region) {
                if self.points.dist_moved(i) / self.l0 > self.config.stop_tol {
                    keep_going = true;
                }
            } else {
                self.points.move_point_back(i, &self.region);
                keep_going = true;
            }
        }

        self.edges
            .refresh(&self.points.coords, self.density.as_ref());

        for i in 0..self.points.len() {
            let drift = self
                .points
                .dist_since_triangulation(i, &self.triangulation.snapshot)
                / self.l0;
            if drift > self.config.tri_tol {
                self.needs_triangulation = true;
                break;
            }
        }

        self.points.end_iteration();
        self.iterations += 1;

        log::trace!(
            "iterate #{}: keep_going={} re-triangulate next={}",
            self.iterations,
            keep_going,
            self.needs_triangulation
        );

        Ok(keep_going)
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn triangulations(&self) -> u64 {
        self.triangulation.count()
    }

    pub fn points(&self, scaled: bool) -> Vec<(f64, f64)> {
        self.points.get_points(scaled)
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangulation.triangles
    }

    pub fn rest_length(&self) -> f64 {
        self.l0
    }
}
