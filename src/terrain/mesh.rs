//! Ground mesh deformed by a heightfield.
//!
//! The mesh is an N x N vertex grid over an S x S meter square, laid
//! out to match the heightfield (row 0 on the north edge). Binding a
//! grid writes elevations into vertex heights, recomputes per-vertex
//! normals by central differences, and recolors vertices by elevation
//! band.

use crate::config::TerrainConfig;
use glam::Vec3;

use super::heightfield::{HeightfieldGrid, TerrainError};

/// RGB vertex color.
pub type VertexColor = [f32; 3];

const DEEP_WATER: VertexColor = [0.04, 0.10, 0.22];

/// Elevation band boundaries (meters) and their colors; vertex colors
/// interpolate linearly between adjacent boundaries.
const ELEVATION_BANDS: [(f32, VertexColor); 5] = [
    (0.0, [0.10, 0.32, 0.52]),    // water
    (200.0, [0.24, 0.44, 0.20]),  // lowland
    (800.0, [0.46, 0.42, 0.26]),  // hill
    (1500.0, [0.44, 0.40, 0.38]), // rock
    (2500.0, [0.92, 0.93, 0.95]), // snow
];

fn band_color(elevation: f32) -> VertexColor {
    let (first, last) = (ELEVATION_BANDS[0], ELEVATION_BANDS[ELEVATION_BANDS.len() - 1]);
    if elevation <= first.0 {
        return first.1;
    }
    if elevation >= last.0 {
        return last.1;
    }
    for pair in ELEVATION_BANDS.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if elevation <= hi.0 {
            let t = (elevation - lo.0) / (hi.0 - lo.0);
            return [
                lo.1[0] + (hi.1[0] - lo.1[0]) * t,
                lo.1[1] + (hi.1[1] - lo.1[1]) * t,
                lo.1[2] + (hi.1[2] - lo.1[2]) * t,
            ];
        }
    }
    last.1
}

/// CPU-side ground mesh the host uploads after each bind.
#[derive(Debug)]
pub struct TerrainMesh {
    samples_per_side: usize,
    size_m: f32,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    colors: Vec<VertexColor>,
    /// Tracks which vertices came from no-data samples (deep water)
    no_data: Vec<bool>,
}

impl TerrainMesh {
    /// Builds a flat grid mesh; vertex (row, col) sits at
    /// east = -S/2 + col * step, north = S/2 - row * step.
    ///
    /// Fewer than two samples per side cannot form a grid; the count
    /// is clamped up to 2.
    pub fn new(samples_per_side: usize, size_m: f32) -> Self {
        let n = samples_per_side.max(2);
        let step = size_m / (n - 1) as f32;
        let half = size_m / 2.0;

        let mut positions = Vec::with_capacity(n * n);
        for row in 0..n {
            let north = half - row as f32 * step;
            for col in 0..n {
                let east = -half + col as f32 * step;
                positions.push(Vec3::new(east, 0.0, north));
            }
        }

        Self {
            samples_per_side: n,
            size_m,
            normals: vec![Vec3::Y; n * n],
            colors: vec![ELEVATION_BANDS[1].1; n * n],
            no_data: vec![false; n * n],
            positions,
        }
    }

    /// Writes grid elevations into vertex heights.
    ///
    /// Each sample, scaled by the vertical exaggeration, becomes the
    /// matching vertex's y; no-data samples take the configured fill
    /// elevation and the deep-water color. Normals and band colors are
    /// recomputed afterwards. The grid must have the mesh's dimensions.
    pub fn bind_heights(
        &mut self,
        grid: &HeightfieldGrid,
        config: &TerrainConfig,
    ) -> Result<(), TerrainError> {
        let expected = self.samples_per_side * self.samples_per_side;
        if grid.samples().len() != expected {
            return Err(TerrainError::LengthMismatch {
                expected,
                actual: grid.samples().len(),
            });
        }

        for (i, &sample) in grid.samples().iter().enumerate() {
            let no_data = HeightfieldGrid::is_no_data(sample);
            let elevation = if no_data { config.nodata_fill_m } else { sample };
            self.positions[i].y = elevation * config.vertical_exaggeration;
            self.no_data[i] = no_data;
        }

        self.recompute_normals();
        self.recolor();
        log::debug!(
            "TerrainMesh: bound {}x{} grid",
            grid.samples_per_side(),
            grid.samples_per_side()
        );
        Ok(())
    }

    /// Per-vertex normals by central differences (one-sided at edges).
    fn recompute_normals(&mut self) {
        let n = self.samples_per_side;
        let step = self.size_m / (n - 1) as f32;

        for row in 0..n {
            for col in 0..n {
                let h = |r: usize, c: usize| self.positions[r * n + c].y;

                let (left, right) = (col.saturating_sub(1), (col + 1).min(n - 1));
                let dx = (h(row, right) - h(row, left)) / ((right - left) as f32 * step);

                // North decreases as row increases.
                let (up, down) = (row.saturating_sub(1), (row + 1).min(n - 1));
                let dz = (h(up, col) - h(down, col)) / ((down - up) as f32 * step);

                self.normals[row * n + col] = Vec3::new(-dx, 1.0, -dz).normalize();
            }
        }
    }

    fn recolor(&mut self) {
        for i in 0..self.positions.len() {
            self.colors[i] = if self.no_data[i] {
                DEEP_WATER
            } else {
                band_color(self.positions[i].y)
            };
        }
    }

    pub fn samples_per_side(&self) -> usize {
        self.samples_per_side
    }

    pub fn size_m(&self) -> f32 {
        self.size_m
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn colors(&self) -> &[VertexColor] {
        &self.colors
    }

    /// Vertex height at (row, col).
    pub fn elevation(&self, row: usize, col: usize) -> f32 {
        self.positions[row * self.samples_per_side + col].y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::heightfield::NO_DATA;

    fn grid(n: usize, data: Vec<f32>) -> HeightfieldGrid {
        HeightfieldGrid::new(n, 100.0, data).unwrap()
    }

    #[test]
    fn test_bind_writes_scaled_elevations() {
        let mut mesh = TerrainMesh::new(2, 100.0);
        let config = TerrainConfig {
            vertical_exaggeration: 2.0,
            nodata_fill_m: -50.0,
            ..Default::default()
        };
        mesh.bind_heights(&grid(2, vec![10.0, 20.0, NO_DATA, 40.0]), &config)
            .unwrap();
        assert_eq!(mesh.elevation(0, 0), 20.0);
        assert_eq!(mesh.elevation(0, 1), 40.0);
        assert_eq!(mesh.elevation(1, 0), -100.0); // fill, scaled
        assert_eq!(mesh.elevation(1, 1), 80.0);
    }

    #[test]
    fn test_degenerate_sample_count_is_clamped() {
        let mesh = TerrainMesh::new(1, 100.0);
        assert_eq!(mesh.samples_per_side(), 2);
        assert_eq!(mesh.positions().len(), 4);
        assert!(mesh.positions().iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_bind_rejects_dimension_mismatch() {
        let mut mesh = TerrainMesh::new(3, 100.0);
        let err = mesh
            .bind_heights(&grid(2, vec![0.0; 4]), &TerrainConfig::default())
            .unwrap_err();
        assert!(matches!(err, TerrainError::LengthMismatch { expected: 9, actual: 4 }));
    }

    #[test]
    fn test_flat_grid_has_up_normals() {
        let mut mesh = TerrainMesh::new(3, 100.0);
        mesh.bind_heights(&grid(3, vec![5.0; 9]), &TerrainConfig::default())
            .unwrap();
        for normal in mesh.normals() {
            assert!((*normal - Vec3::Y).length() < 1e-6);
        }
    }

    #[test]
    fn test_slope_tilts_normal_away_from_rise() {
        // Height rises to the east: normals lean west.
        let mut mesh = TerrainMesh::new(3, 100.0);
        let data = vec![
            0.0, 50.0, 100.0, //
            0.0, 50.0, 100.0, //
            0.0, 50.0, 100.0,
        ];
        mesh.bind_heights(&grid(3, data), &TerrainConfig::default())
            .unwrap();
        let center = mesh.normals()[4];
        assert!(center.x < 0.0);
        assert!(center.y > 0.0);
        assert!(center.z.abs() < 1e-6);
    }

    #[test]
    fn test_no_data_gets_deep_water_color() {
        let mut mesh = TerrainMesh::new(2, 100.0);
        mesh.bind_heights(&grid(2, vec![NO_DATA, 100.0, 1000.0, 3000.0]), &TerrainConfig::default())
            .unwrap();
        assert_eq!(mesh.colors()[0], DEEP_WATER);
        // Snow band at the top end.
        assert_eq!(mesh.colors()[3], ELEVATION_BANDS[4].1);
    }

    #[test]
    fn test_band_color_interpolates() {
        // Halfway between the water (0 m) and lowland (200 m) bands.
        let mid = band_color(100.0);
        let lo = ELEVATION_BANDS[0].1;
        let hi = ELEVATION_BANDS[1].1;
        for channel in 0..3 {
            let expected = (lo[channel] + hi[channel]) / 2.0;
            assert!((mid[channel] - expected).abs() < 1e-6);
        }
    }
}
