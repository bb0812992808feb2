//! Heightfield grid type and binary decoding.

use thiserror::Error;

/// Reserved elevation marking an unmeasured cell.
///
/// Matches the i16 minimum used by the DEM export pipeline.
pub const NO_DATA: f32 = -32768.0;

/// Terrain subsystem failures.
#[derive(Debug, Error)]
pub enum TerrainError {
    /// Binary payload does not contain exactly N^2 samples.
    #[error("heightfield sample count mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Remote fetch of heightfield bytes failed.
    #[error("heightfield fetch failed: {status} {reason}")]
    Fetch { status: u16, reason: String },

    /// Terrain metadata sidecar could not be parsed.
    #[error("terrain metadata parse failed: {0}")]
    Meta(#[from] serde_json::Error),
}

/// Row-major N x N grid of elevation samples over an S x S meter square.
///
/// Row 0 is the north edge (matching the DEM export layout); elevations
/// are meters, with [`NO_DATA`] marking unmeasured cells. Immutable once
/// built; a new grid replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightfieldGrid {
    samples_per_side: usize,
    size_m: f32,
    data: Vec<f32>,
}

impl HeightfieldGrid {
    /// Builds a grid from samples; `data.len()` must be exactly N^2.
    pub fn new(samples_per_side: usize, size_m: f32, data: Vec<f32>) -> Result<Self, TerrainError> {
        let expected = samples_per_side * samples_per_side;
        if data.len() != expected {
            return Err(TerrainError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            samples_per_side,
            size_m,
            data,
        })
    }

    pub fn samples_per_side(&self) -> usize {
        self.samples_per_side
    }

    pub fn size_m(&self) -> f32 {
        self.size_m
    }

    /// Sample at (row, col); row 0 is the north edge.
    pub fn sample(&self, row: usize, col: usize) -> f32 {
        self.data[row * self.samples_per_side + col]
    }

    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    pub fn is_no_data(value: f32) -> bool {
        value == NO_DATA
    }
}

/// Decodes a raw DEM export into a grid.
///
/// Format: flat little-endian signed 16-bit integers, row-major,
/// exactly N^2 samples. Any other length is a hard error; truncating
/// or padding would silently shear the terrain.
pub fn decode_heightfield(
    bytes: &[u8],
    samples_per_side: usize,
    size_m: f32,
) -> Result<HeightfieldGrid, TerrainError> {
    let expected = samples_per_side * samples_per_side;
    if bytes.len() != expected * 2 {
        return Err(TerrainError::LengthMismatch {
            expected,
            actual: bytes.len() / 2,
        });
    }

    let data: Vec<f32> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32)
        .collect();

    HeightfieldGrid::new(samples_per_side, size_m, data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    #[test]
    fn test_decode_round_trips_values() {
        let bytes = encode(&[0, 150, -32768, 2500]);
        let grid = decode_heightfield(&bytes, 2, 1000.0).unwrap();
        assert_eq!(grid.sample(0, 0), 0.0);
        assert_eq!(grid.sample(0, 1), 150.0);
        assert!(HeightfieldGrid::is_no_data(grid.sample(1, 0)));
        assert_eq!(grid.sample(1, 1), 2500.0);
    }

    #[test]
    fn test_decode_rejects_wrong_length() {
        let bytes = encode(&[1, 2, 3]);
        let err = decode_heightfield(&bytes, 2, 1000.0).unwrap_err();
        match err {
            TerrainError::LengthMismatch { expected, actual } => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_grid_constructor_enforces_square() {
        let err = HeightfieldGrid::new(3, 100.0, vec![0.0; 8]).unwrap_err();
        assert!(matches!(
            err,
            TerrainError::LengthMismatch {
                expected: 9,
                actual: 8
            }
        ));
    }
}
