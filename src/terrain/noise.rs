//! Procedural heightfield generation.
//!
//! Layered value noise over a hashed integer lattice: each octave
//! halves the amplitude and doubles the frequency of the previous one.
//! On top of the fractal base sit a broad hill component, a rectified
//! ridge component, and an optional localized peak bump; anything
//! below the sea-level floor is clamped to it. Everything is driven by
//! integer hashing of the seed and lattice coordinates, so equal
//! parameters always reproduce the grid bit for bit.

use super::heightfield::HeightfieldGrid;

/// A localized radial bump added to the generated terrain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakParams {
    pub center_east_m: f32,
    pub center_north_m: f32,
    pub height_m: f32,
    pub radius_m: f32,
}

/// Parameters for [`generate_heightfield`].
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseParams {
    pub seed: u32,
    pub samples_per_side: usize,
    pub size_m: f32,
    /// Number of fractal octaves
    pub octaves: u32,
    /// Wavelength of the first octave, meters
    pub base_wavelength_m: f32,
    /// Peak-to-trough amplitude of the fractal base, meters
    pub amplitude_m: f32,
    /// Height of the broad hill component, meters
    pub hill_height_m: f32,
    /// Wavelength of the hill component, meters
    pub hill_wavelength_m: f32,
    /// Height of the rectified ridge component, meters
    pub ridge_height_m: f32,
    /// Wavelength of the ridge component, meters
    pub ridge_wavelength_m: f32,
    /// Optional localized peak
    pub peak: Option<PeakParams>,
    /// Floor elevation; lower samples are clamped to it
    pub sea_level_m: f32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 1,
            samples_per_side: 129,
            size_m: 400_000.0,
            octaves: 5,
            base_wavelength_m: 60_000.0,
            amplitude_m: 500.0,
            hill_height_m: 400.0,
            hill_wavelength_m: 180_000.0,
            ridge_height_m: 300.0,
            ridge_wavelength_m: 90_000.0,
            peak: None,
            sea_level_m: 0.0,
        }
    }
}

/// Hashes a lattice point to [0, 1).
fn lattice_hash(seed: u32, xi: i32, zi: i32) -> f32 {
    let mut h = seed
        ^ (xi as u32).wrapping_mul(0x85EB_CA6B)
        ^ (zi as u32).wrapping_mul(0xC2B2_AE35);
    h ^= h >> 13;
    h = h.wrapping_mul(0x27D4_EB2F);
    h ^= h >> 15;
    (h & 0x00FF_FFFF) as f32 / 16_777_216.0
}

/// Smoothstep fade for lattice interpolation.
fn fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Smoothed value noise in [0, 1) at lattice coordinates (x, z).
fn value_noise(seed: u32, x: f32, z: f32) -> f32 {
    let x0 = x.floor();
    let z0 = z.floor();
    let xi = x0 as i32;
    let zi = z0 as i32;
    let tx = fade(x - x0);
    let tz = fade(z - z0);

    let c00 = lattice_hash(seed, xi, zi);
    let c10 = lattice_hash(seed, xi + 1, zi);
    let c01 = lattice_hash(seed, xi, zi + 1);
    let c11 = lattice_hash(seed, xi + 1, zi + 1);

    lerp(lerp(c00, c10, tx), lerp(c01, c11, tx), tz)
}

/// Fractal value noise in roughly [-1, 1].
fn fbm(seed: u32, x: f32, z: f32, octaves: u32) -> f32 {
    let mut sum = 0.0;
    let mut amplitude = 1.0;
    let mut frequency = 1.0;
    let mut norm = 0.0;
    for octave in 0..octaves {
        let octave_seed = seed.wrapping_add(octave.wrapping_mul(0x9E37_79B9));
        sum += (value_noise(octave_seed, x * frequency, z * frequency) * 2.0 - 1.0) * amplitude;
        norm += amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    sum / norm
}

/// Generates a procedural heightfield grid.
///
/// Vertices span the square symmetrically: sample (row, col) sits at
/// east = -S/2 + col * step, north = S/2 - row * step, with row 0 on
/// the north edge (the DEM export layout). A sample count below 2
/// cannot span the square and is clamped up to 2.
pub fn generate_heightfield(params: &NoiseParams) -> HeightfieldGrid {
    let n = params.samples_per_side.max(2);
    let step = params.size_m / (n - 1) as f32;
    let half = params.size_m / 2.0;

    let mut data = Vec::with_capacity(n * n);
    for row in 0..n {
        let north = half - row as f32 * step;
        for col in 0..n {
            let east = -half + col as f32 * step;

            let base = fbm(
                params.seed,
                east / params.base_wavelength_m,
                north / params.base_wavelength_m,
                params.octaves,
            ) * params.amplitude_m;

            let hill = value_noise(
                params.seed ^ 0x5851_F42D,
                east / params.hill_wavelength_m,
                north / params.hill_wavelength_m,
            ) * params.hill_height_m;

            // Ridges: fold the noise around its midpoint so crests
            // become sharp lines.
            let r = value_noise(
                params.seed ^ 0x2545_F491,
                east / params.ridge_wavelength_m,
                north / params.ridge_wavelength_m,
            );
            let ridge = (1.0 - (2.0 * r - 1.0).abs()) * params.ridge_height_m;

            let mut elevation = base + hill + ridge;

            if let Some(peak) = params.peak {
                let de = east - peak.center_east_m;
                let dn = north - peak.center_north_m;
                let falloff = 1.0 - (de * de + dn * dn) / (peak.radius_m * peak.radius_m);
                if falloff > 0.0 {
                    elevation += peak.height_m * falloff * falloff;
                }
            }

            data.push(elevation.max(params.sea_level_m));
        }
    }

    HeightfieldGrid::new(n, params.size_m, data)
        .unwrap_or_else(|_| unreachable!("generator fills exactly n*n samples"))
}
