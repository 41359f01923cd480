// Size caps on caller-supplied dimensions (config JSON, wasm arguments)

// Rows or columns of one lattice
pub const MAX_GRID_DIM: usize = 256;

// Samples per curve
pub const MAX_SAMPLES: usize = 100_000;

#[inline]
pub fn grid_dim_ok(n: usize) -> bool { n <= MAX_GRID_DIM }

#[inline]
pub fn sample_count_ok(n: usize) -> bool { n <= MAX_SAMPLES }
