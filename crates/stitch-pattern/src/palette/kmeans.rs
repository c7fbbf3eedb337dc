//! Optional palette derivation by k-means clustering.
//!
//! Not part of the deterministic pipeline contract: centroids are seeded from
//! randomly chosen pixels. A fixed seed makes runs repeatable on one build,
//! nothing more.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::palette::{Palette, PaletteColor};
use crate::buffer::PixelBuffer;
use crate::error::PatternError;

/// Knobs for [`derive_kmeans`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KMeansOptions {
    /// Number of clusters (colours) to find.
    pub k: usize,
    pub max_iterations: usize,
    /// Seed for centroid initialisation. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Only pixels with alpha at or above this take part.
    pub transparency_threshold: u8,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            k: 16,
            max_iterations: 20,
            seed: None,
            transparency_threshold: 20,
        }
    }
}

/// Centroids stop when none moves further than this (Euclidean RGB).
const CONVERGENCE_DISTANCE: f32 = 1.0;

#[derive(Clone)]
struct Center {
    rgb: [f32; 3],
    sum: [f64; 3],
    count: u64,
}

impl Center {
    fn new(rgb: [f32; 3]) -> Self {
        Self {
            rgb,
            sum: [0.0; 3],
            count: 0,
        }
    }

    fn add_sample(&mut self, rgb: [f32; 3]) {
        for c in 0..3 {
            self.sum[c] += rgb[c] as f64;
        }
        self.count += 1;
    }

    /// Move to the mean of the collected samples; returns how far it moved.
    /// An empty cluster keeps its previous position.
    fn update(&mut self) -> f32 {
        let moved = if self.count > 0 {
            let next = [
                (self.sum[0] / self.count as f64) as f32,
                (self.sum[1] / self.count as f64) as f32,
                (self.sum[2] / self.count as f64) as f32,
            ];
            let d = euclidean(self.rgb, next);
            self.rgb = next;
            d
        } else {
            0.0
        };
        self.sum = [0.0; 3];
        self.count = 0;
        moved
    }
}

fn euclidean(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    (dr * dr + dg * dg + db * db).sqrt()
}

fn nearest_center(centers: &[Center], rgb: [f32; 3]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, center) in centers.iter().enumerate() {
        let d = euclidean(rgb, center.rgb);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// Cluster the visible pixels of `buffer` into at most `options.k` colours.
///
/// Entries are named `Cluster-1`, `Cluster-2`, ... in centroid order.
///
/// # Errors
///
/// [`PatternError::Configuration`] when `k` is zero or the buffer has no
/// visible pixels.
pub fn derive_kmeans(buffer: &PixelBuffer, options: &KMeansOptions) -> Result<Palette, PatternError> {
    if options.k == 0 {
        return Err(PatternError::config("k-means needs at least one cluster"));
    }

    let samples: Vec<[f32; 3]> = buffer
        .pixels()
        .filter(|c| c.is_visible(options.transparency_threshold))
        .map(|c| c.rgb_f32())
        .collect();
    if samples.is_empty() {
        return Err(PatternError::config(
            "k-means needs at least one visible pixel",
        ));
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let k = options.k.min(samples.len());
    let mut centers: Vec<Center> = (0..k)
        .map(|_| Center::new(samples[rng.gen_range(0..samples.len())]))
        .collect();

    let mut iterations = 0;
    for _ in 0..options.max_iterations {
        iterations += 1;
        let labels: Vec<usize> = samples
            .par_iter()
            .map(|rgb| nearest_center(&centers, *rgb))
            .collect();

        for (rgb, &label) in samples.iter().zip(labels.iter()) {
            centers[label].add_sample(*rgb);
        }

        let max_moved = centers
            .iter_mut()
            .map(Center::update)
            .fold(0.0f32, f32::max);
        if max_moved < CONVERGENCE_DISTANCE {
            break;
        }
    }
    debug!(k, samples = samples.len(), iterations, "k-means converged");

    Ok(centers
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let byte = |v: f32| v.round().clamp(0.0, 255.0) as u8;
            PaletteColor::new(
                format!("Cluster-{}", i + 1),
                byte(c.rgb[0]),
                byte(c.rgb[1]),
                byte(c.rgb[2]),
            )
        })
        .collect())
}

impl Palette {
    /// Replace every entry by its nearest entry in `target`, dropping
    /// duplicates and keeping the order of first appearance.
    pub fn snap_to(&self, target: &Palette) -> Result<Palette, PatternError> {
        let mut seen = Vec::new();
        for entry in self.colors() {
            let index = target.nearest_index(entry.rgb_f32())?;
            if !seen.contains(&index) {
                seen.push(index);
            }
        }
        Ok(seen
            .into_iter()
            .filter_map(|i| target.get(i).cloned())
            .collect())
    }
}
