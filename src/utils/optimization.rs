//! Derivative-free minimisation used for CSS parameter estimation.

use std::cmp::Ordering;

/// Result of Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    /// The best point found.
    pub optimal_point: Vec<f64>,
    /// Objective value at `optimal_point`.
    pub optimal_value: f64,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Whether a convergence test was met before `max_iter`.
    pub converged: bool,
}

/// Configuration for Nelder-Mead optimization.
#[derive(Debug, Clone)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on objective spread and simplex size.
    pub tolerance: f64,
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrinkage coefficient.
    pub sigma: f64,
    /// Initial simplex step, relative to each coordinate (absolute near zero).
    pub initial_step: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
            initial_step: 0.05,
        }
    }
}

/// Per-coordinate box constraints, applied by clamping.
pub type Bounds<'a> = Option<&'a [(f64, f64)]>;

struct Simplex<'b> {
    vertices: Vec<Vec<f64>>,
    values: Vec<f64>,
    bounds: Bounds<'b>,
}

impl<'b> Simplex<'b> {
    fn around<F: Fn(&[f64]) -> f64>(
        objective: &F,
        initial: &[f64],
        step: f64,
        bounds: Bounds<'b>,
    ) -> Self {
        let mut vertices = vec![clamp(initial.to_vec(), bounds)];
        for i in 0..initial.len() {
            let mut vertex = initial.to_vec();
            vertex[i] += if initial[i].abs() > 1e-10 {
                step * initial[i].abs()
            } else {
                step
            };
            vertices.push(clamp(vertex, bounds));
        }
        let values = vertices.iter().map(|v| guarded(objective, v)).collect();
        Self {
            vertices,
            values,
            bounds,
        }
    }

    /// Reorder vertices best-first.
    fn sort(&mut self) {
        let mut order: Vec<usize> = (0..self.vertices.len()).collect();
        order.sort_by(|&a, &b| {
            self.values[a]
                .partial_cmp(&self.values[b])
                .unwrap_or(Ordering::Equal)
        });
        self.vertices = order.iter().map(|&i| self.vertices[i].clone()).collect();
        self.values = order.iter().map(|&i| self.values[i]).collect();
    }

    /// Centroid of every vertex but the worst (last after `sort`).
    fn centroid(&self) -> Vec<f64> {
        let n = self.vertices.len() - 1;
        let mut centroid = vec![0.0; self.vertices[0].len()];
        for vertex in &self.vertices[..n] {
            for (c, x) in centroid.iter_mut().zip(vertex) {
                *c += x / n as f64;
            }
        }
        centroid
    }

    /// Point `centroid + coef * (towards - centroid)`, clamped to bounds.
    fn along(&self, centroid: &[f64], towards: &[f64], coef: f64) -> Vec<f64> {
        let point = centroid
            .iter()
            .zip(towards)
            .map(|(c, t)| c + coef * (t - c))
            .collect();
        clamp(point, self.bounds)
    }

    fn replace_worst(&mut self, vertex: Vec<f64>, value: f64) {
        let worst = self.vertices.len() - 1;
        self.vertices[worst] = vertex;
        self.values[worst] = value;
    }

    fn shrink<F: Fn(&[f64]) -> f64>(&mut self, objective: &F, sigma: f64) {
        let best = self.vertices[0].clone();
        for i in 1..self.vertices.len() {
            let shrunk = self.along(&best, &self.vertices[i], sigma);
            self.values[i] = guarded(objective, &shrunk);
            self.vertices[i] = shrunk;
        }
    }

    fn spread(&self) -> f64 {
        self.values[self.values.len() - 1] - self.values[0]
    }

    fn diameter(&self, centroid: &[f64]) -> f64 {
        self.vertices
            .iter()
            .map(|v| {
                v.iter()
                    .zip(centroid)
                    .map(|(a, b)| (a - b).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .fold(0.0, f64::max)
    }
}

/// Minimise `objective` starting from `initial`.
///
/// Non-finite objective values are treated as `f64::MAX` so that an
/// exploding parameter region is simply walked away from.
///
/// # Example
/// ```
/// use sarima_roi::utils::optimization::{nelder_mead, NelderMeadConfig};
///
/// let result = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] + 1.0).powi(2),
///     &[0.0, 0.0],
///     None,
///     NelderMeadConfig::default(),
/// );
///
/// assert!((result.optimal_point[0] - 2.0).abs() < 0.01);
/// assert!((result.optimal_point[1] + 1.0).abs() < 0.01);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: Bounds<'_>,
    config: NelderMeadConfig,
) -> NelderMeadResult
where
    F: Fn(&[f64]) -> f64,
{
    if initial.is_empty() {
        return NelderMeadResult {
            optimal_point: vec![],
            optimal_value: f64::NAN,
            iterations: 0,
            converged: false,
        };
    }

    let mut simplex = Simplex::around(&objective, initial, config.initial_step, bounds);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;
        simplex.sort();

        let centroid = simplex.centroid();
        if simplex.spread() < config.tolerance || simplex.diameter(&centroid) < config.tolerance {
            converged = true;
            break;
        }

        let n = simplex.vertices.len() - 1;
        let best = simplex.values[0];
        let second_worst = simplex.values[n - 1];
        let worst = simplex.values[n];

        let reflected = simplex.along(&centroid, &simplex.vertices[n], -config.alpha);
        let reflected_value = guarded(&objective, &reflected);

        if reflected_value < best {
            let expanded = simplex.along(&centroid, &reflected, config.gamma);
            let expanded_value = guarded(&objective, &expanded);
            if expanded_value < reflected_value {
                simplex.replace_worst(expanded, expanded_value);
            } else {
                simplex.replace_worst(reflected, reflected_value);
            }
            continue;
        }

        if reflected_value < second_worst {
            simplex.replace_worst(reflected, reflected_value);
            continue;
        }

        // Outside contraction when the reflection beat the worst vertex, inside otherwise
        let (target, threshold) = if reflected_value < worst {
            (reflected, reflected_value)
        } else {
            (simplex.vertices[n].clone(), worst)
        };
        let contracted = simplex.along(&centroid, &target, config.rho);
        let contracted_value = guarded(&objective, &contracted);
        if contracted_value < threshold {
            simplex.replace_worst(contracted, contracted_value);
            continue;
        }

        simplex.shrink(&objective, config.sigma);
    }

    simplex.sort();
    NelderMeadResult {
        optimal_point: simplex.vertices.swap_remove(0),
        optimal_value: simplex.values[0],
        iterations,
        converged,
    }
}

fn guarded<F: Fn(&[f64]) -> f64>(objective: &F, point: &[f64]) -> f64 {
    let value = objective(point);
    if value.is_finite() {
        value
    } else {
        f64::MAX
    }
}

fn clamp(point: Vec<f64>, bounds: Bounds<'_>) -> Vec<f64> {
    match bounds {
        None => point,
        Some(b) => point
            .into_iter()
            .enumerate()
            .map(|(i, x)| match b.get(i) {
                Some(&(lo, hi)) => x.clamp(lo, hi),
                None => x,
            })
            .collect(),
    }
}
