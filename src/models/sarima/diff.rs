//! Lag-polynomial helpers for seasonal differencing and ψ-weights.
//!
//! Polynomials are coefficient vectors indexed by lag: `poly[k]` multiplies
//! `B^k`, with `poly[0] == 1.0`.

/// Multiply two lag polynomials.
pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return vec![];
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// Expand `(1 - B)^d (1 - B^period)^seasonal_d`.
pub fn differencing_polynomial(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = multiply(&poly, &[1.0, -1.0]);
    }
    if period > 0 {
        let mut seasonal = vec![0.0; period + 1];
        seasonal[0] = 1.0;
        seasonal[period] = -1.0;
        for _ in 0..seasonal_d {
            poly = multiply(&poly, &seasonal);
        }
    }
    poly
}

/// Spread `coefficients` onto lags `step, 2·step, ...` as `1 + sign·Σ c_i B^{i·step}`.
///
/// With `sign = -1.0` this is an AR polynomial, with `sign = 1.0` an MA one.
pub fn lag_polynomial(coefficients: &[f64], step: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coefficients.len() * step + 1];
    poly[0] = 1.0;
    for (i, c) in coefficients.iter().enumerate() {
        poly[(i + 1) * step] = sign * c;
    }
    poly
}

/// Apply a lag polynomial to a series.
///
/// Output index `j` corresponds to input index `j + poly.len() - 1`; the first
/// `poly.len() - 1` observations are consumed as burn-in.
pub fn apply(series: &[f64], poly: &[f64]) -> Vec<f64> {
    let burn_in = poly.len().saturating_sub(1);
    if series.len() <= burn_in {
        return vec![];
    }
    (burn_in..series.len())
        .map(|t| {
            poly.iter()
                .enumerate()
                .map(|(k, c)| c * series[t - k])
                .sum()
        })
        .collect()
}

/// First `n` ψ-weights of the model `ar(B) y_t = ma(B) e_t`.
///
/// `ar` must include any differencing factors.
pub fn psi_weights(ar: &[f64], ma: &[f64], n: usize) -> Vec<f64> {
    let mut psi = Vec::with_capacity(n);
    for j in 0..n {
        let theta = ma.get(j).copied().unwrap_or(0.0);
        let feedback: f64 = (1..ar.len().min(j + 1))
            .map(|i| ar[i] * psi[j - i])
            .sum();
        psi.push(if j == 0 { 1.0 } else { theta - feedback });
    }
    psi
}
