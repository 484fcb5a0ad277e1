//! Seasonal ARIMA model estimated by conditional sum of squares.

use crate::core::{Forecast, TimeSeries};
use crate::error::{ForecastError, Result};
use crate::models::sarima::diff::{
    apply, differencing_polynomial, lag_polynomial, multiply, psi_weights,
};
use crate::models::{FittedModel, Fitter, Order, SeasonalOrder};
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use crate::utils::stats::{mean, normal_critical_value};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Whether a constant term is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Intercept {
    /// Constant only when the model has no differencing.
    Auto,
    Always,
    /// No constant term, the state-space SARIMAX convention.
    #[default]
    Never,
}

/// Configuration for [`SarimaFitter`].
#[derive(Debug, Clone)]
pub struct SarimaConfig {
    /// Bound AR coefficients to (-0.99, 0.99).
    pub enforce_stationarity: bool,
    /// Bound MA coefficients to (-0.99, 0.99).
    pub enforce_invertibility: bool,
    /// Constant term policy.
    pub intercept: Intercept,
    /// Maximum Nelder-Mead iterations.
    pub max_iter: usize,
    /// Nelder-Mead convergence tolerance.
    pub tolerance: f64,
}

impl Default for SarimaConfig {
    fn default() -> Self {
        Self {
            enforce_stationarity: false,
            enforce_invertibility: false,
            intercept: Intercept::Never,
            max_iter: 2000,
            tolerance: 1e-8,
        }
    }
}

impl SarimaConfig {
    pub fn enforce_stationarity(mut self, enforce: bool) -> Self {
        self.enforce_stationarity = enforce;
        self
    }

    pub fn enforce_invertibility(mut self, enforce: bool) -> Self {
        self.enforce_invertibility = enforce;
        self
    }

    pub fn with_intercept(mut self, intercept: Intercept) -> Self {
        self.intercept = intercept;
        self
    }

    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

/// Estimated SARIMA coefficients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SarimaParams {
    /// Mean of the differenced series (0 when no constant is estimated).
    pub intercept: f64,
    /// Non-seasonal AR coefficients φ.
    pub ar: Vec<f64>,
    /// Seasonal AR coefficients Φ.
    pub seasonal_ar: Vec<f64>,
    /// Non-seasonal MA coefficients θ.
    pub ma: Vec<f64>,
    /// Seasonal MA coefficients Θ.
    pub seasonal_ma: Vec<f64>,
}

impl SarimaParams {
    /// `φ(B)Φ(B^s)` as a lag polynomial.
    fn ar_polynomial(&self, s: usize) -> Vec<f64> {
        multiply(
            &lag_polynomial(&self.ar, 1, -1.0),
            &lag_polynomial(&self.seasonal_ar, s, -1.0),
        )
    }

    /// `θ(B)Θ(B^s)` as a lag polynomial.
    fn ma_polynomial(&self, s: usize) -> Vec<f64> {
        multiply(
            &lag_polynomial(&self.ma, 1, 1.0),
            &lag_polynomial(&self.seasonal_ma, s, 1.0),
        )
    }
}

/// Parameter vector layout: `[intercept?, φ.., Φ.., θ.., Θ..]`.
#[derive(Debug, Clone, Copy)]
struct Layout {
    order: Order,
    seasonal: SeasonalOrder,
    intercept: bool,
}

impl Layout {
    fn len(&self) -> usize {
        usize::from(self.intercept)
            + self.order.p
            + self.order.q
            + self.seasonal.cap_p
            + self.seasonal.cap_q
    }

    fn params(&self, x: &[f64]) -> SarimaParams {
        let (intercept, rest) = match (self.intercept, x.split_first()) {
            (true, Some((mu, rest))) => (*mu, rest),
            _ => (0.0, x),
        };
        let (ar, rest) = rest.split_at(self.order.p);
        let (seasonal_ar, rest) = rest.split_at(self.seasonal.cap_p);
        let (ma, seasonal_ma) = rest.split_at(self.order.q);

        SarimaParams {
            intercept,
            ar: ar.to_vec(),
            seasonal_ar: seasonal_ar.to_vec(),
            ma: ma.to_vec(),
            seasonal_ma: seasonal_ma.to_vec(),
        }
    }

    fn css(&self, w: &[f64], x: &[f64]) -> f64 {
        let params = self.params(x);
        let ar = params.ar_polynomial(self.seasonal.s);
        let ma = params.ma_polynomial(self.seasonal.s);
        let start = ar.len() - 1;
        let residuals = conditional_residuals(w, params.intercept, &ar, &ma, start);
        let css: f64 = residuals[start..].iter().map(|e| e * e).sum();
        if css.is_finite() {
            css
        } else {
            f64::INFINITY
        }
    }
}

/// One-step conditional mean of `w[j]` given everything before it.
fn arma_mean(w: &[f64], e: &[f64], j: usize, mu: f64, ar: &[f64], ma: &[f64]) -> f64 {
    let ar_part: f64 = (1..ar.len().min(j + 1))
        .map(|k| ar[k] * (w[j - k] - mu))
        .sum();
    let ma_part: f64 = (1..ma.len().min(j + 1)).map(|k| ma[k] * e[j - k]).sum();
    mu - ar_part + ma_part
}

/// Residuals conditioned on zero pre-sample shocks; zero before `start`.
fn conditional_residuals(w: &[f64], mu: f64, ar: &[f64], ma: &[f64], start: usize) -> Vec<f64> {
    let mut e = vec![0.0; w.len()];
    for j in start..w.len() {
        e[j] = w[j] - arma_mean(w, &e, j, mu, ar, ma);
    }
    e
}

fn validate_orders(seasonal: SeasonalOrder) -> Result<()> {
    if seasonal.s == 1 {
        return Err(ForecastError::InvalidParameter(
            "seasonal period must be greater than 1".to_string(),
        ));
    }
    if seasonal.has_terms() && seasonal.s == 0 {
        return Err(ForecastError::InvalidParameter(
            "seasonal AR, MA or differencing terms need a nonzero seasonal period".to_string(),
        ));
    }
    Ok(())
}

/// The bundled fitting capability: CSS-estimated SARIMA.
///
/// # Example
/// ```
/// use sarima_roi::core::TimeSeries;
/// use sarima_roi::models::{FittedModel, Fitter, Order, SarimaFitter, SeasonalOrder};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();
/// let values: Vec<f64> = (0..48).map(|i| 100.0 + i as f64 + (i as f64 * 0.7).sin()).collect();
/// let series = TimeSeries::monthly(start, values).unwrap();
///
/// let model = SarimaFitter::new()
///     .fit(&series, Order::new(1, 1, 0), SeasonalOrder::none())
///     .unwrap();
/// assert!(model.information_criterion().is_finite());
/// assert_eq!(model.forecast(6, 0.95).unwrap().horizon(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SarimaFitter {
    config: SarimaConfig,
}

impl SarimaFitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SarimaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SarimaConfig {
        &self.config
    }

    fn estimate(&self, w: &[f64], layout: Layout) -> Result<(SarimaParams, bool)> {
        let mut initial = Vec::with_capacity(layout.len());
        let mut bounds = Vec::with_capacity(layout.len());
        let free = (f64::NEG_INFINITY, f64::INFINITY);
        let ar_bound = if self.config.enforce_stationarity {
            (-0.99, 0.99)
        } else {
            free
        };
        let ma_bound = if self.config.enforce_invertibility {
            (-0.99, 0.99)
        } else {
            free
        };

        if layout.intercept {
            initial.push(mean(w));
            bounds.push(free);
        }
        for (count, bound) in [
            (layout.order.p, ar_bound),
            (layout.seasonal.cap_p, ar_bound),
            (layout.order.q, ma_bound),
            (layout.seasonal.cap_q, ma_bound),
        ] {
            initial.extend((0..count).map(|i| 0.1 / (i + 1) as f64));
            bounds.extend(std::iter::repeat(bound).take(count));
        }

        if initial.is_empty() {
            return Ok((SarimaParams::default(), true));
        }

        let config = NelderMeadConfig {
            max_iter: self.config.max_iter,
            tolerance: self.config.tolerance,
            ..Default::default()
        };
        let result = nelder_mead(|x| layout.css(w, x), &initial, Some(bounds.as_slice()), config);

        if !result.optimal_value.is_finite() || result.optimal_value >= f64::MAX {
            return Err(ForecastError::ComputationError(
                "conditional sum of squares has no finite optimum".to_string(),
            ));
        }
        if !result.converged {
            debug!(
                iterations = result.iterations,
                "CSS optimisation stopped before converging"
            );
        }

        Ok((layout.params(&result.optimal_point), result.converged))
    }
}

impl Fitter for SarimaFitter {
    type Model = SarimaModel;

    fn fit(
        &self,
        series: &TimeSeries,
        order: Order,
        seasonal_order: SeasonalOrder,
    ) -> Result<SarimaModel> {
        validate_orders(seasonal_order)?;

        let intercept = match self.config.intercept {
            Intercept::Auto => order.d + seasonal_order.cap_d == 0,
            Intercept::Always => true,
            Intercept::Never => false,
        };
        let layout = Layout {
            order,
            seasonal: seasonal_order,
            intercept,
        };

        let s = seasonal_order.s;
        let diff_poly = differencing_polynomial(order.d, seasonal_order.cap_d, s);
        let burn_in = diff_poly.len() - 1;
        let max_lag = (order.p + seasonal_order.cap_p * s).max(order.q + seasonal_order.cap_q * s);
        let needed = burn_in + max_lag + layout.len() + 2;

        let values = series.values();
        if values.len() < needed {
            return Err(ForecastError::InsufficientData {
                needed,
                got: values.len(),
            });
        }

        let differenced = apply(values, &diff_poly);
        let (params, converged) = self.estimate(&differenced, layout)?;

        SarimaModel::assemble(
            series.clone(),
            layout,
            diff_poly,
            differenced,
            params,
            converged,
        )
    }
}

/// A fitted seasonal ARIMA model.
#[derive(Debug, Clone)]
pub struct SarimaModel {
    order: Order,
    seasonal_order: SeasonalOrder,
    series: TimeSeries,
    /// `(1-B)^d (1-B^s)^D`
    diff_poly: Vec<f64>,
    differenced: Vec<f64>,
    params: SarimaParams,
    ar_poly: Vec<f64>,
    ma_poly: Vec<f64>,
    /// Residuals on the differenced scale.
    residuals: Vec<f64>,
    sigma2: f64,
    aic: f64,
    bic: f64,
    converged: bool,
}

impl SarimaModel {
    fn assemble(
        series: TimeSeries,
        layout: Layout,
        diff_poly: Vec<f64>,
        differenced: Vec<f64>,
        params: SarimaParams,
        converged: bool,
    ) -> Result<Self> {
        let s = layout.seasonal.s;
        let ar_poly = params.ar_polynomial(s);
        let ma_poly = params.ma_polynomial(s);
        let start = ar_poly.len() - 1;
        let residuals =
            conditional_residuals(&differenced, params.intercept, &ar_poly, &ma_poly, start);

        let n_eff = (differenced.len() - start) as f64;
        let sigma2 = residuals[start..].iter().map(|e| e * e).sum::<f64>() / n_eff;

        // Gaussian log-likelihood at the CSS variance; sigma² counts as a parameter
        let k = (layout.len() + 1) as f64;
        let ll = -0.5 * n_eff * (1.0 + (2.0 * std::f64::consts::PI * sigma2).ln());
        let aic = -2.0 * ll + 2.0 * k;
        let bic = -2.0 * ll + k * n_eff.ln();

        if !aic.is_finite() {
            return Err(ForecastError::ComputationError(format!(
                "non-finite information criterion (residual variance {sigma2})"
            )));
        }

        Ok(Self {
            order: layout.order,
            seasonal_order: layout.seasonal,
            series,
            diff_poly,
            differenced,
            params,
            ar_poly,
            ma_poly,
            residuals,
            sigma2,
            aic,
            bic,
            converged,
        })
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn seasonal_order(&self) -> SeasonalOrder {
        self.seasonal_order
    }

    pub fn params(&self) -> &SarimaParams {
        &self.params
    }

    pub fn aic(&self) -> f64 {
        self.aic
    }

    pub fn bic(&self) -> f64 {
        self.bic
    }

    /// Residual variance σ².
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Training series the model was fitted on.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// Observations consumed by differencing, `d + D·s`.
    pub fn burn_in(&self) -> usize {
        self.diff_poly.len() - 1
    }

    /// Predicted levels for indices `start..end`.
    ///
    /// Indices at or past the end of the training series are always
    /// projected on earlier predictions.
    fn project(&self, start: usize, end: usize, dynamic: bool) -> Vec<f64> {
        let n = self.series.len();
        let burn_in = self.burn_in();
        let mu = self.params.intercept;

        let mut y = self.series.values().to_vec();
        let mut w = self.differenced.clone();
        let mut e = self.residuals.clone();
        let mut out = Vec::with_capacity(end.saturating_sub(start));

        for t in start..end {
            let j = t - burn_in;
            let w_hat = arma_mean(&w, &e, j, mu, &self.ar_poly, &self.ma_poly);
            let carried: f64 = (1..self.diff_poly.len())
                .map(|k| self.diff_poly[k] * y[t - k])
                .sum();
            let y_hat = w_hat - carried;

            if t >= n {
                y.push(y_hat);
                w.push(w_hat);
                e.push(0.0);
            } else if dynamic {
                y[t] = y_hat;
                w[j] = w_hat;
                e[j] = 0.0;
            }
            out.push(y_hat);
        }

        out
    }

    /// Standard errors for 1..=h steps ahead: `σ √(Σ ψ_j²)`.
    fn projection_std_errors(&self, h: usize) -> Vec<f64> {
        let integrated_ar = multiply(&self.ar_poly, &self.diff_poly);
        let psi = psi_weights(&integrated_ar, &self.ma_poly, h);
        let mut acc = 0.0;
        psi.iter()
            .map(|p| {
                acc += p * p;
                (self.sigma2 * acc).sqrt()
            })
            .collect()
    }

    fn band(
        timestamps: Vec<DateTime<Utc>>,
        mean: Vec<f64>,
        std_errors: &[f64],
        level: f64,
    ) -> Result<Forecast> {
        let z = normal_critical_value(level)?;
        let lower = mean.iter().zip(std_errors).map(|(m, se)| m - z * se).collect();
        let upper = mean.iter().zip(std_errors).map(|(m, se)| m + z * se).collect();
        Forecast::with_intervals(timestamps, mean, lower, upper, level)
    }
}

impl FittedModel for SarimaModel {
    fn information_criterion(&self) -> f64 {
        self.aic
    }

    fn predict_in_sample(
        &self,
        start: DateTime<Utc>,
        dynamic: bool,
        level: f64,
    ) -> Result<Forecast> {
        let n = self.series.len();
        let start_idx = self.series.position_at_or_after(start).ok_or_else(|| {
            ForecastError::InvalidParameter(format!(
                "prediction start {start} is after the last observation"
            ))
        })?;
        // Differencing consumes the first observations; carry the last
        // value forward until the ARMA recursion has history to work with
        let first = start_idx.max(self.burn_in());
        let values = self.series.values();
        let mut mean: Vec<f64> = (start_idx..first)
            .map(|t| {
                let source = if dynamic { start_idx } else { t };
                values[source.saturating_sub(1)]
            })
            .collect();
        mean.extend(self.project(first, n, dynamic));

        let std_errors = if dynamic {
            self.projection_std_errors(mean.len())
        } else {
            vec![self.sigma2.sqrt(); mean.len()]
        };
        let timestamps = self.series.timestamps()[start_idx..].to_vec();

        Self::band(timestamps, mean, &std_errors, level)
    }

    fn forecast(&self, steps: usize, level: f64) -> Result<Forecast> {
        let n = self.series.len();
        let timestamps = self.series.future_timestamps(steps)?;
        let mean = self.project(n, n + steps, true);
        let std_errors = self.projection_std_errors(steps);

        Self::band(timestamps, mean, &std_errors, level)
    }

    fn name(&self) -> &str {
        "SARIMA"
    }
}
