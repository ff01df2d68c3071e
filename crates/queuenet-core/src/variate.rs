//! Random duration sources for inter-arrival and service times.
//!
//! [`Variate`] is a closed sum type over the supported distribution
//! families. Each variant wraps a parameter struct whose constructor
//! validates its inputs, so a `Variate` that exists is always samplable.
//!
//! Sampling is driven by a caller-supplied [`Rng`]: the variate itself is
//! stateless apart from its parameters, and every call is an independent
//! draw. Feeding the same seeded generator reproduces the same sequence.
//!
//! Wherever a logarithm is taken, the unit draw is `1 - U` with
//! `U = rng.gen::<f64>()`, i.e. a value in `(0, 1]`, so `ln(0)` cannot occur.

use std::f64::consts::PI;

use rand::Rng;

use crate::error::VariateError;

/// A unit draw in `(0, 1]`.
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.gen::<f64>()
}

/// Uniform durations on `[low, high)`: `low + (high - low) * U`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform {
    low: f64,
    high: f64,
}

impl Uniform {
    /// Create a uniform variate.
    ///
    /// # Errors
    ///
    /// [`VariateError::EmptyInterval`] if `low >= high` or a bound is not
    /// finite; [`VariateError::NegativeInterval`] if `low < 0`.
    pub fn new(low: f64, high: f64) -> Result<Self, VariateError> {
        if !low.is_finite() || !high.is_finite() || low >= high {
            return Err(VariateError::EmptyInterval { low, high });
        }
        if low < 0.0 {
            return Err(VariateError::NegativeInterval { low });
        }
        Ok(Self { low, high })
    }

    /// Lower bound (inclusive).
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Upper bound (exclusive).
    pub fn high(&self) -> f64 {
        self.high
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.low + (self.high - self.low) * rng.gen::<f64>()
    }
}

/// Exponential durations with rate `lambda`: `-ln(1 - U) / lambda`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// Create an exponential variate.
    ///
    /// # Errors
    ///
    /// [`VariateError::InvalidRate`] if `rate` is not finite and positive.
    pub fn new(rate: f64) -> Result<Self, VariateError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(VariateError::InvalidRate { value: rate });
        }
        Ok(Self { rate })
    }

    /// Create an exponential variate from its mean (`1 / rate`).
    pub fn with_mean(mean: f64) -> Result<Self, VariateError> {
        Self::new(1.0 / mean)
    }

    /// The rate parameter.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        -open_unit(rng).ln() / self.rate
    }
}

/// Normal durations via the Box–Muller transform, clamped at zero.
///
/// Each sample consumes two unit draws; the paired second value of the
/// transform is discarded rather than cached for the next call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Create a normal variate.
    ///
    /// # Errors
    ///
    /// [`VariateError::InvalidMean`] if `mean` is not finite;
    /// [`VariateError::InvalidStdDev`] if `std_dev` is not finite and positive.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, VariateError> {
        if !mean.is_finite() {
            return Err(VariateError::InvalidMean { value: mean });
        }
        if !std_dev.is_finite() || std_dev <= 0.0 {
            return Err(VariateError::InvalidStdDev { value: std_dev });
        }
        Ok(Self { mean, std_dev })
    }

    /// The mean parameter `mu`.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// The standard deviation `sigma`.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u1 = open_unit(rng);
        let u2: f64 = rng.gen();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        (self.mean + self.std_dev * z).max(0.0)
    }
}

/// Erlang durations: the sum of `k` exponential stages with rate `lambda`,
/// drawn as `-ln(U1 * ... * Uk) / lambda`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Erlang {
    shape: u32,
    rate: f64,
}

impl Erlang {
    /// Create an Erlang variate with an integer shape.
    ///
    /// # Errors
    ///
    /// [`VariateError::InvalidShape`] if `shape` is zero;
    /// [`VariateError::InvalidRate`] if `rate` is not finite and positive.
    pub fn new(shape: u32, rate: f64) -> Result<Self, VariateError> {
        if shape == 0 {
            return Err(VariateError::InvalidShape { value: 0.0 });
        }
        if !rate.is_finite() || rate <= 0.0 {
            return Err(VariateError::InvalidRate { value: rate });
        }
        Ok(Self { shape, rate })
    }

    /// Create an Erlang variate from a real-valued shape.
    ///
    /// Non-integer shapes are floored and shapes below one are clamped to
    /// one. Only NaN is refused.
    pub fn from_real_shape(shape: f64, rate: f64) -> Result<Self, VariateError> {
        if shape.is_nan() {
            return Err(VariateError::InvalidShape { value: shape });
        }
        let k = shape.floor().clamp(1.0, f64::from(u32::MAX)) as u32;
        Self::new(k, rate)
    }

    /// The number of exponential stages `k`.
    pub fn shape(&self) -> u32 {
        self.shape
    }

    /// The per-stage rate `lambda`.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let mut product: f64 = 1.0;
        for _ in 0..self.shape {
            product *= open_unit(rng);
        }
        // Long products can underflow to zero for large k.
        -product.max(f64::MIN_POSITIVE).ln() / self.rate
    }
}

/// A fixed duration. Consumes no randomness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    /// Create a constant variate.
    ///
    /// # Errors
    ///
    /// [`VariateError::InvalidDuration`] if `value` is negative or not finite.
    pub fn new(value: f64) -> Result<Self, VariateError> {
        if !value.is_finite() || value < 0.0 {
            return Err(VariateError::InvalidDuration { value });
        }
        Ok(Self { value })
    }

    /// The fixed duration.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// A validated random duration source.
///
/// Every sample is finite and non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Variate {
    /// See [`Uniform`].
    Uniform(Uniform),
    /// See [`Exponential`].
    Exponential(Exponential),
    /// See [`Normal`].
    Normal(Normal),
    /// See [`Erlang`].
    Erlang(Erlang),
    /// See [`Constant`].
    Constant(Constant),
}

impl Variate {
    /// Shorthand for `Variate::Uniform(Uniform::new(low, high)?)`.
    pub fn uniform(low: f64, high: f64) -> Result<Self, VariateError> {
        Uniform::new(low, high).map(Self::Uniform)
    }

    /// Shorthand for `Variate::Exponential(Exponential::new(rate)?)`.
    pub fn exponential(rate: f64) -> Result<Self, VariateError> {
        Exponential::new(rate).map(Self::Exponential)
    }

    /// Exponential variate parameterised by its mean.
    pub fn exponential_mean(mean: f64) -> Result<Self, VariateError> {
        Exponential::with_mean(mean).map(Self::Exponential)
    }

    /// Shorthand for `Variate::Normal(Normal::new(mean, std_dev)?)`.
    pub fn normal(mean: f64, std_dev: f64) -> Result<Self, VariateError> {
        Normal::new(mean, std_dev).map(Self::Normal)
    }

    /// Shorthand for `Variate::Erlang(Erlang::new(shape, rate)?)`.
    pub fn erlang(shape: u32, rate: f64) -> Result<Self, VariateError> {
        Erlang::new(shape, rate).map(Self::Erlang)
    }

    /// Shorthand for `Variate::Constant(Constant::new(value)?)`.
    pub fn constant(value: f64) -> Result<Self, VariateError> {
        Constant::new(value).map(Self::Constant)
    }

    /// Draw one duration.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Uniform(d) => d.sample(rng),
            Self::Exponential(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
            Self::Erlang(d) => d.sample(rng),
            Self::Constant(d) => d.value,
        }
    }

    /// Analytic mean of the distribution.
    ///
    /// For [`Normal`] this is `mu`, ignoring the clamp at zero.
    pub fn mean(&self) -> f64 {
        match self {
            Self::Uniform(d) => (d.low + d.high) / 2.0,
            Self::Exponential(d) => 1.0 / d.rate,
            Self::Normal(d) => d.mean,
            Self::Erlang(d) => f64::from(d.shape) / d.rate,
            Self::Constant(d) => d.value,
        }
    }

    /// Short family name, used in logs and reports.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Uniform(_) => "uniform",
            Self::Exponential(_) => "exponential",
            Self::Normal(_) => "normal",
            Self::Erlang(_) => "erlang",
            Self::Constant(_) => "constant",
        }
    }
}

impl From<Uniform> for Variate {
    fn from(d: Uniform) -> Self {
        Self::Uniform(d)
    }
}

impl From<Exponential> for Variate {
    fn from(d: Exponential) -> Self {
        Self::Exponential(d)
    }
}

impl From<Normal> for Variate {
    fn from(d: Normal) -> Self {
        Self::Normal(d)
    }
}

impl From<Erlang> for Variate {
    fn from(d: Erlang) -> Self {
        Self::Erlang(d)
    }
}

impl From<Constant> for Variate {
    fn from(d: Constant) -> Self {
        Self::Constant(d)
    }
}
