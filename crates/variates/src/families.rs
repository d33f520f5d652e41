//! Continuous variate families
//!
//! Normal, exponential, Weibull and gamma generators follow Law and Kelton,
//! _Simulation Modeling and Analysis_ (2nd ed.), pp. 486-490. All of them
//! draw from [`UnitRandom`] streams, so a given seed always yields the same
//! sequence.

use crate::Variate;
use crate::unit::{HALFWAY_SEED, UnitRandom};

// =============================================================================
// Uniform
// =============================================================================

/// Uniform over [a, b); the bounds may be given in either order
#[derive(Debug, Clone)]
pub struct UniformRandom {
    unit: UnitRandom,
    min: f64,
    width: f64,
}

impl UniformRandom {
    pub fn new(a: f64, b: f64) -> Self {
        let mut uniform = UniformRandom {
            unit: UnitRandom::new(),
            min: 0.0,
            width: 1.0,
        };
        uniform.set(a, b);
        uniform
    }

    pub fn set(&mut self, a: f64, b: f64) {
        if a < b {
            self.min = a;
            self.width = b - a;
        } else {
            self.min = b;
            self.width = a - b;
        }
    }

    pub fn seed(&mut self, seed: i64) {
        self.unit.seed(seed);
    }

    /// Current (lower, upper) bounds
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.min + self.width)
    }
}

impl Variate for UniformRandom {
    fn sample(&mut self) -> f64 {
        self.min + self.width * self.unit.next_real()
    }
}

// =============================================================================
// Normal
// =============================================================================

/// Normal with the given mean and standard deviation.
///
/// Uses the polar method, which produces deviates in pairs; the second one
/// is cached and handed out on the next call.
#[derive(Debug, Clone)]
pub struct NormalRandom {
    u1: UnitRandom,
    u2: UnitRandom,
    mean: f64,
    sd: f64,
    pending: Option<f64>,
}

impl NormalRandom {
    pub fn new(mean: f64, sd: f64) -> Self {
        NormalRandom {
            u1: UnitRandom::new(),
            u2: UnitRandom::with_seed(HALFWAY_SEED),
            mean,
            sd,
            pending: None,
        }
    }

    /// Change parameters. Setting the current parameters again keeps the
    /// cached second deviate.
    pub fn set(&mut self, mean: f64, sd: f64) {
        if (mean - self.mean).abs() > f64::EPSILON || (sd - self.sd).abs() > f64::EPSILON {
            self.mean = mean;
            self.sd = sd;
            self.pending = None;
        }
    }

    pub fn seed(&mut self, seed1: i64, seed2: i64) {
        self.u1.seed(seed1);
        self.u2.seed(seed2);
    }

    pub fn params(&self) -> (f64, f64) {
        (self.mean, self.sd)
    }
}

impl Variate for NormalRandom {
    fn sample(&mut self) -> f64 {
        if let Some(x2) = self.pending.take() {
            return x2;
        }

        let (v1, v2, w) = loop {
            let v1 = 2.0 * self.u1.next_real() - 1.0;
            let v2 = 2.0 * self.u2.next_real() - 1.0;
            let w = v1 * v1 + v2 * v2;
            if w <= 1.0 && w >= f64::EPSILON {
                break (v1, v2, w);
            }
        };

        let y = (-2.0 * w.ln() / w).sqrt();
        self.pending = Some(self.sd * (v2 * y) + self.mean);
        self.sd * (v1 * y) + self.mean
    }
}

// =============================================================================
// Exponential
// =============================================================================

/// Exponential with the given mean (equal to its standard deviation)
#[derive(Debug, Clone)]
pub struct ExponentialRandom {
    unit: UnitRandom,
    sd: f64,
}

impl ExponentialRandom {
    pub fn new(sd: f64) -> Self {
        ExponentialRandom {
            unit: UnitRandom::new(),
            sd,
        }
    }

    pub fn set(&mut self, sd: f64) {
        self.sd = sd;
    }

    pub fn seed(&mut self, seed: i64) {
        self.unit.seed(seed);
    }
}

impl Variate for ExponentialRandom {
    fn sample(&mut self) -> f64 {
        -self.sd * open_unit(&mut self.unit).ln()
    }
}

/// Draw from (0, 1], never closer to zero than machine epsilon
fn open_unit(unit: &mut UnitRandom) -> f64 {
    loop {
        let v = 1.0 - unit.next_real();
        if v >= f64::EPSILON {
            return v;
        }
    }
}

// =============================================================================
// Weibull
// =============================================================================

/// Weibull with shape `alpha` and scale `beta`
#[derive(Debug, Clone)]
pub struct WeibullRandom {
    unit: UnitRandom,
    // None when alpha is too small to invert (degenerate spike at zero)
    alpha_inv: Option<f64>,
    beta: f64,
}

impl WeibullRandom {
    pub fn new(alpha: f64, beta: f64) -> Self {
        let mut weibull = WeibullRandom {
            unit: UnitRandom::new(),
            alpha_inv: None,
            beta,
        };
        weibull.set(alpha, beta);
        weibull
    }

    pub fn set(&mut self, alpha: f64, beta: f64) {
        self.alpha_inv = if alpha < f64::EPSILON {
            None
        } else {
            Some(1.0 / alpha)
        };
        self.beta = beta;
    }

    pub fn seed(&mut self, seed: i64) {
        self.unit.seed(seed);
    }
}

impl Variate for WeibullRandom {
    fn sample(&mut self) -> f64 {
        let Some(alpha_inv) = self.alpha_inv else {
            return 0.0;
        };

        let v = loop {
            let v = self.unit.next_real();
            if v >= f64::EPSILON {
                break v;
            }
        };
        self.beta * (-v.ln()).powf(alpha_inv)
    }
}

// =============================================================================
// Gamma
// =============================================================================

#[derive(Debug, Clone, Copy)]
enum GammaRegime {
    /// alpha == 1: exponential with mean beta
    Exponential,
    /// 0 < alpha < 1: Ahrens-Dieter GS acceptance-rejection
    Small { alpha: f64, alpha_inv: f64, b: f64 },
    /// alpha > 1: Cheng's GB method
    Large {
        alpha: f64,
        a: f64,
        b: f64,
        q: f64,
        theta: f64,
        d: f64,
    },
}

/// Gamma with shape `alpha` and scale `beta`
#[derive(Debug, Clone)]
pub struct GammaRandom {
    u1: UnitRandom,
    u2: UnitRandom,
    beta: f64,
    regime: GammaRegime,
}

impl GammaRandom {
    pub fn new(alpha: f64, beta: f64) -> Self {
        let mut gamma = GammaRandom {
            u1: UnitRandom::new(),
            u2: UnitRandom::with_seed(HALFWAY_SEED),
            beta,
            regime: GammaRegime::Exponential,
        };
        gamma.set(alpha, beta);
        gamma
    }

    pub fn set(&mut self, alpha: f64, beta: f64) {
        self.beta = beta;
        self.regime = if (alpha - 1.0).abs() < f64::EPSILON {
            GammaRegime::Exponential
        } else if alpha < 1.0 {
            GammaRegime::Small {
                alpha,
                alpha_inv: 1.0 / alpha,
                b: (std::f64::consts::E + alpha) / std::f64::consts::E,
            }
        } else {
            let a_inv = (2.0 * alpha - 1.0).sqrt();
            GammaRegime::Large {
                alpha,
                a: 1.0 / a_inv,
                b: alpha - 4.0_f64.ln(),
                q: alpha + a_inv,
                theta: 4.5,
                d: 1.0 + 4.5_f64.ln(),
            }
        };
    }

    pub fn seed(&mut self, seed1: i64, seed2: i64) {
        self.u1.seed(seed1);
        self.u2.seed(seed2);
    }

    /// Draw from gamma(alpha, 1)
    fn standard(&mut self) -> f64 {
        match self.regime {
            GammaRegime::Exponential => -open_unit(&mut self.u1).ln(),
            GammaRegime::Small {
                alpha,
                alpha_inv,
                b,
            } => loop {
                let p = b * self.u1.next_real();
                if p <= 1.0 {
                    let y = p.powf(alpha_inv);
                    if self.u2.next_real() <= (-y).exp() {
                        return y;
                    }
                } else {
                    let t = (b - p) * alpha_inv;
                    if t < f64::EPSILON {
                        return t;
                    }
                    let y = -t.ln();
                    if self.u2.next_real() <= y.powf(alpha - 1.0) {
                        return y;
                    }
                }
            },
            GammaRegime::Large {
                alpha,
                a,
                b,
                q,
                theta,
                d,
            } => loop {
                let u1 = loop {
                    let u = self.u1.next_real();
                    if u >= f64::EPSILON && (1.0 - u) >= f64::EPSILON {
                        break u;
                    }
                };
                let u2 = self.u2.next_real();
                let v = a * (u1 / (1.0 - u1)).ln();
                let y = alpha * v.exp();
                let z = u1 * u1 * u2;
                let w = b + q * v - y;
                if w + d - theta * z >= 0.0 {
                    return y;
                }
                if z < f64::EPSILON || w >= z.ln() {
                    return y;
                }
            },
        }
    }
}

impl Variate for GammaRandom {
    fn sample(&mut self) -> f64 {
        self.beta * self.standard()
    }
}

// =============================================================================
// Pearson type V
// =============================================================================

/// Pearson type V with shape `alpha` and scale `beta`: the reciprocal of a
/// gamma(alpha, 1/beta) draw.
#[derive(Debug, Clone)]
pub struct PearsonVRandom {
    gamma: GammaRandom,
}

impl PearsonVRandom {
    pub fn new(alpha: f64, beta: f64) -> Self {
        PearsonVRandom {
            gamma: GammaRandom::new(alpha, Self::gamma_scale(beta)),
        }
    }

    pub fn set(&mut self, alpha: f64, beta: f64) {
        self.gamma.set(alpha, Self::gamma_scale(beta));
    }

    pub fn seed(&mut self, seed1: i64, seed2: i64) {
        self.gamma.seed(seed1, seed2);
    }

    fn gamma_scale(beta: f64) -> f64 {
        if beta < f64::EPSILON {
            f64::MAX
        } else {
            1.0 / beta
        }
    }
}

impl Variate for PearsonVRandom {
    fn sample(&mut self) -> f64 {
        let v = self.gamma.sample();
        if v < f64::EPSILON { f64::MAX } else { 1.0 / v }
    }
}
