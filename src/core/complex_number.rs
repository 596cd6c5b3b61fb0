//! Complex numbers stored in cartesian form, rounded to two decimal places.
//!
//! Every constructor goes through [`round2`], so a `ComplexNumber` never holds
//! more than two decimals. Arithmetic re-rounds its result, which means the
//! usual identities (`(a - b) + b == a`) hold only up to that granularity.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::core::error::CoreError;

/// How `/` and [`ComplexNumber::divide_with`] compute a quotient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionMode {
    /// Polar shortcut: `(r1/r2)·cos(φ1-φ2)` for the real part, `sin(φ1-φ2)` for the
    /// imaginary part, with the degree-valued difference fed straight into cos/sin.
    #[default]
    Reference,
    /// Textbook division `a·conj(b) / |b|²`.
    Exact,
}

impl DivisionMode {
    pub fn label(self) -> &'static str {
        match self {
            DivisionMode::Reference => "reference",
            DivisionMode::Exact => "exact",
        }
    }
}

impl FromStr for DivisionMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reference" | "ref" => Ok(DivisionMode::Reference),
            "exact" => Ok(DivisionMode::Exact),
            other => Err(CoreError::invalid_argument(&format!(
                "unknown division mode '{other}' (expected reference|exact)"
            ))),
        }
    }
}

const ROUNDING_CEILING: f64 = 4_503_599_627_370_496.0 / 100.0;

/// Round half to even at two decimals, folding `-0.0` into `0.0`.
///
/// The fold means a conjugated real prints `0.000 * i`, never `-0.000 * i`.
/// Magnitudes past `2^52 / 100` have no hundredths to round and pass through,
/// so `x * 100` cannot overflow.
pub fn round2(x: f64) -> f64 {
    if x.abs() >= ROUNDING_CEILING {
        return x;
    }
    let r = (x * 100.0).round_ties_even() / 100.0;
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComplexNumber {
    pub real: f64,
    pub imag: f64,
}

impl ComplexNumber {
    // Constructor; rounds both parts
    pub fn new(real: f64, imag: f64) -> Self {
        ComplexNumber {
            real: round2(real),
            imag: round2(imag),
        }
    }

    /// Like [`ComplexNumber::new`] but refuses NaN and infinities.
    pub fn try_new(real: f64, imag: f64) -> Result<Self, CoreError> {
        if !real.is_finite() || !imag.is_finite() {
            return Err(CoreError::invalid_argument(&format!(
                "components must be finite (got {real}, {imag})"
            )));
        }
        Ok(ComplexNumber::new(real, imag))
    }

    pub fn is_zero(&self) -> bool {
        self.real == 0.0 && self.imag == 0.0
    }

    // Magnitude of the complex number
    pub fn magnitude(&self) -> f64 {
        (self.real.powi(2) + self.imag.powi(2)).sqrt()
    }

    // Phase (angle) of the complex number in degrees, within (-180, 180]
    pub fn phase(&self) -> f64 {
        let phi = self.imag.atan2(self.real);
        phi * 180.0 / PI
    }

    // Addition of two complex numbers
    pub fn add(&self, other: &ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(self.real + other.real, self.imag + other.imag)
    }

    // Subtraction of two complex numbers
    pub fn subtract(&self, other: &ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(self.real - other.real, self.imag - other.imag)
    }

    // Multiplication of two complex numbers
    pub fn multiply(&self, other: &ComplexNumber) -> ComplexNumber {
        ComplexNumber::new(
            self.real * other.real - self.imag * other.imag,
            self.real * other.imag + self.imag * other.real,
        )
    }

    /// Division through the polar shortcut (see [`DivisionMode::Reference`]).
    ///
    /// The angle difference is in degrees but `cos`/`sin` read it as radians,
    /// and the imaginary part is not scaled by `r1/r2`. Callers wanting the
    /// textbook quotient use [`ComplexNumber::divide_exact`].
    pub fn divide(&self, other: &ComplexNumber) -> Result<ComplexNumber, CoreError> {
        let r2 = other.magnitude();
        if r2 == 0.0 {
            return Err(CoreError::DivisionByZero);
        }
        let r1 = self.magnitude();
        let delta = self.phase() - other.phase();
        Ok(ComplexNumber::new((r1 / r2) * delta.cos(), delta.sin()))
    }

    // Division of two complex numbers: a * conj(b) / |b|^2
    pub fn divide_exact(&self, other: &ComplexNumber) -> Result<ComplexNumber, CoreError> {
        let denominator = other.real.powi(2) + other.imag.powi(2);
        if denominator == 0.0 {
            return Err(CoreError::DivisionByZero);
        }
        Ok(ComplexNumber::new(
            (self.real * other.real + self.imag * other.imag) / denominator,
            (self.imag * other.real - self.real * other.imag) / denominator,
        ))
    }

    pub fn divide_with(
        &self,
        other: &ComplexNumber,
        mode: DivisionMode,
    ) -> Result<ComplexNumber, CoreError> {
        match mode {
            DivisionMode::Reference => self.divide(other),
            DivisionMode::Exact => self.divide_exact(other),
        }
    }

    // Conjugate: flips the sign of the imaginary part
    pub fn conjugate(&self) -> ComplexNumber {
        ComplexNumber::new(self.real, -self.imag)
    }

    /// Legend text for plots, e.g. `z=4.0x+-2.5*i`.
    pub fn legend_label(&self) -> String {
        format!("z={:?}x+{:?}*i", self.real, self.imag)
    }
}

impl fmt::Display for ComplexNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3} * i)", self.real, self.imag)
    }
}

impl FromStr for ComplexNumber {
    type Err = CoreError;

    /// Accepts `RE,IM`, `(RE, IM * i)` (the `Display` form) or a bare `RE`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut body = s.trim();
        if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
            body = inner.trim();
        }
        if body.is_empty() {
            return Err(CoreError::invalid_argument("empty complex literal"));
        }

        let (re_txt, im_txt) = match body.split_once(',') {
            Some((re, im)) => (re.trim(), Some(strip_imag_unit(im.trim()))),
            None => (body, None),
        };

        let real = parse_component(re_txt, s)?;
        let imag = match im_txt {
            Some(txt) => parse_component(txt, s)?,
            None => 0.0,
        };
        ComplexNumber::try_new(real, imag)
    }
}

fn strip_imag_unit(txt: &str) -> &str {
    match txt.strip_suffix('i') {
        Some(rest) => rest.trim_end().trim_end_matches('*').trim_end(),
        None => txt,
    }
}

fn parse_component(txt: &str, whole: &str) -> Result<f64, CoreError> {
    txt.parse::<f64>().map_err(|_| {
        CoreError::invalid_argument(&format!("cannot parse '{whole}' as a complex number"))
    })
}

impl Add for ComplexNumber {
    type Output = ComplexNumber;

    fn add(self, rhs: ComplexNumber) -> ComplexNumber {
        ComplexNumber::add(&self, &rhs)
    }
}

impl Sub for ComplexNumber {
    type Output = ComplexNumber;

    fn sub(self, rhs: ComplexNumber) -> ComplexNumber {
        self.subtract(&rhs)
    }
}

impl Mul for ComplexNumber {
    type Output = ComplexNumber;

    fn mul(self, rhs: ComplexNumber) -> ComplexNumber {
        self.multiply(&rhs)
    }
}

impl Div for ComplexNumber {
    type Output = Result<ComplexNumber, CoreError>;

    fn div(self, rhs: ComplexNumber) -> Result<ComplexNumber, CoreError> {
        self.divide(&rhs)
    }
}

impl Neg for ComplexNumber {
    type Output = ComplexNumber;

    fn neg(self) -> ComplexNumber {
        ComplexNumber::new(-self.real, -self.imag)
    }
}
