//! Physical dimensions for unit validation.
//!
//! Dimensions are integer exponents of a fixed set of base dimensions. On top
//! of the seven SI bases this tracks plane angle and electron counts as their
//! own axes (an arcsecond is not dimensionless here), and three pseudo
//! dimensions that only exist in PSG configurations:
//!
//! - `diameter`: lengths expressed in units of the target's diameter
//! - `diffraction`: beam sizes expressed in units of the diffraction limit
//! - `resolving_power`: spectral resolution given as `λ/Δλ`
//!
//! Keeping the pseudo dimensions separate means a coded field can tell a
//! "diameter" offset apart from a plain scale factor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Represents the physical dimension of a quantity.
///
/// For example:
/// - Acceleration has dimensions L·T⁻² (length = 1, time = -2)
/// - Density has dimensions M·L⁻³
/// - Pressure has dimensions M·L⁻¹·T⁻²
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Dimension {
    /// Mass exponent (M)
    pub mass: i8,
    /// Length exponent (L)
    pub length: i8,
    /// Time exponent (T)
    pub time: i8,
    /// Temperature exponent (Θ)
    pub temperature: i8,
    /// Amount of substance exponent (N)
    pub amount: i8,
    /// Electric current exponent (I)
    pub current: i8,
    /// Luminous intensity exponent (J)
    pub luminosity: i8,
    /// Plane angle exponent (A)
    pub angle: i8,
    /// Electron count exponent (e)
    pub electron: i8,
    /// Target-diameter exponent
    pub diameter: i8,
    /// Diffraction-limit exponent
    pub diffraction: i8,
    /// Resolving-power exponent
    pub resolving_power: i8,
}

impl Dimension {
    /// Creates a new dimension with all exponents set to zero (dimensionless).
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self::DIMENSIONLESS
    }

    /// Creates a dimension from the seven SI exponents.
    #[must_use]
    pub const fn new(
        mass: i8,
        length: i8,
        time: i8,
        temperature: i8,
        amount: i8,
        current: i8,
        luminosity: i8,
    ) -> Self {
        Self {
            mass,
            length,
            time,
            temperature,
            amount,
            current,
            luminosity,
            ..Self::DIMENSIONLESS
        }
    }

    pub const DIMENSIONLESS: Self = Self {
        mass: 0,
        length: 0,
        time: 0,
        temperature: 0,
        amount: 0,
        current: 0,
        luminosity: 0,
        angle: 0,
        electron: 0,
        diameter: 0,
        diffraction: 0,
        resolving_power: 0,
    };

    /// Mass dimension (M¹).
    pub const MASS: Self = Self::new(1, 0, 0, 0, 0, 0, 0);

    /// Length dimension (L¹).
    pub const LENGTH: Self = Self::new(0, 1, 0, 0, 0, 0, 0);

    /// Time dimension (T¹).
    pub const TIME: Self = Self::new(0, 0, 1, 0, 0, 0, 0);

    /// Temperature dimension (Θ¹).
    pub const TEMPERATURE: Self = Self::new(0, 0, 0, 1, 0, 0, 0);

    /// Amount of substance dimension (N¹).
    pub const AMOUNT: Self = Self::new(0, 0, 0, 0, 1, 0, 0);

    /// Electric current dimension (I¹).
    pub const CURRENT: Self = Self::new(0, 0, 0, 0, 0, 1, 0);

    /// Luminous intensity dimension (J¹).
    pub const LUMINOSITY: Self = Self::new(0, 0, 0, 0, 0, 0, 1);

    /// Plane angle dimension.
    pub const ANGLE: Self = Self {
        angle: 1,
        ..Self::DIMENSIONLESS
    };

    /// Electron count dimension.
    pub const ELECTRON: Self = Self {
        electron: 1,
        ..Self::DIMENSIONLESS
    };

    /// Target diameters.
    pub const DIAMETER: Self = Self {
        diameter: 1,
        ..Self::DIMENSIONLESS
    };

    /// Multiples of the diffraction limit.
    pub const DIFFRACTION: Self = Self {
        diffraction: 1,
        ..Self::DIMENSIONLESS
    };

    /// Spectral resolving power.
    pub const RESOLVING_POWER: Self = Self {
        resolving_power: 1,
        ..Self::DIMENSIONLESS
    };

    /// Frequency dimension (T⁻¹).
    pub const FREQUENCY: Self = Self::new(0, 0, -1, 0, 0, 0, 0);

    /// Pressure dimension (M·L⁻¹·T⁻²).
    pub const PRESSURE: Self = Self::new(1, -1, -2, 0, 0, 0, 0);

    /// Energy dimension (M·L²·T⁻²).
    pub const ENERGY: Self = Self::new(1, 2, -2, 0, 0, 0, 0);

    /// Power dimension (M·L²·T⁻³).
    pub const POWER: Self = Self::new(1, 2, -3, 0, 0, 0, 0);

    /// Returns true if this dimension is dimensionless.
    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        *self == Self::DIMENSIONLESS
    }

    /// Returns true if this dimension is compatible with another for conversion.
    ///
    /// Two dimensions are compatible if they are identical.
    #[must_use]
    pub fn is_compatible(&self, other: &Self) -> bool {
        self == other
    }

    /// Raises this dimension to an integer power.
    #[must_use]
    pub fn pow(&self, exp: i8) -> Self {
        self.zip_with(&Self::DIMENSIONLESS, |a, _| a * exp)
    }

    fn zip_with(&self, rhs: &Self, f: impl Fn(i8, i8) -> i8) -> Self {
        Self {
            mass: f(self.mass, rhs.mass),
            length: f(self.length, rhs.length),
            time: f(self.time, rhs.time),
            temperature: f(self.temperature, rhs.temperature),
            amount: f(self.amount, rhs.amount),
            current: f(self.current, rhs.current),
            luminosity: f(self.luminosity, rhs.luminosity),
            angle: f(self.angle, rhs.angle),
            electron: f(self.electron, rhs.electron),
            diameter: f(self.diameter, rhs.diameter),
            diffraction: f(self.diffraction, rhs.diffraction),
            resolving_power: f(self.resolving_power, rhs.resolving_power),
        }
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a + b)
    }
}

impl Add for Dimension {
    type Output = Self;

    /// Adding dimensions is the same as multiplying them (adding exponents).
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Self) -> Self::Output {
        self * rhs
    }
}

impl Sub for Dimension {
    type Output = Self;

    /// Subtracting dimensions represents division (subtracting exponents).
    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(&rhs, |a, b| a - b)
    }
}

impl Neg for Dimension {
    type Output = Self;

    /// Negating a dimension represents taking its reciprocal.
    fn neg(self) -> Self::Output {
        self.pow(-1)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }

        let symbols = [
            (self.mass, "M"),
            (self.length, "L"),
            (self.time, "T"),
            (self.temperature, "Θ"),
            (self.amount, "N"),
            (self.current, "I"),
            (self.luminosity, "J"),
            (self.angle, "A"),
            (self.electron, "e"),
            (self.diameter, "diameter"),
            (self.diffraction, "diffraction"),
            (self.resolving_power, "RP"),
        ];

        let parts: Vec<String> = symbols
            .iter()
            .filter(|(exp, _)| *exp != 0)
            .map(|(exp, sym)| {
                if *exp == 1 {
                    sym.to_string()
                } else {
                    format!("{sym}^{exp}")
                }
            })
            .collect();

        write!(f, "{}", parts.join(" "))
    }
}
