// Symphonia
// Copyright (c) 2019-2022 The Project Symphonia Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use symphonia_core::io::ReadBytes;

/// The value of 1.0 in 16.16 fixed point.
pub(crate) const FIXED_ONE: u32 = 1 << 16;

/// An unsigned 16.16-bit fixed point value.
#[derive(Copy, Clone, Debug, Default)]
pub struct FpU16(u32);

impl FpU16 {
    pub fn parse_raw(val: u32) -> Self {
        Self(val)
    }
}

impl From<FpU16> for f64 {
    fn from(fp: FpU16) -> Self {
        f64::from(fp.0) / f64::from(FIXED_ONE)
    }
}

/// Read an "Apple float": a signed 16-bit integer part followed by an unsigned 16-bit
/// fractional part.
pub(crate) fn read_apple_float<B: ReadBytes>(reader: &mut B) -> std::io::Result<f32> {
    let int = reader.read_be_i16()?;
    let frac = reader.read_be_u16()?;

    Ok(f32::from(int) + f32::from(frac) / 65536.0)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// A signed rational number, always kept in lowest terms with a positive denominator.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    num: i32,
    den: u32,
}

impl Rational {
    pub const ONE: Rational = Rational { num: 1, den: 1 };

    /// Create a new rational. Returns `None` if the denominator is 0, or if the value cannot be
    /// represented.
    pub fn new(num: i32, den: i32) -> Option<Rational> {
        if den == 0 {
            return None;
        }

        // The sign is carried by the numerator.
        let (num, den) = if den < 0 {
            (-i64::from(num), -i64::from(den))
        }
        else {
            (i64::from(num), i64::from(den))
        };

        let div = gcd(num.unsigned_abs(), den as u64).max(1) as i64;

        Some(Rational { num: i32::try_from(num / div).ok()?, den: u32::try_from(den / div).ok()? })
    }

    /// The reciprocal of a signed 16.16 fixed point value. Returns `None` for a zero value.
    pub fn from_fixed_reciprocal(fixed: i32) -> Option<Rational> {
        Rational::new(FIXED_ONE as i32, fixed)
    }

    /// A signed 16.16 fixed point value as a rational.
    pub fn from_fixed(fixed: i32) -> Rational {
        Rational::new(fixed, FIXED_ONE as i32).unwrap_or(Rational::ONE)
    }

    pub fn numerator(&self) -> i32 {
        self.num
    }

    pub fn denominator(&self) -> u32 {
        self.den
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::ONE
    }
}

impl From<i32> for Rational {
    fn from(val: i32) -> Self {
        Rational { num: val, den: 1 }
    }
}

impl From<Rational> for f64 {
    fn from(r: Rational) -> Self {
        f64::from(r.num) / f64::from(r.den)
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
