//! Complex element types.
//!
//! Both types are stored interleaved (`re`, `im`) with no padding, which is
//! exactly the layout CBLAS expects for `float _Complex` / `double _Complex`
//! arguments. The flag translator relies on this to hand complex buffers to a
//! backend without copying them.

use bytemuck::{Pod, Zeroable};
use core::fmt;
use core::ops::{Add, Mul, Sub};

macro_rules! impl_complex {
    ($name:ident, $float:ty, $bits:literal) => {
        #[doc = concat!($bits, "-bit complex number built from two `", stringify!($float), "` parts.")]
        ///
        #[doc = concat!("Interleaved `#[repr(C)]` layout, identical to `[", stringify!($float), "; 2]`.")]
        #[repr(C)]
        #[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
        pub struct $name {
            /// Real part.
            pub re: $float,
            /// Imaginary part.
            pub im: $float,
        }

        impl $name {
            /// `0 + 0i`
            pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

            /// `1 + 0i`
            pub const ONE: Self = Self { re: 1.0, im: 0.0 };

            /// Creates a complex number from its parts.
            #[inline]
            pub const fn new(re: $float, im: $float) -> Self {
                Self { re, im }
            }

            /// Complex conjugate.
            #[inline]
            pub fn conj(self) -> Self {
                Self {
                    re: self.re,
                    im: -self.im,
                }
            }

            /// Squared magnitude `re² + im²`.
            #[inline]
            pub fn norm_sqr(self) -> $float {
                self.re * self.re + self.im * self.im
            }

            /// Magnitude `|z|`.
            #[inline]
            pub fn norm(self) -> $float {
                self.norm_sqr().sqrt()
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self {
                    re: self.re + rhs.re,
                    im: self.im + rhs.im,
                }
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self {
                    re: self.re - rhs.re,
                    im: self.im - rhs.im,
                }
            }
        }

        impl Mul for $name {
            type Output = Self;

            /// `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                Self {
                    re: self.re * rhs.re - self.im * rhs.im,
                    im: self.re * rhs.im + self.im * rhs.re,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.im.is_sign_negative() {
                    write!(f, "{}{}i", self.re, self.im)
                } else {
                    write!(f, "{}+{}i", self.re, self.im)
                }
            }
        }

        impl From<$float> for $name {
            #[inline]
            fn from(re: $float) -> Self {
                Self { re, im: 0.0 }
            }
        }

    };
}

impl_complex!(Complex64, f32, "64");
impl_complex!(Complex128, f64, "128");

// widening conversions

impl From<Complex64> for Complex128 {
    #[inline]
    fn from(c: Complex64) -> Self {
        Self {
            re: f64::from(c.re),
            im: f64::from(c.im),
        }
    }
}

impl From<f32> for Complex128 {
    #[inline]
    fn from(re: f32) -> Self {
        Self {
            re: f64::from(re),
            im: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_interleaved_pair() {
        assert_eq!(size_of::<Complex64>(), size_of::<[f32; 2]>());
        assert_eq!(align_of::<Complex64>(), align_of::<[f32; 2]>());
        assert_eq!(size_of::<Complex128>(), size_of::<[f64; 2]>());
        assert_eq!(align_of::<Complex128>(), align_of::<[f64; 2]>());

        let z = [Complex64::new(1.0, 2.0), Complex64::new(3.0, 4.0)];
        let flat: &[f32] = bytemuck::cast_slice(&z);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn multiplication() {
        let a = Complex128::new(1.0, 2.0);
        let b = Complex128::new(3.0, -1.0);
        assert_eq!(a * b, Complex128::new(5.0, 5.0));
        assert_eq!(a * Complex128::ONE, a);
        assert_eq!((a * a.conj()).im, 0.0);
    }

    #[test]
    fn widening_is_exact() {
        let z = Complex64::new(0.1, -0.25);
        let w = Complex128::from(z);
        assert_eq!(w.re, f64::from(0.1f32));
        assert_eq!(w.im, -0.25);
        assert_eq!(Complex128::from(2.5f32), Complex128::new(2.5, 0.0));
    }

    #[test]
    fn display() {
        assert_eq!(Complex64::new(1.0, -2.0).to_string(), "1-2i");
        assert_eq!(Complex128::new(0.5, 3.0).to_string(), "0.5+3i");
    }
}
