//! Sparse integer polynomials stored in any [`AnySequence`].
//!
//! Terms are kept in strictly decreasing exponent order and never carry a zero
//! coefficient, so the zero polynomial is the empty sequence and two equal
//! polynomials always have identical term lists.

use core::fmt;
use core::ops::{AddAssign, Mul, Neg, SubAssign};

use log::trace;

use crate::error::PolynomialError;
use crate::sequence::AnySequence;

/// One `coef * x^expon` term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Term {
    pub coef: i64,
    pub expon: u32,
}

impl Term {
    pub const fn new(coef: i64, expon: u32) -> Self {
        Self { coef, expon }
    }
}

/// A polynomial with `i64` coefficients backed by the sequence `S`.
///
/// # Examples
/// ```rust
/// use block_deque::{BlockDeque, Polynomial, Term};
///
/// type Poly = Polynomial<BlockDeque<Term>>;
///
/// let p = Poly::from_terms([Term::new(1, 1), Term::new(1, 0)]); // x + 1
/// let square = &p * &p;
/// assert_eq!(square.to_string(), "1x^2 + 2x + 1");
/// assert_eq!(square.sqrt().unwrap(), p);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Polynomial<S = Vec<Term>> {
    terms: S,
}

impl<S> Polynomial<S>
where
    S: AnySequence<Term> + Default + Clone,
{
    /// The zero polynomial.
    pub fn new() -> Self {
        Self { terms: S::default() }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self::new()
    }

    /// `coef * x^expon`, or zero when `coef == 0`.
    pub fn monomial(coef: i64, expon: u32) -> Self {
        let mut poly = Self::new();
        if coef != 0 {
            poly.terms.push_back(Term::new(coef, expon));
        }
        poly
    }

    /// Builds a polynomial from terms in any order; like exponents are summed.
    pub fn from_terms<I: IntoIterator<Item = Term>>(terms: I) -> Self {
        let mut poly = Self::new();
        for term in terms {
            poly += &Self::monomial(term.coef, term.expon);
        }
        poly
    }

    /// The backing sequence.
    pub fn as_sequence(&self) -> &S {
        &self.terms
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Highest exponent, or `0` for the zero polynomial.
    pub fn degree(&self) -> u32 {
        self.leading().map_or(0, |t| t.expon)
    }

    /// The highest-degree term.
    pub fn leading(&self) -> Option<Term> {
        self.terms.get(0).copied()
    }

    /// Terms from highest to lowest exponent.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = Term> + '_ {
        (0..self.terms.len()).filter_map(|i| self.terms.get(i).copied())
    }

    /// Ordered merge of two term lists into a fresh sequence.
    fn merged(&self, rhs: &Self) -> Self {
        let mut sum = Self::new();
        let (mut i, mut j) = (0, 0);
        while let (Some(a), Some(b)) = (self.terms.get(i).copied(), rhs.terms.get(j).copied()) {
            if a.expon == b.expon {
                let coef = a.coef + b.coef;
                if coef != 0 {
                    sum.terms.push_back(Term::new(coef, a.expon));
                }
                i += 1;
                j += 1;
            } else if a.expon > b.expon {
                sum.terms.push_back(a);
                i += 1;
            } else {
                sum.terms.push_back(b);
                j += 1;
            }
        }
        for term in self.terms().skip(i).chain(rhs.terms().skip(j)) {
            sum.terms.push_back(term);
        }
        sum
    }

    /// Square root by long division.
    ///
    /// The first root term is `isqrt(c) x^(e/2)` for the leading term `c x^e`.
    /// Each step doubles the newest divisor term, divides the remainder's
    /// leading term by the divisor's, adds the quotient to root and divisor and
    /// subtracts `quotient * divisor` from the remainder.
    pub fn sqrt(&self) -> Result<Self, PolynomialError> {
        let Some(lead) = self.leading() else {
            return Ok(Self::zero());
        };
        if lead.coef < 0 {
            return Err(PolynomialError::NegativeLeadingCoefficient { coef: lead.coef });
        }
        if lead.expon % 2 != 0 {
            return Err(PolynomialError::OddLeadingExponent { expon: lead.expon });
        }
        let root_coef = lead.coef.isqrt();
        if root_coef * root_coef != lead.coef {
            return Err(PolynomialError::NotPerfectSquare);
        }

        let mut monomial = Self::monomial(root_coef, lead.expon / 2);
        let mut root = monomial.clone();
        let mut divisor = monomial.clone();
        let mut remainder = self.clone();
        remainder -= &(&monomial * &divisor);

        while let Some(rem_lead) = remainder.leading() {
            let newest = divisor.terms.len() - 1;
            if let Some(term) = divisor.terms.get_mut(newest) {
                term.coef *= 2;
            }
            let div_lead = divisor.leading().ok_or(PolynomialError::NotPerfectSquare)?;
            if rem_lead.expon < div_lead.expon || rem_lead.coef % div_lead.coef != 0 {
                return Err(PolynomialError::NotPerfectSquare);
            }
            trace!(
                "Polynomial::sqrt remainder degree {} over divisor degree {}",
                rem_lead.expon,
                div_lead.expon
            );

            monomial = Self::monomial(rem_lead.coef / div_lead.coef, rem_lead.expon - div_lead.expon);
            root += &monomial;
            divisor += &monomial;
            remainder -= &(&monomial * &divisor);
        }
        Ok(root)
    }
}

impl<S> AddAssign<&Polynomial<S>> for Polynomial<S>
where
    S: AnySequence<Term> + Default + Clone,
{
    fn add_assign(&mut self, rhs: &Polynomial<S>) {
        if rhs.is_zero() {
            return;
        }
        if self.is_zero() {
            *self = rhs.clone();
            return;
        }
        *self = self.merged(rhs);
    }
}

impl<S> SubAssign<&Polynomial<S>> for Polynomial<S>
where
    S: AnySequence<Term> + Default + Clone,
{
    fn sub_assign(&mut self, rhs: &Polynomial<S>) {
        *self += &-rhs;
    }
}

impl<S> Neg for &Polynomial<S>
where
    S: AnySequence<Term> + Default + Clone,
{
    type Output = Polynomial<S>;

    fn neg(self) -> Polynomial<S> {
        let mut minus = Polynomial::<S>::new();
        for term in self.terms() {
            minus.terms.push_back(Term::new(-term.coef, term.expon));
        }
        minus
    }
}

impl<S> Mul<&Polynomial<S>> for &Polynomial<S>
where
    S: AnySequence<Term> + Default + Clone,
{
    type Output = Polynomial<S>;

    /// Adds one row of partial products per term of `self`.
    fn mul(self, rhs: &Polynomial<S>) -> Polynomial<S> {
        let mut product = Polynomial::<S>::new();
        if self.is_zero() || rhs.is_zero() {
            return product;
        }
        for a in self.terms() {
            let mut row = Polynomial::<S>::new();
            for b in rhs.terms() {
                row.terms.push_back(Term::new(a.coef * b.coef, a.expon + b.expon));
            }
            product += &row;
        }
        product
    }
}

impl<S, R> PartialEq<Polynomial<R>> for Polynomial<S>
where
    S: AnySequence<Term>,
    R: AnySequence<Term>,
{
    fn eq(&self, other: &Polynomial<R>) -> bool {
        self.terms.len() == other.terms.len()
            && (0..self.terms.len()).all(|i| self.terms.get(i) == other.terms.get(i))
    }
}

impl<S: AnySequence<Term>> Eq for Polynomial<S> {}

impl<S: AnySequence<Term>> fmt::Display for Polynomial<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return f.write_str("0");
        }
        for i in 0..self.terms.len() {
            let Some(term) = self.terms.get(i) else {
                break;
            };
            match (i, term.coef < 0) {
                (0, true) => write!(f, "-{}", term.coef.unsigned_abs())?,
                (0, false) => write!(f, "{}", term.coef)?,
                (_, true) => write!(f, " - {}", term.coef.unsigned_abs())?,
                (_, false) => write!(f, " + {}", term.coef)?,
            }
            match term.expon {
                0 => {}
                1 => f.write_str("x")?,
                e => write!(f, "x^{e}")?,
            }
        }
        Ok(())
    }
}
