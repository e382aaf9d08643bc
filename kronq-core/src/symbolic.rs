//! Symbolic amplitudes as normalized polynomials
//!
//! Every operation the simulator performs on amplitudes is a ring operation
//! or a complex conjugation, so symbolic mode does not need a general
//! computer-algebra system: a multivariate polynomial with complex
//! coefficients, kept in a canonical sorted form with like terms merged, is
//! closed under everything the engine does. Cancellation falls out of the
//! like-term merge, which is what lets symbolic probabilities collapse to
//! closed forms instead of accumulating cruft.

use crate::scalar::Scalar;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Coefficients with magnitude at or below this are dropped during
/// normalization, so numerically cancelled terms actually disappear.
const COEFF_EPSILON: f64 = 1e-12;

/// An atomic symbol, optionally conjugated
///
/// Conjugation is tracked on the symbol itself: `conj(a1)` is a distinct
/// factor from `a1`, which is all the density-matrix algebra requires.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol {
    name: String,
    conjugated: bool,
}

impl Symbol {
    /// Create a new (unconjugated) symbol
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conjugated: false,
        }
    }

    /// The symbol's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this occurrence is conjugated
    pub fn is_conjugated(&self) -> bool {
        self.conjugated
    }

    /// The conjugated counterpart of this symbol
    pub fn conjugate(&self) -> Self {
        Self {
            name: self.name.clone(),
            conjugated: !self.conjugated,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conjugated {
            write!(f, "conj({})", self.name)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

/// Product of symbols, kept sorted so equal monomials compare equal
type Monomial = Vec<Symbol>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Term {
    coeff: Complex64,
    symbols: Monomial,
}

/// A symbolic amplitude: a normalized sum of coefficient×monomial terms
///
/// # Example
/// ```
/// use kronq_core::{Expr, Scalar};
///
/// let a = Expr::symbol("a1");
/// let sum = a.clone() * a.conj() - a.clone() * a.conj();
/// assert!(sum.is_zero());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    /// Terms sorted by monomial; no zero coefficients
    terms: Vec<Term>,
}

impl Expr {
    /// The constant expression for a complex value
    pub fn constant(value: Complex64) -> Self {
        let mut map = BTreeMap::new();
        map.insert(Vec::new(), value);
        Self::from_map(map)
    }

    /// A single unconjugated symbol
    pub fn symbol(name: impl Into<String>) -> Self {
        let mut map = BTreeMap::new();
        map.insert(vec![Symbol::new(name)], Complex64::new(1.0, 0.0));
        Self::from_map(map)
    }

    /// Number of terms in normal form
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Substitute concrete values for symbols (by name)
    ///
    /// Bound symbols are replaced by their value (conjugated occurrences by
    /// the conjugate of the value); unbound symbols are left in place, so
    /// partial substitution yields a smaller symbolic expression.
    pub fn substitute(&self, bindings: &HashMap<String, Complex64>) -> Self {
        let mut map: BTreeMap<Monomial, Complex64> = BTreeMap::new();
        for term in &self.terms {
            let mut coeff = term.coeff;
            let mut remaining: Monomial = Vec::new();
            for symbol in &term.symbols {
                match bindings.get(symbol.name()) {
                    Some(value) => {
                        coeff *= if symbol.is_conjugated() {
                            value.conj()
                        } else {
                            *value
                        };
                    }
                    None => remaining.push(symbol.clone()),
                }
            }
            remaining.sort();
            *map.entry(remaining).or_insert_with(|| Complex64::new(0.0, 0.0)) += coeff;
        }
        Self::from_map(map)
    }

    fn from_map(map: BTreeMap<Monomial, Complex64>) -> Self {
        let terms = map
            .into_iter()
            .filter(|(_, coeff)| coeff.norm() > COEFF_EPSILON)
            .map(|(symbols, coeff)| Term { coeff, symbols })
            .collect();
        Self { terms }
    }

    fn to_map(&self) -> BTreeMap<Monomial, Complex64> {
        self.terms
            .iter()
            .map(|t| (t.symbols.clone(), t.coeff))
            .collect()
    }
}

impl Scalar for Expr {
    fn zero() -> Self {
        Self { terms: Vec::new() }
    }

    fn one() -> Self {
        Self::constant(Complex64::new(1.0, 0.0))
    }

    fn from_complex(value: Complex64) -> Self {
        Self::constant(value)
    }

    fn conj(&self) -> Self {
        let mut map: BTreeMap<Monomial, Complex64> = BTreeMap::new();
        for term in &self.terms {
            let mut symbols: Monomial = term.symbols.iter().map(Symbol::conjugate).collect();
            symbols.sort();
            *map.entry(symbols).or_insert_with(|| Complex64::new(0.0, 0.0)) += term.coeff.conj();
        }
        Self::from_map(map)
    }

    fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    fn eval(&self) -> Option<Complex64> {
        match self.terms.as_slice() {
            [] => Some(Complex64::new(0.0, 0.0)),
            [term] if term.symbols.is_empty() => Some(term.coeff),
            _ => None,
        }
    }
}

impl Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        let mut map = self.to_map();
        for term in rhs.terms {
            *map.entry(term.symbols)
                .or_insert_with(|| Complex64::new(0.0, 0.0)) += term.coeff;
        }
        Expr::from_map(map)
    }
}

impl Sub for Expr {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        self + (-rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        let mut map: BTreeMap<Monomial, Complex64> = BTreeMap::new();
        for left in &self.terms {
            for right in &rhs.terms {
                let mut symbols: Monomial =
                    Vec::with_capacity(left.symbols.len() + right.symbols.len());
                symbols.extend(left.symbols.iter().cloned());
                symbols.extend(right.symbols.iter().cloned());
                symbols.sort();
                *map.entry(symbols).or_insert_with(|| Complex64::new(0.0, 0.0)) +=
                    left.coeff * right.coeff;
            }
        }
        Expr::from_map(map)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        let terms = self
            .terms
            .into_iter()
            .map(|t| Term {
                coeff: -t.coeff,
                symbols: t.symbols,
            })
            .collect();
        Expr { terms }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write_term(f, term)?;
        }
        Ok(())
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, term: &Term) -> fmt::Result {
    let one = Complex64::new(1.0, 0.0);
    if term.symbols.is_empty() {
        return write_complex(f, term.coeff);
    }
    if term.coeff == -one {
        write!(f, "-")?;
    } else if term.coeff != one {
        write_complex(f, term.coeff)?;
        write!(f, "*")?;
    }
    for (i, symbol) in term.symbols.iter().enumerate() {
        if i > 0 {
            write!(f, "*")?;
        }
        write!(f, "{}", symbol)?;
    }
    Ok(())
}

fn write_complex(f: &mut fmt::Formatter<'_>, z: Complex64) -> fmt::Result {
    if z.im == 0.0 {
        write!(f, "{}", z.re)
    } else if z.re == 0.0 {
        write!(f, "{}i", z.im)
    } else {
        let sign = if z.im < 0.0 { "-" } else { "+" };
        write!(f, "({}{}{}i)", z.re, sign, z.im.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_like_terms_merge() {
        let a = Expr::symbol("a1");
        let sum = a.clone() + a.clone();
        assert_eq!(sum.num_terms(), 1);
        assert_eq!(sum, Expr::constant(c(2.0, 0.0)) * a);
    }

    #[test]
    fn test_cancellation_is_exact() {
        let a = Expr::symbol("a1");
        let b = Expr::symbol("b1");
        let diff = a.clone() * b.clone() - b * a;
        assert!(diff.is_zero());
        assert_eq!(diff.eval(), Some(c(0.0, 0.0)));
    }

    #[test]
    fn test_distribution() {
        // (a + b) * (a - b) = a*a - b*b
        let a = Expr::symbol("a");
        let b = Expr::symbol("b");
        let product = (a.clone() + b.clone()) * (a.clone() - b.clone());
        let expected = a.clone() * a - b.clone() * b;
        assert_eq!(product, expected);
    }

    #[test]
    fn test_conjugation() {
        let a = Expr::symbol("a1");
        let i = Expr::constant(c(0.0, 1.0));
        let expr = i * a.clone();
        let conj = expr.conj();
        assert_eq!(conj, Expr::constant(c(0.0, -1.0)) * a.conj());
    }

    #[test]
    fn test_conj_involution() {
        let expr = Expr::symbol("a") * Expr::symbol("b").conj() + Expr::constant(c(0.5, -0.25));
        assert_eq!(expr.conj().conj(), expr);
    }

    #[test]
    fn test_substitute_closes_expression() {
        // |a|^2 with a = (1 + i)/sqrt(2) has magnitude 1
        let a = Expr::symbol("a1");
        let prob = a.clone() * a.conj();

        let mut bindings = HashMap::new();
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        bindings.insert("a1".to_string(), c(inv_sqrt2, inv_sqrt2));

        let value = prob.substitute(&bindings).eval().unwrap();
        assert_relative_eq!(value.re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(value.im, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_partial_substitution() {
        let expr = Expr::symbol("a") * Expr::symbol("b");
        let mut bindings = HashMap::new();
        bindings.insert("a".to_string(), c(2.0, 0.0));

        let partial = expr.substitute(&bindings);
        assert_eq!(partial.eval(), None);
        assert_eq!(partial, Expr::constant(c(2.0, 0.0)) * Expr::symbol("b"));
    }

    #[test]
    fn test_display() {
        let a = Expr::symbol("a1");
        let expr = a.clone() * a.conj();
        assert_eq!(expr.to_string(), "a1*conj(a1)");
        assert_eq!(Expr::zero().to_string(), "0");
    }
}
