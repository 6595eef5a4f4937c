// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
//! Human-readable output of polynomials and order series.
//!
//! Terms are printed in canonical monomial order. A series is printed as a formal power
//! series in a small parameter: slot `n` appears as `+eps^n (...)` with every coefficient
//! divided by `n!`. Empty slots are skipped. `{:.6}` style precision is honoured.
use crate::algebra::polynomial::Polynomial;
use crate::normal_form::series::OrderSeries;
use num_complex::Complex64;
use std::fmt;

fn signed(x: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:+.*}", p, x),
        None => format!("{:+}", x),
    }
}

fn unsigned(x: f64, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, x),
        None => format!("{}", x),
    }
}

/// `+1.5`, `-2*I` or `+(1.5-2*I)`
fn format_coeff(c: Complex64, precision: Option<usize>) -> String {
    if c.im == 0.0 {
        signed(c.re, precision)
    } else if c.re == 0.0 {
        format!("{}*I", signed(c.im, precision))
    } else {
        format!(
            "+({}{}*I)",
            unsigned(c.re, precision),
            signed(c.im, precision)
        )
    }
}

fn format_polynomial(p: &Polynomial, divisor: f64, precision: Option<usize>) -> String {
    p.sorted_terms()
        .iter()
        .map(|t| {
            let coeff = format_coeff(t.coeff / divisor, precision);
            if t.monomial.total_degree() == 0 {
                coeff
            } else {
                format!("{} {}", coeff, t.monomial)
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{}", format_polynomial(self, 1.0, f.precision()))
    }
}

impl fmt::Display for OrderSeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut factorial = 1.0;
        let mut first = true;
        for (n, p) in self.iter().enumerate() {
            if n > 0 {
                factorial *= n as f64;
            }
            if p.is_empty() {
                continue;
            }
            if !first {
                write!(f, " ")?;
            }
            if n > 0 {
                write!(f, "+eps")?;
                if n > 1 {
                    write!(f, "^{}", n)?;
                }
                write!(f, " ")?;
            }
            write!(f, "({})", format_polynomial(p, factorial, f.precision()))?;
            first = false;
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coeff_formats() {
        assert_eq!(format_coeff(Complex64::new(1.5, 0.0), None), "+1.5");
        assert_eq!(format_coeff(Complex64::new(0.0, -2.0), None), "-2*I");
        assert_eq!(format_coeff(Complex64::new(1.5, -2.0), None), "+(1.5-2*I)");
        assert_eq!(format_coeff(Complex64::new(0.25, 0.0), Some(2)), "+0.25");
    }

    #[test]
    fn test_polynomial_display() {
        let p = Polynomial::from_pairs(
            2,
            vec![
                (Complex64::new(0.0, 1.0), &[1, 0, 1, 0][..]),
                (Complex64::new(-1.0, 0.0), &[2, 1, 0, 0][..]),
                (Complex64::new(3.0, 0.0), &[0, 0, 0, 0][..]),
            ],
        );
        assert_eq!(p.to_string(), "-1 q1^2 q2 +1*I q1 p1 +3");
        assert_eq!(Polynomial::zero(2).to_string(), "0");
    }

    #[test]
    fn test_series_display_divides_by_factorial() {
        let mut s = OrderSeries::new(1, 4);
        s[0] = Polynomial::from_pairs(1, vec![(Complex64::new(1.0, 0.0), &[1, 1][..])]);
        s[2] = Polynomial::from_pairs(1, vec![(Complex64::new(4.0, 0.0), &[2, 2][..])]);
        s[3] = Polynomial::from_pairs(1, vec![(Complex64::new(0.0, 12.0), &[3, 2][..])]);
        assert_eq!(
            s.to_string(),
            "(+1 q1 p1) +eps^2 (+2 q1^2 p1^2) +eps^3 (+2*I q1^3 p1^2)"
        );
        assert_eq!(OrderSeries::new(1, 3).to_string(), "0");
    }
}
