//! src/commands/arith.rs
//! Arithmetic subcommands: one result per invocation, printed in display form.

use std::fmt;

use anyhow::Result;
use colored::Colorize;

use crate::core::complex_number::{ComplexNumber, DivisionMode};
use crate::core::error::CoreError;
use crate::debug_log;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }

    pub fn word(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "sub",
            BinaryOp::Mul => "mul",
            BinaryOp::Div => "div",
        }
    }

    /// Infix operator for `A op B` shell lines.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(BinaryOp::Add),
            "-" => Some(BinaryOp::Sub),
            "*" => Some(BinaryOp::Mul),
            "/" => Some(BinaryOp::Div),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

pub fn evaluate(
    op: BinaryOp,
    a: &ComplexNumber,
    b: &ComplexNumber,
    mode: DivisionMode,
) -> Result<ComplexNumber, CoreError> {
    let out = match op {
        BinaryOp::Add => a.add(b),
        BinaryOp::Sub => a.subtract(b),
        BinaryOp::Mul => a.multiply(b),
        BinaryOp::Div => a.divide_with(b, mode)?,
    };
    debug_log!("{a} {op} {b} = {out} (division: {})", mode.label());
    Ok(out)
}

/// `cplane add|sub|mul|div A B`
pub fn binary(op: BinaryOp, a: ComplexNumber, b: ComplexNumber, mode: DivisionMode) -> Result<()> {
    let out = evaluate(op, &a, &b, mode)?;
    println!("{out}");
    Ok(())
}

/// `cplane conj Z`
pub fn conjugate(z: ComplexNumber) -> Result<()> {
    println!("{}", z.conjugate());
    Ok(())
}

/// Multi-line summary used by `show` (CLI and shell).
pub fn describe(z: &ComplexNumber) -> String {
    format!(
        "{} {}\n{} {:.3}\n{} {:.3} deg\n{} {}",
        "z         =".truecolor(130, 0, 200),
        z,
        "|z|       =".truecolor(130, 0, 200),
        z.magnitude(),
        "phase     =".truecolor(130, 0, 200),
        z.phase(),
        "conjugate =".truecolor(130, 0, 200),
        z.conjugate(),
    )
}

/// `cplane show Z`
pub fn show(z: ComplexNumber) -> Result<()> {
    println!("{}", describe(&z));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_each_operator() {
        let a = ComplexNumber::new(1.0, 1.0);
        let b = ComplexNumber::new(1.0, 1.0);
        let m = DivisionMode::Reference;
        assert_eq!(evaluate(BinaryOp::Add, &a, &b, m).unwrap(), ComplexNumber::new(2.0, 2.0));
        assert_eq!(evaluate(BinaryOp::Sub, &a, &b, m).unwrap(), ComplexNumber::new(0.0, 0.0));
        assert_eq!(evaluate(BinaryOp::Mul, &a, &b, m).unwrap(), ComplexNumber::new(0.0, 2.0));
        assert_eq!(evaluate(BinaryOp::Div, &a, &b, m).unwrap(), ComplexNumber::new(1.0, 0.0));
    }

    #[test]
    fn division_by_zero_surfaces() {
        let a = ComplexNumber::new(1.0, 1.0);
        let zero = ComplexNumber::default();
        let err = evaluate(BinaryOp::Div, &a, &zero, DivisionMode::Exact).unwrap_err();
        assert_eq!(err, CoreError::DivisionByZero);
    }

    #[test]
    fn words_map_to_operators() {
        assert_eq!(BinaryOp::from_symbol("/"), Some(BinaryOp::Div));
        assert_eq!(BinaryOp::from_symbol("mul"), None);
        assert_eq!(BinaryOp::Mul.word(), "mul");
        assert_eq!(BinaryOp::Sub.to_string(), "-");
    }

    #[test]
    fn describe_lists_derived_quantities() {
        let text = describe(&ComplexNumber::new(3.0, 4.0));
        assert!(text.contains("(3.000, 4.000 * i)"));
        assert!(text.contains("5.000"));
        assert!(text.contains("53.130 deg"));
        assert!(text.contains("(3.000, -4.000 * i)"));
    }
}
