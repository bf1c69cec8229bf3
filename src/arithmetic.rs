//! Scientific calculator operations
//!
//! Every operation returns a typed error instead of NaN or infinity, so a
//! front end can show "Error" and carry on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest n whose factorial is finite in f64
const MAX_FACTORIAL: u32 = 170;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("square root of negative number {0}")]
    NegativeSquareRoot(f64),

    #[error("logarithm of non-positive number {0}")]
    NonPositiveLogarithm(f64),

    #[error("{function} is undefined for {value}: input must lie in [-1, 1]")]
    OutOfDomain { function: &'static str, value: f64 },

    #[error("factorial needs a non-negative integer, got {0}")]
    InvalidFactorial(f64),

    #[error("result of {0} is not a finite number")]
    Overflow(String),

    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "×",
            BinaryOperator::Divide => "÷",
            BinaryOperator::Power => "^",
            BinaryOperator::Modulo => "mod",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for BinaryOperator {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "add" => Ok(BinaryOperator::Add),
            "-" | "sub" => Ok(BinaryOperator::Subtract),
            "*" | "x" | "×" | "mul" => Ok(BinaryOperator::Multiply),
            "/" | "÷" | "div" => Ok(BinaryOperator::Divide),
            "^" | "pow" => Ok(BinaryOperator::Power),
            "%" | "mod" => Ok(BinaryOperator::Modulo),
            other => Err(ArithmeticError::UnknownOperator(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Log10,
    Ln,
    Sqrt,
    Cbrt,
    Exp,
    Abs,
    Factorial,
    Square,
    Cube,
    PowerOfTen,
    Reciprocal,
    /// Divide by 100
    Percent,
}

impl UnaryFunction {
    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Asin => "asin",
            UnaryFunction::Acos => "acos",
            UnaryFunction::Atan => "atan",
            UnaryFunction::Log10 => "log",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Cbrt => "cbrt",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Abs => "abs",
            UnaryFunction::Factorial => "fact",
            UnaryFunction::Square => "pow2",
            UnaryFunction::Cube => "pow3",
            UnaryFunction::PowerOfTen => "pow10",
            UnaryFunction::Reciprocal => "inv",
            UnaryFunction::Percent => "percent",
        }
    }
}

impl fmt::Display for UnaryFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnaryFunction {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let function = match s {
            "sin" => UnaryFunction::Sin,
            "cos" => UnaryFunction::Cos,
            "tan" => UnaryFunction::Tan,
            "asin" => UnaryFunction::Asin,
            "acos" => UnaryFunction::Acos,
            "atan" => UnaryFunction::Atan,
            "log" | "log10" => UnaryFunction::Log10,
            "ln" => UnaryFunction::Ln,
            "sqrt" => UnaryFunction::Sqrt,
            "cbrt" => UnaryFunction::Cbrt,
            "exp" => UnaryFunction::Exp,
            "abs" => UnaryFunction::Abs,
            "fact" | "!" => UnaryFunction::Factorial,
            "pow2" | "sq" => UnaryFunction::Square,
            "pow3" | "cube" => UnaryFunction::Cube,
            "pow10" => UnaryFunction::PowerOfTen,
            "inv" | "1/x" => UnaryFunction::Reciprocal,
            "percent" | "%" => UnaryFunction::Percent,
            other => return Err(ArithmeticError::UnknownOperator(other.to_string())),
        };
        Ok(function)
    }
}

/// How trigonometric inputs and inverse-trig outputs are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Radians => value,
            AngleMode::Degrees => value.to_radians(),
        }
    }

    fn from_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Radians => value,
            AngleMode::Degrees => value.to_degrees(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constant {
    Pi,
    E,
    /// Golden ratio
    Phi,
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::Phi => 1.61803398875,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e",
            Constant::Phi => "Φ",
        }
    }
}

pub fn evaluate_binary(lhs: f64, op: BinaryOperator, rhs: f64) -> Result<f64, ArithmeticError> {
    let result = match op {
        BinaryOperator::Add => lhs + rhs,
        BinaryOperator::Subtract => lhs - rhs,
        BinaryOperator::Multiply => lhs * rhs,
        BinaryOperator::Divide | BinaryOperator::Modulo if rhs == 0.0 => {
            return Err(ArithmeticError::DivisionByZero)
        }
        BinaryOperator::Divide => lhs / rhs,
        BinaryOperator::Modulo => lhs % rhs,
        BinaryOperator::Power => lhs.powf(rhs),
    };
    finite(result, || format!("{} {} {}", lhs, op, rhs))
}

pub fn evaluate_unary(
    function: UnaryFunction,
    value: f64,
    mode: AngleMode,
) -> Result<f64, ArithmeticError> {
    let result = match function {
        UnaryFunction::Sin => mode.to_radians(value).sin(),
        UnaryFunction::Cos => mode.to_radians(value).cos(),
        UnaryFunction::Tan => mode.to_radians(value).tan(),
        UnaryFunction::Asin => mode.from_radians(unit_interval("asin", value)?.asin()),
        UnaryFunction::Acos => mode.from_radians(unit_interval("acos", value)?.acos()),
        UnaryFunction::Atan => mode.from_radians(value.atan()),
        UnaryFunction::Log10 => positive_log_arg(value)?.log10(),
        UnaryFunction::Ln => positive_log_arg(value)?.ln(),
        UnaryFunction::Sqrt => {
            if value < 0.0 {
                return Err(ArithmeticError::NegativeSquareRoot(value));
            }
            value.sqrt()
        }
        UnaryFunction::Cbrt => value.cbrt(),
        UnaryFunction::Exp => value.exp(),
        UnaryFunction::Abs => value.abs(),
        UnaryFunction::Factorial => factorial(value)?,
        UnaryFunction::Square => value * value,
        UnaryFunction::Cube => value * value * value,
        UnaryFunction::PowerOfTen => 10f64.powf(value),
        UnaryFunction::Reciprocal => {
            if value == 0.0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            1.0 / value
        }
        UnaryFunction::Percent => value / 100.0,
    };
    finite(result, || format!("{}({})", function, value))
}

/// n! for a non-negative integer-valued `n`
pub fn factorial(n: f64) -> Result<f64, ArithmeticError> {
    if !n.is_finite() || n < 0.0 || n.fract() != 0.0 {
        return Err(ArithmeticError::InvalidFactorial(n));
    }
    if n > MAX_FACTORIAL as f64 {
        return Err(ArithmeticError::Overflow(format!("{}!", n)));
    }
    Ok((2..=n as u32).fold(1.0, |acc, i| acc * i as f64))
}

fn unit_interval(function: &'static str, value: f64) -> Result<f64, ArithmeticError> {
    if (-1.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ArithmeticError::OutOfDomain { function, value })
    }
}

fn positive_log_arg(value: f64) -> Result<f64, ArithmeticError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ArithmeticError::NonPositiveLogarithm(value))
    }
}

fn finite(result: f64, describe: impl FnOnce() -> String) -> Result<f64, ArithmeticError> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ArithmeticError::Overflow(describe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_binary_operations() {
        assert_eq!(evaluate_binary(2.0, BinaryOperator::Add, 3.0).unwrap(), 5.0);
        assert_eq!(evaluate_binary(2.0, BinaryOperator::Subtract, 3.0).unwrap(), -1.0);
        assert_eq!(evaluate_binary(2.5, BinaryOperator::Multiply, 4.0).unwrap(), 10.0);
        assert_eq!(evaluate_binary(9.0, BinaryOperator::Divide, 4.0).unwrap(), 2.25);
        assert_eq!(evaluate_binary(2.0, BinaryOperator::Power, 10.0).unwrap(), 1024.0);
        assert_eq!(evaluate_binary(10.0, BinaryOperator::Modulo, 4.0).unwrap(), 2.0);
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            evaluate_binary(1.0, BinaryOperator::Divide, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            evaluate_binary(1.0, BinaryOperator::Modulo, 0.0),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            evaluate_unary(UnaryFunction::Reciprocal, 0.0, AngleMode::Radians),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_trig_in_degrees() {
        let sin = evaluate_unary(UnaryFunction::Sin, 30.0, AngleMode::Degrees).unwrap();
        assert_abs_diff_eq!(sin, 0.5, epsilon = 1e-12);
        let asin = evaluate_unary(UnaryFunction::Asin, 0.5, AngleMode::Degrees).unwrap();
        assert_abs_diff_eq!(asin, 30.0, epsilon = 1e-9);
        let atan = evaluate_unary(UnaryFunction::Atan, 1.0, AngleMode::Radians).unwrap();
        assert_relative_eq!(atan, std::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_domain_errors() {
        assert!(matches!(
            evaluate_unary(UnaryFunction::Acos, 1.5, AngleMode::Radians),
            Err(ArithmeticError::OutOfDomain { function: "acos", .. })
        ));
        assert_eq!(
            evaluate_unary(UnaryFunction::Sqrt, -4.0, AngleMode::Radians),
            Err(ArithmeticError::NegativeSquareRoot(-4.0))
        );
        assert_eq!(
            evaluate_unary(UnaryFunction::Ln, 0.0, AngleMode::Radians),
            Err(ArithmeticError::NonPositiveLogarithm(0.0))
        );
        assert!(evaluate_unary(UnaryFunction::Log10, -1.0, AngleMode::Radians).is_err());
        assert!(matches!(
            evaluate_binary(10.0, BinaryOperator::Power, 400.0),
            Err(ArithmeticError::Overflow(_))
        ));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(1.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert!(factorial(170.0).unwrap().is_finite());
        assert!(matches!(factorial(171.0), Err(ArithmeticError::Overflow(_))));
        assert_eq!(factorial(-1.0), Err(ArithmeticError::InvalidFactorial(-1.0)));
        assert_eq!(factorial(2.5), Err(ArithmeticError::InvalidFactorial(2.5)));
    }

    #[test]
    fn test_misc_unary() {
        let eval = |f| evaluate_unary(f, 3.0, AngleMode::Radians).unwrap();
        assert_eq!(eval(UnaryFunction::Square), 9.0);
        assert_eq!(eval(UnaryFunction::Cube), 27.0);
        assert_relative_eq!(eval(UnaryFunction::PowerOfTen), 1000.0, max_relative = 1e-12);
        assert_eq!(eval(UnaryFunction::Percent), 0.03);
        assert_relative_eq!(eval(UnaryFunction::Cbrt), 3f64.cbrt());
        assert_eq!(evaluate_unary(UnaryFunction::Abs, -7.5, AngleMode::Radians).unwrap(), 7.5);
    }

    #[test]
    fn test_parse_operators() {
        assert_eq!("×".parse::<BinaryOperator>().unwrap(), BinaryOperator::Multiply);
        assert_eq!("mod".parse::<BinaryOperator>().unwrap(), BinaryOperator::Modulo);
        assert_eq!("fact".parse::<UnaryFunction>().unwrap(), UnaryFunction::Factorial);
        assert!(matches!("??".parse::<BinaryOperator>(), Err(ArithmeticError::UnknownOperator(_))));
        assert_eq!(Constant::Phi.value(), 1.61803398875);
    }
}
