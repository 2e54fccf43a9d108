//! Addition expression evaluator
//!
//! Expressions are numeric operands joined by `+`, e.g. `2 + 3.5 + 1e2`.
//! There is no escaping and no operator other than the delimiter; operands
//! are whatever the `f64` parser accepts after trimming, as long as the
//! value is finite.

use crate::error::{Result, ServerError};

/// Operand delimiter
pub const DELIMITER: char = '+';

/// Minimum number of operands in a valid expression
pub const MIN_OPERANDS: usize = 2;

/// Parse an expression into its operands without summing them
pub fn parse_operands(expression: &str) -> Result<Vec<f64>> {
    let parts: Vec<&str> = expression.split(DELIMITER).collect();

    if parts.len() < MIN_OPERANDS {
        return Err(ServerError::invalid_expression(
            expression,
            format!("need at least {} operands", MIN_OPERANDS),
        ));
    }

    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            let token = part.trim();
            if token.is_empty() {
                return Err(ServerError::invalid_expression(
                    expression,
                    format!("operand {} is empty", i + 1),
                ));
            }
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                _ => Err(ServerError::invalid_expression(
                    expression,
                    format!("'{}' is not a number", token),
                )),
            }
        })
        .collect()
}

/// Evaluate an addition expression, summing operands left to right
pub fn evaluate(expression: &str) -> Result<f64> {
    let operands = parse_operands(expression)?;
    Ok(operands.iter().fold(0.0, |acc, x| acc + x))
}

/// Render a sum the way it is returned to the host (`9`, not `9.0`)
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Collapse -0 so "-0+0" reads as "0"
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(expression: &str) {
        match evaluate(expression) {
            Err(ServerError::InvalidExpression { expression: e, .. }) => {
                assert_eq!(e, expression)
            }
            other => panic!("expected InvalidExpression for {expression:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_simple_sums() {
        assert_eq!(evaluate("7+9+2").unwrap(), 18.0);
        assert_eq!(evaluate("2+3+4").unwrap(), 9.0);
        assert_eq!(evaluate(" 1.5 + 2.25 ").unwrap(), 3.75);
        assert_eq!(evaluate("-3+5").unwrap(), 2.0);
    }

    #[test]
    fn test_scientific_notation_accepted() {
        assert_eq!(evaluate("1e3+1").unwrap(), 1001.0);
        assert_eq!(evaluate(".5+5.").unwrap(), 5.5);
    }

    #[test]
    fn test_too_few_operands() {
        assert_invalid("5");
        assert_invalid("");
    }

    #[test]
    fn test_empty_operands() {
        assert_invalid("5++3");
        assert_invalid("+5+3");
        assert_invalid("5+3+");
        assert_invalid("5+ +3");
    }

    #[test]
    fn test_non_numeric_operands() {
        assert_invalid("5+a+3");
        assert_invalid("1+inf");
        assert_invalid("NaN+1");
        assert_invalid("0x10+1");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(9.0), "9");
        assert_eq!(format_number(3.75), "3.75");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_parse_operands_order() {
        assert_eq!(parse_operands("3+1+2").unwrap(), vec![3.0, 1.0, 2.0]);
    }
}
