//! Parses the two-operand textual form `<number> <operation> <number>`.

use thiserror::Error;

use crate::dispatch::Operation;

/// A parsed `arg1 operation arg2` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub arg1: f64,
    pub operation: Operation,
    pub arg2: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("expected `<number> <operation> <number>`, got {0} token(s)")]
    TokenCount(usize),

    #[error("invalid operand `{0}`")]
    InvalidOperand(String),
}

/// Splits on whitespace and reads exactly three tokens. The operation token
/// is taken verbatim, so unknown words parse into [`Operation::Other`].
pub fn parse(input: &str) -> Result<BinaryOp, ParseError> {
    let tokens: Vec<&str> = input.split_whitespace().collect();
    let [lhs, op, rhs] = tokens.as_slice() else {
        return Err(ParseError::TokenCount(tokens.len()));
    };

    Ok(BinaryOp {
        arg1: operand(lhs)?,
        operation: Operation::from(*op),
        arg2: operand(rhs)?,
    })
}

fn operand(token: &str) -> Result<f64, ParseError> {
    token
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidOperand(token.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_addition() {
        let op = parse("3 add 4").unwrap();
        assert_eq!(op.arg1, 3.0);
        assert_eq!(op.operation, Operation::Add);
        assert_eq!(op.arg2, 4.0);
    }

    #[test]
    fn tolerates_extra_whitespace_and_decimals() {
        let op = parse("  -2.5\tmultiply   10 ").unwrap();
        assert_eq!(op.arg1, -2.5);
        assert_eq!(op.operation, Operation::Multiply);
        assert_eq!(op.arg2, 10.0);
    }

    #[test]
    fn unknown_operation_is_carried_through() {
        let op = parse("2 modulo 3").unwrap();
        assert_eq!(op.operation, Operation::Other("modulo".into()));
    }

    #[test]
    fn infix_symbols_are_rejected() {
        assert_eq!(parse("2+2"), Err(ParseError::TokenCount(1)));
        assert_eq!(parse(""), Err(ParseError::TokenCount(0)));
        assert_eq!(parse("1 add 2 add 3"), Err(ParseError::TokenCount(5)));
    }

    #[test]
    fn non_numeric_operands_are_rejected() {
        assert_eq!(
            parse("three add 4"),
            Err(ParseError::InvalidOperand("three".into()))
        );
        assert_eq!(
            parse("3 add four"),
            Err(ParseError::InvalidOperand("four".into()))
        );
    }
}
