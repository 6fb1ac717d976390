use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token of a postfix stat formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormulaToken {
    Level,
    Number(f64),
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Middle,
}

impl FormulaToken {
    pub fn parse(token: &str) -> Option<FormulaToken> {
        let token = match token.trim() {
            "level" => FormulaToken::Level,
            "+" => FormulaToken::Add,
            "-" => FormulaToken::Subtract,
            "*" => FormulaToken::Multiply,
            "/" => FormulaToken::Divide,
            "power" => FormulaToken::Power,
            "sqrt" => FormulaToken::Sqrt,
            "middle" => FormulaToken::Middle,
            other => FormulaToken::Number(other.parse::<i64>().ok()? as f64),
        };
        Some(token)
    }

    /// Number of operands popped from the stack.
    fn arity(&self) -> usize {
        match self {
            FormulaToken::Level | FormulaToken::Number(_) => 0,
            FormulaToken::Sqrt => 1,
            FormulaToken::Middle => 3,
            _ => 2,
        }
    }
}

impl fmt::Display for FormulaToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaToken::Level => write!(f, "level"),
            FormulaToken::Number(value) => write!(f, "{}", *value as i64),
            FormulaToken::Add => write!(f, "+"),
            FormulaToken::Subtract => write!(f, "-"),
            FormulaToken::Multiply => write!(f, "*"),
            FormulaToken::Divide => write!(f, "/"),
            FormulaToken::Power => write!(f, "power"),
            FormulaToken::Sqrt => write!(f, "sqrt"),
            FormulaToken::Middle => write!(f, "middle"),
        }
    }
}

/// Errors raised while parsing a formula from its token list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    /// A token that is neither an operator, `level`, nor an integer
    UnknownToken(String),
    /// An operator ran out of operands at the given token position
    StackUnderflow(usize),
    /// The formula leaves anything other than a single value on the stack
    UnbalancedResult(usize),
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::UnknownToken(token) => write!(f, "unknown formula token '{}'", token),
            FormulaError::StackUnderflow(position) => {
                write!(f, "operator at position {} is missing operands", position)
            }
            FormulaError::UnbalancedResult(depth) => {
                write!(f, "formula leaves {} values on the stack, expected 1", depth)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

/// A validated postfix (reverse Polish) formula over the monster's level.
///
/// Formulas are written as token lists such as `["level", "2", "*", "5", "+"]`.
/// Division and `power` are evaluated in floating point; `sqrt` truncates its
/// result; `middle` pushes the median of its three operands. The final value is
/// truncated towards zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Formula {
    tokens: Vec<FormulaToken>,
}

impl Formula {
    pub fn new(tokens: Vec<FormulaToken>) -> Result<Self, FormulaError> {
        let mut depth = 0usize;
        for (position, token) in tokens.iter().enumerate() {
            let arity = token.arity();
            if depth < arity {
                return Err(FormulaError::StackUnderflow(position));
            }
            depth = depth - arity + 1;
        }
        if depth != 1 {
            return Err(FormulaError::UnbalancedResult(depth));
        }
        Ok(Self { tokens })
    }

    /// A formula that ignores the level and always yields `value`.
    pub fn constant(value: u32) -> Self {
        Self {
            tokens: vec![FormulaToken::Number(value as f64)],
        }
    }

    pub fn tokens(&self) -> &[FormulaToken] {
        &self.tokens
    }

    pub fn evaluate(&self, level: u32) -> i64 {
        let mut stack: Vec<f64> = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let value = match token {
                FormulaToken::Level => level as f64,
                FormulaToken::Number(n) => *n,
                FormulaToken::Sqrt => pop(&mut stack).sqrt().trunc(),
                FormulaToken::Middle => {
                    let c = pop(&mut stack);
                    let b = pop(&mut stack);
                    let a = pop(&mut stack);
                    median(a, b, c)
                }
                binary => {
                    let b = pop(&mut stack);
                    let a = pop(&mut stack);
                    match binary {
                        FormulaToken::Add => a + b,
                        FormulaToken::Subtract => a - b,
                        FormulaToken::Multiply => a * b,
                        FormulaToken::Divide => a / b,
                        _ => a.powf(b),
                    }
                }
            };
            stack.push(value);
        }
        pop(&mut stack).trunc() as i64
    }
}

// Validation in `Formula::new` guarantees the stack never underflows.
fn pop(stack: &mut Vec<f64>) -> f64 {
    stack.pop().unwrap_or_default()
}

fn median(a: f64, b: f64, c: f64) -> f64 {
    if (a <= b && b <= c) || (c <= b && b <= a) {
        b
    } else if (b <= a && a <= c) || (c <= a && a <= b) {
        a
    } else {
        c
    }
}

impl TryFrom<Vec<String>> for Formula {
    type Error = FormulaError;

    fn try_from(raw: Vec<String>) -> Result<Self, Self::Error> {
        let tokens = raw
            .iter()
            .map(|token| FormulaToken::parse(token).ok_or_else(|| FormulaError::UnknownToken(token.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Formula::new(tokens)
    }
}

impl From<Formula> for Vec<String> {
    fn from(formula: Formula) -> Self {
        formula.tokens.iter().map(|token| token.to_string()).collect()
    }
}
