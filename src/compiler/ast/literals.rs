use std::fmt;

/// Literal is an inline scalar carried by an ASTNode::LITERAL.
/// It owns no heap memory, so releasing a literal node only releases the node itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    INTEGER(i32),
    FLOAT(f32),
    CHAR(char)
}

impl fmt::Display for Literal {
    /// Integers print in decimal, floats with six fractional digits and
    /// characters wrapped in single quotes.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::INTEGER(value) => write!(f, "{}", value),
            Literal::FLOAT(value) => write!(f, "{:.6}", value),
            Literal::CHAR(value) => write!(f, "'{}'", value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Literal;

    #[test]
    fn test_literal_display() {
        assert_eq!("5", Literal::INTEGER(5).to_string());
        assert_eq!("-12", Literal::INTEGER(-12).to_string());
        assert_eq!("2.500000", Literal::FLOAT(2.5).to_string());
        assert_eq!("'y'", Literal::CHAR('y').to_string());
    }
}
