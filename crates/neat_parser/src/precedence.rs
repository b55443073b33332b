//! Operator precedence for binary, ternary and assignment operators.

use neat_ast::syntax_kind::SyntaxKind;

/// Binding powers, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Lowest = 0,
    Assignment = 5,
    Conditional = 7,
    LogicalOr = 10,
    LogicalAnd = 20,
    Equality = 30,
    Relational = 40,
    Additive = 50,
    Multiplicative = 60,
    /// Operand of a prefix unary operator.
    Unary = 100,
}

impl OperatorPrecedence {
    /// Whether operators at this level group to the right, and so may be
    /// consumed at a threshold equal to their own precedence.
    pub fn is_right_associative(self) -> bool {
        matches!(self, OperatorPrecedence::Assignment | OperatorPrecedence::Conditional)
    }
}

/// Get the precedence of an infix operator, or `None` for other tokens.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> Option<OperatorPrecedence> {
    let precedence = match kind {
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword => OperatorPrecedence::Relational,
        SyntaxKind::EqualsEqualsToken | SyntaxKind::ExclamationEqualsToken => {
            OperatorPrecedence::Equality
        }
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::QuestionToken => OperatorPrecedence::Conditional,
        kind if kind.is_assignment_operator() => OperatorPrecedence::Assignment,
        _ => return None,
    };
    Some(precedence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let prec = |k| get_binary_operator_precedence(k).unwrap();
        assert!(prec(SyntaxKind::AsteriskToken) > prec(SyntaxKind::PlusToken));
        assert!(prec(SyntaxKind::PlusToken) > prec(SyntaxKind::InstanceOfKeyword));
        assert!(prec(SyntaxKind::LessThanToken) > prec(SyntaxKind::EqualsEqualsToken));
        assert!(prec(SyntaxKind::EqualsEqualsToken) > prec(SyntaxKind::AmpersandAmpersandToken));
        assert!(prec(SyntaxKind::AmpersandAmpersandToken) > prec(SyntaxKind::BarBarToken));
        assert!(prec(SyntaxKind::BarBarToken) > prec(SyntaxKind::QuestionToken));
        assert!(prec(SyntaxKind::QuestionToken) > prec(SyntaxKind::PercentEqualsToken));
        assert_eq!(get_binary_operator_precedence(SyntaxKind::DotToken), None);
        assert!(OperatorPrecedence::Assignment.is_right_associative());
        assert!(!OperatorPrecedence::Additive.is_right_associative());
    }
}
