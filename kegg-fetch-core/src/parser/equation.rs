//! Reaction equation decoder
//!
//! Equations are best-effort: anything that cannot be split cleanly comes
//! back as an empty, irreversible [`Equation`] instead of an error.

use regex_utils::term;
use tracing::debug;

use crate::parser::model::{Equation, EquationTerm};

/// Bidirectional arrow; must be tested before [`IRREVERSIBLE_ARROW`]
pub const REVERSIBLE_ARROW: &str = "<=>";

/// Unidirectional arrow, a substring of [`REVERSIBLE_ARROW`]
pub const IRREVERSIBLE_ARROW: &str = "=>";

/// Canonical spaced delimiter between terms
pub const TERM_DELIMITER: &str = " + ";

/// Split an equation into reactants, products and reversibility
pub fn split_equation(equation: &str) -> Equation {
    let (arrow, reversible) = if equation.contains(REVERSIBLE_ARROW) {
        (REVERSIBLE_ARROW, true)
    } else if equation.contains(IRREVERSIBLE_ARROW) {
        (IRREVERSIBLE_ARROW, false)
    } else {
        if !equation.trim().is_empty() {
            debug!("No arrow in equation: {}", equation);
        }
        return Equation::default();
    };

    // Every arrow contains exactly one "=>", so this counts arrows of both kinds
    if equation.matches(IRREVERSIBLE_ARROW).count() != 1 {
        debug!("More than one arrow in equation: {}", equation);
        return Equation::default();
    }

    let Some((left, right)) = equation.split_once(arrow) else {
        return Equation::default();
    };

    Equation {
        reactants: parse_terms(left.trim()),
        products: parse_terms(right.trim()),
        reversible,
    }
}

/// Decode one side of an equation into stoichiometric terms.
///
/// Splits on `" + "` when present, otherwise on bare `+`. Empty terms are
/// discarded.
pub fn parse_terms(side: &str) -> Vec<EquationTerm> {
    let delimiter = if side.contains(TERM_DELIMITER) { TERM_DELIMITER } else { "+" };

    side.split(delimiter)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_term)
        .collect()
}

fn parse_term(term: &str) -> EquationTerm {
    if let Some((digits, rest)) = term::split_coefficient(term) {
        match digits.parse::<u32>() {
            Ok(coefficient) if coefficient >= 1 => {
                return EquationTerm::new(coefficient, rest.trim());
            }
            _ => debug!("Ignoring unusable coefficient in term: {}", term),
        }
    }

    EquationTerm::new(1, term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::format_terms;

    fn terms(pairs: &[(u32, &str)]) -> Vec<EquationTerm> {
        pairs.iter().map(|(c, id)| EquationTerm::new(*c, *id)).collect()
    }

    #[test]
    fn test_reversible_equation() {
        let eq = split_equation("C00002 + C00001 <=> C00008 + C00009");
        assert!(eq.reversible);
        assert_eq!(eq.reactants, terms(&[(1, "C00002"), (1, "C00001")]));
        assert_eq!(eq.products, terms(&[(1, "C00008"), (1, "C00009")]));
    }

    #[test]
    fn test_irreversible_equation_with_coefficients() {
        let eq = split_equation("2 C00002 => 2 C00008");
        assert!(!eq.reversible);
        assert_eq!(eq.reactants, terms(&[(2, "C00002")]));
        assert_eq!(eq.products, terms(&[(2, "C00008")]));
    }

    #[test]
    fn test_empty_equation() {
        let eq = split_equation("");
        assert!(!eq.reversible);
        assert!(eq.reactants.is_empty());
        assert!(eq.products.is_empty());
        assert!(eq.is_empty());
    }

    #[test]
    fn test_missing_arrow_degrades_to_empty() {
        assert_eq!(split_equation("C00002 + C00001"), Equation::default());
        assert_eq!(split_equation("C00002 = C00001"), Equation::default());
    }

    #[test]
    fn test_multiple_arrows_degrade_to_empty() {
        assert_eq!(split_equation("A <=> B <=> C"), Equation::default());
        assert_eq!(split_equation("A <=> B => C"), Equation::default());
        assert_eq!(split_equation("A => B => C"), Equation::default());
    }

    #[test]
    fn test_one_sided_equation() {
        let eq = split_equation("C00031 <=>");
        assert!(eq.reversible);
        assert_eq!(eq.reactants, terms(&[(1, "C00031")]));
        assert!(eq.products.is_empty());
    }

    #[test]
    fn test_bare_plus_delimiter() {
        assert_eq!(parse_terms("C00002+2 C00001"), terms(&[(1, "C00002"), (2, "C00001")]));
    }

    #[test]
    fn test_spaced_delimiter_keeps_inner_plus() {
        assert_eq!(
            parse_terms("(n+1) C00002 + C00001"),
            terms(&[(1, "(n+1) C00002"), (1, "C00001")])
        );
    }

    #[test]
    fn test_lone_inner_plus_uses_bare_split() {
        let eq = split_equation("C00001 <=> (n+1) C00002");
        assert_eq!(eq.reactants, terms(&[(1, "C00001")]));
        assert_eq!(eq.products, terms(&[(1, "(n"), (1, "1) C00002")]));
    }

    #[test]
    fn test_empty_terms_are_discarded() {
        assert_eq!(parse_terms("C00002 +  + C00001"), terms(&[(1, "C00002"), (1, "C00001")]));
        assert_eq!(parse_terms("C00002 +"), terms(&[(1, "C00002")]));
        assert!(parse_terms("").is_empty());
    }

    #[test]
    fn test_non_numeric_coefficients_stay_in_identifier() {
        assert_eq!(parse_terms("n C00001"), terms(&[(1, "n C00001")]));
        assert_eq!(parse_terms("0 C00001"), terms(&[(1, "0 C00001")]));
        assert_eq!(
            parse_terms("99999999999 C00001"),
            terms(&[(1, "99999999999 C00001")])
        );
    }

    #[test]
    fn test_formatted_terms_reparse() {
        let original = terms(&[(1, "C00002"), (3, "C00001"), (12, "C00080")]);

        let joined = original.iter().map(ToString::to_string).collect::<Vec<_>>().join("+");
        assert_eq!(parse_terms(&joined), original);

        assert_eq!(parse_terms(&format_terms(&original)), original);
    }

    #[test]
    fn test_display_round_trip() {
        let eq = split_equation("C00031 + 2 C00002 => 2 C00008 + C00668");
        assert_eq!(eq.to_string(), "C00031 + 2 C00002 => 2 C00008 + C00668");
        assert_eq!(split_equation(&eq.to_string()), eq);
    }
}
