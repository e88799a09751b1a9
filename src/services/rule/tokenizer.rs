//! Splits rule strings into tokens.
//!
//! Operators and parentheses are separated from their neighbours by inserting
//! spaces around every occurrence, then the string is split on spaces. Operator
//! keywords are matched anywhere in the text, so `ORDER` tokenizes as `OR DER`.
//! Single-quoted literals broken apart by this step are glued back together.

use lazy_static::lazy_static;
use regex::Regex;

use super::error::TokenizeError;
use crate::models::Operator;

lazy_static! {
	static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
	static ref PARENTHESES: Regex = Regex::new(r"([()])").unwrap();
	static ref OPERATORS: Regex = Regex::new(r"(AND|OR|[<>=])").unwrap();
}

/// Turns a raw rule string into an ordered token sequence
///
/// # Arguments
/// * `rule` - Raw rule text
///
/// # Returns
/// * `Result<Vec<String>, TokenizeError>` - Tokens in source order, with every
///   quoted literal kept as a single token including its quotes
pub fn tokenize(rule: &str) -> Result<Vec<String>, TokenizeError> {
	let collapsed = WHITESPACE.replace_all(rule, " ");
	let spaced = PARENTHESES.replace_all(collapsed.trim(), " $1 ");
	let spaced = OPERATORS.replace_all(&spaced, " $1 ");

	join_quoted_literals(spaced.split_whitespace())
}

fn join_quoted_literals<'a>(
	raw_tokens: impl Iterator<Item = &'a str>,
) -> Result<Vec<String>, TokenizeError> {
	let mut tokens = Vec::new();
	let mut literal: Option<String> = None;

	for token in raw_tokens {
		let opens = token.starts_with('\'');
		let closes = token.ends_with('\'');

		if opens && closes {
			tokens.push(token.to_string());
		} else if opens {
			literal = Some(token.to_string());
		} else if closes {
			let mut open = literal.take().ok_or_else(|| TokenizeError::UnopenedLiteral {
				token: token.to_string(),
			})?;
			open.push(' ');
			open.push_str(token);
			tokens.push(open);
		} else if let Some(open) = literal.as_mut() {
			open.push(' ');
			open.push_str(token);
		} else {
			tokens.push(token.to_string());
		}
	}

	match literal {
		Some(literal) => Err(TokenizeError::UnterminatedLiteral { literal }),
		None => Ok(tokens),
	}
}

/// Whether a token is one of the five operator symbols
pub fn is_operator(token: &str) -> bool {
	token.parse::<Operator>().is_ok()
}

/// Operator binding strength; 0 for anything that is not an operator
pub fn precedence(token: &str) -> u8 {
	token
		.parse::<Operator>()
		.map(|operator| operator.precedence())
		.unwrap_or(0)
}
