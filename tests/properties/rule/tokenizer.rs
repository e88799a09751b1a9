//! Property-based tests for rule tokenizing.

use crate::properties::strategies::{
	field_name_strategy, numeric_comparison_strategy, quoted_text_strategy,
	rule_fragments_strategy,
};
use proptest::{prelude::*, test_runner::Config};
use rule_engine::services::rule::{is_operator, tokenize, TokenizeError};

proptest! {
	#![proptest_config(Config {
		failure_persistence: None,
		..Config::default()
	})]

	// Tokens are never empty, and only quoted literals contain spaces
	#[test]
	fn tokens_are_trimmed_and_unquoted_tokens_have_no_spaces(text in rule_fragments_strategy()) {
		match tokenize(&text) {
			Ok(tokens) => {
				for token in tokens {
					prop_assert!(!token.is_empty());
					prop_assert!(!token.contains('\t'));
					if !token.starts_with('\'') {
						prop_assert!(!token.contains(' '), "token {:?}", token);
					}
				}
			}
			Err(TokenizeError::UnterminatedLiteral { literal }) => {
				prop_assert!(literal.starts_with('\''));
			}
			Err(TokenizeError::UnopenedLiteral { token }) => {
				prop_assert!(token.ends_with('\''));
			}
		}
	}

	#[test]
	fn comparison_tokenizes_into_three_tokens((field, operator, literal) in numeric_comparison_strategy()) {
		let compact = format!("{}{}{}", field, operator, literal);
		let spaced = format!("  {}   {}\t{} ", field, operator, literal);
		let expected = vec![field, operator.to_string(), literal.to_string()];

		prop_assert_eq!(tokenize(&compact).unwrap(), expected.clone());
		prop_assert_eq!(tokenize(&spaced).unwrap(), expected);
	}

	#[test]
	fn quoted_literal_stays_one_token(field in field_name_strategy(), text in quoted_text_strategy()) {
		let tokens = tokenize(&format!("{} = '{}'", field, text)).unwrap();
		prop_assert_eq!(tokens.len(), 3);
		prop_assert_eq!(&tokens[2], &format!("'{}'", text));
		prop_assert!(is_operator(&tokens[1]));
	}
}
