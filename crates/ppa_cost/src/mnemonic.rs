//! Operator mnemonic lexer.
//!
//! Operator node names embed their kind and instance number, as in `And3`,
//! `top.u_alu.Plus12` or `LessThan7`. The token is the first run of one ASCII
//! uppercase letter and zero or more lowercase letters that is immediately
//! followed by decimal digits. Compound mnemonics therefore resolve to their
//! tail: `LessThan7` lexes as `Than`, `NotEq2` as `Eq`.

use ppa_common::Operator;

use crate::error::CostError;

/// A mnemonic and instance number lexed from a node name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorToken<'a> {
    /// The alphabetic mnemonic, e.g. `Xor`.
    pub mnemonic: &'a str,
    /// The digits following it, e.g. `7`.
    pub instance: &'a str,
}

/// Finds the first `MnemonicN` token in `name`.
pub fn lex_operator(name: &str) -> Option<OperatorToken<'_>> {
    let bytes = name.as_bytes();
    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_uppercase() {
            continue;
        }
        let mut mid = start + 1;
        while mid < bytes.len() && bytes[mid].is_ascii_lowercase() {
            mid += 1;
        }
        let mut end = mid;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > mid {
            return Some(OperatorToken {
                mnemonic: &name[start..mid],
                instance: &name[mid..end],
            });
        }
    }
    None
}

/// Lexes `name` and resolves its mnemonic against the closed operator set.
pub fn parse_operator(name: &str) -> Result<Operator, CostError> {
    let token = lex_operator(name).ok_or_else(|| CostError::MissingMnemonic {
        node: name.to_string(),
    })?;
    token
        .mnemonic
        .parse()
        .map_err(|_| CostError::UnknownOperator {
            node: name.to_string(),
            mnemonic: token.mnemonic.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_names() {
        let tok = lex_operator("And3").unwrap();
        assert_eq!(tok.mnemonic, "And");
        assert_eq!(tok.instance, "3");
        assert_eq!(parse_operator("Xor7").unwrap(), Operator::Xor);
    }

    #[test]
    fn hierarchical_names() {
        let tok = lex_operator("top.u_alu.Plus12_out").unwrap();
        assert_eq!(tok, OperatorToken { mnemonic: "Plus", instance: "12" });
    }

    #[test]
    fn compound_mnemonics_take_the_tail() {
        let tok = lex_operator("top.LessThan3").unwrap();
        assert_eq!(tok.mnemonic, "Than");
        assert_eq!(tok.instance, "3");
        assert_eq!(parse_operator("NotEq2").unwrap(), Operator::Eq);
    }

    #[test]
    fn no_token() {
        assert!(lex_operator("top.data_q").is_none());
        assert!(lex_operator("And").is_none());
        assert!(matches!(
            parse_operator("top.wire"),
            Err(CostError::MissingMnemonic { .. })
        ));
    }

    #[test]
    fn unknown_mnemonic() {
        let err = parse_operator("u0.Nand4").unwrap_err();
        assert!(matches!(err, CostError::UnknownOperator { ref mnemonic, .. } if mnemonic == "Nand"));
    }
}
