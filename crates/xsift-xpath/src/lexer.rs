//! XPath lexer using logos

use logos::Logos;
use xsift_core::{Error, Result};

/// XPath tokens
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("/")]
    Slash,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("@")]
    At,

    #[token(",")]
    Comma,

    #[token("=")]
    Equals,

    #[token("!=")]
    NotEquals,

    #[token("::")]
    DoubleColon,

    #[token(":")]
    Colon,

    #[token("*")]
    Star,

    // XPath 1.0 literals carry no escape sequences; a string simply runs
    // to the next matching quote.
    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    StringDouble(String),

    #[regex(r#"'[^']*'"#, |lex| {
        let s = lex.slice();
        s[1..s.len() - 1].to_string()
    })]
    StringSingle(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    // NCNames allow '-' and '.', so `starts-with` lexes as a single name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.\-]*", |lex| lex.slice().to_string())]
    Name(String),
}

/// Tokenize an XPath expression.
///
/// Any character outside the grammar surfaces as a generic parse failure;
/// the supported-subset checks happen later, against the parsed tree.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    for (result, span) in Token::lexer(input).spanned() {
        match result {
            Ok(token) => tokens.push(token),
            Err(_) => {
                return Err(Error::Parse(format!(
                    "unexpected character at offset {}: {:?}",
                    span.start,
                    &input[span.clone()]
                )));
            }
        }
    }
    Ok(tokens)
}
