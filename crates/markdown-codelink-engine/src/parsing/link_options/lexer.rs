//! # Info String Lexer
//!
//! Breaks the text after an opening fence into a tagged token stream using
//! [Logos]. Lexing happens in two steps:
//!
//! 1. [`Lexeme`] is the raw Logos output: flags, `--flag=value` pairs,
//!    quoted strings and bare words. Whitespace separates lexemes and is
//!    skipped.
//! 2. [`tokenize`] decides which bare words are option values and which are
//!    positional arguments, producing [`Token`]s for the grammar.
//!
//! A word directly after a known option flag is that option's value, even if
//! it would otherwise look positional. A word after an unknown flag is
//! positional, since unknown flags take no value. A token that is neither a
//! flag, a quoted string nor a plain word is reported whole, never split.
//!
//! [Logos]: https://docs.rs/logos

use logos::Logos;

use super::LinkOption;

/// Raw lexemes recognised by Logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
pub enum Lexeme {
    /// `--name` or `-n`
    #[regex(r"--?[A-Za-z][A-Za-z0-9-]*")]
    Flag,

    /// `--name=value`, value optionally quoted
    #[regex(r#"--[A-Za-z][A-Za-z0-9-]*=(?:"[^"]*"|[^ \t"]*)"#)]
    FlagWithValue,

    /// `"quoted value"`
    #[regex(r#""[^"]*""#)]
    Quoted,

    /// A quote with no closing partner before the end of the line
    #[regex(r#""[^"]*"#)]
    Unterminated,

    /// A run of non-whitespace characters that isn't a flag and has no quotes
    #[regex(r#"[^ \t"-][^ \t"]*"#)]
    Word,

    /// Any other run of non-whitespace characters, e.g. `-1`, `--` or `a"b"`.
    /// Only wins when nothing above matches the same text.
    #[regex(r"[^ \t]+", priority = 0)]
    Malformed,
}

/// Tokens consumed by the option grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// An option flag as written, e.g. `--region`.
    Flag(&'a str),
    /// The value following a known option flag.
    Value(String),
    /// A bare argument not claimed by a flag.
    Positional(String),
    /// Something the lexer couldn't make sense of, already phrased as an error.
    Error(String),
}

/// Lexes `info` into grammar tokens.
pub fn tokenize(info: &str) -> Vec<Token<'_>> {
    let mut lexer = Lexeme::lexer(info);
    let mut tokens = Vec::new();
    let mut expects_value = false;

    while let Some(result) = lexer.next() {
        let slice = lexer.slice();
        let takes_value = std::mem::replace(&mut expects_value, false);

        match result {
            Ok(Lexeme::Flag) => {
                expects_value = LinkOption::from_flag(slice).is_some();
                tokens.push(Token::Flag(slice));
            }
            Ok(Lexeme::FlagWithValue) => {
                let (flag, value) = slice.split_once('=').unwrap_or((slice, ""));
                tokens.push(Token::Flag(flag));
                tokens.push(Token::Value(unquote(value).to_string()));
            }
            Ok(Lexeme::Quoted | Lexeme::Word) => {
                let text = unquote(slice).to_string();
                if takes_value {
                    tokens.push(Token::Value(text));
                } else {
                    tokens.push(Token::Positional(text));
                }
            }
            Ok(Lexeme::Malformed) => {
                tokens.push(Token::Error(format!(
                    "Unrecognized command or argument '{slice}'"
                )));
            }
            Ok(Lexeme::Unterminated) => {
                tokens.push(Token::Error(format!("Unterminated quoted value: {slice}")));
            }
            Err(()) => {
                tokens.push(Token::Error(format!(
                    "Unrecognized command or argument '{slice}'"
                )));
            }
        }
    }

    tokens
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}
