//! # Link Options
//!
//! Grammar for the info string of a code-link fence:
//!
//! ```text
//! <keyword> [<source-file>] [--region <name>] [--session <id>] [--project <path> | --package <name>]
//! ```
//!
//! [`parse_info`] returns `None` when the leading keyword doesn't match, which
//! means the fence belongs to some other block kind. Otherwise it always
//! returns a [`ParsedInfo`]: every option it could determine plus a list of
//! grammar errors, in the order they were found. Errors never stop the parse.
//!
//! Cross-option rules (project vs. package) are applied by the code-link
//! block parser, not here.

pub mod lexer;

use relative_path::RelativePathBuf;
use std::path::Path;

use lexer::{Token, tokenize};

/// A named option accepted after the keyword. Each takes exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LinkOption {
    Region,
    Session,
    Project,
    Package,
}

impl LinkOption {
    pub const ALL: [LinkOption; 4] = [
        LinkOption::Region,
        LinkOption::Session,
        LinkOption::Project,
        LinkOption::Package,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            LinkOption::Region => "--region",
            LinkOption::Session => "--session",
            LinkOption::Project => "--project",
            LinkOption::Package => "--package",
        }
    }

    pub fn from_flag(flag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.flag() == flag)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Options parsed from a single info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkOptions {
    /// Set only when the positional argument parsed as a relative path.
    pub source_file: Option<RelativePathBuf>,
    pub region: Option<String>,
    pub session: Option<String>,
    pub project: Option<RelativePathBuf>,
    pub package: Option<String>,
}

/// Result of parsing an info string that starts with the expected keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInfo {
    pub options: LinkOptions,
    /// Grammar errors in detection order.
    pub errors: Vec<String>,
    /// Whether `--project` appeared, whether or not its value was usable.
    pub project_given: bool,
    /// Whether `--package` appeared, whether or not its value was usable.
    pub package_given: bool,
}

#[derive(Debug, Clone, Copy)]
enum State<'a> {
    Arguments,
    Value(LinkOption, &'a str),
}

/// Parses `info` if it starts with `keyword`.
///
/// Declining is side-effect free: no tokens past the keyword are inspected.
pub fn parse_info(keyword: &str, info: &str) -> Option<ParsedInfo> {
    let first = info.split_whitespace().next()?;
    if first != keyword {
        return None;
    }

    let mut tokens = tokenize(info).into_iter();
    match tokens.next() {
        Some(Token::Positional(word)) if word == keyword => {}
        _ => return None,
    }

    let mut parsed = ParsedInfo::default();
    let mut occurrences = [0usize; LinkOption::ALL.len()];
    let mut positionals = 0usize;
    let mut state = State::Arguments;

    for token in tokens {
        state = match (state, token) {
            (State::Value(_, flag), Token::Value(value)) if value.is_empty() => {
                parsed.missing_value(flag);
                State::Arguments
            }
            (State::Value(option, _), Token::Value(value)) => {
                occurrences[option.index()] += 1;
                if occurrences[option.index()] == 1 {
                    parsed.assign(option, value);
                }
                State::Arguments
            }
            (State::Value(_, flag), token) => {
                parsed.missing_value(flag);
                parsed.argument(token, &mut positionals)
            }
            (State::Arguments, token) => parsed.argument(token, &mut positionals),
        };
    }

    if let State::Value(_, flag) = state {
        parsed.missing_value(flag);
    }

    for option in LinkOption::ALL {
        let count = occurrences[option.index()];
        if count > 1 {
            parsed.errors.push(format!(
                "Option '{}' expects a single argument but {count} were provided.",
                option.flag()
            ));
        }
    }

    Some(parsed)
}

impl ParsedInfo {
    fn argument<'a>(&mut self, token: Token<'a>, positionals: &mut usize) -> State<'a> {
        match token {
            Token::Flag(flag) => match LinkOption::from_flag(flag) {
                Some(option) => {
                    match option {
                        LinkOption::Project => self.project_given = true,
                        LinkOption::Package => self.package_given = true,
                        LinkOption::Region | LinkOption::Session => {}
                    }
                    return State::Value(option, flag);
                }
                None => self.unrecognized(flag),
            },
            Token::Positional(text) => {
                *positionals += 1;
                if *positionals == 1 {
                    // An unusable path is not an error: the block is just literal.
                    self.options.source_file = relative_path(&text);
                } else {
                    self.unrecognized(&text);
                }
            }
            // Only reachable after `--unknown=value`; the flag is already reported.
            Token::Value(_) => {}
            Token::Error(message) => self.errors.push(message),
        }
        State::Arguments
    }

    fn assign(&mut self, option: LinkOption, value: String) {
        match option {
            LinkOption::Region => self.options.region = Some(value),
            LinkOption::Session => self.options.session = Some(value),
            LinkOption::Package => self.options.package = Some(value),
            LinkOption::Project => match relative_path(&value) {
                Some(path) => self.options.project = Some(path),
                None => self.errors.push(format!("Invalid project path: {value}")),
            },
        }
    }

    fn missing_value(&mut self, flag: &str) {
        self.errors
            .push(format!("Required argument missing for option: {flag}"));
    }

    fn unrecognized(&mut self, argument: &str) {
        self.errors
            .push(format!("Unrecognized command or argument '{argument}'"));
    }
}

/// Keeps the path as written so diagnostics can name it verbatim.
fn relative_path(text: &str) -> Option<RelativePathBuf> {
    let path = Path::new(text);
    if text.is_empty() || path.has_root() || path.is_absolute() {
        return None;
    }
    Some(RelativePathBuf::from(text))
}
