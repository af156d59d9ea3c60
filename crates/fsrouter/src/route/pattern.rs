//! Bracket tokenizer for view file paths
//!
//! Splits a path into literal text and parameter tokens in a single pass.
//! One grammar covers both parameter forms, so a catch-all token can never
//! also be read as a single-segment token.
//!
//! Grammar: `[` + optional `...` + one or more ASCII letters/digits + `]`.
//! Anything else (`[]`, `[a-b]`, `[..x]`, non-ASCII names) is literal text.

use once_cell::sync::Lazy;
use regex::Regex;

static PARAM_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\.\.\.)?([A-Za-z0-9]+)\]").unwrap());

/// A parameter token found in a path
///
/// # Examples
///
/// ```
/// use fsrouter::route::pattern::{tokenize, ParamToken, Token};
///
/// let tokens = tokenize("docs/[...path].html");
/// assert_eq!(tokens[1], Token::Param(ParamToken::CatchAll("path")));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamToken<'a> {
    /// `[name]`: exactly one URL segment
    Single(&'a str),
    /// `[...name]`: one or more trailing URL segments
    CatchAll(&'a str),
}

impl<'a> ParamToken<'a> {
    /// The parameter name without brackets or `...`
    pub fn name(&self) -> &'a str {
        match *self {
            ParamToken::Single(name) | ParamToken::CatchAll(name) => name,
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, ParamToken::CatchAll(_))
    }
}

/// One piece of a tokenized path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text copied verbatim
    Literal(&'a str),
    /// A bracketed parameter
    Param(ParamToken<'a>),
}

/// Splits `path` into literal and parameter tokens, left to right (pure function)
///
/// Concatenating the source text of every token reproduces `path` exactly.
/// Empty literals are never emitted.
///
/// # Examples
///
/// ```
/// use fsrouter::route::pattern::{tokenize, ParamToken, Token};
///
/// assert_eq!(
///     tokenize("blog/[slug].html"),
///     vec![
///         Token::Literal("blog/"),
///         Token::Param(ParamToken::Single("slug")),
///         Token::Literal(".html"),
///     ]
/// );
/// ```
pub fn tokenize(path: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for caps in PARAM_TOKEN.captures_iter(path) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(2)) else {
            continue;
        };

        if whole.start() > last {
            tokens.push(Token::Literal(&path[last..whole.start()]));
        }

        let name = name.as_str();
        let param = if caps.get(1).is_some() {
            ParamToken::CatchAll(name)
        } else {
            ParamToken::Single(name)
        };
        tokens.push(Token::Param(param));

        last = whole.end();
    }

    if last < path.len() {
        tokens.push(Token::Literal(&path[last..]));
    }

    tokens
}

/// Iterates over just the parameter tokens of `path`, in order
pub fn param_tokens(path: &str) -> impl Iterator<Item = ParamToken<'_>> {
    tokenize(path).into_iter().filter_map(|token| match token {
        Token::Param(param) => Some(param),
        Token::Literal(_) => None,
    })
}
