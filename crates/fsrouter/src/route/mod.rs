/// Route module for file-based routing
///
/// Pure functional components that turn a view path into a route:
/// - `pattern`: the bracket tokenizer
/// - `parser`: tokens → rewritten pattern + declared parameters
pub mod parser;
pub mod pattern;

// Re-export commonly used types
pub use parser::{parse_route, parse_route_with, strip_view_suffix, ParseOptions};
pub use pattern::{param_tokens, tokenize, ParamToken, Token};
