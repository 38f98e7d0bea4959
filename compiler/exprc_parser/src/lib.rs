pub mod parser;

pub use parser::{
    parse_line, parse_tokens, parse_tokens_with, ParseError, ParseStrategy, ParserConfig,
};


// Integration tests are in the tests/ directory
