//! Settings that come from the environment rather than the command line.

use std::env;

use exprc_parser::{ParseStrategy, ParserConfig};
use log::warn;

/// Names the default parse strategy when `--strategy` is not given.
pub const STRATEGY_ENV: &str = "EXPRC_STRATEGY";

/// Interpret a raw `EXPRC_STRATEGY` value. Unknown values are ignored.
pub fn strategy_from_value(value: Option<&str>) -> Option<ParseStrategy> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse() {
        Ok(strategy) => Some(strategy),
        Err(err) => {
            warn!("ignoring {STRATEGY_ENV}: {err}");
            None
        }
    }
}

pub fn strategy_from_env() -> Option<ParseStrategy> {
    strategy_from_value(env::var(STRATEGY_ENV).ok().as_deref())
}

/// The command-line flag wins over the environment, which wins over the default.
pub fn resolve_config(flag: Option<ParseStrategy>) -> ParserConfig {
    let strategy = flag.or_else(strategy_from_env).unwrap_or_default();
    ParserConfig { strategy }
}
