//! Process-wide cache of compiled regular expressions.
//!
//! `match_regex` matchers are usually built fresh for every assertion, so
//! the same pattern would otherwise be compiled over and over.

use regex::Regex;
use std::collections::HashMap;
use std::sync::RwLock;

lazy_static::lazy_static! {
    static ref REGEX_CACHE: RwLock<HashMap<String, Regex>> = RwLock::new(HashMap::new());
}

/// Returns the compiled form of `pattern`, compiling and caching it on first
/// use.
///
/// Patterns that fail to compile are not cached; the compile error is
/// returned every time.
pub(crate) fn get_or_compile_regex(pattern: &str) -> Result<Regex, regex::Error> {
    if let Ok(cache) = REGEX_CACHE.read() {
        if let Some(regex) = cache.get(pattern) {
            return Ok(regex.clone());
        }
    }

    let regex = Regex::new(pattern)?;
    log::trace!("compiled regex {pattern:?}");

    // A poisoned cache only costs recompilation.
    if let Ok(mut cache) = REGEX_CACHE.write() {
        cache
            .entry(pattern.to_string())
            .or_insert_with(|| regex.clone());
    }

    Ok(regex)
}

#[cfg(test)]
pub(crate) fn clear_regex_cache() {
    if let Ok(mut cache) = REGEX_CACHE.write() {
        cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiled_patterns_are_reused() {
        clear_regex_cache();

        let first = get_or_compile_regex(r"panicked at \w+").unwrap();
        let second = get_or_compile_regex(r"panicked at \w+").unwrap();

        assert!(first.is_match("panicked at main"));
        assert_eq!(first.as_str(), second.as_str());
        assert!(REGEX_CACHE.read().unwrap().contains_key(r"panicked at \w+"));
    }

    #[test]
    fn invalid_patterns_are_errors_and_not_cached() {
        assert!(get_or_compile_regex("[").is_err());
        assert!(!REGEX_CACHE.read().unwrap().contains_key("["));
    }
}
