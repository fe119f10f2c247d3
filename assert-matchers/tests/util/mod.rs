// Common test utilities

#![allow(dead_code)]

use std::panic;

/// Captures the panic message from a function that should panic
pub fn capture_panic_message<F: FnOnce() + panic::UnwindSafe>(f: F) -> String {
    let err = panic::catch_unwind(f).unwrap_err();
    err.downcast_ref::<String>()
        .map(|s| s.as_str())
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap()
        .to_string()
}

/// Replaces closure type names, which depend on the test's module path,
/// with a fixed placeholder.
pub fn normalize_closures(message: &str) -> String {
    message
        .lines()
        .map(|line| match line.find("<fn()>: ") {
            Some(at) if line.ends_with("{{closure}}") => {
                format!("{}<fn()>: {{{{closure}}}}", &line[..at])
            }
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
