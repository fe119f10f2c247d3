//! Message formatting shared by all matchers.
//!
//! Messages follow one layout:
//!
//! ```text
//! Expected
//!     <Vec<i32>>: [1, 2]
//! to equal
//!     <Vec<i32>>: [1, 2, 3]
//! ```
//!
//! Values are rendered with their `Debug` output, prefixed by a short type
//! label and indented one level below the prose.

use std::fmt;

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Indents every line of `text` by `indentation` levels.
pub fn indent_string(text: &str, indentation: usize) -> String {
    let prefix = INDENT.repeat(indentation);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `value` as `<Type>: value`, indented by `indentation` levels.
pub fn object<T: fmt::Debug + ?Sized>(value: &T, indentation: usize) -> String {
    labelled(
        &short_type_name(std::any::type_name::<T>()),
        &format!("{value:?}"),
        indentation,
    )
}

/// Renders an already formatted value under a type label computed at
/// runtime.
pub fn labelled(label: &str, rendering: &str, indentation: usize) -> String {
    indent_string(&format!("<{label}>: {rendering}"), indentation)
}

/// Renders a callable actual. Closures have no useful `Debug`, so the
/// callable is identified by its type name.
pub fn callable<F: ?Sized>(indentation: usize) -> String {
    labelled("fn()", std::any::type_name::<F>(), indentation)
}

/// `Expected\n<actual>\n<verb>`, with `actual` already rendered.
pub fn message(actual: &str, verb: &str) -> String {
    format!("Expected\n{actual}\n{verb}")
}

/// `Expected\n<actual>\n<verb>\n<expected>`, with both values already
/// rendered.
pub fn message_with(actual: &str, verb: &str, expected: &str) -> String {
    format!("Expected\n{actual}\n{verb}\n{expected}")
}

/// Strips module paths from a `std::any::type_name` rendering.
///
/// `core::option::Option<alloc::string::String>` becomes `Option<String>`.
/// Generic arguments, references, tuples and arrays keep their structure.
pub fn short_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();

    for ch in name.chars() {
        match ch {
            '<' | '>' | ',' | '(' | ')' | '[' | ']' | ';' | '&' | ' ' | '*' => {
                out.push_str(last_path_segment(&segment));
                segment.clear();
                out.push(ch);
            }
            _ => segment.push(ch),
        }
    }
    out.push_str(last_path_segment(&segment));

    out
}

fn last_path_segment(path: &str) -> &str {
    // Closure names look like `crate::module::{{closure}}`; keep those whole
    // so the rendering still says where the closure lives.
    if path.ends_with("{{closure}}") {
        return path;
    }
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_type_name_strips_paths() {
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("core::option::Option<alloc::string::String>"),
            "Option<String>"
        );
        assert_eq!(
            short_type_name("std::collections::hash::map::HashMap<alloc::string::String, u32>"),
            "HashMap<String, u32>"
        );
        assert_eq!(short_type_name("&str"), "&str");
        assert_eq!(short_type_name("(i32, [u8; 4])"), "(i32, [u8; 4])");
    }

    #[test]
    fn object_renders_type_label() {
        assert_eq!(object(&42_i32, 0), "<i32>: 42");
        assert_eq!(object(&"hi", 1), "    <&str>: \"hi\"");
        assert_eq!(
            object(&vec![Some(1_u8)], 1),
            "    <Vec<Option<u8>>>: [Some(1)]"
        );
    }

    #[test]
    fn indent_string_indents_every_line() {
        assert_eq!(indent_string("a\nb", 1), "    a\n    b");
        assert_eq!(indent_string("a\n\nb", 2), "        a\n\n        b");
    }

    #[test]
    fn message_layout() {
        let actual = object(&1_u8, 1);
        let expected = object(&2_u8, 1);

        assert_eq!(message(&actual, "to panic"), "Expected\n    <u8>: 1\nto panic");
        assert_eq!(
            message_with(&actual, "not to equal", &expected),
            "Expected\n    <u8>: 1\nnot to equal\n    <u8>: 2"
        );
    }
}
