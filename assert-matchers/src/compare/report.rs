use std::fmt;

/// Every difference found by one comparison, in traversal order.
#[derive(Debug, Default, Clone)]
pub struct Report {
    differences: Vec<Difference>,
}

/// A single difference between the actual and the expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difference {
    /// Full path of the position, root type included: `User.address.city`.
    pub path: String,
    pub kind: DifferenceKind,
    /// `Debug` rendering of the actual value; `None` when it is missing.
    pub actual: Option<String>,
    /// `Debug` rendering of the expected value; `None` when it is
    /// unexpected.
    pub expected: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceKind {
    /// Leaf values differ.
    Value,
    /// Enum values hold different variants.
    Variant,
    /// Present in the expected value only.
    Missing,
    /// Present in the actual value only.
    Unexpected,
    /// A custom equality rule rejected the pair.
    Custom,
}

impl fmt::Display for DifferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifferenceKind::Value => write!(f, "value mismatch"),
            DifferenceKind::Variant => write!(f, "enum variant mismatch"),
            DifferenceKind::Missing => write!(f, "missing value"),
            DifferenceKind::Unexpected => write!(f, "unexpected value"),
            DifferenceKind::Custom => write!(f, "custom comparison mismatch"),
        }
    }
}

impl Report {
    pub(crate) fn push(&mut self, difference: Difference) {
        self.differences.push(difference);
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn len(&self) -> usize {
        self.differences.len()
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.differences.as_slice() {
            [] => write!(f, "no differences"),
            [single] => write!(f, "{single}"),
            all => {
                write!(f, "{} mismatches\n\n", all.len())?;
                for (i, difference) in all.iter().enumerate() {
                    if i > 0 {
                        write!(f, "\n\n")?;
                    }
                    write!(f, "{difference}")?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:\n  --> `{}`",
            self.kind,
            truncate_path(&self.path, 60)
        )?;
        if let Some(actual) = &self.actual {
            write!(f, "\n  actual: {actual}")?;
        }
        if let Some(expected) = &self.expected {
            write!(f, "\n  expected: {expected}")?;
        }
        Ok(())
    }
}

/// Shortens long paths at field boundaries, keeping the root and as many
/// trailing fields as fit.
fn truncate_path(path: &str, max_len: usize) -> String {
    if path.len() <= max_len {
        return path.to_string();
    }

    let ellipsis = "...";
    let parts: Vec<&str> = path.split('.').collect();
    if parts.len() <= 2 {
        let available = max_len.saturating_sub(ellipsis.len());
        let mut start = path.len().saturating_sub(available);
        while !path.is_char_boundary(start) {
            start += 1;
        }
        return format!("{}{}", ellipsis, &path[start..]);
    }

    let first = parts[0];
    let mut kept = Vec::new();
    let mut length = first.len();

    for part in parts[1..].iter().rev() {
        let part_len = part.len() + 1;
        if length + ellipsis.len() + part_len <= max_len {
            length += part_len;
            kept.insert(0, *part);
        } else {
            break;
        }
    }

    match kept.as_slice() {
        [] => format!("{}{}{}", first, ellipsis, parts[parts.len() - 1]),
        rest => format!("{}{}{}", first, ellipsis, rest.join(".")),
    }
}
