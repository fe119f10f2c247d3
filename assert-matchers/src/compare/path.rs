use std::fmt;

/// One step from a value into one of its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A named or positional field: `.name`, `.0`.
    Field(&'static str),
    /// A sequence element: `[3]`.
    Index(usize),
    /// A map entry or set member, keyed by the key's `Debug` rendering:
    /// `["bob"]`.
    Key(String),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => write!(f, ".{name}"),
            Step::Index(index) => write!(f, "[{index}]"),
            Step::Key(key) => write!(f, "[{key}]"),
        }
    }
}

/// Location of the value currently being compared, starting at the root.
///
/// Displays as `User.address.city` or `Order.lines[2].sku`. Rules that
/// select by path match against [`Path::relative`], which omits the root
/// type name.
#[derive(Debug, Clone)]
pub struct Path {
    root: String,
    steps: Vec<Step>,
}

impl Path {
    pub(crate) fn new(root: impl Into<String>) -> Self {
        Path {
            root: root.into(),
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub(crate) fn pop(&mut self) {
        self.steps.pop();
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The innermost field name, if the last step is a field.
    pub fn last_field(&self) -> Option<&'static str> {
        match self.steps.last() {
            Some(Step::Field(name)) => Some(name),
            _ => None,
        }
    }

    /// The path without its root: `address.city`, `lines[2].sku`.
    pub fn relative(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            match step {
                Step::Field(name) if out.is_empty() => out.push_str(name),
                step => out.push_str(&step.to_string()),
            }
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for step in &self.steps {
            write!(f, "{step}")?;
        }
        Ok(())
    }
}
