//! A single GMT module invocation.

use std::fmt;

/// One `gmt <module> <args...>` call.
///
/// Arguments are passed to the process verbatim, so values containing
/// spaces (titles, labels) need no quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GmtCall {
    /// Module name, e.g. `grdimage`, or `inset` for `inset begin`.
    pub module: String,
    /// Arguments after the module name.
    pub args: Vec<String>,
}

impl GmtCall {
    /// Create a call with no arguments.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether this call opens a modern-mode session.
    pub fn is_begin(&self) -> bool {
        self.module == "begin"
    }

    /// Whether this call closes a modern-mode session.
    pub fn is_end(&self) -> bool {
        self.module == "end"
    }

    /// Check whether any argument equals `arg`.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Find the value of a `-X` style option, e.g. `option('R')`.
    pub fn option(&self, flag: char) -> Option<&str> {
        let prefix = format!("-{}", flag);
        self.args
            .iter()
            .find_map(|a| a.strip_prefix(prefix.as_str()))
    }
}

impl fmt::Display for GmtCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gmt {}", self.module)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}
