//! External command description.
//!
//! A [`CommandSpec`] is an executable path plus its arguments, usually
//! parsed from a whitespace-separated command line in the configuration.

use std::fmt;

use serde::Serialize;

/// An external executable together with the arguments it is invoked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command from an explicit program and argument list.
    #[must_use]
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits a command line on whitespace: the first token is the program,
    /// the rest are arguments. No quoting is recognised.
    ///
    /// Returns `None` when the line contains no tokens.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let program = tokens.next()?;
        Some(Self::new(program, tokens))
    }

    /// Returns the executable path.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the arguments passed to the executable.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_program_only() {
        let Some(cmd) = CommandSpec::parse("./randomization/randomize") else {
            panic!("expected a command");
        };
        assert_eq!(cmd.program(), "./randomization/randomize");
        assert!(cmd.args().is_empty());
    }

    #[test]
    fn parse_splits_on_any_whitespace() {
        let Some(cmd) = CommandSpec::parse("  python3\t sim.py   --fast ") else {
            panic!("expected a command");
        };
        assert_eq!(cmd.program(), "python3");
        assert_eq!(cmd.args(), ["sim.py", "--fast"]);
    }

    #[test]
    fn parse_blank_line_is_none() {
        assert!(CommandSpec::parse("").is_none());
        assert!(CommandSpec::parse("   \t").is_none());
    }

    #[test]
    fn display_joins_with_spaces() {
        let cmd = CommandSpec::new("sh", ["-c", "true"]);
        assert_eq!(cmd.to_string(), "sh -c true");
    }
}
