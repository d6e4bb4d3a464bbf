//! Pretty-printing facility for error messages
//!
//! # Example
//!
//! ```rust
//! reports.make("Unknown category")
//!     .text(format!("'{}' is not registered", name))
//!     .hint("register it with `kaimono category add`");
//! ```
//!
//! ```txt
//! --> Error: Unknown category
//!  |  'Toys' is not registered
//!  |      ? hint: register it with `kaimono category add`
//! ```

use std::fmt;

use crate::lib::{date::DateError, error::Error};

/// Report for a single error
///
/// All messages (`label` passed with `new`, arguments of `hint`
/// and `text`) should fit in a single line.
#[must_use]
#[derive(Debug)]
pub struct Report {
    /// determines the error label (warning/error) and the color (yellow/red)
    fatal: bool,
    /// name of the error
    label: String,
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// important message
    Text(String),
    /// recommendations for fixes
    Hint(String),
}

/// A collection of reports emitted during one command
#[must_use]
#[derive(Debug, Default)]
pub struct Reports {
    contents: Vec<Report>,
}

impl Report {
    /// Create a new error
    pub fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Mark as a warning rather that a fatal error
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal
    }
}

impl Reports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if any of the recorded reports are fatal
    pub fn is_fatal(&self) -> bool {
        self.contents.iter().any(Report::is_fatal)
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Number of fatal errors
    pub fn count_errors(&self) -> usize {
        self.contents.iter().filter(|r| r.fatal).count()
    }

    /// Number of nonfatal errors
    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    /// Add a new report to the pool
    pub fn make<S>(&mut self, msg: S) -> &mut Report
    where
        S: ToString,
    {
        self.contents.push(Report::new(msg));
        let last = self.contents.len() - 1;
        &mut self.contents[last]
    }

    /// Describe a store failure
    pub fn error(&mut self, err: &Error) -> &mut Report {
        match err {
            Error::DuplicateCategory(name) => self
                .make("Duplicate category")
                .nonfatal()
                .text(format!("'{}' already exists", name))
                .hint("pick another name, or remove the existing category first"),
            Error::Io { path, source } => self
                .make("Cannot access data file")
                .text(format!("{}: {}", path.display(), source))
                .hint("check that the directory exists and is writable"),
            Error::Csv { path, source } => self
                .make("Invalid CSV")
                .text(format!("{}: {}", path.display(), source))
                .hint("every row must have as many fields as the header"),
            Error::Header { path, expected, found } => self
                .make("Unexpected header")
                .text(format!("in {}", path.display()))
                .text(format!("found    '{}'", found))
                .text(format!("expected '{}'", expected))
                .hint("is this the right file ? see --file"),
            Error::Malformed { path, line, field, value, reason } => self
                .make("Malformed row")
                .text(format!("{}:{}: {} '{}'", path.display(), line, field, value))
                .text(reason)
                .hint(format!("fix or remove line {}", line)),
        }
    }

    /// Describe a date that could not be read
    pub fn date(&mut self, arg: &str, value: &str, err: &DateError) -> &mut Report {
        self.make("Invalid date")
            .text(format!("{} '{}'", arg, value))
            .text(err)
            .hint(err.fix_hint())
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, header) = if self.fatal {
            (RED, "--> Error")
        } else {
            (YELLOW, "--> Warning")
        };
        writeln!(f, "{}{}:{} {}{}", color, header, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Text(txt) => {
                    writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?;
                }
                Item::Hint(txt) => {
                    writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Reports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.contents.is_empty() {
            return Ok(());
        }
        let fatal = self.is_fatal();
        let count = if fatal {
            self.count_errors()
        } else {
            self.count_warnings()
        };
        let color = if fatal { RED } else { YELLOW };
        let trunc = 10;
        for err in self
            .contents
            .iter()
            .filter(|err| err.fatal == fatal)
            .take(trunc)
        {
            // only print errors with the maximum fatality
            writeln!(f, "{}", err)?;
        }
        if count > trunc {
            writeln!(f, "{} And {} more.", color, count - trunc)?;
        }
        let plural = if count > 1 { "s" } else { "" };
        if fatal {
            writeln!(
                f,
                "{}Fatal: {}{} error{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        } else {
            writeln!(
                f,
                "{}Nonfatal: {}{} warning{} emitted{}",
                color, WHITE, count, plural, NONE
            )?;
        }
        Ok(())
    }
}
