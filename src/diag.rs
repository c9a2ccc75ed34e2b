//! Source locations and the diagnostics sink.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// Line and column, both starting at one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub fn new(line: u32, col: u32) -> Pos {
        Pos { line, col }
    }
}

impl Default for Pos {
    fn default() -> Pos {
        Pos::new(1, 1)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Source span: first and last character of a token or the start of a tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loc {
    pub path: Option<Rc<Path>>,
    pub begin: Pos,
    pub finis: Pos,
}

impl Loc {
    pub fn new(path: Option<Rc<Path>>, begin: Pos, finis: Pos) -> Loc {
        Loc { path, begin, finis }
    }

    /// Location covering a single position.
    pub fn at(path: Option<Rc<Path>>, pos: Pos) -> Loc {
        Loc::new(path, pos, pos)
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", path.display(), self.begin),
            None => write!(f, "<stdin>:{}", self.begin),
        }
    }
}

/// A lexical or syntax error attached to the location it was found at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{loc}: error: {message}")]
pub struct Diagnostic {
    pub loc: Loc,
    pub message: String,
}

/// Accumulates diagnostics.  Reporting never interrupts the caller.
#[derive(Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Diagnostics {
        Diagnostics(Vec::new())
    }

    pub fn report(&mut self, loc: Loc, message: String) {
        let diag = Diagnostic { loc, message };
        log::debug!("{}", diag);
        self.0.push(diag);
    }

    pub fn error_count(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}
