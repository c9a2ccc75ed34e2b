use std::cell::RefCell;
use std::rc::Rc;

use crate::diag::{Diagnostic, Diagnostics, Loc};
use crate::interner::{Interner, Symbol};

/// State shared by the lexer, the parser and their caller for one run.
///
/// Anchors the string interner and the diagnostics sink.  Handed around explicitly as an `Rc`
/// rather than kept in global data, so several independent contexts can coexist.
#[derive(Debug, Default)]
pub struct Context {
    interner: RefCell<Interner>,
    diag: RefCell<Diagnostics>,
}

impl Context {
    /// Creates a new context.
    ///
    /// Returns a Rc because the context is shared between various data structures.
    pub fn new() -> Rc<Self> {
        Rc::new(Context::default())
    }

    /// Intern the given string if needed and return its associated symbol.
    pub fn symbol(&self, name: &str) -> Symbol {
        self.interner.borrow_mut().symbol(name)
    }

    /// Record an error.  Never aborts the caller.
    pub fn report(&self, loc: Loc, message: impl Into<String>) {
        self.diag.borrow_mut().report(loc, message.into());
    }

    pub fn error_count(&self) -> usize {
        self.diag.borrow().error_count()
    }

    /// Snapshot of the diagnostics recorded so far, in reporting order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diag.borrow().iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diag::Pos;

    #[test]
    fn symbols_are_shared_through_context() {
        let ctx = Context::new();
        let other = ctx.clone();
        assert_eq!(ctx.symbol("x"), other.symbol("x"));
    }

    #[test]
    fn reports_are_counted() {
        let ctx = Context::new();
        ctx.report(Loc::at(None, Pos::new(1, 4)), "oops");
        assert_eq!(ctx.error_count(), 1);
        assert_eq!(ctx.diagnostics()[0].message, "oops");
    }
}
