//! API to control the interpreter.

use std::io;
use std::io::prelude::*;
use std::path::Path;
use std::rc::Rc;

use crate::ast::Program;
use crate::ctx::Context;
use crate::diag::Diagnostic;
use crate::eval::Env;
use crate::parser::Parser;

/// Front end plus tree-walk evaluator.
///
/// Parsing always yields a program; problems found along the way are collected as diagnostics
/// and counted, and the caller decides what to do with them.
///
/// # Example
///
/// ```
/// use letlang::interpreter::Interpreter;
///
/// let interp = Interpreter::new();
/// let prg = interp.parse("let x = 1 + 2 * 3; print x - 1 - 1;".as_bytes(), None);
/// assert_eq!(interp.error_count(), 0);
/// assert_eq!(prg.render(), "let x = (1 + (2 * 3));\nprint ((x - 1) - 1);\n");
///
/// let mut output: Vec<u8> = Vec::new();
/// prg.evaluate(&mut output)?;
/// assert_eq!(output, b"5\n");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Interpreter {
    ctx: Rc<Context>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Interpreter::new()
    }
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter::with_context(Context::new())
    }

    pub fn with_context(ctx: Rc<Context>) -> Interpreter {
        Interpreter { ctx }
    }

    /// Parse a whole program from `input`.  `path` only labels diagnostics.
    pub fn parse<R: BufRead>(&self, input: R, path: Option<&Path>) -> Program {
        Parser::new(input, path, self.ctx.clone()).parse_program()
    }

    /// Parse and evaluate `input`, writing printed values to `output`.
    ///
    /// The program runs even if errors were reported while parsing it.
    pub fn eval<R: BufRead, W: Write>(&self, input: R, output: &mut W) -> io::Result<Env> {
        self.parse(input, None).evaluate(output)
    }

    /// Number of lexical and syntax errors found so far.
    pub fn error_count(&self) -> usize {
        self.ctx.error_count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.ctx.diagnostics()
    }
}
