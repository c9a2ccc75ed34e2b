//! Front end and tree-walk interpreter for `let`, a tiny language of unsigned integer
//! arithmetic, variable bindings and `print`.
//!
//! ```text
//! program  := (stmt)* EOF
//! stmt     := 'let' IDENT '=' expr ';' | 'print' expr ';'
//! expr     := unary (binop expr)*
//! unary    := ('+' | '-') expr | primary
//! primary  := INT | IDENT | '(' expr ')'
//! ```
//!
//! # Examples
//!
//! See [`crate::interpreter::Interpreter`].
//!
//! # Error handling
//!
//! The lexer and the parser never bail out.  Errors are reported to the
//! [`Context`](crate::ctx::Context), placeholders keep the tree complete, and the caller checks
//! the error count once parsing is done.  Evaluation cannot fail apart from writing output.

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]

pub mod ast;
pub mod ctx;
pub mod diag;
pub mod eval;
pub mod interner;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod token;

mod char_reader;
