//! Recursive-descent parser for statements with precedence climbing for expressions.
//!
//! Parsing never fails: malformed input is reported to the context, an `ExprKind::Error`
//! placeholder or the `<error>` symbol stands in for what is missing, and parsing goes on so a
//! single pass finds as many errors as possible.

use std::io::prelude::*;
use std::mem;
use std::path::Path;
use std::rc::Rc;

use crate::ast::{Expr, ExprKind, Prec, Program, Stmt, StmtKind};
use crate::ctx::Context;
use crate::interner::Symbol;
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Deepest expression the parser builds.  Rendering, evaluating and dropping a tree recurse
/// once per level, so the limit keeps all of them within a thread's stack.
pub const MAX_DEPTH: usize = 512;

#[derive(Debug)]
pub struct Parser<R: BufRead> {
    lexer: Lexer<R>,
    ctx: Rc<Context>,
    ahead: Token,
    error: Symbol,
    /// Nesting of the expression being parsed: open groups, unary operators and folded binary
    /// operators.
    depth: usize,
}

impl<R: BufRead> Parser<R> {
    pub fn new(input: R, path: Option<&Path>, ctx: Rc<Context>) -> Parser<R> {
        let mut lexer = Lexer::new(input, path, ctx.clone());
        let ahead = lexer.lex();
        Parser {
            lexer,
            error: ctx.symbol("<error>"),
            ctx,
            ahead,
            depth: 0,
        }
    }

    /// Parse statements until end of file.
    pub fn parse_program(&mut self) -> Program {
        let loc = self.ahead.loc.clone();
        let mut stmts = vec![];
        loop {
            match self.ahead.kind {
                TokenKind::Eof => break,
                TokenKind::Let => stmts.push(self.parse_let_stmt()),
                TokenKind::Print => stmts.push(self.parse_print_stmt()),
                _ => {
                    self.err("statement", "program");
                    // consume one token to prevent endless loop
                    self.lex();
                }
            }
        }
        log::debug!(
            "parsed {} statement(s), {} error(s) so far",
            stmts.len(),
            self.ctx.error_count()
        );
        Program { loc, stmts }
    }

    /// Parse a single expression, leaving whatever follows it unconsumed.
    pub fn parse_expression(&mut self) -> Expr {
        self.parse_expr("expression", Prec::Bottom)
    }

    /// Parse `let <ident> = <expr>;`.
    /// Current token is TokenKind::Let.
    fn parse_let_stmt(&mut self) -> Stmt {
        let loc = self.lex().loc;
        let sym = self.parse_sym("let statement");
        self.expect(TokenKind::Equal, "let statement");
        let init = self.parse_expr("initialization expression of let statement", Prec::Bottom);
        self.expect(TokenKind::Semicolon, "let statement");
        Stmt::new(loc, StmtKind::Let(sym, init))
    }

    /// Parse `print <expr>;`.
    /// Current token is TokenKind::Print.
    fn parse_print_stmt(&mut self) -> Stmt {
        let loc = self.lex().loc;
        let expr = self.parse_expr("print statement", Prec::Bottom);
        self.expect(TokenKind::Semicolon, "print statement");
        Stmt::new(loc, StmtKind::Print(expr))
    }

    fn parse_sym(&mut self, ctxt: &str) -> Symbol {
        if let TokenKind::Identifier(sym) = &self.ahead.kind {
            let sym = sym.clone();
            self.lex();
            sym
        } else {
            self.err("identifier", ctxt);
            self.error.clone()
        }
    }

    /// Fold binary operators binding tighter than `min` into a left-associative tree.
    fn parse_expr(&mut self, ctxt: &str, min: Prec) -> Expr {
        let depth = self.depth;
        let mut lhs = self.parse_primary_or_unary(ctxt);

        while let Some(op) = self.ahead.kind.bin_op() {
            let prec = op.prec();
            if prec <= min {
                break;
            }
            // every fold makes the left operand one level deeper
            if !self.descend() {
                lhs = self.skip_too_deep();
                break;
            }
            self.lex();
            let rhs = self.parse_expr("right-hand side of binary expression", prec);
            lhs = Expr::new(
                lhs.loc.clone(),
                ExprKind::Binary(op, Box::new(lhs), Box::new(rhs)),
            );
        }

        self.depth = depth;
        lhs
    }

    fn parse_primary_or_unary(&mut self, ctxt: &str) -> Expr {
        match &self.ahead.kind {
            TokenKind::Identifier(sym) => {
                let kind = ExprKind::Var(sym.clone());
                return Expr::new(self.lex().loc, kind);
            }
            TokenKind::Int(v) => {
                let kind = ExprKind::Lit(*v);
                return Expr::new(self.lex().loc, kind);
            }
            _ => (),
        }

        if let Some(op) = self.ahead.kind.un_op() {
            if !self.descend() {
                return self.skip_too_deep();
            }
            let loc = self.lex().loc;
            let rhs = self.parse_expr("operand of unary expression", Prec::Unary);
            self.depth -= 1;
            return Expr::new(loc, ExprKind::Unary(op, Box::new(rhs)));
        }

        if self.ahead.is(&TokenKind::LeftParen) {
            if !self.descend() {
                return self.skip_too_deep();
            }
            self.lex();
            let expr = self.parse_expr("parenthesized expression", Prec::Bottom);
            self.expect(TokenKind::RightParen, "parenthesized expression");
            self.depth -= 1;
            return expr;
        }

        self.err("primary or unary expression", ctxt);
        Expr::new(self.ahead.loc.clone(), ExprKind::Error)
    }

    /// Go one level deeper unless that would exceed MAX_DEPTH.
    fn descend(&mut self) -> bool {
        if self.depth < MAX_DEPTH {
            self.depth += 1;
            true
        } else {
            false
        }
    }

    /// Report an expression nested past MAX_DEPTH and skip the rest of it: everything up to
    /// `;`, end of file or a `)` closing a group opened before the lookahead.
    fn skip_too_deep(&mut self) -> Expr {
        let loc = self.ahead.loc.clone();
        self.ctx.report(loc.clone(), "expression nested too deeply");
        let mut open = 0usize;
        loop {
            match self.ahead.kind {
                TokenKind::Eof | TokenKind::Semicolon => break,
                TokenKind::RightParen if open == 0 => break,
                TokenKind::RightParen => open -= 1,
                TokenKind::LeftParen => open += 1,
                _ => (),
            }
            self.lex();
        }
        Expr::new(loc, ExprKind::Error)
    }

    /// Lookahead token.
    pub fn ahead(&self) -> &Token {
        &self.ahead
    }

    /// Consume the lookahead token and return it.
    fn lex(&mut self) -> Token {
        let next = self.lexer.lex();
        mem::replace(&mut self.ahead, next)
    }

    /// Consume the lookahead token if it is `kind`.
    fn accept(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.ahead.is(kind) {
            Some(self.lex())
        } else {
            None
        }
    }

    /// Consume the lookahead token if it is `kind`, otherwise report and consume nothing.
    fn expect(&mut self, kind: TokenKind, ctxt: &str) -> Option<Token> {
        let token = self.accept(&kind);
        if token.is_none() {
            self.err(&format!("'{}'", kind), ctxt);
        }
        token
    }

    /// Issue an error message of the form:
    /// `expected <what>, got '<tok>' while parsing <ctxt>`
    fn err(&self, what: &str, ctxt: &str) {
        self.ctx.report(
            self.ahead.loc.clone(),
            format!(
                "expected {}, got '{}' while parsing {}",
                what, self.ahead, ctxt
            ),
        );
    }
}
