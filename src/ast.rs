//! Syntax tree produced by the parser.
//!
//! Nodes exclusively own their children and are never mutated once built.  `Display` renders
//! the canonical, fully parenthesized form of a node.

use std::fmt;

use crate::diag::Loc;
use crate::interner::Symbol;

/// Binding strength of operators, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    Bottom,
    Add,
    Mul,
    Unary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn prec(self) -> Prec {
        match self {
            BinOp::Add | BinOp::Sub => Prec::Add,
            BinOp::Mul | BinOp::Div => Prec::Mul,
        }
    }
}

impl fmt::Display for UnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnOp::Plus => write!(f, "+"),
            UnOp::Minus => write!(f, "-"),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinOp::Add => write!(f, "+"),
            BinOp::Sub => write!(f, "-"),
            BinOp::Mul => write!(f, "*"),
            BinOp::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub loc: Loc,
    pub kind: ExprKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Lit(u64),
    Var(Symbol),
    Unary(UnOp, Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Stands in for an expression that failed to parse.
    Error,
}

impl Expr {
    pub fn new(loc: Loc, kind: ExprKind) -> Expr {
        Expr { loc, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub loc: Loc,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Let(Symbol, Expr),
    Print(Expr),
}

impl Stmt {
    pub fn new(loc: Loc, kind: StmtKind) -> Stmt {
        Stmt { loc, kind }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub loc: Loc,
    pub stmts: Vec<Stmt>,
}

impl Program {
    /// Canonical re-serialization, one statement per line.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Lit(v) => write!(f, "{}", v),
            ExprKind::Var(sym) => write!(f, "{}", sym),
            ExprKind::Unary(op, rhs) => write!(f, "({}{})", op, rhs),
            ExprKind::Binary(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op, rhs),
            ExprKind::Error => write!(f, "<error expression>"),
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let(sym, init) => write!(f, "let {} = {};", sym, init),
            StmtKind::Print(expr) => write!(f, "print {};", expr),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.stmts {
            writeln!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ctx::Context;
    use crate::diag::Pos;

    fn expr(kind: ExprKind) -> Expr {
        Expr::new(Loc::at(None, Pos::default()), kind)
    }

    fn lit(v: u64) -> Box<Expr> {
        Box::new(expr(ExprKind::Lit(v)))
    }

    #[test]
    fn binary_and_unary_are_parenthesized() {
        let e = expr(ExprKind::Binary(
            BinOp::Add,
            lit(1),
            Box::new(expr(ExprKind::Unary(UnOp::Minus, lit(2)))),
        ));
        assert_eq!(e.to_string(), "(1 + (-2))");
    }

    #[test]
    fn error_placeholder() {
        let e = expr(ExprKind::Error);
        assert_eq!(e.kind, ExprKind::Error);
        assert_eq!(e.to_string(), "<error expression>");
    }

    #[test]
    fn program_renders_one_statement_per_line() {
        let ctx = Context::new();
        let x = ctx.symbol("x");
        let loc = Loc::at(None, Pos::default());
        let prg = Program {
            loc: loc.clone(),
            stmts: vec![
                Stmt::new(
                    loc.clone(),
                    StmtKind::Let(x.clone(), expr(ExprKind::Binary(BinOp::Div, lit(6), lit(3)))),
                ),
                Stmt::new(loc, StmtKind::Print(expr(ExprKind::Var(x)))),
            ],
        };
        assert_eq!(prg.render(), "let x = (6 / 3);\nprint x;\n");
    }

    #[test]
    fn precedence_order() {
        assert!(Prec::Bottom < Prec::Add);
        assert!(Prec::Add < Prec::Mul);
        assert!(Prec::Mul < Prec::Unary);
        assert_eq!(BinOp::Sub.prec(), Prec::Add);
        assert_eq!(BinOp::Div.prec(), Prec::Mul);
    }
}
