//! Tree-walk evaluation.
//!
//! Every operation is total: arithmetic wraps, division by zero yields zero and reading an
//! unbound variable binds it to zero.  The only failure is writing `print` output.

use std::collections::hash_map;
use std::collections::HashMap;
use std::io;
use std::io::prelude::*;

use crate::ast::{BinOp, Expr, ExprKind, Program, Stmt, StmtKind, UnOp};
use crate::interner::Symbol;

/// Variable bindings of one program run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Env(HashMap<Symbol, u64>);

impl Env {
    pub fn new() -> Env {
        Env(HashMap::new())
    }

    pub fn get(&self, sym: &Symbol) -> Option<u64> {
        self.0.get(sym).copied()
    }

    /// Value bound to `sym`, binding it to zero first if needed.
    pub fn get_or_bind(&mut self, sym: &Symbol) -> u64 {
        match self.0.entry(sym.clone()) {
            hash_map::Entry::Occupied(e) => *e.get(),
            hash_map::Entry::Vacant(e) => {
                log::debug!("reading unbound variable '{}', binding it to 0", sym);
                *e.insert(0)
            }
        }
    }

    pub fn set(&mut self, sym: &Symbol, value: u64) {
        self.0.insert(sym.clone(), value);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings sorted by name.
    pub fn bindings(&self) -> Vec<(&str, u64)> {
        let mut bindings = self
            .0
            .iter()
            .map(|(sym, value)| (sym.name(), *value))
            .collect::<Vec<_>>();
        bindings.sort_unstable();
        bindings
    }
}

#[derive(Debug)]
pub struct Evaluator<'t, W: Write> {
    output: &'t mut W,
    env: Env,
}

impl<'a, W: Write> Evaluator<'a, W> {
    pub fn new(output: &'a mut W) -> Evaluator<'a, W> {
        Evaluator {
            output,
            env: Env::new(),
        }
    }

    pub fn into_env(self) -> Env {
        self.env
    }

    pub fn eval_program(&mut self, prg: &Program) -> io::Result<()> {
        for stmt in &prg.stmts {
            self.eval_stmt(stmt)?;
        }
        Ok(())
    }

    pub fn eval_stmt(&mut self, stmt: &Stmt) -> io::Result<()> {
        match &stmt.kind {
            StmtKind::Let(sym, init) => {
                let value = self.eval_expr(init);
                log::trace!("let {} = {}", sym, value);
                self.env.set(sym, value);
            }
            StmtKind::Print(expr) => {
                let value = self.eval_expr(expr);
                writeln!(self.output, "{}", value)?;
            }
        }
        Ok(())
    }

    pub fn eval_expr(&mut self, expr: &Expr) -> u64 {
        match &expr.kind {
            ExprKind::Lit(v) => *v,
            ExprKind::Var(sym) => self.env.get_or_bind(sym),
            ExprKind::Unary(op, rhs) => {
                let r = self.eval_expr(rhs);
                match op {
                    UnOp::Plus => r,
                    UnOp::Minus => r.wrapping_neg(),
                }
            }
            ExprKind::Binary(op, lhs, rhs) => {
                let l = self.eval_expr(lhs);
                let r = self.eval_expr(rhs);
                match op {
                    BinOp::Add => l.wrapping_add(r),
                    BinOp::Sub => l.wrapping_sub(r),
                    BinOp::Mul => l.wrapping_mul(r),
                    BinOp::Div => l.checked_div(r).unwrap_or(0),
                }
            }
            ExprKind::Error => 0,
        }
    }
}

impl Program {
    /// Run the program in a fresh environment, printing to `output`, and return the final
    /// bindings.
    pub fn evaluate<W: Write>(&self, output: &mut W) -> io::Result<Env> {
        let mut evaluator = Evaluator::new(output);
        evaluator.eval_program(self)?;
        Ok(evaluator.into_env())
    }
}
