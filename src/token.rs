use std::fmt;

use crate::ast::{BinOp, UnOp};
use crate::diag::Loc;
use crate::interner::Symbol;

/// "Words" produced by `Lexer`.
///
/// Only literals and identifiers carry a payload; a keyword is identified by its kind alone.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenKind {
    Eof,

    // Delimiters
    LeftParen,
    RightParen,
    Equal,
    Semicolon,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,

    // Keywords
    Let,
    Print,

    Int(u64),
    Identifier(Symbol),
}

impl TokenKind {
    /// Operator when this token can appear between two operands.
    pub fn bin_op(&self) -> Option<BinOp> {
        match self {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        }
    }

    /// Operator when this token can prefix an operand.
    pub fn un_op(&self) -> Option<UnOp> {
        match self {
            TokenKind::Plus => Some(UnOp::Plus),
            TokenKind::Minus => Some(UnOp::Minus),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "<end of file>"),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Equal => write!(f, "="),
            TokenKind::Semicolon => write!(f, ";"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Let => write!(f, "let"),
            TokenKind::Print => write!(f, "print"),
            TokenKind::Int(n) => write!(f, "{}", n),
            TokenKind::Identifier(sym) => write!(f, "{}", sym),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub loc: Loc,
}

impl Token {
    pub fn new(kind: TokenKind, loc: Loc) -> Token {
        Token { kind, loc }
    }

    pub fn is(&self, kind: &TokenKind) -> bool {
        self.kind == *kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
