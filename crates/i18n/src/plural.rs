//! `Plural-Forms` expressions.
//!
//! Catalog headers carry a C expression over `n` selecting the plural form, e.g.
//! `plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);`.
//! [`PluralRule`] parses the supported subset (ternary, logical, comparison and arithmetic
//! operators, `!`, parentheses, `n`, integer literals) and evaluates it.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{I18nError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Expr {
    N,
    Const(u64),
    Not(Box<Expr>),
    Binary(Op, Box<Expr>, Box<Expr>),
    Cond(Box<Expr>, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self, n: u64) -> u64 {
        match self {
            Expr::N => n,
            Expr::Const(c) => *c,
            Expr::Not(e) => (e.eval(n) == 0) as u64,
            Expr::Cond(c, a, b) => {
                if c.eval(n) != 0 {
                    a.eval(n)
                } else {
                    b.eval(n)
                }
            }
            Expr::Binary(op, l, r) => {
                let l = l.eval(n);
                // Short-circuit like C.
                match op {
                    Op::Or if l != 0 => return 1,
                    Op::And if l == 0 => return 0,
                    _ => {}
                }
                let r = r.eval(n);
                match op {
                    Op::Or | Op::And => (r != 0) as u64,
                    Op::Eq => (l == r) as u64,
                    Op::Ne => (l != r) as u64,
                    Op::Lt => (l < r) as u64,
                    Op::Gt => (l > r) as u64,
                    Op::Le => (l <= r) as u64,
                    Op::Ge => (l >= r) as u64,
                    Op::Add => l.wrapping_add(r),
                    Op::Sub => l.wrapping_sub(r),
                    Op::Mul => l.wrapping_mul(r),
                    Op::Div => l.checked_div(r).unwrap_or(0),
                    Op::Rem => l.checked_rem(r).unwrap_or(0),
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    N,
    Num(u64),
    Op(Op),
    Not,
    Question,
    Colon,
    LParen,
    RParen,
}

fn tokenize(expr: &str) -> std::result::Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut chars: Peekable<Chars<'_>> = expr.chars().peekable();

    while let Some(c) = chars.next() {
        let token = match c {
            ' ' | '\t' | '\n' | '\r' => continue,
            'n' => Token::N,
            '0'..='9' => {
                let mut value = c.to_digit(10).unwrap_or_default() as u64;
                while let Some(d) = chars.peek().and_then(|d| d.to_digit(10)) {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(d as u64))
                        .ok_or_else(|| "number too large".to_string())?;
                    chars.next();
                }
                Token::Num(value)
            }
            '?' => Token::Question,
            ':' => Token::Colon,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '+' => Token::Op(Op::Add),
            '-' => Token::Op(Op::Sub),
            '*' => Token::Op(Op::Mul),
            '/' => Token::Op(Op::Div),
            '%' => Token::Op(Op::Rem),
            '|' | '&' | '=' => {
                if chars.next() != Some(c) {
                    return Err(format!("expected '{c}{c}'"));
                }
                Token::Op(match c {
                    '|' => Op::Or,
                    '&' => Op::And,
                    _ => Op::Eq,
                })
            }
            '!' | '<' | '>' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    Token::Op(match c {
                        '!' => Op::Ne,
                        '<' => Op::Le,
                        _ => Op::Ge,
                    })
                } else {
                    match c {
                        '!' => Token::Not,
                        '<' => Token::Op(Op::Lt),
                        _ => Token::Op(Op::Gt),
                    }
                }
            }
            other => return Err(format!("unexpected character {other:?}")),
        };
        tokens.push(token);
    }
    Ok(tokens)
}

/// Binding power of binary operators, lowest first.
fn precedence(op: Op) -> u8 {
    match op {
        Op::Or => 1,
        Op::And => 2,
        Op::Eq | Op::Ne => 3,
        Op::Lt | Op::Gt | Op::Le | Op::Ge => 4,
        Op::Add | Op::Sub => 5,
        Op::Mul | Op::Div | Op::Rem => 6,
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> std::result::Result<(), String> {
        match self.next() {
            Some(t) if t == expected => Ok(()),
            Some(t) => Err(format!("expected {expected:?}, found {t:?}")),
            None => Err(format!("expected {expected:?}, found end of expression")),
        }
    }

    fn ternary(&mut self) -> std::result::Result<Expr, String> {
        let cond = self.binary(1)?;
        if self.peek() != Some(&Token::Question) {
            return Ok(cond);
        }
        self.next();
        let then = self.ternary()?;
        self.expect(Token::Colon)?;
        let otherwise = self.ternary()?;
        Ok(Expr::Cond(Box::new(cond), Box::new(then), Box::new(otherwise)))
    }

    /// Precedence climbing over left-associative binary operators.
    fn binary(&mut self, min_prec: u8) -> std::result::Result<Expr, String> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(op)) = self.peek().cloned() {
            let prec = precedence(op);
            if prec < min_prec {
                break;
            }
            self.next();
            let rhs = self.binary(prec + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> std::result::Result<Expr, String> {
        match self.next() {
            Some(Token::Not) => Ok(Expr::Not(Box::new(self.unary()?))),
            Some(Token::N) => Ok(Expr::N),
            Some(Token::Num(v)) => Ok(Expr::Const(v)),
            Some(Token::LParen) => {
                let inner = self.ternary()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Some(t) => Err(format!("unexpected token {t:?}")),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

/// Parsed plural selection rule with its number of forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralRule {
    nplurals: usize,
    expr: Expr,
}

impl Default for PluralRule {
    /// Germanic rule: `nplurals=2; plural=(n != 1);`
    fn default() -> Self {
        Self {
            nplurals: 2,
            expr: Expr::Binary(Op::Ne, Box::new(Expr::N), Box::new(Expr::Const(1))),
        }
    }
}

impl PluralRule {
    /// Parses a bare expression such as `n != 1`.
    pub fn parse(expr: &str, nplurals: usize) -> Result<Self> {
        let invalid = |message: String| I18nError::InvalidPluralForms {
            expr: expr.to_string(),
            message,
        };
        let tokens = tokenize(expr).map_err(invalid)?;
        let mut parser = Parser { tokens, pos: 0 };
        let parsed = parser.ternary().map_err(invalid)?;
        if let Some(extra) = parser.peek() {
            return Err(invalid(format!("unexpected trailing token {extra:?}")));
        }
        Ok(Self {
            nplurals,
            expr: parsed,
        })
    }

    /// Parses a `Plural-Forms` header value: `nplurals=3; plural=(...);`
    pub fn from_header(header: &str) -> Result<Self> {
        let mut nplurals = None;
        let mut plural = None;
        for part in header.split(';') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "nplurals" => nplurals = value.trim().parse::<usize>().ok(),
                "plural" => plural = Some(value.trim()),
                _ => {}
            }
        }
        match (nplurals, plural) {
            (Some(nplurals), Some(plural)) if nplurals > 0 => Self::parse(plural, nplurals),
            _ => Err(I18nError::InvalidPluralForms {
                expr: header.to_string(),
                message: "missing nplurals or plural".to_string(),
            }),
        }
    }

    pub fn nplurals(&self) -> usize {
        self.nplurals
    }

    /// Index of the plural form to use for `n`.
    pub fn select(&self, n: u64) -> usize {
        usize::try_from(self.expr.eval(n)).unwrap_or(usize::MAX)
    }
}
