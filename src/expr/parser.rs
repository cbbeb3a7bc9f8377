//! Pratt parser for expressions.
//!
//! Precedence, loosest to tightest: `+ -`, then `* / %`, then unary `+ -`,
//! then `^`/`**` (right-associative, binding tighter than unary minus so
//! `-x^2` is `-(x^2)` and `2^-3` parses).

use super::ast::{BinaryOp, Constant, Expr, Func, UnaryOp};
use super::token::Token;
use crate::error::{Error, Result};

/// Binding power of the prefix `+`/`-` operators.
const UNARY_BP: u8 = 5;

/// Left/right binding powers for an infix operator. Right-associativity
/// falls out of `rbp < lbp` for the power operator.
fn infix_binding_power(token: &Token) -> Option<(u8, u8, BinaryOp)> {
    match token {
        Token::Plus => Some((1, 2, BinaryOp::Add)),
        Token::Minus => Some((1, 2, BinaryOp::Sub)),
        Token::Star => Some((3, 4, BinaryOp::Mul)),
        Token::Slash => Some((3, 4, BinaryOp::Div)),
        Token::Percent => Some((3, 4, BinaryOp::Rem)),
        Token::Power => Some((8, 7, BinaryOp::Pow)),
        _ => None,
    }
}

/// Parse a token stream into an expression AST.
pub(crate) fn parse(tokens: &[Token]) -> Result<Expr> {
    let mut parser = Parser { tokens, pos: 0 };
    let expr = parser.parse_expr(0)?;

    if let Some(token) = parser.peek() {
        return Err(Error::Evaluation(format!(
            "unexpected trailing input near {}",
            describe(token)
        )));
    }

    Ok(expr)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: &Token, context: &str) -> Result<()> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(Error::Evaluation(format!(
                "expected {} {context}, found {}",
                describe(expected),
                describe(token)
            ))),
            None => Err(Error::Evaluation(format!(
                "expected {} {context}, found end of expression",
                describe(expected)
            ))),
        }
    }

    fn parse_expr(&mut self, min_bp: u8) -> Result<Expr> {
        let mut lhs = self.parse_prefix()?;

        while let Some(token) = self.peek() {
            let Some((lbp, rbp, op)) = infix_binding_power(token) else {
                break;
            };
            if lbp < min_bp {
                break;
            }
            self.advance();

            let rhs = self.parse_expr(rbp)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(Token::Minus) => {
                self.advance();
                let operand = self.parse_expr(UNARY_BP)?;
                Ok(Expr::Unary {
                    op: UnaryOp::Neg,
                    operand: Box::new(operand),
                })
            }
            Some(Token::Plus) => {
                // Unary plus is the identity; no AST node.
                self.advance();
                self.parse_expr(UNARY_BP)
            }
            _ => self.parse_atom(),
        }
    }

    fn parse_atom(&mut self) -> Result<Expr> {
        let Some(token) = self.advance() else {
            return Err(Error::Evaluation(
                "unexpected end of expression".to_string(),
            ));
        };

        match token {
            Token::Number(value) => Ok(Expr::Number(*value)),
            Token::Ident(name) => self.parse_ident(name),
            Token::LParen => {
                let inner = self.parse_expr(0)?;
                self.expect(&Token::RParen, "to close group")?;
                Ok(inner)
            }
            other => Err(Error::Evaluation(format!(
                "unexpected {}",
                describe(other)
            ))),
        }
    }

    fn parse_ident(&mut self, name: &str) -> Result<Expr> {
        if name == "x" {
            return Ok(Expr::Var);
        }
        if let Some(constant) = Constant::from_name(name) {
            return Ok(Expr::Const(constant.value()));
        }
        if let Some(func) = Func::from_name(name) {
            self.expect(&Token::LParen, &format!("after function `{name}`"))?;
            return self.parse_call(func);
        }

        Err(Error::Evaluation(format!("unknown identifier `{name}`")))
    }

    fn parse_call(&mut self, func: Func) -> Result<Expr> {
        let mut args = Vec::with_capacity(func.arity());

        if self.peek() == Some(&Token::RParen) {
            self.advance();
        } else {
            loop {
                args.push(self.parse_expr(0)?);
                match self.advance() {
                    Some(Token::Comma) => {}
                    Some(Token::RParen) => break,
                    Some(token) => {
                        return Err(Error::Evaluation(format!(
                            "expected `,` or `)` in arguments of `{}`, found {}",
                            func.name(),
                            describe(token)
                        )));
                    }
                    None => {
                        return Err(Error::Evaluation(format!(
                            "unterminated argument list for `{}`",
                            func.name()
                        )));
                    }
                }
            }
        }

        if args.len() != func.arity() {
            return Err(Error::Evaluation(format!(
                "`{}` takes {} argument{}, got {}",
                func.name(),
                func.arity(),
                if func.arity() == 1 { "" } else { "s" },
                args.len()
            )));
        }

        Ok(Expr::Call { func, args })
    }
}

/// Human-readable token name for error messages.
fn describe(token: &Token) -> String {
    match token {
        Token::Number(value) => format!("number `{value}`"),
        Token::Ident(name) => format!("identifier `{name}`"),
        Token::Plus => "`+`".to_string(),
        Token::Minus => "`-`".to_string(),
        Token::Star => "`*`".to_string(),
        Token::Slash => "`/`".to_string(),
        Token::Percent => "`%`".to_string(),
        Token::Power => "`^`".to_string(),
        Token::LParen => "`(`".to_string(),
        Token::RParen => "`)`".to_string(),
        Token::Comma => "`,`".to_string(),
    }
}
