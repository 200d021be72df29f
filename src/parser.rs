use std::mem;
use std::rc::Rc;

use crate::ast::{Expr, FunctionDecl, Ident, Stmt};
use crate::diag::{FullParseError, ParseError};
use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};

#[derive(Debug)]
pub struct Parser<'s> {
    scanner: Scanner<'s>,
    current: Token,
}

impl<'s> Parser<'s> {
    pub fn new(source: &'s str) -> Parser<'s> {
        Parser {
            scanner: Scanner::new(source),
            // We haven't scanned anything yet.
            current: Token { kind: TokenKind::Eof, line: 1 },
        }
    }

    pub fn parse_program(&mut self) -> Result<Vec<Stmt>, FullParseError> {
        let mut prg = vec![];
        self.advance()?;
        while self.current.kind != TokenKind::Eof {
            prg.push(self.declaration()?);
        }
        Ok(prg)
    }

    #[allow(dead_code)]
    pub fn parse_expression(&mut self) -> Result<Expr, FullParseError> {
        self.advance()?;
        self.expression()
    }

    fn declaration(&mut self) -> Result<Stmt, FullParseError> {
        if self.advance_if(&TokenKind::Var)? {
            return self.var_decl();
        }
        if self.advance_if(&TokenKind::Fun)? {
            return self.fun_decl();
        }
        self.statement()
    }

    /// Parse a variable declaration.  The `var` keyword has already been consumed.
    fn var_decl(&mut self) -> Result<Stmt, FullParseError> {
        let name = self.identifier("Expected variable name.")?;
        let initializer = if self.advance_if(&TokenKind::Equal)? {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expected ';' after variable declaration.")?;
        Ok(Stmt::Var(name, initializer))
    }

    /// Parse a function declaration.  The `fun` keyword has already been consumed.
    fn fun_decl(&mut self) -> Result<Stmt, FullParseError> {
        let name = self.identifier("Expected function name.")?;
        self.consume(TokenKind::LeftParen, "Expected '(' after function name.")?;
        let mut params = vec![];
        if self.current.kind != TokenKind::RightParen {
            loop {
                params.push(self.identifier("Expected parameter name.")?);
                if !self.advance_if(&TokenKind::Comma)? {
                    break;
                }
            }
            if params.len() > 8 {
                return Err(self.error_at_current(ParseError::TooManyParameters));
            }
        }
        self.consume(TokenKind::RightParen, "Expected ')' after parameters.")?;
        self.consume(TokenKind::LeftCurly, "Expected '{' before function body.")?;
        let body = self.block_statements()?;
        Ok(Stmt::Function(Rc::new(FunctionDecl { name, params, body })))
    }

    fn identifier(&mut self, expected: &'static str) -> Result<Ident, FullParseError> {
        if let TokenKind::Identifier(name) = self.current.kind.clone() {
            let line = self.current.line;
            self.advance()?;
            Ok(Ident { name, line })
        } else {
            Err(self.error_at_current(ParseError::Expected(expected)))
        }
    }

    fn statement(&mut self) -> Result<Stmt, FullParseError> {
        if self.advance_if(&TokenKind::Print)? {
            let expr = Box::new(self.expression()?);
            self.consume(TokenKind::Semicolon, "Expected ';' after value.")?;
            return Ok(Stmt::Print(expr));
        }
        if self.advance_if(&TokenKind::LeftCurly)? {
            return Ok(Stmt::Block(self.block_statements()?));
        }
        if self.advance_if(&TokenKind::If)? {
            return self.if_statement();
        }
        if self.advance_if(&TokenKind::While)? {
            return self.while_statement();
        }
        if self.advance_if(&TokenKind::For)? {
            return self.for_statement();
        }
        if self.advance_if(&TokenKind::Return)? {
            return self.return_statement();
        }
        self.expression_statement()
    }

    fn expression_statement(&mut self) -> Result<Stmt, FullParseError> {
        let expr = Box::new(self.expression()?);
        self.consume(TokenKind::Semicolon, "Expected ';' after expression.")?;
        Ok(Stmt::Expr(expr))
    }

    /// Parse the statements of a block up to and including the closing brace.
    fn block_statements(&mut self) -> Result<Vec<Stmt>, FullParseError> {
        let mut stmts = vec![];
        while self.current.kind != TokenKind::RightCurly && self.current.kind != TokenKind::Eof {
            stmts.push(self.declaration()?);
        }
        self.consume(TokenKind::RightCurly, "Expected '}' after block.")?;
        Ok(stmts)
    }

    fn if_statement(&mut self) -> Result<Stmt, FullParseError> {
        self.consume(TokenKind::LeftParen, "Expected '(' after 'if'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after if condition.")?;
        let then_branch = Box::new(self.statement()?);
        let else_branch = if self.advance_if(&TokenKind::Else)? {
            Some(Box::new(self.statement()?))
        } else {
            None
        };
        Ok(Stmt::If(Box::new(condition), then_branch, else_branch))
    }

    fn while_statement(&mut self) -> Result<Stmt, FullParseError> {
        self.consume(TokenKind::LeftParen, "Expected '(' after 'while'.")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "Expected ')' after condition.")?;
        let body = Box::new(self.statement()?);
        Ok(Stmt::While(Box::new(condition), body))
    }

    /// `for` has no statement of its own; it desugars to initializer, `while`, and increment.
    fn for_statement(&mut self) -> Result<Stmt, FullParseError> {
        self.consume(TokenKind::LeftParen, "Expected '(' after 'for'.")?;

        let initializer = if self.advance_if(&TokenKind::Semicolon)? {
            None
        } else if self.advance_if(&TokenKind::Var)? {
            Some(self.var_decl()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition = if self.current.kind != TokenKind::Semicolon {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expected ';' after loop condition.")?;

        let increment = if self.current.kind != TokenKind::RightParen {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RightParen, "Expected ')' after for clauses.")?;

        let mut body = self.statement()?;
        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expr(Box::new(increment))]);
        }
        body = Stmt::While(Box::new(condition.unwrap_or(Expr::Bool(true))), Box::new(body));
        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }
        Ok(body)
    }

    fn return_statement(&mut self) -> Result<Stmt, FullParseError> {
        let value = if self.current.kind != TokenKind::Semicolon {
            Some(Box::new(self.expression()?))
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expected ';' after return value.")?;
        Ok(Stmt::Return(value))
    }

    fn expression(&mut self) -> Result<Expr, FullParseError> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, FullParseError> {
        let lhs = self.or()?;
        if self.current.kind == TokenKind::Equal {
            let equals = self.advance()?;
            let rhs = self.assignment()?;
            return match lhs {
                Expr::Var(name) => Ok(Expr::Assign(name, Box::new(rhs))),
                _ => Err(FullParseError {
                    line: equals.line,
                    lexeme: equals.lexeme(),
                    error: ParseError::InvalidAssignmentTarget,
                }),
            };
        }
        Ok(lhs)
    }

    fn or(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.and()?;
        while self.current.kind == TokenKind::Or {
            let op = self.advance()?;
            expr = Expr::Logical(op, Box::new(expr), Box::new(self.and()?));
        }
        Ok(expr)
    }

    fn and(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.equality()?;
        while self.current.kind == TokenKind::And {
            let op = self.advance()?;
            expr = Expr::Logical(op, Box::new(expr), Box::new(self.equality()?));
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.comparison()?;
        while matches!(self.current.kind, TokenKind::EqualEqual | TokenKind::BangEqual) {
            let op = self.advance()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(self.comparison()?));
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.addition()?;
        while matches!(
            self.current.kind,
            TokenKind::Greater | TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual
        ) {
            let op = self.advance()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(self.addition()?));
        }
        Ok(expr)
    }

    fn addition(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.multiplication()?;
        while matches!(self.current.kind, TokenKind::Plus | TokenKind::Minus) {
            let op = self.advance()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(self.multiplication()?));
        }
        Ok(expr)
    }

    fn multiplication(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.unary()?;
        while matches!(self.current.kind, TokenKind::Star | TokenKind::Slash) {
            let op = self.advance()?;
            expr = Expr::Binary(op, Box::new(expr), Box::new(self.unary()?));
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, FullParseError> {
        if matches!(self.current.kind, TokenKind::Bang | TokenKind::Minus) {
            let op = self.advance()?;
            return Ok(Expr::Unary(op, Box::new(self.unary()?)));
        }
        self.call()
    }

    fn call(&mut self) -> Result<Expr, FullParseError> {
        let mut expr = self.primary()?;
        while self.advance_if(&TokenKind::LeftParen)? {
            expr = self.finish_call(expr)?;
        }
        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr, FullParseError> {
        let mut arguments = vec![];
        if self.current.kind != TokenKind::RightParen {
            loop {
                arguments.push(self.expression()?);
                if !self.advance_if(&TokenKind::Comma)? {
                    break;
                }
            }
            if arguments.len() > 8 {
                return Err(self.error_at_current(ParseError::TooManyArguments));
            }
        }
        let closing_paren = self.consume(TokenKind::RightParen, "Expected ')' after arguments.")?;
        Ok(Expr::Call(Box::new(callee), closing_paren, arguments))
    }

    fn primary(&mut self) -> Result<Expr, FullParseError> {
        match self.current.kind.clone() {
            TokenKind::False => {
                self.advance()?;
                Ok(Expr::Bool(false))
            }
            TokenKind::True => {
                self.advance()?;
                Ok(Expr::Bool(true))
            }
            TokenKind::Nil => {
                self.advance()?;
                Ok(Expr::Nil)
            }
            TokenKind::Number(n) => {
                self.advance()?;
                Ok(Expr::Number(n))
            }
            TokenKind::Str(s) => {
                self.advance()?;
                Ok(Expr::Str(s))
            }
            TokenKind::Identifier(name) => {
                let line = self.current.line;
                self.advance()?;
                Ok(Expr::Var(Ident { name, line }))
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "Expected ')' after expression.")?;
                Ok(Expr::Group(Box::new(expr)))
            }
            _ => Err(self.error_at_current(ParseError::Expected("Expected expression."))),
        }
    }

    /// Fetch the next token and return the one it replaces.
    fn advance(&mut self) -> Result<Token, FullParseError> {
        let next = self.scanner.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    fn advance_if(&mut self, kind: &TokenKind) -> Result<bool, FullParseError> {
        if self.current.kind == *kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn consume(&mut self, expected: TokenKind, message: &'static str) -> Result<Token, FullParseError> {
        if self.current.kind == expected {
            self.advance()
        } else {
            Err(self.error_at_current(ParseError::Expected(message)))
        }
    }

    fn error_at_current(&self, error: ParseError) -> FullParseError {
        FullParseError {
            line: self.current.line,
            lexeme: self.current.lexeme(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_expr(input: &str) -> Result<Expr, FullParseError> {
        Parser::new(input).parse_expression()
    }

    fn parse_prg(input: &str) -> Result<Vec<Stmt>, FullParseError> {
        Parser::new(input).parse_program()
    }

    fn op(kind: TokenKind) -> Token {
        Token { kind, line: 1 }
    }

    fn ident(name: &str) -> Ident {
        Ident { name: Rc::from(name), line: 1 }
    }

    #[test]
    fn number() -> Result<(), FullParseError> {
        assert_eq!(parse_expr("42")?, Expr::Number(42.0));
        Ok(())
    }

    #[test]
    fn bool_literals() -> Result<(), FullParseError> {
        assert_eq!(parse_expr("true")?, Expr::Bool(true));
        assert_eq!(parse_expr("false")?, Expr::Bool(false));
        Ok(())
    }

    #[test]
    fn string_literal() -> Result<(), FullParseError> {
        assert_eq!(parse_expr("\"hi\"")?, Expr::Str(Rc::from("hi")));
        Ok(())
    }

    #[test]
    fn unary_minus() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("--42")?,
            Expr::Unary(
                op(TokenKind::Minus),
                Box::new(Expr::Unary(op(TokenKind::Minus), Box::new(Expr::Number(42.0))))
            )
        );
        Ok(())
    }

    #[test]
    fn unary_bang() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("!true")?,
            Expr::Unary(op(TokenKind::Bang), Box::new(Expr::Bool(true)))
        );
        Ok(())
    }

    #[test]
    fn addition() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("42 + 24")?,
            Expr::Binary(
                op(TokenKind::Plus),
                Box::new(Expr::Number(42.0)),
                Box::new(Expr::Number(24.0))
            )
        );
        Ok(())
    }

    #[test]
    fn addition_is_left_associative() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("1 + 2 + 3")?,
            Expr::Binary(
                op(TokenKind::Plus),
                Box::new(Expr::Binary(
                    op(TokenKind::Plus),
                    Box::new(Expr::Number(1.0)),
                    Box::new(Expr::Number(2.0))
                )),
                Box::new(Expr::Number(3.0))
            )
        );
        Ok(())
    }

    #[test]
    fn factors_have_precedence_over_terms() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("1 + 2 * 3")?,
            Expr::Binary(
                op(TokenKind::Plus),
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Binary(
                    op(TokenKind::Star),
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0))
                )),
            )
        );
        Ok(())
    }

    #[test]
    fn braced_expr_takes_precedence() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("1 * (2 + 3)")?,
            Expr::Binary(
                op(TokenKind::Star),
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Group(Box::new(Expr::Binary(
                    op(TokenKind::Plus),
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0))
                ))))
            ),
        );
        Ok(())
    }

    #[test]
    fn missing_right_paren() {
        match parse_expr("(1") {
            Err(FullParseError {
                line: 1,
                lexeme: None,
                error: ParseError::Expected("Expected ')' after expression."),
            }) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn comparison_operators() -> Result<(), FullParseError> {
        for (source, kind) in [
            ("1 < 2", TokenKind::Less),
            ("1 <= 2", TokenKind::LessEqual),
            ("1 > 2", TokenKind::Greater),
            ("1 >= 2", TokenKind::GreaterEqual),
            ("1 == 2", TokenKind::EqualEqual),
            ("1 != 2", TokenKind::BangEqual),
        ] {
            assert_eq!(
                parse_expr(source)?,
                Expr::Binary(op(kind), Box::new(Expr::Number(1.0)), Box::new(Expr::Number(2.0)))
            );
        }
        Ok(())
    }

    #[test]
    fn equality_is_left_associative() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("1 == 2 == 3")?,
            Expr::Binary(
                op(TokenKind::EqualEqual),
                Box::new(Expr::Binary(
                    op(TokenKind::EqualEqual),
                    Box::new(Expr::Number(1.0)),
                    Box::new(Expr::Number(2.0))
                )),
                Box::new(Expr::Number(3.0))
            )
        );
        Ok(())
    }

    #[test]
    fn and_binds_tighter_than_or() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("1 or 2 and 3")?,
            Expr::Logical(
                op(TokenKind::Or),
                Box::new(Expr::Number(1.0)),
                Box::new(Expr::Logical(
                    op(TokenKind::And),
                    Box::new(Expr::Number(2.0)),
                    Box::new(Expr::Number(3.0))
                ))
            )
        );
        Ok(())
    }

    #[test]
    fn simple_assignment() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("a = b")?,
            Expr::Assign(ident("a"), Box::new(Expr::Var(ident("b"))))
        );
        Ok(())
    }

    #[test]
    fn assignment_is_right_associative() -> Result<(), FullParseError> {
        assert_eq!(
            parse_expr("a = b = 1")?,
            Expr::Assign(
                ident("a"),
                Box::new(Expr::Assign(ident("b"), Box::new(Expr::Number(1.0))))
            )
        );
        Ok(())
    }

    #[test]
    fn bad_assignment_lhs() {
        match parse_expr("1 + a = b") {
            Err(FullParseError {
                line: 1,
                error: ParseError::InvalidAssignmentTarget,
                ..
            }) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn expr_stmts() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("1; 1+2;")?,
            vec![
                Stmt::Expr(Box::new(Expr::Number(1.0))),
                Stmt::Expr(Box::new(Expr::Binary(
                    op(TokenKind::Plus),
                    Box::new(Expr::Number(1.0)),
                    Box::new(Expr::Number(2.0))
                )))
            ]
        );
        Ok(())
    }

    #[test]
    fn print_stmt() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("print 1;")?,
            vec![Stmt::Print(Box::new(Expr::Number(1.0)))]
        );
        Ok(())
    }

    #[test]
    fn var_decl_with_and_without_initializer() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("var foo; var bar = 2 * 3.14;")?,
            vec![
                Stmt::Var(ident("foo"), None),
                Stmt::Var(
                    ident("bar"),
                    Some(Box::new(Expr::Binary(
                        op(TokenKind::Star),
                        Box::new(Expr::Number(2.0)),
                        Box::new(Expr::Number(3.14))
                    )))
                )
            ]
        );
        Ok(())
    }

    #[test]
    fn empty_block() -> Result<(), FullParseError> {
        assert_eq!(parse_prg("{ }")?, vec![Stmt::Block(vec![])]);
        Ok(())
    }

    #[test]
    fn block_with_many_stmts() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("{ 1; 2; }")?,
            vec![Stmt::Block(vec![
                Stmt::Expr(Box::new(Expr::Number(1.0))),
                Stmt::Expr(Box::new(Expr::Number(2.0))),
            ])]
        );
        Ok(())
    }

    #[test]
    fn unterminated_block() {
        match parse_prg("{ 1;") {
            Err(FullParseError {
                lexeme: None,
                error: ParseError::Expected("Expected '}' after block."),
                ..
            }) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn if_stmt() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("if (true) 1;")?,
            vec![Stmt::If(
                Box::new(Expr::Bool(true)),
                Box::new(Stmt::Expr(Box::new(Expr::Number(1.0)))),
                None
            )]
        );
        Ok(())
    }

    #[test]
    fn if_else_stmt() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("if (true) 1; else 2;")?,
            vec![Stmt::If(
                Box::new(Expr::Bool(true)),
                Box::new(Stmt::Expr(Box::new(Expr::Number(1.0)))),
                Some(Box::new(Stmt::Expr(Box::new(Expr::Number(2.0))))),
            )]
        );
        Ok(())
    }

    #[test]
    fn while_stmt() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("while (true) 1;")?,
            vec![Stmt::While(
                Box::new(Expr::Bool(true)),
                Box::new(Stmt::Expr(Box::new(Expr::Number(1.0)))),
            )]
        );
        Ok(())
    }

    #[test]
    fn for_desugars_to_while() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("for (var i = 0; i < 3; i = i + 1) print i;")?,
            vec![Stmt::Block(vec![
                Stmt::Var(ident("i"), Some(Box::new(Expr::Number(0.0)))),
                Stmt::While(
                    Box::new(Expr::Binary(
                        op(TokenKind::Less),
                        Box::new(Expr::Var(ident("i"))),
                        Box::new(Expr::Number(3.0))
                    )),
                    Box::new(Stmt::Block(vec![
                        Stmt::Print(Box::new(Expr::Var(ident("i")))),
                        Stmt::Expr(Box::new(Expr::Assign(
                            ident("i"),
                            Box::new(Expr::Binary(
                                op(TokenKind::Plus),
                                Box::new(Expr::Var(ident("i"))),
                                Box::new(Expr::Number(1.0))
                            ))
                        ))),
                    ]))
                ),
            ])]
        );
        Ok(())
    }

    #[test]
    fn for_with_empty_clauses() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("for (;;) 1;")?,
            vec![Stmt::While(
                Box::new(Expr::Bool(true)),
                Box::new(Stmt::Expr(Box::new(Expr::Number(1.0)))),
            )]
        );
        Ok(())
    }

    #[test]
    fn return_stmt_without_expr() -> Result<(), FullParseError> {
        assert_eq!(parse_prg("return;")?, vec![Stmt::Return(None)]);
        Ok(())
    }

    #[test]
    fn return_stmt_with_expr() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("return false;")?,
            vec![Stmt::Return(Some(Box::new(Expr::Bool(false))))]
        );
        Ok(())
    }

    #[test]
    fn fn_call_without_argument() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("foo();")?,
            vec![Stmt::Expr(Box::new(Expr::Call(
                Box::new(Expr::Var(ident("foo"))),
                op(TokenKind::RightParen),
                vec![]
            )))]
        );
        Ok(())
    }

    #[test]
    fn fn_call_with_several_arguments() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("foo(1, false);")?,
            vec![Stmt::Expr(Box::new(Expr::Call(
                Box::new(Expr::Var(ident("foo"))),
                op(TokenKind::RightParen),
                vec![Expr::Number(1.0), Expr::Bool(false)]
            )))]
        );
        Ok(())
    }

    #[test]
    fn call_result_can_be_called_again() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("f(1)(2);")?,
            vec![Stmt::Expr(Box::new(Expr::Call(
                Box::new(Expr::Call(
                    Box::new(Expr::Var(ident("f"))),
                    op(TokenKind::RightParen),
                    vec![Expr::Number(1.0)]
                )),
                op(TokenKind::RightParen),
                vec![Expr::Number(2.0)]
            )))]
        );
        Ok(())
    }

    #[test]
    fn too_many_arguments() {
        match parse_prg("f(1, 2, 3, 4, 5, 6, 7, 8, 9);") {
            Err(FullParseError {
                error: ParseError::TooManyArguments,
                ..
            }) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn declare_fn_without_argument() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("fun foo() { true; }")?,
            vec![Stmt::Function(Rc::new(FunctionDecl {
                name: ident("foo"),
                params: vec![],
                body: vec![Stmt::Expr(Box::new(Expr::Bool(true)))],
            }))]
        );
        Ok(())
    }

    #[test]
    fn declare_fn_with_two_arguments() -> Result<(), FullParseError> {
        assert_eq!(
            parse_prg("fun foo(a, b) { true; }")?,
            vec![Stmt::Function(Rc::new(FunctionDecl {
                name: ident("foo"),
                params: vec![ident("a"), ident("b")],
                body: vec![Stmt::Expr(Box::new(Expr::Bool(true)))],
            }))]
        );
        Ok(())
    }

    #[test]
    fn too_many_parameters() {
        match parse_prg("fun f(a, b, c, d, e, f, g, h, i) { }") {
            Err(FullParseError {
                error: ParseError::TooManyParameters,
                ..
            }) => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }

    #[test]
    fn error_reports_offending_line() {
        match parse_prg("1;\n2 +;") {
            Err(FullParseError {
                line: 2,
                lexeme: Some(lexeme),
                error: ParseError::Expected("Expected expression."),
            }) if lexeme == ";" => (),
            r => panic!("unexpected output: {:?}", r),
        }
    }
}
