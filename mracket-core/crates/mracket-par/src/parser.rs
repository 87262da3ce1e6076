//! Recursive-descent parser: tokens → [`Ast`], applying the fixed desugarings
//! (function-definition shorthand, quote-family abbreviations, `if` → `cond`) at parse
//! time so every downstream consumer sees a uniform tree.

use mracket_lex::{Token, TokenKind};

use crate::ast::{Ast, LetKind, NodeId, NodeKind, TestCaseKind};
use crate::error::{ParseError, ParseResult};

/// Parses a complete program (one reader directive plus a sequence of statements).
pub fn parse(tokens: Vec<Token>) -> ParseResult<Ast> {
    let mut ast = Ast::new();
    let root = {
        let mut parser = Parser::new(&mut ast, tokens);
        parser.parse_program()?
    };
    ast.set_root(root);
    Ok(ast)
}

/// Parses a single standalone expression into an existing arena, returning the new
/// node's id. Used by `mracket-mutate`'s `ProcedureApplicationReplacement` generator to
/// pre-parse each replacement source string once, into the same arena the replacement
/// will later be swapped into.
pub fn parse_expression_into(ast: &mut Ast, tokens: Vec<Token>) -> ParseResult<NodeId> {
    let mut parser = Parser::new(ast, tokens);
    parser.parse_expression()
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    ast: &'a mut Ast,
}

impl<'a> Parser<'a> {
    fn new(ast: &'a mut Ast, tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0, ast }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn at_eof(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.at_eof() {
            return Err(ParseError::UnexpectedEofToken { token: self.peek().clone() });
        }
        if self.peek().kind != kind {
            return Err(ParseError::IllegalState { token: self.peek().clone() });
        }
        Ok(self.advance())
    }

    fn check_match(&self, lparen: &Token, rparen: &Token) -> ParseResult<()> {
        let ok = matches!((lparen.source.as_str(), rparen.source.as_str()), ("(", ")") | ("[", "]") | ("{", "}"));
        if ok {
            Ok(())
        } else {
            Err(ParseError::MismatchedParentheses { lparen: lparen.clone(), rparen: rparen.clone() })
        }
    }

    /// The head symbol of a parenthesized form starting at the current position, if
    /// any (`(<symbol> ...`).
    fn peek_head_symbol(&self) -> Option<&str> {
        if self.peek().kind != TokenKind::LParen {
            return None;
        }
        self.peek_at(1).filter(|t| t.kind == TokenKind::Symbol).map(|t| t.source.as_str())
    }

    fn is_special_statement(&self, word: &str) -> bool {
        self.peek_head_symbol() == Some(word)
    }

    fn test_case_kind_lookahead(&self) -> Option<TestCaseKind> {
        self.peek_head_symbol().and_then(TestCaseKind::from_keyword)
    }

    fn parse_program(&mut self) -> ParseResult<NodeId> {
        let start_token = self.peek().clone();
        let mut directive = None;
        let mut statements = Vec::new();

        while !self.at_eof() {
            if self.peek().kind == TokenKind::ReaderDirective {
                let tok = self.advance();
                let id = self.ast.alloc(NodeKind::ReaderDirective { token: tok });
                if directive.is_none() {
                    directive = Some(id);
                } else {
                    statements.push(id);
                }
            } else {
                statements.push(self.parse_statement()?);
            }
        }

        let directive = directive.ok_or(ParseError::ExpectedReaderDirective)?;
        Ok(self.ast.alloc(NodeKind::Program { token: start_token, directive, statements }))
    }

    fn parse_statement(&mut self) -> ParseResult<NodeId> {
        if self.at_eof() {
            return Err(ParseError::UnexpectedEofToken { token: self.peek().clone() });
        }
        if self.peek().kind == TokenKind::RParen {
            return Err(ParseError::UnexpectedRightParenthesis { token: self.peek().clone() });
        }
        if self.is_special_statement("define") || self.is_special_statement("define-struct") {
            return self.parse_definition();
        }
        if let Some(kind) = self.test_case_kind_lookahead() {
            return self.parse_test_case(kind);
        }
        if self.is_special_statement("require") {
            return self.parse_library_require();
        }
        self.parse_expression()
    }

    fn parse_name(&mut self) -> ParseResult<NodeId> {
        let tok = self.eat(TokenKind::Symbol)?;
        Ok(self.ast.alloc(NodeKind::Name { token: tok }))
    }

    fn parse_definition(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let head = self.eat(TokenKind::Symbol)?;

        if head.source == "define-struct" {
            let name = self.parse_name()?;
            let fields_lparen = self.eat(TokenKind::LParen)?;
            let mut fields = Vec::new();
            while self.peek().kind != TokenKind::RParen {
                fields.push(self.parse_name()?);
            }
            let fields_rparen = self.advance();
            self.check_match(&fields_lparen, &fields_rparen)?;
            let rparen = self.eat(TokenKind::RParen)?;
            self.check_match(&lparen, &rparen)?;
            return Ok(self.ast.alloc(NodeKind::StructureDefinition { token: lparen, name, fields }));
        }

        if head.source != "define" {
            return Err(ParseError::IllegalState { token: head });
        }

        if self.peek().kind == TokenKind::LParen {
            // `(define (f x...) e)` desugars to `(define f (lambda (x...) e))`.
            let fn_lparen = self.advance();
            let name = self.parse_name()?;
            let mut variables = Vec::new();
            while self.peek().kind != TokenKind::RParen {
                variables.push(self.parse_name()?);
            }
            let fn_rparen = self.advance();
            self.check_match(&fn_lparen, &fn_rparen)?;
            let body = self.parse_expression()?;
            let rparen = self.eat(TokenKind::RParen)?;
            self.check_match(&lparen, &rparen)?;
            let lambda_id = self.ast.alloc(NodeKind::Lambda { token: fn_lparen, variables, body });
            Ok(self.ast.alloc(NodeKind::NameDefinition { token: lparen, name, expression: lambda_id }))
        } else {
            let name = self.parse_name()?;
            let expression = self.parse_expression()?;
            let rparen = self.eat(TokenKind::RParen)?;
            self.check_match(&lparen, &rparen)?;
            Ok(self.ast.alloc(NodeKind::NameDefinition { token: lparen, name, expression }))
        }
    }

    fn parse_test_case(&mut self, kind: TestCaseKind) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let mut arguments = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            if self.at_eof() {
                return Err(ParseError::UnexpectedEofToken { token: self.peek().clone() });
            }
            arguments.push(self.parse_expression()?);
        }
        let rparen = self.advance();
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::TestCase { token: lparen, kind, arguments }))
    }

    fn parse_library_require(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let library = self.parse_name()?;
        let rparen = self.eat(TokenKind::RParen)?;
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::LibraryRequire { token: lparen, library }))
    }

    fn parse_expression(&mut self) -> ParseResult<NodeId> {
        if self.at_eof() {
            return Err(ParseError::UnexpectedEofToken { token: self.peek().clone() });
        }
        match self.peek().kind {
            TokenKind::Boolean | TokenKind::Character | TokenKind::Number | TokenKind::String => {
                let tok = self.advance();
                Ok(self.ast.alloc(NodeKind::Literal { token: tok }))
            }
            TokenKind::Symbol => self.parse_name(),
            TokenKind::Quote => self.parse_quote_abbreviation("quote"),
            TokenKind::Quasiquote => self.parse_quote_abbreviation("quasiquote"),
            TokenKind::Unquote => self.parse_quote_abbreviation("unquote"),
            TokenKind::UnquoteSplicing => self.parse_quote_abbreviation("unquote-splicing"),
            TokenKind::RParen => Err(ParseError::UnexpectedRightParenthesis { token: self.peek().clone() }),
            TokenKind::LParen => self.parse_compound_expression(),
            _ => Err(ParseError::IllegalState { token: self.peek().clone() }),
        }
    }

    /// `'e ≡ (quote e)`, and likewise for `` ` `` / `,` / `,@`.
    fn parse_quote_abbreviation(&mut self, keyword: &'static str) -> ParseResult<NodeId> {
        let abbrev_token = self.advance();
        let quoted = self.parse_expression()?;
        let head = self.ast.alloc(NodeKind::Name { token: Token::synthesized(TokenKind::Symbol, keyword) });
        Ok(self.ast.alloc(NodeKind::ProcedureApplication { token: abbrev_token, expressions: vec![head, quoted] }))
    }

    fn parse_compound_expression(&mut self) -> ParseResult<NodeId> {
        match self.peek_head_symbol() {
            Some("cond") => self.parse_cond(),
            Some("if") => self.parse_if(),
            Some("lambda") | Some("\u{3bb}") => self.parse_lambda(),
            Some("let") => self.parse_let(LetKind::Let),
            Some("let*") => self.parse_let(LetKind::LetStar),
            Some("letrec") => self.parse_let(LetKind::LetRec),
            Some("local") => self.parse_local(),
            _ => self.parse_procedure_application(),
        }
    }

    fn parse_cond(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let mut branches = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            let branch_lparen = self.eat(TokenKind::LParen)?;
            let condition = self.parse_expression()?;
            let result = self.parse_expression()?;
            let branch_rparen = self.eat(TokenKind::RParen)?;
            self.check_match(&branch_lparen, &branch_rparen)?;
            branches.push((condition, result));
        }
        let rparen = self.advance();
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::Cond { token: lparen, branches }))
    }

    /// `(if c t f) ≡ (cond (c t) (else f))`.
    fn parse_if(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let condition = self.parse_expression()?;
        let then_branch = self.parse_expression()?;
        let else_branch = self.parse_expression()?;
        let rparen = self.eat(TokenKind::RParen)?;
        self.check_match(&lparen, &rparen)?;
        let else_name = self.ast.alloc(NodeKind::Name { token: Token::synthesized(TokenKind::Symbol, "else") });
        Ok(self.ast.alloc(NodeKind::Cond {
            token: lparen,
            branches: vec![(condition, then_branch), (else_name, else_branch)],
        }))
    }

    fn parse_lambda(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let vars_lparen = self.eat(TokenKind::LParen)?;
        let mut variables = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            variables.push(self.parse_name()?);
        }
        let vars_rparen = self.advance();
        self.check_match(&vars_lparen, &vars_rparen)?;
        let body = self.parse_expression()?;
        let rparen = self.eat(TokenKind::RParen)?;
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::Lambda { token: lparen, variables, body }))
    }

    fn parse_let(&mut self, kind: LetKind) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let bindings_lparen = self.eat(TokenKind::LParen)?;
        let mut bindings = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            let b_lparen = self.eat(TokenKind::LParen)?;
            let name = self.parse_name()?;
            let expr = self.parse_expression()?;
            let b_rparen = self.eat(TokenKind::RParen)?;
            self.check_match(&b_lparen, &b_rparen)?;
            bindings.push((name, expr));
        }
        let bindings_rparen = self.advance();
        self.check_match(&bindings_lparen, &bindings_rparen)?;
        let body = self.parse_expression()?;
        let rparen = self.eat(TokenKind::RParen)?;
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::Let { token: lparen, kind, bindings, body }))
    }

    fn parse_local(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let _head = self.eat(TokenKind::Symbol)?;
        let defs_lparen = self.eat(TokenKind::LParen)?;
        let mut definitions = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            definitions.push(self.parse_definition()?);
        }
        let defs_rparen = self.advance();
        self.check_match(&defs_lparen, &defs_rparen)?;
        let body = self.parse_expression()?;
        let rparen = self.eat(TokenKind::RParen)?;
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::Local { token: lparen, definitions, body }))
    }

    fn parse_procedure_application(&mut self) -> ParseResult<NodeId> {
        let lparen = self.eat(TokenKind::LParen)?;
        let mut expressions = Vec::new();
        while self.peek().kind != TokenKind::RParen {
            if self.at_eof() {
                return Err(ParseError::UnexpectedEofToken { token: self.peek().clone() });
            }
            expressions.push(self.parse_expression()?);
        }
        let rparen = self.advance();
        self.check_match(&lparen, &rparen)?;
        Ok(self.ast.alloc(NodeKind::ProcedureApplication { token: lparen, expressions }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stringify::stringify;
    use mracket_lex::Lexer;

    fn parse_source(src: &str) -> ParseResult<Ast> {
        let tokens = Lexer::tokenize(src).unwrap();
        parse(tokens)
    }

    #[test]
    fn minimal_program_needs_a_directive() {
        assert_eq!(parse_source("(+ 1 2)"), Err(ParseError::ExpectedReaderDirective));
    }

    #[test]
    fn simple_round_trip() {
        let ast = parse_source("#lang racket\n(+ 1 2)").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(+ 1 2)");
    }

    #[test]
    fn function_shorthand_desugars_to_lambda() {
        let ast = parse_source("#lang racket\n(define (f x) (+ x 1))").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(define f (lambda (x) (+ x 1)))");
    }

    #[test]
    fn if_desugars_to_cond() {
        let ast = parse_source("#lang racket\n(if (> x 0) x (- x))").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(cond ((> x 0) x) (else (- x)))");
    }

    #[test]
    fn quote_abbreviations_desugar() {
        let ast = parse_source("#lang racket\n'(1 2)").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(quote (1 2))");
    }

    #[test]
    fn test_case_and_library_require() {
        let ast = parse_source("#lang racket\n(require racket/list)\n(check-expect (f 1) 2)").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(require racket/list)\n(check-expect (f 1) 2)");
    }

    #[test]
    fn mismatched_parens_are_rejected() {
        let err = parse_source("#lang racket\n(+ 1 2]").unwrap_err();
        assert!(matches!(err, ParseError::MismatchedParentheses { .. }));
    }

    #[test]
    fn unexpected_eof_is_reported() {
        let err = parse_source("#lang racket\n(+ 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEofToken { .. }));
    }

    #[test]
    fn define_struct() {
        let ast = parse_source("#lang racket\n(define-struct point (x y))").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(define-struct point (x y))");
    }

    #[test]
    fn let_family() {
        let ast = parse_source("#lang racket\n(let* ((x 1) (y 2)) (+ x y))").unwrap();
        assert_eq!(stringify(&ast), "#lang racket\n(let* ((x 1) (y 2)) (+ x y))");
    }
}
