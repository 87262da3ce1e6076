//! AST → canonical Racket source text.
//!
//! `stringify(parse(tokenize(s)))` must be idempotent under re-tokenization: see the
//! round-trip tests alongside the parser.

use crate::ast::{Ast, NodeId, NodeKind};
use crate::visitor::{accept, Visitor};

struct Stringifier {
    out: String,
}

impl Visitor for Stringifier {
    fn visit_program(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Program { directive, statements, .. } = ast.get(id) else { unreachable!() };
        accept(self, ast, *directive);
        for stmt in statements {
            self.out.push('\n');
            accept(self, ast, *stmt);
        }
    }

    fn visit_reader_directive(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::ReaderDirective { token } = ast.get(id) else { unreachable!() };
        self.out.push_str(&token.source);
    }

    fn visit_literal(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Literal { token } = ast.get(id) else { unreachable!() };
        self.out.push_str(&token.source);
    }

    fn visit_name(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Name { token } = ast.get(id) else { unreachable!() };
        self.out.push_str(&token.source);
    }

    fn visit_name_definition(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::NameDefinition { name, expression, .. } = ast.get(id) else { unreachable!() };
        self.out.push_str("(define ");
        accept(self, ast, *name);
        self.out.push(' ');
        accept(self, ast, *expression);
        self.out.push(')');
    }

    fn visit_structure_definition(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::StructureDefinition { name, fields, .. } = ast.get(id) else { unreachable!() };
        self.out.push_str("(define-struct ");
        accept(self, ast, *name);
        self.out.push_str(" (");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            accept(self, ast, *field);
        }
        self.out.push_str("))");
    }

    fn visit_cond(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Cond { branches, .. } = ast.get(id) else { unreachable!() };
        self.out.push_str("(cond ");
        for (i, (condition, result)) in branches.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.out.push('(');
            accept(self, ast, *condition);
            self.out.push(' ');
            accept(self, ast, *result);
            self.out.push(')');
        }
        self.out.push(')');
    }

    fn visit_lambda(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Lambda { variables, body, .. } = ast.get(id) else { unreachable!() };
        self.out.push_str("(lambda (");
        for (i, var) in variables.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            accept(self, ast, *var);
        }
        self.out.push_str(") ");
        accept(self, ast, *body);
        self.out.push(')');
    }

    fn visit_let(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Let { kind, bindings, body, .. } = ast.get(id) else { unreachable!() };
        self.out.push('(');
        self.out.push_str(kind.keyword());
        self.out.push_str(" (");
        for (i, (name, expr)) in bindings.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            self.out.push('(');
            accept(self, ast, *name);
            self.out.push(' ');
            accept(self, ast, *expr);
            self.out.push(')');
        }
        self.out.push_str(") ");
        accept(self, ast, *body);
        self.out.push(')');
    }

    fn visit_local(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::Local { definitions, body, .. } = ast.get(id) else { unreachable!() };
        self.out.push_str("(local (");
        for (i, def) in definitions.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            accept(self, ast, *def);
        }
        self.out.push_str(") ");
        accept(self, ast, *body);
        self.out.push(')');
    }

    fn visit_procedure_application(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::ProcedureApplication { expressions, .. } = ast.get(id) else { unreachable!() };
        self.out.push('(');
        for (i, expr) in expressions.iter().enumerate() {
            if i > 0 {
                self.out.push(' ');
            }
            accept(self, ast, *expr);
        }
        self.out.push(')');
    }

    fn visit_test_case(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::TestCase { kind, arguments, .. } = ast.get(id) else { unreachable!() };
        self.out.push('(');
        self.out.push_str(kind.keyword());
        for arg in arguments {
            self.out.push(' ');
            accept(self, ast, *arg);
        }
        self.out.push(')');
    }

    fn visit_library_require(&mut self, ast: &Ast, id: NodeId) {
        let NodeKind::LibraryRequire { library, .. } = ast.get(id) else { unreachable!() };
        self.out.push_str("(require ");
        accept(self, ast, *library);
        self.out.push(')');
    }
}

/// Renders the whole program rooted at `ast.root()`.
pub fn stringify(ast: &Ast) -> String {
    stringify_node(ast, ast.root())
}

/// Renders a single node and its subtree, independent of the program root. Used by
/// mutation generators to build an `explanation` from a would-be replacement.
pub fn stringify_node(ast: &Ast, id: NodeId) -> String {
    let mut stringifier = Stringifier { out: String::new() };
    accept(&mut stringifier, ast, id);
    stringifier.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use mracket_lex::Lexer;

    fn round_trip(src: &str) -> String {
        let ast = parse(Lexer::tokenize(src).unwrap()).unwrap();
        stringify(&ast)
    }

    #[test]
    fn idempotent_on_reparse() {
        let src = "#lang racket\n(define (f x) (if (> x 0) x (- x)))\n(check-expect (f 1) 1)";
        let once = round_trip(src);
        let twice = round_trip(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn preserves_struct_fields() {
        assert_eq!(round_trip("#lang racket\n(define-struct point (x y))"), "#lang racket\n(define-struct point (x y))");
    }
}
