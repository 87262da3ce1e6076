//! Double-dispatch traversal over [`Ast`] nodes.
//!
//! [`Visitor`] gives every consumer (stringifier, mutation generators, mutator,
//! applier) one method per node variant. Every method defaults to a no-op, so a
//! mutation generator interested in only `ProcedureApplication` nodes overrides just
//! that one method; consumers that need full traversal (the stringifier, the mutator)
//! override every variant and recurse explicitly via [`accept`].

use crate::ast::{Ast, NodeId, NodeKind};

pub trait Visitor {
    fn visit_program(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_reader_directive(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_name_definition(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_structure_definition(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_literal(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_name(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_cond(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_lambda(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_let(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_local(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_procedure_application(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_test_case(&mut self, _ast: &Ast, _id: NodeId) {}
    fn visit_library_require(&mut self, _ast: &Ast, _id: NodeId) {}
}

/// Dispatches to the right `visit_*` method for the node currently stored at `id`.
pub fn accept<V: Visitor + ?Sized>(visitor: &mut V, ast: &Ast, id: NodeId) {
    match ast.get(id) {
        NodeKind::Program { .. } => visitor.visit_program(ast, id),
        NodeKind::ReaderDirective { .. } => visitor.visit_reader_directive(ast, id),
        NodeKind::NameDefinition { .. } => visitor.visit_name_definition(ast, id),
        NodeKind::StructureDefinition { .. } => visitor.visit_structure_definition(ast, id),
        NodeKind::Literal { .. } => visitor.visit_literal(ast, id),
        NodeKind::Name { .. } => visitor.visit_name(ast, id),
        NodeKind::Cond { .. } => visitor.visit_cond(ast, id),
        NodeKind::Lambda { .. } => visitor.visit_lambda(ast, id),
        NodeKind::Let { .. } => visitor.visit_let(ast, id),
        NodeKind::Local { .. } => visitor.visit_local(ast, id),
        NodeKind::ProcedureApplication { .. } => visitor.visit_procedure_application(ast, id),
        NodeKind::TestCase { .. } => visitor.visit_test_case(ast, id),
        NodeKind::LibraryRequire { .. } => visitor.visit_library_require(ast, id),
    }
}

/// The immediate children of `id`, in the canonical child-field order used by both the
/// mutator's recursion and the applier's traversal-order guarantee.
pub fn children(ast: &Ast, id: NodeId) -> Vec<NodeId> {
    match ast.get(id) {
        NodeKind::Program { directive, statements, .. } => {
            let mut out = vec![*directive];
            out.extend(statements.iter().copied());
            out
        }
        NodeKind::ReaderDirective { .. } => vec![],
        NodeKind::NameDefinition { name, expression, .. } => vec![*name, *expression],
        NodeKind::StructureDefinition { name, fields, .. } => {
            let mut out = vec![*name];
            out.extend(fields.iter().copied());
            out
        }
        NodeKind::Literal { .. } => vec![],
        NodeKind::Name { .. } => vec![],
        NodeKind::Cond { branches, .. } => branches.iter().flat_map(|(c, e)| [*c, *e]).collect(),
        NodeKind::Lambda { variables, body, .. } => {
            let mut out = variables.clone();
            out.push(*body);
            out
        }
        NodeKind::Let { bindings, body, .. } => {
            let mut out: Vec<NodeId> = bindings.iter().flat_map(|(n, e)| [*n, *e]).collect();
            out.push(*body);
            out
        }
        NodeKind::Local { definitions, body, .. } => {
            let mut out = definitions.clone();
            out.push(*body);
            out
        }
        NodeKind::ProcedureApplication { expressions, .. } => expressions.clone(),
        NodeKind::TestCase { .. } => vec![],
        NodeKind::LibraryRequire { library, .. } => vec![*library],
    }
}
