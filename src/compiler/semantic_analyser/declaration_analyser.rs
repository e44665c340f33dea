use tracing::debug;

use super::SemanticAnalyser;
use super::super::ast::{AbstractSyntaxTree, ASTNode, SymbolTable};
use super::super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};


/// DeclarationAnalyser records every declaration in a flat symbol table and enforces
/// declare-before-use for identifiers and assignment targets. No type checking is done.
pub struct DeclarationAnalyser {
    symbol_table: SymbolTable
}

impl DeclarationAnalyser {

    fn analyse_node(&mut self, node: &ASTNode, diagnostics: &mut dyn DiagnosticSink) {
        match node {
            ASTNode::PROGRAM(statements) | ASTNode::BLOCK(statements) => {
                for statement in statements {
                    self.analyse_node(statement, diagnostics);
                }
            }
            ASTNode::DECLARATION { var_type, var_name, initializer } => {
                // Initializer is resolved before its own variable exists
                if let Some(initializer) = initializer {
                    self.analyse_node(initializer, diagnostics);
                }
                self.symbol_table.add_symbol(var_name, var_type, diagnostics);
            }
            ASTNode::ASSIGNMENT { var_name, value } => {
                self.analyse_node(value, diagnostics);
                self.resolve(var_name, diagnostics);
            }
            ASTNode::PRINT { expression } => {
                self.analyse_node(expression, diagnostics);
            }
            ASTNode::BRANCH { condition, then_branch, else_branch } => {
                self.analyse_node(condition, diagnostics);
                self.analyse_node(then_branch, diagnostics);
                if let Some(else_branch) = else_branch {
                    self.analyse_node(else_branch, diagnostics);
                }
            }
            ASTNode::WHILE_LOOP { condition, body } => {
                self.analyse_node(condition, diagnostics);
                self.analyse_node(body, diagnostics);
            }
            ASTNode::BINARY_OP { op: _, lhs, rhs } => {
                self.analyse_node(lhs, diagnostics);
                self.analyse_node(rhs, diagnostics);
            }
            ASTNode::LITERAL(_) => {}
            ASTNode::IDENTIFIER(name) => {
                self.resolve(name, diagnostics);
            }
        }
    }

    fn resolve(&self, name: &str, diagnostics: &mut dyn DiagnosticSink) {
        if self.symbol_table.lookup_symbol(name).is_none() {
            diagnostics.report(Diagnostic::new(
                DiagnosticKind::UndeclaredIdentifier,
                format!("Identifier '{}' used before declaration.", name)
            ));
        }
    }
}

/// SemanticAnalyser Trait Concrete Implementation
impl SemanticAnalyser for DeclarationAnalyser {
    fn default() -> Self {
        Self {
            symbol_table: SymbolTable::new()
        }
    }

    fn analyse(mut self, tree: &AbstractSyntaxTree, diagnostics: &mut dyn DiagnosticSink) -> SymbolTable {
        let reported_before = diagnostics.reported();
        self.analyse_node(tree.root(), diagnostics);
        debug!(symbols = self.symbol_table.len(),
               diagnostics = diagnostics.reported() - reported_before,
               "analysed syntax tree");
        self.symbol_table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::super::ast::BinaryOperation;
    use super::super::super::diagnostics::Diagnostics;

    fn analyse(statements: Vec<ASTNode>, diagnostics: &mut Diagnostics) -> SymbolTable {
        let tree = AbstractSyntaxTree::new(ASTNode::PROGRAM(statements));
        DeclarationAnalyser::default().analyse(&tree, diagnostics)
    }

    #[test]
    fn test_declarations_populate_table() {
        let mut diagnostics = Diagnostics::new();
        let table = analyse(vec![
            ASTNode::declaration("int", "x", Some(ASTNode::integer(5))),
            ASTNode::assignment("x", ASTNode::binary_op(BinaryOperation::ADD, ASTNode::identifier("x"), ASTNode::integer(1))),
            ASTNode::declaration("char", "c", None),
            ASTNode::print(ASTNode::identifier("x")),
        ], &mut diagnostics);

        assert!(diagnostics.is_empty());
        assert_eq!(2, table.len());
        assert_eq!("int", table.lookup_symbol("x").unwrap().symbol_type());
        assert_eq!("char", table.lookup_symbol("c").unwrap().symbol_type());
    }

    #[test]
    fn test_redeclaration_reported() {
        let mut diagnostics = Diagnostics::new();
        let table = analyse(vec![
            ASTNode::declaration("int", "x", None),
            ASTNode::declaration("float", "x", Some(ASTNode::float(1.0))),
        ], &mut diagnostics);

        assert_eq!(1, diagnostics.count_of(DiagnosticKind::AlreadyDeclared));
        assert_eq!("int", table.lookup_symbol("x").unwrap().symbol_type());
    }

    #[test]
    fn test_undeclared_identifiers_reported() {
        let mut diagnostics = Diagnostics::new();
        analyse(vec![
            ASTNode::assignment("y", ASTNode::integer(1)),
            ASTNode::branch(
                ASTNode::binary_op(BinaryOperation::GREATER_THAN, ASTNode::identifier("z"), ASTNode::integer(0)),
                ASTNode::print(ASTNode::character('y')),
                None
            ),
        ], &mut diagnostics);

        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message()).collect();
        assert_eq!(vec![
            "Identifier 'y' used before declaration.",
            "Identifier 'z' used before declaration."
        ], messages);
        assert_eq!(2, diagnostics.count_of(DiagnosticKind::UndeclaredIdentifier));
    }

    #[test]
    fn test_initializer_resolved_before_declaration() {
        let mut diagnostics = Diagnostics::new();
        let table = analyse(vec![
            ASTNode::declaration("int", "x", Some(ASTNode::identifier("x"))),
        ], &mut diagnostics);

        assert_eq!(1, diagnostics.count_of(DiagnosticKind::UndeclaredIdentifier));
        assert!(table.lookup_symbol("x").is_some());
    }

    #[test]
    fn test_nested_blocks_share_one_scope() {
        let mut diagnostics = Diagnostics::new();
        let table = analyse(vec![
            ASTNode::while_loop(
                ASTNode::integer(1),
                ASTNode::BLOCK(vec![ASTNode::declaration("int", "inner", None)])
            ),
            ASTNode::print(ASTNode::identifier("inner")),
            ASTNode::BLOCK(vec![ASTNode::declaration("char", "inner", None)]),
        ], &mut diagnostics);

        assert_eq!(1, table.len());
        assert_eq!(1, diagnostics.count_of(DiagnosticKind::AlreadyDeclared));
        assert_eq!(0, diagnostics.count_of(DiagnosticKind::UndeclaredIdentifier));
    }
}
