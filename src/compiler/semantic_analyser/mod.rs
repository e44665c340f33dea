use super::ast::{AbstractSyntaxTree, SymbolTable};
use super::diagnostics::DiagnosticSink;

pub mod declaration_analyser;

/// Semantic analyser walks a syntax tree and builds the symbol table for it.
/// Problems found along the way are reported to the diagnostic sink rather than halting.
pub trait SemanticAnalyser {
    fn default() -> Self;
    fn analyse(self, tree: &AbstractSyntaxTree, diagnostics: &mut dyn DiagnosticSink) -> SymbolTable;
}

// Concrete Definition Export
pub use self::declaration_analyser::DeclarationAnalyser;
