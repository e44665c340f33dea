// External Modules
extern crate pest;
#[macro_use]
extern crate pest_derive;

// Internal Modules
pub mod compiler;

// Library Interface Re-Export
pub use compiler::{
    FrontEnd,
    FrontEndOutput,
    PestTinyCParser,
    DeclarationAnalyser
};
pub use compiler::ast::{
    AbstractSyntaxTree,
    ASTNode,
    BinaryOperation,
    Literal,
    NodeCensus,
    Symbol,
    SymbolTable
};
pub use compiler::diagnostics::{
    Diagnostic,
    DiagnosticKind,
    DiagnosticSink,
    Diagnostics,
    StderrSink
};
pub use compiler::parser::AstParser;
pub use compiler::semantic_analyser::SemanticAnalyser;
