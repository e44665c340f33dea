pub mod literals;
pub mod operators;
pub mod ast_node;
pub mod symbol_table;

use std::fmt;

use tracing::debug;

pub use self::{
    ast_node::{ASTNode, NodeCensus},
    literals::Literal,
    operators::BinaryOperation,
    symbol_table::{Symbol, SymbolTable}
};

/// Intermediate Representation of the compiler model
/// This model is represented as a tree using the ASTNode enum.
/// Each node on this tree is representative of a statement or expression
/// involved in the construction of a program.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractSyntaxTree {
    root: ASTNode
}

impl AbstractSyntaxTree {
    pub fn new(root: ASTNode) -> Self {
        Self {
            root
        }
    }

    pub fn root(&self) -> &ASTNode {
        &self.root
    }

    /// Convert AST into ASTNode
    pub fn into_root(self) -> ASTNode {
        self.root
    }

    /// Prints the tree dump to stdout
    pub fn print(&self) {
        self.root.print_tree();
    }

    pub fn census(&self) -> NodeCensus {
        self.root.census()
    }

    /// Releases the whole tree from the root down.
    pub fn destroy(self) -> NodeCensus {
        let released = self.root.destroy();
        debug!(nodes = released.nodes, strings = released.strings, "released syntax tree");
        released
    }
}

impl fmt::Display for AbstractSyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_tree(f, 0)
    }
}
