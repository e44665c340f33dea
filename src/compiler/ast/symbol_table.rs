use std::fmt;
use std::iter::Rev;
use std::slice::Iter;

use tracing::debug;

use super::super::diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};


/// Symbol pairs a declared identifier with the name of its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,       // Identifier known by
    symbol_type: String // Declared type name
}

impl Symbol {
    fn new(name: &str, symbol_type: &str) -> Self {
        Symbol {
            name: name.to_string(),
            symbol_type: symbol_type.to_string()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol_type(&self) -> &str {
        &self.symbol_type
    }
}


/// Symbol table is a single flat scope of declared symbols used during semantic analysis.
/// Names are unique and compared byte for byte. Traversal runs most recently declared first;
/// since duplicates are rejected the order never changes which symbol a lookup resolves to.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    /// Stored in declaration order, traversed in reverse
    symbols: Vec<Symbol>
}

impl SymbolTable {

    /// Create an empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a symbol.
    /// If the name is already declared a diagnostic is reported and the table is left unchanged,
    /// the new type is discarded rather than merged.
    /// @return true if the symbol was added, false if it already existed
    pub fn add_symbol(&mut self, name: &str, symbol_type: &str, diagnostics: &mut dyn DiagnosticSink) -> bool {
        if let Some(existing) = self.lookup_symbol(name) {
            diagnostics.report(Diagnostic::new(
                DiagnosticKind::AlreadyDeclared,
                format!("Symbol '{}' already declared as '{}'.", name, existing.symbol_type())
            ));
            return false;
        }

        debug!(symbol = name, symbol_type, "declared symbol");
        self.symbols.push(Symbol::new(name, symbol_type));
        true
    }

    /// Find a symbol by name.
    /// @return the most recently declared symbol with that name, None if undeclared
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        self.iter().find(|symbol| symbol.name == name)
    }

    /// Symbols in traversal order, most recently declared first
    pub fn iter(&self) -> Rev<Iter<'_, Symbol>> {
        self.symbols.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<'a> IntoIterator for &'a SymbolTable {
    type Item = &'a Symbol;
    type IntoIter = Rev<Iter<'a, Symbol>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol Table:")?;
        for symbol in self {
            writeln!(f, "  {}: {}", symbol.name, symbol.symbol_type)?;
        }
        Ok(())
    }
}
