use std::collections::HashMap;

use crate::{ast::TypeSpec, location::Location};

use super::error::SemanticErrorKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub type_spec: TypeSpec,
    /// Where the symbol was declared.
    pub location: Location,
}

/// A flat mapping from variable names to their declarations.
///
/// There is a single table per compilation: declarations are global, and
/// blocks do not introduce scopes.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
}
impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a symbol. Fails if a symbol with the same name already exists,
    /// in which case the existing declaration is kept.
    pub fn declare(&mut self, symbol: Symbol) -> Result<(), SemanticErrorKind> {
        if let Some(existing) = self.symbols.get(&symbol.name) {
            return Err(SemanticErrorKind::DuplicateDeclaration {
                name: symbol.name,
                original: existing.location,
            });
        }
        self.symbols.insert(symbol.name.clone(), symbol);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Symbol, SemanticErrorKind> {
        self.symbols
            .get(name)
            .ok_or_else(|| SemanticErrorKind::UndeclaredVariable(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
