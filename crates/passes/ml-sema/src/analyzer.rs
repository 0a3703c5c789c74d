//! Semantic analysis pass

use crate::error::{SemanticError, SemanticWarning};
use crate::scope::SymbolTable;
use crate::symbol::{Symbol, SymbolCategory};
use ml_syntax::{Assign, Block, Call, Expr, ForInit, FunctionDecl, Ident, Program, Stmt, VarDecl};
use rustc_hash::FxHashSet;

/// Result of semantic analysis
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Populated symbol table, global scope active
    pub table: SymbolTable,
    /// Errors in traversal order
    pub errors: Vec<SemanticError>,
    /// Warnings: uninitialized reads in traversal order, then unused symbols
    pub warnings: Vec<SemanticWarning>,
}

impl Analysis {
    /// Returns true if compilation must stop before IR generation
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Declares and resolves every name of a program
pub struct SemanticAnalyzer {
    /// Table being populated
    table: SymbolTable,
    /// Collected errors
    errors: Vec<SemanticError>,
    /// Collected warnings
    warnings: Vec<SemanticWarning>,
    /// Insertion orders of symbols already warned about as uninitialized
    warned_uninitialized: FxHashSet<usize>,
}

impl SemanticAnalyzer {
    fn new() -> Self {
        Self {
            table: SymbolTable::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
            warned_uninitialized: FxHashSet::default(),
        }
    }

    /// Analyze a whole program
    ///
    /// Never fails: errors are collected into the returned [`Analysis`] and the
    /// traversal continues past them.
    pub fn analyze(program: &Program) -> Analysis {
        let mut analyzer = Self::new();

        for function in &program.functions {
            analyzer.visit_function(function);
        }
        analyzer.report_unused();

        tracing::debug!(
            symbols = analyzer.table.len(),
            errors = analyzer.errors.len(),
            warnings = analyzer.warnings.len(),
            "semantic analysis finished"
        );

        Analysis {
            table: analyzer.table,
            errors: analyzer.errors,
            warnings: analyzer.warnings,
        }
    }

    fn visit_function(&mut self, function: &FunctionDecl) {
        let name = &function.name.name;
        tracing::trace!(function = %name, "declare function");

        let parameters = function.params.iter().map(|param| param.ty.clone()).collect();
        let symbol = Symbol::new(
            name.as_str(),
            function.return_type.as_str(),
            SymbolCategory::Function,
            function.name.pos,
        )
        .initialized(true)
        .with_parameters(parameters);
        self.declare(symbol);

        self.table.enter_scope(name);

        for param in &function.params {
            let parameter = Symbol::new(
                param.name.name.as_str(),
                param.ty.as_str(),
                SymbolCategory::Parameter,
                param.name.pos,
            )
            .initialized(true);
            self.declare(parameter);
        }

        self.visit_block(&function.body);
        self.table.exit_scope();
    }

    fn visit_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.visit_stmt(stmt);
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.visit_var_decl(decl),
            Stmt::Assign(assign) => self.visit_assign(assign),
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => {
                self.visit_expr(cond);
                self.visit_block(then_block);
                if let Some(else_block) = else_block {
                    self.visit_block(else_block);
                }
            }
            Stmt::While { cond, body } => {
                self.visit_expr(cond);
                self.visit_block(body);
            }
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                match init {
                    ForInit::Decl(decl) => self.visit_var_decl(decl),
                    ForInit::Assign(assign) => self.visit_assign(assign),
                }
                self.visit_expr(cond);
                self.visit_block(body);
                self.visit_assign(update);
            }
            Stmt::Return(Some(value)) => self.visit_expr(value),
            Stmt::Return(None) => {}
            Stmt::Call(call) => self.visit_call(call),
            // Nested blocks share the enclosing function scope
            Stmt::Block(block) => self.visit_block(block),
        }
    }

    fn visit_var_decl(&mut self, decl: &VarDecl) {
        if let Some(init) = &decl.init {
            self.visit_expr(init);
        }

        tracing::trace!(
            variable = %decl.name.name,
            scope = self.table.current_scope(),
            "declare variable"
        );
        let symbol = Symbol::new(
            decl.name.name.as_str(),
            decl.ty.as_str(),
            SymbolCategory::Variable,
            decl.name.pos,
        )
        .constant(decl.constant)
        .initialized(decl.init.is_some());
        self.declare(symbol);
    }

    fn visit_assign(&mut self, assign: &Assign) {
        self.visit_expr(&assign.value);

        if let Some(symbol) = self.resolve_mut(&assign.target) {
            symbol.is_initialized = true;
        }
    }

    fn visit_call(&mut self, call: &Call) {
        tracing::trace!(callee = %call.callee.name, args = call.args.len(), "call");
        if let Some(symbol) = self.resolve_mut(&call.callee) {
            symbol.is_used = true;
        }

        for arg in &call.args {
            self.visit_expr(arg);
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary { left, right, .. } => {
                self.visit_expr(left);
                self.visit_expr(right);
            }
            Expr::Ident(ident) => self.visit_read(ident),
            Expr::Int(_) => {}
            Expr::Paren(inner) => self.visit_expr(inner),
            Expr::Call(call) => self.visit_call(call),
        }
    }

    fn visit_read(&mut self, ident: &Ident) {
        let Some(symbol) = self.resolve_mut(ident) else {
            return;
        };
        symbol.is_used = true;

        if symbol.category != SymbolCategory::Variable || symbol.is_initialized {
            return;
        }
        let order = symbol.insertion_order;
        let name = symbol.name.clone();
        let scope = symbol.scope.clone();
        if self.warned_uninitialized.insert(order) {
            let warning = SemanticWarning::UninitializedSymbol {
                name,
                scope,
                use_site: ident.pos,
            };
            tracing::trace!(%warning, "uninitialized read");
            self.warnings.push(warning);
        }
    }

    fn declare(&mut self, symbol: Symbol) {
        if let Err(error) = self.table.insert(symbol) {
            tracing::trace!(%error, "redeclaration");
            self.errors.push(error);
        }
    }

    /// Resolve a use site, reporting an undefined reference on a miss
    fn resolve_mut(&mut self, ident: &Ident) -> Option<&mut Symbol> {
        if self.table.lookup(&ident.name).is_none() {
            self.undefined(ident);
            return None;
        }
        self.table.lookup_mut(&ident.name)
    }

    fn undefined(&mut self, ident: &Ident) {
        let error = SemanticError::UndefinedReference {
            name: ident.name.clone(),
            scope: self.table.current_scope().to_string(),
            use_site: ident.pos,
        };
        tracing::trace!(%error, "undefined reference");
        self.errors.push(error);
    }

    fn report_unused(&mut self) {
        let unused = self
            .table
            .all_symbols()
            .into_iter()
            .filter(|symbol| symbol.category != SymbolCategory::Function && !symbol.is_used)
            .map(|symbol| SemanticWarning::UnusedSymbol {
                name: symbol.name.clone(),
                scope: symbol.scope.clone(),
                declared_at: symbol.declared_at,
            });
        self.warnings.extend(unused);
    }
}
