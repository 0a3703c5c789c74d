//! Syntax tree → TAC lowering

use ml_sema::{GLOBAL_SCOPE, SymbolTable};
use ml_syntax::{Assign, Block, Call, Expr, ForInit, FunctionDecl, Ident, Program, Stmt, VarDecl};
use ml_tac::{Dest, Instruction, Label, NameGen, Operand};

/// Lower a whole program to a flat instruction list
///
/// `table` must be the table produced by a successful semantic analysis of
/// `program`.
pub fn lower_program(program: &Program, table: &SymbolTable) -> Vec<Instruction> {
    LoweringContext::new(table).lower_program(program)
}

/// State of one lowering run
pub struct LoweringContext<'ctx> {
    /// Finalized symbol table, used to resolve names
    table: &'ctx SymbolTable,
    /// Temporary and label counters
    names: NameGen,
    /// Emitted instructions, in order
    code: Vec<Instruction>,
    /// Function whose body is being lowered
    function: Option<&'ctx str>,
}

impl<'ctx> LoweringContext<'ctx> {
    /// Create a new lowering context
    pub fn new(table: &'ctx SymbolTable) -> Self {
        Self {
            table,
            names: NameGen::new(),
            code: Vec::new(),
            function: None,
        }
    }

    /// Lower every function in source order
    pub fn lower_program(mut self, program: &'ctx Program) -> Vec<Instruction> {
        for function in &program.functions {
            self.lower_function(function);
        }

        tracing::debug!(
            instructions = self.code.len(),
            temps = self.names.temps_allocated(),
            labels = self.names.labels_allocated(),
            "lowered program to TAC"
        );
        self.code
    }

    fn emit(&mut self, instruction: Instruction) {
        tracing::trace!(index = self.code.len(), %instruction, "emit");
        self.code.push(instruction);
    }

    fn lower_function(&mut self, function: &'ctx FunctionDecl) {
        self.function = Some(function.name.name.as_str());
        self.emit(Instruction::Label(Label::function(function.name.name.as_str())));
        // Parameters arrive through `param` slots; no binding code is emitted.
        self.lower_block(&function.body);
        self.function = None;
    }

    fn lower_block(&mut self, block: &Block) {
        for stmt in &block.stmts {
            self.lower_stmt(stmt);
        }
    }

    /// Lower a single statement
    pub fn lower_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.lower_var_decl(decl),
            Stmt::Assign(assign) => self.lower_assign(assign),
            Stmt::If {
                cond,
                then_block,
                else_block,
            } => self.lower_if(cond, then_block, else_block.as_ref()),
            Stmt::While { cond, body } => self.lower_loop(cond, body, None),
            Stmt::For {
                init,
                cond,
                update,
                body,
            } => {
                match init {
                    ForInit::Decl(decl) => self.lower_var_decl(decl),
                    ForInit::Assign(assign) => self.lower_assign(assign),
                }
                self.lower_loop(cond, body, Some(update));
            }
            Stmt::Return(value) => {
                let value = value
                    .as_ref()
                    .map_or(Operand::Empty, |expr| self.lower_expr(expr));
                self.emit(Instruction::assign(Dest::Return, value));
            }
            Stmt::Call(call) => {
                // The result temporary is simply dropped.
                self.lower_call(call);
            }
            Stmt::Block(block) => self.lower_block(block),
        }
    }

    /// `if !cond goto Lelse; then; goto Lend; Lelse: [else]; Lend:`
    ///
    /// Both labels are emitted even without an `else` block.
    fn lower_if(&mut self, cond: &Expr, then_block: &Block, else_block: Option<&Block>) {
        let cond = self.lower_expr(cond);
        let else_label = self.names.new_label();
        let end_label = self.names.new_label();

        self.emit(Instruction::IfFalseGoto {
            cond,
            label: else_label.clone(),
        });
        self.lower_block(then_block);
        self.emit(Instruction::Goto(end_label.clone()));
        self.emit(Instruction::Label(else_label));
        if let Some(else_block) = else_block {
            self.lower_block(else_block);
        }
        self.emit(Instruction::Label(end_label));
    }

    /// `Lstart: cond; if !cond goto Lend; body; [update]; goto Lstart; Lend:`
    fn lower_loop(&mut self, cond: &Expr, body: &Block, update: Option<&Assign>) {
        let start_label = self.names.new_label();
        let end_label = self.names.new_label();

        self.emit(Instruction::Label(start_label.clone()));
        let cond = self.lower_expr(cond);
        self.emit(Instruction::IfFalseGoto {
            cond,
            label: end_label.clone(),
        });
        self.lower_block(body);
        if let Some(update) = update {
            self.lower_assign(update);
        }
        self.emit(Instruction::Goto(start_label));
        self.emit(Instruction::Label(end_label));
    }

    fn lower_var_decl(&mut self, decl: &VarDecl) {
        // Declarations without an initializer produce no code.
        if let Some(init) = &decl.init {
            let value = self.lower_expr(init);
            let name = self.resolve(&decl.name);
            self.emit(Instruction::assign(Dest::Var(name), value));
        }
    }

    fn lower_assign(&mut self, assign: &Assign) {
        let value = self.lower_expr(&assign.value);
        let name = self.resolve(&assign.target);
        self.emit(Instruction::assign(Dest::Var(name), value));
    }

    /// Lower an expression and return the operand holding its value
    ///
    /// Identifiers and literals are returned as-is without emitting anything.
    pub fn lower_expr(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Binary { op, left, right } => {
                let left = self.lower_expr(left);
                let right = self.lower_expr(right);
                let dest = self.names.new_temp();
                self.emit(Instruction::BinaryOp {
                    dest,
                    op: *op,
                    left,
                    right,
                });
                Operand::Temp(dest)
            }
            Expr::Ident(ident) => Operand::Var(self.resolve(ident)),
            Expr::Int(value) => Operand::Const(*value),
            Expr::Paren(inner) => self.lower_expr(inner),
            Expr::Call(call) => self.lower_call(call),
        }
    }

    /// Arguments are passed through `param`; the call itself emits nothing and
    /// its result is a fresh temporary.
    fn lower_call(&mut self, call: &Call) -> Operand {
        let callee = self.resolve(&call.callee);
        for arg in &call.args {
            let value = self.lower_expr(arg);
            self.emit(Instruction::assign(Dest::Param, value));
        }
        let result = self.names.new_temp();
        tracing::trace!(%callee, args = call.args.len(), %result, "lowered call");
        Operand::Temp(result)
    }

    /// Name a use site lowers to: the symbol it resolves to in the enclosing
    /// function or the global scope, or the name as written when none does
    fn resolve(&self, ident: &Ident) -> String {
        let function = self.function.unwrap_or(GLOBAL_SCOPE);
        let Some(symbol) = self
            .table
            .lookup_exact(function, &ident.name)
            .or_else(|| self.table.lookup_exact(GLOBAL_SCOPE, &ident.name))
        else {
            tracing::warn!(
                name = %ident.name,
                function,
                pos = %ident.pos,
                "name has no symbol; lowering it as written"
            );
            return ident.name.clone();
        };

        tracing::trace!(
            name = %symbol.name,
            scope = %symbol.scope,
            category = %symbol.category,
            "resolved"
        );
        symbol.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use ml_sema::SemanticAnalyzer;
    use ml_syntax::BinOp;
    use ml_syntax::build::*;
    use ml_tac::Listing;

    fn lower(program: &Program) -> String {
        let analysis = SemanticAnalyzer::analyze(program);
        assert!(!analysis.has_errors(), "{:?}", analysis.errors);
        Listing(&lower_program(program, &analysis.table)).to_string()
    }

    #[test]
    fn test_if_else() {
        let program = program(vec![function(
            "main",
            vec![
                decl("x", None),
                if_else(
                    int(1),
                    vec![assign("x", int(2))],
                    Some(vec![assign("x", int(3))]),
                ),
                ret(Some(var("x"))),
            ],
        )]);

        expect![[r"
            // Three-address code

            000: func_main:
            001: if !1 goto L0
            002: x = 2
            003: goto L1
            004: L0:
            005: x = 3
            006: L1:
            007: return = x
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_if_without_else_keeps_both_labels() {
        let program = program(vec![function_with_params(
            "f",
            &["a"],
            vec![
                if_else(
                    binary(BinOp::Gt, var("a"), int(0)),
                    vec![ret(Some(var("a")))],
                    None,
                ),
                ret(Some(int(0))),
            ],
        )]);

        expect![[r"
            // Three-address code

            000: func_f:
            001: t0 = a > 0
            002: if !t0 goto L0
            003: return = a
            004: goto L1
            005: L0:
            006: L1:
            007: return = 0
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_while_loop() {
        let program = program(vec![function(
            "main",
            vec![
                decl("i", Some(int(0))),
                while_loop(
                    binary(BinOp::Lt, var("i"), int(10)),
                    vec![assign("i", binary(BinOp::Add, var("i"), int(1)))],
                ),
                ret(None),
            ],
        )]);

        expect![[r"
            // Three-address code

            000: func_main:
            001: i = 0
            002: L0:
            003: t0 = i < 10
            004: if !t0 goto L1
            005: t1 = i + 1
            006: i = t1
            007: goto L0
            008: L1:
            009: return =
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_for_loop_runs_update_after_body() {
        let program = program(vec![function(
            "main",
            vec![
                decl("s", Some(int(0))),
                for_loop(
                    ForInit::Decl(var_decl("i", Some(int(0)))),
                    binary(BinOp::Lt, var("i"), int(3)),
                    assignment("i", binary(BinOp::Add, var("i"), int(1))),
                    vec![assign("s", binary(BinOp::Add, var("s"), var("i")))],
                ),
                ret(Some(var("s"))),
            ],
        )]);

        expect![[r"
            // Three-address code

            000: func_main:
            001: s = 0
            002: i = 0
            003: L0:
            004: t0 = i < 3
            005: if !t0 goto L1
            006: t1 = s + i
            007: s = t1
            008: t2 = i + 1
            009: i = t2
            010: goto L0
            011: L1:
            012: return = s
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_calls_pass_arguments_through_param() {
        let program = program(vec![
            function_with_params(
                "add",
                &["a", "b"],
                vec![ret(Some(binary(BinOp::Add, var("a"), var("b"))))],
            ),
            function(
                "main",
                vec![
                    decl(
                        "r",
                        Some(call(
                            "add",
                            vec![int(1), binary(BinOp::Mul, int(2), int(3))],
                        )),
                    ),
                    call_stmt("add", vec![var("r"), int(0)]),
                    ret(Some(var("r"))),
                ],
            ),
        ]);

        expect![[r"
            // Three-address code

            000: func_add:
            001: t0 = a + b
            002: return = t0
            003: func_main:
            004: param = 1
            005: t1 = 2 * 3
            006: param = t1
            007: r = t2
            008: param = r
            009: param = 0
            010: return = r
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_parens_and_nesting() {
        // return (a + b) * (a - b);
        let program = program(vec![function_with_params(
            "f",
            &["a", "b"],
            vec![ret(Some(binary(
                BinOp::Mul,
                paren(binary(BinOp::Add, var("a"), var("b"))),
                paren(binary(BinOp::Sub, var("a"), var("b"))),
            )))],
        )]);

        expect![[r"
            // Three-address code

            000: func_f:
            001: t0 = a + b
            002: t1 = a - b
            003: t2 = t0 * t1
            004: return = t2
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_counters_span_functions() {
        let body = || {
            vec![
                while_loop(int(0), vec![Stmt::Block(block(Vec::new()))]),
                ret(Some(int(0))),
            ]
        };
        let program = program(vec![function("f", body()), function("main", body())]);

        expect![[r"
            // Three-address code

            000: func_f:
            001: L0:
            002: if !0 goto L1
            003: goto L0
            004: L1:
            005: return = 0
            006: func_main:
            007: L2:
            008: if !0 goto L3
            009: goto L2
            010: L3:
            011: return = 0
        "]]
        .assert_eq(&lower(&program));
    }

    #[test]
    fn test_unresolved_names_are_lowered_as_written() {
        let program = program(vec![function("main", vec![ret(Some(var("ghost")))])]);
        let table = SymbolTable::new();

        let code = lower_program(&program, &table);
        assert_eq!(
            code,
            [
                Instruction::Label(Label::function("main")),
                Instruction::assign(Dest::Return, Operand::Var("ghost".to_string())),
            ]
        );
    }

    #[test]
    fn test_declaration_without_initializer_emits_nothing() {
        let program = program(vec![function("main", vec![decl("x", None)])]);
        let analysis = SemanticAnalyzer::analyze(&program);

        let code = lower_program(&program, &analysis.table);
        assert_eq!(code, [Instruction::Label(Label::function("main"))]);
    }
}
