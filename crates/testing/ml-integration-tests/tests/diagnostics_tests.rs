//! Semantic diagnostics as seen through the driver

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use expect_test::expect;
    use ml_driver::{CompileError, CompileOptions, compile};
    use ml_integration_tests::compile_default;
    use ml_sema::{SemanticError, SemanticWarning};
    use ml_syntax::build::*;
    use ml_syntax::{BinOp, Expr, Stmt};
    use std::fmt::Display;

    fn messages<Message: Display>(items: &[Message]) -> String {
        items.iter().map(|item| format!("{item}\n")).collect()
    }

    #[test]
    fn test_errors_abort_and_keep_warnings() {
        // int main() {
        //     int x = 1;
        //     int x = 2;
        //     int unused;
        //     return y;
        // }
        let mut first = var_decl("x", Some(int(1)));
        first.name = ident_at("x", 2, 8);
        let mut second = var_decl("x", Some(int(2)));
        second.name = ident_at("x", 3, 8);
        let mut unused = var_decl("unused", None);
        unused.name = ident_at("unused", 4, 8);

        let program = program(vec![function(
            "main",
            vec![
                Stmt::VarDecl(first),
                Stmt::VarDecl(second),
                Stmt::VarDecl(unused),
                ret(Some(Expr::Ident(ident_at("y", 5, 11)))),
            ],
        )]);

        let failure = compile(&program, &CompileOptions::default()).err();
        assert!(failure.is_some());
        let errors = failure.as_ref().map_or(&[][..], CompileError::errors);
        let warnings = failure.as_ref().map_or(&[][..], CompileError::warnings);

        expect![[r"
            3:8: 'x' is already declared in scope 'main' (first declared at 2:8)
            5:11: 'y' is not declared (in scope 'main')
        "]]
        .assert_eq(&messages(errors));

        expect![[r"
            2:8: 'x' is declared but never used (in scope 'main')
            4:8: 'unused' is declared but never used (in scope 'main')
        "]]
        .assert_eq(&messages(warnings));
    }

    #[test]
    fn test_undefined_call_target() {
        let program = program(vec![function("main", vec![call_stmt("print", vec![int(1)])])]);

        let result = compile_default(&program);
        let failure = result
            .as_ref()
            .err()
            .and_then(|error| error.downcast_ref::<CompileError>());
        assert!(matches!(
            failure.map(CompileError::errors),
            Some([SemanticError::UndefinedReference { name, .. }]) if name == "print"
        ));
    }

    #[test]
    fn test_warnings_do_not_abort() -> Result<()> {
        // int main() { int a; int b = a + 1; return 0; }
        let program = program(vec![function(
            "main",
            vec![
                decl("a", None),
                decl("b", Some(binary(BinOp::Add, var("a"), int(1)))),
                ret(Some(int(0))),
            ],
        )]);

        let output = compile_default(&program)?;
        let kinds: Vec<(&str, &str)> = output
            .warnings
            .iter()
            .map(|warning| match warning {
                SemanticWarning::UninitializedSymbol { name, .. } => {
                    ("uninitialized", name.as_str())
                }
                SemanticWarning::UnusedSymbol { name, .. } => ("unused", name.as_str()),
            })
            .collect();
        assert_eq!(kinds, [("uninitialized", "a"), ("unused", "b")]);
        assert_eq!(output.stats().warnings, 2);
        Ok(())
    }

    #[test]
    fn test_locals_of_every_function_are_reported() -> Result<()> {
        let program = program(vec![
            function_with_params("f", &["n"], vec![ret(Some(var("n")))]),
            function(
                "main",
                vec![
                    decl("n", Some(call("f", vec![int(3)]))),
                    ret(Some(var("n"))),
                ],
            ),
        ]);

        let output = compile_default(&program)?;
        // Same name in two functions is not a redeclaration
        let scopes: Vec<(&str, &str)> = output
            .symbol_report()
            .symbols()
            .iter()
            .map(|symbol| (symbol.scope.as_str(), symbol.name.as_str()))
            .collect();
        assert_eq!(
            scopes,
            [("global", "f"), ("f", "n"), ("global", "main"), ("main", "n")]
        );
        Ok(())
    }
}
