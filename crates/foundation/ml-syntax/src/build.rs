//! Shorthand constructors for syntax trees
//!
//! The front-end builds trees with positions for every name. Tests and
//! tools that construct trees by hand use these helpers instead; names built
//! without an explicit position get `Pos::default()`.

use crate::{
    Assign, BinOp, Block, Call, Expr, ForInit, FunctionDecl, Ident, Param, Program, Stmt, VarDecl,
};
use ml_span::Pos;

/// A name at the default position
pub fn ident(name: &str) -> Ident {
    Ident::new(name, Pos::default())
}

/// A name at `line:column`
pub fn ident_at(name: &str, line: u32, column: u32) -> Ident {
    Ident::new(name, Pos::new(line, column))
}

/// A program from its functions
pub fn program(functions: Vec<FunctionDecl>) -> Program {
    Program { functions }
}

/// `int name() { stmts }`
pub fn function(name: &str, stmts: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        name: ident(name),
        return_type: "int".to_string(),
        params: Vec::new(),
        body: block(stmts),
    }
}

/// `int name(int p0, int p1, ...) { stmts }`
pub fn function_with_params(name: &str, params: &[&str], stmts: Vec<Stmt>) -> FunctionDecl {
    FunctionDecl {
        params: params
            .iter()
            .map(|param| Param {
                name: ident(param),
                ty: "int".to_string(),
            })
            .collect(),
        ..function(name, stmts)
    }
}

/// `{ stmts }`
pub fn block(stmts: Vec<Stmt>) -> Block {
    Block { stmts }
}

/// `int name [= init];` as a declaration node
pub fn var_decl(name: &str, init: Option<Expr>) -> VarDecl {
    VarDecl {
        name: ident(name),
        ty: "int".to_string(),
        constant: false,
        init,
    }
}

/// `int name [= init];` as a statement
pub fn decl(name: &str, init: Option<Expr>) -> Stmt {
    Stmt::VarDecl(var_decl(name, init))
}

/// `target = value` as an assignment node, for `for` headers
pub fn assignment(target: &str, value: Expr) -> Assign {
    Assign {
        target: ident(target),
        value,
    }
}

/// `target = value;` as a statement
pub fn assign(target: &str, value: Expr) -> Stmt {
    Stmt::Assign(assignment(target, value))
}

/// `if (cond) { then } [else { else }]`
pub fn if_else(cond: Expr, then_stmts: Vec<Stmt>, else_stmts: Option<Vec<Stmt>>) -> Stmt {
    Stmt::If {
        cond,
        then_block: block(then_stmts),
        else_block: else_stmts.map(block),
    }
}

/// `while (cond) { body }`
pub fn while_loop(cond: Expr, body: Vec<Stmt>) -> Stmt {
    Stmt::While {
        cond,
        body: block(body),
    }
}

/// `for (init; cond; update) { body }`
pub fn for_loop(init: ForInit, cond: Expr, update: Assign, body: Vec<Stmt>) -> Stmt {
    Stmt::For {
        init,
        cond,
        update,
        body: block(body),
    }
}

/// `return [value];`
pub fn ret(value: Option<Expr>) -> Stmt {
    Stmt::Return(value)
}

/// `callee(args);` as a statement
pub fn call_stmt(callee: &str, args: Vec<Expr>) -> Stmt {
    Stmt::Call(Call {
        callee: ident(callee),
        args,
    })
}

/// Integer literal
pub fn int(value: i64) -> Expr {
    Expr::Int(value)
}

/// Variable read
pub fn var(name: &str) -> Expr {
    Expr::Ident(ident(name))
}

/// `(inner)`
pub fn paren(inner: Expr) -> Expr {
    Expr::Paren(Box::new(inner))
}

/// `left op right`
pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

/// `callee(args)` as an expression
pub fn call(callee: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(Call {
        callee: ident(callee),
        args,
    })
}
