//! Constant folding

use ml_tac::{BinOp, Dest, Instruction, Operand};

/// Evaluate arithmetic whose operands are both literals
///
/// `t = a op b` becomes `t = r` for `+ - * / %`. Comparisons and logical
/// operators are never folded. Division or remainder by zero and results that
/// overflow an `i64` are left as they are.
pub fn fold(code: &[Instruction]) -> Vec<Instruction> {
    let mut folded = 0usize;

    let result: Vec<Instruction> = code
        .iter()
        .map(|instruction| {
            fold_instruction(instruction)
                .inspect(|_| folded += 1)
                .unwrap_or_else(|| instruction.clone())
        })
        .collect();

    tracing::trace!(folded, "constants folded");
    result
}

fn fold_instruction(instruction: &Instruction) -> Option<Instruction> {
    let Instruction::BinaryOp {
        dest,
        op,
        left: Operand::Const(left),
        right: Operand::Const(right),
    } = instruction
    else {
        return None;
    };
    if !op.is_arithmetic() {
        return None;
    }

    let value = evaluate(*op, *left, *right)?;
    Some(Instruction::assign(Dest::Temp(*dest), Operand::Const(value)))
}

/// Value of `left op right` for an arithmetic operator, if it fits an `i64`
///
/// Non-arithmetic operators have no compile-time value.
#[must_use]
pub fn evaluate(op: BinOp, left: i64, right: i64) -> Option<i64> {
    match op {
        BinOp::Add => left.checked_add(right),
        BinOp::Sub => left.checked_sub(right),
        BinOp::Mul => left.checked_mul(right),
        BinOp::Div => left.checked_div(right),
        BinOp::Rem => left.checked_rem(right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_tac::Temp;

    fn binary(dest: u32, op: BinOp, left: Operand, right: Operand) -> Instruction {
        Instruction::BinaryOp {
            dest: Temp(dest),
            op,
            left,
            right,
        }
    }

    #[test]
    fn test_folds_literal_arithmetic() {
        let code = [
            binary(0, BinOp::Add, Operand::Const(2), Operand::Const(3)),
            binary(1, BinOp::Rem, Operand::Const(-7), Operand::Const(2)),
        ];

        let rendered: Vec<String> = fold(&code).iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["t0 = 5", "t1 = -1"]);
    }

    #[test]
    fn test_division_by_zero_is_kept() {
        let code = [
            binary(1, BinOp::Div, Operand::Const(7), Operand::Const(0)),
            binary(2, BinOp::Rem, Operand::Const(7), Operand::Const(0)),
        ];
        assert_eq!(fold(&code), code);
    }

    #[test]
    fn test_overflow_is_kept() {
        let code = [
            binary(0, BinOp::Add, Operand::Const(i64::MAX), Operand::Const(1)),
            binary(1, BinOp::Div, Operand::Const(i64::MIN), Operand::Const(-1)),
        ];
        assert_eq!(fold(&code), code);
    }

    #[test]
    fn test_only_literal_arithmetic_is_folded() {
        let code = [
            binary(0, BinOp::Lt, Operand::Const(1), Operand::Const(2)),
            binary(2, BinOp::And, Operand::Const(1), Operand::Const(0)),
            binary(1, BinOp::Add, Operand::Var("x".to_string()), Operand::Const(2)),
            Instruction::assign(Dest::Var("x".to_string()), Operand::Const(1)),
        ];
        assert_eq!(fold(&code), code);
    }
}
