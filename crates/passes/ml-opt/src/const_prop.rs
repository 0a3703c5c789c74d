//! Constant propagation

use ml_tac::{Instruction, Operand};
use rustc_hash::FxHashMap;

/// Replace reads of names last seen assigned a literal
///
/// The walk is a single left-to-right scan. `x = <literal>` records `x` and is
/// kept as is; every other instruction has its read operands rewritten.
/// Nothing is ever forgotten: a later non-literal assignment to `x` or a
/// branch does not invalidate the recorded value.
pub fn propagate(code: &[Instruction]) -> Vec<Instruction> {
    let mut env = Constants::default();

    let propagated: Vec<Instruction> = code
        .iter()
        .map(|instruction| match instruction {
            Instruction::Assign {
                dest,
                value: Operand::Const(value),
            } => {
                if let Some(slot) = dest.as_operand() {
                    env.known.insert(slot, *value);
                }
                instruction.clone()
            }
            Instruction::Assign { dest, value } => {
                Instruction::assign(dest.clone(), env.rewrite(value))
            }
            Instruction::BinaryOp {
                dest,
                op,
                left,
                right,
            } => Instruction::BinaryOp {
                dest: *dest,
                op: *op,
                left: env.rewrite(left),
                right: env.rewrite(right),
            },
            Instruction::IfFalseGoto { cond, label } => Instruction::IfFalseGoto {
                cond: env.rewrite(cond),
                label: label.clone(),
            },
            Instruction::Label(_) | Instruction::Goto(_) => instruction.clone(),
        })
        .collect();

    tracing::trace!(
        substituted = env.substituted,
        known = env.known.len(),
        "constants propagated"
    );
    propagated
}

/// Literal values recorded so far, keyed by variable or temporary
#[derive(Default)]
struct Constants {
    known: FxHashMap<Operand, i64>,
    substituted: usize,
}

impl Constants {
    fn rewrite(&mut self, operand: &Operand) -> Operand {
        let value = match operand {
            Operand::Var(_) | Operand::Temp(_) => self.known.get(operand).copied(),
            Operand::Const(_) | Operand::Empty => None,
        };

        let Some(value) = value else {
            return operand.clone();
        };
        self.substituted += 1;
        Operand::Const(value)
    }
}
