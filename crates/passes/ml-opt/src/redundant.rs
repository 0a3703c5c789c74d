//! Self-assignment removal

use ml_tac::Instruction;

/// Drop `x = x` and `tN = tN`
pub fn eliminate(code: &[Instruction]) -> Vec<Instruction> {
    code.iter()
        .filter(|instruction| !is_self_assignment(instruction))
        .cloned()
        .collect()
}

fn is_self_assignment(instruction: &Instruction) -> bool {
    match instruction {
        Instruction::Assign { dest, value } => dest.as_operand().as_ref() == Some(value),
        _ => false,
    }
}
