//! Unreachable instruction elimination

use ml_tac::{Instruction, Label};
use rustc_hash::FxHashMap;

/// Keep only instructions reachable from index 0 or from `func_<entry>`
///
/// Reachability follows fall-through and jumps: `goto` continues only at its
/// target, a conditional branch at both its target and the next instruction,
/// and `return = ...` ends the run. Jumps to labels that do not exist lead
/// nowhere. Kept instructions stay in order.
pub fn eliminate(code: &[Instruction], entry: &str) -> Vec<Instruction> {
    let labels: FxHashMap<&Label, usize> = code
        .iter()
        .enumerate()
        .filter_map(|(index, instruction)| match instruction {
            Instruction::Label(label) => Some((label, index)),
            _ => None,
        })
        .collect();

    let mut reachable = vec![false; code.len()];
    let mut worklist = vec![0];
    if let Some(&index) = labels.get(&Label::function(entry)) {
        worklist.push(index);
    }

    while let Some(index) = worklist.pop() {
        if index >= code.len() || reachable[index] {
            continue;
        }
        reachable[index] = true;

        let instruction = &code[index];
        if let Some(target) = instruction.jump_target() {
            worklist.extend(labels.get(target).copied());
        }
        let ends_run = matches!(instruction, Instruction::Goto(_)) || instruction.is_return();
        if !ends_run {
            worklist.push(index + 1);
        }
    }

    let kept: Vec<Instruction> = code
        .iter()
        .zip(&reachable)
        .filter(|(_, keep)| **keep)
        .map(|(instruction, _)| instruction.clone())
        .collect();

    tracing::trace!(
        removed = code.len() - kept.len(),
        entry,
        "dead code eliminated"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_tac::{Dest, Operand};

    fn set(name: &str, value: i64) -> Instruction {
        Instruction::assign(Dest::Var(name.to_string()), Operand::Const(value))
    }

    fn ret(value: i64) -> Instruction {
        Instruction::assign(Dest::Return, Operand::Const(value))
    }

    #[test]
    fn test_code_after_return_is_removed() {
        let code = [
            Instruction::Label(Label::function("main")),
            set("x", 1),
            ret(0),
            set("y", 2),
        ];
        assert_eq!(eliminate(&code, "main"), &code[..3]);
    }

    #[test]
    fn test_goto_skips_to_target() {
        let code = [
            Instruction::Goto(Label::Block(0)),
            set("skipped", 1),
            Instruction::Label(Label::Block(0)),
            ret(0),
        ];
        assert_eq!(
            eliminate(&code, "main"),
            [code[0].clone(), code[2].clone(), code[3].clone()]
        );
    }

    #[test]
    fn test_entry_function_is_reachable() {
        // `helper` returns before `main` starts; `main` is reached as the entry
        let code = [
            Instruction::Label(Label::function("helper")),
            ret(1),
            Instruction::Label(Label::function("main")),
            ret(0),
            Instruction::Label(Label::function("unused")),
            ret(2),
        ];

        assert_eq!(eliminate(&code, "main"), &code[..4]);
        assert_eq!(
            eliminate(&code, "unused"),
            [
                code[0].clone(),
                code[1].clone(),
                code[4].clone(),
                code[5].clone()
            ]
        );
    }

    #[test]
    fn test_unknown_jump_target_leads_nowhere() {
        let code = [
            Instruction::IfFalseGoto {
                cond: Operand::Var("c".to_string()),
                label: Label::Block(9),
            },
            Instruction::Goto(Label::Block(7)),
            set("after", 1),
        ];
        assert_eq!(eliminate(&code, "main"), &code[..2]);
    }

    #[test]
    fn test_order_preserved_and_idempotent() {
        let code = [
            Instruction::Label(Label::function("main")),
            Instruction::Goto(Label::Block(1)),
            Instruction::Label(Label::Block(0)),
            set("x", 3),
            ret(0),
            Instruction::Label(Label::Block(1)),
            Instruction::Goto(Label::Block(0)),
            set("dead", 4),
        ];

        let once = eliminate(&code, "main");
        assert_eq!(once, &code[..7]);
        assert_eq!(eliminate(&once, "main"), once);
    }

    #[test]
    fn test_empty_input() {
        assert!(eliminate(&[], "main").is_empty());
    }
}
