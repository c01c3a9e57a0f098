//! Second pass: one generation rule per mnemonic. Each rule checks arity,
//! resolves operands against the scanned program, mints an action
//! identifier from the table passed in by the orchestrator, and yields a
//! single expression.

use crate::assembler::AsmError;
use crate::expr::Expr;
use crate::instructions::{Arity, Instruction, Mnemonic};
use crate::latex::{self, ArithOp, Operand, Template, TrigFn};
use crate::preprocess::{Program, REGISTER_SIGIL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionEntry {
    pub action: String,
    pub lineno: u32,
}

/// Allocator for synthetic action identifiers plus the dispatch-table
/// bookkeeping. Owned by the orchestrator and threaded through codegen so
/// the counter is explicit pipeline state.
#[derive(Debug, Default)]
pub struct ActionTable {
    next: usize,
    entries: Vec<ActionEntry>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in minting order.
    pub fn entries(&self) -> &[ActionEntry] {
        &self.entries
    }

    fn mint(&mut self, lineno: u32) -> String {
        let action = latex::action(self.next);
        self.next += 1;
        self.entries.push(ActionEntry {
            action: action.clone(),
            lineno,
        });
        action
    }

    /// The `F_{a}` dispatch template, branches sorted by source line.
    pub fn dispatch(&self) -> Template {
        let mut entries: Vec<(String, u32)> = self
            .entries
            .iter()
            .map(|e| (e.action.clone(), e.lineno))
            .collect();
        entries.sort_by_key(|&(_, lineno)| lineno);
        Template::Dispatch { entries }
    }
}

fn operand(arg: &str) -> Operand {
    match arg.strip_prefix(REGISTER_SIGIL) {
        Some(name) => Operand::Register(name.to_string()),
        None => Operand::Literal(arg.to_string()),
    }
}

fn check_arity(instr: &Instruction) -> Result<(), AsmError> {
    match instr.mnemonic.arity() {
        Arity::Any => Ok(()),
        Arity::Exact(expected) if instr.args.len() == expected => Ok(()),
        Arity::Exact(expected) => Err(AsmError::ArityMismatch {
            mnemonic: instr.mnemonic.name(),
            expected,
            got: instr.args.len(),
            lineno: instr.lineno,
        }),
    }
}

fn resolve_target(label: &str, lineno: u32, program: &Program) -> Result<u32, AsmError> {
    program
        .resolve_label(label)
        .ok_or_else(|| AsmError::UndefinedLabel {
            label: label.to_string(),
            lineno,
        })
}

fn arith(op: ArithOp, instr: &Instruction, actions: &mut ActionTable) -> Template {
    Template::Arith {
        action: actions.mint(instr.lineno),
        op,
        dst: operand(&instr.args[0]),
        src: operand(&instr.args[1]),
    }
}

fn trig(func: TrigFn, instr: &Instruction, actions: &mut ActionTable) -> Template {
    Template::Trig {
        action: actions.mint(instr.lineno),
        func,
        dst: operand(&instr.args[0]),
        src: operand(&instr.args[1]),
    }
}

fn cond_jump(
    negated: bool,
    instr: &Instruction,
    program: &Program,
    actions: &mut ActionTable,
) -> Result<Template, AsmError> {
    let target = resolve_target(&instr.args[2], instr.lineno, program)?;
    Ok(Template::CondJump {
        action: actions.mint(instr.lineno),
        lhs: operand(&instr.args[0]),
        rhs: operand(&instr.args[1]),
        negated,
        target,
    })
}

/// Compile one instruction to one expression. Must only run after the scan
/// pass has seen the whole source.
pub fn compile(
    instr: &Instruction,
    program: &Program,
    actions: &mut ActionTable,
) -> Result<Expr, AsmError> {
    check_arity(instr)?;

    let template = match instr.mnemonic {
        Mnemonic::Mov => Template::Assign {
            action: actions.mint(instr.lineno),
            dst: operand(&instr.args[0]),
            src: operand(&instr.args[1]),
        },
        Mnemonic::Add => arith(ArithOp::Add, instr, actions),
        Mnemonic::Sub => arith(ArithOp::Sub, instr, actions),
        Mnemonic::Mul => arith(ArithOp::Mul, instr, actions),
        Mnemonic::Div => arith(ArithOp::Div, instr, actions),
        Mnemonic::Sin => trig(TrigFn::Sin, instr, actions),
        Mnemonic::Cos => trig(TrigFn::Cos, instr, actions),
        Mnemonic::Tan => trig(TrigFn::Tan, instr, actions),
        Mnemonic::Je => cond_jump(false, instr, program, actions)?,
        Mnemonic::Jne => cond_jump(true, instr, program, actions)?,
        Mnemonic::Jmp => {
            let target = resolve_target(&instr.args[0], instr.lineno, program)?;
            Template::Jump {
                action: actions.mint(instr.lineno),
                target,
            }
        }
        // No action identifier: lit does not participate in the dispatch
        // table.
        Mnemonic::Lit => Template::Literal {
            text: instr.args.join(" "),
        },
    };

    Ok(Expr::new(latex::render(&template)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn instr(mnemonic: Mnemonic, args: &[&str], lineno: u32) -> Instruction {
        Instruction {
            mnemonic,
            args: args.iter().map(|a| a.to_string()).collect(),
            lineno,
        }
    }

    #[test]
    fn action_identifiers_are_strictly_increasing() {
        let program = Program::default();
        let mut actions = ActionTable::new();
        for lineno in 1..=3 {
            compile(&instr(Mnemonic::Add, &["$a", "1"], lineno), &program, &mut actions)
                .unwrap();
        }
        let minted: Vec<_> = actions.entries().iter().map(|e| e.action.clone()).collect();
        assert_eq!(
            minted,
            vec![
                "I_{nternalAction0}",
                "I_{nternalAction1}",
                "I_{nternalAction2}"
            ]
        );
    }

    #[test]
    fn dispatch_sorts_by_source_line() {
        let mut actions = ActionTable::new();
        actions.mint(7);
        actions.mint(2);
        actions.mint(5);
        let Template::Dispatch { entries } = actions.dispatch() else {
            panic!("dispatch template expected");
        };
        let linenos: Vec<u32> = entries.iter().map(|&(_, l)| l).collect();
        assert_eq!(linenos, vec![2, 5, 7]);
    }

    #[test]
    fn lit_mints_no_action() {
        let program = Program::default();
        let mut actions = ActionTable::new();
        let expr = compile(
            &instr(Mnemonic::Lit, &["hello", "world"], 1),
            &program,
            &mut actions,
        )
        .unwrap();
        assert_eq!(expr.latex, "hello world");
        assert!(actions.entries().is_empty());
    }

    #[test]
    fn arity_error_names_expected_and_got() {
        let program = Program::default();
        let mut actions = ActionTable::new();
        let err = compile(&instr(Mnemonic::Mov, &["$a"], 4), &program, &mut actions)
            .unwrap_err();
        match err {
            AsmError::ArityMismatch {
                mnemonic,
                expected,
                got,
                lineno,
            } => {
                assert_eq!(mnemonic, "mov");
                assert_eq!(expected, 2);
                assert_eq!(got, 1);
                assert_eq!(lineno, 4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn undefined_label_is_fatal() {
        let program = Program::default();
        let mut actions = ActionTable::new();
        let err = compile(
            &instr(Mnemonic::Jmp, &["nowhere"], 2),
            &program,
            &mut actions,
        )
        .unwrap_err();
        assert!(matches!(err, AsmError::UndefinedLabel { lineno: 2, .. }));
    }
}
