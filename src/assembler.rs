//! Orchestrator: prelude seed, register initialization, codegen over the
//! instruction list, dispatch table. Fail-fast — the first error aborts
//! the whole run and nothing is emitted.

use std::collections::HashMap;

use tracing::error;

use crate::codegen::{self, ActionTable};
use crate::expr::Expr;
use crate::latex::{self, Template};
use crate::preprocess;

#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("Invalid command at line {lineno}")]
    MalformedLine { lineno: u32 },
    #[error("Invalid arguments for {mnemonic}: Expected {expected} arguments, got {got} (line {lineno})")]
    ArityMismatch {
        mnemonic: &'static str,
        expected: usize,
        got: usize,
        lineno: u32,
    },
    #[error("Invalid command {name} ({lineno})")]
    UnknownCommand { name: String, lineno: u32 },
    #[error("Undefined label {label} ({lineno})")]
    UndefinedLabel { label: String, lineno: u32 },
    #[error("Error while transforming command {mnemonic} ({lineno})")]
    Compile {
        mnemonic: &'static str,
        lineno: u32,
        #[source]
        source: Box<AsmError>,
    },
}

/// A fully assembled program plus the tables the CLI reports.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub exprs: Vec<Expr>,
    /// Bare register names in first-reference order.
    pub registers: Vec<String>,
    pub labels: HashMap<String, u32>,
    /// (action identifier, source line) in minting order.
    pub action_lines: Vec<(String, u32)>,
}

impl Assembly {
    /// Expression texts joined by newline, the form Desmos ingests.
    pub fn latex(&self) -> String {
        self.exprs
            .iter()
            .map(|e| e.latex.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Assemble a source file. `prelude` seeds the output verbatim.
pub fn assemble(source: &str, prelude: Vec<Expr>) -> Result<Assembly, AsmError> {
    let program = preprocess::scan(source)?;
    let mut exprs = prelude;

    for name in &program.registers {
        exprs.push(Expr::new(latex::render(&Template::RegisterInit {
            name: name.clone(),
        })));
    }

    let mut actions = ActionTable::new();
    for instr in &program.instructions {
        let expr =
            codegen::compile(instr, &program, &mut actions).map_err(|source| {
                error!(
                    mnemonic = instr.mnemonic.name(),
                    lineno = instr.lineno,
                    %source,
                    "codegen failed"
                );
                AsmError::Compile {
                    mnemonic: instr.mnemonic.name(),
                    lineno: instr.lineno,
                    source: Box::new(source),
                }
            })?;
        exprs.push(expr);
    }

    exprs.push(Expr::new(latex::render(&actions.dispatch())));

    let action_lines = actions
        .entries()
        .iter()
        .map(|e| (e.action.clone(), e.lineno))
        .collect();

    Ok(Assembly {
        exprs,
        registers: program.registers,
        labels: program.labels,
        action_lines,
    })
}
