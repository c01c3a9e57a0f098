//! First pass over the source: comment stripping, label collection,
//! register discovery, mnemonic resolution. Codegen runs as a separate
//! second pass over the result, which is what makes forward jump targets
//! work — every label is known before any jump is compiled, and label
//! lines never reach codegen at all.

use std::collections::HashMap;

use tracing::debug;

use crate::assembler::AsmError;
use crate::instructions::{Instruction, Mnemonic};

pub const COMMENT_CHAR: char = ';';
pub const REGISTER_SIGIL: char = '$';
pub const LABEL_TERMINATOR: char = ':';

/// Everything the scan pass learned about a source file.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub instructions: Vec<Instruction>,
    /// Label name to the 1-based line of its declaration.
    pub labels: HashMap<String, u32>,
    /// Bare register names, in first-reference order.
    pub registers: Vec<String>,
}

impl Program {
    /// Only meaningful once the full source has been scanned.
    pub fn resolve_label(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    fn register(&mut self, name: &str) {
        if !self.registers.iter().any(|r| r == name) {
            self.registers.push(name.to_string());
        }
    }
}

pub fn scan(source: &str) -> Result<Program, AsmError> {
    let mut program = Program::default();

    for (idx, raw) in source.lines().enumerate() {
        // Blank and comment lines still occupy a line-number slot so that
        // jump targets line up with the original file.
        let lineno = idx as u32 + 1;

        let mut line = raw;
        if let Some(p) = line.find(COMMENT_CHAR) {
            line = &line[..p];
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((first, args)) = tokens.split_first() else {
            return Err(AsmError::MalformedLine { lineno });
        };

        // Any sigil-prefixed token on any kind of line counts as a
        // register reference.
        for token in &tokens {
            if let Some(name) = token.strip_prefix(REGISTER_SIGIL) {
                program.register(name);
            }
        }

        if let Some(label) = first.strip_suffix(LABEL_TERMINATOR) {
            debug!(label, lineno, "label declaration");
            program.labels.insert(label.to_string(), lineno);
            continue;
        }

        let mnemonic = Mnemonic::parse(first).ok_or_else(|| AsmError::UnknownCommand {
            name: first.to_string(),
            lineno,
        })?;
        program.instructions.push(Instruction {
            mnemonic,
            args: args.iter().map(|a| a.to_string()).collect(),
            lineno,
        });
    }

    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_numbers_count_blanks_and_comments() {
        let program = scan("; header\n\nmov $a 1\n").unwrap();
        assert_eq!(program.instructions.len(), 1);
        assert_eq!(program.instructions[0].lineno, 3);
    }

    #[test]
    fn inline_comment_is_stripped() {
        let program = scan("mov $a 1 ; set up").unwrap();
        assert_eq!(program.instructions[0].args, vec!["$a", "1"]);
    }

    #[test]
    fn labels_are_recorded_and_removed_from_the_stream() {
        let program = scan("start:\nadd $a 1\njmp start").unwrap();
        assert_eq!(program.resolve_label("start"), Some(1));
        let mnemonics: Vec<_> = program
            .instructions
            .iter()
            .map(|i| i.mnemonic)
            .collect();
        assert_eq!(mnemonics, vec![Mnemonic::Add, Mnemonic::Jmp]);
    }

    #[test]
    fn registers_keep_first_seen_order_without_duplicates() {
        let program = scan("mov $b 1\nadd $a $b\nsub $b 2").unwrap();
        assert_eq!(program.registers, vec!["b", "a"]);
    }

    #[test]
    fn unknown_mnemonic_is_rejected_at_scan_time() {
        let err = scan("mov $a 1\nfoo $a 2").unwrap_err();
        assert!(matches!(
            err,
            AsmError::UnknownCommand { ref name, lineno: 2 } if name == "foo"
        ));
    }

    #[test]
    fn later_label_wins_on_redeclaration() {
        let program = scan("x:\nmov $a 1\nx:").unwrap();
        assert_eq!(program.resolve_label("x"), Some(3));
    }
}
