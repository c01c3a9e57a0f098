use serde::{Deserialize, Serialize};

/// The closed instruction set. Mnemonics are resolved to a variant once,
/// during preprocessing, so an unrecognized spelling never reaches codegen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mnemonic {
    Mov,
    Add,
    Sub,
    Mul,
    Div,
    Sin,
    Cos,
    Tan,
    Je,
    Jne,
    Jmp,
    Lit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Unchecked argument count (`lit` takes anything, including nothing).
    Any,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: Mnemonic,
    pub name: &'static str,
    pub arity: Arity,
}

pub const TABLE: &[InstrDesc] = &[
    InstrDesc {
        mnemonic: Mnemonic::Mov,
        name: "mov",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Add,
        name: "add",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Sub,
        name: "sub",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Mul,
        name: "mul",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Div,
        name: "div",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Sin,
        name: "sin",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Cos,
        name: "cos",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Tan,
        name: "tan",
        arity: Arity::Exact(2),
    },
    InstrDesc {
        mnemonic: Mnemonic::Je,
        name: "je",
        arity: Arity::Exact(3),
    },
    InstrDesc {
        mnemonic: Mnemonic::Jne,
        name: "jne",
        arity: Arity::Exact(3),
    },
    InstrDesc {
        mnemonic: Mnemonic::Jmp,
        name: "jmp",
        arity: Arity::Exact(1),
    },
    InstrDesc {
        mnemonic: Mnemonic::Lit,
        name: "lit",
        arity: Arity::Any,
    },
];

impl Mnemonic {
    pub fn parse(name: &str) -> Option<Mnemonic> {
        TABLE.iter().find(|d| d.name == name).map(|d| d.mnemonic)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Mov => "mov",
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Mul => "mul",
            Mnemonic::Div => "div",
            Mnemonic::Sin => "sin",
            Mnemonic::Cos => "cos",
            Mnemonic::Tan => "tan",
            Mnemonic::Je => "je",
            Mnemonic::Jne => "jne",
            Mnemonic::Jmp => "jmp",
            Mnemonic::Lit => "lit",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Mnemonic::Je | Mnemonic::Jne => Arity::Exact(3),
            Mnemonic::Jmp => Arity::Exact(1),
            Mnemonic::Lit => Arity::Any,
            _ => Arity::Exact(2),
        }
    }
}

/// One source instruction, built by the preprocessor and consumed exactly
/// once by codegen. `lineno` is 1-based and counts every physical line of
/// the original source, blanks and comments included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub args: Vec<String>,
    pub lineno: u32,
}
