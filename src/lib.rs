pub mod assembler;
pub mod codegen;
pub mod desmap;
pub mod expr;
pub mod instructions;
pub mod latex;
pub mod preprocess;

pub use assembler::{assemble, AsmError, Assembly};
pub use expr::{ClickableInfo, Expr};
pub use instructions::{Instruction, Mnemonic};
