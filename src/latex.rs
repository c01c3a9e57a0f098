//! The single LaTeX serializer. Codegen builds `Template` values with
//! explicit operand slots; only this module knows how they print.

/// Canonical register identifier, e.g. `R_{counter}` for `$counter`.
pub fn register(name: &str) -> String {
    format!("R_{{{}}}", name)
}

/// Synthetic action identifier for the n-th minted action.
pub fn action(index: usize) -> String {
    format!("I_{{nternalAction{}}}", index)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A `$`-sigil register reference, stored by bare name.
    Register(String),
    /// Anything else, passed through verbatim.
    Literal(String),
}

impl Operand {
    pub fn render(&self) -> String {
        match self {
            Operand::Register(name) => register(name),
            Operand::Literal(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    fn latex_name(self) -> &'static str {
        match self {
            TrigFn::Sin => "\\sin",
            TrigFn::Cos => "\\cos",
            TrigFn::Tan => "\\tan",
        }
    }
}

/// Closed set of expression shapes the assembler can emit.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    /// `mov`: action sets dst to src.
    Assign {
        action: String,
        dst: Operand,
        src: Operand,
    },
    /// `add`/`sub`/`mul`/`div`: action folds src into dst.
    Arith {
        action: String,
        op: ArithOp,
        dst: Operand,
        src: Operand,
    },
    /// `sin`/`cos`/`tan`: action sets dst to f(src).
    Trig {
        action: String,
        func: TrigFn,
        dst: Operand,
        src: Operand,
    },
    /// `je`/`jne`: guarded goto. `negated` selects `\neq` over `=`.
    CondJump {
        action: String,
        lhs: Operand,
        rhs: Operand,
        negated: bool,
        target: u32,
    },
    /// `jmp`: unconditional goto.
    Jump { action: String, target: u32 },
    /// `lit`: bare text, no action identifier.
    Literal { text: String },
    /// `R_{name} = 0` seed for a referenced register.
    RegisterInit { name: String },
    /// The `F_{a}` action table: line-counter branches plus the
    /// auto-increment marker the stepping mechanism evaluates.
    Dispatch { entries: Vec<(String, u32)> },
}

pub fn render(template: &Template) -> String {
    match template {
        Template::Assign { action, dst, src } => {
            format!("{} = {} \\to {}", action, dst.render(), src.render())
        }
        Template::Arith {
            action,
            op,
            dst,
            src,
        } => {
            let dst = dst.render();
            let src = src.render();
            match op {
                ArithOp::Add => format!("{} = {} \\to {} + {}", action, dst, dst, src),
                ArithOp::Sub => format!("{} = {} \\to {} - {}", action, dst, dst, src),
                ArithOp::Mul => format!("{} = {} \\to {} \\cdot {}", action, dst, dst, src),
                ArithOp::Div => {
                    format!("{} = {} \\to \\frac{{{}}}{{{}}}", action, dst, dst, src)
                }
            }
        }
        Template::Trig {
            action,
            func,
            dst,
            src,
        } => format!(
            "{} = {} \\to {}\\left({}\\right)",
            action,
            dst.render(),
            func.latex_name(),
            src.render()
        ),
        Template::CondJump {
            action,
            lhs,
            rhs,
            negated,
            target,
        } => {
            let rel = if *negated { "\\neq" } else { "=" };
            format!(
                "{} = \\left\\{{{}{}{}:G_{{oto}}\\left({}\\right)\\right\\}}",
                action,
                lhs.render(),
                rel,
                rhs.render(),
                target
            )
        }
        Template::Jump { action, target } => {
            format!("{} = G_{{oto}}\\left({}\\right)", action, target)
        }
        Template::Literal { text } => text.clone(),
        Template::RegisterInit { name } => format!("{} = 0", register(name)),
        Template::Dispatch { entries } => {
            let branches = entries
                .iter()
                .map(|(action, lineno)| format!("T={}: {}", lineno, action))
                .collect::<Vec<_>>()
                .join(",");
            format!("F_{{a}}=\\left\\{{{}\\right\\}},i_{{ncrement}}", branches)
        }
    }
}
