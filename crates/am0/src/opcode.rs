//! Opcode definitions for the AM0 instruction set.

/// Identifies the operation to perform.
///
/// Discriminants follow the order opcodes are listed in AM0 texts. They are
/// not used for classification; see [`Opcode::is_jump`] and
/// [`Opcode::has_payload`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Arithmetic
    /// Pop two values, push their sum.
    Add = 1,
    /// Pop two values, push their product.
    Mul = 2,
    /// Pop two values, push (second_popped - first_popped).
    Sub = 3,
    /// Pop two values, push the floored quotient.
    Div = 4,
    /// Pop two values, push the floored remainder.
    Mod = 5,

    // Comparison
    /// Pop two values, push 1 if equal, else 0.
    Eq = 6,
    /// Pop two values, push 1 if not equal, else 0.
    Ne = 7,
    /// Pop two, push 1 if second_popped < first_popped.
    Lt = 8,
    /// Pop two, push 1 if second_popped > first_popped.
    Gt = 9,
    /// Pop two, push 1 if second_popped <= first_popped.
    Le = 10,
    /// Pop two, push 1 if second_popped >= first_popped.
    Ge = 11,

    // Memory
    /// Push the value stored at address `payload`.
    Load = 12,
    /// Pop a value into address `payload`.
    Store = 13,
    /// Push `payload`.
    Lit = 14,

    // Control flow
    /// Continue at instruction number `payload` (1-based).
    Jmp = 15,
    /// Pop a value; jump like JMP if it is 0.
    Jmc = 16,

    // I/O
    /// Output the value stored at address `payload`.
    Write = 17,
    /// Read one input value into address `payload`.
    Read = 18,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 18] = [
    Opcode::Add,
    Opcode::Mul,
    Opcode::Sub,
    Opcode::Div,
    Opcode::Mod,
    Opcode::Eq,
    Opcode::Ne,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Le,
    Opcode::Ge,
    Opcode::Load,
    Opcode::Store,
    Opcode::Lit,
    Opcode::Jmp,
    Opcode::Jmc,
    Opcode::Write,
    Opcode::Read,
];

impl Opcode {
    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Sub => "SUB",
            Opcode::Div => "DIV",
            Opcode::Mod => "MOD",
            Opcode::Eq => "EQ",
            Opcode::Ne => "NE",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Le => "LE",
            Opcode::Ge => "GE",
            Opcode::Load => "LOAD",
            Opcode::Store => "STORE",
            Opcode::Lit => "LIT",
            Opcode::Jmp => "JMP",
            Opcode::Jmc => "JMC",
            Opcode::Write => "WRITE",
            Opcode::Read => "READ",
        }
    }

    /// Look up an opcode by its exact mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Opcode> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
    }

    /// True only for JMP and JMC.
    pub fn is_jump(&self) -> bool {
        matches!(self, Opcode::Jmp | Opcode::Jmc)
    }

    /// True for every opcode except the eleven binary operators.
    pub fn has_payload(&self) -> bool {
        !self.is_binary()
    }

    /// True for the eleven operators that pop two values and push one.
    pub fn is_binary(&self) -> bool {
        self.binary_op().is_some()
    }
}
