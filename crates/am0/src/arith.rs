//! Binary stack operators and their integer semantics.
//!
//! DIV and MOD round toward negative infinity, so `-7 DIV 2 = -4` and
//! `-7 MOD 2 = 1`. ADD, SUB and MUL wrap on overflow. Comparisons yield 1
//! or 0.

use crate::opcode::Opcode;

/// One of the eleven operators that pop two values and push one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Mul,
    Sub,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

/// All operators, in opcode order.
pub const ALL_BINARY_OPS: [BinaryOp; 11] = [
    BinaryOp::Add,
    BinaryOp::Mul,
    BinaryOp::Sub,
    BinaryOp::Div,
    BinaryOp::Mod,
    BinaryOp::Eq,
    BinaryOp::Ne,
    BinaryOp::Lt,
    BinaryOp::Gt,
    BinaryOp::Le,
    BinaryOp::Ge,
];

impl BinaryOp {
    /// Compute `a <op> b`, where `a` was below `b` on the stack.
    ///
    /// Returns `None` when DIV or MOD is given a zero divisor.
    pub fn apply(self, a: i64, b: i64) -> Option<i64> {
        let value = match self {
            BinaryOp::Add => a.wrapping_add(b),
            BinaryOp::Mul => a.wrapping_mul(b),
            BinaryOp::Sub => a.wrapping_sub(b),
            BinaryOp::Div => floor_div(a, b)?,
            BinaryOp::Mod => floor_mod(a, b)?,
            BinaryOp::Eq => (a == b) as i64,
            BinaryOp::Ne => (a != b) as i64,
            BinaryOp::Lt => (a < b) as i64,
            BinaryOp::Gt => (a > b) as i64,
            BinaryOp::Le => (a <= b) as i64,
            BinaryOp::Ge => (a >= b) as i64,
        };
        Some(value)
    }

    /// The opcode mnemonic shared with AM0.
    pub fn mnemonic(&self) -> &'static str {
        Opcode::from(*self).mnemonic()
    }

    /// Look up an operator by its exact mnemonic.
    pub fn from_mnemonic(mnemonic: &str) -> Option<BinaryOp> {
        Opcode::from_mnemonic(mnemonic).and_then(|op| op.binary_op())
    }
}

impl From<BinaryOp> for Opcode {
    fn from(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Add => Opcode::Add,
            BinaryOp::Mul => Opcode::Mul,
            BinaryOp::Sub => Opcode::Sub,
            BinaryOp::Div => Opcode::Div,
            BinaryOp::Mod => Opcode::Mod,
            BinaryOp::Eq => Opcode::Eq,
            BinaryOp::Ne => Opcode::Ne,
            BinaryOp::Lt => Opcode::Lt,
            BinaryOp::Gt => Opcode::Gt,
            BinaryOp::Le => Opcode::Le,
            BinaryOp::Ge => Opcode::Ge,
        }
    }
}

impl Opcode {
    /// The operator this opcode performs, if it is a binary stack operator.
    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Opcode::Add => Some(BinaryOp::Add),
            Opcode::Mul => Some(BinaryOp::Mul),
            Opcode::Sub => Some(BinaryOp::Sub),
            Opcode::Div => Some(BinaryOp::Div),
            Opcode::Mod => Some(BinaryOp::Mod),
            Opcode::Eq => Some(BinaryOp::Eq),
            Opcode::Ne => Some(BinaryOp::Ne),
            Opcode::Lt => Some(BinaryOp::Lt),
            Opcode::Gt => Some(BinaryOp::Gt),
            Opcode::Le => Some(BinaryOp::Le),
            Opcode::Ge => Some(BinaryOp::Ge),
            Opcode::Load
            | Opcode::Store
            | Opcode::Lit
            | Opcode::Jmp
            | Opcode::Jmc
            | Opcode::Write
            | Opcode::Read => None,
        }
    }
}

/// Quotient rounded toward negative infinity. `None` if `b == 0`.
pub fn floor_div(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    let q = a.wrapping_div(b);
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

/// Remainder with the sign of the divisor. `None` if `b == 0`.
pub fn floor_mod(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    let r = a.wrapping_rem(b);
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}
