//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute1 stage. All
//! arithmetic is 32-bit two's complement and wraps on overflow.

use crate::core::pipeline::signals::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand
    ///
    /// # Returns
    ///
    /// The 32-bit result. [`AluOp::None`] yields 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use apex_core::core::units::alu::Alu;
    /// use apex_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Add, i32::MAX, 1), i32::MIN);
    /// ```
    #[inline]
    pub const fn execute(op: AluOp, a: i32, b: i32) -> i32 {
        match op {
            AluOp::None => 0,
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Mul => a.wrapping_mul(b),
            AluOp::And => a & b,
            AluOp::Or => a | b,
            AluOp::Xor => a ^ b,
        }
    }
}
