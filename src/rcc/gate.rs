//! Register primitives shared by every bus group
//!
//! None of these are atomic. Two contexts modifying different bits of the
//! same register can lose an update unless the caller serialises them.

use stm32u5::{Readable, Reg, RegisterSpec, Writable};

/// Raw 32-bit access to one RCC register
pub trait Access {
    /// Volatile read
    fn read_bits(&self) -> u32;
    /// Volatile read-modify-write
    fn modify_bits(&self, f: impl FnOnce(u32) -> u32);
}

impl<REG> Access for Reg<REG>
where
    REG: RegisterSpec<Ux = u32> + Readable + Writable,
{
    #[inline(always)]
    fn read_bits(&self) -> u32 {
        self.read().bits()
    }

    #[inline(always)]
    fn modify_bits(&self, f: impl FnOnce(u32) -> u32) {
        // unsafe: Only bits named by a peripheral mask or a bus disable
        // constant are changed
        self.modify(|r, w| unsafe { w.bits(f(r.bits())) });
    }
}

/// Set `mask` in `reg`, then read `reg` back.
///
/// The bus matrix delays a clock enable write by a few cycles. Reading the
/// register that was just written stalls until the write has landed, so
/// the peripheral is clocked by the time this returns.
#[inline(always)]
pub(crate) fn set_bits_sync<R: Access>(reg: &R, mask: u32) {
    set_bits(reg, mask);
    let _ = reg.read_bits() & mask;
}

/// Clear `mask` in `reg`, then read `reg` back.
///
/// Same completion guarantee as [`set_bits_sync`], for enable bits with
/// inverted polarity.
#[inline(always)]
pub(crate) fn clear_bits_sync<R: Access>(reg: &R, mask: u32) {
    clear_bits(reg, mask);
    let _ = reg.read_bits() & mask;
}

#[inline(always)]
pub(crate) fn set_bits<R: Access>(reg: &R, mask: u32) {
    reg.modify_bits(|bits| bits | mask);
}

#[inline(always)]
pub(crate) fn clear_bits<R: Access>(reg: &R, mask: u32) {
    reg.modify_bits(|bits| bits & !mask);
}

/// True when every bit of `mask` is set
#[inline(always)]
pub(crate) fn all_set<R: Access>(reg: &R, mask: u32) -> bool {
    reg.read_bits() & mask == mask
}

/// Register that records every access made to it
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Counted {
    value: core::cell::Cell<u32>,
    ops: core::cell::RefCell<std::vec::Vec<Op>>,
}

#[cfg(test)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Read,
    Modify,
}

#[cfg(test)]
impl Counted {
    pub(crate) fn new(value: u32) -> Self {
        let reg = Counted::default();
        reg.value.set(value);
        reg
    }

    pub(crate) fn get(&self) -> u32 {
        self.value.get()
    }

    /// Accesses since the last call
    pub(crate) fn take_ops(&self) -> std::vec::Vec<Op> {
        self.ops.take()
    }
}

#[cfg(test)]
impl Access for Counted {
    fn read_bits(&self) -> u32 {
        self.ops.borrow_mut().push(Op::Read);
        self.value.get()
    }

    fn modify_bits(&self, f: impl FnOnce(u32) -> u32) {
        self.ops.borrow_mut().push(Op::Modify);
        self.value.set(f(self.value.get()));
    }
}
