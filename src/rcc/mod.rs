//! Reset and Clock Control
//!
//! This module gates the clocks of the AMBA High-performance Busses
//! (AHB1, AHB2, AHB3), the AMBA Peripheral Busses (APB1, APB2, APB3) and
//! of the individual peripherals on them. It also holds peripherals in
//! reset, keeps their clocks alive in Sleep and Stop modes, and lets
//! SmartRun domain peripherals run in autonomous mode.
//!
//! See Section 11 "Reset and clock control (RCC)" in Reference Manual
//! RM0456.
//!
//! # Usage
//!
//! The RCC peripheral is split into one handle per bus group by the
//! `constrain` method. Each handle owns its group's clock enable, reset
//! and Sleep/Stop clock enable registers, and only accepts masks built
//! from that group's peripherals.
//!
//! ```no_run
//! use stm32u5xx_rcc::prelude::*;
//! use stm32u5xx_rcc::rcc::{Ahb2Grp1Periphs, Apb3Periphs, SrdAmrPeriphs};
//! use stm32u5xx_rcc::stm32;
//!
//! let dp = stm32::Peripherals::take().unwrap();
//! let mut rcc = dp.RCC.constrain();
//!
//! // Clock GPIO ports A and B. Their registers are accessible as soon as
//! // this returns
//! rcc.ahb2_grp1
//!     .enable_clock(Ahb2Grp1Periphs::GPIOA | Ahb2Grp1Periphs::GPIOB);
//!
//! // Reinitialise LPUART1
//! rcc.apb3.enable_clock(Apb3Periphs::LPUART1);
//! rcc.apb3.force_reset(Apb3Periphs::LPUART1);
//! rcc.apb3.release_reset(Apb3Periphs::LPUART1);
//!
//! // Keep LPUART1 receiving in Stop 2
//! rcc.apb3.enable_clock_stop_sleep(Apb3Periphs::LPUART1);
//! rcc.srdamr.enable_autonomous_clock(SrdAmrPeriphs::LPUART1);
//! ```
//!
//! # Peripherals
//!
//! Drivers usually want to own the reset and enable control of exactly one
//! peripheral. [`into_peripheral_rec`](Rcc::into_peripheral_rec) trades
//! the bus group handles for a [`PeripheralREC`], which has one field per
//! peripheral.
//!
//! ```no_run
//! use stm32u5xx_rcc::prelude::*;
//! use stm32u5xx_rcc::stm32;
//!
//! let dp = stm32::Peripherals::take().unwrap();
//! let rec = dp.RCC.constrain().into_peripheral_rec();
//!
//! // Enable the clock to a peripheral and reset it
//! let i2c1 = rec.I2C1.enable().reset();
//! ```
//!
//! # Concurrency
//!
//! The bus group handles perform unsynchronised read-modify-write
//! sequences. Callers that share a register between an interrupt handler
//! and thread mode must serialise access themselves. The
//! [`PeripheralREC`] handles use critical sections.
#![deny(missing_docs)]

use crate::stm32::rcc::RegisterBlock;
use crate::stm32::RCC;

mod bus;
pub mod device;
mod gate;
mod legacy;
mod periph;
pub mod rec;

pub use bus::{
    AutonomousGate, BusGate, PeripheralGate, AHB1, AHB2GRP1, AHB2GRP2, AHB3,
    APB1GRP1, APB1GRP2, APB2, APB3, SRDAMR,
};
pub use periph::{
    Ahb1Periphs, Ahb2Grp1Periphs, Ahb2Grp2Periphs, Ahb3Periphs,
    Apb1Grp1Periphs, Apb1Grp2Periphs, Apb2Periphs, Apb3Periphs,
    PeripheralMask, SrdAmrPeriphs,
};
pub use rec::{LowPowerMode, PeripheralREC, ResetEnable};

/// Extension trait that constrains the `RCC` peripheral
pub trait RccExt {
    /// Constrains the `RCC` peripheral so it plays nicely with the other
    /// abstractions
    fn constrain(self) -> Rcc;
}

/// Base address of the TrustZone secure alias of the RCC
pub const SECURE_BASE: usize = 0x5602_0c00;

impl RccExt for RCC {
    fn constrain(self) -> Rcc {
        let ptr: *const RegisterBlock = if cfg!(feature = "secure") {
            SECURE_BASE as *const _
        } else {
            RCC::ptr()
        };
        log::debug!(
            "RCC constrained at {:#010x} ({})",
            ptr as usize,
            device::DEVICE.name
        );

        // unsafe: The RCC peripheral is consumed, so these are the only
        // handles to its registers
        Rcc::new(unsafe { &*ptr })
    }
}

impl Rcc {
    pub(crate) fn new(rb: &'static RegisterBlock) -> Self {
        Rcc {
            ahb1: AHB1::new(rb),
            ahb2_grp1: AHB2GRP1::new(rb),
            ahb2_grp2: AHB2GRP2::new(rb),
            ahb3: AHB3::new(rb),
            apb1_grp1: APB1GRP1::new(rb),
            apb1_grp2: APB1GRP2::new(rb),
            apb2: APB2::new(rb),
            apb3: APB3::new(rb),
            srdamr: SRDAMR::new(rb),
            rb,
        }
    }
}

/// Constrained RCC peripheral
///
/// Generated by calling `constrain` on the PAC's RCC peripheral.
///
/// ```no_run
/// use stm32u5xx_rcc::prelude::*;
///
/// let dp = stm32u5xx_rcc::stm32::Peripherals::take().unwrap();
/// let rcc = dp.RCC.constrain();
/// ```
pub struct Rcc {
    /// AHB1 peripherals
    pub ahb1: AHB1,
    /// AHB2 peripherals, first half
    pub ahb2_grp1: AHB2GRP1,
    /// AHB2 peripherals, second half
    pub ahb2_grp2: AHB2GRP2,
    /// AHB3 peripherals
    pub ahb3: AHB3,
    /// APB1 peripherals, first half, and the APB1 bus clock
    pub apb1_grp1: APB1GRP1,
    /// APB1 peripherals, second half
    pub apb1_grp2: APB1GRP2,
    /// APB2 peripherals
    pub apb2: APB2,
    /// APB3 peripherals
    pub apb3: APB3,
    /// SmartRun domain autonomous mode
    pub srdamr: SRDAMR,
    pub(crate) rb: &'static RegisterBlock,
}

/// Simulated RCC register file, zero initialised
#[cfg(test)]
pub(crate) fn mock_registers() -> &'static RegisterBlock {
    use std::boxed::Box;

    const WORDS: usize = core::mem::size_of::<RegisterBlock>() / 4 + 1;
    let mem: &'static mut [u32; WORDS] = Box::leak(Box::new([0; WORDS]));

    // unsafe: Leaked, so valid for the rest of the program and not aliased
    unsafe { &*(mem.as_mut_ptr() as *const RegisterBlock) }
}

/// Constrained RCC on a simulated register file
#[cfg(test)]
pub(crate) fn mock() -> Rcc {
    Rcc::new(mock_registers())
}
