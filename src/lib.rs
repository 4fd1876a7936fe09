//! # Bus clock gating for the STM32U5 family
//!
//! This crate owns the peripheral bus gating part of the Reset and Clock
//! Control (RCC) unit found on STM32U5 series microcontrollers (RM0456):
//! enabling and disabling the clocks of individual peripherals, holding
//! peripherals in reset, keeping clocks alive during Sleep and Stop modes
//! and selecting the SmartRun domain peripherals that may run in
//! autonomous mode.
//!
//! Clock tree configuration (oscillators, PLLs, prescalers) is not part of
//! this crate.
//!
//! # Usage
//!
//! ```no_run
//! use stm32u5xx_rcc::prelude::*;
//! use stm32u5xx_rcc::rcc::Ahb2Grp1Periphs;
//! use stm32u5xx_rcc::stm32;
//!
//! let dp = stm32::Peripherals::take().unwrap();
//! let rcc = dp.RCC.constrain();
//! let mut ahb2 = rcc.ahb2_grp1;
//!
//! ahb2.enable_clock(Ahb2Grp1Periphs::GPIOA | Ahb2Grp1Periphs::GPIOB);
//! ```
//!
//! # Device selection
//!
//! Exactly one device feature must be selected, for example `stm32u585`.
//! Peripherals that are not present on the selected device do not exist at
//! the type level, so referring to them is a compile error.

#![no_std]
#![deny(missing_docs)]

#[cfg(test)]
extern crate std;

#[cfg(not(feature = "device-selected"))]
compile_error!(
    "This crate requires one of the following device features enabled:
        stm32u535
        stm32u545
        stm32u575
        stm32u585
        stm32u595
        stm32u599
        stm32u5a5
        stm32u5a9
"
);

const _: () = assert!(
    cfg!(feature = "stm32u535") as u8
        + cfg!(feature = "stm32u545") as u8
        + cfg!(feature = "stm32u575") as u8
        + cfg!(feature = "stm32u585") as u8
        + cfg!(feature = "stm32u595") as u8
        + cfg!(feature = "stm32u599") as u8
        + cfg!(feature = "stm32u5a5") as u8
        + cfg!(feature = "stm32u5a9") as u8
        <= 1,
    "Only one device feature may be enabled"
);

#[cfg(all(feature = "usb_otg_fs", feature = "usb_otg_hs"))]
compile_error!("USB OTG FS and HS share one enable bit, select only one");

#[cfg(feature = "stm32u535")]
pub use stm32u5::stm32u535 as stm32;
#[cfg(feature = "stm32u545")]
pub use stm32u5::stm32u545 as stm32;
#[cfg(feature = "stm32u575")]
pub use stm32u5::stm32u575 as stm32;
#[cfg(feature = "stm32u585")]
pub use stm32u5::stm32u585 as stm32;
#[cfg(feature = "stm32u595")]
pub use stm32u5::stm32u595 as stm32;
#[cfg(feature = "stm32u599")]
pub use stm32u5::stm32u599 as stm32;
#[cfg(feature = "stm32u5a5")]
pub use stm32u5::stm32u5a5 as stm32;
#[cfg(feature = "stm32u5a9")]
pub use stm32u5::stm32u5a9 as stm32;

#[cfg(feature = "device-selected")]
pub use crate::stm32 as pac;

#[cfg(feature = "device-selected")]
pub mod prelude;
#[cfg(feature = "device-selected")]
pub mod rcc;
