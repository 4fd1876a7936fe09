//! Peripheral Reset and Enable Control (REC)
//!
//! This module contains safe accessors to the RCC functionality for each
//! peripheral. Every peripheral implements
//! [ResetEnable](trait.ResetEnable.html) and can choose whether its clock
//! keeps running in low-power modes with `low_power`.
//!
//! # Reset/Enable Example
//!
//! ```no_run
//! use stm32u5xx_rcc::prelude::*;
//! use stm32u5xx_rcc::stm32;
//!
//! let dp = stm32::Peripherals::take().unwrap();
//! let rec = dp.RCC.constrain().into_peripheral_rec();
//!
//! // Enable the clock to a peripheral and reset it
//! let fdcan = rec.FDCAN1.enable().reset();
//! assert!(fdcan.is_enabled());
//! ```
//!
//! The handles implement move semantics, so once a handle has been passed
//! to a driver it cannot be modified again in safe Rust.
//!
//! Handles of different peripherals share the same registers. Each
//! operation therefore runs inside a critical section.
#![deny(missing_docs)]

use super::bus::{
    AutonomousGate, PeripheralGate, AHB1, AHB2GRP1, AHB2GRP2, AHB3, APB1GRP1,
    APB1GRP2, APB2, APB3, SRDAMR,
};
use super::periph::*;
use super::Rcc;
use crate::stm32::rcc::RegisterBlock;

/// A trait for Resetting, Enabling and Disabling a single peripheral
pub trait ResetEnable {
    /// Enable this peripheral
    fn enable(self) -> Self;
    /// Disable this peripheral
    fn disable(self) -> Self;
    /// Reset this peripheral
    fn reset(self) -> Self;
    /// True if the clock of this peripheral is enabled
    fn is_enabled(&self) -> bool;
}

/// The clock gating state of a peripheral in low-power mode
///
/// See RM0456 Section 11.4.27
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LowPowerMode {
    /// Bus and kernel clocks are not provided in Sleep and Stop modes.
    Off,
    /// Bus and kernel clocks are provided in Sleep and Stop modes.
    Enabled,
    /// Clocks are provided in Sleep and Stop modes, and the peripheral may
    /// request them autonomously in Stop modes. Only applies to peripherals
    /// in the SmartRun domain. For other peripherals this has the same
    /// effect as `Enabled`.
    Autonomous,
}
impl Default for LowPowerMode {
    fn default() -> Self {
        LowPowerMode::Enabled
    }
}

impl Rcc {
    /// Trades the bus group handles for per-peripheral handles
    pub fn into_peripheral_rec(self) -> PeripheralREC {
        // unsafe: The bus group handles are consumed
        unsafe { PeripheralREC::new_singleton(self.rb) }
    }

    /// Returns all the peripherals resets / enables, leaving the bus group
    /// handles in place.
    ///
    /// # Safety
    ///
    /// The bus group handles do not use critical sections. If this method
    /// is called multiple times, or the bus group handles are used while
    /// the returned handles are used from another context, then multiple
    /// unsynchronised accesses to the same registers exist.
    #[inline]
    pub unsafe fn steal_peripheral_rec(&self) -> PeripheralREC {
        PeripheralREC::new_singleton(self.rb)
    }
}

// This macro uses the paste::item! macro to create identifiers.
//
// https://crates.io/crates/paste
macro_rules! peripheral_reset_and_enable_control {
    ($( $GROUP:ident, $Periphs:ident => [
        $(
            $( #[ $pmeta:meta ] )*
            $p:ident: $BIT:ident $([ auto $AUTO:ident ])*
        ),*
    ];)+) => {
        /// Peripheral Reset and Enable Control
        #[allow(non_snake_case)]
        #[non_exhaustive]
        pub struct PeripheralREC {
            $(
                $(
                    #[allow(missing_docs)]
                    $( #[ $pmeta ] )*
                    pub $BIT: $p,
                )*
            )+
        }
        impl PeripheralREC {
            /// Return a new instance of the peripheral resets / enables
            ///
            /// # Safety
            ///
            /// If this method is called multiple times, then multiple
            /// accesses to the same memory exist.
            pub(super) unsafe fn new_singleton(
                rb: &'static RegisterBlock,
            ) -> PeripheralREC {
                PeripheralREC {
                    $(
                        $(
                            $( #[ $pmeta ] )*
                            $BIT: $p { rb },
                        )*
                    )+
                }
            }
        }
        $(
            $(
                peripheral_reset_and_enable_control_generator! (
                    $GROUP, $Periphs, $p, $BIT, $( #[ $pmeta ] )*
                    $( [auto $AUTO] )*
                );
            )*
        )+
    }
}

// The macro is intended only to be called from within the
// peripheral_reset_and_enable_control macro
macro_rules! peripheral_reset_and_enable_control_generator {
    (
        $GROUP:ident, $Periphs:ident, $p:ident, $BIT:ident,
        $( #[ $pmeta:meta ] )*
        $( [auto $AUTO:ident] )*
    ) => {
        paste::item! {
            #[doc = " Reset and Enable control for " $BIT]
            ///
            /// ```ignore
            /// let rec = ...; // From Rcc::into_peripheral_rec
            ///
            /// // Enable the clock to the peripheral and reset it
            #[doc = "let prec = rec." $BIT ".enable().reset();"]
            /// ```
            $( #[ $pmeta ] )*
            pub struct $p {
                rb: &'static RegisterBlock,
            }
            $( #[ $pmeta ] )*
            impl $p {
                /// Set Low Power Mode for peripheral
                pub fn low_power(self, lpm: LowPowerMode) -> Self {
                    critical_section::with(|_| {
                        let mut group = $GROUP::new(self.rb);
                        if lpm == LowPowerMode::Off {
                            group.disable_clock_stop_sleep($Periphs::$BIT);
                        } else {
                            group.enable_clock_stop_sleep($Periphs::$BIT);
                        }
                        $(
                            let mut amr = SRDAMR::new(self.rb);
                            if lpm == LowPowerMode::Autonomous {
                                amr.enable_autonomous_clock(SrdAmrPeriphs::$AUTO);
                            } else {
                                amr.disable_autonomous_clock(SrdAmrPeriphs::$AUTO);
                            }
                        )*
                    });
                    self
                }

                /// Return the current low power mode of the peripheral
                pub fn get_low_power(&self) -> LowPowerMode {
                    let group = $GROUP::new(self.rb);
                    if !group.is_enabled_clock_stop_sleep($Periphs::$BIT) {
                        return LowPowerMode::Off;
                    }
                    $(
                        if SRDAMR::new(self.rb)
                            .is_enabled_autonomous_clock(SrdAmrPeriphs::$AUTO)
                        {
                            return LowPowerMode::Autonomous;
                        }
                    )*
                    LowPowerMode::Enabled
                }
            }
            $( #[ $pmeta ] )*
            unsafe impl Send for $p {}
            $( #[ $pmeta ] )*
            impl ResetEnable for $p {
                #[inline(always)]
                fn enable(self) -> Self {
                    critical_section::with(|_| {
                        $GROUP::new(self.rb).enable_clock($Periphs::$BIT);
                    });
                    self
                }
                #[inline(always)]
                fn disable(self) -> Self {
                    critical_section::with(|_| {
                        $GROUP::new(self.rb).disable_clock($Periphs::$BIT);
                    });
                    self
                }
                #[inline(always)]
                fn reset(self) -> Self {
                    critical_section::with(|_| {
                        let mut group = $GROUP::new(self.rb);
                        group.force_reset($Periphs::$BIT);
                        group.release_reset($Periphs::$BIT);
                    });
                    self
                }
                #[inline(always)]
                fn is_enabled(&self) -> bool {
                    $GROUP::new(self.rb).is_enabled_clock($Periphs::$BIT)
                }
            }
        }
    }
}

peripheral_reset_and_enable_control! {
    AHB1, Ahb1Periphs => [
        Gpdma1: GPDMA1,
        Cordic: CORDIC,
        Fmac: FMAC,
        Mdf1: MDF1,
        Crc: CRC,
        #[cfg(feature = "jpeg")] Jpeg: JPEG,
        Tsc: TSC,
        Ramcfg: RAMCFG,
        #[cfg(feature = "dma2d")] Dma2d: DMA2D,
        #[cfg(feature = "gfxmmu")] Gfxmmu: GFXMMU,
        #[cfg(feature = "gpu2d")] Gpu2d: GPU2D,
        #[cfg(feature = "dcache2")] Dcache2: DCACHE2,
        Gtzc1: GTZC1,
        Dcache1: DCACHE1
    ];
    AHB2GRP1, Ahb2Grp1Periphs => [
        Gpioa: GPIOA,
        Gpiob: GPIOB,
        Gpioc: GPIOC,
        Gpiod: GPIOD,
        Gpioe: GPIOE,
        #[cfg(feature = "gpio_fg")] Gpiof: GPIOF,
        #[cfg(feature = "gpio_fg")] Gpiog: GPIOG,
        Gpioh: GPIOH,
        #[cfg(feature = "gpioi")] Gpioi: GPIOI,
        #[cfg(feature = "gpioj")] Gpioj: GPIOJ,
        Adc12: ADC12,
        DcmiPssi: DCMI_PSSI,
        #[cfg(feature = "usb_otg_fs")] UsbOtgFs: USB_OTG_FS,
        #[cfg(feature = "usb_otg_hs")] UsbOtgHs: USB_OTG_HS,
        #[cfg(feature = "usb_otg_hs")] UsbOtgHsPhy: USB_OTG_HS_PHY,
        #[cfg(feature = "crypto")] Aes: AES,
        Hash: HASH,
        Rng: RNG,
        #[cfg(feature = "crypto")] Pka: PKA,
        #[cfg(feature = "crypto")] Saes: SAES,
        #[cfg(feature = "octospi2")] Octospim: OCTOSPIM,
        #[cfg(feature = "otfdec")] Otfdec1: OTFDEC1,
        #[cfg(feature = "otfdec")] Otfdec2: OTFDEC2,
        Sdmmc1: SDMMC1,
        #[cfg(feature = "sdmmc2")] Sdmmc2: SDMMC2
    ];
    AHB2GRP2, Ahb2Grp2Periphs => [
        #[cfg(feature = "fmc")] Fmc: FMC,
        Octospi1: OCTOSPI1,
        #[cfg(feature = "octospi2")] Octospi2: OCTOSPI2,
        #[cfg(feature = "hspi")] Hspi1: HSPI1
    ];
    AHB3, Ahb3Periphs => [
        Lpgpio1: LPGPIO1 [auto LPGPIO1],
        Pwr: PWR,
        Adc4: ADC4 [auto ADC4],
        Dac1: DAC1 [auto DAC1],
        Lpdma1: LPDMA1 [auto LPDMA1],
        Adf1: ADF1 [auto ADF1],
        Gtzc2: GTZC2
    ];
    APB1GRP1, Apb1Grp1Periphs => [
        Tim2: TIM2,
        Tim3: TIM3,
        Tim4: TIM4,
        Tim5: TIM5,
        Tim6: TIM6,
        Tim7: TIM7,
        Wwdg: WWDG,
        Spi2: SPI2,
        Usart2: USART2,
        Usart3: USART3,
        Uart4: UART4,
        Uart5: UART5,
        I2c1: I2C1,
        I2c2: I2C2,
        Crs: CRS
    ];
    APB1GRP2, Apb1Grp2Periphs => [
        I2c4: I2C4,
        Lptim2: LPTIM2,
        #[cfg(feature = "i2c56")] I2c5: I2C5,
        #[cfg(feature = "i2c56")] I2c6: I2C6,
        Fdcan1: FDCAN1,
        Ucpd1: UCPD1
    ];
    APB2, Apb2Periphs => [
        Tim1: TIM1,
        Spi1: SPI1,
        Tim8: TIM8,
        Usart1: USART1,
        Tim15: TIM15,
        Tim16: TIM16,
        Tim17: TIM17,
        Sai1: SAI1,
        #[cfg(feature = "sai2")] Sai2: SAI2,
        #[cfg(feature = "usb_fs")] Usb: USB,
        #[cfg(feature = "gfxtim")] Gfxtim: GFXTIM,
        #[cfg(feature = "ltdc")] Ltdc: LTDC,
        #[cfg(feature = "dsi")] Dsi: DSI
    ];
    APB3, Apb3Periphs => [
        Syscfg: SYSCFG,
        Spi3: SPI3 [auto SPI3],
        Lpuart1: LPUART1 [auto LPUART1],
        I2c3: I2C3 [auto I2C3],
        Lptim1: LPTIM1 [auto LPTIM1],
        Lptim3: LPTIM3 [auto LPTIM3],
        Lptim4: LPTIM4 [auto LPTIM4],
        Opamp: OPAMP [auto OPAMP],
        Comp: COMP [auto COMP],
        Vref: VREF [auto VREF],
        Rtcapb: RTCAPB [auto RTCAPB]
    ];
}
