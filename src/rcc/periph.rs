//! Peripheral masks
//!
//! Each bus group has its own mask type, so a mask built for one group
//! cannot be handed to another group's registers. Masks are combined with
//! `|`.
//!
//! ```
//! use stm32u5xx_rcc::rcc::Ahb2Grp1Periphs;
//!
//! let ports = Ahb2Grp1Periphs::GPIOA | Ahb2Grp1Periphs::GPIOB;
//! assert_eq!(ports.bits(), 0b11);
//! assert!(ports.contains(Ahb2Grp1Periphs::GPIOB));
//! ```
//!
//! Constants for peripherals that are absent on the selected device are
//! not defined.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of peripherals belonging to a single bus group
pub trait PeripheralMask: Copy + sealed::Sealed {
    /// The raw bit mask
    fn bits(self) -> u32;
}

mod sealed {
    pub trait Sealed {}
}

macro_rules! periphs {
    ($( $(#[$tmeta:meta])* $Periphs:ident {
        $( $(#[$pmeta:meta])* $NAME:ident: $bit:literal $(if $feat:literal)?, )+
    } )+) => {
        $(
            $(#[$tmeta])*
            #[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
            pub struct $Periphs(u32);

            impl $Periphs {
                $(
                    $(#[$pmeta])*
                    $(#[cfg(feature = $feat)])?
                    pub const $NAME: Self = Self(1 << $bit);
                )+

                /// No peripherals
                pub const NONE: Self = Self(0);

                /// Every peripheral of this group present on the selected
                /// device
                pub const ALL: Self = Self({
                    let mut bits = 0;
                    $(
                        $(#[cfg(feature = $feat)])?
                        {
                            bits |= 1 << $bit;
                        }
                    )+
                    bits
                });

                /// The raw bit mask
                #[inline(always)]
                pub const fn bits(self) -> u32 {
                    self.0
                }

                /// Converts a raw bit mask. Returns `None` if any bit does
                /// not belong to a peripheral of this group.
                pub const fn from_bits(bits: u32) -> Option<Self> {
                    if bits & !Self::ALL.0 == 0 {
                        Some(Self(bits))
                    } else {
                        None
                    }
                }

                /// Converts a raw bit mask, dropping unknown bits
                pub const fn from_bits_truncate(bits: u32) -> Self {
                    Self(bits & Self::ALL.0)
                }

                /// Both sets of peripherals. Usable in `const` contexts
                pub const fn union(self, other: Self) -> Self {
                    Self(self.0 | other.0)
                }

                /// True when every peripheral of `other` is also in `self`
                pub const fn contains(self, other: Self) -> bool {
                    self.0 & other.0 == other.0
                }

                /// True when no peripheral is selected
                pub const fn is_empty(self) -> bool {
                    self.0 == 0
                }
            }

            impl sealed::Sealed for $Periphs {}
            impl PeripheralMask for $Periphs {
                #[inline(always)]
                fn bits(self) -> u32 {
                    self.0
                }
            }

            impl BitOr for $Periphs {
                type Output = Self;

                fn bitor(self, rhs: Self) -> Self {
                    Self(self.0 | rhs.0)
                }
            }

            impl BitOrAssign for $Periphs {
                fn bitor_assign(&mut self, rhs: Self) {
                    self.0 |= rhs.0;
                }
            }

            impl BitAnd for $Periphs {
                type Output = Self;

                fn bitand(self, rhs: Self) -> Self {
                    Self(self.0 & rhs.0)
                }
            }

            impl fmt::Debug for $Periphs {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(concat!(stringify!($Periphs), "("))?;
                    let mut first = true;
                    $(
                        $(#[cfg(feature = $feat)])?
                        {
                            if self.0 & (1 << $bit) != 0 {
                                if !first {
                                    f.write_str(" | ")?;
                                }
                                first = false;
                                f.write_str(stringify!($NAME))?;
                            }
                        }
                    )+
                    let unknown = self.0 & !Self::ALL.0;
                    if unknown != 0 {
                        if !first {
                            f.write_str(" | ")?;
                        }
                        write!(f, "{:#010x}", unknown)?;
                    }
                    f.write_str(")")
                }
            }
        )+
    };
}

periphs! {
    /// Peripherals of the AHB1 bus
    Ahb1Periphs {
        /// General purpose DMA 1
        GPDMA1: 0,
        /// CORDIC co-processor
        CORDIC: 1,
        /// Filter math accelerator
        FMAC: 2,
        /// Multi-function digital filter
        MDF1: 3,
        /// Flash interface
        FLASH: 8,
        /// CRC calculation unit
        CRC: 12,
        /// JPEG codec
        JPEG: 15 if "jpeg",
        /// Touch sensing controller
        TSC: 16,
        /// RAM configuration controller
        RAMCFG: 17,
        /// Chrom-ART accelerator
        DMA2D: 18 if "dma2d",
        /// Graphic MMU
        GFXMMU: 19 if "gfxmmu",
        /// Neo-Chrom graphic processor
        GPU2D: 20 if "gpu2d",
        /// Data cache 2
        DCACHE2: 21 if "dcache2",
        /// Global TrustZone controller 1
        GTZC1: 24,
        /// Backup SRAM
        BKPSRAM: 28,
        /// Data cache 1
        DCACHE1: 30,
        /// SRAM1
        SRAM1: 31,
    }

    /// Peripherals of the AHB2 bus, first half
    Ahb2Grp1Periphs {
        /// GPIO port A
        GPIOA: 0,
        /// GPIO port B
        GPIOB: 1,
        /// GPIO port C
        GPIOC: 2,
        /// GPIO port D
        GPIOD: 3,
        /// GPIO port E
        GPIOE: 4,
        /// GPIO port F
        GPIOF: 5 if "gpio_fg",
        /// GPIO port G
        GPIOG: 6 if "gpio_fg",
        /// GPIO port H
        GPIOH: 7,
        /// GPIO port I
        GPIOI: 8 if "gpioi",
        /// GPIO port J
        GPIOJ: 9 if "gpioj",
        /// ADC1 and ADC2 (ADC1 only on devices with a single ADC)
        ADC12: 10,
        /// Digital camera interface and parallel synchronous slave interface
        DCMI_PSSI: 12,
        /// USB OTG full speed
        USB_OTG_FS: 14 if "usb_otg_fs",
        /// USB OTG high speed
        USB_OTG_HS: 14 if "usb_otg_hs",
        /// USB OTG high speed PHY
        USB_OTG_HS_PHY: 15 if "usb_otg_hs",
        /// AES hardware accelerator
        AES: 16 if "crypto",
        /// Hash processor
        HASH: 17,
        /// Random number generator
        RNG: 18,
        /// Public key accelerator
        PKA: 19 if "crypto",
        /// Secure AES accelerator
        SAES: 20 if "crypto",
        /// OCTOSPI I/O manager
        OCTOSPIM: 21 if "octospi2",
        /// On-the-fly decryption 1
        OTFDEC1: 23 if "otfdec",
        /// On-the-fly decryption 2
        OTFDEC2: 24 if "otfdec",
        /// SDMMC1
        SDMMC1: 27,
        /// SDMMC2
        SDMMC2: 28 if "sdmmc2",
        /// SRAM2
        SRAM2: 30,
        /// SRAM3
        SRAM3: 31 if "sram3",
    }

    /// Peripherals of the AHB2 bus, second half
    Ahb2Grp2Periphs {
        /// Flexible memory controller
        FMC: 0 if "fmc",
        /// OCTOSPI1
        OCTOSPI1: 4,
        /// OCTOSPI2
        OCTOSPI2: 8 if "octospi2",
        /// HSPI1
        HSPI1: 12 if "hspi",
        /// SRAM6
        SRAM6: 30 if "sram6",
        /// SRAM5
        SRAM5: 31 if "sram5",
    }

    /// Peripherals of the AHB3 bus
    Ahb3Periphs {
        /// Low-power GPIO 1
        LPGPIO1: 0,
        /// Power controller
        PWR: 2,
        /// ADC4
        ADC4: 5,
        /// DAC1
        DAC1: 6,
        /// Low-power DMA 1
        LPDMA1: 9,
        /// Audio digital filter
        ADF1: 10,
        /// Global TrustZone controller 2
        GTZC2: 12,
        /// SRAM4
        SRAM4: 31,
    }

    /// Peripherals of the APB1 bus, first half
    Apb1Grp1Periphs {
        /// TIM2
        TIM2: 0,
        /// TIM3
        TIM3: 1,
        /// TIM4
        TIM4: 2,
        /// TIM5
        TIM5: 3,
        /// TIM6
        TIM6: 4,
        /// TIM7
        TIM7: 5,
        /// Window watchdog
        WWDG: 11,
        /// SPI2
        SPI2: 14,
        /// USART2
        USART2: 17,
        /// USART3
        USART3: 18,
        /// UART4
        UART4: 19,
        /// UART5
        UART5: 20,
        /// I2C1
        I2C1: 21,
        /// I2C2
        I2C2: 22,
        /// Clock recovery system
        CRS: 24,
    }

    /// Peripherals of the APB1 bus, second half
    Apb1Grp2Periphs {
        /// I2C4
        I2C4: 1,
        /// LPTIM2
        LPTIM2: 5,
        /// I2C5
        I2C5: 6 if "i2c56",
        /// I2C6
        I2C6: 7 if "i2c56",
        /// FDCAN1
        FDCAN1: 9,
        /// USB Type-C power delivery
        UCPD1: 23,
    }

    /// Peripherals of the APB2 bus
    Apb2Periphs {
        /// TIM1
        TIM1: 11,
        /// SPI1
        SPI1: 12,
        /// TIM8
        TIM8: 13,
        /// USART1
        USART1: 14,
        /// TIM15
        TIM15: 16,
        /// TIM16
        TIM16: 17,
        /// TIM17
        TIM17: 18,
        /// SAI1
        SAI1: 21,
        /// SAI2
        SAI2: 22 if "sai2",
        /// USB full speed device
        USB: 24 if "usb_fs",
        /// Graphic timer
        GFXTIM: 25 if "gfxtim",
        /// LCD-TFT controller
        LTDC: 26 if "ltdc",
        /// DSI host
        DSI: 27 if "dsi",
    }

    /// Peripherals of the APB3 bus
    Apb3Periphs {
        /// System configuration controller
        SYSCFG: 1,
        /// SPI3
        SPI3: 5,
        /// LPUART1
        LPUART1: 6,
        /// I2C3
        I2C3: 7,
        /// LPTIM1
        LPTIM1: 11,
        /// LPTIM3
        LPTIM3: 12,
        /// LPTIM4
        LPTIM4: 13,
        /// Operational amplifiers
        OPAMP: 14,
        /// Comparators
        COMP: 15,
        /// Voltage reference buffer
        VREF: 20,
        /// RTC and TAMP APB interface
        RTCAPB: 21,
    }

    /// SmartRun domain peripherals allowed to run in autonomous mode
    SrdAmrPeriphs {
        /// SPI3
        SPI3: 5,
        /// LPUART1
        LPUART1: 6,
        /// I2C3
        I2C3: 7,
        /// LPTIM1
        LPTIM1: 11,
        /// LPTIM3
        LPTIM3: 12,
        /// LPTIM4
        LPTIM4: 13,
        /// Operational amplifiers
        OPAMP: 14,
        /// Comparators
        COMP: 15,
        /// Voltage reference buffer
        VREF: 20,
        /// RTC and TAMP APB interface
        RTCAPB: 21,
        /// ADC4
        ADC4: 25,
        /// Low-power GPIO 1
        LPGPIO1: 26,
        /// DAC1
        DAC1: 27,
        /// Low-power DMA 1
        LPDMA1: 28,
        /// Audio digital filter
        ADF1: 29,
        /// SRAM4
        SRAM4: 31,
    }
}
