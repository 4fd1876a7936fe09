//! Selected device profile
//!
//! The device is chosen with a Cargo feature, which in turn enables one
//! feature per optional peripheral. Code that depends on an optional
//! peripheral should be gated on that peripheral's feature, so that it
//! fails to compile for devices without it. [`DEVICE`] exposes the same
//! information as constants for code that only needs to report it.

/// Optional peripherals present on a device
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// Part number
    pub name: &'static str,
    /// USB full speed device on APB2
    pub usb_fs: bool,
    /// USB OTG full speed on AHB2
    pub usb_otg_fs: bool,
    /// USB OTG high speed and its PHY on AHB2
    pub usb_otg_hs: bool,
    /// AES, SAES and PKA
    pub crypto: bool,
    /// OTFDEC1 and OTFDEC2
    pub otfdec: bool,
    /// GPIO ports F and G
    pub gpio_fg: bool,
    /// GPIO port I
    pub gpioi: bool,
    /// GPIO port J
    pub gpioj: bool,
    /// Flexible memory controller
    pub fmc: bool,
    /// OCTOSPI2 and the OCTOSPI I/O manager
    pub octospi2: bool,
    /// SDMMC2
    pub sdmmc2: bool,
    /// HSPI1
    pub hspi: bool,
    /// I2C5 and I2C6
    pub i2c56: bool,
    /// SRAM3
    pub sram3: bool,
    /// SRAM5
    pub sram5: bool,
    /// SRAM6
    pub sram6: bool,
    /// Chrom-ART accelerator
    pub dma2d: bool,
    /// SAI2
    pub sai2: bool,
    /// JPEG codec
    pub jpeg: bool,
    /// Graphic MMU
    pub gfxmmu: bool,
    /// Neo-Chrom graphic processor
    pub gpu2d: bool,
    /// LCD-TFT controller
    pub ltdc: bool,
    /// DSI host
    pub dsi: bool,
    /// Data cache 2
    pub dcache2: bool,
    /// Graphic timer
    pub gfxtim: bool,
}

const NAME: &str = if cfg!(feature = "stm32u535") {
    "STM32U535"
} else if cfg!(feature = "stm32u545") {
    "STM32U545"
} else if cfg!(feature = "stm32u575") {
    "STM32U575"
} else if cfg!(feature = "stm32u585") {
    "STM32U585"
} else if cfg!(feature = "stm32u595") {
    "STM32U595"
} else if cfg!(feature = "stm32u599") {
    "STM32U599"
} else if cfg!(feature = "stm32u5a5") {
    "STM32U5A5"
} else if cfg!(feature = "stm32u5a9") {
    "STM32U5A9"
} else {
    "unknown"
};

/// Profile of the device selected at build time
pub const DEVICE: Capabilities = Capabilities {
    name: NAME,
    usb_fs: cfg!(feature = "usb_fs"),
    usb_otg_fs: cfg!(feature = "usb_otg_fs"),
    usb_otg_hs: cfg!(feature = "usb_otg_hs"),
    crypto: cfg!(feature = "crypto"),
    otfdec: cfg!(feature = "otfdec"),
    gpio_fg: cfg!(feature = "gpio_fg"),
    gpioi: cfg!(feature = "gpioi"),
    gpioj: cfg!(feature = "gpioj"),
    fmc: cfg!(feature = "fmc"),
    octospi2: cfg!(feature = "octospi2"),
    sdmmc2: cfg!(feature = "sdmmc2"),
    hspi: cfg!(feature = "hspi"),
    i2c56: cfg!(feature = "i2c56"),
    sram3: cfg!(feature = "sram3"),
    sram5: cfg!(feature = "sram5"),
    sram6: cfg!(feature = "sram6"),
    dma2d: cfg!(feature = "dma2d"),
    sai2: cfg!(feature = "sai2"),
    jpeg: cfg!(feature = "jpeg"),
    gfxmmu: cfg!(feature = "gfxmmu"),
    gpu2d: cfg!(feature = "gpu2d"),
    ltdc: cfg!(feature = "ltdc"),
    dsi: cfg!(feature = "dsi"),
    dcache2: cfg!(feature = "dcache2"),
    gfxtim: cfg!(feature = "gfxtim"),
};

#[cfg(test)]
mod tests {
    use super::DEVICE;
    use crate::rcc::{Ahb2Grp1Periphs, Ahb2Grp2Periphs};

    #[test]
    fn profile_matches_masks() {
        assert_eq!(
            DEVICE.gpio_fg,
            Ahb2Grp1Periphs::from_bits(1 << 5).is_some()
        );
        assert_eq!(DEVICE.fmc, Ahb2Grp2Periphs::from_bits(1 << 0).is_some());
        assert_eq!(DEVICE.sram5, Ahb2Grp2Periphs::from_bits(1 << 31).is_some());
        assert_eq!(DEVICE.sram6, Ahb2Grp2Periphs::from_bits(1 << 30).is_some());
        assert_ne!(DEVICE.name, "unknown");
    }

    #[test]
    fn has_usb() {
        let flavours = [DEVICE.usb_fs, DEVICE.usb_otg_fs, DEVICE.usb_otg_hs];
        assert!(flavours.iter().any(|&f| f));
    }

    #[cfg(feature = "stm32u535")]
    #[test]
    fn stm32u535_profile() {
        assert_eq!(DEVICE.name, "STM32U535");
        assert!(DEVICE.usb_fs);
        assert!(!DEVICE.usb_otg_fs);
        assert!(!DEVICE.gpio_fg);
        assert!(!DEVICE.octospi2);
        assert_eq!(Ahb2Grp1Periphs::from_bits(1 << 5), None);
        assert_eq!(Ahb2Grp1Periphs::from_bits(1 << 14), None);
    }

    #[cfg(feature = "stm32u585")]
    #[test]
    fn stm32u585_profile() {
        assert!(DEVICE.usb_otg_fs);
        assert!(DEVICE.crypto);
        assert!(DEVICE.otfdec);
    }
}
