//! Names kept from earlier releases
use super::periph::{Ahb2Grp1Periphs, Apb2Periphs};

impl Ahb2Grp1Periphs {
    /// ADC1
    #[deprecated(note = "Renamed to ADC12")]
    pub const ADC1: Self = Self::ADC12;

    /// Digital camera interface
    #[deprecated(note = "Merged into DCMI_PSSI")]
    pub const DCMI: Self = Self::DCMI_PSSI;

    /// Parallel synchronous slave interface
    #[deprecated(note = "Merged into DCMI_PSSI")]
    pub const PSSI: Self = Self::DCMI_PSSI;

    /// USB OTG full speed
    #[cfg(feature = "usb_otg_fs")]
    #[deprecated(note = "Renamed to USB_OTG_FS")]
    pub const OTG_FS: Self = Self::USB_OTG_FS;

    /// USB OTG high speed
    #[cfg(feature = "usb_otg_hs")]
    #[deprecated(note = "Renamed to USB_OTG_HS")]
    pub const OTG_HS: Self = Self::USB_OTG_HS;
}

impl Apb2Periphs {
    /// USB full speed device
    #[cfg(feature = "usb_fs")]
    #[deprecated(note = "Renamed to USB")]
    pub const USB_FS: Self = Self::USB;
}

#[cfg(test)]
#[allow(deprecated)]
mod tests {
    use super::*;

    #[test]
    fn aliases_match_canonical_names() {
        assert_eq!(Ahb2Grp1Periphs::ADC1, Ahb2Grp1Periphs::ADC12);
        assert_eq!(Ahb2Grp1Periphs::DCMI, Ahb2Grp1Periphs::DCMI_PSSI);
        assert_eq!(Ahb2Grp1Periphs::PSSI, Ahb2Grp1Periphs::DCMI_PSSI);
    }

    #[cfg(feature = "usb_otg_fs")]
    #[test]
    fn otg_fs_alias() {
        assert_eq!(Ahb2Grp1Periphs::OTG_FS.bits(), 1 << 14);
    }

    #[cfg(feature = "usb_fs")]
    #[test]
    fn usb_fs_alias() {
        assert_eq!(Apb2Periphs::USB_FS, Apb2Periphs::USB);
    }
}
