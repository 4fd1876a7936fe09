//! Bus group handles
//!
//! Every bus segment of the RCC is controlled through one handle, which
//! owns the group's clock enable, reset and Sleep/Stop clock enable
//! registers. The operations are provided by the [`PeripheralGate`],
//! [`BusGate`] and [`AutonomousGate`] traits.
//!
//! | Handle     | Mask              | Registers                            | Bus disable        |
//! |------------|-------------------|--------------------------------------|--------------------|
//! | `AHB1`     | `Ahb1Periphs`     | AHB1ENR, AHB1RSTR, AHB1SMENR         | CFGR2.AHB1DIS      |
//! | `AHB2GRP1` | `Ahb2Grp1Periphs` | AHB2ENR1, AHB2RSTR1, AHB2SMENR1      | CFGR2.AHB2DIS1     |
//! | `AHB2GRP2` | `Ahb2Grp2Periphs` | AHB2ENR2, AHB2RSTR2, AHB2SMENR2      | CFGR2.AHB2DIS2     |
//! | `AHB3`     | `Ahb3Periphs`     | AHB3ENR, AHB3RSTR, AHB3SMENR         | CFGR3.AHB3DIS      |
//! | `APB1GRP1` | `Apb1Grp1Periphs` | APB1ENR1, APB1RSTR1, APB1SMENR1      | CFGR2.APB1DIS      |
//! | `APB1GRP2` | `Apb1Grp2Periphs` | APB1ENR2, APB1RSTR2, APB1SMENR2      | (shared with GRP1) |
//! | `APB2`     | `Apb2Periphs`     | APB2ENR, APB2RSTR, APB2SMENR         | CFGR2.APB2DIS      |
//! | `APB3`     | `Apb3Periphs`     | APB3ENR, APB3RSTR, APB3SMENR         | CFGR3.APB3DIS      |
//! | `SRDAMR`   | `SrdAmrPeriphs`   | SRDAMR                               | -                  |
//!
//! # Concurrency
//!
//! All modifications are plain read-modify-write sequences. Mutating
//! methods take `&mut self`, which serialises callers of a single handle,
//! but nothing stops an interrupt handler holding another handle from
//! touching the same register in between. In particular the bus disable
//! bits of several groups share CFGR2 or CFGR3.

use super::gate;
use super::periph::*;
use crate::stm32::rcc::{self, RegisterBlock};

/// Bus disable bits in CFGR2
mod cfgr2 {
    pub const AHB1DIS: u32 = 1 << 16;
    pub const AHB2DIS1: u32 = 1 << 17;
    pub const AHB2DIS2: u32 = 1 << 18;
    pub const APB1DIS: u32 = 1 << 19;
    pub const APB2DIS: u32 = 1 << 20;
}

/// Bus disable bits in CFGR3
mod cfgr3 {
    pub const APB3DIS: u32 = 1 << 16;
    pub const AHB3DIS: u32 = 1 << 17;
}

pub(crate) mod sealed {
    use crate::rcc::gate::Access;

    pub trait Gate {
        const NAME: &'static str;
        type Enr: Access;
        type Rstr: Access;
        type Smenr: Access;
        fn enr(&self) -> &Self::Enr;
        fn rstr(&self) -> &Self::Rstr;
        fn smenr(&self) -> &Self::Smenr;
    }

    pub trait Bus {
        type Cfgr: Access;
        /// Register holding the disable bit, and the bit itself
        fn bus_disable(&self) -> (&Self::Cfgr, u32);
    }

    pub trait Autonomous {
        type Amr: Access;
        fn amr(&self) -> &Self::Amr;
    }
}

/// Clock enable, reset and Sleep/Stop clock control for the peripherals
/// of one bus group
pub trait PeripheralGate: sealed::Gate {
    /// Peripheral mask accepted by this group
    type Periphs: PeripheralMask;

    /// Enable the clocks of `periphs`
    ///
    /// The enable register is read back before returning, so the
    /// peripherals' registers can be accessed immediately afterwards.
    #[inline]
    fn enable_clock(&mut self, periphs: Self::Periphs) {
        gate::set_bits_sync(self.enr(), periphs.bits());
    }

    /// True if the clocks of all of `periphs` are enabled
    #[inline]
    fn is_enabled_clock(&self, periphs: Self::Periphs) -> bool {
        gate::all_set(self.enr(), periphs.bits())
    }

    /// Disable the clocks of `periphs`
    #[inline]
    fn disable_clock(&mut self, periphs: Self::Periphs) {
        gate::clear_bits(self.enr(), periphs.bits());
    }

    /// Hold `periphs` in reset
    #[inline]
    fn force_reset(&mut self, periphs: Self::Periphs) {
        gate::set_bits(self.rstr(), periphs.bits());
    }

    /// Release `periphs` from reset
    #[inline]
    fn release_reset(&mut self, periphs: Self::Periphs) {
        gate::clear_bits(self.rstr(), periphs.bits());
    }

    /// Keep the clocks of `periphs` running in Sleep and Stop modes
    #[inline]
    fn enable_clock_stop_sleep(&mut self, periphs: Self::Periphs) {
        gate::set_bits_sync(self.smenr(), periphs.bits());
    }

    /// True if the clocks of all of `periphs` keep running in Sleep and
    /// Stop modes
    #[inline]
    fn is_enabled_clock_stop_sleep(&self, periphs: Self::Periphs) -> bool {
        gate::all_set(self.smenr(), periphs.bits())
    }

    /// Gate the clocks of `periphs` in Sleep and Stop modes
    #[inline]
    fn disable_clock_stop_sleep(&mut self, periphs: Self::Periphs) {
        gate::clear_bits(self.smenr(), periphs.bits());
    }
}

/// Whole bus clock gating
///
/// Disabling a bus stops the clock of every peripheral on it, except for
/// those listed in [`ALWAYS_ON`](BusGate::ALWAYS_ON).
pub trait BusGate: PeripheralGate + sealed::Bus {
    /// Peripherals that stay clocked while the bus clock is disabled
    const ALWAYS_ON: Self::Periphs;

    /// Ungate the bus clock
    fn enable_bus_clock(&mut self) {
        let (reg, bit) = self.bus_disable();
        gate::clear_bits_sync(reg, bit);
        log::trace!("{}: bus clock enabled", Self::NAME);
    }

    /// Gate the bus clock
    fn disable_bus_clock(&mut self) {
        let (reg, bit) = self.bus_disable();
        gate::set_bits(reg, bit);
        log::trace!("{}: bus clock disabled", Self::NAME);
    }

    /// True unless the bus clock is gated
    fn is_enabled_bus_clock(&self) -> bool {
        let (reg, bit) = self.bus_disable();
        !gate::all_set(reg, bit)
    }
}

/// Autonomous mode clock control for SmartRun domain peripherals
pub trait AutonomousGate: sealed::Autonomous {
    /// Peripheral mask accepted by this group
    type Periphs: PeripheralMask;

    /// Allow `periphs` to request their clocks in Stop modes
    #[inline]
    fn enable_autonomous_clock(&mut self, periphs: Self::Periphs) {
        gate::set_bits_sync(self.amr(), periphs.bits());
    }

    /// True if all of `periphs` are allowed to run autonomously
    #[inline]
    fn is_enabled_autonomous_clock(&self, periphs: Self::Periphs) -> bool {
        gate::all_set(self.amr(), periphs.bits())
    }

    /// Stop `periphs` from running autonomously
    #[inline]
    fn disable_autonomous_clock(&mut self, periphs: Self::Periphs) {
        gate::clear_bits(self.amr(), periphs.bits());
    }
}

macro_rules! bus_groups {
    ($( $(#[$meta:meta])* $GROUP:ident: $Periphs:ty => ($enr:ident, $rstr:ident, $smenr:ident); )+) => {
        $(
            $(#[$meta])*
            pub struct $GROUP {
                rb: &'static RegisterBlock,
            }

            impl $GROUP {
                pub(crate) fn new(rb: &'static RegisterBlock) -> Self {
                    $GROUP { rb }
                }
            }

            // unsafe: Owned exclusive access to this group's registers
            unsafe impl Send for $GROUP {}

            paste::item! {
                impl sealed::Gate for $GROUP {
                    const NAME: &'static str = stringify!($GROUP);
                    type Enr = rcc::[< $enr:upper >];
                    type Rstr = rcc::[< $rstr:upper >];
                    type Smenr = rcc::[< $smenr:upper >];

                    #[inline(always)]
                    fn enr(&self) -> &Self::Enr {
                        self.rb.$enr()
                    }
                    #[inline(always)]
                    fn rstr(&self) -> &Self::Rstr {
                        self.rb.$rstr()
                    }
                    #[inline(always)]
                    fn smenr(&self) -> &Self::Smenr {
                        self.rb.$smenr()
                    }
                }
            }

            impl PeripheralGate for $GROUP {
                type Periphs = $Periphs;
            }
        )+
    };
}

macro_rules! bus_disable {
    ($( $GROUP:ident: ($cfgr:ident, $DIS:ident) => $always_on:expr; )+) => {
        $(
            paste::item! {
                impl sealed::Bus for $GROUP {
                    type Cfgr = rcc::[< $cfgr:upper >];

                    #[inline(always)]
                    fn bus_disable(&self) -> (&Self::Cfgr, u32) {
                        (self.rb.$cfgr(), $cfgr::$DIS)
                    }
                }
            }

            impl BusGate for $GROUP {
                const ALWAYS_ON: Self::Periphs = $always_on;
            }
        )+
    };
}

bus_groups! {
    /// AHB1 peripheral gating
    AHB1: Ahb1Periphs => (ahb1enr, ahb1rstr, ahb1smenr);
    /// AHB2 peripheral gating, first half
    AHB2GRP1: Ahb2Grp1Periphs => (ahb2enr1, ahb2rstr1, ahb2smenr1);
    /// AHB2 peripheral gating, second half
    AHB2GRP2: Ahb2Grp2Periphs => (ahb2enr2, ahb2rstr2, ahb2smenr2);
    /// AHB3 peripheral gating
    AHB3: Ahb3Periphs => (ahb3enr, ahb3rstr, ahb3smenr);
    /// APB1 peripheral gating, first half
    ///
    /// The APB1 bus clock itself is gated from this handle, which also
    /// stops the peripherals of [`APB1GRP2`].
    APB1GRP1: Apb1Grp1Periphs => (apb1enr1, apb1rstr1, apb1smenr1);
    /// APB1 peripheral gating, second half
    APB1GRP2: Apb1Grp2Periphs => (apb1enr2, apb1rstr2, apb1smenr2);
    /// APB2 peripheral gating
    APB2: Apb2Periphs => (apb2enr, apb2rstr, apb2smenr);
    /// APB3 peripheral gating
    APB3: Apb3Periphs => (apb3enr, apb3rstr, apb3smenr);
}

bus_disable! {
    AHB1: (cfgr2, AHB1DIS) => Ahb1Periphs::FLASH
        .union(Ahb1Periphs::BKPSRAM)
        .union(Ahb1Periphs::DCACHE1)
        .union(Ahb1Periphs::SRAM1);
    // SRAM3 where present
    AHB2GRP1: (cfgr2, AHB2DIS1) => Ahb2Grp1Periphs::from_bits_truncate(0xc000_0000);
    // SRAM5 and SRAM6 where present
    AHB2GRP2: (cfgr2, AHB2DIS2) => Ahb2Grp2Periphs::from_bits_truncate(0xc000_0000);
    AHB3: (cfgr3, AHB3DIS) => Ahb3Periphs::PWR.union(Ahb3Periphs::SRAM4);
    APB1GRP1: (cfgr2, APB1DIS) => Apb1Grp1Periphs::NONE;
    APB2: (cfgr2, APB2DIS) => Apb2Periphs::NONE;
    APB3: (cfgr3, APB3DIS) => Apb3Periphs::NONE;
}

/// SmartRun domain autonomous mode gating
pub struct SRDAMR {
    rb: &'static RegisterBlock,
}

impl SRDAMR {
    pub(crate) fn new(rb: &'static RegisterBlock) -> Self {
        SRDAMR { rb }
    }
}

// unsafe: Owned exclusive access to SRDAMR
unsafe impl Send for SRDAMR {}

impl sealed::Autonomous for SRDAMR {
    type Amr = rcc::SRDAMR;

    #[inline(always)]
    fn amr(&self) -> &rcc::SRDAMR {
        self.rb.srdamr()
    }
}

impl AutonomousGate for SRDAMR {
    type Periphs = SrdAmrPeriphs;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rcc::gate::{Access, Counted, Op};
    use crate::rcc::mock_registers;
    use std::vec;

    fn poke<R: Access>(reg: &R, value: u32) {
        reg.modify_bits(|_| value);
    }

    #[test]
    fn enable_sets_only_requested_bits() {
        let rb = mock_registers();
        poke(rb.apb2enr(), 0x8000_0001);
        let mut apb2 = APB2::new(rb);

        apb2.enable_clock(Apb2Periphs::TIM1 | Apb2Periphs::SPI1);

        assert_eq!(
            rb.apb2enr().read_bits(),
            0x8000_0001 | (1 << 11) | (1 << 12)
        );
        assert!(apb2.is_enabled_clock(Apb2Periphs::TIM1 | Apb2Periphs::SPI1));
    }

    #[test]
    fn gpioa_scenario() {
        let rb = mock_registers();
        let mut ahb2 = AHB2GRP1::new(rb);
        let before = rb.ahb2enr1().read_bits();

        ahb2.enable_clock(Ahb2Grp1Periphs::GPIOA);

        assert_eq!(rb.ahb2enr1().read_bits() ^ before, 1 << 0);
        assert!(ahb2.is_enabled_clock(Ahb2Grp1Periphs::GPIOA));
        assert!(!ahb2
            .is_enabled_clock(Ahb2Grp1Periphs::GPIOA | Ahb2Grp1Periphs::GPIOB));
    }

    #[test]
    fn disable_clears_every_bit() {
        let rb = mock_registers();
        let mut apb1 = APB1GRP1::new(rb);
        let m = Apb1Grp1Periphs::TIM2 | Apb1Grp1Periphs::USART3;

        apb1.enable_clock(Apb1Grp1Periphs::ALL);
        apb1.disable_clock(m);

        assert!(!apb1.is_enabled_clock(Apb1Grp1Periphs::TIM2));
        assert!(!apb1.is_enabled_clock(Apb1Grp1Periphs::USART3));
        assert!(apb1.is_enabled_clock(Apb1Grp1Periphs::TIM3));
        assert_eq!(rb.apb1enr1().read_bits() & m.bits(), 0);
    }

    #[test]
    fn enable_is_idempotent() {
        let rb = mock_registers();
        let mut ahb1 = AHB1::new(rb);

        ahb1.enable_clock(Ahb1Periphs::GPDMA1 | Ahb1Periphs::CRC);
        let once = rb.ahb1enr().read_bits();
        ahb1.enable_clock(Ahb1Periphs::GPDMA1 | Ahb1Periphs::CRC);

        assert_eq!(rb.ahb1enr().read_bits(), once);
    }

    #[test]
    fn disjoint_masks_are_independent() {
        let rb = mock_registers();
        let mut apb3 = APB3::new(rb);
        let m1 = Apb3Periphs::LPUART1 | Apb3Periphs::I2C3;
        let m2 = Apb3Periphs::SYSCFG;

        apb3.enable_clock(m1);
        apb3.enable_clock(m2);
        assert!(apb3.is_enabled_clock(m1 | m2));

        apb3.disable_clock(m1);
        assert!(apb3.is_enabled_clock(m2));
        assert!(!apb3.is_enabled_clock(Apb3Periphs::LPUART1));

        apb3.enable_clock(m1);
        apb3.disable_clock(m2);
        assert!(apb3.is_enabled_clock(m1));
        assert!(!apb3.is_enabled_clock(m2));
    }

    #[test]
    fn reset_round_trip() {
        let rb = mock_registers();
        poke(rb.apb1rstr2(), 1 << 9);
        let mut apb1 = APB1GRP2::new(rb);
        let before = rb.apb1rstr2().read_bits();

        apb1.force_reset(Apb1Grp2Periphs::I2C4 | Apb1Grp2Periphs::LPTIM2);
        assert_eq!(rb.apb1rstr2().read_bits(), before | (1 << 1) | (1 << 5));

        apb1.release_reset(Apb1Grp2Periphs::I2C4 | Apb1Grp2Periphs::LPTIM2);
        assert_eq!(rb.apb1rstr2().read_bits(), before);
        // Reset does not touch the enable register
        assert_eq!(rb.apb1enr2().read_bits(), 0);
    }

    #[test]
    fn force_reset_all() {
        let rb = mock_registers();
        let mut ahb3 = AHB3::new(rb);

        ahb3.force_reset(Ahb3Periphs::ALL);
        assert_eq!(rb.ahb3rstr().read_bits(), Ahb3Periphs::ALL.bits());
        ahb3.release_reset(Ahb3Periphs::ALL);
        assert_eq!(rb.ahb3rstr().read_bits(), 0);
    }

    #[test]
    fn stop_sleep_clock() {
        let rb = mock_registers();
        let mut ahb2 = AHB2GRP2::new(rb);

        ahb2.enable_clock_stop_sleep(Ahb2Grp2Periphs::OCTOSPI1);
        assert!(ahb2.is_enabled_clock_stop_sleep(Ahb2Grp2Periphs::OCTOSPI1));
        assert_eq!(rb.ahb2smenr2().read_bits(), 1 << 4);
        assert_eq!(rb.ahb2enr2().read_bits(), 0);

        ahb2.disable_clock_stop_sleep(Ahb2Grp2Periphs::OCTOSPI1);
        assert!(!ahb2.is_enabled_clock_stop_sleep(Ahb2Grp2Periphs::OCTOSPI1));
        assert_eq!(rb.ahb2smenr2().read_bits(), 0);
    }

    #[test]
    fn bus_clock_round_trip() {
        let rb = mock_registers();
        // Every bus starts gated
        poke(rb.cfgr2(), 0x001f_0000);
        poke(rb.cfgr3(), 0x0003_0000);
        let mut ahb1 = AHB1::new(rb);
        let mut apb3 = APB3::new(rb);

        assert!(!ahb1.is_enabled_bus_clock());
        ahb1.enable_bus_clock();
        assert!(ahb1.is_enabled_bus_clock());
        assert_eq!(rb.cfgr2().read_bits(), 0x001e_0000);
        ahb1.disable_bus_clock();
        assert_eq!(rb.cfgr2().read_bits(), 0x001f_0000);

        apb3.enable_bus_clock();
        assert_eq!(rb.cfgr3().read_bits(), 0x0002_0000);
        apb3.disable_bus_clock();
        assert_eq!(rb.cfgr3().read_bits(), 0x0003_0000);
    }

    #[test]
    fn bus_disable_bits() {
        let cases: [(fn(&'static RegisterBlock), bool, u32); 7] = [
            (|rb| AHB1::new(rb).disable_bus_clock(), false, 1 << 16),
            (|rb| AHB2GRP1::new(rb).disable_bus_clock(), false, 1 << 17),
            (|rb| AHB2GRP2::new(rb).disable_bus_clock(), false, 1 << 18),
            (|rb| APB1GRP1::new(rb).disable_bus_clock(), false, 1 << 19),
            (|rb| APB2::new(rb).disable_bus_clock(), false, 1 << 20),
            (|rb| APB3::new(rb).disable_bus_clock(), true, 1 << 16),
            (|rb| AHB3::new(rb).disable_bus_clock(), true, 1 << 17),
        ];

        for (disable, in_cfgr3, bit) in cases {
            let rb = mock_registers();
            disable(rb);
            let (set, other) = if in_cfgr3 {
                (rb.cfgr3().read_bits(), rb.cfgr2().read_bits())
            } else {
                (rb.cfgr2().read_bits(), rb.cfgr3().read_bits())
            };
            assert_eq!(set, bit);
            assert_eq!(other, 0);
        }
    }

    #[test]
    fn always_on_peripherals() {
        assert!(AHB1::ALWAYS_ON.contains(Ahb1Periphs::SRAM1));
        assert!(AHB1::ALWAYS_ON.contains(Ahb1Periphs::FLASH));
        assert!(!AHB1::ALWAYS_ON.contains(Ahb1Periphs::GPDMA1));
        assert!(AHB2GRP1::ALWAYS_ON.contains(Ahb2Grp1Periphs::SRAM2));
        assert!(!AHB2GRP2::ALWAYS_ON.contains(Ahb2Grp2Periphs::OCTOSPI1));
        assert!(AHB3::ALWAYS_ON.contains(Ahb3Periphs::SRAM4));
        assert!(APB1GRP1::ALWAYS_ON.is_empty());
        assert!(APB2::ALWAYS_ON.is_empty());
        assert!(APB3::ALWAYS_ON.is_empty());
    }

    #[cfg(feature = "sram6")]
    #[test]
    fn sram6_stays_clocked() {
        assert!(AHB2GRP2::ALWAYS_ON
            .contains(Ahb2Grp2Periphs::SRAM5 | Ahb2Grp2Periphs::SRAM6));
    }

    #[test]
    fn autonomous_clock() {
        let rb = mock_registers();
        let mut srdamr = SRDAMR::new(rb);
        let m = SrdAmrPeriphs::LPUART1 | SrdAmrPeriphs::LPDMA1;

        srdamr.enable_autonomous_clock(m);
        assert_eq!(rb.srdamr().read_bits(), (1 << 6) | (1 << 28));
        assert!(srdamr.is_enabled_autonomous_clock(m));

        srdamr.disable_autonomous_clock(SrdAmrPeriphs::LPDMA1);
        assert!(srdamr.is_enabled_autonomous_clock(SrdAmrPeriphs::LPUART1));
        assert!(!srdamr.is_enabled_autonomous_clock(m));
    }

    /// Group backed by registers that record their accesses
    #[derive(Default)]
    struct Recorded {
        enr: Counted,
        rstr: Counted,
        smenr: Counted,
        cfgr: Counted,
        amr: Counted,
    }

    impl sealed::Gate for Recorded {
        const NAME: &'static str = "RECORDED";
        type Enr = Counted;
        type Rstr = Counted;
        type Smenr = Counted;

        fn enr(&self) -> &Counted {
            &self.enr
        }
        fn rstr(&self) -> &Counted {
            &self.rstr
        }
        fn smenr(&self) -> &Counted {
            &self.smenr
        }
    }

    impl PeripheralGate for Recorded {
        type Periphs = Apb3Periphs;
    }

    impl sealed::Bus for Recorded {
        type Cfgr = Counted;

        fn bus_disable(&self) -> (&Counted, u32) {
            (&self.cfgr, cfgr3::APB3DIS)
        }
    }

    impl BusGate for Recorded {
        const ALWAYS_ON: Apb3Periphs = Apb3Periphs::NONE;
    }

    impl sealed::Autonomous for Recorded {
        type Amr = Counted;

        fn amr(&self) -> &Counted {
            &self.amr
        }
    }

    impl AutonomousGate for Recorded {
        type Periphs = SrdAmrPeriphs;
    }

    #[test]
    fn enables_read_back_once() {
        let mut group = Recorded::default();

        group.enable_clock(Apb3Periphs::LPUART1);
        assert_eq!(group.enr.take_ops(), vec![Op::Modify, Op::Read]);

        group.enable_clock_stop_sleep(Apb3Periphs::LPUART1);
        assert_eq!(group.smenr.take_ops(), vec![Op::Modify, Op::Read]);

        group.enable_autonomous_clock(SrdAmrPeriphs::LPUART1);
        assert_eq!(group.amr.take_ops(), vec![Op::Modify, Op::Read]);

        group.cfgr.modify_bits(|_| cfgr3::APB3DIS);
        group.cfgr.take_ops();
        group.enable_bus_clock();
        assert_eq!(group.cfgr.take_ops(), vec![Op::Modify, Op::Read]);
        assert_eq!(group.cfgr.get(), 0);
    }

    #[test]
    fn disables_and_resets_do_not_read_back() {
        let mut group = Recorded::default();

        group.disable_clock(Apb3Periphs::LPUART1);
        group.force_reset(Apb3Periphs::LPUART1);
        group.release_reset(Apb3Periphs::LPUART1);
        group.disable_clock_stop_sleep(Apb3Periphs::LPUART1);
        group.disable_autonomous_clock(SrdAmrPeriphs::LPUART1);
        group.disable_bus_clock();

        assert_eq!(group.enr.take_ops(), vec![Op::Modify]);
        assert_eq!(group.rstr.take_ops(), vec![Op::Modify, Op::Modify]);
        assert_eq!(group.smenr.take_ops(), vec![Op::Modify]);
        assert_eq!(group.amr.take_ops(), vec![Op::Modify]);
        assert_eq!(group.cfgr.take_ops(), vec![Op::Modify]);
        assert_eq!(group.cfgr.get(), cfgr3::APB3DIS);
    }
}
