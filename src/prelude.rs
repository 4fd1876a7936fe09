//! Prelude
pub use crate::rcc::AutonomousGate as _stm32u5xx_rcc_rcc_AutonomousGate;
pub use crate::rcc::BusGate as _stm32u5xx_rcc_rcc_BusGate;
pub use crate::rcc::PeripheralGate as _stm32u5xx_rcc_rcc_PeripheralGate;
pub use crate::rcc::RccExt as _stm32u5xx_rcc_rcc_RccExt;
pub use crate::rcc::ResetEnable as _stm32u5xx_rcc_rcc_ResetEnable;
