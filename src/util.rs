use super::com::Com;
use super::mfrc522::{Register, MFRC522};
use super::picc::StatusCode;
use log::debug;

const DUMPED: [Register; 39] = [
    Register::CommandReg,
    Register::ComlEnReg,
    Register::DivlEnReg,
    Register::ComIrqReg,
    Register::DivIrqReg,
    Register::ErrorReg,
    Register::Status1Reg,
    Register::Status2Reg,
    Register::FIFODataReg,
    Register::FIFOLevelReg,
    Register::WaterLevelReg,
    Register::ControlReg,
    Register::BitFramingReg,
    Register::CollReg,
    Register::ModeReg,
    Register::TxModeReg,
    Register::RxModeReg,
    Register::TxControlReg,
    Register::TxASKReg,
    Register::TxSelReg,
    Register::RxSelReg,
    Register::RxThresholdReg,
    Register::DemodReg,
    Register::MfTxReg,
    Register::MfRxReg,
    Register::SerialSpeedReg,
    Register::CRCResultRegHigh,
    Register::CRCResultRegLow,
    Register::ModWidthReg,
    Register::RFCfgReg,
    Register::GsNReg,
    Register::CWGsPReg,
    Register::ModGsPReg,
    Register::TModeReg,
    Register::TPrescalerReg,
    Register::TReloadRegHigh,
    Register::TReloadRegLow,
    Register::TCounterValRegHigh,
    Register::TCounterValRegLow,
];

/// Logs the reader's configuration and status registers at debug level.
pub fn dump_registers<C: Com>(mfrc: &mut MFRC522<C>) -> Result<(), StatusCode> {
    for &reg in DUMPED.iter() {
        debug!("{:?}: {:02x?}", reg, mfrc.read_register(reg)?);
    }
    Ok(())
}
