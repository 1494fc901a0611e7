use super::com::{Com, MAX_TRANSFER};
use crate::picc::StatusCode;
use core::convert::Infallible;
use embedded_hal::blocking::spi;
use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;
use log::debug;

/// Chip select driven by the SPI peripheral itself (e.g. a Linux spidev CE line).
pub struct HardwareSelect;

impl OutputPin for HardwareSelect {
    type Error = Infallible;
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// SPI register bus. Every register operation is a single transfer framed by NSS.
pub struct ComSpi<SPI, NSS> {
    com: SPI,
    nss: NSS,
}

impl<SPI> ComSpi<SPI, HardwareSelect> {
    pub fn with_hardware_select(spi: SPI) -> Self {
        Self::new(spi, HardwareSelect)
    }
}

impl<SPI, NSS> ComSpi<SPI, NSS> {
    pub fn new(spi: SPI, nss: NSS) -> Self {
        Self { com: spi, nss }
    }

    pub fn release(self) -> (SPI, NSS) {
        (self.com, self.nss)
    }

    // MSB set means read, address lives in bits 6..1, bit 0 is always 0.
    fn read_address(reg: u8) -> u8 {
        ((reg << 1) | 0b1000_0000) & 0b1111_1110
    }

    fn write_address(reg: u8) -> u8 {
        (reg << 1) & 0b0111_1110
    }
}

impl<SPI, NSS, E> ComSpi<SPI, NSS>
where
    SPI: spi::Transfer<u8, Error = E> + spi::Write<u8, Error = E>,
    NSS: OutputPin,
    E: core::fmt::Debug,
{
    fn with_nss_low<F, T>(&mut self, f: F) -> Result<T, StatusCode>
    where
        F: FnOnce(&mut SPI) -> Result<T, E>,
    {
        self.nss.set_low().map_err(|_| StatusCode::Bus)?;
        let result = f(&mut self.com).map_err(|e| {
            debug!("spi error: {:?}", e);
            StatusCode::Bus
        });
        let pin = self.nss.set_high().map_err(|_| StatusCode::Bus);
        if result.is_ok() {
            pin?;
        }
        result
    }
}

impl<SPI, NSS, E> Com for ComSpi<SPI, NSS>
where
    SPI: spi::Transfer<u8, Error = E> + spi::Write<u8, Error = E>,
    NSS: OutputPin,
    E: core::fmt::Debug,
{
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<(), StatusCode> {
        if value.is_empty() {
            return Ok(());
        }
        if value.len() > MAX_TRANSFER {
            return Err(StatusCode::NoRoom);
        }
        // The address is clocked out once per byte wanted, then a 0 ends the burst.
        let address = Self::read_address(reg);
        let mut buf: Vec<u8, { MAX_TRANSFER + 1 }> = Vec::new();
        for _ in 0..value.len() {
            buf.push(address).map_err(|_| StatusCode::NoRoom)?;
        }
        buf.push(0).map_err(|_| StatusCode::NoRoom)?;

        let n = value.len();
        self.with_nss_low(|spi| {
            let rx = spi.transfer(&mut buf)?;
            value.copy_from_slice(&rx[1..=n]);
            Ok(())
        })
    }

    fn write(&mut self, reg: u8, value: &[u8]) -> Result<(), StatusCode> {
        let mut buf: Vec<u8, { MAX_TRANSFER + 1 }> = Vec::new();
        buf.push(Self::write_address(reg))
            .map_err(|_| StatusCode::NoRoom)?;
        buf.extend_from_slice(value)
            .map_err(|_| StatusCode::NoRoom)?;
        self.with_nss_low(|spi| spi.write(&buf))
    }
}
