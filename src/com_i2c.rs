use super::com::{Com, MAX_TRANSFER};
use crate::picc::StatusCode;
use embedded_hal::blocking::i2c;
use heapless::Vec;
use log::debug;

pub struct ComI2c<I2C> {
    com: I2C,
    addr: u8,
}
impl<I2C> ComI2c<I2C> {
    pub fn new(i2c: I2C, addr: u8) -> Self {
        Self { com: i2c, addr }
    }

    pub fn release(self) -> I2C {
        self.com
    }
}
impl<I2C, E> Com for ComI2c<I2C>
where
    I2C: i2c::Read<Error = E> + i2c::Write<Error = E>,
    E: core::fmt::Debug,
{
    fn read(&mut self, reg: u8, value: &mut [u8]) -> Result<(), StatusCode> {
        self.com.write(self.addr, &[reg]).map_err(bus_error)?;
        self.com.read(self.addr, value).map_err(bus_error)
    }
    fn write(&mut self, reg: u8, value: &[u8]) -> Result<(), StatusCode> {
        let mut tx_buf: Vec<u8, { MAX_TRANSFER + 1 }> = Vec::new();
        tx_buf.push(reg).map_err(|_| StatusCode::NoRoom)?;
        tx_buf
            .extend_from_slice(value)
            .map_err(|_| StatusCode::NoRoom)?;
        self.com.write(self.addr, &tx_buf).map_err(bus_error)
    }
}

fn bus_error<E: core::fmt::Debug>(e: E) -> StatusCode {
    debug!("i2c error: {:?}", e);
    StatusCode::Bus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeI2c {
        written: std::vec::Vec<(u8, std::vec::Vec<u8>)>,
        reply: u8,
    }

    impl i2c::Write for FakeI2c {
        type Error = ();
        fn write(&mut self, addr: u8, bytes: &[u8]) -> Result<(), ()> {
            self.written.push((addr, bytes.to_vec()));
            Ok(())
        }
    }

    impl i2c::Read for FakeI2c {
        type Error = ();
        fn read(&mut self, _addr: u8, buffer: &mut [u8]) -> Result<(), ()> {
            buffer.iter_mut().for_each(|b| *b = self.reply);
            Ok(())
        }
    }

    #[test]
    fn register_is_prefixed_to_payload() {
        let mut com = ComI2c::new(FakeI2c::default(), 0x28);
        com.write(0x09, &[1, 2, 3]).unwrap();
        let i2c = com.release();
        assert_eq!(i2c.written, vec![(0x28, vec![0x09, 1, 2, 3])]);
    }

    #[test]
    fn read_selects_register_first() {
        let mut com = ComI2c::new(
            FakeI2c {
                reply: 0x92,
                ..Default::default()
            },
            0x28,
        );
        let mut value = [0u8; 1];
        com.read(0x37, &mut value).unwrap();
        assert_eq!(value, [0x92]);
        assert_eq!(com.release().written, vec![(0x28, vec![0x37])]);
    }

    #[test]
    fn oversized_write_is_rejected() {
        let mut com = ComI2c::new(FakeI2c::default(), 0x28);
        assert_eq!(com.write(0x09, &[0u8; 65]), Err(StatusCode::NoRoom));
    }
}
