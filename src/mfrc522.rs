use crate::com::{Com, MAX_TRANSFER};
use crate::link::{CardLink, Key, KeyType, Uid};
use crate::picc::{Command as PiccCommand, Response, StatusCode, Type, MF_ACK};
use crate::{BLOCK_SIZE, READ_BUFFER_SIZE};
use embedded_hal::blocking::delay::DelayMs;
use heapless::Vec;
use log::{debug, info};

type Result<T> = core::result::Result<T, StatusCode>;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum Register {
    // Reserved         = 0x00,
    CommandReg = 0x01,
    ComlEnReg = 0x02,
    DivlEnReg = 0x03,
    ComIrqReg = 0x04,
    DivIrqReg = 0x05,
    ErrorReg = 0x06,
    Status1Reg = 0x07,
    Status2Reg = 0x08,
    FIFODataReg = 0x09,
    FIFOLevelReg = 0x0A,
    WaterLevelReg = 0x0B,
    ControlReg = 0x0C,
    BitFramingReg = 0x0D,
    CollReg = 0x0E,
    // Reserved         = 0x0F,
    // Reserved         = 0x10,
    ModeReg = 0x11,
    TxModeReg = 0x12,
    RxModeReg = 0x13,
    TxControlReg = 0x14,
    TxASKReg = 0x15,
    TxSelReg = 0x16,
    RxSelReg = 0x17,
    RxThresholdReg = 0x18,
    DemodReg = 0x19,
    // Reserved         = 0x1A,
    // Reserved         = 0x1B,
    MfTxReg = 0x1C,
    MfRxReg = 0x1D,
    // Reserved         = 0x1E,
    SerialSpeedReg = 0x1F,
    // Reserved         = 0x20,
    CRCResultRegHigh = 0x21,
    CRCResultRegLow = 0x22,
    // Reserved         = 0x23,
    ModWidthReg = 0x24,
    // Reserved         = 0x25,
    RFCfgReg = 0x26,
    GsNReg = 0x27,
    CWGsPReg = 0x28,
    ModGsPReg = 0x29,
    TModeReg = 0x2A,
    TPrescalerReg = 0x2B,
    TReloadRegHigh = 0x2C,
    TReloadRegLow = 0x2D,
    TCounterValRegHigh = 0x2E,
    TCounterValRegLow = 0x2F,
    // Reserved         = 0x30,
    TestSel1Reg = 0x31,
    TestSel2Reg = 0x32,
    TestPinEnReg = 0x33,
    TestPinValueReg = 0x34,
    TestBusReg = 0x35,
    AutoTestReg = 0x36,
    VersionReg = 0x37,
    AnalogTestReg = 0x38,
    TestDAC1Reg = 0x39,
    TestDAC2Reg = 0x3A,
    TestADCReg = 0x3B,
    // Reserved         = 0x3C-0x3F,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Idle = 0b0000,
    Mem = 0b0001,
    GenerateRandomId = 0b0010,
    CalcCRC = 0b0011,
    Transmit = 0b0100,
    NoCmdChange = 0b0111,
    Receive = 0b1000,
    Transceive = 0b1100,
    MFAuthent = 0b1110,
    SoftReset = 0b1111,
}

/// Receiver gain, RFCfgReg[6..4].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RxGain {
    DB18 = 0b010,
    DB23 = 0b011,
    DB33 = 0b100,
    DB38 = 0b101,
    DB43 = 0b110,
    DB48 = 0b111,
}

const RX_GAIN_MASK: u8 = 0x07 << 4;

// ComIrqReg bits
const TIMER_IRQ: u8 = 0x01;
const IDLE_IRQ: u8 = 0x10;
const RX_IRQ: u8 = 0x20;
// DivIrqReg
const CRC_IRQ: u8 = 0x04;
// Status2Reg
const MF_CRYPTO1_ON: u8 = 0x08;

/// Each poll of ComIrqReg is one bus transfer; this bounds the wait well past the 25 ms
/// chip timer in case the chip stops answering.
const IRQ_POLLS: u16 = 2000;

pub struct MFRC522<C> {
    com: C,
}

impl<C: Com> MFRC522<C> {
    pub fn new(com: C) -> Self {
        Self { com }
    }

    pub fn release(self) -> C {
        self.com
    }

    pub fn read_register(&mut self, reg: Register) -> Result<u8> {
        let mut value = [0u8; 1];
        self.com.read(reg as u8, &mut value)?;
        Ok(value[0])
    }

    pub fn read_multiple(&mut self, reg: Register, value: &mut [u8]) -> Result<()> {
        self.com.read(reg as u8, value)
    }

    pub fn write_register(&mut self, reg: Register, value: u8) -> Result<()> {
        self.com.write(reg as u8, &[value])
    }

    pub fn write_multiple(&mut self, reg: Register, value: &[u8]) -> Result<()> {
        self.com.write(reg as u8, value)
    }

    pub fn init<D: DelayMs<u16>>(&mut self, delay: &mut D) -> Result<()> {
        self.reset(delay)?;

        self.write_register(Register::TxModeReg, 0x00)?;
        self.write_register(Register::RxModeReg, 0x00)?;
        // Reset ModWidthReg
        self.write_register(Register::ModWidthReg, 0x26)?;
        // When communicating with a PICC we need a timeout if something goes wrong.
        // f_timer = 13.56 MHz / (2*TPreScaler+1) where TPreScaler = [TPrescaler_Hi:TPrescaler_Lo].
        // TPrescaler_Hi are the four low bits in TModeReg. TPrescaler_Lo is TPrescalerReg.
        self.write_register(Register::TModeReg, 0x80)?; // TAuto=1; timer starts automatically at the end of the transmission in all communication modes at all speeds
        self.write_register(Register::TPrescalerReg, 0xA9)?; // TPreScaler = TModeReg[3..0]:TPrescalerReg, ie 0x0A9 = 169 => f_timer=40kHz, ie a timer period of 25μs.
        self.write_register(Register::TReloadRegHigh, 0x03)?; // Reload timer with 0x3E8 = 1000, ie 25ms before timeout.
        self.write_register(Register::TReloadRegLow, 0xE8)?;
        self.write_register(Register::TxASKReg, 0x40)?; // Default 0x00. Force a 100 % ASK modulation independent of the ModGsPReg register setting
        self.write_register(Register::ModeReg, 0x3D)?; // Default 0x3F. Set the preset value for the CRC coprocessor for the CalcCRC command to 0x6363 (ISO 14443-3 part 6.2.4)
        self.enable_antenna()?;

        let version = self.version()?;
        match version {
            0x91 | 0x92 => info!("MFRC522 v{}.0 ready", version & 0x0F),
            0x88 => info!("MFRC522 clone (FM17522) ready"),
            _ => info!("unknown reader version {:#04x}", version),
        }
        Ok(())
    }

    pub fn reset<D: DelayMs<u16>>(&mut self, delay: &mut D) -> Result<()> {
        self.write_register(Register::CommandReg, Command::SoftReset as u8)?;
        // PowerDown bit clears once the oscillator is back.
        let mut count = 0;
        loop {
            delay.delay_ms(50);
            let cmd_val = self.read_register(Register::CommandReg)?;
            if cmd_val & (1 << 4) == 0 || count >= 3 {
                break;
            }
            count += 1;
        }
        Ok(())
    }

    pub fn version(&mut self) -> Result<u8> {
        self.read_register(Register::VersionReg)
    }

    pub fn set_register_bitmask(&mut self, reg: Register, mask: u8) -> Result<()> {
        let tmp = self.read_register(reg)?;
        self.write_register(reg, tmp | mask)?;
        Ok(())
    }

    pub fn clear_register_bitmask(&mut self, reg: Register, mask: u8) -> Result<()> {
        let tmp = self.read_register(reg)?;
        self.write_register(reg, tmp & !mask)?;
        Ok(())
    }

    pub fn enable_antenna(&mut self) -> Result<()> {
        let control_reg = self.read_register(Register::TxControlReg)?;
        if (control_reg & 0x03) != 0x03 {
            self.write_register(Register::TxControlReg, control_reg | 0x03)?;
        }
        Ok(())
    }

    pub fn set_antenna_gain(&mut self, gain: RxGain) -> Result<()> {
        let current = self.read_register(Register::RFCfgReg)?;
        let wanted = (gain as u8) << 4;
        if current & RX_GAIN_MASK != wanted {
            self.write_register(Register::RFCfgReg, (current & !RX_GAIN_MASK) | wanted)?;
        }
        Ok(())
    }

    pub fn calculate_crc(&mut self, data: &[u8]) -> Result<[u8; 2]> {
        self.write_register(Register::CommandReg, Command::Idle as u8)?;
        self.write_register(Register::DivIrqReg, CRC_IRQ)?;
        self.write_register(Register::FIFOLevelReg, 0x80)?;
        self.write_multiple(Register::FIFODataReg, data)?;
        self.write_register(Register::CommandReg, Command::CalcCRC as u8)?;

        for _ in 0..5000 {
            let n = self.read_register(Register::DivIrqReg)?;
            if n & CRC_IRQ != 0 {
                self.write_register(Register::CommandReg, Command::Idle as u8)?;
                let res_low = self.read_register(Register::CRCResultRegLow)?;
                let res_high = self.read_register(Register::CRCResultRegHigh)?;
                return Ok([res_low, res_high]);
            }
        }
        Err(StatusCode::Timeout)
    }

    /// Runs `command` with `send_data` in the FIFO and collects at most `back_len`
    /// bytes of answer. A collision is not an error here: it is flagged on the response
    /// so the anticollision loop can use the partial data.
    #[allow(clippy::too_many_arguments)]
    pub fn communicate_with_picc(
        &mut self,
        command: Command,
        wait_irq: u8, // The bits in the ComIrqReg register that signals successful completion of the command.
        send_data: &[u8],
        back_len: usize, // Max number of bytes that should be returned.
        valid_bits: u8, // The number of valid bits in the last byte. 0 for 8 valid bits.
        rx_align: u8,   // Defines the bit position for the first bit received. Default 0.
        check_crc: bool,
    ) -> Result<Response> {
        // RxAlign = BitFramingReg[6..4]. TxLastBits = BitFramingReg[2..0]
        let bit_framing = (rx_align << 4) + valid_bits;

        self.write_register(Register::CommandReg, Command::Idle as u8)?; // Stop any active command.
        self.write_register(Register::ComIrqReg, 0x7F)?; // Clear all seven interrupt request bits.
        self.write_register(Register::FIFOLevelReg, 0x80)?; // FlushBuffer = 1, FIFO initialization
        self.write_multiple(Register::FIFODataReg, send_data)?;
        self.write_register(Register::BitFramingReg, bit_framing)?;
        self.write_register(Register::CommandReg, command as u8)?;

        if command == Command::Transceive {
            self.set_register_bitmask(Register::BitFramingReg, 0x80)?; // StartSend=1
        }

        let mut completed = false;
        for _ in 0..IRQ_POLLS {
            let n = self.read_register(Register::ComIrqReg)?;
            if n & wait_irq != 0 {
                completed = true;
                break;
            }
            if n & TIMER_IRQ != 0 {
                // Timer interrupt - nothing received in 25ms
                return Err(StatusCode::Timeout);
            }
        }
        if !completed {
            debug!("no answer from the reader chip");
            return Err(StatusCode::Timeout);
        }

        // ErrorReg[7..0] bits are: WrErr TempErr reserved BufferOvfl CollErr CRCErr ParityErr ProtocolErr
        let error_reg_value = self.read_register(Register::ErrorReg)?;
        if error_reg_value & 0x13 != 0 {
            return Err(StatusCode::Error);
        }

        let mut response = Response::default();
        if back_len != 0 {
            let n = self.read_register(Register::FIFOLevelReg)? as usize;
            if n > back_len || n > MAX_TRANSFER {
                return Err(StatusCode::NoRoom);
            }
            response
                .data
                .resize_default(n)
                .map_err(|_| StatusCode::NoRoom)?;
            self.read_multiple(Register::FIFODataReg, &mut response.data)?;
            // RxLastBits[2:0] indicates the number of valid bits in the last received byte.
            // If this value is 0b000, the whole byte is valid.
            response.valid_bits = self.read_register(Register::ControlReg)? & 0x07;
        }

        if error_reg_value & 0x08 != 0 {
            response.had_collision = true;
            return Ok(response);
        }

        if !response.data.is_empty() && check_crc {
            let data = &response.data;
            // In this case a MIFARE Classic NAK is not OK.
            if data.len() == 1 && response.valid_bits == 4 {
                return Err(StatusCode::MifareNack);
            }
            // We need at least the CRC_A value and all 8 bits of the last byte must be received.
            if data.len() < 2 || response.valid_bits != 0 {
                return Err(StatusCode::CrcWrong);
            }
            let control_buffer = self.calculate_crc(&data[..data.len() - 2])?;
            if data[data.len() - 2..] != control_buffer {
                return Err(StatusCode::CrcWrong);
            }
        }

        Ok(response)
    }

    pub fn transceive_data(
        &mut self,
        send_data: &[u8],
        back_len: usize,
        valid_bits: u8,
        rx_align: u8,
        check_crc: bool,
    ) -> Result<Response> {
        self.communicate_with_picc(
            Command::Transceive,
            RX_IRQ | IDLE_IRQ,
            send_data,
            back_len,
            valid_bits,
            rx_align,
            check_crc,
        )
    }

    /// Invites cards in IDLE state to answer. Returns the ATQA.
    pub fn request_a(&mut self) -> Result<[u8; 2]> {
        self.clear_register_bitmask(Register::CollReg, 0x80)?; // ValuesAfterColl=1 => Bits received after collision are cleared.

        // REQA needs the short frame format - transmit only 7 bits of the last (and only) byte.
        let response = self.transceive_data(&[PiccCommand::REQA as u8], 2, 7, 0, false)?;
        if response.had_collision {
            return Err(StatusCode::Collision);
        }
        if response.data.len() != 2 || response.valid_bits != 0 {
            // ATQA must be exactly 16 bits.
            return Err(StatusCode::Error);
        }
        Ok([response.data[0], response.data[1]])
    }

    /// Anticollision and select over all cascade levels.
    pub fn picc_select(&mut self) -> Result<Uid> {
        // Description of buffer structure:
        //		Byte 0: SEL 				Indicates the Cascade Level: PICC_CMD_SEL_CL1, PICC_CMD_SEL_CL2 or PICC_CMD_SEL_CL3
        //		Byte 1: NVB					Number of Valid Bits (in complete command, not just the UID): High nibble: complete bytes, Low nibble: Extra bits.
        //		Byte 2: UID-data or CT		CT means Cascade Tag.
        //		Byte 3: UID-data
        //		Byte 4: UID-data
        //		Byte 5: UID-data
        //		Byte 6: BCC					Block Check Character - XOR of bytes 2-5
        //		Byte 7: CRC_A
        //		Byte 8: CRC_A
        //
        //		UID size	Cascade level	Byte2	Byte3	Byte4	Byte5
        //		========	=============	=====	=====	=====	=====
        //		 4 bytes		1			uid0	uid1	uid2	uid3
        //		 7 bytes		1			CT		uid0	uid1	uid2
        //						2			uid3	uid4	uid5	uid6
        //		10 bytes		1			CT		uid0	uid1	uid2
        //						2			CT		uid3	uid4	uid5
        //						3			uid6	uid7	uid8	uid9
        let mut uid: Vec<u8, 10> = Vec::new();

        self.clear_register_bitmask(Register::CollReg, 0x80)?; // ValuesAfterColl=1 => Bits received after collision are cleared.

        for sel in [PiccCommand::SelCl1, PiccCommand::SelCl2, PiccCommand::SelCl3] {
            let mut buffer = [0u8; 9];
            buffer[0] = sel as u8;
            let sak = self.select_cascade_level(&mut buffer)?;

            // We do not check the BCC - it was constructed by us above.
            let part = if buffer[2] == PiccCommand::CT as u8 {
                &buffer[3..6]
            } else {
                &buffer[2..6]
            };
            uid.extend_from_slice(part)
                .map_err(|_| StatusCode::InternalError)?;

            if sak & 0x04 == 0 {
                let kind = Type::from_sak(sak);
                if kind.is_mifare_classic() {
                    debug!("selected {}", kind);
                } else {
                    debug!("selected {}, not MIFARE Classic", kind);
                }
                return Uid::new(&uid, sak);
            }
            // Cascade bit set - UID not complete yet
        }
        Err(StatusCode::InternalError)
    }

    fn select_cascade_level(&mut self, buffer: &mut [u8; 9]) -> Result<u8> {
        // The number of known UID bits in the current Cascade Level.
        let mut known_bits = 0usize;

        // Anticollision until all 32 bits are known, at most one round per bit.
        for _ in 0..=32 {
            if known_bits >= 32 {
                // All UID bits in this Cascade Level are known. This is a SELECT.
                buffer[1] = 0x70; // NVB - Number of Valid Bits: Seven whole bytes
                buffer[6] = buffer[2] ^ buffer[3] ^ buffer[4] ^ buffer[5];
                let crc = self.calculate_crc(&buffer[..7])?;
                buffer[7..9].copy_from_slice(&crc);

                let response = self.transceive_data(&buffer[..], 3, 0, 0, false)?;
                if response.had_collision {
                    return Err(StatusCode::Collision);
                }
                // SAK must be exactly 24 bits (1 byte + CRC_A).
                if response.data.len() != 3 || response.valid_bits != 0 {
                    return Err(StatusCode::Error);
                }
                let crc = self.calculate_crc(&response.data[..1])?;
                if response.data[1..3] != crc {
                    return Err(StatusCode::CrcWrong);
                }
                return Ok(response.data[0]);
            }

            // This is an ANTICOLLISION.
            let tx_last_bits = (known_bits % 8) as u8;
            let index = 2 + known_bits / 8; // SEL + NVB + whole UID bytes
            buffer[1] = ((index as u8) << 4) + tx_last_bits; // NVB - Number of Valid Bits
            let used = index + if tx_last_bits != 0 { 1 } else { 0 };
            let rx_align = tx_last_bits;

            let response =
                self.transceive_data(&buffer[..used], buffer.len() - index, tx_last_bits, rx_align, false)?;

            // The answer lands behind the bits we sent; the first byte shares the bits
            // below rx_align with our partial byte.
            for (i, &b) in response.data.iter().enumerate() {
                let Some(slot) = buffer.get_mut(index + i) else {
                    break;
                };
                if i == 0 && rx_align != 0 {
                    let mask = 0xFFu8 << rx_align;
                    *slot = (*slot & !mask) | (b & mask);
                } else {
                    *slot = b;
                }
            }

            if !response.had_collision {
                // We now have all 32 bits of the UID in this Cascade Level
                known_bits = 32;
                continue;
            }

            // More than one PICC in the field => collision.
            let value_of_coll_reg = self.read_register(Register::CollReg)?; // CollReg[7..0] bits are: ValuesAfterColl reserved CollPosNotValid CollPos[4:0]
            if value_of_coll_reg & 0x20 != 0 {
                // Without a valid collision position we cannot continue
                return Err(StatusCode::Collision);
            }
            let mut collision_pos = (value_of_coll_reg & 0x1F) as usize; // Values 0-31, 0 means bit 32.
            if collision_pos == 0 {
                collision_pos = 32;
            }
            if collision_pos <= known_bits {
                // No progress - should not happen
                return Err(StatusCode::InternalError);
            }
            // Choose the PICC with the bit set.
            known_bits = collision_pos;
            let count = known_bits % 8; // The bit to modify
            let check_bit = (known_bits - 1) % 8;
            let index = 1 + known_bits / 8 + if count != 0 { 1 } else { 0 };
            buffer[index] |= 1 << check_bit;
        }
        Err(StatusCode::InternalError)
    }

    pub fn new_card_present(&mut self) -> Result<()> {
        self.write_register(Register::TxModeReg, 0x00)?;
        self.write_register(Register::RxModeReg, 0x00)?;
        self.write_register(Register::ModWidthReg, 0x26)?; // Reset ModWidthReg

        match self.request_a() {
            // two cards answering still means a card is there
            Ok(_) | Err(StatusCode::Collision) => Ok(()),
            Err(e) => Err(e),
        }
    }

    pub fn read_card_serial(&mut self) -> Result<Uid> {
        self.picc_select()
    }

    /// MFAuthent with the last four UID bytes, as in NXP AN10927 section 3.2.5. Once it
    /// succeeds all traffic to the card is encrypted until [`Self::stop_crypto1`].
    pub fn authenticate(
        &mut self,
        command: PiccCommand,
        block: u8,
        key: &[u8; 6],
        uid: &Uid,
    ) -> Result<()> {
        let uid_bytes = uid.bytes();
        if uid_bytes.len() < 4 {
            return Err(StatusCode::Invalid);
        }
        let mut send_data = [0u8; 12];
        send_data[0] = command as u8;
        send_data[1] = block;
        send_data[2..8].copy_from_slice(key);
        send_data[8..12].copy_from_slice(&uid_bytes[uid_bytes.len() - 4..]);

        let response =
            self.communicate_with_picc(Command::MFAuthent, IDLE_IRQ, &send_data, 0, 0, 0, false)?;
        if response.had_collision {
            return Err(StatusCode::Collision);
        }
        Ok(())
    }

    /// Reads one block: 16 data bytes followed by their CRC_A, which is verified.
    pub fn mifare_read(&mut self, block: u8, buffer: &mut [u8; READ_BUFFER_SIZE]) -> Result<usize> {
        let mut cmd = [PiccCommand::MfRead as u8, block, 0, 0];
        let crc = self.calculate_crc(&cmd[..2])?;
        cmd[2..].copy_from_slice(&crc);

        let response = self.transceive_data(&cmd, READ_BUFFER_SIZE, 0, 0, true)?;
        if response.had_collision {
            return Err(StatusCode::Collision);
        }
        // Anything short of a full block plus CRC_A is not a block.
        if response.data.len() != READ_BUFFER_SIZE {
            return Err(StatusCode::Error);
        }
        buffer.copy_from_slice(&response.data);
        Ok(READ_BUFFER_SIZE)
    }

    pub fn mifare_write(&mut self, block: u8, data: &[u8; BLOCK_SIZE]) -> Result<()> {
        // Two phases: address, then data. The card ACKs each one.
        self.mifare_transceive(&[PiccCommand::MfWrite as u8, block], false)?;
        self.mifare_transceive(data, false)?;
        Ok(())
    }

    /// Sends up to 16 bytes plus CRC_A and expects the 4-bit MIFARE ACK back.
    fn mifare_transceive(&mut self, send_data: &[u8], accept_timeout: bool) -> Result<()> {
        if send_data.len() > BLOCK_SIZE {
            return Err(StatusCode::Invalid);
        }
        let mut cmd_buffer = [0u8; BLOCK_SIZE + 2];
        let len = send_data.len();
        cmd_buffer[..len].copy_from_slice(send_data);
        let crc = self.calculate_crc(send_data)?;
        cmd_buffer[len..len + 2].copy_from_slice(&crc);

        let response = match self.transceive_data(&cmd_buffer[..len + 2], cmd_buffer.len(), 0, 0, false) {
            Err(StatusCode::Timeout) if accept_timeout => return Ok(()),
            other => other?,
        };
        if response.had_collision {
            return Err(StatusCode::Collision);
        }
        if response.data.len() != 1 || response.valid_bits != 4 {
            return Err(StatusCode::Error);
        }
        if response.data[0] & 0x0F != MF_ACK {
            return Err(StatusCode::MifareNack);
        }
        Ok(())
    }

    pub fn halt_a(&mut self) -> Result<()> {
        let mut buffer = [PiccCommand::HLTA as u8, 0, 0, 0];
        let crc = self.calculate_crc(&buffer[..2])?;
        buffer[2..].copy_from_slice(&crc);

        // The PICC acknowledges HLTA by not answering for 1ms, so a timeout is success.
        match self.transceive_data(&buffer, 0, 0, 0, false) {
            Err(StatusCode::Timeout) => Ok(()),
            Ok(_) => Err(StatusCode::Error),
            Err(e) => Err(e),
        }
    }

    pub fn stop_crypto1(&mut self) -> Result<()> {
        // Status2Reg[7..0] bits are: TempSensClear I2CForceHS reserved reserved MFCrypto1On ModemState[2:0]
        self.clear_register_bitmask(Register::Status2Reg, MF_CRYPTO1_ON)
    }
}

impl<C: Com> CardLink for MFRC522<C> {
    fn card_present(&mut self) -> Result<()> {
        self.new_card_present()
    }
    fn read_serial(&mut self) -> Result<Uid> {
        self.read_card_serial()
    }
    fn authenticate(&mut self, block: u8, key: &Key, uid: &Uid) -> Result<()> {
        let command = match key.kind {
            KeyType::A => PiccCommand::MfAuthKeyA,
            KeyType::B => PiccCommand::MfAuthKeyB,
        };
        MFRC522::authenticate(self, command, block, &key.bytes, uid)
    }
    fn write_block(&mut self, block: u8, data: &[u8; BLOCK_SIZE]) -> Result<()> {
        self.mifare_write(block, data)
    }
    fn read_block(&mut self, block: u8, buffer: &mut [u8; READ_BUFFER_SIZE]) -> Result<usize> {
        self.mifare_read(block, buffer)
    }
    fn halt(&mut self) -> Result<()> {
        self.halt_a()
    }
    fn stop_cipher(&mut self) -> Result<()> {
        self.stop_crypto1()
    }
}
