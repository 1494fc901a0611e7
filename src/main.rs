//! Raspberry Pi front end: MFRC522 on SPI0, mode switch and buzzer on GPIO, and the Pi
//! plugged into the host as a USB gadget exposing a serial port and a boot keyboard.

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};
use rfid_wedge::com_spi::ComSpi;
use rfid_wedge::feedback::{Feedback, Tone};
use rfid_wedge::host::HostChannel;
use rfid_wedge::keymap::{self, RELEASE_REPORT};
use rfid_wedge::mfrc522::RxGain;
use rfid_wedge::mode::ModeSelector;
use rfid_wedge::{util, Config, Controller, Outcome, MFRC522};
use rppal::gpio::{Gpio, OutputPin};
use rppal::hal::Delay;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};
use serialport::SerialPort;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Serial device the host talks to
    #[arg(long, env = "WEDGE_SERIAL", default_value = "/dev/ttyGS0")]
    serial: String,
    #[arg(long, default_value_t = 9600)]
    baud: u32,
    /// HID gadget device keystrokes are sent to
    #[arg(long, env = "WEDGE_KEYBOARD", default_value = "/dev/hidg0")]
    keyboard: PathBuf,
    /// BCM pin of the mode switch; high selects Write
    #[arg(long, default_value_t = 23)]
    mode_pin: u8,
    /// BCM pin of the buzzer
    #[arg(long, default_value_t = 18)]
    buzzer_pin: u8,
    #[arg(long)]
    no_buzzer: bool,
    /// Card block holding the identifier
    #[arg(long, default_value_t = 1, value_parser = parse_block)]
    block: u8,
    /// Seconds to wait for each byte typed on the serial link
    #[arg(long, default_value_t = 30)]
    input_timeout: u64,
    /// Halt the card even when authentication fails
    #[arg(long)]
    always_teardown: bool,
    #[arg(long, default_value_t = 1_000_000)]
    spi_clock: u32,
    /// Log all reader registers at debug level after init
    #[arg(long)]
    dump_registers: bool,
}

fn parse_block(s: &str) -> Result<u8, String> {
    let block: u8 = s.parse().map_err(|e| format!("{}", e))?;
    if !Config::is_data_block(block) {
        return Err(format!("block {} is not a data block", block));
    }
    Ok(block)
}

enum Buzzer {
    Pwm(OutputPin),
    Off,
}

impl Tone for Buzzer {
    fn tone(&mut self, freq_hz: u32) {
        if let Buzzer::Pwm(pin) = self {
            if let Err(e) = pin.set_pwm_frequency(freq_hz as f64, 0.5) {
                warn!("buzzer: {}", e);
            }
        }
    }

    // Software PWM has no one-shot mode; the next cycle's silence ends the cue.
    fn tone_for(&mut self, freq_hz: u32, duration: Duration) {
        debug!("cue for {:?}", duration);
        self.tone(freq_hz);
    }

    fn no_tone(&mut self) {
        if let Buzzer::Pwm(pin) = self {
            if let Err(e) = pin.clear_pwm() {
                warn!("buzzer: {}", e);
            }
        }
    }
}

/// The host as seen through the USB gadget: ACM serial plus HID keyboard.
struct GadgetHost {
    port: Box<dyn SerialPort>,
    keyboard_path: PathBuf,
    keyboard: Option<File>,
}

impl GadgetHost {
    fn new(port: Box<dyn SerialPort>, keyboard_path: PathBuf) -> Self {
        Self {
            port,
            keyboard_path,
            keyboard: None,
        }
    }

    fn send_report(keyboard: &mut File, report: &[u8; 8]) -> io::Result<()> {
        keyboard.write_all(report)?;
        keyboard.write_all(&RELEASE_REPORT)
    }
}

impl HostChannel for GadgetHost {
    fn read_bytes_until(&mut self, delimiter: u8, buf: &mut [u8], timeout: Duration) -> usize {
        if let Err(e) = self.port.set_timeout(timeout) {
            warn!("serial: {}", e);
            return 0;
        }
        let mut n = 0;
        let mut byte = [0u8; 1];
        while n < buf.len() {
            match self.port.read(&mut byte) {
                Ok(1) if byte[0] == delimiter => break,
                Ok(1) => {
                    buf[n] = byte[0];
                    n += 1;
                }
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::TimedOut => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!("serial: {}", e);
                    break;
                }
            }
        }
        n
    }

    fn write_line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = write!(self.port, "{}\r\n", args) {
            warn!("serial: {}", e);
        }
    }

    fn keyboard_begin(&mut self) {
        match OpenOptions::new().write(true).open(&self.keyboard_path) {
            Ok(file) => self.keyboard = Some(file),
            Err(e) => warn!("{}: {}", self.keyboard_path.display(), e),
        }
    }

    fn keystroke(&mut self, byte: u8) -> bool {
        let Some(keyboard) = self.keyboard.as_mut() else {
            return false;
        };
        let Some(key) = keymap::key_for(byte) else {
            warn!("no key for byte {:#04x}, skipped", byte);
            return false;
        };
        match Self::send_report(keyboard, &key.report()) {
            Ok(()) => true,
            Err(e) => {
                warn!("keyboard: {}", e);
                false
            }
        }
    }

    fn keyboard_end(&mut self) {
        self.keyboard = None;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, cli.spi_clock, Mode::Mode0)
        .context("opening SPI0")?;
    let mut mfrc = MFRC522::new(ComSpi::with_hardware_select(spi));
    mfrc.init(&mut Delay::new()).context("reader init")?;
    // Receiver gain to the maximum of 48 dB for better range.
    mfrc.set_antenna_gain(RxGain::DB48)
        .context("setting antenna gain")?;
    if cli.dump_registers {
        util::dump_registers(&mut mfrc).context("dumping registers")?;
    }

    let gpio = Gpio::new().context("opening GPIO")?;
    let mode_pin = gpio.get(cli.mode_pin)?.into_input();
    let buzzer = if cli.no_buzzer {
        Buzzer::Off
    } else {
        Buzzer::Pwm(gpio.get(cli.buzzer_pin)?.into_output())
    };

    let port = serialport::new(&cli.serial, cli.baud)
        .timeout(Duration::from_secs(cli.input_timeout))
        .open()
        .with_context(|| format!("opening {}", cli.serial))?;
    let mut host = GadgetHost::new(port, cli.keyboard);

    let config = Config {
        block: cli.block,
        input_timeout: Duration::from_secs(cli.input_timeout),
        teardown_on_auth_failure: cli.always_teardown,
        ..Default::default()
    };
    let feedback = Feedback::new(buzzer, config.tone_hz, config.read_cue);
    let mut controller = Controller::new(
        &mut mfrc,
        &mut host,
        ModeSelector::new(mode_pin),
        feedback,
        config,
    );

    info!("waiting for cards");
    loop {
        // An empty field costs one 25 ms chip timeout per poll, which paces this loop.
        match controller.run_cycle() {
            Ok(Outcome::Written(block)) => {
                info!("stored {:?}", String::from_utf8_lossy(&block).trim_end())
            }
            Ok(Outcome::Typed(n)) => debug!("typed {} key(s)", n),
            Err(e) if e.is_reported() => match e.status() {
                Some(status) => warn!("{} ({})", e, status),
                None => warn!("{}", e),
            },
            Err(_) => {}
        }
    }
}
