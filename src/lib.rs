#![no_std]
#![forbid(unsafe_code)]

#![doc = include_str!("../README.md")]

use embedded_hal::i2c::I2c;
use log::{debug, trace, warn};

pub mod config;
pub mod registers;

pub use config::{Config, LedCurrent, Mode, PulseWidth, SampleRate};

use registers::{
    LedConfiguration, ModeConfiguration, Register, SpO2Configuration,
    FIFO_DEPTH, FIFO_SAMPLE_BYTES, PART_ID,
};

/// The fixed I2C address of the MAX30100.
pub const DEFAULT_ADDRESS: u8 = 0x57;

/// Number of samples drained from the FIFO in one batch by [`MAX30100::update_buffer`].
pub const SAMPLE_BUFFER_LEN: usize = 15;

/// Errors reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// The underlying bus transaction failed.
    I2c(E),
    /// The part ID register did not hold the MAX30100 identifier.
    InvalidPartId(u8),
}

/// One raw FIFO entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    ir: u16,
    red: u16,
}
impl Sample {
    pub const fn new(ir: u16, red: u16) -> Self {
        Self { ir, red }
    }
    /// Infrared LED reading.
    pub const fn ir(&self) -> u16 {
        self.ir
    }
    /// Red LED reading.
    pub const fn red(&self) -> u16 {
        self.red
    }
}

/// Values derived from the raw data.
///
/// Only the temperature is ever measured. Heart rate and SpO2 are not computed by this driver.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub heart_rate: Option<u8>,
    pub spo2: Option<u8>,
    pub temperature: Option<f32>,
}

/// A MAX30100 sensor wrapper.
pub struct MAX30100<T: I2c> {
    i2c: T,
    addr: u8,
    samples: [Sample; SAMPLE_BUFFER_LEN],
    metrics: Metrics,
}
impl<T: I2c> MAX30100<T> {
    /// Constructs a MAX30100 sensor wrapper targeting the given address.
    /// Nothing is sent over the bus until [`MAX30100::init`] is called.
    pub fn new(addr: u8, i2c: T) -> Self {
        Self {
            i2c,
            addr,
            samples: [Sample::default(); SAMPLE_BUFFER_LEN],
            metrics: Metrics::default(),
        }
    }

    /// Consumes the wrapper and hands back the bus.
    pub fn release(self) -> T {
        self.i2c
    }

    fn write_reg(&mut self, reg: Register, data: u8) -> Result<(), Error<T::Error>> {
        trace!("write {:?} ({:#04x}) = {:#04x}", reg, reg as u8, data);
        self.i2c.write(self.addr, &[reg as u8, data]).map_err(Error::I2c)?;
        Ok(())
    }

    fn read_reg(&mut self, reg: Register) -> Result<u8, Error<T::Error>> {
        let mut buf = [0u8];
        self.i2c.write(self.addr, &[reg as u8]).map_err(Error::I2c)?;
        self.i2c.read(self.addr, &mut buf).map_err(Error::I2c)?;
        trace!("read {:?} ({:#04x}) = {:#04x}", reg, reg as u8, buf[0]);
        Ok(buf[0])
    }

    fn transform_spo2_config(&mut self, trans: impl FnOnce(&mut SpO2Configuration)) -> Result<(), Error<T::Error>> {
        let mut reg = SpO2Configuration::from(self.read_reg(Register::SpO2Config)?);
        trans(&mut reg);
        self.write_reg(Register::SpO2Config, reg.into())
    }

    fn transform_mode_config(&mut self, trans: impl FnOnce(&mut ModeConfiguration)) -> Result<(), Error<T::Error>> {
        let mut reg = ModeConfiguration::from(self.read_reg(Register::ModeConfig)?);
        trans(&mut reg);
        self.write_reg(Register::ModeConfig, reg.into())
    }

    /// Initializes the device with the default [`Config`].
    ///
    /// Fails with [`Error::InvalidPartId`] if the device does not identify as a MAX30100,
    /// in which case nothing is written to it.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.init_with(&Config::default())
    }

    /// Verifies the part ID, clears the FIFO and applies the given configuration.
    pub fn init_with(&mut self, config: &Config) -> Result<(), Error<T::Error>> {
        let id = self.part_id()?;
        if id != PART_ID {
            warn!("unexpected part id {:#04x}, expected {:#04x}", id, PART_ID);
            return Err(Error::InvalidPartId(id));
        }
        self.clear_fifo()?;
        self.set_mode(config.mode)?;
        self.set_pulse_width(config.pulse_width)?;
        self.set_sample_rate(config.sample_rate)?;
        self.set_high_resolution(config.high_resolution)?;
        self.set_led_current(config.red_current, config.ir_current)?;
        debug!("initialized with {:?}", config);
        Ok(())
    }

    /// Resets the FIFO write pointer, overflow counter and read pointer.
    /// Sample data already in the FIFO is not erased, only the bookkeeping.
    pub fn clear_fifo(&mut self) -> Result<(), Error<T::Error>> {
        self.write_reg(Register::FifoWritePointer, 0x00)?;
        self.write_reg(Register::OverflowCounter, 0x00)?;
        self.write_reg(Register::FifoReadPointer, 0x00)
    }

    /// Sets the operating mode.
    /// The whole mode register is overwritten, so this also clears the shutdown, reset and temperature bits.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), Error<T::Error>> {
        let mut reg = ModeConfiguration::from(0);
        reg.set_mode(mode as u8);
        self.write_reg(Register::ModeConfig, reg.into())
    }

    pub fn set_pulse_width(&mut self, pulse_width: PulseWidth) -> Result<(), Error<T::Error>> {
        self.transform_spo2_config(|reg| reg.set_pulse_width(pulse_width as u8))
    }

    pub fn set_sample_rate(&mut self, sample_rate: SampleRate) -> Result<(), Error<T::Error>> {
        self.transform_spo2_config(|reg| reg.set_sample_rate(sample_rate as u8))
    }

    /// Enables or disables high resolution sampling.
    pub fn set_high_resolution(&mut self, enabled: bool) -> Result<(), Error<T::Error>> {
        self.transform_spo2_config(|reg| reg.set_high_resolution(enabled))
    }

    /// Sets both LED drive currents with a single register write.
    pub fn set_led_current(&mut self, red: LedCurrent, ir: LedCurrent) -> Result<(), Error<T::Error>> {
        let mut reg = LedConfiguration::from(0);
        reg.set_red_current(red as u8);
        reg.set_ir_current(ir as u8);
        self.write_reg(Register::LedConfig, reg.into())
    }

    /// Transitions the device into power saving mode. Register contents are retained.
    /// See [`MAX30100::power_up`] to resume sampling.
    pub fn power_down(&mut self) -> Result<(), Error<T::Error>> {
        self.transform_mode_config(|reg| reg.set_shutdown(true))
    }
    /// Exits power saving mode. See [`MAX30100::power_down`] for details.
    pub fn power_up(&mut self) -> Result<(), Error<T::Error>> {
        self.transform_mode_config(|reg| reg.set_shutdown(false))
    }
    /// Requests a power-on reset of all registers. The chip clears the bit itself once done.
    pub fn reset(&mut self) -> Result<(), Error<T::Error>> {
        self.transform_mode_config(|reg| reg.set_reset(true))
    }

    /// Number of unread samples in the FIFO, computed from the write and read pointers.
    pub fn available_samples(&mut self) -> Result<u8, Error<T::Error>> {
        let write = self.fifo_write_pointer()?;
        let read = self.fifo_read_pointer()?;
        Ok(write.wrapping_sub(read) & (FIFO_DEPTH - 1))
    }

    /// Pops a single sample off the FIFO in one 4-byte read.
    pub fn read_fifo(&mut self) -> Result<Sample, Error<T::Error>> {
        let mut buf = [0u8; FIFO_SAMPLE_BYTES];
        self.i2c.write(self.addr, &[Register::FifoData as u8]).map_err(Error::I2c)?;
        self.i2c.read(self.addr, &mut buf).map_err(Error::I2c)?;
        Ok(Sample::new(
            u16::from_be_bytes([buf[0], buf[1]]),
            u16::from_be_bytes([buf[2], buf[3]]),
        ))
    }

    /// Refills the local sample buffer if exactly [`SAMPLE_BUFFER_LEN`] samples are waiting in the FIFO.
    /// Any other fill level leaves the buffer untouched.
    ///
    /// Must be polled often enough that the FIFO does not overflow between calls.
    /// Returns `true` when a batch was drained.
    pub fn update_buffer(&mut self) -> Result<bool, Error<T::Error>> {
        if self.available_samples()? as usize != SAMPLE_BUFFER_LEN {
            return Ok(false);
        }
        for i in 0..SAMPLE_BUFFER_LEN {
            let sample = self.read_fifo()?;
            debug!("IR_data: {}", sample.ir());
            debug!("red_data: {}", sample.red());
            self.samples[i] = sample;
        }
        Ok(true)
    }

    /// The most recently drained batch, oldest first.
    pub fn samples(&self) -> &[Sample; SAMPLE_BUFFER_LEN] {
        &self.samples
    }

    /// Derived values gathered so far.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Triggers a die temperature conversion and reads back the result in Celsius.
    ///
    /// The result registers are read right after the trigger without waiting for the
    /// conversion to finish, so the value may come from the previous conversion.
    pub fn get_temperature(&mut self) -> Result<f32, Error<T::Error>> {
        self.transform_mode_config(|reg| reg.set_temperature_enable(true))?;
        let integer = self.read_reg(Register::TempInteger)?;
        let fraction = self.read_reg(Register::TempFraction)?;
        let temp = integer as f32 + fraction as f32 * 0.0625;
        self.metrics.temperature = Some(temp);
        Ok(temp)
    }

    pub fn part_id(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_reg(Register::PartId)
    }
    pub fn revision_id(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_reg(Register::RevisionId)
    }
    pub fn fifo_write_pointer(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_reg(Register::FifoWritePointer)
    }
    /// Number of samples lost because the FIFO was full.
    pub fn overflow_count(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_reg(Register::OverflowCounter)
    }
    pub fn fifo_read_pointer(&mut self) -> Result<u8, Error<T::Error>> {
        self.read_reg(Register::FifoReadPointer)
    }
}
