//! Register map of the MAX30100 and bit-field views of its configuration registers.

use bitfield::bitfield;

/// Value of [`Register::PartId`] on a genuine MAX30100.
pub const PART_ID: u8 = 0x11;

/// Number of entries the on-chip FIFO can hold.
pub const FIFO_DEPTH: u8 = 16;

/// Bytes per FIFO entry: IR high, IR low, red high, red low.
pub const FIFO_SAMPLE_BYTES: usize = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Register {
    FifoWritePointer = 0x02,
    OverflowCounter  = 0x03,
    FifoReadPointer  = 0x04,
    FifoData         = 0x05,
    ModeConfig       = 0x06,
    SpO2Config       = 0x07,
    LedConfig        = 0x09,
    TempInteger      = 0x16,
    TempFraction     = 0x17,
    RevisionId       = 0xFE,
    PartId           = 0xFF,
}

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct ModeConfiguration(u8);
    impl Debug;
    pub shutdown, set_shutdown: 7;
    pub reset, set_reset: 6;
    pub temperature_enable, set_temperature_enable: 3;
    pub mode, set_mode: 2, 0;
}

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct SpO2Configuration(u8);
    impl Debug;
    pub high_resolution, set_high_resolution: 6;
    pub sample_rate, set_sample_rate: 4, 2;
    pub pulse_width, set_pulse_width: 1, 0;
}

bitfield! {
    #[derive(Copy, Clone, PartialEq, Eq)]
    pub struct LedConfiguration(u8);
    impl Debug;
    pub red_current, set_red_current: 7, 4;
    pub ir_current, set_ir_current: 3, 0;
}

macro_rules! byte_register {
    ($($name:ident),* $(,)?) => {
        $(
            impl From<u8> for $name {
                fn from(raw: u8) -> Self {
                    Self(raw)
                }
            }

            impl From<$name> for u8 {
                fn from(reg: $name) -> u8 {
                    reg.0
                }
            }
        )*
    };
}

byte_register!(ModeConfiguration, SpO2Configuration, LedConfiguration);
