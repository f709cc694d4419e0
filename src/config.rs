//! Typed acquisition settings.
//!
//! Each enum carries the code the MAX30100 expects in the corresponding register field.

/// Operating mode, written to the low three bits of the mode configuration register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    /// Only the IR LED is active.
    HeartRate = 0x02,
    /// Both the red and IR LEDs are active.
    SpO2      = 0x03,
}

/// LED pulse width, which also fixes the ADC resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PulseWidth {
    /// 200 µs, 13-bit ADC.
    Us200  = 0b00,
    /// 400 µs, 14-bit ADC.
    Us400  = 0b01,
    /// 800 µs, 15-bit ADC.
    Us800  = 0b10,
    /// 1600 µs, 16-bit ADC.
    Us1600 = 0b11,
}

/// Samples per second.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SampleRate {
    Sps50   = 0b000,
    Sps100  = 0b001,
    Sps167  = 0b010,
    Sps200  = 0b011,
    Sps400  = 0b100,
    Sps600  = 0b101,
    Sps800  = 0b110,
    Sps1000 = 0b111,
}

impl SampleRate {
    /// Nominal rate in samples per second.
    pub fn samples_per_second(self) -> u16 {
        match self {
            SampleRate::Sps50   => 50,
            SampleRate::Sps100  => 100,
            SampleRate::Sps167  => 167,
            SampleRate::Sps200  => 200,
            SampleRate::Sps400  => 400,
            SampleRate::Sps600  => 600,
            SampleRate::Sps800  => 800,
            SampleRate::Sps1000 => 1000,
        }
    }
}

/// Drive current of a single LED. Occupies one nibble of the LED configuration register.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LedCurrent {
    Ma0_0  = 0x0,
    Ma4_4  = 0x1,
    Ma7_6  = 0x2,
    Ma11_0 = 0x3,
    Ma14_2 = 0x4,
    Ma17_4 = 0x5,
    Ma20_8 = 0x6,
    Ma24_0 = 0x7,
    Ma27_1 = 0x8,
    Ma30_6 = 0x9,
    Ma33_8 = 0xA,
    Ma37_0 = 0xB,
    Ma40_2 = 0xC,
    Ma43_6 = 0xD,
    Ma46_8 = 0xE,
    Ma50_0 = 0xF,
}

const LED_MILLIAMPS: [f32; 16] = [
    0.0, 4.4, 7.6, 11.0, 14.2, 17.4, 20.8, 24.0,
    27.1, 30.6, 33.8, 37.0, 40.2, 43.6, 46.8, 50.0,
];

impl LedCurrent {
    /// Typical drive current in milliamps.
    pub fn milliamps(self) -> f32 {
        LED_MILLIAMPS[self as usize]
    }
}

/// Full acquisition setup applied by [`crate::MAX30100::init_with`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    pub mode: Mode,
    pub pulse_width: PulseWidth,
    pub sample_rate: SampleRate,
    pub high_resolution: bool,
    pub red_current: LedCurrent,
    pub ir_current: LedCurrent,
}

impl Default for Config {
    /// SpO2 mode, 1600 µs pulses at 100 samples per second with hi-res enabled,
    /// red LED at 27.1 mA and IR LED at 50 mA.
    fn default() -> Self {
        Self {
            mode: Mode::SpO2,
            pulse_width: PulseWidth::Us1600,
            sample_rate: SampleRate::Sps100,
            high_resolution: true,
            red_current: LedCurrent::Ma27_1,
            ir_current: LedCurrent::Ma50_0,
        }
    }
}
