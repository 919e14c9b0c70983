//! Configuration commands
//!
//! This module contains the write-only commands that set up the radio:
//! - Band selection, crystal load and FIFO enable
//! - Power management (receiver/transmitter chains, synthesizer, oscillator)
//! - Carrier frequency and data rate
//! - Receiver baseband, LNA and RSSI configuration
//! - Clock recovery and data filter
//! - FIFO interrupt level and sync-pattern handling
//! - Automatic frequency control
//! - Transmitter deviation and output power
//! - Wake-up timer, low duty-cycle mode, clock output and battery monitor
//!
//! The `Default` value of each command is the stock 434 MHz / 4.8 kbps
//! profile used by [`Config::default`](crate::Config::default).

use bitflags::bitflags;
use core::convert::Infallible;

use crate::{Command, ToByteArray};

/// Frequency band the front end is tuned for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// 315 MHz (RFM12B only)
    Mhz315 = 0b00,
    /// 433 MHz
    #[default]
    Mhz433 = 0b01,
    /// 868 MHz
    Mhz868 = 0b10,
    /// 915 MHz
    Mhz915 = 0b11,
}

impl Band {
    /// Lowest synthesizer frequency of the band, in kHz
    pub const fn base_khz(self) -> u32 {
        match self {
            Band::Mhz315 => 310_000,
            Band::Mhz433 => 430_000,
            Band::Mhz868 => 860_000,
            Band::Mhz915 => 900_000,
        }
    }

    /// Synthesizer step of the band, in units of 0.5 kHz
    const fn step_half_khz(self) -> u32 {
        match self {
            Band::Mhz315 | Band::Mhz433 => 5,
            Band::Mhz868 => 10,
            Band::Mhz915 => 15,
        }
    }
}

/// Configuration setting parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationSetting {
    /// Enable the internal data register (required for the transmit register)
    pub data_register: bool,
    /// Enable the receive FIFO
    pub fifo: bool,
    /// Frequency band
    pub band: Band,
    /// Crystal load capacitance, 8.5 pF + 0.5 pF * value (0..=15)
    pub crystal_load: u8,
}

impl Default for ConfigurationSetting {
    fn default() -> Self {
        Self {
            data_register: true,
            fifo: true,
            band: Band::Mhz433,
            // 12.0 pF
            crystal_load: 0x7,
        }
    }
}

impl ToByteArray for ConfigurationSetting {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.data_register as u8) << 7
            | (self.fifo as u8) << 6
            | (self.band as u8) << 4
            | (self.crystal_load & 0x0F)])
    }
}

/// Configuration setting command (0x8000)
///
/// Selects the band and crystal load, and enables the data register and FIFO.
#[derive(Debug, Clone)]
pub struct SetConfiguration {
    /// Configuration parameters
    pub config: ConfigurationSetting,
}

impl Command for SetConfiguration {
    type IdType = u16;
    type CommandParameters = ConfigurationSetting;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0x8000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

bitflags! {
    /// Power management blocks
    ///
    /// Each set bit switches the corresponding block on, except
    /// [`CLOCK_OUTPUT_DISABLE`](PowerFlags::CLOCK_OUTPUT_DISABLE).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PowerFlags: u8 {
        /// Whole receiver chain (ER)
        const RECEIVER = 1 << 7;
        /// Receiver baseband circuit (EBB)
        const BASEBAND = 1 << 6;
        /// PLL, PA and transmission start (ET)
        const TRANSMITTER = 1 << 5;
        /// Frequency synthesizer (ES)
        const SYNTHESIZER = 1 << 4;
        /// Crystal oscillator (EX)
        const CRYSTAL = 1 << 3;
        /// Low battery detector (EB)
        const LOW_BATTERY_DETECTOR = 1 << 2;
        /// Wake-up timer (EW)
        const WAKE_UP_TIMER = 1 << 1;
        /// Disable the clock output pin (DC)
        const CLOCK_OUTPUT_DISABLE = 1;

        /// Everything off
        const IDLE = Self::CLOCK_OUTPUT_DISABLE.bits();
        /// Receiver chain running
        const LISTEN = Self::RECEIVER.bits()
            | Self::BASEBAND.bits()
            | Self::CRYSTAL.bits()
            | Self::CLOCK_OUTPUT_DISABLE.bits();
        /// Transmitter running
        const TRANSMIT = Self::TRANSMITTER.bits()
            | Self::SYNTHESIZER.bits()
            | Self::CRYSTAL.bits()
            | Self::CLOCK_OUTPUT_DISABLE.bits();
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PowerFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PowerFlags({=u8:#x})", self.bits())
    }
}

impl ToByteArray for PowerFlags {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.bits()])
    }
}

/// Power management command (0x8200)
///
/// # Important Notes
/// - Enabling the transmitter starts sending the transmit register contents
/// - The receiver and transmitter must not be enabled together
#[derive(Debug, Clone)]
pub struct PowerManagement {
    /// Blocks to switch on
    pub config: PowerFlags,
}

impl Command for PowerManagement {
    type IdType = u16;
    type CommandParameters = PowerFlags;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0x8200
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Frequency setting command (0xA000)
///
/// Sets the 12-bit synthesizer value `F`. The carrier is
/// `base + F * step`, where base and step depend on the [`Band`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrequencySetting {
    /// Synthesizer value, valid range 96..=3903
    pub value: u16,
}

impl FrequencySetting {
    /// Smallest synthesizer value accepted by the chip
    pub const MIN: u16 = 96;
    /// Largest synthesizer value accepted by the chip
    pub const MAX: u16 = 3903;

    /// Computes the synthesizer value for a carrier in kHz.
    ///
    /// Returns `None` if the carrier cannot be reached in `band`.
    pub fn from_khz(band: Band, khz: u32) -> Option<Self> {
        let offset = khz.checked_sub(band.base_khz())?;
        let value = offset.checked_mul(2)? / band.step_half_khz();
        let value = u16::try_from(value).ok()?;

        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(Self { value })
    }

    /// Carrier frequency in kHz, rounded down.
    pub fn khz(self, band: Band) -> u32 {
        band.base_khz() + u32::from(self.value) * band.step_half_khz() / 2
    }
}

impl Default for FrequencySetting {
    fn default() -> Self {
        // 434 MHz in the 433 MHz band
        Self { value: 0x640 }
    }
}

impl ToByteArray for FrequencySetting {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok((self.value & 0x0FFF).to_be_bytes())
    }
}

/// Frequency setting command (0xA000)
#[derive(Debug, Clone)]
pub struct SetFrequency {
    /// Synthesizer setting
    pub config: FrequencySetting,
}

impl Command for SetFrequency {
    type IdType = u16;
    type CommandParameters = FrequencySetting;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xA000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Bit rate divider
///
/// `rate = 10 MHz / 29 / (divider + 1) / (1 + 7 * prescaler)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataRate {
    /// Additional divide-by-8 prescaler (cs)
    pub prescaler: bool,
    /// 7-bit divider (R)
    pub divider: u8,
}

impl DataRate {
    const BASE: u32 = 10_000_000 / 29;

    /// Closest setting for the requested rate in bits per second.
    ///
    /// Returns `None` for zero, rates above the fastest setting and rates
    /// below the slowest one (about 337 bps).
    pub fn from_bps(bps: u32) -> Option<Self> {
        if bps == 0 || bps > Self::BASE {
            return None;
        }
        let steps = (Self::BASE + bps / 2) / bps;
        if steps <= 128 {
            return Some(Self {
                prescaler: false,
                divider: steps.max(1) as u8 - 1,
            });
        }
        let steps = (Self::BASE / 8 + bps / 2) / bps;
        if steps > 128 {
            return None;
        }
        Some(Self {
            prescaler: true,
            divider: steps as u8 - 1,
        })
    }

    /// Effective bit rate in bits per second, rounded down.
    pub fn bits_per_second(self) -> u32 {
        let prescale = if self.prescaler { 8 } else { 1 };
        Self::BASE / (u32::from(self.divider & 0x7F) + 1) / prescale
    }
}

impl Default for DataRate {
    fn default() -> Self {
        // 4.8 kbps
        Self {
            prescaler: false,
            divider: 0x47,
        }
    }
}

impl ToByteArray for DataRate {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.prescaler as u8) << 7 | (self.divider & 0x7F)])
    }
}

/// Data rate command (0xC600)
#[derive(Debug, Clone)]
pub struct SetDataRate {
    /// Bit rate divider
    pub config: DataRate,
}

impl Command for SetDataRate {
    type IdType = u16;
    type CommandParameters = DataRate;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xC600
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Valid data indicator response time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VdiResponse {
    /// Fast
    #[default]
    Fast = 0,
    /// Medium
    Medium = 1,
    /// Slow
    Slow = 2,
    /// Always on
    AlwaysOn = 3,
}

/// Receiver baseband bandwidth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BasebandBandwidth {
    /// 400 kHz
    Khz400 = 1,
    /// 340 kHz
    Khz340 = 2,
    /// 270 kHz
    Khz270 = 3,
    /// 200 kHz
    Khz200 = 4,
    /// 134 kHz
    #[default]
    Khz134 = 5,
    /// 67 kHz
    Khz67 = 6,
}

/// LNA gain relative to maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LnaGain {
    /// 0 dB
    #[default]
    Db0 = 0,
    /// -6 dB
    Minus6Db = 1,
    /// -14 dB
    Minus14Db = 2,
    /// -20 dB
    Minus20Db = 3,
}

/// Digital RSSI threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RssiThreshold {
    /// -103 dBm
    #[default]
    Minus103Dbm = 0,
    /// -97 dBm
    Minus97Dbm = 1,
    /// -91 dBm
    Minus91Dbm = 2,
    /// -85 dBm
    Minus85Dbm = 3,
    /// -79 dBm
    Minus79Dbm = 4,
    /// -73 dBm
    Minus73Dbm = 5,
}

/// Receiver control parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReceiverControl {
    /// Pin 16 function: `true` drives VDI out, `false` is the nINT input
    pub vdi_output: bool,
    /// VDI response time
    pub vdi_response: VdiResponse,
    /// Baseband bandwidth
    pub bandwidth: BasebandBandwidth,
    /// LNA gain
    pub lna_gain: LnaGain,
    /// RSSI detector threshold
    pub rssi_threshold: RssiThreshold,
}

impl Default for ReceiverControl {
    fn default() -> Self {
        Self {
            vdi_output: true,
            vdi_response: VdiResponse::Fast,
            bandwidth: BasebandBandwidth::Khz134,
            lna_gain: LnaGain::Db0,
            rssi_threshold: RssiThreshold::Minus103Dbm,
        }
    }
}

impl ToByteArray for ReceiverControl {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let word = (self.vdi_output as u16) << 10
            | (self.vdi_response as u16) << 8
            | (self.bandwidth as u16) << 5
            | (self.lna_gain as u16) << 3
            | self.rssi_threshold as u16;
        Ok(word.to_be_bytes())
    }
}

/// Receiver control command (0x9000)
#[derive(Debug, Clone)]
pub struct SetReceiverControl {
    /// Receiver parameters
    pub config: ReceiverControl,
}

impl Command for SetReceiverControl {
    type IdType = u16;
    type CommandParameters = ReceiverControl;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0x9000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Clock recovery and data filter parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataFilter {
    /// Clock recovery lock control: automatic (`true`) or manual
    pub auto_lock: bool,
    /// Clock recovery mode in manual lock: fast (`true`) or slow
    pub fast_lock: bool,
    /// Use the external analog RC filter instead of the digital filter
    pub analog_filter: bool,
    /// Data quality detector threshold (0..=7)
    pub dqd_threshold: u8,
}

impl Default for DataFilter {
    fn default() -> Self {
        Self {
            auto_lock: true,
            fast_lock: false,
            analog_filter: false,
            dqd_threshold: 4,
        }
    }
}

impl ToByteArray for DataFilter {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        // bits 5 and 3 must be written as 1
        Ok([0x28
            | (self.auto_lock as u8) << 7
            | (self.fast_lock as u8) << 6
            | (self.analog_filter as u8) << 4
            | (self.dqd_threshold & 0x07)])
    }
}

/// Data filter command (0xC200)
#[derive(Debug, Clone)]
pub struct SetDataFilter {
    /// Data filter parameters
    pub config: DataFilter,
}

impl Command for SetDataFilter {
    type IdType = u16;
    type CommandParameters = DataFilter;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xC200
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// FIFO and reset mode parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoMode {
    /// Number of received bits that raise the FIFO interrupt (0..=15)
    pub interrupt_level: u8,
    /// Sync on the single byte 0xD4 instead of 0x2D 0xD4 (RFM12B only)
    pub short_sync: bool,
    /// Fill the FIFO without waiting for the sync pattern
    pub always_fill: bool,
    /// Start filling the FIFO on the next sync pattern; clearing stops the fill
    pub fill_enable: bool,
    /// Disable the highly sensitive reset
    pub sensitive_reset_disable: bool,
}

impl FifoMode {
    /// Returns a copy with FIFO fill armed or stopped.
    pub const fn with_fill(self, fill_enable: bool) -> Self {
        Self {
            fill_enable,
            ..self
        }
    }
}

impl Default for FifoMode {
    fn default() -> Self {
        Self {
            interrupt_level: 8,
            short_sync: false,
            always_fill: false,
            fill_enable: false,
            sensitive_reset_disable: true,
        }
    }
}

impl ToByteArray for FifoMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.interrupt_level & 0x0F) << 4
            | (self.short_sync as u8) << 3
            | (self.always_fill as u8) << 2
            | (self.fill_enable as u8) << 1
            | self.sensitive_reset_disable as u8])
    }
}

/// FIFO and reset mode command (0xCA00)
///
/// # Important Notes
/// - The FIFO fill stops when `fill_enable` is cleared
/// - Setting `fill_enable` again re-arms sync-pattern detection
#[derive(Debug, Clone)]
pub struct SetFifoMode {
    /// FIFO parameters
    pub config: FifoMode,
}

impl Command for SetFifoMode {
    type IdType = u16;
    type CommandParameters = FifoMode;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xCA00
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// When the AFC runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AfcMode {
    /// Controlled by the microcontroller through the strobe bit
    Manual = 0,
    /// Runs once after power-up
    PowerUpOnce = 1,
    /// Keeps the offset only while VDI is high
    #[default]
    KeepWhileVdi = 2,
    /// Keeps the offset independently of VDI
    Independent = 3,
}

/// Maximum offset the AFC may apply, in synthesizer steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AfcRange {
    /// No restriction
    #[default]
    Unrestricted = 0,
    /// +15 / -16
    Plus15Minus16 = 1,
    /// +7 / -8
    Plus7Minus8 = 2,
    /// +3 / -4
    Plus3Minus4 = 3,
}

/// Automatic frequency control parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutomaticFrequencyControl {
    /// Operating mode
    pub mode: AfcMode,
    /// Range limit
    pub range: AfcRange,
    /// Strobe edge for manual mode
    pub strobe: bool,
    /// High accuracy (fine) mode
    pub fine: bool,
    /// Apply the measured offset to the synthesizer
    pub offset_enable: bool,
    /// Enable the offset calculation
    pub enable: bool,
}

impl Default for AutomaticFrequencyControl {
    fn default() -> Self {
        Self {
            mode: AfcMode::KeepWhileVdi,
            range: AfcRange::Unrestricted,
            strobe: false,
            fine: false,
            offset_enable: true,
            enable: true,
        }
    }
}

impl ToByteArray for AutomaticFrequencyControl {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.mode as u8) << 6
            | (self.range as u8) << 4
            | (self.strobe as u8) << 3
            | (self.fine as u8) << 2
            | (self.offset_enable as u8) << 1
            | self.enable as u8])
    }
}

/// AFC command (0xC400)
#[derive(Debug, Clone)]
pub struct SetAutomaticFrequencyControl {
    /// AFC parameters
    pub config: AutomaticFrequencyControl,
}

impl Command for SetAutomaticFrequencyControl {
    type IdType = u16;
    type CommandParameters = AutomaticFrequencyControl;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xC400
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Transmitter output power relative to maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputPower {
    /// 0 dB
    #[default]
    Max = 0,
    /// -2.5 dB
    Minus2_5Db = 1,
    /// -5 dB
    Minus5Db = 2,
    /// -7.5 dB
    Minus7_5Db = 3,
    /// -10 dB
    Minus10Db = 4,
    /// -12.5 dB
    Minus12_5Db = 5,
    /// -15 dB
    Minus15Db = 6,
    /// -17.5 dB
    Minus17_5Db = 7,
}

/// Transmitter configuration parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransmitterConfig {
    /// Invert the FSK modulation polarity
    pub invert_polarity: bool,
    /// Frequency deviation, (value + 1) * 15 kHz (0..=15)
    pub deviation: u8,
    /// Output power
    pub power: OutputPower,
}

impl TransmitterConfig {
    /// Frequency deviation in kHz
    pub const fn deviation_khz(self) -> u32 {
        ((self.deviation & 0x0F) as u32 + 1) * 15
    }
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            invert_polarity: false,
            // 90 kHz
            deviation: 5,
            power: OutputPower::Max,
        }
    }
}

impl ToByteArray for TransmitterConfig {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        let word = (self.invert_polarity as u16) << 8
            | u16::from(self.deviation & 0x0F) << 4
            | self.power as u16;
        Ok(word.to_be_bytes())
    }
}

/// Transmitter configuration command (0x9800)
#[derive(Debug, Clone)]
pub struct SetTransmitterConfig {
    /// Transmitter parameters
    pub config: TransmitterConfig,
}

impl Command for SetTransmitterConfig {
    type IdType = u16;
    type CommandParameters = TransmitterConfig;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0x9800
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Wake-up timer period, `1.03 ms * mantissa * 2^exponent + 0.5 ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WakeUpPeriod {
    /// Exponent (0..=29)
    pub exponent: u8,
    /// Mantissa
    pub mantissa: u8,
}

impl ToByteArray for WakeUpPeriod {
    type Error = Infallible;
    type Array = [u8; 2];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.exponent & 0x1F, self.mantissa])
    }
}

/// Wake-up timer command (0xE000)
///
/// The timer only runs while [`PowerFlags::WAKE_UP_TIMER`] is set.
#[derive(Debug, Clone)]
pub struct SetWakeUpTimer {
    /// Timer period
    pub config: WakeUpPeriod,
}

impl Command for SetWakeUpTimer {
    type IdType = u16;
    type CommandParameters = WakeUpPeriod;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xE000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Low duty-cycle mode parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowDutyCycle {
    /// Receiver on-time, `(2 * duty + 1) / mantissa` percent of the wake-up period
    pub duty: u8,
    /// Enable low duty-cycle mode
    pub enable: bool,
}

impl ToByteArray for LowDutyCycle {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.duty & 0x7F) << 1 | self.enable as u8])
    }
}

/// Low duty-cycle command (0xC800)
#[derive(Debug, Clone)]
pub struct SetLowDutyCycle {
    /// Duty-cycle parameters
    pub config: LowDutyCycle,
}

impl Command for SetLowDutyCycle {
    type IdType = u16;
    type CommandParameters = LowDutyCycle;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xC800
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}

/// Clock output frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockOutput {
    /// 1 MHz
    Mhz1 = 0,
    /// 1.25 MHz
    Mhz1_25 = 1,
    /// 1.66 MHz
    #[default]
    Mhz1_66 = 2,
    /// 2 MHz
    Mhz2 = 3,
    /// 2.5 MHz
    Mhz2_5 = 4,
    /// 3.33 MHz
    Mhz3_33 = 5,
    /// 5 MHz
    Mhz5 = 6,
    /// 10 MHz
    Mhz10 = 7,
}

/// Low battery detector and clock divider parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowBatteryClock {
    /// Clock output frequency
    pub clock: ClockOutput,
    /// Low battery threshold, 2.2 V + 0.1 V * value (0..=15)
    pub threshold: u8,
}

impl ToByteArray for LowBatteryClock {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([(self.clock as u8) << 5 | (self.threshold & 0x0F)])
    }
}

/// Low battery detector and clock divider command (0xC000)
#[derive(Debug, Clone)]
pub struct SetLowBatteryClock {
    /// Battery monitor and clock parameters
    pub config: LowBatteryClock,
}

impl Command for SetLowBatteryClock {
    type IdType = u16;
    type CommandParameters = LowBatteryClock;
    type ResponseParameters = crate::NoParameters;

    fn id() -> Self::IdType {
        0xC000
    }

    fn invoking_parameters(self) -> Self::CommandParameters {
        self.config
    }
}
