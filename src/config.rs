//! Radio configuration
//!
//! [`Config`] bundles the parameters written to the chip by
//! [`Transceiver::initialize`](crate::Transceiver::initialize). The default is
//! a 434 MHz, 4.8 kbps FSK link with 90 kHz deviation at full power.
//!
//! # Example
//! ```
//! use rfm12::{Band, Config, DataRate, FrequencySetting};
//!
//! let mut config = Config::default();
//! config.configuration.band = Band::Mhz868;
//! config.frequency = FrequencySetting::from_khz(Band::Mhz868, 868_300).unwrap();
//! config.data_rate = DataRate::from_bps(9600).unwrap();
//! ```

use crate::commands::{
    encode, AutomaticFrequencyControl, ConfigurationSetting, DataFilter, DataRate, FifoMode,
    FrequencySetting, LowBatteryClock, LowDutyCycle, PowerFlags, PowerManagement,
    ReceiverControl, SetAutomaticFrequencyControl, SetConfiguration, SetDataFilter, SetDataRate,
    SetFifoMode, SetFrequency, SetLowBatteryClock, SetLowDutyCycle, SetReceiverControl,
    SetTransmitterConfig, SetWakeUpTimer, TransmitterConfig, WakeUpPeriod,
};

/// Number of command words in the initialization sequence
pub const INIT_SEQUENCE_LEN: usize = 12;

/// Chip configuration applied at initialization.
///
/// # Important Notes
/// - The default profile ends with the low-battery/clock word `0xC040`
///   (1.66 MHz clock output, 2.2 V threshold). Older RFM12 firmware sends
///   `0xC400` in that slot, which is an AFC command that switches AFC off
///   again; radios built on that firmware track frequency offsets
///   differently from this driver on air
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Band, crystal load, data register and FIFO enable
    pub configuration: ConfigurationSetting,
    /// Carrier frequency
    pub frequency: FrequencySetting,
    /// Bit rate
    pub data_rate: DataRate,
    /// Receiver baseband, LNA and RSSI threshold
    pub receiver: ReceiverControl,
    /// Clock recovery and data filter
    pub data_filter: DataFilter,
    /// FIFO interrupt level and sync handling; the fill bit is managed by the driver
    pub fifo: FifoMode,
    /// Automatic frequency control
    pub afc: AutomaticFrequencyControl,
    /// Deviation and output power
    pub transmitter: TransmitterConfig,
    /// Wake-up timer period
    pub wake_up: WakeUpPeriod,
    /// Low duty-cycle receive mode
    pub low_duty_cycle: LowDutyCycle,
    /// Clock output and low battery threshold
    pub low_battery_clock: LowBatteryClock,
}

impl Config {
    /// Command words issued by initialization, in order.
    ///
    /// Every block is powered down first so that no half-configured chain
    /// starts running, and the FIFO fill is left disarmed.
    pub fn init_sequence(&self) -> [u16; INIT_SEQUENCE_LEN] {
        [
            encode(SetConfiguration {
                config: self.configuration,
            }),
            encode(PowerManagement {
                config: PowerFlags::IDLE,
            }),
            encode(SetFrequency {
                config: self.frequency,
            }),
            encode(SetDataRate {
                config: self.data_rate,
            }),
            encode(SetReceiverControl {
                config: self.receiver,
            }),
            encode(SetDataFilter {
                config: self.data_filter,
            }),
            encode(SetFifoMode {
                config: self.fifo.with_fill(false),
            }),
            encode(SetAutomaticFrequencyControl { config: self.afc }),
            encode(SetTransmitterConfig {
                config: self.transmitter,
            }),
            encode(SetWakeUpTimer {
                config: self.wake_up,
            }),
            encode(SetLowDutyCycle {
                config: self.low_duty_cycle,
            }),
            encode(SetLowBatteryClock {
                config: self.low_battery_clock,
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Band, OutputPower};

    #[test]
    fn default_sequence() {
        assert_eq!(
            Config::default().init_sequence(),
            [
                0x80D7, 0x8201, 0xA640, 0xC647, 0x94A0, 0xC2AC, 0xCA81, 0xC483, 0x9850, 0xE000,
                0xC800, 0xC040,
            ]
        );
    }

    #[test]
    fn fill_is_never_armed_at_init() {
        let mut config = Config::default();
        config.fifo.fill_enable = true;
        assert_eq!(config.init_sequence()[6], 0xCA81);
    }

    #[test]
    fn custom_profile() {
        let mut config = Config::default();
        config.configuration.band = Band::Mhz868;
        config.frequency = FrequencySetting::from_khz(Band::Mhz868, 868_300).unwrap();
        config.transmitter.power = OutputPower::Minus10Db;

        let words = config.init_sequence();
        assert_eq!(words[0], 0x80E7);
        assert_eq!(words[2], 0xA67C);
        assert_eq!(words[8], 0x9854);
    }
}
