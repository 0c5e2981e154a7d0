//! Sensor readers built on the `embedded-hal` ADC traits.
//!
//! Each reader owns the channel pins it samples and blocks until every
//! conversion of a reading has finished.

use crate::{
    error::ReadError,
    rtd::{self, RtdCalc},
    scale::AdcScale,
    thermistor::{self, TemperatureCurve},
    thermocouple::{ThermocoupleCalc, TYPE_K},
};
use embedded_hal::adc::{Channel, OneShot};

type AdcError<Adc, ADC, Word, Pin> = <Adc as OneShot<ADC, Word, Pin>>::Error;

fn read_channel<Adc, ADC, Word, Pin>(
    adc: &mut Adc,
    pin: &mut Pin,
) -> Result<i32, AdcError<Adc, ADC, Word, Pin>>
where
    Word: Into<i32>,
    Pin: Channel<ADC>,
    Adc: OneShot<ADC, Word, Pin>,
{
    nb::block!(adc.read(pin)).map(Into::into)
}

/// A programmable current source driving the RTD and reference resistor.
pub trait CurrentSource {
    type Error;

    /// Sets the output current. `0` turns the source off.
    fn set_level(&mut self, level: u8) -> Result<(), Self::Error>;
}

/// Configuration for an [`RtdReader`].
///
/// - `calc`: The resistance to temperature conversion
/// - `reference_milliohms`: The reference resistor in series with the RTD (mΩ)
/// - `excitation_level`: The current source level used while measuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtdConfig {
    pub calc: RtdCalc<'static>,
    pub reference_milliohms: u32,
    pub excitation_level: u8,
}

impl RtdConfig {
    /// A PT100 with a 100 Ω reference, excited at about 1 mA.
    pub const PT100: RtdConfig = RtdConfig {
        calc: rtd::PT100,
        reference_milliohms: 100_000,
        excitation_level: 125,
    };
}

/// Measures an RTD against a reference resistor sharing its excitation
/// current.
#[derive(Debug)]
pub struct RtdReader<RefPin, RtdPin> {
    reference: RefPin,
    rtd: RtdPin,
    config: RtdConfig,
}

impl<RefPin, RtdPin> RtdReader<RefPin, RtdPin> {
    /// Returns a reader sampling the reference resistor on `reference` and
    /// the RTD on `rtd`.
    pub fn new<ADC>(reference: RefPin, rtd: RtdPin, config: RtdConfig) -> Self
    where
        RefPin: Channel<ADC>,
        RtdPin: Channel<ADC>,
    {
        Self {
            reference,
            rtd,
            config,
        }
    }

    /// Destroys the reader and returns the pins.
    pub fn free(self) -> (RefPin, RtdPin) {
        (self.reference, self.rtd)
    }

    /// Returns the RTD resistance in milliohms.
    ///
    /// The RTD is sampled with the excitation current on, then with it off
    /// to measure the offset of the front end, then the reference resistor
    /// is sampled with the current back on.
    pub fn read_resistance<Adc, ADC, Word, E, Src>(
        &mut self,
        adc: &mut Adc,
        source: &mut Src,
    ) -> Result<u32, ReadError<E, Src::Error>>
    where
        Word: Into<i32>,
        RefPin: Channel<ADC>,
        RtdPin: Channel<ADC>,
        Adc: OneShot<ADC, Word, RtdPin, Error = E> + OneShot<ADC, Word, RefPin, Error = E>,
        Src: CurrentSource,
    {
        let level = self.config.excitation_level;

        source.set_level(level).map_err(ReadError::Excitation)?;
        let rtd_counts =
            read_channel::<Adc, ADC, Word, RtdPin>(adc, &mut self.rtd).map_err(ReadError::Adc)?;

        source.set_level(0).map_err(ReadError::Excitation)?;
        let offset_counts =
            read_channel::<Adc, ADC, Word, RtdPin>(adc, &mut self.rtd).map_err(ReadError::Adc)?;

        source.set_level(level).map_err(ReadError::Excitation)?;
        let reference_counts = read_channel::<Adc, ADC, Word, RefPin>(adc, &mut self.reference)
            .map_err(ReadError::Adc)?;

        log::trace!(
            "rtd: {} counts, offset: {} counts, reference: {} counts",
            rtd_counts,
            offset_counts,
            reference_counts
        );

        let milliohms = rtd::resistance(
            rtd_counts,
            offset_counts,
            reference_counts,
            self.config.reference_milliohms,
        )?;

        Ok(milliohms)
    }

    /// Returns the RTD temperature in 1/100 °C.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::reader::{CurrentSource, RtdConfig, RtdReader};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, MockChan1, Transaction};
    /// #
    /// # struct Idac;
    /// # impl CurrentSource for Idac {
    /// #     type Error = ();
    /// #     fn set_level(&mut self, _level: u8) -> Result<(), ()> { Ok(()) }
    /// # }
    /// # let expectations: [Transaction<u16>; 3] = [
    /// #     Transaction::read(1, 1395),
    /// #     Transaction::read(1, 10),
    /// #     Transaction::read(0, 1000),
    /// # ];
    /// # let mut adc = Mock::new(&expectations);
    /// # let mut idac = Idac;
    ///
    /// let mut reader = RtdReader::new(MockChan0 {}, MockChan1 {}, RtdConfig::PT100);
    ///
    /// // 138.5 Ω, just under 100 °C
    /// assert_eq!(reader.read_temperature(&mut adc, &mut idac), Ok(9998));
    /// ```
    pub fn read_temperature<Adc, ADC, Word, E, Src>(
        &mut self,
        adc: &mut Adc,
        source: &mut Src,
    ) -> Result<i32, ReadError<E, Src::Error>>
    where
        Word: Into<i32>,
        RefPin: Channel<ADC>,
        RtdPin: Channel<ADC>,
        Adc: OneShot<ADC, Word, RtdPin, Error = E> + OneShot<ADC, Word, RefPin, Error = E>,
        Src: CurrentSource,
    {
        let milliohms = self.read_resistance(adc, source)?;
        let temperature = self.config.calc.temperature(milliohms);

        log::debug!("rtd: {} mOhm, {} cC", milliohms, temperature);

        Ok(temperature)
    }
}

/// Measures a thermistor in series with a reference resistor.
#[derive(Debug)]
pub struct ThermistorReader<RefPin, ThermPin, Curve> {
    reference: RefPin,
    thermistor: ThermPin,
    curve: Curve,
    reference_ohms: u32,
}

impl<RefPin, ThermPin, Curve> ThermistorReader<RefPin, ThermPin, Curve>
where
    Curve: TemperatureCurve,
{
    /// Returns a reader sampling the voltage across the reference resistor
    /// on `reference` and across the thermistor on `thermistor`.
    pub fn new<ADC>(
        reference: RefPin,
        thermistor: ThermPin,
        curve: Curve,
        reference_ohms: u32,
    ) -> Self
    where
        RefPin: Channel<ADC>,
        ThermPin: Channel<ADC>,
    {
        Self {
            reference,
            thermistor,
            curve,
            reference_ohms,
        }
    }

    /// Destroys the reader and returns the pins.
    pub fn free(self) -> (RefPin, ThermPin) {
        (self.reference, self.thermistor)
    }

    /// Returns the thermistor resistance in ohms.
    pub fn read_resistance<Adc, ADC, Word, E>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<u32, ReadError<E>>
    where
        Word: Into<i32>,
        RefPin: Channel<ADC>,
        ThermPin: Channel<ADC>,
        Adc: OneShot<ADC, Word, RefPin, Error = E> + OneShot<ADC, Word, ThermPin, Error = E>,
    {
        let v_reference = read_channel::<Adc, ADC, Word, RefPin>(adc, &mut self.reference)
            .map_err(ReadError::Adc)?;
        let v_thermistor = read_channel::<Adc, ADC, Word, ThermPin>(adc, &mut self.thermistor)
            .map_err(ReadError::Adc)?;

        log::trace!(
            "thermistor: reference {} counts, thermistor {} counts",
            v_reference,
            v_thermistor
        );

        Ok(thermistor::resistance(
            v_reference,
            v_thermistor,
            self.reference_ohms,
        )?)
    }

    /// Returns the thermistor temperature in 1/100 °C.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::{
    ///     reader::ThermistorReader,
    ///     thermistor::{NTC_10K, REFERENCE_OHMS},
    /// };
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, MockChan1, Transaction};
    /// #
    /// # let expectations: [Transaction<u16>; 2] = [
    /// #     Transaction::read(0, 1000),
    /// #     Transaction::read(1, 2000),
    /// # ];
    /// # let mut adc = Mock::new(&expectations);
    ///
    /// let mut reader = ThermistorReader::new(MockChan0 {}, MockChan1 {}, NTC_10K, REFERENCE_OHMS);
    ///
    /// // 20 kΩ
    /// assert_eq!(reader.read_temperature(&mut adc), Ok(734));
    /// ```
    pub fn read_temperature<Adc, ADC, Word, E>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<i16, ReadError<E>>
    where
        Word: Into<i32>,
        RefPin: Channel<ADC>,
        ThermPin: Channel<ADC>,
        Adc: OneShot<ADC, Word, RefPin, Error = E> + OneShot<ADC, Word, ThermPin, Error = E>,
    {
        let ohms = self.read_resistance(adc)?;
        let temperature = self.curve.temperature(ohms);

        log::debug!("thermistor: {} Ohm, {} cC", ohms, temperature);

        Ok(temperature)
    }
}

/// Configuration for a [`ThermocoupleReader`].
///
/// - `calc`: The thermocouple type
/// - `scale`: Converts ADC counts above `zero_counts` to microvolts
/// - `zero_counts`: The ADC reading for 0 V across the thermocouple
/// - `cold_junction`: The cold junction temperature (1/100 °C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermocoupleConfig {
    pub calc: ThermocoupleCalc<'static>,
    pub scale: AdcScale,
    pub zero_counts: i32,
    pub cold_junction: i32,
}

impl ThermocoupleConfig {
    /// Type K, read by an ADC returning microvolts, cold junction at 25 °C.
    pub const TYPE_K: ThermocoupleConfig = ThermocoupleConfig {
        calc: TYPE_K,
        scale: AdcScale {
            full_scale: 1,
            precision: 0,
        },
        zero_counts: 0,
        cold_junction: 2500,
    };
}

/// Measures a thermocouple and compensates for its cold junction.
#[derive(Debug)]
pub struct ThermocoupleReader<Pin> {
    pin: Pin,
    config: ThermocoupleConfig,
    cold_junction_microvolts: i32,
}

impl<Pin> ThermocoupleReader<Pin> {
    pub fn new<ADC>(pin: Pin, config: ThermocoupleConfig) -> Self
    where
        Pin: Channel<ADC>,
    {
        Self {
            pin,
            config,
            cold_junction_microvolts: config.calc.voltage(config.cold_junction),
        }
    }

    /// Destroys the reader and returns the `Pin`.
    pub fn free(self) -> Pin {
        self.pin
    }

    /// Updates the cold junction temperature (1/100 °C).
    pub fn set_cold_junction(&mut self, cold_junction: i32) {
        self.config.cold_junction = cold_junction;
        self.cold_junction_microvolts = self.config.calc.voltage(cold_junction);
    }

    pub fn cold_junction(&self) -> i32 {
        self.config.cold_junction
    }

    /// Returns the thermocouple voltage in microvolts.
    pub fn read_voltage<Adc, ADC, Word>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<i32, ReadError<AdcError<Adc, ADC, Word, Pin>>>
    where
        Word: Into<i32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let counts = read_channel(adc, &mut self.pin).map_err(ReadError::Adc)?;

        Ok(self
            .config
            .scale
            .to_value(counts.wrapping_sub(self.config.zero_counts)))
    }

    /// Returns the hot junction temperature in 1/100 °C.
    ///
    /// # Examples
    ///
    /// ```
    /// use thermo_calc::reader::{ThermocoupleConfig, ThermocoupleReader};
    /// # use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    /// #
    /// # let expectations: [Transaction<u16>; 1] = [Transaction::read(0, 1000)];
    /// # let mut adc = Mock::new(&expectations);
    ///
    /// let mut reader = ThermocoupleReader::new(MockChan0 {}, ThermocoupleConfig::TYPE_K);
    ///
    /// // 1 mV above a 25 °C cold junction
    /// assert_eq!(reader.read_temperature(&mut adc), Ok(4947));
    /// ```
    pub fn read_temperature<Adc, ADC, Word>(
        &mut self,
        adc: &mut Adc,
    ) -> Result<i32, ReadError<AdcError<Adc, ADC, Word, Pin>>>
    where
        Word: Into<i32>,
        Pin: Channel<ADC>,
        Adc: OneShot<ADC, Word, Pin>,
    {
        let microvolts = self.read_voltage(adc)?;
        let temperature = self
            .config
            .calc
            .temperature(microvolts.wrapping_add(self.cold_junction_microvolts));

        log::debug!("thermocouple: {} uV, {} cC", microvolts, temperature);

        Ok(temperature)
    }
}
