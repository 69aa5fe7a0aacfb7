//! DHT11 temperature/humidity sensor
//!
//! Single-wire protocol on an open-drain pin with an external pull-up:
//!
//! ```text
//! host:   ‾‾‾\_____ 18ms _____/‾‾ release
//! sensor:                        \__80us__/‾‾80us‾‾\ then 40 bits:
//! bit:    \__50us__/‾‾ 26us ‾‾\  = 0
//!         \__50us__/‾‾‾‾ 70us ‾‾‾‾\  = 1
//! ```
//!
//! Each bit is decided by comparing its high time to the 50us low time that
//! precedes it, so the decoder does not depend on the delay provider being
//! cycle-accurate.
//!
//! Frame: humidity integer, humidity decimal, temperature integer,
//! temperature decimal (bit 7 = below zero), checksum (sum of the first
//! four bytes, truncated).

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use emoface_core::sensor::SensorReading;
use emoface_core::traits::ClimateSensor;

/// Host start pulse length
const START_PULSE_MS: u32 = 18;

/// Longest level the sensor ever holds during a transfer, plus margin
const PULSE_TIMEOUT_US: u32 = 100;

/// Errors that can occur while reading the DHT11
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dht11Error {
    /// Sensor did not respond or a level lasted too long
    Timeout,
    /// Frame checksum mismatch
    Checksum,
    /// GPIO access failed
    Pin,
}

/// One decoded DHT11 measurement
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Degrees Celsius, 0.1 resolution
    pub temperature: f32,
    /// Relative humidity in percent
    pub humidity: f32,
}

/// DHT11 on an open-drain GPIO
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    /// Create a new driver. The pin is released (driven high) immediately.
    pub fn new(mut pin: P, delay: D) -> Self {
        // Idle level is high; a failure here shows up on the first read
        let _ = pin.set_high();
        Self { pin, delay }
    }

    /// Run one full transfer and decode it
    pub fn measure(&mut self) -> Result<Measurement, Dht11Error> {
        let frame = self.read_frame()?;
        decode(&frame)
    }

    /// Run one full transfer and return the raw five bytes
    pub fn read_frame(&mut self) -> Result<[u8; 5], Dht11Error> {
        self.pin.set_low().map_err(|_| Dht11Error::Pin)?;
        self.delay.delay_ms(START_PULSE_MS);
        self.pin.set_high().map_err(|_| Dht11Error::Pin)?;

        // Pull-up delay, then the sensor's 80us low / 80us high response
        self.pulse_len(true)?;
        self.pulse_len(false)?;
        self.pulse_len(true)?;

        let mut frame = [0u8; 5];
        for bit in 0..40 {
            let low = self.pulse_len(false)?;
            let high = self.pulse_len(true)?;
            if high > low {
                frame[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
        Ok(frame)
    }

    /// Release the pin and delay provider
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    /// Measure how long the pin stays at `high`, in microseconds
    fn pulse_len(&mut self, high: bool) -> Result<u32, Dht11Error> {
        let mut us = 0;
        while self.pin.is_high().map_err(|_| Dht11Error::Pin)? == high {
            if us >= PULSE_TIMEOUT_US {
                return Err(Dht11Error::Timeout);
            }
            self.delay.delay_us(1);
            us += 1;
        }
        Ok(us)
    }
}

impl<P, D> ClimateSensor for Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn read(&mut self) -> SensorReading {
        match self.measure() {
            Ok(m) => SensorReading {
                temperature: Some(m.temperature),
                humidity: Some(m.humidity),
            },
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("DHT11 read failed: {}", _e);
                SensorReading::absent()
            }
        }
    }
}

/// Validate and decode a raw frame
pub fn decode(frame: &[u8; 5]) -> Result<Measurement, Dht11Error> {
    let sum = frame[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != frame[4] {
        return Err(Dht11Error::Checksum);
    }

    let humidity = frame[0] as f32 + frame[1] as f32 * 0.1;
    let magnitude = frame[2] as f32 + (frame[3] & 0x0f) as f32 * 0.1;
    let temperature = if frame[3] & 0x80 != 0 {
        -magnitude
    } else {
        magnitude
    };

    Ok(Measurement {
        temperature,
        humidity,
    })
}
