//! LSM9DS1 accelerometer driver
//!
//! Only the accel/gyro die on the combined part is used, and only its
//! accelerometer: one config register at bring-up, then burst reads of the
//! six output bytes. The magnetometer die sits on a separate address and is
//! never touched.

use embedded_hal_async::i2c::I2c;

/// Accel/gyro die I2C address (SDO_A/G pulled high)
const ADDR_AG: u8 = 0x6B;

/// Identity register and the value an LSM9DS1 answers with
const REG_WHO_AM_I: u8 = 0x0F;
const WHO_AM_I_AG: u8 = 0x68;

/// Accelerometer control: ODR 119 Hz, full scale +/-4 g
///
/// 119 Hz comfortably oversamples the 62.5 Hz the pipeline consumes at, and
/// +/-4 g leaves headroom above the +/-2 g the conditioning stage accepts.
const REG_CTRL_REG6_XL: u8 = 0x20;
const CTRL_REG6_XL_119HZ_4G: u8 = 0x70;

/// First accelerometer output register (X low byte); the part
/// auto-increments through the remaining five
const REG_OUT_X_L_XL: u8 = 0x28;

/// Sensitivity at +/-4 g, in g per LSB
const SCALE_4G: f32 = 4.0 / 32768.0;

/// Driver faults, wrapping the bus's own error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImuError<E> {
    /// I2C transfer failed
    Bus(E),
    /// WHO_AM_I answered with something other than an LSM9DS1
    UnknownDevice(u8),
}

/// LSM9DS1 accelerometer behind any async I2C bus
pub struct Lsm9ds1<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> Lsm9ds1<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Probe the part's identity and configure the accelerometer
    ///
    /// Must succeed before [`read_acceleration`](Self::read_acceleration)
    /// returns anything meaningful; the part powers up with the
    /// accelerometer off.
    pub async fn init(&mut self) -> Result<(), ImuError<I2C::Error>> {
        let mut id = [0u8; 1];
        self.i2c
            .write_read(ADDR_AG, &[REG_WHO_AM_I], &mut id)
            .await
            .map_err(ImuError::Bus)?;
        if id[0] != WHO_AM_I_AG {
            return Err(ImuError::UnknownDevice(id[0]));
        }

        self.i2c
            .write(ADDR_AG, &[REG_CTRL_REG6_XL, CTRL_REG6_XL_119HZ_4G])
            .await
            .map_err(ImuError::Bus)?;
        Ok(())
    }

    /// Read one acceleration triple, in g
    pub async fn read_acceleration(&mut self) -> Result<[f32; 3], ImuError<I2C::Error>> {
        let mut raw = [0u8; 6];
        self.i2c
            .write_read(ADDR_AG, &[REG_OUT_X_L_XL], &mut raw)
            .await
            .map_err(ImuError::Bus)?;

        Ok([
            Self::raw_to_g(i16::from_le_bytes([raw[0], raw[1]])),
            Self::raw_to_g(i16::from_le_bytes([raw[2], raw[3]])),
            Self::raw_to_g(i16::from_le_bytes([raw[4], raw[5]])),
        ])
    }

    /// Convert a raw 16-bit sample to g at +/-4 g full scale
    fn raw_to_g(raw: i16) -> f32 {
        f32::from(raw) * SCALE_4G
    }
}
