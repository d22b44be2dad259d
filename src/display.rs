//! The main API to the display driver. It owns the frame buffer and the device state, sends the
//! init sequence, and pushes frames to the chip.

use core::time::Duration;

use log::{debug, error, info, trace, warn};

use crate::buffer::FrameBuffer;
use crate::command::consts::*;
use crate::command::{BufCommand, Command, Matrix};
use crate::config::Config;
use crate::error::Error;
use crate::interface::{self, RegisterInterface};
use crate::surface::PixelSurface;

/// Lifecycle of the driver. `Failed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    Uninitialized,
    Ready,
    Failed,
}

/// A driver for an IS31FL3730 with two LTP305 modules attached.
pub struct Display<DI>
where
    DI: RegisterInterface,
{
    iface: DI,
    config: Config,
    buffer: FrameBuffer,
    brightness: u8,
    state: State,
}

impl<DI> Display<DI>
where
    DI: RegisterInterface,
{
    /// Construct a new display driver talking over `iface`. Nothing is sent until `init`.
    pub fn new(iface: DI, config: Config) -> Self {
        Display {
            iface,
            brightness: config.brightness,
            config,
            buffer: FrameBuffer::new(),
            state: State::Uninitialized,
        }
    }

    /// Probe the chip and send the init sequence: configuration, current limit, brightness.
    ///
    /// If the chip does not acknowledge the probe, the driver is marked failed for good and no
    /// register is written, now or later. Writes after a successful probe are not checked.
    pub fn init(&mut self) -> Result<(), Error> {
        if self.state == State::Failed {
            return Err(Error::CommunicationFailed);
        }
        info!("Setting up IS31FL3730...");
        if let Err(e) = self.iface.probe() {
            error!("Communication with IS31FL3730 failed! ({})", e);
            self.state = State::Failed;
            return Err(Error::CommunicationFailed);
        }

        for &cmd in &[
            Command::SetConfiguration(DEFAULT_CONFIGURATION),
            Command::SetLightingEffect(DEFAULT_LIGHTING_EFFECT),
            Command::SetBrightness(self.brightness),
        ] {
            if let Err(e) = cmd.send(&mut self.iface) {
                warn!("IS31FL3730 init write {:?} failed: {}", cmd, e);
            }
        }
        self.buffer.clear();
        self.state = State::Ready;
        info!("IS31FL3730 ready");
        Ok(())
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The operational flag: once set, drawing and pushing do nothing.
    pub fn is_failed(&self) -> bool {
        self.state == State::Failed
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// I2C address the driver was configured for.
    pub fn address(&self) -> u8 {
        self.config.address
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// How often the frame should be pushed.
    pub fn update_interval(&self) -> Duration {
        self.config.update_interval
    }

    /// Set the global brightness, clamping to 0-127. Before `init` the value is only stored and
    /// gets written as part of the init sequence.
    pub fn set_brightness(&mut self, brightness: u8) -> Result<(), Error> {
        let brightness = brightness.min(MAX_BRIGHTNESS);
        match self.state {
            State::Failed => Err(Error::CommunicationFailed),
            State::Uninitialized => {
                self.brightness = brightness;
                Ok(())
            }
            State::Ready => {
                debug!("IS31FL3730 brightness {} -> {}", self.brightness, brightness);
                self.brightness = brightness;
                Command::SetBrightness(brightness).send(&mut self.iface)
            }
        }
    }

    /// Push the frame buffer to the chip and latch it: left matrix, then right matrix, then the
    /// update register. The chip shows nothing new until the latch lands.
    ///
    /// All three writes are always issued. The first write error, if any, is returned afterwards.
    pub fn flush(&mut self) -> Result<(), Error> {
        match self.state {
            State::Failed => return Err(Error::CommunicationFailed),
            State::Uninitialized => return Err(Error::Uninitialized),
            State::Ready => {}
        }
        trace!(
            "IS31FL3730 frame L={:02x?} R={:02x?}",
            self.buffer.left(),
            self.buffer.right()
        );
        let left = BufCommand::WriteMatrix(Matrix::Left, self.buffer.left()).send(&mut self.iface);
        let right =
            BufCommand::WriteMatrix(Matrix::Right, self.buffer.right()).send(&mut self.iface);
        let latch = Command::Update.send(&mut self.iface);
        left.and(right).and(latch)
    }

    /// The frame that the next `flush` will push.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Mutable access to the frame, withheld once the driver has failed.
    pub fn buffer_mut(&mut self) -> Option<&mut FrameBuffer> {
        match self.state {
            State::Failed => None,
            _ => Some(&mut self.buffer),
        }
    }

    /// Turn every pixel and both decimal dots off.
    pub fn clear(&mut self) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.clear();
        }
    }

    /// See `FrameBuffer::fill`: this writes literal byte values, not full masks.
    pub fn fill(&mut self, on: bool) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.fill(on);
        }
    }

    /// Set or clear each decimal dot independently. `None` leaves that dot as it is.
    pub fn set_decimal_dot(&mut self, left: Option<bool>, right: Option<bool>) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.set_decimal_dot(left, right);
        }
    }

    /// Log the driver configuration.
    pub fn dump_config(&self) {
        info!("LTP305 dot matrix display:");
        info!("  Address: 0x{:02X}", self.config.address);
        info!("  Dimensions: {}px x {}px", WIDTH, HEIGHT);
        info!("  Brightness: {}", self.brightness);
        info!("  Update interval: {:?}", self.config.update_interval);
        if self.is_failed() {
            error!("Communication with IS31FL3730 failed!");
        }
    }

    /// Give back the interface.
    pub fn release(self) -> DI {
        self.iface
    }
}

impl<I2C> Display<interface::i2c::I2cInterface<I2C>>
where
    I2C: hal::blocking::i2c::Write,
{
    /// Construct a display on an I2C bus, at the address from `config`.
    pub fn new_i2c(i2c: I2C, config: Config) -> Self {
        let iface = interface::i2c::I2cInterface::new(i2c, config.address);
        Self::new(iface, config)
    }
}

impl<DI> PixelSurface for Display<DI>
where
    DI: RegisterInterface,
{
    fn width(&self) -> i32 {
        WIDTH
    }

    fn height(&self) -> i32 {
        HEIGHT
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some(buffer) = self.buffer_mut() {
            buffer.set_pixel(x, y, on);
        }
    }

    fn pixel(&self, x: i32, y: i32) -> bool {
        self.buffer.pixel(x, y)
    }
}
