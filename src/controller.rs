//! Periodic refresh. The scheduler that calls `Pollable::update` lives outside this crate; the
//! controller only decides what happens on each tick.

use core::time::Duration;

use log::{trace, warn};

use crate::buffer::FrameBuffer;
use crate::display::{Display, State};
use crate::error::Error;
use crate::interface::RegisterInterface;

/// A component driven by a fixed-interval tick.
pub trait Pollable {
    /// Called once per tick.
    fn update(&mut self);

    /// How often `update` wants to be called.
    fn update_interval(&self) -> Duration;
}

/// Ties a `Display` to an optional writer that redraws the frame on every tick before it is
/// pushed.
///
/// `W` defaults to a plain function pointer so that a controller without a writer, or with a
/// non-capturing closure, needs no type annotations.
pub struct Controller<DI, W = fn(&mut FrameBuffer)>
where
    DI: RegisterInterface,
{
    display: Display<DI>,
    writer: Option<W>,
}

impl<DI> Controller<DI>
where
    DI: RegisterInterface,
{
    pub fn new(display: Display<DI>) -> Self {
        Controller {
            display,
            writer: None,
        }
    }
}

impl<DI, W> Controller<DI, W>
where
    DI: RegisterInterface,
    W: FnMut(&mut FrameBuffer),
{
    pub fn with_writer(display: Display<DI>, writer: W) -> Self {
        Controller {
            display,
            writer: Some(writer),
        }
    }

    /// Install the per-tick writer, replacing any previous one.
    pub fn set_writer(&mut self, writer: W) {
        self.writer = Some(writer);
    }

    pub fn clear_writer(&mut self) {
        self.writer = None;
    }

    /// Initialize the display and log its configuration.
    pub fn setup(&mut self) -> Result<(), Error> {
        let result = self.display.init();
        self.display.dump_config();
        result
    }

    pub fn display(&self) -> &Display<DI> {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display<DI> {
        &mut self.display
    }

    pub fn into_display(self) -> Display<DI> {
        self.display
    }
}

impl<DI, W> Pollable for Controller<DI, W>
where
    DI: RegisterInterface,
    W: FnMut(&mut FrameBuffer),
{
    /// Run the writer against the frame, then push it. Does nothing until the display is ready,
    /// and nothing ever again once it has failed.
    fn update(&mut self) {
        if self.display.state() != State::Ready {
            trace!("Skipping tick, display is {:?}", self.display.state());
            return;
        }
        if let (Some(writer), Some(buffer)) = (self.writer.as_mut(), self.display.buffer_mut()) {
            writer(buffer);
        }
        if let Err(e) = self.display.flush() {
            warn!("Pushing frame to IS31FL3730 failed: {}", e);
        }
    }

    fn update_interval(&self) -> Duration {
        self.display.update_interval()
    }
}
