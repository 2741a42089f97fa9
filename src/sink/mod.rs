//! LED sink contract
//!
//! A sink is a fixed length RGB strip. The renderer sets every pixel of a frame
//! and then calls [`LedSink::show`] once. Channel values use the full `0-255`
//! range everywhere.

mod buffered;

use core::ops::{Deref, DerefMut};

pub use buffered::BufferedSink;

use crate::color::Rgb;
use crate::error::SinkError;

pub trait LedSink {
    /// Number of pixels on the strip
    fn pixel_count(&self) -> usize;

    /// Stage a pixel value for the next [`show`](LedSink::show)
    ///
    /// Out of range indices are ignored.
    fn set_pixel(&mut self, index: usize, color: Rgb);

    /// Push the staged pixels to the hardware
    fn show(&mut self) -> Result<(), SinkError>;

    /// Set global brightness (0.0-1.0) applied on the next `show`
    fn set_brightness(&mut self, ratio: f32);

    /// Turn every pixel off and push that immediately
    fn clear(&mut self) -> Result<(), SinkError> {
        for index in 0..self.pixel_count() {
            self.set_pixel(index, Rgb::default());
        }
        self.show()
    }
}

/// Owns a sink and clears it when dropped.
///
/// Every exit path of the render loop, including unwinding, goes through
/// `Drop`, so the strip never stays lit after the engine stops.
pub struct SinkGuard<S: LedSink> {
    sink: S,
}

impl<S: LedSink> SinkGuard<S> {
    pub const fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: LedSink> Deref for SinkGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.sink
    }
}

impl<S: LedSink> DerefMut for SinkGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

impl<S: LedSink> Drop for SinkGuard<S> {
    fn drop(&mut self) {
        // Nothing left to report the error to at this point.
        let _ = self.sink.clear();
    }
}
