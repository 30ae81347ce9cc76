//! Audio focus arbitration
//!
//! Platforms with a shared audio output (mobile, desktops with notification
//! sounds) grant exclusive focus to one app at a time. The session requests
//! focus before playing and reacts to loss/gain notifications from the host.

use crate::error::Result;

pub trait AudioFocus: Send {
    /// Request focus. `Ok(false)` means the platform declined; playback may
    /// still proceed at the host's discretion.
    fn request(&mut self) -> Result<bool>;
    fn release(&mut self) -> Result<()>;
}

/// Focus arbiter that always grants, for platforms without arbitration
#[derive(Debug, Default)]
pub struct NoopFocus;

impl AudioFocus for NoopFocus {
    fn request(&mut self) -> Result<bool> {
        Ok(true)
    }

    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}
