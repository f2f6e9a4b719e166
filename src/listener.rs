use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, warn};

/// Registration for pointer events landing anywhere on the terminal, which is
/// what lets a widget notice clicks outside of itself.
///
/// Mouse reporting is switched on when the listener is registered and switched
/// back off when it is dropped.
pub(crate) struct OutsideListener {
    out: Box<dyn Write>,
}

impl OutsideListener {
    pub(crate) fn register(mut out: Box<dyn Write>) -> io::Result<OutsideListener> {
        execute!(out, EnableMouseCapture)?;
        debug!("registered outside-interaction listener");
        Ok(OutsideListener { out })
    }
}

impl Drop for OutsideListener {
    fn drop(&mut self) {
        if let Err(e) = execute!(self.out, DisableMouseCapture) {
            warn!(error = %e, "failed to disable mouse capture");
        } else {
            debug!("deregistered outside-interaction listener");
        }
    }
}

impl fmt::Debug for OutsideListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutsideListener").finish_non_exhaustive()
    }
}
