//! StderrSurface - stand-in for a platform's own default error handler

use std::io::{self, Write};

use contracts::{ErrorHandler, IncomingError};

/// Writes `ERROR <error>` to a writer (stderr by default)
///
/// Output failures are returned to the dispatcher, which passes them on to
/// its caller untouched.
pub struct StderrSurface<W = fn() -> io::Stderr> {
    writer: W,
}

impl StderrSurface {
    pub fn new() -> Self {
        Self { writer: io::stderr }
    }
}

impl Default for StderrSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl<W, O> StderrSurface<W>
where
    W: Fn() -> O + Send + Sync,
    O: Write,
{
    /// Surface writing to a custom output
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    fn write_error(&self, error: &IncomingError) -> io::Result<()> {
        let mut out = (self.writer)();
        writeln!(out, "ERROR {error}")?;
        match error {
            IncomingError::Transport(e) => {
                if let Some(url) = &e.url {
                    writeln!(out, "    at {url} (status {})", e.status)?;
                }
            }
            IncomingError::Client(e) => {
                for cause in &e.causes {
                    writeln!(out, "    caused by: {cause}")?;
                }
                if let Some(stack) = &e.stack {
                    writeln!(out, "{stack}")?;
                }
            }
        }
        out.flush()
    }
}

impl<W, O> ErrorHandler for StderrSurface<W>
where
    W: Fn() -> O + Send + Sync,
    O: Write,
{
    type Error = io::Error;

    fn handle_error(&self, error: &IncomingError) -> Result<(), Self::Error> {
        self.write_error(error)
    }
}
