//! Sink implementations
//!
//! Local: TracingDiagnostics, StderrSurface.
//! Remote: ConsoleSender (inline), FileTransport and HttpTransport (behind a TransportHandle).

mod console;
mod file;
mod log;
mod network;
mod surface;

pub use self::console::ConsoleSender;
pub use self::file::{FileTransport, FileTransportConfig};
pub use self::log::TracingDiagnostics;
pub use self::network::{HttpTransport, HttpTransportConfig, API_KEY_HEADER};
pub use self::surface::StderrSurface;
