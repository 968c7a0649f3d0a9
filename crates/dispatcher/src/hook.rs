//! Process-wide panic hook routing panics into an ErrorHandler

use std::panic::{self, PanicHookInfo};

use contracts::{ClientError, ErrorHandler, IncomingError};

/// Name given to client errors built from panics
pub const PANIC_ERROR_NAME: &str = "panic";

/// Replace the panic hook so every panic is handed to `handler`
///
/// The previous hook is not chained. A handler failure is printed to stderr.
pub fn install_panic_hook<H: ErrorHandler + 'static>(handler: H) {
    panic::set_hook(Box::new(move |info| {
        let error = panic_to_error(info);
        if let Err(e) = handler.handle_error(&error) {
            eprintln!("error handler failed while reporting a panic: {e}");
        }
    }));
}

/// Convert panic info into a client error
pub fn panic_to_error(info: &PanicHookInfo<'_>) -> IncomingError {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "Box<dyn Any>".to_string());

    let mut error = ClientError::new(message).with_name(PANIC_ERROR_NAME);
    if let Some(location) = info.location() {
        error = error.with_stack(format!("at {location}"));
    }
    error.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<IncomingError>>>);

    impl ErrorHandler for Capture {
        type Error = std::convert::Infallible;

        fn handle_error(&self, error: &IncomingError) -> Result<(), Self::Error> {
            self.0.lock().unwrap().push(error.clone());
            Ok(())
        }
    }

    #[test]
    fn test_panic_becomes_client_error() {
        let capture = Capture::default();
        install_panic_hook(capture.clone());

        let result = std::panic::catch_unwind(|| panic!("disk on fire: {}", 42));
        let _ = panic::take_hook();

        assert!(result.is_err());
        let seen = capture.0.lock().unwrap();
        assert_eq!(seen.len(), 1);
        match &seen[0] {
            IncomingError::Client(c) => {
                assert_eq!(c.name, PANIC_ERROR_NAME);
                assert_eq!(c.message, "disk on fire: 42");
                assert!(c.stack.as_deref().unwrap().contains("hook.rs"));
            }
            other => panic!("unexpected: {other:?}"),
        };
    }
}
