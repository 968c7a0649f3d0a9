//! # Dispatcher
//!
//! 错误分发模块。
//!
//! 负责：
//! - 对每个错误进行分类（传输错误 / 客户端错误）
//! - 按配置 fan-out 到默认处理、本地诊断和远程日志
//! - 隔离远程发送失败，不影响调用方

pub mod classify;
pub mod dispatcher;
pub mod error;
pub mod handle;
pub mod hook;
pub mod metrics;
pub mod remote;
pub mod sinks;

pub use classify::{classify, classify_error, classify_value};
pub use contracts::{ErrorHandler, ErrorHandlingConfig, IncomingError, LogTransport, RecordSender};
pub use dispatcher::{ErrorDispatcher, ErrorDispatcherBuilder, create_dispatcher};
pub use error::DispatcherError;
pub use handle::{QueueSender, TransportHandle};
pub use hook::{install_panic_hook, panic_to_error};
pub use metrics::{DispatchMetrics, DispatchSnapshot, TransportMetrics, TransportSnapshot};
pub use remote::{RemoteTransport, create_remote};
pub use sinks::{
    API_KEY_HEADER, ConsoleSender, FileTransport, HttpTransport, StderrSurface, TracingDiagnostics,
};
