//! 错误分发指标
//!
//! 每次分发、默认处理、远程投递时记录计数器。未安装 recorder 时均为空操作。

use contracts::ErrorKind;
use metrics::{counter, histogram};

/// 记录一次错误分发
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_error_dispatched;
///
/// record_error_dispatched("TestApp", error.kind());
/// ```
pub fn record_error_dispatched(application: &str, kind: ErrorKind) {
    counter!(
        "error_dispatch_errors_total",
        "application" => application.to_string(),
        "kind" => kind.as_str()
    )
    .increment(1);
}

/// 记录默认错误处理调用结果
pub fn record_default_handling(success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("error_dispatch_default_handling_total", "status" => status).increment(1);
}

/// 记录远程记录移交 (入队)
pub fn record_remote_handoff(sender: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "error_dispatch_remote_handoff_total",
        "sender" => sender.to_string(),
        "status" => status
    )
    .increment(1);
}

/// 记录远程分发被跳过 (配置不完整)
pub fn record_remote_skipped(reason: &'static str) {
    counter!("error_dispatch_remote_skipped_total", "reason" => reason).increment(1);
}

/// 记录 transport 投递结果
pub fn record_record_delivered(transport: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!(
        "error_dispatch_records_delivered_total",
        "transport" => transport.to_string(),
        "status" => status
    )
    .increment(1);
}

/// 记录 transport 投递耗时
pub fn record_delivery_latency_ms(transport: &str, latency_ms: f64) {
    histogram!(
        "error_dispatch_delivery_latency_ms",
        "transport" => transport.to_string()
    )
    .record(latency_ms);
}

/// 记录队列满导致的丢弃
pub fn record_record_dropped(transport: &str) {
    counter!(
        "error_dispatch_records_dropped_total",
        "transport" => transport.to_string()
    )
    .increment(1);
}
