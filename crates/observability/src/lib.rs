//! Tracing/logging setup shared by the dispo binaries and tests.

/// Initialize process-wide tracing/logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize debug-level logging captured by the test harness.
pub fn init_test() {
    tracing::init_test();
}

/// Tracing configuration (filters, output format).
pub mod tracing;
