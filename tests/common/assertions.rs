//! Assertion macros with descriptive failure messages.

/// Assert that a report file under the project contains `needle`.
///
/// # Example
/// ```ignore
/// assert_report_contains!(env, "build/reports/modgate/boundary.txt", "Status: FAIL");
/// ```
#[macro_export]
macro_rules! assert_report_contains {
    ($env:expr, $path:expr, $needle:expr) => {
        let content = $env.read($path);
        assert!(
            content.contains($needle),
            "Expected '{}' to contain '{}'.\nActual content:\n{}",
            $path,
            $needle,
            content
        );
    };
}

/// Assert that command output contains `needle`.
#[macro_export]
macro_rules! assert_output_contains {
    ($result:expr, $needle:expr) => {
        let output = $result.combined_output();
        assert!(
            output.contains($needle),
            "Expected output to contain '{}'.\nActual output:\n{}",
            $needle,
            output
        );
    };
}
