//! Sizes, rates and the end-of-run summary line

use std::time::Duration;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const MIB: f64 = 1_048_576.0;

/// `1536` → `1.50 KB`; counts under 1 KB stay whole
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let exponent = ((bytes.ilog2() / 10) as usize).min(UNITS.len() - 1);
    let scaled = bytes as f64 / (1u64 << (10 * exponent)) as f64;
    format!("{scaled:.2} {}", UNITS[exponent])
}

/// Average rate of `bytes` over `elapsed`, in MB/s or KB/s below 1 MB/s
pub fn format_throughput(bytes: u64, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let mib_per_sec = if secs > 0.0 { bytes as f64 / MIB / secs } else { 0.0 };

    if mib_per_sec >= 1.0 {
        format!("{mib_per_sec:.1} MB/s")
    } else {
        format!("{:.0} KB/s", mib_per_sec * 1024.0)
    }
}

/// `3 file(s), 1.50 MB in 0.25s (6.0 MB/s)`
pub fn format_summary(files: usize, bytes: u64, elapsed: Duration) -> String {
    format!(
        "{files} file(s), {} in {:.2}s ({})",
        format_bytes(bytes),
        elapsed.as_secs_f64(),
        format_throughput(bytes, elapsed)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(13), "13 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.00 KB");
        assert_eq!(format_bytes(9_728_000), "9.28 MB");
        assert_eq!(format_bytes(3 << 30), "3.00 GB");
        assert_eq!(format_bytes(u64::MAX), "16777216.00 TB");
    }

    #[test]
    fn test_format_throughput() {
        assert_eq!(format_throughput(512 * 1024, Duration::from_secs(1)), "512 KB/s");
        assert_eq!(format_throughput(21 << 20, Duration::from_secs(2)), "10.5 MB/s");
        assert_eq!(format_throughput(1 << 20, Duration::ZERO), "0 KB/s");
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(
            format_summary(2, 3 << 20, Duration::from_millis(500)),
            "2 file(s), 3.00 MB in 0.50s (6.0 MB/s)"
        );
    }
}
