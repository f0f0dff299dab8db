//! System clipboard integration for rendered reports.

use anyhow::{Context, Result, bail};
use arboard::Clipboard;

/// Upper bound on a clipboard payload. A rendered report is a few kilobytes;
/// the cap only guards against runaway content.
const MAX_PAYLOAD: usize = 10 * 1024 * 1024;

/// Seam between the copy path and the OS clipboard, so the path is testable
/// on headless machines.
trait ClipboardSink {
    fn put(&mut self, text: &str) -> Result<()>;
}

struct SystemClipboard(Clipboard);

impl ClipboardSink for SystemClipboard {
    fn put(&mut self, text: &str) -> Result<()> {
        self.0.set_text(text).context("Failed to write to the system clipboard")
    }
}

/// Payload checks run before the clipboard is opened, so headless
/// environments still get the precise error for a bad payload.
fn check_payload(report: &str) -> Result<()> {
    if report.is_empty() {
        bail!("Cannot copy an empty report to clipboard");
    }
    if report.len() > MAX_PAYLOAD {
        bail!("Report too large for clipboard ({} bytes, max {})", report.len(), MAX_PAYLOAD);
    }
    Ok(())
}

/// Copy a rendered report to the system clipboard.
///
/// Fails on an empty or oversized payload, or when no system clipboard is
/// available.
pub fn copy_to_clipboard(report: &str) -> Result<()> {
    check_payload(report)?;
    let clipboard = Clipboard::new().context("No system clipboard available")?;
    SystemClipboard(clipboard).put(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        payload: Option<String>,
    }

    impl ClipboardSink for RecordingSink {
        fn put(&mut self, text: &str) -> Result<()> {
            self.payload = Some(text.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl ClipboardSink for FailingSink {
        fn put(&mut self, _text: &str) -> Result<()> {
            bail!("clipboard is locked")
        }
    }

    fn copy_into(sink: &mut impl ClipboardSink, report: &str) -> Result<()> {
        check_payload(report)?;
        sink.put(report)
    }

    #[test]
    fn test_report_reaches_the_sink_verbatim() {
        let mut sink = RecordingSink::default();
        let report = "# Analysis Results\n\n| Metric | Value |\n| Price | $10 |\n";

        copy_into(&mut sink, report).unwrap();
        assert_eq!(sink.payload.as_deref(), Some(report));
    }

    #[test]
    fn test_empty_report_is_rejected_before_the_sink() {
        let mut sink = RecordingSink::default();
        let err = copy_into(&mut sink, "").unwrap_err();
        assert!(err.to_string().contains("empty"));
        assert!(sink.payload.is_none());
    }

    #[test]
    fn test_oversized_report_is_rejected() {
        let mut sink = RecordingSink::default();
        let oversized = "a".repeat(MAX_PAYLOAD + 1);
        let err = copy_into(&mut sink, &oversized).unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_payload_at_exact_cap_is_accepted() {
        let mut sink = RecordingSink::default();
        let at_cap = "a".repeat(MAX_PAYLOAD);
        assert!(copy_into(&mut sink, &at_cap).is_ok());
    }

    #[test]
    fn test_sink_failure_propagates() {
        let err = copy_into(&mut FailingSink, "report").unwrap_err();
        assert!(err.to_string().contains("clipboard is locked"));
    }

    #[test]
    fn test_payload_errors_win_over_clipboard_availability() {
        let err = copy_to_clipboard("").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
