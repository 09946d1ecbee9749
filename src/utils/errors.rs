//! User-Friendly Error Formatting
//!
//! Provides user-friendly error messages with troubleshooting hints
//! for common error scenarios.

use std::fmt::Write;

/// Format error for user consumption
///
/// Takes technical error and produces user-friendly message with
/// troubleshooting steps and context.
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    // Header
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "╔════════════════════════════════════════════════════════════╗"
    )
    .ok();
    writeln!(
        &mut output,
        "║                     ERROR                                  ║"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();
    writeln!(&mut output).ok();

    // Analyze error and provide context
    let error_msg = format!("{:#}", error);

    if error_msg.contains("config") {
        format_config_error(&mut output);
    } else if error_msg.contains("manifest") || error_msg.contains("snapshot") {
        format_snapshot_error(&mut output);
    } else if error_msg.contains("No such file") || error_msg.contains("Failed to read") {
        format_file_error(&mut output);
    } else {
        format_generic_error(&mut output, &error.to_string());
    }

    // Technical details
    writeln!(&mut output).ok();
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Technical Details:").ok();
    writeln!(&mut output).ok();
    writeln!(&mut output, "{:#}", error).ok();
    writeln!(&mut output).ok();

    // Footer with help
    writeln!(
        &mut output,
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━"
    )
    .ok();
    writeln!(&mut output, "Need Help?").ok();
    writeln!(
        &mut output,
        "  - Run with --verbose for detailed logs: clipboard-inspector -vvv"
    )
    .ok();
    writeln!(
        &mut output,
        "  - Write logs to a file: clipboard-inspector --log-file inspector.log"
    )
    .ok();
    writeln!(
        &mut output,
        "╚════════════════════════════════════════════════════════════╝"
    )
    .ok();

    output
}

fn format_config_error(output: &mut String) {
    writeln!(output, "Configuration Error").ok();
    writeln!(output).ok();
    writeln!(output, "Problem with configuration file.").ok();
    writeln!(output).ok();
    writeln!(output, "Common Causes:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Configuration file not found").ok();
    writeln!(
        output,
        "     → Specify: clipboard-inspector -c /path/to/config.toml"
    )
    .ok();
    writeln!(output, "     → Omit -c to run with built-in defaults").ok();
    writeln!(output).ok();
    writeln!(output, "  2. Invalid TOML syntax").ok();
    writeln!(output, "     → Check for typos, missing quotes, etc.").ok();
    writeln!(output).ok();
    writeln!(output, "  3. Value out of range").ok();
    writeln!(
        output,
        "     → hex_dump_limit must be a positive multiple of 16"
    )
    .ok();
    writeln!(
        output,
        "     → integer_dump_max must be a multiple of 4, at most 4096"
    )
    .ok();
    writeln!(output, "     → output.format is 'text' or 'json'").ok();
}

fn format_snapshot_error(output: &mut String) {
    writeln!(output, "Snapshot Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not load the clipboard snapshot manifest.").ok();
    writeln!(output).ok();
    writeln!(output, "Expected Layout:").ok();
    writeln!(output).ok();
    writeln!(output, "  [[representation]]").ok();
    writeln!(output, "  format_id = 13").ok();
    writeln!(output, "  format_name = \"CF_UNICODETEXT\"").ok();
    writeln!(output, "  file = \"13.bin\"").ok();
    writeln!(output).ok();
    writeln!(
        output,
        "  Files are resolved relative to the manifest's directory."
    )
    .ok();
}

fn format_file_error(output: &mut String) {
    writeln!(output, "File Error").ok();
    writeln!(output).ok();
    writeln!(output, "Could not read the input file.").ok();
    writeln!(output).ok();
    writeln!(output, "Troubleshooting:").ok();
    writeln!(output).ok();
    writeln!(output, "  1. Check the path exists and is readable").ok();
    writeln!(output, "  2. Relative paths resolve from the working directory").ok();
}

fn format_generic_error(output: &mut String, error: &str) {
    writeln!(output, "Inspection Error").ok();
    writeln!(output).ok();
    writeln!(output, "An error occurred while inspecting clipboard data.").ok();
    writeln!(output).ok();
    writeln!(output, "Error: {}", error).ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_user_error() {
        let error = anyhow::anyhow!("Failed to parse config file");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("ERROR"));
        assert!(formatted.contains("Configuration Error"));
    }

    #[test]
    fn test_snapshot_error_formatting() {
        let error = anyhow::anyhow!("bad entry").context("Failed to load snapshot manifest");
        let formatted = format_user_error(&error);
        assert!(formatted.contains("Snapshot Error"));
        assert!(formatted.contains("[[representation]]"));
        assert!(formatted.contains("bad entry"));
    }

    #[test]
    fn test_generic_error_formatting() {
        let formatted = format_user_error(&anyhow::anyhow!("unexpected"));
        assert!(formatted.contains("Inspection Error"));
        assert!(formatted.contains("Error: unexpected"));
    }
}
