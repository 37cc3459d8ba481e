//! Output format helpers for CLI commands.

use clap::{Args, ValueEnum};
use fieldset_shared::ErrorEnvelope;

/// Output format choices for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-friendly text output.
    Text,
    /// Machine-friendly JSON output.
    Json,
    /// Line-delimited JSON (NDJSON) output.
    Ndjson,
}

/// Output-related CLI flags.
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format for command responses.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
    /// Suppress progress/logging output.
    #[arg(long, global = true)]
    pub no_progress: bool,
}

/// Output mode derived from CLI flags.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub format: OutputFormat,
    pub no_progress: bool,
}

impl OutputMode {
    /// Build output mode from CLI flags.
    #[must_use]
    pub const fn from_args(args: &OutputArgs) -> Self {
        Self {
            format: args.output,
            no_progress: args.no_progress,
        }
    }

    /// Returns true when JSON output is requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Returns true when NDJSON output is requested.
    #[must_use]
    pub const fn is_ndjson(self) -> bool {
        matches!(self.format, OutputFormat::Ndjson)
    }
}

/// Pretty JSON with a trailing newline.
pub fn to_pretty_line(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string_pretty(value)?;
    output.push('\n');
    Ok(output)
}

/// Compact JSON with a trailing newline.
pub fn to_ndjson_line(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut output = serde_json::to_string(value)?;
    output.push('\n');
    Ok(output)
}

/// NDJSON summary record: `{"type":"summary","status":..,"kind":..}` plus
/// the keys of `extra`.
pub fn format_ndjson_summary(
    status: &str,
    kind: &str,
    extra: Option<serde_json::Value>,
) -> Result<String, serde_json::Error> {
    let mut payload = serde_json::Map::new();
    payload.insert("type".to_string(), "summary".into());
    payload.insert("status".to_string(), status.into());
    payload.insert("kind".to_string(), kind.into());
    if let Some(serde_json::Value::Object(map)) = extra {
        for (key, value) in map {
            payload.insert(key, value);
        }
    }
    to_ndjson_line(&serde_json::Value::Object(payload))
}

/// Render an error envelope in the requested format.
pub fn format_error(mode: OutputMode, error: &ErrorEnvelope) -> String {
    let payload = serde_json::json!({
        "type": "error",
        "status": "error",
        "error": error,
    });

    // Envelopes hold only strings; a failure here still needs some output.
    let fallback = || {
        "{\"type\":\"error\",\"status\":\"error\",\"error\":{\"kind\":\"unexpected\",\"code\":{\"namespace\":\"core\",\"code\":\"internal\"},\"message\":\"internal error\"}}\n"
            .to_string()
    };

    if mode.is_ndjson() {
        to_ndjson_line(&payload).unwrap_or_else(|_| fallback())
    } else if mode.is_json() {
        let payload = serde_json::json!({ "status": "error", "error": error });
        to_pretty_line(&payload).unwrap_or_else(|_| fallback())
    } else {
        format_error_text(error)
    }
}

fn format_error_text(error: &ErrorEnvelope) -> String {
    let mut out = format!(
        "status: error\ncode: {}\nmessage: {}\n",
        error.code, error.message
    );
    for (key, value) in &error.metadata {
        out.push_str(&format!("{key}: {value}\n"));
    }
    out
}
