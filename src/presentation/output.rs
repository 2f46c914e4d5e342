//! Output Rendering
//!
//! Provides a unified interface for rendering build results as text or JSON.

use std::fmt::Write as _;

use crate::application::{BuildReport, EmitResult, PackageReport, PackageState};

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    skip: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            skip: "○",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            skip: "[ ]",
        }
    }
}

/// Renders build reports
pub trait BuildReportRenderer {
    fn render(&self, report: &BuildReport) -> String;
}

/// Text renderer for build reports
pub struct TextRenderer {
    /// Whether to use unicode
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn package_line(&self, icons: &Icons, package: &PackageReport) -> String {
        let output = package
            .output
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match &package.state {
            PackageState::Compiled => format!("{} {} -> {}", icons.check, package.package, output),
            PackageState::Skipped => format!("{} {} (up to date)", icons.skip, package.package),
            PackageState::Failed { failure } => {
                format!("{} {}: {}", icons.cross, package.package, failure)
            }
            other => format!("  {} ({:?})", package.package, other),
        }
    }
}

impl BuildReportRenderer for TextRenderer {
    fn render(&self, report: &BuildReport) -> String {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };

        let mut out = String::new();
        if report.packages.is_empty() {
            let _ = writeln!(out, "No grammar packages configured");
            return out;
        }

        if report.has_failures() {
            let _ = writeln!(out, "{} Build finished with failures", icons.cross);
        } else {
            let _ = writeln!(out, "{} Build complete", icons.check);
        }
        let _ = writeln!(out);
        for package in &report.packages {
            let _ = writeln!(out, "  {}", self.package_line(&icons, package));
            if self.verbose > 0 {
                for warning in &package.warnings {
                    let _ = writeln!(out, "      [!] {}", warning);
                }
            }
        }
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "  {} compiled, {} skipped, {} failed",
            report.compiled(),
            report.skipped(),
            report.failed()
        );
        out
    }
}

/// JSON renderer for build reports
pub struct JsonRenderer;

impl BuildReportRenderer for JsonRenderer {
    fn render(&self, report: &BuildReport) -> String {
        let json = serde_json::json!({
            "success": !report.has_failures(),
            "compiled": report.compiled(),
            "skipped": report.skipped(),
            "failed": report.failed(),
            "packages": report.packages,
        });
        serde_json::to_string_pretty(&json).unwrap_or_default()
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn BuildReportRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// Render an emit result
pub fn render_emit(result: &EmitResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(result).unwrap_or_default(),
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "Emitted {} artifact(s)", result.emitted.len());
            for asset in &result.emitted {
                let _ = writeln!(out, "  {}", asset.to.display());
            }
            if !result.skipped.is_empty() {
                let _ = writeln!(out, "Skipped {} missing artifact(s)", result.skipped.len());
            }
            out
        }
    }
}
