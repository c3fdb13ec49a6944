use std::error::Error;
use std::io::IsTerminal;

use owo_colors::OwoColorize;

use super::TexoptError;

/// Formats TexoptError for CLI output
pub struct ErrorFormatter {
    verbose: bool,
    use_color: bool,
}

impl ErrorFormatter {
    /// Creates a new ErrorFormatter with default TTY detection
    pub fn new(verbose: bool) -> Self {
        Self::with_color_detection(verbose, Self::default_should_use_color)
    }

    /// Creates a new ErrorFormatter with injectable TTY detection for testing
    pub fn with_color_detection(verbose: bool, detect_color: fn() -> bool) -> Self {
        let use_color = detect_color();
        Self { verbose, use_color }
    }

    fn default_should_use_color() -> bool {
        std::io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err()
    }

    /// Formats the error for display
    pub fn format(&self, error: &TexoptError) -> String {
        let plain = if self.verbose {
            self.format_verbose_plain(error)
        } else {
            format!("error[{}]: {}", error.code().as_str(), error)
        };

        if self.use_color {
            self.apply_color(&plain)
        } else {
            plain
        }
    }

    fn format_verbose_plain(&self, error: &TexoptError) -> String {
        let code = error.code();
        let mut output = format!("error[{}]: {}", code.as_str(), error);

        output.push_str("\n  |");
        output.push_str(&format!("\n  | Cause: {}", code.cause()));

        output.push_str("\n  |");
        output.push_str("\n  | Remediation:");
        for line in code.remediation().lines() {
            output.push_str(&format!("\n  |   {}", line));
        }

        let source_chain = Self::format_source_chain(error);
        if !source_chain.is_empty() {
            output.push_str("\n  |");
            output.push_str(&format!("\n  | Source chain:\n{}", source_chain));
        }

        output.push_str("\n  |");
        output.push_str("\n  = note: use `texopt --help` for more information");

        output
    }

    fn format_source_chain(error: &TexoptError) -> String {
        let mut chain = Vec::new();
        let mut current: Option<&(dyn Error + 'static)> = error.source();

        while let Some(err) = current {
            chain.push(format!("  |   - {}", err));
            current = err.source();
        }

        chain.join("\n")
    }

    fn apply_color(&self, text: &str) -> String {
        let mut result = String::new();

        for line in text.lines() {
            if !result.is_empty() {
                result.push('\n');
            }

            if line.starts_with("error[") {
                let bracket_end = line.find(']').map(|i| i + 1).unwrap_or(0);
                let (prefix, rest) = line.split_at(bracket_end);
                result.push_str(&format!("{}{}", prefix.red().bold(), rest.bold()));
            } else if line.starts_with("  | Cause:") {
                result.push_str(&line.yellow().to_string());
            } else if line.starts_with("  | Remediation:") {
                result.push_str(&line.green().to_string());
            } else if line.starts_with("  = note:") {
                result.push_str(&line.dimmed().to_string());
            } else {
                result.push_str(line);
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_color() -> bool {
        false
    }

    fn with_color() -> bool {
        true
    }

    #[test]
    fn format_simple() {
        let formatter = ErrorFormatter::with_color_detection(false, no_color);
        let error = TexoptError::MissingImporter("Assets/a.png".to_string());

        assert_eq!(
            formatter.format(&error),
            "error[IMP001]: No TextureImporter settings found for Assets/a.png"
        );
    }

    #[test]
    fn format_verbose() {
        let formatter = ErrorFormatter::with_color_detection(true, no_color);
        let error = TexoptError::InvalidPolicy("quality out of range".to_string());

        let output = formatter.format(&error);

        assert!(output.starts_with("error[CFG002]: Invalid policy: quality out of range"));
        assert!(output.contains("  | Cause: An optimization setting is out of range"));
        assert!(output.contains("  | Remediation:"));
        assert!(output.contains("  |   1. Use a max resolution"));
        assert!(output.ends_with("= note: use `texopt --help` for more information"));
    }

    #[test]
    fn verbose_includes_source_chain() {
        let formatter = ErrorFormatter::with_color_detection(true, no_color);
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "underlying error");
        let error = TexoptError::Io(io_error);

        let output = formatter.format(&error);

        assert!(output.contains("Source chain:"));
        assert!(output.contains("  |   - underlying error"));
    }

    #[test]
    fn simple_omits_cause() {
        let formatter = ErrorFormatter::with_color_detection(false, no_color);
        let error = TexoptError::BatchFailed(2);

        let output = formatter.format(&error);

        assert!(!output.contains("Cause"));
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn color_keeps_message_text() {
        let formatter = ErrorFormatter::with_color_detection(false, with_color);
        let error = TexoptError::BatchFailed(2);

        let output = formatter.format(&error);

        assert!(output.contains("BAT001"));
        assert!(output.contains("2 texture(s) failed to optimize"));
        assert!(output.contains("\u{1b}["));
    }
}
