// Chunk: docs/chunks/reconciliation - Dependency reconciliation for the text surface
//!
//! ANSI rendering of an attributed buffer, for `quill-render`.
//!
//! Each attribute run becomes a 24-bit color escape followed by its text.
//! The surface background, when one has been applied, is painted behind
//! every run. Escapes are reset at the end of each line so a terminal that
//! wraps or scrolls does not smear colors into the next line.

use std::io::{self, Write};

use quill_surface::{Attributes, AttributedBuffer, Color};

use crate::metrics::Metrics;

const RESET: &str = "\x1b[0m";

/// The escape sequence selecting `attrs` over `background`.
fn escape(attrs: &Attributes, background: Option<Color>) -> String {
    let mut codes = Vec::new();
    if attrs.bold == Some(true) {
        codes.push("1".to_string());
    }
    if attrs.italic == Some(true) {
        codes.push("3".to_string());
    }
    if let Some(Color { r, g, b }) = attrs.foreground {
        codes.push(format!("38;2;{r};{g};{b}"));
    }
    if let Some(Color { r, g, b }) = background {
        codes.push(format!("48;2;{r};{g};{b}"));
    }
    if codes.is_empty() {
        String::new()
    } else {
        format!("\x1b[{}m", codes.join(";"))
    }
}

/// Writes the buffer's text with its attributes as ANSI escapes.
pub fn render_ansi(buffer: &AttributedBuffer, out: &mut dyn Write) -> io::Result<()> {
    let background = buffer.appearance().map(|a| a.background);
    for (text, attrs) in buffer.styled_runs() {
        let start = escape(attrs, background);
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            if !line.is_empty() {
                write!(out, "{start}{line}{RESET}")?;
            }
            if lines.peek().is_some() {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// A short human-readable summary of the metrics.
pub fn describe_metrics(metrics: &Metrics) -> String {
    format!(
        "font line height: {}\nline height multiple: {}\ncomputed line height: {}\nbaseline offset: {}",
        metrics.font_line_height, metrics.line_height_multiple, metrics.computed_line_height, metrics.baseline_offset
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_surface::TextSurface;

    fn render(buffer: &AttributedBuffer) -> String {
        let mut out = Vec::new();
        render_ansi(buffer, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_text_has_no_escapes() {
        let buffer = AttributedBuffer::new("plain");
        assert_eq!(render(&buffer), "plain\x1b[0m");
    }

    #[test]
    fn test_colored_bold_run() {
        let mut buffer = AttributedBuffer::new("fn x");
        buffer.set_attributes(
            0..2,
            &Attributes {
                foreground: Some(Color::rgb(1, 2, 3)),
                bold: Some(true),
                ..Attributes::default()
            },
        );
        assert_eq!(render(&buffer), "\x1b[1;38;2;1;2;3mfn\x1b[0m x\x1b[0m");
    }

    #[test]
    fn test_newlines_are_outside_escapes() {
        let mut buffer = AttributedBuffer::new("a\nb");
        buffer.set_attributes(0..3, &Attributes::foreground(Color::rgb(9, 9, 9)));
        assert_eq!(render(&buffer), "\x1b[38;2;9;9;9ma\x1b[0m\n\x1b[38;2;9;9;9mb\x1b[0m");
    }

    #[test]
    fn test_describe_metrics() {
        let metrics = Metrics {
            font_line_height: 16.0,
            line_height_multiple: 1.5,
            computed_line_height: 24.0,
            baseline_offset: 4.0,
        };
        let text = describe_metrics(&metrics);
        assert!(text.contains("computed line height: 24"));
        assert!(text.contains("baseline offset: 4"));
    }

    #[test]
    fn test_background_from_appearance() {
        let mut buffer = AttributedBuffer::new("x");
        let theme = quill_syntax::Theme::catppuccin_mocha();
        buffer.set_appearance(&theme.appearance());
        assert_eq!(render(&buffer), "\x1b[48;2;30;30;46mx\x1b[0m");
    }
}
