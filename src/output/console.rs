//! Streaming console formatter
//!
//! Writes each tree line as soon as the walker produces it.

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{LineKind, TreeLine, TreeOutput, WalkSummary};

/// Colored line writer implementing [`TreeOutput`].
pub struct ConsoleFormatter<W: WriteColor> {
    out: W,
}

impl ConsoleFormatter<StandardStream> {
    pub fn stdout(choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> ConsoleFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn name_spec(kind: LineKind) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match kind {
            LineKind::Root | LineKind::Entry { is_dir: true } => {
                spec.set_fg(Some(Color::Blue)).set_bold(true);
            }
            LineKind::Entry { is_dir: false } => {
                spec.set_fg(Some(Color::White));
            }
            LineKind::PermissionDenied | LineKind::Error => {
                spec.set_fg(Some(Color::Red));
            }
        }
        spec
    }
}

impl<W: WriteColor> TreeOutput for ConsoleFormatter<W> {
    fn line(&mut self, line: &TreeLine) -> io::Result<()> {
        write!(self.out, "{}", line.lead())?;
        if !line.icon.is_empty() {
            write!(self.out, "{} ", line.icon)?;
        }
        self.out.set_color(&Self::name_spec(line.kind))?;
        write!(self.out, "{}", line.name)?;
        self.out.reset()?;

        if !line.details.is_empty() {
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
            for detail in &line.details {
                write!(self.out, " {}", detail)?;
            }
            self.out.reset()?;
        }
        writeln!(self.out)
    }

    fn finish(&mut self, _summary: &WalkSummary) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;

    use super::*;

    fn render(lines: &[TreeLine], buffer: Buffer) -> String {
        let mut formatter = ConsoleFormatter::new(buffer);
        for line in lines {
            formatter.line(line).unwrap();
        }
        formatter.finish(&WalkSummary::default()).unwrap();
        String::from_utf8(formatter.into_inner().into_inner()).unwrap()
    }

    fn sample() -> Vec<TreeLine> {
        vec![
            TreeLine::root("📂", "project", vec![]),
            TreeLine::entry("", false, true, "📂", "src", vec!["🔒".into()]),
            TreeLine::entry("", true, false, "📄", "main.rs", vec![]),
        ]
    }

    #[test]
    fn plain_output_matches_line_text() {
        let text = render(&sample(), Buffer::no_color());
        let expected: String = sample().iter().map(|l| format!("{}\n", l)).collect();
        assert_eq!(text, expected);
    }

    #[test]
    fn colored_output_keeps_text() {
        let text = render(&sample(), Buffer::ansi());
        assert!(text.contains("\x1b["));
        assert!(text.contains("main.rs"));
        assert!(text.contains("├── 📂 "));
    }
}
