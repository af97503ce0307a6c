//! Console output formatting.
//!
//! Menu, headings and results go to stdout. Agent progress lines go to
//! stderr so a piped result stays clean.

use std::io::Write;

/// Width of the `=` rules around headings.
pub const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Program banner.
pub fn banner(out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "       AI 公司系统 - 自主运营平台")?;
    writeln!(out, "{}", rule())?;
    writeln!(out)?;
    Ok(())
}

/// Heading printed above a workflow result.
pub fn result_heading(out: &mut impl Write, title: &str) -> anyhow::Result<()> {
    writeln!(out, "\n{}", rule())?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule())?;
    Ok(())
}

/// Prompt without a trailing newline, flushed so it shows before input.
pub fn prompt(out: &mut impl Write, text: &str) -> anyhow::Result<()> {
    write!(out, "{text}")?;
    out.flush()?;
    Ok(())
}

/// One-line agent progress update on stderr.
pub fn status(agent: &str, emoji: &str, text: &str) {
    eprintln!("[{agent}] {emoji} {}", first_line(text, 160));
}

/// First line of `text`, cut to `max_chars` characters.
fn first_line(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > max_chars {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_layout() {
        let mut buf = Vec::new();
        banner(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].len(), RULE_WIDTH);
        assert_eq!(lines[1], "       AI 公司系统 - 自主运营平台");
        assert_eq!(lines[2], lines[0]);
        assert_eq!(lines[3], "");
    }

    #[test]
    fn result_heading_is_framed() {
        let mut buf = Vec::new();
        result_heading(&mut buf, "研究结果：").unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, format!("\n{r}\n研究结果：\n{r}\n", r = rule()));
    }

    #[test]
    fn first_line_truncates_on_char_boundary() {
        assert_eq!(first_line("短\n第二行", 10), "短");
        assert_eq!(first_line("技术调研报告", 2), "技术…");
        assert_eq!(first_line("", 5), "");
    }
}
