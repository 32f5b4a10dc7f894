//! Source template normalization.
//!
//! Block sources are spliced verbatim into generated shader functions at a
//! fixed column. The first line picks up the indentation of its call site, so
//! only continuation lines get their own tab.

/// Split on CRLF, CR or LF. Always yields at least one (possibly empty) line.
fn split_lines(src: &str) -> Vec<&str> {
    let bytes = src.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' => {
                lines.push(&src[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            b'\n' => {
                lines.push(&src[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    lines.push(&src[start..]);
    lines
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Strip leading and trailing blank lines, join with `\n` and indent every
/// line after the first by one tab. A blank source yields an empty string.
pub fn normalize_source(src: &str) -> String {
    let lines = split_lines(src);

    let mut end = lines.len() - 1;
    while end > 0 && is_blank(lines[end]) {
        end -= 1;
    }
    let mut start = 0;
    while start < end && is_blank(lines[start]) {
        start += 1;
    }
    if start == end && is_blank(lines[start]) {
        return String::new();
    }

    let mut out = String::with_capacity(src.len() + end - start);
    for (i, line) in lines[start..=end].iter().enumerate() {
        if i > 0 {
            out.push('\n');
            out.push('\t');
        }
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_handles_every_line_ending() {
        assert_eq!(split_lines("a\r\nb\rc\nd"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines(""), vec![""]);
        assert_eq!(split_lines("\n"), vec!["", ""]);
        assert_eq!(split_lines("\r\r\n"), vec!["", "", ""]);
    }

    #[test]
    fn trims_blank_lines_and_indents_continuations() {
        assert_eq!(normalize_source("\n\nfoo\nbar\n\n"), "foo\n\tbar");
        assert_eq!(normalize_source("\r\n\r\nfoo\r\nbar\r\n\r\n"), "foo\n\tbar");
        assert_eq!(normalize_source("\r\rfoo\rbar\r\r"), "foo\n\tbar");
    }

    #[test]
    fn whitespace_only_edges_are_blank() {
        assert_eq!(normalize_source("  \t\n   foo;\n \t \n"), "   foo;");
    }

    #[test]
    fn inner_blank_lines_are_kept() {
        assert_eq!(normalize_source("a;\n\nb;"), "a;\n\t\n\tb;");
    }

    #[test]
    fn blank_sources_normalize_to_empty() {
        assert_eq!(normalize_source(""), "");
        assert_eq!(normalize_source("\n\n"), "");
        assert_eq!(normalize_source(" \r\n\t\r\n  "), "");
    }

    #[test]
    fn single_line_is_unchanged() {
        assert_eq!(normalize_source("position = 0;"), "position = 0;");
    }

    #[test]
    fn renormalizing_adds_one_tab_to_continuations() {
        let once = normalize_source("\n  a = 1;\n  b = 2;\n  c = 3;\n");
        let twice = normalize_source(&once);
        let stripped: Vec<&str> = twice
            .split('\n')
            .enumerate()
            .map(|(i, l)| if i == 0 { l } else { l.strip_prefix('\t').unwrap_or(l) })
            .collect();
        assert_eq!(stripped.join("\n"), once);
    }
}
