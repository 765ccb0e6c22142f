//! Line counting for textual content

/// Count the lines of `content`.
///
/// Invalid UTF-8 sequences are dropped before counting. A line ends at
/// `\n`, `\r\n`, `\r`, or any of the Unicode line boundaries (`\x0b`, `\x0c`,
/// `\x1c`..`\x1e`, `\u{85}`, `\u{2028}`, `\u{2029}`). A trailing terminator
/// does not start an extra empty line, and empty content has zero lines.
pub fn count_lines(content: &[u8]) -> u64 {
    let mut lines = 0u64;
    let mut pending = false;
    let mut after_cr = false;

    for chunk in content.utf8_chunks() {
        for ch in chunk.valid().chars() {
            if after_cr {
                after_cr = false;
                if ch == '\n' {
                    continue;
                }
            }
            if is_line_boundary(ch) {
                lines += 1;
                pending = false;
                after_cr = ch == '\r';
            } else {
                pending = true;
            }
        }
    }

    if pending {
        lines += 1;
    }
    lines
}

fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
