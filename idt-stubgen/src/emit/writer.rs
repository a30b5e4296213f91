/// Line writer for C fragments. Each line goes straight to the underlying
/// `io::Write`, so output of any length is streamed rather than collected.
use std::io::{self, Write};

pub struct CodeWriter<W: Write> {
    out: W,
    depth: usize,
    line_buf: String,
}

impl<W: Write> CodeWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            line_buf: String::new(),
        }
    }

    /// Write one line at the current indentation level, as a single write.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        self.line_buf.clear();
        for _ in 0..self.depth {
            self.line_buf.push_str("  ");
        }
        self.line_buf.push_str(text);
        self.line_buf.push('\n');
        self.out.write_all(self.line_buf.as_bytes())
    }

    /// Start a function body: `text {`, then indent.
    pub fn open(&mut self, text: &str) -> io::Result<()> {
        self.line(&format!("{text} {{"))?;
        self.depth += 1;
        Ok(())
    }

    /// End a function body.
    pub fn close(&mut self) -> io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        self.line("}")
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Escape a string for embedding in a C double-quoted string literal.
/// Control characters without a short escape become three-digit octal
/// escapes, one per UTF-8 byte.
pub fn escape_c(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let mut bytes = [0u8; 4];
                for b in c.encode_utf8(&mut bytes).bytes() {
                    out.push_str(&format!("\\{b:03o}"));
                }
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut CodeWriter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut w = CodeWriter::new(Vec::new());
        f(&mut w).unwrap();
        String::from_utf8(w.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_line() {
        assert_eq!(written(|w| w.line("idt_init();")), "idt_init();\n");
    }

    #[test]
    fn test_open_close() {
        let out = written(|w| {
            w.open("void f(void)")?;
            w.line("x();")?;
            w.close()
        });
        assert_eq!(out, "void f(void) {\n  x();\n}\n");
    }

    #[test]
    fn test_close_at_top_level_does_not_underflow() {
        let out = written(|w| {
            w.close()?;
            w.line("x();")
        });
        assert_eq!(out, "}\nx();\n");
    }

    #[test]
    fn test_escape_c() {
        assert_eq!(escape_c("hello"), "hello");
        assert_eq!(escape_c("      19\n"), "      19\\n");
        assert_eq!(escape_c("a\"b"), "a\\\"b");
        assert_eq!(escape_c("a\\b"), "a\\\\b");
        assert_eq!(escape_c("a\tb"), "a\\tb");
    }

    #[test]
    fn test_escape_c_control_chars_as_octal() {
        assert_eq!(escape_c("\u{0}"), "\\000");
        assert_eq!(escape_c("a\u{7}1"), "a\\0071");
        assert_eq!(escape_c("\u{1b}["), "\\033[");
        assert_eq!(escape_c("\u{85}"), "\\302\\205");
    }
}
