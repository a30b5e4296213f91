/// Per-vector line formatting and the emit loop over a `VectorRange`.
/// Each `format_*` function returns one line without its trailing newline.
use super::writer::{escape_c, CodeWriter};
use crate::config::{GeneratorConfig, Section, Symbols};
use crate::vector::{VectorIndex, VectorRange, IDT_ENTRIES};
use std::io::{self, Write};

fn handler_name(index: VectorIndex, symbols: &Symbols) -> String {
    format!("{}{}", symbols.handler_prefix, index)
}

/// `void interrupt_handler_<i>(void) {EXCEPTION("      <i>\n");}`
pub fn format_handler(index: VectorIndex, symbols: &Symbols) -> String {
    let message = format!("{}{}\n", symbols.message_indent, index);
    format!(
        "void {}(void) {{{}(\"{}\");}}",
        handler_name(index, symbols),
        symbols.exception_macro,
        escape_c(&message)
    )
}

/// `SET_INTERRUPT_GATE(idt[<i>], interrupt_handler_<i>);`
pub fn format_gate(index: VectorIndex, symbols: &Symbols) -> String {
    format!(
        "{}({}[{}], {});",
        symbols.gate_macro,
        symbols.table,
        index,
        handler_name(index, symbols)
    )
}

/// `void interrupt_handler_<i>(void);`
pub fn format_prototype(index: VectorIndex, symbols: &Symbols) -> String {
    format!("void {}(void);", handler_name(index, symbols))
}

/// Generate the full output for `config` as newline-terminated lines.
/// Collects [`emit_to`] into memory; use `emit_to` for large ranges.
pub fn emit(config: &GeneratorConfig) -> String {
    let mut buf = Vec::new();
    // Writes into a Vec<u8> cannot fail.
    emit_to(config, &mut buf).unwrap_or_default();
    String::from_utf8_lossy(&buf).into_owned()
}

/// Stream the output for `config` to `out`, one write per line.
pub fn emit_to<W: Write>(config: &GeneratorConfig, out: W) -> io::Result<()> {
    let range = config.range();
    log::debug!(
        "emitting section '{}' for vectors {range}",
        config.section.as_str()
    );
    if range.is_empty() {
        log::warn!("vector range {range} is empty; no handlers or gates generated");
    } else if range.exceeds_idt() {
        log::warn!("vector range {range} runs past the {IDT_ENTRIES}-entry IDT");
    }

    let mut w = CodeWriter::new(out);
    let symbols = &config.symbols;

    if config.section == Section::Prototypes {
        for index in range.iter() {
            w.line(&format_prototype(index, symbols))?;
        }
        w.finish()?;
        return Ok(());
    }

    if config.section.includes_handlers() {
        for index in range.iter() {
            w.line(&format_handler(index, symbols))?;
        }
    }

    if config.section.includes_gates() {
        emit_gates(&mut w, range, config.wrap_gates.as_deref(), symbols)?;
    }

    w.finish()?;
    Ok(())
}

/// An empty range with a wrapper still yields the (empty) function, so the
/// kernel's call to it keeps linking.
fn emit_gates<W: Write>(
    w: &mut CodeWriter<W>,
    range: VectorRange,
    wrapper: Option<&str>,
    symbols: &Symbols,
) -> io::Result<()> {
    if let Some(name) = wrapper {
        w.open(&format!("void {name}(void)"))?;
    }
    for index in range.iter() {
        w.line(&format_gate(index, symbols))?;
    }
    if wrapper.is_some() {
        w.close()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(lower: u32, upper: u32) -> GeneratorConfig {
        GeneratorConfig {
            lower,
            upper,
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_format_handler() {
        assert_eq!(
            format_handler(VectorIndex(19), &Symbols::default()),
            r#"void interrupt_handler_19(void) {EXCEPTION("      19\n");}"#
        );
    }

    #[test]
    fn test_format_gate() {
        assert_eq!(
            format_gate(VectorIndex(255), &Symbols::default()),
            "SET_INTERRUPT_GATE(idt[255], interrupt_handler_255);"
        );
    }

    #[test]
    fn test_format_prototype() {
        assert_eq!(
            format_prototype(VectorIndex(32), &Symbols::default()),
            "void interrupt_handler_32(void);"
        );
    }

    #[test]
    fn test_custom_symbols() {
        let symbols = Symbols {
            handler_prefix: "isr".into(),
            exception_macro: "PANIC".into(),
            gate_macro: "SET_TRAP_GATE".into(),
            table: "idt_table".into(),
            message_indent: "vec ".into(),
        };
        assert_eq!(
            format_handler(VectorIndex(7), &symbols),
            r#"void isr7(void) {PANIC("vec 7\n");}"#
        );
        assert_eq!(
            format_gate(VectorIndex(7), &symbols),
            "SET_TRAP_GATE(idt_table[7], isr7);"
        );
    }

    #[test]
    fn test_emit_two_vectors() {
        let expected = concat!(
            "void interrupt_handler_19(void) {EXCEPTION(\"      19\\n\");}\n",
            "void interrupt_handler_20(void) {EXCEPTION(\"      20\\n\");}\n",
            "SET_INTERRUPT_GATE(idt[19], interrupt_handler_19);\n",
            "SET_INTERRUPT_GATE(idt[20], interrupt_handler_20);\n",
        );
        assert_eq!(emit(&config(19, 21)), expected);
    }

    #[test]
    fn test_emit_default_line_counts() {
        let out = emit(&GeneratorConfig::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 474);

        let (handlers, gates) = lines.split_at(237);
        for (k, line) in handlers.iter().enumerate() {
            let i = 19 + k;
            assert_eq!(
                *line,
                format!("void interrupt_handler_{i}(void) {{EXCEPTION(\"      {i}\\n\");}}")
            );
        }
        for (k, line) in gates.iter().enumerate() {
            let i = 19 + k;
            assert_eq!(*line, format!("SET_INTERRUPT_GATE(idt[{i}], interrupt_handler_{i});"));
        }
        assert_eq!(
            lines.last().copied(),
            Some("SET_INTERRUPT_GATE(idt[255], interrupt_handler_255);")
        );
    }

    #[test]
    fn test_emit_is_idempotent() {
        let c = GeneratorConfig::default();
        assert_eq!(emit(&c), emit(&c));
    }

    #[test]
    fn test_emit_empty_range() {
        assert_eq!(emit(&config(19, 19)), "");
        assert_eq!(emit(&config(200, 19)), "");

        let mut c = config(19, 19);
        c.wrap_gates = Some("idt_set_generated".into());
        assert_eq!(emit(&c), "void idt_set_generated(void) {\n}\n");

        c.section = Section::Handlers;
        assert_eq!(emit(&c), "");
    }

    #[test]
    fn test_emit_all_with_wrapped_gates() {
        let mut c = config(19, 21);
        c.wrap_gates = Some("idt_set_generated".into());
        assert_eq!(
            emit(&c),
            "void interrupt_handler_19(void) {EXCEPTION(\"      19\\n\");}\n\
             void interrupt_handler_20(void) {EXCEPTION(\"      20\\n\");}\n\
             void idt_set_generated(void) {\n  \
             SET_INTERRUPT_GATE(idt[19], interrupt_handler_19);\n  \
             SET_INTERRUPT_GATE(idt[20], interrupt_handler_20);\n\
             }\n"
        );
    }

    #[test]
    fn test_control_chars_in_message_are_escaped() {
        let symbols = Symbols {
            message_indent: "\u{7}".into(),
            ..Symbols::default()
        };
        assert_eq!(
            format_handler(VectorIndex(19), &symbols),
            r#"void interrupt_handler_19(void) {EXCEPTION("\00719\n");}"#
        );
    }

    #[test]
    fn test_emit_sections() {
        let mut c = config(19, 21);
        c.section = Section::Handlers;
        assert_eq!(
            emit(&c),
            "void interrupt_handler_19(void) {EXCEPTION(\"      19\\n\");}\n\
             void interrupt_handler_20(void) {EXCEPTION(\"      20\\n\");}\n"
        );

        c.section = Section::Gates;
        assert_eq!(
            emit(&c),
            "SET_INTERRUPT_GATE(idt[19], interrupt_handler_19);\n\
             SET_INTERRUPT_GATE(idt[20], interrupt_handler_20);\n"
        );

        c.section = Section::Prototypes;
        assert_eq!(
            emit(&c),
            "void interrupt_handler_19(void);\nvoid interrupt_handler_20(void);\n"
        );
    }

    #[test]
    fn test_emit_wrapped_gates() {
        let mut c = config(19, 21);
        c.section = Section::Gates;
        c.wrap_gates = Some("idt_set_generated".into());
        assert_eq!(
            emit(&c),
            "void idt_set_generated(void) {\n  \
             SET_INTERRUPT_GATE(idt[19], interrupt_handler_19);\n  \
             SET_INTERRUPT_GATE(idt[20], interrupt_handler_20);\n\
             }\n"
        );
    }

    #[test]
    fn test_wrapper_ignored_for_handlers_only() {
        let mut c = config(19, 20);
        c.section = Section::Handlers;
        c.wrap_gates = Some("idt_set_generated".into());
        assert!(!emit(&c).contains("idt_set_generated"));
    }

    #[test]
    fn test_emit_to_matches_emit() {
        let c = config(30, 40);
        let mut buf = Vec::new();
        emit_to(&c, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), emit(&c));
    }

    #[derive(Default)]
    struct CountingWriter {
        writes: usize,
        largest: usize,
        total: usize,
    }

    impl Write for CountingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.writes += 1;
            self.largest = self.largest.max(buf.len());
            self.total += buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_to_writes_line_by_line() {
        let c = config(0, 100_000);
        let mut counter = CountingWriter::default();
        emit_to(&c, &mut counter).unwrap();

        assert_eq!(counter.writes, 200_000);
        let longest_line = format_handler(VectorIndex(99_999), &c.symbols).len() + 1;
        assert_eq!(counter.largest, longest_line);
        assert!(counter.total > 10 * 1024 * 1024);
    }
}
