//! Line-oriented G-code output
//!
//! Every command goes out as one terminated line, written through to the
//! underlying sink in call order.

use crate::settings::LineEnd;
use std::fmt;
use std::io::{self, Write};

/// Writes terminated G-code lines to a byte sink.
pub struct GcodeWriter<'a> {
    out: &'a mut dyn Write,
    line_end: LineEnd,
    lines_written: usize,
}

impl<'a> GcodeWriter<'a> {
    pub fn new(out: &'a mut dyn Write, line_end: LineEnd) -> Self {
        Self {
            out,
            line_end,
            lines_written: 0,
        }
    }

    /// Format and write a single command followed by the line terminator.
    pub fn send_line(&mut self, args: fmt::Arguments<'_>) -> io::Result<()> {
        let line = fmt::format(args);
        tracing::trace!("> {}", line);
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(self.line_end.terminator().as_bytes())?;
        self.lines_written += 1;
        Ok(())
    }

    /// Write a command that is already a string.
    pub fn send_command(&mut self, command: &str) -> io::Result<()> {
        self.send_line(format_args!("{}", command))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_line_terminates_each_line() {
        let mut buf = Vec::new();
        {
            let mut writer = GcodeWriter::new(&mut buf, LineEnd::Lf);
            writer.send_line(format_args!("G0 X{:.6} Y{:.6}", 1.5, 2.0)).unwrap();
            writer.send_command("G0 Z0").unwrap();
            assert_eq!(writer.lines_written(), 2);
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "G0 X1.500000 Y2.000000\nG0 Z0\n"
        );
    }

    #[test]
    fn test_crlf_terminator() {
        let mut buf = Vec::new();
        GcodeWriter::new(&mut buf, LineEnd::CrLf)
            .send_command("M5")
            .unwrap();
        assert_eq!(buf, b"M5\r\n");
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "device gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut sink = BrokenPipe;
        let mut writer = GcodeWriter::new(&mut sink, LineEnd::Lf);
        let err = writer.send_command("G0 Z0").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(writer.lines_written(), 0);
    }
}
