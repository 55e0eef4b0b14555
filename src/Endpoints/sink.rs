// Console-style sink: one line per received payload.

use crate::MPMC::PayloadSink;
use log::warn;
use std::io::{self, Write};

/// Writes `thread <name> - <bytes>` for every payload it receives.
///
/// Bytes are printed as lossy UTF-8. Write errors are logged and swallowed so a
/// broken output never stops the consumer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
}

/// The sink used by the binary.
pub type ConsoleSink = WriterSink<io::Stdout>;

impl ConsoleSink {
    pub fn stdout() -> Self {
        WriterSink::new(io::stdout())
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, data: &[u8]) -> io::Result<()> {
        let thread = std::thread::current();
        let name = match thread.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", thread.id()),
        };
        writeln!(self.out, "thread {} - {}", name, String::from_utf8_lossy(data))?;
        self.out.flush()
    }
}

impl<W: Write + Send> PayloadSink for WriterSink<W> {
    fn consume(&mut self, data: &[u8]) {
        if let Err(e) = self.write_line(data) {
            warn!("Failed to write payload of {} bytes: {e}", data.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn prints_thread_name_and_bytes() {
        let output = std::thread::Builder::new()
            .name("consumer-3".to_string())
            .spawn(|| {
                let mut sink = WriterSink::new(Vec::new());
                sink.consume(b"0123abc");
                sink.into_inner()
            })
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "thread consumer-3 - 0123abc\n");
    }

    #[test]
    fn write_errors_do_not_escape() {
        let mut sink = WriterSink::new(BrokenPipe);
        sink.consume(b"lost");
    }
}
