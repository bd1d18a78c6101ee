//! Outbound metric points and the sinks that accept them.
//!
//! The decoder hands one [`Point`] per record to a [`MetricsSink`]. Sinks own
//! their batching; `flush` pushes whatever was accepted so far.

mod line;
mod target;

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::io::Write;

use thiserror::Error;
use time::OffsetDateTime;

pub use line::encode_point;
pub use target::{ConnectionTarget, TargetError};

/// One time-series point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub measurement: String,
    pub tags: BTreeMap<String, String>,
    pub values: BTreeMap<String, f64>,
    pub timestamp: OffsetDateTime,
}

impl Point {
    pub fn to_line_protocol(&self) -> String {
        encode_point(self)
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("point for measurement {measurement:?} has no field values")]
    NoFields { measurement: String },
    #[error("invalid connection target: {0}")]
    Target(#[from] TargetError),
    #[error("transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),
    #[error("server rejected the write ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

impl SinkError {
    pub fn transport(err: impl StdError + Send + Sync + 'static) -> Self {
        SinkError::Transport(Box::new(err))
    }
}

/// Destination for decoded points.
pub trait MetricsSink {
    fn add_point(&mut self, point: &Point) -> Result<(), SinkError>;
    fn flush(&mut self) -> Result<(), SinkError>;
}

/// Validate and render a point, shared by line-protocol based sinks.
pub fn render_point(point: &Point) -> Result<String, SinkError> {
    if point.values.is_empty() {
        return Err(SinkError::NoFields {
            measurement: point.measurement.clone(),
        });
    }
    Ok(encode_point(point))
}

/// Buffers points as line protocol and writes them to `W` on flush.
///
/// # Examples
/// ```
/// use std::collections::BTreeMap;
///
/// use ruche_core::{LineProtocolSink, MetricsSink, Point};
/// use time::OffsetDateTime;
///
/// let mut sink = LineProtocolSink::new(Vec::new());
/// sink.add_point(&Point {
///     measurement: "raw".to_string(),
///     tags: BTreeMap::new(),
///     values: BTreeMap::from([("temp".to_string(), 20.5)]),
///     timestamp: OffsetDateTime::UNIX_EPOCH,
/// })?;
/// sink.flush()?;
/// assert_eq!(sink.into_inner(), b"raw temp=20.5 0\n");
/// # Ok::<(), ruche_core::SinkError>(())
/// ```
pub struct LineProtocolSink<W: Write> {
    writer: W,
    pending: Vec<String>,
}

impl<W: Write> LineProtocolSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::new(),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> MetricsSink for LineProtocolSink<W> {
    fn add_point(&mut self, point: &Point) -> Result<(), SinkError> {
        self.pending.push(render_point(point)?);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        for line in &self.pending {
            writeln!(self.writer, "{line}")?;
        }
        self.writer.flush()?;
        self.pending.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::error::Error;
    use std::io::{self, Write};

    use time::OffsetDateTime;

    use super::{LineProtocolSink, MetricsSink, Point, SinkError};

    fn point(values: BTreeMap<String, f64>) -> Point {
        Point {
            measurement: "raw".to_string(),
            tags: BTreeMap::from([("stream_id".to_string(), "a".to_string())]),
            values,
            timestamp: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn writes_nothing_until_flush() {
        let mut sink = LineProtocolSink::new(Vec::new());
        sink.add_point(&point(BTreeMap::from([("temp".to_string(), 1.0)])))
            .unwrap();
        assert_eq!(sink.pending(), 1);
        assert!(sink.writer.is_empty());
    }

    #[test]
    fn flush_writes_one_line_per_point() {
        let mut sink = LineProtocolSink::new(Vec::new());
        for temp in [1.5, 2.5] {
            sink.add_point(&point(BTreeMap::from([("temp".to_string(), temp)])))
                .unwrap();
        }
        sink.flush().unwrap();
        assert_eq!(sink.pending(), 0);
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "raw,stream_id=a temp=1.5 0\nraw,stream_id=a temp=2.5 0\n");
    }

    /// Accepts `budget` bytes, then fails every write.
    struct FailingWriter {
        written: Vec<u8>,
        budget: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.budget {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_keeps_pending_points() {
        let writer = FailingWriter {
            written: Vec::new(),
            budget: 0,
        };
        let mut sink = LineProtocolSink::new(writer);
        for temp in [1.5, 2.5] {
            sink.add_point(&point(BTreeMap::from([("temp".to_string(), temp)])))
                .unwrap();
        }
        let err = sink.flush().unwrap_err();
        assert!(matches!(err, SinkError::Io(_)));
        assert_eq!(sink.pending(), 2);

        sink.writer.budget = usize::MAX;
        sink.flush().unwrap();
        assert_eq!(sink.pending(), 0);
        assert_eq!(
            String::from_utf8(sink.into_inner().written).unwrap(),
            "raw,stream_id=a temp=1.5 0\nraw,stream_id=a temp=2.5 0\n"
        );
    }

    #[test]
    fn transport_error_keeps_its_cause() {
        let cause = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err = SinkError::transport(cause);
        assert_eq!(err.to_string(), "transport error");
        let source = err.source().expect("transport error has a source");
        assert_eq!(source.to_string(), "refused");
    }

    #[test]
    fn rejects_point_without_values() {
        let mut sink = LineProtocolSink::new(Vec::new());
        let err = sink.add_point(&point(BTreeMap::new())).unwrap_err();
        assert!(matches!(err, SinkError::NoFields { .. }));
    }
}
