//! Landmark sources and the hand-inference interval gate

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::trace;
use crate::error::{Result, TrackerError};
use crate::types::{HandLandmarks, LandmarkFrame};

/// Producer of landmark frames, one at a time, in timestamp order.
///
/// `Ok(None)` is end of stream. An `Err` ends the session.
pub trait LandmarkSource {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>>;
}

/// One JSON-encoded frame per line; blank lines are skipped
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Lines consumed so far
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl JsonLinesSource<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl JsonLinesSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> LandmarkSource for JsonLinesSource<R> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() {
                continue;
            }
            return serde_json::from_str(line)
                .map(Some)
                .map_err(|source| TrackerError::Json {
                    line: self.line_no,
                    source,
                });
        }
    }
}

impl LandmarkSource for std::vec::IntoIter<LandmarkFrame> {
    fn next_frame(&mut self) -> Result<Option<LandmarkFrame>> {
        Ok(self.next())
    }
}

/// Hand results at a reduced cadence.
///
/// Fresh results are accepted at most once per interval; in between, and
/// on frames where hand inference did not run, the last accepted result
/// is reused.
#[derive(Debug, Clone)]
pub struct HandGate {
    enabled: bool,
    interval_ms: f64,
    last_accept_ms: Option<f64>,
    cached: Vec<HandLandmarks>,
}

impl HandGate {
    pub fn new(enabled: bool, interval_ms: f64) -> Self {
        Self {
            enabled,
            interval_ms: interval_ms.max(0.0),
            last_accept_ms: None,
            cached: Vec::new(),
        }
    }

    /// Hands to use for the frame at `now_ms`
    pub fn resolve(&mut self, now_ms: f64, fresh: Option<&[HandLandmarks]>) -> &[HandLandmarks] {
        if !self.enabled {
            return &[];
        }

        match fresh {
            Some(hands) if self.is_due(now_ms) => {
                self.cached = hands.to_vec();
                self.last_accept_ms = Some(now_ms);
            }
            Some(_) => trace!(now_ms, "Hand result inside interval, reusing cache"),
            None => trace!(now_ms, "No hand result this frame, reusing cache"),
        }

        &self.cached
    }

    fn is_due(&self, now_ms: f64) -> bool {
        self.last_accept_ms
            .map_or(true, |last| now_ms - last >= self.interval_ms)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn reset(&mut self) {
        self.last_accept_ms = None;
        self.cached.clear();
    }
}
