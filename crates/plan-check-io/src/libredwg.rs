//! Drawing decoding via the LibreDWG `dwgread` CLI.
//!
//! The converter runs as a bounded subprocess: `dwgread -O JSON <dwg> -o
//! <tmp.json>`. The child is polled against a deadline and killed when it
//! exceeds the timeout, so a hanging converter cannot stall validation.

use plan_check_core::{DrawingDocument, DrawingParser, ParseError};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Poll interval while waiting for the converter.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// [`DrawingParser`] backed by the LibreDWG `dwgread` binary.
#[derive(Debug, Clone)]
pub struct LibreDwgParser {
    dwgread: PathBuf,
    timeout: Duration,
}

impl Default for LibreDwgParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LibreDwgParser {
    /// Creates a parser using `dwgread` from `PATH` with a 60 second timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dwgread: PathBuf::from("dwgread"),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the converter binary.
    #[must_use]
    pub fn with_binary(mut self, path: impl Into<PathBuf>) -> Self {
        self.dwgread = path.into();
        self
    }

    /// Sets the subprocess deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn run_converter(&self, dwg: &Path, json_out: &Path) -> Result<(), ParseError> {
        let mut child = Command::new(&self.dwgread)
            .arg("-O")
            .arg("JSON")
            .arg(dwg)
            .arg("-o")
            .arg(json_out)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ParseError::Timeout {
                    seconds: self.timeout.as_secs(),
                });
            }
            std::thread::sleep(POLL_INTERVAL);
        };

        if !status.success() {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                let _ = pipe.read_to_string(&mut stderr);
            }
            return Err(ParseError::Tool {
                status: status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl DrawingParser for LibreDwgParser {
    fn parse_drawing(&self, path: &Path) -> Result<DrawingDocument, ParseError> {
        let out = tempfile::Builder::new()
            .prefix("plan-check-")
            .suffix(".json")
            .tempfile()?;

        debug!(
            "Converting {} via {}",
            path.display(),
            self.dwgread.display()
        );
        self.run_converter(path, out.path())?;

        let json = std::fs::read_to_string(out.path())?;
        DrawingDocument::from_json_str(&json)
            .map_err(|e| ParseError::Malformed(format!("converter produced invalid JSON: {e}")))
    }
}
