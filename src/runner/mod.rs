use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::ExecutionConfig;
use crate::models::{ExecutionResult, ProbeProgram};

/// How long to keep draining the pipes after the child has exited or
/// been killed. Orphaned grandchildren may still hold the write ends.
const DRAIN_GRACE: Duration = Duration::from_millis(1_000);

/// Executes a generated probe as an isolated child process with a hard
/// wall-clock limit. The pipeline always receives a result: launch
/// failures are folded into the output as `ERROR:` text and a timeout
/// kills the child rather than raising, so one bad probe can never
/// abort the batch.
pub struct SandboxedRunner {
    interpreter: String,
    timeout: Duration,
}

impl SandboxedRunner {
    pub fn new(config: &ExecutionConfig) -> Self {
        Self {
            interpreter: config.interpreter.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Run the probe, capturing stdout and stderr concatenated. On
    /// timeout the child is killed (not abandoned) and only the output
    /// produced before termination is returned, with `timed_out = true`.
    pub async fn run(&self, program: &ProbeProgram) -> ExecutionResult {
        let scratch = match self.write_scratch(program) {
            Ok(file) => file,
            Err(e) => {
                return ExecutionResult {
                    combined_output: format!("ERROR: {}", e),
                    timed_out: false,
                }
            }
        };

        let mut child = match Command::new(&self.interpreter)
            .arg(scratch.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!(interpreter = %self.interpreter, error = %e, "Probe launch failed");
                return ExecutionResult {
                    combined_output: format!("ERROR: {}", e),
                    timed_out: false,
                };
            }
        };

        // Drain the pipes incrementally so output survives a forced
        // kill and a chatty child cannot deadlock against a full pipe.
        let (stdout_buf, stdout_task) = match child.stdout.take() {
            Some(pipe) => drain_pipe(pipe),
            None => (Arc::new(Mutex::new(Vec::new())), None),
        };
        let (stderr_buf, stderr_task) = match child.stderr.take() {
            Some(pipe) => drain_pipe(pipe),
            None => (Arc::new(Mutex::new(Vec::new())), None),
        };

        let timed_out = match tokio::time::timeout(self.timeout, child.wait()).await {
            Ok(_) => false,
            Err(_) => {
                warn!(
                    limit_secs = self.timeout.as_secs(),
                    "Probe exceeded wall-clock limit, killing"
                );
                let _ = child.kill().await;
                let _ = child.wait().await;
                true
            }
        };

        // Orphaned descendants may keep the write ends open, so the
        // drain tasks get a bounded grace period instead of a join.
        for mut task in [stdout_task, stderr_task].into_iter().flatten() {
            if tokio::time::timeout(DRAIN_GRACE, &mut task).await.is_err() {
                // The buffer already holds everything read so far; stop
                // the reader rather than leave it draining an orphan's
                // pipe indefinitely
                task.abort();
            }
        }

        let mut combined = String::from_utf8_lossy(&stdout_buf.lock().await).into_owned();
        combined.push_str(&String::from_utf8_lossy(&stderr_buf.lock().await));

        debug!(output_len = combined.len(), timed_out, "Probe execution finished");
        ExecutionResult {
            combined_output: combined,
            timed_out,
        }
    }

    fn write_scratch(&self, program: &ProbeProgram) -> std::io::Result<tempfile::NamedTempFile> {
        use std::io::Write;
        let mut file = tempfile::Builder::new().prefix("provex-probe-").tempfile()?;
        file.write_all(program.source.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}

type SharedBuf = Arc<Mutex<Vec<u8>>>;

fn drain_pipe<R>(mut pipe: R) -> (SharedBuf, Option<JoinHandle<()>>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buf: SharedBuf = Arc::new(Mutex::new(Vec::new()));
    let sink = buf.clone();
    let task = tokio::spawn(async move {
        let mut chunk = [0u8; 4096];
        loop {
            match pipe.read(&mut chunk).await {
                Ok(0) | Err(_) => break,
                Ok(n) => sink.lock().await.extend_from_slice(&chunk[..n]),
            }
        }
    });
    (buf, Some(task))
}
