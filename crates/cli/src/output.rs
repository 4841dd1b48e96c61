use ferrous_rdns_application::ports::RecordSink;
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::error;

/// One resolved input address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    pub address: String,
    pub names: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `address<TAB>name1,name2`
    Text,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    fn render(self, record: &ResolvedRecord) -> serde_json::Result<String> {
        match self {
            OutputFormat::Text => Ok(format!(
                "{}\t{}\n",
                record.address,
                record.names.join(",")
            )),
            OutputFormat::Json => {
                let mut line = serde_json::to_string(record)?;
                line.push('\n');
                Ok(line)
            }
        }
    }
}

/// Renders each record as one line and hands it to the writer task.
///
/// Formatting happens on the pipeline's collector; the actual I/O runs on the
/// task returned by [`spawn_writer`], so the collector never blocks on output.
pub struct LineSink {
    lines: mpsc::UnboundedSender<String>,
    format: OutputFormat,
    written: u64,
}

impl LineSink {
    pub fn new(lines: mpsc::UnboundedSender<String>, format: OutputFormat) -> Self {
        Self {
            lines,
            format,
            written: 0,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl RecordSink<ResolvedRecord> for LineSink {
    fn accept(&mut self, record: ResolvedRecord) {
        let line = match self.format.render(&record) {
            Ok(line) => line,
            Err(e) => {
                error!(address = %record.address, error = %e, "Failed to encode record");
                return;
            }
        };

        if self.lines.send(line).is_err() {
            error!(address = %record.address, "Output writer is gone, dropping record");
            return;
        }
        self.written += 1;
    }
}

/// Spawns the task that writes every line to `writer`. It finishes, flushing
/// and returning the writer, once all senders are dropped.
pub fn spawn_writer<W>(
    mut writer: W,
) -> (mpsc::UnboundedSender<String>, JoinHandle<std::io::Result<W>>)
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    let handle = tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            writer.write_all(line.as_bytes()).await?;
        }
        writer.flush().await?;
        Ok::<W, std::io::Error>(writer)
    });

    (tx, handle)
}
