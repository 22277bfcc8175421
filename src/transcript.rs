use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only log of the conversation
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write one exchange (user line and tutor reply)
    pub fn record(&self, user: &str, reply: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        writeln!(file, "[{}] You: {}", stamp, user)?;
        writeln!(file, "[{}] Chatbot: {}", stamp, reply)?;
        Ok(())
    }
}
