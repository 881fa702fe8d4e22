//! Singer message writer

use crate::engine::Message;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Layout of emitted messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One compact JSON object per line
    #[default]
    Json,
    /// Indented JSON, for reading by hand
    Pretty,
}

/// Destination of emitted messages
pub trait MessageSink: Send {
    /// Emit one message
    fn emit(&mut self, message: &Message) -> Result<()>;
}

impl MessageSink for Vec<Message> {
    fn emit(&mut self, message: &Message) -> Result<()> {
        self.push(message.clone());
        Ok(())
    }
}

/// Writes each message as JSON followed by a newline
#[derive(Debug)]
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    format: OutputFormat,
    messages_written: usize,
}

impl<W: Write> JsonLinesWriter<W> {
    /// Create a writer with compact output
    pub fn new(writer: W) -> Self {
        Self::with_format(writer, OutputFormat::Json)
    }

    /// Create a writer with the given layout
    pub fn with_format(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            messages_written: 0,
        }
    }

    /// Number of messages written so far
    pub fn messages_written(&self) -> usize {
        self.messages_written
    }

    /// Consume the writer, returning the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> MessageSink for JsonLinesWriter<W> {
    fn emit(&mut self, message: &Message) -> Result<()> {
        match self.format {
            OutputFormat::Json => serde_json::to_writer(&mut self.writer, message)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut self.writer, message)?,
        }
        self.writer.write_all(b"\n")?;
        // Downstream targets read line by line
        self.writer.flush()?;
        self.messages_written += 1;
        Ok(())
    }
}
