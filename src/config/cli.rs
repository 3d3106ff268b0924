use crate::config::OutputFormat;
use crate::domain::ports::{Event, OutputSink};
use crate::utils::error::Result;
use std::io::{self, Write};

/// Writes session events to a byte stream, stdout by default.
pub struct ConsoleSink<W: Write = io::Stdout> {
    writer: W,
    format: OutputFormat,
}

impl ConsoleSink {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn emit(&mut self, event: Event) -> Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{}", event.render_text())?,
            OutputFormat::Json => {
                let line = serde_json::to_string(&event.to_json()?)?;
                writeln!(self.writer, "{}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Outcome;
    use crate::domain::report::{Report, YearReport};

    #[test]
    fn test_text_output() {
        let mut sink = ConsoleSink::new(Vec::new(), OutputFormat::Text);
        sink.emit(Event::Info(Outcome::PatientAdded {
            patient: "Liam Davis".to_string(),
        }))
        .unwrap();
        sink.emit(Event::Report(Report::Year(YearReport {
            year: 2025,
            visits: vec![],
        })))
        .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "INFO: Patient Liam Davis has been added\n2025\n---none---\n");
    }

    #[test]
    fn test_json_output_is_one_object_per_line() {
        let mut sink = ConsoleSink::new(Vec::new(), OutputFormat::Json);
        sink.emit(Event::Echo("Adding patients:".to_string())).unwrap();
        sink.emit(Event::Info(Outcome::PatientRemoved {
            patient: "Ava Taylor".to_string(),
        }))
        .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "echo");
        assert_eq!(lines[1]["detail"]["outcome"], "patient_removed");
    }
}
