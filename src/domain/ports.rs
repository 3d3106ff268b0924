use crate::domain::model::Outcome;
use crate::domain::report::Report;
use crate::utils::error::{RegistryError, Result};
use serde_json::json;

/// One unit of session output.
#[derive(Debug)]
pub enum Event {
    Info(Outcome),
    Error(RegistryError),
    Report(Report),
    Echo(String),
}

impl Event {
    pub fn render_text(&self) -> String {
        match self {
            Event::Info(outcome) => format!("INFO: {}", outcome),
            Event::Error(err) => format!("ERROR: {}", err),
            Event::Report(report) => report.to_string(),
            Event::Echo(text) => text.clone(),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            Event::Info(outcome) => json!({
                "level": "info",
                "message": outcome.to_string(),
                "detail": serde_json::to_value(outcome)?,
            }),
            Event::Error(err) => json!({
                "level": "error",
                "message": err.to_string(),
            }),
            Event::Report(report) => json!({
                "level": "report",
                "detail": serde_json::to_value(report)?,
                "text": report.to_string(),
            }),
            Event::Echo(text) => json!({ "level": "echo", "message": text }),
        };
        Ok(value)
    }
}

pub trait OutputSink {
    fn emit(&mut self, event: Event) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_prefixes() {
        let info = Event::Info(Outcome::PatientAdded {
            patient: "Ethan Lee".to_string(),
        });
        assert_eq!(info.render_text(), "INFO: Patient Ethan Lee has been added");

        let error = Event::Error(RegistryError::DuplicatePatient {
            name: "Noah Miller".to_string(),
        });
        assert_eq!(error.render_text(), "ERROR: Patient Noah Miller already exists");
        assert_eq!(Event::Echo(String::new()).render_text(), "");
    }

    #[test]
    fn test_json_event_shape() {
        let info = Event::Info(Outcome::MemberRemoved {
            patient: "Michael Johnson".to_string(),
            member: "Evan Hall".to_string(),
        });
        let value = info.to_json().unwrap();
        assert_eq!(value["level"], "info");
        assert_eq!(value["detail"]["outcome"], "member_removed");
        assert_eq!(value["detail"]["member"], "Evan Hall");
    }
}
