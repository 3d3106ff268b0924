use crate::core::registry::Registry;
use crate::domain::model::Outcome;
use crate::domain::ports::{Event, OutputSink};
use crate::domain::report::Report;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// A single registry call, as written in a session script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddPatient {
        name: String,
        doctor: String,
        day: u32,
        month: u32,
        year: i32,
    },
    RemovePatient {
        name: String,
    },
    AddMember {
        patient: String,
        member: String,
        role: String,
    },
    RemoveMember {
        patient: String,
        member: String,
    },
    ListAll,
    ShowPatient {
        name: String,
    },
    ShowDoctor {
        doctor: String,
    },
    ShowYear {
        year: i32,
    },
    /// Narration line copied to the output verbatim.
    Echo {
        #[serde(default)]
        text: String,
    },
}

impl Command {
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddPatient { .. } => "add_patient",
            Command::RemovePatient { .. } => "remove_patient",
            Command::AddMember { .. } => "add_member",
            Command::RemoveMember { .. } => "remove_member",
            Command::ListAll => "list_all",
            Command::ShowPatient { .. } => "show_patient",
            Command::ShowDoctor { .. } => "show_doctor",
            Command::ShowYear { .. } => "show_year",
            Command::Echo { .. } => "echo",
        }
    }

    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Command::AddPatient { .. }
                | Command::RemovePatient { .. }
                | Command::AddMember { .. }
                | Command::RemoveMember { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub steps: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub reports: usize,
}

/// Runs commands against one registry and forwards every result to the sink.
///
/// Recoverable registry failures are reported as `Event::Error` and the session moves on;
/// sink failures and non-recoverable errors stop a run.
pub struct RegistrySession<S: OutputSink> {
    registry: Registry,
    sink: S,
}

impl<S: OutputSink> RegistrySession<S> {
    pub fn new(sink: S) -> Self {
        Self::with_registry(Registry::new(), sink)
    }

    pub fn with_registry(registry: Registry, sink: S) -> Self {
        Self { registry, sink }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (Registry, S) {
        (self.registry, self.sink)
    }

    pub fn run(&mut self, commands: &[Command]) -> Result<SessionSummary> {
        tracing::info!("🚀 Session started: {} steps", commands.len());
        let mut summary = SessionSummary::default();
        for command in commands {
            summary.steps += 1;
            tracing::debug!(step = summary.steps, op = command.label(), "executing step");

            match self.execute(command) {
                Event::Error(err) if !err.is_recoverable() => return Err(err),
                Event::Error(err) => {
                    summary.failed += 1;
                    self.sink.emit(Event::Error(err))?;
                }
                Event::Info(outcome) => {
                    summary.succeeded += 1;
                    self.sink.emit(Event::Info(outcome))?;
                }
                Event::Report(report) => {
                    summary.reports += 1;
                    self.sink.emit(Event::Report(report))?;
                }
                echo @ Event::Echo(_) => self.sink.emit(echo)?,
            }
        }

        tracing::info!(
            "✅ Session finished: {} steps, {} succeeded, {} failed, {} reports",
            summary.steps,
            summary.succeeded,
            summary.failed,
            summary.reports
        );
        Ok(summary)
    }

    /// Executes one command without emitting anything.
    pub fn execute(&mut self, command: &Command) -> Event {
        match command {
            Command::AddPatient {
                name,
                doctor,
                day,
                month,
                year,
            } => mutation(self.registry.add_patient(name, doctor, *day, *month, *year)),
            Command::RemovePatient { name } => mutation(self.registry.remove_patient(name)),
            Command::AddMember {
                patient,
                member,
                role,
            } => mutation(self.registry.add_member(patient, member, role)),
            Command::RemoveMember { patient, member } => {
                mutation(self.registry.remove_member(patient, member))
            }
            Command::ListAll => Event::Report(Report::AllPatients(self.registry.list_all_patients())),
            Command::ShowPatient { name } => {
                Event::Report(Report::Patient(self.registry.show_patient(name)))
            }
            Command::ShowDoctor { doctor } => {
                Event::Report(Report::Doctor(self.registry.show_doctor_patients(doctor)))
            }
            Command::ShowYear { year } => {
                Event::Report(Report::Year(self.registry.show_patients(*year)))
            }
            Command::Echo { text } => Event::Echo(text.clone()),
        }
    }
}

fn mutation(result: Result<Outcome>) -> Event {
    match result {
        Ok(outcome) => Event::Info(outcome),
        Err(err) => Event::Error(err),
    }
}

/// Collects rendered text lines in memory; multi-line reports are split per line.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, event: Event) -> Result<()> {
        let text = event.render_text();
        if text.is_empty() {
            self.lines.push(String::new());
        } else {
            self.lines.extend(text.lines().map(str::to_string));
        }
        Ok(())
    }
}
