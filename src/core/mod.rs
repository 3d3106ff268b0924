pub mod registry;
pub mod session;

pub use crate::domain::model::{CareTeamMember, Outcome, Patient, PersonName, VisitDate};
pub use crate::domain::ports::{Event, OutputSink};
pub use crate::domain::report::Report;
pub use crate::utils::error::Result;
