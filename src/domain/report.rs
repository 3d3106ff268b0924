//! Read-only report values produced by registry queries.
//!
//! Every report renders through `Display` as newline-separated lines without a trailing
//! newline. A query that matches nothing renders [`EMPTY_MARKER`], preceded by its header
//! line when the report has one.

use crate::domain::model::VisitDate;
use serde::Serialize;
use std::fmt;

pub const EMPTY_MARKER: &str = "---none---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientSummary {
    pub name: String,
    pub visit_year: i32,
    pub doctor_name: String,
}

/// All patients, year ascending then name ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatientListing {
    pub patients: Vec<PatientSummary>,
}

impl PatientListing {
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }
}

impl fmt::Display for PatientListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str(EMPTY_MARKER);
        }
        for (i, p) in self.patients.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}, {}, {}", p.name, p.visit_year, p.doctor_name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CareTeamLine {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientDetail {
    pub name: String,
    pub visit: VisitDate,
    pub doctor_name: String,
    pub care_team: Vec<CareTeamLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientReport {
    pub query: String,
    pub patient: Option<PatientDetail>,
}

impl fmt::Display for PatientReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(detail) = &self.patient else {
            return f.write_str(EMPTY_MARKER);
        };
        write!(
            f,
            "{}\n{}/{}/{}\n{}",
            detail.name, detail.visit.day, detail.visit.month, detail.visit.year, detail.doctor_name
        )?;
        for member in &detail.care_team {
            write!(f, "\n{}, {}", member.name, member.role)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedVisit {
    pub name: String,
    pub visit: VisitDate,
}

/// Patients of one doctor, year descending then name ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub doctor_name: String,
    pub visits: Vec<DatedVisit>,
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.doctor_name)?;
        if self.visits.is_empty() {
            return write!(f, "\n{}", EMPTY_MARKER);
        }
        for v in &self.visits {
            write!(f, "\n{}, {}/{}/{}", v.name, v.visit.day, v.visit.month, v.visit.year)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearReport {
    pub year: i32,
    pub visits: Vec<DatedVisit>,
}

impl fmt::Display for YearReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)?;
        if self.visits.is_empty() {
            return write!(f, "\n{}", EMPTY_MARKER);
        }
        // year is already in the header
        for v in &self.visits {
            write!(f, "\n{}, {}/{}", v.name, v.visit.day, v.visit.month)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "report", rename_all = "snake_case")]
pub enum Report {
    AllPatients(PatientListing),
    Patient(PatientReport),
    Doctor(DoctorReport),
    Year(YearReport),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::AllPatients(r) => fmt::Display::fmt(r, f),
            Report::Patient(r) => fmt::Display::fmt(r, f),
            Report::Doctor(r) => fmt::Display::fmt(r, f),
            Report::Year(r) => fmt::Display::fmt(r, f),
        }
    }
}
