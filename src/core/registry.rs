use crate::domain::model::{CareTeamMember, Outcome, Patient, PersonName, VisitDate};
use crate::domain::report::{
    CareTeamLine, DatedVisit, DoctorReport, PatientDetail, PatientListing, PatientReport,
    PatientSummary, YearReport,
};
use crate::utils::error::{RegistryError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory patient registry with a primary index by full name and a secondary index
/// by visit year.
///
/// `by_name` owns every `Patient`. `by_year` holds only the names, bucketed by the
/// patient's stored visit year, so care-team edits through `by_name` are visible to
/// every query. Every mutation updates both maps before returning, and a bucket is
/// dropped as soon as it becomes empty.
#[derive(Debug, Default)]
pub struct Registry {
    by_name: BTreeMap<String, Patient>,
    by_year: BTreeMap<i32, BTreeSet<String>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a patient. An existing patient with the same full name is kept as is and the
    /// call fails with `DuplicatePatient`.
    pub fn add_patient(
        &mut self,
        full_name: &str,
        doctor_name: &str,
        day: u32,
        month: u32,
        year: i32,
    ) -> Result<Outcome> {
        if self.by_name.contains_key(full_name) {
            tracing::warn!(patient = %full_name, "duplicate patient rejected");
            return Err(RegistryError::DuplicatePatient {
                name: full_name.to_string(),
            });
        }

        let name = PersonName::parse(full_name)?;
        let patient = Patient::new(name, doctor_name, VisitDate { day, month, year });

        self.by_name.insert(full_name.to_string(), patient);
        self.by_year
            .entry(year)
            .or_default()
            .insert(full_name.to_string());

        tracing::debug!(patient = %full_name, doctor = %doctor_name, year, "patient added");
        Ok(Outcome::PatientAdded {
            patient: full_name.to_string(),
        })
    }

    pub fn remove_patient(&mut self, full_name: &str) -> Result<Outcome> {
        let patient = self.by_name.remove(full_name).ok_or_else(|| {
            tracing::warn!(patient = %full_name, "remove of unknown patient");
            RegistryError::PatientNotFound {
                name: full_name.to_string(),
            }
        })?;

        let year = patient.visit_year();
        if let Some(bucket) = self.by_year.get_mut(&year) {
            bucket.remove(full_name);
            if bucket.is_empty() {
                self.by_year.remove(&year);
            }
        }

        tracing::debug!(patient = %full_name, year, "patient removed");
        Ok(Outcome::PatientRemoved {
            patient: full_name.to_string(),
        })
    }

    /// Adds a care-team member, silently replacing one already stored under the same name.
    pub fn add_member(
        &mut self,
        patient_name: &str,
        member_name: &str,
        role: &str,
    ) -> Result<Outcome> {
        let patient = self.patient_mut(patient_name)?;
        let member = CareTeamMember {
            name: PersonName::parse(member_name)?,
            role: role.to_string(),
        };
        if patient.assign(member_name, member).is_some() {
            tracing::debug!(patient = %patient_name, member = %member_name, "care-team member replaced");
        }

        tracing::debug!(patient = %patient_name, member = %member_name, role = %role, "member added");
        Ok(Outcome::MemberAdded {
            patient: patient_name.to_string(),
            member: member_name.to_string(),
        })
    }

    pub fn remove_member(&mut self, patient_name: &str, member_name: &str) -> Result<Outcome> {
        let patient = self.patient_mut(patient_name)?;
        if patient.unassign(member_name).is_none() {
            tracing::warn!(patient = %patient_name, member = %member_name, "member not in care team");
            return Err(RegistryError::MemberNotFound {
                patient: patient_name.to_string(),
                member: member_name.to_string(),
            });
        }

        tracing::debug!(patient = %patient_name, member = %member_name, "member removed");
        Ok(Outcome::MemberRemoved {
            patient: patient_name.to_string(),
            member: member_name.to_string(),
        })
    }

    pub fn list_all_patients(&self) -> PatientListing {
        let patients = self
            .by_year
            .values()
            .flat_map(|names| self.resolve(names))
            .map(|p| PatientSummary {
                name: p.name.full_name(),
                visit_year: p.visit_year(),
                doctor_name: p.doctor_name.clone(),
            })
            .collect();
        PatientListing { patients }
    }

    pub fn show_patient(&self, full_name: &str) -> PatientReport {
        let patient = self.by_name.get(full_name).map(|p| PatientDetail {
            name: p.name.full_name(),
            visit: p.visit,
            doctor_name: p.doctor_name.clone(),
            care_team: p
                .care_team()
                .map(|m| CareTeamLine {
                    name: m.name.full_name(),
                    role: m.role.clone(),
                })
                .collect(),
        });
        PatientReport {
            query: full_name.to_string(),
            patient,
        }
    }

    /// Patients whose doctor name matches exactly, newest visit year first.
    pub fn show_doctor_patients(&self, doctor_name: &str) -> DoctorReport {
        let visits = self
            .by_year
            .values()
            .rev()
            .flat_map(|names| self.resolve(names))
            .filter(|p| p.doctor_name == doctor_name)
            .map(dated_visit)
            .collect();
        DoctorReport {
            doctor_name: doctor_name.to_string(),
            visits,
        }
    }

    pub fn show_patients(&self, year: i32) -> YearReport {
        let visits: Vec<DatedVisit> = self
            .by_year
            .get(&year)
            .map(|names| self.resolve(names).map(dated_visit).collect())
            .unwrap_or_default();
        YearReport { year, visits }
    }

    pub fn patient(&self, full_name: &str) -> Option<&Patient> {
        self.by_name.get(full_name)
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.by_name.contains_key(full_name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Years that currently hold at least one patient, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.by_year.keys().copied()
    }

    /// Names filed under `year`, ascending. Empty when the year has no bucket.
    pub fn names_in_year(&self, year: i32) -> Vec<&str> {
        self.by_year
            .get(&year)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn patient_mut(&mut self, full_name: &str) -> Result<&mut Patient> {
        self.by_name.get_mut(full_name).ok_or_else(|| {
            tracing::warn!(patient = %full_name, "unknown patient");
            RegistryError::PatientNotFound {
                name: full_name.to_string(),
            }
        })
    }

    fn resolve<'a>(&'a self, names: &'a BTreeSet<String>) -> impl Iterator<Item = &'a Patient> {
        names.iter().filter_map(move |name| {
            let patient = self.by_name.get(name);
            debug_assert!(patient.is_some(), "year index names unknown patient {}", name);
            patient
        })
    }
}

fn dated_visit(patient: &Patient) -> DatedVisit {
    DatedVisit {
        name: patient.name.full_name(),
        visit: patient.visit,
    }
}
