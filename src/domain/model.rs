use crate::utils::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A person's name split on the first space; everything after it is the last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub last_name: String,
}

impl PersonName {
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split_once(' ') {
            Some((first, last)) if !first.is_empty() && !last.is_empty() => Ok(Self {
                first_name: first.to_string(),
                last_name: last.to_string(),
            }),
            _ => Err(RegistryError::MalformedName {
                name: full_name.to_string(),
            }),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitDate {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTeamMember {
    pub name: PersonName,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub name: PersonName,
    pub doctor_name: String,
    pub visit: VisitDate,
    /// Keyed by the member's full name as given to `add_member`.
    pub care_team: BTreeMap<String, CareTeamMember>,
}

impl Patient {
    pub fn new(name: PersonName, doctor_name: impl Into<String>, visit: VisitDate) -> Self {
        Self {
            name,
            doctor_name: doctor_name.into(),
            visit,
            care_team: BTreeMap::new(),
        }
    }

    pub fn visit_year(&self) -> i32 {
        self.visit.year
    }

    /// Inserts or replaces the member stored under `full_name`.
    pub fn assign(&mut self, full_name: &str, member: CareTeamMember) -> Option<CareTeamMember> {
        self.care_team.insert(full_name.to_string(), member)
    }

    pub fn unassign(&mut self, full_name: &str) -> Option<CareTeamMember> {
        self.care_team.remove(full_name)
    }

    pub fn care_team(&self) -> impl Iterator<Item = &CareTeamMember> {
        self.care_team.values()
    }
}

/// Success notice returned by the registry's mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    PatientAdded { patient: String },
    PatientRemoved { patient: String },
    MemberAdded { patient: String, member: String },
    MemberRemoved { patient: String, member: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PatientAdded { patient } => write!(f, "Patient {} has been added", patient),
            Outcome::PatientRemoved { patient } => {
                write!(f, "Patient {} has been removed", patient)
            }
            Outcome::MemberAdded { patient, member } => {
                write!(f, "{} has been added to the patient {}", member, patient)
            }
            Outcome::MemberRemoved { patient, member } => {
                write!(f, "{} has been removed from the patient {}", member, patient)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_part_name() {
        let name = PersonName::parse("Michael Johnson").unwrap();
        assert_eq!(name.first_name, "Michael");
        assert_eq!(name.last_name, "Johnson");
        assert_eq!(name.full_name(), "Michael Johnson");
    }

    #[test]
    fn test_parse_keeps_remainder_as_last_name() {
        let name = PersonName::parse("Mary Ann Smith").unwrap();
        assert_eq!(name.first_name, "Mary");
        assert_eq!(name.last_name, "Ann Smith");
    }

    #[test]
    fn test_parse_rejects_single_token() {
        assert!(matches!(
            PersonName::parse("Cher"),
            Err(RegistryError::MalformedName { .. })
        ));
        assert!(PersonName::parse(" Smith").is_err());
        assert!(PersonName::parse("John ").is_err());
        assert!(PersonName::parse("").is_err());
    }

    #[test]
    fn test_care_team_overwrites_and_sorts() {
        let mut patient = Patient::new(
            PersonName::parse("Mason Moore").unwrap(),
            "William Anderson",
            VisitDate { day: 7, month: 6, year: 2021 },
        );
        let nurse = CareTeamMember {
            name: PersonName::parse("Daniel Roberts").unwrap(),
            role: "Nurse".to_string(),
        };
        let medic = CareTeamMember {
            name: PersonName::parse("Hannah Martin").unwrap(),
            role: "Paramedic".to_string(),
        };
        assert!(patient.assign("Daniel Roberts", nurse.clone()).is_none());
        patient.assign("Hannah Martin", medic);

        let replaced = CareTeamMember {
            role: "Head Nurse".to_string(),
            ..nurse
        };
        assert!(patient.assign("Daniel Roberts", replaced).is_some());

        let roles: Vec<&str> = patient.care_team().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["Head Nurse", "Paramedic"]);
        assert!(patient.unassign("Nobody Here").is_none());
    }

    #[test]
    fn test_outcome_messages() {
        let added = Outcome::MemberAdded {
            patient: "Mason Moore".to_string(),
            member: "Daniel Roberts".to_string(),
        };
        assert_eq!(added.to_string(), "Daniel Roberts has been added to the patient Mason Moore");

        let removed = Outcome::PatientRemoved {
            patient: "Ava Taylor".to_string(),
        };
        assert_eq!(removed.to_string(), "Patient Ava Taylor has been removed");
    }
}
