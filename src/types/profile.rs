// src/types/profile.rs
//! Profile data model consumed by every template.
//!
//! Every field is optional. Missing keys, nulls and values of the wrong shape
//! fall back to defaults (see `lenient`), so partially filled profiles
//! deserialize cleanly. Polymorphic shapes (address as string or
//! object, skills and interests as bare strings) are normalized here, before any
//! template sees them.

use serde::{Deserialize, Serialize};

use super::dates::{self, ProfileDate};
use super::lenient;

/// Trimmed, non-empty view of an optional string field.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    #[serde(deserialize_with = "lenient::record")]
    pub personal_info: PersonalInfo,
    #[serde(deserialize_with = "lenient::record")]
    pub contact: ContactInfo,
    #[serde(deserialize_with = "lenient::text")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient::list")]
    pub experience: Vec<Experience>,
    #[serde(deserialize_with = "lenient::list")]
    pub education: Vec<Education>,
    #[serde(deserialize_with = "lenient::list")]
    pub skills: Vec<Skill>,
    #[serde(deserialize_with = "lenient::list")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "lenient::list")]
    pub certifications: Vec<Certification>,
    #[serde(deserialize_with = "lenient::list")]
    pub languages: Vec<Language>,
    #[serde(deserialize_with = "lenient::list")]
    pub achievements: Vec<Achievement>,
    #[serde(deserialize_with = "lenient::list")]
    pub courses: Vec<Course>,
    #[serde(deserialize_with = "lenient::list")]
    pub publications: Vec<Publication>,
    #[serde(deserialize_with = "lenient::list")]
    pub patents: Vec<Patent>,
    #[serde(deserialize_with = "lenient::list")]
    pub interests: Vec<Interest>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional"
    )]
    pub signature: Option<Signature>,
}

impl Profile {
    /// First and last name joined, or `None` when both are blank.
    pub fn full_name(&self) -> Option<String> {
        let parts: Vec<&str> = [
            non_blank(&self.personal_info.first_name),
            non_blank(&self.personal_info.last_name),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Signature block, only when at least one of its fields carries content.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref().filter(|s| !s.is_blank())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    #[serde(deserialize_with = "lenient::text")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date_of_birth: Option<ProfileDate>,
    #[serde(deserialize_with = "lenient::text")]
    pub nationality: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub photo_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactInfo {
    #[serde(deserialize_with = "lenient::text")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub alternate_phone: Option<String>,
    #[serde(deserialize_with = "lenient::optional")]
    pub address: Option<Address>,
    #[serde(deserialize_with = "lenient::text")]
    pub website: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub linkedin: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub github: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub portfolio: Option<String>,
}

/// Canonical address. A plain string address lands in `street`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAddress")]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Non-empty parts joined with ", ".
    pub fn display(&self) -> Option<String> {
        let parts: Vec<&str> = [
            &self.street,
            &self.city,
            &self.state,
            &self.postal_code,
            &self.country,
        ]
        .into_iter()
        .filter_map(non_blank)
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAddress {
    Line(String),
    Structured(StructuredAddress),
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StructuredAddress {
    #[serde(deserialize_with = "lenient::text")]
    street: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    city: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    state: Option<String>,
    #[serde(alias = "zipCode", alias = "zip", deserialize_with = "lenient::text")]
    postal_code: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    country: Option<String>,
}

impl From<RawAddress> for Address {
    fn from(raw: RawAddress) -> Self {
        match raw {
            RawAddress::Line(line) => Address {
                street: Some(line),
                ..Default::default()
            },
            RawAddress::Structured(s) => Address {
                street: s.street,
                city: s.city,
                state: s.state,
                postal_code: s.postal_code,
                country: s.country,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    #[serde(alias = "position", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub start_date: Option<ProfileDate>,
    #[serde(deserialize_with = "dates::optional")]
    pub end_date: Option<ProfileDate>,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(alias = "achievements", deserialize_with = "lenient::strings")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    #[serde(deserialize_with = "lenient::text")]
    pub degree: Option<String>,
    #[serde(alias = "fieldOfStudy", deserialize_with = "lenient::text")]
    pub field: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub start_date: Option<ProfileDate>,
    #[serde(deserialize_with = "dates::optional")]
    pub end_date: Option<ProfileDate>,
    #[serde(deserialize_with = "lenient::flag")]
    pub current: bool,
    #[serde(deserialize_with = "lenient::text")]
    pub gpa: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSkill")]
pub struct Skill {
    pub name: Option<String>,
    pub level: Option<String>,
    pub category: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSkill {
    Name(String),
    Full(SkillFields),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct SkillFields {
    #[serde(deserialize_with = "lenient::text")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    level: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    category: Option<String>,
}

impl From<RawSkill> for Skill {
    fn from(raw: RawSkill) -> Self {
        match raw {
            RawSkill::Name(name) => Skill {
                name: Some(name),
                ..Default::default()
            },
            RawSkill::Full(f) => Skill {
                name: f.name,
                level: f.level,
                category: f.category,
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::strings")]
    pub technologies: Vec<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub start_date: Option<ProfileDate>,
    #[serde(deserialize_with = "dates::optional")]
    pub end_date: Option<ProfileDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub issuer: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date: Option<ProfileDate>,
    #[serde(deserialize_with = "dates::optional")]
    pub expiry_date: Option<ProfileDate>,
    #[serde(deserialize_with = "lenient::text")]
    pub credential_id: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    #[serde(alias = "language", deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub proficiency: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date: Option<ProfileDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub institution: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date: Option<ProfileDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Publication {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub publisher: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date: Option<ProfileDate>,
    #[serde(deserialize_with = "lenient::text")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Patent {
    #[serde(deserialize_with = "lenient::text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub number: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date: Option<ProfileDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawInterest")]
pub struct Interest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterest {
    Name(String),
    Full {
        #[serde(default, deserialize_with = "lenient::text")]
        name: Option<String>,
    },
}

impl From<RawInterest> for Interest {
    fn from(raw: RawInterest) -> Self {
        match raw {
            RawInterest::Name(name) => Interest { name: Some(name) },
            RawInterest::Full { name } => Interest { name },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Signature {
    #[serde(deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(deserialize_with = "dates::optional")]
    pub date: Option<ProfileDate>,
    #[serde(deserialize_with = "lenient::text")]
    pub place: Option<String>,
    #[serde(deserialize_with = "lenient::text")]
    pub image_url: Option<String>,
}

impl Signature {
    pub fn is_blank(&self) -> bool {
        non_blank(&self.name).is_none()
            && self.date.is_none()
            && non_blank(&self.place).is_none()
            && non_blank(&self.image_url).is_none()
    }
}
