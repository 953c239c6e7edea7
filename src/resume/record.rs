use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Everything that goes into a resume.
///
/// Deserializes from JSON. Both the field names used here and the names used by the
/// older template format (`user_details`, `email_id`, `phone_no`, `about_user`,
/// `education_details`, `experience_details`, `currently_working_here`) are accepted.
/// Every field is optional at parse time; fields the resume cannot do without are
/// reported as [Error::MissingField] when rendering reaches them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResumeRecord {
    #[serde(alias = "user_details")]
    pub header: Header,
    #[serde(deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(alias = "education_details", deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(alias = "experience_details", deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Header {
    pub name: Option<String>,
    #[serde(alias = "email_id")]
    pub email: Option<String>,
    #[serde(alias = "phone_no", deserialize_with = "scalar")]
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub website: Option<String>,
    #[serde(alias = "about_user")]
    pub about: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Education {
    pub course: Option<String>,
    pub university: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub from_date: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub to_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub designation: Option<String>,
    pub organization: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub from_date: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub to_date: Option<String>,
    #[serde(alias = "currently_working_here", deserialize_with = "null_as_default")]
    pub currently_working: bool,
    pub about_role: Option<String>,
}

impl ResumeRecord {
    pub fn from_json(json: &str) -> Result<ResumeRecord> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResumeRecord> {
        let json = std::fs::read_to_string(path)?;
        ResumeRecord::from_json(&json)
    }
}

impl Education {
    pub fn date_range(&self) -> Option<String> {
        date_range(text(&self.from_date), text(&self.to_date), false)
    }
}

impl Experience {
    pub fn date_range(&self) -> Option<String> {
        date_range(
            text(&self.from_date),
            text(&self.to_date),
            self.currently_working,
        )
    }
}

/// Format the span of an entry, e.g. `2018 to 2021` or `2021 to present`.
///
/// A missing end renders only the start, a missing start renders only the end.
/// Returns [None] when there is nothing to show.
pub fn date_range(from: Option<&str>, to: Option<&str>, current: bool) -> Option<String> {
    let to = if current { Some("present") } else { to };
    match (from, to) {
        (Some(from), Some(to)) => Some(format!("{from} to {to}")),
        (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
        (None, None) => None,
    }
}

/// The trimmed contents of an optional field, treating blank strings as absent
pub(crate) fn text(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A field that must be present, named by its path in the record
pub(crate) fn required<'r>(field: &'r Option<String>, path: &str) -> Result<&'r str> {
    text(field).ok_or_else(|| Error::missing(path))
}

/// Accepts strings and numbers, so that `"phone_no": 5551234` or `"from_date": 2020`
/// read the same as their quoted forms
fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|value| match value {
        Scalar::Text(s) => s,
        Scalar::Integer(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
    }))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
