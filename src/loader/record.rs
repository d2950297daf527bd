use crate::graph::person::PersonKind;

/// One record of the nested input format.
///
/// Parents are embedded inline as full records of the same shape; the same ancestor may be
/// serialized again under every child that reaches it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PersonRecord {
    /// Identity; required.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `birthyear`: a string or a number.
    #[serde(
        default,
        rename = "birthyear",
        deserialize_with = "opaque_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_year: Option<String>,
    /// Photo reference, usually a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    /// `type`: `root`, `parent` or `person`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Stock placeholder flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<bool>,
    /// Full records of this person's parents.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<PersonRecord>,
    /// `lastId` counter, meaningful on the root only.
    #[serde(default, rename = "lastId", skip_serializing_if = "Option::is_none")]
    pub last_id: Option<i64>,
}

impl PersonRecord {
    /// Record with an id and a name.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Replace the embedded parents.
    pub fn with_parents(mut self, parents: Vec<PersonRecord>) -> Self {
        self.parents = parents;
        self
    }

    /// Set the birth year.
    pub fn with_birth_year(mut self, year: impl Into<String>) -> Self {
        self.birth_year = Some(year.into());
        self
    }

    /// Kind named by `type`; absent or unknown tags fall back to [`PersonKind::Person`].
    pub fn kind(&self) -> PersonKind {
        self.kind
            .as_deref()
            .and_then(PersonKind::from_tag)
            .unwrap_or_default()
    }

    /// Name, or `""` when absent.
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

// Birth years are opaque: accept `"1815"`, `1815`, or null.
fn opaque_text<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize as _;

    match Option::<serde_json::Value>::deserialize(de)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}
