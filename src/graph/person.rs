use crate::foundation::core::PersonId;

/// Style hint carried by a person record (`type` in the input format).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonKind {
    /// The person the tree is drawn for.
    Root,
    /// A direct parent of the root.
    Parent,
    /// Any other ancestor.
    #[default]
    Person,
}

impl PersonKind {
    /// Map a free-form tag onto the closed set of kinds. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "root" => Some(Self::Root),
            "parent" => Some(Self::Parent),
            "person" => Some(Self::Person),
            _ => None,
        }
    }

    /// Tag as written in the input `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Parent => "parent",
            Self::Person => "person",
        }
    }
}

/// One person in a family tree.
///
/// Parents are stored as ids into the owning [`PersonGraph`](crate::PersonGraph), so an ancestor
/// reachable along several paths is one shared entry rather than several copies.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Person {
    /// Unique id within the tree.
    pub id: PersonId,
    /// Display name; may be empty.
    pub name: String,
    /// Birth year as written in the input.
    pub birth_year: Option<String>,
    /// Opaque photo reference, usually a `data:image/...;base64,` URL.
    pub photo: Option<String>,
    /// Style hint from the input `type`.
    pub kind: PersonKind,
    /// Flagged for the renderer to substitute generic art.
    pub stock: bool,
    parents: Vec<PersonId>,
}

impl Person {
    /// Person with no parents and default fields.
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            birth_year: None,
            photo: None,
            kind: PersonKind::default(),
            stock: false,
            parents: Vec::new(),
        }
    }

    /// Set the birth year.
    pub fn with_birth_year(mut self, year: impl Into<String>) -> Self {
        self.birth_year = Some(year.into());
        self
    }

    /// Set the photo reference.
    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Set the kind.
    pub fn with_kind(mut self, kind: PersonKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark as a stock placeholder.
    pub fn with_stock(mut self, stock: bool) -> Self {
        self.stock = stock;
        self
    }

    /// Parents in the order they were first attached.
    pub fn parents(&self) -> &[PersonId] {
        &self.parents
    }

    /// Attach a parent unless it is already present. Returns whether the list changed.
    pub(crate) fn push_parent(&mut self, parent: PersonId) -> bool {
        if self.parents.contains(&parent) {
            return false;
        }
        self.parents.push(parent);
        true
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.birth_year {
            Some(year) => write!(f, "{} ({year})", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
