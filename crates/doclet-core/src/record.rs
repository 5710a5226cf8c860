//! Flat documentation records.
//!
//! A record is one documented symbol as emitted by a JSDoc-style extractor.
//! Only the fields the grafter inspects are typed; everything else is kept
//! verbatim in [`Record::extra`] so hooks and remove queries can still see it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

// ─────────────────────────────────────────────────────────────────────────────
// RecordKind
// ─────────────────────────────────────────────────────────────────────────────

/// Structural category of a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordKind {
    File,
    Package,
    Namespace,
    Typedef,
    Class,
    Interface,
    Member,
    Constant,
    Function,
    Mixin,
    Event,
    /// Any kind the grafter has no dedicated rule for. Keeps the raw string.
    Other(String),
}

impl RecordKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::File => "file",
            Self::Package => "package",
            Self::Namespace => "namespace",
            Self::Typedef => "typedef",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Member => "member",
            Self::Constant => "constant",
            Self::Function => "function",
            Self::Mixin => "mixin",
            Self::Event => "event",
            Self::Other(raw) => raw,
        }
    }

    /// Member and constant records share routing rules.
    pub fn is_member_like(&self) -> bool {
        matches!(self, Self::Member | Self::Constant)
    }
}

impl Default for RecordKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for RecordKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "file" => Self::File,
            "package" => Self::Package,
            "namespace" => Self::Namespace,
            "typedef" => Self::Typedef,
            "class" => Self::Class,
            "interface" => Self::Interface,
            "member" => Self::Member,
            "constant" => Self::Constant,
            "function" => Self::Function,
            "mixin" => Self::Mixin,
            "event" => Self::Event,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for RecordKind {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<RecordKind> for String {
    fn from(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Record
// ─────────────────────────────────────────────────────────────────────────────

/// The `type` field of a record: a list of type expressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeSpec {
    #[serde(default)]
    pub names: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One flat documentation-symbol record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Globally unique identifier, e.g. `ns.Shape#area`.
    #[serde(default)]
    pub longname: String,

    /// Display name, e.g. `area`.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub kind: RecordKind,

    /// Identifier of the logical container. Absent for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memberof: Option<String>,

    #[serde(default, skip_serializing_if = "is_false")]
    pub inherited: bool,

    /// Identifier of the member this one overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<String>,

    /// Present (with any value) when the comment carried `@inheritdoc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inheritdoc: Option<Value>,

    #[serde(rename = "override", default, skip_serializing_if = "is_false")]
    pub override_doc: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub is_enum: bool,

    /// Enumeration values, only meaningful when `is_enum` is set.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Record>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_spec: Option<TypeSpec>,

    /// Every other field of the extractor's record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Record {
    /// Creates a root record of the given kind.
    pub fn new(kind: impl Into<RecordKind>, longname: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            longname: longname.into(),
            name: name.into(),
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Sets the container identifier.
    pub fn with_memberof(mut self, parent: impl Into<String>) -> Self {
        self.memberof = Some(parent.into());
        self
    }

    /// Sets the type names.
    pub fn with_type_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_spec = Some(TypeSpec {
            names: names.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        });
        self
    }

    /// Marks this member as an enumeration with the given values.
    pub fn with_enum_values(mut self, values: Vec<Record>) -> Self {
        self.is_enum = true;
        self.properties = values;
        self
    }

    /// Marks this record as inherited, optionally overriding `target`.
    pub fn with_inherited(mut self, overrides: Option<&str>) -> Self {
        self.inherited = true;
        self.overrides = overrides.map(str::to_string);
        self
    }

    /// Adds an `@inheritdoc` request.
    pub fn with_inheritdoc(mut self) -> Self {
        self.inheritdoc = Some(Value::String(String::new()));
        self
    }

    /// Adds an `@override` request.
    pub fn with_override(mut self) -> Self {
        self.override_doc = true;
        self
    }

    /// Sets the `@ignore` flag.
    pub fn with_ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Sets an arbitrary extractor field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Identifier used in logs: the longname, or the name when it is empty.
    pub fn display_name(&self) -> &str {
        if self.longname.is_empty() {
            &self.name
        } else {
            &self.longname
        }
    }

    /// True when the record asks to merge documentation with a
    /// same-identifier counterpart (`@inheritdoc` or `@override`).
    pub fn requests_doc_merge(&self) -> bool {
        self.inheritdoc.is_some() || self.override_doc
    }

    /// A typedef whose first type is `function`.
    pub fn is_callback(&self) -> bool {
        self.kind == RecordKind::Typedef
            && self
                .type_spec
                .as_ref()
                .and_then(|t| t.names.first())
                .is_some_and(|first| first == "function")
    }

    /// JSON view of the record, as the extractor would have printed it.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Logs every non-null field at debug level.
    pub fn dump(&self) {
        if let Value::Object(fields) = self.to_value() {
            for (key, value) in fields.iter().filter(|(_, v)| !v.is_null()) {
                debug!("{} {}: {}", self.display_name(), key, value);
            }
        }
    }
}
