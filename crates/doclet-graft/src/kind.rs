//! Dispatch vocabulary: hooks, parent-kind tags and slot names.
//!
//! We keep the set of hooks closed. Each hook is the transform applied to
//! one category of record, and each has the slot its output is attached to
//! unless the output names its own.

use serde::{Deserialize, Serialize};

/// Default slot names used by the dispatcher.
pub mod slot {
    pub const FILE: &str = "file";
    pub const PACKAGE: &str = "package";
    pub const NAMESPACE: &str = "namespace";
    pub const CALLBACK: &str = "callback";
    pub const TYPEDEF: &str = "typedef";
    pub const CLASS: &str = "class";
    pub const INTERFACE: &str = "interface";
    pub const ENUMERATION: &str = "enumeration";
    pub const ENUM_VALUE: &str = "enumValue";
    pub const CONSTRUCTORS: &str = "constructors";
    pub const ATTRIBUTES: &str = "attributes";
    pub const PROPERTIES: &str = "properties";
    pub const METHODS: &str = "methods";
    pub const FUNCTION: &str = "function";
    pub const MIXIN: &str = "mixin";
    pub const EVENT: &str = "event";
}

/// The transform applied to a record, chosen by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hook {
    File,
    Package,
    Namespace,
    /// Typedef of a function type.
    Callback,
    Typedef,
    Class,
    Interface,
    /// Member flagged as an enumeration.
    Enum,
    /// One value of an enumeration.
    EnumConstant,
    Constructor,
    /// Member or constant of a class or interface.
    Attribute,
    /// Member or constant anywhere else.
    Variable,
    /// Function of a class or interface.
    Method,
    Function,
    Mixin,
    Event,
    /// Fallback for kinds without a dedicated rule.
    Unknown,
}

impl Hook {
    pub const ALL: [Hook; 17] = [
        Hook::File,
        Hook::Package,
        Hook::Namespace,
        Hook::Callback,
        Hook::Typedef,
        Hook::Class,
        Hook::Interface,
        Hook::Enum,
        Hook::EnumConstant,
        Hook::Constructor,
        Hook::Attribute,
        Hook::Variable,
        Hook::Method,
        Hook::Function,
        Hook::Mixin,
        Hook::Event,
        Hook::Unknown,
    ];

    /// Slot the hook's output lands in when it does not name one.
    ///
    /// The unknown-kind hook has none: its output must carry a slot.
    pub fn default_slot(&self) -> Option<&'static str> {
        let name = match self {
            Hook::File => slot::FILE,
            Hook::Package => slot::PACKAGE,
            Hook::Namespace => slot::NAMESPACE,
            Hook::Callback => slot::CALLBACK,
            Hook::Typedef => slot::TYPEDEF,
            Hook::Class => slot::CLASS,
            Hook::Interface => slot::INTERFACE,
            Hook::Enum => slot::ENUMERATION,
            Hook::EnumConstant => slot::ENUM_VALUE,
            Hook::Constructor => slot::CONSTRUCTORS,
            Hook::Attribute => slot::ATTRIBUTES,
            Hook::Variable => slot::PROPERTIES,
            Hook::Method => slot::METHODS,
            Hook::Function => slot::FUNCTION,
            Hook::Mixin => slot::MIXIN,
            Hook::Event => slot::EVENT,
            Hook::Unknown => return None,
        };
        Some(name)
    }

    /// Name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::File => "file",
            Hook::Package => "package",
            Hook::Namespace => "namespace",
            Hook::Callback => "callback",
            Hook::Typedef => "typedef",
            Hook::Class => "class",
            Hook::Interface => "interface",
            Hook::Enum => "enum",
            Hook::EnumConstant => "enum_constant",
            Hook::Constructor => "constructor",
            Hook::Attribute => "attribute",
            Hook::Variable => "variable",
            Hook::Method => "method",
            Hook::Function => "function",
            Hook::Mixin => "mixin",
            Hook::Event => "event",
            Hook::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Context passed down the recursion. Decides how members and functions
/// are routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParentKind {
    /// Top-level call, no container.
    Root,
    Namespace,
    /// Classes and interfaces: constructors, attributes and methods live here.
    Classifier,
    Mixin,
}

impl std::fmt::Display for ParentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Root => "root",
            Self::Namespace => "namespace",
            Self::Classifier => "classifier",
            Self::Mixin => "mixin",
        };
        write!(f, "{}", s)
    }
}
