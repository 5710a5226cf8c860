//! Hooks that dump records as JSON objects.
//!
//! Installed as the fallback of a [`HookTable`](crate::HookTable), they
//! make a run produce a complete tree: every node carries the record's own
//! fields, minus extractor bookkeeping. Merged members embed the view of
//! the record that documents them under `parentDoc`.

use crate::hooks::{HookInput, HookResult, Transform};
use crate::kind::Hook;
use crate::tree::Transformed;
use doclet_core::{replace_escaped_at_char, Record};
use serde_json::{Map, Value};

/// Fields added by the extractor's database rather than by the doc comment.
const BOOKKEEPING: [&str; 2] = ["___id", "___s"];

/// Fields holding free text where `''@` escapes may appear.
const TEXT_FIELDS: [&str; 3] = ["description", "classdesc", "summary"];

/// Turns every record into its JSON view.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHooks {
    /// Keep the `meta` block (file, line, code).
    pub keep_meta: bool,
}

impl JsonHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meta(mut self, keep: bool) -> Self {
        self.keep_meta = keep;
        self
    }
}

impl JsonHooks {
    /// The record's fields minus bookkeeping, with text unescaped.
    fn view(&self, record: &Record) -> Map<String, Value> {
        let Value::Object(mut fields) = record.to_value() else {
            return Map::new();
        };

        for key in BOOKKEEPING {
            fields.remove(key);
        }
        if !self.keep_meta {
            fields.remove("meta");
        }
        for key in TEXT_FIELDS {
            if let Some(Value::String(text)) = fields.get_mut(key) {
                *text = replace_escaped_at_char(Some(text.as_str()));
            }
        }
        fields
    }
}

impl Transform for JsonHooks {
    fn transform(&mut self, input: HookInput<'_>) -> HookResult {
        let mut fields = self.view(input.record);

        // Grafted separately as enumValue children.
        if input.hook == Hook::Enum {
            fields.remove("properties");
        }
        if let Some(doc) = input.parent_doc {
            fields.insert("parentDoc".to_string(), Value::Object(self.view(doc)));
        }

        let transformed = Transformed::new(Value::Object(fields));
        Ok(Some(match input.hook {
            Hook::Unknown => transformed.with_slot(unknown_slot(input)),
            _ => transformed,
        }))
    }
}

/// Unknown kinds land in a slot named after the raw kind.
fn unknown_slot(input: HookInput<'_>) -> String {
    match input.record.kind.as_str() {
        "" => "unknown".to_string(),
        raw => raw.to_string(),
    }
}
