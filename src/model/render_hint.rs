//! Column type tag → render hint mapping.
//!
//! monday.com has dozens of column types; consumers only need to know how to
//! present a value. The mapping is a fixed table and never fails: any tag the
//! table does not know renders as plain text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse display category derived from a column's type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderHint {
    Text,
    Longtext,
    Status,
    Date,
    Person,
    Number,
    Select,
    Timeline,
    Doc,
    File,
    Url,
    Email,
    Phone,
    Checkbox,
    Relation,
    Mirror,
    Subtasks,
    Tags,
}

/// Every type tag with a dedicated mapping. Tags absent here map to `Text`.
pub const RENDER_HINT_TABLE: &[(&str, RenderHint)] = &[
    // Core types
    ("name", RenderHint::Text),
    ("text", RenderHint::Text),
    ("long_text", RenderHint::Longtext),
    ("status", RenderHint::Status),
    ("date", RenderHint::Date),
    ("people", RenderHint::Person),
    ("numbers", RenderHint::Number),
    // Selection types
    ("dropdown", RenderHint::Select),
    ("color_picker", RenderHint::Select),
    // Rich types
    ("timeline", RenderHint::Timeline),
    ("doc", RenderHint::Doc),
    ("file", RenderHint::File),
    ("link", RenderHint::Url),
    ("email", RenderHint::Email),
    ("phone", RenderHint::Phone),
    ("checkbox", RenderHint::Checkbox),
    // Relation types
    ("board_relation", RenderHint::Relation),
    ("mirror", RenderHint::Mirror),
    ("subtasks", RenderHint::Subtasks),
    ("dependency", RenderHint::Relation),
    // Misc
    ("country", RenderHint::Text),
    ("location", RenderHint::Text),
    ("rating", RenderHint::Number),
    ("auto_number", RenderHint::Number),
    ("formula", RenderHint::Text),
    ("tags", RenderHint::Tags),
    ("week", RenderHint::Date),
    ("hour", RenderHint::Text),
    ("world_clock", RenderHint::Text),
];

/// Maps a column type tag to its render hint. Total: unknown tags are `Text`.
pub fn render_hint(type_tag: &str) -> RenderHint {
    RENDER_HINT_TABLE
        .iter()
        .find(|(tag, _)| *tag == type_tag)
        .map(|(_, hint)| *hint)
        .unwrap_or(RenderHint::Text)
}

impl RenderHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Longtext => "longtext",
            Self::Status => "status",
            Self::Date => "date",
            Self::Person => "person",
            Self::Number => "number",
            Self::Select => "select",
            Self::Timeline => "timeline",
            Self::Doc => "doc",
            Self::File => "file",
            Self::Url => "url",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Checkbox => "checkbox",
            Self::Relation => "relation",
            Self::Mirror => "mirror",
            Self::Subtasks => "subtasks",
            Self::Tags => "tags",
        }
    }

    /// Whether columns with this hint draw their values from a label set.
    pub fn is_enumerated(&self) -> bool {
        matches!(self, Self::Status | Self::Select)
    }
}

impl fmt::Display for RenderHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
