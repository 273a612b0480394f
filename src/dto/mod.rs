use chrono::{DateTime, Utc};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{IgnoredAny, MapAccess, Visitor},
};
use utoipa::ToSchema;

use std::fmt;

use crate::models::Note;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation time (RFC 3339)
    pub created_at: DateTime<Utc>,
    /// Last update time (RFC 3339)
    pub updated_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}

/// `title` and `content` as sent by a client. Only a JSON object decodes;
/// unknown keys such as `id` or timestamps are skipped, and a missing or
/// `null` field is an empty string.
#[derive(Debug, Default)]
struct NoteFields {
    title: String,
    content: String,
}

impl<'de> Deserialize<'de> for NoteFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(NoteFieldsVisitor)
    }
}

struct NoteFieldsVisitor;

impl<'de> Visitor<'de> for NoteFieldsVisitor {
    type Value = NoteFields;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON object with `title` and `content`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut fields = NoteFields::default();
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "title" => {
                    fields.title = map.next_value::<Option<String>>()?.unwrap_or_default();
                }
                "content" => {
                    fields.content = map.next_value::<Option<String>>()?.unwrap_or_default();
                }
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        Ok(fields)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(from = "NoteFields")]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
}

impl From<NoteFields> for CreateNoteRequest {
    fn from(fields: NoteFields) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(from = "NoteFields")]
pub struct UpdateNoteRequest {
    /// New note title
    pub title: String,
    /// New note content
    pub content: String,
}

impl From<NoteFields> for UpdateNoteRequest {
    fn from(fields: NoteFields) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
