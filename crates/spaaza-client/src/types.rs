//! Wire types for the response envelope and multipart bodies.

use serde::Deserialize;

/// One entry in the envelope's `error`/`errors` map.
///
/// Unknown fields are ignored; the server attaches endpoint-specific extras
/// here that the client does not interpret.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) description: String,
    #[serde(default)]
    pub(crate) extrainfo: Option<ExtraInfo>,
}

/// Extra diagnostic info attached to an error entry.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ExtraInfo {
    #[serde(default)]
    pub(crate) msg: String,
}

/// One field of a `multipart/form-data` request body.
///
/// # Example
///
/// ```
/// use spaaza_client::Part;
///
/// let parts = vec![
///     Part::bytes("imagefile", b"\x89PNG...".to_vec())
///         .file_name("photo.png")
///         .mime_type("image/png"),
///     Part::text("image_seq_num", "1"),
/// ];
/// ```
#[derive(Debug, Clone)]
pub struct Part {
    pub(crate) name: String,
    pub(crate) kind: PartKind,
}

#[derive(Debug, Clone)]
pub(crate) enum PartKind {
    Text(String),
    Bytes {
        data: Vec<u8>,
        file_name: Option<String>,
        mime_type: Option<String>,
    },
}

impl Part {
    /// A text field.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PartKind::Text(value.into()),
        }
    }

    /// A binary field, e.g. a file upload.
    pub fn bytes(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            kind: PartKind::Bytes {
                data: data.into(),
                file_name: None,
                mime_type: None,
            },
        }
    }

    /// Attach a file name to a binary field. No effect on text fields.
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        if let PartKind::Bytes { file_name: slot, .. } = &mut self.kind {
            *slot = Some(file_name.into());
        }
        self
    }

    /// Attach a MIME type to a binary field. No effect on text fields.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        if let PartKind::Bytes { mime_type: slot, .. } = &mut self.kind {
            *slot = Some(mime_type.into());
        }
        self
    }
}
