//! Tool-call front end over a note store.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{BodyFormat, MarkdownSupport, NoteStore};
use crate::convert::{ConvertOptions, ConverterRegistry};
use crate::error::{Error, Result};
use crate::render::{to_json, JsonFormat};

/// Tool names answered by [`NoteService::dispatch`].
pub const TOOL_NAMES: &[&str] = &[
    "create_apple_note",
    "append_to_apple_note",
    "list_apple_notes",
    "get_apple_note_content",
    "format_apple_note",
];

const DEFAULT_PIPELINE: &str = "html-detailed";

/// Outcome tag of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    /// The call succeeded
    Success,
    /// The call failed; the message says why
    Error,
}

/// Tagged result of a tool call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Outcome tag
    pub status: ToolStatus,

    /// Human-readable message
    pub message: String,

    /// Structured payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolResponse {
    /// Successful response with a payload.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            status: ToolStatus::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
            data: None,
        }
    }

    /// Check if the call succeeded.
    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    /// Encode as compact JSON text.
    pub fn to_json(&self) -> Result<String> {
        to_json(self, JsonFormat::Compact)
    }
}

/// Note operations reported as [`ToolResponse`]s.
pub struct NoteService<S: NoteStore> {
    store: S,
    markdown: MarkdownSupport,
    registry: ConverterRegistry,
    options: ConvertOptions,
}

impl<S: NoteStore> NoteService<S> {
    /// Create a service over a store with built-in Markdown support.
    pub fn new(store: S) -> Self {
        Self {
            store,
            markdown: MarkdownSupport::default(),
            registry: ConverterRegistry::with_defaults(),
            options: ConvertOptions::default(),
        }
    }

    /// Set the Markdown capability.
    pub fn with_markdown_support(mut self, markdown: MarkdownSupport) -> Self {
        self.markdown = markdown;
        self
    }

    /// Set the options passed to pipelines.
    pub fn with_convert_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }

    /// Underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a note. An empty title lets the store pick one.
    pub fn create_note(
        &self,
        title: &str,
        content: &str,
        folder: &str,
        format: BodyFormat,
    ) -> ToolResponse {
        let body = self.markdown.prepare(content, format);
        match self.store.create_note(title, &body, folder) {
            Ok(details) => {
                let display_title = if title.is_empty() {
                    "Untitled (auto-generated)"
                } else {
                    title
                };
                ToolResponse::success(
                    format!("Note '{}' created successfully.", display_title),
                    json!({ "details": details }),
                )
            }
            Err(e) => failure(e),
        }
    }

    /// Append content to an existing note.
    pub fn append_to_note(
        &self,
        title: &str,
        content: &str,
        folder: &str,
        format: BodyFormat,
    ) -> ToolResponse {
        if title.is_empty() {
            return ToolResponse::error("Title parameter is required for append operation.");
        }

        let body = self.markdown.prepare(content, format);
        match self.store.append_to_note(title, folder, &body) {
            Ok(details) => ToolResponse::success(
                format!("Content appended to note '{}' successfully.", title),
                json!({ "details": details }),
            ),
            Err(e) => failure(e),
        }
    }

    /// List note titles in a folder, or everywhere when the folder is empty.
    pub fn list_notes(&self, folder: &str) -> ToolResponse {
        match self.store.list_notes(folder) {
            Ok(listing) => {
                let message = listing.notice.unwrap_or_else(|| {
                    let folder_name = if folder.is_empty() { "All Notes" } else { folder };
                    format!("Successfully listed notes from folder '{}'.", folder_name)
                });
                ToolResponse::success(message, json!({ "titles": listing.titles }))
            }
            Err(e) => failure(e),
        }
    }

    /// Fetch a note's body.
    pub fn note_content(&self, title: &str, folder: &str) -> ToolResponse {
        if title.is_empty() {
            return ToolResponse::error("Title parameter is required for get content operation.");
        }

        match self.store.note_body(title, folder) {
            Ok(content) => ToolResponse::success(
                format!("Successfully retrieved content for note '{}'.", title),
                json!({ "title": title, "content": content, "folder": folder }),
            ),
            Err(e) => failure(e),
        }
    }

    /// Fetch a note's body and reformat it with a registered pipeline.
    pub fn formatted_note(&self, title: &str, folder: &str, pipeline: &str) -> ToolResponse {
        if title.is_empty() {
            return ToolResponse::error("Title parameter is required for format operation.");
        }

        let pipeline = if pipeline.is_empty() {
            DEFAULT_PIPELINE
        } else {
            pipeline
        };
        let result = self
            .store
            .note_body(title, folder)
            .and_then(|body| self.registry.convert(pipeline, &body, &self.options));

        match result {
            Ok(converted) => ToolResponse::success(
                format!("Formatted note '{}' with pipeline '{}'.", title, pipeline),
                json!({
                    "title": title,
                    "folder": folder,
                    "pipeline": pipeline,
                    "mime_type": converted.mime_type,
                    "content": converted.content,
                }),
            ),
            Err(e) => failure(e),
        }
    }

    /// Route a tool call by name. Missing string arguments read as empty.
    pub fn dispatch(&self, tool_name: &str, arguments: &Value) -> ToolResponse {
        let arg = |key: &str| arguments.get(key).and_then(Value::as_str).unwrap_or("");
        let format = BodyFormat::from_arg(arg("input_format"));

        log::debug!("Dispatching tool call {}", tool_name);
        match tool_name {
            "create_apple_note" => {
                self.create_note(arg("title"), arg("content"), arg("folder"), format)
            }
            "append_to_apple_note" => {
                self.append_to_note(arg("title"), arg("content"), arg("folder"), format)
            }
            "list_apple_notes" => self.list_notes(arg("folder")),
            "get_apple_note_content" => self.note_content(arg("title"), arg("folder")),
            "format_apple_note" => {
                self.formatted_note(arg("title"), arg("folder"), arg("pipeline"))
            }
            _ => ToolResponse::error(format!("Unknown tool: {}", tool_name)),
        }
    }
}

/// Turn an error into an error response.
fn failure(err: Error) -> ToolResponse {
    if err.is_store_error() {
        log::warn!("Note store reported: {}", err);
    } else {
        log::error!("Tool call failed: {}", err);
    }
    ToolResponse::error(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::NoteListing;
    use crate::render::{RenderOptions, TimestampMode};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    #[derive(Default)]
    struct MemoryStore {
        notes: RefCell<BTreeMap<String, String>>,
    }

    impl NoteStore for MemoryStore {
        fn create_note(&self, title: &str, body: &str, _folder: &str) -> Result<String> {
            let title = if title.is_empty() { "New Note" } else { title };
            self.notes
                .borrow_mut()
                .insert(title.to_string(), body.to_string());
            Ok(format!("created {}", title))
        }

        fn append_to_note(&self, title: &str, _folder: &str, body: &str) -> Result<String> {
            let mut notes = self.notes.borrow_mut();
            let note = notes
                .get_mut(title)
                .ok_or_else(|| Error::NoteNotFound(title.to_string()))?;
            note.push_str(body);
            Ok("appended".to_string())
        }

        fn list_notes(&self, folder: &str) -> Result<NoteListing> {
            if folder == "Missing" {
                return Err(Error::FolderNotFound(folder.to_string()));
            }
            if folder == "Empty" {
                return Ok(NoteListing::empty_with_notice(
                    "信息：No notes found in folder 'Empty'.",
                ));
            }
            Ok(NoteListing::new(self.notes.borrow().keys().cloned().collect()))
        }

        fn note_body(&self, title: &str, _folder: &str) -> Result<String> {
            self.notes
                .borrow()
                .get(title)
                .cloned()
                .ok_or_else(|| Error::NoteNotFound(title.to_string()))
        }
    }

    fn service() -> NoteService<MemoryStore> {
        NoteService::new(MemoryStore::default())
    }

    #[test]
    fn test_create_note_messages() {
        let service = service();
        let response = service.create_note("Plan", "body", "", BodyFormat::Text);
        assert!(response.is_success());
        assert_eq!(response.message, "Note 'Plan' created successfully.");

        let response = service.create_note("", "body", "", BodyFormat::Text);
        assert_eq!(
            response.message,
            "Note 'Untitled (auto-generated)' created successfully."
        );
    }

    #[test]
    fn test_create_note_converts_markdown() {
        let service = service();
        service.create_note("Md", "# Hello", "", BodyFormat::Markdown);
        assert_eq!(
            service.store().note_body("Md", "").unwrap().trim(),
            "<h1>Hello</h1>"
        );

        let raw = NoteService::new(MemoryStore::default())
            .with_markdown_support(MarkdownSupport::Disabled);
        raw.create_note("Md", "# Hello", "", BodyFormat::Markdown);
        assert_eq!(raw.store().note_body("Md", "").unwrap(), "# Hello");
    }

    #[test]
    fn test_append_requires_title() {
        let response = service().append_to_note("", "x", "", BodyFormat::Text);
        assert_eq!(response.status, ToolStatus::Error);
        assert_eq!(
            response.message,
            "Title parameter is required for append operation."
        );
    }

    #[test]
    fn test_append_reports_store_error() {
        let response = service().append_to_note("Nope", "x", "", BodyFormat::Text);
        assert!(!response.is_success());
        assert_eq!(response.message, "Note not found: Nope");
    }

    #[test]
    fn test_list_notes() {
        let service = service();
        service.create_note("A", "1", "", BodyFormat::Text);
        service.create_note("B", "2", "", BodyFormat::Text);

        let response = service.list_notes("");
        assert_eq!(
            response.message,
            "Successfully listed notes from folder 'All Notes'."
        );
        assert_eq!(response.data, Some(json!({ "titles": ["A", "B"] })));

        let response = service.list_notes("Work");
        assert!(response.message.contains("'Work'"));
        assert!(!service.list_notes("Missing").is_success());
    }

    #[test]
    fn test_list_notes_passes_store_notice_through() {
        let response = service().list_notes("Empty");
        assert!(response.is_success());
        assert_eq!(response.message, "信息：No notes found in folder 'Empty'.");
        assert_eq!(response.data, Some(json!({ "titles": [] })));
    }

    #[test]
    fn test_note_content() {
        let service = service();
        service.create_note("A", "<div>body</div>", "", BodyFormat::Text);

        let response = service.note_content("A", "Notes");
        assert_eq!(response.message, "Successfully retrieved content for note 'A'.");
        assert_eq!(
            response.data,
            Some(json!({ "title": "A", "content": "<div>body</div>", "folder": "Notes" }))
        );

        let response = service.note_content("", "");
        assert_eq!(
            response.message,
            "Title parameter is required for get content operation."
        );
    }

    #[test]
    fn test_formatted_note() {
        let service = service().with_convert_options(ConvertOptions::new().with_render_options(
            RenderOptions::new().with_timestamp(TimestampMode::Omit),
        ));
        service.create_note(
            "Doc",
            r#"<div><span style="font-size:24px">Doc Title</span></div><div>Some content here that is long enough.</div>"#,
            "",
            BodyFormat::Text,
        );

        let response = service.formatted_note("Doc", "", "");
        assert!(response.is_success());
        let data = response.data.unwrap();
        assert_eq!(data["pipeline"], "html-detailed");
        assert!(data["content"].as_str().unwrap().contains("【 Doc Title 】"));

        let response = service.formatted_note("Doc", "", "pdf");
        assert_eq!(response.message, "Unknown pipeline: pdf");
    }

    #[test]
    fn test_dispatch() {
        let service = service();
        let response = service.dispatch(
            "create_apple_note",
            &json!({ "title": "T", "content": "**b**", "input_format": "markdown" }),
        );
        assert!(response.is_success());
        assert!(service
            .store()
            .note_body("T", "")
            .unwrap()
            .contains("<strong>b</strong>"));

        let response = service.dispatch("get_apple_note_content", &json!({ "title": "T" }));
        assert!(response.is_success());

        let response = service.dispatch("append_to_apple_note", &json!({}));
        assert!(!response.is_success());

        let response = service.dispatch("delete_everything", &json!({}));
        assert_eq!(response.message, "Unknown tool: delete_everything");
    }

    #[test]
    fn test_response_json() {
        let json = ToolResponse::error("bad").to_json().unwrap();
        assert_eq!(json, r#"{"status":"error","message":"bad"}"#);

        let json = ToolResponse::success("ok", json!({ "titles": [] }))
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"status":"success","message":"ok","data":{"titles":[]}}"#);
    }
}
