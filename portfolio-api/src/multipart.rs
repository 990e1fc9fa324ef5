// portfolio-api/src/multipart.rs
//! Multipart form payloads for file uploads.
//!
//! The form is plain data: the transport turns it into a wire body and picks
//! the boundary, so nothing here knows about `multipart/form-data` framing.

/// A file selected by the caller, passed in as bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            data,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// File entry of a form, stored under its field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub field_name: String,
    pub file: FileUpload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<(String, String)>,
    file: Option<FilePart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field; repeated names are kept in order
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Attach the file under `field_name`. A form holds at most one file;
    /// attaching again replaces the previous one.
    pub fn file(mut self, field_name: impl Into<String>, file: FileUpload) -> Self {
        self.file = Some(FilePart {
            field_name: field_name.into(),
            file,
        });
        self
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn file_part(&self) -> Option<&FilePart> {
        self.file.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_insertion_order() {
        let form = MultipartForm::new().text("b", "2").text("a", "1").text("b", "3");
        let names: Vec<&str> = form.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "b"]);
        assert!(form.file_part().is_none());
    }

    #[test]
    fn test_second_file_replaces_first() {
        let form = MultipartForm::new()
            .file("image", FileUpload::new("a.png", vec![1]))
            .file("image", FileUpload::new("b.png", vec![2]));
        let part = form.file_part().unwrap();
        assert_eq!(part.field_name, "image");
        assert_eq!(part.file.file_name, "b.png");
    }
}
