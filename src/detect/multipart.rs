//! Minimal multipart/form-data body builder.
//!
//! ureq has no multipart support, and the detection service wants exactly two
//! parts per request (a PNG file and a text field), so the body is assembled
//! by hand per RFC 7578.

use rand::RngCore;

pub(crate) struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    pub(crate) fn new() -> Self {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        let boundary = format!("camwatch-{:032x}", u128::from_le_bytes(bytes));
        Self {
            boundary,
            body: Vec::new(),
        }
    }

    pub(crate) fn add_text(&mut self, name: &str, value: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    pub(crate) fn add_file(&mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
    }

    /// Close the body and return `(content_type_header, body)`.
    pub(crate) fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        let content_type = format!("multipart/form-data; boundary={}", self.boundary);
        (content_type, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_frames_both_parts_with_the_boundary() {
        let mut form = MultipartForm::new();
        form.add_text("min_confidence", "0.4");
        form.add_file("image", "frame.png", "image/png", b"\x89PNGdata");
        let (content_type, body) = form.finish();

        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .expect("boundary parameter");
        let text = String::from_utf8_lossy(&body);

        assert_eq!(text.matches(&format!("--{}\r\n", boundary)).count(), 2);
        assert!(text.contains("Content-Disposition: form-data; name=\"min_confidence\"\r\n\r\n0.4"));
        assert!(text
            .contains("Content-Disposition: form-data; name=\"image\"; filename=\"frame.png\""));
        assert!(text.contains("Content-Type: image/png"));
        assert!(text.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[test]
    fn boundaries_are_unique_per_form() {
        let (a, _) = MultipartForm::new().finish();
        let (b, _) = MultipartForm::new().finish();
        assert_ne!(a, b);
    }
}
