//! Upload transport
//!
//! The controller only sees [`GenerateTransport`]; the browser implementation
//! posts a multipart form with `fetch`.

use async_trait::async_trait;
use flashcards_protocol::{Difficulty, DIFFICULTY_FIELD, FILE_FIELD};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, File, FormData, Request, RequestInit, Response};

use crate::error::TransportError;

/// A file handle that knows its display name
pub trait NamedFile {
    fn name(&self) -> String;
}

impl NamedFile for File {
    fn name(&self) -> String {
        Self::name(self)
    }
}

/// One submission: the chosen document and the difficulty hint
#[derive(Debug)]
pub struct UploadRequest<F> {
    pub file: F,
    pub difficulty: Difficulty,
}

/// Raw reply to a POST, before the body is interpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

#[async_trait(?Send)]
pub trait GenerateTransport {
    type File: NamedFile;

    /// POST `request` to `endpoint` as a multipart form.
    /// No timeout or retry; the platform decides when the call fails.
    async fn post_generate(
        &self,
        endpoint: &str,
        request: &UploadRequest<Self::File>,
    ) -> Result<HttpReply, TransportError>;
}

/// `window.fetch` with a `FormData` body
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl GenerateTransport for FetchTransport {
    type File = File;

    async fn post_generate(
        &self,
        endpoint: &str,
        request: &UploadRequest<File>,
    ) -> Result<HttpReply, TransportError> {
        let win = window().ok_or_else(|| TransportError::new("No window"))?;

        let form = FormData::new()?;
        form.append_with_blob_and_filename(FILE_FIELD, &request.file, &request.file.name())?;
        form.append_with_str(DIFFICULTY_FIELD, request.difficulty.as_str())?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);
        let req = Request::new_with_str_and_init(endpoint, &init)?;

        let resp_val = JsFuture::from(win.fetch_with_request(&req)).await?;
        let resp: Response = resp_val.dyn_into()?;
        let status = resp.status();

        let body = JsFuture::from(resp.text()?).await?;
        Ok(HttpReply {
            status,
            body: body.as_string().unwrap_or_default(),
        })
    }
}
