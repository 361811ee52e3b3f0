//! Documents API

use reqwest::StatusCode;

use super::QueryPairs;
use crate::client::Client;
use crate::defaults;
use crate::error::Result;
use crate::execution::{DownloadResponse, MultipartPayload, RequestDescriptor, escape_path_param};
use crate::types::{
    AppendContentLibraryItemRequest, AppendContentLibraryItemResponse,
    ChangeDocumentStatusRequest, ChangeDocumentStatusWithUploadRequest,
    CreateDocumentEditingSessionRequest, CreateDocumentEditingSessionResponse,
    CreateDocumentFromUploadRequest, CreateDocumentSessionRequest, CreateDocumentSessionResponse,
    DocumentCreateRequest, DocumentCreateResponse, DocumentDetailsResponse,
    DocumentESignDisclosureResponse, DocumentListResponse, DocumentRevertToDraftResponse,
    DocumentSendRequest, DocumentSendResponse, DocumentStatusResponse, DocumentUpdateRequest,
    ListDocumentsOptions, TransferAllDocumentsOwnershipRequest, TransferDocumentOwnershipRequest,
};

const DOCUMENTS_PATH: &str = "/public/v1/documents";

/// Document operations, obtained from [`Client::documents`].
#[derive(Debug, Clone, Copy)]
pub struct DocumentsService<'a> {
    client: &'a Client,
}

impl<'a> DocumentsService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List or search documents.
    pub async fn list(&self, opts: &ListDocumentsOptions) -> Result<DocumentListResponse> {
        let request = RequestDescriptor::get(DOCUMENTS_PATH).queries(list_query(opts));
        self.client.fetch(request).await
    }

    /// Create a document from a JSON payload.
    pub async fn create(&self, body: &DocumentCreateRequest) -> Result<DocumentCreateResponse> {
        let request = RequestDescriptor::post(DOCUMENTS_PATH)
            .json(body)
            .expect_status(StatusCode::CREATED);
        self.client.fetch(request).await
    }

    /// Create a document by uploading a file.
    pub async fn create_from_upload(
        &self,
        upload: CreateDocumentFromUploadRequest,
    ) -> Result<DocumentCreateResponse> {
        let payload = MultipartPayload::new()
            .fields(upload.fields)
            .file(upload.file);
        let request = RequestDescriptor::post(format!("{DOCUMENTS_PATH}?upload"))
            .multipart(payload)
            .expect_status(StatusCode::CREATED);
        self.client.fetch(request).await
    }

    pub async fn status(&self, id: &str) -> Result<DocumentStatusResponse> {
        let request = RequestDescriptor::get(document_path(id, "")?);
        self.client.fetch(request).await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let request =
            RequestDescriptor::delete(document_path(id, "")?).expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    pub async fn update(&self, id: &str, body: &DocumentUpdateRequest) -> Result<()> {
        let request = RequestDescriptor::patch(document_path(id, "")?)
            .json(body)
            .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    pub async fn esign_disclosure(&self, id: &str) -> Result<DocumentESignDisclosureResponse> {
        let request = RequestDescriptor::get(document_path(id, "/esign-disclosure")?);
        self.client.fetch(request).await
    }

    pub async fn change_status(&self, id: &str, body: &ChangeDocumentStatusRequest) -> Result<()> {
        let request = RequestDescriptor::patch(document_path(id, "/status")?)
            .json(body)
            .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    /// Change the status and attach a file in one multipart request.
    pub async fn change_status_with_upload(
        &self,
        id: &str,
        upload: ChangeDocumentStatusWithUploadRequest,
    ) -> Result<()> {
        let path = document_path(id, "/status?upload")?;
        // Caller fields override `status`; `note` and `notify_recipients` override caller fields
        let mut payload =
            MultipartPayload::new().field("status", upload.status.code().to_string());
        for (name, value) in upload.fields {
            payload = payload.set_field(name, value);
        }
        if let Some(note) = upload.note.filter(|n| !n.is_empty()) {
            payload = payload.set_field("note", note);
        }
        if let Some(notify) = upload.notify_recipients {
            payload = payload.set_field("notify_recipients", notify.to_string());
        }
        let request = RequestDescriptor::patch(path)
            .multipart(payload.file(upload.file))
            .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    pub async fn revert_to_draft(&self, id: &str) -> Result<DocumentRevertToDraftResponse> {
        let request = RequestDescriptor::post(document_path(id, "/draft")?);
        self.client.fetch(request).await
    }

    pub async fn details(&self, id: &str) -> Result<DocumentDetailsResponse> {
        let request = RequestDescriptor::get(document_path(id, "/details")?);
        self.client.fetch(request).await
    }

    pub async fn send(&self, id: &str, body: &DocumentSendRequest) -> Result<DocumentSendResponse> {
        let request = RequestDescriptor::post(document_path(id, "/send")?).json(body);
        self.client.fetch(request).await
    }

    pub async fn create_editing_session(
        &self,
        id: &str,
        body: &CreateDocumentEditingSessionRequest,
    ) -> Result<CreateDocumentEditingSessionResponse> {
        let request = RequestDescriptor::post(document_path(id, "/editing-sessions")?)
            .json(body)
            .expect_status(StatusCode::CREATED);
        self.client.fetch(request).await
    }

    /// Create an embedded signing session.
    pub async fn create_session(
        &self,
        id: &str,
        body: &CreateDocumentSessionRequest,
    ) -> Result<CreateDocumentSessionResponse> {
        let request = RequestDescriptor::post(document_path(id, "/session")?)
            .json(body)
            .expect_status(StatusCode::CREATED);
        self.client.fetch(request).await
    }

    /// Download the document PDF. The body is streamed to the caller.
    pub async fn download(&self, id: &str) -> Result<DownloadResponse> {
        let request = RequestDescriptor::get(document_path(id, "/download")?)
            .accept(defaults::http::ACCEPT_PDF);
        self.client.download(request).await
    }

    /// Download the completed, certificate-protected PDF.
    pub async fn download_protected(&self, id: &str) -> Result<DownloadResponse> {
        let request = RequestDescriptor::get(document_path(id, "/download-protected")?)
            .accept(defaults::http::ACCEPT_PDF);
        self.client.download(request).await
    }

    pub async fn transfer_ownership(
        &self,
        id: &str,
        body: &TransferDocumentOwnershipRequest,
    ) -> Result<()> {
        let request = RequestDescriptor::patch(document_path(id, "/ownership")?)
            .json(body)
            .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    /// Transfer ownership of every document of one member to another.
    pub async fn transfer_all_ownership(
        &self,
        body: &TransferAllDocumentsOwnershipRequest,
    ) -> Result<()> {
        let request = RequestDescriptor::patch(format!("{DOCUMENTS_PATH}/ownership"))
            .json(body)
            .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    pub async fn move_to_folder(&self, id: &str, folder_id: &str) -> Result<()> {
        let folder = escape_path_param("folder_id", folder_id)?;
        let request =
            RequestDescriptor::post(document_path(id, &format!("/move-to-folder/{folder}"))?)
                .expect_status(StatusCode::NO_CONTENT);
        self.client.execute_no_content(request).await
    }

    pub async fn append_content_library_item(
        &self,
        id: &str,
        body: &AppendContentLibraryItemRequest,
    ) -> Result<AppendContentLibraryItemResponse> {
        let request = RequestDescriptor::post(document_path(id, "/append-content-library-item")?)
            .json(body)
            .expect_status(StatusCode::CREATED);
        self.client.fetch(request).await
    }
}

fn document_path(id: &str, suffix: &str) -> Result<String> {
    let id = escape_path_param("id", id)?;
    Ok(format!("{DOCUMENTS_PATH}/{id}{suffix}"))
}

fn list_query(opts: &ListDocumentsOptions) -> Vec<(String, String)> {
    let mut query = QueryPairs::new();
    query.set_if_not_empty("template_id", opts.template_id.as_deref());
    query.set_if_not_empty("form_id", opts.form_id.as_deref());
    query.set_if_not_empty("folder_uuid", opts.folder_uuid.as_deref());
    query.set_if_not_empty("contact_id", opts.contact_id.as_deref());
    query.set_if_positive("count", opts.count);
    query.set_if_positive("page", opts.page);
    query.set_if_not_empty("order_by", opts.order_by.map(|o| o.as_str()));
    query.set_if_not_empty("created_from", opts.created_from.as_deref());
    query.set_if_not_empty("created_to", opts.created_to.as_deref());
    query.set_bool("deleted", opts.deleted);
    query.set_if_not_empty("id", opts.id.as_deref());
    query.set_if_not_empty("completed_from", opts.completed_from.as_deref());
    query.set_if_not_empty("completed_to", opts.completed_to.as_deref());
    query.set_if_not_empty("membership_id", opts.membership_id.as_deref());
    // BTreeMap iterates in key order
    for (key, value) in &opts.metadata {
        query.add("metadata", format!("metadata_{key}={value}"));
    }
    query.set_if_not_empty("modified_from", opts.modified_from.as_deref());
    query.set_if_not_empty("modified_to", opts.modified_to.as_deref());
    query.set_if_not_empty("q", opts.q.as_deref());
    if let Some(status) = opts.status {
        query.add("status", status.code().to_string());
    }
    if let Some(status) = opts.status_not {
        query.add("status__ne", status.code().to_string());
    }
    query.set_if_not_empty("tag", opts.tag.as_deref());
    query.into_pairs()
}
