//! Document request and response types

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::common::{MoneyAmount, NamedContentBlock, RawObject, UserReference, null_as_default};
use crate::defaults;
use crate::execution::FilePart;

/// Numeric document status used by list filters and status changes.
///
/// Serialized as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DocumentStatusCode {
    Draft = 0,
    Sent = 1,
    Completed = 2,
    Uploaded = 3,
    Error = 4,
    Viewed = 5,
    WaitingApproval = 6,
    Approved = 7,
    Rejected = 8,
    WaitingPay = 9,
    Paid = 10,
    Voided = 11,
    Declined = 12,
    ExternalReview = 13,
}

impl DocumentStatusCode {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::Draft,
            1 => Self::Sent,
            2 => Self::Completed,
            3 => Self::Uploaded,
            4 => Self::Error,
            5 => Self::Viewed,
            6 => Self::WaitingApproval,
            7 => Self::Approved,
            8 => Self::Rejected,
            9 => Self::WaitingPay,
            10 => Self::Paid,
            11 => Self::Voided,
            12 => Self::Declined,
            13 => Self::ExternalReview,
            _ => return None,
        })
    }
}

impl fmt::Display for DocumentStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for DocumentStatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for DocumentStatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Self::from_code(code)
            .ok_or_else(|| de::Error::custom(format!("unknown document status code {code}")))
    }
}

/// Sort order for document listing. `*Desc` variants sort descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentOrderBy {
    Name,
    DateCreated,
    DateStatusChanged,
    DateOfLastAction,
    DateModified,
    DateSent,
    DateCompleted,
    DateExpiration,
    DateDeclined,
    Status,
    NameDesc,
    DateCreatedDesc,
    DateStatusChangedDesc,
    DateOfLastActionDesc,
    DateModifiedDesc,
    DateSentDesc,
    DateCompletedDesc,
    DateExpirationDesc,
    DateDeclinedDesc,
    StatusDesc,
}

impl DocumentOrderBy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::DateCreated => "date_created",
            Self::DateStatusChanged => "date_status_changed",
            Self::DateOfLastAction => "date_of_last_action",
            Self::DateModified => "date_modified",
            Self::DateSent => "date_sent",
            Self::DateCompleted => "date_completed",
            Self::DateExpiration => "date_expiration",
            Self::DateDeclined => "date_declined",
            Self::Status => "status",
            Self::NameDesc => "-name",
            Self::DateCreatedDesc => "-date_created",
            Self::DateStatusChangedDesc => "-date_status_changed",
            Self::DateOfLastActionDesc => "-date_of_last_action",
            Self::DateModifiedDesc => "-date_modified",
            Self::DateSentDesc => "-date_sent",
            Self::DateCompletedDesc => "-date_completed",
            Self::DateExpirationDesc => "-date_expiration",
            Self::DateDeclinedDesc => "-date_declined",
            Self::StatusDesc => "-status",
        }
    }
}

impl fmt::Display for DocumentOrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters for listing documents. Unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDocumentsOptions {
    pub template_id: Option<String>,
    pub form_id: Option<String>,
    pub folder_uuid: Option<String>,
    pub contact_id: Option<String>,
    /// Page size; zero is treated as unset
    pub count: Option<u32>,
    /// 1-based page number; zero is treated as unset
    pub page: Option<u32>,
    pub order_by: Option<DocumentOrderBy>,
    pub created_from: Option<String>,
    pub created_to: Option<String>,
    pub deleted: Option<bool>,
    pub id: Option<String>,
    pub completed_from: Option<String>,
    pub completed_to: Option<String>,
    pub membership_id: Option<String>,
    /// Sent as repeated `metadata=metadata_<key>=<value>` pairs, sorted by key
    pub metadata: BTreeMap<String, String>,
    pub modified_from: Option<String>,
    pub modified_to: Option<String>,
    /// Free-text search
    pub q: Option<String>,
    pub status: Option<DocumentStatusCode>,
    /// Exclude documents with this status
    pub status_not: Option<DocumentStatusCode>,
    pub tag: Option<String>,
}

impl ListDocumentsOptions {
    /// Options for the following page, keeping every other filter.
    ///
    /// An unset page counts as page 1 and an unset page size becomes 50.
    pub fn next_page(&self) -> Self {
        Self {
            page: Some(self.page.unwrap_or(1).saturating_add(1)),
            count: Some(self.count.unwrap_or(defaults::pagination::PAGE_SIZE)),
            ..self.clone()
        }
    }
}

/// Core document fields shared by several endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    pub uuid: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Status name such as `document.draft`
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub date_completed: Option<String>,
    pub expiration_date: Option<String>,
    pub version: Option<String>,
}

/// Returned by `GET /public/v1/documents/{id}`.
pub type DocumentStatusResponse = DocumentSummary;

/// Returned by the revert-to-draft endpoint.
pub type DocumentRevertToDraftResponse = DocumentSummary;

/// One page of the document listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentListResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub results: Vec<DocumentSummary>,
}

pub type DocumentCreateRequest = RawObject;
pub type DocumentUpdateRequest = RawObject;
pub type DocumentSendRequest = RawObject;
pub type CreateDocumentEditingSessionRequest = RawObject;
pub type CreateDocumentSessionRequest = RawObject;
pub type TransferDocumentOwnershipRequest = RawObject;
pub type TransferAllDocumentsOwnershipRequest = RawObject;
pub type AppendContentLibraryItemRequest = RawObject;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentLink {
    pub rel: Option<String>,
    pub href: Option<String>,
    #[serde(rename = "type")]
    pub link_type: Option<String>,
}

/// Returned when a document is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentCreateResponse {
    #[serde(flatten)]
    pub document: DocumentSummary,
    #[serde(deserialize_with = "null_as_default")]
    pub links: Vec<DocumentLink>,
    pub info_message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentField {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub merge_field: Option<String>,
    pub placeholder: Option<String>,
    pub field_id: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<String>,
    pub value: Option<Value>,
    pub assigned_to: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentToken {
    pub name: Option<String>,
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRecipient {
    pub id: Option<String>,
    pub contact_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub recipient_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub has_completed: bool,
}

/// Linked CRM object reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkedObject {
    pub id: Option<String>,
    pub provider: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplateReference {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// Returned by `GET /public/v1/documents/{id}/details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentDetailsResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    pub approval_execution: Option<Value>,
    pub autonumbering_sequence_name_prefix: Option<String>,
    pub content_date_modified: Option<String>,
    pub created_by: Option<UserReference>,
    pub date_completed: Option<String>,
    pub date_created: Option<String>,
    pub date_modified: Option<String>,
    pub date_sent: Option<String>,
    pub expiration_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub fields: Vec<DocumentField>,
    pub folder_uuid: Option<String>,
    pub grand_total: Option<MoneyAmount>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<NamedContentBlock>,
    #[serde(deserialize_with = "null_as_default")]
    pub linked_objects: Vec<LinkedObject>,
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: RawObject,
    pub pricing: Option<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub recipients: Vec<DocumentRecipient>,
    pub ref_number: Option<String>,
    pub sent_by: Option<UserReference>,
    #[serde(deserialize_with = "null_as_default")]
    pub tables: Vec<NamedContentBlock>,
    #[serde(deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub template: Option<DocumentTemplateReference>,
    #[serde(deserialize_with = "null_as_default")]
    pub texts: Vec<NamedContentBlock>,
    #[serde(deserialize_with = "null_as_default")]
    pub tokens: Vec<DocumentToken>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentESignDisclosure {
    #[serde(deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    pub company_name: Option<String>,
    pub esign_disclosure_text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentESignDisclosureResponse {
    pub result: Option<DocumentESignDisclosure>,
}

/// JSON body for `PATCH /public/v1/documents/{id}/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeDocumentStatusRequest {
    pub status: DocumentStatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_recipients: Option<bool>,
}

impl ChangeDocumentStatusRequest {
    pub fn new(status: DocumentStatusCode) -> Self {
        Self {
            status,
            note: None,
            notify_recipients: None,
        }
    }
}

/// Multipart status change that attaches a file.
///
/// Fields are sent as `status`, then `fields` in order, then `note` and
/// `notify_recipients` when set.
#[derive(Debug)]
pub struct ChangeDocumentStatusWithUploadRequest {
    pub status: DocumentStatusCode,
    pub note: Option<String>,
    pub notify_recipients: Option<bool>,
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

impl ChangeDocumentStatusWithUploadRequest {
    pub fn new(status: DocumentStatusCode, file: FilePart) -> Self {
        Self {
            status,
            note: None,
            notify_recipients: None,
            file,
            fields: Vec::new(),
        }
    }
}

/// Multipart upload that creates a document from a file.
#[derive(Debug)]
pub struct CreateDocumentFromUploadRequest {
    /// Field name defaults to `file` when blank
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

impl CreateDocumentFromUploadRequest {
    pub fn new(file: FilePart) -> Self {
        Self {
            file,
            fields: Vec::new(),
        }
    }

    /// Append a plain form field sent before the file.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSendResponse {
    #[serde(flatten)]
    pub document: DocumentSummary,
    #[serde(deserialize_with = "null_as_default")]
    pub recipients: Vec<DocumentRecipient>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDocumentEditingSessionResponse {
    pub id: Option<String>,
    pub token: Option<String>,
    pub key: Option<String>,
    pub email: Option<String>,
    pub expires_at: Option<String>,
    pub document_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateDocumentSessionResponse {
    pub id: Option<String>,
    pub expires_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppendContentLibraryItemResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub block_mapping: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cli: RawObject,
}
