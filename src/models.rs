//! Wire-shape types shared by the domain API modules
//!
//! Collection fields the backend may omit default to empty, and fields whose
//! shape varies across endpoints (embedded author vs bare id, full entity vs
//! acknowledgement) are modeled explicitly instead of being guessed at per
//! call site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engagement::Engagement;

/// Minimal embedded author object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Profile photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Author reference: some endpoints embed a summary object, others return a
/// bare id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuthorRef {
    /// Embedded author summary
    Embedded(UserSummary),
    /// Bare user id
    Id(String),
}

impl AuthorRef {
    /// The author's user id in either shape
    pub fn id(&self) -> &str {
        match self {
            Self::Embedded(user) => &user.id,
            Self::Id(id) => id,
        }
    }

    /// The display name, when the author was embedded
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Embedded(user) => Some(&user.name),
            Self::Id(_) => None,
        }
    }
}

/// Full member profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Medical specialty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Affiliated hospital or unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    /// Profile photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    /// Whether the account passed activation
    #[serde(default)]
    pub verified: bool,
}

/// Successful login / registration payload
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent requests
    pub token: String,
    /// The authenticated user
    pub user: User,
}

/// Token-only payload from a session refresh
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    /// Fresh bearer token
    pub token: String,
}

/// Bare acknowledgement body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    /// Server-reported success flag, when present
    #[serde(default)]
    pub success: Option<bool>,
    /// Server-supplied message, when present
    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a mutation: either the full updated entity or a bare
/// acknowledgement, depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Mutated<T> {
    /// Full updated entity
    Entity(T),
    /// Acknowledgement only; callers refetch when they need fresh state
    Ack(Ack),
}

impl<T> Mutated<T> {
    /// The updated entity, when the server returned one
    pub fn entity(self) -> Option<T> {
        match self {
            Self::Entity(entity) => Some(entity),
            Self::Ack(_) => None,
        }
    }
}

/// A reply nested under a comment. Replies carry no children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reply {
    /// Reply id
    pub id: String,
    /// Author reference
    pub author: AuthorRef,
    /// Reply body
    pub content: String,
    /// Like/dislike membership
    #[serde(default)]
    pub engagement: Engagement,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last edit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A top-level comment with its replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment id
    pub id: String,
    /// Author reference
    pub author: AuthorRef,
    /// Comment body
    pub content: String,
    /// Like/dislike membership
    #[serde(default)]
    pub engagement: Engagement,
    /// Nested replies (exactly one level deep)
    #[serde(default)]
    pub replies: Vec<Reply>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last edit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A forum thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thread {
    /// Thread id
    pub id: String,
    /// Title
    pub title: String,
    /// Body
    pub content: String,
    /// Author reference
    pub author: AuthorRef,
    /// Topic tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Upvote/downvote membership
    #[serde(default, alias = "engagement")]
    pub votes: Engagement,
    /// Share count
    #[serde(default)]
    pub shares: u64,
    /// Comments with replies
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last edit time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A blog / news post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Post id
    pub id: String,
    /// Title
    pub title: String,
    /// Body
    #[serde(alias = "content")]
    pub body: String,
    /// Author reference
    pub author: AuthorRef,
    /// Topic tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Like/dislike membership
    #[serde(default)]
    pub engagement: Engagement,
    /// Comments with replies
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Publication time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

/// A resource library entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceItem {
    /// Resource id
    pub id: String,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Download URL for the attached file, when one was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    /// Uploader reference
    pub uploaded_by: AuthorRef,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A member directory entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    /// User id
    pub id: String,
    /// Display name
    pub name: String,
    /// Medical specialty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Affiliated hospital or unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    /// City
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Profile photo URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A palliative-care unit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PalliativeUnit {
    /// Unit id
    pub id: String,
    /// Unit name
    pub name: String,
    /// City
    pub city: String,
    /// Street address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Offered services
    #[serde(default)]
    pub services: Vec<String>,
}

/// Registration payload
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Password (validated client-side before dispatch)
    pub password: String,
    /// Medical specialty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Affiliated hospital or unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
}

/// Profile edit payload; unset fields are left untouched server-side
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New specialty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// New hospital
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
}

/// Thread creation payload
#[derive(Debug, Clone, Serialize)]
pub struct NewThread {
    /// Title
    pub title: String,
    /// Body
    pub content: String,
    /// Acting user id
    pub author_id: String,
    /// Topic tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Thread edit payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThreadUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Replacement tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Resource creation payload (file attached separately as multipart)
#[derive(Debug, Clone, Serialize)]
pub struct NewResource {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Category label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Acting user id
    pub uploaded_by: String,
}

/// Resource edit payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceUpdate {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
