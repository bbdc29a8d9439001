//! # PalliCare Client
//!
//! Client SDK for the PalliCare palliative-care doctors' network: the
//! authentication/session lifecycle, discussion forum, resource library,
//! member directory, blog/news, and palliative-unit lookup, together with
//! the shared client-side state reconciliation used across those surfaces.
//!
//! ## Features
//!
//! - **Single HTTP engine**: every call flows through one configured client
//!   that attaches the bearer header, negotiates content type, tags requests
//!   with correlation ids, and classifies failures into a uniform error
//! - **Session lifecycle**: token and identity entries behind one storage
//!   seam, torn down together on logout or an unauthorized response
//! - **Typed error taxonomy**: `NETWORK_ERROR` through `REQUEST_CONFIG_ERROR`,
//!   with server messages preserved when present
//! - **Engagement reconciliation**: optimistic like/dislike toggles with a
//!   pending state and deterministic rollback on partial failure
//! - **Comment trees**: two-level comment/reply composition with flagged
//!   placeholders replaced by authoritative refetches
//! - **Debounced search**: burst collapsing with stale-response discard
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pallicare::{ClientConfig, PalliCareClient};
//!
//! #[tokio::main]
//! async fn main() -> pallicare::Result<()> {
//!     pallicare::logging::init();
//!
//!     let client = PalliCareClient::new(ClientConfig::from_env())?;
//!     let session = client.users().login("doctor@clinic.org", "secret1").await?;
//!     println!("signed in as {}", session.user.name);
//!
//!     let threads = client.threads().search("opioid rotation").await?;
//!     for thread in threads {
//!         println!("{}: {}", thread.id, thread.title);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod comments;
pub mod config;
pub mod endpoints;
pub mod engagement;
pub mod error;
pub mod http;
pub mod logging;
pub mod models;
pub mod search;
pub mod session;
pub mod token;
pub mod validate;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exports for ergonomic API
pub use api::{
    BlogApi, ListFallback, MembersApi, PalliCareClient, ResourcesApi, SortOrder, ThreadQuery,
    ThreadsApi, UnitsApi, UsersApi,
};
pub use comments::CommentThread;
pub use config::{ApiMode, ClientConfig};
pub use engagement::{
    Engagement, EngagementState, EngagementTracker, Reaction, TogglePlan,
};
pub use error::{ApiError, ErrorCode, Result};
pub use http::{HttpClient, RequestBody, RequestDescriptor};
pub use models::{
    Ack, AuthSession, AuthorRef, BlogPost, Comment, Doctor, Mutated, NewResource, NewThread,
    NewUser, PalliativeUnit, ProfileUpdate, Reply, ResourceItem, ResourceUpdate, Thread,
    ThreadUpdate, User, UserSummary,
};
pub use search::{SearchSession, SearchTicket};
pub use session::{FileSessionStore, MemorySessionStore, SessionStore, StoreError};
pub use token::{TokenClaims, TokenManager};
