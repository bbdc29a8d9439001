//! Comment/reply tree composition
//!
//! Comment creation is optimistic: a placeholder node with a flagged
//! temporary id is shown while the create call is in flight, and the
//! authoritative parent refetch replaces the whole list so the real record
//! (real id, populated author) appears exactly once.
//!
//! The tree is exactly two levels deep; [`crate::models::Reply`] carries no
//! children, so deeper nesting and reply promotion cannot be represented.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{AuthorRef, Comment, Reply};

/// Prefix flagging a locally assigned placeholder id
pub const TEMP_ID_PREFIX: &str = "temp-";

/// Generate a flagged placeholder id
pub fn placeholder_id() -> String {
    format!("{}{}", TEMP_ID_PREFIX, Uuid::new_v4())
}

/// Whether an id is a local placeholder
pub fn is_placeholder(id: &str) -> bool {
    id.starts_with(TEMP_ID_PREFIX)
}

/// Local view of one entity's comment list with optimistic placeholders.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
}

impl CommentThread {
    /// Build from a fetched comment list
    pub fn new(comments: Vec<Comment>) -> Self {
        Self { comments }
    }

    /// Current comments, placeholders included
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Find a comment by id
    pub fn find(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == id)
    }

    /// Whether any placeholder is still awaiting its authoritative record
    pub fn has_placeholders(&self) -> bool {
        self.comments
            .iter()
            .any(|c| is_placeholder(&c.id) || c.replies.iter().any(|r| is_placeholder(&r.id)))
    }

    /// Append an optimistic top-level comment; returns its placeholder id
    pub fn insert_placeholder(&mut self, author: AuthorRef, content: &str) -> String {
        let id = placeholder_id();
        self.comments.push(Comment {
            id: id.clone(),
            author,
            content: content.to_string(),
            engagement: Default::default(),
            replies: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        });
        id
    }

    /// Append an optimistic reply under a top-level comment.
    ///
    /// Returns `None` when the target id is unknown or names a reply;
    /// replies never nest further.
    pub fn insert_reply_placeholder(
        &mut self,
        comment_id: &str,
        author: AuthorRef,
        content: &str,
    ) -> Option<String> {
        let parent = self.comments.iter_mut().find(|c| c.id == comment_id)?;
        let id = placeholder_id();
        parent.replies.push(Reply {
            id: id.clone(),
            author,
            content: content.to_string(),
            engagement: Default::default(),
            created_at: Utc::now(),
            updated_at: None,
        });
        Some(id)
    }

    /// Replace the whole list with the authoritative refetch result.
    ///
    /// Placeholders are dropped wholesale rather than merged; the server
    /// list is the only source of real ids and populated authors.
    pub fn reconcile(&mut self, authoritative: Vec<Comment>) {
        self.comments = authoritative;
    }

    /// Drop a placeholder whose create call failed
    pub fn discard_placeholder(&mut self, placeholder: &str) {
        self.comments.retain(|c| c.id != placeholder);
        for comment in &mut self.comments {
            comment.replies.retain(|r| r.id != placeholder);
        }
    }
}
