//! Blog / news operations
//!
//! Post listing, search and tag filtering, reactions, and the comment
//! operations shared with the forum surface.

use serde_json::{json, Value};

use crate::endpoints::blog as paths;
use crate::engagement::{execute_toggle, Engagement, EngagementTracker, Reaction};
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{Ack, BlogPost, Comment, Mutated};

/// Handle for blog operations
pub struct BlogApi<'a> {
    http: &'a HttpClient,
}

impl<'a> BlogApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// List posts
    pub async fn list(&self) -> Result<Vec<BlogPost>> {
        self.http.get(paths::LIST).await
    }

    /// List posts carrying a tag
    pub async fn filter_by_tag(&self, tag: &str) -> Result<Vec<BlogPost>> {
        self.http
            .get_query(paths::LIST, &[("tag", tag.to_string())])
            .await
    }

    /// Search posts; an empty query returns the full listing
    pub async fn search(&self, query: &str) -> Result<Vec<BlogPost>> {
        if query.is_empty() {
            return self.list().await;
        }
        self.http
            .get_query(paths::SEARCH, &[("q", query.to_string())])
            .await
    }

    /// Fetch one post with its comments
    pub async fn get(&self, post_id: &str) -> Result<BlogPost> {
        self.http.get(&paths::post(post_id)).await
    }

    /// Toggle a like/dislike on a post, reconciling through the tracker
    pub async fn toggle_reaction(
        &self,
        tracker: &EngagementTracker,
        post_id: &str,
        user_id: &str,
        requested: Reaction,
    ) -> Result<Engagement> {
        execute_toggle(tracker, post_id, user_id, requested, |reaction| {
            let path = match reaction {
                Reaction::Like => paths::like(post_id),
                Reaction::Dislike => paths::dislike(post_id),
            };
            let http = self.http;
            async move {
                http.post::<Value, _>(&path, &json!({ "user_id": user_id }))
                    .await
                    .map(|_| ())
            }
        })
        .await
    }

    /// Add a comment to a post
    pub async fn add_comment(
        &self,
        post_id: &str,
        author_id: &str,
        content: &str,
    ) -> Result<Mutated<Comment>> {
        self.http
            .post(
                &paths::comments(post_id),
                &json!({ "author_id": author_id, "content": content }),
            )
            .await
    }

    /// Edit a comment
    pub async fn edit_comment(
        &self,
        post_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Mutated<Comment>> {
        self.http
            .put(
                &paths::comment(post_id, comment_id),
                &json!({ "content": content }),
            )
            .await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, post_id: &str, comment_id: &str) -> Result<Ack> {
        self.http.delete(&paths::comment(post_id, comment_id)).await
    }

    /// Toggle a like/dislike on a comment, tracked under the comment id
    pub async fn toggle_comment_reaction(
        &self,
        tracker: &EngagementTracker,
        post_id: &str,
        comment_id: &str,
        user_id: &str,
        requested: Reaction,
    ) -> Result<Engagement> {
        execute_toggle(tracker, comment_id, user_id, requested, |reaction| {
            let path = match reaction {
                Reaction::Like => paths::comment_like(post_id, comment_id),
                Reaction::Dislike => paths::comment_dislike(post_id, comment_id),
            };
            let http = self.http;
            async move {
                http.post::<Value, _>(&path, &json!({ "user_id": user_id }))
                    .await
                    .map(|_| ())
            }
        })
        .await
    }
}
