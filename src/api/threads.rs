//! Discussion forum operations
//!
//! Thread CRUD, voting, sharing, filtered listing and search, and the
//! nested comment/reply operations. Vote and reaction endpoints are
//! single-reaction toggle calls; switching reactions therefore takes two
//! calls, orchestrated through [`crate::engagement::execute_toggle`] so a
//! partial failure leaves only server-confirmed state behind.

use serde_json::{json, Value};

use crate::endpoints::threads as paths;
use crate::engagement::{execute_toggle, Engagement, EngagementTracker, Reaction};
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{Ack, Comment, Mutated, NewThread, Reply, Thread, ThreadUpdate};

/// Sort orders accepted by the thread listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recent first
    Newest,
    /// Oldest first
    Oldest,
    /// Highest vote balance first
    MostVoted,
}

impl SortOrder {
    fn as_param(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::MostVoted => "most_voted",
        }
    }
}

/// Composable filter for the thread listing
#[derive(Debug, Clone, Default)]
pub struct ThreadQuery {
    /// Restrict to a category
    pub category: Option<String>,
    /// Restrict to a tag
    pub tag: Option<String>,
    /// Sort order
    pub sort: Option<SortOrder>,
    /// Page number (1-based)
    pub page: Option<u32>,
}

impl ThreadQuery {
    /// Empty filter: the full unfiltered listing
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Restrict to a tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set the sort order
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Select a page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category", category.clone()));
        }
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.clone()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_param().to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        params
    }
}

/// Handle for forum operations
pub struct ThreadsApi<'a> {
    http: &'a HttpClient,
}

impl<'a> ThreadsApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// List threads through a composed filter
    pub async fn list(&self, query: &ThreadQuery) -> Result<Vec<Thread>> {
        self.http.get_query(paths::LIST, &query.to_params()).await
    }

    /// Search threads.
    ///
    /// An empty query returns the full unfiltered listing.
    pub async fn search(&self, query: &str) -> Result<Vec<Thread>> {
        if query.is_empty() {
            return self.list(&ThreadQuery::new()).await;
        }
        self.http
            .get_query(paths::SEARCH, &[("q", query.to_string())])
            .await
    }

    /// Fetch one thread with its comments
    pub async fn get(&self, thread_id: &str) -> Result<Thread> {
        self.http.get(&paths::thread(thread_id)).await
    }

    /// Create a thread
    pub async fn create(&self, new_thread: &NewThread) -> Result<Mutated<Thread>> {
        self.http.post(paths::CREATE, new_thread).await
    }

    /// Edit a thread
    pub async fn edit(&self, thread_id: &str, update: &ThreadUpdate) -> Result<Mutated<Thread>> {
        self.http.put(&paths::thread(thread_id), update).await
    }

    /// Delete a thread
    pub async fn delete(&self, thread_id: &str) -> Result<Ack> {
        self.http.delete(&paths::thread(thread_id)).await
    }

    /// Record a share of a thread
    pub async fn share(&self, thread_id: &str, user_id: &str) -> Result<Ack> {
        self.http
            .post(&paths::share(thread_id), &json!({ "user_id": user_id }))
            .await
    }

    /// Toggle an up/down vote, reconciling through the tracker.
    ///
    /// `Reaction::Like` is an upvote, `Reaction::Dislike` a downvote.
    pub async fn toggle_vote(
        &self,
        tracker: &EngagementTracker,
        thread_id: &str,
        user_id: &str,
        requested: Reaction,
    ) -> Result<Engagement> {
        execute_toggle(tracker, thread_id, user_id, requested, |reaction| {
            let path = match reaction {
                Reaction::Like => paths::upvote(thread_id),
                Reaction::Dislike => paths::downvote(thread_id),
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

    /// Add a comment to a thread
    pub async fn add_comment(
        &self,
        thread_id: &str,
        author_id: &str,
        content: &str,
    ) -> Result<Mutated<Comment>> {
        self.http
            .post(
                &paths::comments(thread_id),
                &json!({ "author_id": author_id, "content": content }),
            )
            .await
    }

    /// Edit a comment
    pub async fn edit_comment(
        &self,
        thread_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Mutated<Comment>> {
        self.http
            .put(
                &paths::comment(thread_id, comment_id),
                &json!({ "content": content }),
            )
            .await
    }

    /// Delete a comment
    pub async fn delete_comment(&self, thread_id: &str, comment_id: &str) -> Result<Ack> {
        self.http.delete(&paths::comment(thread_id, comment_id)).await
    }

    /// Toggle a like/dislike on a comment, reconciling through the tracker.
    ///
    /// Track comment engagement under the comment id.
    pub async fn toggle_comment_reaction(
        &self,
        tracker: &EngagementTracker,
        thread_id: &str,
        comment_id: &str,
        user_id: &str,
        requested: Reaction,
    ) -> Result<Engagement> {
        execute_toggle(tracker, comment_id, user_id, requested, |reaction| {
            let path = match reaction {
                Reaction::Like => paths::comment_like(thread_id, comment_id),
                Reaction::Dislike => paths::comment_dislike(thread_id, comment_id),
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

    /// Add a reply under a comment
    pub async fn add_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        author_id: &str,
        content: &str,
    ) -> Result<Mutated<Reply>> {
        self.http
            .post(
                &paths::replies(thread_id, comment_id),
                &json!({ "author_id": author_id, "content": content }),
            )
            .await
    }

    /// Edit a reply
    pub async fn edit_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
        content: &str,
    ) -> Result<Mutated<Reply>> {
        self.http
            .put(
                &paths::reply(thread_id, comment_id, reply_id),
                &json!({ "content": content }),
            )
            .await
    }

    /// Delete a reply
    pub async fn delete_reply(
        &self,
        thread_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<Ack> {
        self.http
            .delete(&paths::reply(thread_id, comment_id, reply_id))
            .await
    }
}
