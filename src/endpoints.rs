//! Endpoint registries
//!
//! Static maps from logical operation names to backend path strings, one
//! module per domain area. These are configuration data owned by the backend
//! contract; paths are joined onto the resolved base origin by the HTTP
//! client.

/// User account operations
pub mod users {
    /// Register a new account
    pub const REGISTER: &str = "/users/register";
    /// Exchange credentials for a session
    pub const LOGIN: &str = "/users/login";
    /// Invalidate the server-side session
    pub const LOGOUT: &str = "/users/logout";
    /// Issue a fresh token for the current session
    pub const REFRESH: &str = "/users/session/refresh";
    /// Send a one-time code to an email address
    pub const SEND_OTP: &str = "/users/otp/send";
    /// Verify a one-time code
    pub const VERIFY_OTP: &str = "/users/otp/verify";
    /// Reset a password with a verified code
    pub const RESET_PASSWORD: &str = "/users/password/reset";

    /// Fetch a user profile
    pub fn profile(user_id: &str) -> String {
        format!("/users/{}", user_id)
    }

    /// Edit a user profile
    pub fn edit(user_id: &str) -> String {
        format!("/users/{}", user_id)
    }

    /// Upload a profile photo
    pub fn avatar(user_id: &str) -> String {
        format!("/users/{}/avatar", user_id)
    }

    /// Activate a freshly registered account
    pub fn activate(activation_token: &str) -> String {
        format!("/users/activate/{}", activation_token)
    }
}

/// Discussion forum operations
pub mod threads {
    /// List / filter threads
    pub const LIST: &str = "/threads";
    /// Create a thread
    pub const CREATE: &str = "/threads";
    /// Search threads
    pub const SEARCH: &str = "/threads/search";

    /// Fetch / edit / delete a thread
    pub fn thread(id: &str) -> String {
        format!("/threads/{}", id)
    }

    /// Upvote a thread
    pub fn upvote(id: &str) -> String {
        format!("/threads/{}/upvote", id)
    }

    /// Downvote a thread
    pub fn downvote(id: &str) -> String {
        format!("/threads/{}/downvote", id)
    }

    /// Record a share of a thread
    pub fn share(id: &str) -> String {
        format!("/threads/{}/share", id)
    }

    /// Add a comment to a thread
    pub fn comments(thread_id: &str) -> String {
        format!("/threads/{}/comments", thread_id)
    }

    /// Edit / delete a comment
    pub fn comment(thread_id: &str, comment_id: &str) -> String {
        format!("/threads/{}/comments/{}", thread_id, comment_id)
    }

    /// Like a comment
    pub fn comment_like(thread_id: &str, comment_id: &str) -> String {
        format!("/threads/{}/comments/{}/like", thread_id, comment_id)
    }

    /// Dislike a comment
    pub fn comment_dislike(thread_id: &str, comment_id: &str) -> String {
        format!("/threads/{}/comments/{}/dislike", thread_id, comment_id)
    }

    /// Add a reply under a comment
    pub fn replies(thread_id: &str, comment_id: &str) -> String {
        format!("/threads/{}/comments/{}/replies", thread_id, comment_id)
    }

    /// Edit / delete a reply
    pub fn reply(thread_id: &str, comment_id: &str, reply_id: &str) -> String {
        format!("/threads/{}/comments/{}/replies/{}", thread_id, comment_id, reply_id)
    }
}

/// Blog / news operations
pub mod blog {
    /// List / filter posts
    pub const LIST: &str = "/blog";
    /// Search posts
    pub const SEARCH: &str = "/blog/search";

    /// Fetch a post
    pub fn post(id: &str) -> String {
        format!("/blog/{}", id)
    }

    /// Like a post
    pub fn like(id: &str) -> String {
        format!("/blog/{}/like", id)
    }

    /// Dislike a post
    pub fn dislike(id: &str) -> String {
        format!("/blog/{}/dislike", id)
    }

    /// Add a comment to a post
    pub fn comments(post_id: &str) -> String {
        format!("/blog/{}/comments", post_id)
    }

    /// Edit / delete a comment
    pub fn comment(post_id: &str, comment_id: &str) -> String {
        format!("/blog/{}/comments/{}", post_id, comment_id)
    }

    /// Like a comment
    pub fn comment_like(post_id: &str, comment_id: &str) -> String {
        format!("/blog/{}/comments/{}/like", post_id, comment_id)
    }

    /// Dislike a comment
    pub fn comment_dislike(post_id: &str, comment_id: &str) -> String {
        format!("/blog/{}/comments/{}/dislike", post_id, comment_id)
    }
}

/// Resource library operations
pub mod resources {
    /// List / filter resources
    pub const LIST: &str = "/resources";
    /// Create a resource (multipart when a file is attached)
    pub const CREATE: &str = "/resources";

    /// Fetch / edit / delete a resource
    pub fn item(id: &str) -> String {
        format!("/resources/{}", id)
    }
}

/// Member directory operations
pub mod members {
    /// List doctors
    pub const LIST: &str = "/doctors";
    /// Search doctors
    pub const SEARCH: &str = "/doctors/search";

    /// Fetch a doctor profile
    pub fn profile(id: &str) -> String {
        format!("/doctors/{}", id)
    }
}

/// Palliative-unit operations
pub mod units {
    /// List units
    pub const LIST: &str = "/palliative-units";
    /// Search units
    pub const SEARCH: &str = "/palliative-units/search";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameterized_paths() {
        assert_eq!(users::profile("u-1"), "/users/u-1");
        assert_eq!(users::activate("tok"), "/users/activate/tok");
        assert_eq!(threads::comment_like("t-1", "c-2"), "/threads/t-1/comments/c-2/like");
        assert_eq!(threads::reply("t-1", "c-2", "r-3"), "/threads/t-1/comments/c-2/replies/r-3");
        assert_eq!(blog::dislike("b-9"), "/blog/b-9/dislike");
        assert_eq!(resources::item("res-4"), "/resources/res-4");
    }
}
