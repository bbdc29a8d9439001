//! Resource library operations
//!
//! Resource CRUD. Creation accepts an optional file attachment; with one the
//! payload goes out as multipart (metadata as text parts, file as a binary
//! part), without one as plain JSON.

use reqwest::multipart::{Form, Part};

use crate::endpoints::resources as paths;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{Ack, Mutated, NewResource, ResourceItem, ResourceUpdate};

/// Handle for resource library operations
pub struct ResourcesApi<'a> {
    http: &'a HttpClient,
}

impl<'a> ResourcesApi<'a> {
    pub(crate) fn new(http: &'a HttpClient) -> Self {
        Self { http }
    }

    /// List resources, optionally restricted to a category
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<ResourceItem>> {
        match category {
            Some(category) => {
                self.http
                    .get_query(paths::LIST, &[("category", category.to_string())])
                    .await
            }
            None => self.http.get(paths::LIST).await,
        }
    }

    /// Fetch one resource
    pub async fn get(&self, resource_id: &str) -> Result<ResourceItem> {
        self.http.get(&paths::item(resource_id)).await
    }

    /// Create a resource, optionally attaching a file
    pub async fn create(
        &self,
        new_resource: &NewResource,
        file: Option<(&str, Vec<u8>)>,
    ) -> Result<Mutated<ResourceItem>> {
        match file {
            Some((file_name, bytes)) => {
                let mut form = Form::new()
                    .text("title", new_resource.title.clone())
                    .text("description", new_resource.description.clone())
                    .text("uploaded_by", new_resource.uploaded_by.clone());
                if let Some(category) = &new_resource.category {
                    form = form.text("category", category.clone());
                }
                form = form.part("file", Part::bytes(bytes).file_name(file_name.to_string()));
                self.http.post_multipart(paths::CREATE, form).await
            }
            None => self.http.post(paths::CREATE, new_resource).await,
        }
    }

    /// Edit a resource
    pub async fn edit(
        &self,
        resource_id: &str,
        update: &ResourceUpdate,
    ) -> Result<Mutated<ResourceItem>> {
        self.http.put(&paths::item(resource_id), update).await
    }

    /// Delete a resource
    pub async fn delete(&self, resource_id: &str) -> Result<Ack> {
        self.http.delete(&paths::item(resource_id)).await
    }
}
