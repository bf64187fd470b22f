//! Transports between the vault controller and the link store
//!
//! [`LinkApi`] is the seam: [`HttpLinkApi`] talks to a running server,
//! [`LocalLinkApi`] calls the store service in-process on a local data
//! directory.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::error::{VaultError, VaultResult};
use crate::models::{
    AddLinkRequest, AddLinkResponse, EncryptedLink, ErrorResponse, LinkId, UserId,
};
use crate::services::with_store;
use crate::storage::Storage;

/// Operations the controller needs from a link store
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// Every row for `user_id`, newest first
    async fn list(&self, user_id: &UserId) -> VaultResult<Vec<EncryptedLink>>;

    /// Store a row and return its assigned id
    async fn add(
        &self,
        user_id: &UserId,
        encrypted_title: &str,
        encrypted_url: &str,
    ) -> VaultResult<LinkId>;

    /// Delete the row matching `id` and `user_id`
    async fn delete(&self, id: LinkId, user_id: &UserId) -> VaultResult<()>;
}

#[async_trait]
impl<T: LinkApi + ?Sized> LinkApi for Box<T> {
    async fn list(&self, user_id: &UserId) -> VaultResult<Vec<EncryptedLink>> {
        (**self).list(user_id).await
    }

    async fn add(
        &self,
        user_id: &UserId,
        encrypted_title: &str,
        encrypted_url: &str,
    ) -> VaultResult<LinkId> {
        (**self).add(user_id, encrypted_title, encrypted_url).await
    }

    async fn delete(&self, id: LinkId, user_id: &UserId) -> VaultResult<()> {
        (**self).delete(id, user_id).await
    }
}

/// HTTP client for the link store API
#[derive(Clone)]
pub struct HttpLinkApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLinkApi {
    /// Create a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> VaultResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("link-vault/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| VaultError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests go to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn links_url(&self) -> String {
        format!("{}/links", self.base_url)
    }
}

/// Turn a non-success response into [`VaultError::Api`]
async fn check(res: Response) -> VaultResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let message = match res.json::<ErrorResponse>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };

    Err(VaultError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl LinkApi for HttpLinkApi {
    async fn list(&self, user_id: &UserId) -> VaultResult<Vec<EncryptedLink>> {
        let res = self
            .client
            .get(self.links_url())
            .query(&[("userId", user_id.as_str())])
            .send()
            .await?;

        let links: Vec<EncryptedLink> = check(res).await?.json().await?;
        debug!(count = links.len(), "fetched links");
        Ok(links)
    }

    async fn add(
        &self,
        user_id: &UserId,
        encrypted_title: &str,
        encrypted_url: &str,
    ) -> VaultResult<LinkId> {
        let body = AddLinkRequest {
            user_id: Some(user_id.to_string()),
            encrypted_title: Some(encrypted_title.to_string()),
            encrypted_url: Some(encrypted_url.to_string()),
        };

        let res = self.client.post(self.links_url()).json(&body).send().await?;
        let created: AddLinkResponse = check(res).await?.json().await?;
        Ok(created.id)
    }

    async fn delete(&self, id: LinkId, user_id: &UserId) -> VaultResult<()> {
        let res = self
            .client
            .delete(self.links_url())
            .query(&[("id", id.to_string().as_str()), ("userId", user_id.as_str())])
            .send()
            .await?;

        if res.status() == StatusCode::NOT_FOUND {
            // Older servers answered 404 for a missing row
            return Ok(());
        }
        check(res).await?;
        Ok(())
    }
}

/// In-process link store over a local data directory
#[derive(Clone)]
pub struct LocalLinkApi {
    storage: Arc<Storage>,
}

impl LocalLinkApi {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl LinkApi for LocalLinkApi {
    async fn list(&self, user_id: &UserId) -> VaultResult<Vec<EncryptedLink>> {
        let user_id = user_id.clone();
        with_store(Arc::clone(&self.storage), move |store| store.list(&user_id)).await
    }

    async fn add(
        &self,
        user_id: &UserId,
        encrypted_title: &str,
        encrypted_url: &str,
    ) -> VaultResult<LinkId> {
        let user_id = user_id.clone();
        let encrypted_title = encrypted_title.to_string();
        let encrypted_url = encrypted_url.to_string();
        let link = with_store(Arc::clone(&self.storage), move |store| {
            store.add(user_id, encrypted_title, encrypted_url)
        })
        .await?;
        Ok(link.id)
    }

    async fn delete(&self, id: LinkId, user_id: &UserId) -> VaultResult<()> {
        let user_id = user_id.clone();
        with_store(Arc::clone(&self.storage), move |store| store.delete(id, &user_id)).await?;
        Ok(())
    }
}
