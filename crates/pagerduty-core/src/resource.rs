//! Generic resource operations.
//!
//! [`ResourceClient`] implements list/get/create/update/delete once for every record type
//! implementing [`Resource`]; the record's [`ResourceType`] supplies the envelope keys.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::client::{ApiRequest, ApiResponse, ServiceClient, Transport};
use crate::envelope::{unwrap_list, unwrap_root, wrap_root};
use crate::error::Result;
use crate::pagination::{ListMode, ListPage, PageRequest};
use crate::types::ResourceType;

/// A record exchanged with the API under a fixed envelope key.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Resource discriminator providing the singular and plural root keys.
    const KIND: ResourceType;
}

/// Generic client for PagerDuty resources.
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct ResourceClient {
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for ResourceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient").finish_non_exhaustive()
    }
}

impl From<ServiceClient> for ResourceClient {
    fn from(client: ServiceClient) -> Self {
        Self::new(Arc::new(client))
    }
}

impl ResourceClient {
    /// Create a client over any transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Access the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.send(request).await?.error_for_status()
    }

    /// Fetch a single page of `T`.
    ///
    /// # Errors
    ///
    /// Returns transport, API or decode errors.
    pub async fn list_page<T>(
        &self,
        path: &str,
        params: &[(String, String)],
        page: PageRequest,
    ) -> Result<ListPage<T>>
    where
        T: Resource,
    {
        let mut query = params.to_vec();
        query.extend(page.to_pairs());

        let response = self.execute(ApiRequest::get(path).with_query(query)).await?;
        unwrap_list(&response.body, T::KIND.collection_key())
    }

    /// Fetch every page of `T` in server order.
    ///
    /// Starts at `page.offset` (or 0) and advances the offset by the number of items
    /// received until the server reports no further results, a page comes back empty,
    /// or `max_items` items have been collected. A `max_items` of zero sends no request.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; no partial results are returned.
    pub async fn list_all<T>(
        &self,
        path: &str,
        params: &[(String, String)],
        page: PageRequest,
        max_items: Option<usize>,
    ) -> Result<Vec<T>>
    where
        T: Resource,
    {
        if max_items == Some(0) {
            return Ok(Vec::new());
        }

        let mut items: Vec<T> = Vec::new();
        let mut offset = page.offset.unwrap_or(0);

        loop {
            let request = PageRequest {
                offset: Some(offset),
                ..page
            };
            let ListPage {
                meta,
                items: mut batch,
            } = self.list_page::<T>(path, params, request).await?;

            let received = batch.len();
            items.append(&mut batch);
            debug!(
                path,
                offset,
                received,
                more = meta.more,
                "fetched {} page",
                T::KIND.collection_key()
            );

            if let Some(max) = max_items {
                if items.len() >= max {
                    items.truncate(max);
                    break;
                }
            }
            if !meta.more || received == 0 {
                break;
            }

            offset = offset.saturating_add(u32::try_from(received).unwrap_or(u32::MAX));
        }

        Ok(items)
    }

    /// List `T` according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns transport, API or decode errors.
    pub async fn list<T>(
        &self,
        path: &str,
        params: &[(String, String)],
        mode: ListMode,
    ) -> Result<Vec<T>>
    where
        T: Resource,
    {
        match mode {
            ListMode::Page(page) => Ok(self.list_page::<T>(path, params, page).await?.items),
            ListMode::All { page, max_items } => {
                self.list_all::<T>(path, params, page, max_items).await
            }
        }
    }

    /// Fetch one `T`.
    ///
    /// # Errors
    ///
    /// Returns transport, API or decode errors.
    pub async fn get<T>(&self, path: &str, params: &[(String, String)]) -> Result<T>
    where
        T: Resource,
    {
        let request = ApiRequest::get(path).with_query(params.to_vec());
        let response = self.execute(request).await?;
        unwrap_root(&response.body, T::KIND.root_key())
    }

    /// Create a `T` with POST; returns the server's copy.
    ///
    /// # Errors
    ///
    /// Returns transport, API or decode errors.
    pub async fn create<T>(&self, path: &str, value: &T) -> Result<T>
    where
        T: Resource,
    {
        let body = wrap_root(T::KIND.root_key(), value)?;
        let response = self.execute(ApiRequest::post(path).with_body(body)).await?;
        unwrap_root(&response.body, T::KIND.root_key())
    }

    /// Replace a `T` with PUT; returns the server's copy.
    ///
    /// # Errors
    ///
    /// Returns transport, API or decode errors.
    pub async fn update<T>(&self, path: &str, value: &T) -> Result<T>
    where
        T: Resource,
    {
        let body = wrap_root(T::KIND.root_key(), value)?;
        let response = self.execute(ApiRequest::put(path).with_body(body)).await?;
        unwrap_root(&response.body, T::KIND.root_key())
    }

    /// Delete the resource at `path`. Any 2xx status is success.
    ///
    /// # Errors
    ///
    /// Returns transport or API errors.
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.execute(ApiRequest::delete(path)).await.map(|_| ())
    }
}
