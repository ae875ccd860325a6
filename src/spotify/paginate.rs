use serde_json::Value;

use crate::{error::CatalogError, types::Page};

use super::{AuthorizedClient, Transport};

/// Flattens a paginated collection into one ordered sequence.
///
/// The first request carries the caller's parameters; every following request
/// goes to the page's `next` URL as is, since that URL already encodes the
/// offset, limit or cursor. Pages and items keep the provider's order, nothing
/// is reordered or deduplicated.
///
/// A `next` chain that never ends is followed forever.
pub struct Paginator<'a, T> {
    client: &'a AuthorizedClient<T>,
}

impl<'a, T: Transport> Paginator<'a, T> {
    pub fn new(client: &'a AuthorizedClient<T>) -> Self {
        Paginator { client }
    }

    /// Fetches every page and returns all items.
    ///
    /// A page that still fails after the client's retries aborts the whole
    /// listing; the items collected so far are discarded.
    pub async fn list(
        &self,
        target: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Value>, CatalogError> {
        let mut page = self.fetch(target, params).await?;
        let mut items = Vec::with_capacity(page.items.len());

        loop {
            items.append(&mut page.items);
            match page.next.take() {
                Some(next) => page = self.fetch(&next, &[]).await?,
                None => return Ok(items),
            }
        }
    }

    async fn fetch(&self, target: &str, params: &[(&str, &str)]) -> Result<Page, CatalogError> {
        let value = self.client.get(target, params).await?;
        Ok(serde_json::from_value(value)?)
    }
}
