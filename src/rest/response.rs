//! Response wrapper for one-page results.
//!
//! [`ResourceResponse<T>`] pairs the returned objects with the pagination
//! metadata of the response they came from. It implements `Deref<Target = T>`,
//! so a `ResourceResponse<Vec<Project>>` can be iterated and indexed like the
//! vector itself.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitlab_api::rest::{ListMixin, ListParams};
//!
//! let page = gl.projects().list(ListParams::new().page(2)).await?;
//!
//! for project in page.iter() {
//!     println!("{project}");
//! }
//!
//! if page.has_next_page() {
//!     println!("page {} of {:?}", page.current_page().unwrap_or(1), page.total_pages());
//! }
//!
//! let projects = page.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use crate::clients::PaginationInfo;

/// Objects returned by one request, with the response's pagination headers.
#[derive(Debug, Clone)]
pub struct ResourceResponse<T> {
    data: T,
    pagination: PaginationInfo,
    request_id: Option<String>,
}

impl<T> ResourceResponse<T> {
    /// Creates a new response wrapper.
    #[must_use]
    pub const fn new(data: T, pagination: PaginationInfo, request_id: Option<String>) -> Self {
        Self {
            data,
            pagination,
            request_id,
        }
    }

    /// Consumes the wrapper and returns the data.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.data
    }

    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    #[must_use]
    pub fn data_mut(&mut self) -> &mut T {
        &mut self.data
    }

    /// Returns the parsed pagination headers.
    #[must_use]
    pub const fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    /// Returns `true` if the server advertised another page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.pagination.has_next()
    }

    #[must_use]
    pub const fn current_page(&self) -> Option<u64> {
        self.pagination.page
    }

    #[must_use]
    pub const fn total_pages(&self) -> Option<u64> {
        self.pagination.total_pages
    }

    /// Returns the total number of records, when the server reported it.
    #[must_use]
    pub const fn total(&self) -> Option<u64> {
        self.pagination.total
    }

    /// Returns the `X-Request-Id` of the response.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Maps the inner data, keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> ResourceResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        ResourceResponse {
            data: f(self.data),
            pagination: self.pagination,
            request_id: self.request_id,
        }
    }
}

impl<T> Deref for ResourceResponse<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for ResourceResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

// Verify ResourceResponse is Send + Sync when T is Send + Sync
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceResponse<String>>();
    assert_send_sync::<ResourceResponse<Vec<String>>>();
};
