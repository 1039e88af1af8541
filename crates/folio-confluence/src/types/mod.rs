//! Confluence API types.

mod child;
mod page;
mod search;

pub use child::{ChildItem, ChildKind};
pub(crate) use child::ChildrenPage;
#[cfg(test)]
pub(crate) use child::PageLinks;
pub use page::{Folder, Page, PageVersion};
pub(crate) use page::PageResponse;
pub(crate) use search::{SearchResult, SearchResults};
