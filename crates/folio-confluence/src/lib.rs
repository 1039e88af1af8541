//! Confluence Cloud integration for folio.
//!
//! This crate provides read access to a space's folder tree:
//! - [`FolderUrl`]: parses `/wiki/spaces/{key}/folder/{id}` links
//! - [`ConfluenceClient`]: REST v2 client with basic authentication
//! - [`FolderWalker`]: flattens a folder into its pages, depth first
//!
//! # Example
//!
//! ```ignore
//! use folio_confluence::{ConfluenceClient, FolderUrl, FolderWalker};
//!
//! let url = FolderUrl::parse("https://example.atlassian.net/wiki/spaces/ENG/folder/123")?;
//! let client = ConfluenceClient::new(&credentials, &config.confluence);
//! let pages = FolderWalker::new(&client).collect(url.folder_id())?;
//! println!("{} pages", pages.len());
//! ```

// API client
mod auth;
mod client;
mod pagination;
pub use client::ConfluenceClient;

// Traversal
mod source;
mod walker;
pub use source::{ContentRef, ContentSource};
pub use walker::FolderWalker;

// Test double
pub mod mock;
pub use mock::MockSource;

// Types
mod types;
pub use types::{ChildItem, ChildKind, Folder, Page, PageVersion};

mod url;
pub use url::FolderUrl;

// Errors
pub mod error;
pub use error::ConfluenceError;
