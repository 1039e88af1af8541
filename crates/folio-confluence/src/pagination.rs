//! Cursor pagination over `_links.next`.

use tracing::{debug, warn};

use crate::error::ConfluenceError;
use crate::types::{ChildItem, ChildrenPage};

/// Fetch `first_url` and every `_links.next` page after it.
///
/// `site_url` is the site root that relative `next` links are appended to.
/// Results are concatenated in response order.
pub(crate) fn collect_paginated<F>(
    site_url: &str,
    first_url: String,
    mut fetch: F,
) -> Result<Vec<ChildItem>, ConfluenceError>
where
    F: FnMut(&str) -> Result<ChildrenPage, ConfluenceError>,
{
    let mut items = Vec::new();
    let mut url = first_url;
    loop {
        let page = fetch(&url)?;
        debug!("Fetched {} items from {}", page.results.len(), url);
        items.extend(page.results);

        let Some(next) = page.links.next.filter(|next| !next.is_empty()) else {
            return Ok(items);
        };
        let next = resolve_next(site_url, &next);
        if next == url {
            warn!("Pagination link repeats {}, stopping", url);
            return Ok(items);
        }
        url = next;
    }
}

/// Resolve a `next` link against the site root.
fn resolve_next(site_url: &str, next: &str) -> String {
    if next.starts_with("http://") || next.starts_with("https://") {
        next.to_owned()
    } else if next.starts_with('/') {
        format!("{site_url}{next}")
    } else {
        format!("{site_url}/{next}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::PageLinks;
    use crate::ChildKind;

    const SITE: &str = "https://acme.atlassian.net";

    fn children_page(start: usize, count: usize, next: Option<String>) -> ChildrenPage {
        ChildrenPage {
            results: (start..start + count)
                .map(|i| ChildItem::new(i.to_string(), ChildKind::Page, format!("Page {i}")))
                .collect(),
            links: PageLinks { next },
        }
    }

    #[test]
    fn test_three_requests_for_150_children() {
        let total = 150;
        let limit = 50;
        let mut requested = Vec::new();

        let items = collect_paginated(
            SITE,
            format!("{SITE}/wiki/api/v2/folders/9/direct-children?limit={limit}"),
            |url| {
                requested.push(url.to_owned());
                let start = (requested.len() - 1) * limit;
                let next = (start + limit < total).then(|| {
                    format!("/wiki/api/v2/folders/9/direct-children?limit={limit}&cursor=c{start}")
                });
                Ok(children_page(start, limit, next))
            },
        )
        .unwrap();

        assert_eq!(requested.len(), 3);
        assert_eq!(
            requested[1],
            format!("{SITE}/wiki/api/v2/folders/9/direct-children?limit=50&cursor=c0")
        );
        assert_eq!(items.len(), 150);
        let ids: Vec<usize> = items.iter().map(|i| i.id.parse().unwrap()).collect();
        assert_eq!(ids, (0..150).collect::<Vec<_>>());
    }

    #[test]
    fn test_error_stops_pagination() {
        let mut calls = 0;
        let result = collect_paginated(SITE, format!("{SITE}/first"), |_| {
            calls += 1;
            if calls == 1 {
                Ok(children_page(0, 2, Some("/second".to_owned())))
            } else {
                Err(ConfluenceError::TransientHttp {
                    status: 502,
                    url: format!("{SITE}/second"),
                    body: String::new(),
                })
            }
        });
        assert!(matches!(result, Err(ConfluenceError::TransientHttp { .. })));
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_repeated_next_link_stops() {
        let mut calls = 0;
        let items = collect_paginated(SITE, format!("{SITE}/same"), |_| {
            calls += 1;
            Ok(children_page(0, 1, Some("/same".to_owned())))
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_resolve_next() {
        assert_eq!(resolve_next(SITE, "/wiki/x?cursor=1"), format!("{SITE}/wiki/x?cursor=1"));
        assert_eq!(resolve_next(SITE, "https://other/x"), "https://other/x");
    }
}
