use crate::error::{ExplorerError, Result};
use url::Url;

/// Number of repositories requested per page.
pub const PAGE_SIZE: u32 = 3;

/// One `<url>; rel="name"` entry of a `Link` header.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRelation {
    pub rel: String,
    pub url: Url,
    pub page: Option<u32>,
}

/// Parsed `Link` response header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkHeader {
    relations: Vec<LinkRelation>,
}

impl LinkHeader {
    /// Parse a comma-separated list of `<url>; rel="name"` entries.
    ///
    /// An entry may carry several space-separated relation names, in which
    /// case one `LinkRelation` is produced per name.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut relations = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.split(';').map(str::trim);

            let target = parts
                .next()
                .and_then(|t| t.strip_prefix('<'))
                .and_then(|t| t.strip_suffix('>'))
                .ok_or_else(|| {
                    ExplorerError::InvalidLinkHeader(format!("Missing <url> in entry: {}", entry))
                })?;

            let url = Url::parse(target).map_err(|e| {
                ExplorerError::InvalidLinkHeader(format!("Bad link target {}: {}", target, e))
            })?;

            let page = url
                .query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse::<u32>().ok());

            let rels = parts
                .filter_map(|param| param.split_once('='))
                .find(|(key, _)| key.trim().eq_ignore_ascii_case("rel"))
                .map(|(_, value)| value.trim().trim_matches('"').to_string())
                .ok_or_else(|| {
                    ExplorerError::InvalidLinkHeader(format!("Missing rel in entry: {}", entry))
                })?;

            for rel in rels.split_whitespace() {
                relations.push(LinkRelation {
                    rel: rel.to_ascii_lowercase(),
                    url: url.clone(),
                    page,
                });
            }
        }

        Ok(LinkHeader { relations })
    }

    pub fn get(&self, rel: &str) -> Option<&LinkRelation> {
        self.relations.iter().find(|r| r.rel == rel)
    }

    /// Page number carried by the `last` relation, if any.
    pub fn last_page(&self) -> Option<u32> {
        self.get("last").and_then(|r| r.page)
    }
}

/// Total page count for a listing fetched at `requested_page`.
///
/// Without a `last` relation the page just fetched is the final one. That
/// covers both a missing header (everything fits on one page) and GitHub's
/// real last page, which only links `first` and `prev`. An empty page past
/// the first is out of range and carries no usable page count.
pub fn derive_total_pages(
    link: Option<&LinkHeader>,
    requested_page: u32,
    returned: usize,
) -> Result<u32> {
    let last = link.and_then(LinkHeader::last_page);

    if returned == 0 && requested_page > 1 {
        return Err(ExplorerError::PageOutOfRange {
            page: requested_page,
            last,
        });
    }

    Ok(last.unwrap_or_else(|| requested_page.max(1)))
}
