//! Keytext loading.
//!
//! Turns an ordered list of [`Source`]s into a [`Corpus`]. Page ids are the
//! positions in that list, so the same list (in the same order) must be used
//! for encoding and decoding.
//!
//! ```text
//! [Source] ──fetch──▶ bytes ──index_document──▶ [Reference] ──▶ Corpus
//!   #0  https://…                                   page 0
//!   #1  ./local.html                                page 1
//! ```

mod source;

pub use source::{Source, parse_source_list};

use std::time::Duration;

use rayon::prelude::*;
use reqwest::blocking::Client;

use crate::cipher::{CipherError, Corpus, FetchError, Reference, index_document};
use crate::logger::ProgressLine;
use crate::{debug, log};

/// Largest number of pages a page id can address.
pub const MAX_PAGES: usize = u16::MAX as usize + 1;

/// Page count beyond which most coordinates no longer fit in a token.
pub const TOKEN_PAGE_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
    /// Fetch pages concurrently on the rayon pool.
    pub parallel: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!("pagecipher/", env!("CARGO_PKG_VERSION")).to_string(),
            parallel: true,
        }
    }
}

/// Fetches page bytes from remote and local sources.
pub struct Fetcher {
    client: Option<Client>,
}

impl Fetcher {
    /// Build a fetcher for `sources`.
    ///
    /// The HTTP client is only constructed when at least one source is
    /// remote.
    pub fn new(sources: &[Source], options: &FetchOptions) -> Result<Self, FetchError> {
        let client = if sources.iter().any(Source::is_remote) {
            let client = Client::builder()
                .timeout(options.timeout)
                .user_agent(options.user_agent.as_str())
                .build()
                .map_err(|err| FetchError::new("http client", err))?;
            Some(client)
        } else {
            None
        };
        Ok(Self { client })
    }

    /// Fetch the raw bytes of one source.
    pub fn fetch(&self, source: &Source) -> Result<Vec<u8>, FetchError> {
        match source {
            Source::Local(path) => Source::read_local(path),
            Source::Remote(url) => {
                let client = self
                    .client
                    .as_ref()
                    .ok_or_else(|| FetchError::new(url.as_str(), "no HTTP client"))?;
                let response = client
                    .get(url.clone())
                    .send()
                    .and_then(|resp| resp.error_for_status())
                    .map_err(|err| FetchError::new(url.as_str(), describe(err)))?;
                let body = response
                    .bytes()
                    .map_err(|err| FetchError::new(url.as_str(), describe(err)))?;
                Ok(body.to_vec())
            }
        }
    }
}

/// Short reason for a reqwest failure, without the URL it already carries.
fn describe(err: reqwest::Error) -> String {
    if let Some(status) = err.status() {
        format!("HTTP {status}")
    } else if err.is_timeout() {
        "timed out".to_string()
    } else if err.is_connect() {
        "connection failed".to_string()
    } else {
        err.without_url().to_string()
    }
}

/// Fetch and index every source, in order.
///
/// Any failed fetch aborts the whole load: a partial corpus would shift the
/// page ids of every later page.
pub fn load_corpus(sources: &[Source], options: &FetchOptions) -> Result<Corpus, CipherError> {
    if sources.len() > MAX_PAGES {
        return Err(CipherError::TooManyPages(sources.len()));
    }
    if sources.len() > TOKEN_PAGE_LIMIT {
        log!(
            "warning";
            "{} pages given; coordinates on page {} and later cannot be encoded",
            sources.len(),
            TOKEN_PAGE_LIMIT
        );
    }

    let fetcher = Fetcher::new(sources, options)?;
    let remote = sources.iter().filter(|s| s.is_remote()).count();
    let progress = ProgressLine::new(
        "fetch",
        &[("remote", remote), ("local", sources.len() - remote)],
    );

    let load = |(page, source): (usize, &Source)| -> Result<(u16, Vec<Reference>), FetchError> {
        // MAX_PAGES check above keeps this in range
        let page_id = page as u16;
        let bytes = fetcher.fetch(source)?;
        let refs = index_document(&bytes, page_id);
        debug!("fetch"; "page {} `{}`: {} bytes, {} references", page_id, source, bytes.len(), refs.len());
        progress.inc(if source.is_remote() { "remote" } else { "local" });
        Ok((page_id, refs))
    };

    let pages: Result<Vec<_>, FetchError> = if options.parallel {
        sources.par_iter().enumerate().map(load).collect()
    } else {
        sources.iter().enumerate().map(load).collect()
    };
    let pages = pages?;
    progress.finish();

    let corpus = Corpus::build(pages);
    debug!(
        "fetch";
        "corpus: {} pages, {} references, {} bytes of text",
        corpus.page_count(),
        corpus.len(),
        corpus.text_len()
    );
    Ok(corpus)
}

// ============================================================================
// tests
// ============================================================================
