use serde::Serialize;

use crate::app::AppContext;
use crate::app::commands::load_manifest;
use crate::domain::{AppError, PageRank, SearchIndex};
use crate::ports::RepositoryFilesystem;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageRanking {
    pub page: String,
    #[serde(flatten)]
    pub rank: PageRank,
}

/// Resolve the search weight of each page against the manifest's `search` section.
pub fn execute<R: RepositoryFilesystem>(
    ctx: &AppContext<R>,
    pages: &[String],
) -> Result<Vec<PageRanking>, AppError> {
    let loaded = load_manifest(ctx)?;
    let index = SearchIndex::compile(loaded.manifest.search.as_ref())?;

    Ok(pages
        .iter()
        .map(|page| PageRanking { page: page.clone(), rank: index.rank(page) })
        .collect())
}
