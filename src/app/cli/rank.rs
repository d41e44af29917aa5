use super::Target;
use crate::app::api::{self, PageRank};
use crate::domain::AppError;

pub fn run_rank(target: &Target, pages: &[String], json: bool) -> Result<(), AppError> {
    let ranked = api::rank(&target.root, target.manifest(), pages)?;

    if json {
        let out = serde_json::to_string_pretty(&ranked)
            .map_err(|e| AppError::parse_error("ranking", e))?;
        println!("{}", out);
        return Ok(());
    }

    for entry in &ranked {
        match &entry.rank {
            PageRank::Ignored { pattern } => println!("{}\tignored\t{}", entry.page, pattern),
            PageRank::Ranked { weight, pattern } => {
                println!("{}\t{}\t{}", entry.page, weight, pattern.as_deref().unwrap_or("-"))
            }
        }
    }
    Ok(())
}
