//! Parallel construction of many shares.
//!
//! Each definition is parsed, resolved and hashed independently, so a whole
//! configuration is built on the rayon pool without any locking. Results keep
//! the order of the input definitions.

use rayon::prelude::*;

use crate::fs::resolve::PathResolver;

use super::{Share, ShareError};

/// Build every definition in parallel, one result per input.
pub fn build_shares<S, R>(raws: &[S], resolver: &R) -> Vec<Result<Share, ShareError>>
where
    S: AsRef<str> + Sync,
    R: PathResolver + ?Sized,
{
    raws.par_iter()
        .map(|raw| Share::new(raw.as_ref(), resolver))
        .collect()
}

/// Outcome of building a set of definitions.
///
/// Successful shares and failures are kept apart so the caller can choose to
/// skip bad definitions or reject the whole set.
#[derive(Debug, Default)]
pub struct ShareBatch {
    pub shares: Vec<Share>,
    /// Raw definition and the reason it was rejected.
    pub failures: Vec<(String, ShareError)>,
}

impl ShareBatch {
    pub fn build<S, R>(raws: &[S], resolver: &R) -> Self
    where
        S: AsRef<str> + Sync,
        R: PathResolver + ?Sized,
    {
        let results = build_shares(raws, resolver);

        let mut batch = ShareBatch::default();
        for (raw, result) in raws.iter().zip(results) {
            match result {
                Ok(share) => batch.shares.push(share),
                Err(e) => batch.failures.push((raw.as_ref().to_string(), e)),
            }
        }

        tracing::debug!(
            built = batch.shares.len(),
            failed = batch.failures.len(),
            "Built share batch"
        );
        batch
    }

    /// True when every definition produced a share.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// The shares, or the first failure if any definition was rejected.
    pub fn into_result(self) -> Result<Vec<Share>, ShareError> {
        match self.failures.into_iter().next() {
            Some((_, e)) => Err(e),
            None => Ok(self.shares),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::resolve::ResolveError;

    fn fixed_parent(path: &str) -> Result<String, ResolveError> {
        if path.contains("missing") {
            Err(ResolveError::NotFound { path: path.to_string() })
        } else {
            Ok("/srv".to_string())
        }
    }

    #[test]
    fn test_results_keep_input_order() {
        let raws: Vec<String> = (0..64).map(|i| format!("/srv/folder{i}")).collect();
        let results = build_shares(&raws, &fixed_parent);

        assert_eq!(results.len(), raws.len());
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.as_ref().unwrap().alias(), format!("folder{i}"));
        }
    }

    #[test]
    fn test_batch_separates_failures() {
        let raws = ["/srv/a", "[", "/srv/missing", "!/srv/b"];
        let batch = ShareBatch::build(&raws, &fixed_parent);

        assert!(!batch.is_complete());
        assert_eq!(batch.shares.len(), 2);
        assert_eq!(batch.shares[0].alias(), "a");
        assert!(batch.shares[1].is_excluded());

        let failed: Vec<&str> = batch.failures.iter().map(|(raw, _)| raw.as_str()).collect();
        assert_eq!(failed, ["[", "/srv/missing"]);
    }

    #[test]
    fn test_into_result_reports_first_failure() {
        let batch = ShareBatch::build(&["/srv/ok", "/srv/missing", ""], &fixed_parent);
        assert!(matches!(
            batch.into_result(),
            Err(ShareError::PathResolution(ResolveError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_empty_batch_is_complete() {
        let batch = ShareBatch::build::<&str, _>(&[], &fixed_parent);
        assert!(batch.is_complete());
        assert!(batch.into_result().unwrap().is_empty());
    }
}
