//! Category store.
//!
//! # Responsibility
//! - Provide the category picker API: list user-visible categories and
//!   create new ones by name.
//!
//! # Invariants
//! - The pinned pseudo-category resolves like any other category internally
//!   but never appears in `user_categories`.

use crate::model::tracker::Category;
use crate::repo::category_repo::CategoryRepository;
use crate::repo::RepoResult;

/// Use-case wrapper over category persistence.
pub struct CategoryStore<R: CategoryRepository> {
    repo: R,
}

impl<R: CategoryRepository> CategoryStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a category if it does not exist yet. Idempotent by name.
    pub fn add(&self, name: &str) -> RepoResult<()> {
        self.repo.ensure(name)?;
        Ok(())
    }

    /// Categories offered in user-facing pickers, pinned pseudo-category
    /// excluded, sorted by name.
    pub fn user_categories(&self) -> RepoResult<Vec<Category>> {
        let categories = self.repo.list()?;
        Ok(categories
            .into_iter()
            .filter(|category| !category.is_pinned_category())
            .collect())
    }

    /// Whether a category with this name exists (pinned included).
    pub fn exists(&self, name: &str) -> RepoResult<bool> {
        Ok(self.repo.find_id(name)?.is_some())
    }
}
