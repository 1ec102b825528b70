//! Datasets read once, before the first menu is shown.

use std::collections::HashMap;

use anyhow::Context as _;
use tracing::debug;

use crate::model::{Adjective, Category, Noun, Verb};
use crate::traits::DataSource;

#[derive(Debug, Clone, Default)]
struct CategoryData {
    verbs: Vec<Verb>,
    nouns: Vec<Noun>,
    adjectives: Vec<Adjective>,
}

/// Every category of another [`DataSource`], loaded and validated up front.
#[derive(Debug, Clone, Default)]
pub struct PreloadedData {
    categories: Vec<Category>,
    data: HashMap<String, CategoryData>,
}

impl PreloadedData {
    /// Load all datasets of every category. The first broken dataset fails
    /// the whole load.
    pub fn load(source: &dyn DataSource) -> anyhow::Result<Self> {
        let categories = source.categories().to_vec();
        let mut data = HashMap::with_capacity(categories.len());
        for category in &categories {
            let loaded = load_category(source, category)
                .with_context(|| format!("failed to load category '{}'", category.id))?;
            debug!(
                category = %category.id,
                verbs = loaded.verbs.len(),
                nouns = loaded.nouns.len(),
                adjectives = loaded.adjectives.len(),
                "preloaded category"
            );
            data.insert(category.id.clone(), loaded);
        }
        Ok(Self { categories, data })
    }

    fn get(&self, category: &Category) -> Option<&CategoryData> {
        self.data.get(&category.id)
    }
}

fn load_category(source: &dyn DataSource, category: &Category) -> anyhow::Result<CategoryData> {
    Ok(CategoryData {
        verbs: source.verbs(category)?,
        nouns: source.nouns(category)?,
        adjectives: source.adjectives(category)?,
    })
}

impl DataSource for PreloadedData {
    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn verbs(&self, category: &Category) -> anyhow::Result<Vec<Verb>> {
        Ok(self.get(category).map(|d| d.verbs.clone()).unwrap_or_default())
    }

    fn nouns(&self, category: &Category) -> anyhow::Result<Vec<Noun>> {
        Ok(self.get(category).map(|d| d.nouns.clone()).unwrap_or_default())
    }

    fn adjectives(&self, category: &Category) -> anyhow::Result<Vec<Adjective>> {
        Ok(self
            .get(category)
            .map(|d| d.adjectives.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::mock::StaticData;
    use crate::model::CategoryFiles;

    /// Counts dataset reads and fails on nouns when asked to.
    struct CountingSource {
        inner: StaticData,
        reads: Cell<usize>,
        broken_nouns: bool,
    }

    impl CountingSource {
        fn new(broken_nouns: bool) -> Self {
            Self {
                inner: StaticData::single(
                    "base",
                    vec![Verb::new("parlare"), Verb::new("essere").irregular()],
                    vec![],
                    vec![],
                ),
                reads: Cell::new(0),
                broken_nouns,
            }
        }
    }

    impl DataSource for CountingSource {
        fn categories(&self) -> &[Category] {
            self.inner.categories()
        }

        fn verbs(&self, category: &Category) -> anyhow::Result<Vec<Verb>> {
            self.reads.set(self.reads.get() + 1);
            self.inner.verbs(category)
        }

        fn nouns(&self, category: &Category) -> anyhow::Result<Vec<Noun>> {
            self.reads.set(self.reads.get() + 1);
            if self.broken_nouns {
                anyhow::bail!("nouns.json: forms.pl must not be empty");
            }
            self.inner.nouns(category)
        }

        fn adjectives(&self, category: &Category) -> anyhow::Result<Vec<Adjective>> {
            self.reads.set(self.reads.get() + 1);
            self.inner.adjectives(category)
        }
    }

    #[test]
    fn reads_each_dataset_once() {
        let source = CountingSource::new(false);
        let data = PreloadedData::load(&source).unwrap();
        assert_eq!(source.reads.get(), 3);

        let base = data.category("base").unwrap().clone();
        for _ in 0..5 {
            assert_eq!(data.verbs(&base).unwrap().len(), 2);
            assert!(data.nouns(&base).unwrap().is_empty());
        }
        assert_eq!(source.reads.get(), 3);
    }

    #[test]
    fn broken_dataset_fails_the_load() {
        let err = PreloadedData::load(&CountingSource::new(true)).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("failed to load category 'base'"), "{msg}");
        assert!(msg.contains("forms.pl must not be empty"), "{msg}");
    }

    #[test]
    fn unknown_category_is_empty() {
        let data = PreloadedData::load(&CountingSource::new(false)).unwrap();
        let other = Category {
            id: "other".into(),
            label: "Other".into(),
            files: CategoryFiles::default(),
        };
        assert!(data.verbs(&other).unwrap().is_empty());
    }
}
