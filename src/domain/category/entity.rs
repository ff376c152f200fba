use crate::domain::article::ContentKind;
use crate::domain::errors::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    id: i64,
    slug: String,
    name: String,
    kind: Option<ContentKind>,
}

impl Category {
    /// Builds a category, lowercasing the slug. Fails when slug or name is blank.
    pub fn new(
        id: i64,
        slug: impl AsRef<str>,
        name: impl Into<String>,
        kind: Option<ContentKind>,
    ) -> DomainResult<Self> {
        let slug = slug.as_ref().trim();
        if slug.is_empty() {
            return Err(DomainError::Validation(
                "category slug cannot be empty".into(),
            ));
        }
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "category name cannot be empty".into(),
            ));
        }
        Ok(Self {
            id,
            slug: slug.to_lowercase(),
            name,
            kind,
        })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<ContentKind> {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_lowercases_slug() {
        for (raw, expected) in [
            ("Tools", "tools"),
            ("AI-Prompts", "ai-prompts"),
            ("already_lower", "already_lower"),
            (" Mixed Case ", "mixed case"),
        ] {
            let category = Category::new(1, raw, "Name", Some(ContentKind::Blog)).unwrap();
            assert_eq!(category.slug(), expected);
            assert_eq!(category.name(), "Name");
        }
    }

    #[test]
    fn new_rejects_empty_slug_or_name() {
        assert!(Category::new(1, "", "Name", None).is_err());
        assert!(Category::new(1, "  ", "Name", None).is_err());
        assert!(Category::new(1, "slug", "", None).is_err());
        assert!(Category::new(1, "slug", " \t", None).is_err());
    }
}
