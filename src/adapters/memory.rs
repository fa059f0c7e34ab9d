//! In-memory template store.

use std::collections::HashMap;

use crate::content::ContentPack;
use crate::domain::classification::Tier;
use crate::domain::foundation::DomainError;
use crate::domain::report::{BlockGroup, ContentBlock, ReportTemplate, TemplateKey};
use crate::ports::TemplateStore;

/// Template store backed by a hash map, seeded from a content pack.
///
/// Tier resolution is total: tiers without an explicit route fall back to
/// the pack's fallback template.
pub struct InMemoryTemplateStore {
    templates: HashMap<TemplateKey, ReportTemplate>,
    routes: HashMap<Tier, TemplateKey>,
    fallback: TemplateKey,
}

impl InMemoryTemplateStore {
    /// Builds a store from a validated content pack.
    ///
    /// Block indices are assigned in template order across groups.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a seed defines no groups
    pub fn from_pack(pack: &ContentPack) -> Result<Self, DomainError> {
        let mut templates = HashMap::new();
        let mut routes = HashMap::new();

        for seed in &pack.templates {
            let key = TemplateKey::new(&seed.key);
            let mut next_index = 0;
            let groups = seed
                .groups
                .iter()
                .map(|group| {
                    BlockGroup::new(
                        group
                            .iter()
                            .map(|text| {
                                let block = ContentBlock {
                                    index: next_index,
                                    text: text.clone(),
                                };
                                next_index += 1;
                                block
                            })
                            .collect(),
                    )
                })
                .collect();

            if let Some(tier) = seed.tier {
                routes.insert(tier, key.clone());
            }
            let template = ReportTemplate::new(key.clone(), &seed.label, groups)?;
            templates.insert(key, template);
        }

        Ok(Self {
            templates,
            routes,
            fallback: TemplateKey::new(&pack.fallback_template),
        })
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Returns true if no templates are registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn resolve(&self, tier: Tier) -> TemplateKey {
        self.routes
            .get(&tier)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn template(&self, key: &TemplateKey) -> Option<&ReportTemplate> {
        self.templates.get(key)
    }
}
