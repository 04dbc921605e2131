//! The card template catalog.
//!
//! One catalog is built per process and shared behind an `Arc`. Template ids
//! only carry metadata here; the drawn layout is the same for all of them.

use cardpress_types::TemplateId;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub id: TemplateId,
    pub title: String,
}

impl TemplateEntry {
    pub fn new(id: impl Into<TemplateId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateCatalog {
    entries: Vec<TemplateEntry>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    pub fn new(entries: Vec<TemplateEntry>) -> Self {
        Self { entries }
    }

    /// The five designs offered to customers.
    pub fn builtin() -> Self {
        Self::new(vec![
            TemplateEntry::new(1u32, "Design minimaliste noir"),
            TemplateEntry::new(2u32, "Design créatif pour artiste"),
            TemplateEntry::new(3u32, "Design minimaliste bleu"),
            TemplateEntry::new(4u32, "Design créatif pour artiste"),
            TemplateEntry::new(5u32, "Design moderne"),
        ])
    }

    pub fn get(&self, id: &TemplateId) -> Option<&TemplateEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn contains(&self, id: &TemplateId) -> bool {
        self.get(id).is_some()
    }

    pub fn entries(&self) -> &[TemplateEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
