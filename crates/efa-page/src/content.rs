//! Structured page content.

use crate::links::LinkBuilder;
use efa_common::{CategoryMap, OperationDescriptor};
use serde::{Deserialize, Serialize};

/// Rendered content for one version of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// Locale the links were built for.
    pub locale: String,
    /// One block per category, in mapping order.
    pub blocks: Vec<CategoryBlock>,
}

impl PageContent {
    /// Number of blocks that carry a heading.
    pub fn heading_count(&self) -> usize {
        self.blocks.iter().filter(|b| b.heading.is_some()).count()
    }

    /// Total number of operation entries.
    pub fn entry_count(&self) -> usize {
        self.blocks.iter().map(|b| b.entries.len()).sum()
    }
}

/// A category heading (absent for empty categories) and its operation list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBlock {
    pub category: String,
    pub heading: Option<Heading>,
    /// Always present, possibly empty.
    pub entries: Vec<OperationEntry>,
}

/// Heading element linking to the category's reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Element id; equal to the category name.
    pub id: String,
    pub href: String,
    pub text: String,
}

/// One linked operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationEntry {
    /// Fragment identifier on the reference page; equal to the slug.
    pub fragment: String,
    /// `<category href>#<slug>` with the default link layout.
    pub href: String,
    /// Uppercased verb.
    pub verb: String,
    pub request_path: String,
    /// `<VERB> <request path>`.
    pub label: String,
}

impl OperationEntry {
    fn new(op: &OperationDescriptor, href: String) -> Self {
        let verb = op.verb.to_uppercase();
        Self {
            fragment: op.slug.clone(),
            href,
            label: format!("{} {}", verb, op.request_path),
            verb,
            request_path: op.request_path.clone(),
        }
    }
}

/// Render one version's categories into page content.
///
/// Categories with operations get a heading linking to their reference page.
/// Empty categories get no heading but still produce an (empty) list block.
pub fn render(categories: &CategoryMap, locale: &str, links: &dyn LinkBuilder) -> PageContent {
    let blocks = categories
        .iter()
        .map(|(category, operations)| {
            let heading = (!operations.is_empty()).then(|| Heading {
                id: category.to_string(),
                href: links.reference_href(locale, category),
                text: category.to_string(),
            });
            let entries = operations
                .iter()
                .map(|op| {
                    OperationEntry::new(op, links.operation_href(locale, category, &op.slug))
                })
                .collect();
            CategoryBlock {
                category: category.to_string(),
                heading,
                entries,
            }
        })
        .collect();

    PageContent {
        locale: locale.to_string(),
        blocks,
    }
}
