//! Rule descriptors and the integrity-checked catalog that holds them.

use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use crate::engine::Reporter;
use crate::enums::{Generation, RuleFamily};
use crate::error::CatalogError;
use crate::visitor::ValidationRule;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Builds the visitor that implements a rule, bound to its reporter.
pub type RuleFactory = fn(Reporter) -> Box<dyn ValidationRule>;

/// Static metadata describing one validation check.
#[derive(Clone, Serialize)]
pub struct RuleDescriptor {
    pub code: &'static str,
    pub name: &'static str,
    pub family: RuleFamily,
    pub generations: &'static [Generation],
    /// Whether the OpenAPI specification itself requires the check.
    pub spec_mandated: bool,
    /// Message template with `{placeholder}` arguments.
    pub message: &'static str,
    #[serde(skip)]
    pub factory: RuleFactory,
}

impl RuleDescriptor {
    pub fn applies_to(&self, generation: Generation) -> bool {
        self.generations.contains(&generation)
    }

    pub fn render(&self, args: &[(&str, &str)]) -> String {
        render_template(self.message, args)
    }
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("family", &self.family)
            .field("generations", &self.generations)
            .field("spec_mandated", &self.spec_mandated)
            .finish_non_exhaustive()
    }
}

/// Substitutes `{name}` placeholders. Placeholders without an argument are
/// left as written.
pub fn render_template(template: &str, args: &[(&str, &str)]) -> String {
    PLACEHOLDER_RE
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            args.iter()
                .find(|(key, _)| *key == name)
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

/// An immutable set of rule descriptors with unique codes and names.
#[derive(Clone, Debug)]
pub struct RuleCatalog {
    descriptors: Vec<RuleDescriptor>,
}

impl RuleCatalog {
    /// Checks integrity: codes unique, names unique, every rule applicable
    /// to at least one generation.
    pub fn new(descriptors: Vec<RuleDescriptor>) -> Result<Self, CatalogError> {
        let mut codes = HashSet::new();
        for d in &descriptors {
            if !codes.insert(d.code) {
                return Err(CatalogError::DuplicateCode(d.code.to_string()));
            }
        }
        let mut names = HashSet::new();
        for d in &descriptors {
            if !names.insert(d.name) {
                return Err(CatalogError::DuplicateName(d.name.to_string()));
            }
        }
        if let Some(d) = descriptors.iter().find(|d| d.generations.is_empty()) {
            return Err(CatalogError::EmptyGenerations(d.code.to_string()));
        }
        Ok(RuleCatalog { descriptors })
    }

    /// The built-in catalog.
    ///
    /// # Panics
    ///
    /// If the built-in descriptors violate catalog integrity.
    pub fn standard() -> Self {
        match RuleCatalog::new(crate::rules::standard_rules()) {
            Ok(catalog) => catalog,
            Err(e) => panic!("built-in rule catalog is inconsistent: {}", e),
        }
    }

    pub fn descriptors(&self) -> &[RuleDescriptor] {
        &self.descriptors
    }

    pub fn get(&self, code: &str) -> Option<&RuleDescriptor> {
        self.descriptors.iter().find(|d| d.code == code)
    }

    pub fn for_generation(
        &self,
        generation: Generation,
    ) -> impl Iterator<Item = &RuleDescriptor> + '_ {
        self.descriptors
            .iter()
            .filter(move |d| d.applies_to(generation))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
