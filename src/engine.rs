//! The validation engine.
//!
//! One run moves through reset, ruleset construction, a single combined
//! traversal and collection. Rules report into a sink shared by the run's
//! [`Reporter`]s; the collected problems are attached to their nodes once the
//! traversal has released the document.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tracing::{debug, instrument, trace};

use crate::catalog::{RuleCatalog, RuleDescriptor};
use crate::enums::Severity;
use crate::formats::FormatCheckers;
use crate::model::{Document, NodeId, NodeRef};
use crate::path::path_of;
use crate::policy::{DefaultSeverityPolicy, SeverityPolicy};
use crate::problem::Problem;
use crate::visitor::{CompositeVisitor, ValidationRule, traverse};

struct RunContext {
    policy: Arc<dyn SeverityPolicy>,
    formats: FormatCheckers,
    problems: RefCell<Vec<Problem>>,
}

/// Problem sink bound to one rule for the duration of a run.
#[derive(Clone)]
pub struct Reporter {
    rule: RuleDescriptor,
    context: Rc<RunContext>,
}

impl Reporter {
    pub fn rule(&self) -> &RuleDescriptor {
        &self.rule
    }

    pub fn formats(&self) -> &FormatCheckers {
        &self.context.formats
    }

    /// Reports a violation on `node`.
    pub fn report<T>(&self, node: NodeRef<'_, T>, property: Option<&str>, args: &[(&str, &str)]) {
        self.report_at(node.document(), node.id(), property, args);
    }

    /// Reports a violation on an arbitrary node of `doc`.
    pub fn report_at(
        &self,
        doc: &Document,
        node: NodeId,
        property: Option<&str>,
        args: &[(&str, &str)],
    ) {
        let severity = self.context.policy.severity(&self.rule);
        if severity == Severity::Ignore {
            return;
        }
        let path = path_of(doc, node);
        trace!(code = self.rule.code, path = %path, "problem reported");
        self.context.problems.borrow_mut().push(Problem {
            code: self.rule.code.to_string(),
            path,
            property: property.map(str::to_string),
            message: self.rule.render(args),
            severity,
            node,
        });
    }
}

/// Validates `doc` with the standard catalog and the default severity policy.
pub fn validate(doc: &mut Document) -> Vec<Problem> {
    ValidationEngine::default().validate(doc)
}

/// Runs the rule catalog over documents.
///
/// Holds no state across runs beyond its configuration.
#[derive(Clone)]
pub struct ValidationEngine {
    catalog: RuleCatalog,
    policy: Arc<dyn SeverityPolicy>,
    formats: FormatCheckers,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        ValidationEngine::new(RuleCatalog::standard())
    }
}

impl ValidationEngine {
    pub fn new(catalog: RuleCatalog) -> Self {
        ValidationEngine {
            catalog,
            policy: Arc::new(DefaultSeverityPolicy),
            formats: FormatCheckers::default(),
        }
    }

    pub fn set_severity_policy(&mut self, policy: impl SeverityPolicy + 'static) {
        self.policy = Arc::new(policy);
    }

    pub fn with_severity_policy(mut self, policy: impl SeverityPolicy + 'static) -> Self {
        self.set_severity_policy(policy);
        self
    }

    pub fn set_format_checkers(&mut self, formats: FormatCheckers) {
        self.formats = formats;
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn list_rule_descriptors(&self) -> &[RuleDescriptor] {
        self.catalog.descriptors()
    }

    /// Validates `doc`, replacing any problems attached by an earlier run.
    ///
    /// Problems come back in traversal order and are attached to their nodes.
    #[instrument(skip_all, fields(generation = %doc.generation()))]
    pub fn validate(&self, doc: &mut Document) -> Vec<Problem> {
        doc.clear_problems();

        let context = Rc::new(RunContext {
            policy: Arc::clone(&self.policy),
            formats: self.formats,
            problems: RefCell::new(Vec::new()),
        });
        let mut ruleset: CompositeVisitor<dyn ValidationRule> = CompositeVisitor::new();
        for rule in self.catalog.for_generation(doc.generation()) {
            let reporter = Reporter {
                rule: rule.clone(),
                context: Rc::clone(&context),
            };
            ruleset.push((rule.factory)(reporter));
        }
        debug!(rules = ruleset.len(), "ruleset built");

        traverse(doc, &mut ruleset);
        drop(ruleset);

        let problems = context.problems.take();
        for problem in &problems {
            if let Some(node) = doc.node_mut(problem.node) {
                node.add_problem(
                    &problem.code,
                    problem.path.clone(),
                    problem.property.as_deref(),
                    problem.message.clone(),
                    problem.severity,
                );
            }
        }
        debug!(problems = problems.len(), "run complete");
        problems
    }
}
