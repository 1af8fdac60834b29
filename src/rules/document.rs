//! Root, info, contact, license, tag and external-docs rules.

use regex::Regex;
use std::sync::LazyLock;

use super::{Occurrences, check_enum, check_url, require};
use crate::catalog::RuleDescriptor;
use crate::engine::Reporter;
use crate::enums::{Generation, TRANSFER_SCHEMES};
use crate::model::*;
use crate::visitor::Visitor;

static OAS30_VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^3\.0\.[0-9]+$").unwrap());

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("DOC-001", "Missing Specification Version", RequiredProperty, BOTH, MANDATED, VersionMissing,
            "The document is missing the `{property}` version property."),
        rule!("DOC-002", "Unsupported Specification Version", InvalidPropertyValue, BOTH, MANDATED, VersionUnsupported,
            "Version '{value}' is not supported; expected {expected}."),
        rule!("DOC-003", "Invalid Host", InvalidPropertyFormat, OAS20, MANDATED, HostInvalid,
            "Host '{value}' must not contain a scheme, a path or whitespace."),
        rule!("DOC-004", "Invalid Base Path", InvalidPropertyFormat, OAS20, MANDATED, BasePathInvalid,
            "Base path '{value}' must start with a forward slash."),
        rule!("DOC-005", "Invalid Transfer Scheme", InvalidPropertyValue, OAS20, MANDATED, TransferSchemeInvalid,
            "Transfer scheme '{value}' is not one of: {allowed}."),
        rule!("DOC-006", "Invalid Mime Type", InvalidPropertyFormat, OAS20, MANDATED, MimeTypeInvalid,
            "'{value}' in `{property}` is not a valid mime type."),
        rule!("INF-001", "Missing Info", RequiredProperty, BOTH, MANDATED, InfoMissing,
            "The document is missing the required `info` property."),
        rule!("INF-002", "Missing API Title", RequiredProperty, BOTH, MANDATED, InfoTitleMissing,
            "The API is missing a title."),
        rule!("INF-003", "Missing API Version", RequiredProperty, BOTH, MANDATED, InfoVersionMissing,
            "The API is missing a version."),
        rule!("INF-004", "Invalid Terms of Service URL", InvalidPropertyFormat, BOTH, MANDATED, TermsOfServiceInvalid,
            "Terms of service '{value}' is not a valid URL."),
        rule!("INF-005", "Missing API Description", BestPractice, BOTH, OPTIONAL, InfoDescriptionMissing,
            "The API is missing a description."),
        rule!("MARK-001", "Invalid Description Markup", InvalidPropertyFormat, BOTH, MANDATED, MarkupInvalid,
            "The description is not valid CommonMark."),
        rule!("CTC-001", "Invalid Contact URL", InvalidPropertyFormat, BOTH, MANDATED, ContactUrlInvalid,
            "Contact URL '{value}' is not a valid URL."),
        rule!("CTC-002", "Invalid Contact Email", InvalidPropertyFormat, BOTH, MANDATED, ContactEmailInvalid,
            "Contact email '{value}' is not a valid email address."),
        rule!("LIC-001", "Missing License Name", RequiredProperty, BOTH, MANDATED, LicenseNameMissing,
            "The license is missing a name."),
        rule!("LIC-002", "Invalid License URL", InvalidPropertyFormat, BOTH, MANDATED, LicenseUrlInvalid,
            "License URL '{value}' is not a valid URL."),
        rule!("TAG-001", "Missing Tag Name", RequiredProperty, BOTH, MANDATED, TagNameMissing,
            "The tag is missing a name."),
        rule!("TAG-002", "Duplicate Tag Name", Uniqueness, BOTH, MANDATED, TagNameDuplicate,
            "Tag name '{name}' is declared more than once."),
        rule!("ED-001", "Missing External Documentation URL", RequiredProperty, BOTH, MANDATED, ExternalDocsUrlMissing,
            "External documentation is missing a URL."),
        rule!("ED-002", "Invalid External Documentation URL", InvalidPropertyFormat, BOTH, MANDATED, ExternalDocsUrlInvalid,
            "External documentation URL '{value}' is not a valid URL."),
    ]
}

// ─── Root ───────────────────────────────────────────────────────────────────

declare_rule!(both VersionMissing);

impl Visitor for VersionMissing {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        let property = node.generation().version_property();
        require(&self.reporter, node, node.version.is_some(), property);
    }
}

declare_rule!(both VersionUnsupported);

impl Visitor for VersionUnsupported {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        let Some(version) = node.get().version.as_deref() else {
            return;
        };
        let (supported, expected) = match node.generation() {
            Generation::Oas20 => (version == "2.0", "2.0"),
            Generation::Oas30 => (OAS30_VERSION_RE.is_match(version), "3.0.x"),
        };
        if !supported {
            let property = node.generation().version_property();
            self.reporter
                .report(node, Some(property), &[("value", version), ("expected", expected)]);
        }
    }
}

declare_rule!(both HostInvalid);

impl Visitor for HostInvalid {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        if let Some(host) = node.get().host.as_deref()
            && (host.contains('/') || host.chars().any(char::is_whitespace))
        {
            self.reporter.report(node, Some("host"), &[("value", host)]);
        }
    }
}

declare_rule!(both BasePathInvalid);

impl Visitor for BasePathInvalid {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        if let Some(base) = node.get().base_path.as_deref()
            && !base.starts_with('/')
        {
            self.reporter.report(node, Some("basePath"), &[("value", base)]);
        }
    }
}

declare_rule!(both TransferSchemeInvalid);

impl TransferSchemeInvalid {
    fn check<T>(&self, node: NodeRef<'_, T>, schemes: Option<&Vec<String>>) {
        for scheme in schemes.into_iter().flatten() {
            check_enum(&self.reporter, node, Some(scheme.as_str()), TRANSFER_SCHEMES, "schemes");
        }
    }
}

impl Visitor for TransferSchemeInvalid {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        self.check(node, node.get().schemes.as_ref());
    }

    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        self.check(node, node.get().schemes.as_ref());
    }
}

declare_rule!(both MimeTypeInvalid);

fn check_mime_types<T>(reporter: &Reporter, node: NodeRef<'_, T>, values: Option<&Vec<String>>, property: &str) {
    for value in values.into_iter().flatten() {
        if !(reporter.formats().mime_type)(value) {
            reporter.report(node, Some(property), &[("property", property), ("value", value.as_str())]);
        }
    }
}

impl Visitor for MimeTypeInvalid {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        check_mime_types(&self.reporter, node, node.get().consumes.as_ref(), "consumes");
        check_mime_types(&self.reporter, node, node.get().produces.as_ref(), "produces");
    }

    fn visit_operation(&mut self, node: NodeRef<'_, Operation>) {
        check_mime_types(&self.reporter, node, node.get().consumes.as_ref(), "consumes");
        check_mime_types(&self.reporter, node, node.get().produces.as_ref(), "produces");
    }
}

// ─── Info ───────────────────────────────────────────────────────────────────

declare_rule!(both InfoMissing);

impl Visitor for InfoMissing {
    fn visit_document(&mut self, node: NodeRef<'_, DocumentRoot>) {
        require(&self.reporter, node, node.info.is_some(), "info");
    }
}

declare_rule!(both InfoTitleMissing);

impl Visitor for InfoTitleMissing {
    fn visit_info(&mut self, node: NodeRef<'_, Info>) {
        require(&self.reporter, node, node.title.is_some(), "title");
    }
}

declare_rule!(both InfoVersionMissing);

impl Visitor for InfoVersionMissing {
    fn visit_info(&mut self, node: NodeRef<'_, Info>) {
        require(&self.reporter, node, node.version.is_some(), "version");
    }
}

declare_rule!(both TermsOfServiceInvalid);

impl Visitor for TermsOfServiceInvalid {
    fn visit_info(&mut self, node: NodeRef<'_, Info>) {
        check_url(&self.reporter, node, node.get().terms_of_service.as_deref(), "termsOfService");
    }
}

declare_rule!(both InfoDescriptionMissing);

impl Visitor for InfoDescriptionMissing {
    fn visit_info(&mut self, node: NodeRef<'_, Info>) {
        require(&self.reporter, node, node.description.is_some(), "description");
    }
}

declare_rule!(both MarkupInvalid);

impl Visitor for MarkupInvalid {
    fn visit_node(&mut self, node: AnyNode<'_>) {
        if node.reference().is_some() {
            return;
        }
        if let Some(description) = node.get().data().description()
            && !(self.reporter.formats().markup)(description)
        {
            self.reporter.report(node, Some("description"), &[]);
        }
    }
}

// ─── Contact, license ───────────────────────────────────────────────────────

declare_rule!(both ContactUrlInvalid);

impl Visitor for ContactUrlInvalid {
    fn visit_contact(&mut self, node: NodeRef<'_, Contact>) {
        check_url(&self.reporter, node, node.get().url.as_deref(), "url");
    }
}

declare_rule!(both ContactEmailInvalid);

impl Visitor for ContactEmailInvalid {
    fn visit_contact(&mut self, node: NodeRef<'_, Contact>) {
        if let Some(email) = node.get().email.as_deref()
            && !(self.reporter.formats().email)(email)
        {
            self.reporter.report(node, Some("email"), &[("value", email)]);
        }
    }
}

declare_rule!(both LicenseNameMissing);

impl Visitor for LicenseNameMissing {
    fn visit_license(&mut self, node: NodeRef<'_, License>) {
        require(&self.reporter, node, node.name.is_some(), "name");
    }
}

declare_rule!(both LicenseUrlInvalid);

impl Visitor for LicenseUrlInvalid {
    fn visit_license(&mut self, node: NodeRef<'_, License>) {
        check_url(&self.reporter, node, node.get().url.as_deref(), "url");
    }
}

// ─── Tags, external docs ────────────────────────────────────────────────────

declare_rule!(both TagNameMissing);

impl Visitor for TagNameMissing {
    fn visit_tag(&mut self, node: NodeRef<'_, Tag>) {
        require(&self.reporter, node, node.name.is_some(), "name");
    }
}

declare_rule!(both TagNameDuplicate { names: Occurrences });

impl Visitor for TagNameDuplicate {
    fn visit_tag(&mut self, node: NodeRef<'_, Tag>) {
        if let Some(name) = node.get().name.as_deref() {
            self.names.check(
                &self.reporter,
                node.document(),
                name,
                node.id(),
                Some("name"),
                &[("name", name)],
            );
        }
    }
}

declare_rule!(both ExternalDocsUrlMissing);

impl Visitor for ExternalDocsUrlMissing {
    fn visit_external_docs(&mut self, node: NodeRef<'_, ExternalDocumentation>) {
        require(&self.reporter, node, node.url.is_some(), "url");
    }
}

declare_rule!(both ExternalDocsUrlInvalid);

impl Visitor for ExternalDocsUrlInvalid {
    fn visit_external_docs(&mut self, node: NodeRef<'_, ExternalDocumentation>) {
        check_url(&self.reporter, node, node.get().url.as_deref(), "url");
    }
}
