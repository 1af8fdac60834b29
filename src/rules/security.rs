//! Security scheme, OAuth flow and security requirement rules.

use super::{check_enum, check_url, declared_schemes, dereference, field_name, require};
use crate::catalog::RuleDescriptor;
use crate::enums::{Generation, OAS20_OAUTH_FLOWS, api_key_locations, security_scheme_types};
use crate::model::*;
use crate::visitor::{Oas30Visitor, Visitor};

pub(super) fn rules() -> Vec<RuleDescriptor> {
    vec![
        rule!("SS-001", "Missing Security Scheme Type", RequiredProperty, BOTH, MANDATED, SchemeTypeMissing,
            "The security scheme is missing a type."),
        rule!("SS-002", "Invalid Security Scheme Type", InvalidPropertyValue, BOTH, MANDATED, SchemeTypeInvalid,
            "Security scheme type '{value}' is not one of: {allowed}."),
        rule!("SS-003", "Missing API Key Name", RequiredProperty, BOTH, MANDATED, ApiKeyNameMissing,
            "An apiKey security scheme must declare a name."),
        rule!("SS-004", "Missing API Key Location", RequiredProperty, BOTH, MANDATED, ApiKeyLocationMissing,
            "An apiKey security scheme must declare `in`."),
        rule!("SS-005", "Invalid API Key Location", InvalidPropertyValue, BOTH, MANDATED, ApiKeyLocationInvalid,
            "API key location '{value}' is not one of: {allowed}."),
        rule!("SS-006", "Missing OAuth Flow", RequiredProperty, OAS20, MANDATED, OAuthFlowMissing,
            "An oauth2 security scheme must declare a flow."),
        rule!("SS-007", "Invalid OAuth Flow", InvalidPropertyValue, OAS20, MANDATED, OAuthFlowInvalid,
            "OAuth flow '{value}' is not one of: {allowed}."),
        rule!("SS-008", "Missing OAuth Authorization URL", RequiredProperty, OAS20, MANDATED, OAuthAuthorizationUrlMissing,
            "The '{flow}' flow requires an authorizationUrl."),
        rule!("SS-009", "Missing OAuth Token URL", RequiredProperty, OAS20, MANDATED, OAuthTokenUrlMissing,
            "The '{flow}' flow requires a tokenUrl."),
        rule!("SS-010", "Missing OAuth Scopes", RequiredProperty, OAS20, MANDATED, OAuthScopesMissing,
            "An oauth2 security scheme must declare scopes."),
        rule!("SS-011", "Invalid Security Scheme URL", InvalidPropertyFormat, BOTH, MANDATED, SchemeUrlInvalid,
            "`{property}` value '{value}' is not a valid URL."),
        rule!("SS-012", "Missing HTTP Scheme", RequiredProperty, OAS30, MANDATED, HttpSchemeMissing,
            "An http security scheme must declare `scheme`."),
        rule!("SS-013", "Missing OAuth Flows", RequiredProperty, OAS30, MANDATED, OAuthFlowsMissing,
            "An oauth2 security scheme must declare `flows`."),
        rule!("SS-014", "Missing OpenID Connect URL", RequiredProperty, OAS30, MANDATED, OpenIdConnectUrlMissing,
            "An openIdConnect security scheme must declare `openIdConnectUrl`."),
        rule!("FLOW-001", "Missing Flow Authorization URL", RequiredProperty, OAS30, MANDATED, FlowAuthorizationUrlMissing,
            "The '{flow}' flow requires an authorizationUrl."),
        rule!("FLOW-002", "Missing Flow Token URL", RequiredProperty, OAS30, MANDATED, FlowTokenUrlMissing,
            "The '{flow}' flow requires a tokenUrl."),
        rule!("FLOW-003", "Missing Flow Scopes", RequiredProperty, OAS30, MANDATED, FlowScopesMissing,
            "The OAuth flow must declare scopes."),
        rule!("FLOW-004", "Invalid Flow URL", InvalidPropertyFormat, OAS30, MANDATED, FlowUrlInvalid,
            "`{property}` value '{value}' is not a valid URL."),
        rule!("SREQ-001", "Undeclared Security Scheme", InvalidReference, BOTH, MANDATED, RequirementSchemeUndeclared,
            "Security requirement names undeclared scheme '{name}'."),
        rule!("SREQ-002", "Unexpected Requirement Scopes", InvalidPropertyValue, BOTH, MANDATED, RequirementScopesUnexpected,
            "Scheme '{name}' does not use scopes; the requirement must list none."),
    ]
}

/// The scheme's type when it is a plain (non-reference) scheme.
fn scheme_type<'a>(node: &NodeRef<'a, SecurityScheme>) -> Option<&'a str> {
    if node.reference.is_some() {
        return None;
    }
    node.get().type_name.as_deref()
}

// ─── Schemes ────────────────────────────────────────────────────────────────

declare_rule!(both SchemeTypeMissing);

impl Visitor for SchemeTypeMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if node.reference.is_none() {
            require(&self.reporter, node, node.type_name.is_some(), "type");
        }
    }
}

declare_rule!(both SchemeTypeInvalid);

impl Visitor for SchemeTypeInvalid {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        let allowed = security_scheme_types(node.generation());
        check_enum(&self.reporter, node, scheme_type(&node), allowed, "type");
    }
}

declare_rule!(both ApiKeyNameMissing);

impl Visitor for ApiKeyNameMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("apiKey") {
            require(&self.reporter, node, node.name.is_some(), "name");
        }
    }
}

declare_rule!(both ApiKeyLocationMissing);

impl Visitor for ApiKeyLocationMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("apiKey") {
            require(&self.reporter, node, node.location.is_some(), "in");
        }
    }
}

declare_rule!(both ApiKeyLocationInvalid);

impl Visitor for ApiKeyLocationInvalid {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("apiKey") {
            let allowed = api_key_locations(node.generation());
            check_enum(&self.reporter, node, node.get().location.as_deref(), allowed, "in");
        }
    }
}

declare_rule!(both OAuthFlowMissing);

impl Visitor for OAuthFlowMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("oauth2") {
            require(&self.reporter, node, node.flow.is_some(), "flow");
        }
    }
}

declare_rule!(both OAuthFlowInvalid);

impl Visitor for OAuthFlowInvalid {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("oauth2") {
            check_enum(&self.reporter, node, node.get().flow.as_deref(), OAS20_OAUTH_FLOWS, "flow");
        }
    }
}

declare_rule!(both OAuthAuthorizationUrlMissing);

impl Visitor for OAuthAuthorizationUrlMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) != Some("oauth2") {
            return;
        }
        if let Some(flow @ ("implicit" | "accessCode")) = node.get().flow.as_deref()
            && node.authorization_url.is_none()
        {
            self.reporter
                .report(node, Some("authorizationUrl"), &[("flow", flow)]);
        }
    }
}

declare_rule!(both OAuthTokenUrlMissing);

impl Visitor for OAuthTokenUrlMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) != Some("oauth2") {
            return;
        }
        if let Some(flow @ ("password" | "application" | "accessCode")) = node.get().flow.as_deref()
            && node.token_url.is_none()
        {
            self.reporter.report(node, Some("tokenUrl"), &[("flow", flow)]);
        }
    }
}

declare_rule!(both OAuthScopesMissing);

impl Visitor for OAuthScopesMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("oauth2") {
            require(&self.reporter, node, node.scopes.is_some(), "scopes");
        }
    }
}

declare_rule!(both SchemeUrlInvalid);

impl Visitor for SchemeUrlInvalid {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if node.reference.is_some() {
            return;
        }
        let scheme = node.get();
        check_url(&self.reporter, node, scheme.authorization_url.as_deref(), "authorizationUrl");
        check_url(&self.reporter, node, scheme.token_url.as_deref(), "tokenUrl");
        check_url(&self.reporter, node, scheme.open_id_connect_url.as_deref(), "openIdConnectUrl");
    }
}

declare_rule!(both HttpSchemeMissing);

impl Visitor for HttpSchemeMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("http") {
            require(&self.reporter, node, node.scheme.is_some(), "scheme");
        }
    }
}

declare_rule!(both OAuthFlowsMissing);

impl Visitor for OAuthFlowsMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("oauth2") {
            require(&self.reporter, node, node.flows.is_some(), "flows");
        }
    }
}

declare_rule!(both OpenIdConnectUrlMissing);

impl Visitor for OpenIdConnectUrlMissing {
    fn visit_security_scheme(&mut self, node: NodeRef<'_, SecurityScheme>) {
        if scheme_type(&node) == Some("openIdConnect") {
            require(&self.reporter, node, node.open_id_connect_url.is_some(), "openIdConnectUrl");
        }
    }
}

// ─── OAuth flows (3.0) ──────────────────────────────────────────────────────

declare_rule!(oas30 FlowAuthorizationUrlMissing);

impl Oas30Visitor for FlowAuthorizationUrlMissing {
    fn visit_oauth_flow(&mut self, node: NodeRef<'_, OAuthFlow>) {
        if let Some(flow @ ("implicit" | "authorizationCode")) = field_name(node.erase())
            && node.authorization_url.is_none()
        {
            self.reporter
                .report(node, Some("authorizationUrl"), &[("flow", flow)]);
        }
    }
}

declare_rule!(oas30 FlowTokenUrlMissing);

impl Oas30Visitor for FlowTokenUrlMissing {
    fn visit_oauth_flow(&mut self, node: NodeRef<'_, OAuthFlow>) {
        if let Some(flow @ ("password" | "clientCredentials" | "authorizationCode")) =
            field_name(node.erase())
            && node.token_url.is_none()
        {
            self.reporter.report(node, Some("tokenUrl"), &[("flow", flow)]);
        }
    }
}

declare_rule!(oas30 FlowScopesMissing);

impl Oas30Visitor for FlowScopesMissing {
    fn visit_oauth_flow(&mut self, node: NodeRef<'_, OAuthFlow>) {
        require(&self.reporter, node, node.scopes.is_some(), "scopes");
    }
}

declare_rule!(oas30 FlowUrlInvalid);

impl Oas30Visitor for FlowUrlInvalid {
    fn visit_oauth_flow(&mut self, node: NodeRef<'_, OAuthFlow>) {
        let flow = node.get();
        check_url(&self.reporter, node, flow.authorization_url.as_deref(), "authorizationUrl");
        check_url(&self.reporter, node, flow.token_url.as_deref(), "tokenUrl");
        check_url(&self.reporter, node, flow.refresh_url.as_deref(), "refreshUrl");
    }
}

// ─── Requirements ───────────────────────────────────────────────────────────

declare_rule!(both RequirementSchemeUndeclared);

impl Visitor for RequirementSchemeUndeclared {
    fn visit_security_requirement(&mut self, node: NodeRef<'_, SecurityRequirement>) {
        let declared = declared_schemes(node.document());
        for name in node.get().requirements.keys() {
            if !declared.iter().any(|(declared, _)| declared == name) {
                self.reporter
                    .report(node, Some(name.as_str()), &[("name", name.as_str())]);
            }
        }
    }
}

declare_rule!(both RequirementScopesUnexpected);

impl Visitor for RequirementScopesUnexpected {
    fn visit_security_requirement(&mut self, node: NodeRef<'_, SecurityRequirement>) {
        let doc = node.document();
        let declared = declared_schemes(doc);
        for (name, scopes) in &node.get().requirements {
            if scopes.is_empty() {
                continue;
            }
            let Some(scheme) = declared
                .iter()
                .find(|(declared, _)| declared == name)
                .and_then(|(_, id)| dereference::<SecurityScheme>(doc, *id))
            else {
                continue;
            };
            let scoped = match (doc.generation(), scheme.get().type_name.as_deref()) {
                (_, Some("oauth2")) => true,
                (Generation::Oas30, Some("openIdConnect")) => true,
                (_, None) => true,
                _ => false,
            };
            if !scoped {
                self.reporter
                    .report(node, Some(name.as_str()), &[("name", name.as_str())]);
            }
        }
    }
}
