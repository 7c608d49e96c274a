//! Route resolution
//!
//! Decides which repository a trigger label sends the issue to. Label names
//! are compared exactly; `Bug` does not match a `bug` trigger.

use gh_issue_router_config::{RepoTarget, RouterSpec};

/// Where a resolved destination came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    /// The configured router
    Static,
    /// A `key:repo` label overriding the configured destination
    CustomLabel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub destination: RepoTarget,
    pub source: RouteSource,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Route(Route),
    /// Not an error; the run ends quietly
    NoMatch { label: Option<String> },
}

/// Label-embedded routing override
///
/// A label `key:repo` whose `key` is a configured trigger sends the issue
/// to `repo` instead of the configured destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomLabelRouting;

impl CustomLabelRouting {
    fn resolve(&self, spec: &RouterSpec, label: &str) -> Option<RepoTarget> {
        let (key, repo) = label.split_once(':')?;
        let key_is_trigger = match spec {
            RouterSpec::Inline { trigger, .. } => trigger.as_deref() == Some(key),
            RouterSpec::Mapping(mapping) => mapping.contains_key(key),
        };
        if !key_is_trigger {
            return None;
        }

        match RepoTarget::parse(repo) {
            Ok(target) => Some(target),
            Err(err) => {
                log::warn!("Ignoring custom routing label '{}': {}", label, err);
                None
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    spec: RouterSpec,
    custom: Option<CustomLabelRouting>,
}

impl Router {
    pub fn new(spec: RouterSpec, enable_custom_label_routing: bool) -> Self {
        Self {
            spec,
            custom: enable_custom_label_routing.then_some(CustomLabelRouting),
        }
    }

    /// Resolve the destination for the label that triggered the run
    pub fn resolve(&self, label: Option<&str>) -> RouteDecision {
        if let (Some(custom), Some(label)) = (self.custom, label) {
            if let Some(destination) = custom.resolve(&self.spec, label) {
                log::debug!("Label '{}' overrides the destination", label);
                return RouteDecision::Route(Route {
                    destination,
                    source: RouteSource::CustomLabel,
                });
            }
        }

        let destination = match (&self.spec, label) {
            (RouterSpec::Inline { trigger: None, destination }, _) => Some(destination),
            (RouterSpec::Inline { trigger: Some(trigger), destination }, Some(label))
                if trigger == label =>
            {
                Some(destination)
            }
            (RouterSpec::Inline { .. }, _) => None,
            (RouterSpec::Mapping(mapping), Some(label)) => mapping.get(label),
            (RouterSpec::Mapping(_), None) => None,
        };

        match destination {
            Some(destination) => RouteDecision::Route(Route {
                destination: destination.clone(),
                source: RouteSource::Static,
            }),
            None => RouteDecision::NoMatch {
                label: label.map(str::to_string),
            },
        }
    }
}
