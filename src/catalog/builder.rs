use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    catalog::{
        classify::{Visibility, classify},
        evaluator::Evaluator,
        render::{OperationRecord, render_method},
    },
    domain::model::ServiceDefinition,
};

/// Classified operations of one service model.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub service: String,
    pub visible: Arc<[OperationRecord]>,
    pub hidden: Arc<[OperationRecord]>,
    /// Methods dropped because they failed to render.
    pub skipped: Vec<String>,
}

impl Catalog {
    #[must_use]
    pub fn records(&self, hidden: bool) -> Arc<[OperationRecord]> {
        if hidden {
            Arc::clone(&self.hidden)
        } else {
            Arc::clone(&self.visible)
        }
    }
}

/// Renders and classifies every method of `definition`. A method that fails
/// to render is logged and left out.
#[must_use]
pub fn build_catalog(definition: &ServiceDefinition, base_endpoint: &str) -> Catalog {
    let evaluator = Evaluator::new(base_endpoint, Arc::clone(&definition.context));
    let mut visible = Vec::new();
    let mut hidden = Vec::new();
    let mut skipped = Vec::new();

    for method in definition.all_methods() {
        let records = match render_method(&evaluator, method) {
            Ok(records) => records,
            Err(error) => {
                warn!(
                    "skipping method service={} method={}: {error}",
                    definition.name, method.name
                );
                skipped.push(method.name.clone());
                continue;
            }
        };

        match classify(&method.name) {
            Visibility::Visible => visible.extend(records),
            Visibility::Hidden => hidden.extend(records),
        }
    }

    info!(
        "built operation catalog service={} visible={} hidden={} skipped={}",
        definition.name,
        visible.len(),
        hidden.len(),
        skipped.len()
    );

    Catalog {
        service: definition.name.clone(),
        visible: visible.into(),
        hidden: hidden.into(),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{
        context::ContextObject,
        model::{
            BindingExpression, HttpVerb, Member, MethodDescriptor, OperationGroup,
            ServiceDefinition, TypeMetadata,
        },
    };

    use super::build_catalog;

    fn site_url(suffix: &str) -> BindingExpression {
        BindingExpression::concat([
            BindingExpression::instance().property("BaseUri"),
            BindingExpression::literal("/sites/"),
            BindingExpression::parameter("siteName"),
            BindingExpression::literal(suffix),
        ])
    }

    #[test]
    fn widget_model_yields_single_visible_record() {
        let definition = ServiceDefinition::new("Widgets", ContextObject::new().into_shared())
            .with_method(
                MethodDescriptor::new(
                    "GetWidget",
                    HttpVerb::Get,
                    BindingExpression::concat([
                        BindingExpression::instance().property("BaseUri"),
                        BindingExpression::literal("/widgets/"),
                        BindingExpression::parameter("widgetName"),
                    ]),
                )
                .with_response_body(TypeMetadata::object([Member::new(
                    "name",
                    TypeMetadata::primitive("String"),
                )])),
            );

        let catalog = build_catalog(&definition, "https://arm.example");
        assert!(catalog.hidden.is_empty());
        assert_eq!(catalog.visible.len(), 1);
        let record = &catalog.visible[0];
        assert_eq!(record.url, "https://arm.example/widgets/{widgetName}");
        assert_eq!(record.response_body, Some(json!({ "name": "(string)" })));
        assert!(record.request_body.is_none());
    }

    #[test]
    fn every_method_lands_in_exactly_one_set() {
        let definition = ServiceDefinition::new("WebSites", ContextObject::new().into_shared())
            .with_method(MethodDescriptor::new(
                "ListOperations",
                HttpVerb::Get,
                BindingExpression::literal("/operations"),
            ))
            .with_group(OperationGroup {
                name: "Sites".to_owned(),
                methods: vec![
                    MethodDescriptor::new("GetSiteConfig", HttpVerb::Get, site_url("/config/web")),
                    MethodDescriptor::new("BackupSite", HttpVerb::Post, site_url("/backup")),
                    MethodDescriptor::new(
                        "GetSiteSlot",
                        HttpVerb::Get,
                        BindingExpression::concat([
                            site_url(""),
                            BindingExpression::conditional(BindingExpression::literal("/slots/x")),
                        ]),
                    ),
                ],
            });

        let catalog = build_catalog(&definition, "https://arm.example");
        let visible: Vec<&str> = catalog
            .visible
            .iter()
            .map(|record| record.method_name.as_str())
            .collect();
        let hidden: Vec<&str> = catalog
            .hidden
            .iter()
            .map(|record| record.method_name.as_str())
            .collect();

        assert_eq!(
            visible,
            vec!["ListOperations", "GetSiteConfig", "GetSiteSlot", "GetSiteSlot"]
        );
        assert_eq!(hidden, vec!["BackupSite"]);
        assert!(catalog.skipped.is_empty());
    }

    #[test]
    fn malformed_method_is_skipped_without_aborting_build() {
        let definition = ServiceDefinition::new("WebSites", ContextObject::new().into_shared())
            .with_method(MethodDescriptor::new(
                "Broken",
                HttpVerb::Get,
                BindingExpression::Unsupported,
            ))
            .with_method(
                MethodDescriptor::new("BadBody", HttpVerb::Put, BindingExpression::literal("/x"))
                    .with_request_body(TypeMetadata::Array {
                        element_format: None,
                        element_type: None,
                    }),
            )
            .with_method(MethodDescriptor::new(
                "ListSites",
                HttpVerb::Get,
                BindingExpression::literal("/sites"),
            ));

        let catalog = build_catalog(&definition, "https://arm.example");
        assert_eq!(catalog.visible.len(), 1);
        assert_eq!(catalog.visible[0].method_name, "ListSites");
        assert_eq!(catalog.skipped, vec!["Broken".to_owned(), "BadBody".to_owned()]);
    }
}
