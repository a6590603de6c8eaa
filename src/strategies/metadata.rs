use super::{Fragment, MetadataField, Strategy, StrategyContext};
use crate::errors::StrategyError;
use crate::example::ExampleGenerator;
use crate::model::EndpointMetadata;

/// Title, description, group membership, and the authentication flag, all
/// read from the documentation block.
pub struct MetadataStrategy;

impl Strategy for MetadataStrategy {
    fn name(&self) -> &'static str {
        "metadata"
    }

    fn owned_fields(&self) -> &'static [MetadataField] {
        &[
            MetadataField::Title,
            MetadataField::Description,
            MetadataField::Group,
            MetadataField::GroupDescription,
            MetadataField::Authentication,
        ]
    }

    fn contribute(
        &self,
        ctx: &StrategyContext<'_>,
        _so_far: &EndpointMetadata,
        _examples: &mut ExampleGenerator,
    ) -> Result<Option<Fragment>, StrategyError> {
        let (title, description) = ctx.doc.title_and_description();
        let group = ctx
            .doc
            .tag("group")
            .map(str::to_string)
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| ctx.config.default_group.clone());
        let group_description = ctx
            .doc
            .tag("groupDescription")
            .unwrap_or_default()
            .to_string();

        Ok(Some(Fragment {
            title: Some(title),
            description: Some(description),
            group: Some(group),
            group_description: Some(group_description),
            authenticated: Some(ctx.doc.has_tag("authenticated")),
            ..Fragment::default()
        }))
    }
}
