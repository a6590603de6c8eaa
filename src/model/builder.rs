use super::endpoint::EndpointMetadata;
use super::natural_sort::natural_cmp;
use serde::Deserialize;

/// How group buckets are ordered in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSort {
    /// Order groups as their labels compare naturally.
    #[default]
    Natural,
    /// Keep the order in which groups were first encountered.
    Declaration,
}

/// Identity and position of a group bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    /// Position after sorting; also the numeric prefix of the group's
    /// Markdown filename.
    pub sort_index: usize,
    pub label: String,
    pub description: String,
}

/// Output of the model builder: group buckets in final order plus the flat
/// list preserving original match order for the collection export.
#[derive(Debug, Clone, Default)]
pub struct EndpointModel {
    pub groups: Vec<(GroupKey, Vec<EndpointMetadata>)>,
    pub flat: Vec<EndpointMetadata>,
}

/// Bucket endpoints by group and order the buckets.
///
/// Within a bucket, endpoints keep the order in which their routes were
/// matched. Endpoints sharing a (method, normalized path) are distinct
/// entries and are never collapsed.
pub fn build_model(endpoints: Vec<EndpointMetadata>, sort: GroupSort) -> EndpointModel {
    let mut labels: Vec<String> = Vec::new();
    for endpoint in &endpoints {
        debug_assert!(!endpoint.group.is_empty(), "group fallback applied earlier");
        if !labels.iter().any(|label| label == &endpoint.group) {
            labels.push(endpoint.group.clone());
        }
    }
    if sort == GroupSort::Natural {
        labels.sort_by(|a, b| natural_cmp(a, b));
    }

    let groups = labels
        .into_iter()
        .enumerate()
        .map(|(sort_index, label)| {
            let members: Vec<EndpointMetadata> = endpoints
                .iter()
                .filter(|e| e.group == label)
                .cloned()
                .collect();
            let description = members
                .iter()
                .map(|e| e.group_description.as_str())
                .find(|d| !d.is_empty())
                .unwrap_or_default()
                .to_string();
            (
                GroupKey {
                    sort_index,
                    label,
                    description,
                },
                members,
            )
        })
        .collect();

    EndpointModel {
        groups,
        flat: endpoints,
    }
}
