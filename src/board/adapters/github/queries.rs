//! GraphQL documents for the GitHub Projects v2 API.
//!
//! Documents are assembled from single-line segments; GraphQL treats the
//! whitespace as insignificant, so each segment carries a trailing space.
//! Selections shared between documents are written as named fragments and
//! repeated per document, keeping every constant a self-contained request.

use serde_json::{Map, Value, json};

use crate::board::ports::{FieldChange, FieldPatch};

/// Fetches the schemas of the source and target boards in one round trip.
pub(super) const BOARD_PAIR_QUERY: &str = concat!(
    "query($owner: String!, $source: Int!, $target: Int!) { ",
    "organization(login: $owner) { ",
    "source: projectV2(number: $source) { ...BoardSchema } ",
    "target: projectV2(number: $target) { ...BoardSchema } } } ",
    "fragment BoardSchema on ProjectV2 { id number ",
    "fields(first: 50) { nodes { ",
    "... on ProjectV2FieldCommon { id name } ",
    "... on ProjectV2SingleSelectField { options { id name } } } } }",
);

/// Fetches a single board schema by owner and number.
pub(super) const BOARD_QUERY: &str = concat!(
    "query($owner: String!, $number: Int!) { ",
    "organization(login: $owner) { ",
    "board: projectV2(number: $number) { ...BoardSchema } } } ",
    "fragment BoardSchema on ProjectV2 { id number ",
    "fields(first: 50) { nodes { ",
    "... on ProjectV2FieldCommon { id name } ",
    "... on ProjectV2SingleSelectField { options { id name } } } } }",
);

/// Pages through the items of a board, including card memberships.
pub(super) const BOARD_ITEMS_QUERY: &str = concat!(
    "query($board: ID!, $first: Int!, $after: String) { ",
    "node(id: $board) { ... on ProjectV2 { ",
    "items(first: $first, after: $after) { ",
    "pageInfo { hasNextPage endCursor } ",
    "nodes { id ",
    "status: fieldValueByName(name: \"Status\") { ",
    "... on ProjectV2ItemFieldSingleSelectValue { name optionId } } ",
    "releasedIn: fieldValueByName(name: \"Released in\") { ",
    "... on ProjectV2ItemFieldTextValue { text } } ",
    "content { ... on Issue { ...IssueCard } ",
    "... on PullRequest { ...PullCard } } } } } } } ",
    "fragment IssueCard on Issue { id url ",
    "projectItems(first: 20) { nodes { ...Membership } } } ",
    "fragment PullCard on PullRequest { id url ",
    "projectItems(first: 20) { nodes { ...Membership } } } ",
    "fragment Membership on ProjectV2Item { id project { id } ",
    "status: fieldValueByName(name: \"Status\") { ",
    "... on ProjectV2ItemFieldSingleSelectValue { name optionId } } ",
    "releasedIn: fieldValueByName(name: \"Released in\") { ",
    "... on ProjectV2ItemFieldTextValue { text } } }",
);

/// Fetches one pull request with its closing issues and board memberships.
pub(super) const PULL_REQUEST_QUERY: &str = concat!(
    "query($owner: String!, $name: String!, $number: Int!) { ",
    "repository(owner: $owner, name: $name) { ",
    "pullRequest(number: $number) { number ...PullCard ",
    "closingIssuesReferences(first: 50) { nodes { ...IssueCard } } } } } ",
    "fragment IssueCard on Issue { id url ",
    "projectItems(first: 20) { nodes { ...Membership } } } ",
    "fragment PullCard on PullRequest { id url ",
    "projectItems(first: 20) { nodes { ...Membership } } } ",
    "fragment Membership on ProjectV2Item { id project { id } ",
    "status: fieldValueByName(name: \"Status\") { ",
    "... on ProjectV2ItemFieldSingleSelectValue { name optionId } } ",
    "releasedIn: fieldValueByName(name: \"Released in\") { ",
    "... on ProjectV2ItemFieldTextValue { text } } }",
);

/// Adds an issue or pull request to a board by content id.
pub(super) const ADD_ITEM_MUTATION: &str = concat!(
    "mutation($project: ID!, $content: ID!) { ",
    "addProjectV2ItemById(input: { projectId: $project, contentId: $content }) ",
    "{ item { id } } }",
);

/// Builds one aliased mutation document covering every change in a batch.
///
/// Each change becomes an `update{n}` alias with its own variable set, so
/// the whole batch lands in a single request. The caller guards against an
/// empty batch; an empty document would carry no selections.
pub(super) fn field_update_document(changes: &[FieldChange]) -> (String, Value) {
    let mut declarations = Vec::with_capacity(changes.len() * 4);
    let mut operations = String::new();
    let mut variables = Map::new();
    for (index, change) in changes.iter().enumerate() {
        declarations.push(format!("$project{index}: ID!"));
        declarations.push(format!("$item{index}: ID!"));
        declarations.push(format!("$field{index}: ID!"));
        declarations.push(format!("$value{index}: ProjectV2FieldValue!"));
        operations.push_str(&format!(
            "update{index}: updateProjectV2ItemFieldValue(input: {{ projectId: $project{index}, "
        ));
        operations.push_str(&format!(
            "itemId: $item{index}, fieldId: $field{index}, value: $value{index} }}) "
        ));
        operations.push_str("{ clientMutationId } ");
        variables.insert(format!("project{index}"), json!(change.board_id.as_str()));
        variables.insert(format!("item{index}"), json!(change.item_id.as_str()));
        variables.insert(format!("field{index}"), json!(change.field_id.as_str()));
        variables.insert(format!("value{index}"), patch_value(&change.value));
    }
    let document = format!("mutation({}) {{ {operations}}}", declarations.join(", "));
    (document, Value::Object(variables))
}

fn patch_value(patch: &FieldPatch) -> Value {
    match patch {
        FieldPatch::SingleSelect(option) => json!({ "singleSelectOptionId": option.as_str() }),
        FieldPatch::Text(text) => json!({ "text": text }),
    }
}
