//! Context formatter — renders the grants dataset into the prose summary
//! sent to the model alongside the user's question.

use super::{ContextError, GrantRecord, GrantsDataset};

/// Render one collection as newline-joined lines.
///
/// Every entry must carry `address_key`, `permission`, and `expiration`;
/// the first entry missing any of them aborts the render.
fn render_lines(
    collection: &'static str,
    grants: &[GrantRecord],
    label: &str,
    address_key: &'static str,
) -> Result<String, ContextError> {
    let mut lines = Vec::with_capacity(grants.len());
    for (index, grant) in grants.iter().enumerate() {
        let lookup = |field: &'static str| {
            grant.field(field).ok_or(ContextError::MissingField {
                collection,
                index,
                field,
            })
        };
        let address = lookup(address_key)?;
        let permission = lookup("permission")?;
        let expiration = lookup("expiration")?;
        lines.push(format!(
            "{label} Address: {address}, Permission: {permission}, Expiration Date: {expiration}"
        ));
    }
    Ok(lines.join("\n"))
}

/// Build the context text for a dataset.
pub fn format_context(dataset: &GrantsDataset) -> Result<String, ContextError> {
    let granter = render_lines(
        "granterGrants",
        dataset.granter_grants(),
        "Granter",
        "granter",
    )?;
    let grantee = render_lines(
        "granteeGrants",
        dataset.grantee_grants(),
        "Grantee",
        "grantee",
    )?;

    Ok(format!(
        "\n    ### DSA Grants Overview:\n    \
         Below is the summary of the current grants:\n    \n    \
         ### Granter Grants:\n    {granter}\n\n    \
         ### Grantee Grants:\n    {grantee}\n\n    \
         Please note:\n    \
         - The granter assigns permissions to the grantee, such as \"Withdraw Delegator Reward\", \"Vote\", or \"Send Tokens\".\n    \
         - The grantee, in turn, receives permissions like \"Delegate\" or \"Vote\" that are set to expire on specific dates.\n    \n    \
         Respond to any user questions based on this data, and clarify specific permissions or expiration dates only when asked.\n    "
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dataset(value: serde_json::Value) -> GrantsDataset {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn renders_granter_line_with_exact_substitution() {
        let ds = dataset(json!({
            "granterGrants": [{"granter": "addr1", "permission": "Vote", "expiration": "2025-01-01"}],
            "granteeGrants": []
        }));
        let context = format_context(&ds).unwrap();
        assert!(context.contains("Granter Address: addr1, Permission: Vote, Expiration Date: 2025-01-01"));
        assert!(!context.contains("Grantee Address:"));
    }

    #[test]
    fn renders_one_line_per_grant_in_order() {
        let ds = GrantsDataset::new(
            vec![
                GrantRecord::from_parts("granter", "a1", "Vote", "2025-01-01"),
                GrantRecord::from_parts("granter", "a2", "Send Tokens", "2025-02-01"),
            ],
            vec![
                GrantRecord::from_parts("grantee", "b1", "Delegate", "2026-01-01"),
                GrantRecord::from_parts("grantee", "b1", "Delegate", "2026-01-01"),
            ],
        );
        let context = format_context(&ds).unwrap();

        let first = context.find("Granter Address: a1,").unwrap();
        let second = context.find("Granter Address: a2,").unwrap();
        assert!(first < second);
        assert_eq!(context.matches("Grantee Address: b1, Permission: Delegate").count(), 2);
        assert!(context.contains(
            "Granter Address: a1, Permission: Vote, Expiration Date: 2025-01-01\n\
             Granter Address: a2, Permission: Send Tokens, Expiration Date: 2025-02-01"
        ));
    }

    #[test]
    fn grantee_section_follows_granter_section() {
        let ds = GrantsDataset::new(
            vec![GrantRecord::from_parts("granter", "a1", "Vote", "2025-01-01")],
            vec![GrantRecord::from_parts("grantee", "b1", "Delegate", "2026-01-01")],
        );
        let context = format_context(&ds).unwrap();
        let granter_header = context.find("### Granter Grants:").unwrap();
        let granter_line = context.find("Granter Address: a1").unwrap();
        let grantee_header = context.find("### Grantee Grants:").unwrap();
        let grantee_line = context.find("Grantee Address: b1").unwrap();
        assert!(granter_header < granter_line);
        assert!(granter_line < grantee_header);
        assert!(grantee_header < grantee_line);
    }

    #[test]
    fn empty_dataset_renders_template_only() {
        let context = format_context(&GrantsDataset::default()).unwrap();
        assert!(context.starts_with("\n    ### DSA Grants Overview:\n"));
        assert!(context.contains("### Granter Grants:\n    \n\n    ### Grantee Grants:"));
        assert!(context.contains("clarify specific permissions or expiration dates only when asked."));
    }

    #[test]
    fn missing_field_reports_collection_and_index() {
        let ds = dataset(json!({
            "granterGrants": [],
            "granteeGrants": [
                {"grantee": "b1", "permission": "Vote", "expiration": "2025-01-01"},
                {"grantee": "b2", "permission": "Vote"}
            ]
        }));
        let err = format_context(&ds).unwrap_err();
        assert_eq!(
            err,
            ContextError::MissingField {
                collection: "granteeGrants",
                index: 1,
                field: "expiration",
            }
        );
    }

    #[test]
    fn granter_entry_keyed_as_grantee_is_rejected() {
        let ds = dataset(json!({
            "granterGrants": [{"grantee": "a1", "permission": "Vote", "expiration": "2025-01-01"}]
        }));
        assert!(matches!(
            format_context(&ds),
            Err(ContextError::MissingField { field: "granter", .. })
        ));
    }
}
