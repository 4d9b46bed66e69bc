//! Maps a live slash-command invocation back onto the qualified
//! identifiers the registry was indexed under.

use serenity::model::application::{CommandDataOption, CommandDataOptionValue};

use super::walker::IDENTIFIER_SEPARATOR;

/// Where inside a command's option tree an invocation landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvocationPath<'a> {
    /// Bare `/name` with no nesting.
    Root,
    /// `/name sub`.
    Sub(&'a str),
    /// `/name group sub`.
    Group { group: &'a str, sub: &'a str },
}

/// Read the invocation path out of a slash command's top-level options.
pub fn invocation_path(options: &[CommandDataOption]) -> InvocationPath<'_> {
    let Some(first) = options.first() else {
        return InvocationPath::Root;
    };
    match &first.value {
        CommandDataOptionValue::SubCommandGroup(nested) => {
            let sub = nested
                .iter()
                .find(|option| matches!(option.value, CommandDataOptionValue::SubCommand(_)))
                .map(|option| option.name.as_str())
                .unwrap_or_default();
            InvocationPath::Group { group: first.name.as_str(), sub }
        }
        CommandDataOptionValue::SubCommand(_) => InvocationPath::Sub(first.name.as_str()),
        _ => InvocationPath::Root,
    }
}

/// Identifier for a live invocation, assembled leaf-first exactly like the
/// identifiers derived from source paths during assembly. Empty segments
/// are dropped, so a malformed nesting still produces a usable key.
pub fn qualified_identifier(top_name: &str, path: InvocationPath<'_>) -> String {
    let segments = match path {
        InvocationPath::Root => vec![top_name],
        InvocationPath::Sub(sub) => vec![sub, top_name],
        InvocationPath::Group { group, sub } => vec![sub, group, top_name],
    };
    segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(IDENTIFIER_SEPARATOR)
}

/// The option list belonging to the invoked leaf, however deep the
/// invocation nests.
pub fn leaf_options(options: &[CommandDataOption]) -> &[CommandDataOption] {
    let Some(first) = options.first() else {
        return options;
    };
    match &first.value {
        CommandDataOptionValue::SubCommandGroup(nested) => match nested.first() {
            Some(sub) => match &sub.value {
                CommandDataOptionValue::SubCommand(leaf) => leaf,
                _ => nested,
            },
            None => nested,
        },
        CommandDataOptionValue::SubCommand(leaf) => leaf,
        _ => options,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn options(value: serde_json::Value) -> Vec<CommandDataOption> {
        serde_json::from_value(value).expect("raw interaction options should parse")
    }

    #[test]
    fn bare_invocation_routes_to_root() {
        let opts = options(json!([{"name": "reason", "type": 3, "value": "spam"}]));
        assert_eq!(invocation_path(&opts), InvocationPath::Root);
        assert_eq!(qualified_identifier("ban", invocation_path(&opts)), "ban");
    }

    #[test]
    fn subcommand_invocation_routes_one_level_down() {
        let opts = options(json!([{
            "name": "slowmode",
            "type": 1,
            "options": [{"name": "seconds", "type": 4, "value": 30}]
        }]));
        assert_eq!(invocation_path(&opts), InvocationPath::Sub("slowmode"));
        assert_eq!(
            qualified_identifier("staff", invocation_path(&opts)),
            "slowmode:staff"
        );

        let leaf = leaf_options(&opts);
        assert_eq!(leaf.len(), 1, "leaf options should come from the subcommand");
        assert_eq!(leaf[0].name, "seconds");
    }

    #[test]
    fn grouped_invocation_routes_two_levels_down() {
        let opts = options(json!([{
            "name": "issue",
            "type": 2,
            "options": [{
                "name": "add",
                "type": 1,
                "options": [{"name": "reason", "type": 3, "value": "spam"}]
            }]
        }]));
        assert_eq!(
            invocation_path(&opts),
            InvocationPath::Group { group: "issue", sub: "add" }
        );
        assert_eq!(
            qualified_identifier("warn", invocation_path(&opts)),
            "add:issue:warn"
        );

        let leaf = leaf_options(&opts);
        assert_eq!(leaf.len(), 1);
        assert_eq!(leaf[0].name, "reason");
    }
}
