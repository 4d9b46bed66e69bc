//! Descriptor building: one structural node maps to one wire descriptor,
//! and the JSON shape follows the node's depth.

use serde_json::json;
use serenity::builder::CreateCommandOption;
use serenity::model::application::CommandOptionType;
use warden_bot::registry::descriptor::{build_descriptor, context_menu_descriptor};
use warden_bot::registry::source::{ManifestSource, SourceUnit};
use warden_bot::registry::unit::{CommandData, CommandUnit, ContextMenuUnit};
use warden_bot::registry::walker::{parse_command_tree, StructuralNode};

fn unit_with(description: &str, options: Vec<CreateCommandOption>) -> CommandUnit {
    let mut data = CommandData::new(description);
    for option in options {
        data = data.option(option);
    }
    CommandUnit::new(data, |_, _| Box::pin(async {}))
}

async fn nodes_for(entries: Vec<SourceUnit>) -> Vec<StructuralNode> {
    parse_command_tree(&ManifestSource::new(entries), "commands").await
}

#[tokio::test]
async fn flat_node_serializes_as_plain_command() {
    let nodes = nodes_for(vec![SourceUnit::command(
        "src/commands/ping.rs",
        unit_with("Checks latency.", vec![]),
    )])
    .await;
    let (wire, units) = build_descriptor(&nodes[0]);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].identifier, "ping");

    let value = serde_json::to_value(&wire).expect("descriptor serializes");
    assert_eq!(
        value,
        json!({
            "name": "ping",
            "description": "Checks latency.",
            "type": 1,
            "default_permission": false
        }),
        "empty option lists must not appear on the wire"
    );
}

#[tokio::test]
async fn directory_node_serializes_as_subcommand_list() {
    let seconds = CreateCommandOption::new(CommandOptionType::Integer, "time", "Seconds, 0 = off");
    let nodes = nodes_for(vec![
        SourceUnit::command("src/commands/staff/ban.rs", unit_with("Bans a member.", vec![])),
        SourceUnit::command(
            "src/commands/staff/slowmode.rs",
            unit_with("Enables slow mode.", vec![seconds]),
        ),
    ])
    .await;
    let (wire, units) = build_descriptor(&nodes[0]);
    assert_eq!(units.len(), 2);

    let value = serde_json::to_value(&wire).expect("descriptor serializes");
    assert_eq!(value["name"], "staff");
    assert_eq!(value["description"], "staff", "top name doubles as its description");

    let options = value["options"].as_array().expect("options array");
    assert_eq!(options.len(), 2);
    for option in options {
        assert_eq!(option["type"], 1, "every unit is retyped as a subcommand");
    }

    let slowmode = options
        .iter()
        .find(|option| option["name"] == "slowmode")
        .expect("slowmode subcommand present");
    assert_eq!(slowmode["description"], "Enables slow mode.");
    assert_eq!(slowmode["options"][0]["name"], "time");

    let ban = options
        .iter()
        .find(|option| option["name"] == "ban")
        .expect("ban subcommand present");
    assert!(
        ban.get("options").is_none(),
        "optionless subcommands must not carry an empty options array"
    );
}

#[tokio::test]
async fn nested_node_serializes_groups_in_first_appearance_order() {
    let nodes = nodes_for(vec![
        SourceUnit::command(
            "src/commands/warn/issue/add.rs",
            unit_with("Issues a warning.", vec![]),
        ),
        SourceUnit::command(
            "src/commands/warn/record/list.rs",
            unit_with("Lists warnings.", vec![]),
        ),
        SourceUnit::command(
            "src/commands/warn/issue/remove.rs",
            unit_with("Removes a warning.", vec![]),
        ),
    ])
    .await;
    let (wire, units) = build_descriptor(&nodes[0]);

    let identifiers: Vec<&str> = units.iter().map(|leaf| leaf.identifier.as_str()).collect();
    assert_eq!(
        identifiers,
        vec!["add:issue:warn", "remove:issue:warn", "list:record:warn"],
        "units are grouped, so group members sit together"
    );

    let value = serde_json::to_value(&wire).expect("descriptor serializes");
    let options = value["options"].as_array().expect("groups array");
    assert_eq!(options.len(), 2, "one wire option per group");

    assert_eq!(options[0]["name"], "issue", "groups keep first-appearance order");
    assert_eq!(options[0]["type"], 2);
    assert_eq!(options[0]["description"], "issue");
    let issue_subs = options[0]["options"].as_array().expect("issue subcommands");
    assert_eq!(issue_subs.len(), 2);
    assert!(issue_subs.iter().all(|sub| sub["type"] == 1));

    assert_eq!(options[1]["name"], "record");
}

#[tokio::test]
async fn flat_descriptor_uses_only_the_first_leaf() {
    // A name that appears both flat and as a directory demotes the nested
    // leaf; the flat descriptor covers exactly one unit.
    let nodes = nodes_for(vec![
        SourceUnit::command("src/commands/report.rs", unit_with("Reports a user.", vec![])),
        SourceUnit::command(
            "src/commands/report/spam.rs",
            unit_with("Reports spam.", vec![]),
        ),
    ])
    .await;
    let (wire, units) = build_descriptor(&nodes[0]);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].identifier, "report");

    let value = serde_json::to_value(&wire).expect("descriptor serializes");
    assert_eq!(value["description"], "Reports a user.");
}

#[tokio::test]
async fn rebuilding_a_node_yields_an_identical_descriptor() {
    let nodes = nodes_for(vec![
        SourceUnit::command("src/commands/staff/ban.rs", unit_with("Bans a member.", vec![])),
        SourceUnit::command(
            "src/commands/staff/slowmode.rs",
            unit_with(
                "Enables slow mode.",
                vec![CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "time",
                    "Seconds, 0 = off",
                )],
            ),
        ),
    ])
    .await;

    let (first, _) = build_descriptor(&nodes[0]);
    let (second, _) = build_descriptor(&nodes[0]);
    assert_eq!(
        serde_json::to_value(&first).expect("first descriptor serializes"),
        serde_json::to_value(&second).expect("second descriptor serializes"),
        "building is pure, so rebuilding must be byte-identical"
    );
}

#[test]
fn context_menus_register_flat() {
    let user_menu = ContextMenuUnit::user("View Warnings", |_, _| Box::pin(async {}));
    let value =
        serde_json::to_value(context_menu_descriptor(&user_menu)).expect("descriptor serializes");
    assert_eq!(
        value,
        json!({"name": "View Warnings", "type": 2, "default_permission": false})
    );

    let message_menu = ContextMenuUnit::message("Pin Message", |_, _| Box::pin(async {}));
    let value = serde_json::to_value(context_menu_descriptor(&message_menu))
        .expect("descriptor serializes");
    assert_eq!(value["type"], 3);
    assert!(
        value.get("description").is_none(),
        "menus carry no description on the wire"
    );
}
