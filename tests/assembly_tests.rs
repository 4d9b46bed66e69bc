//! Registration-pass behavior against a mock platform: call ordering,
//! all-or-nothing failure handling, and the lookup tables the pass
//! publishes.

use std::sync::Mutex;

use serenity::async_trait;
use serenity::model::id::{CommandId, RoleId};
use warden_bot::registry::descriptor::WireCommand;
use warden_bot::registry::platform::{CommandPlatform, PermissionGrant, RegisteredCommand};
use warden_bot::registry::source::{ManifestSource, SourceUnit};
use warden_bot::registry::unit::{CommandData, CommandUnit, ContextMenuUnit};
use warden_bot::registry::{run_registration_pass, AssemblyError};

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    SetCommands(usize),
    SetPermissions(String),
}

#[derive(Default)]
struct MockPlatform {
    calls: Mutex<Vec<Call>>,
    grants: Mutex<Vec<PermissionGrant>>,
    fail_clear: bool,
    fail_set: bool,
    fail_permissions: bool,
}

impl MockPlatform {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandPlatform for MockPlatform {
    async fn set_commands(
        &self,
        commands: &[WireCommand],
    ) -> serenity::Result<Vec<RegisteredCommand>> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::SetCommands(commands.len()));
        if commands.is_empty() {
            if self.fail_clear {
                return Err(serenity::Error::Other("clear rejected"));
            }
            return Ok(vec![]);
        }
        if self.fail_set {
            return Err(serenity::Error::Other("submit rejected"));
        }
        Ok(commands
            .iter()
            .enumerate()
            .map(|(index, command)| RegisteredCommand {
                id: CommandId::new(1000 + index as u64),
                name: command.name.clone(),
                kind: command.kind,
            })
            .collect())
    }

    async fn set_permissions(&self, grant: &PermissionGrant) -> serenity::Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::SetPermissions(grant.name.clone()));
        if self.fail_permissions {
            return Err(serenity::Error::Other("grant rejected"));
        }
        self.grants.lock().unwrap().push(grant.clone());
        Ok(())
    }
}

fn unit(description: &str) -> CommandUnit {
    CommandUnit::new(CommandData::new(description), |_, _| Box::pin(async {}))
}

const ADMIN: RoleId = RoleId::new(42);

/// One flat command, one merged staff pair carrying both listener kinds,
/// and one user context menu.
fn fixture() -> Vec<SourceUnit> {
    vec![
        SourceUnit::command("src/commands/ping.rs", unit("Checks latency.")),
        SourceUnit::command(
            "src/commands/staff/ban.rs",
            unit("Bans a member.")
                .interaction_listener("banConfirm", |_, _| Box::pin(async {}))
                .reaction_listener("banQuick", |_, _| Box::pin(async {})),
        ),
        SourceUnit::command("src/commands/staff/slowmode.rs", unit("Enables slow mode.")),
        SourceUnit::context_menu(
            "src/contextmenus/view_warnings.rs",
            ContextMenuUnit::user("View Warnings", |_, _| Box::pin(async {})),
        ),
    ]
}

#[tokio::test]
async fn pass_clears_then_submits_then_grants() {
    let platform = MockPlatform::default();
    let source = ManifestSource::new(fixture());

    let registry = run_registration_pass(&source, &platform, ADMIN)
        .await
        .expect("pass succeeds");

    let calls = platform.calls();
    assert_eq!(
        calls[0],
        Call::SetCommands(0),
        "registration starts by clearing the previous set"
    );
    assert_eq!(
        calls[1],
        Call::SetCommands(3),
        "ping, staff and the menu go up in one submission"
    );
    assert_eq!(
        &calls[2..],
        &[
            Call::SetPermissions("ping".to_string()),
            Call::SetPermissions("staff".to_string()),
            Call::SetPermissions("View Warnings".to_string()),
        ],
        "grants follow registration order, one per descriptor"
    );

    assert_eq!(registry.command_count(), 3);
    assert!(registry.command("ping").is_some());
    assert!(registry.command("ban:staff").is_some());
    assert!(registry.command("slowmode:staff").is_some());
    assert_eq!(registry.context_menu_count(), 1);
    assert!(registry.context_menu("View Warnings").is_some());
    assert!(registry.interaction_listener("banConfirm").is_some());
    assert_eq!(registry.reaction_listeners().count(), 1);
}

#[tokio::test]
async fn every_grant_carries_the_admin_role_and_the_registered_id() {
    let platform = MockPlatform::default();
    let source = ManifestSource::new(fixture());

    run_registration_pass(&source, &platform, ADMIN)
        .await
        .expect("pass succeeds");

    let grants = platform.grants.lock().unwrap();
    assert_eq!(grants.len(), 3);
    for (index, grant) in grants.iter().enumerate() {
        assert_eq!(grant.command, CommandId::new(1000 + index as u64));
        assert_eq!(grant.roles, vec![ADMIN]);
    }
}

#[tokio::test]
async fn a_rejected_clear_aborts_before_submitting() {
    let platform = MockPlatform {
        fail_clear: true,
        ..MockPlatform::default()
    };
    let source = ManifestSource::new(fixture());

    let Err(error) = run_registration_pass(&source, &platform, ADMIN).await else {
        panic!("pass unexpectedly succeeded");
    };
    assert!(matches!(error, AssemblyError::ClearCommands(_)));
    assert_eq!(
        platform.calls(),
        vec![Call::SetCommands(0)],
        "nothing is submitted after a failed clear"
    );
}

#[tokio::test]
async fn a_rejected_submission_yields_no_registry() {
    let platform = MockPlatform {
        fail_set: true,
        ..MockPlatform::default()
    };
    let source = ManifestSource::new(fixture());

    let Err(error) = run_registration_pass(&source, &platform, ADMIN).await else {
        panic!("pass unexpectedly succeeded");
    };
    assert!(matches!(error, AssemblyError::SetCommands { count: 3, .. }));
    assert_eq!(
        platform.calls(),
        vec![Call::SetCommands(0), Call::SetCommands(3)],
        "no grants are attempted after a failed submission"
    );
}

#[tokio::test]
async fn a_rejected_grant_names_the_failing_command() {
    let platform = MockPlatform {
        fail_permissions: true,
        ..MockPlatform::default()
    };
    let source = ManifestSource::new(fixture());

    let Err(error) = run_registration_pass(&source, &platform, ADMIN).await else {
        panic!("pass unexpectedly succeeded");
    };
    match error {
        AssemblyError::SetPermissions { command, .. } => assert_eq!(command, "ping"),
        other => panic!("expected a permissions failure, got {other:?}"),
    }
    assert_eq!(
        platform.calls().last(),
        Some(&Call::SetPermissions("ping".to_string())),
        "the pass stops at the first rejected grant"
    );
}

#[tokio::test]
async fn non_menu_units_under_the_menu_root_never_reach_the_wire() {
    let entries = vec![
        SourceUnit::command("src/commands/ping.rs", unit("Checks latency.")),
        SourceUnit::command("src/contextmenus/oops.rs", unit("Misplaced.")),
    ];
    let platform = MockPlatform::default();

    let registry = run_registration_pass(&ManifestSource::new(entries), &platform, ADMIN)
        .await
        .expect("pass succeeds");

    assert_eq!(registry.command_count(), 1);
    assert_eq!(registry.context_menu_count(), 0);
    assert_eq!(
        platform.calls()[1],
        Call::SetCommands(1),
        "the misplaced unit is dropped, not registered"
    );
}

#[tokio::test]
async fn colliding_identifiers_keep_the_later_unit() {
    // Extension stripping maps both files to `ban`, so their identifiers
    // collide and the second definition wins.
    let entries = vec![
        SourceUnit::command("src/commands/staff/ban.rs", unit("First definition.")),
        SourceUnit::command("src/commands/staff/ban.txt", unit("Second definition.")),
    ];
    let platform = MockPlatform::default();

    let registry = run_registration_pass(&ManifestSource::new(entries), &platform, ADMIN)
        .await
        .expect("pass succeeds");

    assert_eq!(registry.command_count(), 1);
    let unit = registry.command("ban:staff").expect("identifier present");
    assert_eq!(unit.data.description, "Second definition.");
}
