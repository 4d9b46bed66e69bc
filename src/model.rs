//! This module defines the shared data structures used throughout the application.
//! These structs are used as `TypeMapKey`s to store shared state in Serenity's global context.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serenity::gateway::ShardManager;
use serenity::model::guild::Member;
use serenity::model::id::{RoleId, UserId};
use serenity::prelude::{Context, TypeMapKey};
use tokio::sync::RwLock;

use crate::registry::CommandRegistry;

/// A container for the ShardManager, allowing it to be stored in the global context.
/// This provides access to shard-specific information, like gateway latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// One recorded warning against a guild member. Severity runs 1 (minor)
/// through 10 (severe).
#[derive(Clone, Debug)]
pub struct Warning {
    pub moderator: UserId,
    pub reason: String,
    pub severity: u8,
    pub issued_at: DateTime<Utc>,
}

type WarningLedger = HashMap<UserId, Vec<Warning>>;

/// The central, shared state of the application.
/// An `Arc<AppState>` is stored in the global context for easy and safe access
/// from any command or event handler.
pub struct AppState {
    /// Snapshot from the most recent command registration pass. Stays
    /// `None` until the first pass publishes, and is swapped wholesale on
    /// every later pass.
    pub registry: Arc<RwLock<Option<Arc<CommandRegistry>>>>,
    /// In-memory record of issued warnings, keyed by the warned member.
    pub warnings: Arc<RwLock<WarningLedger>>,
    /// Role whose members may run the registered commands.
    pub staff_role: RoleId,
}

impl AppState {
    pub fn new(staff_role: RoleId) -> Self {
        Self {
            registry: Arc::new(RwLock::new(None)),
            warnings: Arc::new(RwLock::new(HashMap::new())),
            staff_role,
        }
    }

    pub async fn from_ctx(ctx: &Context) -> Option<Arc<Self>> {
        ctx.data.read().await.get::<AppState>().cloned()
    }

    /// Whether `member` carries the staff role.
    pub fn is_staff(&self, member: &Member) -> bool {
        member.roles.contains(&self.staff_role)
    }

    /// The currently published registry, if a pass has completed.
    pub async fn registry(&self) -> Option<Arc<CommandRegistry>> {
        self.registry.read().await.clone()
    }

    pub async fn publish_registry(&self, registry: Arc<CommandRegistry>) {
        *self.registry.write().await = Some(registry);
    }

    /// Append a warning and return the member's new warning count.
    pub async fn record_warning(&self, user: UserId, warning: Warning) -> usize {
        let mut ledger = self.warnings.write().await;
        let entries = ledger.entry(user).or_default();
        entries.push(warning);
        entries.len()
    }

    /// Remove the warning at `index` (zero-based, oldest first). Returns
    /// the removed entry, or `None` when the index is out of range.
    pub async fn remove_warning(&self, user: UserId, index: usize) -> Option<Warning> {
        let mut ledger = self.warnings.write().await;
        let entries = ledger.get_mut(&user)?;
        if index >= entries.len() {
            return None;
        }
        let removed = entries.remove(index);
        if entries.is_empty() {
            ledger.remove(&user);
        }
        Some(removed)
    }

    /// All warnings recorded against `user`, oldest first.
    pub async fn warnings_for(&self, user: UserId) -> Vec<Warning> {
        self.warnings
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }
}

impl TypeMapKey for AppState {
    type Value = Arc<AppState>;
}
