// Host context worker
// One task owns the mirrored host state; callers talk to it over a channel

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use backend_domain::{
    clamp_score, BalanceEntry, HostGateway, HostSessionEvent, HostSnapshot, OnlinePlayer,
    ServerBasics, ServerTime, WorldClock,
};

const COMMAND_BUFFER: usize = 64;

enum HostCommand {
    OnlinePlayers(oneshot::Sender<Vec<OnlinePlayer>>),
    ServerTime(oneshot::Sender<ServerTime>),
    ServerBasics(oneshot::Sender<ServerBasics>),
    Balance {
        player: String,
        reply: oneshot::Sender<Option<i64>>,
    },
    SetBalance {
        player: String,
        amount: i64,
        reply: oneshot::Sender<Option<i64>>,
    },
    AddBalance {
        player: String,
        amount: i64,
        reply: oneshot::Sender<Option<i64>>,
    },
    ListBalances(oneshot::Sender<Option<Vec<BalanceEntry>>>),
    PendingBalanceWrites(oneshot::Sender<Vec<BalanceEntry>>),
    ApplySnapshot {
        snapshot: HostSnapshot,
        reply: oneshot::Sender<()>,
    },
    ApplySessionEvent {
        event: HostSessionEvent,
        reply: oneshot::Sender<()>,
    },
}

/// Live host state. `balances` is `None` while the balance objective does not exist.
/// `pending_balances` holds local writes the host has not reported back yet.
#[derive(Debug, Default)]
struct HostWorld {
    max_players: i64,
    worlds: Vec<WorldClock>,
    players: BTreeMap<String, OnlinePlayer>,
    balances: Option<BTreeMap<String, i64>>,
    pending_balances: BTreeMap<String, i64>,
}

impl HostWorld {
    fn online_players(&self) -> Vec<OnlinePlayer> {
        let mut players: Vec<OnlinePlayer> = self.players.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));
        players
    }

    fn server_time(&self) -> ServerTime {
        self.worlds.first().map(ServerTime::from).unwrap_or_default()
    }

    fn server_basics(&self) -> ServerBasics {
        ServerBasics {
            server_max_players: self.max_players,
            online_player_count: self.players.len() as i64,
        }
    }

    fn balance(&self, player: &str) -> Option<i64> {
        self.balances
            .as_ref()
            .map(|scores| scores.get(player).copied().unwrap_or(0))
    }

    fn set_balance(&mut self, player: String, amount: i64) -> Option<i64> {
        let scores = self.balances.as_mut()?;
        let value = clamp_score(amount);
        scores.insert(player.clone(), value);
        self.pending_balances.insert(player, value);
        Some(value)
    }

    fn add_balance(&mut self, player: String, amount: i64) -> Option<i64> {
        let scores = self.balances.as_mut()?;
        let current = scores.get(&player).copied().unwrap_or(0);
        let value = clamp_score(current.saturating_add(amount));
        scores.insert(player.clone(), value);
        self.pending_balances.insert(player, value);
        Some(value)
    }

    fn list_balances(&self) -> Option<Vec<BalanceEntry>> {
        self.balances.as_ref().map(|scores| {
            scores
                .iter()
                .map(|(player, balance)| BalanceEntry {
                    player: player.clone(),
                    balance: *balance,
                })
                .collect()
        })
    }

    fn pending_balance_writes(&self) -> Vec<BalanceEntry> {
        self.pending_balances
            .iter()
            .map(|(player, balance)| BalanceEntry {
                player: player.clone(),
                balance: *balance,
            })
            .collect()
    }

    /// A pending write is acknowledged once a snapshot reports the same value.
    /// Until then it overrides whatever the snapshot says for that player.
    fn merge_balances(&mut self, reported: Vec<BalanceEntry>) -> BTreeMap<String, i64> {
        let mut scores: BTreeMap<String, i64> = reported
            .into_iter()
            .map(|entry| (entry.player, clamp_score(entry.balance)))
            .collect();
        self.pending_balances
            .retain(|player, pending| scores.get(player) != Some(&*pending));
        for (player, pending) in &self.pending_balances {
            scores.insert(player.clone(), *pending);
        }
        scores
    }

    fn apply_snapshot(&mut self, snapshot: HostSnapshot) {
        if let Some(max_players) = snapshot.max_players {
            self.max_players = max_players;
        }
        self.worlds = snapshot.worlds;
        self.players = snapshot
            .players
            .into_iter()
            .map(|player| (player.uuid.clone(), player))
            .collect();
        if let Some(balances) = snapshot.balances {
            let merged = self.merge_balances(balances);
            self.balances = Some(merged);
        }
    }

    fn apply_session_event(&mut self, event: HostSessionEvent) {
        if event.event_type.ends_session() {
            self.players.remove(&event.player_uuid);
            return;
        }
        let name = event
            .player_name
            .clone()
            .unwrap_or_else(|| event.player_uuid.clone());
        self.players.insert(
            event.player_uuid.clone(),
            OnlinePlayer {
                uuid: event.player_uuid,
                name,
                health: event.health.unwrap_or(20.0),
                max_health: event.max_health.unwrap_or(20.0),
                game_mode: event.game_mode,
                world: event.world_name,
            },
        );
    }

    fn handle(&mut self, command: HostCommand) {
        // A caller that already timed out has dropped its receiver; the reply is discarded.
        match command {
            HostCommand::OnlinePlayers(reply) => {
                let _ = reply.send(self.online_players());
            }
            HostCommand::ServerTime(reply) => {
                let _ = reply.send(self.server_time());
            }
            HostCommand::ServerBasics(reply) => {
                let _ = reply.send(self.server_basics());
            }
            HostCommand::Balance { player, reply } => {
                let _ = reply.send(self.balance(&player));
            }
            HostCommand::SetBalance {
                player,
                amount,
                reply,
            } => {
                let _ = reply.send(self.set_balance(player, amount));
            }
            HostCommand::AddBalance {
                player,
                amount,
                reply,
            } => {
                let _ = reply.send(self.add_balance(player, amount));
            }
            HostCommand::ListBalances(reply) => {
                let _ = reply.send(self.list_balances());
            }
            HostCommand::PendingBalanceWrites(reply) => {
                let _ = reply.send(self.pending_balance_writes());
            }
            HostCommand::ApplySnapshot { snapshot, reply } => {
                self.apply_snapshot(snapshot);
                let _ = reply.send(());
            }
            HostCommand::ApplySessionEvent { event, reply } => {
                self.apply_session_event(event);
                let _ = reply.send(());
            }
        }
    }
}

async fn run_worker(mut receiver: mpsc::Receiver<HostCommand>) {
    let mut world = HostWorld::default();
    while let Some(command) = receiver.recv().await {
        world.handle(command);
    }
    debug!("host context worker stopped");
}

/// Handle to the host context worker. Every call waits at most `timeout`.
#[derive(Clone)]
pub struct HostContext {
    sender: mpsc::Sender<HostCommand>,
    timeout: Duration,
}

impl HostContext {
    pub fn spawn(timeout: Duration) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
        let handle = tokio::spawn(run_worker(receiver));
        (Self { sender, timeout }, handle)
    }

    async fn call<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> HostCommand) -> Result<T> {
        let (reply, response) = oneshot::channel();
        let exchange = async {
            self.sender
                .send(command(reply))
                .await
                .map_err(|_| anyhow!("host context worker is not running"))?;
            response
                .await
                .map_err(|_| anyhow!("host context worker dropped the reply"))
        };
        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| anyhow!("host context call timed out after {:?}", self.timeout))?
    }
}

#[async_trait]
impl HostGateway for HostContext {
    async fn online_players(&self) -> Result<Vec<OnlinePlayer>> {
        self.call(HostCommand::OnlinePlayers).await
    }

    async fn server_time(&self) -> Result<ServerTime> {
        self.call(HostCommand::ServerTime).await
    }

    async fn server_basics(&self) -> Result<ServerBasics> {
        self.call(HostCommand::ServerBasics).await
    }

    async fn balance(&self, player: &str) -> Result<Option<i64>> {
        let player = player.to_string();
        self.call(|reply| HostCommand::Balance { player, reply })
            .await
    }

    async fn set_balance(&self, player: &str, amount: i64) -> Result<Option<i64>> {
        let player = player.to_string();
        self.call(|reply| HostCommand::SetBalance {
            player,
            amount,
            reply,
        })
        .await
    }

    async fn add_balance(&self, player: &str, amount: i64) -> Result<Option<i64>> {
        let player = player.to_string();
        self.call(|reply| HostCommand::AddBalance {
            player,
            amount,
            reply,
        })
        .await
    }

    async fn list_balances(&self) -> Result<Option<Vec<BalanceEntry>>> {
        self.call(HostCommand::ListBalances).await
    }

    async fn pending_balance_writes(&self) -> Result<Vec<BalanceEntry>> {
        self.call(HostCommand::PendingBalanceWrites).await
    }

    async fn apply_snapshot(&self, snapshot: HostSnapshot) -> Result<()> {
        self.call(|reply| HostCommand::ApplySnapshot { snapshot, reply })
            .await
    }

    async fn apply_session_event(&self, event: HostSessionEvent) -> Result<()> {
        self.call(|reply| HostCommand::ApplySessionEvent { event, reply })
            .await
    }
}
