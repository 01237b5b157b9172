//! Last-snapshot-wins installation of concurrently fetched snapshots.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::portfolio::PortfolioSnapshot;

/// Order of a fetch, issued before it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnapshotTicket(u64);

impl SnapshotTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Default)]
struct Installed {
    ticket: Option<SnapshotTicket>,
    snapshot: Option<Arc<PortfolioSnapshot>>,
}

/// Holds the newest installed snapshot.
///
/// Every fetch takes a ticket up front. Installing a snapshot whose ticket
/// is older than the installed one is refused, so a slow, stale response
/// can never replace a newer one.
#[derive(Default)]
pub struct SnapshotSlot {
    next: AtomicU64,
    installed: Mutex<Installed>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> SnapshotTicket {
        SnapshotTicket(self.next.fetch_add(1, Ordering::SeqCst))
    }

    /// Install `snapshot` fetched under `ticket`. Returns false when a newer
    /// snapshot is already installed.
    pub fn install(&self, ticket: SnapshotTicket, snapshot: PortfolioSnapshot) -> bool {
        let mut installed = self.installed.lock().expect("snapshot slot lock poisoned");
        if installed.ticket.is_some_and(|current| current > ticket) {
            debug!(
                ticket = ticket.value(),
                installed = installed.ticket.map(SnapshotTicket::value),
                "refusing stale snapshot"
            );
            return false;
        }
        installed.ticket = Some(ticket);
        installed.snapshot = Some(Arc::new(snapshot));
        true
    }

    pub fn current(&self) -> Option<Arc<PortfolioSnapshot>> {
        let installed = self.installed.lock().expect("snapshot slot lock poisoned");
        installed.snapshot.clone()
    }

    pub fn installed_ticket(&self) -> Option<SnapshotTicket> {
        let installed = self.installed.lock().expect("snapshot slot lock poisoned");
        installed.ticket
    }
}
