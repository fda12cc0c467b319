//! Ticket materialization: converting a validated cart into finalized
//! ticket records at checkout.
//!
//! Iterates cart items in cart order and passengers in slot order, stamping
//! each with a freshly generated ticket id and its tier name. Id generation
//! goes through the injected [`TicketIdSource`] so tests can be
//! deterministic.
//!
//! Ids are best-effort random: collisions across sessions are possible and
//! unhandled, which is acceptable for this domain. Within a single checkout
//! batch, a seen-set regenerates on collision so one batch is always
//! internally unique.

use crate::types::{CartItem, FinalizedTicket, TICKET_ID_SUFFIX_LEN, TicketId};
use chrono::{DateTime, Utc};
use rand::Rng;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of ticket-id suffixes
///
/// Implementations return [`TICKET_ID_SUFFIX_LEN`] characters drawn from
/// `[A-Z0-9]`. Production uses [`RandomTicketIds`]; tests use
/// [`SequencedTicketIds`].
pub trait TicketIdSource: Send + Sync {
    /// Produce one id suffix
    fn suffix(&self) -> String;
}

/// Uppercase alphanumeric alphabet for id suffixes
const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Pseudo-random id source backed by the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTicketIds;

impl TicketIdSource for RandomTicketIds {
    fn suffix(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..TICKET_ID_SUFFIX_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..ID_ALPHABET.len());
                char::from(ID_ALPHABET[idx])
            })
            .collect()
    }
}

/// Deterministic id source for tests: `000000001`, `000000002`, ...
#[derive(Debug, Default)]
pub struct SequencedTicketIds {
    counter: AtomicU64,
}

impl SequencedTicketIds {
    /// Create a source that counts from 1
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TicketIdSource for SequencedTicketIds {
    fn suffix(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{n:09}")
    }
}

/// Flatten a validated cart into finalized tickets
///
/// Output order is cart order, then passenger slot order within each item.
/// Name, meal plan, and Wi-Fi package are carried through unchanged; the
/// tier name and a fresh unique-within-batch ticket id are stamped on.
#[must_use]
pub fn materialize(
    cart: &[CartItem],
    ids: &dyn TicketIdSource,
    issued_at: DateTime<Utc>,
) -> Vec<FinalizedTicket> {
    let mut seen: HashSet<TicketId> = HashSet::new();
    cart.iter()
        .flat_map(|item| {
            item.passengers
                .iter()
                .map(|passenger| {
                    let ticket_id = next_unique_id(ids, &mut seen);
                    FinalizedTicket {
                        ticket_id,
                        tier: item.tier.clone(),
                        name: passenger.name.clone(),
                        meal_plan: passenger.meal_plan,
                        wifi_package: passenger.wifi_package,
                        issued_at,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Draw ids until one is new to this batch
///
/// A collision within a batch is vanishingly rare with a random source but
/// cheap to rule out; a degenerate source that always repeats would loop,
/// so the draw count is capped and the last id is used as-is past the cap.
fn next_unique_id(ids: &dyn TicketIdSource, seen: &mut HashSet<TicketId>) -> TicketId {
    const MAX_DRAWS: usize = 64;
    let mut id = TicketId::from_suffix(&ids.suffix());
    let mut draws = 1;
    while seen.contains(&id) && draws < MAX_DRAWS {
        tracing::warn!(ticket_id = %id, "ticket id collision within batch, regenerating");
        id = TicketId::from_suffix(&ids.suffix());
        draws += 1;
    }
    seen.insert(id.clone());
    id
}
