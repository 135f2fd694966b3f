//! Runs state machine commands against the remote service.

use tracing::{info, warn};

use super::state::{Command, Event};
use crate::client::GuestService;
use crate::error::Result;
use crate::models::Verdict;

/// Execute one command and produce the event that reports its outcome.
pub async fn execute<S>(service: &S, command: Command) -> Event
where
    S: GuestService + ?Sized,
{
    match command {
        Command::FetchRoster { generation } => Event::RosterLoaded {
            generation,
            result: service.list_guests().await.map_err(|e| {
                warn!("Roster fetch failed: {e}");
                e.kind()
            }),
        },
        Command::Admit { guest_id } => Event::LookupFinished(admit(service, &guest_id).await.map_err(|e| {
            warn!("Admission of guest '{guest_id}' failed: {e}");
            e.kind()
        })),
        Command::RemovePresence { guest_id } => {
            info!("Removing presence for guest {guest_id}");
            Event::RemovalFinished(service.remove_presence(&guest_id).await.map_err(|e| {
                warn!("Presence removal for guest '{guest_id}' failed: {e}");
                e.kind()
            }))
        }
        Command::After { delay, event } => {
            tokio::time::sleep(delay).await;
            *event
        }
    }
}

/// Look the guest up, then record the admission.
///
/// The verdict is only returned once the server has acknowledged the confirm
/// call; a failed confirm is reported as a connection error.
async fn admit<S>(service: &S, guest_id: &str) -> Result<Verdict>
where
    S: GuestService + ?Sized,
{
    let verdict = service.lookup(guest_id).await?;
    info!(
        "Lookup {guest_id}: {} (paid={}, adult={}, present={})",
        verdict.name, verdict.paid, verdict.adult, verdict.present
    );
    service.confirm_admission(guest_id).await?;
    Ok(verdict)
}

