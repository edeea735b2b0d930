//! Inbound signal worker
//!
//! Listens for lifecycle signals from the external ordering collaborator
//! and re-broadcasts them as kitchen events. The worker never mutates
//! orders; it only looks them up to attach a snapshot to the broadcast.

use shared::message::OrderSignal;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;

/// Translates [`OrderSignal`]s into kitchen broadcasts
pub struct SignalWorker;

impl SignalWorker {
    /// Spawn the worker loop; stops on bus shutdown
    pub fn spawn(state: ServerState) -> JoinHandle<()> {
        let mut rx = state.bus.subscribe_signals();
        let token = state.bus.shutdown_token().clone();

        tokio::spawn(async move {
            tracing::info!("Signal worker started");
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::info!("Signal worker stopping");
                        break;
                    }
                    result = rx.recv() => match result {
                        Ok(signal) => Self::handle(&state, signal).await,
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "Signal worker lagged, signals dropped");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("Signal channel closed, worker stopping");
                            break;
                        }
                    }
                }
            }
        })
    }

    async fn handle(state: &ServerState, signal: OrderSignal) {
        let repo = OrderRepository::new(state.db.clone());
        let order = match repo.find_by_id(signal.order_id()).await {
            Ok(Some(order)) => order,
            Ok(None) => {
                tracing::warn!(order_id = %signal.order_id(), "Signal for unknown order ignored");
                return;
            }
            Err(e) => {
                tracing::warn!(order_id = %signal.order_id(), error = %e, "Signal lookup failed");
                return;
            }
        };

        match signal {
            OrderSignal::Placed { .. } => state.broadcaster.new_food_task(&order),
            OrderSignal::Modified { .. } => state.broadcaster.order_modified(&order),
            OrderSignal::Cancelled { .. } => state.broadcaster.order_cancelled(&order),
        }
    }
}
