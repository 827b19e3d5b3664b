use crate::events::WheelEvent;
use async_channel::Sender;
use std::thread;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Runs the frame clock and the interrupt watcher on their own thread. Both stop once the
/// receiving side of `tx` is dropped.
pub fn start_background_services(tx: Sender<WheelEvent>, frame_interval: Duration) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    watch_interrupt(tx).await;
                });
            }

            run_frame_clock(tx, frame_interval).await;
        });
    });
}

pub async fn run_frame_clock(tx: Sender<WheelEvent>, frame_interval: Duration) {
    let mut ticker = tokio::time::interval(frame_interval.max(MIN_FRAME_INTERVAL));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // first tick completes immediately
    let mut last = ticker.tick().await;
    loop {
        let now = ticker.tick().await;
        if tx.send(WheelEvent::Frame(now - last)).await.is_err() {
            break;
        }
        last = now;
    }
    log::debug!("Frame clock stopped");
}

async fn watch_interrupt(tx: Sender<WheelEvent>) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            let _ = tx.send(WheelEvent::Detach).await;
        }
        Err(e) => log::error!("Failed to listen for interrupt: {}", e),
    }
}
