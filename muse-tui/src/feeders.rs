use crate::tui::{TuiActor, TuiMsg};
use muse_actors::actor::Addr;
use muse_actors::system::ShutdownHandle;
use std::time::Duration;
use tokio::{self, time};

/// Bridge blocking terminal input and a periodic redraw tick into the TUI
/// mailbox. Both tasks exit on shutdown; the input task also exits if the
/// blocking reader can no longer be spawned.
pub fn spawn_tui_feeders(tui: Addr<TuiActor>, shutdown: ShutdownHandle, tick: Duration) {
    let tui_in = tui.clone();
    let mut shutdown_input = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_input.recv() => break,
                ev = tokio::task::spawn_blocking(crossterm::event::read) => {
                    match ev {
                        Ok(Ok(e)) => {
                            let _ = tui_in.send(TuiMsg::InputEvent(e)).await;
                        }
                        Ok(Err(e)) => {
                            let _ = tui_in.send(TuiMsg::OpError(format!("input: {e}"))).await;
                        }
                        Err(_) => break,
                    }
                }
            }
        }
    });

    let mut shutdown_tick = shutdown.subscribe();
    tokio::spawn(async move {
        let mut interval = time::interval(tick);
        loop {
            tokio::select! {
                _ = shutdown_tick.recv() => break,
                _ = interval.tick() => {
                    // try_send: a slow redraw must not back up the mailbox
                    let _ = tui.try_send(TuiMsg::Tick);
                }
            }
        }
    });
}
