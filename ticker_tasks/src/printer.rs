use crate::{ticker::Tick, Receiver};
use tokio::task::JoinHandle;

/// Drains a tick receiver and prints one `"<label> <seq>"` line per tick to stdout.
/// The task ends once every sender feeding the receiver has been dropped.
pub fn spawn_printer(mut ticks: Receiver<Tick>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(tick) = ticks.recv().await {
            println!("{tick}");
        }
    })
}
