//! Driver runtime integration.
//!
//! Bridges synchronous hosts (the headless CLI) with the async driver task.

use anyhow::Context;
use rand::rngs::StdRng;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::GameController;
use crate::host::{run_driver, DriverConfig};
use crate::protocol::{DriverCommand, DriverOutput};

/// Running driver instance
pub struct Driver {
    rt: Runtime,
    cmd_tx: mpsc::Sender<DriverCommand>,
    out_rx: mpsc::UnboundedReceiver<DriverOutput>,
    task: Option<JoinHandle<anyhow::Result<GameController<StdRng>>>>,
}

impl Driver {
    pub fn start(controller: GameController<StdRng>, config: DriverConfig) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<DriverCommand>(config.max_pending_commands.max(1));
        let (out_tx, out_rx) = mpsc::unbounded_channel::<DriverOutput>();

        let rt = Runtime::new().context("failed to create tokio runtime")?;
        let task = rt.spawn(run_driver(controller, config, cmd_rx, out_tx));

        Ok(Self {
            rt,
            cmd_tx,
            out_rx,
            task: Some(task),
        })
    }

    /// Queue a command. Returns false if the queue is full or the task ended.
    pub fn send(&self, command: DriverCommand) -> bool {
        self.cmd_tx.try_send(command).is_ok()
    }

    /// Block until the next output; `None` once the task is gone
    pub fn recv_blocking(&mut self) -> Option<DriverOutput> {
        let out_rx = &mut self.out_rx;
        self.rt.block_on(out_rx.recv())
    }

    /// Stop the task and hand back the controller
    pub fn shutdown(mut self) -> anyhow::Result<GameController<StdRng>> {
        let _ = self.cmd_tx.try_send(DriverCommand::Shutdown);
        let task = self.task.take().context("driver already shut down")?;
        self.rt
            .block_on(task)
            .context("driver task panicked")?
    }
}
