use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::anyhow;
use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::bid::BidItem;
use crate::writer::{FileMode, RecordWriter};

/// Follow-up job asking a downstream handler to fetch a bid's details page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    pub api: String,
    pub parameters: BidDetailsParams,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidDetailsParams {
    #[serde(rename = "bidFullUrl")]
    pub bid_full_url: String,
    pub signal_source_unique_id: String,
}

impl TaskRequest {
    /// The details request for `bid`, when it links to a details page.
    pub fn for_bid(api: &str, bid: &BidItem) -> Option<Self> {
        bid.details_url_for_item.as_ref().map(|url| Self {
            api: api.to_string(),
            parameters: BidDetailsParams {
                bid_full_url: url.clone(),
                signal_source_unique_id: bid.signal_source_unique_id.clone(),
            },
        })
    }
}

/// Fire-and-forget sink for follow-up tasks.
pub trait TaskScheduler {
    fn enqueue(&self, task: TaskRequest);
}

/// Sends tasks to an in-process consumer, counting the ones delivered.
///
/// The counter is shared by every clone and only grows on a successful send,
/// so `sent()` tells how many tasks actually reached the receiver.
#[derive(Debug, Clone)]
pub struct TaskSender {
    tx: mpsc::UnboundedSender<TaskRequest>,
    counter: Arc<AtomicUsize>,
}

impl TaskSender {
    pub fn new(tx: mpsc::UnboundedSender<TaskRequest>, counter: Arc<AtomicUsize>) -> Self {
        Self { tx, counter }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TaskRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx, Arc::new(AtomicUsize::new(0))), rx)
    }

    pub fn sent(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }
}

impl TaskScheduler for TaskSender {
    fn enqueue(&self, task: TaskRequest) {
        match self.tx.send(task) {
            Ok(()) => {
                self.counter.fetch_add(1, Ordering::SeqCst);
            }
            Err(e) => {
                log::error!("Couldn't send task: {e}");
            }
        }
    }
}

/// Appends tasks as JSON lines from a dedicated writer thread.
pub struct TaskWriter {
    tx_task: Sender<TaskRequest>,
    tx_stop: Sender<()>,
    rx_done: Receiver<()>,
}

impl TaskWriter {
    pub fn new(path: &Path, mode: FileMode) -> anyhow::Result<Self> {
        let mut wtr = RecordWriter::open(Some(path), mode)?;

        let (tx_task, rx_task) = unbounded::<TaskRequest>();
        let (tx_stop, rx_stop) = bounded::<()>(1);
        let (tx_done, rx_done) = bounded::<()>(1);

        thread::Builder::new()
            .name("task-writer".into())
            .spawn(move || loop {
                select! {
                    recv(rx_stop) -> _ => {
                        for task in rx_task.try_iter() {
                            write_task(&mut wtr, &task);
                        }
                        if let Err(e) = std::io::Write::flush(&mut wtr) {
                            log::error!("Couldn't flush tasks: {e}");
                        }
                        tx_done.send(()).ok();
                        break;
                    },
                    recv(rx_task) -> msg => {
                        match msg {
                            Ok(task) => write_task(&mut wtr, &task),
                            Err(_) => break,
                        }
                    }
                }
            })?;

        Ok(Self {
            tx_task,
            tx_stop,
            rx_done,
        })
    }

    /// Writes pending tasks out and waits for the writer thread to stop.
    pub fn finish(self) -> anyhow::Result<()> {
        self.tx_stop
            .send(())
            .map_err(|_| anyhow!("Task writer stopped early"))?;
        self.rx_done
            .recv()
            .map_err(|_| anyhow!("Task writer stopped early"))?;
        Ok(())
    }
}

fn write_task(wtr: &mut RecordWriter, task: &TaskRequest) {
    if let Err(e) = wtr.write_task(task) {
        log::error!("Couldn't write task {task:?} got: {e}");
    }
}

impl TaskScheduler for TaskWriter {
    fn enqueue(&self, task: TaskRequest) {
        if let Err(e) = self.tx_task.send(task) {
            log::error!("Couldn't send task: {e}");
        }
    }
}

/// Logs tasks and drops them, for runs without a downstream consumer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogScheduler;

impl TaskScheduler for LogScheduler {
    fn enqueue(&self, task: TaskRequest) {
        log::info!(
            "{} {} {}",
            task.api,
            task.parameters.signal_source_unique_id,
            task.parameters.bid_full_url
        );
    }
}
