use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
    time::Instant,
};

use super::jobs::{DatasetLoadJob, DatasetLoadResult};
use crate::observations::fetch;

pub(super) fn spawn(rx: Receiver<DatasetLoadJob>) -> Receiver<DatasetLoadResult> {
    let (result_tx, result_rx): (Sender<DatasetLoadResult>, Receiver<DatasetLoadResult>) =
        std::sync::mpsc::channel();
    thread::spawn(move || {
        while let Ok(job) = rx.recv() {
            let start = Instant::now();
            let result = fetch::fetch_dataset(&job.base_url, &job.path);
            let _ = result_tx.send(DatasetLoadResult {
                seq: job.seq,
                path: job.path,
                result,
                elapsed: start.elapsed(),
            });
        }
    });
    result_rx
}
