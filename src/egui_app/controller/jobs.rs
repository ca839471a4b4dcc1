use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
    time::Duration,
};

use super::{dataset_loader, media_loader};
use crate::observations::fetch::DatasetFetchError;
use crate::observations::records::Dataset;

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    DatasetLoaded(DatasetLoadResult),
    MediaLoaded(MediaLoadResult),
}

/// One sequence-tagged dataset fetch request.
#[derive(Debug)]
pub(crate) struct DatasetLoadJob {
    pub(crate) seq: u64,
    pub(crate) base_url: String,
    pub(crate) path: String,
}

#[derive(Debug)]
pub(crate) struct DatasetLoadResult {
    pub(crate) seq: u64,
    pub(crate) path: String,
    pub(crate) result: Result<Dataset, DatasetFetchError>,
    pub(crate) elapsed: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MediaKind {
    Image,
    Audio,
}

pub(crate) enum MediaPayload {
    Image(egui::ColorImage),
    Audio(Vec<u8>),
}

#[derive(Debug)]
pub(crate) struct MediaLoadJob {
    /// Card list generation the request was issued for.
    pub(crate) generation: u64,
    pub(crate) card_index: usize,
    pub(crate) kind: MediaKind,
    pub(crate) base_url: String,
    pub(crate) reference: String,
}

pub(crate) struct MediaLoadResult {
    pub(crate) generation: u64,
    pub(crate) card_index: usize,
    pub(crate) kind: MediaKind,
    pub(crate) result: Result<MediaPayload, media_loader::MediaLoadError>,
}

/// Worker channels plus the load sequence counter.
pub(crate) struct ControllerJobs {
    dataset_job_tx: Sender<DatasetLoadJob>,
    media_job_tx: Sender<MediaLoadJob>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    issued_load_seq: u64,
}

impl ControllerJobs {
    pub(super) fn new() -> Self {
        let (dataset_job_tx, dataset_job_rx) = std::sync::mpsc::channel::<DatasetLoadJob>();
        let (media_job_tx, media_job_rx) = std::sync::mpsc::channel::<MediaLoadJob>();
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        let jobs = Self {
            dataset_job_tx,
            media_job_tx,
            message_tx,
            message_rx,
            issued_load_seq: 0,
        };
        jobs.forward_dataset_results(dataset_loader::spawn(dataset_job_rx));
        jobs.forward_media_results(media_loader::spawn(media_job_rx));
        jobs
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    /// Issue the next load sequence number; later numbers win.
    pub(super) fn next_load_seq(&mut self) -> u64 {
        self.issued_load_seq += 1;
        self.issued_load_seq
    }

    /// Sequence number of the most recently issued load.
    pub(super) fn latest_load_seq(&self) -> u64 {
        self.issued_load_seq
    }

    pub(super) fn send_dataset_job(&self, job: DatasetLoadJob) {
        let _ = self.dataset_job_tx.send(job);
    }

    pub(super) fn send_media_job(&self, job: MediaLoadJob) {
        let _ = self.media_job_tx.send(job);
    }

    fn forward_dataset_results(&self, rx: Receiver<DatasetLoadResult>) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            while let Ok(message) = rx.recv() {
                let _ = tx.send(JobMessage::DatasetLoaded(message));
            }
        });
    }

    fn forward_media_results(&self, rx: Receiver<MediaLoadResult>) {
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            while let Ok(message) = rx.recv() {
                let _ = tx.send(JobMessage::MediaLoaded(message));
            }
        });
    }
}
