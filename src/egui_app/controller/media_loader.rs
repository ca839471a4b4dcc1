use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use thiserror::Error;

use super::jobs::{MediaKind, MediaLoadJob, MediaLoadResult, MediaPayload};
use crate::media::images::{self, ImageDecodeError};
use crate::observations::fetch::{self, FetchError, MAX_MEDIA_RESPONSE_BYTES};

/// Errors raised while fetching or decoding one media reference.
#[derive(Debug, Error)]
pub(crate) enum MediaLoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Image(#[from] ImageDecodeError),
}

pub(super) fn spawn(rx: Receiver<MediaLoadJob>) -> Receiver<MediaLoadResult> {
    let (result_tx, result_rx): (Sender<MediaLoadResult>, Receiver<MediaLoadResult>) =
        std::sync::mpsc::channel();
    thread::spawn(move || {
        while let Ok(job) = rx.recv() {
            let result = load_media(&job);
            let _ = result_tx.send(MediaLoadResult {
                generation: job.generation,
                card_index: job.card_index,
                kind: job.kind,
                result,
            });
        }
    });
    result_rx
}

fn load_media(job: &MediaLoadJob) -> Result<MediaPayload, MediaLoadError> {
    let bytes = fetch::fetch_bytes(&job.base_url, &job.reference, MAX_MEDIA_RESPONSE_BYTES)?;
    match job.kind {
        MediaKind::Image => Ok(MediaPayload::Image(images::decode_color_image(&bytes)?)),
        MediaKind::Audio => Ok(MediaPayload::Audio(bytes)),
    }
}
