use std::time::Duration;

use super::jobs::{DatasetLoadResult, MediaKind, MediaLoadResult, MediaPayload};
use super::ReviewController;
use crate::egui_app::state::MediaSlot;
use crate::observations::catalog::DatasetOption;
use crate::observations::config::AppConfig;
use crate::observations::records::{Dataset, Record, RecordId, REJECTED_SPECIES};

fn record(id: i64, verified: bool, species: Option<&str>) -> Record {
    Record {
        id: RecordId::Number(id),
        suggested_species: species.map(str::to_string),
        location: None,
        signal: None,
        image: None,
        audio: None,
        verified,
        verified_species: None,
    }
}

fn controller() -> ReviewController {
    // Unroutable base URL: issued jobs error out in the worker and are never
    // polled, so tests stay deterministic by injecting results directly.
    let config = AppConfig {
        base_url: "http://127.0.0.1:9".into(),
        datasets: vec![
            DatasetOption::new("Week 1", "data/week_1.json"),
            DatasetOption::new("Week 2", "data/week_2.json"),
        ],
    };
    ReviewController::new(config)
}

fn loaded(seq: u64, records: Vec<Record>) -> DatasetLoadResult {
    DatasetLoadResult {
        seq,
        path: "data/week_1.json".into(),
        result: Ok(Dataset { records }),
        elapsed: Duration::from_millis(1),
    }
}

fn card_ids(controller: &ReviewController) -> Vec<String> {
    controller
        .ui
        .records
        .cards
        .iter()
        .map(|card| card.view.id.clone())
        .collect()
}

#[test]
fn selector_mirrors_the_configured_catalog() {
    let controller = controller();
    let names: Vec<&str> = controller
        .ui
        .selector
        .options
        .iter()
        .map(|option| option.name.as_str())
        .collect();
    assert_eq!(names, vec!["Week 1", "Week 2"]);
    assert_eq!(controller.ui.selector.selected, None);
}

#[test]
fn each_load_request_gets_a_fresh_sequence_number() {
    let mut controller = controller();
    controller.select_dataset(0);
    assert_eq!(controller.jobs.latest_load_seq(), 1);
    controller.select_dataset(1);
    assert_eq!(controller.jobs.latest_load_seq(), 2);
}

#[test]
fn select_first_dataset_only_applies_once() {
    let mut controller = controller();
    controller.select_first_dataset();
    assert_eq!(controller.ui.selector.selected, Some(0));
    controller.select_dataset(1);
    controller.select_first_dataset();
    assert_eq!(controller.ui.selector.selected, Some(1));
}

#[test]
fn load_renders_exactly_the_unverified_subset_in_order() {
    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(
        1,
        vec![
            record(1, false, Some("Fern")),
            record(2, true, None),
            record(3, false, None),
        ],
    ));

    assert_eq!(card_ids(&controller), vec!["1", "3"]);
    let indices: Vec<usize> = controller
        .ui
        .records
        .cards
        .iter()
        .map(|card| card.view.record_index)
        .collect();
    assert_eq!(indices, vec![0, 2]);
    assert_eq!(controller.ui.status.text, "2 records awaiting review");
}

#[test]
fn stale_completion_is_discarded_and_latest_requested_wins() {
    let mut controller = controller();
    controller.select_dataset(0);
    controller.select_dataset(1);

    // The slower first load completes after the second was issued.
    controller.apply_dataset_result(loaded(1, vec![record(10, false, None)]));
    assert!(controller.ui.records.cards.is_empty());

    controller.apply_dataset_result(loaded(2, vec![record(20, false, None)]));
    assert_eq!(card_ids(&controller), vec!["20"]);
}

#[test]
fn failed_load_keeps_the_previous_render() {
    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(1, vec![record(1, false, None)]));
    assert_eq!(card_ids(&controller), vec!["1"]);

    controller.request_load();
    let failed = DatasetLoadResult {
        seq: 2,
        path: "data/week_1.json".into(),
        result: Err(crate::observations::fetch::DatasetFetchError::Fetch(
            crate::observations::fetch::FetchError::Status(502),
        )),
        elapsed: Duration::from_millis(1),
    };
    controller.apply_dataset_result(failed);
    assert_eq!(card_ids(&controller), vec!["1"]);
}

#[test]
fn approval_marks_the_record_and_requests_a_reload() {
    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(
        1,
        vec![record(1, false, Some("Fern")), record(2, true, None)],
    ));
    assert_eq!(card_ids(&controller), vec!["1"]);

    let record_index = controller.ui.records.cards[0].view.record_index;
    controller.decide(record_index, true);

    let decided = controller.record(record_index).unwrap();
    assert!(decided.verified);
    assert_eq!(decided.verified_species.as_deref(), Some("Fern"));
    let toast = controller.ui.toast.as_ref().expect("toast raised");
    assert_eq!(toast.message, "Record 1 approved.");
    assert_eq!(controller.jobs.latest_load_seq(), 2);

    // The list is rebuilt only by load completions.
    assert_eq!(card_ids(&controller), vec!["1"]);
}

#[test]
fn rejection_records_the_sentinel_species() {
    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(1, vec![record(1, false, Some("Fern"))]));

    controller.decide(0, false);

    let decided = controller.record(0).unwrap();
    assert!(decided.verified);
    assert_eq!(decided.verified_species.as_deref(), Some(REJECTED_SPECIES));
    assert_eq!(
        controller.ui.toast.as_ref().unwrap().message,
        "Record 1 rejected."
    );
}

#[test]
fn decided_record_reappears_after_reloading_the_unchanged_payload() {
    let original = vec![record(1, false, Some("Fern")), record(2, true, None)];
    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(1, original.clone()));

    controller.decide(0, true);
    // The remote resource was never updated, so the reload returns the
    // original payload and the decided record comes back for review.
    controller.apply_dataset_result(loaded(2, original));
    assert_eq!(card_ids(&controller), vec!["1"]);
    assert!(controller.record(0).unwrap().needs_review());
}

#[test]
fn media_slots_reflect_payload_fields() {
    let mut with_media = record(1, false, None);
    with_media.image = Some("media/obs1.png".into());
    with_media.audio = Some("media/obs1.wav".into());
    let bare = record(2, false, None);

    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(1, vec![with_media, bare]));

    let cards = &controller.ui.records.cards;
    assert!(matches!(cards[0].image, MediaSlot::Loading));
    assert!(matches!(cards[0].audio, MediaSlot::Loading));
    assert!(matches!(cards[1].image, MediaSlot::Absent));
    assert!(matches!(cards[1].audio, MediaSlot::Absent));
}

#[test]
fn media_completions_for_an_older_generation_are_ignored() {
    let mut with_image = record(1, false, None);
    with_image.image = Some("media/obs1.png".into());

    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(1, vec![with_image]));
    let generation = controller.ui.records.generation;

    controller.apply_media_result(MediaLoadResult {
        generation: generation.wrapping_sub(1),
        card_index: 0,
        kind: MediaKind::Image,
        result: Ok(MediaPayload::Image(egui::ColorImage::from_rgba_unmultiplied(
            [1, 1],
            &[0, 0, 0, 255],
        ))),
    });
    assert!(matches!(
        controller.ui.records.cards[0].image,
        MediaSlot::Loading
    ));

    controller.apply_media_result(MediaLoadResult {
        generation,
        card_index: 0,
        kind: MediaKind::Image,
        result: Ok(MediaPayload::Image(egui::ColorImage::from_rgba_unmultiplied(
            [1, 1],
            &[0, 0, 0, 255],
        ))),
    });
    assert!(matches!(
        controller.ui.records.cards[0].image,
        MediaSlot::Ready(_)
    ));
}

#[test]
fn failed_media_marks_the_slot_without_touching_the_list() {
    let mut with_audio = record(1, false, None);
    with_audio.audio = Some("media/obs1.wav".into());

    let mut controller = controller();
    controller.select_dataset(0);
    controller.apply_dataset_result(loaded(1, vec![with_audio]));
    let generation = controller.ui.records.generation;

    controller.apply_media_result(MediaLoadResult {
        generation,
        card_index: 0,
        kind: MediaKind::Audio,
        result: Err(super::media_loader::MediaLoadError::Fetch(
            crate::observations::fetch::FetchError::Status(404),
        )),
    });
    assert!(matches!(
        controller.ui.records.cards[0].audio,
        MediaSlot::Failed
    ));
    assert_eq!(card_ids(&controller), vec!["1"]);
}
