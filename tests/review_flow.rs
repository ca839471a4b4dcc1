mod support;

use std::time::Duration;

use support::server::FixtureServer;

use fieldvet::egui_app::controller::ReviewController;
use fieldvet::egui_app::state::MediaSlot;
use fieldvet::observations::catalog::DatasetOption;
use fieldvet::observations::config::AppConfig;
use fieldvet::observations::records::REJECTED_SPECIES;

struct ReviewHarness {
    server: FixtureServer,
    controller: ReviewController,
}

impl ReviewHarness {
    /// Serve `body` as the only dataset and load it.
    fn load(body: &str) -> Self {
        let server = FixtureServer::serve_json(body.to_string());
        let config = AppConfig {
            base_url: server.base_url().to_string(),
            datasets: vec![DatasetOption::new("Survey", "data/survey.json")],
        };
        let mut controller = ReviewController::new(config);
        controller.select_first_dataset();
        let mut harness = Self { server, controller };
        assert!(
            harness.settle(|controller| !controller.ui.records.cards.is_empty()
                || controller.ui.records.generation > 0),
            "initial dataset load did not resolve"
        );
        harness
    }

    /// Pump the controller until `ready` holds or the budget runs out.
    fn settle(&mut self, ready: impl Fn(&ReviewController) -> bool) -> bool {
        for _ in 0..400 {
            self.controller.process_frame();
            if ready(&self.controller) {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    fn card_ids(&self) -> Vec<String> {
        self.controller
            .ui
            .records
            .cards
            .iter()
            .map(|card| card.view.id.clone())
            .collect()
    }
}

#[test]
fn load_renders_the_unverified_subset_in_original_order() {
    let body = r#"{"records":[
        {"id":1,"verified":false,"suggested_species":"Fern"},
        {"id":2,"verified":true,"suggested_species":"Moss"},
        {"id":3,"verified":false}
    ]}"#;
    let mut harness = ReviewHarness::load(body);
    assert!(harness.settle(|controller| controller.ui.records.cards.len() == 2));

    assert_eq!(harness.card_ids(), vec!["1", "3"]);
    let cards = &harness.controller.ui.records.cards;
    assert_eq!(cards[0].view.species, "Fern");
    assert_eq!(cards[1].view.species, "Unknown");
    assert_eq!(cards[1].view.location, "n/a");
    assert_eq!(cards[1].view.signal, "n/a");
}

#[test]
fn approving_a_record_does_not_survive_the_reload() {
    let body = r#"{"records":[{"id":1,"verified":false,"suggested_species":"Fern"},{"id":2,"verified":true}]}"#;
    let mut harness = ReviewHarness::load(body);
    assert!(harness.settle(|controller| controller.ui.records.cards.len() == 1));
    assert_eq!(harness.card_ids(), vec!["1"]);

    let generation = harness.controller.ui.records.generation;
    let record_index = harness.controller.ui.records.cards[0].view.record_index;
    harness.controller.decide(record_index, true);

    // The decision lands in memory and notifies exactly once, before the
    // reload resolves.
    let decided = harness.controller.record(record_index).unwrap();
    assert!(decided.verified);
    assert_eq!(decided.verified_species.as_deref(), Some("Fern"));
    let toast = harness.controller.ui.toast.as_ref().expect("decision toast");
    assert_eq!(toast.message, "Record 1 approved.");

    // The remote resource never changed, so the reload brings the record
    // back for review.
    assert!(harness.settle(|controller| controller.ui.records.generation > generation));
    assert!(harness.server.request_count() >= 2);
    assert_eq!(harness.card_ids(), vec!["1"]);
    assert!(harness.controller.record(record_index).unwrap().needs_review());
}

#[test]
fn rejecting_a_record_writes_the_sentinel_then_resets_on_reload() {
    let body = r#"{"records":[{"id":9,"verified":false,"suggested_species":"Fern"}]}"#;
    let mut harness = ReviewHarness::load(body);
    assert!(harness.settle(|controller| controller.ui.records.cards.len() == 1));

    let generation = harness.controller.ui.records.generation;
    harness.controller.decide(0, false);

    let decided = harness.controller.record(0).unwrap();
    assert!(decided.verified);
    assert_eq!(decided.verified_species.as_deref(), Some(REJECTED_SPECIES));
    assert_eq!(
        harness.controller.ui.toast.as_ref().unwrap().message,
        "Record 9 rejected."
    );

    assert!(harness.settle(|controller| controller.ui.records.generation > generation));
    assert_eq!(harness.card_ids(), vec!["9"]);
    assert_eq!(harness.controller.record(0).unwrap().verified_species, None);
}

#[test]
fn media_elements_appear_only_for_records_that_reference_them() {
    let body = r#"{"records":[
        {"id":1,"verified":false,"image":"media/obs1.png","audio":"media/obs1.wav"},
        {"id":2,"verified":false}
    ]}"#;
    let mut harness = ReviewHarness::load(body);
    assert!(harness.settle(|controller| controller.ui.records.cards.len() == 2));

    // The fixture server answers every path with the JSON body: the audio
    // slot keeps the raw bytes, the image slot fails to decode. Either way
    // the slots exist only where the payload referenced media.
    assert!(harness.settle(|controller| {
        let card = &controller.ui.records.cards[0];
        !matches!(card.image, MediaSlot::Loading) && !matches!(card.audio, MediaSlot::Loading)
    }));

    let cards = &harness.controller.ui.records.cards;
    assert!(cards[0].image.is_present());
    assert!(matches!(cards[0].image, MediaSlot::Failed));
    assert!(matches!(cards[0].audio, MediaSlot::Ready(_)));
    assert!(!cards[1].image.is_present());
    assert!(!cards[1].audio.is_present());
}
