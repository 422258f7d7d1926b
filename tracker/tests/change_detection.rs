mod common;

use common::{MINIMUM_CONTENT_LENGTH, ScriptedFetcher, open_database, temporary_database};
use pretty_assertions::assert_eq;
use rule_redline::{DiffTag, diff_text, render_text};
use rule_tracker::{
    change_detection::{ChangeDetector, Outcome, RejectionReason},
    fetcher::FetchResult,
    registry::TrackedDocument,
};

const RULE_ID: &str = "4210";
const BASELINE_TEXT: &str = "(a) Rule text here and more.";
const AMENDED_TEXT: &str = "(a) Rule text here and more.\n(b) A new paragraph on reporting duties.";

fn text(text: &str) -> FetchResult { FetchResult::Text(text.to_owned()) }

#[tokio::test]
async fn test_baseline_then_no_change_then_change() {
    let (_directory, database) = temporary_database().await;
    let detector = ChangeDetector::new(database.clone(), MINIMUM_CONTENT_LENGTH);

    let outcome = detector.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap();
    let Outcome::BaselineEstablished { version: baseline } = outcome else {
        panic!("Expected a baseline, got {outcome:?}");
    };
    assert_eq!(baseline.label, "Initial Baseline");
    assert_eq!(database.history(RULE_ID).await.unwrap().len(), 1);

    let outcome = detector.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap();
    assert_eq!(outcome, Outcome::NoChange);
    assert_eq!(database.history(RULE_ID).await.unwrap().len(), 1);

    let outcome = detector.evaluate(RULE_ID, text(AMENDED_TEXT)).await.unwrap();
    let Outcome::ChangeLogged { version: amended } = outcome else {
        panic!("Expected a change, got {outcome:?}");
    };
    assert_eq!(amended.label, "Change Detected");

    let history = database.history(RULE_ID).await.unwrap();
    assert_eq!(history.len(), 2);

    let old = database.text_of(history[1].id).await.unwrap();
    let new = database.text_of(history[0].id).await.unwrap();
    let tags = diff_text(&old, &new)
        .into_iter()
        .map(|span| (span.tag, span.old_range, span.new_range))
        .collect::<Vec<_>>();
    assert_eq!(
        tags,
        vec![(DiffTag::Equal, 0..1, 0..1), (DiffTag::Insert, 1..1, 1..2)]
    );
}

#[tokio::test]
async fn test_identical_versions_render_unchanged() {
    let (_directory, database) = temporary_database().await;
    let first = database
        .append(RULE_ID, AMENDED_TEXT, "Initial Baseline")
        .await
        .unwrap();
    let second = database
        .append(RULE_ID, AMENDED_TEXT, "Change Detected")
        .await
        .unwrap();

    let old = database.text_of(first.id).await.unwrap();
    let new = database.text_of(second.id).await.unwrap();

    let spans = diff_text(&old, &new);
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].tag, DiffTag::Equal);
    assert!(render_text(&old, &new).rows().iter().all(|row| row.is_unchanged()));
}

#[tokio::test]
async fn test_evaluation_is_idempotent() {
    let (_directory, database) = temporary_database().await;
    let detector = ChangeDetector::new(database.clone(), MINIMUM_CONTENT_LENGTH);

    detector.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap();
    for _ in 0..3 {
        assert_eq!(
            detector.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap(),
            Outcome::NoChange
        );
    }

    assert_eq!(database.history(RULE_ID).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejections_never_touch_history() {
    let (_directory, database) = temporary_database().await;
    let detector = ChangeDetector::new(database.clone(), MINIMUM_CONTENT_LENGTH);
    detector.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap();

    let outcome = detector
        .evaluate(
            RULE_ID,
            FetchResult::Failure("Connection error: timed out".to_owned()),
        )
        .await
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Rejected {
            reason: RejectionReason::FetchFailure {
                reason: "Connection error: timed out".to_owned()
            }
        }
    );

    let outcome = detector.evaluate(RULE_ID, text("  Page moved.  ")).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Rejected {
            reason: RejectionReason::InsufficientContent {
                length: 11,
                minimum: MINIMUM_CONTENT_LENGTH
            }
        }
    );

    let outcome = detector.evaluate(RULE_ID, text("")).await.unwrap();
    assert!(matches!(outcome, Outcome::Rejected { .. }));

    let history = database.history(RULE_ID).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(
        database.text_of(history[0].id).await.unwrap(),
        BASELINE_TEXT
    );
}

#[tokio::test]
async fn test_concurrent_baselines_in_one_process() {
    let (_directory, database) = temporary_database().await;
    let first = ChangeDetector::new(database.clone(), MINIMUM_CONTENT_LENGTH);
    let second = first.clone();

    let (a, b) = tokio::join!(
        first.evaluate(RULE_ID, text(BASELINE_TEXT)),
        second.evaluate(RULE_ID, text(BASELINE_TEXT)),
    );

    let mut outcomes = [a.unwrap(), b.unwrap()]
        .map(|outcome| matches!(outcome, Outcome::BaselineEstablished { .. }));
    outcomes.sort_unstable();
    assert_eq!(outcomes, [false, true]);
    assert_eq!(database.history(RULE_ID).await.unwrap().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_baselines_across_connections() {
    let directory = tempfile::tempdir().unwrap();
    let first = ChangeDetector::new(
        open_database(directory.path()).await,
        MINIMUM_CONTENT_LENGTH,
    );
    let second = ChangeDetector::new(
        open_database(directory.path()).await,
        MINIMUM_CONTENT_LENGTH,
    );

    let (a, b) = tokio::join!(
        first.evaluate(RULE_ID, text(BASELINE_TEXT)),
        second.evaluate(RULE_ID, text(BASELINE_TEXT)),
    );

    let baselines = [a.unwrap(), b.unwrap()]
        .iter()
        .filter(|outcome| matches!(outcome, Outcome::BaselineEstablished { .. }))
        .count();
    assert_eq!(baselines, 1);

    let history = open_database(directory.path())
        .await
        .history(RULE_ID)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
}

fn assert_one_change_one_no_change(a: &Outcome, b: &Outcome) {
    let mut outcomes = [a, b].map(ToString::to_string);
    outcomes.sort_unstable();
    assert_eq!(outcomes, ["Change Logged", "Compliant"]);
}

#[tokio::test]
async fn test_concurrent_changes_in_one_process() {
    let (_directory, database) = temporary_database().await;
    let first = ChangeDetector::new(database.clone(), MINIMUM_CONTENT_LENGTH);
    let second = first.clone();
    first.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap();

    let (a, b) = tokio::join!(
        first.evaluate(RULE_ID, text(AMENDED_TEXT)),
        second.evaluate(RULE_ID, text(AMENDED_TEXT)),
    );

    assert_one_change_one_no_change(&a.unwrap(), &b.unwrap());
    let history = database.history(RULE_ID).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(database.text_of(history[0].id).await.unwrap(), AMENDED_TEXT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_changes_across_connections() {
    let directory = tempfile::tempdir().unwrap();
    let first = ChangeDetector::new(
        open_database(directory.path()).await,
        MINIMUM_CONTENT_LENGTH,
    );
    let second = ChangeDetector::new(
        open_database(directory.path()).await,
        MINIMUM_CONTENT_LENGTH,
    );
    first.evaluate(RULE_ID, text(BASELINE_TEXT)).await.unwrap();

    let (a, b) = tokio::join!(
        first.evaluate(RULE_ID, text(AMENDED_TEXT)),
        second.evaluate(RULE_ID, text(AMENDED_TEXT)),
    );

    assert_one_change_one_no_change(&a.unwrap(), &b.unwrap());
    let history = open_database(directory.path())
        .await
        .history(RULE_ID)
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].label, "Change Detected");
    assert_eq!(history[1].label, "Initial Baseline");
}

#[tokio::test]
async fn test_audit_uses_the_fetcher() {
    let (_directory, database) = temporary_database().await;
    let detector = ChangeDetector::new(database.clone(), MINIMUM_CONTENT_LENGTH);
    let fetcher = ScriptedFetcher::default();
    let document = TrackedDocument {
        id: RULE_ID.to_owned(),
        name: "Margin Requirements".to_owned(),
        locator: "https://rules.example.org/4210".to_owned(),
    };

    let outcome = detector.audit(&fetcher, &document).await.unwrap();
    assert!(matches!(
        outcome,
        Outcome::Rejected {
            reason: RejectionReason::FetchFailure { .. }
        }
    ));

    fetcher.respond(&document.locator, text(BASELINE_TEXT));
    let outcome = detector.audit(&fetcher, &document).await.unwrap();
    assert_eq!(outcome.to_string(), "Baseline Established");
    assert_eq!(
        database.latest(RULE_ID, None).await.unwrap().map(|version| version.text),
        Some(BASELINE_TEXT.to_owned())
    );
}
