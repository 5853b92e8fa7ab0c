/// Submit flow driven by a virtual clock
///
/// The round trip, the success banner and the overlay are scheduled work, so
/// each test moves a `ManualScheduler` forward and inspects the in-memory page.

use contact_form::memory::{FieldError, MemoryPage, SubmitControl};
use contact_form::{
    Config, FieldName, ManualScheduler, NoticeKind, Scheduler, SubmissionOrchestrator,
    SubmissionState, SubmitOutcome,
};
use pretty_assertions::assert_eq;
use std::rc::Rc;
use std::time::Duration;

struct Harness {
    page: Rc<MemoryPage>,
    scheduler: Rc<ManualScheduler>,
    orchestrator: Rc<SubmissionOrchestrator<MemoryPage>>,
}

fn harness() -> Harness {
    let page = Rc::new(MemoryPage::new());
    let scheduler = Rc::new(ManualScheduler::new());
    let orchestrator = SubmissionOrchestrator::new(
        Rc::clone(&page),
        Rc::clone(&scheduler) as Rc<dyn Scheduler>,
        Rc::new(Config::default()),
    );
    Harness {
        page,
        scheduler,
        orchestrator,
    }
}

fn fill(page: &MemoryPage, message: &str) {
    page.set_text("nama", "Siti Aminah");
    page.set_text("tempatLahir", "Yogyakarta");
    page.check_radio("jenisKelamin", "Perempuan");
    page.set_text("email", "siti@contoh.id");
    page.set_text("telepon", "+6281234567890");
    page.set_text("pesan", message);
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[test]
fn test_invalid_form_schedules_nothing() {
    let h = harness();
    fill(&h.page, "terlalu");

    let outcome = h.orchestrator.submit();

    assert!(matches!(outcome, SubmitOutcome::Invalid(ref report) if !report.is_valid()));
    assert_eq!(h.scheduler.pending(), 0);
    assert_eq!(h.orchestrator.state(), SubmissionState::Idle);
    assert!(h.page.field_error(FieldName::Pesan).errored);
    assert!(!h.page.submit_control().disabled);
}

#[test]
fn test_submit_disables_control_until_round_trip() {
    let h = harness();
    fill(&h.page, "Mohon info harga jasa desain.");

    let outcome = h.orchestrator.submit();

    let SubmitOutcome::Scheduled(data) = outcome else {
        panic!("expected a scheduled submission");
    };
    assert_eq!(data.get(FieldName::Nama), "Siti Aminah");
    assert_eq!(h.orchestrator.state(), SubmissionState::Submitting);
    assert_eq!(
        h.page.submit_control(),
        SubmitControl {
            disabled: true,
            label: "Mengirim...".to_string(),
        }
    );

    h.scheduler.advance(ms(999));
    assert!(h.page.overlay().is_none());
    assert!(h.page.submit_control().disabled);
}

#[test]
fn test_successful_cycle_resets_everything() {
    let h = harness();
    let message = "Saya ingin memesan website untuk usaha katering keluarga kami.";
    fill(&h.page, message);

    h.orchestrator.submit();
    h.scheduler.advance(ms(1000));

    assert_eq!(h.orchestrator.state(), SubmissionState::Idle);
    assert_eq!(
        h.page.submit_control(),
        SubmitControl {
            disabled: false,
            label: "Submit".to_string(),
        }
    );
    assert_eq!(h.page.resets(), 1);
    for field in FieldName::ALL {
        assert_eq!(h.page.field_error(field), FieldError::default());
    }

    assert_eq!(h.page.display_text("displayTempatLahir").as_deref(), Some("Yogyakarta/1996"));
    assert_eq!(h.page.display_text("displayJenisKelamin").as_deref(), Some("Perempuan"));
    assert_eq!(
        h.page.display_text("displayPesan"),
        Some(format!("{}...", &message[..50]))
    );

    let overlay = h.page.overlay().expect("overlay shown");
    assert!(overlay.contains("Siti Aminah"));
    assert!(overlay.contains("+6281234567890"));
}

#[test]
fn test_short_message_is_not_truncated() {
    let h = harness();
    fill(&h.page, "Terima kasih banyak!");
    h.orchestrator.submit();
    h.scheduler.advance(ms(1000));

    assert_eq!(h.page.display_text("displayPesan").as_deref(), Some("Terima kasih banyak!"));
}

#[test]
fn test_success_banner_dismisses_itself() {
    let h = harness();
    fill(&h.page, "Pesan yang cukup panjang.");
    h.orchestrator.submit();
    h.scheduler.advance(ms(1000));

    let notices = h.page.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].kind, NoticeKind::SubmitSuccess);
    assert_eq!(notices[0].message, "Pesan berhasil dikirim!");

    h.scheduler.advance(ms(2999));
    assert_eq!(h.page.notices().len(), 1);
    h.scheduler.advance(ms(1));
    assert!(h.page.notices().is_empty());
}

#[test]
fn test_overlapping_submissions_run_independently() {
    let h = harness();
    fill(&h.page, "Permintaan pertama saya.");
    h.orchestrator.submit();
    h.scheduler.advance(ms(500));
    h.orchestrator.submit();

    h.scheduler.advance(ms(500));
    assert_eq!(h.orchestrator.state(), SubmissionState::Submitting);
    assert_eq!(h.page.notices().len(), 1);

    h.scheduler.advance(ms(500));
    assert_eq!(h.orchestrator.state(), SubmissionState::Idle);
    assert_eq!(h.page.notices().len(), 2);
    assert_eq!(h.page.resets(), 2);
}

#[test]
fn test_overlay_escapes_submitted_markup() {
    let h = harness();
    fill(&h.page, "<img src=x onerror=alert(1)> tolong hubungi saya");
    h.orchestrator.submit();
    h.scheduler.advance(ms(1000));

    let overlay = h.page.overlay().unwrap();
    assert!(!overlay.contains("<img"));
    assert!(overlay.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn test_overlay_closes_only_on_request() {
    let h = harness();
    fill(&h.page, "Halo dari Medan, salam kenal.");
    h.orchestrator.submit();
    h.scheduler.run_all();

    assert!(h.page.overlay().is_some());
    assert!(h.orchestrator.close_results());
    assert!(h.page.overlay().is_none());
    assert!(!h.orchestrator.close_results());
}
