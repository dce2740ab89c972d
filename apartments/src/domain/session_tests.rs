//! Tests for the apartment session.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{ApartmentRepositoryError, MockApartmentRepository, MockChartPresenter};
use crate::domain::{ApartmentFields, ErrorCode, Rent, RentLevel};

fn id(raw: &str) -> ApartmentId {
    ApartmentId::new(raw).expect("valid id")
}

fn stored(raw_id: &str, loyer: f64) -> Apartment {
    Apartment::new(
        id(raw_id),
        ApartmentFields::new(raw_id, "Studio", Rent::new(loyer).expect("valid rent")),
    )
}

fn fill(session: &mut ApartmentSession<MockApartmentRepository>, num_app: &str, loyer: &str) {
    let form = session.form_mut();
    form.set_num_app(num_app);
    form.set_design("Studio");
    form.set_loyer(loyer);
}

#[rstest]
#[tokio::test]
async fn create_then_edit_reclassifies_under_same_id() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_create()
        .withf(|fields| fields.obs() == RentLevel::Bas)
        .times(1)
        .return_once(|_| Ok(ApartmentId::new("doc-1").expect("valid id")));
    repo.expect_update()
        .withf(|target, fields| target.to_string() == "doc-1" && fields.obs() == RentLevel::Eleve)
        .times(1)
        .return_once(|_, _| Ok(()));
    let mut session = ApartmentSession::new(Arc::new(repo));

    fill(&mut session, "A1", "800");
    let created = session.submit().await.expect("create succeeds");
    assert_eq!(created, Notice::Created);
    assert_eq!(session.records()[0].fields().obs(), RentLevel::Bas);

    session.begin_edit(&id("doc-1")).expect("record is loaded");
    session.form_mut().set_loyer("6000");
    let updated = session.submit().await.expect("update succeeds");

    assert_eq!(updated, Notice::Updated);
    assert_eq!(session.records().len(), 1);
    let record = &session.records()[0];
    assert_eq!(record.id(), &id("doc-1"));
    assert_eq!(record.fields().obs(), RentLevel::Eleve);
    assert!(!session.form().is_editing());
}

#[rstest]
#[tokio::test]
async fn blank_number_is_rejected_without_repository_call() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_create().times(0);
    let mut session = ApartmentSession::new(Arc::new(repo));
    fill(&mut session, "   ", "800");

    let error = session.submit().await.expect_err("validation fails");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(session.form().draft().num_app, "   ");
    assert!(!session.is_busy());
}

#[rstest]
#[tokio::test]
async fn mutations_are_rejected_while_busy() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_create().times(0);
    repo.expect_delete().times(0);
    repo.expect_list().times(0);
    let mut session = ApartmentSession::new(Arc::new(repo));
    fill(&mut session, "A1", "800");
    let in_flight = session
        .busy_flag()
        .try_acquire()
        .expect("flag starts lowered");

    assert_eq!(session.submit().await, Err(DomainError::Busy));
    assert_eq!(session.remove(&id("a")).await, Err(DomainError::Busy));
    assert_eq!(session.load().await, Err(DomainError::Busy));

    drop(in_flight);
    assert!(!session.is_busy());
}

#[rstest]
#[tokio::test]
async fn busy_flag_is_cleared_after_repository_failure() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Err(ApartmentRepositoryError::connection("offline")));
    let mut session = ApartmentSession::new(Arc::new(repo));

    let error = session.load().await.expect_err("load fails");

    assert!(error.is_repository());
    assert!(!session.is_busy());
}

#[rstest]
#[tokio::test]
async fn removing_the_edited_record_clears_the_form() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Ok(vec![stored("a", 800.0), stored("b", 7000.0)]));
    repo.expect_delete().times(1).return_once(|_| Ok(()));
    let mut session = ApartmentSession::new(Arc::new(repo));
    session.load().await.expect("load succeeds");
    session.begin_edit(&id("a")).expect("record is loaded");

    let notice = session.remove(&id("a")).await.expect("remove succeeds");

    assert_eq!(notice, Notice::Removed);
    assert!(!session.form().is_editing());
    assert_eq!(session.records().len(), 1);
}

#[rstest]
#[tokio::test]
async fn removing_another_record_keeps_the_edit() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_list()
        .times(1)
        .return_once(|| Ok(vec![stored("a", 800.0), stored("b", 7000.0)]));
    repo.expect_delete().times(1).return_once(|_| Ok(()));
    let mut session = ApartmentSession::new(Arc::new(repo));
    session.load().await.expect("load succeeds");
    session.begin_edit(&id("a")).expect("record is loaded");

    session.remove(&id("b")).await.expect("remove succeeds");

    assert_eq!(session.form().edit_target(), Some(&id("a")));
}

#[rstest]
fn editing_an_unloaded_record_fails() {
    let mut session = ApartmentSession::new(Arc::new(MockApartmentRepository::new()));

    let error = session.begin_edit(&id("ghost")).expect_err("not loaded");

    assert_eq!(error, DomainError::UnknownApartment(id("ghost")));
}

#[rstest]
#[tokio::test]
async fn selected_chart_receives_the_statistics() {
    let mut repo = MockApartmentRepository::new();
    repo.expect_list().times(1).return_once(|| {
        Ok(vec![
            stored("a", 800.0),
            stored("b", 2000.0),
            stored("c", 6000.0),
        ])
    });
    let mut session = ApartmentSession::new(Arc::new(repo));
    session.load().await.expect("load succeeds");

    let mut bar = MockChartPresenter::new();
    bar.expect_present_bar()
        .withf(|series| series.values == [8800.0, 800.0, 6000.0])
        .times(1)
        .return_const(());
    bar.expect_present_pie().times(0);
    session.render_chart(&bar);

    assert_eq!(session.toggle_chart(), ChartKind::Pie);
    let mut pie = MockChartPresenter::new();
    pie.expect_present_bar().times(0);
    pie.expect_present_pie()
        .withf(|slices| slices.len() == 3 && slices[0].name == "Total")
        .times(1)
        .return_const(());
    session.render_chart(&pie);
}
