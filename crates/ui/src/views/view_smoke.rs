use chrono::Duration;
use exam_core::model::{
    PlanId, SubscriptionPlan, Transaction, TransactionId, TransactionStatus, UserId, UserProfile,
    UserRole,
};
use exam_core::time::fixed_now;
use services::ApiError;

use super::test_harness::{
    FakePapers, ViewKind, setup_view_harness, setup_view_harness_for, setup_view_harness_with,
};
use crate::vm::{
    AttemptRowVm, GradeBand, ReviewRowVm, ReviewVm, map_plan_cards, map_transaction_rows,
    map_user_rows,
};

fn profile(id: &str, role: UserRole) -> UserProfile {
    UserProfile {
        id: UserId::new(id),
        email: format!("{id}@example.com"),
        name: format!("Name {id}"),
        mobile: None,
        role,
        is_active: true,
        free_papers_used: 0,
        free_papers_limit: 1,
        total_papers_generated: 0,
        papers_limit: 1,
        subscription_plan: None,
        subscription_expiry: None,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Practice("p1"));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Chemistry Sprint"), "missing title in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Noble gases are inert."), "missing prompt in {html}");
    assert!(html.contains("TRUE FALSE"), "missing badge in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_reports_load_failures_neutrally() {
    for err in [
        ApiError::NotFound("Paper not found".into()),
        ApiError::Network("connection refused".into()),
    ] {
        let mut harness = setup_view_harness_with(
            ViewKind::Practice("gone"),
            FakePapers {
                fetch_error: Some(err),
            },
        );
        harness.rebuild();
        harness.drive_async().await;

        let html = harness.render();
        assert!(
            html.contains("Could not load this paper"),
            "missing failure panel in {html}"
        );
        assert!(!html.contains("Paper not found"), "misleading panel in {html}");
        assert_eq!(
            html.matches("Failed to load paper").count(),
            1,
            "expected one toast in {html}"
        );
    }
}

#[tokio::test(flavor = "current_thread")]
async fn generator_view_starts_on_exam_details() {
    let mut harness = setup_view_harness(ViewKind::Generator);
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Step 1: Exam Details"), "missing step title in {html}");
    assert!(html.contains("JEE Advanced"), "missing exam type option in {html}");
    assert!(!html.contains("Generate Paper"), "generate shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn review_panel_marks_each_answer() {
    let review = ReviewVm {
        percentage_label: "50%".into(),
        score_label: "1 / 2".into(),
        correct_label: "1 correct".into(),
        score_note: None,
        rows: vec![
            ReviewRowVm {
                heading: "Question 1".into(),
                badge: "MCQ".into(),
                prompt: "Pick B".into(),
                user_answer: "B".into(),
                correct_answer: "B".into(),
                explanation: Some("B is right.".into()),
                is_correct: true,
            },
            ReviewRowVm {
                heading: "Question 2".into(),
                badge: "TRUE FALSE".into(),
                prompt: "Sky is green.".into(),
                user_answer: "True".into(),
                correct_answer: "False".into(),
                explanation: None,
                is_correct: false,
            },
        ],
    };
    let mut harness = setup_view_harness(ViewKind::Review(review));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Score: 1 / 2"), "missing score in {html}");
    assert!(html.contains("review-item correct"), "missing correct row in {html}");
    assert!(html.contains("review-item incorrect"), "missing incorrect row in {html}");
    assert!(html.contains("Explanation: B is right."), "missing explanation in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn attempt_table_lists_rows_or_empty_state() {
    let mut empty = setup_view_harness(ViewKind::Attempts(Vec::new()));
    empty.rebuild();
    assert!(empty.render().contains("No quiz attempts yet"));

    let rows = vec![AttemptRowVm {
        id: "a1".into(),
        paper_id: "p1".into(),
        completed_at_str: "Nov 14, 2023 22:13".into(),
        score_label: "3/4".into(),
        percentage_label: "75.0%".into(),
        grade: GradeBand::Excellent,
    }];
    let mut harness = setup_view_harness(ViewKind::Attempts(rows));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Nov 14, 2023 22:13"), "missing date in {html}");
    assert!(html.contains("grade-excellent"), "missing grade class in {html}");
    assert!(html.contains("Excellent"), "missing grade label in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_turns_away_regular_users() {
    for user in [None, Some(profile("u1", UserRole::User))] {
        let mut harness =
            setup_view_harness_for(ViewKind::Admin, FakePapers::default(), user);
        harness.rebuild();
        harness.drive_async().await;

        let html = harness.render();
        assert!(html.contains("Admin access required"), "missing notice in {html}");
        assert!(!html.contains("Total Users"), "stats leaked in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_reports_unreachable_backend() {
    let mut harness = setup_view_harness_for(
        ViewKind::Admin,
        FakePapers::default(),
        Some(profile("admin1", UserRole::Admin)),
    );
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("Admin access required"), "admin turned away in {html}");
    assert!(
        html.contains("Failed to load admin data"),
        "missing toast in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn admin_user_table_hides_self_toggle() {
    let users = [
        profile("admin1", UserRole::Admin),
        profile("u1", UserRole::User),
    ];
    let rows = map_user_rows(&users, Some(&UserId::new("admin1")));
    let mut harness = setup_view_harness(ViewKind::AdminUsers(rows));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("u1@example.com"), "missing user in {html}");
    assert_eq!(html.matches("Deactivate").count(), 1, "self toggle shown in {html}");
    assert!(html.contains("Make admin"), "missing role toggle in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn plan_grid_marks_current_plan() {
    let plan = SubscriptionPlan {
        id: PlanId::new("pro"),
        name: "Pro".into(),
        price: 599.0,
        currency: "INR".into(),
        papers_limit: -1,
        duration_days: 30,
        features: vec!["Download PDF".into()],
        is_active: true,
        created_at: None,
    };
    let mut user = profile("u1", UserRole::User);
    user.subscription_plan = Some("Pro".into());
    let mut harness = setup_view_harness(ViewKind::Plans(map_plan_cards(&[plan], Some(&user))));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("₹599"), "missing price in {html}");
    assert!(html.contains("Papers: Unlimited"), "missing limit in {html}");
    assert!(html.contains("Download PDF"), "missing feature in {html}");
    assert!(html.contains("Current Plan"), "current plan not marked in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn transaction_list_lists_rows_or_empty_state() {
    let mut empty = setup_view_harness(ViewKind::Transactions(Vec::new()));
    empty.rebuild();
    assert!(empty.render().contains("No Transactions Yet"));

    let created = fixed_now();
    let transaction = Transaction {
        id: TransactionId::new("t1"),
        transaction_number: "TXN0001".into(),
        user_id: UserId::new("u1"),
        user_name: "Asha".into(),
        user_email: "asha@example.com".into(),
        user_mobile: None,
        plan_id: PlanId::new("pro"),
        plan_name: "Pro".into(),
        amount: 599.0,
        currency: "INR".into(),
        payment_method: Some("Manual".into()),
        payment_id: None,
        status: TransactionStatus::Completed,
        validity_start: created,
        validity_end: created + Duration::days(30),
        notes: None,
        created_at: created,
    };
    let mut harness = setup_view_harness(ViewKind::Transactions(map_transaction_rows(&[
        transaction,
    ])));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("TXN0001"), "missing number in {html}");
    assert!(html.contains("COMPLETED"), "missing status in {html}");
    assert!(html.contains("Asha (asha@example.com)"), "missing user in {html}");
    assert!(html.contains("Receipt"), "missing receipt button in {html}");
}
