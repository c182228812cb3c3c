//! End-to-end batch scenarios.

use provis_core::AuditOutcome;
use provis_engine::Provisioner;
use provis_integration_tests::{console_batch, fresh_provisioner};
use provis_model::{BatchSpec, GroupSpec, UserSpec};

#[tokio::test]
async fn group_and_console_user_smoke_test() {
    let provisioner = fresh_provisioner();

    let report = provisioner.run_batch(&console_batch()).await;

    assert_eq!(report.created_groups.len(), 1);
    assert!(!report.created_groups[0].already_exists);

    assert_eq!(report.successful_users.len(), 1);
    assert!(report.failed_users.is_empty());

    let alice = &report.successful_users[0];
    assert!(alice.console_access);
    let password = alice
        .temporary_password
        .as_ref()
        .expect("temporary password issued");
    assert_eq!(password.len(), 16);

    assert_eq!(provisioner.directory().user_groups("alice"), vec!["devs"]);
}

#[tokio::test]
async fn second_run_reports_conflicts() {
    let provisioner = fresh_provisioner();
    let batch = console_batch();

    let first = provisioner.run_batch(&batch).await;
    assert_eq!(first.successful_users.len(), 1);

    let second = provisioner.run_batch(&batch).await;

    // Group handling is idempotent; user handling is not.
    assert_eq!(second.created_groups.len(), 1);
    assert!(second.created_groups[0].already_exists);

    assert!(second.successful_users.is_empty());
    assert_eq!(second.failed_users.len(), 1);
    assert!(second.failed_users[0].reason.contains("already exists"));
}

#[tokio::test]
async fn programmatic_user_gets_keys_and_no_password() {
    let provisioner = fresh_provisioner();
    let batch =
        BatchSpec::new().with_user(UserSpec::new("ci-bot").with_programmatic_access(true));

    let report = provisioner.run_batch(&batch).await;

    let bot = &report.successful_users[0];
    assert!(bot.programmatic_access);
    assert!(!bot.console_access);
    assert!(bot.temporary_password.is_none());

    let pair = bot.access_key.as_ref().expect("access key issued");
    assert!(!pair.access_key_id.is_empty());
    assert!(!pair.secret_access_key.is_empty());
}

#[tokio::test]
async fn every_configured_user_is_accounted_for() {
    let provisioner = fresh_provisioner();
    let batch = BatchSpec::new()
        .with_user(UserSpec::new("alice"))
        .with_user(UserSpec::new("bob").with_console_access(true))
        .with_user(UserSpec::new(""))
        .with_user(UserSpec::new("carol").with_require_mfa(true));

    let report = provisioner.run_batch(&batch).await;

    assert_eq!(
        report.successful_users.len() + report.failed_users.len(),
        batch.users.len()
    );

    // One audit entry per user, in configuration order.
    let subjects: Vec<&str> = report
        .audit_log
        .entries()
        .iter()
        .map(|entry| entry.subject.as_str())
        .collect();
    assert_eq!(subjects, vec!["alice", "bob", "", "carol"]);
}

#[tokio::test]
async fn user_can_join_group_created_earlier_in_the_same_batch() {
    let provisioner = fresh_provisioner();
    let batch = BatchSpec::new()
        .with_group(GroupSpec::new("devs"))
        .with_group(GroupSpec::new("ops"))
        .with_user(UserSpec::new("alice").with_group("devs").with_group("ops"));

    let report = provisioner.run_batch(&batch).await;

    assert_eq!(report.successful_users.len(), 1);
    assert_eq!(
        provisioner.directory().user_groups("alice"),
        vec!["devs", "ops"]
    );
}

#[tokio::test]
async fn repeat_group_run_never_mutates_policies() {
    let provisioner = fresh_provisioner();
    let batch = BatchSpec::new().with_group(
        GroupSpec::new("devs").with_policy("arn:directory::aws:policy/ReadOnlyAccess"),
    );

    provisioner.run_batch(&batch).await;
    provisioner.run_batch(&batch).await;

    assert_eq!(
        provisioner.directory().group_attached_policies("devs").len(),
        1
    );
}

#[tokio::test]
async fn rejected_policy_leaves_user_standing() {
    let provisioner = fresh_provisioner();
    provisioner
        .directory()
        .reject_policy("arn:directory::aws:policy/AdministratorAccess");

    let batch = BatchSpec::new().with_user(
        UserSpec::new("alice").with_policy("arn:directory::aws:policy/AdministratorAccess"),
    );
    let report = provisioner.run_batch(&batch).await;

    assert_eq!(report.successful_users.len(), 1);
    assert!(provisioner
        .directory()
        .user_attached_policies("alice")
        .is_empty());
}

#[tokio::test]
async fn batch_parsed_from_json_round_trips_through_the_engine() {
    let provisioner = fresh_provisioner();
    let batch = BatchSpec::from_json(
        r#"{
            "groups": [{"name": "devs", "policies": ["arn:directory::aws:policy/ReadOnlyAccess"]}],
            "users": [
                {"username": "alice", "groups": ["devs"], "console_access": true, "require_mfa": true},
                {"username": "ci-bot", "programmatic_access": true}
            ]
        }"#,
    )
    .unwrap();
    batch.validate().unwrap();

    let report = provisioner.run_batch(&batch).await;

    assert_eq!(report.successful_users.len(), 2);
    assert!(report.failed_users.is_empty());
    assert!(report.audit_log.entries().iter().all(|e| matches!(
        e.outcome,
        AuditOutcome::Success
    )));
    assert_eq!(
        provisioner.directory().user_inline_policy_names("alice"),
        vec!["alice-mfa-policy"]
    );
}

#[tokio::test]
async fn setup_failure_aborts_before_any_entity() {
    let provisioner = fresh_provisioner();
    provisioner.directory().fail_caller_identity();

    let err = provisioner.verify_session().await.unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(provisioner.directory().user_count(), 0);
    assert_eq!(provisioner.directory().group_count(), 0);
}

#[tokio::test]
async fn audit_log_serializes_without_secret_material() {
    let provisioner = fresh_provisioner();
    let report = provisioner.run_batch(&console_batch()).await;

    let password = report.successful_users[0]
        .temporary_password
        .as_ref()
        .expect("temporary password issued")
        .expose()
        .to_string();

    let audit_json = report.audit_log.to_json_pretty().unwrap();
    assert!(!audit_json.contains(&password));

    let report_json = serde_json::to_string(&report).unwrap();
    assert!(!report_json.contains(&password));
}

#[tokio::test]
async fn creator_tag_flows_into_the_directory() {
    let provisioner = Provisioner::new(provis_backend::InMemoryDirectory::new())
        .with_creator("onboarding-pipeline");
    let batch = BatchSpec::new().with_user(UserSpec::new("alice"));

    provisioner.run_batch(&batch).await;

    let tags = provisioner.directory().user_tags("alice");
    assert!(tags
        .iter()
        .any(|t| t.key == "created-by" && t.value == "onboarding-pipeline"));
}
