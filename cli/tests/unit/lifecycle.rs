//! Lifecycle scenarios driven through the application services against
//! `FakeGateway`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use indexmap::IndexMap;
use vra7_cli::application::services::machine::{self, DeleteOutcome};
use vra7_cli::domain::action::{DESTROY_ACTION, POWER_OFF_ACTION};
use vra7_cli::domain::{MachineState, PollPolicy, ProvisionError};
use vra7_cli::output::json::error_code;
use vra_common::{ApiError, ApiErrorEntry, FieldValue, RequestPhase, ResourceView, ResourceViews};

use crate::mocks::{
    CATALOG_ID, CATALOG_NAME, FakeGateway, InvokeReply, REQUEST_ID, RecordingPause,
    SilentReporter, link, machine_config,
};

fn fast_policy() -> PollPolicy {
    PollPolicy {
        interval: Duration::from_secs(3),
        timeout: Duration::from_secs(30),
    }
}

fn provision_error(err: &anyhow::Error) -> &ProvisionError {
    err.downcast_ref::<ProvisionError>()
        .unwrap_or_else(|| panic!("expected a ProvisionError, got: {err:#}"))
}

// ── Create ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_succeeds_on_the_tenth_check() {
    let gateway = FakeGateway::new().with_phases(&["IN_PROGRESS*9", "SUCCESSFUL"]);
    let pause = RecordingPause::default();
    let mut state = MachineState::new(machine_config("web-01"));

    machine::create(&gateway, &pause, &SilentReporter::default(), fast_policy(), &mut state)
        .await
        .expect("create");

    assert_eq!(gateway.count("fetch_request_status"), 10);
    assert_eq!(pause.count(), 10);
    assert_eq!(pause.total(), Duration::from_secs(30));
    assert_eq!(state.request_id.as_deref(), Some(REQUEST_ID));
    assert_eq!(state.phase, Some(RequestPhase::Successful));
    assert_eq!(state.catalog_id.as_deref(), Some(CATALOG_ID));
}

#[tokio::test]
async fn create_times_out_and_keeps_the_request_id() {
    let gateway = FakeGateway::new().with_phases(&["IN_PROGRESS*10"]);
    let reporter = SilentReporter::default();
    let mut state = MachineState::new(machine_config("web-01"));

    let err = machine::create(
        &gateway,
        &RecordingPause::default(),
        &reporter,
        fast_policy(),
        &mut state,
    )
    .await
    .expect_err("timeout");

    assert_eq!(
        provision_error(&err),
        &ProvisionError::ProvisioningTimedOut {
            request_id: REQUEST_ID.into()
        }
    );
    assert_eq!(state.request_id.as_deref(), Some(REQUEST_ID));
    assert_eq!(state.phase, Some(RequestPhase::InProgress));
    assert_eq!(reporter.warnings.borrow().len(), 1);
}

#[tokio::test]
async fn failed_request_clears_the_id_and_keeps_details() {
    let gateway = FakeGateway::new()
        .with_phases(&["IN_PROGRESS*2"])
        .then_failed("Insufficient storage on datastore");
    let mut state = MachineState::new(machine_config("web-01"));

    let err = machine::create(
        &gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect_err("failed");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::ProvisioningFailed { details } if details.contains("Insufficient storage")
    ));
    assert_eq!(state.request_id, None);
    assert_eq!(state.phase, Some(RequestPhase::Failed));
    assert_eq!(
        state.failed_message.as_deref(),
        Some("Insufficient storage on datastore")
    );
}

#[tokio::test]
async fn status_fetch_error_ends_polling_early() {
    let gateway = FakeGateway::new().with_phases(&["IN_PROGRESS*2"]);
    let pause = RecordingPause::default();
    let mut state = MachineState::new(machine_config("web-01"));

    let err = machine::create(&gateway, &pause, &SilentReporter::default(), fast_policy(), &mut state)
        .await
        .expect_err("transport failure");

    assert!(err.downcast_ref::<ProvisionError>().is_none());
    assert!(format!("{err:#}").contains("connection reset"), "{err:#}");
    assert_eq!(pause.count(), 3);
    assert_eq!(state.request_id.as_deref(), Some(REQUEST_ID));
}

#[tokio::test]
async fn unknown_catalog_is_not_submitted() {
    let gateway = FakeGateway::new().without_catalogs();
    let mut state = MachineState::new(machine_config("web-01"));

    let err = machine::create(
        &gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect_err("not found");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::CatalogNotFound { lookup } if lookup.contains(CATALOG_NAME)
    ));
    assert_eq!(gateway.calls(), vec!["lookup_catalog_id"]);
    assert!(state.request_id.is_none());
}

#[tokio::test]
async fn unknown_catalog_id_is_reported_as_not_found() {
    let gateway = FakeGateway::new();
    let mut config = machine_config("web-01");
    config.catalog_name = None;
    config.catalog_id = Some("nope".into());
    let mut state = MachineState::new(config);

    let err = machine::create(
        &gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect_err("not found");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::CatalogNotFound { lookup } if lookup == "id 'nope'"
    ));
    assert_eq!(error_code(&err), "CATALOG_NOT_FOUND");
    assert_eq!(gateway.calls(), vec!["lookup_catalog_name"]);
}

#[tokio::test]
async fn definition_without_catalog_makes_no_calls() {
    let gateway = FakeGateway::new();
    let mut config = machine_config("web-01");
    config.catalog_name = None;
    let mut state = MachineState::new(config);

    let err = machine::create(
        &gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect_err("missing catalog");

    assert_eq!(provision_error(&err), &ProvisionError::MissingCatalog);
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn catalog_id_alone_recovers_the_name() {
    let gateway = FakeGateway::new().with_phases(&["SUCCESSFUL"]);
    let mut config = machine_config("web-01");
    config.catalog_name = None;
    config.catalog_id = Some(CATALOG_ID.into());
    let mut state = MachineState::new(config);

    machine::create(
        &gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect("create");

    assert_eq!(gateway.calls()[0], "lookup_catalog_name");
    assert_eq!(state.catalog_name.as_deref(), Some(CATALOG_NAME));
}

#[tokio::test]
async fn overrides_reach_the_submitted_request() {
    let gateway = FakeGateway::new().with_phases(&["SUCCESSFUL"]);
    let mut config = machine_config("web-01");
    config.resource_configuration = IndexMap::from([
        ("vSphere_Machine_1.cpu".to_string(), FieldValue::from(serde_json::json!(4))),
        ("vSphere_Machine_1.memory".to_string(), FieldValue::from(serde_json::json!(8192))),
    ]);
    config.deployment_configuration = IndexMap::from([(
        "description".to_string(),
        FieldValue::from("web tier"),
    )]);
    config.catalog_configuration =
        IndexMap::from([("_leaseDays".to_string(), FieldValue::from(serde_json::json!(7)))]);
    let mut state = MachineState::new(config);

    machine::create(
        &gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect("create");

    let submitted = gateway.submitted();
    assert_eq!(submitted.len(), 1);
    let request = &submitted[0];
    assert_eq!(request.catalog_item_id(), CATALOG_ID);

    let body = serde_json::to_value(request.template()).expect("serialize");
    assert_eq!(body["description"], "web tier");
    assert_eq!(body["data"]["_leaseDays"], 7);
    assert_eq!(body["data"]["vSphere_Machine_1"]["data"]["cpu"], 4);
    assert_eq!(body["data"]["vSphere_Machine_1"]["data"]["memory"], 8192);
    assert_eq!(body["data"]["vSphere_Machine_1"]["data"]["storage"], 20);
}

// ── Delete / power-off ────────────────────────────────────────────────────────

async fn provisioned(gateway: &FakeGateway) -> MachineState {
    let mut state = MachineState::new(machine_config("web-01"));
    machine::create(
        gateway,
        &RecordingPause::default(),
        &SilentReporter::default(),
        fast_policy(),
        &mut state,
    )
    .await
    .expect("create");
    state
}

#[tokio::test]
async fn create_then_delete_forgets_the_machine() {
    let gateway = FakeGateway::new().with_phases(&["SUCCESSFUL"]);
    let mut state = provisioned(&gateway).await;

    let outcome = machine::delete(&gateway, &mut state).await.expect("delete");

    assert_eq!(outcome, DeleteOutcome::Destroyed);
    assert!(state.request_id.is_none());
    let invoked = gateway.invoked();
    assert_eq!(invoked.len(), 1);
    assert!(invoked[0].0.ends_with("/resources/res-1/actions/act-destroy/requests"));
    assert_eq!(invoked[0].1.action_id, "act-destroy");
}

#[tokio::test]
async fn delete_while_in_progress_is_busy_without_gateway_calls() {
    let gateway = FakeGateway::new();
    let mut state = MachineState::new(machine_config("web-01"));
    state.record_submission(REQUEST_ID.into());
    state.observe(RequestPhase::InProgress, None);

    let err = machine::delete(&gateway, &mut state)
        .await
        .expect_err("busy");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::ResourceBusy { phase } if phase == "IN_PROGRESS"
    ));
    assert!(gateway.calls().is_empty());
    assert_eq!(state.request_id.as_deref(), Some(REQUEST_ID));
}

#[tokio::test]
async fn rejected_destroy_keeps_the_request_id() {
    let gateway = FakeGateway::new()
        .with_phases(&["SUCCESSFUL"])
        .replying(InvokeReply::Status(400));
    let mut state = provisioned(&gateway).await;

    let err = machine::delete(&gateway, &mut state)
        .await
        .expect_err("rejected");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::DestroyFailed { reason } if reason.contains("400")
    ));
    assert_eq!(state.request_id.as_deref(), Some(REQUEST_ID));
}

#[tokio::test]
async fn structured_api_error_becomes_destroy_failure() {
    let gateway = FakeGateway::new()
        .with_phases(&["SUCCESSFUL"])
        .replying(InvokeReply::Api(ApiError {
            errors: vec![ApiErrorEntry {
                code: 20117,
                message: "The action is not entitled".into(),
                system_message: None,
            }],
        }));
    let mut state = provisioned(&gateway).await;

    let err = machine::delete(&gateway, &mut state)
        .await
        .expect_err("rejected");

    assert!(matches!(
        provision_error(&err),
        ProvisionError::DestroyFailed { reason } if reason.contains("not entitled")
    ));
}

#[tokio::test]
async fn destroy_link_on_a_second_resource_is_found() {
    let view = ResourceViews {
        content: vec![
            ResourceView {
                resource_id: "vm-1".into(),
                name: Some("web-01-vm".into()),
                links: vec![link(POWER_OFF_ACTION, "vm-1", "act-poweroff")],
            },
            ResourceView {
                resource_id: "dep-1".into(),
                name: Some("web-01".into()),
                links: vec![link(DESTROY_ACTION, "dep-1", "act-destroy")],
            },
        ],
    };
    let gateway = FakeGateway::new().with_phases(&["SUCCESSFUL"]).with_view(view);
    let mut state = provisioned(&gateway).await;

    machine::delete(&gateway, &mut state).await.expect("delete");

    let invoked = gateway.invoked();
    assert!(invoked[0].0.contains("/resources/dep-1/actions/act-destroy/"));
    assert_eq!(invoked[0].1.resource_id, "dep-1");
}

#[tokio::test]
async fn power_off_leaves_the_lifecycle_alone() {
    let gateway = FakeGateway::new().with_phases(&["SUCCESSFUL"]);
    let state = provisioned(&gateway).await;
    let before = (state.request_id.clone(), state.phase.clone());

    machine::power_off(&gateway, &state).await.expect("power off");

    assert_eq!((state.request_id.clone(), state.phase.clone()), before);
    assert!(gateway.invoked()[0].0.contains("act-poweroff"));
}

#[tokio::test]
async fn power_off_without_the_action_is_not_provisioned() {
    let gateway = FakeGateway::new()
        .with_phases(&["SUCCESSFUL"])
        .with_view(ResourceViews::default());
    let state = provisioned(&gateway).await;

    let err = machine::power_off(&gateway, &state)
        .await
        .expect_err("no action");

    assert_eq!(provision_error(&err), &ProvisionError::ResourceNotProvisioned);
    assert_eq!(gateway.count("fetch_action_template"), 0);
}
