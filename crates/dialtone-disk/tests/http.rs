use dialtone_disk::{
    run_smoke, DeleteOutcome, DiskClient, DiskError, DiskSettings, ResourceState, ResourceStore,
    SmokeStepKind,
};
use std::time::Duration;

#[path = "support/stub_server.rs"]
mod stub_server;

use stub_server::serve;

fn client(base_url: &str) -> DiskClient {
    DiskClient::new(DiskSettings {
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(5),
        ..DiskSettings::new(base_url, "test-token")
    })
    .expect("client")
}

#[test]
fn smoke_issues_expected_requests() {
    let (base_url, handle) = serve(vec![404, 201, 200, 204]);
    let client = client(&base_url);

    let report = run_smoke(&client, "super_test_dir").expect("smoke");
    assert_eq!(report.steps.len(), 4);
    assert_eq!(report.store, "cloud-disk");

    let seen = handle.join().expect("server thread");
    let lines: Vec<&str> = seen.iter().map(|req| req.request_line.as_str()).collect();
    assert_eq!(
        lines,
        vec![
            "GET /v1/disk/resources?path=super_test_dir HTTP/1.1",
            "PUT /v1/disk/resources?path=super_test_dir HTTP/1.1",
            "GET /v1/disk/resources?path=super_test_dir HTTP/1.1",
            "DELETE /v1/disk/resources?path=super_test_dir&permanently=true HTTP/1.1",
        ]
    );
    for req in &seen {
        assert_eq!(req.authorization.as_deref(), Some("OAuth test-token"));
    }
}

#[test]
fn smoke_reports_unexpected_status() {
    let (base_url, handle) = serve(vec![404, 507]);
    let client = client(&base_url);

    let err = run_smoke(&client, "dir").expect_err("smoke should fail");
    match err {
        DiskError::SmokeFailed { step, observed, .. } => {
            assert_eq!(step, SmokeStepKind::Create);
            assert_eq!(observed, "status 507");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(handle.join().expect("server thread").len(), 2);
}

#[test]
fn status_codes_map_to_outcomes() {
    let (base_url, handle) = serve(vec![200, 404, 409, 202, 404, 401]);
    let client = client(&base_url);

    assert_eq!(client.stat("a").expect("stat"), ResourceState::Found);
    assert_eq!(client.stat("b").expect("stat"), ResourceState::Absent);
    assert!(matches!(
        client.create_folder("a"),
        Err(DiskError::AlreadyExists(path)) if path == "a"
    ));
    assert_eq!(client.delete("a", false).expect("delete"), DeleteOutcome::Accepted);
    assert!(matches!(client.delete("b", true), Err(DiskError::NotFound(_))));
    assert!(matches!(
        client.stat("c"),
        Err(DiskError::Status {
            method: "GET",
            status: 401,
            ..
        })
    ));

    let seen = handle.join().expect("server thread");
    assert_eq!(
        seen[3].request_line,
        "DELETE /v1/disk/resources?path=a HTTP/1.1"
    );
}
