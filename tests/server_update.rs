mod fake_client;

use fake_client::FakeClient;
use zillaforge::resources::server::model::{NetworkAttachment, Server, Timeouts};
use zillaforge::resources::server::ServerReconciler;
use zillaforge::sdk::models::{FloatingIpResource, FloatingIpStatus};
use zillaforge::value::Value;

fn attachment(network_id: &str, floating_ip_id: Option<&str>) -> NetworkAttachment {
    NetworkAttachment {
        network_id: Value::Known(network_id.to_string()),
        ip_address: Value::Null,
        primary: Value::Known(true),
        security_group_ids: Value::Known(vec!["11111111-1111-1111-1111-111111111111".to_string()]),
        floating_ip_id: floating_ip_id.map(|s| Value::Known(s.to_string())).unwrap_or(Value::Null),
        floating_ip: Value::Null,
    }
}

fn plan(name: &str, attachments: Vec<NetworkAttachment>) -> Server {
    Server {
        id: Value::Known("ignored-by-create".to_string()),
        name: Value::Known(name.to_string()),
        description: Value::Null,
        flavor_id: Value::Known("flavor-1".to_string()),
        image_id: Value::Known("image-1".to_string()),
        keypair: Value::Known("mykey".to_string()),
        user_data: Value::Null,
        password: Value::Null,
        network_attachment: Value::Known(attachments),
        wait_for_active: Value::Known(false),
        wait_for_deleted: Value::Known(false),
        timeouts: Timeouts::default(),
        status: Value::Unknown,
        ip_addresses: Value::Unknown,
        created_at: Value::Unknown,
    }
}

#[tokio::test]
async fn renaming_the_server_patches_in_place() {
    let client = FakeClient::new();
    let reconciler = ServerReconciler::new(&client);

    let created_plan = plan(
        "web-01",
        vec![attachment("22222222-2222-2222-2222-222222222222", None)],
    );
    let (created, diags) = reconciler.create(&created_plan).await;
    assert!(!diags.has_errors());
    let prior = created.unwrap();

    let mut desired = prior.clone();
    desired.name = Value::Known("web-02".to_string());

    let (state, diags) = reconciler.update(&prior, &desired).await;
    assert!(!diags.has_errors(), "unexpected diagnostics: {}", diags);
    assert_eq!(state.unwrap().name, Value::Known("web-02".to_string()));
}

#[tokio::test]
async fn changing_flavor_id_is_rejected_without_touching_the_remote() {
    let client = FakeClient::new();
    let reconciler = ServerReconciler::new(&client);

    let created_plan = plan(
        "web-01",
        vec![attachment("22222222-2222-2222-2222-222222222222", None)],
    );
    let (created, _) = reconciler.create(&created_plan).await;
    let prior = created.unwrap();

    let mut desired = prior.clone();
    desired.flavor_id = Value::Known("flavor-2".to_string());

    let (state, diags) = reconciler.update(&prior, &desired).await;
    assert!(state.is_none());
    assert!(diags.has_errors());

    let remote = client.state.servers.lock().unwrap();
    let server = remote.values().next().unwrap();
    assert_eq!(server.flavor_id, "flavor-1");
}

#[tokio::test]
async fn adding_a_floating_ip_on_update_associates_it() {
    let client = FakeClient::new();
    let fip_id = "fip-1".to_string();
    client.state.floating_ips.lock().unwrap().insert(
        fip_id.clone(),
        FloatingIpResource {
            id: fip_id.clone(),
            ip_address: "203.0.113.9".to_string(),
            name: None,
            description: None,
            status: FloatingIpStatus::Down,
            device_id: None,
        },
    );

    let reconciler = ServerReconciler::new(&client);
    let created_plan = plan(
        "web-01",
        vec![attachment("22222222-2222-2222-2222-222222222222", None)],
    );
    let (created, _) = reconciler.create(&created_plan).await;
    let prior = created.unwrap();

    let mut desired = prior.clone();
    desired.network_attachment = Value::Known(vec![attachment(
        "22222222-2222-2222-2222-222222222222",
        Some(&fip_id),
    )]);

    let (state, diags) = reconciler.update(&prior, &desired).await;
    assert!(!diags.has_errors(), "unexpected diagnostics: {}", diags);
    let attachment = &state.unwrap().attachments()[0];
    assert_eq!(attachment.floating_ip_id, Value::Known(fip_id));
}

#[tokio::test]
async fn no_op_update_still_returns_a_fresh_read_without_extra_calls() {
    let client = FakeClient::new();
    let reconciler = ServerReconciler::new(&client);

    let created_plan = plan(
        "web-01",
        vec![attachment("22222222-2222-2222-2222-222222222222", None)],
    );
    let (created, _) = reconciler.create(&created_plan).await;
    let prior = created.unwrap();
    let desired = prior.clone();

    let (state, diags) = reconciler.update(&prior, &desired).await;
    assert!(!diags.has_errors());
    assert_eq!(state.unwrap().name, prior.name);
}
