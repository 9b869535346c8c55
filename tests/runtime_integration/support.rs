use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use opscope_core::application::{config::RuntimeConfig, startup};
use tempfile::TempDir;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};

pub(crate) const BASE_ENDPOINT: &str = "https://management.test";

pub(crate) const WEBSITES_MODEL: &str = r#"{
    "name": "WebSiteManagementClient",
    "context": { "ApiVersion": "2015-08-01" },
    "methods": [
        {
            "name": "GetWidget",
            "httpVerb": "GET",
            "url": { "kind": "concat", "items": [
                { "kind": "property", "base": { "kind": "instance" }, "name": "BaseUri" },
                { "kind": "literal", "text": "/widgets/" },
                { "kind": "parameter", "name": "widgetName" }
            ] },
            "responseBodies": [
                { "kind": "object", "members": [
                    { "name": "name", "type": { "kind": "primitive", "name": "String" } }
                ] }
            ]
        }
    ],
    "groups": [
        {
            "name": "Sites",
            "methods": [
                {
                    "name": "CreateOrUpdateSite",
                    "httpVerb": "PUT",
                    "url": { "kind": "concat", "items": [
                        { "kind": "literal", "text": "{BaseUri}" },
                        { "kind": "literal", "text": "/sites/" },
                        { "kind": "parameter", "name": "parameters.SiteName" },
                        { "kind": "conditional", "inner": { "kind": "concat", "items": [
                            { "kind": "literal", "text": "/slots/" },
                            { "kind": "parameter", "name": "slot" }
                        ] } },
                        { "kind": "literal", "text": "?api-version=" },
                        { "kind": "property", "base": { "kind": "instance" }, "name": "ApiVersion" }
                    ] },
                    "requestBodies": [
                        { "kind": "object", "members": [
                            { "name": "location", "type": { "kind": "primitive", "name": "String" } },
                            { "name": "state", "type": { "kind": "enum", "values": ["Running", "Stopped"] } }
                        ] }
                    ]
                },
                {
                    "name": "BackupSite",
                    "httpVerb": "POST",
                    "url": { "kind": "concat", "items": [
                        { "kind": "literal", "text": "{BaseUri}" },
                        { "kind": "literal", "text": "/sites/backup" }
                    ] }
                },
                {
                    "name": "Broken",
                    "httpVerb": "GET",
                    "url": { "kind": "lambda" }
                }
            ]
        }
    ]
}"#;

pub(crate) struct ServerHandle {
    pub(crate) addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    join: JoinHandle<()>,
    _temp_dir: TempDir,
}

impl ServerHandle {
    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub(crate) async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        let _ = self.join.await;
    }
}

pub(crate) async fn spawn_server(model_file_name: &str, model_text: Option<&str>) -> ServerHandle {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("listener should bind");
    let addr = listener
        .local_addr()
        .expect("listener should expose local addr");

    let temp_dir = tempfile::tempdir().expect("temp dir should be created");
    let model_path = temp_dir.path().join(model_file_name);
    if let Some(text) = model_text {
        std::fs::write(&model_path, text).expect("model file should be written");
    }

    let mut config =
        RuntimeConfig::for_test(IpAddr::V4(Ipv4Addr::LOCALHOST), addr.port(), model_path);
    config.base_endpoint = BASE_ENDPOINT.to_owned();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        let _ = startup::run_with_listener(listener, config, async {
            let _ = shutdown_rx.await;
        })
        .await;
    });

    ServerHandle {
        addr,
        shutdown: Some(shutdown_tx),
        join,
        _temp_dir: temp_dir,
    }
}
