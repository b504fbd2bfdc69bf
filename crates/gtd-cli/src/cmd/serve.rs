use anyhow::Context;
use gtd_core::{
    config::{Config, StoreBackend},
    Services,
};
use std::path::Path;

pub fn run(root: &Path, port: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load(root)?;
    let port = port.unwrap_or(config.server.port);
    let services = Services::open(root, &config).context("failed to open store")?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("GTD API → http://localhost:{actual_port}/api");
        if config.store.backend == StoreBackend::Redb {
            println!(
                "  {} stays locked until the server stops; use the API for changes meanwhile",
                config.store.path.display()
            );
        }
        gtd_server::serve_on(services, listener).await
    })
}
