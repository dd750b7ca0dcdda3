/* demos/basic.rs */

use std::sync::Arc;
use std::time::Duration;

use livecc::store::{ClientOptions, ConfigStore, MemoryStore, StoreError};
use livecc::{Subscriber, SubscriberConf};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct AppConfig {
	name: String,
	timeout: u64,
	#[serde(rename = "maxConns")]
	max_conns: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// 0. A stand-in for the remote store; a real client would poll the server.
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "name", "live-demo");
	store.set("application.json", "timeout", 30);
	store.set("application.json", "maxConns", 100);

	// 1. Describe what to subscribe to.
	let conf = SubscriberConf {
		app_id: "live-demo".into(),
		namespace: "application.json".into(),
		meta_addr: "http://localhost:8080".into(),
		backup: true,
		backup_path: Some("/tmp/livecc-backup".into()),
		..Default::default()
	};

	// 2. Connect; the first load happens here.
	let backing = Arc::clone(&store);
	let connector = move |opts: &ClientOptions| -> Result<Arc<dyn ConfigStore>, StoreError> {
		println!("Connecting to {} as {}", opts.server_addr, opts.app_id);
		Ok(backing.clone())
	};
	let sub = Arc::new(Subscriber::connect(&conf, &connector)?);

	let config: AppConfig = serde_json::from_str(&sub.value()?)?;
	println!("Initial config: {:?}", config);

	// 3. Hot reload.
	let weak = Arc::downgrade(&sub);
	sub.add_listener(move || {
		let Some(sub) = weak.upgrade() else { return };
		match sub.value().map(|raw| serde_json::from_str::<AppConfig>(&raw)) {
			Ok(Ok(config)) => println!("Config updated: {:?}", config),
			Ok(Err(e)) => eprintln!("Failed to decode config: {}", e),
			Err(e) => eprintln!("Failed to read config: {}", e),
		}
	});

	// 4. Simulate upstream changes.
	for conns in [200, 300] {
		tokio::time::sleep(Duration::from_millis(500)).await;
		store.set("application.json", "maxConns", conns);
		store.notify("application.json");
	}

	tokio::time::sleep(Duration::from_millis(500)).await;
	println!("Done.");
	Ok(())
}
