/* tests/subscriber_tests.rs */

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use livecc::store::{ClientOptions, ConfigStore, MemoryStore, StoreError};
use livecc::{Delivery, SubscribeError, Subscriber, SubscriberConf};
use serde_json::Value;

fn conf(namespace: &str) -> SubscriberConf {
	SubscriberConf {
		app_id: "test-app".into(),
		meta_addr: "http://localhost:8080".into(),
		namespace: namespace.into(),
		delivery: Delivery::Inline,
		..Default::default()
	}
}

fn subscribe(store: &Arc<MemoryStore>, conf: &SubscriberConf) -> Result<Subscriber, SubscribeError> {
	Subscriber::new(conf, store.clone())
}

fn parse(sub: &Subscriber) -> HashMap<String, Value> {
	serde_json::from_str(&sub.value().unwrap()).unwrap()
}

#[test]
fn test_load_json_namespace() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "name", "test-app");
	store.set("application.json", "version", "1.0.0");
	store.set("application.json", "timeout", 30);

	let sub = subscribe(&store, &conf("application.json")).unwrap();

	let result = parse(&sub);
	assert_eq!(result["name"], "test-app");
	assert_eq!(result["version"], "1.0.0");
	assert_eq!(result["timeout"], 30);
	assert_eq!(sub.meta().unwrap().version, 1);
	assert_eq!(sub.meta().unwrap().namespace, "application.json");
}

#[test]
fn test_load_specific_key() {
	let store = Arc::new(MemoryStore::new());
	store.set("application", "database.url", "mysql://localhost:3306/test");
	store.set("application", "database.user", "root");

	let c = SubscriberConf {
		key: Some("database.url".into()),
		..conf("application")
	};
	let sub = subscribe(&store, &c).unwrap();

	assert_eq!(sub.key(), Some("database.url"));
	assert_eq!(sub.value().unwrap().as_str(), "mysql://localhost:3306/test");
}

#[test]
fn test_missing_key_fails_construction() {
	let store = Arc::new(MemoryStore::new());
	let c = SubscriberConf {
		key: Some("non.existent.key".into()),
		..conf("application")
	};

	let err = subscribe(&store, &c).unwrap_err();
	assert!(err.is_key_not_found());
	assert!(err.to_string().contains("key not found"));
	// The registration made before the failed load is released.
	assert_eq!(store.watcher_count(), 0);
}

#[test]
fn test_unavailable_store_fails_construction() {
	let store = Arc::new(MemoryStore::new());
	store.set_available(false);

	let err = subscribe(&store, &conf("application")).unwrap_err();
	assert!(err.is_unavailable());
}

#[test]
fn test_invalid_config() {
	let store = Arc::new(MemoryStore::new());

	let no_app = SubscriberConf {
		app_id: String::new(),
		..conf("application")
	};
	assert!(matches!(
		subscribe(&store, &no_app),
		Err(SubscribeError::ConfigInvalid(_))
	));

	let no_addr = SubscriberConf {
		meta_addr: String::new(),
		..conf("application")
	};
	assert!(matches!(
		subscribe(&store, &no_addr),
		Err(SubscribeError::ConfigInvalid(_))
	));

	let bad_format = SubscriberConf {
		format: Some("xml".into()),
		..conf("application")
	};
	assert!(matches!(
		subscribe(&store, &bad_format),
		Err(SubscribeError::ConfigInvalid(_))
	));
	assert_eq!(store.watcher_count(), 0);
}

#[test]
fn test_hot_reload() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "feature.enabled", true);

	let sub = subscribe(&store, &conf("application.json")).unwrap();

	let changed = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&changed);
	sub.add_listener(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	store.set("application.json", "feature.enabled", false);
	store.set("application.json", "feature.new", "added");
	assert_eq!(store.notify("application.json"), 1);

	assert_eq!(changed.load(Ordering::SeqCst), 1);
	let result = parse(&sub);
	assert_eq!(result["feature.enabled"], false);
	assert_eq!(result["feature.new"], "added");
}

#[test]
fn test_listeners_run_once_each_in_order() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "key", "value1");
	let sub = subscribe(&store, &conf("application.json")).unwrap();

	let calls = Arc::new(Mutex::new(Vec::new()));
	for i in 0..3 {
		let calls = Arc::clone(&calls);
		sub.add_listener(move || calls.lock().unwrap().push(i));
	}
	assert_eq!(sub.listener_count(), 3);

	store.set("application.json", "key", "value2");
	store.notify("application.json");

	assert_eq!(*calls.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_remove_listener() {
	let store = Arc::new(MemoryStore::new());
	let sub = subscribe(&store, &conf("application")).unwrap();

	let hits = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&hits);
	let id = sub.add_listener(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	store.notify("application");
	assert!(sub.remove_listener(id));
	assert!(!sub.remove_listener(id));
	store.notify("application");

	assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_listener_may_register_listeners() {
	let store = Arc::new(MemoryStore::new());
	let sub = Arc::new(subscribe(&store, &conf("application")).unwrap());

	let weak = Arc::downgrade(&sub);
	sub.add_listener(move || {
		if let Some(sub) = weak.upgrade() {
			sub.add_listener(|| {});
		}
	});

	store.notify("application");
	assert_eq!(sub.listener_count(), 2);
}

#[test]
fn test_value_reflects_last_of_sequential_changes() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "counter", 0);
	let sub = subscribe(&store, &conf("application.json")).unwrap();

	for n in 1..=10 {
		store.set("application.json", "counter", n);
		store.notify("application.json");
	}

	assert_eq!(parse(&sub)["counter"], 10);
	assert_eq!(sub.meta().unwrap().version, 11);
}

#[test]
fn test_failed_reload_keeps_last_value() {
	let store = Arc::new(MemoryStore::new());
	store.set("application", "timeout", "30s");

	let c = SubscriberConf {
		key: Some("timeout".into()),
		..conf("application")
	};
	let sub = subscribe(&store, &c).unwrap();

	let hits = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&hits);
	sub.add_listener(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	// Watched key disappears: the notification is absorbed.
	store.remove("application", "timeout");
	store.notify("application");
	assert_eq!(sub.value().unwrap().as_str(), "30s");
	assert_eq!(hits.load(Ordering::SeqCst), 0);

	// An explicit reload reports the same failure.
	assert!(sub.reload().unwrap_err().is_key_not_found());

	// Upstream unavailable: also absorbed.
	store.set_available(false);
	store.notify("application");
	assert_eq!(sub.value().unwrap().as_str(), "30s");
	store.set_available(true);

	// Key comes back.
	store.set("application", "timeout", "45s");
	store.notify("application");
	assert_eq!(sub.value().unwrap().as_str(), "45s");
	assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_properties_format() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.properties", "server.port", "8080");
	store.set("application.properties", "server.host", "localhost");
	store.set("application.properties", "database.url", "mysql://localhost:3306");

	let c = SubscriberConf {
		format: Some("properties".into()),
		..conf("application.properties")
	};
	let sub = subscribe(&store, &c).unwrap();
	let value = sub.value().unwrap();

	assert!(value.contains("server.port=8080"));
	assert!(value.contains("server.host=localhost"));
	assert!(value.contains("database.url=mysql://localhost:3306"));
}

#[test]
fn test_format_inferred_from_namespace() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.properties", "a", 1);

	let sub = subscribe(&store, &conf("application.properties")).unwrap();
	assert_eq!(sub.format(), livecc::AnyFormat::Properties);
	assert_eq!(sub.value().unwrap().as_str(), "a=1\n");
}

#[test]
fn test_other_namespaces_do_not_trigger_reload() {
	let store = Arc::new(MemoryStore::new());
	let sub = subscribe(&store, &conf("application")).unwrap();

	let hits = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&hits);
	sub.add_listener(move || {
		counter.fetch_add(1, Ordering::SeqCst);
	});

	assert_eq!(store.notify("other"), 0);
	assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn test_concurrent_access() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "counter", 0);
	store.set("application.json", "padding", "x".repeat(4096));
	let sub = Arc::new(subscribe(&store, &conf("application.json")).unwrap());

	let mut handles = Vec::new();
	for _ in 0..10 {
		let sub = Arc::clone(&sub);
		handles.push(thread::spawn(move || {
			for _ in 0..100 {
				// Every read is one complete document.
				let value = sub.value().unwrap();
				let parsed: HashMap<String, Value> = serde_json::from_str(&value).unwrap();
				assert!(parsed["counter"].is_u64());
				assert_eq!(parsed["padding"].as_str().map(str::len), Some(4096));
			}
		}));
	}
	for n in 0..10 {
		let store = Arc::clone(&store);
		handles.push(thread::spawn(move || {
			store.set("application.json", "counter", n);
			store.notify("application.json");
		}));
	}
	for handle in handles {
		handle.join().unwrap();
	}

	assert_eq!(sub.meta().unwrap().version, 11);
}

#[test]
fn test_drop_releases_registration() {
	let store = Arc::new(MemoryStore::new());
	let sub = subscribe(&store, &conf("application")).unwrap();
	assert_eq!(store.watcher_count(), 1);

	drop(sub);
	assert_eq!(store.watcher_count(), 0);
	assert_eq!(store.notify("application"), 0);
}

#[test]
fn test_connect_forwards_client_options() {
	let store = Arc::new(MemoryStore::new());
	store.set("application.json", "name", "svc");
	let seen: Arc<Mutex<Option<ClientOptions>>> = Arc::new(Mutex::new(None));

	let captured = Arc::clone(&seen);
	let backing = Arc::clone(&store);
	let connector = move |opts: &ClientOptions| -> Result<Arc<dyn ConfigStore>, StoreError> {
		*captured.lock().unwrap() = Some(opts.clone());
		Ok(backing.clone())
	};

	let c = SubscriberConf {
		cluster: "prod".into(),
		ip: Some("192.168.1.100".into()),
		secret: Some("test-secret".into()),
		..conf("application.json")
	};
	let sub = Subscriber::connect(&c, &connector).unwrap();
	assert_eq!(sub.value().unwrap().as_str(), r#"{"name":"svc"}"#);

	let opts = seen.lock().unwrap().clone().unwrap();
	assert_eq!(opts.app_id, "test-app");
	assert_eq!(opts.cluster, "prod");
	assert_eq!(opts.namespace, "application.json");
	assert_eq!(opts.server_addr, "192.168.1.100");
	assert_eq!(opts.secret.as_deref(), Some("test-secret"));
}

#[test]
fn test_connect_rejects_invalid_config_before_connecting() {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let connector = move |_: &ClientOptions| -> Result<Arc<dyn ConfigStore>, StoreError> {
		counter.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(MemoryStore::new()))
	};

	let c = SubscriberConf {
		meta_addr: String::new(),
		..conf("application")
	};
	assert!(matches!(
		Subscriber::connect(&c, &connector),
		Err(SubscribeError::ConfigInvalid(_))
	));
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_conf_from_toml() {
	let c: SubscriberConf = toml::from_str(
		r#"
		app_id = "go-zero-demo"
		namespace = "application.yaml"
		meta_addr = "http://localhost:8080"
		backup = true
		backup_path = "/tmp/apollo-backup"

		[delivery]
		mode = "inline"
		"#,
	)
	.unwrap();

	assert!(c.check().is_ok());
	assert_eq!(c.cluster(), "default");
	assert_eq!(c.delivery, Delivery::Inline);
	assert!(c.client_options().backup);
	#[cfg(feature = "yaml")]
	assert_eq!(c.resolve_format().unwrap(), livecc::AnyFormat::Yaml);

	let queued: SubscriberConf = toml::from_str(
		r#"
		app_id = "a"
		meta_addr = "b"
		delivery = { mode = "queued" }
		"#,
	)
	.unwrap();
	assert_eq!(
		queued.delivery,
		Delivery::Queued {
			capacity: livecc::subscriber::DEFAULT_QUEUE_CAPACITY
		}
	);
}
