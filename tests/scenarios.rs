use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tickbus::{
    payload, same_object, Handler, HandlerResult, ManualTicks, Mediator, MediatorConfig, Payload,
    Sender, Subscriber, Value,
};

struct GameObject(&'static str);

type Seen = Arc<Mutex<Vec<(Option<Sender>, Option<Payload>)>>>;

fn recording() -> (Handler, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    let handler = Handler::full(move |sender, payload| {
        s.lock().push((sender.cloned(), payload.cloned()));
        Ok(())
    });
    (handler, seen)
}

fn object(name: &'static str) -> Sender {
    Arc::new(GameObject(name))
}

#[test]
fn spawn_published_before_subscribe_is_replayed() {
    let m = Mediator::with_config(MediatorConfig::headless());
    let go_a = object("goA");
    let prefab = object("pill");

    m.publish(
        "Spawn",
        Some(go_a.clone()),
        Some(payload! { "objectToSpawn" => Value::Object(prefab.clone()) }),
    )
    .unwrap();

    let (cb, seen) = recording();
    m.subscribe("Spawn", &cb).unwrap();

    let seen = seen.lock();
    assert_eq!(seen.len(), 1);
    assert!(same_object(seen[0].0.as_ref().unwrap(), &go_a));
    let spawned = &seen[0].1.as_ref().unwrap()["objectToSpawn"];
    assert_eq!(spawned, &Value::Object(prefab));
    assert_eq!(spawned.object::<GameObject>().map(|g| g.0), Some("pill"));
}

#[test]
fn attach_delivered_per_publish() {
    let m = Mediator::with_config(MediatorConfig::headless());
    let (cb, seen) = recording();
    m.subscribe("Attach", &cb).unwrap();

    let (go_a, go_b) = (object("goA"), object("goB"));
    m.publish("Attach", Some(go_a.clone()), None).unwrap();
    m.publish("Attach", Some(go_b.clone()), None).unwrap();

    let seen = seen.lock();
    assert_eq!(seen.len(), 2);
    assert!(same_object(seen[0].0.as_ref().unwrap(), &go_a));
    assert!(same_object(seen[1].0.as_ref().unwrap(), &go_b));
    assert!(seen.iter().all(|(_, p)| p.is_none()));
}

#[test]
fn ten_publishes_replayed_in_order() {
    let m = Mediator::with_config(MediatorConfig::headless());
    let s = object("s");
    for i in 0..10 {
        m.publish("X", Some(s.clone()), Some(payload! { "seq" => i }))
            .unwrap();
    }

    let (cb, seen) = recording();
    m.subscribe("X", cb).unwrap();

    let order: Vec<i64> = seen
        .lock()
        .iter()
        .filter_map(|(_, p)| p.as_ref().and_then(|p| p["seq"].as_int()))
        .collect();
    assert_eq!(order, (0..10).collect::<Vec<_>>());
}

#[test]
fn cleared_history_is_not_replayed() {
    let m = Mediator::with_config(MediatorConfig::headless());
    m.publish("Y", Some(object("s")), Some(payload! { "k" => 1 }))
        .unwrap();
    m.clear_frame_events();

    let (cb, seen) = recording();
    m.subscribe("Y", cb).unwrap();
    assert!(seen.lock().is_empty());
}

#[test]
fn tick_boundary_hides_earlier_publish() {
    let ticks = Arc::new(ManualTicks::new());
    let m = Mediator::builder().with_tick_source(ticks.clone()).build();

    m.publish_bare("Y").unwrap();
    ticks.advance();

    let (cb, seen) = recording();
    m.subscribe("Y", cb).unwrap();
    assert!(seen.lock().is_empty());
}

/// A spawner that only starts listening to "Spawn" once it has been attached,
/// possibly later in the tick than the button click.
struct PillSpawner {
    mediator: Arc<Mediator>,
    me: Weak<PillSpawner>,
    attached: AtomicUsize,
    spawned: Mutex<Vec<&'static str>>,
}

impl Subscriber for PillSpawner {
    fn dispatch(&self, event: &str, _: Option<&Sender>, args: Option<&Payload>) -> HandlerResult {
        match event {
            "Attach" => {
                if self.attached.fetch_add(1, Ordering::SeqCst) == 0 {
                    let me = self.me.upgrade().ok_or("spawner dropped")?;
                    self.mediator.subscribe("Spawn", &me)?;
                }
                Ok(())
            }
            "Spawn" => {
                let name = args
                    .and_then(|a| a.get("objectToSpawn"))
                    .and_then(|v| v.object::<GameObject>())
                    .map(|g| g.0)
                    .ok_or("missing objectToSpawn")?;
                self.spawned.lock().push(name);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn name(&self) -> &'static str {
        "pill_spawner"
    }
}

#[test]
fn late_attach_still_spawns_within_tick() {
    let m = Arc::new(Mediator::with_config(MediatorConfig::headless()));
    let spawner = Arc::new_cyclic(|me| PillSpawner {
        mediator: Arc::clone(&m),
        me: me.clone(),
        attached: AtomicUsize::new(0),
        spawned: Mutex::new(Vec::new()),
    });
    m.subscribe("Attach", &spawner).unwrap();

    // Button clicked first, attacher clicked second, same tick.
    m.publish(
        "Spawn",
        Some(object("button")),
        Some(payload! { "objectToSpawn" => Value::Object(object("pill")) }),
    )
    .unwrap();
    m.publish("Attach", Some(object("attacher")), None).unwrap();
    assert_eq!(*spawner.spawned.lock(), vec!["pill"]);

    // Attaching again does not subscribe twice.
    m.publish("Attach", Some(object("attacher")), None).unwrap();
    m.clear_frame_events();
    m.publish(
        "Spawn",
        Some(object("button")),
        Some(payload! { "objectToSpawn" => Value::Object(object("capsule")) }),
    )
    .unwrap();
    assert_eq!(*spawner.spawned.lock(), vec!["pill", "capsule"]);
}

/// Random publish/subscribe/unsubscribe/clear sequences checked against a counting model.
#[test]
fn random_sequences_match_model() {
    const NAMES: [&str; 3] = ["A", "B", "C"];

    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let m = Mediator::with_config(MediatorConfig::headless());

        // (name, handler, observed hits)
        let mut live: Vec<(&str, Handler, Arc<AtomicUsize>)> = Vec::new();
        let mut retired: Vec<(Arc<AtomicUsize>, usize)> = Vec::new();
        let mut expected: Vec<usize> = Vec::new();
        let mut history: HashMap<&str, usize> = HashMap::new();

        for _ in 0..200 {
            let name = NAMES[rng.random_range(0..NAMES.len())];
            match rng.random_range(0..10) {
                0..=3 => {
                    m.publish_bare(name).unwrap();
                    *history.entry(name).or_default() += 1;
                    for (i, (n, _, _)) in live.iter().enumerate() {
                        if *n == name {
                            expected[i] += 1;
                        }
                    }
                }
                4..=6 => {
                    let hits = Arc::new(AtomicUsize::new(0));
                    let h = Arc::clone(&hits);
                    let handler = Handler::bare(move || {
                        h.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    });
                    m.subscribe(name, &handler).unwrap();
                    live.push((name, handler, hits));
                    expected.push(history.get(name).copied().unwrap_or(0));
                }
                7..=8 if !live.is_empty() => {
                    let i = rng.random_range(0..live.len());
                    let (n, handler, hits) = live.remove(i);
                    let want = expected.remove(i);
                    m.unsubscribe(n, &handler).unwrap();
                    retired.push((hits, want));
                }
                _ => {
                    m.clear_frame_events();
                    history.clear();
                }
            }
        }

        for ((_, _, hits), want) in live.iter().zip(&expected) {
            assert_eq!(hits.load(Ordering::SeqCst), *want, "seed {seed}");
        }
        for (hits, want) in &retired {
            assert_eq!(hits.load(Ordering::SeqCst), *want, "seed {seed}");
        }
    }
}
