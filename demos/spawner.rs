//! # Example: spawner
//!
//! A button asks for a pill to be spawned before the spawner is listening.
//! The spawner is attached later in the same tick and still spawns it, thanks to replay.
//!
//! Demonstrates how to:
//! - Publish with a sender and a [`Payload`] built by [`payload!`].
//! - Subscribe a direct [`Subscriber`] from inside another subscriber's dispatch.
//! - Trace every event with the built-in [`LogWriter`].
//! - Drive ticks from the host loop with [`ManualTicks`].
//!
//! ## Flow
//! ```text
//! tick 0
//!   Button   ──► publish("Spawn", button, {objectToSpawn: pill})   (nobody listening yet)
//!   Attacher ──► publish("Attach", attacher)
//!                  └─► PillSpawner::dispatch("Attach")
//!                        └─► subscribe("Spawn", spawner) ──► replay ──► spawn pill
//! tick 1
//!   Button   ──► publish("Spawn", button, {objectToSpawn: capsule}) ──► spawn capsule
//!   Attacher ──► publish("Attach", attacher) ──► already attached, nothing new
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example spawner --features logging
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use tickbus::{
    payload, HandlerResult, LogWriter, ManualTicks, Mediator, Payload, Sender, Subscriber, Value,
};

struct Button;
struct Attacher;

struct Prefab(&'static str);

/// Listens to "Attach" and, once attached, to "Spawn".
struct PillSpawner {
    mediator: Arc<Mediator>,
    me: Weak<PillSpawner>,
    attached: AtomicBool,
}

impl Subscriber for PillSpawner {
    fn dispatch(&self, event: &str, _: Option<&Sender>, args: Option<&Payload>) -> HandlerResult {
        match event {
            "Attach" => {
                if !self.attached.swap(true, Ordering::SeqCst) {
                    println!("[spawner] attached, listening to Spawn");
                    let me = self.me.upgrade().ok_or("spawner dropped")?;
                    self.mediator.subscribe("Spawn", &me)?;
                }
            }
            "Spawn" => {
                let prefab = args
                    .and_then(|a| a.get("objectToSpawn"))
                    .and_then(|v| v.object::<Prefab>())
                    .ok_or("Spawn without objectToSpawn")?;
                println!("[spawner] spawned {}", prefab.0);
            }
            _ => {}
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "pill_spawner"
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ticks = Arc::new(ManualTicks::new());
    let mediator = Arc::new(Mediator::builder().with_tick_source(ticks.clone()).build());

    let log = Arc::new(LogWriter::new());
    mediator.subscribe("Spawn", &log)?;
    mediator.subscribe("Attach", &log)?;

    let spawner = Arc::new_cyclic(|me| PillSpawner {
        mediator: Arc::clone(&mediator),
        me: me.clone(),
        attached: AtomicBool::new(false),
    });
    mediator.subscribe("Attach", &spawner)?;

    let button: Sender = Arc::new(Button);
    let attacher: Sender = Arc::new(Attacher);

    for prefab in ["pill", "capsule"] {
        println!("--- tick {} ---", ticks.current());
        let prefab: Sender = Arc::new(Prefab(prefab));
        mediator.publish(
            "Spawn",
            Some(button.clone()),
            Some(payload! { "objectToSpawn" => Value::Object(prefab) }),
        )?;
        mediator.publish("Attach", Some(attacher.clone()), None)?;
        ticks.advance();
    }

    println!(
        "spawn subscribers: {}",
        mediator.subscriber_count("Spawn")?
    );
    Ok(())
}
