use std::time::Duration;

use tokio::{sync::watch, task::JoinHandle, time};

pub const FACT_INTERVAL: Duration = Duration::from_secs(15);

pub const SPACE_FACTS: &[&str] = &[
    "The Hubble Space Telescope orbits Earth at ~8 km/s.",
    "A day on Venus is longer than its year.",
    "One million Earths could fit inside the Sun.",
    "There are more stars in the universe than grains of sand on Earth.",
    "Neutron stars can spin up to 600 times per second.",
    "Jupiter's Great Red Spot has raged for 350+ years.",
    "The Milky Way is ~105,700 light-years wide.",
    "A planet twice Earth's size is made of diamonds.",
];

pub fn random_fact() -> &'static str {
    SPACE_FACTS[fastrand::usize(..SPACE_FACTS.len())]
}

/// Publishes a new random fact every `period` until dropped.
pub struct FactRotator {
    rx: watch::Receiver<&'static str>,
    handle: JoinHandle<()>,
}

impl FactRotator {
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = watch::channel(random_fact());

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);

            loop {
                interval.tick().await;

                let fact = random_fact();
                tracing::debug!("fact = {fact}");

                if tx.send(fact).is_err() {
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    pub fn current(&self) -> &'static str {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<&'static str> {
        self.rx.clone()
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for FactRotator {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
