use fibre_locator::{Locator, RoundRobin};
use std::sync::Arc;

// --- Abstraction and Implementation ---
trait MessageSender: Send + Sync {
  fn send(&self, message: &str) -> String;
}

struct Relay {
  index: usize,
}

impl MessageSender for Relay {
  fn send(&self, message: &str) -> String {
    format!("relay #{} sending '{}'", self.index, message)
  }
}

// Each consumer takes a sender for its own scope.
fn consume(locator: &Locator, message: &str) {
  let sender = locator
    .instance::<dyn MessageSender>()
    .expect("No sender injected");
  println!("{}", sender.send(message));
}

fn main() {
  let locator = Locator::new();

  let relays: Vec<Arc<dyn MessageSender>> = (0..3)
    .map(|index| Arc::new(Relay { index }) as Arc<dyn MessageSender>)
    .collect();
  println!("Note: {} sender instances in round robin", relays.len());
  locator
    .inject(RoundRobin::new(relays).into_injector())
    .expect("Injector already installed");

  for i in 0..6 {
    consume(&locator, &format!("message {}", i));
  }
}
