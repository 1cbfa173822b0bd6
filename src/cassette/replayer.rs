//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Replays interactions from a loaded cassette.
///
/// Concurrent calls settle in arbitrary order, so each lookup takes the first
/// unconsumed interaction whose recorded input matches, not simply the next one.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    consumed: HashMap<PortMethodKey, Vec<bool>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let consumed = queues.iter().map(|(k, q)| (k.clone(), vec![false; q.len()])).collect();
        Self { queues, consumed }
    }

    /// Take the first unconsumed interaction for `port`/`method` whose
    /// recorded input satisfies `matches`.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing was recorded for the port/method pair or
    /// every matching interaction has already been served.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
        matches: impl Fn(&serde_json::Value) -> bool,
    ) -> Result<&Interaction, String> {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let Some(queue) = self.queues.get(&key) else {
            let available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        let consumed = self.consumed.entry(key).or_insert_with(|| vec![false; queue.len()]);
        let position = queue
            .iter()
            .zip(consumed.iter())
            .position(|(interaction, used)| !used && matches(&interaction.input))
            .ok_or_else(|| {
                format!(
                    "Cassette exhausted: no unconsumed interaction for port={port:?} \
                     method={method:?} matches the request ({count} recorded).",
                    count = queue.len(),
                )
            })?;

        consumed[position] = true;
        Ok(&queue[position])
    }
}
