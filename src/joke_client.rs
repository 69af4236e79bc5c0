use anyhow::{anyhow, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

use crate::models::Joke;

const API_URL: &str = "https://icanhazdadjoke.com/";

// The API hands out one random joke per call with no way to exclude repeats,
// so collecting N uniques can take more than N fetches. This caps how many
// fetches one cycle may spend per wanted joke before giving up.
const MAX_ATTEMPTS_PER_JOKE: usize = 10;

/// The JSON body returned by the joke API on every GET.
#[derive(Debug, Clone, Deserialize)]
pub struct JokeResponse {
    pub id: String,
    pub joke: String,
}

/// A source of one joke per call. The HTTP client is the real one; tests
/// substitute a scripted source.
pub trait JokeSource {
    fn fetch_joke(&mut self) -> Result<JokeResponse>;
}

#[derive(Clone)]
pub struct JokeClient {
    client: Client,
}

impl JokeClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("dad_jokes/0.1")
            .build()?;

        Ok(Self { client })
    }
}

impl JokeSource for JokeClient {
    fn fetch_joke(&mut self) -> Result<JokeResponse> {
        let response = self
            .client
            .get(API_URL)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("joke API returned {}", status));
        }

        // A body missing `id` or `joke` fails here rather than reaching the UI
        let joke = response.json::<JokeResponse>()?;
        Ok(joke)
    }
}

/// Fetches jokes one at a time until `target` distinct ids have been
/// collected, discarding repeats. Every fetched joke starts at zero votes.
///
/// Fails on the first fetch error, or once the attempt budget is spent
/// without reaching `target` uniques; either way nothing partial is returned.
pub fn collect_jokes(source: &mut dyn JokeSource, target: usize) -> Result<Vec<Joke>> {
    // Saturate: the budget is a safety cap, not an exact count
    let max_attempts = target.saturating_mul(MAX_ATTEMPTS_PER_JOKE);
    // Capped preallocation: an absurd target must not overflow the allocator
    let mut jokes: Vec<Joke> = Vec::with_capacity(target.min(64));
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut attempts = 0;

    while jokes.len() < target {
        if attempts >= max_attempts {
            return Err(anyhow!(
                "gave up after {} fetches with only {} of {} unique jokes",
                attempts,
                jokes.len(),
                target
            ));
        }
        attempts += 1;

        let fetched = source.fetch_joke()?;
        if seen_ids.insert(fetched.id.clone()) {
            jokes.push(Joke {
                id: fetched.id,
                text: fetched.joke,
                votes: 0,
            });
        } else {
            println!("duplicate joke {} discarded", fetched.id);
        }
    }

    Ok(jokes)
}
