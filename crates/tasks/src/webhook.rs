//! Interactive webhook toggler, modelled as a pure state machine.
//!
//! The console loop owns I/O; this module only decides what to prompt next
//! and what a line of input means, which keeps the whole flow unit testable.

use config::WebhookTarget;

/// Where the conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Waiting for the user to pick a webhook by menu number.
    SelectingCheck,
    /// A webhook is picked; waiting for the desired state.
    SelectingState { hook: usize },
}

/// A fully specified toggle, ready to post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Display name of the chosen check.
    pub name: String,
    /// Webhook URL to post to.
    pub url: String,
    /// Desired state.
    pub state_is_up: bool,
}

/// Drives the pick-a-webhook, pick-a-state dialogue.
#[derive(Debug)]
pub struct Toggler {
    hooks: Vec<WebhookTarget>,
    state: State,
}

impl Toggler {
    pub const fn new(hooks: Vec<WebhookTarget>) -> Self {
        Self { hooks, state: State::SelectingCheck }
    }

    /// The text to print before reading the next input line.
    pub fn prompt(&self) -> String {
        match self.state {
            State::SelectingCheck => {
                let mut menu = String::new();
                for (i, hook) in self.hooks.iter().enumerate() {
                    menu.push_str(&format!("{}: {}\n", i + 1, hook.name));
                }
                menu.push_str("\nSelect Webhook check --> ");
                menu
            }
            State::SelectingState { .. } => "\nSet check to [U]p, [D]own --> ".to_owned(),
        }
    }

    /// Consume one input line. Returns a submission once both the webhook
    /// and the target state are chosen; any invalid input restarts at the
    /// webhook menu.
    pub fn feed(&mut self, line: &str) -> Option<Submission> {
        let line = line.trim();
        match self.state {
            State::SelectingCheck => {
                match line.parse::<usize>() {
                    Ok(n) if n >= 1 && n <= self.hooks.len() => {
                        self.state = State::SelectingState { hook: n - 1 };
                    }
                    _ => self.state = State::SelectingCheck,
                }
                None
            }
            State::SelectingState { hook } => {
                self.state = State::SelectingCheck;
                let state_is_up = match line.chars().next() {
                    Some('u' | 'U') => true,
                    Some('d' | 'D') => false,
                    _ => return None,
                };
                let target = &self.hooks[hook];
                Some(Submission {
                    name: target.name.clone(),
                    url: target.url.clone(),
                    state_is_up,
                })
            }
        }
    }
}
