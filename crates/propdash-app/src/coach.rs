// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub const NO_ADVICE_TEXT: &str = "No advice returned.";
pub const ADVICE_FAILED_TEXT: &str = "Couldn't get advice. Check backend.";

pub const LABEL_SELECT_FIRST: &str = "Select a property in the table";
pub const LABEL_ASK: &str = "Ask about selected property";
pub const LABEL_THINKING: &str = "Thinking…";

/// What came back from the advice endpoint, already collapsed to the three
/// cases the widget distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdviceOutcome {
    Advice(String),
    Empty,
    Failed,
}

impl AdviceOutcome {
    pub fn display_text(&self) -> &str {
        match self {
            Self::Advice(text) => text,
            Self::Empty => NO_ADVICE_TEXT,
            Self::Failed => ADVICE_FAILED_TEXT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachPhase {
    Idle,
    Waiting { token: u64 },
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachState {
    phase: CoachPhase,
    advice: String,
    last_token: u64,
}

impl Default for CoachState {
    fn default() -> Self {
        Self {
            phase: CoachPhase::Idle,
            advice: String::new(),
            last_token: 0,
        }
    }
}

impl CoachState {
    pub const fn phase(&self) -> CoachPhase {
        self.phase
    }

    pub const fn is_waiting(&self) -> bool {
        matches!(self.phase, CoachPhase::Waiting { .. })
    }

    pub const fn can_ask(&self, has_selection: bool) -> bool {
        has_selection && !self.is_waiting()
    }

    pub fn advice(&self) -> Option<&str> {
        if self.advice.is_empty() {
            None
        } else {
            Some(&self.advice)
        }
    }

    pub const fn action_label(&self, has_selection: bool) -> &'static str {
        if self.is_waiting() {
            LABEL_THINKING
        } else if has_selection {
            LABEL_ASK
        } else {
            LABEL_SELECT_FIRST
        }
    }

    /// Enters `Waiting` and returns the token the response must echo back.
    /// Previous advice is cleared before this returns.
    pub fn begin(&mut self, has_selection: bool) -> Option<u64> {
        if !self.can_ask(has_selection) {
            return None;
        }
        self.last_token = self.last_token.wrapping_add(1);
        self.advice.clear();
        self.phase = CoachPhase::Waiting {
            token: self.last_token,
        };
        Some(self.last_token)
    }

    /// Applies a response. Returns `false` when the token is stale and the
    /// outcome was dropped.
    pub fn finish(&mut self, token: u64, outcome: &AdviceOutcome) -> bool {
        match self.phase {
            CoachPhase::Waiting { token: current } if current == token => {
                self.advice = outcome.display_text().to_owned();
                self.phase = CoachPhase::Done;
                true
            }
            _ => false,
        }
    }

    /// Drops any in-flight request; its response will be ignored.
    pub fn abandon(&mut self) -> bool {
        if self.is_waiting() {
            self.phase = CoachPhase::Idle;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ADVICE_FAILED_TEXT, AdviceOutcome, CoachPhase, CoachState, LABEL_ASK, LABEL_SELECT_FIRST,
        LABEL_THINKING, NO_ADVICE_TEXT,
    };

    #[test]
    fn no_selection_blocks_request() {
        let mut coach = CoachState::default();
        assert!(!coach.can_ask(false));
        assert_eq!(coach.begin(false), None);
        assert_eq!(coach.phase(), CoachPhase::Idle);
        assert_eq!(coach.action_label(false), LABEL_SELECT_FIRST);
    }

    #[test]
    fn begin_clears_previous_advice_before_response() {
        let mut coach = CoachState::default();
        let first = coach.begin(true).expect("first request starts");
        assert!(coach.finish(first, &AdviceOutcome::Advice("Hold.".to_owned())));
        assert_eq!(coach.advice(), Some("Hold."));

        let second = coach.begin(true).expect("done can restart");
        assert_ne!(first, second);
        assert_eq!(coach.advice(), None);
        assert_eq!(coach.phase(), CoachPhase::Waiting { token: second });
        assert_eq!(coach.action_label(true), LABEL_THINKING);
    }

    #[test]
    fn second_request_is_refused_while_waiting() {
        let mut coach = CoachState::default();
        let token = coach.begin(true).expect("request starts");
        assert!(!coach.can_ask(true));
        assert_eq!(coach.begin(true), None);
        assert_eq!(coach.phase(), CoachPhase::Waiting { token });
    }

    #[test]
    fn outcomes_map_to_fixed_texts() {
        let mut coach = CoachState::default();

        let token = coach.begin(true).expect("request starts");
        coach.finish(
            token,
            &AdviceOutcome::Advice("Solid yield, moderate DOM.".to_owned()),
        );
        assert_eq!(coach.advice(), Some("Solid yield, moderate DOM."));

        let token = coach.begin(true).expect("request starts");
        coach.finish(token, &AdviceOutcome::Empty);
        assert_eq!(coach.advice(), Some(NO_ADVICE_TEXT));

        let token = coach.begin(true).expect("request starts");
        coach.finish(token, &AdviceOutcome::Failed);
        assert_eq!(coach.advice(), Some(ADVICE_FAILED_TEXT));
        assert_eq!(coach.phase(), CoachPhase::Done);
        assert_eq!(coach.action_label(true), LABEL_ASK);
    }

    #[test]
    fn stale_token_is_ignored() {
        let mut coach = CoachState::default();
        let stale = coach.begin(true).expect("request starts");
        assert!(coach.abandon());
        let fresh = coach.begin(true).expect("request restarts");

        assert!(!coach.finish(stale, &AdviceOutcome::Advice("old".to_owned())));
        assert_eq!(coach.phase(), CoachPhase::Waiting { token: fresh });
        assert_eq!(coach.advice(), None);

        assert!(coach.finish(fresh, &AdviceOutcome::Advice("new".to_owned())));
        assert_eq!(coach.advice(), Some("new"));
    }

    #[test]
    fn abandon_only_affects_waiting() {
        let mut coach = CoachState::default();
        assert!(!coach.abandon());
        let token = coach.begin(true).expect("request starts");
        coach.finish(token, &AdviceOutcome::Empty);
        assert!(!coach.abandon());
        assert_eq!(coach.phase(), CoachPhase::Done);
    }
}
