use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Draft,
    Published,
    Paused,
    Closed,
    Canceled,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Paused => "paused",
            EventStatus::Closed => "closed",
            EventStatus::Canceled => "canceled",
        }
    }

    pub fn parse(value: &str) -> Option<EventStatus> {
        match value {
            "draft" => Some(EventStatus::Draft),
            "published" => Some(EventStatus::Published),
            "paused" => Some(EventStatus::Paused),
            "closed" => Some(EventStatus::Closed),
            "canceled" => Some(EventStatus::Canceled),
            _ => None,
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Publish,
    Republish,
    Lock,
    Unlock,
    Cancel,
    Pause,
    Resume,
    Stop,
    Reopen,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleAction::Publish => "publish",
            LifecycleAction::Republish => "republish",
            LifecycleAction::Lock => "lock",
            LifecycleAction::Unlock => "unlock",
            LifecycleAction::Cancel => "cancel",
            LifecycleAction::Pause => "pause",
            LifecycleAction::Resume => "resume",
            LifecycleAction::Stop => "stop",
            LifecycleAction::Reopen => "reopen",
        };
        f.write_str(name)
    }
}

/// Result of a legal action: the status to store, an optional new value for
/// `approval_for_publish`, and the message used for both the audit log entry
/// and the HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub status: EventStatus,
    pub approval: Option<bool>,
    pub message: &'static str,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("action '{action}' is not allowed while the event is {from}")]
    InvalidTransition {
        from: EventStatus,
        action: LifecycleAction,
    },
    #[error("event cannot be published without approval")]
    ApprovalRequired,
}

impl LifecycleAction {
    /// Evaluate the action against the current status. Illegal pairs are
    /// rejected without side effects; callers persist nothing on `Err`.
    pub fn apply(self, from: EventStatus, approved: bool) -> Result<Transition, LifecycleError> {
        use EventStatus::*;

        let to = |status: EventStatus, message: &'static str| {
            Ok(Transition {
                status,
                approval: None,
                message,
            })
        };

        match self {
            LifecycleAction::Publish => match from {
                Draft if !approved => Err(LifecycleError::ApprovalRequired),
                Draft => to(Published, "Event published"),
                _ => Err(self.rejected(from)),
            },
            LifecycleAction::Republish => match from {
                Published => to(Published, "Event republished"),
                _ => Err(self.rejected(from)),
            },
            // lock/unlock only touch the approval flag and are legal anywhere
            LifecycleAction::Lock => Ok(Transition {
                status: from,
                approval: Some(true),
                message: "Event locked",
            }),
            LifecycleAction::Unlock => Ok(Transition {
                status: from,
                approval: Some(false),
                message: "Event unlocked",
            }),
            LifecycleAction::Cancel => match from {
                Draft | Published | Paused => to(Canceled, "Event canceled"),
                _ => Err(self.rejected(from)),
            },
            LifecycleAction::Pause => match from {
                Published => to(Paused, "Event paused"),
                _ => Err(self.rejected(from)),
            },
            LifecycleAction::Resume => match from {
                Paused => to(Published, "Event resumed"),
                _ => Err(self.rejected(from)),
            },
            LifecycleAction::Stop => match from {
                Published | Paused => to(Closed, "Event stopped"),
                _ => Err(self.rejected(from)),
            },
            LifecycleAction::Reopen => match from {
                Closed | Canceled => to(Published, "Event reopened"),
                _ => Err(self.rejected(from)),
            },
        }
    }

    fn rejected(self, from: EventStatus) -> LifecycleError {
        LifecycleError::InvalidTransition { from, action: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use EventStatus::*;
    use LifecycleAction::*;

    #[test]
    fn publish_requires_draft_and_approval() {
        let t = Publish.apply(Draft, true).unwrap();
        assert_eq!(t.status, Published);
        assert_eq!(t.message, "Event published");

        assert_eq!(
            Publish.apply(Draft, false),
            Err(LifecycleError::ApprovalRequired)
        );
        assert_eq!(
            Publish.apply(Published, true),
            Err(LifecycleError::InvalidTransition {
                from: Published,
                action: Publish
            })
        );
    }

    #[test]
    fn republish_only_from_published() {
        assert_eq!(Republish.apply(Published, false).unwrap().status, Published);
        assert!(Republish.apply(Draft, true).is_err());
        assert!(Republish.apply(Closed, true).is_err());
    }

    #[test]
    fn lock_and_unlock_keep_status_from_any_state() {
        for from in [Draft, Published, Paused, Closed, Canceled] {
            let locked = Lock.apply(from, false).unwrap();
            assert_eq!(locked.status, from);
            assert_eq!(locked.approval, Some(true));
            assert_eq!(locked.message, "Event locked");

            let unlocked = Unlock.apply(from, true).unwrap();
            assert_eq!(unlocked.status, from);
            assert_eq!(unlocked.approval, Some(false));
            assert_eq!(unlocked.message, "Event unlocked");
        }
    }

    #[test]
    fn pause_resume_cycle() {
        assert_eq!(Pause.apply(Published, true).unwrap().status, Paused);
        assert_eq!(Resume.apply(Paused, true).unwrap().status, Published);

        assert!(Pause.apply(Draft, true).is_err());
        assert!(Pause.apply(Paused, true).is_err());
        assert!(Resume.apply(Published, true).is_err());
    }

    #[test]
    fn stop_from_published_or_paused() {
        assert_eq!(Stop.apply(Published, true).unwrap().status, Closed);
        assert_eq!(Stop.apply(Paused, true).unwrap().status, Closed);
        assert!(Stop.apply(Draft, true).is_err());
        assert!(Stop.apply(Closed, true).is_err());
    }

    #[test]
    fn cancel_and_reopen() {
        for from in [Draft, Published, Paused] {
            assert_eq!(Cancel.apply(from, false).unwrap().status, Canceled);
        }
        assert!(Cancel.apply(Canceled, false).is_err());
        assert!(Cancel.apply(Closed, false).is_err());

        assert_eq!(Reopen.apply(Closed, false).unwrap().status, Published);
        assert_eq!(Reopen.apply(Canceled, false).unwrap().status, Published);
        assert!(Reopen.apply(Draft, false).is_err());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [Draft, Published, Paused, Closed, Canceled] {
            assert_eq!(EventStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EventStatus::parse("locked"), None);
        assert_eq!(EventStatus::parse(""), None);
    }

    #[test]
    fn rejection_messages_name_the_action_and_state() {
        let err = Pause.apply(Draft, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "action 'pause' is not allowed while the event is draft"
        );
    }
}
