//! Achievements derived from a session's counters. Nothing is stored: the list
//! is recomputed from `SessionStats` on every request.

use serde::Serialize;

use crate::session::SessionStats;

#[derive(Clone, Copy, Debug)]
enum Requirement {
  Conversations(u32),
  Vocabulary(u32),
  Points(u32),
  /// Share of correct exercise answers, once enough have been attempted.
  ExerciseAccuracy { min_attempts: u32, percent: u32 },
}

struct Milestone {
  id: &'static str,
  icon: &'static str,
  title: &'static str,
  description: &'static str,
  reward: u32,
  requirement: Requirement,
}

static MILESTONES: [Milestone; 5] = [
  Milestone {
    id: "first_conversation",
    icon: "💬",
    title: "Ice Breaker",
    description: "Completed your first conversation",
    reward: 10,
    requirement: Requirement::Conversations(1),
  },
  Milestone {
    id: "conversation_master",
    icon: "🗣️",
    title: "Conversation Master",
    description: "Completed 50 conversations",
    reward: 150,
    requirement: Requirement::Conversations(50),
  },
  Milestone {
    id: "vocabulary_collector",
    icon: "📚",
    title: "Vocabulary Collector",
    description: "Learned 100 words",
    reward: 200,
    requirement: Requirement::Vocabulary(100),
  },
  Milestone {
    id: "grammar_guru",
    icon: "🌟",
    title: "Grammar Guru",
    description: "Scored 95% over at least 20 exercises",
    reward: 150,
    requirement: Requirement::ExerciseAccuracy { min_attempts: 20, percent: 95 },
  },
  Milestone {
    id: "rising_star",
    icon: "🚀",
    title: "Rising Star",
    description: "Earned 1000 points",
    reward: 300,
    requirement: Requirement::Points(1000),
  },
];

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Achievement {
  pub id: &'static str,
  pub icon: &'static str,
  pub title: &'static str,
  pub description: &'static str,
  pub reward: u32,
  pub unlocked: bool,
  /// Current value towards `target`, capped at `target`.
  pub progress: u32,
  pub target: u32,
}

fn count(n: usize) -> u32 {
  u32::try_from(n).unwrap_or(u32::MAX)
}

fn evaluate(req: Requirement, stats: &SessionStats) -> (u32, u32) {
  match req {
    Requirement::Conversations(target) => (count(stats.conversations), target),
    Requirement::Vocabulary(target) => (count(stats.vocabulary), target),
    Requirement::Points(target) => (stats.points, target),
    Requirement::ExerciseAccuracy { min_attempts, percent } => {
      let accuracy = if stats.exercises_attempted >= min_attempts {
        (u64::from(stats.exercises_correct) * 100 / u64::from(stats.exercises_attempted)) as u32
      } else {
        0
      };
      (accuracy, percent)
    }
  }
}

pub fn achievements(stats: &SessionStats) -> Vec<Achievement> {
  MILESTONES
    .iter()
    .map(|m| {
      let (value, target) = evaluate(m.requirement, stats);
      Achievement {
        id: m.id,
        icon: m.icon,
        title: m.title,
        description: m.description,
        reward: m.reward,
        unlocked: value >= target,
        progress: value.min(target),
        target,
      }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Utc;
  use uuid::Uuid;

  fn stats() -> SessionStats {
    SessionStats {
      id: Uuid::nil(),
      username: "Student".into(),
      level: "B1".into(),
      started_at: Utc::now(),
      points: 0,
      vocabulary: 0,
      conversations: 0,
      assessments: 0,
      exercises_attempted: 0,
      exercises_correct: 0,
    }
  }

  fn unlocked(s: &SessionStats) -> Vec<&'static str> {
    achievements(s).into_iter().filter(|a| a.unlocked).map(|a| a.id).collect()
  }

  #[test]
  fn fresh_session_has_nothing_unlocked() {
    let list = achievements(&stats());
    assert_eq!(list.len(), MILESTONES.len());
    assert!(list.iter().all(|a| !a.unlocked && a.progress == 0));
  }

  #[test]
  fn thresholds_unlock_exactly_at_target() {
    let mut s = stats();
    s.conversations = 49;
    s.vocabulary = 100;
    s.points = 999;
    assert_eq!(unlocked(&s), vec!["first_conversation", "vocabulary_collector"]);

    s.conversations = 50;
    s.points = 1000;
    assert_eq!(unlocked(&s), vec!["first_conversation", "conversation_master", "vocabulary_collector", "rising_star"]);
  }

  #[test]
  fn progress_is_capped_at_target() {
    let mut s = stats();
    s.conversations = 75;
    let master = achievements(&s).into_iter().find(|a| a.id == "conversation_master").expect("listed");
    assert_eq!((master.progress, master.target), (50, 50));
  }

  #[test]
  fn accuracy_needs_enough_attempts() {
    let mut s = stats();
    s.exercises_attempted = 5;
    s.exercises_correct = 5;
    assert!(!unlocked(&s).contains(&"grammar_guru"));

    s.exercises_attempted = 20;
    s.exercises_correct = 19;
    assert!(unlocked(&s).contains(&"grammar_guru"));

    s.exercises_correct = 18;
    assert!(!unlocked(&s).contains(&"grammar_guru"));
  }
}
