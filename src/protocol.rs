//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::{Assessment, AssessmentKind, GrammarReport};
use crate::domain::{Difficulty, ExerciseCategory, ExerciseView, PracticePhrase, ReplyOrigin, Topic, WordOfDay};
use crate::exercises::AnswerCheck;
use crate::tutor::TutorReply;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Assess {
        text: String,
        #[serde(default)]
        kind: AssessmentKind,
        #[serde(default, rename = "sessionId")]
        session_id: Option<Uuid>,
    },
    Converse {
        #[serde(default, rename = "sessionId")]
        session_id: Option<Uuid>,
        #[serde(default)]
        topic: Option<String>,
        text: String,
    },
    CorrectGrammar {
        text: String,
    },
    ListTopics,
    ListPhrases {
        #[serde(default)]
        difficulty: Option<Difficulty>,
    },
    ListExercises {
        #[serde(default)]
        category: Option<ExerciseCategory>,
    },
    CheckAnswer {
        #[serde(rename = "exerciseId")]
        exercise_id: String,
        #[serde(default)]
        answer: String,
        #[serde(default, rename = "sessionId")]
        session_id: Option<Uuid>,
    },
    VocabularyQuiz {
        #[serde(default)]
        count: Option<usize>,
    },
    WordOfDay,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Assessment {
        assessment: Assessment,
    },
    Conversation(ConversationOut),
    GrammarCorrection(GrammarCorrectionOut),
    Topics {
        topics: Vec<Topic>,
    },
    Phrases {
        phrases: Vec<PracticePhrase>,
    },
    Exercises {
        exercises: Vec<ExerciseView>,
    },
    AnswerChecked(AnswerCheck),
    WordOfDay {
        word: WordOfDay,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

/// Body for `/assess` and the per-scorer endpoints (`kind` ignored there).
#[derive(Debug, Deserialize)]
pub struct AssessIn {
    pub text: String,
    #[serde(default)]
    pub kind: AssessmentKind,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ConversationIn {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub topic: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationOut {
    pub topic: String,
    pub reply: TutorReply,
    /// Heuristic check of the learner's message.
    pub feedback: GrammarReport,
}

#[derive(Debug, Deserialize)]
pub struct GrammarIn {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct GrammarCorrectionOut {
    pub original: String,
    pub corrected: String,
    pub origin: ReplyOrigin,
    pub feedback: String,
    pub report: GrammarReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhrasesQuery {
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
pub struct ExercisesQuery {
    pub category: Option<ExerciseCategory>,
}

/// A blank `answer` is a valid guess ("no article").
#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(default)]
    pub answer: String,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionIn {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MasteryIn {
    pub word: String,
    pub mastery: u8,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub generator: Option<String>,
}
