//! Generated lesson content held in the content caches.
//!
//! Each category gets its own payload type so a cache instance can only
//! ever hold the kind of result it was built for.

use serde::{Deserialize, Serialize};

/// A point in the video where the learner is asked a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Offset into the video, in seconds
    pub timestamp: u32,
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
}

/// All checkpoints generated for one video and language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSet {
    pub video_id: String,
    pub language: String,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer_index: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub video_id: String,
    pub language: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub video_id: String,
    pub language: String,
    pub text: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}
