//! Cache key composition for generated lesson content.
//!
//! The cache itself treats keys as opaque; these helpers keep the layout
//! consistent between the handlers that read and write them.

// == Checkpoints ==
/// Key for the checkpoint set of one video in one language.
pub fn checkpoints_key(video_id: &str, language: &str) -> String {
    format!("{}:{}", video_id, language)
}

// == Quiz ==
/// Key for a quiz; the question count is part of the identity.
pub fn quiz_key(video_id: &str, language: &str, question_count: u32) -> String {
    format!("{}:{}:{}", video_id, language, question_count)
}

// == Summary ==
/// Key for the summary of one video in one language.
pub fn summary_key(video_id: &str, language: &str) -> String {
    format!("{}:{}", video_id, language)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(checkpoints_key("vid1", "en"), "vid1:en");
        assert_eq!(quiz_key("vid1", "es", 5), "vid1:es:5");
        assert_eq!(summary_key("vid1", "fr"), "vid1:fr");
    }

    #[test]
    fn test_question_count_separates_quizzes() {
        assert_ne!(quiz_key("vid1", "en", 5), quiz_key("vid1", "en", 10));
    }
}
