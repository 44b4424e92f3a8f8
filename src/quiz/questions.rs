use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::quiz::Question;

/// The questions shipped with the bot.
pub fn builtin() -> Vec<Question> {
    vec![Question {
        text: "What is the first step before opening a computer?".to_string(),
        options: vec![
            "Wear gloves".to_string(),
            "Unplug the power cable".to_string(),
            "Touch the RAM".to_string(),
            "Shake the case".to_string(),
        ],
        correct: 1,
    }]
}

/// Read a JSON array of questions, e.g.
/// `[{"text": "...", "options": ["a", "b"], "correct": 0}]`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Question>> {
    let file = File::open(path.as_ref())?;
    let questions: Vec<Question> = serde_json::from_reader(BufReader::new(file))?;
    if questions.is_empty() {
        return Err(Error::EmptyQuiz);
    }
    for q in &questions {
        q.validate()?;
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("pc-assembly-{}-{name}", std::process::id()));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn builtin_is_valid() {
        let qs = builtin();
        assert_eq!(qs.len(), 1);
        assert!(qs.iter().all(|q| q.validate().is_ok()));
        assert_eq!(qs[0].options[qs[0].correct], "Unplug the power cable");
    }

    #[test]
    fn loads_json_bank() {
        let path = write_temp(
            "ok.json",
            r#"[{"text": "Which part stores data?", "options": ["SSD", "Fan"], "correct": 0}]"#,
        );
        let qs = load(&path).unwrap();
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].option_index("Fan"), Some(1));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_bad_index_in_file() {
        let path = write_temp(
            "bad.json",
            r#"[{"text": "?", "options": ["a"], "correct": 4}]"#,
        );
        assert!(matches!(load(&path), Err(Error::InvalidQuestion(_))));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_empty_bank_and_missing_file() {
        let path = write_temp("empty.json", "[]");
        assert!(matches!(load(&path), Err(Error::EmptyQuiz)));
        std::fs::remove_file(path).ok();
        assert!(matches!(load("/nonexistent/quiz.json"), Err(Error::Io(_))));
    }
}
