use pc_assembly::quiz::{questions, Feedback, Phase, Question, QuizEvent, QuizSession};

fn bank(correct: &[usize]) -> Vec<Question> {
    correct
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Question::new(
                format!("Question {i}"),
                vec!["a".into(), "b".into(), "c".into(), "d".into()],
                *c,
            )
        })
        .collect::<Result<_, _>>()
        .unwrap()
}

/// Single question, correct index 1: right answer, then the final score.
#[test]
fn single_question_scenario() -> pc_assembly::error::Result<()> {
    let mut session = QuizSession::new(bank(&[1]))?;
    let events = session.select_option(1)?;
    assert_eq!(session.score(), 1);
    assert!(events.contains(&QuizEvent::Feedback(Feedback::GoodJob)));
    assert_eq!(Feedback::GoodJob.text(), "🎉 Good job!");

    let events = session.advance();
    assert_eq!(
        events,
        vec![
            QuizEvent::Finished { score: 1, total: 1 },
            QuizEvent::Progress { percent: 100 }
        ]
    );
    assert_eq!(session.phase(), Phase::Finished);
    assert!(session.score_text().ends_with("1/1"));
    Ok(())
}

#[test]
fn answering_twice_changes_nothing() -> pc_assembly::error::Result<()> {
    let mut session = QuizSession::new(bank(&[2, 0]))?;
    session.select_option(0)?;
    let before = session.clone();
    for option in 0..4 {
        assert!(session.select_option(option)?.is_empty());
    }
    assert_eq!(session, before);
    Ok(())
}

#[test]
fn final_score_counts_correct_answers() -> pc_assembly::error::Result<()> {
    let correct = [0, 3, 1, 1, 2];
    let picks = [0, 2, 1, 0, 2];
    let mut session = QuizSession::new(bank(&correct))?;
    let mut last = Vec::new();
    for pick in picks {
        session.select_option(pick)?;
        last = session.advance();
    }
    let expected = correct.iter().zip(picks).filter(|(c, p)| **c == *p).count();
    assert_eq!(expected, 3);
    assert_eq!(last[0], QuizEvent::Finished { score: 3, total: 5 });
    assert!(session.score() <= session.len());
    Ok(())
}

#[test]
fn progress_tracks_question_index() -> pc_assembly::error::Result<()> {
    let mut session = QuizSession::new(bank(&[0, 0, 0]))?;
    assert_eq!(session.percent(), 0);
    session.select_option(1)?;
    assert_eq!(
        session.advance(),
        vec![QuizEvent::Showing { index: 1 }, QuizEvent::Progress { percent: 33 }]
    );
    Ok(())
}

#[test]
fn builtin_bank_runs_end_to_end() -> pc_assembly::error::Result<()> {
    let mut session = QuizSession::new(questions::builtin())?;
    let question = session.current().cloned().unwrap_or_else(|| panic!("no question"));
    let index = question.option_index("Unplug the power cable");
    assert_eq!(index, Some(1));
    session.select_option(1)?;
    session.advance();
    assert_eq!(session.score_text(), "⭐ Your Score: 1/1");
    Ok(())
}
