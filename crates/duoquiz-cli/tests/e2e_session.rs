//! End-to-end session tests over the sample catalog.
//!
//! These drive a full play-through from TOML on disk to the recorded
//! presenter calls, without the terminal front end.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use duoquiz_core::assign::assign_slots;
use duoquiz_core::mock::RecordingPresenter;
use duoquiz_core::model::{AssetRef, Slot};
use duoquiz_core::statistics::audit_catalog;
use duoquiz_core::{
    parser, Catalog, PresentationEvent, SelectionOutcome, Session, SessionConfig, SessionState,
};

fn sample_catalog() -> Catalog {
    parser::load_catalog(Path::new("../../levels")).unwrap()
}

fn seeded(seed: u64) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        ..Default::default()
    }
}

fn correct_slot(session: &Session<RecordingPresenter>) -> usize {
    session.assignment().unwrap().correct_slot().index()
}

#[test]
fn perfect_play_walks_every_question_in_order() {
    let catalog = sample_catalog();
    let expected: Vec<String> = catalog
        .levels()
        .iter()
        .flat_map(|l| l.questions.iter().cloned())
        .collect();

    let mut session = Session::new(catalog, RecordingPresenter::new(), seeded(11));
    session.start().unwrap();

    let mut outcomes = Vec::new();
    while !session.is_completed() {
        outcomes.push(session.select(correct_slot(&session)).unwrap());
    }

    let presenter = session.into_presenter();
    let shown: Vec<String> = presenter
        .events()
        .iter()
        .filter_map(|e| match e {
            PresentationEvent::Question { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(shown, expected);

    assert_eq!(
        outcomes,
        vec![
            SelectionOutcome::Advanced,
            SelectionOutcome::Advanced,
            SelectionOutcome::LevelComplete,
            SelectionOutcome::Advanced,
            SelectionOutcome::LevelComplete,
            SelectionOutcome::Completed,
        ]
    );
    assert_eq!(
        presenter.count(|e| matches!(e, PresentationEvent::LevelIntro { .. })),
        3
    );
    assert_eq!(presenter.last(), Some(&PresentationEvent::Completion));
}

#[test]
fn every_question_shows_one_correct_and_one_eligible_wrong_answer() {
    let catalog = sample_catalog();
    let mut session = Session::new(catalog.clone(), RecordingPresenter::new(), seeded(5));
    session.start().unwrap();

    while !session.is_completed() {
        let progress = session.progress();
        let level = catalog.level(progress.level).unwrap();
        let question = catalog.question(progress.level, progress.question).unwrap();
        let assignment = session.assignment().unwrap().clone();

        let correct = assignment.binding(assignment.correct_slot());
        assert_eq!(correct.text, question.correct_text);
        assert_eq!(correct.image.as_ref(), question.correct_image);

        let wrong = assignment.binding(assignment.correct_slot().other());
        assert_ne!(wrong.value, question.correct_value);
        assert!(wrong.value < level.wrong_answers.len());
        assert_eq!(wrong.text, level.wrong_answers[wrong.value]);

        session.select(assignment.correct_slot().index()).unwrap();
    }
}

#[test]
fn wrong_pick_keeps_question_and_shows_reaction() {
    let mut session = Session::new(sample_catalog(), RecordingPresenter::new(), seeded(8));
    session.start().unwrap();
    session.presenter_mut().take();

    let before = session.assignment().unwrap().clone();
    let wrong = before.correct_slot().other().index();

    assert_eq!(session.select(wrong).unwrap(), SelectionOutcome::Wrong);
    assert_eq!(session.select(wrong).unwrap(), SelectionOutcome::Wrong);
    assert_eq!(session.assignment(), Some(&before));
    assert_eq!(session.progress().question, 0);

    let events = session.presenter_mut().take();
    assert_eq!(events.len(), 2);
    for event in &events {
        let PresentationEvent::WrongAnswerReaction { animation } = event else {
            panic!("expected a reaction, got {event:?}");
        };
        let animation = animation.as_ref().unwrap();
        assert!(
            [AssetRef::from("anim/shake"), AssetRef::from("anim/buzz")].contains(animation),
            "{animation}"
        );
    }

    assert_eq!(
        session.select(before.correct_slot().index()).unwrap(),
        SelectionOutcome::Advanced
    );
}

#[test]
fn level_without_reactions_sends_empty_reaction() {
    let catalog = parser::load_catalog(Path::new("../../levels/02-capitals.toml")).unwrap();
    let mut session = Session::new(catalog, RecordingPresenter::new(), seeded(2));
    session.start().unwrap();

    // "capitals" has no reaction animations.
    let wrong = session.assignment().unwrap().correct_slot().other().index();
    session.select(wrong).unwrap();
    assert_eq!(
        session.presenter().last(),
        Some(&PresentationEvent::WrongAnswerReaction { animation: None })
    );
}

#[test]
fn stray_selections_are_ignored() {
    let mut session = Session::new(sample_catalog(), RecordingPresenter::new(), seeded(4));
    assert_eq!(session.select(0).unwrap(), SelectionOutcome::Ignored);
    assert_eq!(session.state(), SessionState::NotStarted);

    session.start().unwrap();
    assert_eq!(session.select(2).unwrap(), SelectionOutcome::Ignored);
    assert_eq!(session.select(usize::MAX).unwrap(), SelectionOutcome::Ignored);

    while !session.is_completed() {
        session.select(correct_slot(&session)).unwrap();
    }
    let recorded = session.presenter().events().len();
    assert_eq!(session.select(0).unwrap(), SelectionOutcome::Ignored);
    assert_eq!(session.select(1).unwrap(), SelectionOutcome::Ignored);
    assert_eq!(session.presenter().events().len(), recorded);
}

#[test]
fn images_follow_the_catalog() {
    let mut session = Session::new(sample_catalog(), RecordingPresenter::new(), seeded(21));
    session.start().unwrap();

    let events = session.presenter().events().to_vec();
    assert_eq!(
        events[0],
        PresentationEvent::LevelIntro {
            index: 0,
            id: "animals".into(),
            name: "Animals".into(),
            animation: Some(AssetRef::from("anim/animals-intro")),
        }
    );
    assert_eq!(
        events[1],
        PresentationEvent::Question {
            text: "Which animal barks?".into(),
            image: Some(AssetRef::from("img/bark.png")),
        }
    );

    let correct = session.assignment().unwrap().correct_slot();
    let PresentationEvent::AnswerSlot { text, image, .. } = &events[2 + correct.index()] else {
        panic!("expected answer slots after the question");
    };
    assert_eq!(text, "Dog");
    assert_eq!(image.as_ref(), Some(&AssetRef::from("img/dog.png")));

    // Question 2 has no entry in answer_images.
    session.select(correct.index()).unwrap();
    session.select(correct_slot(&session)).unwrap();
    let assignment = session.assignment().unwrap();
    assert_eq!(assignment.binding(assignment.correct_slot()).text, "Chicken");
    assert!(assignment.binding(assignment.correct_slot()).image.is_none());
}

#[test]
fn repeat_on_wrong_redraws_same_bindings() {
    let config = SessionConfig {
        seed: Some(13),
        repeat_question_on_wrong: true,
    };
    let mut session = Session::new(sample_catalog(), RecordingPresenter::new(), config);
    session.start().unwrap();
    let first_screen: Vec<_> = session.presenter_mut().take().into_iter().skip(1).collect();

    let wrong = session.assignment().unwrap().correct_slot().other().index();
    session.select(wrong).unwrap();
    let after_wrong = session.presenter_mut().take();

    assert!(matches!(
        after_wrong[0],
        PresentationEvent::WrongAnswerReaction { .. }
    ));
    assert_eq!(after_wrong[1..], first_screen[..]);
}

#[test]
fn same_seed_same_play_through() {
    let play = |seed| {
        let mut session = Session::new(sample_catalog(), RecordingPresenter::new(), seeded(seed));
        session.start().unwrap();
        let mut pick = 0;
        while !session.is_completed() {
            session.select(pick).unwrap();
            pick = 1 - pick;
        }
        session.into_presenter().take()
    };
    assert_eq!(play(77), play(77));
}

#[test]
fn placement_and_wrong_pool_are_balanced() {
    let catalog = sample_catalog();
    let mut rng = StdRng::seed_from_u64(2024);
    let report = audit_catalog(&catalog, 10_000, &mut rng).unwrap();
    assert_eq!(report.len(), catalog.total_questions());

    for balance in &report {
        assert_eq!(balance.slots.total(), 10_000);
        let share = balance.slots.share(Slot::First);
        assert!(
            (0.47..0.53).contains(&share),
            "{} q{}: first-slot share {share}",
            balance.level_id,
            balance.question
        );
        let pool_total: u64 = balance.wrong_counts.iter().map(|&(_, c)| c).sum();
        assert_eq!(pool_total, 10_000);
    }

    // "colours" has correct value 2 and pool {0, 1, 2}: only 0 and 1 are eligible.
    let colours = report.iter().find(|b| b.level_id == "colours").unwrap();
    let eligible: Vec<usize> = colours.wrong_counts.iter().map(|&(i, _)| i).collect();
    assert_eq!(eligible, vec![0, 1]);
}

#[test]
fn correct_value_never_offered_as_wrong_answer() {
    let catalog = sample_catalog();
    let mut rng = StdRng::seed_from_u64(99);
    for (level_index, level) in catalog.levels().iter().enumerate() {
        for (question, &value) in level.correct_sequence.iter().enumerate() {
            for _ in 0..500 {
                let a = assign_slots(&catalog, level_index, question, &mut rng).unwrap();
                assert_ne!(a.value_at(a.correct_slot().other()), value);
            }
        }
    }
}
