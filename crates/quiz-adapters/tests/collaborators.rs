use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use quiz_adapters::{Animated, ConfettiLauncher, FillSpec, OptionHighlighter, ProgressIndicator, RecommendationBadges,
                    StepAnimations};
use quiz_core::{FieldLocator, FieldSpec, FieldValue, PresentationEvent, PresentationNotifier, QuizLayout, QuizPath,
                Recommendation, SectionId, StepController, StepKind, StepSpec, UserAction};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn activated(step: &str) -> PresentationEvent {
    PresentationEvent::StepActivated { step_id: step.into() }
}

fn deactivated(step: &str) -> PresentationEvent {
    PresentationEvent::StepDeactivated { step_id: step.into() }
}

#[test]
fn fills_restart_on_activation_and_reset_after_deactivation() {
    let mut anim = StepAnimations::new(vec![FillSpec::bar("bar-1", "s1", 80.0),
                                            FillSpec::liquid("liq-1", "s1", 60.0).with_start(20.0)
                                                                                   .with_duration(ms(1000)),
                                            FillSpec::bar("bar-2", "s2", 50.0)]);
    anim.notify(&activated("s1"));
    assert_eq!(anim.width("liq-1"), 20.0);
    assert_eq!(anim.state("liq-1").unwrap().popups, vec!["+40%".to_string()]);
    assert_eq!(anim.width("bar-2"), 0.0);

    anim.advance(ms(1000));
    assert_eq!(anim.width("liq-1"), 60.0);
    assert!(!anim.state("liq-1").unwrap().is_running());
    assert!(anim.state("bar-1").unwrap().is_running());
    anim.advance(ms(1000));
    assert_eq!(anim.width("bar-1"), 80.0);
    assert_eq!(anim.state("bar-1").unwrap().completions, 1);
    // El texto emergente desaparece.
    anim.advance(ms(500));
    assert!(anim.state("liq-1").unwrap().popups.is_empty());

    // Salida: el reinicio llega 300 ms después.
    anim.notify(&deactivated("s1"));
    anim.advance(ms(299));
    assert_eq!(anim.width("bar-1"), 80.0);
    anim.advance(ms(1));
    assert_eq!(anim.width("bar-1"), 0.0);
    assert_eq!(anim.state("bar-1").unwrap().label(), "0%");
    assert_eq!(anim.state("bar-1").unwrap().completions, 1);
}

#[test]
fn reactivation_cancels_pending_reset_and_cancel_is_idempotent() {
    let mut anim = StepAnimations::new(vec![FillSpec::bar("bar", "s1", 100.0)]);
    anim.notify(&activated("s1"));
    anim.advance(ms(500));
    anim.notify(&deactivated("s1"));
    anim.advance(ms(100));
    anim.notify(&activated("s1"));
    anim.advance(ms(250));
    assert!(anim.width("bar") > 0.0, "pending reset must not fire after reactivation");

    assert!(anim.cancel("bar"));
    assert!(!anim.cancel("bar"));
    assert!(!anim.cancel("unknown"));
    anim.cancel_all();
    anim.cancel_all();
}

#[test]
fn collaborators_follow_a_controller() {
    let layout = QuizLayout::builder().gender_step(StepSpec::new("g", StepKind::GenderSelect).with_fields([
                                          FieldSpec::radio("gender", "male").with_gender_path(QuizPath::Male),
                                          FieldSpec::radio("gender", "female").with_gender_path(QuizPath::Female),
                                      ]))
                                      .path_step(QuizPath::Female,
                                                 StepSpec::new("f1", StepKind::ButtonGatedAdvance).with_fields([
                                                                                            FieldSpec::range("fw").with_initial(FieldValue::text("70")),
                                                                                            FieldSpec::range("fg").with_initial(FieldValue::text("60")),
                                                                                        ]))
                                      .path_step(QuizPath::Female, StepSpec::new("f2", StepKind::ButtonGatedAdvance).with_confetti())
                                      .recommendation_inputs(QuizPath::Female, "#fw", "#fg")
                                      .build()
                                      .unwrap();

    let progress = Rc::new(RefCell::new(ProgressIndicator::new()));
    let badges = Rc::new(RefCell::new(RecommendationBadges::new()));
    let confetti = Rc::new(RefCell::new(ConfettiLauncher::new()));
    let highlight = Rc::new(RefCell::new(OptionHighlighter::new()));
    let mut ctrl = StepController::in_memory(layout).notifier(Box::new(progress.clone()))
                                                    .notifier(Box::new(badges.clone()))
                                                    .notifier(Box::new(confetti.clone()))
                                                    .notifier(Box::new(highlight.clone()))
                                                    .build();
    assert_eq!(progress.borrow().percent(), 100.0);
    assert_eq!(progress.borrow().section(), Some(SectionId::GenderSelector));
    assert_eq!(badges.borrow().shown(QuizPath::Female), Some(Recommendation::Overweight));

    let female = FieldLocator::from("[name=\"gender\"][value=\"female\"]");
    ctrl.dispatch(UserAction::Check(female.clone()));
    assert!(highlight.borrow().is_highlighted(&female));
    ctrl.run_until_idle();
    assert_eq!(progress.borrow().percent(), 50.0);
    assert_eq!(progress.borrow().section(), Some(SectionId::Female));

    ctrl.dispatch(UserAction::Input("#fg".into(), "68".into()));
    assert_eq!(badges.borrow().shown(QuizPath::Female), Some(Recommendation::Soft));

    ctrl.dispatch(UserAction::Next);
    ctrl.run_until_idle();
    assert_eq!(progress.borrow().percent(), 100.0);
    assert_eq!(confetti.borrow().launches(), 1);
    confetti.borrow_mut().advance(ms(2000));
    assert_eq!(confetti.borrow().bursts().len(), 14);

    // Otro radio del grupo quita el resaltado del anterior.
    let male = FieldLocator::from("[name=\"gender\"][value=\"male\"]");
    ctrl.dispatch(UserAction::Check(male.clone()));
    assert!(highlight.borrow().is_highlighted(&male));
    assert!(!highlight.borrow().is_highlighted(&female));
}
