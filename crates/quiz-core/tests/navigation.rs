
use quiz_core::{FieldValue, InMemoryProgressStore, InputSurface, Phase, PresentationEvent, QuizPath, StepController, TransitionPhase,
                UserAction};
use test_support::*;

fn controller() -> StepController<InMemoryProgressStore, quiz_core::MemorySurface> {
    StepController::in_memory(quiz_layout()).build()
}

#[test]
fn fresh_start_shows_gender_selector_without_history() {
    let ctrl = controller();
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    assert!(ctrl.state().is_initial());
    assert_eq!(ctrl.history_len(), 0);
    assert_eq!(ctrl.phase(), Phase::Idle);
    assert_eq!(ctrl.event_codes(), vec!["S", "L", "P", "A", "R"]);
    assert_eq!(ctrl.store().raw(), Some(r#"{"selectedPath":null,"bodyType":null,"currentStep":0}"#));
}

#[test]
fn gender_choice_runs_exit_then_enter_sequence() {
    let mut ctrl = controller();
    let boot = ctrl.journal().len() as u64;

    assert!(ctrl.dispatch(UserAction::Check(radio("gender", "male"))));
    assert_eq!(ctrl.phase(), Phase::Transitioning(TransitionPhase::ExitPending));
    assert_eq!(ctrl.state().selected_path, Some(QuizPath::Male));
    assert_eq!(ctrl.history_len(), 1);
    assert_eq!(ctrl.store().raw(), Some(r#"{"selectedPath":"male","bodyType":null,"currentStep":0}"#));

    // Cualquier avance durante la transición se descarta.
    assert!(!ctrl.dispatch(UserAction::Next));
    assert!(!ctrl.dispatch(UserAction::Back));
    assert_eq!(ctrl.history_len(), 1);

    ctrl.advance_time(ms(199));
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    ctrl.advance_time(ms(1));
    assert_eq!(active(&ctrl), None);
    assert_eq!(ctrl.phase(), Phase::Transitioning(TransitionPhase::Exited));
    ctrl.advance_time(ms(399));
    assert_eq!(active(&ctrl), None);
    ctrl.advance_time(ms(1));
    assert_eq!(active(&ctrl).as_deref(), Some("m-option"));
    assert_eq!(ctrl.phase(), Phase::Idle);

    let codes: Vec<&str> = ctrl.journal().since(boot).iter().map(|e| e.event.code()).collect();
    assert_eq!(codes, vec!["F", "S", "D", "L", "P", "A"]);
}

#[test]
fn option_choice_filters_sequence_and_continues_after_current() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    settle(&mut ctrl);

    assert!(!ctrl.dispatch(UserAction::Next), "next without an option is ignored");
    assert!(!ctrl.dispatch(UserAction::Check(radio("m-opt", "x"))));
    assert!(ctrl.dispatch(UserAction::Next));
    settle(&mut ctrl);

    assert_eq!(sequence_ids(&ctrl), vec!["m-option", "m-goal-x", "a1", "a2", "s1"]);
    assert_eq!(ctrl.state().current_step, 1);
    assert_eq!(active(&ctrl).as_deref(), Some("m-goal-x"));
    assert_eq!(ctrl.history_len(), 2);
}

#[test]
fn body_goal_opens_branch_and_branch_end_routes_to_contact() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("m-opt", "x")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);

    assert!(!ctrl.dispatch(UserAction::Next), "next without a body type is ignored");
    ctrl.dispatch(UserAction::Check(radio("m-body", "athletic")));
    assert!(ctrl.dispatch(UserAction::Next));
    settle(&mut ctrl);
    assert_eq!(sequence_ids(&ctrl), vec!["a1", "a2"]);
    assert_eq!(ctrl.state().body_type.as_deref(), Some("athletic"));
    assert_eq!(ctrl.history_len(), 3);
    assert_eq!(ctrl.store().raw(), Some(r#"{"selectedPath":"male","bodyType":"athletic","currentStep":0}"#));

    // Paso sin botón: marcar un radio avanza.
    assert!(ctrl.dispatch(UserAction::Check(radio("a1-choice", "1"))));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("a2"));

    // Paso con botón y toggles: exige uno marcado.
    assert!(!ctrl.dispatch(UserAction::Next));
    assert!(!ctrl.dispatch(UserAction::Check(loc("#a2-agree"))));
    assert!(ctrl.dispatch(UserAction::Next));
    settle(&mut ctrl);

    assert_eq!(active(&ctrl).as_deref(), Some("contact-form"));
    assert!(ctrl.state().on_contact);
    assert_eq!(ctrl.history_len(), 5);
    assert_eq!(ctrl.store().raw(),
               Some(r#"{"selectedPath":"male","bodyType":"athletic","currentStep":0,"onContact":true}"#));

    // Terminal: no avanza.
    assert!(!ctrl.dispatch(UserAction::Next));

    // Una sola entrada de historia para la derivación: Back vuelve a a2.
    assert!(ctrl.dispatch(UserAction::Back));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("a2"));
    assert!(!ctrl.state().on_contact);
    assert!(is_checked(ctrl.surface(), &loc("#a2-agree")));
}

#[test]
fn back_restores_fields_and_clears_auto_advance_toggles_after_two_frames() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("m-opt", "x")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("m-body", "athletic")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("a1-choice", "2")));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("a2"));

    ctrl.dispatch(UserAction::Back);
    ctrl.advance_time(ms(600));
    assert_eq!(active(&ctrl).as_deref(), Some("a1"));
    // El radio que disparó el avance sigue marcado hasta dos frames después.
    assert!(is_checked(ctrl.surface(), &radio("a1-choice", "2")));
    ctrl.render_frame();
    assert!(is_checked(ctrl.surface(), &radio("a1-choice", "2")));
    ctrl.render_frame();
    assert!(!is_checked(ctrl.surface(), &radio("a1-choice", "2")));
    let last = ctrl.events().last().cloned();
    assert_eq!(last, Some(PresentationEvent::LayoutRequested { step_id: "a1".into() }));

    // El visitante cambió el tipo de cuerpo a mano; Back lo restaura.
    ctrl.surface_mut().set_value(&radio("m-body", "slim"), FieldValue::Toggle(true));
    ctrl.dispatch(UserAction::Back);
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("m-goal-x"));
    assert_eq!(ctrl.state().body_type, None);
    assert!(is_checked(ctrl.surface(), &radio("m-body", "athletic")));
    assert!(!is_checked(ctrl.surface(), &radio("m-body", "slim")));

    ctrl.dispatch(UserAction::Back);
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("m-option"));
    assert!(is_checked(ctrl.surface(), &radio("m-opt", "x")));

    ctrl.dispatch(UserAction::Back);
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    assert!(ctrl.state().is_initial());
    assert!(is_checked(ctrl.surface(), &radio("gender", "male")));
    assert_eq!(ctrl.history_len(), 0);

    // Pila vacía: vuelve (o se queda) en el selector sin apilar.
    assert!(ctrl.dispatch(UserAction::Back));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    assert_eq!(ctrl.history_len(), 0);
}

#[test]
fn timed_steps_advance_and_are_cancelled_on_leave() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "female")));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("f1"));

    ctrl.advance_time(ms(999));
    assert_eq!(active(&ctrl).as_deref(), Some("f1"));
    assert!(!ctrl.is_transitioning());
    ctrl.advance_time(ms(1));
    assert!(ctrl.is_transitioning());
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("f2"));
    assert_eq!(ctrl.event_codes().last(), Some(&"C"));

    assert!(ctrl.dispatch(UserAction::Next));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("f3"));

    // Último paso fuera de una sub-rama: sin efecto.
    let history = ctrl.history_len();
    assert!(!ctrl.dispatch(UserAction::Next));
    assert_eq!(active(&ctrl).as_deref(), Some("f3"));
    assert_eq!(ctrl.history_len(), history);

    // Volver a f1 reprograma su temporizador; salir antes lo cancela.
    ctrl.dispatch(UserAction::Back);
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Back);
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("f1"));
    ctrl.dispatch(UserAction::Back);
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    ctrl.advance_time(ms(5000));
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    assert!(!ctrl.is_transitioning());
}

#[test]
fn contact_control_routes_and_last_step_with_control_stays() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("m-opt", "x")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);
    assert!(!ctrl.dispatch(UserAction::Contact), "no contact control on this step");
    ctrl.dispatch(UserAction::Check(radio("m-body", "slim")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("s1"));

    // El temporizado llega al final de la sub-rama, pero el paso tiene su
    // propio botón de contacto: se queda.
    ctrl.advance_time(ms(2500));
    assert!(!ctrl.is_transitioning());
    assert_eq!(active(&ctrl).as_deref(), Some("s1"));

    let history = ctrl.history_len();
    assert!(ctrl.dispatch(UserAction::Contact));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("contact-form"));
    assert_eq!(ctrl.history_len(), history + 1);
}

#[test]
fn restart_mid_transition_resets_everything() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    assert!(ctrl.is_transitioning());

    assert!(ctrl.dispatch(UserAction::Restart));
    assert!(!ctrl.is_transitioning());
    assert!(ctrl.state().is_initial());
    assert_eq!(ctrl.history_len(), 0);
    assert_eq!(ctrl.store().raw(), None);
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));

    ctrl.advance_time(ms(5000));
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
    assert!(!ctrl.is_transitioning());

    let tail: Vec<&str> = ctrl.event_codes().into_iter().rev().take(5).collect();
    assert_eq!(tail, vec!["A", "P", "L", "S", "D"]);
}

#[test]
fn option_without_following_step_is_a_no_op() {
    use quiz_core::{FieldSpec, QuizLayout, StepKind, StepSpec};
    let layout = QuizLayout::builder().gender_step(StepSpec::new("g", StepKind::GenderSelect).with_field(FieldSpec::radio("gender", "male").with_gender_path(QuizPath::Male)))
                                      .path_step(QuizPath::Male,
                                                 StepSpec::new("opt", StepKind::OptionChoice).with_field(FieldSpec::radio("o", "z").with_option("z")))
                                      .path_step(QuizPath::Male, StepSpec::new("only-x", StepKind::TimedAutoAdvance).with_option_reveal("x"))
                                      .build()
                                      .unwrap();
    let mut ctrl = StepController::in_memory(layout).build();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("o", "z")));
    assert!(!ctrl.dispatch(UserAction::Next));
    assert_eq!(active(&ctrl).as_deref(), Some("opt"));
    assert_eq!(ctrl.history_len(), 1);
}

#[test]
fn recheck_of_held_back_radio_does_not_advance() {
    let mut ctrl = controller();
    ctrl.dispatch(UserAction::Check(radio("gender", "male")));
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("m-opt", "x")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("m-body", "athletic")));
    ctrl.dispatch(UserAction::Next);
    settle(&mut ctrl);
    ctrl.dispatch(UserAction::Check(radio("a1-choice", "2")));
    settle(&mut ctrl);

    ctrl.dispatch(UserAction::Back);
    ctrl.advance_time(ms(600));
    assert_eq!(active(&ctrl).as_deref(), Some("a1"));
    assert!(is_checked(ctrl.surface(), &radio("a1-choice", "2")));

    // Sigue marcado: volver a marcarlo no es un cambio.
    assert!(!ctrl.dispatch(UserAction::Check(radio("a1-choice", "2"))));
    assert!(!ctrl.is_transitioning());
    assert_eq!(active(&ctrl).as_deref(), Some("a1"));

    ctrl.render_frame();
    ctrl.render_frame();
    assert!(!is_checked(ctrl.surface(), &radio("a1-choice", "2")));
    assert!(ctrl.dispatch(UserAction::Check(radio("a1-choice", "2"))));
    settle(&mut ctrl);
    assert_eq!(active(&ctrl).as_deref(), Some("a2"));
}

#[test]
fn index_stays_in_range_over_a_full_forward_and_back_run() {
    fn in_range(ctrl: &StepController<InMemoryProgressStore, quiz_core::MemorySurface>) {
        assert!(ctrl.state().current_step < ctrl.sequence().len(),
                "index {} out of range for {:?}",
                ctrl.state().current_step,
                ctrl.sequence());
    }

    let mut ctrl = controller();
    in_range(&ctrl);
    let forward = [UserAction::Check(radio("gender", "male")),
                   UserAction::Check(radio("m-opt", "x")),
                   UserAction::Next,
                   UserAction::Check(radio("m-body", "athletic")),
                   UserAction::Next,
                   UserAction::Check(radio("a1-choice", "1")),
                   UserAction::Check(loc("#a2-agree")),
                   UserAction::Next];
    for action in forward {
        ctrl.dispatch(action);
        in_range(&ctrl);
        settle(&mut ctrl);
        in_range(&ctrl);
    }
    assert_eq!(active(&ctrl).as_deref(), Some("contact-form"));

    while ctrl.history_len() > 0 {
        assert!(ctrl.dispatch(UserAction::Back));
        in_range(&ctrl);
        ctrl.render_frame();
        in_range(&ctrl);
        settle(&mut ctrl);
        in_range(&ctrl);
    }
    assert_eq!(active(&ctrl).as_deref(), Some("gender-step"));
}
