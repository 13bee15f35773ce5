//! Layout de demostración con las dos ramas, sub-ramas por tipo de cuerpo
//! y los rellenos animados de algunos pasos.
use std::time::Duration;

use quiz_adapters::FillSpec;
use quiz_core::{FieldKind, FieldSpec, FieldValue, QuizError, QuizLayout, QuizPath, StepKind, StepSpec};

pub fn demo_layout() -> Result<QuizLayout, QuizError> {
    QuizLayout::builder().gender_step(StepSpec::new("gender", StepKind::GenderSelect).with_fields([
                             FieldSpec::radio("gender", "male").with_gender_path(QuizPath::Male),
                             FieldSpec::radio("gender", "female").with_gender_path(QuizPath::Female),
                         ]))
                         // --- rama masculina ---
                         .path_step(QuizPath::Male,
                                    StepSpec::new("m-goal-choice", StepKind::OptionChoice).with_fields([
                                        FieldSpec::radio("m-goal-option", "x").with_option("x"),
                                        FieldSpec::radio("m-goal-option", "y").with_option("y"),
                                    ]))
                         .path_step(QuizPath::Male,
                                    StepSpec::new("m-body-goal-lose", StepKind::BodyGoal).with_option_reveal("x")
                                                                                         .with_goal_gender(QuizPath::Male)
                                                                                         .with_fields([
                                                                                             FieldSpec::radio("m-body", "athletic").with_body_type("athletic"),
                                                                                             FieldSpec::radio("m-body", "lean").with_body_type("lean"),
                                                                                             FieldSpec::range("m-weight").with_initial(FieldValue::text("90")),
                                                                                             FieldSpec::range("m-goal-weight").with_initial(FieldValue::text("80")),
                                                                                         ]))
                         .path_step(QuizPath::Male,
                                    StepSpec::new("m-body-goal-gain", StepKind::BodyGoal).with_option_reveal("y")
                                                                                         .with_goal_gender(QuizPath::Male)
                                                                                         .with_fields([
                                                                                             FieldSpec::radio("m-body-gain", "athletic").with_body_type("athletic"),
                                                                                             FieldSpec::radio("m-body-gain", "lean").with_body_type("lean"),
                                                                                         ]))
                         .body_type_step(QuizPath::Male,
                                         "athletic",
                                         StepSpec::new("m-frustrations", StepKind::RadioAutoAdvance).with_fields([
                                             FieldSpec::radio("m-frustration", "time").with_class("frustrations_option"),
                                             FieldSpec::radio("m-frustration", "diet").with_class("frustrations_option"),
                                             FieldSpec::radio("m-frustration", "motivation").with_class("frustrations_option"),
                                         ]))
                         .body_type_step(QuizPath::Male,
                                         "athletic",
                                         StepSpec::new("m-athletic-plan", StepKind::ButtonGatedAdvance).with_confetti()
                                                                                                      .with_field(FieldSpec::checkbox("m-athletic-commit")))
                         .body_type_step(QuizPath::Male,
                                         "athletic",
                                         StepSpec::new("m-athletic-summary", StepKind::TimedAutoAdvance))
                         .body_type_step(QuizPath::Male,
                                         "lean",
                                         StepSpec::new("m-lean-plan", StepKind::TimedAutoAdvance).with_contact_control())
                         // --- rama femenina ---
                         .path_step(QuizPath::Female,
                                    StepSpec::new("f-intro", StepKind::TimedAutoAdvance).with_delay(Duration::from_millis(3000)))
                         .path_step(QuizPath::Female,
                                    StepSpec::new("f-body-goal", StepKind::BodyGoal).with_goal_gender(QuizPath::Female)
                                                                                    .with_fields([
                                                                                        FieldSpec::radio("f-body", "curvy").with_body_type("curvy"),
                                                                                        FieldSpec::radio("f-body", "slim").with_body_type("slim"),
                                                                                        FieldSpec::range("f-weight").with_initial(FieldValue::text("70")),
                                                                                        FieldSpec::range("f-goal-weight").with_initial(FieldValue::text("62")),
                                                                                    ]))
                         .body_type_step(QuizPath::Female,
                                         "curvy",
                                         StepSpec::new("f-curvy-plan", StepKind::ButtonGatedAdvance).with_confetti()
                                                                                                   .with_contact_control()
                                                                                                   .with_auto_contact())
                         .body_type_step(QuizPath::Female,
                                         "slim",
                                         StepSpec::new("f-slim-pace", StepKind::RadioAutoAdvance).with_fields([
                                             FieldSpec::radio("f-pace", "steady"),
                                             FieldSpec::radio("f-pace", "fast"),
                                         ]))
                         // --- contacto ---
                         .contact_step(StepSpec::new("contact", StepKind::ContactTerminal).with_fields([
                                           FieldSpec::text("name"),
                                           FieldSpec::text("email"),
                                           FieldSpec::new(FieldKind::TextArea).with_class("notes"),
                                       ]))
                         .recommendation_inputs(QuizPath::Male, "#m-weight", "#m-goal-weight")
                         .recommendation_inputs(QuizPath::Female, "#f-weight", "#f-goal-weight")
                         .build()
}

/// Barras y rellenos líquidos del layout de demostración.
pub fn demo_fills() -> Vec<FillSpec> {
    vec![FillSpec::bar("m-athletic-bar", "m-athletic-plan", 85.0).with_start(40.0),
         FillSpec::bar("m-summary-bar", "m-athletic-summary", 100.0).with_duration(Duration::from_millis(1500)),
         FillSpec::liquid("f-intro-liquid", "f-intro", 70.0),
         FillSpec::liquid("f-curvy-liquid", "f-curvy-plan", 90.0).with_start(55.0)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::{BranchResolver, FlowState, SectionId};

    #[test]
    fn demo_layout_is_valid_and_ordered() {
        let layout = demo_layout().unwrap();
        let male: Vec<String> = layout.section_steps(SectionId::Male).iter().map(|s| s.to_string()).collect();
        assert_eq!(male,
                   vec!["m-goal-choice",
                        "m-body-goal-lose",
                        "m-body-goal-gain",
                        "m-frustrations",
                        "m-athletic-plan",
                        "m-athletic-summary",
                        "m-lean-plan"]);
        let state = FlowState { body_type: Some("curvy".into()),
                                ..FlowState::for_path(QuizPath::Female) };
        assert_eq!(BranchResolver::new(&layout).resolve(&state).len(), 1);
        assert!(layout.field(&"[name=\"m-frustration\"][value=\"diet\"]".into()).is_some());
        assert!(layout.field(&"textarea.notes".into()).is_some());
    }

    #[test]
    fn every_fill_points_at_a_real_step() {
        let layout = demo_layout().unwrap();
        for fill in demo_fills() {
            assert!(layout.step(&fill.step).is_some(), "{}", fill.id);
        }
    }
}
