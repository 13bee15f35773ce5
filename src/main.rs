use std::time::Duration;

use quiz_core::{ProgressStore, QuizPath, UserAction};
use quiz_persistence::FileProgressStore;
use quizflow::sample::{demo_fills, demo_layout};
use quizflow::{AppError, QuizApp, CONFIG};

/// Recorrido completo de la rama masculina hasta el formulario de contacto,
/// con un paso atrás en medio.
fn run_male_scenario(app: &mut QuizApp<FileProgressStore>) {
    let step = |app: &QuizApp<FileProgressStore>| app.active_step().map(|s| s.to_string()).unwrap_or_default();

    app.check("[name=\"gender\"][value=\"male\"]");
    app.settle();
    println!("Género elegido -> paso activo: {}", step(app));

    app.check("[name=\"m-goal-option\"][value=\"x\"]");
    app.dispatch(UserAction::Next);
    app.settle();
    println!("Opción x -> paso activo: {}", step(app));

    app.input("#m-weight", "96");
    println!("Peso 96 / objetivo 80 -> recomendación: {:?}", app.badge(QuizPath::Male));

    app.check("[name=\"m-body\"][value=\"athletic\"]");
    app.dispatch(UserAction::Next);
    app.settle();
    println!("Tipo de cuerpo athletic -> paso activo: {}", step(app));

    app.dispatch(UserAction::Back);
    app.settle();
    println!("Atrás -> paso activo: {} (athletic marcado: {:?})",
             step(app),
             app.field("[name=\"m-body\"][value=\"athletic\"]"));

    app.dispatch(UserAction::Next);
    app.settle();
    app.check("[name=\"m-frustration\"][value=\"diet\"]");
    app.settle();
    println!("Frustración elegida -> paso activo: {} (confeti: {})", step(app), app.confetti_launches());

    app.advance(Duration::from_millis(1200));
    println!("Barra m-athletic-bar al {:.0}%", app.fill_width("m-athletic-bar"));

    app.check("#m-athletic-commit");
    app.dispatch(UserAction::Next);
    app.settle();
    println!("Compromiso aceptado -> paso activo: {}", step(app));

    // El resumen avanza solo y, al ser el último de la sub-rama, deriva al contacto.
    app.advance(CONFIG.timings.auto_advance);
    app.settle();
    println!("Fin de la sub-rama -> paso activo: {}", step(app));

    app.input("#name", "Ana");
    app.input("#email", "ana@example.com");
}

fn main() -> Result<(), AppError> {
    quiz_persistence::init_dotenv();
    println!("Progreso en {}", CONFIG.store.path().display());

    let store = FileProgressStore::from_config(&CONFIG.store);
    let resumed = store.try_load()?;
    println!("Progreso previo: {:?}", resumed);

    let mut app = QuizApp::new(demo_layout()?, demo_fills(), store, CONFIG.timings);
    app.settle();
    println!("Arranque -> paso activo: {:?}", app.active_step());

    if resumed.is_some() {
        app.dispatch(UserAction::Restart);
        app.settle();
        println!("Reinicio -> paso activo: {:?}", app.active_step());
    }

    run_male_scenario(&mut app);

    println!("Estado guardado: {:?}", app.store().load());
    let report = app.report();
    println!("Eventos ({}): {}", report.events, report.codes);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}
